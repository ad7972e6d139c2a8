//! Plain text rendering for canonical documents.

use crate::model::{Block, Document, Table};

use super::visitor::{visit_block, BlockVisitor, ImageView, ItemChild, ListView};

/// Convert a document to plain text.
pub fn to_text(doc: &Document) -> String {
    let mut renderer = TextRenderer { doc, depth: 0 };
    let mut parts = Vec::new();
    for section in &doc.sections {
        if let Some(header) = section.header() {
            parts.push(header.to_string());
        }
        for block in &section.blocks {
            let text = visit_block(doc, block, &mut renderer);
            if !text.trim().is_empty() {
                parts.push(text);
            }
        }
    }
    parts.join("\n\n").trim().to_string()
}

struct TextRenderer<'a> {
    doc: &'a Document,
    depth: usize,
}

impl BlockVisitor for TextRenderer<'_> {
    type Output = String;

    fn paragraph(&mut self, text: &str) -> String {
        text.to_string()
    }

    fn list(&mut self, list: &ListView<'_>) -> String {
        let doc = self.doc;
        let depth = self.depth;
        let indent = "  ".repeat(depth);
        let mut lines = Vec::new();
        for item in list.items.iter().filter(|i| !i.is_empty()) {
            let marker = if list.is_ordered() {
                format!("{}.", item.ordinal)
            } else {
                "-".to_string()
            };
            let mut pieces = Vec::new();
            for child in &item.children {
                let piece = match child {
                    ItemChild::Text(text) => text.trim().to_string(),
                    ItemChild::List(nested) => {
                        self.depth = depth + 1;
                        let out = self.list(nested);
                        self.depth = depth;
                        out
                    }
                    ItemChild::Other(block) => {
                        self.depth = 0;
                        let out = visit_block(doc, block, self).trim().to_string();
                        self.depth = depth;
                        out
                    }
                };
                if !piece.is_empty() {
                    pieces.push(piece);
                }
            }
            lines.push(format!("{}{} {}", indent, marker, pieces.join("\n")));
        }
        lines.join("\n")
    }

    fn image(&mut self, image: &ImageView<'_>) -> String {
        image.alt.to_string()
    }

    fn table(&mut self, table: &Table) -> String {
        let (headers, rows) = table.to_grid();
        std::iter::once(headers)
            .filter(|h| !h.is_empty())
            .chain(rows)
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn quote(&mut self, text: &str, attribution: Option<&str>) -> String {
        match attribution.filter(|a| !a.is_empty()) {
            Some(source) => format!("{}\n-- {}", text, source),
            None => text.to_string(),
        }
    }

    fn code(&mut self, _block: &Block, code: &str, _language: Option<&str>) -> String {
        code.trim_end_matches('\n').to_string()
    }

    fn skip(&mut self, _block: &Block) -> String {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Section;

    #[test]
    fn test_to_text() {
        let mut doc = Document::new();
        doc.add_section(
            Section::with_header("s1", "Intro")
                .with_block(Block::paragraph("p1", "Hello, world!"))
                .with_block(Block::ordered_list(
                    "ol",
                    vec![
                        Block::list_item("li1", vec![Block::paragraph("p2", "First")]),
                        Block::list_item(
                            "li2",
                            vec![
                                Block::paragraph("p3", "Second"),
                                Block::unordered_list(
                                    "ul",
                                    vec![Block::list_item(
                                        "li3",
                                        vec![Block::text_content("t", "Inner")],
                                    )],
                                ),
                            ],
                        ),
                    ],
                )),
        );
        doc.add_section(Section::new("s2").with_block(Block::table(
            "t1",
            Table::grid(["A", "B"], vec![vec!["1".to_string(), "2".to_string()]]),
        )));

        assert_eq!(
            to_text(&doc),
            "Intro\n\nHello, world!\n\n1. First\n2. Second\n  - Inner\n\nA\tB\n1\t2"
        );
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(to_text(&Document::new()), "");
    }
}
