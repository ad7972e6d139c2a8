//! Markdown rendering for canonical documents.
//!
//! Text passes through verbatim: Markdown metacharacters in the source are
//! never escaped.

use crate::model::{Block, Document, RowGroupKind, Section, Table};

use super::visitor::{visit_block, BlockVisitor, ImageView, ItemChild, ItemView, ListView};
use super::{RenderOptions, RenderResult, RenderStats};

/// One separator segment per table column.
const TABLE_SEPARATOR_SEGMENT: &str = "--------------";

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> String {
    MarkdownRenderer::new(doc, options).render()
}

/// Convert a document to Markdown with default options.
pub fn render_markdown(doc: &Document) -> String {
    to_markdown(doc, &RenderOptions::default())
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &Document, options: &RenderOptions) -> RenderResult {
    let content = to_markdown(doc, options);
    let mut stats = RenderStats::collect(doc);
    stats.count_text(&content);
    RenderResult::new(content, doc.metadata.clone(), stats)
}

/// Markdown renderer.
pub struct MarkdownRenderer<'a> {
    doc: &'a Document,
    options: &'a RenderOptions,
    depth: usize,
}

impl<'a> MarkdownRenderer<'a> {
    /// Create a new Markdown renderer over a document.
    pub fn new(doc: &'a Document, options: &'a RenderOptions) -> Self {
        Self {
            doc,
            options,
            depth: 0,
        }
    }

    /// Render the whole document.
    pub fn render(mut self) -> String {
        let doc = self.doc;
        let body = doc
            .sections
            .iter()
            .map(|section| self.render_section(section))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        let body = body.trim();

        if self.options.include_frontmatter {
            let frontmatter = doc.metadata.to_yaml_frontmatter();
            if body.is_empty() {
                return frontmatter.trim().to_string();
            }
            return format!("{}\n{}", frontmatter, body);
        }

        body.to_string()
    }

    /// Render one section: its header line, then its blocks.
    pub fn render_section(&mut self, section: &Section) -> String {
        let header = section.header().map(|h| format!("# {}", h));
        let body = self.render_blocks(&section.blocks, "\n\n");

        match (header, body.is_empty()) {
            (Some(header), false) => format!("{}\n\n{}", header, body),
            (Some(header), true) => header,
            (None, _) => body,
        }
    }

    fn render_blocks(&mut self, blocks: &[Block], separator: &str) -> String {
        let doc = self.doc;
        blocks
            .iter()
            .map(|b| self.at_depth(0, |r| visit_block(doc, b, r)))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn at_depth<T>(&mut self, depth: usize, f: impl FnOnce(&mut Self) -> T) -> T {
        let saved = std::mem::replace(&mut self.depth, depth);
        let out = f(self);
        self.depth = saved;
        out
    }

    fn render_item(&mut self, list: &ListView<'_>, item: &ItemView<'_>) -> String {
        let marker = if list.is_ordered() {
            format!("{}.", item.ordinal)
        } else {
            self.options.list_marker.to_string()
        };

        let doc = self.doc;
        let depth = self.depth;
        let mut pieces = Vec::with_capacity(item.children.len());
        for child in &item.children {
            match child {
                ItemChild::Text(text) => pieces.push(text.trim().to_string()),
                ItemChild::List(nested) => {
                    let rendered = self.at_depth(depth + 1, |r| r.list(nested));
                    if !rendered.is_empty() {
                        pieces.push(rendered);
                    }
                }
                ItemChild::Other(block) => {
                    let rendered = self.at_depth(0, |r| visit_block(doc, block, r));
                    let rendered = rendered.trim();
                    if !rendered.is_empty() {
                        pieces.push(rendered.to_string());
                    }
                }
            }
        }

        format!("{}{} {}", "  ".repeat(depth), marker, pieces.join("\n"))
    }

    fn render_table(&self, table: &Table) -> String {
        let mut lines = Vec::new();
        match table {
            Table::Grid(grid) => {
                if !grid.headers.is_empty() {
                    lines.push(table_row(&grid.headers));
                    lines.push(table_separator(grid.headers.len()));
                }
                lines.extend(grid.rows.iter().map(|row| table_row(row)));
            }
            Table::Grouped(grouped) => {
                for group in &grouped.row_groups {
                    for (index, row) in group.rows.iter().enumerate() {
                        let cells = row.texts();
                        lines.push(table_row(&cells));
                        if group.kind == RowGroupKind::Head && index == 0 {
                            lines.push(table_separator(cells.len()));
                        }
                    }
                }
            }
        }
        lines.join("\n")
    }
}

impl BlockVisitor for MarkdownRenderer<'_> {
    type Output = String;

    fn paragraph(&mut self, text: &str) -> String {
        text.to_string()
    }

    fn header(&mut self, text: &str, level: u8) -> String {
        let level = self.options.heading_level(level);
        format!("{} {}", "#".repeat(level as usize), text)
    }

    fn list(&mut self, list: &ListView<'_>) -> String {
        list.items
            .iter()
            .filter(|item| !item.is_empty())
            .map(|item| self.render_item(list, item))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn stray_item(&mut self, _block: &Block, item: &ItemView<'_>) -> String {
        let doc = self.doc;
        item.blocks()
            .into_iter()
            .map(|b| self.at_depth(0, |r| visit_block(doc, b, r)))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn image(&mut self, image: &ImageView<'_>) -> String {
        let Some(src) = image.src else {
            return String::new();
        };
        let mut out = format!("![{}]({})", image.alt, src);
        if let Some(caption) = image.caption {
            out.push_str(&format!("\n*{}*", caption));
        }
        out
    }

    fn table(&mut self, table: &Table) -> String {
        self.render_table(table)
    }

    fn quote(&mut self, text: &str, attribution: Option<&str>) -> String {
        let mut lines: Vec<String> = text.lines().map(|l| format!("> {}", l)).collect();
        if lines.is_empty() {
            lines.push(">".to_string());
        }
        if let Some(source) = attribution.filter(|a| !a.is_empty()) {
            lines.push(format!("> -- {}", source));
        }
        lines.join("\n")
    }

    fn code(&mut self, _block: &Block, code: &str, language: Option<&str>) -> String {
        format!(
            "```{}\n{}\n```",
            language.unwrap_or(""),
            code.trim_end_matches('\n')
        )
    }

    fn horizontal_rule(&mut self, _block: &Block) -> String {
        "---".to_string()
    }

    fn skip(&mut self, block: &Block) -> String {
        log::debug!("Markdown: dropping {} block '{}'", block.type_name(), block.id);
        String::new()
    }
}

fn table_row<S: AsRef<str>>(cells: &[S]) -> String {
    let cells: Vec<&str> = cells.iter().map(AsRef::as_ref).collect();
    format!("| {} |", cells.join(" | "))
}

fn table_separator(columns: usize) -> String {
    format!("|{}|", vec![TABLE_SEPARATOR_SEGMENT; columns].join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ImageResource, RowGroup, TableCell, TableRow};

    fn single(block: Block) -> Document {
        let mut doc = Document::new();
        doc.add_section(Section::new("s1").with_block(block));
        doc
    }

    #[test]
    fn test_table_separator() {
        assert_eq!(table_separator(2), "|--------------|--------------|");
        assert_eq!(table_separator(0), "||");
    }

    #[test]
    fn test_render_heading() {
        let doc = single(Block::header("h", "Chapter 1", 2));
        assert_eq!(render_markdown(&doc), "## Chapter 1");

        let options = RenderOptions::new().with_max_heading(1);
        assert_eq!(to_markdown(&doc, &options), "# Chapter 1");
    }

    #[test]
    fn test_paragraph_verbatim() {
        let doc = single(Block::paragraph("p", "Text with *stars* and _underscores_ | pipes"));
        assert_eq!(
            render_markdown(&doc),
            "Text with *stars* and _underscores_ | pipes"
        );
    }

    #[test]
    fn test_custom_list_marker() {
        let doc = single(Block::unordered_list(
            "ul",
            vec![Block::list_item("li", vec![Block::paragraph("p", "One")])],
        ));
        let options = RenderOptions::new().with_list_marker('*');
        assert_eq!(to_markdown(&doc, &options), "* One");
    }

    #[test]
    fn test_empty_item_keeps_ordinal() {
        let doc = single(Block::ordered_list(
            "ol",
            vec![
                Block::list_item("li1", vec![Block::paragraph("p1", "One")]),
                Block::list_item("li2", vec![]),
                Block::list_item("li3", vec![Block::paragraph("p3", "Three")]),
            ],
        ));
        assert_eq!(render_markdown(&doc), "1. One\n3. Three");
    }

    #[test]
    fn test_non_item_child_skips_no_ordinal() {
        let doc = single(Block::ordered_list(
            "ol",
            vec![
                Block::list_item("li1", vec![Block::paragraph("p1", "One")]),
                Block::paragraph("stray", "Not an item"),
                Block::list_item("li2", vec![Block::paragraph("p2", "Two")]),
            ],
        ));
        assert_eq!(render_markdown(&doc), "1. One\n2. Two");
    }

    #[test]
    fn test_image_inside_list_item() {
        let mut doc = single(Block::unordered_list(
            "ul",
            vec![Block::list_item(
                "li",
                vec![
                    Block::paragraph("p", "See:"),
                    Block::image("b", "img1").with_caption("Figure"),
                ],
            )],
        ));
        doc.add_image(ImageResource::new("img1", "a.png").with_alt_text("Alt"));
        assert_eq!(render_markdown(&doc), "- See:\n![Alt](a.png)\n*Figure*");
    }

    #[test]
    fn test_grouped_table() {
        let table = Table::grouped(vec![
            RowGroup::new(
                RowGroupKind::Head,
                vec![TableRow::new(vec![
                    TableCell::heading("h1", "A"),
                    TableCell::heading("h2", "B"),
                ])],
            ),
            RowGroup::new(
                RowGroupKind::Body,
                vec![TableRow::new(vec![
                    TableCell::data("c1", "1"),
                    TableCell::data("c2", "2"),
                ])],
            ),
        ]);
        let doc = single(Block::table("t", table));
        assert_eq!(
            render_markdown(&doc),
            "| A | B |\n|--------------|--------------|\n| 1 | 2 |"
        );
    }

    #[test]
    fn test_quote_code_rule() {
        let mut doc = Document::new();
        doc.add_section(
            Section::new("s")
                .with_block(Block::quote("q", "Line one\nLine two").with_attribution("Ada"))
                .with_block(Block::code("c", "let x = 1;\n", Some("rust")))
                .with_block(Block::horizontal_rule("hr")),
        );
        assert_eq!(
            render_markdown(&doc),
            "> Line one\n> Line two\n> -- Ada\n\n```rust\nlet x = 1;\n```\n\n---"
        );
    }

    #[test]
    fn test_render_with_frontmatter() {
        let mut doc = single(Block::paragraph("p", "Body"));
        doc.metadata.title = Some("Test Doc".to_string());

        let options = RenderOptions::new().with_frontmatter(true);
        let result = to_markdown(&doc, &options);
        assert!(result.starts_with("---\ntitle: \"Test Doc\"\n---\n"));
        assert!(result.ends_with("\nBody"));
    }

    #[test]
    fn test_with_stats() {
        let doc = single(Block::paragraph("p", "three word paragraph"));
        let result = to_markdown_with_stats(&doc, &RenderOptions::default());
        assert_eq!(result.content, "three word paragraph");
        assert_eq!(result.stats.section_count, 1);
        assert_eq!(result.stats.paragraph_count, 1);
        assert_eq!(result.stats.word_count, 3);
    }
}
