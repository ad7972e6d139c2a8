//! HTML fragment rendering for canonical documents.
//!
//! Every section becomes a `<section>` element. Nested markup is indented by
//! two spaces per level; the indentation is part of the output format.

use crate::model::{Block, Document, RowGroupKind, Section, Table, TableRow};

use super::visitor::{visit_block, BlockVisitor, ImageView, ItemView, ListView};
use super::RenderOptions;

const INDENT: &str = "  ";

/// Convert a document to an HTML fragment.
pub fn to_html(doc: &Document, options: &RenderOptions) -> String {
    HtmlRenderer::new(doc, options).render()
}

/// Convert a document to an HTML fragment with default options.
///
/// Layout (section wrapping, two-space indentation, simple and complex
/// `<li>` forms) is stable for golden-output comparison. Text is
/// HTML-escaped by default, so `Tom & Jerry <3` becomes
/// `Tom &amp; Jerry &lt;3`; use [`to_html`] with
/// [`RenderOptions::with_html_escaping`]`(false)` for raw text.
pub fn render_html(doc: &Document) -> String {
    to_html(doc, &RenderOptions::default())
}

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Prefix every line of `s` with two spaces.
fn indent(s: &str) -> String {
    s.lines()
        .map(|line| format!("{}{}", INDENT, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// HTML renderer.
pub struct HtmlRenderer<'a> {
    doc: &'a Document,
    options: &'a RenderOptions,
}

impl<'a> HtmlRenderer<'a> {
    /// Create a new HTML renderer over a document.
    pub fn new(doc: &'a Document, options: &'a RenderOptions) -> Self {
        Self { doc, options }
    }

    /// Render the whole document.
    pub fn render(mut self) -> String {
        let doc = self.doc;
        doc.sections
            .iter()
            .map(|section| self.render_section(section))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }

    /// Render one section element.
    pub fn render_section(&mut self, section: &Section) -> String {
        let id_attr = if section.id.is_empty() {
            String::new()
        } else {
            format!(" id=\"{}\"", self.escape(&section.id))
        };

        let mut parts = Vec::new();
        if let Some(header) = section.header() {
            parts.push(indent(&format!("<h1>{}</h1>", self.escape(header))));
        }
        let doc = self.doc;
        for block in &section.blocks {
            let html = visit_block(doc, block, self);
            if !html.is_empty() {
                parts.push(indent(&html));
            }
        }

        if parts.is_empty() {
            if section.id.is_empty() {
                return String::new();
            }
            return format!("<section{}>\n</section>", id_attr);
        }
        format!("<section{}>\n{}\n</section>", id_attr, parts.join("\n"))
    }

    fn escape(&self, s: &str) -> String {
        if self.options.escape_html {
            escape_html(s)
        } else {
            s.to_string()
        }
    }

    /// Rendered non-list children of an item, in order.
    fn item_parts(&mut self, item: &ItemView<'_>) -> Vec<String> {
        let doc = self.doc;
        item.blocks()
            .into_iter()
            .map(|b| visit_block(doc, b, self))
            .filter(|s| !s.is_empty())
            .collect()
    }

    fn render_item(&mut self, item: &ItemView<'_>) -> String {
        let parts = self.item_parts(item);
        let complex = item.has_nested_list() || item.content_count() > 1;
        if !complex {
            return format!("<li>{}</li>", parts.join(""));
        }

        // Content parts share one line; each nested list follows on its own.
        let mut out = String::from("<li>");
        if !parts.is_empty() {
            out.push('\n');
            out.push_str(&indent(&parts.join("")));
        }
        for nested in item.nested_lists() {
            out.push('\n');
            out.push_str(&indent(&self.list(nested)));
        }
        out.push_str("\n</li>");
        out
    }

    fn render_row(&self, row: &TableRow, in_head: bool) -> String {
        let cells = row
            .cells
            .iter()
            .map(|cell| {
                let tag = if cell.header || in_head { "th" } else { "td" };
                format!("<{}>{}</{}>", tag, self.escape(&cell.text()), tag)
            })
            .collect::<Vec<_>>()
            .join("");
        format!("<tr>{}</tr>", cells)
    }

    fn render_table(&self, table: &Table) -> String {
        let mut parts = Vec::new();
        if let Some(caption) = table.caption().filter(|c| !c.is_empty()) {
            parts.push(format!("<caption>{}</caption>", self.escape(caption)));
        }

        match table {
            Table::Grid(grid) => {
                if !grid.headers.is_empty() {
                    let cells: String = grid
                        .headers
                        .iter()
                        .map(|h| format!("<th>{}</th>", self.escape(h)))
                        .collect();
                    let row = format!("<tr>{}</tr>", cells);
                    parts.push(format!("<thead>\n{}\n</thead>", indent(&row)));
                }
                if !grid.rows.is_empty() {
                    let rows = grid
                        .rows
                        .iter()
                        .map(|row| {
                            let cells: String = row
                                .iter()
                                .map(|c| format!("<td>{}</td>", self.escape(c)))
                                .collect();
                            format!("<tr>{}</tr>", cells)
                        })
                        .collect::<Vec<_>>()
                        .join("\n");
                    parts.push(format!("<tbody>\n{}\n</tbody>", indent(&rows)));
                }
            }
            Table::Grouped(grouped) => {
                for group in &grouped.row_groups {
                    let tag = group.kind.html_tag();
                    let in_head = group.kind == RowGroupKind::Head;
                    let rows = group
                        .rows
                        .iter()
                        .map(|row| self.render_row(row, in_head))
                        .collect::<Vec<_>>()
                        .join("\n");
                    if rows.is_empty() {
                        parts.push(format!("<{}></{}>", tag, tag));
                    } else {
                        parts.push(format!("<{}>\n{}\n</{}>", tag, indent(&rows), tag));
                    }
                }
            }
        }

        if parts.is_empty() {
            return "<table></table>".to_string();
        }
        format!("<table>\n{}\n</table>", indent(&parts.join("\n")))
    }
}

impl BlockVisitor for HtmlRenderer<'_> {
    type Output = String;

    fn paragraph(&mut self, text: &str) -> String {
        format!("<p>{}</p>", self.escape(text))
    }

    fn text_content(&mut self, text: &str) -> String {
        self.escape(text)
    }

    fn header(&mut self, text: &str, level: u8) -> String {
        let level = self.options.heading_level(level);
        format!("<h{}>{}</h{}>", level, self.escape(text), level)
    }

    fn list(&mut self, list: &ListView<'_>) -> String {
        let tag = list.kind.html_tag();
        if list.items.is_empty() {
            return format!("<{}></{}>", tag, tag);
        }
        let items = list
            .items
            .iter()
            .map(|item| indent(&self.render_item(item)))
            .collect::<Vec<_>>()
            .join("\n");
        format!("<{}>\n{}\n</{}>", tag, items, tag)
    }

    fn stray_item(&mut self, _block: &Block, item: &ItemView<'_>) -> String {
        self.item_parts(item).join("\n")
    }

    fn image(&mut self, image: &ImageView<'_>) -> String {
        let Some(src) = image.src else {
            return String::new();
        };
        let img = format!(
            "<img src=\"{}\" alt=\"{}\">",
            self.escape(src),
            self.escape(image.alt)
        );
        match image.caption {
            Some(caption) => format!(
                "<figure>\n{}\n{}\n</figure>",
                indent(&img),
                indent(&format!("<figcaption>{}</figcaption>", self.escape(caption)))
            ),
            None => img,
        }
    }

    fn table(&mut self, table: &Table) -> String {
        self.render_table(table)
    }

    fn quote(&mut self, text: &str, attribution: Option<&str>) -> String {
        let body = format!("<p>{}</p>", self.escape(text));
        match attribution.filter(|a| !a.is_empty()) {
            Some(source) => format!(
                "<blockquote>\n{}\n{}\n</blockquote>",
                indent(&body),
                indent(&format!("<cite>{}</cite>", self.escape(source)))
            ),
            None => format!("<blockquote>{}</blockquote>", body),
        }
    }

    fn code(&mut self, _block: &Block, code: &str, language: Option<&str>) -> String {
        let class = language
            .filter(|l| !l.is_empty())
            .map(|l| format!(" class=\"language-{}\"", self.escape(l)))
            .unwrap_or_default();
        format!("<pre><code{}>{}</code></pre>", class, self.escape(code))
    }

    fn horizontal_rule(&mut self, _block: &Block) -> String {
        "<hr>".to_string()
    }

    fn skip(&mut self, block: &Block) -> String {
        log::debug!("HTML: dropping {} block '{}'", block.type_name(), block.id);
        String::new()
    }
}
