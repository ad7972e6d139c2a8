//! Rendering result with metadata and statistics.

use crate::model::{Block, Document, Metadata, Table};
use serde::{Deserialize, Serialize};

use super::visitor::{visit_block, BlockVisitor, ImageView, ItemChild, ItemView, ListView};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (Markdown, HTML, text, etc.)
    pub content: String,

    /// Document metadata (copied from source document)
    pub metadata: Metadata,

    /// Content statistics
    pub stats: RenderStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, metadata: Metadata, stats: RenderStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }
}

/// Statistics about the blocks of a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderStats {
    /// Number of sections
    pub section_count: u32,

    /// Number of paragraph and text content blocks
    pub paragraph_count: u32,

    /// Number of headings (section headers and header blocks)
    pub heading_count: u32,

    /// Number of lists, nested ones included
    pub list_count: u32,

    /// Number of list items
    pub list_item_count: u32,

    /// Number of image references
    pub image_count: u32,

    /// Image references with no matching resource
    pub unresolved_image_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of code blocks
    pub code_block_count: u32,

    /// Number of quotes
    pub quote_count: u32,

    /// Blocks no renderer emits (custom, unknown, stray items)
    pub skipped_block_count: u32,

    /// Approximate word count of the rendered content
    pub word_count: u32,

    /// Character count of the rendered content (excluding whitespace)
    pub char_count: u32,
}

impl RenderStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the sections and blocks of a document.
    pub fn collect(doc: &Document) -> Self {
        let mut counter = StatsCounter {
            doc,
            stats: Self::new(),
        };
        for section in &doc.sections {
            counter.stats.add_section();
            if section.header().is_some() {
                counter.stats.add_heading();
            }
            for block in &section.blocks {
                visit_block(doc, block, &mut counter);
            }
        }
        counter.stats
    }

    /// Increment section count.
    pub fn add_section(&mut self) {
        self.section_count += 1;
    }

    /// Increment paragraph count.
    pub fn add_paragraph(&mut self) {
        self.paragraph_count += 1;
    }

    /// Increment heading count.
    pub fn add_heading(&mut self) {
        self.heading_count += 1;
    }

    /// Increment list count.
    pub fn add_list(&mut self) {
        self.list_count += 1;
    }

    /// Increment list item count.
    pub fn add_list_item(&mut self) {
        self.list_item_count += 1;
    }

    /// Increment image count, and the unresolved count when needed.
    pub fn add_image(&mut self, resolved: bool) {
        self.image_count += 1;
        if !resolved {
            self.unresolved_image_count += 1;
        }
    }

    /// Increment table count.
    pub fn add_table(&mut self) {
        self.table_count += 1;
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        // Word count: whitespace-separated tokens
        self.word_count += text.split_whitespace().count() as u32;

        // Character count: non-whitespace characters
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }

    /// Merge another stats instance into this one.
    pub fn merge(&mut self, other: &RenderStats) {
        self.section_count += other.section_count;
        self.paragraph_count += other.paragraph_count;
        self.heading_count += other.heading_count;
        self.list_count += other.list_count;
        self.list_item_count += other.list_item_count;
        self.image_count += other.image_count;
        self.unresolved_image_count += other.unresolved_image_count;
        self.table_count += other.table_count;
        self.code_block_count += other.code_block_count;
        self.quote_count += other.quote_count;
        self.skipped_block_count += other.skipped_block_count;
        self.word_count += other.word_count;
        self.char_count += other.char_count;
    }
}

struct StatsCounter<'a> {
    doc: &'a Document,
    stats: RenderStats,
}

impl StatsCounter<'_> {
    fn count_item(&mut self, item: &ItemView<'_>) {
        self.stats.add_list_item();
        let doc = self.doc;
        for child in &item.children {
            match child {
                ItemChild::Text(_) => self.stats.add_paragraph(),
                ItemChild::List(nested) => self.list(nested),
                ItemChild::Other(block) => visit_block(doc, block, self),
            }
        }
    }
}

impl BlockVisitor for StatsCounter<'_> {
    type Output = ();

    fn paragraph(&mut self, _text: &str) {
        self.stats.add_paragraph();
    }

    fn header(&mut self, _text: &str, _level: u8) {
        self.stats.add_heading();
    }

    fn list(&mut self, list: &ListView<'_>) {
        self.stats.add_list();
        for item in &list.items {
            self.count_item(item);
        }
    }

    fn stray_item(&mut self, _block: &Block, item: &ItemView<'_>) {
        self.stats.skipped_block_count += 1;
        self.count_item(item);
    }

    fn image(&mut self, image: &ImageView<'_>) {
        self.stats.add_image(image.resolved);
    }

    fn table(&mut self, _table: &Table) {
        self.stats.add_table();
    }

    fn quote(&mut self, _text: &str, _attribution: Option<&str>) {
        self.stats.quote_count += 1;
    }

    fn code(&mut self, _block: &Block, _code: &str, _language: Option<&str>) {
        self.stats.code_block_count += 1;
    }

    fn horizontal_rule(&mut self, _block: &Block) {}

    fn skip(&mut self, _block: &Block) {
        self.stats.skipped_block_count += 1;
    }
}
