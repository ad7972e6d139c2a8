//! Shared traversal skeleton for every output format.
//!
//! [`visit_block`] is the one place that dispatches on a block's variant.
//! Renderers implement [`BlockVisitor`] and receive lists with their items'
//! children already classified, and images already resolved against the
//! document, so every format sees the same tree in the same order.
//!
//! # Example
//!
//! ```
//! use canondoc::model::{Block, Document, Section, Table};
//! use canondoc::render::visitor::{visit_block, BlockVisitor, ImageView, ListView};
//!
//! /// Counts words in paragraphs, ignoring everything else.
//! struct WordCounter<'d> {
//!     doc: &'d Document,
//! }
//!
//! impl BlockVisitor for WordCounter<'_> {
//!     type Output = usize;
//!
//!     fn paragraph(&mut self, text: &str) -> usize {
//!         text.split_whitespace().count()
//!     }
//!
//!     fn list(&mut self, list: &ListView<'_>) -> usize {
//!         let doc = self.doc;
//!         list.items
//!             .iter()
//!             .flat_map(|item| item.blocks())
//!             .map(|b| visit_block(doc, b, self))
//!             .sum()
//!     }
//!
//!     fn image(&mut self, _image: &ImageView<'_>) -> usize { 0 }
//!     fn table(&mut self, _table: &Table) -> usize { 0 }
//!     fn skip(&mut self, _block: &Block) -> usize { 0 }
//! }
//!
//! let mut doc = Document::new();
//! doc.add_section(Section::new("s1").with_block(Block::paragraph("p1", "three little words")));
//! let mut counter = WordCounter { doc: &doc };
//! let words: usize = doc.sections[0]
//!     .blocks
//!     .iter()
//!     .map(|b| visit_block(&doc, b, &mut counter))
//!     .sum();
//! assert_eq!(words, 3);
//! ```

use crate::model::{Block, BlockKind, Document, ListKind, Table};
use serde_json::{Map, Value};

/// A list block with its items split into classified children.
#[derive(Debug, Clone)]
pub struct ListView<'a> {
    /// Bulleted or numbered
    pub kind: ListKind,
    /// `LIST_ITEM` children in order; other children are dropped
    pub items: Vec<ItemView<'a>>,
}

impl ListView<'_> {
    /// Check if this is a numbered list.
    pub fn is_ordered(&self) -> bool {
        self.kind == ListKind::Ordered
    }
}

/// One list item.
#[derive(Debug, Clone)]
pub struct ItemView<'a> {
    /// 1-based position within its own list
    pub ordinal: usize,
    /// Children in document order
    pub children: Vec<ItemChild<'a>>,
    source: Vec<&'a Block>,
}

/// Classified child of a list item.
#[derive(Debug, Clone)]
pub enum ItemChild<'a> {
    /// Paragraph or text content
    Text(&'a str),
    /// A nested list
    List(ListView<'a>),
    /// Any other block
    Other(&'a Block),
}

impl<'a> ItemView<'a> {
    /// Check if the item has no children at all.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Check if the item contains a nested list.
    pub fn has_nested_list(&self) -> bool {
        self.nested_lists().next().is_some()
    }

    /// Text children, in order.
    pub fn texts(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.children.iter().filter_map(|c| match c {
            ItemChild::Text(text) => Some(*text),
            _ => None,
        })
    }

    /// Nested lists, in order.
    pub fn nested_lists(&self) -> impl Iterator<Item = &ListView<'a>> + '_ {
        self.children.iter().filter_map(|c| match c {
            ItemChild::List(list) => Some(list),
            _ => None,
        })
    }

    /// Number of children that are not nested lists.
    pub fn content_count(&self) -> usize {
        self.children
            .iter()
            .filter(|c| !matches!(c, ItemChild::List(_)))
            .count()
    }

    /// Non-list, non-text children.
    pub fn others(&self) -> impl Iterator<Item = &'a Block> + '_ {
        self.children.iter().filter_map(|c| match c {
            ItemChild::Other(block) => Some(*block),
            _ => None,
        })
    }

    /// Original blocks of the text and other children, skipping nested lists.
    pub fn blocks(&self) -> Vec<&'a Block> {
        self.source.iter().copied().filter(|b| !b.is_list()).collect()
    }
}

/// An image reference resolved against the document's resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageView<'a> {
    /// Referenced resource identifier
    pub resource_id: Option<&'a str>,
    /// Source to display; `None` when neither resource nor fallback exists
    pub src: Option<&'a str>,
    /// Alt text: block alt, then resource alt, then empty
    pub alt: &'a str,
    /// Caption, if present and non-empty
    pub caption: Option<&'a str>,
    /// Whether the resource identifier matched a document resource
    pub resolved: bool,
}

/// Per-format handling of each block variant.
///
/// Only the structural variants are required; the text-like defaults route
/// to [`BlockVisitor::paragraph`] and the rest to [`BlockVisitor::skip`].
pub trait BlockVisitor {
    /// Rendered form of one block.
    type Output;

    /// A `PARAGRAPH` block.
    fn paragraph(&mut self, text: &str) -> Self::Output;

    /// A `TEXT_CONTENT` block.
    fn text_content(&mut self, text: &str) -> Self::Output {
        self.paragraph(text)
    }

    /// A `HEADER` block; `level` is already clamped to 1..=6.
    fn header(&mut self, text: &str, level: u8) -> Self::Output {
        let _ = level;
        self.paragraph(text)
    }

    /// An `UNORDERED_LIST` or `ORDERED_LIST` block.
    fn list(&mut self, list: &ListView<'_>) -> Self::Output;

    /// A `LIST_ITEM` found outside of a list.
    fn stray_item(&mut self, block: &Block, item: &ItemView<'_>) -> Self::Output {
        let _ = item;
        self.skip(block)
    }

    /// An `IMAGE_REFERENCE` block.
    fn image(&mut self, image: &ImageView<'_>) -> Self::Output;

    /// A `TABLE` block.
    fn table(&mut self, table: &Table) -> Self::Output;

    /// A `QUOTE` block.
    fn quote(&mut self, text: &str, attribution: Option<&str>) -> Self::Output {
        let _ = attribution;
        self.paragraph(text)
    }

    /// A `CODE_BLOCK` block.
    fn code(&mut self, block: &Block, code: &str, language: Option<&str>) -> Self::Output {
        let _ = (code, language);
        self.skip(block)
    }

    /// A `HORIZONTAL_RULE` block.
    fn horizontal_rule(&mut self, block: &Block) -> Self::Output {
        self.skip(block)
    }

    /// A `CUSTOM` block.
    fn custom(&mut self, block: &Block, properties: &Map<String, Value>) -> Self::Output {
        let _ = properties;
        self.skip(block)
    }

    /// A block this format does not render.
    fn skip(&mut self, block: &Block) -> Self::Output;
}

/// Dispatch a block to the matching visitor method.
pub fn visit_block<V: BlockVisitor + ?Sized>(
    doc: &Document,
    block: &Block,
    visitor: &mut V,
) -> V::Output {
    match &block.kind {
        BlockKind::Paragraph { text } => visitor.paragraph(text),
        BlockKind::TextContent { text } => visitor.text_content(text),
        BlockKind::Header { text, .. } => {
            let level = block.heading_level().unwrap_or(1);
            visitor.header(text, level)
        }
        BlockKind::UnorderedList { children } => {
            visitor.list(&list_view(ListKind::Unordered, children))
        }
        BlockKind::OrderedList { children } => {
            visitor.list(&list_view(ListKind::Ordered, children))
        }
        BlockKind::ListItem { children } => visitor.stray_item(block, &item_view(1, children)),
        BlockKind::ImageReference { .. } => visitor.image(&resolve_image(doc, block)),
        BlockKind::Table(table) => visitor.table(table),
        BlockKind::Quote { text, attribution } => visitor.quote(text, attribution.as_deref()),
        BlockKind::CodeBlock { code, language } => {
            visitor.code(block, code, language.as_deref())
        }
        BlockKind::HorizontalRule => visitor.horizontal_rule(block),
        BlockKind::Custom { custom_properties } => visitor.custom(block, custom_properties),
        BlockKind::Unknown => {
            log::warn!("Skipping block '{}' of unrecognized type", block.id);
            visitor.skip(block)
        }
    }
}

/// Build the view of a list block's items.
pub fn list_view(kind: ListKind, children: &[Block]) -> ListView<'_> {
    let mut items = Vec::with_capacity(children.len());
    for child in children {
        match &child.kind {
            BlockKind::ListItem { children } => {
                items.push(item_view(items.len() + 1, children));
            }
            _ => log::debug!(
                "Ignoring {} block '{}' directly inside a list",
                child.type_name(),
                child.id
            ),
        }
    }
    ListView { kind, items }
}

fn item_view(ordinal: usize, children: &[Block]) -> ItemView<'_> {
    let classified = children
        .iter()
        .map(|child| match &child.kind {
            BlockKind::Paragraph { text } | BlockKind::TextContent { text } => {
                ItemChild::Text(text)
            }
            BlockKind::UnorderedList { children } => {
                ItemChild::List(list_view(ListKind::Unordered, children))
            }
            BlockKind::OrderedList { children } => {
                ItemChild::List(list_view(ListKind::Ordered, children))
            }
            _ => ItemChild::Other(child),
        })
        .collect();
    ItemView {
        ordinal,
        children: classified,
        source: children.iter().collect(),
    }
}

/// Resolve an `IMAGE_REFERENCE` block against the document's resources.
///
/// The resource's display URL wins; otherwise the block's own `src` is used.
/// Alt text prefers the block, then the resource.
pub fn resolve_image<'a>(doc: &'a Document, block: &'a Block) -> ImageView<'a> {
    let BlockKind::ImageReference {
        resource_id,
        caption,
        alt_text,
        src,
    } = &block.kind
    else {
        return ImageView {
            resource_id: None,
            src: None,
            alt: "",
            caption: None,
            resolved: false,
        };
    };

    let resource = resource_id.as_deref().and_then(|id| doc.image(id));
    if resource.is_none() {
        log::debug!(
            "Image reference '{}' does not resolve to a resource ({:?})",
            block.id,
            resource_id
        );
    }

    let fallback_src = src.as_deref().filter(|s| !s.is_empty());
    let alt = alt_text
        .as_deref()
        .filter(|a| !a.is_empty())
        .or_else(|| resource.and_then(|r| r.alt_text.as_deref()))
        .unwrap_or("");

    ImageView {
        resource_id: resource_id.as_deref(),
        src: resource.map(|r| r.display_url()).or(fallback_src),
        alt,
        caption: caption.as_deref().filter(|c| !c.is_empty()),
        resolved: resource.is_some(),
    }
}
