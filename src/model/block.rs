//! Content block types.

use super::Table;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Highest heading level a renderer will emit.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// A typed content node within a section.
///
/// The identifier is used for traceability only; renderers never emit it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Unique identifier within the document
    #[serde(rename = "blockId", alias = "id", default)]
    pub id: String,

    /// Variant-specific payload
    #[serde(flatten)]
    pub kind: BlockKind,
}

/// The closed set of block variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum BlockKind {
    /// A paragraph of text
    Paragraph {
        /// Paragraph text
        #[serde(default)]
        text: String,
    },

    /// A heading inside a section
    Header {
        /// Heading text
        #[serde(default)]
        text: String,
        /// Raw heading level; see [`Block::heading_level`]
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<i64>,
    },

    /// A bulleted list of `ListItem` blocks
    #[serde(alias = "UL")]
    UnorderedList {
        /// List items
        #[serde(default)]
        children: Vec<Block>,
    },

    /// A numbered list of `ListItem` blocks
    #[serde(alias = "OL")]
    OrderedList {
        /// List items
        #[serde(default)]
        children: Vec<Block>,
    },

    /// One entry of a list; may hold text, nested lists, or any other block
    #[serde(alias = "LI")]
    ListItem {
        /// Item content
        #[serde(default)]
        children: Vec<Block>,
    },

    /// A reference to an image resource of the document
    ImageReference {
        /// Identifier of the referenced [`ImageResource`](super::ImageResource)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        resource_id: Option<String>,
        /// Caption shown under the image
        #[serde(default, skip_serializing_if = "Option::is_none")]
        caption: Option<String>,
        /// Fallback alternative text
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt_text: Option<String>,
        /// Fallback direct source when the resource cannot be resolved
        #[serde(default, skip_serializing_if = "Option::is_none")]
        src: Option<String>,
    },

    /// A table
    Table(Table),

    /// Inline text without paragraph semantics
    TextContent {
        /// Text
        #[serde(default)]
        text: String,
    },

    /// A block quotation
    Quote {
        /// Quoted text
        #[serde(default)]
        text: String,
        /// Source of the quotation
        #[serde(default, skip_serializing_if = "Option::is_none")]
        attribution: Option<String>,
    },

    /// Preformatted source code
    CodeBlock {
        /// Code text
        #[serde(default, alias = "text")]
        code: String,
        /// Language tag (e.g. "rust")
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },

    /// A thematic break
    HorizontalRule,

    /// Opaque extension data; renderers ignore it
    Custom {
        /// Arbitrary key/value properties
        #[serde(default, alias = "properties")]
        custom_properties: Map<String, Value>,
    },

    /// Any tag this crate does not know
    #[serde(other)]
    Unknown,
}

/// Ordering semantics of a list block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListKind {
    /// Bulleted list
    Unordered,
    /// Numbered list
    Ordered,
}

impl ListKind {
    /// HTML tag name for this list kind.
    pub fn html_tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "ul",
            ListKind::Ordered => "ol",
        }
    }
}

impl std::fmt::Display for ListKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListKind::Unordered => write!(f, "unordered"),
            ListKind::Ordered => write!(f, "ordered"),
        }
    }
}

impl Block {
    /// Create a block from an identifier and a payload.
    pub fn new(id: impl Into<String>, kind: BlockKind) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }

    /// Create a paragraph block.
    pub fn paragraph(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, BlockKind::Paragraph { text: text.into() })
    }

    /// Create a text content block.
    pub fn text_content(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(id, BlockKind::TextContent { text: text.into() })
    }

    /// Create a heading block.
    pub fn header(id: impl Into<String>, text: impl Into<String>, level: i64) -> Self {
        Self::new(
            id,
            BlockKind::Header {
                text: text.into(),
                level: Some(level),
            },
        )
    }

    /// Create a bulleted list from list item blocks.
    pub fn unordered_list(id: impl Into<String>, items: Vec<Block>) -> Self {
        Self::new(id, BlockKind::UnorderedList { children: items })
    }

    /// Create a numbered list from list item blocks.
    pub fn ordered_list(id: impl Into<String>, items: Vec<Block>) -> Self {
        Self::new(id, BlockKind::OrderedList { children: items })
    }

    /// Create a list item holding the given children.
    pub fn list_item(id: impl Into<String>, children: Vec<Block>) -> Self {
        Self::new(id, BlockKind::ListItem { children })
    }

    /// Create an image reference to a document resource.
    pub fn image(id: impl Into<String>, resource_id: impl Into<String>) -> Self {
        Self::new(
            id,
            BlockKind::ImageReference {
                resource_id: Some(resource_id.into()),
                caption: None,
                alt_text: None,
                src: None,
            },
        )
    }

    /// Create a table block.
    pub fn table(id: impl Into<String>, table: Table) -> Self {
        Self::new(id, BlockKind::Table(table))
    }

    /// Create a quote block.
    pub fn quote(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(
            id,
            BlockKind::Quote {
                text: text.into(),
                attribution: None,
            },
        )
    }

    /// Create a code block.
    pub fn code(id: impl Into<String>, code: impl Into<String>, language: Option<&str>) -> Self {
        Self::new(
            id,
            BlockKind::CodeBlock {
                code: code.into(),
                language: language.map(str::to_string),
            },
        )
    }

    /// Create a horizontal rule.
    pub fn horizontal_rule(id: impl Into<String>) -> Self {
        Self::new(id, BlockKind::HorizontalRule)
    }

    /// Set the caption of an image reference. No effect on other variants.
    pub fn with_caption(mut self, value: impl Into<String>) -> Self {
        if let BlockKind::ImageReference { caption, .. } = &mut self.kind {
            *caption = Some(value.into());
        }
        self
    }

    /// Set the fallback alt text of an image reference.
    pub fn with_alt_text(mut self, value: impl Into<String>) -> Self {
        if let BlockKind::ImageReference { alt_text, .. } = &mut self.kind {
            *alt_text = Some(value.into());
        }
        self
    }

    /// Set the fallback source of an image reference.
    pub fn with_src(mut self, value: impl Into<String>) -> Self {
        if let BlockKind::ImageReference { src, .. } = &mut self.kind {
            *src = Some(value.into());
        }
        self
    }

    /// Set the attribution of a quote.
    pub fn with_attribution(mut self, value: impl Into<String>) -> Self {
        if let BlockKind::Quote { attribution, .. } = &mut self.kind {
            *attribution = Some(value.into());
        }
        self
    }

    /// Effective heading level, clamped to 1..=6.
    ///
    /// Absent or non-positive levels count as 1. Returns `None` for
    /// non-heading blocks.
    pub fn heading_level(&self) -> Option<u8> {
        match &self.kind {
            BlockKind::Header { level, .. } => Some(clamp_level(*level)),
            _ => None,
        }
    }

    /// Text of paragraph-like blocks (paragraph, text content, heading, quote).
    pub fn text(&self) -> Option<&str> {
        match &self.kind {
            BlockKind::Paragraph { text }
            | BlockKind::TextContent { text }
            | BlockKind::Header { text, .. }
            | BlockKind::Quote { text, .. } => Some(text),
            _ => None,
        }
    }

    /// List kind and items if this block is a list.
    pub fn as_list(&self) -> Option<(ListKind, &[Block])> {
        match &self.kind {
            BlockKind::UnorderedList { children } => Some((ListKind::Unordered, children)),
            BlockKind::OrderedList { children } => Some((ListKind::Ordered, children)),
            _ => None,
        }
    }

    /// Check if this block is a list.
    pub fn is_list(&self) -> bool {
        self.as_list().is_some()
    }

    /// Check if this block carries plain text for list items and table cells.
    pub fn is_text(&self) -> bool {
        matches!(
            self.kind,
            BlockKind::Paragraph { .. } | BlockKind::TextContent { .. }
        )
    }

    /// Direct child blocks (list items, item content, table cell content).
    pub fn children(&self) -> Vec<&Block> {
        match &self.kind {
            BlockKind::UnorderedList { children }
            | BlockKind::OrderedList { children }
            | BlockKind::ListItem { children } => children.iter().collect(),
            BlockKind::Table(table) => table.cell_blocks().collect(),
            _ => Vec::new(),
        }
    }

    /// Wire name of this block's variant.
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            BlockKind::Paragraph { .. } => "PARAGRAPH",
            BlockKind::Header { .. } => "HEADER",
            BlockKind::UnorderedList { .. } => "UNORDERED_LIST",
            BlockKind::OrderedList { .. } => "ORDERED_LIST",
            BlockKind::ListItem { .. } => "LIST_ITEM",
            BlockKind::ImageReference { .. } => "IMAGE_REFERENCE",
            BlockKind::Table(_) => "TABLE",
            BlockKind::TextContent { .. } => "TEXT_CONTENT",
            BlockKind::Quote { .. } => "QUOTE",
            BlockKind::CodeBlock { .. } => "CODE_BLOCK",
            BlockKind::HorizontalRule => "HORIZONTAL_RULE",
            BlockKind::Custom { .. } => "CUSTOM",
            BlockKind::Unknown => "UNKNOWN",
        }
    }
}

fn clamp_level(level: Option<i64>) -> u8 {
    match level {
        Some(l) if l > 0 => l.min(MAX_HEADING_LEVEL as i64) as u8,
        _ => 1,
    }
}
