//! Section type.

use super::Block;
use serde::{Deserialize, Serialize};

/// A run of blocks under an optional header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Unique, non-empty identifier within the document
    #[serde(rename = "sectionId", alias = "id", default)]
    pub id: String,

    /// Section header text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,

    /// Content blocks in document order
    #[serde(rename = "contentBlocks", alias = "blocks", default)]
    pub blocks: Vec<Block>,
}

impl Section {
    /// Create a new section without header or content.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            header: None,
            blocks: Vec::new(),
        }
    }

    /// Create a section with a header.
    pub fn with_header(id: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            header: Some(header.into()),
            ..Self::new(id)
        }
    }

    /// Add a block to the section.
    pub fn add_block(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Builder form of [`Section::add_block`].
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Header text; an empty header counts as absent.
    pub fn header(&self) -> Option<&str> {
        self.header.as_deref().filter(|h| !h.is_empty())
    }

    /// Check if the section has neither header nor blocks.
    pub fn is_empty(&self) -> bool {
        self.header().is_none() && self.blocks.is_empty()
    }
}
