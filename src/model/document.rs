//! Document-level types.

use super::{Block, ImageResource, Section};
use crate::error::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Schema version written into new documents.
pub const SCHEMA_VERSION: &str = "1.0.0";

fn default_version() -> String {
    SCHEMA_VERSION.to_string()
}

/// A canonical document: the format-neutral tree every renderer consumes.
///
/// Renderers only borrow the document, so it stays read-only for the
/// duration of a render and can be shared across threads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// Document metadata (title, source, author, etc.)
    #[serde(rename = "documentMetadata", alias = "metadata", default)]
    pub metadata: Metadata,

    /// Sections in document order
    #[serde(default)]
    pub sections: Vec<Section>,

    /// Images referenced by `IMAGE_REFERENCE` blocks
    #[serde(default)]
    pub image_resources: Vec<ImageResource>,

    /// Schema version of the canonical document
    #[serde(default = "default_version")]
    pub version: String,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            metadata: Metadata::default(),
            sections: Vec::new(),
            image_resources: Vec::new(),
            version: default_version(),
        }
    }

    /// Create an empty document with a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        let mut doc = Self::new();
        doc.metadata.title = Some(title.into());
        doc
    }

    /// Add a section to the document.
    pub fn add_section(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// Add an image resource to the document.
    pub fn add_image(&mut self, image: ImageResource) {
        self.image_resources.push(image);
    }

    /// Get an image resource by identifier.
    pub fn image(&self, id: &str) -> Option<&ImageResource> {
        self.image_resources.iter().find(|img| img.id == id)
    }

    /// Document title; an empty title counts as absent.
    pub fn title(&self) -> Option<&str> {
        self.metadata.title.as_deref().filter(|t| !t.is_empty())
    }

    /// Check if the document has no sections.
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterate over every block in the document, depth first.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        let mut stack: Vec<&Block> = self
            .sections
            .iter()
            .rev()
            .flat_map(|s| s.blocks.iter().rev())
            .collect();
        std::iter::from_fn(move || {
            let block = stack.pop()?;
            stack.extend(block.children().into_iter().rev());
            Some(block)
        })
    }

    /// Check the construction invariants of the document.
    ///
    /// Section, image, and block identifiers must be non-empty and unique.
    /// Renderers do not require a validated document.
    pub fn validate(&self) -> Result<()> {
        let mut section_ids = HashSet::new();
        for (index, section) in self.sections.iter().enumerate() {
            if section.id.is_empty() {
                return Err(Error::MissingSectionId(index));
            }
            if !section_ids.insert(section.id.as_str()) {
                return Err(Error::DuplicateSectionId(section.id.clone()));
            }
        }

        let mut image_ids = HashSet::new();
        for image in &self.image_resources {
            if image.id.is_empty() {
                return Err(Error::Validation(format!(
                    "image resource with URL '{}' has no identifier",
                    image.original_url
                )));
            }
            if !image_ids.insert(image.id.as_str()) {
                return Err(Error::DuplicateResourceId(image.id.clone()));
            }
        }

        let mut block_ids = HashSet::new();
        for section in &self.sections {
            let mut stack: Vec<&Block> = section.blocks.iter().collect();
            while let Some(block) = stack.pop() {
                if block.id.is_empty() {
                    return Err(Error::MissingBlockId(section.id.clone()));
                }
                if !block_ids.insert(block.id.as_str()) {
                    return Err(Error::DuplicateBlockId(block.id.clone()));
                }
                stack.extend(block.children());
            }
        }

        Ok(())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    /// Document title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// URL the content was scraped from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,

    /// Document author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// When the content was scraped (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_scraped: Option<String>,

    /// When the content was originally published (ISO 8601)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<String>,

    /// Any other metadata
    #[serde(
        default,
        alias = "additionalProperties",
        skip_serializing_if = "Map::is_empty"
    )]
    pub additional: Map<String, Value>,
}

impl Metadata {
    /// Scrape timestamp, if present and parseable.
    pub fn scraped_at(&self) -> Option<DateTime<FixedOffset>> {
        self.date_scraped.as_deref().and_then(parse_timestamp)
    }

    /// Publication timestamp, if present and parseable.
    pub fn published_at(&self) -> Option<DateTime<FixedOffset>> {
        self.publication_date.as_deref().and_then(parse_timestamp)
    }

    /// Convert metadata to YAML frontmatter format.
    ///
    /// Parseable dates are normalized to RFC 3339; unparseable ones are kept
    /// as quoted strings.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        if let Some(ref title) = self.title {
            lines.push(format!("title: \"{}\"", escape_yaml(title)));
        }
        if let Some(ref url) = self.source_url {
            lines.push(format!("source_url: \"{}\"", escape_yaml(url)));
        }
        if let Some(ref author) = self.author {
            lines.push(format!("author: \"{}\"", escape_yaml(author)));
        }
        if let Some(ref raw) = self.date_scraped {
            lines.push(format_date("date_scraped", raw, self.scraped_at()));
        }
        if let Some(ref raw) = self.publication_date {
            lines.push(format_date("publication_date", raw, self.published_at()));
        }

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

fn format_date(key: &str, raw: &str, parsed: Option<DateTime<FixedOffset>>) -> String {
    match parsed {
        Some(date) => format!("{}: {}", key, date.to_rfc3339()),
        None => format!("{}: \"{}\"", key, escape_yaml(raw)),
    }
}

/// Parse an RFC 3339 timestamp or a bare `YYYY-MM-DD` date (taken as UTC midnight).
fn parse_timestamp(raw: &str) -> Option<DateTime<FixedOffset>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date);
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    let utc = FixedOffset::east_opt(0)?;
    date.and_hms_opt(0, 0, 0)?
        .and_local_timezone(utc)
        .single()
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
