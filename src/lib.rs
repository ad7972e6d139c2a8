//! # canondoc
//!
//! Canonical document model and structural renderers.
//!
//! Scraped web content is expressed once as a format-neutral tree of typed
//! blocks, then rendered to Markdown, HTML fragments, plain text, or a
//! slide-deck pre-render structure. All renderers walk the tree through one
//! shared traversal, so they always agree on content and order.
//!
//! ## Quick Start
//!
//! ```no_run
//! use canondoc::{parse_file, render};
//!
//! fn main() -> canondoc::Result<()> {
//!     // Load a canonical JSON document
//!     let doc = parse_file("document.json")?;
//!
//!     // Convert to Markdown
//!     let options = render::RenderOptions::default();
//!     let markdown = render::to_markdown(&doc, &options);
//!     println!("{}", markdown);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Closed block model**: paragraphs, headers, nested lists, images,
//!   tables, quotes, code
//! - **Multiple output formats**: Markdown, HTML, slides, plain text, JSON
//! - **Graceful degradation**: unresolved images and unknown blocks never fail
//! - **Parallel processing**: Uses Rayon for batch rendering

pub mod error;
pub mod model;
pub mod render;

// Re-export commonly used types
pub use error::{Error, Result};
pub use model::{
    Block, BlockKind, Document, ImageResource, ListKind, Metadata, Section, Table, TableCell,
    TableRow,
};
pub use render::{
    render_html, render_markdown, JsonFormat, OutputFormat, RenderOptions, Slide, SlideElement,
};

use std::io::Read;
use std::path::Path;

/// Parse a canonical JSON string and validate the document.
///
/// # Example
///
/// ```
/// let doc = canondoc::parse_str(r#"{
///     "documentMetadata": { "title": "Hello" },
///     "sections": [
///         { "sectionId": "s1", "header": "Intro", "contentBlocks": [
///             { "blockId": "b1", "type": "PARAGRAPH", "text": "Hi there." }
///         ]}
///     ]
/// }"#).unwrap();
/// assert_eq!(canondoc::render_markdown(&doc), "# Intro\n\nHi there.");
/// ```
pub fn parse_str(json: &str) -> Result<Document> {
    let doc: Document = serde_json::from_str(json)?;
    doc.validate()?;
    Ok(doc)
}

/// Parse a canonical JSON document from a reader.
///
/// # Example
///
/// ```no_run
/// use canondoc::parse_reader;
/// use std::fs::File;
///
/// let file = File::open("document.json").unwrap();
/// let doc = parse_reader(file).unwrap();
/// ```
pub fn parse_reader<R: Read>(reader: R) -> Result<Document> {
    let doc: Document = serde_json::from_reader(reader)?;
    doc.validate()?;
    Ok(doc)
}

/// Parse a canonical JSON file.
///
/// # Example
///
/// ```no_run
/// use canondoc::parse_file;
///
/// let doc = parse_file("document.json").unwrap();
/// println!("Sections: {}", doc.sections.len());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let path = path.as_ref();
    log::debug!("Loading canonical document from {}", path.display());
    let data = std::fs::read_to_string(path)?;
    parse_str(&data)
}

/// Convert a document to slides.
pub fn render_slides(doc: &Document) -> Vec<Slide> {
    render::to_slides(doc)
}

/// Builder for loading and converting canonical documents.
///
/// # Example
///
/// ```no_run
/// use canondoc::Canondoc;
///
/// let html = Canondoc::new()
///     .with_html_escaping(false)
///     .parse_file("document.json")?
///     .to_html();
/// # Ok::<(), canondoc::Error>(())
/// ```
pub struct Canondoc {
    render_options: RenderOptions,
}

impl Canondoc {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            render_options: RenderOptions::default(),
        }
    }

    /// Enable frontmatter in Markdown output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Set the unordered list marker.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.render_options = self.render_options.with_list_marker(marker);
        self
    }

    /// Enable or disable HTML escaping.
    pub fn with_html_escaping(mut self, escape: bool) -> Self {
        self.render_options = self.render_options.with_html_escaping(escape);
        self
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.render_options = self.render_options.with_max_heading(level);
        self
    }

    /// Load a canonical JSON file.
    pub fn parse_file<P: AsRef<Path>>(self, path: P) -> Result<CanondocResult> {
        Ok(self.wrap(parse_file(path)?))
    }

    /// Load a canonical JSON string.
    pub fn parse_str(self, json: &str) -> Result<CanondocResult> {
        Ok(self.wrap(parse_str(json)?))
    }

    /// Wrap an already built document.
    pub fn wrap(self, document: Document) -> CanondocResult {
        CanondocResult {
            document,
            render_options: self.render_options,
        }
    }
}

impl Default for Canondoc {
    fn default() -> Self {
        Self::new()
    }
}

/// A loaded document together with its render options.
pub struct CanondocResult {
    /// The loaded document
    pub document: Document,
    render_options: RenderOptions,
}

impl CanondocResult {
    /// Convert to Markdown.
    pub fn to_markdown(&self) -> String {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to an HTML fragment.
    pub fn to_html(&self) -> String {
        render::to_html(&self.document, &self.render_options)
    }

    /// Convert to slides.
    pub fn to_slides(&self) -> Vec<Slide> {
        render::to_slides(&self.document)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> String {
        render::to_text(&self.document)
    }

    /// Convert to normalized JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Render to any output format.
    pub fn render(&self, format: OutputFormat) -> Result<String> {
        render::render(&self.document, format, &self.render_options)
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
