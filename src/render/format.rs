//! Output format selection and batch rendering.

use crate::error::{Error, Result};
use crate::model::Document;
use rayon::prelude::*;
use std::fmt;
use std::str::FromStr;

use super::{slides_to_json, to_html, to_json, to_markdown, to_slides, to_text};
use super::{JsonFormat, RenderOptions};

/// A supported output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Markdown text
    Markdown,
    /// HTML fragment
    Html,
    /// Plain text
    Text,
    /// Slide descriptors as JSON
    Slides,
    /// Normalized canonical JSON
    Json,
}

impl OutputFormat {
    /// Every format, in a stable order.
    pub const ALL: [OutputFormat; 5] = [
        OutputFormat::Markdown,
        OutputFormat::Html,
        OutputFormat::Text,
        OutputFormat::Slides,
        OutputFormat::Json,
    ];

    /// Output file suffix, without the dot.
    ///
    /// JSON outputs use compound suffixes so they never share a name with
    /// the `.json` input they were rendered from.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "md",
            OutputFormat::Html => "html",
            OutputFormat::Text => "txt",
            OutputFormat::Slides => "slides.json",
            OutputFormat::Json => "canonical.json",
        }
    }

    /// MIME type of the rendered output.
    pub fn mime_type(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "text/markdown",
            OutputFormat::Html => "text/html",
            OutputFormat::Text => "text/plain",
            OutputFormat::Slides | OutputFormat::Json => "application/json",
        }
    }

    /// Short name, as accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Markdown => "markdown",
            OutputFormat::Html => "html",
            OutputFormat::Text => "text",
            OutputFormat::Slides => "slides",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "html" | "htm" => Ok(OutputFormat::Html),
            "text" | "txt" | "plain" => Ok(OutputFormat::Text),
            "slides" | "pptx" => Ok(OutputFormat::Slides),
            "json" => Ok(OutputFormat::Json),
            _ => Err(Error::UnknownFormat(s.to_string())),
        }
    }
}

/// Render a document to the given format.
///
/// JSON-based formats are pretty-printed.
pub fn render(doc: &Document, format: OutputFormat, options: &RenderOptions) -> Result<String> {
    log::debug!("Rendering {} section(s) as {}", doc.sections.len(), format);
    match format {
        OutputFormat::Markdown => Ok(to_markdown(doc, options)),
        OutputFormat::Html => Ok(to_html(doc, options)),
        OutputFormat::Text => Ok(to_text(doc)),
        OutputFormat::Slides => slides_to_json(&to_slides(doc), JsonFormat::Pretty),
        OutputFormat::Json => to_json(doc, JsonFormat::Pretty),
    }
}

/// Render many documents in parallel. Results keep the input order.
pub fn render_batch(
    docs: &[Document],
    format: OutputFormat,
    options: &RenderOptions,
) -> Vec<Result<String>> {
    docs.par_iter()
        .map(|doc| render(doc, format, options))
        .collect()
}
