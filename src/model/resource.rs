//! Image resources referenced by the document.

use serde::{Deserialize, Serialize};

/// An image acquired alongside the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResource {
    /// Unique identifier within the document
    #[serde(alias = "resourceId")]
    pub id: String,

    /// URL the image was scraped from
    #[serde(default, alias = "src")]
    pub original_url: String,

    /// Display URL after acquisition (local path, data URI, or remote URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_url: Option<String>,

    /// Alternative text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt_text: Option<String>,

    /// Image format (e.g., "png", "jpeg")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    /// Height in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

impl ImageResource {
    /// Create an image resource from its identifier and original URL.
    pub fn new(id: impl Into<String>, original_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            original_url: original_url.into(),
            ..Default::default()
        }
    }

    /// Set the resolved display URL.
    pub fn with_resolved_url(mut self, url: impl Into<String>) -> Self {
        self.resolved_url = Some(url.into());
        self
    }

    /// Set the alt text.
    pub fn with_alt_text(mut self, alt: impl Into<String>) -> Self {
        self.alt_text = Some(alt.into());
        self
    }

    /// URL to display: the resolved URL, or the original one.
    pub fn display_url(&self) -> &str {
        match self.resolved_url.as_deref() {
            Some(url) if !url.is_empty() => url,
            _ => &self.original_url,
        }
    }

    /// Check if the display URL is an inline data URI.
    pub fn is_data_uri(&self) -> bool {
        self.display_url().starts_with("data:")
    }

    /// Get the file extension from the format or the URL.
    pub fn extension(&self) -> Option<&str> {
        if let Some(format) = self.format.as_deref() {
            return Some(match format {
                "jpeg" => "jpg",
                other => other,
            });
        }
        let url = self.original_url.split(['?', '#']).next()?;
        let name = url.rsplit('/').next()?;
        let (_, ext) = name.rsplit_once('.')?;
        (!ext.is_empty()).then_some(ext)
    }
}
