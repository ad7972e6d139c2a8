//! Rendering options and configuration.

use crate::model::MAX_HEADING_LEVEL;

/// Options for rendering document content.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Maximum heading level (1-6); deeper headings are clamped to it
    pub max_heading_level: u8,

    /// Include YAML frontmatter with metadata (Markdown only)
    pub include_frontmatter: bool,

    /// Character to use for unordered list markers
    pub list_marker: char,

    /// Escape text and attribute values in HTML output
    pub escape_html: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, MAX_HEADING_LEVEL);
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Set the list marker character.
    pub fn with_list_marker(mut self, marker: char) -> Self {
        self.list_marker = marker;
        self
    }

    /// Enable or disable HTML escaping.
    pub fn with_html_escaping(mut self, escape: bool) -> Self {
        self.escape_html = escape;
        self
    }

    /// Apply the heading limit to an already clamped level.
    pub(crate) fn heading_level(&self, level: u8) -> u8 {
        level.min(self.max_heading_level).max(1)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_heading_level: MAX_HEADING_LEVEL,
            include_frontmatter: false,
            list_marker: '-',
            escape_html: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_frontmatter(true)
            .with_max_heading(3)
            .with_list_marker('*')
            .with_html_escaping(false);

        assert!(options.include_frontmatter);
        assert_eq!(options.max_heading_level, 3);
        assert_eq!(options.list_marker, '*');
        assert!(!options.escape_html);
    }

    #[test]
    fn test_max_heading_clamped() {
        assert_eq!(RenderOptions::new().with_max_heading(0).max_heading_level, 1);
        assert_eq!(RenderOptions::new().with_max_heading(9).max_heading_level, 6);

        let options = RenderOptions::new().with_max_heading(2);
        assert_eq!(options.heading_level(1), 1);
        assert_eq!(options.heading_level(5), 2);
    }
}
