//! Slide-deck pre-render structure.
//!
//! A document becomes an ordered list of [`Slide`]s, each a title plus a flat
//! list of [`SlideElement`]s, for a downstream presentation generator.
//!
//! Slides are built as a fold over the sections. The accumulator is the slide
//! list itself and the current slide is always its last entry:
//!
//! - a document title opens the first slide;
//! - a section header fills in a blank current slide (no title, no elements)
//!   or opens a new slide;
//! - a section without header continues the current slide, opening an
//!   untitled one only when there is none yet.

use crate::error::{Error, Result};
use crate::model::{Block, BlockKind, Document, ListKind, Section, Table};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use super::visitor::{visit_block, BlockVisitor, ImageView, ItemChild, ItemView, ListView};
use super::JsonFormat;

/// Placeholder for list items with no text and no nested list.
const UNHANDLED_ITEM: &str = "[List item with complex or unhandled content]";

/// One slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "SLIDE")]
pub struct Slide {
    /// Slide title; empty for untitled slides
    pub title: String,
    /// Content in order
    pub elements: Vec<SlideElement>,
}

impl Slide {
    /// Create an empty slide.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            elements: Vec::new(),
        }
    }

    /// Check if the slide has neither title nor content.
    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.elements.is_empty()
    }
}

/// Content element of a slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlideElement {
    /// Body text
    Paragraph { text: String },
    /// Sub-heading inside a slide
    Title { text: String, level: u8 },
    /// Bulleted or numbered list
    List(SlideList),
    /// Image with resolved source
    Image {
        src: String,
        alt: String,
        caption: String,
    },
    /// Table flattened to strings
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    /// Quotation
    Quote {
        text: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        attribution: Option<String>,
    },
    /// Source code
    Code {
        code: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
}

/// A list on a slide.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideList {
    /// `"ordered"` or `"unordered"`
    pub list_type: ListKind,
    /// Items in order
    pub items: Vec<SlideListItem>,
}

/// A list item on a slide.
///
/// Serializes as a plain string, or as a `LIST` object carrying the item's
/// lead text next to its nested list.
#[derive(Debug, Clone, PartialEq)]
pub enum SlideListItem {
    /// Text-only item
    Text(String),
    /// Item with a nested list
    Nested {
        /// Text preceding the nested list, if any
        text: Option<String>,
        /// The nested list
        list: SlideList,
    },
}

impl Serialize for SlideListItem {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            SlideListItem::Text(text) => serializer.serialize_str(text),
            SlideListItem::Nested { text, list } => {
                let len = if text.is_some() { 4 } else { 3 };
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry("type", "LIST")?;
                if let Some(text) = text {
                    map.serialize_entry("text", text)?;
                }
                map.serialize_entry("listType", &list.list_type)?;
                map.serialize_entry("items", &list.items)?;
                map.end()
            }
        }
    }
}

/// Convert a document to slides.
pub fn to_slides(doc: &Document) -> Vec<Slide> {
    let initial: Vec<Slide> = doc.title().map(Slide::new).into_iter().collect();
    doc.sections
        .iter()
        .fold(initial, |slides, section| add_section(doc, slides, section))
}

/// Serialize slides to JSON.
pub fn slides_to_json(slides: &[Slide], format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(slides),
        JsonFormat::Compact => serde_json::to_string(slides),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

fn add_section(doc: &Document, mut slides: Vec<Slide>, section: &Section) -> Vec<Slide> {
    let fill_in = slides.last().is_some_and(Slide::is_blank);
    match section.header() {
        Some(header) if fill_in => {
            if let Some(current) = slides.last_mut() {
                current.title = header.to_string();
            }
        }
        Some(header) => slides.push(Slide::new(header)),
        None if slides.is_empty() => slides.push(Slide::new("")),
        None => {}
    }

    let mut builder = SlideBuilder;
    let elements: Vec<SlideElement> = section
        .blocks
        .iter()
        .filter_map(|block| visit_block(doc, block, &mut builder))
        .collect();
    if let Some(current) = slides.last_mut() {
        current.elements.extend(elements);
    }
    slides
}

/// Converts one block into at most one slide element.
struct SlideBuilder;

impl SlideBuilder {
    fn convert_list(&self, list: &ListView<'_>) -> SlideList {
        let mut items = Vec::with_capacity(list.items.len());
        for item in &list.items {
            if item.is_empty() {
                items.push(SlideListItem::Text(String::new()));
                continue;
            }

            let text = item.texts().collect::<Vec<_>>().join(" ").trim().to_string();
            let mut nested = item.nested_lists();
            if let Some(first) = nested.next() {
                items.push(SlideListItem::Nested {
                    text: (!text.is_empty()).then_some(text),
                    list: self.convert_list(first),
                });
                items.extend(nested.map(|extra| SlideListItem::Nested {
                    text: None,
                    list: self.convert_list(extra),
                }));
            } else if !text.is_empty() {
                items.push(SlideListItem::Text(text));
            } else {
                items.push(SlideListItem::Text(placeholder(item)));
            }
        }
        SlideList {
            list_type: list.kind,
            items,
        }
    }
}

/// Stand-in text for an item with neither text nor nested list.
fn placeholder(item: &ItemView<'_>) -> String {
    let Some(ItemChild::Other(block)) = item.children.first() else {
        return UNHANDLED_ITEM.to_string();
    };
    match &block.kind {
        BlockKind::ImageReference {
            resource_id,
            alt_text,
            ..
        } => match (alt_text.as_deref(), resource_id.as_deref()) {
            (Some(alt), _) if !alt.is_empty() => format!("[{}]", alt),
            (_, Some(id)) if !id.is_empty() => format!("[Image: {}]", id),
            _ => "[Image]".to_string(),
        },
        _ => UNHANDLED_ITEM.to_string(),
    }
}

impl BlockVisitor for SlideBuilder {
    type Output = Option<SlideElement>;

    fn paragraph(&mut self, text: &str) -> Option<SlideElement> {
        Some(SlideElement::Paragraph {
            text: text.to_string(),
        })
    }

    fn header(&mut self, text: &str, level: u8) -> Option<SlideElement> {
        Some(SlideElement::Title {
            text: text.to_string(),
            level,
        })
    }

    fn list(&mut self, list: &ListView<'_>) -> Option<SlideElement> {
        Some(SlideElement::List(self.convert_list(list)))
    }

    fn image(&mut self, image: &ImageView<'_>) -> Option<SlideElement> {
        Some(SlideElement::Image {
            src: image.src.unwrap_or("").to_string(),
            alt: image.alt.to_string(),
            caption: image.caption.unwrap_or("").to_string(),
        })
    }

    fn table(&mut self, table: &Table) -> Option<SlideElement> {
        let (headers, rows) = table.to_grid();
        Some(SlideElement::Table { headers, rows })
    }

    fn quote(&mut self, text: &str, attribution: Option<&str>) -> Option<SlideElement> {
        Some(SlideElement::Quote {
            text: text.to_string(),
            attribution: attribution.map(str::to_string),
        })
    }

    fn code(&mut self, _block: &Block, code: &str, language: Option<&str>) -> Option<SlideElement> {
        Some(SlideElement::Code {
            code: code.to_string(),
            language: language.map(str::to_string),
        })
    }

    fn skip(&mut self, block: &Block) -> Option<SlideElement> {
        log::warn!(
            "Slides: skipping {} block '{}' with no slide equivalent",
            block.type_name(),
            block.id
        );
        None
    }
}
