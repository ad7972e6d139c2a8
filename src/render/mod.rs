//! Rendering module for converting canonical documents to output formats.
//!
//! Every renderer walks the document through [`visitor::visit_block`], so all
//! formats see the same blocks in the same order.

mod format;
mod html;
mod json;
mod markdown;
mod options;
mod result;
mod slides;
mod text;
pub mod visitor;

pub use format::{render, render_batch, OutputFormat};
pub use html::{escape_html, render_html, to_html, HtmlRenderer};
pub use json::{to_json, JsonFormat};
pub use markdown::{render_markdown, to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use options::RenderOptions;
pub use result::{RenderResult, RenderStats};
pub use slides::{slides_to_json, to_slides, Slide, SlideElement, SlideList, SlideListItem};
pub use text::to_text;
pub use visitor::{BlockVisitor, ImageView, ItemChild, ItemView, ListView};
