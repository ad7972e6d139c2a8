//! Canonical document model.
//!
//! This module defines the intermediate representation that bridges content
//! extraction and rendering. The model is format-agnostic: a [`Document`]
//! owns its [`Section`]s and [`ImageResource`]s, sections own their
//! [`Block`]s, and composite blocks own their children. Image references
//! point at resources by identifier only.

mod block;
mod document;
mod resource;
mod section;
mod table;

pub use block::{Block, BlockKind, ListKind, MAX_HEADING_LEVEL};
pub use document::{Document, Metadata, SCHEMA_VERSION};
pub use resource::ImageResource;
pub use section::Section;
pub use table::{GridTable, GroupedTable, RowGroup, RowGroupKind, Table, TableCell, TableRow};
