//! Edit Engine - selection-driven editing of a page tree
//!
//! This crate implements the editing core that sits between a host shell
//! and the page tree: selection save/restore, paragraph focus, image and
//! table insertion and selection, structural key handling, inline object
//! motion, text formatting and target-directed formatting verbs.

mod error;
mod settings;
mod input;
mod metrics;
mod range_store;
mod session;
mod paragraph_registry;
mod image;
mod object_layout;
mod table;
pub mod table_parts;
mod word_motion;
mod structural;
mod text_range;
mod target;

pub use error::*;
pub use settings::*;
pub use input::*;
pub use metrics::*;
pub use range_store::*;
pub use session::*;
pub use paragraph_registry::*;
pub use image::*;
pub use table::*;
pub use word_motion::*;
pub use text_range::*;
pub use target::*;
pub use table_parts::{CellModel, ColumnKey, ColumnModel, RowModel};
