//! Document Model - the editable page tree
//!
//! This crate holds the structure the editing core works on: an arena of
//! nodes with stable ids, three page sections, element styles and marker
//! classes, plus DOM-style boundary points and range surgery.

mod node;
mod node_id;
mod selection;
mod tree;
mod range;
mod error;
pub mod style;
mod image;
pub mod paragraph;
pub mod table;
pub mod section;

pub use node::*;
pub use node_id::*;
pub use selection::*;
pub use tree::*;
pub use error::*;
pub use style::*;
pub use image::*;
pub use paragraph::*;
pub use table::*;
pub use section::*;
