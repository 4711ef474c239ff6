//! Shape bytecode format.

mod aligned_vec;
mod builder;
mod constants;
mod desc;
mod header;
mod ids;
mod reader;
mod tables;

pub use aligned_vec::{ALIGN, AlignedVec};
pub use builder::{ShapeBuilder, TypeDescBuilder};
pub use constants::{HEADER_SIZE, MAGIC, VERSION};
pub use desc::{DescError, TypeDesc};
pub use header::Header;
pub use ids::{ResId, TagId, TagVariant};
pub use reader::{Node, ShapeReader};
pub use tables::{ShapeTables, TagInfo};

#[cfg(test)]
mod header_tests;
#[cfg(test)]
mod reader_tests;
#[cfg(test)]
mod tables_tests;
