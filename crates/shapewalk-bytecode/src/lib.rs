//! Shape bytecode format and type descriptors for shapewalk.
//!
//! This crate contains:
//! - The shape bytecode encoding (tags, decoder, builder)
//! - Side tables for tagged unions and resources
//! - The binary descriptor file format
//! - Layout primitives shared by the runtime (`SizeAlign`, `align_to`)

pub mod bytecode;
pub mod colors;
pub mod type_system;

pub use bytecode::{
    ALIGN, AlignedVec, DescError, HEADER_SIZE, Header, MAGIC, Node, ResId, ShapeBuilder,
    ShapeReader, ShapeTables, TagId, TagInfo, TagVariant, TypeDesc, TypeDescBuilder, VERSION,
};
pub use colors::Colors;
pub use type_system::{FnKind, Prim, ShapeTag, SizeAlign, align_to};
