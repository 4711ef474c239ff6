//! Shape tags and layout primitives.

mod kind;
mod layout;

#[cfg(test)]
mod kind_tests;

pub use kind::{FnKind, Prim, ShapeTag};
pub use layout::{SizeAlign, align_to};
