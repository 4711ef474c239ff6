//! Runtime walker for shapewalk shape bytecode.
//!
//! Given a [`TypeDesc`](shapewalk_bytecode::TypeDesc) and pointers to values
//! laid out as described in [`repr`], this crate compares values
//! structurally, measures their size and alignment, prints shapes, and
//! renders values as text.

#![allow(clippy::comparison_chain)]

pub mod engine;
pub mod repr;

// Re-export commonly used items at crate root
pub use engine::{
    CmpMode, Cursor, Level, LogSink, Ptr, PtrKind, PtrPair, Seq, SeqKind, TracingSink, Visitor,
    Walker, WireError, WordKind, cmp_type, compare, dispatch, dump, is_flat, log_structured, print_shape,
    render, size_and_alignment, size_of,
};
