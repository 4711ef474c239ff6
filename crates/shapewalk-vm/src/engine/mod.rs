//! Walk engine: cursors, the generic walker, and the visitors built on it.
//!
//! Every operation is one [`Walker`] instantiated with a data cursor and a
//! [`Visitor`]: size, print and the flat check walk shape alone, rendering
//! walks one value, comparison walks two in lockstep.

mod cmp;
mod cursor;
mod dump;
mod flat;
mod glue;
mod log;
mod print;
mod sink;
mod size;
mod walker;

#[cfg(test)]
mod log_tests;
#[cfg(test)]
mod test_utils;

pub use cursor::{Cursor, Ptr, PtrPair};
pub use dump::dump;
pub use glue::{
    CmpMode, WireError, cmp_type, compare, is_flat, log_structured, render, size_and_alignment,
};
pub use print::print_shape;
pub use sink::{Level, LogSink, TracingSink};
pub use size::size_of;
pub use walker::{Elements, PtrKind, Seq, SeqKind, Visitor, Walker, WordKind, dispatch};
