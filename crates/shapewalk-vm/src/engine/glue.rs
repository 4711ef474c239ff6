//! Entry points for hosts.
//!
//! Every function takes the descriptor of the type being operated on. The
//! data-reading ones are `unsafe`: pointers must reference live values laid
//! out per [`repr`](crate::repr) for the duration of the call.

use std::cmp::Ordering;

use shapewalk_bytecode::{SizeAlign, TypeDesc};

use super::cmp::Cmp;
use super::cursor::{Ptr, PtrPair};
use super::flat;
use super::log::Render;
use super::sink::{Level, LogSink};
use super::size::size_of;
use super::walker::Walker;

/// Invalid wire value for a mode or level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    #[error("invalid compare mode: {0} (expected 0=eq, 1=lt, 2=le)")]
    CmpMode(u8),
    #[error("invalid log level: {0} (expected 0..=3)")]
    Level(u8),
}

/// Relation tested by [`compare`]. Wire values are `0=eq, 1=lt, 2=le`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CmpMode {
    Eq = 0,
    Lt = 1,
    Le = 2,
}

impl CmpMode {
    pub fn holds(self, ord: Ordering) -> bool {
        match self {
            CmpMode::Eq => ord.is_eq(),
            CmpMode::Lt => ord.is_lt(),
            CmpMode::Le => ord.is_le(),
        }
    }
}

impl TryFrom<u8> for CmpMode {
    type Error = WireError;

    fn try_from(v: u8) -> Result<Self, WireError> {
        match v {
            0 => Ok(CmpMode::Eq),
            1 => Ok(CmpMode::Lt),
            2 => Ok(CmpMode::Le),
            _ => Err(WireError::CmpMode(v)),
        }
    }
}

/// Order two values of type `desc`.
///
/// # Safety
/// `a` and `b` must point at live values of type `desc`.
pub unsafe fn cmp_type(desc: &TypeDesc, a: *const u8, b: *const u8) -> Ordering {
    let mut v = Cmp::new();
    // SAFETY: forwarded to the caller.
    let mut w = unsafe { Walker::new(desc.shape(), desc.tables(), PtrPair::new(Ptr(a), Ptr(b))) };
    w.walk_all(&mut v);
    v.result
}

/// Test `a <mode> b`.
///
/// # Safety
/// As for [`cmp_type`].
pub unsafe fn compare(desc: &TypeDesc, a: *const u8, b: *const u8, mode: CmpMode) -> bool {
    // SAFETY: forwarded to the caller.
    mode.holds(unsafe { cmp_type(desc, a, b) })
}

/// Render the value at `p` as text.
///
/// # Safety
/// `p` must point at a live value of type `desc`.
pub unsafe fn render(desc: &TypeDesc, p: *const u8) -> String {
    let mut v = Render::new();
    // SAFETY: forwarded to the caller.
    let mut w = unsafe { Walker::new(desc.shape(), desc.tables(), Ptr(p)) };
    w.walk_all(&mut v);
    v.out
}

/// Render the value at `p` and hand the text to `sink`.
///
/// # Safety
/// As for [`render`].
pub unsafe fn log_structured(desc: &TypeDesc, p: *const u8, level: Level, sink: &mut impl LogSink) {
    // SAFETY: forwarded to the caller.
    let text = unsafe { render(desc, p) };
    sink.log(level, &text);
}

pub fn size_and_alignment(desc: &TypeDesc) -> SizeAlign {
    size_of(desc.shape(), desc.tables())
}

pub fn is_flat(desc: &TypeDesc) -> bool {
    flat::is_flat(desc.shape(), desc.tables())
}
