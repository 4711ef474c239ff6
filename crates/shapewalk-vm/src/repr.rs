//! In-memory representation of values described by shape bytecode.
//!
//! Hosts that build values for the walker must lay them out as follows:
//!
//! - primitives use their native size and alignment
//! - structs and resources use C layout
//! - a tagged union with more than one variant stores a [`TagVariant`]
//!   discriminant, then the chosen variant's fields in C layout
//! - `BOX` is a pointer to a [`RawBox`], `UNIQ` and `RPTR` point at the value
//! - `VEC` is a pointer to a [`RawVec`], `UNBOXED_VEC` is a `RawVec` inline
//! - `SLICE` is a [`RawSlice`]
//! - `FIXEDVEC` is its elements back to back
//! - `BARE_FN` and `TYDESC` are one pointer, other fns and `OBJ`/`TRAIT`
//!   are a [`FnPair`]

use shapewalk_bytecode::{TagVariant, align_to};

/// Pointer size in bytes.
pub const WORD: usize = size_of::<usize>();

pub const TAG_SIZE: usize = size_of::<TagVariant>();
pub const TAG_ALIGN: usize = align_of::<TagVariant>();

/// Reference-counted heap cell.
#[repr(C)]
#[derive(Debug)]
pub struct RawBox<T> {
    pub ref_count: usize,
    pub body: T,
}

impl<T> RawBox<T> {
    pub fn new(body: T) -> Self {
        Self { ref_count: 1, body }
    }
}

/// Vector header followed by its elements.
///
/// `fill` and `alloc` count bytes, not elements.
#[repr(C)]
#[derive(Debug)]
pub struct RawVec<T> {
    pub fill: usize,
    pub alloc: usize,
    pub data: T,
}

impl<T, const N: usize> RawVec<[T; N]> {
    pub fn new(data: [T; N]) -> Self {
        let bytes = size_of::<[T; N]>();
        Self {
            fill: bytes,
            alloc: bytes,
            data,
        }
    }
}

/// Borrowed run of elements. `len` counts bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct RawSlice {
    pub data: *const u8,
    pub len: usize,
}

impl RawSlice {
    /// Slice over `bytes`. Pass `s.as_bytes()` of a NUL-terminated string
    /// for `is_str` slices.
    pub fn new<T>(elems: &[T]) -> Self {
        Self {
            data: elems.as_ptr() as *const u8,
            len: size_of_val(elems),
        }
    }
}

/// Two-word closure, object or trait value.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FnPair {
    pub code: *const u8,
    pub env: *const u8,
}

/// Offset of `RawBox::body` for a body with the given alignment.
#[inline]
pub fn box_body_offset(body_align: usize) -> usize {
    align_to(WORD, body_align)
}

/// Offset of `RawVec::data` for elements with the given alignment.
#[inline]
pub fn vec_data_offset(elem_align: usize) -> usize {
    align_to(2 * WORD, elem_align)
}
