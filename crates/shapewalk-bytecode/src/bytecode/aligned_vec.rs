//! Word-aligned storage for raw value images.
//!
//! Values read by the walker are accessed at their natural alignment, so a
//! byte image of a value (a hex argument, a test fixture) must start on a
//! boundary at least as strict as the strictest primitive. `Vec<u8>` gives
//! no such guarantee.

use std::ops::{Deref, DerefMut};

/// Alignment of every buffer. Covers all primitive and pointer alignments.
pub const ALIGN: usize = 16;

#[repr(C, align(16))]
#[derive(Clone, Copy)]
struct Block([u8; ALIGN]);

/// Mutable byte buffer whose start is aligned to [`ALIGN`].
#[derive(Clone)]
pub struct AlignedVec {
    blocks: Vec<Block>,
    len: usize,
}

impl AlignedVec {
    /// Zero-filled buffer of `len` bytes.
    pub fn zeroed(len: usize) -> Self {
        Self {
            blocks: vec![Block([0; ALIGN]); len.div_ceil(ALIGN)],
            len,
        }
    }

    /// Copy bytes into aligned storage.
    pub fn copy_from_slice(bytes: &[u8]) -> Self {
        let mut out = Self::zeroed(bytes.len());
        out.as_mut_slice().copy_from_slice(bytes);
        out
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_ptr(&self) -> *const u8 {
        self.blocks.as_ptr() as *const u8
    }

    pub fn as_slice(&self) -> &[u8] {
        if self.blocks.is_empty() {
            return &[];
        }
        // SAFETY: Block is repr(C) over a byte array, and `len` never exceeds
        // the block capacity (set once in `zeroed`).
        unsafe { std::slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        if self.blocks.is_empty() {
            return &mut [];
        }
        // SAFETY: as in `as_slice`; the borrow of `self` is exclusive.
        unsafe { std::slice::from_raw_parts_mut(self.blocks.as_mut_ptr() as *mut u8, self.len) }
    }
}

impl Deref for AlignedVec {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_slice()
    }
}

impl DerefMut for AlignedVec {
    fn deref_mut(&mut self) -> &mut [u8] {
        self.as_mut_slice()
    }
}

impl std::fmt::Debug for AlignedVec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlignedVec")
            .field("len", &self.len)
            .field("aligned", &(self.as_ptr() as usize).is_multiple_of(ALIGN))
            .finish()
    }
}
