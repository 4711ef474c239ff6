//! Size and alignment pairs.

/// Round `size` up to the next multiple of `align`.
///
/// `align` must be a power of two.
#[inline]
pub fn align_to(size: usize, align: usize) -> usize {
    debug_assert!(align.is_power_of_two(), "alignment {align} is not a power of two");
    (size + align - 1) & !(align - 1)
}

/// Size and alignment of a value, with an unset state.
///
/// Alignment zero marks the unset state; every measured layout has an
/// alignment of at least one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct SizeAlign {
    pub size: usize,
    pub align: usize,
}

impl SizeAlign {
    /// Not yet computed.
    pub const UNSET: Self = Self { size: 0, align: 0 };

    /// Layout of a zero-sized value.
    pub const EMPTY: Self = Self { size: 0, align: 1 };

    pub fn new(size: usize, align: usize) -> Self {
        Self { size, align }
    }

    /// Layout of `words` consecutive pointers.
    pub fn words(words: usize) -> Self {
        Self {
            size: words * std::mem::size_of::<usize>(),
            align: std::mem::align_of::<usize>(),
        }
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.align != 0
    }

    /// Append a field: pad to its alignment, then add its size.
    pub fn append(&mut self, field: SizeAlign) {
        self.size = align_to(self.size, field.align) + field.size;
        self.align = self.align.max(field.align);
    }

    /// Pad the size out to a multiple of the alignment.
    pub fn padded(self) -> Self {
        Self {
            size: align_to(self.size, self.align.max(1)),
            align: self.align.max(1),
        }
    }
}

impl Default for SizeAlign {
    fn default() -> Self {
        Self::UNSET
    }
}

impl std::fmt::Display for SizeAlign {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "size={} align={}", self.size, self.align)
    }
}
