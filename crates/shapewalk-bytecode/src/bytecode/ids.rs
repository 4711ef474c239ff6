//! Side-table index newtypes.

/// Index into the tag table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
#[repr(transparent)]
pub struct TagId(pub u16);

impl TagId {
    #[inline]
    pub fn get(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index into the resource (destructor) table.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
#[repr(transparent)]
pub struct ResId(pub u16);

impl ResId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Variant discriminant as stored in memory ahead of a variant's fields.
pub type TagVariant = usize;
