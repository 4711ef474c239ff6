//! Data cursors walked in lockstep with shape bytecode.
//!
//! A cursor is zero, one or two data pointers. Pointer arithmetic is applied
//! to every lane, so the same walker drives shape-only visitors (`()`),
//! value visitors ([`Ptr`]) and pairwise visitors ([`PtrPair`]).

use shapewalk_bytecode::align_to;

/// One or more data pointers moved together.
pub trait Cursor: Copy {
    /// False for the shape-only cursor; the walker skips layout work then.
    const HAS_DATA: bool;

    /// A value read from every lane.
    type Value<T: Copy>: Copy;

    /// Round every lane up to `align`.
    fn align(self, align: usize) -> Self;

    /// Move every lane forward by `bytes`.
    fn advance(self, bytes: usize) -> Self;

    /// Whether `bytes` more bytes fit before `end` in every lane.
    fn fits(self, end: Self, bytes: usize) -> bool;

    /// Byte distance to `end`, per lane. Saturates at zero.
    fn distance(self, end: Self) -> Self::Value<usize>;

    /// The same value in every lane.
    fn splat<T: Copy>(value: T) -> Self::Value<T>;

    /// The value of the first lane, if there is one.
    fn first<T: Copy>(value: Self::Value<T>) -> Option<T>;

    /// Read a `T` at every lane.
    ///
    /// # Safety
    /// Every lane must point at a readable, initialized `T`.
    unsafe fn read<T: Copy>(self) -> Self::Value<T>;

    /// Replace every lane with `f(lane)`.
    ///
    /// # Safety
    /// `f` is called with each lane and may dereference it; the caller
    /// guarantees that is valid.
    unsafe fn map(self, f: impl Fn(*const u8) -> *const u8) -> Self;
}

/// Shape-only walks carry no data.
impl Cursor for () {
    const HAS_DATA: bool = false;

    type Value<T: Copy> = ();

    fn align(self, _align: usize) -> Self {}

    fn advance(self, _bytes: usize) -> Self {}

    fn fits(self, _end: Self, _bytes: usize) -> bool {
        false
    }

    fn distance(self, _end: Self) -> Self::Value<usize> {}

    fn splat<T: Copy>(_value: T) -> Self::Value<T> {}

    fn first<T: Copy>(_value: Self::Value<T>) -> Option<T> {
        None
    }

    unsafe fn read<T: Copy>(self) -> Self::Value<T> {}

    unsafe fn map(self, _f: impl Fn(*const u8) -> *const u8) -> Self {}
}

/// A single data pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ptr(pub *const u8);

impl Ptr {
    pub fn new<T>(value: &T) -> Self {
        Self(value as *const T as *const u8)
    }

    pub fn addr(self) -> usize {
        self.0 as usize
    }
}

impl Cursor for Ptr {
    const HAS_DATA: bool = true;

    type Value<T: Copy> = T;

    #[inline]
    fn align(self, align: usize) -> Self {
        let addr = self.addr();
        Self(self.0.wrapping_add(align_to(addr, align) - addr))
    }

    #[inline]
    fn advance(self, bytes: usize) -> Self {
        Self(self.0.wrapping_add(bytes))
    }

    #[inline]
    fn fits(self, end: Self, bytes: usize) -> bool {
        end.addr().saturating_sub(self.addr()) >= bytes
    }

    #[inline]
    fn distance(self, end: Self) -> usize {
        end.addr().saturating_sub(self.addr())
    }

    fn splat<T: Copy>(value: T) -> T {
        value
    }

    fn first<T: Copy>(value: T) -> Option<T> {
        Some(value)
    }

    #[inline]
    unsafe fn read<T: Copy>(self) -> T {
        // SAFETY: the caller guarantees a readable `T`; roots may be
        // unaligned, so no alignment is assumed.
        unsafe { (self.0 as *const T).read_unaligned() }
    }

    #[inline]
    unsafe fn map(self, f: impl Fn(*const u8) -> *const u8) -> Self {
        Self(f(self.0))
    }
}

/// Two data pointers walked in lockstep.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PtrPair {
    pub fst: Ptr,
    pub snd: Ptr,
}

impl PtrPair {
    pub fn new(fst: Ptr, snd: Ptr) -> Self {
        Self { fst, snd }
    }
}

impl Cursor for PtrPair {
    const HAS_DATA: bool = true;

    type Value<T: Copy> = (T, T);

    fn align(self, align: usize) -> Self {
        Self::new(self.fst.align(align), self.snd.align(align))
    }

    fn advance(self, bytes: usize) -> Self {
        Self::new(self.fst.advance(bytes), self.snd.advance(bytes))
    }

    fn fits(self, end: Self, bytes: usize) -> bool {
        self.fst.fits(end.fst, bytes) && self.snd.fits(end.snd, bytes)
    }

    fn distance(self, end: Self) -> (usize, usize) {
        (self.fst.distance(end.fst), self.snd.distance(end.snd))
    }

    fn splat<T: Copy>(value: T) -> (T, T) {
        (value, value)
    }

    fn first<T: Copy>(value: (T, T)) -> Option<T> {
        Some(value.0)
    }

    unsafe fn read<T: Copy>(self) -> (T, T) {
        // SAFETY: forwarded to the caller's guarantee for both lanes.
        unsafe { (self.fst.read(), self.snd.read()) }
    }

    unsafe fn map(self, f: impl Fn(*const u8) -> *const u8) -> Self {
        // SAFETY: forwarded to the caller's guarantee for both lanes.
        unsafe { Self::new(self.fst.map(&f), self.snd.map(&f)) }
    }
}
