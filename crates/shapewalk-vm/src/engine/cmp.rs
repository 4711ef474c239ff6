//! Structural comparison of two values of the same shape.

use std::cmp::Ordering;

use shapewalk_bytecode::{Node, Prim, TagId};

use super::cursor::{Cursor, PtrPair};
use super::walker::{PtrKind, Seq, Visitor, Walker, WordKind, dispatch};
use crate::repr::WORD;

/// Ordering of `a` against `b` with a total fallback: anything neither less
/// nor equal is greater, so a NaN on either side compares greater.
#[inline]
pub(crate) fn cmp_num<T: PartialOrd>((a, b): (T, T)) -> Ordering {
    if a < b {
        Ordering::Less
    } else if a == b {
        Ordering::Equal
    } else {
        Ordering::Greater
    }
}

/// Pairwise visitor. The first non-equal result wins; every hook is a
/// no-op once it is set.
pub(crate) struct Cmp {
    pub(crate) result: Ordering,
}

impl Cmp {
    pub(crate) fn new() -> Self {
        Self {
            result: Ordering::Equal,
        }
    }
}

impl<'a> Visitor<'a, PtrPair> for Cmp {
    fn visit(&mut self, w: &Walker<'a, PtrPair>, node: Node<'a>, dp: PtrPair) {
        if self.result.is_eq() {
            dispatch(self, w, node, dp);
        }
    }

    fn prim(&mut self, _w: &Walker<'a, PtrPair>, prim: Prim, dp: PtrPair) {
        // SAFETY: the walker's contract covers both values.
        self.result = unsafe {
            match prim {
                Prim::Nil => Ordering::Equal,
                // Compared as bytes: reading a non-0/1 byte as `bool` is UB.
                Prim::Bool | Prim::U8 => cmp_num(dp.read::<u8>()),
                Prim::Char | Prim::U32 => cmp_num(dp.read::<u32>()),
                Prim::U16 => cmp_num(dp.read::<u16>()),
                Prim::U64 => cmp_num(dp.read::<u64>()),
                Prim::I8 => cmp_num(dp.read::<i8>()),
                Prim::I16 => cmp_num(dp.read::<i16>()),
                Prim::I32 => cmp_num(dp.read::<i32>()),
                Prim::I64 => cmp_num(dp.read::<i64>()),
                Prim::F32 => cmp_num(dp.read::<f32>()),
                Prim::F64 => cmp_num(dp.read::<f64>()),
            }
        };
    }

    fn tag(&mut self, w: &Walker<'a, PtrPair>, id: TagId, dp: PtrPair) {
        let (a, b) = w.discriminant(id, dp);
        if a != b {
            self.result = cmp_num((a, b));
            return;
        }
        w.walk_variant(self, id, a, dp);
    }

    fn seq(&mut self, w: &Walker<'a, PtrPair>, seq: Seq<'a, PtrPair>) {
        for dp in seq.elements() {
            w.walk_one(self, seq.elem, dp);
            if !self.result.is_eq() {
                return;
            }
        }
        // Equal prefix: the shorter run sorts first.
        self.result = cmp_num(seq.start.distance(seq.end));
    }

    fn ptr(&mut self, w: &Walker<'a, PtrPair>, kind: PtrKind, inner: &'a [u8], dp: PtrPair) {
        // SAFETY: the walker's contract covers both pointer cells.
        let (a, b) = unsafe { dp.read::<usize>() };
        if a == 0 || b == 0 {
            // Null sorts before any live pointer.
            self.result = cmp_num((a != 0, b != 0));
            return;
        }
        w.walk_pointee(self, kind, inner, dp);
    }

    fn word(&mut self, _w: &Walker<'a, PtrPair>, kind: WordKind, dp: PtrPair) {
        for i in 0..kind.words() {
            // SAFETY: the walker's contract covers every word of the value.
            self.result = cmp_num(unsafe { dp.advance(i * WORD).read::<usize>() });
            if !self.result.is_eq() {
                return;
            }
        }
    }
}
