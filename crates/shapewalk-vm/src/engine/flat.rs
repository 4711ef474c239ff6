//! Pointer-free check.

use shapewalk_bytecode::{ShapeTables, TagId};

use super::walker::{PtrKind, Seq, SeqKind, Visitor, Walker, WordKind};

/// Whether a value of this shape contains no pointers, so that its bytes
/// alone describe it.
pub fn is_flat(shape: &[u8], tables: &ShapeTables) -> bool {
    let mut v = Flat {
        flat: true,
        seen: vec![false; tables.tags().len()],
    };
    Walker::shape_only(shape, tables).walk_all(&mut v);
    v.flat
}

struct Flat {
    flat: bool,
    /// Tags already entered. A union reached again is judged by its first
    /// visit.
    seen: Vec<bool>,
}

impl<'a> Visitor<'a, ()> for Flat {
    fn tag(&mut self, w: &Walker<'a, ()>, id: TagId, _dp: ()) {
        let info = w.tables().tag(id);
        if std::mem::replace(&mut self.seen[id.index()], true) {
            return;
        }
        for variant in 0..info.variant_count() {
            if !self.flat {
                return;
            }
            w.walk_variant(self, id, variant, ());
        }
    }

    fn seq(&mut self, w: &Walker<'a, ()>, seq: Seq<'a, ()>) {
        match seq.kind {
            SeqKind::FixedVec(_) => w.walk_elements(self, &seq),
            SeqKind::Vec | SeqKind::UnboxedVec | SeqKind::Slice { .. } => self.flat = false,
        }
    }

    fn ptr(&mut self, _w: &Walker<'a, ()>, _kind: PtrKind, _inner: &'a [u8], _dp: ()) {
        self.flat = false;
    }

    fn word(&mut self, _w: &Walker<'a, ()>, _kind: WordKind, _dp: ()) {
        self.flat = false;
    }
}
