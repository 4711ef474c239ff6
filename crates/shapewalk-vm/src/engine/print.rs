//! Shape printing.

use std::fmt::Write as _;

use shapewalk_bytecode::{Prim, ResId, ShapeTables, TagId};

use super::walker::{PtrKind, Seq, SeqKind, Visitor, Walker, WordKind};

/// Compact textual form of a shape range, e.g. `(u8,vec<i32>,tag0)`.
pub fn print_shape(shape: &[u8], tables: &ShapeTables) -> String {
    let mut p = Print::default();
    Walker::shape_only(shape, tables).walk_all(&mut p);
    p.out
}

#[derive(Default)]
struct Print {
    out: String,
    /// Separator owed before the next shape.
    prefix: &'static str,
}

impl Print {
    fn begin(&mut self) {
        self.out.push_str(self.prefix);
        self.prefix = "";
    }

    fn end(&mut self) {
        self.prefix = ",";
    }

    fn group(&mut self, open: &str, close: char, inner: impl FnOnce(&mut Self)) {
        self.begin();
        self.out.push_str(open);
        inner(self);
        self.out.push(close);
        self.end();
    }
}

impl<'a> Visitor<'a, ()> for Print {
    fn prim(&mut self, _w: &Walker<'a, ()>, prim: Prim, _dp: ()) {
        self.begin();
        self.out.push_str(prim.name());
        self.end();
    }

    fn struct_(&mut self, w: &Walker<'a, ()>, fields: &'a [u8], _dp: ()) {
        self.group("(", ')', |p| w.walk_fields(p, fields, ()));
    }

    fn tag(&mut self, _w: &Walker<'a, ()>, id: TagId, _dp: ()) {
        self.begin();
        let _ = write!(self.out, "tag{}", id.get());
        self.end();
    }

    fn seq(&mut self, w: &Walker<'a, ()>, seq: Seq<'a, ()>) {
        let open = match seq.kind {
            SeqKind::Vec => "vec<".to_string(),
            SeqKind::UnboxedVec => "unboxed_vec<".to_string(),
            SeqKind::Slice { .. } => "slice<".to_string(),
            SeqKind::FixedVec(n) => format!("fixedvec<{n}, "),
        };
        self.group(&open, '>', |p| w.walk_elements(p, &seq));
    }

    fn ptr(&mut self, w: &Walker<'a, ()>, kind: PtrKind, inner: &'a [u8], _dp: ()) {
        let open = format!("{}<", kind.sigil());
        self.group(&open, '>', |p| w.walk_one(p, inner, ()));
    }

    fn word(&mut self, _w: &Walker<'a, ()>, kind: WordKind, _dp: ()) {
        self.begin();
        self.out.push_str(kind.name());
        self.end();
    }

    fn res(&mut self, w: &Walker<'a, ()>, dtor: ResId, fields: &'a [u8], _dp: ()) {
        let open = format!("res@{:#x}", w.tables().resource(dtor));
        if fields.is_empty() {
            self.begin();
            self.out.push_str(&open);
            self.end();
            return;
        }
        self.group(&format!("{open}("), ')', |p| w.walk_fields(p, fields, ()));
    }
}
