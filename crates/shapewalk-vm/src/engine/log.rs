//! Value rendering.
//!
//! Output format:
//! - structs and variants `(a, b)`, resources `res(a, b)`
//! - a variant without fields renders as nothing, a resource without
//!   fields as `res`
//! - vectors, slices and fixed vectors `[a, b]`; byte runs as quoted strings
//! - pointers `@v`, `~v`, `&v`; a null pointer `@(null)`
//! - fns, objects, traits and tydescs by kind name

use std::fmt::Write as _;

use shapewalk_bytecode::{Prim, ResId, TagId};

use super::cursor::{Cursor, Ptr};
use super::walker::{PtrKind, Seq, Visitor, Walker, WordKind};

/// Renders one value into `out`.
///
/// `prefix` is the separator owed before the next value. Starting a value
/// consumes it; finishing one sets it to `", "`.
pub(crate) struct Render {
    pub(crate) out: String,
    prefix: &'static str,
}

impl Render {
    pub(crate) fn new() -> Self {
        Self {
            out: String::new(),
            prefix: "",
        }
    }

    fn begin(&mut self) {
        self.out.push_str(self.prefix);
        self.prefix = "";
    }

    fn end(&mut self) {
        self.prefix = ", ";
    }

    /// Render `inner` between `open` and `close`.
    fn group(&mut self, open: &str, close: char, inner: impl FnOnce(&mut Self)) {
        self.begin();
        self.out.push_str(open);
        inner(self);
        self.out.push(close);
        self.end();
    }
}

impl<'a> Visitor<'a, Ptr> for Render {
    fn prim(&mut self, _w: &Walker<'a, Ptr>, prim: Prim, dp: Ptr) {
        self.begin();
        let out = &mut self.out;
        // SAFETY: the walker's contract covers the value.
        unsafe {
            let _ = match prim {
                Prim::Nil => write!(out, "()"),
                Prim::Bool => write!(out, "{}", dp.read::<u8>() != 0),
                Prim::Char => write_char(out, dp.read::<u32>()),
                Prim::U8 => write!(out, "{}", dp.read::<u8>()),
                Prim::U16 => write!(out, "{}", dp.read::<u16>()),
                Prim::U32 => write!(out, "{}", dp.read::<u32>()),
                Prim::U64 => write!(out, "{}", dp.read::<u64>()),
                Prim::I8 => write!(out, "{}", dp.read::<i8>()),
                Prim::I16 => write!(out, "{}", dp.read::<i16>()),
                Prim::I32 => write!(out, "{}", dp.read::<i32>()),
                Prim::I64 => write!(out, "{}", dp.read::<i64>()),
                Prim::F32 => write!(out, "{}", dp.read::<f32>()),
                Prim::F64 => write!(out, "{}", dp.read::<f64>()),
            };
        }
        self.end();
    }

    fn struct_(&mut self, w: &Walker<'a, Ptr>, fields: &'a [u8], dp: Ptr) {
        self.group("(", ')', |r| w.walk_fields(r, fields, dp));
    }

    fn tag(&mut self, w: &Walker<'a, Ptr>, id: TagId, dp: Ptr) {
        let variant = w.discriminant(id, dp);
        if w.tables().tag(id).variant(variant).is_empty() {
            self.begin();
            self.end();
            return;
        }
        self.group("(", ')', |r| w.walk_variant(r, id, variant, dp));
    }

    fn seq(&mut self, w: &Walker<'a, Ptr>, seq: Seq<'a, Ptr>) {
        if seq.is_bytes() {
            self.begin();
            // SAFETY: `start..end` is the element storage of a live value.
            let bytes = unsafe {
                std::slice::from_raw_parts(seq.start.0, seq.start.distance(seq.end))
            };
            write_bytes(&mut self.out, bytes);
            self.end();
            return;
        }
        self.group("[", ']', |r| {
            for dp in seq.elements() {
                w.walk_one(r, seq.elem, dp);
            }
        });
    }

    fn ptr(&mut self, w: &Walker<'a, Ptr>, kind: PtrKind, inner: &'a [u8], dp: Ptr) {
        self.begin();
        self.out.push(kind.sigil());
        // SAFETY: the walker's contract covers the pointer cell.
        if unsafe { dp.read::<usize>() } == 0 {
            self.out.push_str("(null)");
            self.end();
            return;
        }
        w.walk_pointee(self, kind, inner, dp);
    }

    fn word(&mut self, _w: &Walker<'a, Ptr>, kind: WordKind, _dp: Ptr) {
        self.begin();
        self.out.push_str(kind.name());
        self.end();
    }

    fn res(&mut self, w: &Walker<'a, Ptr>, _dtor: ResId, fields: &'a [u8], dp: Ptr) {
        if fields.is_empty() {
            self.begin();
            self.out.push_str("res");
            self.end();
            return;
        }
        self.group("res(", ')', |r| w.walk_fields(r, fields, dp));
    }
}

fn write_char(out: &mut String, code: u32) -> std::fmt::Result {
    match char::from_u32(code) {
        Some(c) => write!(out, "'{}'", c.escape_default()),
        None => write!(out, "'\\u{{{code:x}}}'"),
    }
}

/// Quote bytes as a string literal; non-printable bytes become `\xHH`.
fn write_bytes(out: &mut String, bytes: &[u8]) {
    out.push('"');
    for &b in bytes {
        match b {
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b'\\' => out.push_str("\\\\"),
            b'"' => out.push_str("\\\""),
            0x20..=0x7e => out.push(b as char),
            _ => {
                let _ = write!(out, "\\x{b:02x}");
            }
        }
    }
    out.push('"');
}
