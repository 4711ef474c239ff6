//! Programmatic construction of shape bytecode and descriptors.
//!
//! Nested ranges are written with a placeholder length that is patched once
//! the closure describing the contents returns.
//!
//! ```
//! use shapewalk_bytecode::{Prim, ShapeBuilder};
//!
//! // (u8, vec<i32>)
//! let shape = ShapeBuilder::shape(|b| {
//!     b.struct_(|b| {
//!         b.prim(Prim::U8);
//!         b.vec(true, |b| {
//!             b.prim(Prim::I32);
//!         });
//!     });
//! });
//! assert_eq!(shape[0], 17);
//! ```

use crate::type_system::{FnKind, Prim, ShapeTag};

use super::desc::TypeDesc;
use super::ids::{ResId, TagId};
use super::tables::{ShapeTables, TagInfo};

/// Appends shape nodes to a byte buffer.
#[derive(Clone, Debug, Default)]
pub struct ShapeBuilder {
    bytes: Vec<u8>,
}

impl ShapeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a shape in one expression.
    pub fn shape(f: impl FnOnce(&mut Self)) -> Vec<u8> {
        let mut b = Self::new();
        f(&mut b);
        b.finish()
    }

    pub fn finish(self) -> Vec<u8> {
        self.bytes
    }

    pub fn prim(&mut self, prim: Prim) -> &mut Self {
        self.bytes.push(prim.tag() as u8);
        self
    }

    pub fn struct_(&mut self, fields: impl FnOnce(&mut Self)) -> &mut Self {
        self.bytes.push(ShapeTag::Struct as u8);
        self.nested(fields)
    }

    pub fn tag(&mut self, id: TagId) -> &mut Self {
        self.bytes.push(ShapeTag::Tag as u8);
        self.u16(id.get())
    }

    pub fn vec(&mut self, is_pod: bool, elem: impl FnOnce(&mut Self)) -> &mut Self {
        self.bytes.push(ShapeTag::Vec as u8);
        self.bytes.push(is_pod as u8);
        self.nested(elem)
    }

    pub fn unboxed_vec(&mut self, is_pod: bool, elem: impl FnOnce(&mut Self)) -> &mut Self {
        self.bytes.push(ShapeTag::UnboxedVec as u8);
        self.bytes.push(is_pod as u8);
        self.nested(elem)
    }

    pub fn slice(&mut self, is_pod: bool, is_str: bool, elem: impl FnOnce(&mut Self)) -> &mut Self {
        self.bytes.push(ShapeTag::Slice as u8);
        self.bytes.push(is_pod as u8);
        self.bytes.push(is_str as u8);
        self.nested(elem)
    }

    pub fn fixedvec(&mut self, n_elts: u16, is_pod: bool, elem: impl FnOnce(&mut Self)) -> &mut Self {
        self.bytes.push(ShapeTag::FixedVec as u8);
        self.u16(n_elts);
        self.bytes.push(is_pod as u8);
        self.nested(elem)
    }

    pub fn box_(&mut self, inner: impl FnOnce(&mut Self)) -> &mut Self {
        self.bytes.push(ShapeTag::Box as u8);
        self.nested(inner)
    }

    pub fn uniq(&mut self, inner: impl FnOnce(&mut Self)) -> &mut Self {
        self.bytes.push(ShapeTag::Uniq as u8);
        self.nested(inner)
    }

    pub fn rptr(&mut self, inner: impl FnOnce(&mut Self)) -> &mut Self {
        self.bytes.push(ShapeTag::Rptr as u8);
        self.nested(inner)
    }

    pub fn func(&mut self, kind: FnKind) -> &mut Self {
        self.bytes.push(kind.tag() as u8);
        self
    }

    pub fn obj(&mut self) -> &mut Self {
        self.bytes.push(ShapeTag::Obj as u8);
        self
    }

    pub fn trait_(&mut self) -> &mut Self {
        self.bytes.push(ShapeTag::Trait as u8);
        self
    }

    pub fn tydesc(&mut self) -> &mut Self {
        self.bytes.push(ShapeTag::Tydesc as u8);
        self
    }

    pub fn res(&mut self, dtor: ResId, fields: impl FnOnce(&mut Self)) -> &mut Self {
        self.bytes.push(ShapeTag::Res as u8);
        self.u16(dtor.0);
        self.nested(fields)
    }

    /// Append raw, already encoded shape bytes.
    pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
        self.bytes.extend_from_slice(bytes);
        self
    }

    fn u16(&mut self, v: u16) -> &mut Self {
        self.bytes.extend_from_slice(&v.to_le_bytes());
        self
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) -> &mut Self {
        let len_at = self.bytes.len();
        self.u16(0);
        f(self);
        let len = self.bytes.len() - len_at - 2;
        let len = u16::try_from(len)
            .unwrap_or_else(|_| panic!("nested shape too long: {len} bytes (maximum 65535)"));
        self.bytes[len_at..len_at + 2].copy_from_slice(&len.to_le_bytes());
        self
    }
}

/// Collects side tables and produces a [`TypeDesc`].
#[derive(Clone, Debug, Default)]
pub struct TypeDescBuilder {
    tags: Vec<TagInfo>,
    resources: Vec<u64>,
}

impl TypeDescBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tag whose hint lists every variant.
    pub fn add_tag(&mut self, variants: Vec<Vec<u8>>) -> TagId {
        self.push_tag(TagInfo::with_all_variants(variants))
    }

    /// Add a tag with an explicit largest-variant hint.
    pub fn add_tag_with_hint(&mut self, variants: Vec<Vec<u8>>, largest: Vec<u16>) -> TagId {
        self.push_tag(TagInfo::new(variants, largest))
    }

    /// Reserve an id for a tag whose variants refer to itself.
    ///
    /// The slot must be filled with [`define_tag`](Self::define_tag) before
    /// the descriptor is used.
    pub fn reserve_tag(&mut self) -> TagId {
        self.push_tag(TagInfo::default())
    }

    pub fn define_tag(&mut self, id: TagId, variants: Vec<Vec<u8>>) {
        self.tags[id.index()] = TagInfo::with_all_variants(variants);
    }

    pub fn add_resource(&mut self, dtor: u64) -> ResId {
        let id = table_id(self.resources.len(), "resources");
        self.resources.push(dtor);
        ResId(id)
    }

    pub fn build(self, shape: Vec<u8>) -> TypeDesc {
        TypeDesc::new(shape, ShapeTables::new(self.tags, self.resources))
    }

    fn push_tag(&mut self, info: TagInfo) -> TagId {
        let id = table_id(self.tags.len(), "tags");
        self.tags.push(info);
        TagId(id)
    }
}

fn table_id(len: usize, table: &str) -> u16 {
    u16::try_from(len).unwrap_or_else(|_| panic!("too many {table} (maximum 65535)"))
}
