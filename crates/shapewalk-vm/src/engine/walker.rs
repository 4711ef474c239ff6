//! Generic shape walker.
//!
//! A [`Walker`] decodes one node at a time from a bounded range of shape
//! bytecode and moves a data [`Cursor`] past the value the node describes.
//! What happens at each node is up to a [`Visitor`]. Composite nodes are
//! walked by spawning a child walker over the node's sub-range; the child is
//! a plain value that lives only for the duration of the hook.

use shapewalk_bytecode::{
    FnKind, Node, Prim, ResId, ShapeReader, ShapeTables, ShapeTag, TagId, TagVariant,
};

use super::cursor::Cursor;
use super::size::{layout_of, size_of};
use crate::repr::{RawSlice, TAG_SIZE, box_body_offset, vec_data_offset};

/// Pointer-like node kinds. The cell holds one data pointer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PtrKind {
    Box,
    Uniq,
    Rptr,
}

impl PtrKind {
    pub fn sigil(self) -> char {
        match self {
            PtrKind::Box => '@',
            PtrKind::Uniq => '~',
            PtrKind::Rptr => '&',
        }
    }
}

/// Opaque word-sized node kinds, compared by identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WordKind {
    Fn(FnKind),
    Obj,
    Trait,
    Tydesc,
}

impl WordKind {
    pub fn words(self) -> usize {
        match self {
            WordKind::Fn(kind) => kind.words(),
            WordKind::Obj | WordKind::Trait => 2,
            WordKind::Tydesc => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            WordKind::Fn(_) => "fn",
            WordKind::Obj => "obj",
            WordKind::Trait => "trait",
            WordKind::Tydesc => "tydesc",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeqKind {
    Vec,
    UnboxedVec,
    Slice { is_str: bool },
    FixedVec(u16),
}

/// A run of elements: vector, slice or fixed vector.
///
/// `start..end` is the element data in every lane. Shape-only walks leave
/// both as `()`.
#[derive(Clone, Copy, Debug)]
pub struct Seq<'a, C> {
    pub kind: SeqKind,
    pub elem: &'a [u8],
    pub is_pod: bool,
    /// Size of one element, padding included.
    pub stride: usize,
    pub start: C,
    pub end: C,
}

impl<'a, C: Cursor> Seq<'a, C> {
    /// Elements are plain bytes and render as a string.
    pub fn is_bytes(&self) -> bool {
        self.elem == [ShapeTag::U8 as u8]
    }

    /// Cursor at each element that fits before `end` in every lane.
    pub fn elements(&self) -> Elements<C> {
        Elements {
            cur: self.start,
            end: self.end,
            stride: self.stride,
        }
    }
}

/// Iterator over element cursors of a [`Seq`].
///
/// Zero-sized elements yield nothing: their count is not recoverable from a
/// byte length.
pub struct Elements<C> {
    cur: C,
    end: C,
    stride: usize,
}

impl<C: Cursor> Iterator for Elements<C> {
    type Item = C;

    fn next(&mut self) -> Option<C> {
        if self.stride == 0 || !self.cur.fits(self.end, self.stride) {
            return None;
        }
        let out = self.cur;
        self.cur = self.cur.advance(self.stride);
        Some(out)
    }
}

/// Per-node policy driven by a [`Walker`].
///
/// Every hook has a default that traverses into the node's children, except
/// where there is nothing to traverse. Override [`visit`](Self::visit) to
/// handle all nodes uniformly.
pub trait Visitor<'a, C: Cursor> {
    fn visit(&mut self, w: &Walker<'a, C>, node: Node<'a>, dp: C) {
        dispatch(self, w, node, dp);
    }

    fn prim(&mut self, _w: &Walker<'a, C>, _prim: Prim, _dp: C) {}

    fn struct_(&mut self, w: &Walker<'a, C>, fields: &'a [u8], dp: C) {
        w.walk_fields(self, fields, dp);
    }

    fn tag(&mut self, w: &Walker<'a, C>, id: TagId, dp: C) {
        w.walk_tag(self, id, dp);
    }

    fn seq(&mut self, w: &Walker<'a, C>, seq: Seq<'a, C>) {
        w.walk_elements(self, &seq);
    }

    fn ptr(&mut self, w: &Walker<'a, C>, kind: PtrKind, inner: &'a [u8], dp: C) {
        w.walk_pointee(self, kind, inner, dp);
    }

    fn word(&mut self, _w: &Walker<'a, C>, _kind: WordKind, _dp: C) {}

    fn res(&mut self, w: &Walker<'a, C>, _dtor: ResId, fields: &'a [u8], dp: C) {
        w.walk_fields(self, fields, dp);
    }
}

/// Route a node to its hook.
pub fn dispatch<'a, C, V>(v: &mut V, w: &Walker<'a, C>, node: Node<'a>, dp: C)
where
    C: Cursor,
    V: Visitor<'a, C> + ?Sized,
{
    match node {
        Node::Prim(prim) => v.prim(w, prim, dp),
        Node::Struct(fields) => v.struct_(w, fields, dp),
        Node::Tag(id) => v.tag(w, id, dp),
        Node::Vec { elem, is_pod } => v.seq(w, w.seq(SeqKind::Vec, elem, is_pod, dp)),
        Node::UnboxedVec { elem, is_pod } => v.seq(w, w.seq(SeqKind::UnboxedVec, elem, is_pod, dp)),
        Node::Slice {
            elem,
            is_pod,
            is_str,
        } => v.seq(w, w.seq(SeqKind::Slice { is_str }, elem, is_pod, dp)),
        Node::FixedVec {
            n_elts,
            elem,
            is_pod,
        } => v.seq(w, w.seq(SeqKind::FixedVec(n_elts), elem, is_pod, dp)),
        Node::Box(inner) => v.ptr(w, PtrKind::Box, inner, dp),
        Node::Uniq(inner) => v.ptr(w, PtrKind::Uniq, inner, dp),
        Node::Rptr(inner) => v.ptr(w, PtrKind::Rptr, inner, dp),
        Node::Fn(kind) => v.word(w, WordKind::Fn(kind), dp),
        Node::Obj => v.word(w, WordKind::Obj, dp),
        Node::Trait => v.word(w, WordKind::Trait, dp),
        Node::Tydesc => v.word(w, WordKind::Tydesc, dp),
        Node::Res { dtor, fields } => v.res(w, dtor, fields, dp),
    }
}

/// Walk state: shape cursor, data cursor, needs-alignment flag.
#[derive(Clone, Copy, Debug)]
pub struct Walker<'a, C> {
    sp: ShapeReader<'a>,
    tables: &'a ShapeTables,
    dp: C,
    align: bool,
}

impl<'a> Walker<'a, ()> {
    /// Walker over shape alone.
    pub fn shape_only(shape: &'a [u8], tables: &'a ShapeTables) -> Self {
        Self {
            sp: ShapeReader::new(shape),
            tables,
            dp: (),
            align: false,
        }
    }
}

impl<'a, C: Cursor> Walker<'a, C> {
    /// Walker over `shape` with data at `dp`.
    ///
    /// The root is not aligned: `dp` is taken as the value's address.
    ///
    /// # Safety
    /// Every lane of `dp` must point at a live value laid out as `shape`
    /// describes (see [`repr`](crate::repr)), for as long as the walker and
    /// its children are used.
    pub unsafe fn new(shape: &'a [u8], tables: &'a ShapeTables, dp: C) -> Self {
        Self {
            sp: ShapeReader::new(shape),
            tables,
            dp,
            align: false,
        }
    }

    /// Child walker over a sub-range, sharing this walker's tables.
    fn child(&self, range: &'a [u8], dp: C) -> Self {
        Self {
            sp: ShapeReader::new(range),
            tables: self.tables,
            dp,
            align: false,
        }
    }

    pub fn tables(&self) -> &'a ShapeTables {
        self.tables
    }

    pub fn dp(&self) -> C {
        self.dp
    }

    pub fn is_done(&self) -> bool {
        self.sp.is_empty()
    }

    /// Decode one node, align the data cursor to it, hand it to `v`, and
    /// move the data cursor past it.
    pub fn step<V: Visitor<'a, C> + ?Sized>(&mut self, v: &mut V) {
        let node = self.sp.next_node();
        if !C::HAS_DATA {
            v.visit(self, node, self.dp);
        } else {
            let layout = layout_of(node, self.tables);
            if self.align {
                self.dp = self.dp.align(layout.align);
            }
            let start = self.dp;
            v.visit(self, node, start);
            self.dp = start.advance(layout.size);
        }
        self.align = true;
    }

    /// Step until the range is exhausted.
    pub fn walk_all<V: Visitor<'a, C> + ?Sized>(&mut self, v: &mut V) {
        while !self.is_done() {
            self.step(v);
        }
    }

    /// Walk a single shape at `dp`.
    pub fn walk_one<V: Visitor<'a, C> + ?Sized>(&self, v: &mut V, shape: &'a [u8], dp: C) {
        self.child(shape, dp).step(v);
    }

    /// Walk struct or resource fields starting at `dp`.
    pub fn walk_fields<V: Visitor<'a, C> + ?Sized>(&self, v: &mut V, fields: &'a [u8], dp: C) {
        self.child(fields, dp).walk_all(v);
    }

    /// Discriminant of the tagged union at `dp`, per lane.
    ///
    /// Single-variant unions store none and report variant 0.
    pub fn discriminant(&self, id: TagId, dp: C) -> C::Value<TagVariant> {
        if self.tables.tag(id).has_discriminant() {
            // SAFETY: `new`'s contract covers the discriminant word.
            unsafe { dp.read::<TagVariant>() }
        } else {
            C::splat(0)
        }
    }

    /// Walk the fields of `variant` of the union at `dp`.
    ///
    /// # Panics
    /// Panics if the variant does not exist.
    pub fn walk_variant<V: Visitor<'a, C> + ?Sized>(
        &self,
        v: &mut V,
        id: TagId,
        variant: TagVariant,
        dp: C,
    ) {
        let info = self.tables.tag(id);
        let fields = info.variant(variant);
        let mut child = if info.has_discriminant() {
            let mut child = self.child(fields, dp.advance(TAG_SIZE));
            child.align = true;
            child
        } else {
            self.child(fields, dp)
        };
        child.walk_all(v);
    }

    /// Walk the variant the data selects (the first lane's, for pairs).
    /// Shape-only walks have no selected variant and do nothing.
    pub fn walk_tag<V: Visitor<'a, C> + ?Sized>(&self, v: &mut V, id: TagId, dp: C) {
        if let Some(variant) = C::first(self.discriminant(id, dp)) {
            self.walk_variant(v, id, variant, dp);
        }
    }

    /// Walk every element, or the element shape once for shape-only walks.
    pub fn walk_elements<V: Visitor<'a, C> + ?Sized>(&self, v: &mut V, seq: &Seq<'a, C>) {
        if !C::HAS_DATA {
            self.walk_one(v, seq.elem, seq.start);
            return;
        }
        for dp in seq.elements() {
            self.walk_one(v, seq.elem, dp);
        }
    }

    /// Follow the pointer cell at `dp` and walk what it points at.
    pub fn walk_pointee<V: Visitor<'a, C> + ?Sized>(
        &self,
        v: &mut V,
        kind: PtrKind,
        inner: &'a [u8],
        dp: C,
    ) {
        let target = self.pointee(kind, inner, dp);
        self.walk_one(v, inner, target);
    }

    /// Address of the value behind the pointer cell at `dp`.
    pub fn pointee(&self, kind: PtrKind, inner: &'a [u8], dp: C) -> C {
        if !C::HAS_DATA {
            return dp;
        }
        let offset = match kind {
            PtrKind::Box => box_body_offset(size_of(inner, self.tables).align),
            PtrKind::Uniq | PtrKind::Rptr => 0,
        };
        // SAFETY: `new`'s contract covers the pointer cell.
        unsafe { dp.map(|p| read_ptr(p).wrapping_add(offset)) }
    }

    /// Resolve the element range of a sequence node at `dp`.
    pub fn seq(&self, kind: SeqKind, elem: &'a [u8], is_pod: bool, dp: C) -> Seq<'a, C> {
        let layout = size_of(elem, self.tables);
        let stride = layout.size;
        let data = vec_data_offset(layout.align);

        let (start, end) = if !C::HAS_DATA {
            (dp, dp)
        } else {
            // SAFETY: `new`'s contract covers the header at `dp` and the
            // element storage it describes.
            unsafe {
                match kind {
                    SeqKind::Vec => (
                        dp.map(|p| read_ptr(p).wrapping_add(data)),
                        dp.map(|p| {
                            let raw = read_ptr(p);
                            raw.wrapping_add(data + read_word(raw))
                        }),
                    ),
                    SeqKind::UnboxedVec => (
                        dp.map(|p| p.wrapping_add(data)),
                        dp.map(|p| p.wrapping_add(data + read_word(p))),
                    ),
                    SeqKind::Slice { is_str } => (
                        dp.map(|p| read_ptr(p)),
                        dp.map(|p| {
                            let slice = (p as *const RawSlice).read_unaligned();
                            let len = if is_str {
                                slice.len.saturating_sub(1)
                            } else {
                                slice.len
                            };
                            slice.data.wrapping_add(len)
                        }),
                    ),
                    SeqKind::FixedVec(n) => (dp, dp.advance(n as usize * stride)),
                }
            }
        };

        Seq {
            kind,
            elem,
            is_pod,
            stride,
            start,
            end,
        }
    }
}

unsafe fn read_ptr(p: *const u8) -> *const u8 {
    // SAFETY: caller guarantees a pointer cell at `p`.
    unsafe { (p as *const *const u8).read_unaligned() }
}

unsafe fn read_word(p: *const u8) -> usize {
    // SAFETY: caller guarantees a word at `p`.
    unsafe { (p as *const usize).read_unaligned() }
}
