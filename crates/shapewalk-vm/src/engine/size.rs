//! Size and alignment of shapes, without data.
//!
//! Tag layouts are cached for the duration of one computation only; the
//! tables themselves are never written.

use std::mem;

use shapewalk_bytecode::{Node, ShapeTables, SizeAlign, TagId, align_to};

use super::walker::{Visitor, Walker};
use crate::repr::{TAG_ALIGN, TAG_SIZE};

/// Size and alignment of a shape range, laid out like struct fields.
///
/// For a range holding one node this is that node's layout.
pub fn size_of(shape: &[u8], tables: &ShapeTables) -> SizeAlign {
    SizeOf::new(tables).measure(shape)
}

/// Layout of an already decoded node.
pub(crate) fn layout_of<'a>(node: Node<'a>, tables: &'a ShapeTables) -> SizeAlign {
    match node {
        Node::Prim(prim) => SizeAlign::new(prim.size(), prim.align()),
        _ => SizeOf::new(tables).layout(node),
    }
}

#[derive(Clone, Copy, Debug)]
enum TagSlot {
    Unknown,
    InProgress,
    Known(SizeAlign),
}

struct SizeOf<'a> {
    tables: &'a ShapeTables,
    /// Running layout of the field list being measured.
    acc: SizeAlign,
    tags: Vec<TagSlot>,
}

impl<'a> SizeOf<'a> {
    fn new(tables: &'a ShapeTables) -> Self {
        Self {
            tables,
            acc: SizeAlign::EMPTY,
            tags: vec![TagSlot::Unknown; tables.tags().len()],
        }
    }

    fn measure(&mut self, range: &'a [u8]) -> SizeAlign {
        self.fold(SizeAlign::EMPTY, range)
    }

    /// Append every node of `range` to `start`, then pad.
    fn fold(&mut self, start: SizeAlign, range: &'a [u8]) -> SizeAlign {
        let outer = mem::replace(&mut self.acc, start);
        Walker::shape_only(range, self.tables).walk_all(self);
        mem::replace(&mut self.acc, outer).padded()
    }

    fn layout(&mut self, node: Node<'a>) -> SizeAlign {
        match node {
            Node::Prim(prim) => SizeAlign::new(prim.size(), prim.align()),
            Node::Struct(fields) | Node::Res { fields, .. } => self.measure(fields),
            Node::Tag(id) => self.tag(id),
            Node::FixedVec { n_elts, elem, .. } => {
                let elem = self.measure(elem);
                SizeAlign::new(n_elts as usize * elem.size, elem.align)
            }
            Node::Vec { .. } | Node::Box(_) | Node::Uniq(_) | Node::Rptr(_) | Node::Tydesc => {
                SizeAlign::words(1)
            }
            Node::UnboxedVec { .. } | Node::Slice { .. } | Node::Obj | Node::Trait => {
                SizeAlign::words(2)
            }
            Node::Fn(kind) => SizeAlign::words(kind.words()),
        }
    }

    /// Largest hinted variant, discriminant included.
    ///
    /// # Panics
    /// Panics if the union contains itself without an indirection.
    fn tag(&mut self, id: TagId) -> SizeAlign {
        let tables = self.tables;
        let info = tables.tag(id);
        match self.tags[id.index()] {
            TagSlot::Known(layout) => return layout,
            TagSlot::InProgress => panic!("tag {} contains itself by value", id.get()),
            TagSlot::Unknown => {}
        }
        self.tags[id.index()] = TagSlot::InProgress;

        let base = if info.has_discriminant() {
            SizeAlign::new(TAG_SIZE, TAG_ALIGN)
        } else {
            SizeAlign::EMPTY
        };
        let mut size = 0;
        let mut align = 1;
        for &variant in info.largest_variants() {
            let layout = self.fold(base, info.variant(variant as usize));
            size = size.max(layout.size);
            align = align.max(layout.align);
        }

        let layout = if size == 0 && !info.has_discriminant() {
            SizeAlign::new(1, 1)
        } else {
            SizeAlign::new(align_to(size, align), align)
        };

        tracing::trace!(
            tag = id.get(),
            size = layout.size,
            align = layout.align,
            "tag layout computed"
        );
        self.tags[id.index()] = TagSlot::Known(layout);
        layout
    }
}

impl<'a> Visitor<'a, ()> for SizeOf<'a> {
    fn visit(&mut self, _w: &Walker<'a, ()>, node: Node<'a>, _dp: ()) {
        let layout = self.layout(node);
        self.acc.append(layout);
    }
}
