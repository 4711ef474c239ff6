//! Shape bytecode decoder.
//!
//! A [`ShapeReader`] owns a bounded slice of bytecode and consumes it front
//! to back. Nodes that contain nested shapes carry the byte length of the
//! nested range, so [`ShapeReader::next_node`] hands out the sub-slice for a
//! node's contents without walking them. A sub-slice is the `end_sp` bound
//! of the recursive walk over it.
//!
//! The producer of the bytecode guarantees it is well formed. Reading past
//! the end of a range or meeting an unknown tag byte panics.

use crate::type_system::{FnKind, Prim, ShapeTag};

use super::ids::{ResId, TagId};

/// One decoded shape node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Node<'a> {
    /// Scalar leaf.
    Prim(Prim),
    /// Field shapes, in declaration order.
    Struct(&'a [u8]),
    /// Tagged union; variants live in the tag table.
    Tag(TagId),
    /// Pointer to a heap vector.
    Vec { elem: &'a [u8], is_pod: bool },
    /// Inline vector header followed by its data.
    UnboxedVec { elem: &'a [u8], is_pod: bool },
    /// Data pointer + byte length.
    Slice {
        elem: &'a [u8],
        is_pod: bool,
        is_str: bool,
    },
    /// `n_elts` inline elements.
    FixedVec {
        n_elts: u16,
        elem: &'a [u8],
        is_pod: bool,
    },
    Box(&'a [u8]),
    Uniq(&'a [u8]),
    Rptr(&'a [u8]),
    Fn(FnKind),
    Obj,
    Trait,
    Tydesc,
    /// Fields of a value with a destructor.
    Res { dtor: ResId, fields: &'a [u8] },
}

/// Cursor over a bounded range of shape bytecode.
#[derive(Clone, Copy, Debug)]
pub struct ShapeReader<'a> {
    bytes: &'a [u8],
}

impl<'a> ShapeReader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// True once the cursor reached the end of its range.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes not yet consumed.
    #[inline]
    pub fn remaining(&self) -> &'a [u8] {
        self.bytes
    }

    /// Tag of the next node, without advancing.
    ///
    /// # Panics
    /// Panics if the next byte is not a valid tag.
    pub fn peek(&self) -> Option<ShapeTag> {
        self.bytes.first().map(|&b| decode_tag(b))
    }

    /// Read one byte.
    pub fn next_byte(&mut self) -> u8 {
        self.next_bytes(1)[0]
    }

    /// Read a little-endian u16.
    pub fn next_u16(&mut self) -> u16 {
        let b = self.next_bytes(2);
        u16::from_le_bytes([b[0], b[1]])
    }

    /// Split off the next `len` bytes.
    pub fn next_bytes(&mut self, len: usize) -> &'a [u8] {
        assert!(
            len <= self.bytes.len(),
            "shape bytecode truncated: need {len} bytes, {} left",
            self.bytes.len()
        );
        let (head, tail) = self.bytes.split_at(len);
        self.bytes = tail;
        head
    }

    /// Read a tag byte.
    pub fn next_tag(&mut self) -> ShapeTag {
        decode_tag(self.next_byte())
    }

    /// Read a `u16`-length-prefixed nested range.
    fn next_range(&mut self) -> &'a [u8] {
        let len = self.next_u16() as usize;
        self.next_bytes(len)
    }

    /// Decode one full node, advancing past it.
    pub fn next_node(&mut self) -> Node<'a> {
        let tag = self.next_tag();
        if let Some(prim) = tag.primitive() {
            return Node::Prim(prim);
        }

        match tag {
            ShapeTag::Struct => Node::Struct(self.next_range()),
            ShapeTag::Tag => Node::Tag(TagId(self.next_u16())),
            ShapeTag::Vec => {
                let is_pod = self.next_byte() != 0;
                Node::Vec {
                    elem: self.next_range(),
                    is_pod,
                }
            }
            ShapeTag::UnboxedVec => {
                let is_pod = self.next_byte() != 0;
                Node::UnboxedVec {
                    elem: self.next_range(),
                    is_pod,
                }
            }
            ShapeTag::Slice => {
                let is_pod = self.next_byte() != 0;
                let is_str = self.next_byte() != 0;
                Node::Slice {
                    elem: self.next_range(),
                    is_pod,
                    is_str,
                }
            }
            ShapeTag::FixedVec => {
                let n_elts = self.next_u16();
                let is_pod = self.next_byte() != 0;
                Node::FixedVec {
                    n_elts,
                    elem: self.next_range(),
                    is_pod,
                }
            }
            ShapeTag::Box => Node::Box(self.next_range()),
            ShapeTag::Uniq => Node::Uniq(self.next_range()),
            ShapeTag::Rptr => Node::Rptr(self.next_range()),
            ShapeTag::BareFn => Node::Fn(FnKind::Bare),
            ShapeTag::StackFn => Node::Fn(FnKind::Stack),
            ShapeTag::BoxFn => Node::Fn(FnKind::Boxed),
            ShapeTag::UniqFn => Node::Fn(FnKind::Unique),
            ShapeTag::Obj => Node::Obj,
            ShapeTag::Trait => Node::Trait,
            ShapeTag::Tydesc => Node::Tydesc,
            ShapeTag::Res => {
                let dtor = ResId(self.next_u16());
                Node::Res {
                    dtor,
                    fields: self.next_range(),
                }
            }
            _ => unreachable!("primitive tags are decoded above"),
        }
    }
}

impl<'a> Iterator for ShapeReader<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Node<'a>> {
        if self.is_empty() {
            None
        } else {
            Some(self.next_node())
        }
    }
}

fn decode_tag(byte: u8) -> ShapeTag {
    ShapeTag::from_u8(byte).unwrap_or_else(|| panic!("invalid shape tag byte: {byte}"))
}
