//! Type descriptors: shape bytecode plus its side tables.
//!
//! A [`TypeDesc`] is the unit handed to the runtime. It can be serialized to
//! a compact binary file (`.shd`) or to JSON through serde.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::header::Header;
use super::ids::TagId;
use super::reader::{Node, ShapeReader};
use super::tables::{ShapeTables, TagInfo};
use super::{HEADER_SIZE, VERSION};
use crate::type_system::ShapeTag;

/// Descriptor load error.
#[derive(Debug, thiserror::Error)]
pub enum DescError {
    #[error("invalid magic: expected SHPD")]
    InvalidMagic,
    #[error("unsupported version: {0} (expected {VERSION})")]
    UnsupportedVersion(u16),
    #[error("file too small: {0} bytes (minimum 16)")]
    FileTooSmall(usize),
    #[error("truncated {section}: need {needed} bytes at offset {offset}")]
    Truncated {
        section: &'static str,
        offset: usize,
        needed: usize,
    },
    #[error("size mismatch: descriptor ends at {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("tag {tag}: largest-variant hint {hint} out of range ({variants} variants)")]
    HintOutOfRange { tag: u16, hint: u16, variants: u16 },
    #[error("tag {tag}: largest-variant hint is empty")]
    EmptyHint { tag: u16 },
    #[error("invalid shape in {location} at byte {offset}: {reason}")]
    InvalidShape {
        location: String,
        offset: usize,
        reason: &'static str,
    },
    #[error("tag {tag} contains itself by value")]
    RecursiveTag { tag: u16 },
    #[error("too many {table}: {count} (maximum 65535)")]
    TableOverflow { table: &'static str, count: usize },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Shape bytecode for one type, with the tables it references.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDesc {
    shape: Vec<u8>,
    tables: ShapeTables,
}

impl TypeDesc {
    pub fn new(shape: Vec<u8>, tables: ShapeTables) -> Self {
        Self { shape, tables }
    }

    /// Root shape bytecode.
    pub fn shape(&self) -> &[u8] {
        &self.shape
    }

    pub fn tables(&self) -> &ShapeTables {
        &self.tables
    }

    /// Load a descriptor from its binary encoding.
    ///
    /// The shape bytecode and every variant are verified, so a descriptor
    /// returned from here never trips the decoder's integrity panics.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DescError> {
        if bytes.len() < HEADER_SIZE {
            return Err(DescError::FileTooSmall(bytes.len()));
        }

        let header = Header::from_bytes(&bytes[..HEADER_SIZE]);
        if !header.validate_magic() {
            return Err(DescError::InvalidMagic);
        }
        if !header.validate_version() {
            return Err(DescError::UnsupportedVersion(header.version));
        }

        let mut input = Input {
            bytes,
            offset: HEADER_SIZE,
        };
        let shape = input.take("shape blob", header.shape_len as usize)?.to_vec();

        let mut resources = Vec::with_capacity(header.resource_count as usize);
        for _ in 0..header.resource_count {
            let mut word = [0u8; 8];
            word.copy_from_slice(input.take("resource table", 8)?);
            resources.push(u64::from_le_bytes(word));
        }

        let mut tags = Vec::with_capacity(header.tag_count as usize);
        for tag in 0..header.tag_count {
            tags.push(input.tag(tag)?);
        }

        if input.offset != bytes.len() {
            return Err(DescError::SizeMismatch {
                expected: input.offset,
                actual: bytes.len(),
            });
        }

        let desc = Self::new(shape, ShapeTables::new(tags, resources));
        desc.verify()?;
        Ok(desc)
    }

    /// Load a descriptor file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DescError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Encode to the binary descriptor format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DescError> {
        let tables = &self.tables;
        let header = Header {
            tag_count: count_u16("tags", tables.tags().len())?,
            resource_count: count_u16("resources", tables.resources().len())?,
            shape_len: u32::try_from(self.shape.len()).map_err(|_| {
                DescError::TableOverflow {
                    table: "shape bytes",
                    count: self.shape.len(),
                }
            })?,
            ..Header::default()
        };

        let mut out = Vec::with_capacity(HEADER_SIZE + self.shape.len());
        out.extend_from_slice(&header.to_bytes());
        out.extend_from_slice(&self.shape);
        for res in tables.resources() {
            out.extend_from_slice(&res.to_le_bytes());
        }
        for info in tables.tags() {
            let variant_count = count_u16("variants", info.variant_count())?;
            let hint_count = count_u16("largest-variant hints", info.largest_variants().len())?;
            out.extend_from_slice(&variant_count.to_le_bytes());
            out.extend_from_slice(&hint_count.to_le_bytes());
            for id in info.largest_variants() {
                out.extend_from_slice(&id.to_le_bytes());
            }
            for variant in info.variants() {
                out.extend_from_slice(&count_u16("variant bytes", variant.len())?.to_le_bytes());
                out.extend_from_slice(variant);
            }
        }
        Ok(out)
    }

    /// Check that the bytecode is well formed against the tables.
    ///
    /// The root shape must be exactly one node. Element and pointee ranges
    /// must hold exactly one node; struct, resource and variant ranges may
    /// hold any number. Tag and resource ids must be in range, and no tag
    /// may contain itself except through a pointer or a vector.
    pub fn verify(&self) -> Result<(), DescError> {
        for (id, info) in self.tables.tags().iter().enumerate() {
            check_hint(id as u16, info.variant_count(), info.largest_variants())?;
        }

        let verifier = Verifier {
            tables: &self.tables,
        };
        let root = verifier
            .range(&self.shape, 0)
            .map_err(|fault| fault.at("root shape".into()))?;
        if root != 1 {
            return Err(DescError::InvalidShape {
                location: "root shape".into(),
                offset: 0,
                reason: "root must be exactly one shape",
            });
        }

        for (id, info) in self.tables.tags().iter().enumerate() {
            for (v, variant) in info.variants().enumerate() {
                verifier
                    .range(variant, 0)
                    .map_err(|fault| fault.at(format!("tag {id} variant {v}")))?;
            }
        }
        check_by_value_cycles(&self.tables)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    OnPath,
    Done,
}

/// Reject a tag reachable from itself through fields stored inline.
///
/// Runs after the ranges were verified, so decoding cannot panic.
fn check_by_value_cycles(tables: &ShapeTables) -> Result<(), DescError> {
    let edges: Vec<Vec<TagId>> = tables
        .tags()
        .iter()
        .map(|info| {
            let mut out = Vec::new();
            for variant in info.variants() {
                inline_tags(variant, &mut out);
            }
            out
        })
        .collect();

    let mut state = vec![Visit::New; edges.len()];
    for root in 0..edges.len() {
        if state[root] != Visit::New {
            continue;
        }
        state[root] = Visit::OnPath;
        let mut path = vec![(root, 0usize)];
        while let Some((tag, next)) = path.last_mut() {
            let tag = *tag;
            let Some(&child) = edges[tag].get(*next) else {
                state[tag] = Visit::Done;
                path.pop();
                continue;
            };
            *next += 1;
            match state[child.index()] {
                Visit::OnPath => return Err(DescError::RecursiveTag { tag: child.get() }),
                Visit::New => {
                    state[child.index()] = Visit::OnPath;
                    path.push((child.index(), 0));
                }
                Visit::Done => {}
            }
        }
    }
    Ok(())
}

/// Tags stored inline in `bytes`: through structs, resources and fixed
/// vectors, but not behind pointers or vector headers.
fn inline_tags(bytes: &[u8], out: &mut Vec<TagId>) {
    let mut reader = ShapeReader::new(bytes);
    while !reader.is_empty() {
        match reader.next_node() {
            Node::Tag(id) => out.push(id),
            Node::Struct(fields) | Node::Res { fields, .. } => inline_tags(fields, out),
            Node::FixedVec { elem, .. } => inline_tags(elem, out),
            _ => {}
        }
    }
}

fn count_u16(table: &'static str, count: usize) -> Result<u16, DescError> {
    u16::try_from(count).map_err(|_| DescError::TableOverflow { table, count })
}

fn check_hint(tag: u16, variants: usize, hint: &[u16]) -> Result<(), DescError> {
    if let Some(&bad) = hint.iter().find(|&&id| id as usize >= variants) {
        return Err(DescError::HintOutOfRange {
            tag,
            hint: bad,
            variants: variants as u16,
        });
    }
    if variants > 0 && hint.is_empty() {
        return Err(DescError::EmptyHint { tag });
    }
    Ok(())
}

/// Bounds-checked reader over the descriptor file.
struct Input<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Input<'a> {
    fn take(&mut self, section: &'static str, len: usize) -> Result<&'a [u8], DescError> {
        let end = self.offset.checked_add(len).filter(|&e| e <= self.bytes.len());
        let Some(end) = end else {
            return Err(DescError::Truncated {
                section,
                offset: self.offset,
                needed: len,
            });
        };
        let out = &self.bytes[self.offset..end];
        self.offset = end;
        Ok(out)
    }

    fn u16(&mut self, section: &'static str) -> Result<u16, DescError> {
        let b = self.take(section, 2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    fn tag(&mut self, tag: u16) -> Result<TagInfo, DescError> {
        let variant_count = self.u16("tag table")?;
        let hint_count = self.u16("tag table")?;

        let mut hint = Vec::with_capacity(hint_count as usize);
        for _ in 0..hint_count {
            hint.push(self.u16("tag table")?);
        }

        let mut variants = Vec::with_capacity(variant_count as usize);
        for _ in 0..variant_count {
            let len = self.u16("tag table")? as usize;
            variants.push(self.take("variant shape", len)?.to_vec());
        }

        check_hint(tag, variants.len(), &hint)?;
        Ok(TagInfo::new(variants, hint))
    }
}

/// Location-free verification failure; the caller names the range.
struct Fault {
    offset: usize,
    reason: &'static str,
}

impl Fault {
    fn at(self, location: String) -> DescError {
        DescError::InvalidShape {
            location,
            offset: self.offset,
            reason: self.reason,
        }
    }
}

struct Verifier<'t> {
    tables: &'t ShapeTables,
}

impl Verifier<'_> {
    /// Verify every node of `bytes` and return how many there are.
    ///
    /// `base` is the offset of `bytes` within the enclosing range, for error
    /// reporting.
    fn range(&self, bytes: &[u8], base: usize) -> Result<usize, Fault> {
        let mut pos = 0;
        let mut nodes = 0;
        while pos < bytes.len() {
            pos = self.node(bytes, pos, base)?;
            nodes += 1;
        }
        Ok(nodes)
    }

    /// Verify the node starting at `pos`; return the offset just past it.
    fn node(&self, bytes: &[u8], pos: usize, base: usize) -> Result<usize, Fault> {
        let fault = |offset: usize, reason| Fault {
            offset: base + offset,
            reason,
        };
        let tag = ShapeTag::from_u8(bytes[pos]).ok_or(fault(pos, "unknown tag byte"))?;
        let mut at = pos + 1;

        let mut operand = |len: usize| -> Result<usize, Fault> {
            let start = at;
            if start + len > bytes.len() {
                return Err(fault(start, "operand runs past end of range"));
            }
            at += len;
            Ok(start)
        };

        let mut prefixed_flags = 0;
        match tag {
            ShapeTag::Tag => {
                let p = operand(2)?;
                let id = u16::from_le_bytes([bytes[p], bytes[p + 1]]);
                if id as usize >= self.tables.tags().len() {
                    return Err(fault(p, "tag id out of range"));
                }
                return Ok(at);
            }
            ShapeTag::Res => {
                let p = operand(2)?;
                let id = u16::from_le_bytes([bytes[p], bytes[p + 1]]);
                if id as usize >= self.tables.resources().len() {
                    return Err(fault(p, "resource id out of range"));
                }
            }
            ShapeTag::FixedVec => {
                operand(2)?;
                prefixed_flags = 1;
            }
            ShapeTag::Vec | ShapeTag::UnboxedVec => prefixed_flags = 1,
            ShapeTag::Slice => prefixed_flags = 2,
            ShapeTag::Struct | ShapeTag::Box | ShapeTag::Uniq | ShapeTag::Rptr => {}
            _ => return Ok(at),
        }
        operand(prefixed_flags)?;

        let p = operand(2)?;
        let len = u16::from_le_bytes([bytes[p], bytes[p + 1]]) as usize;
        let start = operand(len)?;
        let nested = self.range(&bytes[start..start + len], base + start)?;

        let single = !matches!(tag, ShapeTag::Struct | ShapeTag::Res);
        if single && nested != 1 {
            return Err(fault(p, "nested range must hold exactly one shape"));
        }
        Ok(at)
    }
}
