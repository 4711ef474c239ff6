//! Descriptor file header (16 bytes).
//!
//! Layout:
//! - 0-3: magic `b"SHPD"`
//! - 4-5: format version
//! - 6-7: tag count
//! - 8-9: resource count
//! - 10-11: reserved
//! - 12-15: shape blob length
//!
//! The header is followed by the shape blob, the resource table (8 bytes per
//! entry) and the tag table (variable length, see `desc.rs`).

use super::{HEADER_SIZE, MAGIC, VERSION};

/// File header - first 16 bytes of a descriptor file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    /// Magic bytes: b"SHPD"
    pub magic: [u8; 4],
    /// Format version (currently 1)
    pub version: u16,
    pub tag_count: u16,
    pub resource_count: u16,
    pub _reserved: u16,
    /// Length of the shape blob in bytes.
    pub shape_len: u32,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            tag_count: 0,
            resource_count: 0,
            _reserved: 0,
            shape_len: 0,
        }
    }
}

impl Header {
    /// Decode header from 16 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        assert!(bytes.len() >= HEADER_SIZE, "header too short");

        Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            version: u16::from_le_bytes([bytes[4], bytes[5]]),
            tag_count: u16::from_le_bytes([bytes[6], bytes[7]]),
            resource_count: u16::from_le_bytes([bytes[8], bytes[9]]),
            _reserved: u16::from_le_bytes([bytes[10], bytes[11]]),
            shape_len: u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
        }
    }

    /// Encode header to 16 bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..6].copy_from_slice(&self.version.to_le_bytes());
        bytes[6..8].copy_from_slice(&self.tag_count.to_le_bytes());
        bytes[8..10].copy_from_slice(&self.resource_count.to_le_bytes());
        bytes[10..12].copy_from_slice(&self._reserved.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.shape_len.to_le_bytes());
        bytes
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }

    pub fn validate_version(&self) -> bool {
        self.version == VERSION
    }

    /// Byte offset of the resource table.
    pub fn resources_offset(&self) -> usize {
        HEADER_SIZE + self.shape_len as usize
    }

    /// Byte offset of the tag table.
    pub fn tags_offset(&self) -> usize {
        self.resources_offset() + self.resource_count as usize * 8
    }
}
