//! Descriptor file format constants.

/// Magic bytes identifying a binary type descriptor.
pub const MAGIC: [u8; 4] = *b"SHPD";

/// Current descriptor format version.
pub const VERSION: u16 = 1;

/// Size of the descriptor file header in bytes.
pub const HEADER_SIZE: usize = 16;
