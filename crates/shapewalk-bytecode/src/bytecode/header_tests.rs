use super::*;

#[test]
fn header_default() {
    let h = Header::default();
    assert!(h.validate_magic());
    assert!(h.validate_version());
    assert_eq!(h.shape_len, 0);
}

#[test]
fn header_roundtrip() {
    let h = Header {
        magic: MAGIC,
        version: VERSION,
        tag_count: 3,
        resource_count: 2,
        _reserved: 0,
        shape_len: 517,
    };

    let bytes = h.to_bytes();
    assert_eq!(bytes.len(), HEADER_SIZE);
    assert_eq!(&bytes[0..4], b"SHPD");
    assert_eq!(Header::from_bytes(&bytes), h);
}

#[test]
fn section_offsets() {
    let h = Header {
        resource_count: 2,
        shape_len: 10,
        ..Header::default()
    };

    assert_eq!(h.resources_offset(), 26);
    assert_eq!(h.tags_offset(), 42);
}

#[test]
fn bad_magic_and_version() {
    let mut h = Header::default();
    h.magic = *b"PTKQ";
    h.version = 99;
    assert!(!h.validate_magic());
    assert!(!h.validate_version());
}
