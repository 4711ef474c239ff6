use std::path::Path;

use shapewalk_bytecode::{Prim, ShapeBuilder, TypeDesc, TypeDescBuilder};
use shapewalk_vm::{CmpMode, compare, render};

use super::image::{decode_image, load_desc};

/// `(u32, i32)`
fn pair() -> TypeDesc {
    TypeDescBuilder::new().build(ShapeBuilder::shape(|b| {
        b.struct_(|b| {
            b.prim(Prim::U32).prim(Prim::I32);
        });
    }))
}

#[test]
fn decodes_and_renders() {
    let desc = pair();
    let image = decode_image(&desc, "03000000 f9ffffff", "image").unwrap();

    assert_eq!(image.len(), 8);
    // SAFETY: the image covers a pointer-free value of the type.
    let text = unsafe { render(&desc, image.as_ptr()) };
    assert_eq!(text, "(3, -7)");
}

#[test]
fn accepts_hex_prefix_and_trailing_bytes() {
    let desc = pair();
    let image = decode_image(&desc, "0x0100000002000000ffff", "image").unwrap();
    assert_eq!(image.len(), 10);
}

#[test]
fn compares_decoded_images() {
    let desc = pair();
    let a = decode_image(&desc, "0100000005000000", "a").unwrap();
    let b = decode_image(&desc, "0100000006000000", "b").unwrap();

    // SAFETY: both images cover pointer-free values of the type.
    unsafe {
        assert!(compare(&desc, a.as_ptr(), b.as_ptr(), CmpMode::Lt));
        assert!(!compare(&desc, b.as_ptr(), a.as_ptr(), CmpMode::Le));
        assert!(compare(&desc, a.as_ptr(), a.as_ptr(), CmpMode::Eq));
    }
}

#[test]
fn short_image_is_rejected() {
    let err = decode_image(&pair(), "03000000", "image").unwrap_err();
    insta::assert_snapshot!(err, @"image is 4 bytes, but the type needs 8");
}

#[test]
fn bad_hex_is_rejected() {
    let err = decode_image(&pair(), "zz", "first image").unwrap_err();
    assert!(err.starts_with("invalid hex in first image"), "{err}");
}

#[test]
fn pointer_types_are_rejected() {
    let desc = TypeDescBuilder::new().build(ShapeBuilder::shape(|b| {
        b.box_(|b| {
            b.prim(Prim::U8);
        });
    }));
    let err = decode_image(&desc, "0000000000000000", "image").unwrap_err();
    assert!(err.contains("pointers"), "{err}");
}

/// `(u8, none | some(i64))`
fn with_option() -> TypeDesc {
    let mut db = TypeDescBuilder::new();
    let some = ShapeBuilder::shape(|b| {
        b.prim(Prim::I64);
    });
    let opt = db.add_tag(vec![vec![], some]);
    db.build(ShapeBuilder::shape(|b| {
        b.struct_(|b| {
            b.prim(Prim::U8);
            b.tag(opt);
        });
    }))
}

#[test]
fn discriminant_out_of_range_is_rejected() {
    let desc = with_option();
    let image = "0100000000000000 0700000000000000 0100000000000000";

    let err = decode_image(&desc, image, "image").unwrap_err();
    insta::assert_snapshot!(err, @"image: discriminant 7 out of range for tag 0 (2 variants)");
}

#[test]
fn valid_discriminant_renders() {
    let desc = with_option();
    let image = decode_image(&desc, "0100000000000000 0100000000000000 2a00000000000000", "image").unwrap();

    // SAFETY: the image covers a checked pointer-free value of the type.
    let text = unsafe { render(&desc, image.as_ptr()) };
    assert_eq!(text, "(1, (42))");
}

#[test]
fn missing_descriptor_names_path() {
    let err = load_desc(Path::new("/nonexistent/shapewalk/t.shd")).unwrap_err();
    assert!(err.starts_with("/nonexistent/shapewalk/t.shd: "), "{err}");
}

#[test]
fn loads_descriptor_file() {
    use std::io::Write;

    let mut tmpfile = tempfile::NamedTempFile::new().unwrap();
    tmpfile.write_all(&pair().to_bytes().unwrap()).unwrap();
    tmpfile.flush().unwrap();

    assert_eq!(load_desc(tmpfile.path()).unwrap(), pair());
}
