use super::*;

#[test]
fn from_u8_valid() {
    assert_eq!(ShapeTag::from_u8(0), Some(ShapeTag::U8));
    assert_eq!(ShapeTag::from_u8(6), Some(ShapeTag::I32));
    assert_eq!(ShapeTag::from_u8(9), Some(ShapeTag::F64));
    assert_eq!(ShapeTag::from_u8(10), Some(ShapeTag::Box));
    assert_eq!(ShapeTag::from_u8(12), Some(ShapeTag::Tag));
    assert_eq!(ShapeTag::from_u8(17), Some(ShapeTag::Struct));
    assert_eq!(ShapeTag::from_u8(33), Some(ShapeTag::Slice));
    assert_eq!(ShapeTag::from_u8(37), Some(ShapeTag::Char));
}

#[test]
fn from_u8_invalid() {
    assert_eq!(ShapeTag::from_u8(13), None);
    assert_eq!(ShapeTag::from_u8(21), None);
    assert_eq!(ShapeTag::from_u8(38), None);
    assert_eq!(ShapeTag::from_u8(255), None);
}

#[test]
fn from_u8_matches_discriminant() {
    for byte in 0..=u8::MAX {
        if let Some(tag) = ShapeTag::from_u8(byte) {
            assert_eq!(tag as u8, byte);
        }
    }
}

#[test]
fn primitive_tags_roundtrip() {
    for byte in 0..=u8::MAX {
        let Some(tag) = ShapeTag::from_u8(byte) else {
            continue;
        };
        if let Some(prim) = tag.primitive() {
            assert_eq!(prim.tag(), tag);
        }
    }
}

#[test]
fn is_composite() {
    assert!(ShapeTag::Struct.is_composite());
    assert!(ShapeTag::Vec.is_composite());
    assert!(ShapeTag::Box.is_composite());
    assert!(!ShapeTag::Tag.is_composite());
    assert!(!ShapeTag::I32.is_composite());
    assert!(!ShapeTag::BareFn.is_composite());
}

#[test]
fn is_pointer() {
    assert!(ShapeTag::Box.is_pointer());
    assert!(ShapeTag::Slice.is_pointer());
    assert!(ShapeTag::Trait.is_pointer());
    assert!(!ShapeTag::FixedVec.is_pointer());
    assert!(!ShapeTag::UnboxedVec.is_pointer());
    assert!(!ShapeTag::Struct.is_pointer());
    assert!(!ShapeTag::U64.is_pointer());
}

#[test]
fn prim_layout() {
    assert_eq!((Prim::Nil.size(), Prim::Nil.align()), (0, 1));
    assert_eq!((Prim::Bool.size(), Prim::Bool.align()), (1, 1));
    assert_eq!(Prim::Char.size(), 4);
    assert_eq!(Prim::I16.size(), 2);
    assert_eq!(Prim::I64.align(), std::mem::align_of::<i64>());
    assert_eq!(Prim::F32.align(), std::mem::align_of::<f32>());
}

#[test]
fn prim_names() {
    assert_eq!(Prim::U8.name(), "u8");
    assert_eq!(Prim::I32.name(), "i32");
    assert_eq!(Prim::F64.name(), "f64");
    assert_eq!(Prim::Nil.name(), "()");
}

#[test]
fn fn_kind_words() {
    assert_eq!(FnKind::Bare.words(), 1);
    assert_eq!(FnKind::Stack.words(), 2);
    assert_eq!(FnKind::Boxed.tag(), ShapeTag::BoxFn);
}
