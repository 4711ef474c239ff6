use shapewalk_bytecode::{FnKind, Prim, ShapeBuilder, TypeDescBuilder};

use super::glue::{WireError, log_structured};
use super::sink::{Level, TracingSink};
use super::test_utils::{Tagged, add_option, desc, fields, prim, render_value};
use crate::repr::{FnPair, RawBox, RawSlice, RawVec};

fn bytes_vec() -> shapewalk_bytecode::TypeDesc {
    desc(|b| {
        b.vec(true, |b| {
            b.prim(Prim::U8);
        });
    })
}

#[test]
fn struct_of_ints() {
    let d = fields(&[Prim::I32, Prim::I32]);
    insta::assert_snapshot!(render_value(&d, &[3i32, -7]), @"(3, -7)");
}

#[test]
fn scalars() {
    assert_eq!(render_value(&prim(Prim::U64), &u64::MAX), "18446744073709551615");
    assert_eq!(render_value(&prim(Prim::I8), &-128i8), "-128");
    assert_eq!(render_value(&prim(Prim::Nil), &()), "()");
    assert_eq!(render_value(&fields(&[Prim::Bool, Prim::Bool]), &[true, false]), "(true, false)");
}

#[test]
fn floats_use_shortest_form() {
    assert_eq!(render_value(&prim(Prim::F64), &1.5f64), "1.5");
    assert_eq!(render_value(&prim(Prim::F64), &-2.0f64), "-2");
    assert_eq!(render_value(&prim(Prim::F32), &0.1f32), "0.1");
    assert_eq!(render_value(&prim(Prim::F64), &f64::NAN), "NaN");
}

#[test]
fn chars_are_quoted_and_escaped() {
    let d = prim(Prim::Char);
    assert_eq!(render_value(&d, &'a'), "'a'");
    assert_eq!(render_value(&d, &'\n'), r"'\n'");
    assert_eq!(render_value(&d, &'\''), r"'\''");
    assert_eq!(render_value(&d, &0xD800u32), r"'\u{d800}'");
}

#[test]
fn byte_vector_renders_as_string() {
    let v = RawVec::new([0x41u8, 0x0A, 0x22]);
    let cell: *const RawVec<[u8; 3]> = &v;
    assert_eq!(render_value(&bytes_vec(), &cell), r#""A\n\"""#);
}

#[test]
fn non_printable_bytes_are_hex_escaped() {
    let v = RawVec::new([0x00u8, 0x7f, 0xff, b'\t', b'\\', b'\r']);
    let cell: *const RawVec<[u8; 6]> = &v;
    assert_eq!(render_value(&bytes_vec(), &cell), r#""\x00\x7f\xff\t\\\r""#);
}

#[test]
fn str_slice_drops_terminator() {
    let d = desc(|b| {
        b.slice(true, true, |b| {
            b.prim(Prim::U8);
        });
    });
    assert_eq!(render_value(&d, &RawSlice::new(b"hi\0")), r#""hi""#);
    assert_eq!(render_value(&d, &RawSlice::new(b"\0")), r#""""#);
}

#[test]
fn plain_byte_slice_keeps_every_byte() {
    let d = desc(|b| {
        b.slice(true, false, |b| {
            b.prim(Prim::U8);
        });
    });
    assert_eq!(render_value(&d, &RawSlice::new(b"a\0")), r#""a\x00""#);
}

#[test]
fn vectors() {
    let d = desc(|b| {
        b.vec(true, |b| {
            b.prim(Prim::I32);
        });
    });
    let v = RawVec::new([1i32, 2, 3]);
    let cell: *const RawVec<[i32; 3]> = &v;
    insta::assert_snapshot!(render_value(&d, &cell), @"[1, 2, 3]");

    let empty = RawVec::new([0i32; 0]);
    let cell: *const RawVec<[i32; 0]> = &empty;
    insta::assert_snapshot!(render_value(&d, &cell), @"[]");
}

#[test]
fn vector_of_strings() {
    let d = desc(|b| {
        b.vec(false, |b| {
            b.vec(true, |b| {
                b.prim(Prim::U8);
            });
        });
    });
    let ab = RawVec::new(*b"ab");
    let c = RawVec::new(*b"c");
    let outer = RawVec::new([
        &ab as *const RawVec<[u8; 2]> as *const u8,
        &c as *const RawVec<[u8; 1]> as *const u8,
    ]);
    let cell: *const RawVec<[*const u8; 2]> = &outer;

    insta::assert_snapshot!(render_value(&d, &cell), @r#"["ab", "c"]"#);
}

#[test]
fn fixedvec_of_structs() {
    let d = desc(|b| {
        b.fixedvec(2, true, |b| {
            b.struct_(|b| {
                b.prim(Prim::U8).prim(Prim::Bool);
            });
        });
    });
    insta::assert_snapshot!(render_value(&d, &[[1u8, 1], [2, 0]]), @"[(1, true), (2, false)]");
}

#[test]
fn unboxed_vec_is_inline() {
    let d = desc(|b| {
        b.unboxed_vec(true, |b| {
            b.prim(Prim::U16);
        });
    });
    insta::assert_snapshot!(render_value(&d, &RawVec::new([7u16, 8])), @"[7, 8]");
}

#[test]
fn variants_hide_discriminant() {
    let mut db = TypeDescBuilder::new();
    let opt = add_option(&mut db, Prim::I64);
    let d = db.build(ShapeBuilder::shape(|b| {
        b.struct_(|b| {
            b.tag(opt);
            b.tag(opt);
        });
    }));

    let value = [Tagged { tag: 1, body: 5i64 }, Tagged { tag: 0, body: 0 }];
    insta::assert_snapshot!(render_value(&d, &value), @"((5), )");
}

#[test]
fn pointers() {
    let boxed = desc(|b| {
        b.box_(|b| {
            b.prim(Prim::I32);
        });
    });
    let cell = RawBox::new(5i32);
    let live: *const RawBox<i32> = &cell;
    let null: *const RawBox<i32> = std::ptr::null();
    assert_eq!(render_value(&boxed, &live), "@5");
    assert_eq!(render_value(&boxed, &null), "@(null)");

    let uniq = desc(|b| {
        b.uniq(|b| {
            b.struct_(|b| {
                b.prim(Prim::U8).prim(Prim::U8);
            });
        });
    });
    let pair = [1u8, 2];
    let p: *const [u8; 2] = &pair;
    assert_eq!(render_value(&uniq, &p), "~(1, 2)");

    let rptr = desc(|b| {
        b.rptr(|b| {
            b.prim(Prim::Char);
        });
    });
    let x = 'x';
    let p: *const char = &x;
    assert_eq!(render_value(&rptr, &p), "&'x'");
}

#[test]
fn box_inside_struct_separates() {
    let d = desc(|b| {
        b.struct_(|b| {
            b.prim(Prim::U8);
            b.box_(|b| {
                b.prim(Prim::U8);
            });
            b.prim(Prim::U8);
        });
    });

    #[repr(C)]
    struct Value(u8, *const RawBox<u8>, u8);
    let cell = RawBox::new(2u8);
    insta::assert_snapshot!(render_value(&d, &Value(1, &cell, 3)), @"(1, @2, 3)");
}

#[test]
fn words_render_as_kind() {
    let d = desc(|b| {
        b.struct_(|b| {
            b.func(FnKind::Bare).func(FnKind::Stack).obj().trait_().tydesc();
        });
    });

    #[repr(C)]
    struct Value(usize, FnPair, FnPair, FnPair, usize);
    let pair = FnPair {
        code: std::ptr::null(),
        env: std::ptr::null(),
    };
    insta::assert_snapshot!(render_value(&d, &Value(0, pair, pair, pair, 0)), @"(fn, fn, obj, trait, tydesc)");
}

#[test]
fn resource() {
    let mut db = TypeDescBuilder::new();
    let dtor = db.add_resource(0x10);
    let d = db.build(ShapeBuilder::shape(|b| {
        b.res(dtor, |b| {
            b.prim(Prim::U8).prim(Prim::U8);
        });
    }));
    insta::assert_snapshot!(render_value(&d, &[1u8, 2]), @"res(1, 2)");
}

#[test]
fn log_hands_text_to_sink() {
    let d = fields(&[Prim::U8, Prim::I16]);
    #[repr(C)]
    struct Value(u8, i16);
    let value = Value(4, -2);

    let mut lines = Vec::new();
    let mut sink = |level: Level, text: &str| lines.push((level, text.to_string()));
    // SAFETY: value matches the descriptor.
    unsafe { log_structured(&d, &value as *const Value as *const u8, Level::Warn, &mut sink) };

    assert_eq!(lines, vec![(Level::Warn, "(4, -2)".to_string())]);
}

#[test]
fn tracing_sink_without_subscriber() {
    let d = prim(Prim::U8);
    // SAFETY: value matches the descriptor.
    unsafe { log_structured(&d, &9u8 as *const u8, Level::Debug, &mut TracingSink) };
}

#[test]
fn level_wire_values() {
    assert_eq!(Level::try_from(0), Ok(Level::Error));
    assert_eq!(Level::try_from(3), Ok(Level::Debug));
    assert_eq!(Level::try_from(4), Err(WireError::Level(4)));
    assert_eq!(Level::Info as u8, 2);
    assert_eq!(Level::Warn.to_string(), "warn");
}

#[test]
fn nullary_variant_writes_nothing() {
    let mut db = TypeDescBuilder::new();
    let opt = add_option(&mut db, Prim::U8);
    let root = db.build(ShapeBuilder::shape(|b| {
        b.tag(opt);
    }));
    assert_eq!(render_value(&root, &Tagged { tag: 0, body: 0u8 }), "");

    let mut db = TypeDescBuilder::new();
    let opt = add_option(&mut db, Prim::U8);
    let d = db.build(ShapeBuilder::shape(|b| {
        b.struct_(|b| {
            b.prim(Prim::U64);
            b.tag(opt);
        });
    }));

    #[repr(C)]
    struct Value(u64, Tagged<u8>);
    assert_eq!(render_value(&d, &Value(1, Tagged { tag: 0, body: 0 })), "(1, )");
    assert_eq!(render_value(&d, &Value(1, Tagged { tag: 1, body: 9 })), "(1, (9))");
}

#[test]
fn resource_without_fields() {
    let mut db = TypeDescBuilder::new();
    let dtor = db.add_resource(0x10);
    let d = db.build(ShapeBuilder::shape(|b| {
        b.struct_(|b| {
            b.res(dtor, |_| {});
            b.prim(Prim::U8);
        });
    }));
    assert_eq!(render_value(&d, &7u8), "(res, 7)");
}
