use super::*;
use crate::type_system::{FnKind, Prim, ShapeTag};

#[test]
fn primitives() {
    let bytes = [0, 7, 9, 35, 36, 37];
    let nodes: Vec<_> = ShapeReader::new(&bytes).collect();

    assert_eq!(
        nodes,
        vec![
            Node::Prim(Prim::U8),
            Node::Prim(Prim::I64),
            Node::Prim(Prim::F64),
            Node::Prim(Prim::Nil),
            Node::Prim(Prim::Bool),
            Node::Prim(Prim::Char),
        ]
    );
}

#[test]
fn struct_hands_out_field_range() {
    // (u8, i32) followed by bool
    let bytes = [17, 2, 0, 0, 6, 36];
    let mut r = ShapeReader::new(&bytes);

    assert_eq!(r.next_node(), Node::Struct(&[0, 6]));
    assert_eq!(r.peek(), Some(ShapeTag::Bool));
    assert_eq!(r.next_node(), Node::Prim(Prim::Bool));
    assert!(r.is_empty());
}

#[test]
fn operands_are_little_endian() {
    let bytes = [12, 0x34, 0x12];
    assert_eq!(ShapeReader::new(&bytes).next_node(), Node::Tag(TagId(0x1234)));
}

#[test]
fn vector_family() {
    let bytes = [
        11, 1, 1, 0, 6, // vec<i32>
        34, 0, 1, 0, 0, // unboxed_vec<u8>
        33, 1, 1, 1, 0, 0, // str slice
        32, 3, 0, 1, 1, 0, 9, // fixedvec<3, f64>
    ];
    let nodes: Vec<_> = ShapeReader::new(&bytes).collect();

    assert_eq!(
        nodes,
        vec![
            Node::Vec {
                elem: &[6],
                is_pod: true
            },
            Node::UnboxedVec {
                elem: &[0],
                is_pod: false
            },
            Node::Slice {
                elem: &[0],
                is_pod: true,
                is_str: true
            },
            Node::FixedVec {
                n_elts: 3,
                elem: &[9],
                is_pod: true
            },
        ]
    );
}

#[test]
fn pointers_and_words() {
    let bytes = [10, 1, 0, 0, 22, 1, 0, 36, 31, 1, 0, 37, 27, 26, 18, 25, 19, 24, 28];
    let nodes: Vec<_> = ShapeReader::new(&bytes).collect();

    assert_eq!(
        nodes,
        vec![
            Node::Box(&[0]),
            Node::Uniq(&[36]),
            Node::Rptr(&[37]),
            Node::Fn(FnKind::Bare),
            Node::Fn(FnKind::Stack),
            Node::Fn(FnKind::Boxed),
            Node::Fn(FnKind::Unique),
            Node::Obj,
            Node::Trait,
            Node::Tydesc,
        ]
    );
}

#[test]
fn resource() {
    let bytes = [20, 2, 0, 1, 0, 3];
    assert_eq!(
        ShapeReader::new(&bytes).next_node(),
        Node::Res {
            dtor: ResId(2),
            fields: &[3]
        }
    );
}

#[test]
fn nested_range_does_not_leak() {
    // box<(u8)> then u16: the struct's range must stop at its length
    let bytes = [10, 4, 0, 17, 1, 0, 0, 1];
    let mut r = ShapeReader::new(&bytes);

    let Node::Box(inner) = r.next_node() else {
        panic!("expected box");
    };
    assert_eq!(inner, &[17, 1, 0, 0]);
    assert_eq!(r.remaining(), &[1]);
}

#[test]
#[should_panic(expected = "invalid shape tag byte: 13")]
fn unknown_tag_panics() {
    ShapeReader::new(&[13]).next_node();
}

#[test]
#[should_panic(expected = "shape bytecode truncated")]
fn truncated_range_panics() {
    ShapeReader::new(&[17, 5, 0, 0]).next_node();
}
