//! Fixtures shared by engine tests.

use std::cmp::Ordering;

use shapewalk_bytecode::{Prim, ShapeBuilder, TagId, TypeDesc, TypeDescBuilder};

use super::glue::{cmp_type, render};

/// Value of a multi-variant tagged union: discriminant then fields.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
pub struct Tagged<T> {
    pub tag: usize,
    pub body: T,
}

/// Descriptor without tables.
pub fn desc(f: impl FnOnce(&mut ShapeBuilder)) -> TypeDesc {
    TypeDescBuilder::new().build(ShapeBuilder::shape(f))
}

pub fn prim(p: Prim) -> TypeDesc {
    desc(|b| {
        b.prim(p);
    })
}

/// Struct of primitive fields.
pub fn fields(prims: &[Prim]) -> TypeDesc {
    desc(|b| {
        b.struct_(|b| {
            for &p in prims {
                b.prim(p);
            }
        });
    })
}

/// `none | some(payload)`.
pub fn add_option(db: &mut TypeDescBuilder, payload: Prim) -> TagId {
    let some = ShapeBuilder::shape(|b| {
        b.prim(payload);
    });
    db.add_tag(vec![vec![], some])
}

pub fn render_value<T>(desc: &TypeDesc, value: &T) -> String {
    // SAFETY: tests pair each descriptor with a matching value.
    unsafe { render(desc, value as *const T as *const u8) }
}

pub fn cmp_values<T>(desc: &TypeDesc, a: &T, b: &T) -> Ordering {
    // SAFETY: tests pair each descriptor with matching values.
    unsafe { cmp_type(desc, a as *const T as *const u8, b as *const T as *const u8) }
}
