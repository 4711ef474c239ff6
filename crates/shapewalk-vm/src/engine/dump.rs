//! Human-readable descriptor dump for debugging.
//!
//! ```text
//! [shape]
//! (u8,tag0)  ; size=24 align=8
//!
//! [tags]
//! T0  ; size=16 align=8
//!   V0   ()
//!   V1*  (i64)
//!
//! [resources]
//! R0  0x0000000000001000
//! ```
//!
//! `*` marks variants in the largest-variant hint.

use std::fmt::Write as _;

use shapewalk_bytecode::{Colors, ShapeBuilder, SizeAlign, TagId, TypeDesc};

use super::print::print_shape;
use super::size::size_of;

/// Generate a listing of the descriptor's shape and tables.
pub fn dump(desc: &TypeDesc, colors: Colors) -> String {
    let mut out = String::new();

    dump_shape(&mut out, desc, &colors);
    dump_tags(&mut out, desc, &colors);
    dump_resources(&mut out, desc, &colors);

    out
}

fn dump_shape(out: &mut String, desc: &TypeDesc, c: &Colors) {
    writeln!(out, "{}[shape]{}", c.kind, c.reset).unwrap();
    let layout = size_of(desc.shape(), desc.tables());
    writeln!(
        out,
        "{}  {}",
        print_shape(desc.shape(), desc.tables()),
        layout_comment(layout, c)
    )
    .unwrap();
}

fn dump_tags(out: &mut String, desc: &TypeDesc, c: &Colors) {
    let tables = desc.tables();
    if tables.tags().is_empty() {
        return;
    }
    let tw = width_for_count(tables.tags().len());

    writeln!(out, "\n{}[tags]{}", c.kind, c.reset).unwrap();
    for (i, info) in tables.tags().iter().enumerate() {
        let tag = ShapeBuilder::shape(|b| {
            b.tag(TagId(i as u16));
        });
        let layout = size_of(&tag, tables);
        writeln!(
            out,
            "{}T{i:0tw$}{}  {}",
            c.number,
            c.reset,
            layout_comment(layout, c)
        )
        .unwrap();

        let vw = width_for_count(info.variant_count());
        for (v, fields) in info.variants().enumerate() {
            let mark = if info.largest_variants().contains(&(v as u16)) {
                "*"
            } else {
                " "
            };
            writeln!(
                out,
                "  V{v:0vw$}{}{mark}{}  ({})",
                c.punct,
                c.reset,
                print_shape(fields, tables)
            )
            .unwrap();
        }
    }
}

fn dump_resources(out: &mut String, desc: &TypeDesc, c: &Colors) {
    let resources = desc.tables().resources();
    if resources.is_empty() {
        return;
    }
    let rw = width_for_count(resources.len());

    writeln!(out, "\n{}[resources]{}", c.kind, c.reset).unwrap();
    for (i, dtor) in resources.iter().enumerate() {
        writeln!(out, "{}R{i:0rw$}{}  {dtor:#018x}", c.number, c.reset).unwrap();
    }
}

fn layout_comment(layout: SizeAlign, c: &Colors) -> String {
    format!("{}; {layout}{}", c.punct, c.reset)
}

/// Digits needed to print indices below `count`.
fn width_for_count(count: usize) -> usize {
    if count <= 1 {
        1
    } else {
        (count - 1).ilog10() as usize + 1
    }
}
