//! Tests for CLI dispatch logic: argument parsing and params extraction.

use std::path::PathBuf;

use shapewalk_vm::{CmpMode, Level};

use super::*;
use crate::cli::commands::{
    assemble_command, compare_command, dump_command, render_command, size_command,
};

#[test]
fn dump_extracts_path_and_color() {
    let m = dump_command()
        .try_get_matches_from(["dump", "point.shd", "--color", "never"])
        .unwrap();
    let params = DumpParams::from_matches(&m);

    assert_eq!(params.desc_path, PathBuf::from("point.shd"));
    assert_eq!(params.color, ColorChoice::Never);
}

#[test]
fn dump_color_defaults_to_auto() {
    let m = dump_command()
        .try_get_matches_from(["dump", "point.shd"])
        .unwrap();
    assert_eq!(DumpParams::from_matches(&m).color, ColorChoice::Auto);
}

#[test]
fn dump_rejects_unknown_color() {
    let result = dump_command().try_get_matches_from(["dump", "point.shd", "--color", "rainbow"]);
    assert!(result.is_err());
}

#[test]
fn size_requires_descriptor() {
    assert!(size_command().try_get_matches_from(["size"]).is_err());

    let m = size_command()
        .try_get_matches_from(["size", "t.shd"])
        .unwrap();
    assert_eq!(SizeParams::from_matches(&m).desc_path, PathBuf::from("t.shd"));
}

#[test]
fn render_level_is_optional() {
    let m = render_command()
        .try_get_matches_from(["render", "t.shd", "0102"])
        .unwrap();
    let params = RenderParams::from_matches(&m);
    assert_eq!(params.image, "0102");
    assert_eq!(params.level, None);

    let m = render_command()
        .try_get_matches_from(["render", "t.shd", "0102", "--level", "warn"])
        .unwrap();
    assert_eq!(RenderParams::from_matches(&m).level, Some(Level::Warn));
}

#[test]
fn render_rejects_unknown_level() {
    let result = render_command().try_get_matches_from(["render", "t.shd", "00", "--level", "trace"]);
    assert!(result.is_err());
}

#[test]
fn compare_mode_defaults_to_eq() {
    let m = compare_command()
        .try_get_matches_from(["compare", "t.shd", "01", "02"])
        .unwrap();
    let params = CompareParams::from_matches(&m);
    assert_eq!(params.a, "01");
    assert_eq!(params.b, "02");
    assert_eq!(params.mode, CmpMode::Eq);
}

#[test]
fn compare_mode_short_flag() {
    let m = compare_command()
        .try_get_matches_from(["compare", "t.shd", "01", "02", "-m", "le"])
        .unwrap();
    assert_eq!(CompareParams::from_matches(&m).mode, CmpMode::Le);
}

#[test]
fn compare_needs_two_images() {
    let result = compare_command().try_get_matches_from(["compare", "t.shd", "01"]);
    assert!(result.is_err());
}

#[test]
fn assemble_requires_output() {
    assert!(assemble_command()
        .try_get_matches_from(["assemble", "t.json"])
        .is_err());

    let m = assemble_command()
        .try_get_matches_from(["assemble", "t.json", "-o", "t.shd"])
        .unwrap();
    let params = AssembleParams::from_matches(&m);
    assert_eq!(params.json_path, PathBuf::from("t.json"));
    assert_eq!(params.output, PathBuf::from("t.shd"));
}

#[test]
fn top_level_requires_subcommand() {
    assert!(build_cli().try_get_matches_from(["shapewalk"]).is_err());

    let m = build_cli()
        .try_get_matches_from(["shapewalk", "size", "t.shd"])
        .unwrap();
    assert_eq!(m.subcommand_name(), Some("size"));
}
