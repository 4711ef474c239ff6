//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` structs mirror the command `*Args` but keep CLI-level choices
//! (`--color auto`, level and mode names) until conversion.

use std::path::PathBuf;

use clap::ArgMatches;
use shapewalk_vm::{CmpMode, Level};

use super::ColorChoice;
use crate::commands::assemble::AssembleArgs;
use crate::commands::compare::CompareArgs;
use crate::commands::dump::DumpArgs;
use crate::commands::render::RenderArgs;
use crate::commands::size::SizeArgs;

pub struct DumpParams {
    pub desc_path: PathBuf,
    pub color: ColorChoice,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            desc_path: desc_path(m),
            color: parse_color(m),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            desc_path: p.desc_path,
            color: p.color.should_colorize(),
        }
    }
}

pub struct SizeParams {
    pub desc_path: PathBuf,
}

impl SizeParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            desc_path: desc_path(m),
        }
    }
}

impl From<SizeParams> for SizeArgs {
    fn from(p: SizeParams) -> Self {
        Self {
            desc_path: p.desc_path,
        }
    }
}

pub struct RenderParams {
    pub desc_path: PathBuf,
    pub image: String,
    pub level: Option<Level>,
}

impl RenderParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            desc_path: desc_path(m),
            image: string(m, "image"),
            level: parse_level(m),
        }
    }
}

impl From<RenderParams> for RenderArgs {
    fn from(p: RenderParams) -> Self {
        Self {
            desc_path: p.desc_path,
            image: p.image,
            level: p.level,
        }
    }
}

pub struct CompareParams {
    pub desc_path: PathBuf,
    pub a: String,
    pub b: String,
    pub mode: CmpMode,
}

impl CompareParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            desc_path: desc_path(m),
            a: string(m, "a"),
            b: string(m, "b"),
            mode: parse_mode(m),
        }
    }
}

impl From<CompareParams> for CompareArgs {
    fn from(p: CompareParams) -> Self {
        Self {
            desc_path: p.desc_path,
            a: p.a,
            b: p.b,
            mode: p.mode,
        }
    }
}

pub struct AssembleParams {
    pub json_path: PathBuf,
    pub output: PathBuf,
}

impl AssembleParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            json_path: m
                .get_one::<PathBuf>("json_path")
                .cloned()
                .unwrap_or_default(),
            output: m.get_one::<PathBuf>("output").cloned().unwrap_or_default(),
        }
    }
}

impl From<AssembleParams> for AssembleArgs {
    fn from(p: AssembleParams) -> Self {
        Self {
            json_path: p.json_path,
            output: p.output,
        }
    }
}

fn desc_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("desc_path")
        .cloned()
        .unwrap_or_default()
}

fn string(m: &ArgMatches, id: &str) -> String {
    m.get_one::<String>(id).cloned().unwrap_or_default()
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}

fn parse_level(m: &ArgMatches) -> Option<Level> {
    match m.get_one::<String>("level").map(|s| s.as_str()) {
        Some("error") => Some(Level::Error),
        Some("warn") => Some(Level::Warn),
        Some("info") => Some(Level::Info),
        Some("debug") => Some(Level::Debug),
        _ => None,
    }
}

fn parse_mode(m: &ArgMatches) -> CmpMode {
    match m.get_one::<String>("mode").map(|s| s.as_str()) {
        Some("lt") => CmpMode::Lt,
        Some("le") => CmpMode::Le,
        _ => CmpMode::Eq,
    }
}
