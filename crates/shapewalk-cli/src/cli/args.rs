//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, value_parser};

/// Binary descriptor file (positional).
pub fn desc_path_arg() -> Arg {
    Arg::new("desc_path")
        .value_name("DESC")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Binary type descriptor")
}

/// Hex-encoded value image (positional).
pub fn image_arg(id: &'static str, name: &'static str) -> Arg {
    Arg::new(id)
        .value_name(name)
        .required(true)
        .help("Value bytes as hex (whitespace and a 0x prefix are ignored)")
}

/// JSON descriptor file (positional).
pub fn json_path_arg() -> Arg {
    Arg::new("json_path")
        .value_name("JSON")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Descriptor in JSON form")
}

/// Output file (-o/--output).
pub fn output_arg() -> Arg {
    Arg::new("output")
        .short('o')
        .long("output")
        .value_name("FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Where to write the binary descriptor")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// Route rendered text through the log sink (--level).
pub fn level_arg() -> Arg {
    Arg::new("level")
        .long("level")
        .value_name("LEVEL")
        .value_parser(["error", "warn", "info", "debug"])
        .help("Log the rendered value to stderr at this level instead of printing it")
}

/// Comparison relation (--mode).
pub fn mode_arg() -> Arg {
    Arg::new("mode")
        .short('m')
        .long("mode")
        .value_name("MODE")
        .default_value("eq")
        .value_parser(["eq", "lt", "le"])
        .help("Relation to test")
}
