//! Command builders for the CLI.
//!
//! Each command is built using the shared arg builders from `args.rs`.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("shapewalk")
        .about("Inspect shape descriptors and walk values they describe")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(dump_command())
        .subcommand(size_command())
        .subcommand(render_command())
        .subcommand(compare_command())
        .subcommand(assemble_command())
}

/// Print a descriptor listing.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show shape bytecode and tables")
        .after_help(
            r#"EXAMPLES:
  shapewalk dump point.shd
  shapewalk dump point.shd --color never"#,
        )
        .arg(desc_path_arg())
        .arg(color_arg())
}

/// Print size and alignment.
pub fn size_command() -> Command {
    Command::new("size")
        .about("Show size and alignment of the described type")
        .arg(desc_path_arg())
}

/// Render a value image.
///
/// Only pointer-free types can be decoded from bytes.
pub fn render_command() -> Command {
    Command::new("render")
        .about("Render a value from its bytes")
        .after_help(
            r#"EXAMPLES:
  shapewalk render pair.shd 03000000f9ffffff          # (3, -7)
  shapewalk render pair.shd 03000000f9ffffff --level info"#,
        )
        .arg(desc_path_arg())
        .arg(image_arg("image", "HEX"))
        .arg(level_arg())
}

/// Compare two value images.
pub fn compare_command() -> Command {
    Command::new("compare")
        .about("Compare two values of the described type")
        .after_help(
            r#"EXAMPLES:
  shapewalk compare u32.shd 01000000 02000000 --mode lt   # true"#,
        )
        .arg(desc_path_arg())
        .arg(image_arg("a", "HEX_A"))
        .arg(image_arg("b", "HEX_B"))
        .arg(mode_arg())
}

/// Convert a JSON descriptor into the binary format.
pub fn assemble_command() -> Command {
    Command::new("assemble")
        .about("Encode a JSON descriptor as a binary one")
        .arg(json_path_arg())
        .arg(output_arg())
}
