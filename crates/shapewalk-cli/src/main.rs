mod cli;
mod commands;

use cli::{AssembleParams, CompareParams, DumpParams, RenderParams, SizeParams, build_cli};

fn main() {
    let matches = build_cli().get_matches();

    match matches.subcommand() {
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into());
        }
        Some(("size", m)) => {
            let params = SizeParams::from_matches(m);
            commands::size::run(params.into());
        }
        Some(("render", m)) => {
            let params = RenderParams::from_matches(m);
            commands::render::run(params.into());
        }
        Some(("compare", m)) => {
            let params = CompareParams::from_matches(m);
            commands::compare::run(params.into());
        }
        Some(("assemble", m)) => {
            let params = AssembleParams::from_matches(m);
            commands::assemble::run(params.into());
        }
        _ => unreachable!("clap should have caught this"),
    }
}
