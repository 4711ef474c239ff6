use std::path::PathBuf;

use shapewalk_bytecode::Colors;
use shapewalk_vm::dump;

use super::image::{fail, load_desc};

pub struct DumpArgs {
    pub desc_path: PathBuf,
    pub color: bool,
}

pub fn run(args: DumpArgs) {
    let desc = load_desc(&args.desc_path).unwrap_or_else(|msg| fail(msg));
    print!("{}", dump(&desc, Colors::new(args.color)));
}
