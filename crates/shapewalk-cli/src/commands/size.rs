use std::path::PathBuf;

use shapewalk_vm::size_and_alignment;

use super::image::{fail, load_desc};

pub struct SizeArgs {
    pub desc_path: PathBuf,
}

pub fn run(args: SizeArgs) {
    let desc = load_desc(&args.desc_path).unwrap_or_else(|msg| fail(msg));
    println!("{}", size_and_alignment(&desc));
}
