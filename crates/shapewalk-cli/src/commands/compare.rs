use std::path::PathBuf;

use shapewalk_vm::{CmpMode, compare};

use super::image::{decode_image, fail, load_desc};

pub struct CompareArgs {
    pub desc_path: PathBuf,
    pub a: String,
    pub b: String,
    pub mode: CmpMode,
}

pub fn run(args: CompareArgs) {
    let desc = load_desc(&args.desc_path).unwrap_or_else(|msg| fail(msg));
    let a = decode_image(&desc, &args.a, "first image").unwrap_or_else(|msg| fail(msg));
    let b = decode_image(&desc, &args.b, "second image").unwrap_or_else(|msg| fail(msg));

    // SAFETY: both images are pointer-free and cover the type's size.
    let holds = unsafe { compare(&desc, a.as_ptr(), b.as_ptr(), args.mode) };
    println!("{holds}");
}
