use std::path::PathBuf;

use shapewalk_vm::{Level, LogSink, log_structured, render};

use super::image::{decode_image, fail, load_desc};

pub struct RenderArgs {
    pub desc_path: PathBuf,
    pub image: String,
    pub level: Option<Level>,
}

pub fn run(args: RenderArgs) {
    let desc = load_desc(&args.desc_path).unwrap_or_else(|msg| fail(msg));
    let image = decode_image(&desc, &args.image, "image").unwrap_or_else(|msg| fail(msg));

    match args.level {
        // SAFETY: `decode_image` checked the type is pointer-free and the
        // buffer covers its size.
        Some(level) => unsafe { log_structured(&desc, image.as_ptr(), level, &mut StderrSink) },
        None => println!("{}", unsafe { render(&desc, image.as_ptr()) }),
    }
}

/// Writes `[level] text` lines to stderr.
struct StderrSink;

impl LogSink for StderrSink {
    fn log(&mut self, level: Level, text: &str) {
        eprintln!("[{level}] {text}");
    }
}
