use std::path::PathBuf;

use shapewalk_bytecode::TypeDesc;

use super::image::fail;

pub struct AssembleArgs {
    pub json_path: PathBuf,
    pub output: PathBuf,
}

pub fn run(args: AssembleArgs) {
    let json = std::fs::read_to_string(&args.json_path)
        .unwrap_or_else(|e| fail(format!("{}: {e}", args.json_path.display())));
    let bytes = assemble(&json).unwrap_or_else(|msg| fail(msg));
    if let Err(e) = std::fs::write(&args.output, &bytes) {
        fail(format!("{}: {e}", args.output.display()));
    }
}

/// Parse a JSON descriptor, verify it, and encode it.
pub fn assemble(json: &str) -> Result<Vec<u8>, String> {
    let desc: TypeDesc =
        serde_json::from_str(json).map_err(|e| format!("invalid descriptor JSON: {e}"))?;
    desc.verify().map_err(|e| e.to_string())?;
    desc.to_bytes().map_err(|e| e.to_string())
}
