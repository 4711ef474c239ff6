//! Loading descriptors and decoding value images from the command line.

use std::fmt::Display;
use std::path::Path;

use shapewalk_bytecode::{AlignedVec, Node, TagId, TagVariant, TypeDesc};
use shapewalk_vm::{Ptr, Visitor, Walker, dispatch, is_flat, size_and_alignment};

/// Report `msg` and exit with status 1.
pub fn fail(msg: impl Display) -> ! {
    eprintln!("error: {msg}");
    std::process::exit(1);
}

pub fn load_desc(path: &Path) -> Result<TypeDesc, String> {
    TypeDesc::from_path(path).map_err(|e| format!("{}: {e}", path.display()))
}

/// Decode a hex image of one value of type `desc`.
///
/// Only pointer-free types qualify: the bytes of anything else would be
/// addresses from another process. Every discriminant must name a variant.
/// Bytes past the type's size are ignored.
pub fn decode_image(desc: &TypeDesc, text: &str, what: &str) -> Result<AlignedVec, String> {
    if !is_flat(desc) {
        return Err("type contains pointers; only pointer-free values can be read from hex".into());
    }

    let digits: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(&digits);
    let bytes = hex::decode(digits).map_err(|e| format!("invalid hex in {what}: {e}"))?;

    let layout = size_and_alignment(desc);
    if bytes.len() < layout.size {
        return Err(format!(
            "{what} is {} bytes, but the type needs {}",
            bytes.len(),
            layout.size
        ));
    }
    let image = AlignedVec::copy_from_slice(&bytes);

    let mut check = Discriminants::default();
    // SAFETY: the type is pointer-free and the buffer covers its size, so
    // the walk reads only inside `image`.
    let mut w = unsafe { Walker::new(desc.shape(), desc.tables(), Ptr(image.as_ptr())) };
    w.walk_all(&mut check);
    if let Some((id, variant)) = check.bad {
        return Err(format!(
            "{what}: discriminant {variant} out of range for tag {} ({} variants)",
            id.get(),
            desc.tables().tag(id).variant_count()
        ));
    }
    Ok(image)
}

/// Finds the first discriminant that names no variant.
#[derive(Default)]
struct Discriminants {
    bad: Option<(TagId, TagVariant)>,
}

impl<'a> Visitor<'a, Ptr> for Discriminants {
    fn visit(&mut self, w: &Walker<'a, Ptr>, node: Node<'a>, dp: Ptr) {
        if self.bad.is_none() {
            dispatch(self, w, node, dp);
        }
    }

    fn tag(&mut self, w: &Walker<'a, Ptr>, id: TagId, dp: Ptr) {
        let variant = w.discriminant(id, dp);
        if variant >= w.tables().tag(id).variant_count() {
            self.bad = Some((id, variant));
            return;
        }
        w.walk_variant(self, id, variant, dp);
    }
}
