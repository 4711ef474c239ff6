//! Side tables referenced from shape bytecode.
//!
//! `TAG` nodes carry only a [`TagId`]; the variant layouts live here so that
//! recursive and repeated tagged unions are described once per descriptor.

use serde::{Deserialize, Serialize};

use super::ids::{ResId, TagId};

/// Layout description of one tagged union.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagInfo {
    /// Field shapes of each variant, indexed by variant id.
    variants: Vec<Vec<u8>>,
    /// Variant ids that may be the largest one.
    ///
    /// A superset that always contains the true maximum; it need not be
    /// minimal.
    largest_variants: Vec<u16>,
}

impl TagInfo {
    /// Create a tag description.
    ///
    /// # Panics
    /// Panics if a largest-variant hint names a variant that does not exist,
    /// or if a non-empty union has no hint at all.
    pub fn new(variants: Vec<Vec<u8>>, largest_variants: Vec<u16>) -> Self {
        let info = Self {
            variants,
            largest_variants,
        };
        info.check_hint();
        info
    }

    /// Create a tag description whose hint lists every variant.
    pub fn with_all_variants(variants: Vec<Vec<u8>>) -> Self {
        let largest_variants = (0..variants.len() as u16).collect();
        Self::new(variants, largest_variants)
    }

    pub(crate) fn check_hint(&self) {
        for &id in &self.largest_variants {
            assert!(
                (id as usize) < self.variants.len(),
                "largest-variant hint {id} out of range ({} variants)",
                self.variants.len()
            );
        }
        assert!(
            self.variants.is_empty() || !self.largest_variants.is_empty(),
            "largest-variant hint is empty for a union with {} variants",
            self.variants.len()
        );
    }

    #[inline]
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Field shapes of variant `id`.
    ///
    /// # Panics
    /// Panics if the variant does not exist (corrupted data or bytecode).
    pub fn variant(&self, id: usize) -> &[u8] {
        self.variants.get(id).map(Vec::as_slice).unwrap_or_else(|| {
            panic!(
                "variant {id} out of range ({} variants)",
                self.variants.len()
            )
        })
    }

    pub fn variants(&self) -> impl Iterator<Item = &[u8]> {
        self.variants.iter().map(Vec::as_slice)
    }

    pub fn largest_variants(&self) -> &[u16] {
        &self.largest_variants
    }

    /// Whether values carry a discriminant word ahead of the fields.
    #[inline]
    pub fn has_discriminant(&self) -> bool {
        self.variants.len() > 1
    }
}

/// All side tables of one type descriptor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeTables {
    tags: Vec<TagInfo>,
    /// Opaque destructor handles, indexed by [`ResId`].
    resources: Vec<u64>,
}

impl ShapeTables {
    pub fn new(tags: Vec<TagInfo>, resources: Vec<u64>) -> Self {
        Self { tags, resources }
    }

    /// Look up a tag.
    ///
    /// # Panics
    /// Panics if the id is not in the table (corrupted bytecode).
    pub fn tag(&self, id: TagId) -> &TagInfo {
        self.tags.get(id.index()).unwrap_or_else(|| {
            panic!(
                "unknown tag id {} ({} tags in table)",
                id.get(),
                self.tags.len()
            )
        })
    }

    /// Look up a destructor handle.
    ///
    /// # Panics
    /// Panics if the id is not in the table (corrupted bytecode).
    pub fn resource(&self, id: ResId) -> u64 {
        *self.resources.get(id.index()).unwrap_or_else(|| {
            panic!(
                "unknown resource id {} ({} resources in table)",
                id.0,
                self.resources.len()
            )
        })
    }

    pub fn tags(&self) -> &[TagInfo] {
        &self.tags
    }

    pub fn resources(&self) -> &[u64] {
        &self.resources
    }
}
