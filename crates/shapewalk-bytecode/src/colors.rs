//! ANSI color codes for shape dumps.
//!
//! Three semantic colors:
//! - Kind: shape kind names (`u8`, `vec`, `tag`)
//! - Number: sizes, counts, ids
//! - Punct: brackets, separators, section markers

/// ANSI palette for dump output. Standard 16-color codes only.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Colors {
    pub kind: &'static str,
    pub number: &'static str,
    pub punct: &'static str,
    pub reset: &'static str,
}

impl Default for Colors {
    fn default() -> Self {
        Self::OFF
    }
}

impl Colors {
    pub const ON: Self = Self {
        kind: "\x1b[34m",
        number: "\x1b[32m",
        punct: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        kind: "",
        number: "",
        punct: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }

    pub fn is_enabled(&self) -> bool {
        !self.reset.is_empty()
    }
}
