//! Log sinks for rendered values.

use std::fmt;

use super::glue::WireError;

/// Log level. Wire values are `0=error, 1=warn, 2=info, 3=debug`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warn => "warn",
            Level::Info => "info",
            Level::Debug => "debug",
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = WireError;

    fn try_from(v: u8) -> Result<Self, WireError> {
        match v {
            0 => Ok(Level::Error),
            1 => Ok(Level::Warn),
            2 => Ok(Level::Info),
            3 => Ok(Level::Debug),
            _ => Err(WireError::Level(v)),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Receives fully rendered log lines.
pub trait LogSink {
    fn log(&mut self, level: Level, text: &str);
}

impl<F: FnMut(Level, &str)> LogSink for F {
    fn log(&mut self, level: Level, text: &str) {
        self(level, text)
    }
}

/// Forwards log lines as `tracing` events.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn log(&mut self, level: Level, text: &str) {
        match level {
            Level::Error => tracing::error!(target: "shapewalk", "{text}"),
            Level::Warn => tracing::warn!(target: "shapewalk", "{text}"),
            Level::Info => tracing::info!(target: "shapewalk", "{text}"),
            Level::Debug => tracing::debug!(target: "shapewalk", "{text}"),
        }
    }
}
