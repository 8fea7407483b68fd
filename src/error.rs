//! Error types for the fallible edges of the game.
//!
//! The simulation tick itself is total and never returns an error. Errors
//! only come from loading and validating [`Settings`](crate::Settings).

use std::fmt;
use std::io;

/// Top-level error enum
#[derive(Debug)]
pub enum Error {
    /// The settings file could not be read.
    Io(io::Error),

    /// The settings document is not valid JSON for [`Settings`](crate::Settings).
    Parse(serde_json::Error),

    /// A settings value is outside its usable range.
    InvalidSettings {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable description of the accepted range.
        reason: &'static str,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "failed to read settings: {e}"),
            Error::Parse(e) => write!(f, "failed to parse settings: {e}"),
            Error::InvalidSettings { field, reason } => {
                write!(f, "invalid setting `{field}`: {reason}")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Parse(e) => Some(e),
            Error::InvalidSettings { .. } => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Parse(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
