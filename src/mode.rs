// ============================================================================
// src/mode.rs – Closed set of access modes a handle can switch between
// ============================================================================

use std::fmt;
use std::str::FromStr;

use crate::error::FileError;

/// Access mode requested by an operation. "Unset" is modelled as
/// `Option::<AccessMode>::None` on the handle, never as a variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessMode {
    Read,
    Write,
    Append,
}

impl AccessMode {
    /// Single-letter token used in configuration and on the command line.
    pub fn token(self) -> &'static str {
        match self {
            AccessMode::Read => "R",
            AccessMode::Write => "W",
            AccessMode::Append => "A",
        }
    }
}

impl fmt::Display for AccessMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.token())
    }
}

impl FromStr for AccessMode {
    type Err = FileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "r" | "read" => Ok(AccessMode::Read),
            "w" | "write" => Ok(AccessMode::Write),
            "a" | "append" => Ok(AccessMode::Append),
            _ => Err(FileError::InvalidMode {
                token: s.to_string(),
            }),
        }
    }
}
