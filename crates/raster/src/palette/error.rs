//! Error types for palette construction.

use std::fmt;

/// Error type for palette validation.
///
/// Returned when a palette is empty, exceeds the 256-entry limit, or is
/// built from a PNG `PLTE` payload whose length is not a multiple of 3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteError {
    /// No entries provided
    Empty,
    /// More entries than an 8-bit index can address
    TooManyEntries {
        /// Number of entries supplied
        len: usize,
    },
    /// `PLTE` payload length is not a multiple of 3
    MalformedPlte {
        /// Length of the payload in bytes
        len: usize,
    },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaletteError::Empty => write!(f, "palette cannot be empty"),
            PaletteError::TooManyEntries { len } => {
                write!(f, "palette has {} entries (max 256)", len)
            }
            PaletteError::MalformedPlte { len } => {
                write!(f, "PLTE length {} is not a multiple of 3", len)
            }
        }
    }
}

impl std::error::Error for PaletteError {}
