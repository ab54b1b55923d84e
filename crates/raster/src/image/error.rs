//! Error types for raster construction.

use std::fmt;

use super::raster::PixelMode;
use crate::palette::PaletteError;

/// Error type for raster validation.
///
/// Returned by the [`Raster`](super::Raster) constructors when a buffer
/// does not match the declared dimensions or an index points past the
/// end of the palette.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterError {
    /// Pixel buffer length does not equal width * height * bytes-per-pixel
    BufferLength {
        /// Pixel mode the buffer was declared with
        mode: PixelMode,
        /// Length implied by the dimensions
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },
    /// width * height * bytes-per-pixel does not fit in memory
    DimensionsTooLarge {
        width: u32,
        height: u32,
    },
    /// A pixel index refers to a missing palette entry
    IndexOutOfRange {
        /// Pixel position in row-major order
        position: usize,
        /// Offending index value
        index: u8,
        /// Number of palette entries
        palette_len: usize,
    },
    /// Invalid palette
    Palette(PaletteError),
}

impl From<PaletteError> for RasterError {
    fn from(err: PaletteError) -> Self {
        RasterError::Palette(err)
    }
}

impl fmt::Display for RasterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RasterError::BufferLength {
                mode,
                expected,
                actual,
            } => write!(
                f,
                "{} buffer has {} bytes, expected {}",
                mode, actual, expected
            ),
            RasterError::DimensionsTooLarge { width, height } => {
                write!(f, "dimensions {}x{} are too large", width, height)
            }
            RasterError::IndexOutOfRange {
                position,
                index,
                palette_len,
            } => write!(
                f,
                "pixel {} uses index {} but the palette has {} entries",
                position, index, palette_len
            ),
            RasterError::Palette(err) => write!(f, "invalid palette: {}", err),
        }
    }
}

impl std::error::Error for RasterError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RasterError::Palette(err) => Some(err),
            _ => None,
        }
    }
}
