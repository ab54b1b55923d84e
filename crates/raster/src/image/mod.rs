//! The [`Raster`] type and its pixel modes.
//!
//! A raster stores one of three layouts:
//!
//! - **Truecolor**: `[R, G, B]` per pixel, row-major
//! - **Grayscale**: one luminance byte per pixel
//! - **Indexed**: one palette index per pixel plus an owned [`Palette`](crate::Palette)

mod error;
mod raster;

pub use error::RasterError;
pub use raster::{PixelMode, Raster};
