//! Palette types
//!
//! This module provides the palette table carried by indexed rasters and
//! its validation errors.

mod error;
mod palette;

pub use error::PaletteError;
pub use palette::{Palette, Rgb, MAX_PALETTE_LEN};
