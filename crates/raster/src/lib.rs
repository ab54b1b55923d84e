#![allow(clippy::module_inception)]

//! raster: in-memory images for the grayquant pipeline
//!
//! This crate holds the data model shared by every pipeline stage: a
//! [`Raster`] with its dimensions, [`PixelMode`], pixel buffer and, for
//! palette images, a [`Palette`] of at most [`MAX_PALETTE_LEN`] entries.
//!
//! # Invariants
//!
//! Every constructor validates its input, so a `Raster` value always satisfies:
//!
//! - `pixels().len() == width * height * mode.bytes_per_pixel()`
//! - an indexed raster carries a palette and every index is `< palette.len()`
//! - a palette holds between 1 and 256 entries
//!
//! Stages never mutate a raster in place. Each one consumes the previous
//! raster and builds a new one through these constructors.
//!
//! # Example
//!
//! ```
//! use raster::{Palette, PixelMode, Raster};
//!
//! let palette = Palette::new(vec![[0, 0, 0], [255, 255, 255]]).unwrap();
//! let image = Raster::indexed(2, 1, vec![0, 1], palette).unwrap();
//!
//! assert_eq!(image.mode(), PixelMode::Indexed);
//! assert_eq!(image.rgb_at(1), [255, 255, 255]);
//! ```

pub mod image;
pub mod palette;

pub use image::{PixelMode, Raster, RasterError};
pub use palette::{Palette, PaletteError, Rgb, MAX_PALETTE_LEN};
