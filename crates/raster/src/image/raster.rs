//! Raster struct with invariant-checked constructors.

use std::fmt;

use super::error::RasterError;
use crate::palette::{Palette, Rgb};

/// Pixel layout of a [`Raster`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelMode {
    /// 8-bit RGB, three bytes per pixel
    Truecolor,
    /// 8-bit luminance, one byte per pixel
    Grayscale,
    /// 8-bit palette index, one byte per pixel
    Indexed,
}

impl PixelMode {
    /// Bytes each pixel occupies in the pixel buffer.
    #[inline]
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            PixelMode::Truecolor => 3,
            PixelMode::Grayscale | PixelMode::Indexed => 1,
        }
    }
}

impl fmt::Display for PixelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PixelMode::Truecolor => "truecolor",
            PixelMode::Grayscale => "grayscale",
            PixelMode::Indexed => "indexed",
        };
        f.write_str(name)
    }
}

/// An in-memory image: dimensions, pixel mode, pixel buffer and, for
/// [`PixelMode::Indexed`], the palette the indices refer to.
///
/// Pixels are stored in row-major order without row padding.
///
/// # Example
///
/// ```
/// use raster::{PixelMode, Raster};
///
/// let red = Raster::truecolor(2, 2, [255, 0, 0].repeat(4)).unwrap();
/// assert_eq!(red.mode(), PixelMode::Truecolor);
/// assert_eq!(red.pixel_count(), 4);
/// assert_eq!(red.rgb_at(3), [255, 0, 0]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    mode: PixelMode,
    pixels: Vec<u8>,
    palette: Option<Palette>,
}

impl Raster {
    /// Create a truecolor raster from `[R, G, B]` triplets.
    ///
    /// # Errors
    ///
    /// [`RasterError::BufferLength`] if `pixels.len() != width * height * 3`.
    pub fn truecolor(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RasterError> {
        check_len(PixelMode::Truecolor, width, height, pixels.len())?;
        Ok(Self {
            width,
            height,
            mode: PixelMode::Truecolor,
            pixels,
            palette: None,
        })
    }

    /// Create a grayscale raster from one luminance byte per pixel.
    pub fn grayscale(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, RasterError> {
        check_len(PixelMode::Grayscale, width, height, pixels.len())?;
        Ok(Self {
            width,
            height,
            mode: PixelMode::Grayscale,
            pixels,
            palette: None,
        })
    }

    /// Create an indexed raster from palette indices and their palette.
    ///
    /// # Errors
    ///
    /// - [`RasterError::BufferLength`] if `indices.len() != width * height`
    /// - [`RasterError::IndexOutOfRange`] if any index is `>= palette.len()`
    pub fn indexed(
        width: u32,
        height: u32,
        indices: Vec<u8>,
        palette: Palette,
    ) -> Result<Self, RasterError> {
        check_len(PixelMode::Indexed, width, height, indices.len())?;
        if let Some((position, &index)) = indices
            .iter()
            .enumerate()
            .find(|&(_, &index)| index as usize >= palette.len())
        {
            return Err(RasterError::IndexOutOfRange {
                position,
                index,
                palette_len: palette.len(),
            });
        }
        Ok(Self {
            width,
            height,
            mode: PixelMode::Indexed,
            pixels: indices,
            palette: Some(palette),
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn mode(&self) -> PixelMode {
        self.mode
    }

    /// Raw pixel buffer in the layout given by [`mode()`](Self::mode).
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// The palette, present only for [`PixelMode::Indexed`].
    #[inline]
    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Number of pixels (`width * height`).
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.pixels.len() / self.mode.bytes_per_pixel()
    }

    /// True when the raster has zero pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Color of the pixel at row-major position `i`.
    ///
    /// Grayscale samples expand to `[v, v, v]`; indexed pixels are looked up
    /// in the palette.
    ///
    /// # Panics
    ///
    /// Panics if `i >= pixel_count()`.
    #[inline]
    pub fn rgb_at(&self, i: usize) -> Rgb {
        match self.mode {
            PixelMode::Truecolor => {
                let p = &self.pixels[i * 3..i * 3 + 3];
                [p[0], p[1], p[2]]
            }
            PixelMode::Grayscale => {
                let v = self.pixels[i];
                [v, v, v]
            }
            PixelMode::Indexed => {
                let index = self.pixels[i] as usize;
                // Constructor guarantees palette presence and index range.
                self.palette
                    .as_ref()
                    .and_then(|p| p.get(index))
                    .unwrap_or([0, 0, 0])
            }
        }
    }

    /// Iterate over the color of every pixel in row-major order.
    pub fn colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        (0..self.pixel_count()).map(move |i| self.rgb_at(i))
    }
}

fn check_len(mode: PixelMode, width: u32, height: u32, actual: usize) -> Result<(), RasterError> {
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(mode.bytes_per_pixel()))
        .ok_or(RasterError::DimensionsTooLarge { width, height })?;
    if expected != actual {
        return Err(RasterError::BufferLength {
            mode,
            expected,
            actual,
        });
    }
    Ok(())
}
