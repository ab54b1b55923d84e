//! Palette quantization of a raster into indexed mode.
//!
//! Images that already fit the palette get an exact, sorted palette.
//! Larger color sets are clustered with `imagequant` and then compacted.

use std::collections::BTreeSet;

use imagequant::RGBA;
use raster::{Palette, PixelMode, Raster, RasterError, Rgb, MAX_PALETTE_LEN};
use serde::Serialize;

use crate::error::QuantizeError;
use crate::rendering::grayscale::luma;

/// Smallest palette the quantizer will produce on request.
pub const MIN_COLORS: u16 = 2;

/// Largest palette an 8-bit index can address.
pub const MAX_COLORS: u16 = MAX_PALETTE_LEN as u16;

/// Clustering effort used when an image has more colors than allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum QuantizeMethod {
    /// Fastest clustering, coarse palette search
    #[default]
    Fast,
    /// Slower clustering with more refinement passes
    Thorough,
}

impl QuantizeMethod {
    /// `imagequant` speed setting (1 = slowest, 10 = fastest)
    pub fn speed(self) -> i32 {
        match self {
            QuantizeMethod::Fast => 10,
            QuantizeMethod::Thorough => 3,
        }
    }
}

/// Reduces a raster to at most `max_colors` palette entries.
#[derive(Debug, Clone, Copy)]
pub struct Quantizer {
    max_colors: u16,
    method: QuantizeMethod,
}

impl Quantizer {
    /// Create a quantizer.
    ///
    /// # Errors
    ///
    /// [`QuantizeError::InvalidColorCount`] unless `max_colors` is in `2..=256`.
    pub fn new(max_colors: u16, method: QuantizeMethod) -> Result<Self, QuantizeError> {
        if !(MIN_COLORS..=MAX_COLORS).contains(&max_colors) {
            return Err(QuantizeError::InvalidColorCount(max_colors));
        }
        Ok(Self { max_colors, method })
    }

    pub fn max_colors(&self) -> u16 {
        self.max_colors
    }

    pub fn method(&self) -> QuantizeMethod {
        self.method
    }

    /// Quantize a raster of any mode to [`PixelMode::Indexed`].
    ///
    /// The output has the same dimensions as the input, one index per pixel
    /// and a palette of at most `max_colors` entries with no unused entries.
    pub fn quantize(&self, raster: &Raster) -> Result<Raster, QuantizeError> {
        if raster.is_empty() {
            return Err(QuantizeError::EmptyRaster);
        }

        if let Some(colors) = distinct_colors(raster, self.max_colors as usize) {
            tracing::debug!(
                colors = colors.len(),
                max_colors = self.max_colors,
                "Palette fits, skipping clustering"
            );
            return exact_palette(raster, colors);
        }

        self.cluster(raster)
    }

    fn cluster(&self, raster: &Raster) -> Result<Raster, QuantizeError> {
        let width = raster.width() as usize;
        let height = raster.height() as usize;
        let pixels: Vec<RGBA> = raster
            .colors()
            .map(|[r, g, b]| RGBA { r, g, b, a: 255 })
            .collect();

        let mut liq = imagequant::new();
        liq.set_speed(self.method.speed())?;
        liq.set_max_colors(self.max_colors as u32)?;

        let mut image = liq.new_image(&pixels[..], width, height, 0.0)?;
        let mut result = liq.quantize(&mut image)?;
        result.set_dithering_level(0.0)?;
        let (palette, indices) = result.remapped(&mut image)?;

        let grey = raster.mode() == PixelMode::Grayscale
            || raster.colors().all(|[r, g, b]| r == g && g == b);
        let entries: Vec<Rgb> = palette
            .iter()
            .map(|c| {
                if grey {
                    let v = luma([c.r, c.g, c.b]);
                    [v, v, v]
                } else {
                    [c.r, c.g, c.b]
                }
            })
            .collect();

        let (entries, indices) = compact(&entries, &indices);
        tracing::debug!(
            method = ?self.method,
            clustered = palette.len(),
            palette_len = entries.len(),
            "Clustered palette"
        );

        let palette = Palette::new(entries).map_err(RasterError::from)?;
        Ok(Raster::indexed(
            raster.width(),
            raster.height(),
            indices,
            palette,
        )?)
    }
}

/// Collect the distinct colors of a raster, or `None` if there are more
/// than `limit`.
fn distinct_colors(raster: &Raster, limit: usize) -> Option<BTreeSet<Rgb>> {
    let mut colors = BTreeSet::new();
    for color in raster.colors() {
        if colors.insert(color) && colors.len() > limit {
            return None;
        }
    }
    Some(colors)
}

/// Index every pixel into a palette made of exactly `colors`, ascending.
fn exact_palette(raster: &Raster, colors: BTreeSet<Rgb>) -> Result<Raster, QuantizeError> {
    let entries: Vec<Rgb> = colors.into_iter().collect();
    let indices = raster
        .colors()
        .map(|c| entries.binary_search(&c).unwrap_or(0) as u8)
        .collect();
    let palette = Palette::new(entries).map_err(RasterError::from)?;
    Ok(Raster::indexed(
        raster.width(),
        raster.height(),
        indices,
        palette,
    )?)
}

/// Drop unused and duplicate palette entries, sort the rest ascending and
/// renumber the indices to match.
fn compact(entries: &[Rgb], indices: &[u8]) -> (Vec<Rgb>, Vec<u8>) {
    let mut used = vec![false; entries.len()];
    for &index in indices {
        if let Some(slot) = used.get_mut(index as usize) {
            *slot = true;
        }
    }

    let kept: Vec<Rgb> = entries
        .iter()
        .zip(&used)
        .filter(|&(_, &u)| u)
        .map(|(&c, _)| c)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let remap: Vec<u8> = entries
        .iter()
        .map(|c| kept.binary_search(c).unwrap_or(0) as u8)
        .collect();
    let indices = indices
        .iter()
        .map(|&i| remap.get(i as usize).copied().unwrap_or(0))
        .collect();

    (kept, indices)
}
