//! Luminance conversion (ITU-R BT.601 weights, 16-bit fixed point).

use raster::{PixelMode, Raster, RasterError, Rgb};

const R_WEIGHT: u32 = 19_595;
const G_WEIGHT: u32 = 38_470;
const B_WEIGHT: u32 = 7_471;
const ROUND: u32 = 0x8000;

/// Luminance of an sRGB color: `L = R*299/1000 + G*587/1000 + B*114/1000`.
///
/// The weights sum to `1 << 16`, so white maps to exactly 255.
#[inline]
pub fn luma([r, g, b]: Rgb) -> u8 {
    ((r as u32 * R_WEIGHT + g as u32 * G_WEIGHT + b as u32 * B_WEIGHT + ROUND) >> 16) as u8
}

/// Convert any raster to single-channel grayscale.
///
/// Grayscale input is returned unchanged. Indexed input is converted
/// through a per-entry lookup table, so each palette color is weighted
/// once rather than once per pixel.
pub fn to_grayscale(raster: Raster) -> Result<Raster, RasterError> {
    let (width, height) = (raster.width(), raster.height());
    match raster.mode() {
        PixelMode::Grayscale => Ok(raster),
        PixelMode::Truecolor => {
            let samples = raster
                .pixels()
                .chunks_exact(3)
                .map(|p| luma([p[0], p[1], p[2]]))
                .collect();
            Raster::grayscale(width, height, samples)
        }
        PixelMode::Indexed => {
            let lut: Vec<u8> = raster
                .palette()
                .map(|p| p.iter().map(|&c| luma(c)).collect())
                .unwrap_or_default();
            let samples = raster
                .pixels()
                .iter()
                .map(|&i| lut.get(i as usize).copied().unwrap_or(0))
                .collect();
            Raster::grayscale(width, height, samples)
        }
    }
}
