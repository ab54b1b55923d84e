//! PNG encoding and atomic file output.

use std::io::{Cursor, Write};
use std::path::Path;

use raster::{PixelMode, Raster};
use serde::Serialize;

use crate::error::WriteError;
use crate::rendering::packing::pack_nbits;

/// zlib effort used by the PNG encoder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PngCompression {
    Fast,
    #[default]
    Balanced,
    Best,
}

impl From<PngCompression> for png::Compression {
    fn from(value: PngCompression) -> Self {
        match value {
            PngCompression::Fast => png::Compression::Fast,
            PngCompression::Balanced => png::Compression::Default,
            PngCompression::Best => png::Compression::Best,
        }
    }
}

/// Encoder settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PngOptions {
    pub compression: PngCompression,
    /// Re-compress with oxipng after encoding
    pub optimize: bool,
}

/// Encode a raster as PNG bytes.
///
/// Indexed rasters are written with a `PLTE` chunk at the smallest bit depth
/// that addresses the whole palette (1, 2, 4 or 8 bits). Grayscale and
/// truecolor rasters are written at 8 bits per sample.
pub fn encode_png(raster: &Raster, options: PngOptions) -> Result<Vec<u8>, WriteError> {
    let (width, height) = (raster.width(), raster.height());
    if width == 0 || height == 0 {
        return Err(WriteError::UnsupportedDimensions { width, height });
    }

    let (color_type, bit_depth, plte, data) = match raster.mode() {
        PixelMode::Indexed => {
            let palette = raster.palette().map(|p| p.to_plte()).unwrap_or_default();
            let (depth, bits) = match palette.len() / 3 {
                0..=2 => (png::BitDepth::One, 1),
                3..=4 => (png::BitDepth::Two, 2),
                5..=16 => (png::BitDepth::Four, 4),
                _ => (png::BitDepth::Eight, 8),
            };
            let packed = if bits == 8 {
                raster.pixels().to_vec()
            } else {
                pack_nbits(raster.pixels(), width, bits)
            };
            (png::ColorType::Indexed, depth, Some(palette), packed)
        }
        PixelMode::Grayscale => (
            png::ColorType::Grayscale,
            png::BitDepth::Eight,
            None,
            raster.pixels().to_vec(),
        ),
        PixelMode::Truecolor => (
            png::ColorType::Rgb,
            png::BitDepth::Eight,
            None,
            raster.pixels().to_vec(),
        ),
    };

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        encoder.set_compression(options.compression.into());
        if let Some(plte) = plte {
            encoder.set_palette(plte);
        }
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&data)?;
    }
    let png_bytes = buf.into_inner();

    tracing::debug!(
        width,
        height,
        color_type = ?color_type,
        bit_depth = ?bit_depth,
        bytes = png_bytes.len(),
        "Encoded PNG"
    );

    if options.optimize {
        Ok(optimize_png(png_bytes))
    } else {
        Ok(png_bytes)
    }
}

/// Re-compress PNG bytes with oxipng (zopfli + adaptive filter selection).
///
/// Color type and grayscale reduction are disabled so palette output stays
/// indexed. On failure the input bytes are returned unchanged.
pub fn optimize_png(png_bytes: Vec<u8>) -> Vec<u8> {
    let options = oxipng::Options {
        strip: oxipng::StripChunks::Safe,
        optimize_alpha: false,
        color_type_reduction: false,
        grayscale_reduction: false,
        ..Default::default()
    };
    match oxipng::optimize_from_memory(&png_bytes, &options) {
        Ok(optimized) if optimized.len() < png_bytes.len() => {
            tracing::debug!(
                before = png_bytes.len(),
                after = optimized.len(),
                "Optimized PNG"
            );
            optimized
        }
        Ok(_) => png_bytes,
        Err(e) => {
            tracing::warn!(error = %e, "PNG optimization failed, keeping encoder output");
            png_bytes
        }
    }
}

/// Write bytes to `path`, replacing any existing file atomically.
///
/// The data goes to a temporary file next to the target, which is then
/// renamed over it. If anything fails the target is left as it was.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), WriteError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(0o644))?;
    }

    tmp.persist(path).map_err(|e| WriteError::Io(e.error))?;
    Ok(())
}
