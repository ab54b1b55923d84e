//! PNG loading into a [`Raster`].

use std::io::ErrorKind;
use std::path::Path;

use png::{BitDepth, ColorType, Transformations};
use raster::{Palette, Raster, RasterError};

use crate::error::{ConvertError, DecodeError};
use crate::rendering::packing::unpack_nbits;

/// Read and decode a PNG file.
///
/// A missing file is reported as [`ConvertError::ResourceNotFound`]; any
/// other I/O failure as [`ConvertError::Read`]; invalid PNG data as
/// [`ConvertError::Decode`].
pub fn load_png(path: &Path) -> Result<Raster, ConvertError> {
    let bytes = std::fs::read(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ConvertError::ResourceNotFound {
            path: path.to_path_buf(),
        },
        _ => ConvertError::Read {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let raster = decode_png(&bytes).map_err(|source| ConvertError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(
        path = %path.display(),
        bytes = bytes.len(),
        width = raster.width(),
        height = raster.height(),
        mode = %raster.mode(),
        "Loaded PNG"
    );
    Ok(raster)
}

/// Decode PNG bytes into a raster.
///
/// - Palette images keep their indices and `PLTE` table
/// - Grayscale (with or without alpha) becomes [`PixelMode::Grayscale`](raster::PixelMode::Grayscale);
///   sub-byte samples are scaled to the full 0..=255 range
/// - RGB and RGBA become [`PixelMode::Truecolor`](raster::PixelMode::Truecolor)
///
/// 16-bit samples are reduced to 8 bits and alpha is discarded.
pub fn decode_png(bytes: &[u8]) -> Result<Raster, DecodeError> {
    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(Transformations::STRIP_16);
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf)?;
    buf.truncate(frame.buffer_size());

    let (width, height) = (frame.width, frame.height);
    let bits = frame.bit_depth as u8;

    let raster = match (frame.color_type, frame.bit_depth) {
        (ColorType::Indexed, _) => {
            let plte = reader
                .info()
                .palette
                .as_ref()
                .ok_or(DecodeError::MissingPalette)?;
            let palette = Palette::from_plte(plte).map_err(RasterError::from)?;
            let indices = unpack_nbits(&buf, width, frame.line_size, bits);
            Raster::indexed(width, height, indices, palette)?
        }
        (ColorType::Grayscale, BitDepth::Eight) => Raster::grayscale(width, height, buf)?,
        (ColorType::Grayscale, BitDepth::One | BitDepth::Two | BitDepth::Four) => {
            let max = (1u16 << bits) - 1;
            let samples = unpack_nbits(&buf, width, frame.line_size, bits)
                .into_iter()
                .map(|v| (v as u16 * 255 / max) as u8)
                .collect();
            Raster::grayscale(width, height, samples)?
        }
        (ColorType::GrayscaleAlpha, BitDepth::Eight) => {
            let samples = buf.chunks_exact(2).map(|p| p[0]).collect();
            Raster::grayscale(width, height, samples)?
        }
        (ColorType::Rgb, BitDepth::Eight) => Raster::truecolor(width, height, buf)?,
        (ColorType::Rgba, BitDepth::Eight) => {
            let rgb = buf
                .chunks_exact(4)
                .flat_map(|p| [p[0], p[1], p[2]])
                .collect();
            Raster::truecolor(width, height, rgb)?
        }
        (color_type, bit_depth) => {
            return Err(DecodeError::UnsupportedLayout {
                color_type,
                bit_depth,
            })
        }
    };

    Ok(raster)
}
