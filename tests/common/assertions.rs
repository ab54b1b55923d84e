//! Assertion helpers for tests.

use std::path::Path;

use pretty_assertions::assert_eq;

/// Decoded view of an output PNG.
#[derive(Debug)]
pub struct DecodedPng {
    pub width: u32,
    pub height: u32,
    pub color_type: png::ColorType,
    pub bit_depth: png::BitDepth,
    pub palette: Vec<[u8; 3]>,
    /// One palette index per pixel, unpacked from sub-byte rows
    pub indices: Vec<u8>,
}

/// Decode a PNG file without any transformations.
pub fn decode_file(path: &Path) -> DecodedPng {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    decode_bytes(&bytes)
}

pub fn decode_bytes(bytes: &[u8]) -> DecodedPng {
    let mut reader = png::Decoder::new(bytes).read_info().unwrap();
    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf).unwrap();
    let info = reader.info();

    let palette = info
        .palette
        .as_ref()
        .map(|p| p.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect())
        .unwrap_or_default();

    let bits = frame.bit_depth as usize;
    let mut indices = Vec::with_capacity((frame.width * frame.height) as usize);
    for row in buf[..frame.buffer_size()].chunks(frame.line_size) {
        for x in 0..frame.width as usize {
            let bit = x * bits;
            let byte = row[bit / 8];
            let shift = 8 - bits - bit % 8;
            indices.push((byte >> shift) & ((1u16 << bits) - 1) as u8);
        }
    }

    DecodedPng {
        width: frame.width,
        height: frame.height,
        color_type: frame.color_type,
        bit_depth: frame.bit_depth,
        palette,
        indices,
    }
}

/// Assert a PNG is palette-indexed with a grey palette of at most `max` entries
/// and that every pixel indexes into it.
pub fn assert_indexed_grey(png: &DecodedPng, max: usize) {
    assert_eq!(png.color_type, png::ColorType::Indexed, "color type");
    assert!(!png.palette.is_empty(), "palette is empty");
    assert!(
        png.palette.len() <= max,
        "palette has {} entries, expected at most {max}",
        png.palette.len()
    );
    assert!(
        png.palette.iter().all(|&[r, g, b]| r == g && g == b),
        "palette is not grey: {:?}",
        png.palette
    );
    assert_eq!(png.indices.len(), (png.width * png.height) as usize);
    assert!(
        png.indices.iter().all(|&i| (i as usize) < png.palette.len()),
        "index out of palette range"
    );
}
