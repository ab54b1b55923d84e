//! PNG fixtures written with the `png` encoder.

use std::io::Cursor;
use std::path::Path;

/// Encode raw 8-bit sample data as a PNG.
pub fn encode(width: u32, height: u32, color_type: png::ColorType, data: &[u8]) -> Vec<u8> {
    encode_with(width, height, color_type, png::BitDepth::Eight, None, data)
}

/// Encode sample data with an explicit bit depth and optional PLTE payload.
pub fn encode_with(
    width: u32,
    height: u32,
    color_type: png::ColorType,
    bit_depth: png::BitDepth,
    plte: Option<&[u8]>,
    data: &[u8],
) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(bit_depth);
        if let Some(plte) = plte {
            encoder.set_palette(plte.to_vec());
        }
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }
    buf.into_inner()
}

/// 2x2 opaque pure red RGB image
pub fn solid_red_2x2() -> Vec<u8> {
    encode(2, 2, png::ColorType::Rgb, &[255, 0, 0].repeat(4))
}

/// Horizontal RGB gradient where every pixel has a distinct color
pub fn rgb_gradient(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            data.extend_from_slice(&[
                (x * 255 / width.max(2).saturating_sub(1)) as u8,
                (y * 255 / height.max(2).saturating_sub(1)) as u8,
                ((x + y) % 256) as u8,
            ]);
        }
    }
    encode(width, height, png::ColorType::Rgb, &data)
}

/// RGBA image whose alpha channel varies across the row
pub fn rgba_checker(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let on = (x + y) % 2 == 0;
            let v = if on { 230 } else { 20 };
            data.extend_from_slice(&[v, v / 2, 255 - v, (x * 40 % 256) as u8]);
        }
    }
    encode(width, height, png::ColorType::Rgba, &data)
}

/// 4-bit palette image using an 8-entry colored palette
pub fn indexed_4bit(width: u32, height: u32) -> Vec<u8> {
    let plte: Vec<u8> = (0..8u8)
        .flat_map(|i| [i * 30, 255 - i * 30, (i as u16 * 70 % 256) as u8])
        .collect();
    let indices: Vec<u8> = (0..width * height).map(|i| (i % 8) as u8).collect();
    let mut packed = Vec::new();
    for row in indices.chunks(width as usize) {
        for pair in row.chunks(2) {
            let hi = pair[0] << 4;
            let lo = pair.get(1).copied().unwrap_or(0);
            packed.push(hi | lo);
        }
    }
    encode_with(
        width,
        height,
        png::ColorType::Indexed,
        png::BitDepth::Four,
        Some(&plte),
        &packed,
    )
}

/// 16-bit grayscale image (big-endian samples)
pub fn gray16(width: u32, height: u32) -> Vec<u8> {
    let data: Vec<u8> = (0..width * height)
        .flat_map(|i| ((i * 997 % 65536) as u16).to_be_bytes())
        .collect();
    encode_with(
        width,
        height,
        png::ColorType::Grayscale,
        png::BitDepth::Sixteen,
        None,
        &data,
    )
}

/// Write fixture bytes to a file.
pub fn write_fixture(path: &Path, bytes: &[u8]) {
    std::fs::write(path, bytes).unwrap();
}
