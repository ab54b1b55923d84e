//! Sub-byte PNG row packing for 1, 2 and 4-bit samples.

/// Pack pixel values into N-bit PNG row data (1, 2, or 4 bits per pixel).
///
/// Each row starts on a byte boundary; the last byte of a row is padded
/// with zero bits.
pub fn pack_nbits(values: &[u8], width: u32, bits: u8) -> Vec<u8> {
    let pixels_per_byte = 8 / bits as usize;
    let bytes_per_row = (width as usize).div_ceil(pixels_per_byte);
    let height = values.len() / width as usize;
    let mask = (1u8 << bits) - 1;
    let mut packed = Vec::with_capacity(bytes_per_row * height);

    for row in values.chunks(width as usize) {
        let mut byte = 0u8;
        for (i, &value) in row.iter().enumerate() {
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            byte |= (value & mask) << shift;

            if (i % pixels_per_byte) == pixels_per_byte - 1 || i == row.len() - 1 {
                packed.push(byte);
                byte = 0;
            }
        }
    }

    packed
}

/// Unpack N-bit PNG rows (1, 2, 4 or 8 bits per pixel) into one byte per pixel.
///
/// `line_size` is the number of bytes per packed row; padding bits at the
/// end of each row are skipped.
pub fn unpack_nbits(rows: &[u8], width: u32, line_size: usize, bits: u8) -> Vec<u8> {
    let width = width as usize;
    if line_size == 0 {
        return Vec::new();
    }
    if bits == 8 {
        return rows
            .chunks(line_size)
            .flat_map(|row| row[..width.min(row.len())].iter().copied())
            .collect();
    }

    let pixels_per_byte = 8 / bits as usize;
    let mask = (1u8 << bits) - 1;
    let mut values = Vec::with_capacity(width * (rows.len() / line_size));

    for row in rows.chunks(line_size) {
        for i in 0..width {
            let Some(&byte) = row.get(i / pixels_per_byte) else {
                break;
            };
            let shift = (8 - bits) - (i % pixels_per_byte) as u8 * bits;
            values.push((byte >> shift) & mask);
        }
    }

    values
}
