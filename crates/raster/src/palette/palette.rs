//! Palette table for indexed rasters.

use super::error::PaletteError;

/// Maximum number of entries an 8-bit index can address.
pub const MAX_PALETTE_LEN: usize = 256;

/// An 8-bit sRGB color as `[r, g, b]`.
pub type Rgb = [u8; 3];

/// Ordered color table of an indexed raster.
///
/// Entry order is significant: pixel index `i` refers to `entries()[i]`.
/// Duplicate entries are allowed (PNG files may contain them).
///
/// # Example
///
/// ```
/// use raster::Palette;
///
/// let palette = Palette::from_plte(&[0, 0, 0, 128, 128, 128]).unwrap();
/// assert_eq!(palette.len(), 2);
/// assert!(palette.is_greyscale());
/// assert_eq!(palette.to_plte(), vec![0, 0, 0, 128, 128, 128]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<Rgb>,
}

impl Palette {
    /// Create a palette from its entries.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::Empty`] if `entries` is empty
    /// - [`PaletteError::TooManyEntries`] if there are more than 256 entries
    pub fn new(entries: Vec<Rgb>) -> Result<Self, PaletteError> {
        if entries.is_empty() {
            return Err(PaletteError::Empty);
        }
        if entries.len() > MAX_PALETTE_LEN {
            return Err(PaletteError::TooManyEntries { len: entries.len() });
        }
        Ok(Self { entries })
    }

    /// Parse the payload of a PNG `PLTE` chunk (`r, g, b` triplets).
    pub fn from_plte(plte: &[u8]) -> Result<Self, PaletteError> {
        if plte.len() % 3 != 0 {
            return Err(PaletteError::MalformedPlte { len: plte.len() });
        }
        Self::new(
            plte.chunks_exact(3)
                .map(|c| [c[0], c[1], c[2]])
                .collect(),
        )
    }

    /// Serialize as a PNG `PLTE` payload.
    pub fn to_plte(&self) -> Vec<u8> {
        self.entries.iter().flatten().copied().collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; a palette holds at least one entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.entries.get(index).copied()
    }

    #[inline]
    pub fn entries(&self) -> &[Rgb] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rgb> {
        self.entries.iter()
    }

    /// Check if every entry is a grey value (R == G == B).
    pub fn is_greyscale(&self) -> bool {
        self.entries.iter().all(|&[r, g, b]| r == g && g == b)
    }
}
