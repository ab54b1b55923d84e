use std::path::PathBuf;

use serde::Serialize;

use crate::error::ConvertError;
use crate::rendering::png_writer::{PngCompression, PngOptions};
use crate::rendering::quantize::{QuantizeMethod, MAX_COLORS, MIN_COLORS};

/// Input path used when none is given
pub const DEFAULT_INPUT: &str = "./input.png";

/// Output path used when none is given
pub const DEFAULT_OUTPUT: &str = "./input-out.png";

/// Palette size used when none is given
pub const DEFAULT_MAX_COLORS: u16 = 256;

/// Settings for one conversion run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertConfig {
    /// PNG file to read
    pub input: PathBuf,

    /// PNG file to write (replaced if it exists)
    pub output: PathBuf,

    /// Upper bound on palette entries (2..=256)
    pub max_colors: u16,

    /// Clustering effort when the image has more colors than `max_colors`
    pub method: QuantizeMethod,

    /// zlib effort for the output PNG
    pub compression: PngCompression,

    /// Re-compress the output with oxipng
    pub optimize: bool,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            max_colors: DEFAULT_MAX_COLORS,
            method: QuantizeMethod::default(),
            compression: PngCompression::default(),
            optimize: false,
        }
    }
}

impl ConvertConfig {
    /// Check that the settings describe a runnable conversion
    pub fn validate(&self) -> Result<(), ConvertError> {
        if !(MIN_COLORS..=MAX_COLORS).contains(&self.max_colors) {
            return Err(ConvertError::InvalidConfig(format!(
                "colors must be between {MIN_COLORS} and {MAX_COLORS}, got {}",
                self.max_colors
            )));
        }
        if self.input == self.output {
            return Err(ConvertError::InvalidConfig(format!(
                "input and output are the same file: {}",
                self.input.display()
            )));
        }
        Ok(())
    }

    /// Encoder settings derived from this config
    pub fn png_options(&self) -> PngOptions {
        PngOptions {
            compression: self.compression,
            optimize: self.optimize,
        }
    }
}
