use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use raster::RasterError;

/// Pipeline stage an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Config,
    Load,
    Grayscale,
    Quantize,
    Save,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Config => "config",
            Stage::Load => "load",
            Stage::Grayscale => "grayscale",
            Stage::Quantize => "quantize",
            Stage::Save => "save",
        })
    }
}

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("Input not found: {}", path.display())]
    ResourceNotFound { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },

    #[error("Grayscale conversion failed: {0}")]
    Grayscale(#[source] RasterError),

    #[error("Quantization failed: {0}")]
    Quantization(#[from] QuantizeError),

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: WriteError,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ConvertError {
    /// The stage that failed
    pub fn stage(&self) -> Stage {
        match self {
            ConvertError::InvalidConfig(_) => Stage::Config,
            ConvertError::ResourceNotFound { .. }
            | ConvertError::Read { .. }
            | ConvertError::Decode { .. } => Stage::Load,
            ConvertError::Grayscale(_) => Stage::Grayscale,
            ConvertError::Quantization(_) => Stage::Quantize,
            ConvertError::Write { .. } => Stage::Save,
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("PNG decode error: {0}")]
    Png(#[from] png::DecodingError),

    #[error("Unsupported PNG layout: {color_type:?} at {bit_depth:?}")]
    UnsupportedLayout {
        color_type: png::ColorType,
        bit_depth: png::BitDepth,
    },

    #[error("Indexed PNG without a PLTE chunk")]
    MissingPalette,

    #[error("Invalid image data: {0}")]
    Raster(#[from] RasterError),
}

#[derive(Debug, Error)]
pub enum QuantizeError {
    #[error("Image has no pixels")]
    EmptyRaster,

    #[error("Palette size {0} outside 2..=256")]
    InvalidColorCount(u16),

    #[error("imagequant error: {0}")]
    Backend(#[from] imagequant::Error),

    #[error("Invalid quantized image: {0}")]
    Raster(#[from] RasterError),
}

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("PNG encode error: {0}")]
    Encode(#[from] png::EncodingError),

    #[error("Unsupported PNG dimensions: {width}x{height}")]
    UnsupportedDimensions { width: u32, height: u32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_not_found_message() {
        let error = ConvertError::ResourceNotFound {
            path: PathBuf::from("./input.png"),
        };
        assert_eq!(error.to_string(), "Input not found: ./input.png");
        assert_eq!(error.stage(), Stage::Load);
    }

    #[test]
    fn test_decode_error_message() {
        let error = ConvertError::Decode {
            path: PathBuf::from("bad.png"),
            source: DecodeError::MissingPalette,
        };
        assert_eq!(
            error.to_string(),
            "Failed to decode bad.png: Indexed PNG without a PLTE chunk"
        );
        assert_eq!(error.stage(), Stage::Load);
    }

    #[test]
    fn test_quantization_error_from() {
        let error: ConvertError = QuantizeError::EmptyRaster.into();
        assert_eq!(error.to_string(), "Quantization failed: Image has no pixels");
        assert_eq!(error.stage(), Stage::Quantize);
    }

    #[test]
    fn test_write_error_message() {
        let error = ConvertError::Write {
            path: PathBuf::from("/nope/out.png"),
            source: WriteError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "denied",
            )),
        };
        assert_eq!(
            error.to_string(),
            "Failed to write /nope/out.png: IO error: denied"
        );
        assert_eq!(error.stage(), Stage::Save);
    }

    #[test]
    fn test_grayscale_error_stage() {
        let error = ConvertError::Grayscale(RasterError::DimensionsTooLarge {
            width: 1,
            height: 1,
        });
        assert_eq!(error.stage(), Stage::Grayscale);
    }

    #[test]
    fn test_invalid_config_stage() {
        let error = ConvertError::InvalidConfig("colors must be 2..=256".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid configuration: colors must be 2..=256"
        );
        assert_eq!(error.stage(), Stage::Config);
    }

    #[test]
    fn test_stage_display() {
        assert_eq!(Stage::Load.to_string(), "load");
        assert_eq!(Stage::Grayscale.to_string(), "grayscale");
        assert_eq!(Stage::Quantize.to_string(), "quantize");
        assert_eq!(Stage::Save.to_string(), "save");
        assert_eq!(Stage::Config.to_string(), "config");
    }

    #[test]
    fn test_unsupported_dimensions_message() {
        let error = WriteError::UnsupportedDimensions {
            width: 0,
            height: 5,
        };
        assert_eq!(error.to_string(), "Unsupported PNG dimensions: 0x5");
    }
}
