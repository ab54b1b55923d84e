use std::path::PathBuf;

use raster::Raster;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::ConvertError;
use crate::models::ConvertConfig;
use crate::rendering::{encode_png, load_png, to_grayscale, write_atomic, Quantizer};

/// Summary of a finished conversion
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Entries in the written palette
    pub palette_len: usize,
    pub bytes_written: usize,
    /// Hex-encoded SHA-256 of the written file
    pub sha256: String,
}

/// Runs load, grayscale, quantize and save in order
pub struct ImageConverter {
    config: ConvertConfig,
}

impl ImageConverter {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Convert the configured input file and write the configured output.
    ///
    /// Nothing is written unless every earlier stage succeeds.
    pub fn run(&self) -> Result<ConversionReport, ConvertError> {
        self.config.validate()?;
        let raster = load_png(&self.config.input)?;
        self.process(raster)
    }

    /// Convert an already loaded raster and write it to the configured output.
    pub fn process(&self, raster: Raster) -> Result<ConversionReport, ConvertError> {
        let indexed = self.convert_raster(raster)?;
        let output = &self.config.output;

        let bytes = encode_png(&indexed, self.config.png_options()).map_err(|source| {
            ConvertError::Write {
                path: output.clone(),
                source,
            }
        })?;
        write_atomic(output, &bytes).map_err(|source| ConvertError::Write {
            path: output.clone(),
            source,
        })?;

        let report = ConversionReport {
            input: self.config.input.clone(),
            output: output.clone(),
            width: indexed.width(),
            height: indexed.height(),
            palette_len: indexed.palette().map_or(0, |p| p.len()),
            bytes_written: bytes.len(),
            sha256: hex::encode(Sha256::digest(&bytes)),
        };
        tracing::info!(
            output = %output.display(),
            width = report.width,
            height = report.height,
            palette_len = report.palette_len,
            bytes = report.bytes_written,
            "Wrote indexed PNG"
        );
        Ok(report)
    }

    /// Grayscale and quantize a raster in memory.
    pub fn convert_raster(&self, raster: Raster) -> Result<Raster, ConvertError> {
        let quantizer = Quantizer::new(self.config.max_colors, self.config.method)?;

        let gray = to_grayscale(raster).map_err(ConvertError::Grayscale)?;
        tracing::debug!(
            width = gray.width(),
            height = gray.height(),
            "Converted to grayscale"
        );

        let indexed = quantizer.quantize(&gray)?;
        tracing::debug!(
            palette_len = indexed.palette().map_or(0, |p| p.len()),
            method = ?quantizer.method(),
            "Quantized"
        );
        Ok(indexed)
    }
}
