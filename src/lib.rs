//! grayquant - grayscale palette PNG converter
//!
//! Loads a PNG, converts it to BT.601 luminance, quantizes it to at most
//! 256 palette entries and writes an indexed PNG.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;

pub use error::{ConvertError, Stage};
pub use models::ConvertConfig;
pub use services::{ConversionReport, ImageConverter};
