pub mod converter;

pub use converter::{ConversionReport, ImageConverter};
