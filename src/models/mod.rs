pub mod config;

pub use config::{ConvertConfig, DEFAULT_INPUT, DEFAULT_MAX_COLORS, DEFAULT_OUTPUT};
