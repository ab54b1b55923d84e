pub mod grayscale;
pub mod packing;
pub mod png_reader;
pub mod png_writer;
pub mod quantize;

pub use grayscale::{luma, to_grayscale};
pub use png_reader::{decode_png, load_png};
pub use png_writer::{encode_png, optimize_png, write_atomic, PngCompression, PngOptions};
pub use quantize::{QuantizeMethod, Quantizer, MAX_COLORS, MIN_COLORS};
