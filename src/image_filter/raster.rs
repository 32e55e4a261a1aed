//! Raster image I/O module
//!
//! Reading and writing of the raw PPM/PGM pixel format, decoding of
//! compressed formats through the `image` crate, and grayscale conversion.

mod reader;
mod ppm_reader;
mod encoded_reader;
mod writer;
mod ppm_writer;
pub mod types;

pub use reader::{ImageReader, InputFormat};
pub use ppm_reader::PpmReader;
pub use encoded_reader::EncodedImageReader;
pub use writer::ImageWriter;
pub use ppm_writer::PpmWriter;
pub use types::{Channels, RasterImage};
