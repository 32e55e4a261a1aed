use crate::image_filter::common::error::Result;
use crate::image_filter::raster::encoded_reader::EncodedImageReader;
use crate::image_filter::raster::ppm_reader::PpmReader;
use crate::image_filter::raster::types::RasterImage;

pub trait ImageReader {
    fn read_image(&self, data: &[u8]) -> Result<RasterImage>;
}

/// Encoding of the benchmark input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Binary PPM/PGM (`P6`/`P5`)
    Ppm,
    /// Any compressed format the `image` crate decodes (JPEG, PNG, BMP)
    Encoded,
}

impl ImageReader for InputFormat {
    fn read_image(&self, data: &[u8]) -> Result<RasterImage> {
        match self {
            InputFormat::Ppm => PpmReader.read_image(data),
            InputFormat::Encoded => EncodedImageReader.read_image(data),
        }
    }
}
