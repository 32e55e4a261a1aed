//! Reader for compressed image formats (JPEG, PNG, BMP) backed by the
//! `image` crate.
//!
//! Decoded pixels are always returned as interleaved RGB so that grayscale
//! conversion goes through the same luma weights as the raw PPM path.

use tracing::debug;

use crate::image_filter::common::error::{FilterError, Result};
use crate::image_filter::raster::reader::ImageReader;
use crate::image_filter::raster::types::{Channels, RasterImage};

pub struct EncodedImageReader;

impl ImageReader for EncodedImageReader {
    fn read_image(&self, data: &[u8]) -> Result<RasterImage> {
        debug!("Decoding compressed image, {} bytes", data.len());

        let decoded = image::load_from_memory(data).map_err(|e| FilterError::DecodeError(e.to_string()))?;
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();

        debug!("Decoded image: {}x{}", width, height);

        RasterImage::new(width as usize, height as usize, Channels::Rgb, rgb.into_raw())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn decodes_png_to_rgb() {
        let source = image::RgbImage::from_fn(3, 2, |x, y| image::Rgb([x as u8, y as u8, 7]));
        let mut png = Vec::new();
        source
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let decoded = EncodedImageReader.read_image(&png).unwrap();

        assert_eq!(decoded.width(), 3);
        assert_eq!(decoded.height(), 2);
        assert_eq!(decoded.channels(), Channels::Rgb);
        assert_eq!(decoded.data(), source.as_raw().as_slice());
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let err = EncodedImageReader.read_image(b"not an image").unwrap_err();
        assert!(matches!(err, FilterError::DecodeError(_)));
    }
}
