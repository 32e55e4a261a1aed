//! Raster image types

use crate::image_filter::common::error::{FilterError, Result};

/// BT.601 luma weights, applied in `f64` and truncated.
const LUMA_R: f64 = 0.299;
const LUMA_G: f64 = 0.587;
const LUMA_B: f64 = 0.114;

/// Pixel depth of a raster image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    /// Single 8-bit luminance channel
    Gray,
    /// Interleaved 8-bit R, G, B
    Rgb,
}

impl Channels {
    pub fn count(self) -> usize {
        match self {
            Channels::Gray => 1,
            Channels::Rgb => 3,
        }
    }
}

/// Flat row-major 8-bit image.
///
/// `data.len()` is always `width * height * channels.count()`; rows are
/// packed with no padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    width: usize,
    height: usize,
    channels: Channels,
    data: Vec<u8>,
}

impl RasterImage {
    pub fn new(width: usize, height: usize, channels: Channels, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FilterError::InvalidDimensions(width, height));
        }
        let expected = width * height * channels.count();
        if data.len() != expected {
            return Err(FilterError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Single-channel image from a pixel buffer.
    pub fn gray(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, Channels::Gray, data)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn channels(&self) -> Channels {
        self.channels
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Luminance image. Gray input is returned as a copy.
    pub fn to_grayscale(&self) -> RasterImage {
        let data = match self.channels {
            Channels::Gray => self.data.clone(),
            Channels::Rgb => self
                .data
                .chunks_exact(3)
                .map(|px| {
                    let luma = LUMA_R * px[0] as f64 + LUMA_G * px[1] as f64 + LUMA_B * px[2] as f64;
                    luma as u8
                })
                .collect(),
        };
        RasterImage {
            width: self.width,
            height: self.height,
            channels: Channels::Gray,
            data,
        }
    }

    /// RGB image with each gray value copied into all three channels.
    /// RGB input is returned as a copy.
    pub fn to_rgb(&self) -> RasterImage {
        let data = match self.channels {
            Channels::Rgb => self.data.clone(),
            Channels::Gray => self.data.iter().flat_map(|&v| [v, v, v]).collect(),
        };
        RasterImage {
            width: self.width,
            height: self.height,
            channels: Channels::Rgb,
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_buffer_of_wrong_length() {
        let err = RasterImage::new(4, 4, Channels::Rgb, vec![0; 16]).unwrap_err();
        assert!(matches!(
            err,
            FilterError::BufferSizeMismatch {
                expected: 48,
                actual: 16
            }
        ));
    }

    #[test]
    fn rejects_zero_dimensions() {
        let err = RasterImage::gray(0, 3, Vec::new()).unwrap_err();
        assert!(matches!(err, FilterError::InvalidDimensions(0, 3)));
    }

    #[test]
    fn grayscale_uses_bt601_weights_and_truncates() {
        let rgb = RasterImage::new(3, 1, Channels::Rgb, vec![255, 0, 0, 0, 255, 0, 10, 20, 30]).unwrap();
        let gray = rgb.to_grayscale();

        assert_eq!(gray.channels(), Channels::Gray);
        // 0.299*255 = 76.245, 0.587*255 = 149.685, 2.99+11.74+3.42 = 18.15
        assert_eq!(gray.data(), &[76, 149, 18]);
    }

    #[test]
    fn gray_to_rgb_replicates_channels() {
        let gray = RasterImage::gray(2, 1, vec![7, 200]).unwrap();
        let rgb = gray.to_rgb();

        assert_eq!(rgb.channels(), Channels::Rgb);
        assert_eq!(rgb.data(), &[7, 7, 7, 200, 200, 200]);
    }
}
