//! Library-optimized 3x3 filter backed by `imageproc`.
//!
//! `imageproc::filter::filter3x3` correlates with a row-major kernel, clamps
//! reads at the image edge and saturates the result to `0..=255`. Its output
//! therefore differs from the manual engine along the border and wherever
//! the sum leaves the byte range.

use image::{GrayImage, Luma};
use imageproc::filter::filter3x3;
use tracing::debug;

use crate::image_filter::common::error::{FilterError, Result};
use crate::image_filter::convolution::kernel::ConvolutionKernel;
use crate::image_filter::raster::types::{Channels, RasterImage};

pub struct LibraryConvolution {
    kernel: ConvolutionKernel,
}

impl LibraryConvolution {
    /// Only 3x3 kernels are supported.
    pub fn new(kernel: ConvolutionKernel) -> Result<Self> {
        if kernel.side() != 3 {
            return Err(FilterError::InvalidKernel(format!(
                "library filter needs a 3x3 kernel, got {}x{}",
                kernel.side(),
                kernel.side()
            )));
        }
        Ok(Self { kernel })
    }

    pub fn apply(&self, image: &RasterImage) -> Result<RasterImage> {
        if image.channels() != Channels::Gray {
            return Err(FilterError::UnsupportedFormat(
                "library convolution expects a single-channel image".to_string(),
            ));
        }
        let (width, height) = (image.width(), image.height());
        debug!("imageproc filter3x3 on {}x{} image", width, height);

        let source = GrayImage::from_raw(width as u32, height as u32, image.data().to_vec())
            .ok_or(FilterError::InvalidDimensions(width, height))?;
        let filtered = filter3x3::<Luma<u8>, f32, u8>(&source, self.kernel.weights());

        RasterImage::gray(width, height, filtered.into_raw())
    }
}
