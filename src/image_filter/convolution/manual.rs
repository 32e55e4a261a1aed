use tracing::debug;

use crate::image_filter::common::error::{FilterError, Result};
use crate::image_filter::convolution::kernel::ConvolutionKernel;
use crate::image_filter::convolution::padded::convolve;
use crate::image_filter::raster::types::{Channels, RasterImage};

/// Host-side nested-loop convolution with zero padding.
pub struct ManualConvolution {
    kernel: ConvolutionKernel,
}

impl ManualConvolution {
    pub fn new(kernel: ConvolutionKernel) -> Self {
        Self { kernel }
    }

    /// Filters into a caller-owned buffer of `width * height` bytes.
    pub fn run(&self, input: &[u8], output: &mut [u8], width: usize, height: usize) -> Result<()> {
        convolve(input, output, width, height, &self.kernel)
    }

    pub fn apply(&self, image: &RasterImage) -> Result<RasterImage> {
        if image.channels() != Channels::Gray {
            return Err(FilterError::UnsupportedFormat(
                "manual convolution expects a single-channel image".to_string(),
            ));
        }
        debug!(
            "Manual {}x{} convolution on {}x{} image",
            self.kernel.side(),
            self.kernel.side(),
            image.width(),
            image.height()
        );

        let mut output = vec![0u8; image.pixel_count()];
        self.run(image.data(), &mut output, image.width(), image.height())?;
        RasterImage::gray(image.width(), image.height(), output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_keeps_dimensions() {
        let image = RasterImage::gray(6, 4, vec![3; 24]).unwrap();
        let filtered = ManualConvolution::new(ConvolutionKernel::edge_detection())
            .apply(&image)
            .unwrap();

        assert_eq!(filtered.width(), 6);
        assert_eq!(filtered.height(), 4);
        assert_eq!(filtered.channels(), Channels::Gray);
        assert_eq!(filtered.data()[0], 9);
    }

    #[test]
    fn rejects_rgb_input() {
        let image = RasterImage::new(2, 2, Channels::Rgb, vec![0; 12]).unwrap();
        let err = ManualConvolution::new(ConvolutionKernel::edge_detection())
            .apply(&image)
            .unwrap_err();
        assert!(matches!(err, FilterError::UnsupportedFormat(_)));
    }
}
