//! Zero-padded convolution over a flat working grid.
//!
//! The source image is copied into the interior of a grid that is
//! `radius` pixels larger on every side and filled with zeros, so every
//! neighbourhood read is in bounds and out-of-image taps contribute 0.
//! Sums are accumulated in `f32`, rows outer and columns inner, and narrowed
//! with [`narrow_truncating`].

use tracing::trace;

use crate::image_filter::common::error::{FilterError, Result};
use crate::image_filter::convolution::kernel::ConvolutionKernel;

/// Truncates toward zero, then keeps the low 8 bits.
///
/// 400.0 becomes 144 and -100.0 becomes 156. A plain `as u8` would saturate.
pub fn narrow_truncating(sum: f32) -> u8 {
    sum as i32 as u8
}

/// Zero-initialized `(height + 2r) x (width + 2r)` grid holding a copy of
/// the image at offset `(r, r)`.
#[derive(Debug)]
pub struct PaddedGrid {
    data: Vec<u8>,
    stride: usize,
    rows: usize,
}

impl PaddedGrid {
    /// `input` must hold exactly `width * height` bytes.
    ///
    /// # Panics
    ///
    /// Panics if `width` is zero.
    pub fn from_image(input: &[u8], width: usize, height: usize, radius: usize) -> Self {
        let stride = width + 2 * radius;
        let rows = height + 2 * radius;
        let mut data = vec![0u8; stride * rows];

        for (y, src_row) in input.chunks_exact(width).take(height).enumerate() {
            let start = (y + radius) * stride + radius;
            data[start..start + width].copy_from_slice(src_row);
        }

        Self { data, stride, rows }
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.data[row * self.stride + col]
    }
}

/// Convolves a single-channel `width x height` image into `output`.
///
/// Both buffers must be exactly `width * height` bytes.
pub fn convolve(
    input: &[u8],
    output: &mut [u8],
    width: usize,
    height: usize,
    kernel: &ConvolutionKernel,
) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(FilterError::InvalidDimensions(width, height));
    }
    let pixel_count = width * height;
    for len in [input.len(), output.len()] {
        if len != pixel_count {
            return Err(FilterError::BufferSizeMismatch {
                expected: pixel_count,
                actual: len,
            });
        }
    }

    let side = kernel.side();
    let grid = PaddedGrid::from_image(input, width, height, kernel.radius());
    trace!(stride = grid.stride(), rows = grid.rows(), "Padded grid ready");

    for (y, out_row) in output.chunks_exact_mut(width).enumerate() {
        for (x, out) in out_row.iter_mut().enumerate() {
            let mut sum = 0.0f32;
            for ky in 0..side {
                for kx in 0..side {
                    sum += grid.get(y + ky, x + kx) as f32 * kernel.weight(ky, kx);
                }
            }
            *out = narrow_truncating(sum);
        }
    }

    Ok(())
}
