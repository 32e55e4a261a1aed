//! Convolution module
//!
//! The border-padded manual engine and the `imageproc` library path.

mod kernel;
mod padded;
mod manual;
mod library;

pub use kernel::ConvolutionKernel;
pub use padded::{PaddedGrid, convolve, narrow_truncating};
pub use manual::ManualConvolution;
pub use library::LibraryConvolution;
