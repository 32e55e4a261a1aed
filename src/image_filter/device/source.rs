use std::path::Path;

use tracing::debug;

use crate::image_filter::common::error::{FilterError, Result};
use crate::image_filter::convolution::ConvolutionKernel;

/// Reads the kernel program text. A missing or unreadable file is an error.
pub fn load_kernel_source(path: &Path) -> Result<String> {
    let source = std::fs::read_to_string(path)
        .map_err(|e| FilterError::KernelSourceError(format!("{}: {}", path.display(), e)))?;
    debug!("Loaded kernel source {} ({} bytes)", path.display(), source.len());
    Ok(source)
}

/// NVRTC preprocessor definitions describing the image and filter.
pub fn build_options(width: usize, height: usize, kernel: &ConvolutionKernel) -> Vec<String> {
    let weights = kernel
        .weights()
        .iter()
        .map(|w| format!("{:?}f", w))
        .collect::<Vec<_>>()
        .join(",");

    vec![
        format!("-DIMAGE_WIDTH={}", width),
        format!("-DIMAGE_HEIGHT={}", height),
        format!("-DFILTER_SIDE={}", kernel.side()),
        format!("-DFILTER_WEIGHTS={{{}}}", weights),
    ]
}
