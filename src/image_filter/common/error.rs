use std::fmt;

use thiserror::Error;

/// Stage of a device execution that reported a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStage {
    Load,
    Allocate,
    Upload,
    Launch,
    Synchronize,
    Download,
}

impl fmt::Display for DeviceStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeviceStage::Load => "module load",
            DeviceStage::Allocate => "allocate",
            DeviceStage::Upload => "upload",
            DeviceStage::Launch => "launch",
            DeviceStage::Synchronize => "synchronize",
            DeviceStage::Download => "download",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum FilterError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to read kernel source: {0}")]
    KernelSourceError(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Malformed image: {0}")]
    FormatError(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("Invalid convolution kernel: {0}")]
    InvalidKernel(String),

    #[error("No compute device available: {0}")]
    DeviceUnavailable(String),

    #[error("Device program failed to build:\n{log}")]
    CompileError { log: String },

    #[error("Device {stage} failed: {message}")]
    DeviceError { stage: DeviceStage, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FilterError {
    pub(crate) fn device(stage: DeviceStage, err: impl fmt::Debug) -> Self {
        FilterError::DeviceError {
            stage,
            message: format!("{:?}", err),
        }
    }
}

pub type Result<T> = std::result::Result<T, FilterError>;
