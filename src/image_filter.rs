//! Image filter benchmark module
//!
//! A 3x3 edge-detection filter implemented three ways (CUDA offload, a
//! zero-padded nested loop on the host, and `imageproc`), plus the raster
//! I/O and timing harness around them.

pub mod common;
pub mod raster;
pub mod convolution;
pub mod device;
pub mod benchmark;

pub use common::{
    DeviceStage,
    FilterError,
    Result,
};

pub use raster::{
    Channels,
    ImageReader,
    ImageWriter,
    InputFormat,
    PpmReader,
    PpmWriter,
    EncodedImageReader,
    RasterImage,
};

pub use convolution::{
    ConvolutionKernel,
    LibraryConvolution,
    ManualConvolution,
    PaddedGrid,
    convolve,
};

pub use device::{
    DeviceConfig,
    DeviceExecutor,
};

pub use benchmark::{
    BenchmarkConfig,
    BenchmarkConfigBuilder,
    BenchmarkReport,
    FilterBenchmark,
    PhaseTimings,
    Timer,
};
