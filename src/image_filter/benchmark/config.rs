//! Benchmark configuration types

use std::path::PathBuf;

use crate::image_filter::convolution::ConvolutionKernel;
use crate::image_filter::device::DeviceConfig;
use crate::image_filter::raster::InputFormat;

/// Width and height every phase is sized for.
pub const DEFAULT_DIMENSIONS: (usize, usize) = (512, 512);

/// Configuration for one benchmark run
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    /// Image file read at the start of the run
    pub input_path: PathBuf,
    /// Encoding of `input_path`
    pub input_format: InputFormat,
    /// Directory receiving one output image per phase (created if missing)
    pub result_dir: PathBuf,
    /// Required input size; `None` accepts any size
    pub expected_dimensions: Option<(usize, usize)>,
    /// Filter applied by every phase
    pub kernel: ConvolutionKernel,
    /// Whether the CUDA phase runs
    pub device: bool,
    /// Device acquisition and program settings
    pub device_config: DeviceConfig,
    /// Whether the `imageproc` phase runs
    pub library: bool,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("input/cat.ppm"),
            input_format: InputFormat::Ppm,
            result_dir: PathBuf::from("result"),
            expected_dimensions: Some(DEFAULT_DIMENSIONS),
            kernel: ConvolutionKernel::edge_detection(),
            device: true,
            device_config: DeviceConfig::default(),
            library: true,
        }
    }
}

impl BenchmarkConfig {
    pub fn builder() -> BenchmarkConfigBuilder {
        BenchmarkConfigBuilder::default()
    }
}

/// Builder for BenchmarkConfig
#[derive(Default)]
pub struct BenchmarkConfigBuilder {
    input_path: Option<PathBuf>,
    input_format: Option<InputFormat>,
    result_dir: Option<PathBuf>,
    expected_dimensions: Option<Option<(usize, usize)>>,
    kernel: Option<ConvolutionKernel>,
    device: Option<bool>,
    device_config: Option<DeviceConfig>,
    library: Option<bool>,
}

impl BenchmarkConfigBuilder {
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    pub fn input_format(mut self, format: InputFormat) -> Self {
        self.input_format = Some(format);
        self
    }

    pub fn result_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.result_dir = Some(dir.into());
        self
    }

    pub fn expected_dimensions(mut self, dimensions: Option<(usize, usize)>) -> Self {
        self.expected_dimensions = Some(dimensions);
        self
    }

    pub fn kernel(mut self, kernel: ConvolutionKernel) -> Self {
        self.kernel = Some(kernel);
        self
    }

    pub fn device(mut self, enable: bool) -> Self {
        self.device = Some(enable);
        self
    }

    pub fn device_config(mut self, config: DeviceConfig) -> Self {
        self.device_config = Some(config);
        self
    }

    pub fn library(mut self, enable: bool) -> Self {
        self.library = Some(enable);
        self
    }

    pub fn build(self) -> BenchmarkConfig {
        let default = BenchmarkConfig::default();
        BenchmarkConfig {
            input_path: self.input_path.unwrap_or(default.input_path),
            input_format: self.input_format.unwrap_or(default.input_format),
            result_dir: self.result_dir.unwrap_or(default.result_dir),
            expected_dimensions: self.expected_dimensions.unwrap_or(default.expected_dimensions),
            kernel: self.kernel.unwrap_or(default.kernel),
            device: self.device.unwrap_or(default.device),
            device_config: self.device_config.unwrap_or(default.device_config),
            library: self.library.unwrap_or(default.library),
        }
    }
}
