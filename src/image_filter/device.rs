//! Device offload module
//!
//! Runs the filter as a CUDA kernel compiled at runtime with NVRTC from an
//! external source file.

mod config;
mod source;
mod executor;

pub use config::DeviceConfig;
pub use source::{build_options, load_kernel_source};
pub use executor::DeviceExecutor;
