//! Device offload configuration

use std::path::PathBuf;

/// Name of the entry point the kernel source must define.
pub const DEFAULT_ENTRY_POINT: &str = "myFilter";

/// Settings for acquiring a device and building the filter program
#[derive(Debug, Clone)]
pub struct DeviceConfig {
    /// Path of the CUDA C source compiled at initialization
    pub kernel_source_path: PathBuf,
    /// Kernel function looked up after the module loads
    pub entry_point: String,
    /// Device ordinal tried first
    pub preferred_ordinal: usize,
    /// Device ordinal tried when the preferred one cannot be acquired
    pub fallback_ordinal: Option<usize>,
    /// Threads per block of the one-dimensional launch
    pub threads_per_block: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            kernel_source_path: PathBuf::from("kernels/my_filter.cu"),
            entry_point: DEFAULT_ENTRY_POINT.to_string(),
            preferred_ordinal: 0,
            fallback_ordinal: Some(1),
            threads_per_block: 256,
        }
    }
}
