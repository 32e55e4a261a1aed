use std::sync::Arc;

use cudarc::driver::sys as driver_sys;
use cudarc::driver::{CudaContext, CudaFunction, CudaModule, CudaSlice, CudaStream, LaunchConfig, PushKernelArg};
use cudarc::nvrtc::sys as nvrtc_sys;
use cudarc::nvrtc::{CompileError, CompileOptions, compile_ptx_with_opts};
use tracing::{debug, instrument, warn};

use super::config::DeviceConfig;
use super::source::{build_options, load_kernel_source};
use crate::image_filter::common::error::{DeviceStage, FilterError, Result};
use crate::image_filter::convolution::ConvolutionKernel;

/// CUDA context, stream, compiled `myFilter` and its two pixel buffers.
///
/// Exists only in the initialized state. `execute` takes `&mut self`, so a
/// single execution is in flight at a time. Resources are freed by
/// [`DeviceExecutor::release`] or when the value goes out of scope; the
/// field order below is the release order.
pub struct DeviceExecutor {
    input: CudaSlice<u8>,
    output: CudaSlice<u8>,
    module: Arc<CudaModule>,
    function: CudaFunction,
    stream: Arc<CudaStream>,
    ctx: Arc<CudaContext>,
    ordinal: usize,
    device_name: String,
    pixel_count: usize,
    threads_per_block: u32,
}

/// Largest image `myFilter` can index; the kernel computes pixel offsets in `int`.
pub const MAX_PIXELS: usize = i32::MAX as usize;

// cudarc panics on the first call into a shared library it cannot open, so
// both libraries are checked before anything is called through them.
fn driver_library_present() -> bool {
    // Only tries to open and close the library.
    unsafe { driver_sys::is_culib_present() }
}

fn nvrtc_library_present() -> bool {
    unsafe { nvrtc_sys::is_culib_present() }
}

fn require_library(library: &str, present: bool) -> Result<()> {
    if present {
        Ok(())
    } else {
        Err(FilterError::DeviceUnavailable(format!(
            "the {} library could not be loaded",
            library
        )))
    }
}

fn acquire_device(config: &DeviceConfig) -> Result<(usize, Arc<CudaContext>)> {
    require_library("CUDA driver", driver_library_present())?;
    let count = CudaContext::device_count().map_err(|e| FilterError::DeviceUnavailable(format!("{:?}", e)))?;
    if count <= 0 {
        return Err(FilterError::DeviceUnavailable("no CUDA devices found".to_string()));
    }
    debug!("{} CUDA device(s) visible", count);

    let primary = match CudaContext::new(config.preferred_ordinal) {
        Ok(ctx) => return Ok((config.preferred_ordinal, ctx)),
        Err(e) => e,
    };
    let Some(fallback) = config.fallback_ordinal else {
        return Err(FilterError::DeviceUnavailable(format!(
            "device {}: {:?}",
            config.preferred_ordinal, primary
        )));
    };

    warn!(
        "Device {} unavailable ({:?}), falling back to device {}",
        config.preferred_ordinal, primary, fallback
    );
    CudaContext::new(fallback)
        .map(|ctx| (fallback, ctx))
        .map_err(|e| {
            FilterError::DeviceUnavailable(format!(
                "device {}: {:?}; device {}: {:?}",
                config.preferred_ordinal, primary, fallback, e
            ))
        })
}

fn compile_failure(err: CompileError) -> FilterError {
    let log = match err {
        CompileError::CompileError { log, .. } => log.to_string_lossy().into_owned(),
        other => format!("{:?}", other),
    };
    FilterError::CompileError { log }
}

impl DeviceExecutor {
    /// Acquires a device, builds the program for a `width x height` image and
    /// allocates both device buffers.
    ///
    /// Every failure is returned as an error; anything acquired before the
    /// failing step is dropped on the way out.
    #[instrument(skip(config, kernel), fields(source = %config.kernel_source_path.display()))]
    pub fn initialize(
        config: &DeviceConfig,
        kernel: &ConvolutionKernel,
        width: usize,
        height: usize,
    ) -> Result<Self> {
        let pixel_count = width
            .checked_mul(height)
            .filter(|&n| n > 0 && n <= MAX_PIXELS)
            .ok_or(FilterError::InvalidDimensions(width, height))?;

        let (ordinal, ctx) = acquire_device(config)?;
        let device_name = ctx.name().unwrap_or_else(|_| "unknown".to_string());
        debug!("Using CUDA device {} ({})", ordinal, device_name);
        let stream = ctx.default_stream();

        let source = load_kernel_source(&config.kernel_source_path)?;
        let options = CompileOptions {
            // Keeps a*b+c as two roundings, like the host loop.
            fmad: Some(false),
            options: build_options(width, height, kernel),
            ..Default::default()
        };
        debug!(nvrtc_options = ?options.options, "Compiling kernel source");
        require_library("NVRTC", nvrtc_library_present())?;
        let ptx = compile_ptx_with_opts(&source, options).map_err(compile_failure)?;

        let module = ctx
            .load_module(ptx)
            .map_err(|e| FilterError::device(DeviceStage::Load, e))?;
        let function = module
            .load_function(&config.entry_point)
            .map_err(|e| FilterError::DeviceError {
                stage: DeviceStage::Load,
                message: format!("entry point {:?}: {:?}", config.entry_point, e),
            })?;

        let input = stream
            .alloc_zeros::<u8>(pixel_count)
            .map_err(|e| FilterError::device(DeviceStage::Allocate, e))?;
        let output = stream
            .alloc_zeros::<u8>(pixel_count)
            .map_err(|e| FilterError::device(DeviceStage::Allocate, e))?;

        debug!("Allocated two {} byte device buffers", pixel_count);

        Ok(Self {
            input,
            output,
            module,
            function,
            stream,
            ctx,
            ordinal,
            device_name,
            pixel_count,
            threads_per_block: config.threads_per_block.max(1),
        })
    }

    /// Uploads `input`, runs one work-item per pixel, waits, and downloads the
    /// result into `output`. Both slices must be `pixel_count()` bytes.
    pub fn execute(&mut self, input: &[u8], output: &mut [u8]) -> Result<()> {
        for len in [input.len(), output.len()] {
            if len != self.pixel_count {
                return Err(FilterError::BufferSizeMismatch {
                    expected: self.pixel_count,
                    actual: len,
                });
            }
        }

        self.stream
            .memcpy_htod(input, &mut self.input)
            .map_err(|e| FilterError::device(DeviceStage::Upload, e))?;

        let total = self.pixel_count as u32;
        let cfg = LaunchConfig {
            grid_dim: (total.div_ceil(self.threads_per_block), 1, 1),
            block_dim: (self.threads_per_block, 1, 1),
            shared_mem_bytes: 0,
        };
        let mut launch = self.stream.launch_builder(&self.function);
        launch.arg(&self.input);
        launch.arg(&mut self.output);
        unsafe { launch.launch(cfg) }.map_err(|e| FilterError::device(DeviceStage::Launch, e))?;

        self.stream
            .synchronize()
            .map_err(|e| FilterError::device(DeviceStage::Synchronize, e))?;

        self.stream
            .memcpy_dtoh(&self.output, output)
            .map_err(|e| FilterError::device(DeviceStage::Download, e))?;

        Ok(())
    }

    /// Frees buffers, module, function, stream and context, in that order.
    pub fn release(self) {
        debug!("Releasing CUDA device {}", self.ordinal);
        let DeviceExecutor {
            input,
            output,
            module,
            function,
            stream,
            ctx,
            ..
        } = self;
        drop(input);
        drop(output);
        drop(module);
        drop(function);
        drop(stream);
        drop(ctx);
    }

    pub fn pixel_count(&self) -> usize {
        self.pixel_count
    }

    pub fn device_ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }
}
