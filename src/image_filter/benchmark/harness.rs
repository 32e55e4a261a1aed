use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::image_filter::{
    benchmark::config::BenchmarkConfig,
    benchmark::timing::{PhaseTimings, Timer},
    common::error::{FilterError, Result},
    convolution::{LibraryConvolution, ManualConvolution},
    device::DeviceExecutor,
    raster::{ImageReader, ImageWriter, InputFormat, PpmWriter, RasterImage},
};

pub const DEVICE_PHASE: &str = "Device";
pub const MANUAL_PHASE: &str = "Manual";
pub const LIBRARY_PHASE: &str = "Library";

/// Grayscale result of one phase and the file it is written to.
#[derive(Debug, Clone)]
pub struct PhaseOutput {
    pub phase: String,
    pub path: PathBuf,
    pub image: RasterImage,
}

#[derive(Debug)]
pub struct BenchmarkReport {
    pub timings: PhaseTimings,
    pub outputs: Vec<PhaseOutput>,
}

impl BenchmarkReport {
    pub fn output(&self, phase: &str) -> Option<&PhaseOutput> {
        self.outputs.iter().find(|o| o.phase == phase)
    }
}

/// Loads one image and times the device, manual and library filters on the
/// same grayscale buffer. Any failing stage aborts the run.
pub struct FilterBenchmark<R: ImageReader, W: ImageWriter> {
    reader: R,
    writer: W,
    config: BenchmarkConfig,
}

impl FilterBenchmark<InputFormat, PpmWriter> {
    pub fn new(config: BenchmarkConfig) -> Self {
        Self {
            reader: config.input_format,
            writer: PpmWriter,
            config,
        }
    }
}

impl<R: ImageReader, W: ImageWriter> FilterBenchmark<R, W> {
    pub fn with_custom(reader: R, writer: W, config: BenchmarkConfig) -> Self {
        Self {
            reader,
            writer,
            config,
        }
    }

    fn validate_dimensions(&self, width: usize, height: usize) -> Result<()> {
        match self.config.expected_dimensions {
            Some((w, h)) if (w, h) != (width, height) => {
                warn!("Image is {}x{}, expected {}x{}", width, height, w, h);
                Err(FilterError::InvalidDimensions(width, height))
            }
            _ => Ok(()),
        }
    }

    fn output_path(&self, phase: &str) -> PathBuf {
        self.config
            .result_dir
            .join(format!("{}_output.ppm", phase.to_lowercase()))
    }

    fn record(&self, timings: &mut PhaseTimings, timer: Timer) {
        let (name, duration) = timer.stop();
        let report = timings.record(name, duration);
        info!(
            phase = %report.name,
            seconds = report.duration.as_secs_f64(),
            "Phase complete"
        );
        println!("{}", report);
    }

    /// Reads `config.input_path`, runs every enabled phase and writes the
    /// results under `config.result_dir`.
    #[instrument(skip(self), fields(input = %self.config.input_path.display()))]
    pub fn run(&self) -> Result<BenchmarkReport> {
        let input_path = &self.config.input_path;

        {
            let _span = tracing::info_span!("create_result_dir").entered();
            std::fs::create_dir_all(&self.config.result_dir).map_err(|e| {
                FilterError::OutputWriteError(format!("{}: {}", self.config.result_dir.display(), e))
            })?;
        }

        let input_data = {
            let _span = tracing::info_span!("read_input_file").entered();
            std::fs::read(input_path)
                .map_err(|e| FilterError::InputReadError(format!("{}: {}", input_path.display(), e)))?
        };

        let image = {
            let _span = tracing::info_span!("decode_input").entered();
            self.reader.read_image(&input_data)?
        };

        let report = self.run_on(&image)?;
        self.write_outputs(&report)?;
        Ok(report)
    }

    /// Runs every enabled phase on an in-memory image. Nothing is written.
    pub fn run_on(&self, image: &RasterImage) -> Result<BenchmarkReport> {
        let (width, height) = (image.width(), image.height());
        self.validate_dimensions(width, height)?;

        let gray = image.to_grayscale();
        let kernel = &self.config.kernel;
        let mut timings = PhaseTimings::new();
        let mut outputs = Vec::new();

        info!("Filtering {}x{} image with {}x{} kernel", width, height, kernel.side(), kernel.side());

        if self.config.device {
            let _span = tracing::info_span!("device_phase").entered();
            let mut executor = DeviceExecutor::initialize(&self.config.device_config, kernel, width, height)?;
            info!(
                ordinal = executor.device_ordinal(),
                device = executor.device_name(),
                "Device phase ready"
            );
            let mut result = vec![0u8; gray.pixel_count()];

            let timer = Timer::start(DEVICE_PHASE);
            executor.execute(gray.data(), &mut result)?;
            self.record(&mut timings, timer);

            executor.release();
            outputs.push(self.phase_output(DEVICE_PHASE, RasterImage::gray(width, height, result)?));
        }

        {
            let _span = tracing::info_span!("manual_phase").entered();
            let manual = ManualConvolution::new(kernel.clone());
            let mut result = vec![0u8; gray.pixel_count()];

            let timer = Timer::start(MANUAL_PHASE);
            manual.run(gray.data(), &mut result, width, height)?;
            self.record(&mut timings, timer);

            outputs.push(self.phase_output(MANUAL_PHASE, RasterImage::gray(width, height, result)?));
        }

        if self.config.library {
            let _span = tracing::info_span!("library_phase").entered();
            let library = LibraryConvolution::new(kernel.clone())?;

            let timer = Timer::start(LIBRARY_PHASE);
            let result = library.apply(&gray)?;
            self.record(&mut timings, timer);

            outputs.push(self.phase_output(LIBRARY_PHASE, result));
        }

        Ok(BenchmarkReport { timings, outputs })
    }

    fn phase_output(&self, phase: &str, image: RasterImage) -> PhaseOutput {
        PhaseOutput {
            phase: phase.to_string(),
            path: self.output_path(phase),
            image,
        }
    }

    /// Writes each phase result as gray-replicated RGB.
    pub fn write_outputs(&self, report: &BenchmarkReport) -> Result<()> {
        let _span = tracing::info_span!("write_outputs").entered();
        for output in &report.outputs {
            self.write_image(&output.image, &output.path)?;
        }
        Ok(())
    }

    fn write_image(&self, image: &RasterImage, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .map_err(|e| FilterError::OutputWriteError(format!("{}: {}", path.display(), e)))?;
        self.writer.write_image(&image.to_rgb(), &mut file)?;
        debug!("Wrote {}", path.display());
        Ok(())
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }
}
