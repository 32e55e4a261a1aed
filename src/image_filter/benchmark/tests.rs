use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::image_filter::benchmark::config::BenchmarkConfig;
use crate::image_filter::benchmark::harness::{FilterBenchmark, LIBRARY_PHASE, MANUAL_PHASE};
use crate::image_filter::common::error::{FilterError, Result};
use crate::image_filter::convolution::{ConvolutionKernel, ManualConvolution};
use crate::image_filter::device::DeviceConfig;
use crate::image_filter::raster::{Channels, ImageReader, ImageWriter, PpmReader, PpmWriter, RasterImage};

struct MockReader {
    should_fail: bool,
    mock_data: Option<RasterImage>,
}

impl ImageReader for MockReader {
    fn read_image(&self, _data: &[u8]) -> Result<RasterImage> {
        if self.should_fail {
            return Err(FilterError::DecodeError("Mock decode error".to_string()));
        }
        Ok(self.mock_data.clone().unwrap_or_else(|| {
            let data = (0..8 * 8 * 3).map(|i| (i % 251) as u8).collect();
            RasterImage::new(8, 8, Channels::Rgb, data).unwrap()
        }))
    }
}

struct MockWriter {
    should_fail: bool,
    written_data: Arc<Mutex<Vec<RasterImage>>>,
}

impl ImageWriter for MockWriter {
    fn write_image(&self, image: &RasterImage, _output: &mut dyn Write) -> Result<()> {
        if self.should_fail {
            return Err(FilterError::OutputWriteError("Mock encode error".to_string()));
        }
        self.written_data.lock().unwrap().push(image.clone());
        Ok(())
    }
}

fn host_only_config(dir: &std::path::Path) -> BenchmarkConfig {
    BenchmarkConfig::builder()
        .input_path(dir.join("input.ppm"))
        .result_dir(dir.join("result"))
        .expected_dimensions(None)
        .device(false)
        .build()
}

fn write_input(dir: &std::path::Path, image: &RasterImage) {
    let mut file = std::fs::File::create(dir.join("input.ppm")).unwrap();
    PpmWriter.write_image(image, &mut file).unwrap();
}

#[test]
fn test_config_builder() {
    let config = BenchmarkConfig::builder()
        .result_dir("out")
        .expected_dimensions(Some((64, 32)))
        .device(false)
        .library(false)
        .build();

    assert_eq!(config.result_dir, PathBuf::from("out"));
    assert_eq!(config.expected_dimensions, Some((64, 32)));
    assert!(!config.device);
    assert!(!config.library);
    assert_eq!(config.input_path, PathBuf::from("input/cat.ppm"));
    assert_eq!(config.kernel, ConvolutionKernel::edge_detection());
}

#[test]
fn test_default_config_matches_fixed_constants() {
    let config = BenchmarkConfig::default();

    assert_eq!(config.expected_dimensions, Some((512, 512)));
    assert!(config.device);
    assert_eq!(config.device_config.entry_point, "myFilter");
    assert_eq!(config.device_config.preferred_ordinal, 0);
    assert_eq!(config.device_config.fallback_ordinal, Some(1));
}

#[test]
fn test_successful_run_writes_each_phase() {
    let dir = tempfile::tempdir().unwrap();
    let written = Arc::new(Mutex::new(Vec::new()));
    std::fs::write(dir.path().join("input.ppm"), b"ignored by mock").unwrap();

    let benchmark = FilterBenchmark::with_custom(
        MockReader { should_fail: false, mock_data: None },
        MockWriter { should_fail: false, written_data: written.clone() },
        host_only_config(dir.path()),
    );

    let report = benchmark.run().unwrap();

    assert_eq!(report.timings.call_count(), 2);
    let phases: Vec<_> = report.timings.reports().iter().map(|r| r.name.as_str()).collect();
    assert_eq!(phases, vec![MANUAL_PHASE, LIBRARY_PHASE]);

    let written = written.lock().unwrap();
    assert_eq!(written.len(), 2);
    assert!(written.iter().all(|img| img.channels() == Channels::Rgb));
    assert!(dir.path().join("result/manual_output.ppm").exists());
    assert!(dir.path().join("result/library_output.ppm").exists());
}

#[test]
fn test_reader_failure() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("input.ppm"), b"x").unwrap();

    let benchmark = FilterBenchmark::with_custom(
        MockReader { should_fail: true, mock_data: None },
        MockWriter { should_fail: false, written_data: Arc::new(Mutex::new(Vec::new())) },
        host_only_config(dir.path()),
    );

    let err = benchmark.run().unwrap_err();
    assert!(matches!(err, FilterError::DecodeError(_)));
}

#[test]
fn test_writer_failure() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("input.ppm"), b"x").unwrap();

    let benchmark = FilterBenchmark::with_custom(
        MockReader { should_fail: false, mock_data: None },
        MockWriter { should_fail: true, written_data: Arc::new(Mutex::new(Vec::new())) },
        host_only_config(dir.path()),
    );

    let err = benchmark.run().unwrap_err();
    assert!(matches!(err, FilterError::OutputWriteError(_)));
}

#[test]
fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let benchmark = FilterBenchmark::new(host_only_config(dir.path()));

    let err = benchmark.run().unwrap_err();
    assert!(matches!(err, FilterError::InputReadError(msg) if msg.contains("input.ppm")));
}

#[test]
fn test_dimension_validation_failure() {
    let image = RasterImage::gray(10, 12, vec![0; 120]).unwrap();
    let config = BenchmarkConfig::builder()
        .expected_dimensions(Some((512, 512)))
        .device(false)
        .build();

    let err = FilterBenchmark::new(config).run_on(&image).unwrap_err();
    assert!(matches!(err, FilterError::InvalidDimensions(10, 12)));
}

#[test]
fn test_dimension_validation_success() {
    let image = RasterImage::gray(10, 12, vec![0; 120]).unwrap();
    let config = BenchmarkConfig::builder()
        .expected_dimensions(Some((10, 12)))
        .device(false)
        .library(false)
        .build();

    let report = FilterBenchmark::new(config).run_on(&image).unwrap();
    assert_eq!(report.outputs.len(), 1);
    assert!(report.outputs[0].image.data().iter().all(|&v| v == 0));
}

#[test]
fn test_run_on_feeds_grayscale_to_every_phase() {
    let rgb = RasterImage::new(3, 2, Channels::Rgb, vec![90; 18]).unwrap();
    let config = BenchmarkConfig::builder()
        .expected_dimensions(None)
        .device(false)
        .build();

    let report = FilterBenchmark::new(config).run_on(&rgb).unwrap();

    let expected = ManualConvolution::new(ConvolutionKernel::edge_detection())
        .apply(&rgb.to_grayscale())
        .unwrap();
    let manual = report.output(MANUAL_PHASE).unwrap();
    assert_eq!(manual.image, expected);
    assert_eq!(report.output(LIBRARY_PHASE).unwrap().image.channels(), Channels::Gray);
    assert!(report.output("Device").is_none());
}

#[test]
fn test_end_to_end_with_ppm_files() {
    let dir = tempfile::tempdir().unwrap();
    let data: Vec<u8> = (0..16 * 9 * 3).map(|i| (i * 7 % 256) as u8).collect();
    let input = RasterImage::new(16, 9, Channels::Rgb, data).unwrap();
    write_input(dir.path(), &input);

    let benchmark = FilterBenchmark::new(host_only_config(dir.path()));
    let report = benchmark.run().unwrap();

    let bytes = std::fs::read(dir.path().join("result/manual_output.ppm")).unwrap();
    let written = PpmReader.read_image(&bytes).unwrap();
    let manual = report.output(MANUAL_PHASE).unwrap();

    assert_eq!(written.width(), 16);
    assert_eq!(written.height(), 9);
    assert_eq!(written, manual.image.to_rgb());
    assert_eq!(written.to_grayscale().width(), 16);
}

#[test]
fn test_device_phase_failure_aborts_the_run() {
    let dir = tempfile::tempdir().unwrap();
    write_input(dir.path(), &RasterImage::gray(4, 4, vec![1; 16]).unwrap());

    let config = BenchmarkConfig::builder()
        .input_path(dir.path().join("input.ppm"))
        .result_dir(dir.path().join("result"))
        .expected_dimensions(None)
        .device_config(DeviceConfig {
            kernel_source_path: dir.path().join("missing.cu"),
            ..DeviceConfig::default()
        })
        .build();

    let err = FilterBenchmark::new(config).run().unwrap_err();

    assert!(matches!(
        err,
        FilterError::KernelSourceError(_) | FilterError::DeviceUnavailable(_)
    ));
    assert!(!dir.path().join("result/manual_output.ppm").exists());
}
