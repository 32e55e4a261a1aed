//! Benchmark harness module
//!
//! Configuration, the shared timing accumulator and the run orchestration
//! that feeds one grayscale buffer to every filter implementation.

mod config;
mod timing;
mod harness;

#[cfg(test)]
mod tests;

pub use config::{BenchmarkConfig, BenchmarkConfigBuilder, DEFAULT_DIMENSIONS};
pub use timing::{PhaseReport, PhaseTimings, Timer};
pub use harness::{BenchmarkReport, FilterBenchmark, PhaseOutput, DEVICE_PHASE, LIBRARY_PHASE, MANUAL_PHASE};
