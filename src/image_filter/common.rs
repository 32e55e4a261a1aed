//! Common utilities module
//!
//! Shared error type used by every stage of the filter benchmark.

pub mod error;

pub use error::{DeviceStage, FilterError, Result};
