//! `ce-output`: writes model time series to disk.
//!
//! | Backend | Files created  |
//! |---------|----------------|
//! | CSV     | `metrics.csv`  |
//!
//! Backends implement [`MetricsWriter`] and are driven either after the run
//! ([`CsvWriter::write_series`]) or during it by [`TimeSeriesObserver`],
//! which implements `ce_sim::ModelObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ce_output::{CsvWriter, TimeSeriesObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = TimeSeriesObserver::new(writer);
//! model.run_with(50, true, &mut obs)?;
//! if let Some(e) = obs.take_error() { eprintln!("output error: {e}"); }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::{CsvWriter, METRICS_FILE};
pub use error::{OutputError, OutputResult};
pub use observer::TimeSeriesObserver;
pub use writer::MetricsWriter;
