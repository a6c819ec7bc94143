//! `TimeSeriesObserver<W>`: bridges `ModelObserver` to a `MetricsWriter`.

use ce_core::Tick;
use ce_sim::{MetricsRow, ModelObserver};
use log::warn;

use crate::writer::MetricsWriter;
use crate::{OutputError, OutputResult};

/// A [`ModelObserver`] that streams every recorded row to a
/// [`MetricsWriter`] backend as the model runs.
///
/// Errors from the writer are stored internally because `ModelObserver`
/// methods have no return value.  After `model.run_with()` returns, check
/// for errors with [`take_error`][Self::take_error].
pub struct TimeSeriesObserver<W: MetricsWriter> {
    writer:     W,
    rows:       usize,
    last_error: Option<OutputError>,
}

impl<W: MetricsWriter> TimeSeriesObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, rows: 0, last_error: None }
    }

    /// Take the stored write error (if any).
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Rows successfully written so far.
    pub fn rows_written(&self) -> usize {
        self.rows
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!("metrics output failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: MetricsWriter> ModelObserver for TimeSeriesObserver<W> {
    fn on_tick_end(&mut self, row: &MetricsRow) {
        let result = self.writer.write_row(row);
        if result.is_ok() {
            self.rows += 1;
        }
        self.store_err(result);
    }

    fn on_run_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
