//! The `MetricsWriter` trait implemented by output backends.

use ce_sim::MetricsRow;

use crate::OutputResult;

pub trait MetricsWriter {
    /// Write one metrics row.
    fn write_row(&mut self, row: &MetricsRow) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent: safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
