//! CSV output backend.
//!
//! Creates `metrics.csv` in the configured output directory with one row
//! per tick: `tick`, `year`, then the metric columns in model order.

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use ce_sim::{COLUMNS, MetricsRow, TimeSeries};
use csv::Writer;

use crate::OutputResult;
use crate::writer::MetricsWriter;

/// File name written inside the output directory.
pub const METRICS_FILE: &str = "metrics.csv";

/// Writes model metrics to a CSV file.
pub struct CsvWriter {
    path:     PathBuf,
    metrics:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open `metrics.csv` in it, and write the
    /// header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;
        let path = dir.join(METRICS_FILE);
        let mut metrics = Writer::from_path(&path)?;

        let mut header = vec!["tick", "year"];
        header.extend(COLUMNS);
        metrics.write_record(&header)?;

        Ok(Self { path, metrics, finished: false })
    }

    /// Path of the metrics file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a whole series and flush.
    pub fn write_series(&mut self, series: &TimeSeries) -> OutputResult<()> {
        for row in series.rows() {
            self.write_row(row)?;
        }
        self.finish()
    }
}

impl MetricsWriter for CsvWriter {
    fn write_row(&mut self, row: &MetricsRow) -> OutputResult<()> {
        let mut record = vec![row.tick.0.to_string(), row.year.to_string()];
        record.extend(row.values().iter().map(f64::to_string));
        self.metrics.write_record(&record)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.metrics.flush()?;
        Ok(())
    }
}
