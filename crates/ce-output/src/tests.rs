//! Integration tests for ce-output.

#[cfg(test)]
mod csv_tests {
    use ce_core::Tick;
    use ce_sim::{COLUMNS, MetricsRow, TimeSeries};
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::writer::MetricsWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn row(tick: u64) -> MetricsRow {
        MetricsRow {
            tick:                  Tick(tick),
            year:                  2020 + tick as i32,
            amount_virgin:         3.5,
            amount_recyclate_high: 0.25,
            amount_recyclate_low:  0.25,
            amount_reused_parts:   1,
            amount_standard_parts: 3,
            amount_leakage:        0.125,
            price_virgin:          2.5,
            price_recyclate:       2.75,
        }
    }

    #[test]
    fn csv_file_created() {
        let dir = tmp();
        let w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("metrics.csv").exists());
        assert_eq!(w.path(), dir.path().join("metrics.csv"));
    }

    #[test]
    fn creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("baseline");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("metrics.csv").exists());
    }

    #[test]
    fn csv_header_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("metrics.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers[..2], ["tick", "year"]);
        assert_eq!(headers[2..], COLUMNS);
    }

    #[test]
    fn rows_written_in_order() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let mut series = TimeSeries::new();
        for t in 0..3 {
            series.push(row(t));
        }
        w.write_series(&series).unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("metrics.csv")).unwrap();
        let read: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read.len(), 3);
        assert_eq!(&read[2][0], "2");    // tick
        assert_eq!(&read[2][1], "2022"); // year
        assert_eq!(&read[0][2], "3.5");  // amount virgin
        assert_eq!(&read[0][5], "1");    // amount reused parts
        assert_eq!(&read[0][6], "3");    // amount standard parts
        assert_eq!(&read[0][7], "0.125"); // amount leakage
    }

    #[test]
    fn finish_is_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use ce_core::ModelConfig;
    use ce_sim::{MetricsRow, ModelBuilder};
    use tempfile::TempDir;

    use crate::{CsvWriter, MetricsWriter, OutputError, OutputResult, TimeSeriesObserver};

    /// A writer whose every call fails.
    struct Broken;

    impl MetricsWriter for Broken {
        fn write_row(&mut self, _row: &MetricsRow) -> OutputResult<()> {
            Err(OutputError::Io(std::io::Error::other("disk full")))
        }

        fn finish(&mut self) -> OutputResult<()> {
            Err(OutputError::Io(std::io::Error::other("still full")))
        }
    }

    fn small_model() -> ce_sim::Model {
        let mut cfg = ModelConfig::default();
        cfg.agent_counts.users = 30;
        ModelBuilder::new(cfg).build().unwrap()
    }

    #[test]
    fn streams_one_row_per_tick() {
        let dir: TempDir = tempfile::tempdir().unwrap();
        let mut obs = TimeSeriesObserver::new(CsvWriter::new(dir.path()).unwrap());
        let series = small_model().run_with(4, false, &mut obs).unwrap();
        assert!(obs.take_error().is_none());
        assert_eq!(obs.rows_written(), 4);

        let mut rdr = csv::Reader::from_path(dir.path().join("metrics.csv")).unwrap();
        let read: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read.len(), series.len());
        let leakage: f64 = read[3][7].parse().unwrap();
        assert_eq!(leakage, series.rows()[3].amount_leakage);
    }

    #[test]
    fn keeps_first_error_only() {
        let mut obs = TimeSeriesObserver::new(Broken);
        small_model().run_with(2, false, &mut obs).unwrap();
        let err = obs.take_error().unwrap();
        assert!(err.to_string().contains("disk full"), "{err}");
        assert!(obs.take_error().is_none());
        assert_eq!(obs.rows_written(), 0);
    }
}
