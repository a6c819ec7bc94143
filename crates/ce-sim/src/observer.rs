//! Observer trait for progress reporting and data collection.

use ce_core::Tick;

use crate::MetricsRow;

/// Callbacks invoked by [`Model::run_with`][crate::Model::run_with] at tick
/// boundaries.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct Progress;
///
/// impl ModelObserver for Progress {
///     fn on_tick_end(&mut self, row: &MetricsRow) {
///         println!("{}: leakage {:.2}", row.year, row.amount_leakage);
///     }
/// }
/// ```
pub trait ModelObserver {
    /// Called at the start of each tick, before the acquire stage.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the update stage with the row just recorded.
    fn on_tick_end(&mut self, _row: &MetricsRow) {}

    /// Called once after the last tick of a run.
    fn on_run_end(&mut self, _final_tick: Tick) {}
}

/// A [`ModelObserver`] that does nothing.
pub struct NoopObserver;

impl ModelObserver for NoopObserver {}
