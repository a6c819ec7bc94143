//! `ce-sim`: builds the model and runs its tick loop.
//!
//! # Three-stage tick loop
//!
//! ```text
//! for tick in 0..steps:
//!   ① Acquire   every agent, in construction order, buys from its
//!               cheapest suppliers (first come, first served).
//!   ② Process   manufacture, drive, repair, dismantle, shred.
//!   ③ Update    reprice and replan from this tick's sales.
//!   ④ Collect   one MetricsRow over the fleet in use.
//! ```
//!
//! With `ModelConfig::audit` set, [`audit::check`] runs after every stage
//! and a violation aborts the run with [`SimError::Invariant`].
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ce_core::ModelConfig;
//! use ce_sim::ModelBuilder;
//!
//! let mut model = ModelBuilder::new(ModelConfig::default()).build()?;
//! let series = model.run(50, true)?;
//! println!("{:?}", series.column("amount leakage"));
//! ```

pub mod audit;
pub mod builder;
pub mod error;
pub mod metrics;
pub mod model;
pub mod observer;


pub use builder::ModelBuilder;
pub use error::{SimError, SimResult};
pub use metrics::{COLUMNS, MetricsRow, TimeSeries};
pub use model::Model;
pub use observer::{ModelObserver, NoopObserver};
