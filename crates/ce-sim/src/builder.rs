//! Fluent builder for constructing a [`Model`].

use ce_behavior::{FlowLog, spawn_population};
use ce_core::{Brand, ModelConfig, SimClock, SimRng};
use log::info;

use crate::{Model, SimError, SimResult, TimeSeries};

/// Fluent builder for [`Model`].
///
/// # Example
///
/// ```rust,ignore
/// let mut model = ModelBuilder::new(config)
///     .seed(7)
///     .audit(true)
///     .build()?;
/// let series = model.run(30, false)?;
/// ```
pub struct ModelBuilder {
    config: ModelConfig,
}

impl ModelBuilder {
    pub fn new(config: ModelConfig) -> Self {
        Self { config }
    }

    /// Override `config.seed`.
    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Check population invariants after every stage.
    pub fn audit(mut self, enabled: bool) -> Self {
        self.config.audit = enabled;
        self
    }

    /// Validate the configuration and create the initial population.
    ///
    /// Fails before any tick runs if the configuration is inconsistent.
    pub fn build(self) -> SimResult<Model> {
        let config = self.config;

        match config.agent_counts.car_manufacturers {
            Some(n) if n != Brand::COUNT => {
                return Err(SimError::CountMismatch {
                    expected: Brand::COUNT,
                    got:      n,
                    what:     "car manufacturer",
                });
            }
            _ => {}
        }
        config.validate()?;

        let mut rng = SimRng::new(config.seed);
        let population = spawn_population(&config, &mut rng);
        info!(
            "built model: {} agents ({} users), seed {}",
            population.len(),
            config.agent_counts.users,
            config.seed
        );

        Ok(Model {
            clock: SimClock::new(config.start_year),
            config,
            population,
            rng,
            flows: FlowLog::default(),
            series: TimeSeries::new(),
        })
    }
}
