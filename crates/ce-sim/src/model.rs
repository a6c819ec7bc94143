//! The `Model` struct and its tick loop.

use std::time::Instant;

use ce_behavior::{FlowLog, Stage, StageContext, World, run_stage};
use ce_core::{AgentId, ModelConfig, SimClock, SimRng, Tick};
use log::{debug, info};

use crate::{MetricsRow, ModelObserver, NoopObserver, SimError, SimResult, TimeSeries, audit};

/// The circular-economy model: a population and the clock that drives it.
///
/// Each tick runs three stages over every agent in construction order:
///
/// 1. **Acquire**: agents buy from ranked suppliers.
/// 2. **Process**: agents transform their own stock.
/// 3. **Update**: agents reprice and replan from realised sales.
///
/// One [`MetricsRow`] is recorded after the update stage.  Create via
/// [`ModelBuilder`][crate::ModelBuilder].
pub struct Model {
    pub config: ModelConfig,

    /// Tracks the current tick and maps it to a calendar year.
    pub clock: SimClock,

    /// Every agent, in construction (and scheduling) order.
    pub population: World,

    /// The one random stream every stochastic draw comes from.
    pub(crate) rng: SimRng,

    /// Flows of the most recent tick.
    pub(crate) flows: FlowLog,

    pub(crate) series: TimeSeries,
}

impl Model {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run `steps` ticks and return every row recorded so far.
    pub fn run(&mut self, steps: u64, time_tracking: bool) -> SimResult<TimeSeries> {
        self.run_with(steps, time_tracking, &mut NoopObserver)
    }

    /// [`run`][Self::run] with observer callbacks at every tick boundary.
    pub fn run_with<O: ModelObserver>(
        &mut self,
        steps:         u64,
        time_tracking: bool,
        observer:      &mut O,
    ) -> SimResult<TimeSeries> {
        let started = Instant::now();
        info!("running {steps} ticks from {}", self.clock);

        for _ in 0..steps {
            observer.on_tick_start(self.clock.current_tick);
            let row = self.step()?;
            observer.on_tick_end(&row);
        }
        observer.on_run_end(self.clock.current_tick);

        if time_tracking {
            info!("run time: {:.2} seconds", started.elapsed().as_secs_f64());
        }
        info!("simulation completed at {}", self.clock);
        Ok(self.series.clone())
    }

    /// Run one tick and return the row it recorded.
    pub fn step(&mut self) -> SimResult<MetricsRow> {
        let now = self.clock.current_tick;
        self.flows.reset();

        let ids: Vec<AgentId> = self.population.iter().map(|a| a.id).collect();
        for stage in Stage::ALL {
            let mut ctx = StageContext::new(now, &self.config, &mut self.rng, &mut self.flows);
            for &id in &ids {
                run_stage(stage, id, &mut self.population, &mut ctx).map_err(|e| SimError::at(now, e))?;
            }
            if self.config.audit {
                audit::check(&self.population).map_err(|detail| SimError::Invariant {
                    tick:   now,
                    detail: format!("after {stage:?} stage: {detail}"),
                })?;
            }
            debug!("{now}: {stage:?} stage done for {} agents", ids.len());
        }

        let row = MetricsRow::collect(now, self.clock.year_of(now), &self.population);
        debug!(
            "{now}: leakage {:.3}, virgin price {:.3}, recyclate price {:.3}",
            row.amount_leakage, row.price_virgin, row.price_recyclate
        );
        self.series.push(row.clone());
        self.clock.advance();
        Ok(row)
    }

    /// The tick the next [`step`][Self::step] will run.
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    /// Every row recorded so far.
    pub fn series(&self) -> &TimeSeries {
        &self.series
    }

    /// What was produced, consumed, and leaked during the last tick.
    pub fn flows(&self) -> &FlowLog {
        &self.flows
    }
}
