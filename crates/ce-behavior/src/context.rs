//! Model-wide state handed to every behaviour callback.

use ce_core::{ModelConfig, SimRng, Tick};

use crate::FlowLog;

/// Everything a behaviour may need besides the population itself.
///
/// Built by the model once per stage; the RNG and flow log are borrowed
/// mutably so every stochastic draw comes from the one model stream, in
/// agent order.
pub struct StageContext<'a> {
    pub tick:   Tick,
    pub config: &'a ModelConfig,
    pub rng:    &'a mut SimRng,
    pub flows:  &'a mut FlowLog,
}

impl<'a> StageContext<'a> {
    #[inline]
    pub fn new(tick: Tick, config: &'a ModelConfig, rng: &'a mut SimRng, flows: &'a mut FlowLog) -> Self {
        Self { tick, config, rng, flows }
    }
}
