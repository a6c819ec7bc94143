//! Per-tick record of what was created and destroyed.
//!
//! Transfers only move goods around; everything else that changes a total
//! is logged here, so a caller can check
//!
//! ```text
//! stock_after = stock_before + produced − consumed
//! ```
//!
//! per plastic grade, with `leaked + produced(recyclate) = extracted` for
//! the shredding step.

use ce_agent::PerComponent;
use ce_core::Component;

#[derive(Debug, Clone, PartialEq)]
pub struct FlowLog {
    /// Units created: recyclate from shredding, parts and cars assembled.
    pub produced:  PerComponent<f64>,
    /// Units used up: plastic moulded into parts, parts built into cars.
    pub consumed:  PerComponent<f64>,
    /// Plastic lost from the system by recyclers.
    pub leaked:    f64,
    /// Plastic mass taken out of shredded parts.
    pub extracted: f64,
}

impl Default for FlowLog {
    fn default() -> Self {
        Self {
            produced:  PerComponent::splat(0.0),
            consumed:  PerComponent::splat(0.0),
            leaked:    0.0,
            extracted: 0.0,
        }
    }
}

impl FlowLog {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn produce(&mut self, c: Component, amount: f64) {
        self.produced[c] += amount;
    }

    #[inline]
    pub fn consume(&mut self, c: Component, amount: f64) {
        self.consumed[c] += amount;
    }

    /// Net change `produced − consumed` of one component.
    pub fn net(&self, c: Component) -> f64 {
        self.produced[c] - self.consumed[c]
    }
}
