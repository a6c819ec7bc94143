//! What an agent owns of one component.
//!
//! Plastics are a continuous mass (`Scalar`, possibly `+∞` for a refiner);
//! parts and cars are FIFO collections of owned goods.  Every shape exposes
//! the same three operations: [`Stock::available`], [`Stock::take`] and
//! [`Stock::give`].

use std::collections::VecDeque;

use ce_core::Component;
use ce_goods::{Car, Part};

use crate::{AgentError, AgentResult};

/// Goods in transit between two stocks.
#[derive(Debug, Clone, PartialEq)]
pub enum Shipment {
    Scalar(f64),
    Parts(Vec<Part>),
    Cars(Vec<Car>),
}

impl Shipment {
    /// Units in the shipment (mass or item count).
    pub fn quantity(&self) -> f64 {
        match self {
            Shipment::Scalar(q) => *q,
            Shipment::Parts(v)  => v.len() as f64,
            Shipment::Cars(v)   => v.len() as f64,
        }
    }
}

/// One component's stock.
#[derive(Debug, Clone, PartialEq)]
pub enum Stock {
    Scalar(f64),
    Parts(VecDeque<Part>),
    Cars(VecDeque<Car>),
}

impl Stock {
    /// The empty stock of the right shape for `component`.
    pub fn empty_for(component: Component) -> Self {
        if component.is_continuous() {
            Stock::Scalar(0.0)
        } else if component.holds_parts() {
            Stock::Parts(VecDeque::new())
        } else {
            Stock::Cars(VecDeque::new())
        }
    }

    /// Units that could be handed out right now.
    #[inline]
    pub fn available(&self) -> f64 {
        match self {
            Stock::Scalar(q) => *q,
            Stock::Parts(v)  => v.len() as f64,
            Stock::Cars(v)   => v.len() as f64,
        }
    }

    /// Remove up to `amount` units.
    ///
    /// Collections hand out their oldest items first and round `amount`
    /// down to whole items.  The result never exceeds [`Stock::available`].
    pub fn take(&mut self, amount: f64) -> Shipment {
        let amount = amount.max(0.0);
        match self {
            Stock::Scalar(q) => {
                let out = amount.min(*q);
                *q -= out;
                Shipment::Scalar(out)
            }
            Stock::Parts(v) => {
                let n = whole_items(amount, v.len());
                Shipment::Parts(v.drain(..n).collect())
            }
            Stock::Cars(v) => {
                let n = whole_items(amount, v.len());
                Shipment::Cars(v.drain(..n).collect())
            }
        }
    }

    /// Append a shipment to the back of this stock.
    pub fn give(&mut self, component: Component, shipment: Shipment) -> AgentResult<()> {
        match (self, shipment) {
            (Stock::Scalar(q), Shipment::Scalar(s)) => *q += s,
            (Stock::Parts(v), Shipment::Parts(s))   => v.extend(s),
            (Stock::Cars(v), Shipment::Cars(s))     => v.extend(s),
            _ => return Err(AgentError::ShapeMismatch { component }),
        }
        Ok(())
    }
}

fn whole_items(amount: f64, len: usize) -> usize {
    if amount >= len as f64 { len } else { amount.floor() as usize }
}
