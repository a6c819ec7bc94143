//! `ce-agent`: what every agent has in common, and how agents trade.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`stock`]      | `Stock` (scalar or FIFO collection) and `Shipment`         |
//! | [`ledger`]     | `Ledger`, `PerComponent<T>`, `SoldVolume`                  |
//! | [`population`] | `Population<R>` arena, `Agent<R>`                          |
//! | [`ranking`]    | `rank_suppliers`, cheapest first                           |
//! | [`trade`]      | `transfer`, `get_component_from_suppliers`                 |
//! | [`pricing`]    | `adjust_future_price`, `adjust_future_demand`              |
//! | [`error`]      | `AgentError`, `AgentResult<T>`                             |
//!
//! # Trading in one picture
//!
//! ```text
//! buyer demand 15 VIRGIN
//!   rank_suppliers ──► [A @2.0 (10), B @3.0 (10)]
//!   A: 10 < 15 → take all 10, rest 5
//!   B: 10 ≥ 5  → take 5,      rest 0  ── done
//! ```

pub mod error;
pub mod ledger;
pub mod population;
pub mod pricing;
pub mod ranking;
pub mod stock;
pub mod trade;

#[cfg(test)]
mod tests;

pub use error::{AgentError, AgentResult};
pub use ledger::{Ledger, PerComponent, SoldVolume};
pub use population::{Agent, Population};
pub use pricing::{BASELINE_PRICE_SD, adjust_future_demand, adjust_future_price, scaling_factor};
pub use ranking::rank_suppliers;
pub use stock::{Shipment, Stock};
pub use trade::{get_component_from_suppliers, transfer};
