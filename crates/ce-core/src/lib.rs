//! `ce-core`: foundational types for the circular-economy plastics model.
//!
//! This crate is a dependency of every other `ce-*` crate.  It intentionally
//! has no `ce-*` dependencies and minimal external ones (`rand`,
//! `rand_distr`, and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`component`]   | `Component`, `PartState`, `CarState`, `Brand`, `AgentKind` |
//! | [`ids`]         | `AgentId`, `CarId`                                         |
//! | [`time`]        | `Tick`, `SimClock`                                         |
//! | [`rng`]         | `SimRng` (the single seeded stream)                        |
//! | [`config`]      | `ModelConfig`, `Levers`, `Uncertainties`, `AgentCounts`, … |
//! | [`error`]       | `CeError`, `CeResult`                                      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod component;
pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use component::{AgentKind, Brand, CarState, Component, PartState};
pub use config::{
    AgentCounts, LeakageAccounting, Levers, ModelConfig, PriceGrowth, PricingParams, SalesMemory,
    Uncertainties, Variants,
};
pub use error::{CeError, CeResult};
pub use ids::{AgentId, CarId};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
