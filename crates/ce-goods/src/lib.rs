//! `ce-goods`: the physical goods that flow through the supply chain.
//!
//! # Crate layout
//!
//! | Module    | Contents                                          |
//! |-----------|---------------------------------------------------|
//! | [`part`]  | `PlasticRatio`, `Part`                            |
//! | [`car`]   | `Car` and its lifecycle state machine             |
//! | [`error`] | `GoodsError`, `GoodsResult<T>`                    |
//!
//! Goods are plain owned values.  A part or car lives in exactly one place
//! (an agent's stock or, for parts, a car); handing it to another agent
//! moves it, so no two owners can ever alias the same instance.

pub mod car;
pub mod error;
pub mod part;


pub use car::Car;
pub use error::{GoodsError, GoodsResult};
pub use part::{Part, PlasticRatio};
