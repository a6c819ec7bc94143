//! `ce-behavior`: what each kind of agent does in each stage of a tick.
//!
//! # Crate layout
//!
//! | Module                 | Contents                                              |
//! |------------------------|-------------------------------------------------------|
//! | [`behavior`]           | `Behavior` trait, `Stage`, `behavior_for`, `run_stage`|
//! | [`context`]            | `StageContext<'a>`: tick, config, RNG, flow log       |
//! | [`flow`]               | `FlowLog`: what was produced, consumed, leaked        |
//! | [`role`]               | `Role`: archetype state carried by each agent         |
//! | [`spawn`]              | `spawn_population`                                    |
//! | [`refiner`] … [`user`] | One module per archetype                              |
//! | [`error`]              | `BehaviorError`, `BehaviorResult<T>`                  |
//!
//! # Material flow
//!
//! ```text
//! Refiner ───virgin────┐
//! Recycler ──recyclate─┴─► PartsManufacturer ──parts──► CarManufacturer ──cars──► User
//!    ▲                           │                                                  │
//!    │                           └──parts──► Garage ◄──── broken / retired car ─────┘
//!    │                                        │  ▲
//!    ├───── cars & parts for recycler ────────┤  │ reused parts
//!    │                                        ▼  │
//!    └───── parts for recycler ──────────── Dismantler
//! ```

pub mod behavior;
pub mod car_manufacturer;
pub mod context;
pub mod dismantler;
pub mod error;
pub mod flow;
pub mod garage;
pub mod parts_manufacturer;
pub mod recycler;
pub mod refiner;
pub mod role;
pub mod spawn;
pub mod user;


pub use behavior::{Behavior, Stage, behavior_for, run_stage};
pub use context::StageContext;
pub use error::{BehaviorError, BehaviorResult};
pub use flow::FlowLog;
pub use role::{Role, World};
pub use spawn::spawn_population;
