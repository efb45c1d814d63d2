//! `chase-core` — foundational types for the `chase` pursuit-evasion harness.
//!
//! This crate is a dependency of every other `chase-*` crate.  It has no
//! `chase-*` dependencies and minimal external ones (`rand`, `rand_distr`,
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`ids`]     | `AgentId`, `TrajectoryId`, `Role`                         |
//! | [`geo`]     | `Vec2`, `Polar`, Cartesian ↔ polar conversion             |
//! | [`time`]    | `Step`, `StepTiming` (MDP rate vs. display rate)          |
//! | [`rng`]     | `SimRng` (seedable, per-trajectory derivation)            |
//! | [`state`]   | `State`, `Action`, `TimeStep`, `Trajectory`, `Outcome`    |
//! | [`error`]   | `CoreError`, `CoreResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `chase-output` for trajectory persistence.     |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod state;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::{Polar, Vec2, cartesian_to_polar, polar_to_cartesian};
pub use ids::{AgentId, Role, TrajectoryId};
pub use rng::SimRng;
pub use state::{Action, Outcome, State, TimeStep, Trajectory};
pub use time::{Step, StepTiming};
