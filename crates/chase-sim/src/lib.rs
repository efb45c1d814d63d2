//! `chase-sim` — trajectory sampling for the chase harness.
//!
//! # Rollout
//!
//! ```text
//! reset            draw legal initial positions, all agents at rest
//! loop:
//!   ① stop        if the state is terminal (Captured)
//!                 or max_running_steps steps are recorded (Truncated)
//!   ② act         action ~ policy.distribution(state)
//!   ③ transit     prepare velocities, frames_to_interpolate + 1 sub-frames
//!   ④ reward      alive bonus, or the death penalty on capture
//!   ⑤ record      TimeStep { state, action, next_state, reward }
//! ```
//!
//! Every trajectory owns an RNG seeded from `(config.seed, trajectory id)`,
//! which is what makes batches reproducible and order-independent.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Samples the trajectories of a batch on Rayon's pool.   |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use chase_sim::{ChaseConfig, ParameterGrid, SweepRunner};
//!
//! let grid = ParameterGrid::new().level("num_agents", [2.0, 4.0]);
//! let batches = SweepRunner::new(ChaseConfig::default(), 3)
//!     .run(&grid, |scenario| scenario.random_policy())?;
//! ```

pub mod config;
pub mod error;
pub mod observer;
pub mod policy;
pub mod reset;
pub mod sampler;
pub mod scenario;
pub mod sweep;


pub use config::{BoundaryConfig, ChaseConfig, SpeedConfig};
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, RolloutObserver, TracingObserver};
pub use policy::{
    ActionDistribution, ActionSpace, Policy, RandomPolicy, max_from_distribution,
    sample_from_distribution,
};
pub use reset::{InitConstraints, ResetState};
pub use sampler::{ForwardOneStep, RolloutMeta, RolloutPhase, SampleTrajectory};
pub use scenario::{ChaseSampler, Scenario};
pub use sweep::{ConditionBatch, Conditions, ParameterGrid, SweepRunner};
