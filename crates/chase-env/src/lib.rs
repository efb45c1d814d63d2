//! `chase-env` — the pursuit-evasion environment dynamics.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                        |
//! |-----------------|-----------------------------------------------------------------|
//! | [`velocity`]    | `SpeedRange`, `Subtlety`, `WarmUp`, `VelocityPolicy`, `VelocityRoster` |
//! | [`boundary`]    | `Boundary` — wall clamping and velocity reflection              |
//! | [`terminal`]    | `TerminalCheck` trait, `CaptureCheck`, `NeverTerminal`          |
//! | [`transition`]  | `Transition` trait, `TransitWithInterpolation`                  |
//! | [`interpolate`] | `Interpolator`, `InterpolatedFrames` (renderer only)            |
//! | [`reward`]      | `RewardFunction` trait, `TerminalPenaltyReward`                 |
//! | [`error`]       | `EnvError`, `EnvResult<T>`                                      |
//!
//! # Design notes
//!
//! Every component is built from validated values (`SpeedRange::new`,
//! `Boundary::new`, `CaptureCheck::new`, …) and composed through the traits
//! above, so invalid configurations fail at construction and the per-step
//! code paths never re-check them.  Randomness enters only through the
//! caller's `&mut SimRng`.

pub mod boundary;
pub mod error;
pub mod interpolate;
pub mod reward;
pub mod terminal;
pub mod transition;
pub mod velocity;


pub use boundary::{AxisRange, Boundary};
pub use error::{EnvError, EnvResult};
pub use interpolate::{InterpolatedFrames, Interpolator};
pub use reward::{RewardFunction, TerminalPenaltyReward};
pub use terminal::{CaptureCheck, NeverTerminal, TerminalCheck};
pub use transition::{TransitWithInterpolation, Transition};
pub use velocity::{
    RoleSpeeds, SheepHeading, SpeedRange, Subtlety, VelocityPolicy, VelocityRoster, WOLF_SUBTLETIES,
    WarmUp,
};
