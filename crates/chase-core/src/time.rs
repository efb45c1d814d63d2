//! Step counting and the two clocks of the harness.
//!
//! # Design
//!
//! Decisions, rewards and terminal bookkeeping run on the *MDP clock*
//! (default 5 steps per second, one heading change every 200 ms).  Animation
//! runs on the *display clock* (default 30 frames per second).  Each MDP step
//! is expanded into `frames_to_interpolate + 1` display frames:
//!
//!   frames_to_interpolate = floor(fps / mdp_steps_per_sec − 1)
//!
//! Keeping the two rates separate means simulation fidelity never depends on
//! how fast frames are drawn.

use std::fmt;

use crate::{CoreError, CoreResult};

// ── Step ─────────────────────────────────────────────────────────────────────

/// Index of an MDP step within one trajectory.  Doubles as the warm-up clock.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step(pub u32);

impl Step {
    pub const ZERO: Step = Step(0);

    /// The step after `self`.
    #[inline]
    pub fn next(self) -> Step {
        Step(self.0 + 1)
    }

    /// `true` while fewer than `warm_up_steps` steps have elapsed.
    #[inline]
    pub fn in_warm_up(self, warm_up_steps: u32) -> bool {
        self.0 < warm_up_steps
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}

// ── StepTiming ────────────────────────────────────────────────────────────────

/// MDP step rate vs. display frame rate.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepTiming {
    /// Decisions per simulated second.  Default: 5.
    pub mdp_steps_per_sec: u32,
    /// Display frames per simulated second.  Default: 30.
    pub frames_per_sec:    u32,
}

impl Default for StepTiming {
    fn default() -> Self {
        Self { mdp_steps_per_sec: 5, frames_per_sec: 30 }
    }
}

impl StepTiming {
    /// Validate that both rates are positive and the display is at least as
    /// fast as the MDP.
    pub fn validated(self) -> CoreResult<Self> {
        if self.mdp_steps_per_sec == 0 {
            return Err(CoreError::Config("mdp_steps_per_sec must be > 0".into()));
        }
        if self.frames_per_sec < self.mdp_steps_per_sec {
            return Err(CoreError::InvalidRange {
                what: "frame rate",
                min:  self.mdp_steps_per_sec as f64,
                max:  self.frames_per_sec as f64,
            });
        }
        Ok(self)
    }

    /// Sub-frames inserted between two consecutive MDP states.
    #[inline]
    pub fn frames_to_interpolate(&self) -> u32 {
        (self.frames_per_sec / self.mdp_steps_per_sec).saturating_sub(1)
    }

    /// How many MDP steps span `secs` seconds.
    #[inline]
    pub fn steps_for_secs(&self, secs: u32) -> u32 {
        secs * self.mdp_steps_per_sec
    }
}
