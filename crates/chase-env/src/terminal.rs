//! Terminal-condition checks.

use chase_core::{AgentId, State};

use crate::{EnvError, EnvResult};

/// Decides whether a state ends the trajectory.
///
/// Implementations must be pure: the same state always gives the same
/// answer.  `Send + Sync` so a check can be shared by batch workers.
pub trait TerminalCheck: Send + Sync {
    fn is_terminal(&self, state: &State) -> bool;
}

impl<T: TerminalCheck + ?Sized> TerminalCheck for &T {
    #[inline]
    fn is_terminal(&self, state: &State) -> bool {
        (**self).is_terminal(state)
    }
}

/// Capture test: the pursuer is within `radius` of the target.
///
/// The pursuer/target pairing is fixed at construction.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CaptureCheck {
    pursuer: AgentId,
    target:  AgentId,
    radius:  f64,
}

impl CaptureCheck {
    pub fn new(pursuer: AgentId, target: AgentId, radius: f64) -> EnvResult<Self> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(EnvError::InvalidRadius(radius));
        }
        if pursuer == target {
            return Err(EnvError::SelfPursuit);
        }
        Ok(Self { pursuer, target, radius })
    }

    #[inline]
    pub fn pursuer(&self) -> AgentId {
        self.pursuer
    }

    #[inline]
    pub fn target(&self) -> AgentId {
        self.target
    }

    #[inline]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl TerminalCheck for CaptureCheck {
    /// `true` iff the pursuer–target distance is `<= radius`.  A state that
    /// lacks either agent is never terminal.
    fn is_terminal(&self, state: &State) -> bool {
        state
            .distance(self.pursuer, self.target)
            .is_ok_and(|d| d <= self.radius)
    }
}

/// A [`TerminalCheck`] that never fires; rollouts only end by truncation.
#[derive(Copy, Clone, Debug, Default)]
pub struct NeverTerminal;

impl TerminalCheck for NeverTerminal {
    fn is_terminal(&self, _state: &State) -> bool {
        false
    }
}
