//! The discrete MDP transition.

use chase_core::{Action, SimRng, State, Step};

use crate::{Boundary, EnvResult, TerminalCheck, VelocityRoster};

/// Advances the full multi-agent state by one MDP step.
pub trait Transition {
    fn transit(
        &self,
        state:  &State,
        action: Action,
        step:   Step,
        rng:    &mut SimRng,
    ) -> EnvResult<State>;
}

/// Transition that moves agents through every display sub-frame of the step.
///
/// New per-frame velocities are prepared once per step.  Agents then move
/// `frames_to_interpolate + 1` times, reflecting off the walls after each
/// sub-frame, and the step stops early at the first sub-frame whose state is
/// terminal.  Checking per sub-frame means a capture that happens "between"
/// two MDP states is never missed.
pub struct TransitWithInterpolation<T: TerminalCheck> {
    frames_to_interpolate: u32,
    roster:                VelocityRoster,
    boundary:              Boundary,
    terminal:              T,
}

impl<T: TerminalCheck> TransitWithInterpolation<T> {
    pub fn new(
        frames_to_interpolate: u32,
        roster:                VelocityRoster,
        boundary:              Boundary,
        terminal:              T,
    ) -> Self {
        Self { frames_to_interpolate, roster, boundary, terminal }
    }

    #[inline]
    pub fn frames_to_interpolate(&self) -> u32 {
        self.frames_to_interpolate
    }

    #[inline]
    pub fn roster(&self) -> &VelocityRoster {
        &self.roster
    }

    #[inline]
    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    #[inline]
    pub fn terminal(&self) -> &T {
        &self.terminal
    }
}

impl<T: TerminalCheck> Transition for TransitWithInterpolation<T> {
    fn transit(
        &self,
        state:  &State,
        action: Action,
        step:   Step,
        rng:    &mut SimRng,
    ) -> EnvResult<State> {
        let velocities = self.roster.prepare_all(step, state, action, rng)?;
        let mut next = State::new(state.positions().to_vec(), velocities)?;

        for _ in 0..=self.frames_to_interpolate {
            self.boundary.advance(&mut next);
            if self.terminal.is_terminal(&next) {
                break;
            }
        }
        Ok(next)
    }
}
