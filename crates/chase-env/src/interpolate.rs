//! Expanding one MDP step into animation sub-frames (renderer only).

use std::iter::FusedIterator;

use chase_core::{State, TimeStep};

use crate::{Boundary, EnvError, EnvResult, TerminalCheck};

/// Produces the display frames between two consecutive MDP states.
///
/// Starting from `state`'s positions and `next_state`'s velocities, agents
/// are stepped `frames_to_interpolate` times with wall reflection after each
/// sub-frame.  Generation stops right after the first terminal sub-frame.
#[derive(Clone, Debug)]
pub struct Interpolator<T: TerminalCheck> {
    frames_to_interpolate: u32,
    boundary:              Boundary,
    terminal:              T,
}

impl<T: TerminalCheck> Interpolator<T> {
    pub fn new(frames_to_interpolate: u32, boundary: Boundary, terminal: T) -> Self {
        Self { frames_to_interpolate, boundary, terminal }
    }

    #[inline]
    pub fn frames_to_interpolate(&self) -> u32 {
        self.frames_to_interpolate
    }

    /// Frames for the step `state → next_state`.  The first frame is `state`
    /// itself.
    pub fn interpolate<'a>(
        &'a self,
        state:      &'a State,
        next_state: &State,
    ) -> EnvResult<InterpolatedFrames<'a, T>> {
        if state.agent_count() != next_state.agent_count() {
            return Err(EnvError::AgentCountMismatch {
                expected: state.agent_count(),
                got:      next_state.agent_count(),
                what:     "next state",
            });
        }
        let working = State::new(state.positions().to_vec(), next_state.velocities().to_vec())?;
        Ok(InterpolatedFrames {
            interpolator: self,
            first:        Some(state),
            working,
            remaining:    self.frames_to_interpolate,
            done:         false,
        })
    }

    /// Convenience wrapper over [`interpolate`][Self::interpolate] for a
    /// recorded timestep.
    pub fn interpolate_step<'a>(&'a self, step: &'a TimeStep) -> EnvResult<InterpolatedFrames<'a, T>> {
        self.interpolate(&step.state, &step.next_state)
    }
}

/// A finite, non-restartable sequence of sub-states.
///
/// Yields the starting state first, then at most `frames_to_interpolate`
/// interpolated states.
pub struct InterpolatedFrames<'a, T: TerminalCheck> {
    interpolator: &'a Interpolator<T>,
    first:        Option<&'a State>,
    working:      State,
    remaining:    u32,
    done:         bool,
}

impl<T: TerminalCheck> Iterator for InterpolatedFrames<'_, T> {
    type Item = State;

    fn next(&mut self) -> Option<State> {
        if let Some(first) = self.first.take() {
            return Some(first.clone());
        }
        if self.done || self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.interpolator.boundary.advance(&mut self.working);
        if self.interpolator.terminal.is_terminal(&self.working) {
            self.done = true;
        }
        Some(self.working.clone())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let first = self.first.is_some() as usize;
        let rest = if self.done { 0 } else { self.remaining as usize };
        (first, Some(first + rest))
    }
}

impl<T: TerminalCheck> FusedIterator for InterpolatedFrames<'_, T> {}
