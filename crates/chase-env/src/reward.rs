//! Per-step reward.

use chase_core::{Action, State};

use crate::TerminalCheck;

/// Scalar feedback for one MDP step.
pub trait RewardFunction {
    fn reward(&self, state: &State, action: Action, next_state: &State) -> f64;
}

/// Small bonus for every step survived, large penalty on capture.
///
/// The penalty replaces the bonus on the step whose `next_state` is terminal;
/// since rollouts stop there, it is paid exactly once.
#[derive(Copy, Clone, Debug)]
pub struct TerminalPenaltyReward<T: TerminalCheck> {
    pub alive_bonus:   f64,
    pub death_penalty: f64,
    terminal:          T,
}

impl<T: TerminalCheck> TerminalPenaltyReward<T> {
    pub fn new(alive_bonus: f64, death_penalty: f64, terminal: T) -> Self {
        Self { alive_bonus, death_penalty, terminal }
    }
}

impl<T: TerminalCheck> RewardFunction for TerminalPenaltyReward<T> {
    fn reward(&self, _state: &State, _action: Action, next_state: &State) -> f64 {
        if self.terminal.is_terminal(next_state) {
            self.death_penalty
        } else {
            self.alive_bonus
        }
    }
}
