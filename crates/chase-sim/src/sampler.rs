//! Rolling out one trajectory.

use chase_core::{Action, Outcome, SimRng, State, Step, TimeStep, Trajectory, TrajectoryId};
use chase_env::{RewardFunction, TerminalCheck, Transition};

use crate::{Policy, ResetState, RolloutObserver, SimResult};

// ── ForwardOneStep ────────────────────────────────────────────────────────────

/// Transition plus reward: turns `(state, action)` into a recorded timestep.
pub struct ForwardOneStep<F: Transition, W: RewardFunction> {
    transition: F,
    reward:     W,
}

impl<F: Transition, W: RewardFunction> ForwardOneStep<F, W> {
    pub fn new(transition: F, reward: W) -> Self {
        Self { transition, reward }
    }

    #[inline]
    pub fn transition(&self) -> &F {
        &self.transition
    }

    pub fn step(
        &self,
        state:  &State,
        action: Action,
        step:   Step,
        rng:    &mut SimRng,
    ) -> SimResult<TimeStep> {
        let next_state = self.transition.transit(state, action, step, rng)?;
        let reward = self.reward.reward(state, action, &next_state);
        Ok(TimeStep {
            state: state.clone(),
            action,
            next_state,
            reward: Some(reward),
        })
    }
}

// ── SampleTrajectory ──────────────────────────────────────────────────────────

/// Where a rollout is in its lifecycle.
///
/// ```text
/// Init ──reset──▶ Running ──capture──▶ Terminal
///                    │
///                    └──budget spent──▶ Truncated
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RolloutPhase {
    Init,
    Running,
    Terminal,
    Truncated,
}

/// Identity of the trajectory being sampled, copied into the result.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RolloutMeta {
    pub id:            TrajectoryId,
    pub seed:          u64,
    pub wolf_subtlety: f64,
}

/// Drives repeated transitions from a random legal initial state until
/// capture or until `max_running_steps` steps have been taken.
pub struct SampleTrajectory<F: Transition, W: RewardFunction, T: TerminalCheck> {
    max_running_steps: u32,
    terminal:          T,
    reset:             ResetState,
    forward:           ForwardOneStep<F, W>,
}

impl<F, W, T> SampleTrajectory<F, W, T>
where
    F: Transition,
    W: RewardFunction,
    T: TerminalCheck,
{
    pub fn new(
        max_running_steps: u32,
        terminal:          T,
        reset:             ResetState,
        forward:           ForwardOneStep<F, W>,
    ) -> Self {
        Self { max_running_steps, terminal, reset, forward }
    }

    #[inline]
    pub fn max_running_steps(&self) -> u32 {
        self.max_running_steps
    }

    #[inline]
    pub fn forward(&self) -> &ForwardOneStep<F, W> {
        &self.forward
    }

    /// Sample one trajectory.
    ///
    /// The result has at most `max_running_steps` timesteps.  Fewer steps
    /// means the rollout was captured: the last `next_state` is terminal
    /// (or, with zero steps, the initial state already was).
    pub fn run<P, O>(
        &self,
        meta:     RolloutMeta,
        policy:   &P,
        rng:      &mut SimRng,
        observer: &mut O,
    ) -> SimResult<Trajectory>
    where
        P: Policy + ?Sized,
        O: RolloutObserver + ?Sized,
    {
        let mut state = self.reset.reset(rng)?;
        let mut steps: Vec<TimeStep> = Vec::with_capacity(self.max_running_steps as usize);
        let mut step = Step::ZERO;
        let mut phase = RolloutPhase::Init;

        loop {
            phase = match phase {
                RolloutPhase::Init => {
                    observer.on_trajectory_start(meta.id, &state);
                    if self.terminal.is_terminal(&state) {
                        RolloutPhase::Terminal
                    } else {
                        RolloutPhase::Running
                    }
                }
                RolloutPhase::Running if step.0 >= self.max_running_steps => {
                    RolloutPhase::Truncated
                }
                RolloutPhase::Running => {
                    let action = policy.sample_action(&state, rng)?;
                    let record = self.forward.step(&state, action, step, rng)?;
                    observer.on_step(meta.id, step, &record);

                    let captured = self.terminal.is_terminal(&record.next_state);
                    state = record.next_state.clone();
                    steps.push(record);
                    step = step.next();
                    if captured {
                        RolloutPhase::Terminal
                    } else {
                        RolloutPhase::Running
                    }
                }
                RolloutPhase::Terminal | RolloutPhase::Truncated => break,
            };
        }

        let outcome = match phase {
            RolloutPhase::Terminal => Outcome::Captured,
            _ => Outcome::Truncated,
        };
        let trajectory = Trajectory::new(meta.id, meta.seed, meta.wolf_subtlety, outcome, steps);
        observer.on_trajectory_end(&trajectory);
        Ok(trajectory)
    }
}
