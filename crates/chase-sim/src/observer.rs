//! Rollout observer trait for progress reporting and data collection.

use chase_core::{State, Step, TimeStep, Trajectory, TrajectoryId};
use tracing::{debug, trace};

/// Callbacks invoked by [`SampleTrajectory::run`][crate::SampleTrajectory::run]
/// at key points of a rollout.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — capture counter
///
/// ```rust,ignore
/// struct Captures(usize);
///
/// impl RolloutObserver for Captures {
///     fn on_trajectory_end(&mut self, traj: &Trajectory) {
///         if traj.outcome == Outcome::Captured {
///             self.0 += 1;
///         }
///     }
/// }
/// ```
pub trait RolloutObserver {
    /// Called once the initial state has been drawn.
    fn on_trajectory_start(&mut self, _id: TrajectoryId, _initial: &State) {}

    /// Called after every recorded MDP step.
    fn on_step(&mut self, _id: TrajectoryId, _step: Step, _record: &TimeStep) {}

    /// Called with the finished trajectory.
    fn on_trajectory_end(&mut self, _trajectory: &Trajectory) {}
}

/// A [`RolloutObserver`] that does nothing.
pub struct NoopObserver;

impl RolloutObserver for NoopObserver {}

/// Logs rollouts through `tracing`: one `debug` event per trajectory and a
/// `trace` event per step.
#[derive(Default)]
pub struct TracingObserver;

impl RolloutObserver for TracingObserver {
    fn on_trajectory_start(&mut self, id: TrajectoryId, initial: &State) {
        trace!(trajectory = id.0, agents = initial.agent_count(), "rollout started");
    }

    fn on_step(&mut self, id: TrajectoryId, step: Step, record: &TimeStep) {
        trace!(
            trajectory = id.0,
            step = step.0,
            reward = record.reward.unwrap_or_default(),
            "step",
        );
    }

    fn on_trajectory_end(&mut self, trajectory: &Trajectory) {
        debug!(
            trajectory = trajectory.id.0,
            steps = trajectory.len(),
            outcome = ?trajectory.outcome,
            subtlety = trajectory.wolf_subtlety,
            "rollout finished",
        );
    }
}
