//! Plain data row types written by output backends.

use chase_core::{Outcome, Role, State, Trajectory};

/// One agent's kinematics in one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameRow {
    pub trajectory: u32,
    /// MDP step index for rollout tables; display frame index for render
    /// tables.
    pub frame:      u64,
    pub agent:      u32,
    pub role:       Role,
    pub x:          f64,
    pub y:          f64,
    pub vx:         f64,
    pub vy:         f64,
}

impl FrameRow {
    /// One row per agent of `state`, roles in the standard layout.
    pub fn from_state(trajectory: u32, frame: u64, state: &State) -> Vec<FrameRow> {
        let roles = Role::standard_layout(state.agent_count());
        state
            .positions()
            .iter()
            .zip(state.velocities())
            .zip(roles)
            .enumerate()
            .map(|(i, ((p, v), role))| FrameRow {
                trajectory,
                frame,
                agent: i as u32,
                role,
                x: p.x,
                y: p.y,
                vx: v.x,
                vy: v.y,
            })
            .collect()
    }
}

/// Summary of one finished trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectorySummaryRow {
    pub trajectory:    u32,
    pub seed:          u64,
    pub wolf_subtlety: f64,
    pub captured:      bool,
    pub steps:         u64,
    pub total_reward:  f64,
}

impl From<&Trajectory> for TrajectorySummaryRow {
    fn from(t: &Trajectory) -> Self {
        Self {
            trajectory:    t.id.0,
            seed:          t.seed,
            wolf_subtlety: t.wolf_subtlety,
            captured:      t.outcome == Outcome::Captured,
            steps:         t.len() as u64,
            total_reward:  t.total_reward(),
        }
    }
}
