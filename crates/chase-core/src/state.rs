//! Multi-agent state, actions, and recorded trajectories.

use crate::{AgentId, CoreError, CoreResult, TrajectoryId, Vec2};

// ── State ─────────────────────────────────────────────────────────────────────

/// Positions and velocities of every agent, indexed by [`AgentId`].
///
/// Both vectors always have the same length, fixed for the lifetime of a
/// trajectory.  Fields are private so the invariant cannot be broken after
/// construction; use [`State::new`] or the `*_mut` slice accessors.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawState"))]
pub struct State {
    positions:  Vec<Vec2>,
    velocities: Vec<Vec2>,
}

/// Unchecked wire form of [`State`]; deserialization goes through
/// [`State::new`].
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawState {
    positions:  Vec<Vec2>,
    velocities: Vec<Vec2>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawState> for State {
    type Error = CoreError;

    fn try_from(raw: RawState) -> CoreResult<Self> {
        State::new(raw.positions, raw.velocities)
    }
}

impl State {
    /// Build a state, rejecting mismatched lengths.
    pub fn new(positions: Vec<Vec2>, velocities: Vec<Vec2>) -> CoreResult<Self> {
        if positions.len() != velocities.len() {
            return Err(CoreError::ShapeMismatch {
                positions:  positions.len(),
                velocities: velocities.len(),
            });
        }
        Ok(Self { positions, velocities })
    }

    /// A state with the given positions and every agent at rest.
    pub fn at_rest(positions: Vec<Vec2>) -> Self {
        let velocities = vec![Vec2::ZERO; positions.len()];
        Self { positions, velocities }
    }

    #[inline]
    pub fn agent_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn positions(&self) -> &[Vec2] {
        &self.positions
    }

    #[inline]
    pub fn velocities(&self) -> &[Vec2] {
        &self.velocities
    }

    /// Mutable views of both vectors at once.  Slices cannot change length,
    /// so the shape invariant holds.
    #[inline]
    pub fn split_mut(&mut self) -> (&mut [Vec2], &mut [Vec2]) {
        (&mut self.positions, &mut self.velocities)
    }

    pub fn position(&self, agent: AgentId) -> CoreResult<Vec2> {
        self.positions
            .get(agent.index())
            .copied()
            .ok_or(CoreError::AgentNotFound(agent))
    }

    pub fn velocity(&self, agent: AgentId) -> CoreResult<Vec2> {
        self.velocities
            .get(agent.index())
            .copied()
            .ok_or(CoreError::AgentNotFound(agent))
    }

    /// Euclidean distance between two agents.
    pub fn distance(&self, a: AgentId, b: AgentId) -> CoreResult<f64> {
        Ok(self.position(a)?.distance(self.position(b)?))
    }
}

// ── Action ────────────────────────────────────────────────────────────────────

/// The evading agent's chosen direction for one MDP step (a unit vector from
/// the action compass).
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Action(pub Vec2);

impl Action {
    /// Heading of the action in radians.
    #[inline]
    pub fn angle(self) -> f64 {
        self.0.angle()
    }
}

// ── Trajectory ────────────────────────────────────────────────────────────────

/// One recorded MDP step.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeStep {
    pub state:      State,
    pub action:     Action,
    pub next_state: State,
    pub reward:     Option<f64>,
}

/// How a rollout ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The pursuer reached the killzone around the target.
    Captured,
    /// The step budget ran out first.
    Truncated,
}

/// An immutable sequence of timesteps plus the parameters that produced it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trajectory {
    pub id:            TrajectoryId,
    /// Seed of the trajectory's own RNG; replays the rollout exactly.
    pub seed:          u64,
    pub wolf_subtlety: f64,
    pub outcome:       Outcome,
    steps:             Vec<TimeStep>,
}

impl Trajectory {
    pub fn new(
        id:            TrajectoryId,
        seed:          u64,
        wolf_subtlety: f64,
        outcome:       Outcome,
        steps:         Vec<TimeStep>,
    ) -> Self {
        Self { id, seed, wolf_subtlety, outcome, steps }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[inline]
    pub fn steps(&self) -> &[TimeStep] {
        &self.steps
    }

    /// The state after the last recorded step.
    pub fn final_state(&self) -> Option<&State> {
        self.steps.last().map(|s| &s.next_state)
    }

    /// Sum of recorded rewards (steps without a reward count as zero).
    pub fn total_reward(&self) -> f64 {
        self.steps.iter().filter_map(|s| s.reward).sum()
    }
}
