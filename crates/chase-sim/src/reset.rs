//! Drawing a legal random initial state.

use chase_core::{AgentId, SimRng, State, Vec2};
use chase_env::Boundary;
use tracing::{debug, warn};

use crate::{SimError, SimResult};

/// Minimum-distance rules an initial configuration must satisfy.
#[derive(Clone, Debug, PartialEq)]
pub struct InitConstraints {
    pub sheep:                AgentId,
    pub wolf:                 AgentId,
    pub distractors:          Vec<AgentId>,
    pub min_sheep_wolf:       f64,
    pub min_sheep_distractor: f64,
}

impl InitConstraints {
    /// Standard layout: sheep 0, wolf 1, distractors 2..agent_count.
    pub fn standard(agent_count: usize, min_sheep_wolf: f64, min_sheep_distractor: f64) -> Self {
        Self {
            sheep:       AgentId(0),
            wolf:        AgentId(1),
            distractors: (2..agent_count as u32).map(AgentId).collect(),
            min_sheep_wolf,
            min_sheep_distractor,
        }
    }

    /// `true` iff the wolf is at least `min_sheep_wolf` from the sheep and
    /// every distractor at least `min_sheep_distractor`.  Positions missing
    /// a constrained agent are illegal.
    pub fn is_legal(&self, positions: &[Vec2]) -> bool {
        let at = |id: AgentId| positions.get(id.index()).copied();
        let (Some(sheep), Some(wolf)) = (at(self.sheep), at(self.wolf)) else {
            return false;
        };
        if sheep.distance(wolf) < self.min_sheep_wolf {
            return false;
        }
        self.distractors.iter().all(|&d| {
            at(d).is_some_and(|p| sheep.distance(p) >= self.min_sheep_distractor)
        })
    }
}

/// Rejection sampler for initial states.
///
/// Positions are uniform inside `area`; every agent starts at rest.
#[derive(Clone, Debug)]
pub struct ResetState {
    area:         Boundary,
    agent_count:  usize,
    constraints:  InitConstraints,
    max_attempts: u32,
}

impl ResetState {
    pub fn new(
        area:         Boundary,
        agent_count:  usize,
        constraints:  InitConstraints,
        max_attempts: u32,
    ) -> Self {
        Self { area, agent_count, constraints, max_attempts }
    }

    #[inline]
    pub fn constraints(&self) -> &InitConstraints {
        &self.constraints
    }

    /// Draw until the constraints hold, giving up after `max_attempts` draws
    /// with [`SimError::UnsatisfiableConstraints`].
    pub fn reset(&self, rng: &mut SimRng) -> SimResult<State> {
        for attempt in 1..=self.max_attempts {
            let positions: Vec<Vec2> = (0..self.agent_count)
                .map(|_| self.area.sample_point(rng))
                .collect();
            if self.constraints.is_legal(&positions) {
                if attempt > 1 {
                    debug!(attempt, "initial positions accepted");
                }
                return Ok(State::at_rest(positions));
            }
        }
        warn!(
            attempts = self.max_attempts,
            min_sheep_wolf = self.constraints.min_sheep_wolf,
            min_sheep_distractor = self.constraints.min_sheep_distractor,
            "initial position constraints unsatisfiable",
        );
        Err(SimError::UnsatisfiableConstraints { attempts: self.max_attempts })
    }
}
