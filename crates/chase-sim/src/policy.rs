//! Action compass, policies, and distribution helpers.

use std::f64::consts::TAU;

use chase_core::{Action, SimRng, State, Vec2};
use rand::distributions::{Distribution, WeightedIndex};

use crate::{SimError, SimResult};

/// A discrete probability distribution over actions.
pub type ActionDistribution = Vec<(Action, f64)>;

/// `N` evenly spaced unit directions; direction `k` points at angle `k·2π/N`.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionSpace {
    actions: Vec<Action>,
}

impl ActionSpace {
    pub fn compass(directions: usize) -> SimResult<Self> {
        if directions == 0 {
            return Err(SimError::EmptyActionSpace);
        }
        let actions = (0..directions)
            .map(|k| Action(Vec2::from_angle(k as f64 * TAU / directions as f64)))
            .collect();
        Ok(Self { actions })
    }

    #[inline]
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// Maps a state to a distribution over actions.
///
/// `Send + Sync` so one policy can serve every worker of a parallel batch.
pub trait Policy: Send + Sync {
    fn distribution(&self, state: &State) -> ActionDistribution;

    /// Draw one action from [`distribution`][Self::distribution].
    fn sample_action(&self, state: &State, rng: &mut SimRng) -> SimResult<Action> {
        sample_from_distribution(&self.distribution(state), rng)
    }
}

/// Uniform over the whole action space, regardless of state.
#[derive(Clone, Debug)]
pub struct RandomPolicy {
    space: ActionSpace,
}

impl RandomPolicy {
    pub fn new(space: ActionSpace) -> Self {
        Self { space }
    }
}

impl Policy for RandomPolicy {
    fn distribution(&self, _state: &State) -> ActionDistribution {
        let p = 1.0 / self.space.len() as f64;
        self.space.actions().iter().map(|&a| (a, p)).collect()
    }
}

/// Weighted draw from `dist`.  Weights need not sum to one.
pub fn sample_from_distribution(dist: &[(Action, f64)], rng: &mut SimRng) -> SimResult<Action> {
    let index = WeightedIndex::new(dist.iter().map(|(_, p)| *p))
        .map_err(|e| SimError::InvalidDistribution(e.to_string()))?;
    Ok(dist[index.sample(rng.inner())].0)
}

/// The most probable action; the first one wins ties.
pub fn max_from_distribution(dist: &[(Action, f64)]) -> SimResult<Action> {
    dist.iter()
        .fold(None::<&(Action, f64)>, |best, entry| match best {
            Some(b) if b.1 >= entry.1 => Some(b),
            _ => Some(entry),
        })
        .map(|(a, _)| *a)
        .ok_or_else(|| SimError::InvalidDistribution("empty distribution".into()))
}
