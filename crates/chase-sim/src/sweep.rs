//! Parameter grids and per-condition batch sampling.

use std::fmt;

use chase_core::{Outcome, Trajectory};
use tracing::info;

use crate::{ChaseConfig, Policy, Scenario, SimError, SimResult};

/// Ordered named levels; every combination is one experiment condition.
///
/// Keys keep insertion order and the first key varies slowest, so
/// `[("num_agents", [2, 3]), ("killzone_degrees", [2.0, 2.5])]` yields
/// `(2, 2.0), (2, 2.5), (3, 2.0), (3, 2.5)`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParameterGrid {
    levels: Vec<(String, Vec<f64>)>,
}

impl ParameterGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a factor.
    pub fn level(mut self, key: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        let key = key.into();
        let values: Vec<f64> = values.into_iter().collect();
        match self.levels.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = values,
            None => self.levels.push((key, values)),
        }
        self
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.levels.iter().map(|(k, _)| k.as_str())
    }

    /// Cartesian product of all levels.  An empty grid has exactly one
    /// (empty) condition; a factor with no values makes the product empty.
    pub fn conditions(&self) -> Vec<Conditions> {
        self.levels.iter().fold(vec![Conditions::default()], |acc, (key, values)| {
            acc.iter()
                .flat_map(|c| {
                    values.iter().map(move |&v| {
                        let mut next = c.clone();
                        next.pairs.push((key.clone(), v));
                        next
                    })
                })
                .collect()
        })
    }
}

/// One combination of grid levels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Conditions {
    pairs: Vec<(String, f64)>,
}

impl Conditions {
    pub fn get(&self, key: &str) -> Option<f64> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Overlay these conditions on `base`.
    ///
    /// Recognised keys: `num_agents`, `killzone_degrees`, `wolf_subtlety`
    /// (pins the subtlety list to one value), `seed`.
    pub fn apply_to(&self, base: &ChaseConfig) -> SimResult<ChaseConfig> {
        let mut config = base.clone();
        for (key, value) in self.iter() {
            match key {
                "num_agents" => config.num_agents = whole(key, value)? as usize,
                "seed" => config.seed = whole(key, value)?,
                "killzone_degrees" => config.killzone_degrees = value,
                "wolf_subtlety" => config.wolf_subtleties = vec![value],
                other => return Err(SimError::UnknownCondition(other.to_owned())),
            }
        }
        Ok(config)
    }
}

impl fmt::Display for Conditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{k}={v}")?;
        }
        Ok(())
    }
}

fn whole(key: &str, value: f64) -> SimResult<u64> {
    if value.is_finite() && value >= 0.0 && value.fract() == 0.0 {
        Ok(value as u64)
    } else {
        Err(SimError::Config(format!("{key} must be a non-negative integer, got {value}")))
    }
}

/// The trajectories sampled for one condition.
#[derive(Clone, Debug)]
pub struct ConditionBatch {
    pub conditions:   Conditions,
    pub trajectories: Vec<Trajectory>,
}

impl ConditionBatch {
    /// Fraction of trajectories that ended in capture.
    pub fn capture_rate(&self) -> f64 {
        if self.trajectories.is_empty() {
            return 0.0;
        }
        let captured = self
            .trajectories
            .iter()
            .filter(|t| t.outcome == Outcome::Captured)
            .count();
        captured as f64 / self.trajectories.len() as f64
    }
}

/// Samples `trajectories_per_condition` trajectories for every condition of
/// a grid.
#[derive(Clone, Debug)]
pub struct SweepRunner {
    pub base:                       ChaseConfig,
    pub trajectories_per_condition: usize,
}

impl SweepRunner {
    pub fn new(base: ChaseConfig, trajectories_per_condition: usize) -> Self {
        Self { base, trajectories_per_condition }
    }

    /// Run every condition in grid order.  `make_policy` builds the policy
    /// for each condition's scenario.
    pub fn run<P, M>(&self, grid: &ParameterGrid, mut make_policy: M) -> SimResult<Vec<ConditionBatch>>
    where
        P: Policy,
        M: FnMut(&Scenario) -> P,
    {
        let conditions = grid.conditions();
        info!(
            conditions = conditions.len(),
            per_condition = self.trajectories_per_condition,
            "sweep starting",
        );

        conditions
            .into_iter()
            .map(|conditions| {
                let scenario = Scenario::from_config(&conditions.apply_to(&self.base)?)?;
                let policy = make_policy(&scenario);
                let trajectories = scenario.sample_batch(self.trajectories_per_condition, &policy)?;
                let batch = ConditionBatch { conditions, trajectories };
                info!(
                    condition = %batch.conditions,
                    trajectories = batch.trajectories.len(),
                    capture_rate = batch.capture_rate(),
                    "condition sampled",
                );
                Ok(batch)
            })
            .collect()
    }
}
