//! Seedable simulation RNG.
//!
//! # Determinism strategy
//!
//! A batch of trajectories shares one master seed.  Trajectory `i` gets its
//! own independent `SmallRng` seeded by:
//!
//!   seed = master_seed XOR (i * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive stream numbers uniformly across the seed space.
//! Every trajectory is therefore reproducible on its own, regardless of how
//! many trajectories were sampled before it or on which thread.

use std::f64::consts::PI;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use crate::TrajectoryId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// The single source of randomness for sampling and velocity preparation.
///
/// Not `Sync`: each trajectory owns its generator for its whole rollout.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed deterministically from a batch master seed and a trajectory id.
    pub fn for_trajectory(master_seed: u64, trajectory: TrajectoryId) -> Self {
        SimRng::new(Self::mix(master_seed, trajectory.0 as u64))
    }

    /// The seed [`for_trajectory`][Self::for_trajectory] would use; recorded
    /// in each trajectory so a single rollout can be replayed.
    #[inline]
    pub fn mix(master_seed: u64, stream: u64) -> u64 {
        master_seed ^ stream.wrapping_mul(MIXING_CONSTANT)
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform heading in `[-π, π)`.
    #[inline]
    pub fn angle(&mut self) -> f64 {
        self.0.gen_range(-PI..PI)
    }

    /// Gaussian draw.  A non-positive or non-finite `std_dev` degenerates to
    /// `mean`.
    pub fn normal(&mut self, mean: f64, std_dev: f64) -> f64 {
        match Normal::new(mean, std_dev) {
            Ok(dist) if std_dev > 0.0 => dist.sample(&mut self.0),
            _ => mean,
        }
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
