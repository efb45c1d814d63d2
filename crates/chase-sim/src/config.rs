//! Experiment configuration.
//!
//! Distances and speeds are given in *visual degrees*, as in the
//! psychophysics display, and converted to pixels with
//! `distance_to_visual_degree_ratio`.  Speeds are converted to whole pixels
//! per MDP step, then spread evenly over the step's display frames:
//!
//!   px_per_step  = trunc(deg_per_sec * ratio / mdp_steps_per_sec)
//!   px_per_frame = px_per_step / (frames_to_interpolate + 1)
//!
//! Velocities in a [`State`][chase_core::State] are therefore per display
//! frame, and one MDP step covers `px_per_step` pixels.
//!
//! Every field has a default matching the reference experiment, so a JSON
//! file only needs to list what it changes.

use chase_core::StepTiming;
use chase_env::{Boundary, SheepHeading, SpeedRange, WOLF_SUBTLETIES};
use serde::{Deserialize, Serialize};

use crate::{SimError, SimResult};

/// Inclusive speed bounds in visual degrees per second.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedConfig {
    pub min: f64,
    pub max: f64,
}

impl SpeedConfig {
    /// Pixel speed range per display frame.
    pub fn to_range(&self, ratio: f64, timing: &StepTiming) -> SimResult<SpeedRange> {
        let per_step = ratio / timing.mdp_steps_per_sec as f64;
        let frames = (timing.frames_to_interpolate() + 1) as f64;
        Ok(SpeedRange::new(
            (self.min * per_step).trunc() / frames,
            (self.max * per_step).trunc() / frames,
        )?)
    }
}

/// A rectangle in pixels, `[x0, x1] × [y0, y1]`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundaryConfig {
    pub x: [f64; 2],
    pub y: [f64; 2],
}

impl BoundaryConfig {
    pub fn to_boundary(&self) -> SimResult<Boundary> {
        Ok(Boundary::new((self.x[0], self.x[1]), (self.y[0], self.y[1]))?)
    }
}

/// Everything needed to build a [`Scenario`][crate::Scenario].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChaseConfig {
    /// Sheep = 0, wolf = 1, distractors = 2..num_agents.  Must be >= 2.
    pub num_agents: usize,

    /// Master seed of the batch.  The same seed always produces identical
    /// trajectories.
    pub seed: u64,

    pub timing: StepTiming,

    /// Step budget in seconds; `episode_secs * mdp_steps_per_sec` steps.
    pub episode_secs: u32,

    /// Fixed-heading period at the start of each trajectory.
    pub warm_up_secs: u32,

    /// Radians; `0.0` is rightward.
    pub warm_up_heading: f64,

    /// Display pixels per visual degree.
    pub distance_to_visual_degree_ratio: f64,

    pub sheep_speed:      SpeedConfig,
    pub wolf_speed:       SpeedConfig,
    pub distractor_speed: SpeedConfig,

    pub sheep_heading: SheepHeading,

    /// One value is drawn per trajectory (degrees of angular noise).
    pub wolf_subtleties: Vec<f64>,

    /// Walls agents reflect off during the rollout.
    pub arena: BoundaryConfig,

    /// Area initial positions are drawn from.
    pub reset_area: BoundaryConfig,

    /// Capture distance, visual degrees.
    pub killzone_degrees: f64,

    /// Minimum initial sheep–wolf distance, visual degrees.
    pub min_init_sheep_wolf_degrees: f64,

    /// Minimum initial sheep–distractor distance, visual degrees.
    pub min_init_sheep_distractor_degrees: f64,

    /// Rejection-sampling cap for initial positions.
    pub max_reset_attempts: u32,

    pub alive_bonus:   f64,
    pub death_penalty: f64,

    /// Size of the action compass.
    pub num_action_directions: usize,
}

impl Default for ChaseConfig {
    fn default() -> Self {
        Self {
            num_agents:                         2,
            seed:                               42,
            timing:                             StepTiming::default(),
            episode_secs:                       25,
            warm_up_secs:                       10,
            warm_up_heading:                    0.0,
            distance_to_visual_degree_ratio:    20.0,
            sheep_speed:                        SpeedConfig { min: 17.4, max: 23.2 },
            wolf_speed:                         SpeedConfig { min: 8.7, max: 14.5 },
            distractor_speed:                   SpeedConfig { min: 8.7, max: 14.5 },
            sheep_heading:                      SheepHeading::FollowAction,
            wolf_subtleties:                    WOLF_SUBTLETIES.to_vec(),
            arena:                              BoundaryConfig { x: [0.0, 600.0], y: [0.0, 600.0] },
            reset_area:                         BoundaryConfig { x: [0.0, 640.0], y: [0.0, 480.0] },
            killzone_degrees:                   2.5,
            min_init_sheep_wolf_degrees:        9.0,
            min_init_sheep_distractor_degrees:  2.5,
            max_reset_attempts:                 10_000,
            alive_bonus:                        0.01,
            death_penalty:                      -1.0,
            num_action_directions:              8,
        }
    }
}

impl ChaseConfig {
    /// Step budget per trajectory.
    #[inline]
    pub fn max_running_steps(&self) -> u32 {
        self.timing.steps_for_secs(self.episode_secs)
    }

    #[inline]
    pub fn warm_up_steps(&self) -> u32 {
        self.timing.steps_for_secs(self.warm_up_secs)
    }

    /// Convert visual degrees to pixels.
    #[inline]
    pub fn to_pixels(&self, degrees: f64) -> f64 {
        degrees * self.distance_to_visual_degree_ratio
    }

    /// Checks that do not need any component construction.
    pub fn validate(&self) -> SimResult<()> {
        if self.num_agents < 2 {
            return Err(SimError::Config(format!(
                "num_agents must be >= 2 (sheep and wolf), got {}",
                self.num_agents
            )));
        }
        if self.wolf_subtleties.is_empty() {
            return Err(SimError::Config("wolf_subtleties must not be empty".into()));
        }
        if !(self.distance_to_visual_degree_ratio.is_finite()
            && self.distance_to_visual_degree_ratio > 0.0)
        {
            return Err(SimError::Config(format!(
                "distance_to_visual_degree_ratio must be > 0, got {}",
                self.distance_to_visual_degree_ratio
            )));
        }
        if self.max_reset_attempts == 0 {
            return Err(SimError::Config("max_reset_attempts must be > 0".into()));
        }
        self.timing.validated()?;
        Ok(())
    }
}
