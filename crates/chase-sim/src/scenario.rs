//! Validated assembly of every component a rollout needs.

use chase_core::{AgentId, SimRng, StepTiming, Trajectory, TrajectoryId};
use chase_env::{
    Boundary, CaptureCheck, Interpolator, RoleSpeeds, Subtlety, TerminalPenaltyReward,
    TransitWithInterpolation, VelocityRoster, WarmUp,
};
use tracing::debug;

use crate::{
    ActionSpace, ChaseConfig, ForwardOneStep, InitConstraints, Policy, RandomPolicy, ResetState,
    RolloutMeta, RolloutObserver, SampleTrajectory, SimError, SimResult, TracingObserver,
};

/// The sampler type a [`Scenario`] builds for each trajectory.
pub type ChaseSampler = SampleTrajectory<
    TransitWithInterpolation<CaptureCheck>,
    TerminalPenaltyReward<CaptureCheck>,
    CaptureCheck,
>;

/// A ready-to-sample experiment condition.
///
/// Built from a [`ChaseConfig`] by [`Scenario::from_config`], which converts
/// visual degrees to pixels and validates every component up front.  Only
/// the wolf subtlety varies between trajectories; it is drawn from each
/// trajectory's own RNG, so a trajectory is fully determined by
/// `(config.seed, trajectory id)`.
///
/// # Example
///
/// ```rust,ignore
/// let scenario = Scenario::from_config(&ChaseConfig::default())?;
/// let policy = scenario.random_policy();
/// let trajectories = scenario.sample_batch(3, &policy)?;
/// ```
#[derive(Clone, Debug)]
pub struct Scenario {
    config:       ChaseConfig,
    timing:       StepTiming,
    speeds:       RoleSpeeds,
    warm_up:      WarmUp,
    subtleties:   Vec<Subtlety>,
    arena:        Boundary,
    capture:      CaptureCheck,
    reset:        ResetState,
    action_space: ActionSpace,
}

impl Scenario {
    /// Validate `config` and build every component.
    pub fn from_config(config: &ChaseConfig) -> SimResult<Self> {
        config.validate()?;

        let timing = config.timing.validated()?;
        let ratio = config.distance_to_visual_degree_ratio;
        let speeds = RoleSpeeds {
            sheep:      config.sheep_speed.to_range(ratio, &timing)?,
            wolf:       config.wolf_speed.to_range(ratio, &timing)?,
            distractor: config.distractor_speed.to_range(ratio, &timing)?,
        };
        let warm_up = WarmUp {
            steps:   config.warm_up_steps(),
            heading: config.warm_up_heading,
        };
        let subtleties = config
            .wolf_subtleties
            .iter()
            .map(|&s| Subtlety::new(s))
            .collect::<Result<Vec<_>, _>>()?;

        let arena = config.arena.to_boundary()?;
        let capture = CaptureCheck::new(AgentId(1), AgentId(0), config.to_pixels(config.killzone_degrees))?;

        let constraints = InitConstraints::standard(
            config.num_agents,
            config.to_pixels(config.min_init_sheep_wolf_degrees),
            config.to_pixels(config.min_init_sheep_distractor_degrees),
        );
        let reset = ResetState::new(
            config.reset_area.to_boundary()?,
            config.num_agents,
            constraints,
            config.max_reset_attempts,
        );
        let action_space = ActionSpace::compass(config.num_action_directions)?;

        debug!(
            agents = config.num_agents,
            max_steps = config.max_running_steps(),
            frames_to_interpolate = timing.frames_to_interpolate(),
            sheep_speed = ?(speeds.sheep.min(), speeds.sheep.max()),
            wolf_speed = ?(speeds.wolf.min(), speeds.wolf.max()),
            killzone = capture.radius(),
            "scenario built",
        );

        Ok(Self {
            config: config.clone(),
            timing,
            speeds,
            warm_up,
            subtleties,
            arena,
            capture,
            reset,
            action_space,
        })
    }

    #[inline]
    pub fn config(&self) -> &ChaseConfig {
        &self.config
    }

    #[inline]
    pub fn arena(&self) -> &Boundary {
        &self.arena
    }

    #[inline]
    pub fn capture(&self) -> CaptureCheck {
        self.capture
    }

    #[inline]
    pub fn speeds(&self) -> &RoleSpeeds {
        &self.speeds
    }

    #[inline]
    pub fn action_space(&self) -> &ActionSpace {
        &self.action_space
    }

    #[inline]
    pub fn frames_to_interpolate(&self) -> u32 {
        self.timing.frames_to_interpolate()
    }

    /// Uniform policy over this scenario's action compass.
    pub fn random_policy(&self) -> RandomPolicy {
        RandomPolicy::new(self.action_space.clone())
    }

    /// Renderer-side interpolator matching the rollout's sub-frame motion.
    pub fn interpolator(&self) -> Interpolator<CaptureCheck> {
        Interpolator::new(self.frames_to_interpolate(), self.arena, self.capture)
    }

    /// Build the sampler for one trajectory with the given wolf subtlety.
    pub fn sampler(&self, subtlety: Subtlety) -> SimResult<ChaseSampler> {
        let roster = VelocityRoster::standard(
            self.config.num_agents,
            self.speeds,
            self.config.sheep_heading,
            subtlety,
            self.warm_up,
        )?;
        let transition = TransitWithInterpolation::new(
            self.frames_to_interpolate(),
            roster,
            self.arena,
            self.capture,
        );
        let reward = TerminalPenaltyReward::new(
            self.config.alive_bonus,
            self.config.death_penalty,
            self.capture,
        );
        Ok(SampleTrajectory::new(
            self.config.max_running_steps(),
            self.capture,
            self.reset.clone(),
            ForwardOneStep::new(transition, reward),
        ))
    }

    /// Sample trajectory `id`.  Draws the wolf subtlety, then rolls out.
    pub fn sample<P, O>(&self, id: TrajectoryId, policy: &P, observer: &mut O) -> SimResult<Trajectory>
    where
        P: Policy + ?Sized,
        O: RolloutObserver + ?Sized,
    {
        let seed = SimRng::mix(self.config.seed, id.0 as u64);
        let mut rng = SimRng::for_trajectory(self.config.seed, id);
        let subtlety = *rng
            .choose(&self.subtleties)
            .ok_or_else(|| SimError::Config("wolf_subtleties must not be empty".into()))?;

        let meta = RolloutMeta { id, seed, wolf_subtlety: subtlety.degrees() };
        self.sampler(subtlety)?.run(meta, policy, &mut rng, observer)
    }

    /// Sample trajectories `0..count`, logging each through
    /// [`TracingObserver`].
    ///
    /// With the `parallel` feature the rollouts run on Rayon's pool; the
    /// returned order and contents are the same either way.
    pub fn sample_batch<P: Policy>(&self, count: usize, policy: &P) -> SimResult<Vec<Trajectory>> {
        #[cfg(not(feature = "parallel"))]
        {
            (0..count)
                .map(|i| self.sample(TrajectoryId(i as u32), policy, &mut TracingObserver))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            (0..count)
                .into_par_iter()
                .map(|i| self.sample(TrajectoryId(i as u32), policy, &mut TracingObserver))
                .collect()
        }
    }
}
