//! Per-role velocity preparation.
//!
//! Every MDP step each agent gets a fresh velocity from its
//! [`VelocityPolicy`].  The policy is a tagged enum over the three roles; each
//! variant dispatches to a pure function whose only side effect is drawing
//! from the supplied [`SimRng`].
//!
//! # Warm-up
//!
//! For the first `warm_up.steps` steps of a trajectory every role moves along
//! the fixed `warm_up.heading` at its minimum speed.  Afterwards:
//!
//! | Role       | Heading                                             | Speed          |
//! |------------|-----------------------------------------------------|----------------|
//! | Sheep      | action direction (or uniform, see [`SheepHeading`]) | U[min, max]    |
//! | Wolf       | bearing to target + N(0, subtlety°)                 | U[min, max]    |
//! | Distractor | uniform                                             | U[min, max]    |

use chase_core::{Action, AgentId, CoreError, Role, SimRng, State, Step, Vec2, cartesian_to_polar};

use crate::{EnvError, EnvResult};

/// Wolf subtlety tiers of the chasing experiment, from "almost uniform
/// random" (500°) to "almost direct pursuit" (0.001°).
pub const WOLF_SUBTLETIES: [f64; 7] = [500.0, 11.0, 3.3, 1.83, 0.92, 0.31, 0.001];

// ── SpeedRange ────────────────────────────────────────────────────────────────

/// Inclusive speed bounds, in distance units per display frame.  A
/// transition with `frames_to_interpolate` sub-frames moves an agent
/// `speed * (frames_to_interpolate + 1)` per MDP step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpeedRange {
    min: f64,
    max: f64,
}

impl SpeedRange {
    /// Fails with [`CoreError::InvalidRange`] if `min > max`, either bound is
    /// negative, or either bound is not finite.
    pub fn new(min: f64, max: f64) -> EnvResult<Self> {
        if !(min.is_finite() && max.is_finite()) || min < 0.0 || min > max {
            return Err(CoreError::InvalidRange { what: "speed", min, max }.into());
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    #[inline]
    pub fn contains(&self, speed: f64) -> bool {
        (self.min..=self.max).contains(&speed)
    }

    /// Uniform draw in `[min, max]`.
    #[inline]
    pub fn sample(&self, rng: &mut SimRng) -> f64 {
        rng.gen_range(self.min..=self.max)
    }
}

// ── Subtlety ──────────────────────────────────────────────────────────────────

/// Angular noise of the wolf's pursuit, as a standard deviation in degrees.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Subtlety(f64);

impl Subtlety {
    pub fn new(degrees: f64) -> EnvResult<Self> {
        if !degrees.is_finite() || degrees < 0.0 {
            return Err(EnvError::InvalidSubtlety(degrees));
        }
        Ok(Self(degrees))
    }

    #[inline]
    pub fn degrees(self) -> f64 {
        self.0
    }

    #[inline]
    pub fn std_dev_radians(self) -> f64 {
        self.0.to_radians()
    }
}

// ── WarmUp ────────────────────────────────────────────────────────────────────

/// The fixed-heading period at the start of every trajectory.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WarmUp {
    pub steps:   u32,
    /// Radians; `0.0` moves rightward.
    pub heading: f64,
}

impl WarmUp {
    pub const NONE: WarmUp = WarmUp { steps: 0, heading: 0.0 };

    #[inline]
    pub fn active(&self, step: Step) -> bool {
        step.in_warm_up(self.steps)
    }

    /// Warm-up velocity: the fixed heading at the range's minimum speed.
    #[inline]
    pub fn velocity(&self, speed: &SpeedRange) -> Vec2 {
        Vec2::from_angle(self.heading) * speed.min()
    }
}

// ── SheepHeading ──────────────────────────────────────────────────────────────

/// How the sheep picks its post-warm-up heading.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SheepHeading {
    /// Move along the sampled action's direction.
    #[default]
    FollowAction,
    /// Uniformly random every step; the sampled action is only recorded.
    Random,
}

// ── Role functions ────────────────────────────────────────────────────────────

/// Sheep velocity for one step.
pub fn sheep_velocity(
    speed:   &SpeedRange,
    heading: SheepHeading,
    warm_up: &WarmUp,
    step:    Step,
    action:  Action,
    rng:     &mut SimRng,
) -> Vec2 {
    if warm_up.active(step) {
        return warm_up.velocity(speed);
    }
    let angle = match heading {
        SheepHeading::Random       => rng.angle(),
        SheepHeading::FollowAction => action.angle(),
    };
    Vec2::from_angle(angle) * speed.sample(rng)
}

/// Wolf velocity for one step: bearing toward `target` perturbed by Gaussian
/// noise of `subtlety` degrees.
pub fn wolf_velocity(
    speed:    &SpeedRange,
    subtlety: Subtlety,
    warm_up:  &WarmUp,
    step:     Step,
    own:      Vec2,
    target:   Vec2,
    rng:      &mut SimRng,
) -> Vec2 {
    if warm_up.active(step) {
        return warm_up.velocity(speed);
    }
    let bearing = cartesian_to_polar(target - own).angle;
    let angle = bearing + rng.normal(0.0, subtlety.std_dev_radians());
    Vec2::from_angle(angle) * speed.sample(rng)
}

/// Distractor velocity for one step: no pursuit bias.
pub fn distractor_velocity(
    speed:   &SpeedRange,
    warm_up: &WarmUp,
    step:    Step,
    rng:     &mut SimRng,
) -> Vec2 {
    if warm_up.active(step) {
        return warm_up.velocity(speed);
    }
    Vec2::from_angle(rng.angle()) * speed.sample(rng)
}

// ── VelocityPolicy ────────────────────────────────────────────────────────────

/// One agent's velocity policy, tagged by role.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum VelocityPolicy {
    Sheep {
        speed:   SpeedRange,
        heading: SheepHeading,
    },
    Wolf {
        speed:    SpeedRange,
        target:   AgentId,
        subtlety: Subtlety,
    },
    Distractor {
        speed: SpeedRange,
    },
}

impl VelocityPolicy {
    pub fn role(&self) -> Role {
        match self {
            VelocityPolicy::Sheep { .. }      => Role::Sheep,
            VelocityPolicy::Wolf { .. }       => Role::Wolf,
            VelocityPolicy::Distractor { .. } => Role::Distractor,
        }
    }

    pub fn speed(&self) -> &SpeedRange {
        match self {
            VelocityPolicy::Sheep { speed, .. }
            | VelocityPolicy::Wolf { speed, .. }
            | VelocityPolicy::Distractor { speed } => speed,
        }
    }

    /// Prepare `agent`'s velocity for `step`.
    pub fn prepare(
        &self,
        agent:   AgentId,
        warm_up: &WarmUp,
        step:    Step,
        state:   &State,
        action:  Action,
        rng:     &mut SimRng,
    ) -> EnvResult<Vec2> {
        let v = match *self {
            VelocityPolicy::Sheep { speed, heading } => {
                sheep_velocity(&speed, heading, warm_up, step, action, rng)
            }
            VelocityPolicy::Wolf { speed, target, subtlety } => {
                let own = state.position(agent)?;
                let target = state.position(target)?;
                wolf_velocity(&speed, subtlety, warm_up, step, own, target, rng)
            }
            VelocityPolicy::Distractor { speed } => {
                distractor_velocity(&speed, warm_up, step, rng)
            }
        };
        Ok(v)
    }
}

// ── VelocityRoster ────────────────────────────────────────────────────────────

/// Speed ranges for the three roles.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RoleSpeeds {
    pub sheep:      SpeedRange,
    pub wolf:       SpeedRange,
    pub distractor: SpeedRange,
}

/// Velocity policies for every agent of a trajectory, indexed by `AgentId`.
#[derive(Clone, Debug, PartialEq)]
pub struct VelocityRoster {
    policies: Vec<VelocityPolicy>,
    warm_up:  WarmUp,
}

impl VelocityRoster {
    /// Validates that every wolf's target is inside the roster.
    pub fn new(policies: Vec<VelocityPolicy>, warm_up: WarmUp) -> EnvResult<Self> {
        for (i, policy) in policies.iter().enumerate() {
            if let VelocityPolicy::Wolf { target, .. } = policy {
                if target.index() >= policies.len() {
                    return Err(CoreError::AgentNotFound(*target).into());
                }
                if target.index() == i {
                    return Err(EnvError::SelfPursuit);
                }
            }
        }
        Ok(Self { policies, warm_up })
    }

    /// The standard layout (sheep = 0, wolf = 1 chasing 0, distractors
    /// 2..n) for `agent_count` agents.
    pub fn standard(
        agent_count:   usize,
        speeds:        RoleSpeeds,
        sheep_heading: SheepHeading,
        subtlety:      Subtlety,
        warm_up:       WarmUp,
    ) -> EnvResult<Self> {
        let policies = Role::standard_layout(agent_count)
            .into_iter()
            .map(|role| match role {
                Role::Sheep => VelocityPolicy::Sheep {
                    speed:   speeds.sheep,
                    heading: sheep_heading,
                },
                Role::Wolf => VelocityPolicy::Wolf {
                    speed:  speeds.wolf,
                    target: AgentId(0),
                    subtlety,
                },
                Role::Distractor => VelocityPolicy::Distractor { speed: speeds.distractor },
            })
            .collect();
        Self::new(policies, warm_up)
    }

    #[inline]
    pub fn agent_count(&self) -> usize {
        self.policies.len()
    }

    #[inline]
    pub fn policies(&self) -> &[VelocityPolicy] {
        &self.policies
    }

    #[inline]
    pub fn warm_up(&self) -> &WarmUp {
        &self.warm_up
    }

    /// Prepare new velocities for every agent, in `AgentId` order.
    ///
    /// Wolves read the target's position from `state`, i.e. the position
    /// *before* this step's movement.
    pub fn prepare_all(
        &self,
        step:   Step,
        state:  &State,
        action: Action,
        rng:    &mut SimRng,
    ) -> EnvResult<Vec<Vec2>> {
        if state.agent_count() != self.policies.len() {
            return Err(EnvError::AgentCountMismatch {
                expected: self.policies.len(),
                got:      state.agent_count(),
                what:     "state",
            });
        }
        self.policies
            .iter()
            .enumerate()
            .map(|(i, policy)| {
                policy.prepare(AgentId(i as u32), &self.warm_up, step, state, action, rng)
            })
            .collect()
    }
}
