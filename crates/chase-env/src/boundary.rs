//! Axis-aligned arena walls and velocity reflection.

use chase_core::{CoreError, SimRng, State, Vec2};

use crate::EnvResult;

/// A closed interval `[min, max]` on one axis, with `min < max`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AxisRange {
    min: f64,
    max: f64,
}

impl AxisRange {
    pub fn new(axis: &'static str, min: f64, max: f64) -> EnvResult<Self> {
        if !(min.is_finite() && max.is_finite()) || min >= max {
            return Err(CoreError::InvalidBoundary { axis, min, max }.into());
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
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Clamp `coord` into the range, flipping `vel` if it was outside.
    #[inline]
    fn reflect(&self, coord: f64, vel: f64) -> (f64, f64) {
        if coord > self.max {
            (self.max, -vel)
        } else if coord < self.min {
            (self.min, -vel)
        } else {
            (coord, vel)
        }
    }
}

/// The rectangular arena `[x.min, x.max] × [y.min, y.max]`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Boundary {
    pub x: AxisRange,
    pub y: AxisRange,
}

impl Boundary {
    /// Fails with [`CoreError::InvalidBoundary`] when `min >= max` on either
    /// axis.
    pub fn new(x: (f64, f64), y: (f64, f64)) -> EnvResult<Self> {
        Ok(Self {
            x: AxisRange::new("x", x.0, x.1)?,
            y: AxisRange::new("y", y.0, y.1)?,
        })
    }

    #[inline]
    pub fn contains(&self, p: Vec2) -> bool {
        (self.x.min..=self.x.max).contains(&p.x) && (self.y.min..=self.y.max).contains(&p.y)
    }

    /// Correct an unconstrained `(position, velocity)` pair.
    ///
    /// Each axis is handled independently: a coordinate past a wall is
    /// clamped onto it and that axis's velocity component is negated.  A
    /// corner overshoot therefore flips both components.
    #[inline]
    pub fn reflect(&self, position: Vec2, velocity: Vec2) -> (Vec2, Vec2) {
        let (px, vx) = self.x.reflect(position.x, velocity.x);
        let (py, vy) = self.y.reflect(position.y, velocity.y);
        (Vec2::new(px, py), Vec2::new(vx, vy))
    }

    /// Uniform random point inside the arena.
    pub fn sample_point(&self, rng: &mut SimRng) -> Vec2 {
        Vec2::new(
            rng.gen_range(self.x.min..=self.x.max),
            rng.gen_range(self.y.min..=self.y.max),
        )
    }

    /// Move every agent of `state` by its velocity once, reflecting off the
    /// walls.  One display frame of motion.
    pub fn advance(&self, state: &mut State) {
        let (positions, velocities) = state.split_mut();
        for (p, v) in positions.iter_mut().zip(velocities.iter_mut()) {
            let (np, nv) = self.reflect(*p + *v, *v);
            *p = np;
            *v = nv;
        }
    }
}
