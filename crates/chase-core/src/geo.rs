//! Plane vector type and polar-coordinate helpers.
//!
//! Everything in the harness lives on a flat 2-D plane measured in display
//! pixels, so a plain `f64` pair is all the geometry needed.  Angles are in
//! radians, measured counter-clockwise from the +x axis, in `(-π, π]`.

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A 2-D vector used for both positions and velocities.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector pointing along `angle` radians.
    #[inline]
    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    /// Euclidean length.
    #[inline]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Vec2) -> f64 {
        (other - self).length()
    }

    /// Heading in radians; `0.0` for the zero vector.
    #[inline]
    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    #[inline]
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vec2 {
    #[inline]
    fn add_assign(&mut self, rhs: Vec2) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    #[inline]
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;
    #[inline]
    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

impl Neg for Vec2 {
    type Output = Vec2;
    #[inline]
    fn neg(self) -> Vec2 {
        Vec2::new(-self.x, -self.y)
    }
}

impl std::fmt::Display for Vec2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

// ── Polar ─────────────────────────────────────────────────────────────────────

/// A vector in polar form.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Polar {
    /// Heading in radians.
    pub angle:  f64,
    /// Magnitude; never negative when produced by [`cartesian_to_polar`].
    pub radius: f64,
}

impl Polar {
    #[inline]
    pub fn new(angle: f64, radius: f64) -> Self {
        Self { angle, radius }
    }
}

/// Convert a Cartesian vector to polar form.
#[inline]
pub fn cartesian_to_polar(v: Vec2) -> Polar {
    Polar { angle: v.angle(), radius: v.length() }
}

/// Convert a polar vector back to Cartesian form.
#[inline]
pub fn polar_to_cartesian(p: Polar) -> Vec2 {
    Vec2::from_angle(p.angle) * p.radius
}
