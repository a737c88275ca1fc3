//! Complex arithmetic on [`PolarPoint`]s.
//!
//! These are plain complex-number operations on the ambient plane; nothing
//! here is intrinsically hyperbolic. They exist to build and evaluate Möbius
//! coefficients.

use super::{PolarPoint, cartesian_to_polar, polar_to_cartesian};
use crate::errors::{HyperbolicError, Result};
use crate::float_types::{PI, Real};
use std::ops::{Add, Mul, Neg, Sub};

impl Mul for PolarPoint {
    type Output = PolarPoint;

    /// Radii multiply, angles add.
    #[inline]
    fn mul(self, rhs: PolarPoint) -> PolarPoint {
        PolarPoint::new(self.r * rhs.r, self.angle + rhs.angle)
    }
}

impl Add for PolarPoint {
    type Output = PolarPoint;

    fn add(self, rhs: PolarPoint) -> PolarPoint {
        // exact zeros pass the other operand through untouched
        if rhs.r == 0.0 {
            return self;
        }
        if self.r == 0.0 {
            return rhs;
        }
        let sum = polar_to_cartesian(&self).coords + polar_to_cartesian(&rhs).coords;
        cartesian_to_polar(&sum.into())
    }
}

impl Sub for PolarPoint {
    type Output = PolarPoint;

    fn sub(self, rhs: PolarPoint) -> PolarPoint {
        if rhs.r == 0.0 {
            return self;
        }
        if self.r == 0.0 {
            return -rhs;
        }
        let difference = polar_to_cartesian(&self) - polar_to_cartesian(&rhs);
        cartesian_to_polar(&difference.into())
    }
}

impl Neg for PolarPoint {
    type Output = PolarPoint;

    /// Rotation by a half turn.
    #[inline]
    fn neg(self) -> PolarPoint {
        PolarPoint::new(self.r, self.angle + PI)
    }
}

impl PolarPoint {
    /// Radii divide, angles subtract.
    ///
    /// # Errors
    /// [`HyperbolicError::DivisionByZero`] if `rhs` has zero radius.
    #[inline]
    pub fn checked_div(self, rhs: PolarPoint) -> Result<PolarPoint> {
        if rhs.r == 0.0 {
            return Err(HyperbolicError::DivisionByZero);
        }
        Ok(PolarPoint::new(self.r / rhs.r, self.angle - rhs.angle))
    }

    /// Complex conjugate (mirror in the real axis).
    #[inline]
    pub fn conj(self) -> PolarPoint {
        PolarPoint::new(self.r, -self.angle)
    }

    /// Inversion through the unit circle: `1/r` at the same angle.
    ///
    /// # Errors
    /// [`HyperbolicError::DivisionByZero`] for the origin.
    #[inline]
    pub fn inverse_radius(self) -> Result<PolarPoint> {
        if self.r == 0.0 {
            return Err(HyperbolicError::DivisionByZero);
        }
        Ok(PolarPoint::new(1.0 / self.r, self.angle))
    }

    /// Multiply the modulus by a real factor, keeping the angle.
    #[inline]
    pub fn scale(self, factor: Real) -> PolarPoint {
        PolarPoint::new(self.r * factor, self.angle)
    }
}

/// Free-function form of [`PolarPoint::checked_div`].
#[inline]
pub fn complex_div(p: PolarPoint, q: PolarPoint) -> Result<PolarPoint> {
    p.checked_div(q)
}
