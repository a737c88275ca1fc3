//! Point types for the three coordinate systems the crate works in, and the
//! conversions between them.
//!
//! [`PolarPoint`] is the hub: every conversion goes through it, and the
//! complex arithmetic in [`complex`] is defined on it.

use crate::errors::{HyperbolicError, Result};
use crate::float_types::{
    CENTER_TOLERANCE, PI, Real, angle_between, disk_tolerance, normalize_angle, tolerance,
};
use nalgebra::Point2;

pub mod complex;

/// A point of the ambient Euclidean plane.
pub type CartesianPoint = Point2<Real>;

/// A point in polar form; doubles as a complex number `r·e^(i·angle)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarPoint {
    /// Euclidean distance from the origin, never negative
    pub r: Real,
    /// Angle in `(−π, π]`
    pub angle: Real,
}

/// A point of the Poincaré disk addressed by its hyperbolic distance `d`
/// from the disk center and its angle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PoincareDiskPoint {
    pub d: Real,
    pub angle: Real,
}

impl PolarPoint {
    /// Create a new [`PolarPoint`], normalizing the angle.
    /// A negative radius is folded onto the opposite ray.
    #[inline]
    pub fn new(r: Real, angle: Real) -> Self {
        if r < 0.0 {
            return PolarPoint {
                r: -r,
                angle: normalize_angle(angle + PI),
            };
        }
        PolarPoint {
            r,
            angle: normalize_angle(angle),
        }
    }

    /// The complex zero.
    #[inline]
    pub const fn zero() -> Self {
        PolarPoint { r: 0.0, angle: 0.0 }
    }

    /// The complex one, `1∠0`.
    #[inline]
    pub const fn one() -> Self {
        PolarPoint { r: 1.0, angle: 0.0 }
    }

    /// Ideal point on the unit circle at `angle`.
    #[inline]
    pub fn unit(angle: Real) -> Self {
        PolarPoint::new(1.0, angle)
    }

    #[inline]
    pub fn to_cartesian(&self) -> CartesianPoint {
        polar_to_cartesian(self)
    }

    #[inline]
    pub fn to_disk(&self) -> Result<PoincareDiskPoint> {
        polar_to_disk(self)
    }

    /// Tolerance equality: both near the origin, or radius and angle both
    /// within [`tolerance`].
    pub fn approx_eq(&self, other: &PolarPoint) -> bool {
        approx::AbsDiffEq::abs_diff_eq(self, other, tolerance())
    }

    /// True when the radius is within [`tolerance`] of zero.
    #[inline]
    pub fn is_near_zero(&self) -> bool {
        self.r <= tolerance()
    }
}

impl PoincareDiskPoint {
    /// Create a new [`PoincareDiskPoint`], normalizing the angle.
    #[inline]
    pub fn new(d: Real, angle: Real) -> Self {
        PoincareDiskPoint {
            d: d.max(0.0),
            angle: normalize_angle(angle),
        }
    }

    /// The disk center.
    #[inline]
    pub const fn center() -> Self {
        PoincareDiskPoint { d: 0.0, angle: 0.0 }
    }

    #[inline]
    pub fn to_polar(&self) -> PolarPoint {
        disk_to_polar(self)
    }

    #[inline]
    pub fn to_cartesian(&self) -> CartesianPoint {
        disk_to_cartesian(self)
    }

    /// True when the point lies within [`CENTER_TOLERANCE`] of the center.
    #[inline]
    pub fn is_center(&self) -> bool {
        self.d <= CENTER_TOLERANCE
    }

    /// Tolerance equality used for vertex sharing: both at the center, or
    /// distance and angle both within [`disk_tolerance`].
    pub fn approx_eq(&self, other: &PoincareDiskPoint) -> bool {
        if self.is_center() && other.is_center() {
            return true;
        }
        let eps = disk_tolerance();
        (self.d - other.d).abs() <= eps && angle_between(self.angle, other.angle) <= eps
    }
}

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Conversions
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

pub fn polar_to_cartesian(p: &PolarPoint) -> CartesianPoint {
    let (sin, cos) = p.angle.sin_cos();
    Point2::new(p.r * cos, p.r * sin)
}

pub fn cartesian_to_polar(c: &CartesianPoint) -> PolarPoint {
    PolarPoint::new(c.x.hypot(c.y), c.y.atan2(c.x))
}

/// **Mathematical Foundation: Disk Radius Transform**
///
/// Hyperbolic distance from the center of a point at Euclidean radius `r`:
/// ```text
/// d = acosh((1 + r²) / (1 − r²)) = 2·atanh(r)
/// ```
/// The `atanh` form is used; it does not lose precision near `r = 0`.
///
/// # Errors
/// [`HyperbolicError::InvalidRadius`] unless `0 ≤ r < 1`.
pub fn polar_radius_to_disk_radius(r: Real) -> Result<Real> {
    if !(0.0..1.0).contains(&r) {
        return Err(HyperbolicError::InvalidRadius { radius: r });
    }
    Ok(2.0 * r.atanh())
}

/// Inverse of [`polar_radius_to_disk_radius`]:
/// ```text
/// r = sqrt((cosh d − 1) / (cosh d + 1)) = tanh(d / 2)
/// ```
pub fn disk_radius_to_polar_radius(d: Real) -> Real {
    (d / 2.0).tanh()
}

pub fn polar_to_disk(p: &PolarPoint) -> Result<PoincareDiskPoint> {
    Ok(PoincareDiskPoint {
        d: polar_radius_to_disk_radius(p.r)?,
        angle: p.angle,
    })
}

pub fn disk_to_polar(p: &PoincareDiskPoint) -> PolarPoint {
    PolarPoint {
        r: disk_radius_to_polar_radius(p.d),
        angle: p.angle,
    }
}

pub fn disk_to_cartesian(p: &PoincareDiskPoint) -> CartesianPoint {
    polar_to_cartesian(&disk_to_polar(p))
}

impl From<CartesianPoint> for PolarPoint {
    fn from(c: CartesianPoint) -> Self {
        cartesian_to_polar(&c)
    }
}

impl From<PolarPoint> for CartesianPoint {
    fn from(p: PolarPoint) -> Self {
        polar_to_cartesian(&p)
    }
}

impl From<PoincareDiskPoint> for PolarPoint {
    fn from(p: PoincareDiskPoint) -> Self {
        disk_to_polar(&p)
    }
}

impl TryFrom<PolarPoint> for PoincareDiskPoint {
    type Error = HyperbolicError;

    fn try_from(p: PolarPoint) -> Result<Self> {
        polar_to_disk(&p)
    }
}

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// approx integration
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

impl approx::AbsDiffEq for PolarPoint {
    type Epsilon = Real;

    fn default_epsilon() -> Self::Epsilon {
        tolerance()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        (self.r <= epsilon && other.r <= epsilon)
            || ((self.r - other.r).abs() <= epsilon
                && angle_between(self.angle, other.angle) <= epsilon)
    }
}

impl approx::AbsDiffEq for PoincareDiskPoint {
    type Epsilon = Real;

    fn default_epsilon() -> Self::Epsilon {
        disk_tolerance()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        (self.d <= epsilon && other.d <= epsilon)
            || ((self.d - other.d).abs() <= epsilon
                && angle_between(self.angle, other.angle) <= epsilon)
    }
}
