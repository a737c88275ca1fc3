//! Fractional-linear (Möbius) transformations `z ↦ (a·z + b) / (c·z + d)`
//! with coefficients held as [`PolarPoint`]s.

use crate::coords::{PoincareDiskPoint, PolarPoint, polar_to_disk};
use crate::errors::{HyperbolicError, Result};

/// A Möbius transformation.
///
/// The four coefficients are always scaled so that the largest modulus is
/// one. Scaling all of them by a common nonzero factor does not change the
/// map, and keeping them bounded stops magnitudes from drifting under long
/// chains of compositions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mobius {
    a: PolarPoint,
    b: PolarPoint,
    c: PolarPoint,
    d: PolarPoint,
}

impl Default for Mobius {
    fn default() -> Self {
        Mobius::identity()
    }
}

impl Mobius {
    /// Create a new [`Mobius`] from its coefficients, normalizing them.
    pub fn new(a: PolarPoint, b: PolarPoint, c: PolarPoint, d: PolarPoint) -> Self {
        Mobius { a, b, c, d }.normalized()
    }

    /// `z ↦ z`
    pub const fn identity() -> Self {
        Mobius {
            a: PolarPoint::one(),
            b: PolarPoint::zero(),
            c: PolarPoint::zero(),
            d: PolarPoint::one(),
        }
    }

    /// Coefficients in `(a, b, c, d)` order.
    pub const fn coefficients(&self) -> [PolarPoint; 4] {
        [self.a, self.b, self.c, self.d]
    }

    /// True only for the exact identity coefficients.
    pub fn is_identity(&self) -> bool {
        *self == Mobius::identity()
    }

    fn normalized(self) -> Self {
        let f = self.a.r.max(self.b.r).max(self.c.r).max(self.d.r);
        if f == 0.0 || f == 1.0 {
            return self;
        }
        let scale = 1.0 / f;
        Mobius {
            a: self.a.scale(scale),
            b: self.b.scale(scale),
            c: self.c.scale(scale),
            d: self.d.scale(scale),
        }
    }

    /// `a·d − b·c`
    pub fn determinant(&self) -> PolarPoint {
        self.a * self.d - self.b * self.c
    }

    /// Evaluate the map at `z`.
    ///
    /// # Errors
    /// [`HyperbolicError::DivisionByZero`] when `z` is the pole `−d/c`.
    pub fn apply(&self, z: PolarPoint) -> Result<PolarPoint> {
        (self.a * z + self.b).checked_div(self.c * z + self.d)
    }

    /// Value at the origin, `b / d`, without the multiply-by-zero path.
    pub fn apply_at_zero(&self) -> Result<PolarPoint> {
        self.b.checked_div(self.d)
    }

    /// Evaluate the map on a Poincaré disk point.
    ///
    /// # Errors
    /// Propagates a pole hit, and [`HyperbolicError::InvalidRadius`] if the
    /// image leaves the open unit disk (the map is not a disk automorphism).
    pub fn apply_to_disk(&self, p: &PoincareDiskPoint) -> Result<PoincareDiskPoint> {
        polar_to_disk(&self.apply(p.to_polar())?)
    }

    /// The transform that applies `first`, then `second` (that is `second ∘ first`).
    ///
    /// Matrix product of `[[a₂, b₂], [c₂, d₂]] · [[a₁, b₁], [c₁, d₁]]`.
    pub fn compose(first: &Mobius, second: &Mobius) -> Mobius {
        let Mobius { a: p, b: q, c: r, d: s } = *first;
        let Mobius { a, b, c, d } = *second;
        Mobius::new(
            a * p + b * r,
            a * q + b * s,
            c * p + d * r,
            c * q + d * s,
        )
    }

    /// Method form of [`Mobius::compose`]: `self`, then `next`.
    pub fn then(&self, next: &Mobius) -> Mobius {
        Mobius::compose(self, next)
    }

    /// Inverse map `(d, −b, −c, a) / det`.
    ///
    /// # Errors
    /// [`HyperbolicError::DivisionByZero`] if the determinant vanishes.
    pub fn inverse(&self) -> Result<Mobius> {
        let det = self.determinant();
        if det.r == 0.0 {
            return Err(HyperbolicError::DivisionByZero);
        }
        Ok(Mobius::new(
            self.d.checked_div(det)?,
            (-self.b).checked_div(det)?,
            (-self.c).checked_div(det)?,
            self.a.checked_div(det)?,
        ))
    }
}
