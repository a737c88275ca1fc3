//! Geodesics of the Poincaré disk and the isometries built from them.
//!
//! A geodesic is either a diameter of the unit disk or an arc of a circle
//! that meets the unit circle at right angles. Reflection across a geodesic
//! is the building block of the tiling; translation along one is what the
//! view layer uses to recentre the picture.

use crate::coords::{
    CartesianPoint, PoincareDiskPoint, PolarPoint, cartesian_to_polar, disk_radius_to_polar_radius,
    polar_to_disk,
};
use crate::errors::{HyperbolicError, Result};
use crate::float_types::{PI, Real, normalize_half_angle, tolerance};
use crate::mobius::Mobius;

/// A hyperbolic line of the disk model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geodesic {
    /// A diameter, identified by its direction folded into `(−π/2, π/2]`
    Linear { angle: Real },
    /// An arc of the circle with this Euclidean `center` and `radius`
    Circular { center: PolarPoint, radius: Real },
}

impl Geodesic {
    /// The geodesic through two points.
    ///
    /// **Mathematical Foundation: Orthogonal Circle**
    ///
    /// A circle through `p` is orthogonal to the unit circle exactly when it
    /// also passes through the inverse point `p* = p / |p|²`. The geodesic
    /// circle is therefore the circumcircle of `p`, `q` and `p*`:
    /// ```text
    /// D  = 2·(x₁−x₂)(y₁−y₃) − 2·(x₁−x₃)(y₁−y₂)
    /// cx = ((|p₁|²−|p₂|²)(y₁−y₃) − (|p₁|²−|p₃|²)(y₁−y₂)) / D
    /// cy = ((x₁−x₂)(|p₁|²−|p₃|²) − (x₁−x₃)(|p₁|²−|p₂|²)) / D
    /// ```
    /// Points on a common diameter (or either point at the origin) give
    /// `D = 0`; those are the linear case.
    ///
    /// # Errors
    /// [`HyperbolicError::DegenerateGeodesic`] if the points coincide.
    pub fn from_two_points(p: &PolarPoint, q: &PolarPoint) -> Result<Geodesic> {
        if p.approx_eq(q) {
            return Err(HyperbolicError::DegenerateGeodesic);
        }
        if p.is_near_zero() {
            return Ok(Geodesic::Linear {
                angle: normalize_half_angle(q.angle),
            });
        }
        if q.is_near_zero() {
            return Ok(Geodesic::Linear {
                angle: normalize_half_angle(p.angle),
            });
        }
        let p_half = normalize_half_angle(p.angle);
        if normalize_half_angle(p_half - normalize_half_angle(q.angle)).abs() <= tolerance() {
            return Ok(Geodesic::Linear { angle: p_half });
        }

        let (outer, inner) = if p.r < q.r { (q, p) } else { (p, q) };
        let inverted = outer.inverse_radius()?;
        let a = outer.to_cartesian();
        let center = circumcenter(&a, &inner.to_cartesian(), &inverted.to_cartesian())
            .ok_or(HyperbolicError::DegenerateGeodesic)?;
        Ok(Geodesic::Circular {
            center: cartesian_to_polar(&center),
            radius: (center - a).norm(),
        })
    }

    /// Geodesic through two disk points.
    pub fn from_disk_points(p: &PoincareDiskPoint, q: &PoincareDiskPoint) -> Result<Geodesic> {
        Geodesic::from_two_points(&p.to_polar(), &q.to_polar())
    }

    pub fn is_linear(&self) -> bool {
        matches!(self, Geodesic::Linear { .. })
    }

    /// The two ideal endpoints where the geodesic meets the unit circle.
    ///
    /// For a circular geodesic the centre, the origin and an endpoint form a
    /// right triangle with legs `1` and `radius`, so the endpoints sit at
    /// `θc ± atan(radius)`.
    pub fn ideal_points(&self) -> (PolarPoint, PolarPoint) {
        match *self {
            Geodesic::Linear { angle } => (PolarPoint::unit(angle), PolarPoint::unit(angle + PI)),
            Geodesic::Circular { center, radius } => {
                let spread = radius.atan();
                (
                    PolarPoint::unit(center.angle + spread),
                    PolarPoint::unit(center.angle - spread),
                )
            },
        }
    }

    /// Mirror `point` across this geodesic.
    ///
    /// # Errors
    /// [`HyperbolicError::DivisionByZero`] for the centre of a circular
    /// geodesic (which lies outside the disk).
    pub fn reflect(&self, point: &PolarPoint) -> Result<PolarPoint> {
        match *self {
            Geodesic::Linear { angle } => Ok(PolarPoint::new(point.r, 2.0 * angle - point.angle)),
            Geodesic::Circular { center, radius } => {
                let c = center.to_cartesian();
                let offset = point.to_cartesian() - c;
                let distance_sq = offset.norm_squared();
                if distance_sq == 0.0 {
                    return Err(HyperbolicError::DivisionByZero);
                }
                Ok(cartesian_to_polar(&(c + offset * (radius * radius / distance_sq))))
            },
        }
    }
}

/// Circumcentre of three points, or `None` when they are collinear.
pub fn circumcenter(
    p1: &CartesianPoint,
    p2: &CartesianPoint,
    p3: &CartesianPoint,
) -> Option<CartesianPoint> {
    let (x1, y1) = (p1.x, p1.y);
    let (x2, y2) = (p2.x, p2.y);
    let (x3, y3) = (p3.x, p3.y);
    let denom = 2.0 * (x1 - x2) * (y1 - y3) - 2.0 * (x1 - x3) * (y1 - y2);
    if denom == 0.0 {
        return None;
    }
    let s1 = x1 * x1 + y1 * y1;
    let s2 = x2 * x2 + y2 * y2;
    let s3 = x3 * x3 + y3 * y3;
    let x = ((s1 - s2) * (y1 - y3) - (s1 - s3) * (y1 - y2)) / denom;
    let y = ((x1 - x2) * (s1 - s3) - (x1 - x3) * (s1 - s2)) / denom;
    Some(CartesianPoint::new(x, y))
}

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Reflection
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// Reflection across a fixed geodesic, reusable for many points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reflection {
    geodesic: Geodesic,
}

impl Reflection {
    pub fn new(geodesic: Geodesic) -> Self {
        Reflection { geodesic }
    }

    pub fn geodesic(&self) -> &Geodesic {
        &self.geodesic
    }

    pub fn apply(&self, point: &PolarPoint) -> Result<PolarPoint> {
        self.geodesic.reflect(point)
    }

    /// Reflect a disk point.
    ///
    /// # Errors
    /// [`HyperbolicError::InvalidRadius`] if rounding pushes the image onto
    /// or past the unit circle.
    pub fn apply_to_disk(&self, point: &PoincareDiskPoint) -> Result<PoincareDiskPoint> {
        polar_to_disk(&self.apply(&point.to_polar())?)
    }
}

/// Reflection across the geodesic through `p` and `q`.
pub fn reflection(p: &PolarPoint, q: &PolarPoint) -> Result<Reflection> {
    Geodesic::from_two_points(p, q).map(Reflection::new)
}

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Translation and distance
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// The hyperbolic translation along the geodesic through `p` and `q` that
/// carries `p` to `q`. Identity when the points are equal.
///
/// **Mathematical Foundation**
///
/// A translation fixes the two ideal endpoints `w₁, w₂` of its axis. With
/// `c = 1`, fixing them forces `b = −w₁w₂` and `d = a − (w₁ + w₂)`; asking
/// for `p ↦ q` then pins `a`:
/// ```text
/// a = (q·(p − w₁ − w₂) + w₁·w₂) / (p − q)
/// ```
pub fn translation(p: &PolarPoint, q: &PolarPoint) -> Result<Mobius> {
    if p.approx_eq(q) {
        return Ok(Mobius::identity());
    }
    let (w1, w2) = Geodesic::from_two_points(p, q)?.ideal_points();
    let sum = w1 + w2;
    let product = w1 * w2;
    let a = (*q * (*p - sum) + product).checked_div(*p - *q)?;
    Ok(Mobius::new(a, -product, PolarPoint::one(), a - sum))
}

/// [`translation`] for disk points.
pub fn translation_in_disk(p: &PoincareDiskPoint, q: &PoincareDiskPoint) -> Result<Mobius> {
    translation(&p.to_polar(), &q.to_polar())
}

/// The disk automorphism `z ↦ (z + p) / (p̄·z + 1)`, which moves the origin
/// to `p` along the diameter through `p`.
pub fn translation_from_center(p: &PolarPoint) -> Mobius {
    if p.is_near_zero() {
        return Mobius::identity();
    }
    Mobius::new(PolarPoint::one(), *p, p.conj(), PolarPoint::one())
}

/// Hyperbolic distance between two disk points.
///
/// ```text
/// dist(p, q) = acosh(1 + 2·|p − q|² / ((1 − |p|²)(1 − |q|²)))
/// ```
/// evaluated on the Euclidean embeddings. When one point is exactly the
/// centre the other's `d` coordinate is already the answer.
pub fn distance(p: &PoincareDiskPoint, q: &PoincareDiskPoint) -> Real {
    if p.approx_eq(q) {
        return 0.0;
    }
    if p.d == 0.0 {
        return q.d;
    }
    if q.d == 0.0 {
        return p.d;
    }
    let rp = disk_radius_to_polar_radius(p.d);
    let rq = disk_radius_to_polar_radius(q.d);
    let chord_sq = (p.to_cartesian() - q.to_cartesian()).norm_squared();
    let invariant = 2.0 * chord_sq / ((1.0 - rp * rp) * (1.0 - rq * rq));
    (1.0 + invariant).acosh()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::float_types::FRAC_PI_2;
    use approx::assert_abs_diff_eq;

    #[test]
    fn coincident_points_are_degenerate() {
        let p = PolarPoint::new(0.3, 1.0);
        assert_eq!(Geodesic::from_two_points(&p, &p), Err(HyperbolicError::DegenerateGeodesic));
        assert_eq!(translation(&p, &p), Ok(Mobius::identity()));
    }

    #[test]
    fn through_the_center_is_linear() {
        let g = Geodesic::from_two_points(&PolarPoint::zero(), &PolarPoint::new(0.5, 2.0))
            .expect("distinct points");
        assert!(g.is_linear());
        // folded into the half-turn range
        assert_eq!(g, Geodesic::Linear { angle: normalize_half_angle(2.0) });
    }

    #[test]
    fn opposite_rays_are_linear() {
        let g =
            Geodesic::from_two_points(&PolarPoint::new(0.5, 0.4), &PolarPoint::new(0.2, 0.4 - PI))
                .expect("distinct points");
        match g {
            Geodesic::Linear { angle } => assert_abs_diff_eq!(angle, 0.4, epsilon = 1e-12),
            other => panic!("expected a diameter, got {other:?}"),
        }
    }

    #[test]
    fn circular_geodesic_is_orthogonal_to_the_boundary() {
        let p = PolarPoint::new(0.5, 0.3);
        let q = PolarPoint::new(0.6, 1.9);
        let Geodesic::Circular { center, radius } =
            Geodesic::from_two_points(&p, &q).expect("distinct")
        else {
            panic!("expected a circular geodesic");
        };
        // orthogonality: |c|² = 1 + R²
        assert_abs_diff_eq!(center.r * center.r, 1.0 + radius * radius, epsilon = 1e-9);
        let c = center.to_cartesian();
        assert_abs_diff_eq!((q.to_cartesian() - c).norm(), radius, epsilon = 1e-9);
    }

    #[test]
    fn ideal_points_are_on_the_geodesic() {
        let g = Geodesic::from_two_points(&PolarPoint::new(0.4, -0.7), &PolarPoint::new(0.8, 1.2))
            .expect("distinct");
        let Geodesic::Circular { center, radius } = g else {
            panic!("expected a circular geodesic");
        };
        let (w1, w2) = g.ideal_points();
        for w in [w1, w2] {
            assert_abs_diff_eq!(w.r, 1.0, epsilon = 1e-12);
            let offset = w.to_cartesian() - center.to_cartesian();
            assert_abs_diff_eq!(offset.norm(), radius, epsilon = 1e-9);
        }
        let (l1, l2) = Geodesic::Linear { angle: FRAC_PI_2 }.ideal_points();
        assert_abs_diff_eq!(l1.to_cartesian(), CartesianPoint::new(0.0, 1.0), epsilon = 1e-12);
        assert_abs_diff_eq!(l2.to_cartesian(), CartesianPoint::new(0.0, -1.0), epsilon = 1e-12);
    }

    #[test]
    fn reflection_fixes_the_defining_points_and_is_an_involution() {
        let p = PolarPoint::new(0.55, 0.0);
        let q = PolarPoint::new(0.55, 2.0 * PI / 5.0);
        let mirror = reflection(&p, &q).expect("distinct");
        assert_abs_diff_eq!(mirror.apply(&p).expect("regular"), p, epsilon = 1e-9);
        assert_abs_diff_eq!(mirror.apply(&q).expect("regular"), q, epsilon = 1e-9);

        let z = PolarPoint::new(0.2, -0.4);
        let twice = mirror.apply(&mirror.apply(&z).expect("regular")).expect("regular");
        assert_abs_diff_eq!(twice, z, epsilon = 1e-9);
        // the origin goes outward across the edge
        let image = mirror.apply(&PolarPoint::zero()).expect("regular");
        assert!(image.r > 0.0 && image.r < 1.0);
    }

    #[test]
    fn linear_reflection_mirrors_the_angle() {
        let mirror =
            reflection(&PolarPoint::zero(), &PolarPoint::new(0.5, FRAC_PI_2)).expect("distinct");
        let image = mirror.apply(&PolarPoint::new(0.3, 0.25)).expect("regular");
        assert_abs_diff_eq!(image, PolarPoint::new(0.3, PI - 0.25), epsilon = 1e-12);
    }

    #[test]
    fn translation_maps_p_to_q() {
        let p = PoincareDiskPoint::new(1.2, 0.5);
        let q = PoincareDiskPoint::new(0.7, -2.4);
        let m = translation_in_disk(&p, &q).expect("distinct");
        let image = m.apply_to_disk(&p).expect("stays in the disk");
        assert!(image.approx_eq(&q), "{image:?} != {q:?}");
    }

    #[test]
    fn translation_preserves_distance() {
        let p = PoincareDiskPoint::new(0.9, 2.0);
        let q = PoincareDiskPoint::center();
        let m = translation_in_disk(&p, &q).expect("distinct");
        let a = PoincareDiskPoint::new(1.5, 0.1);
        let b = PoincareDiskPoint::new(0.4, -1.3);
        let before = distance(&a, &b);
        let after = distance(
            &m.apply_to_disk(&a).expect("in disk"),
            &m.apply_to_disk(&b).expect("in disk"),
        );
        assert_abs_diff_eq!(before, after, epsilon = 1e-8);
    }

    #[test]
    fn translation_from_center_moves_the_origin() {
        let p = PolarPoint::new(0.6, 1.1);
        let m = translation_from_center(&p);
        assert_abs_diff_eq!(m.apply_at_zero().expect("d is nonzero"), p, epsilon = 1e-12);
        assert!(translation_from_center(&PolarPoint::zero()).is_identity());
    }

    #[test]
    fn distance_from_center_is_the_d_coordinate() {
        let center = PoincareDiskPoint::new(0.0, 0.0);
        let one = PoincareDiskPoint::new(1.0, 0.0);
        assert_eq!(distance(&center, &one), 1.0);
        assert_eq!(distance(&one, &center), 1.0);
        // the general formula agrees
        let nearly = PoincareDiskPoint::new(1e-9, 0.0);
        assert_abs_diff_eq!(distance(&one, &nearly), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn distance_is_a_metric_on_samples() {
        let a = PoincareDiskPoint::new(0.8, 0.2);
        let b = PoincareDiskPoint::new(2.1, -1.0);
        let c = PoincareDiskPoint::new(1.3, 2.9);
        assert_eq!(distance(&a, &a), 0.0);
        assert_abs_diff_eq!(distance(&a, &b), distance(&b, &a), epsilon = 1e-12);
        assert!(distance(&a, &b) > 0.0);
        assert!(distance(&a, &c) <= distance(&a, &b) + distance(&b, &c) + 1e-9);
    }

    #[test]
    fn collinear_points_have_no_circumcenter() {
        let a = CartesianPoint::new(0.0, 0.0);
        let b = CartesianPoint::new(1.0, 1.0);
        let c = CartesianPoint::new(2.0, 2.0);
        assert_eq!(circumcenter(&a, &b, &c), None);
        let center = circumcenter(
            &CartesianPoint::new(1.0, 0.0),
            &CartesianPoint::new(0.0, 1.0),
            &CartesianPoint::new(-1.0, 0.0),
        )
        .expect("not collinear");
        assert_abs_diff_eq!(center, CartesianPoint::new(0.0, 0.0), epsilon = 1e-12);
    }
}
