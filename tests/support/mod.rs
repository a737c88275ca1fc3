//! Test support library
//! Provides random samplers and small geometric helpers shared by the
//! integration tests.

#![allow(dead_code)]

use hyptile::{
    Mobius, PoincareDiskPoint, PolarPoint, Tiling,
    float_types::{PI, Real},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Deterministic generator so failures are reproducible.
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn random_angle(rng: &mut StdRng) -> Real {
    rng.gen_range(-PI..PI)
}

/// A point of the open unit disk in polar form, radius below `max_r`.
pub fn random_polar(rng: &mut StdRng, max_r: Real) -> PolarPoint {
    PolarPoint::new(rng.gen_range(0.0..max_r), random_angle(rng))
}

/// A disk point at hyperbolic distance below `max_d` from the centre.
pub fn random_disk_point(rng: &mut StdRng, max_d: Real) -> PoincareDiskPoint {
    PoincareDiskPoint::new(rng.gen_range(0.0..max_d), random_angle(rng))
}

/// A Möbius map with coefficient moduli in `[0.1, 2)` and a determinant
/// comfortably away from zero.
pub fn random_mobius(rng: &mut StdRng) -> Mobius {
    loop {
        let mut coefficient = || PolarPoint::new(rng.gen_range(0.1..2.0), rng.gen_range(-PI..PI));
        let m = Mobius::new(coefficient(), coefficient(), coefficient(), coefficient());
        if m.determinant().r > 1e-2 {
            return m;
        }
    }
}

/// Euclidean gap between two polar points.
pub fn gap(a: &PolarPoint, b: &PolarPoint) -> Real {
    (a.to_cartesian() - b.to_cartesian()).norm()
}

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// A tiling grown to `level`.
pub fn grown(p: usize, q: usize, level: usize) -> Tiling {
    let mut tiling = Tiling::new(p, q).expect("hyperbolic parameters");
    tiling.set_level(level).expect("growth succeeds");
    tiling
}

/// Number of tiles at each level, starting from level 0.
pub fn tiles_per_level(tiling: &Tiling) -> Vec<usize> {
    let mut counts = vec![0; tiling.level() + 1];
    for tile in tiling.tiles() {
        counts[tile.level] += 1;
    }
    counts
}
