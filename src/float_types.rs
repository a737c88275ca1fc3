// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized tolerance for Euclidean and polar comparisons.
/// Defaults depend on precision (`f32` vs `f64`), but can be overridden:
///  1) **Build-time**: set env var `HYPTILE_TOLERANCE` (e.g. `HYPTILE_TOLERANCE=1e-8 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

/// Same as [`TOLERANCE_CELL`], for comparisons of Poincaré disk points
/// (`HYPTILE_DISK_TOLERANCE`, [`set_disk_tolerance`]).
static DISK_TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    #[cfg(feature = "f32")]
    {
        1e-4
    }
    #[cfg(feature = "f64")]
    {
        1e-6
    }
}

fn tolerance_from_env(value: Option<&'static str>) -> Option<Real> {
    value
        .and_then(|v| Real::from_str(v).ok())
        .map(|v| v.max(Real::EPSILON))
}

/// Returns the current Euclidean epsilon.
/// If not set yet, it tries `HYPTILE_TOLERANCE` (parsed as the active `Real`) and
/// falls back to a sensible default.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        // Compile-time env if provided, inherited by dependencies
        tolerance_from_env(option_env!("HYPTILE_TOLERANCE")).unwrap_or_else(default_tolerance)
    })
}

/// Returns the current epsilon for hyperbolic distances and angles of disk points.
pub fn disk_tolerance() -> Real {
    *DISK_TOLERANCE_CELL.get_or_init(|| {
        tolerance_from_env(option_env!("HYPTILE_DISK_TOLERANCE"))
            .unwrap_or_else(default_tolerance)
    })
}

/// Set epsilon programmatically once (subsequent calls are ignored).
/// Call near program start: `hyptile::float_types::set_tolerance(1e-8);`
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// Set the disk-point epsilon once (subsequent calls are ignored).
pub fn set_disk_tolerance(value: Real) {
    let _ = DISK_TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// Disk points closer than this (in hyperbolic distance) to the origin are
/// "at the center" and compare equal regardless of angle.
pub const CENTER_TOLERANCE: Real = 1e-3;

/// Angles within this of the lower end of a wrapped range snap to its upper end.
pub const ANGLE_SNAP: Real = 1e-7;

// Pi
/// Archimedes' constant (π)
#[cfg(feature = "f32")]
pub const PI: Real = core::f32::consts::PI;
/// Archimedes' constant (π)
#[cfg(feature = "f64")]
pub const PI: Real = core::f64::consts::PI;

// Frac Pi 2
/// π/2
#[cfg(feature = "f32")]
pub const FRAC_PI_2: Real = core::f32::consts::FRAC_PI_2;
/// π/2
#[cfg(feature = "f64")]
pub const FRAC_PI_2: Real = core::f64::consts::FRAC_PI_2;

// Tau
/// The full circle constant (τ)
#[cfg(feature = "f32")]
pub const TAU: Real = core::f32::consts::TAU;
/// The full circle constant (τ)
#[cfg(feature = "f64")]
pub const TAU: Real = core::f64::consts::TAU;

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Angle wrapping
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// Wrap `value` into `(min, max]`, snapping anything within [`ANGLE_SNAP`]
/// of `min` onto `max`. Values already inside the range come back untouched.
pub fn wrap_to_range(value: Real, min: Real, max: Real) -> Real {
    if value > min + ANGLE_SNAP && value <= max {
        return value;
    }
    let gap = max - min;
    let shifted = value - min;
    let modulo = shifted - gap * (shifted / gap).floor();
    let res = if modulo == 0.0 { gap } else { modulo } + min;
    if (res - min).abs() <= ANGLE_SNAP { max } else { res }
}

/// Normalize an angle into `(−π, π]`.
#[inline]
pub fn normalize_angle(angle: Real) -> Real {
    wrap_to_range(angle, -PI, PI)
}

/// Fold an angle into `(−π/2, π/2]`, identifying directions that differ by a half turn.
#[inline]
pub fn normalize_half_angle(angle: Real) -> Real {
    wrap_to_range(angle, -FRAC_PI_2, FRAC_PI_2)
}

/// Absolute angular difference in `[0, π]`, aware of the wrap at ±π.
#[inline]
pub fn angle_between(a: Real, b: Real) -> Real {
    normalize_angle(a - b).abs()
}
