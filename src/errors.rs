//! Geometric precondition errors

use crate::float_types::Real;

/// All the ways a hyperbolic computation can be handed an invalid input.
///
/// None of these are recovered inside the crate; the caller (usually a view
/// layer) is expected to clamp interaction input before it reaches the core.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum HyperbolicError {
    /// (InvalidRadius) A Euclidean radius outside `[0, 1)` reached the disk-radius transform
    #[error("(InvalidRadius) Euclidean radius {radius} is outside [0, 1)")]
    InvalidRadius { radius: Real },
    /// (DegenerateGeodesic) Two coincident points were given where a geodesic is required
    #[error("(DegenerateGeodesic) A geodesic needs two distinct points")]
    DegenerateGeodesic,
    /// (DivisionByZero) Complex division by zero, or a Möbius map with zero determinant
    #[error("(DivisionByZero) Division by a zero-radius complex value")]
    DivisionByZero,
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, HyperbolicError>;
