//! Regular **{p, q} tilings of the hyperbolic plane** in the Poincaré disk model.
//!
//! The crate grows a tiling ring by ring by reflecting tiles across their
//! edges, shares every vertex between the tiles that meet at it, and projects
//! the result from any viewpoint as per-tile opacities and arc/line paths
//! ready for an external renderer.
//!
//! ```no_run
//! use hyptile::{Tiling, ViewOptions, Viewpoint, project};
//!
//! let mut tiling = Tiling::new(5, 5)?;
//! tiling.set_level(3)?;
//! let views = project(&tiling, &Viewpoint::default(), &ViewOptions::default())?;
//! assert_eq!(views.len(), tiling.tiles().len());
//! # Ok::<(), hyptile::errors::HyperbolicError>(())
//! ```
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - **svg-io**: SVG path data and documents for projected tiles
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **wasm**: `wasm-bindgen` bindings for browser front ends

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod coords;
pub mod errors;
pub mod float_types;
pub mod geodesic;
pub mod mobius;
pub mod tiling;
pub mod view;

#[cfg(feature = "wasm")]
pub mod wasm;

#[cfg(any(
    all(feature = "f64", feature = "f32"),
    not(any(feature = "f64", feature = "f32"))
))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use coords::{CartesianPoint, PoincareDiskPoint, PolarPoint};
pub use errors::HyperbolicError;
pub use geodesic::{Geodesic, Reflection, distance, reflection, translation, translation_in_disk};
pub use mobius::Mobius;
pub use tiling::{Crossing, Cycle, Tile, Tiling, VertexStore};
pub use view::{Segment, TilePath, TileView, ViewOptions, Viewer, Viewpoint, project};
