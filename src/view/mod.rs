//! Projection of a built [`Tiling`] as seen from a viewpoint.
//!
//! The view layer never mutates the tiling: moving the viewpoint only
//! recomputes the recentring transform and the per-tile output below.

use crate::coords::{CartesianPoint, PoincareDiskPoint, PolarPoint, polar_to_disk};
use crate::errors::{HyperbolicError, Result};
use crate::float_types::{Real, normalize_angle};
use crate::geodesic::{Geodesic, distance, translation_in_disk};
use crate::mobius::Mobius;
use crate::tiling::{Tile, Tiling};

#[cfg(feature = "svg-io")]
pub mod svg;

/// Distance thresholds of the fade-out at the edge of the picture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    /// Tiles whose centre is farther than this from the viewpoint are hidden
    pub render_threshold: Real,
    /// Tiles closer than this are fully opaque
    pub blur_threshold: Real,
}

impl Default for ViewOptions {
    fn default() -> Self {
        ViewOptions {
            render_threshold: 5.5,
            blur_threshold: 2.5,
        }
    }
}

impl ViewOptions {
    pub fn with_render_threshold(mut self, threshold: Real) -> Self {
        self.render_threshold = threshold;
        self
    }

    pub fn with_blur_threshold(mut self, threshold: Real) -> Self {
        self.blur_threshold = threshold;
        self
    }

    /// 1 up to the blur threshold, falling linearly to 0 at the render
    /// threshold, 0 beyond.
    pub fn opacity(&self, distance: Real) -> Real {
        if distance > self.render_threshold {
            0.0
        } else if distance > self.blur_threshold {
            (self.render_threshold - distance) / (self.render_threshold - self.blur_threshold)
        } else {
            1.0
        }
    }
}

/// Where the picture is looked at from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Viewpoint {
    /// A point of the tiling, moved to the disk centre by a translation
    Point(PoincareDiskPoint),
    /// An accumulated transform taking tiling coordinates to view coordinates
    Transform(Mobius),
}

impl Default for Viewpoint {
    fn default() -> Self {
        Viewpoint::Point(PoincareDiskPoint::center())
    }
}

impl Viewpoint {
    /// The transform applied to every vertex before drawing.
    pub fn recenter(&self) -> Result<Mobius> {
        match self {
            Viewpoint::Point(point) => translation_in_disk(point, &PoincareDiskPoint::center()),
            Viewpoint::Transform(transform) => Ok(*transform),
        }
    }

    /// The tiling point that ends up at the disk centre.
    pub fn position(&self) -> Result<PoincareDiskPoint> {
        match self {
            Viewpoint::Point(point) => Ok(*point),
            Viewpoint::Transform(transform) => {
                polar_to_disk(&transform.inverse()?.apply_at_zero()?)
            },
        }
    }
}

/// One drawing command after the initial move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Segment {
    /// Straight segment along a diameter
    Line { to: CartesianPoint },
    /// Circular arc; `sweep` follows the SVG arc flag with the y-axis
    /// pointing down
    Arc {
        to: CartesianPoint,
        radius: Real,
        sweep: bool,
    },
}

impl Segment {
    pub fn to(&self) -> CartesianPoint {
        match *self {
            Segment::Line { to } | Segment::Arc { to, .. } => to,
        }
    }
}

/// Closed outline of a tile in view coordinates (unit disk).
#[derive(Debug, Clone, PartialEq)]
pub struct TilePath {
    pub start: CartesianPoint,
    pub segments: Vec<Segment>,
}

/// What the renderer needs for one tile.
#[derive(Debug, Clone, PartialEq)]
pub struct TileView {
    pub tile: usize,
    /// Hyperbolic distance from the tile centre to the viewpoint
    pub distance: Real,
    pub opacity: Real,
    /// `None` for hidden tiles
    pub path: Option<TilePath>,
}

/// The geodesic segment from `p` to `q` as a drawing command.
///
/// The arc bends towards the geodesic circle's centre; the sweep flag is
/// set when the chord direction is clockwise of the direction from that
/// centre to the chord midpoint.
pub fn segment_between(p: &PolarPoint, q: &PolarPoint) -> Result<Segment> {
    let to = q.to_cartesian();
    match Geodesic::from_two_points(p, q) {
        Ok(Geodesic::Linear { .. }) | Err(HyperbolicError::DegenerateGeodesic) => {
            Ok(Segment::Line { to })
        },
        Ok(Geodesic::Circular { center, radius }) => {
            let from = p.to_cartesian();
            let midpoint = nalgebra::center(&from, &to);
            let outward = midpoint - center.to_cartesian();
            let chord = to - from;
            let turn = normalize_angle(chord.y.atan2(chord.x) - outward.y.atan2(outward.x));
            Ok(Segment::Arc {
                to,
                radius,
                sweep: turn < 0.0,
            })
        },
        Err(e) => Err(e),
    }
}

/// Outline of `tile` after applying `recenter` to its corners.
pub fn tile_path(tiling: &Tiling, tile: &Tile, recenter: &Mobius) -> Result<TilePath> {
    let corners = tiling
        .tile_vertices(tile)
        .iter()
        .map(|corner| recenter.apply(corner.to_polar()))
        .collect::<Result<Vec<PolarPoint>>>()?;
    let Some(first) = corners.first() else {
        return Ok(TilePath {
            start: CartesianPoint::origin(),
            segments: Vec::new(),
        });
    };
    let segments = corners
        .iter()
        .zip(corners.iter().skip(1).chain(std::iter::once(first)))
        .map(|(p, q)| segment_between(p, q))
        .collect::<Result<Vec<Segment>>>()?;
    Ok(TilePath {
        start: first.to_cartesian(),
        segments,
    })
}

/// Per-tile opacity and outline of the whole tiling seen from `viewpoint`,
/// in tile order.
pub fn project(
    tiling: &Tiling,
    viewpoint: &Viewpoint,
    options: &ViewOptions,
) -> Result<Vec<TileView>> {
    let recenter = viewpoint.recenter()?;
    let position = viewpoint.position()?;
    tiling
        .tiles()
        .iter()
        .map(|tile| -> Result<TileView> {
            let distance = distance(&tile.center, &position);
            let opacity = options.opacity(distance);
            let path = if distance > options.render_threshold {
                None
            } else {
                Some(tile_path(tiling, tile, &recenter)?)
            };
            Ok(TileView {
                tile: tile.index,
                distance,
                opacity,
                path,
            })
        })
        .collect()
}

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Viewer
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// A viewpoint that can be moved in steps.
///
/// Points passed to [`Viewer::look_at`] and [`Viewer::commit`] are in the
/// current view's coordinates, so a caller can keep steering relative to
/// what is on screen without ever leaving the region near the disk centre
/// where precision is best.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewer {
    committed: Mobius,
}

impl Viewer {
    pub fn new() -> Self {
        Viewer::default()
    }

    /// Transform from tiling coordinates to the current view.
    pub fn transform(&self) -> &Mobius {
        &self.committed
    }

    pub fn viewpoint(&self) -> Viewpoint {
        Viewpoint::Transform(self.committed)
    }

    /// Tentative viewpoint with `point` (in view coordinates) moved to the
    /// centre, leaving the committed transform as it is.
    pub fn look_at(&self, point: &PoincareDiskPoint) -> Result<Viewpoint> {
        let step = translation_in_disk(point, &PoincareDiskPoint::center())?;
        Ok(Viewpoint::Transform(self.committed.then(&step)))
    }

    /// Make the [`Viewer::look_at`] viewpoint for `point` the new reference.
    pub fn commit(&mut self, point: &PoincareDiskPoint) -> Result<()> {
        if let Viewpoint::Transform(transform) = self.look_at(point)? {
            self.committed = transform;
        }
        Ok(())
    }

    pub fn reset(&mut self) {
        self.committed = Mobius::identity();
    }
}
