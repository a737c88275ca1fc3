//! SVG path data for projected tiles.
//!
//! Coordinates are scaled by a caller-chosen factor and the y-axis is
//! flipped, so the unit disk maps onto the square `[-scale, scale]²` of an
//! SVG user space with y pointing down.

use super::{Segment, TilePath, TileView};
use crate::coords::CartesianPoint;
use crate::float_types::Real;
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Circle, Group, Path};

/// Scale used by [`TilePath::to_svg_data`] callers that have no preference.
pub const DEFAULT_SCALE: Real = 100.0;

#[inline]
fn flip(point: &CartesianPoint, scale: Real) -> (f32, f32) {
    ((point.x * scale) as f32, (-point.y * scale) as f32)
}

impl TilePath {
    /// The outline as SVG path data: one `M`, then `L`/`A` commands.
    pub fn to_svg_data(&self, scale: Real) -> Data {
        let start = Data::new().move_to(flip(&self.start, scale));
        self.segments.iter().fold(start, |data, segment| match segment {
            Segment::Line { to } => data.line_to(flip(to, scale)),
            Segment::Arc { to, radius, sweep } => {
                let (x, y) = flip(to, scale);
                let r = (radius * scale) as f32;
                let sweep = if *sweep { 1.0_f32 } else { 0.0 };
                data.elliptical_arc_to((r, r, 0.0_f32, 0.0_f32, sweep, x, y))
            },
        })
    }

    /// [`TilePath::to_svg_data`] rendered as the `d` attribute string.
    pub fn path_data_string(&self, scale: Real) -> String {
        let value: svg::node::Value = self.to_svg_data(scale).into();
        value.to_string()
    }
}

/// A standalone SVG document with the boundary circle and one path per
/// visible tile, its stroke opacity taken from the view.
pub fn to_document(views: &[TileView], scale: Real) -> Document {
    let extent = (scale * 1.05) as f32;
    let boundary = Circle::new()
        .set("cx", 0)
        .set("cy", 0)
        .set("r", scale as f32)
        .set("fill", "none")
        .set("stroke", "black");
    let tiles = views
        .iter()
        .filter_map(|view| view.path.as_ref().map(|path| (view, path)))
        .fold(Group::new().set("fill", "none").set("stroke", "grey"), |group, (view, path)| {
            group.add(
                Path::new()
                    .set("d", path.to_svg_data(scale))
                    .set("stroke-opacity", view.opacity as f32)
                    .set("data-tile", view.tile),
            )
        });
    Document::new()
        .set("viewBox", (-extent, -extent, 2.0 * extent, 2.0 * extent))
        .add(boundary)
        .add(tiles)
}
