//! Regular {p, q} tilings of the Poincaré disk.
//!
//! The tiling is grown ring by ring. Ring `n` holds the tiles at edge
//! distance `n` from the centre tile; each is produced by reflecting a tile
//! of ring `n − 1` across one of its edges. Tiles refer to vertices by index
//! into a shared [`VertexStore`], so two tiles that meet along an edge hold
//! the very same two indices.

use crate::coords::{PoincareDiskPoint, PolarPoint, polar_radius_to_disk_radius, polar_to_disk};
use crate::errors::Result;
use crate::float_types::{FRAC_PI_2, PI, Real, TAU, disk_tolerance};
use crate::geodesic::{Reflection, reflection};
use hashbrown::HashMap;
use tracing::{debug, trace, warn};

pub mod cycle;
pub mod vertex_store;

pub use cycle::Cycle;
pub use vertex_store::VertexStore;

/// How far (in disk tolerances) a recomputed vertex may sit from its
/// provisional position and still replace it.
const DRIFT_FACTOR: Real = 1e3;

/// Undirected edge between two vertex indices, smaller index first.
pub type EdgeKey = (usize, usize);

#[inline]
fn edge_key(a: usize, b: usize) -> EdgeKey {
    if a < b { (a, b) } else { (b, a) }
}

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Tile geometry
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// True when `1/p + 1/q < 1/2`, i.e. {p, q} tiles the hyperbolic plane.
pub fn is_hyperbolic(p: usize, q: usize) -> bool {
    p >= 3 && q >= 3 && (p - 2) * (q - 2) > 4
}

/// Euclidean radius of the vertices of a {p, q} tile centred at the origin.
///
/// **Mathematical Foundation**
///
/// The edge geodesic is a circle orthogonal to the unit circle passing
/// through two adjacent vertices; its angle with the radius through a vertex
/// must be `π/q`. Solving for the vertex radius gives
/// ```text
/// r = sqrt((tan(π/2 − π/q) − tan(π/p)) / (tan(π/2 − π/q) + tan(π/p)))
/// ```
pub fn outer_radius(p: usize, q: usize) -> Real {
    let t1 = (FRAC_PI_2 - PI / q as Real).tan();
    let t2 = (PI / p as Real).tan();
    ((t1 - t2) / (t1 + t2)).sqrt()
}

/// Hyperbolic distance from a tile's centre to the midpoint of an edge.
///
/// In the right triangle (centre, edge midpoint, vertex) the angle at the
/// centre is `π/p` and the hypotenuse is the circumradius `R`, so
/// ```text
/// tanh(inner) = tanh(R) · cos(π/p)
/// ```
/// which agrees with the closed form `acosh(cos(π/q) / sin(π/p))`.
///
/// # Errors
/// [`crate::errors::HyperbolicError::InvalidRadius`] if {p, q} is not hyperbolic.
pub fn inner_radius(p: usize, q: usize) -> Result<Real> {
    let circumradius = polar_radius_to_disk_radius(outer_radius(p, q))?;
    Ok((circumradius.tanh() * (PI / p as Real).cos()).atanh())
}

/// Hyperbolic distance between the centres of two edge-adjacent tiles.
pub fn adjacent_center_distance(p: usize, q: usize) -> Result<Real> {
    Ok(2.0 * inner_radius(p, q)?)
}

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Graph types
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// One p-gon of the tiling.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile {
    pub index: usize,
    /// Edge distance from the centre tile
    pub level: usize,
    pub center: PoincareDiskPoint,
    /// Vertex indices, counter-clockwise
    pub boundary: Cycle<usize>,
}

/// A boundary edge shared by two tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Crossing {
    /// Tile indices, smaller first
    pub tiles: (usize, usize),
    /// Vertex indices of the shared edge, smaller first
    pub edge: EdgeKey,
}

impl Crossing {
    fn new(a: usize, b: usize, edge: EdgeKey) -> Self {
        Crossing {
            tiles: if a < b { (a, b) } else { (b, a) },
            edge,
        }
    }

    /// The tile on the other side from `tile`, if `tile` is one of the ends.
    pub fn other(&self, tile: usize) -> Option<usize> {
        match self.tiles {
            (a, b) if a == tile => Some(b),
            (a, b) if b == tile => Some(a),
            _ => None,
        }
    }
}

/// Work list of the ring being grown: every (tile, edge) pair of the
/// previous ring, consumed in order.
#[derive(Debug, Clone)]
struct Ring {
    level: usize,
    frontier: Vec<(usize, usize)>,
    cursor: usize,
}

// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
// Tiling
// ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

/// A finite patch of the {p, q} tiling, grown outward from a tile centred
/// at the origin.
#[derive(Debug, Clone)]
pub struct Tiling {
    p: usize,
    q: usize,
    tiles: Vec<Tile>,
    crossings: Vec<Crossing>,
    vertices: VertexStore,
    /// Tile centres, index-aligned with `tiles`
    centers: VertexStore,
    /// Owning tiles of every boundary edge
    edges: HashMap<EdgeKey, Vec<usize>>,
    ring: Option<Ring>,
}

impl Tiling {
    /// Seed a tiling with its centre tile: `p` vertices at
    /// [`outer_radius`], the first at angle zero, spaced `2π/p` apart.
    ///
    /// Parameters that are not hyperbolic are accepted with a warning; the
    /// geometry degenerates and usually fails here with
    /// [`crate::errors::HyperbolicError::InvalidRadius`].
    pub fn new(p: usize, q: usize) -> Result<Tiling> {
        if !is_hyperbolic(p, q) {
            warn!(p, q, "{{{p}, {q}}} does not tile the hyperbolic plane");
        }
        let radius = outer_radius(p, q);
        let mut tiling = Tiling {
            p,
            q,
            tiles: Vec::new(),
            crossings: Vec::new(),
            vertices: VertexStore::new(),
            centers: VertexStore::new(),
            edges: HashMap::new(),
            ring: None,
        };

        let mut boundary = Vec::with_capacity(p);
        for i in 0..p {
            let corner = polar_to_disk(&PolarPoint::new(radius, TAU * i as Real / p as Real))?;
            boundary.push(tiling.vertices.resolve(corner).0);
        }
        tiling.push_tile(0, PoincareDiskPoint::center(), Cycle::new(boundary));
        debug!(p, q, radius, "seeded centre tile");
        Ok(tiling)
    }

    pub fn p(&self) -> usize {
        self.p
    }

    pub fn q(&self) -> usize {
        self.q
    }

    /// Level of the outermost tile.
    pub fn level(&self) -> usize {
        self.tiles.last().map_or(0, |tile| tile.level)
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn crossings(&self) -> &[Crossing] {
        &self.crossings
    }

    pub fn vertices(&self) -> &VertexStore {
        &self.vertices
    }

    pub fn vertex(&self, index: usize) -> Option<&PoincareDiskPoint> {
        self.vertices.get(index)
    }

    /// Boundary positions of a tile, in boundary order.
    pub fn tile_vertices(&self, tile: &Tile) -> Vec<PoincareDiskPoint> {
        tile.boundary.iter().map(|&i| self.vertices[i]).collect()
    }

    /// Tiles sharing an edge with `index`, in the tile's boundary order.
    pub fn neighbors(&self, index: usize) -> Vec<usize> {
        let Some(tile) = self.tiles.get(index) else {
            return Vec::new();
        };
        tile.boundary
            .edges()
            .filter_map(|(&a, &b)| self.edges.get(&edge_key(a, b)))
            .flat_map(|owners| owners.iter().copied().filter(|&o| o != index))
            .collect()
    }

    /// True while a ring has been started and not yet completed.
    pub fn is_growing(&self) -> bool {
        self.ring.is_some()
    }

    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
    // Growth
    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

    /// Add one tile to the ring being grown.
    ///
    /// `level_up` starts a new ring outside the current outermost level; it
    /// is ignored while a ring is already in progress. Returns `true` when
    /// the ring is complete (or when there was no ring to grow), `false`
    /// while more tiles remain.
    ///
    /// The next open edge of the previous ring is chosen, its tile is
    /// reflected across it, and the image is reversed about the shared edge
    /// so that it stays counter-clockwise with that edge at boundary
    /// positions 0 and 1. The remaining corners are resolved against the
    /// vertex store.
    pub fn grow_one_reflection(&mut self, level_up: bool) -> Result<bool> {
        if level_up {
            if self.ring.is_some() {
                debug!("ring already in progress, level_up ignored");
            } else {
                self.start_ring();
            }
        }
        if self.ring.is_none() {
            return Ok(true);
        }
        let Some((source, edge)) = self.take_open_edge() else {
            return Ok(self.finish_ring());
        };
        self.reflect_tile(source, edge)?;
        if self.peek_open_edge().is_none() {
            return Ok(self.finish_ring());
        }
        Ok(false)
    }

    /// Grow one complete ring.
    pub fn grow_level(&mut self) -> Result<()> {
        let mut level_up = true;
        while !self.grow_one_reflection(level_up)? {
            level_up = false;
        }
        Ok(())
    }

    /// Grow or truncate until [`Tiling::level`] equals `target`.
    ///
    /// A ring left in progress by [`Tiling::grow_one_reflection`] is
    /// completed first when `target` reaches it, and dropped otherwise.
    pub fn set_level(&mut self, target: usize) -> Result<()> {
        if let Some(open) = self.ring.as_ref().map(|ring| ring.level) {
            if target >= open {
                self.grow_level()?;
            } else {
                self.truncate(target);
            }
        }
        if target < self.level() {
            self.truncate(target);
            return Ok(());
        }
        while self.level() < target {
            let before = self.tiles.len();
            self.grow_level()?;
            if self.tiles.len() == before {
                warn!(level = self.level(), target, "ring added no tiles, stopping");
                break;
            }
        }
        Ok(())
    }

    /// Drop every tile above `level`, along with a ring in progress beyond
    /// it. Vertices are kept, so growing again hands out the same indices.
    pub fn truncate(&mut self, level: usize) {
        if self.ring.as_ref().is_some_and(|ring| ring.level > level) {
            self.ring = None;
        }
        let keep = self.tiles.partition_point(|tile| tile.level <= level);
        if keep == self.tiles.len() {
            return;
        }
        self.tiles.truncate(keep);
        self.centers.truncate(keep);
        self.crossings.retain(|c| c.tiles.1 < keep);
        self.edges.retain(|_, owners| {
            owners.retain(|&t| t < keep);
            !owners.is_empty()
        });
        debug!(level, tiles = keep, "truncated tiling");
    }

    fn start_ring(&mut self) {
        let previous = self.level();
        let frontier = self
            .tiles
            .iter()
            .filter(|tile| tile.level == previous)
            .flat_map(|tile| (0..self.p).map(move |edge| (tile.index, edge)))
            .collect::<Vec<_>>();
        debug!(level = previous + 1, frontier = frontier.len(), "starting ring");
        self.ring = Some(Ring {
            level: previous + 1,
            frontier,
            cursor: 0,
        });
    }

    fn finish_ring(&mut self) -> bool {
        if let Some(ring) = self.ring.take() {
            debug!(
                level = ring.level,
                tiles = self.tiles.len(),
                vertices = self.vertices.len(),
                "ring complete"
            );
        }
        true
    }

    fn is_open(&self, tile: usize, edge: usize) -> bool {
        let boundary = &self.tiles[tile].boundary;
        let key = edge_key(*boundary.get(edge as isize), *boundary.get(edge as isize + 1));
        self.edges.get(&key).is_none_or(|owners| owners.len() < 2)
    }

    /// Advance the ring cursor to the next open frontier edge.
    fn peek_open_edge(&mut self) -> Option<(usize, usize)> {
        loop {
            let ring = self.ring.as_ref()?;
            let &(tile, edge) = ring.frontier.get(ring.cursor)?;
            if self.is_open(tile, edge) {
                return Some((tile, edge));
            }
            if let Some(ring) = self.ring.as_mut() {
                ring.cursor += 1;
            }
        }
    }

    fn take_open_edge(&mut self) -> Option<(usize, usize)> {
        let next = self.peek_open_edge()?;
        if let Some(ring) = self.ring.as_mut() {
            ring.cursor += 1;
        }
        Some(next)
    }

    fn ring_level(&self) -> usize {
        self.ring.as_ref().map_or(self.level() + 1, |ring| ring.level)
    }

    fn reflect_tile(&mut self, source: usize, edge: usize) -> Result<()> {
        let view = self.tiles[source].boundary.rotated(edge as isize);
        let start = *view.get(0);
        let end = *view.get(1);
        let mirror = reflection(&self.vertices[start].to_polar(), &self.vertices[end].to_polar())?;

        let center = mirror.apply_to_disk(&self.tiles[source].center)?;
        if let Some(existing) = self.centers.find(&center) {
            warn!(
                source,
                existing, "reflected tile duplicates an existing tile without sharing its edge"
            );
            return Ok(());
        }

        // mirror image, reversed about the shared edge: [end, start, ...]
        let image = view.reversed(1);
        let mut boundary = Vec::with_capacity(self.p);
        let mut provisional = Vec::new();
        for (position, &index) in image.iter().enumerate() {
            if position < 2 {
                boundary.push(index);
                continue;
            }
            let corner = mirror.apply_to_disk(&self.vertices[index])?;
            let (resolved, fresh) = self.vertices.resolve(corner);
            if fresh {
                provisional.push(resolved);
            }
            boundary.push(resolved);
        }
        let boundary = Cycle::new(boundary);

        let level = self.ring_level();
        if !provisional.is_empty() {
            self.reconcile_drift(source, level, &boundary, &provisional)?;
        }
        let index = self.push_tile(level, center, boundary);
        trace!(index, source, level, fresh = provisional.len(), "added tile");
        Ok(())
    }

    /// Recompute the provisional corners of a new tile from an older
    /// neighbour it shares an edge with, so that both agree on the geometry.
    ///
    /// Only tiles of the previous level other than `source` are considered,
    /// and the first one found is authoritative.
    fn reconcile_drift(
        &mut self,
        source: usize,
        level: usize,
        boundary: &Cycle<usize>,
        provisional: &[usize],
    ) -> Result<()> {
        for i in 0..self.p {
            let (a, b) = (*boundary.get(i as isize), *boundary.get(i as isize + 1));
            let Some(owners) = self.edges.get(&edge_key(a, b)) else {
                continue;
            };
            let neighbor = owners
                .iter()
                .copied()
                .find(|&t| t != source && self.tiles[t].level + 1 == level);
            let Some(neighbor) = neighbor else {
                continue;
            };
            // the neighbour runs the shared edge the other way: (b, a)
            let neighbor_boundary = &self.tiles[neighbor].boundary;
            let runs_backwards = |j: usize| {
                let j = j as isize;
                *neighbor_boundary.get(j) == b && *neighbor_boundary.get(j + 1) == a
            };
            let Some(j) = (0..self.p).find(|&j| runs_backwards(j)) else {
                warn!(neighbor, "shared edge has matching orientation, skipping reconciliation");
                continue;
            };
            let aligned = neighbor_boundary.reversed((i + j + 1) as isize);
            let mirror = reflection(&self.vertices[a].to_polar(), &self.vertices[b].to_polar())?;
            self.overwrite_provisional(&mirror, boundary, &aligned, provisional)?;
            debug!(neighbor, edge = ?(a, b), "reconciled drift");
            return Ok(());
        }
        Ok(())
    }

    fn overwrite_provisional(
        &mut self,
        mirror: &Reflection,
        boundary: &Cycle<usize>,
        aligned: &Cycle<usize>,
        provisional: &[usize],
    ) -> Result<()> {
        let loose = disk_tolerance() * DRIFT_FACTOR;
        for (position, &index) in boundary.iter().enumerate() {
            if !provisional.contains(&index) {
                continue;
            }
            let recomputed = mirror.apply_to_disk(&self.vertices[*aligned.get(position as isize)])?;
            if approx::AbsDiffEq::abs_diff_eq(&self.vertices[index], &recomputed, loose) {
                self.vertices.overwrite(index, recomputed);
            } else {
                warn!(index, "neighbour disagrees on vertex position beyond drift tolerance");
            }
        }
        Ok(())
    }

    /// Append a tile and register its edges; every edge already owned by
    /// another tile becomes a crossing.
    fn push_tile(
        &mut self,
        level: usize,
        center: PoincareDiskPoint,
        boundary: Cycle<usize>,
    ) -> usize {
        let index = self.tiles.len();
        for (&a, &b) in boundary.edges() {
            let key = edge_key(a, b);
            let owners = self.edges.entry(key).or_default();
            if owners.len() >= 2 {
                warn!(edge = ?key, tile = index, "edge already owned by two tiles");
            }
            for &owner in owners.iter() {
                self.crossings.push(Crossing::new(owner, index, key));
            }
            owners.push(index);
        }
        self.centers.resolve(center);
        self.tiles.push(Tile {
            index,
            level,
            center,
            boundary,
        });
        index
    }

    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~
    // Validation
    // ~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~~

    /// Structural check of the tiling graph. Returns a description of every
    /// problem found; empty when the tiling is consistent.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        let vertex_count = self.vertices.len();
        for tile in &self.tiles {
            if tile.boundary.len() != self.p {
                issues.push(format!(
                    "Tile {} has {} boundary vertices, expected {}",
                    tile.index,
                    tile.boundary.len(),
                    self.p
                ));
            }
            for &v in &tile.boundary {
                if v >= vertex_count {
                    issues.push(format!("Tile {} references out-of-bounds vertex {v}", tile.index));
                }
            }
            let mut seen = hashbrown::HashSet::new();
            for &v in &tile.boundary {
                if !seen.insert(v) {
                    issues.push(format!("Tile {} repeats vertex {v}", tile.index));
                }
            }
        }
        for crossing in &self.crossings {
            let (a, b) = crossing.tiles;
            let (u, v) = crossing.edge;
            for t in [a, b] {
                match self.tiles.get(t) {
                    Some(tile) if tile.boundary.contains(&u) && tile.boundary.contains(&v) => {},
                    Some(_) => issues.push(format!(
                        "Crossing {a}-{b} edge ({u}, {v}) is not on tile {t}"
                    )),
                    None => issues.push(format!("Crossing {a}-{b} references missing tile {t}")),
                }
            }
        }
        for (key, owners) in &self.edges {
            if owners.len() > 2 {
                issues.push(format!("Edge {key:?} is owned by {} tiles", owners.len()));
            }
        }
        issues
    }
}
