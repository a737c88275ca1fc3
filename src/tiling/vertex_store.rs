//! Append-only arena of tiling vertices with tolerance deduplication.

use crate::coords::PoincareDiskPoint;
use crate::float_types::{Real, disk_tolerance};
use hashbrown::HashMap;
use std::ops::Index;

/// Grid cells are this many disk tolerances wide. Two points that compare
/// equal are well under one tolerance apart in the Euclidean embedding, so
/// searching the 3×3 block around a point's cell finds every candidate.
const CELL_FACTOR: Real = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CellKey(i64, i64);

/// Deduplicated vertex arena.
///
/// Indices handed out by [`VertexStore::resolve`] stay valid for the life of
/// the store. Every point lives in a grid cell keyed on its Euclidean
/// embedding; points at the disk centre are also kept in a separate bucket,
/// since they compare equal whatever their angle.
#[derive(Debug, Clone)]
pub struct VertexStore {
    points: Vec<PoincareDiskPoint>,
    cells: HashMap<CellKey, Vec<usize>>,
    central: Vec<usize>,
    cell_size: Real,
}

impl Default for VertexStore {
    fn default() -> Self {
        VertexStore::new()
    }
}

impl VertexStore {
    pub fn new() -> Self {
        VertexStore {
            points: Vec::new(),
            cells: HashMap::new(),
            central: Vec::new(),
            cell_size: disk_tolerance() * CELL_FACTOR,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&PoincareDiskPoint> {
        self.points.get(index)
    }

    pub fn as_slice(&self) -> &[PoincareDiskPoint] {
        &self.points
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PoincareDiskPoint> {
        self.points.iter()
    }

    fn cell_of(&self, point: &PoincareDiskPoint) -> CellKey {
        let c = point.to_cartesian();
        CellKey(
            (c.x / self.cell_size).floor() as i64,
            (c.y / self.cell_size).floor() as i64,
        )
    }

    /// Lowest index of a stored point equal to `point`, if any.
    pub fn find(&self, point: &PoincareDiskPoint) -> Option<usize> {
        let matches = |&&i: &&usize| self.points[i].approx_eq(point);
        let CellKey(x, y) = self.cell_of(point);
        let from_grid = (-1..=1)
            .flat_map(|dx| (-1..=1).map(move |dy| CellKey(x + dx, y + dy)))
            .filter_map(|key| self.cells.get(&key))
            .flat_map(|bucket| bucket.iter().filter(matches))
            .copied()
            .min();
        let from_center = if point.is_center() {
            self.central.iter().find(matches).copied()
        } else {
            None
        };
        match (from_grid, from_center) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Index of the stored point equal to `point`, appending it if there is
    /// none. The flag is `true` when the point was appended.
    pub fn resolve(&mut self, point: PoincareDiskPoint) -> (usize, bool) {
        if let Some(index) = self.find(&point) {
            return (index, false);
        }
        let index = self.points.len();
        self.points.push(point);
        self.index_point(index);
        (index, true)
    }

    /// Replace the position of an existing vertex. Every tile that refers to
    /// `index` sees the new position. Out-of-range indices are ignored.
    pub fn overwrite(&mut self, index: usize, point: PoincareDiskPoint) {
        let Some(old) = self.points.get(index).copied() else {
            return;
        };
        self.unindex_point(index, &old);
        self.points[index] = point;
        self.index_point(index);
    }

    /// Drop every point from `len` onwards.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.points.len() {
            return;
        }
        self.points.truncate(len);
        self.cells.retain(|_, bucket| {
            bucket.retain(|&i| i < len);
            !bucket.is_empty()
        });
        self.central.retain(|&i| i < len);
    }

    fn index_point(&mut self, index: usize) {
        let point = self.points[index];
        let key = self.cell_of(&point);
        self.cells.entry(key).or_default().push(index);
        if point.is_center() {
            self.central.push(index);
        }
    }

    fn unindex_point(&mut self, index: usize, old: &PoincareDiskPoint) {
        let key = self.cell_of(old);
        if let Some(bucket) = self.cells.get_mut(&key) {
            bucket.retain(|&i| i != index);
            if bucket.is_empty() {
                self.cells.remove(&key);
            }
        }
        self.central.retain(|&i| i != index);
    }
}

impl Index<usize> for VertexStore {
    type Output = PoincareDiskPoint;

    fn index(&self, index: usize) -> &PoincareDiskPoint {
        &self.points[index]
    }
}
