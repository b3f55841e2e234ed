//! Boundary tracker - per-direction lateral extents of a cell set
//!
//! For each of the six directions the table records the smallest and largest
//! value of that direction's lateral coordinate (the one that does not change
//! when stepping along it) and which cell attains each extreme. Opposite
//! directions share an axis and therefore hold identical entries.
//!
//! The placed-cell table is owned by [`Grid`](crate::grid::Grid) and is
//! recomputed inside every placed-set mutation. Tables over other cell sets
//! (the active piece, for instance) are built on demand with
//! [`compute_boundaries`].

use crate::grid::Cell;
use crate::types::{CellId, Cube, Direction};

/// Extent of a cell set along one direction's lateral axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub min: i32,
    pub max: i32,
    pub min_id: Option<CellId>,
    pub max_id: Option<CellId>,
}

impl Edge {
    /// Sentinel state before any cell has been folded in.
    pub const EMPTY: Edge = Edge {
        min: i32::MAX,
        max: i32::MIN,
        min_id: None,
        max_id: None,
    };

    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// `max - min`, or 0 for an empty edge.
    pub fn width(&self) -> i32 {
        if self.is_empty() {
            0
        } else {
            self.max - self.min
        }
    }

    /// Ties keep the first cell seen.
    fn fold(&mut self, value: i32, id: CellId) {
        if value > self.max {
            self.max = value;
            self.max_id = Some(id);
        }
        if value < self.min {
            self.min = value;
            self.min_id = Some(id);
        }
    }
}

impl Default for Edge {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Six [`Edge`]s, one per [`Direction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryTable {
    edges: [Edge; 6],
}

impl BoundaryTable {
    pub fn empty() -> Self {
        Self {
            edges: [Edge::EMPTY; 6],
        }
    }

    pub fn edge(&self, direction: Direction) -> &Edge {
        &self.edges[direction.index()]
    }

    pub fn is_empty(&self) -> bool {
        self.edges.iter().all(Edge::is_empty)
    }
}

impl Default for BoundaryTable {
    fn default() -> Self {
        Self::empty()
    }
}

/// Fold `cells` into a fresh table. Linear in the number of cells.
pub fn compute_boundaries<'a>(cells: impl IntoIterator<Item = &'a Cell>) -> BoundaryTable {
    let mut table = BoundaryTable::empty();
    for cell in cells {
        for direction in Direction::ALL {
            let value = cell.position.component(direction.lateral_axis());
            table.edges[direction.index()].fold(value, cell.id);
        }
    }
    table
}

/// Offset whose lateral coordinate for `direction` equals `w`.
///
/// Built from the two directions that sit on the positive side of the
/// lateral axis, `floor(w/2)` steps along the first and `ceil(w/2)` along the
/// second, so the result stays close to the fall axis itself.
pub fn lateral_offset(direction: Direction, w: i32) -> Cube {
    let p = if direction.sign() == 1 { 1 } else { 4 };
    let half_down = w.div_euclid(2);
    let half_up = w - half_down;
    direction.rotate(p).vector() * half_down + direction.rotate(p + 1).vector() * half_up
}
