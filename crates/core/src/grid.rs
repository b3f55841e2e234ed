//! Grid module - the spatial model
//!
//! The [`Grid`] owns every cell (bedrock, stack, active piece, preview piece)
//! in insertion order, hands out cell ids, and keeps three derived views:
//! the role partition, the set of placed positions and the placed-cell
//! [`BoundaryTable`]. Anything that can change a role or the placed set goes
//! through [`Grid::mutate`], which rebuilds all derived views before
//! returning, so the boundary table is never stale.

use std::collections::HashSet;

use crate::boundary::{compute_boundaries, BoundaryTable};
use crate::types::{CellColor, CellId, Cube, Role};

/// Atomic unit of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub id: CellId,
    pub position: Cube,
    pub color: CellColor,
    pub role: Role,
}

#[derive(Debug, Clone)]
pub struct Grid {
    cells: Vec<Cell>,
    next_id: u64,
    placed: Vec<usize>,
    active: Vec<usize>,
    preview: Vec<usize>,
    occupied: HashSet<Cube>,
    boundaries: BoundaryTable,
}

impl Grid {
    /// An empty grid. Ids start at 1.
    pub fn new() -> Self {
        Self {
            cells: Vec::new(),
            next_id: 1,
            placed: Vec::new(),
            active: Vec::new(),
            preview: Vec::new(),
            occupied: HashSet::new(),
            boundaries: BoundaryTable::empty(),
        }
    }

    /// The origin and its six neighbours, placed, in bedrock colour.
    pub fn with_bedrock() -> Self {
        let mut grid = Self::new();
        let positions = std::iter::once(Cube::ORIGIN).chain(Cube::ORIGIN.neighbors());
        let bedrock: Vec<Cell> = positions
            .map(|position| Cell {
                id: grid.allocate_id(),
                position,
                color: CellColor::Bedrock,
                role: Role::Placed,
            })
            .collect();
        grid.insert(bedrock);
        grid
    }

    /// Fresh, never reused cell id.
    pub fn allocate_id(&mut self) -> CellId {
        let id = CellId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn placed(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.placed.iter().map(move |&i| &self.cells[i])
    }

    pub fn active(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.active.iter().map(move |&i| &self.cells[i])
    }

    pub fn preview(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.preview.iter().map(move |&i| &self.cells[i])
    }

    pub fn placed_count(&self) -> usize {
        self.placed.len()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn preview_count(&self) -> usize {
        self.preview.len()
    }

    /// Whether a placed cell sits at `position`.
    pub fn is_occupied(&self, position: Cube) -> bool {
        self.occupied.contains(&position)
    }

    /// Boundary table over the placed cells.
    pub fn boundaries(&self) -> &BoundaryTable {
        &self.boundaries
    }

    /// The active piece's pivot.
    pub fn pivot(&self) -> Option<&Cell> {
        self.active().find(|c| c.role.is_pivot())
    }

    pub fn find(&self, id: CellId) -> Option<&Cell> {
        self.cells.iter().find(|c| c.id == id)
    }

    /// Append cells (ids must come from [`Grid::allocate_id`]).
    pub fn insert(&mut self, new_cells: impl IntoIterator<Item = Cell>) {
        self.mutate(|cells| cells.extend(new_cells));
    }

    /// Remove cells by identity. Returns how many were removed.
    pub fn remove(&mut self, ids: &HashSet<CellId>) -> usize {
        if ids.is_empty() {
            return 0;
        }
        self.mutate(|cells| {
            let before = cells.len();
            cells.retain(|c| !ids.contains(&c.id));
            before - cells.len()
        })
    }

    /// Run `f` over the raw cell list, then rebuild the role views, the
    /// placed-position set and the boundary table.
    pub fn mutate<R>(&mut self, f: impl FnOnce(&mut Vec<Cell>) -> R) -> R {
        let out = f(&mut self.cells);
        self.reclassify();
        out
    }

    /// Turn every active cell into a placed one. Returns the number locked.
    pub fn lock_active(&mut self) -> usize {
        self.mutate(|cells| {
            let mut locked = 0;
            for cell in cells.iter_mut().filter(|c| c.role.is_active()) {
                cell.role = Role::Placed;
                locked += 1;
            }
            locked
        })
    }

    /// Promote the preview piece to active and drop its translucency.
    pub fn promote_preview(&mut self) -> usize {
        self.mutate(|cells| {
            let mut promoted = 0;
            for cell in cells.iter_mut().filter(|c| c.role.is_preview()) {
                cell.role = cell.role.activate();
                cell.color = cell.color.opaque();
                promoted += 1;
            }
            promoted
        })
    }

    /// Shift the active piece. The placed set is untouched, so nothing is
    /// recomputed.
    pub fn translate_active(&mut self, offset: Cube) {
        for &i in &self.active {
            self.cells[i].position += offset;
        }
    }

    /// Overwrite active positions, in active-view order.
    pub fn set_active_positions(&mut self, positions: &[Cube]) {
        debug_assert_eq!(positions.len(), self.active.len());
        for (&i, &p) in self.active.iter().zip(positions) {
            debug_assert!(p.is_valid(), "off-lattice active position {p}");
            self.cells[i].position = p;
        }
    }

    /// Positions of the active piece, in active-view order.
    pub fn active_positions(&self) -> Vec<Cube> {
        self.active().map(|c| c.position).collect()
    }

    fn reclassify(&mut self) {
        self.placed.clear();
        self.active.clear();
        self.preview.clear();
        self.occupied.clear();
        for (i, cell) in self.cells.iter().enumerate() {
            debug_assert!(
                cell.position.is_valid(),
                "cell {} off lattice at {}",
                cell.id,
                cell.position
            );
            match cell.role {
                Role::Placed => {
                    self.placed.push(i);
                    self.occupied.insert(cell.position);
                }
                Role::Active { .. } => self.active.push(i),
                Role::Preview { .. } => self.preview.push(i),
            }
        }
        debug_assert!(self.active().filter(|c| c.role.is_pivot()).count() <= 1);
        debug_assert!(self.preview().filter(|c| c.role.is_pivot()).count() <= 1);
        self.boundaries = compute_boundaries(self.placed.iter().map(|&i| &self.cells[i]));
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
