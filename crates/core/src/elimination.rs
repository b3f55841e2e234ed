//! Elimination module - ring clears and cluster clears
//!
//! Both routines work on placed cells only, mutate the grid through
//! [`Grid::mutate`]/[`Grid::remove`] so the boundary table stays current,
//! and return the score they award.
//!
//! # Rings
//!
//! Starting at layer 2 and moving outward, a layer holding `6 * layer` placed
//! cells is complete. Its cells are removed, every placed cell further out
//! steps one layer inward, and any collapsed cells that end up sharing a
//! position are all removed. The scan stops at the first empty layer, even if
//! cells exist further out.
//!
//! # Clusters
//!
//! A sweep of shrinking hexagonal windows centred on placed cells of mid-range
//! L1 shells; a window that is completely filled is removed and scores its
//! cell count. Off by default.

use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::debug;

use crate::grid::Grid;
use crate::types::{CellId, Cube, Direction, FIRST_RING_LAYER};

/// Lattice points at hex distance exactly `layer` (for `layer >= 1`).
pub fn ring_size(layer: i32) -> usize {
    (6 * layer) as usize
}

/// Every lattice point at hex distance `layer`, walking the hexagon from
/// `layer` steps out along direction 4.
pub fn ring_positions(layer: i32) -> Vec<Cube> {
    let mut p = Direction::new(4).vector() * layer;
    let mut out = Vec::with_capacity(ring_size(layer.max(0)));
    for d in Direction::ALL {
        for _ in 0..layer {
            out.push(p);
            p += d.vector();
        }
    }
    out
}

/// Lattice points within hex distance `r` of a cell, the cell included.
pub fn hex_count(r: i32) -> usize {
    (1 + 3 * r * (r + 1)) as usize
}

/// First neighbour, in direction order, one layer closer to the origin.
pub fn step_inward(position: Cube) -> Option<Cube> {
    let layer = position.layer();
    Direction::ALL
        .iter()
        .map(|d| position + d.vector())
        .find(|n| n.layer() < layer)
}

/// Clear complete rings and collapse the shell above each one.
pub fn eliminate_rings(grid: &mut Grid) -> u32 {
    let mut score = 0u32;
    let mut layer = FIRST_RING_LAYER;
    loop {
        let ring: HashSet<CellId> = grid
            .placed()
            .filter(|c| c.position.layer() == layer)
            .map(|c| c.id)
            .collect();
        if ring.is_empty() {
            break;
        }

        if ring.len() >= ring_size(layer) {
            let (collapsed, duplicates) = grid.mutate(|cells| {
                cells.retain(|c| !ring.contains(&c.id));

                let mut moved = Vec::new();
                for (i, cell) in cells.iter_mut().enumerate() {
                    if !cell.role.is_placed() || cell.position.layer() < layer {
                        continue;
                    }
                    if let Some(inner) = step_inward(cell.position) {
                        cell.position = inner;
                        moved.push(i);
                    }
                }

                let mut at: HashMap<Cube, usize> = HashMap::new();
                for &i in &moved {
                    *at.entry(cells[i].position).or_default() += 1;
                }
                let doomed: HashSet<CellId> = moved
                    .iter()
                    .filter(|&&i| at[&cells[i].position] > 1)
                    .map(|&i| cells[i].id)
                    .collect();
                cells.retain(|c| !doomed.contains(&c.id));
                (moved.len(), doomed.len())
            });

            debug!(
                layer,
                removed = ring.len(),
                collapsed,
                duplicates,
                "ring eliminated"
            );
            score += ring_size(layer) as u32;
        }
        layer += 1;
    }
    score
}

/// Clear completely filled hexagonal windows.
pub fn eliminate_clusters(grid: &mut Grid) -> u32 {
    let mut by_shell: BTreeMap<i32, Vec<CellId>> = BTreeMap::new();
    let mut h_max = 0;
    for cell in grid.placed() {
        let h = cell.position.l1();
        h_max = h_max.max(h);
        by_shell.entry(h).or_default().push(cell.id);
    }

    let mut score = 0u32;
    let mut size = (h_max + 3) / 4 * 2 + 2;
    while size > 2 {
        let threshold = hex_count(size / 2);
        for (&h, centres) in &by_shell {
            if h <= 6 || 2 * h > h_max + 4 {
                continue;
            }
            for &id in centres {
                // Centres swept away by an earlier window are skipped.
                let Some(centre) = grid
                    .find(id)
                    .filter(|c| c.role.is_placed())
                    .map(|c| c.position)
                else {
                    continue;
                };
                let block: HashSet<CellId> = grid
                    .placed()
                    .filter(|c| (c.position - centre).l1() <= size && c.position.l1() > 1)
                    .map(|c| c.id)
                    .collect();
                if block.len() >= threshold {
                    grid.remove(&block);
                    debug!(%centre, size, removed = block.len(), "cluster eliminated");
                    score += block.len() as u32;
                }
            }
        }
        size -= 2;
    }
    score
}
