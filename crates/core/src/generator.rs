//! Piece generator - random connected six-cell shapes
//!
//! Shapes grow from a single cell by attaching a neighbour to a random
//! existing member five times, so every piece is connected and free of
//! duplicate positions. The pivot is the member closest to the centroid.

use arrayvec::ArrayVec;

use crate::grid::{Cell, Grid};
use crate::rng::SimpleRng;
use crate::types::{CellColor, Cube, Direction, Role, PALETTE, PIECE_SIZE};

/// Cells of one freshly generated piece.
pub type Piece = ArrayVec<Cell, PIECE_SIZE>;

/// Generate a piece in a local frame whose first cell sits at `origin`.
///
/// Ids come from `grid`; the cells are not inserted. Preview pieces get the
/// preview role and a translucent colour.
pub fn generate_piece(rng: &mut SimpleRng, grid: &mut Grid, origin: Cube, preview: bool) -> Piece {
    let color = CellColor::Piece {
        hue: rng.next_index(PALETTE.len()) as u8,
        translucent: preview,
    };
    let role = if preview {
        Role::Preview { pivot: false }
    } else {
        Role::Active { pivot: false }
    };

    let mut positions: ArrayVec<Cube, PIECE_SIZE> = ArrayVec::new();
    positions.push(Cube::ORIGIN);
    while !positions.is_full() {
        let anchor = positions[rng.next_index(positions.len())];
        let candidate = loop {
            let candidate = anchor + Direction::ALL[rng.next_index(6)].vector();
            if !positions.contains(&candidate) {
                break candidate;
            }
        };
        positions.push(candidate);
    }

    let pivot = pivot_index(&positions);
    positions
        .iter()
        .enumerate()
        .map(|(i, &offset)| Cell {
            id: grid.allocate_id(),
            position: origin + offset,
            color,
            role: match role {
                Role::Preview { .. } => Role::Preview { pivot: i == pivot },
                _ => Role::Active { pivot: i == pivot },
            },
        })
        .collect()
}

/// Index of the position nearest the centroid; ties go to the first.
///
/// Compares `|n·p - Σp|²`, which orders positions exactly like the squared
/// distance to `Σp / n` without leaving the integers.
pub fn pivot_index(positions: &[Cube]) -> usize {
    let n = positions.len() as i64;
    let sum = positions.iter().fold([0i64; 3], |mut acc, p| {
        for (a, c) in acc.iter_mut().zip(p.to_array()) {
            *a += c as i64;
        }
        acc
    });
    let metric = |p: &Cube| -> i64 {
        p.to_array()
            .iter()
            .zip(sum)
            .map(|(&c, s)| {
                let d = n * c as i64 - s;
                d * d
            })
            .sum()
    };

    let mut best = 0;
    let mut best_metric = i64::MAX;
    for (i, p) in positions.iter().enumerate() {
        let m = metric(p);
        if m < best_metric {
            best = i;
            best_metric = m;
        }
    }
    best
}

/// Whether `positions` form one connected blob under neighbour adjacency.
pub fn is_connected(positions: &[Cube]) -> bool {
    let Some(&first) = positions.first() else {
        return true;
    };
    let mut seen = vec![first];
    let mut frontier = vec![first];
    while let Some(p) = frontier.pop() {
        for n in p.neighbors() {
            if positions.contains(&n) && !seen.contains(&n) {
                seen.push(n);
                frontier.push(n);
            }
        }
    }
    seen.len() == positions.len()
}
