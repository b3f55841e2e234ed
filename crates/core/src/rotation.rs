//! Rotation module - exact 60° turns on the cube lattice
//!
//! A 60° turn in cube coordinates is a signed permutation of the components,
//! but it is written here as an integer matrix pre-scaled by 3: multiply the
//! offset (as a row vector) by the matrix and divide every component by 3.
//! For zero-sum offsets the division is always exact, so no rounding ever
//! happens and six turns in one sense are the identity.

use crate::types::{Cube, Turn};

/// 3x3 integer matrix, row-major.
pub type Mat3 = [[i32; 3]; 3];

/// Left turn: `(x, y, z) -> (-z, -x, -y)`; direction `i` becomes `i + 1`.
pub const ROTATE_LEFT: Mat3 = [[2, -1, 2], [2, 2, -1], [-1, 2, 2]];

/// Right turn: `(x, y, z) -> (-y, -z, -x)`; direction `i` becomes `i - 1`.
pub const ROTATE_RIGHT: Mat3 = [[2, 2, -1], [-1, 2, 2], [2, -1, 2]];

pub fn matrix(turn: Turn) -> &'static Mat3 {
    match turn {
        Turn::Left => &ROTATE_LEFT,
        Turn::Right => &ROTATE_RIGHT,
    }
}

/// Row vector times matrix.
pub fn mul_row(v: Cube, m: &Mat3) -> [i32; 3] {
    let v = v.to_array();
    let mut out = [0i32; 3];
    for (j, slot) in out.iter_mut().enumerate() {
        *slot = v[0] * m[0][j] + v[1] * m[1][j] + v[2] * m[2][j];
    }
    out
}

/// Rotate an offset about the origin by one 60° step.
pub fn rotate_offset(offset: Cube, turn: Turn) -> Cube {
    debug_assert!(offset.is_valid(), "rotating off-lattice offset {offset}");
    let scaled = mul_row(offset, matrix(turn));
    debug_assert!(
        scaled.iter().all(|c| c % 3 == 0),
        "inexact rotation of {offset}: {scaled:?}"
    );
    Cube::from_array(scaled.map(|c| c / 3))
}

/// Rotate `position` about `pivot` by one 60° step.
pub fn rotate_about(position: Cube, pivot: Cube, turn: Turn) -> Cube {
    rotate_offset(position - pivot, turn) + pivot
}
