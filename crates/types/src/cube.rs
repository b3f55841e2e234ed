//! Cube coordinates and the six lattice directions.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

/// A hex cell position embedded in 3D, with `x + y + z == 0`.
///
/// The zero-sum constraint is what makes rotation about any lattice cell a
/// pure integer permutation of the components (see `hextris_core::rotation`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Cube {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Cube {
    pub const ORIGIN: Self = Self { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn to_array(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    pub const fn from_array(v: [i32; 3]) -> Self {
        Self {
            x: v[0],
            y: v[1],
            z: v[2],
        }
    }

    /// Component along `axis` (0 = x, 1 = y, 2 = z).
    ///
    /// Panics if `axis > 2`.
    pub fn component(self, axis: usize) -> i32 {
        self.to_array()[axis]
    }

    /// Whether the position lies on the hex lattice.
    pub fn is_valid(self) -> bool {
        self.x + self.y + self.z == 0
    }

    pub fn dot(self, other: Self) -> i32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Sum of absolute components. Always even on the lattice.
    pub fn l1(self) -> i32 {
        self.x.abs() + self.y.abs() + self.z.abs()
    }

    /// Hex distance from the origin (ring number).
    pub fn layer(self) -> i32 {
        self.l1() / 2
    }

    pub fn neighbors(self) -> [Self; 6] {
        Direction::ALL.map(|d| self + d.vector())
    }
}

impl Add for Cube {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Cube {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Cube {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Neg for Cube {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<i32> for Cube {
    type Output = Self;

    #[inline]
    fn mul(self, k: i32) -> Self {
        Self::new(self.x * k, self.y * k, self.z * k)
    }
}

impl fmt::Display for Cube {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

const DIRECTION_VECTORS: [Cube; 6] = [
    Cube::new(1, 0, -1),
    Cube::new(1, -1, 0),
    Cube::new(0, -1, 1),
    Cube::new(-1, 0, 1),
    Cube::new(-1, 1, 0),
    Cube::new(0, 1, -1),
];

/// One of the six unit steps on the lattice, ordered cyclically.
///
/// `rotate(1)` turns 60° in the same sense as a left turn of a piece;
/// `rotate(5)` (or `rotate(-1)`) turns the other way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Direction(u8);

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction(0),
        Direction(1),
        Direction(2),
        Direction(3),
        Direction(4),
        Direction(5),
    ];

    /// Direction with the given index, reduced mod 6.
    pub const fn new(index: usize) -> Self {
        Self((index % 6) as u8)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub const fn vector(self) -> Cube {
        DIRECTION_VECTORS[self.0 as usize]
    }

    /// Index arithmetic mod 6; negative steps are allowed.
    pub fn rotate(self, steps: i32) -> Self {
        Self((self.0 as i32 + steps).rem_euclid(6) as u8)
    }

    pub fn opposite(self) -> Self {
        self.rotate(3)
    }

    /// Orientation of the lateral axis when looking along this direction.
    ///
    /// Defined by `rotate(1) + rotate(2)`: that sum has exactly one
    /// component of magnitude 2, and this is half of it. It works out to
    /// `+1` for odd indices and `-1` for even ones.
    pub fn sign(self) -> i32 {
        if self.0 % 2 == 1 {
            1
        } else {
            -1
        }
    }

    /// The coordinate that does not change when stepping along this
    /// direction. Boundary tables measure extents along it.
    pub fn lateral_axis(self) -> usize {
        match self.0 {
            0 | 3 => 1,
            1 | 4 => 2,
            _ => 0,
        }
    }

    /// Look up the direction whose unit vector is `v`.
    pub fn from_vector(v: Cube) -> Option<Self> {
        DIRECTION_VECTORS
            .iter()
            .position(|&d| d == v)
            .map(|i| Self(i as u8))
    }
}

impl Default for Direction {
    fn default() -> Self {
        Direction(0)
    }
}
