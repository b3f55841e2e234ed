//! Core types module - shared data structures and constants
//!
//! This crate defines the fundamental types used throughout the workspace.
//! All types are pure data with no external dependencies, so they can be used
//! by the engine, the terminal view and the input mapping alike.
//!
//! # Lattice
//!
//! The playfield is an unbounded hexagonal lattice addressed by cube
//! coordinates `(x, y, z)` with `x + y + z == 0`. The seven cells of layer 0
//! and 1 are bedrock; pieces fall toward them from any of the six directions.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_INTERVAL_MS` | 1250 | Drop interval with zero score |
//! | `DROP_INTERVAL_FLOOR_MS` | 300 | Fastest drop interval |
//! | `MS_PER_POINT` | 3 | Interval reduction per point scored |
//!
//! The drop interval after scoring is
//! `max(BASE_DROP_INTERVAL_MS - MS_PER_POINT * score, DROP_INTERVAL_FLOOR_MS)`.
//!
//! # Examples
//!
//! ```
//! use hextris_types::{Cube, Direction, GameAction, Role};
//!
//! let d = Direction::new(0);
//! assert_eq!(d.vector(), Cube::new(1, 0, -1));
//! assert_eq!(d.rotate(1).vector(), Cube::new(1, -1, 0));
//!
//! assert_eq!(GameAction::from_str("rotateLeft"), Some(GameAction::RotateLeft));
//! assert_eq!(Role::Preview { pivot: true }.code(), -2);
//! ```

mod cube;

pub use cube::{Cube, Direction};

/// Cells per piece.
pub const PIECE_SIZE: usize = 6;

/// Distance (in lattice steps along the fall axis) a preview piece spawns
/// from the origin is half of this.
pub const DROP_HEIGHT: i32 = 30;

/// Drop interval at zero score (milliseconds).
pub const BASE_DROP_INTERVAL_MS: u32 = 1250;

/// The drop interval never goes below this (milliseconds).
pub const DROP_INTERVAL_FLOOR_MS: u32 = 300;

/// Interval reduction per point of total score (milliseconds).
pub const MS_PER_POINT: u32 = 3;

/// First layer checked by ring elimination. Layers 0 and 1 are bedrock.
pub const FIRST_RING_LAYER: i32 = 2;

/// Bedrock fill colour (0xRRGGBB).
pub const BEDROCK_RGB: u32 = 0xBDBDBD;

/// Piece colours (0xRRGGBB). A piece picks one at random.
pub const PALETTE: [u32; 12] = [
    0xFF9800, 0x4CAF50, 0x2196F3, 0x9C27B0, 0x00BCD4, 0xFF5252, 0x448AFF, 0x69F0AE, 0xFFD740,
    0xFF4081, 0x7C4DFF, 0x18FFFF,
];

/// Process-unique cell identity. Assigned once, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u64);

impl std::fmt::Display for CellId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a cell is doing right now.
///
/// A cell moves `Preview -> Active -> Placed` and never back. Each piece has
/// exactly one pivot, the rotation centre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Placed,
    Active { pivot: bool },
    Preview { pivot: bool },
}

impl Role {
    pub fn is_placed(self) -> bool {
        matches!(self, Role::Placed)
    }

    pub fn is_active(self) -> bool {
        matches!(self, Role::Active { .. })
    }

    pub fn is_preview(self) -> bool {
        matches!(self, Role::Preview { .. })
    }

    pub fn is_pivot(self) -> bool {
        matches!(self, Role::Active { pivot: true } | Role::Preview { pivot: true })
    }

    /// Promote a preview role to the matching active role.
    pub fn activate(self) -> Self {
        match self {
            Role::Preview { pivot } => Role::Active { pivot },
            other => other,
        }
    }

    /// Signed integer tag: `0` placed, `1`/`2` active (2 = pivot),
    /// `-1`/`-2` preview (-2 = pivot).
    ///
    /// # Examples
    ///
    /// ```
    /// use hextris_types::Role;
    ///
    /// assert_eq!(Role::Placed.code(), 0);
    /// assert_eq!(Role::Active { pivot: false }.code(), 1);
    /// assert_eq!(Role::Active { pivot: true }.code(), 2);
    /// assert_eq!(Role::Preview { pivot: false }.code(), -1);
    /// ```
    pub fn code(self) -> i8 {
        match self {
            Role::Placed => 0,
            Role::Active { pivot } => 1 + pivot as i8,
            Role::Preview { pivot } => -1 - pivot as i8,
        }
    }
}

/// Display token carried by every cell.
///
/// The engine only compares colours; it never interprets them. Preview
/// pieces are translucent until they become active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellColor {
    Bedrock,
    Piece { hue: u8, translucent: bool },
}

impl CellColor {
    /// Strip the translucency marker.
    pub fn opaque(self) -> Self {
        match self {
            CellColor::Piece { hue, .. } => CellColor::Piece {
                hue,
                translucent: false,
            },
            CellColor::Bedrock => CellColor::Bedrock,
        }
    }

    pub fn is_translucent(self) -> bool {
        matches!(
            self,
            CellColor::Piece {
                translucent: true,
                ..
            }
        )
    }

    /// 0xRRGGBB fill for this token.
    pub fn rgb(self) -> u32 {
        match self {
            CellColor::Bedrock => BEDROCK_RGB,
            CellColor::Piece { hue, .. } => PALETTE[hue as usize % PALETTE.len()],
        }
    }
}

/// Sideways intent relative to the current fall direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    /// Not sideways at all: delegates to a turn-ending drop.
    Down,
    Right,
}

impl Side {
    /// `-1`, `0` or `1`.
    pub fn offset(self) -> i32 {
        match self {
            Side::Left => -1,
            Side::Down => 0,
            Side::Right => 1,
        }
    }
}

/// 60° rotation sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn {
    Left,
    Right,
}

impl Turn {
    /// `-1` for left, `1` for right.
    pub fn sign(self) -> i32 {
        match self {
            Turn::Left => -1,
            Turn::Right => 1,
        }
    }

    pub fn reverse(self) -> Self {
        match self {
            Turn::Left => Turn::Right,
            Turn::Right => Turn::Left,
        }
    }
}

/// Player intents.
///
/// These come from key presses (or any other controller) and are applied
/// with `GameState::apply_action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Shift left relative to the fall direction
    MoveLeft,
    /// Shift right relative to the fall direction
    MoveRight,
    /// Fall one step; locks the piece when blocked
    Drop,
    /// Rotate the piece 60° left about its pivot
    RotateLeft,
    /// Rotate the piece 60° right about its pivot
    RotateRight,
    /// Toggle the drop timer
    Pause,
    /// Start a new game
    Restart,
}

impl GameAction {
    /// Parse action from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use hextris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("DROP"), Some(GameAction::Drop));
    /// assert_eq!(GameAction::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "drop" => Some(GameAction::Drop),
            "rotateleft" => Some(GameAction::RotateLeft),
            "rotateright" => Some(GameAction::RotateRight),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// camelCase name
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::Drop => "drop",
            GameAction::RotateLeft => "rotateLeft",
            GameAction::RotateRight => "rotateRight",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_tuning_values() {
        assert_eq!(BASE_DROP_INTERVAL_MS, 1250);
        assert_eq!(DROP_INTERVAL_FLOOR_MS, 300);
        assert_eq!(MS_PER_POINT, 3);
        assert_eq!(DROP_HEIGHT, 30);
        assert_eq!(PIECE_SIZE, 6);
    }

    #[test]
    fn role_codes_round_trip_through_activate() {
        assert_eq!(Role::Preview { pivot: true }.activate(), Role::Active { pivot: true });
        assert_eq!(Role::Preview { pivot: false }.activate().code(), 1);
        assert_eq!(Role::Placed.activate(), Role::Placed);
        assert!(Role::Active { pivot: true }.is_pivot());
        assert!(!Role::Placed.is_pivot());
    }

    #[test]
    fn opaque_strips_translucency() {
        let c = CellColor::Piece {
            hue: 3,
            translucent: true,
        };
        assert!(c.is_translucent());
        assert!(!c.opaque().is_translucent());
        assert_eq!(c.rgb(), c.opaque().rgb());
        assert_eq!(CellColor::Bedrock.rgb(), BEDROCK_RGB);
    }

    #[test]
    fn action_names_parse_back() {
        for a in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::Drop,
            GameAction::RotateLeft,
            GameAction::RotateRight,
            GameAction::Pause,
            GameAction::Restart,
        ] {
            assert_eq!(GameAction::from_str(a.as_str()), Some(a));
        }
    }
}
