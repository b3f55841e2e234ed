//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation
//! logic. It has **no dependencies** on terminal, input or I/O code, making it:
//!
//! - **Deterministic**: Same seed produces identical games
//! - **Testable**: Unit tests for every rule, integer arithmetic throughout
//! - **Portable**: Any front end can drive it through intents and snapshots
//!
//! # Module Structure
//!
//! - [`grid`]: the spatial model (cells, role views, placed occupancy)
//! - [`boundary`]: per-direction lateral extents of a cell set
//! - [`rotation`]: exact 60° turns with integer matrices
//! - [`generator`]: random connected six-cell pieces and pivot choice
//! - [`elimination`]: ring clears with inward collapse, cluster clears
//! - [`game_state`]: intents, turn resolution, spawning, game over
//! - [`rng`]: seedable LCG feeding every random choice
//!
//! # Game Rules
//!
//! - Seven bedrock cells (the origin and its neighbours) seed the stack.
//! - A piece falls toward the origin along one of six directions; the next
//!   piece waits, translucent, up a different axis.
//! - Moving past the edge of the stack wraps the piece around it, turning the
//!   fall direction by 60°.
//! - A ring of `6 * layer` cells vanishes, the shell outside it collapses one
//!   layer inward and the ring scores `6 * layer` points.
//! - Every point shaves 3ms off the drop interval, down to 300ms.
//!
//! # Example
//!
//! ```
//! use hextris_core::{GameState, Phase};
//! use hextris_types::GameAction;
//!
//! let mut game = GameState::new(12345);
//! assert_eq!(game.cells().len(), 7 + 6 + 6);
//!
//! game.apply_action(GameAction::Drop);
//! game.apply_action(GameAction::RotateRight);
//! game.apply_action(GameAction::MoveLeft);
//!
//! assert_eq!(game.phase(), Phase::Active);
//! ```

pub mod boundary;
pub mod config;
pub mod elimination;
pub mod events;
pub mod game_state;
pub mod generator;
pub mod grid;
pub mod rng;
pub mod rotation;
pub mod snapshot;

pub use hextris_types as types;

// Re-export commonly used types for convenience
pub use boundary::{compute_boundaries, lateral_offset, BoundaryTable, Edge};
pub use config::{ConfigError, EngineConfig};
pub use elimination::{eliminate_clusters, eliminate_rings, ring_positions};
pub use events::EngineEvent;
pub use game_state::{GameState, Phase};
pub use generator::generate_piece;
pub use grid::{Cell, Grid};
pub use rng::SimpleRng;
pub use rotation::{rotate_about, ROTATE_LEFT, ROTATE_RIGHT};
pub use snapshot::GameSnapshot;
