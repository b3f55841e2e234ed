//! Terminal "game renderer" module.
//!
//! This is a small, game-oriented rendering layer for terminal gameplay.
//! It avoids widget toolkits and renders into a plain framebuffer that is
//! flushed to the terminal with diffing.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Project the hex lattice onto character cells (2 columns per hex)
//! - Re-send only what changed between frames

pub mod fb;
pub mod hex_view;
pub mod renderer;

pub use hextris_core as core;
pub use hextris_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use hex_view::{arrow, Flash, HexView, Viewport};
pub use renderer::{changed_runs, encode_diff_into, encode_full_into, TerminalRenderer};
