//! Terminal input module (engine-facing).
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::GameAction`]. The engine has no
//! notion of held keys, so terminals without key-release events work as-is:
//! auto-repeat simply arrives as more presses.

pub mod map;

pub use hextris_types as types;

pub use map::{handle_key_event, should_quit};
