//! Hextris (workspace facade crate).
//!
//! This package exposes `hextris::{core,input,term,types}` while the
//! implementation lives in dedicated crates under `crates/`. The drop timer
//! that drives the engine from the terminal loop lives here.

pub mod drop_timer;

pub use hextris_core as core;
pub use hextris_input as input;
pub use hextris_term as term;
pub use hextris_types as types;

pub use drop_timer::DropTimer;
