//! Shared helpers for the integration tests.

#![allow(dead_code)]

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use hextris::core::{Cell, GameState, Grid, SimpleRng};
use hextris::types::{CellColor, Cube, GameAction, Role};

pub use hextris::core::ring_positions;

static LOGGING: OnceCell<()> = OnceCell::new();

/// Route engine logs to the test harness once per binary.
///
/// `TEST_LOG` wins over `RUST_LOG`; the default is quiet.
pub fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Add stack cells at `positions`.
pub fn place(grid: &mut Grid, positions: &[Cube]) {
    let cells: Vec<Cell> = positions
        .iter()
        .map(|&position| Cell {
            id: grid.allocate_id(),
            position,
            color: CellColor::Piece {
                hue: 3,
                translucent: false,
            },
            role: Role::Placed,
        })
        .collect();
    grid.insert(cells);
}

/// A reproducible stream of player intents, drop-heavy so pieces land.
pub fn scripted_actions(seed: u32, len: usize) -> Vec<GameAction> {
    const MENU: [GameAction; 8] = [
        GameAction::Drop,
        GameAction::Drop,
        GameAction::Drop,
        GameAction::Drop,
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::RotateLeft,
        GameAction::RotateRight,
    ];
    let mut rng = SimpleRng::new(seed);
    (0..len).map(|_| MENU[rng.next_index(MENU.len())]).collect()
}

/// Play `actions`, stopping early on game over.
pub fn play(state: &mut GameState, actions: &[GameAction]) {
    for &action in actions {
        if state.game_over() {
            break;
        }
        state.apply_action(action);
    }
}
