//! Integration tests for the engine through the facade crate.

mod common;

use std::collections::HashSet;

use hextris::core::generator::is_connected;
use hextris::core::{EngineConfig, EngineEvent, GameSnapshot, GameState, Phase};
use hextris::types::{Cube, GameAction, PIECE_SIZE};

use common::{init_logging, play, scripted_actions};

fn check_invariants(state: &GameState) {
    let grid = state.grid();
    assert!(grid.cells().iter().all(|c| c.position.is_valid()));

    let placed: HashSet<Cube> = grid.placed().map(|c| c.position).collect();
    assert!(placed.contains(&Cube::ORIGIN), "origin cell was cleared");
    for d in hextris::types::Direction::ALL {
        assert!(placed.contains(&d.vector()), "bedrock ring was cleared");
    }

    assert_eq!(state.score() % 6, 0);
    assert_eq!(
        state.drop_interval_ms(),
        state.config().drop_interval_for(state.score())
    );

    if state.phase() == Phase::Active {
        assert_eq!(grid.active_count(), PIECE_SIZE);
        assert_eq!(grid.active().filter(|c| c.role.is_pivot()).count(), 1);
        let positions: Vec<Cube> = grid.active().map(|c| c.position).collect();
        assert!(is_connected(&positions));
    }
}

#[test]
fn test_game_lifecycle() {
    init_logging();
    let state = GameState::new(12345);
    assert_eq!(state.phase(), Phase::Active);
    assert!(!state.paused());
    assert_eq!(state.score(), 0);
    assert_eq!(state.grid().placed_count(), 7);
    assert_eq!(state.grid().active_count(), PIECE_SIZE);
    assert_eq!(state.grid().preview_count(), PIECE_SIZE);
    check_invariants(&state);
}

#[test]
fn test_long_session_keeps_invariants() {
    init_logging();
    for seed in [1, 42, 2024] {
        let mut state = GameState::new(seed);
        for action in scripted_actions(seed, 3000) {
            if state.game_over() {
                break;
            }
            state.apply_action(action);
            check_invariants(&state);
        }
    }
}

#[test]
fn test_pieces_lock_onto_the_stack() {
    init_logging();
    let mut state = GameState::new(9);
    let mut drops = 0;
    while state.pieces_locked() < 3 && !state.game_over() && drops < 1000 {
        state.apply_action(GameAction::Drop);
        drops += 1;
    }
    assert!(state.pieces_locked() >= 1);
    assert!(state.grid().placed_count() > 7);
}

#[test]
fn test_same_seed_same_game() {
    init_logging();
    let actions = scripted_actions(77, 1500);
    let mut a = GameState::new(5);
    let mut b = GameState::new(5);
    play(&mut a, &actions);
    play(&mut b, &actions);
    assert_eq!(a.snapshot(), b.snapshot());
    assert_eq!(a.take_events(), b.take_events());
}

#[test]
fn test_snapshot_into_matches_snapshot() {
    let mut state = GameState::new(3);
    play(&mut state, &scripted_actions(3, 200));
    let mut snap = GameSnapshot::default();
    state.snapshot_into(&mut snap);
    assert_eq!(snap, state.snapshot());
    assert_eq!(snap.placed().count(), state.grid().placed_count());
}

#[test]
fn test_events_track_score_and_interval() {
    init_logging();
    let mut state = GameState::new(11);
    let mut points = 0;
    let mut interval = state.drop_interval_ms();
    for action in scripted_actions(11, 4000) {
        if state.game_over() {
            break;
        }
        state.apply_action(action);
        for event in state.take_events() {
            match event {
                EngineEvent::Vanish { points: p } => points += p,
                EngineEvent::DropIntervalChanged { interval_ms } => {
                    assert!(interval_ms <= interval);
                    interval = interval_ms;
                }
                EngineEvent::GameOver => assert!(state.game_over()),
            }
        }
    }
    assert_eq!(points, state.score());
    assert_eq!(interval, state.drop_interval_ms());
}

#[test]
fn test_pause_blocks_intents() {
    let mut state = GameState::new(1);
    let before = state.snapshot();
    assert!(state.apply_action(GameAction::Pause));
    assert!(!state.apply_action(GameAction::Drop));
    assert!(!state.apply_action(GameAction::MoveLeft));
    assert!(!state.apply_action(GameAction::RotateRight));
    assert_eq!(state.snapshot().cells, before.cells);
    assert!(state.apply_action(GameAction::Pause));
    assert!(state.apply_action(GameAction::Drop));
}

#[test]
fn test_restart_keeps_config() {
    let config = EngineConfig::default()
        .with_base_interval_ms(900)
        .with_floor_interval_ms(200);
    let mut state = GameState::with_config(4, config);
    play(&mut state, &scripted_actions(4, 300));
    assert!(state.apply_action(GameAction::Restart));
    assert_eq!(state.episode_id(), 1);
    assert_eq!(state.score(), 0);
    assert_eq!(state.pieces_locked(), 0);
    assert_eq!(state.drop_interval_ms(), 900);
    assert_eq!(*state.config(), config);
    assert_eq!(state.grid().placed_count(), 7);
}

#[test]
fn test_spawn_at_the_stack_ends_the_game() {
    init_logging();
    let mut state = GameState::with_config(8, EngineConfig::default().with_drop_height(0));
    // The first preview already lands on the bedrock.
    for _ in 0..500 {
        if state.game_over() {
            break;
        }
        state.apply_action(GameAction::Drop);
    }
    assert_eq!(state.phase(), Phase::Over);
    assert!(state.take_events().contains(&EngineEvent::GameOver));
    assert!(!state.apply_action(GameAction::Drop));
    assert!(!state.apply_action(GameAction::Pause));
}

#[test]
fn test_cluster_sweep_keeps_lattice_and_interval() {
    let config = EngineConfig::default().with_cluster_elimination(true);
    let mut state = GameState::with_config(21, config);
    for action in scripted_actions(21, 2000) {
        if state.game_over() {
            break;
        }
        state.apply_action(action);
        assert!(state.grid().cells().iter().all(|c| c.position.is_valid()));
        assert_eq!(
            state.drop_interval_ms(),
            config.drop_interval_for(state.score())
        );
    }
}
