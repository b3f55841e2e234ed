//! Game state module - the movement and rotation engine
//!
//! [`GameState`] ties the grid, the RNG and the elimination routines together.
//! It applies player intents to the active piece (drop, sideways move,
//! rotate), resolves a turn when a drop is blocked (lock, eliminate, score,
//! spawn the next preview piece) and detects game over.
//!
//! Every intent returns `true` when visible state changed. After game over
//! all of them return `false` without touching anything.

use std::f64::consts::SQRT_2;

use tracing::{debug, info, trace};

use crate::boundary::{compute_boundaries, lateral_offset};
use crate::config::EngineConfig;
use crate::elimination::{eliminate_clusters, eliminate_rings};
use crate::events::EngineEvent;
use crate::generator::generate_piece;
use crate::grid::{Cell, Grid};
use crate::rng::SimpleRng;
use crate::rotation::rotate_about;
use crate::snapshot::GameSnapshot;
use crate::types::{Cube, Direction, GameAction, Side, Turn};

/// Lifecycle of a game.
///
/// `Resolving` is only observable from inside a turn resolution; intents
/// always see `Active` or `Over`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Active,
    Resolving,
    Over,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: EngineConfig,
    grid: Grid,
    rng: SimpleRng,
    seed: u32,
    phase: Phase,
    paused: bool,
    score: u32,
    drop_interval_ms: u32,
    drop_direction: Direction,
    next_direction: Direction,
    /// Flips on every sideways move to alternate between the two diagonal
    /// neighbours on that side.
    parity: bool,
    pieces_locked: u32,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    events: Vec<EngineEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed and default tuning
    pub fn new(seed: u32) -> Self {
        Self::with_config(seed, EngineConfig::default())
    }

    /// Seed bedrock and spawn the first active and preview pieces.
    pub fn with_config(seed: u32, config: EngineConfig) -> Self {
        let mut state = Self {
            config,
            grid: Grid::with_bedrock(),
            rng: SimpleRng::new(seed),
            seed,
            phase: Phase::Active,
            paused: false,
            score: 0,
            drop_interval_ms: config.base_interval_ms,
            drop_direction: Direction::default(),
            next_direction: Direction::default(),
            parity: false,
            pieces_locked: 0,
            episode_id: 0,
            events: Vec::new(),
        };
        // The first spawn only lays out a preview; the second promotes it.
        if !(state.spawn_next() && state.spawn_next()) {
            state.enter_game_over();
        }
        state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn drop_direction(&self) -> Direction {
        self.drop_direction
    }

    pub fn next_direction(&self) -> Direction {
        self.next_direction
    }

    pub fn cells(&self) -> &[Cell] {
        self.grid.cells()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// Drain the notifications queued since the last call.
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.cells.clear();
        out.cells.extend_from_slice(self.grid.cells());
        out.phase = self.phase;
        out.paused = self.paused;
        out.score = self.score;
        out.drop_interval_ms = self.drop_interval_ms;
        out.drop_direction = self.drop_direction;
        out.next_direction = self.next_direction;
        out.episode_id = self.episode_id;
        out.seed = self.seed;
        out.pieces_locked = self.pieces_locked;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn accepts_input(&self) -> bool {
        self.phase == Phase::Active && !self.paused
    }

    /// Move the active piece one step along `direction` (the fall direction
    /// when `None`).
    ///
    /// When blocked, `end_turn` decides between resolving the turn (and
    /// returning `true`) and reporting failure.
    pub fn drop_piece(&mut self, direction: Option<Direction>, end_turn: bool) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let step = direction.unwrap_or(self.drop_direction).vector();
        let blocked = self
            .grid
            .active()
            .any(|c| self.grid.is_occupied(c.position + step));
        if blocked {
            if end_turn {
                return self.resolve_turn();
            }
            trace!(%step, "drop blocked");
            return false;
        }
        self.grid.translate_active(step);
        true
    }

    /// Turn the active piece 60° about its pivot.
    ///
    /// A forced rotation skips the collision check and always reports
    /// `false`; it is how other moves undo a rotation.
    pub fn rotate_piece(&mut self, turn: Turn, force: bool) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some(pivot) = self.grid.pivot().map(|c| c.position) else {
            return false;
        };
        let candidates: Vec<Cube> = self
            .grid
            .active()
            .map(|c| rotate_about(c.position, pivot, turn))
            .collect();
        if !force && candidates.iter().any(|&p| self.grid.is_occupied(p)) {
            trace!(?turn, "rotation blocked");
            return false;
        }
        self.grid.set_active_positions(&candidates);
        !force
    }

    /// Sideways move relative to the fall direction.
    ///
    /// While the piece still overlaps the stack's lateral extent it shifts
    /// one diagonal step. Past the edge of the stack it wraps around
    /// instead: the piece and the fall direction turn 60° toward `side` and
    /// the piece is re-homed against the stack on the new axis.
    pub fn move_piece(&mut self, side: Side) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let lr = side.offset();
        if lr == 0 {
            return self.drop_piece(None, true);
        }

        self.parity = !self.parity;
        let fall = self.drop_direction;
        let s = fall.sign();
        let toward_max = s * lr == -1;

        let own = *compute_boundaries(self.grid.active()).edge(fall);
        if own.is_empty() {
            return false;
        }
        let stack = *self.grid.boundaries().edge(fall);
        let room = stack.is_empty() || {
            let own_edge = (if toward_max { own.max } else { own.min }) as i64;
            let stack_edge = (if toward_max { stack.min } else { stack.max }) as i64;
            (lr * s) as i64 * (own_edge - stack_edge) < 0
        };

        if room {
            let steps = if lr == 1 {
                1 + self.parity as i32
            } else {
                5 - self.parity as i32
            };
            return self.drop_piece(Some(fall.rotate(steps)), false);
        }
        self.wrap_around(lr)
    }

    fn wrap_around(&mut self, lr: i32) -> bool {
        let turn = if lr == -1 { Turn::Left } else { Turn::Right };
        let previous = self.drop_direction;
        self.rotate_piece(turn, true);
        self.drop_direction = previous.rotate(-lr);

        if self.rehome(lr) {
            debug!(
                from = previous.index(),
                to = self.drop_direction.index(),
                "wrapped around the stack"
            );
            return true;
        }

        self.rotate_piece(turn.reverse(), true);
        self.drop_direction = previous;
        trace!(direction = previous.index(), "wrap blocked");
        false
    }

    /// Place the active piece against the stack on the current fall axis.
    fn rehome(&mut self, lr: i32) -> bool {
        let dir = self.drop_direction;
        let toward_max = dir.sign() * lr == -1;

        let stack = *self.grid.boundaries().edge(dir);
        if stack.is_empty() {
            return false;
        }
        let own = *compute_boundaries(self.grid.active()).edge(dir);
        let anchor_id = if toward_max { own.min_id } else { own.max_id };
        let anchor = anchor_id
            .and_then(|id| self.grid.find(id))
            .map(|c| c.position);
        let pivot = self.grid.pivot().map(|c| c.position);
        let (Some(anchor), Some(pivot)) = (anchor, pivot) else {
            return false;
        };

        let w = if toward_max { stack.max } else { stack.min };
        let height = (dir.vector().dot(pivot).abs() as f64 / SQRT_2).round() as i32;
        let target = dir.vector() * -height + lateral_offset(dir, w);
        self.move_active_to(target, anchor)
    }

    /// Translate the active piece so `anchor` lands on `target`.
    fn move_active_to(&mut self, target: Cube, anchor: Cube) -> bool {
        let offset = target - anchor;
        if self
            .grid
            .active()
            .any(|c| self.grid.is_occupied(c.position + offset))
        {
            return false;
        }
        self.grid.translate_active(offset);
        true
    }

    /// Lock, eliminate, score and spawn. Always reports a change.
    fn resolve_turn(&mut self) -> bool {
        self.phase = Phase::Resolving;

        let locked = self.grid.lock_active();
        self.pieces_locked += 1;
        debug!(
            locked,
            direction = self.drop_direction.index(),
            pieces = self.pieces_locked,
            "piece locked"
        );

        let mut gained = eliminate_rings(&mut self.grid);
        if self.config.cluster_elimination {
            gained += eliminate_clusters(&mut self.grid);
        }
        if gained > 0 {
            self.score += gained;
            self.drop_interval_ms = self.config.drop_interval_for(self.score);
            self.events.push(EngineEvent::DropIntervalChanged {
                interval_ms: self.drop_interval_ms,
            });
            self.events.push(EngineEvent::Vanish { points: gained });
            debug!(
                gained,
                score = self.score,
                interval_ms = self.drop_interval_ms,
                "scored"
            );
        }

        if self.spawn_next() {
            self.phase = Phase::Active;
        } else {
            self.enter_game_over();
        }
        true
    }

    fn enter_game_over(&mut self) {
        self.phase = Phase::Over;
        self.events.push(EngineEvent::GameOver);
        info!(
            score = self.score,
            pieces = self.pieces_locked,
            seed = self.seed,
            "game over"
        );
    }

    /// Promote the preview piece and lay out a new one for a fresh direction.
    ///
    /// Returns `false` (adding nothing) if the new preview would overlap the
    /// stack.
    fn spawn_next(&mut self) -> bool {
        self.grid.promote_preview();
        self.drop_direction = self.next_direction;
        self.next_direction = self
            .drop_direction
            .rotate(1 + self.rng.next_range(5) as i32);

        let dir = self.next_direction;
        let edge = *self.grid.boundaries().edge(dir);
        let w = if edge.is_empty() {
            0
        } else {
            edge.min + self.rng.next_range(edge.width() as u32) as i32
        };
        // Keep clear of the outermost column on that side.
        let w = if w > 0 { w - 1 } else { w + 1 };
        let origin = dir.vector() * -(self.config.drop_height / 2) + lateral_offset(dir, w);

        let piece = generate_piece(&mut self.rng, &mut self.grid, origin, true);
        if piece.iter().any(|c| self.grid.is_occupied(c.position)) {
            debug!(%origin, direction = dir.index(), "spawn blocked");
            return false;
        }
        self.grid.insert(piece);
        debug!(%origin, direction = dir.index(), "preview spawned");
        true
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_piece(Side::Left),
            GameAction::MoveRight => self.move_piece(Side::Right),
            GameAction::Drop => self.drop_piece(None, true),
            GameAction::RotateLeft => self.rotate_piece(Turn::Left, false),
            GameAction::RotateRight => self.rotate_piece(Turn::Right, false),
            GameAction::Pause => {
                if self.phase == Phase::Over {
                    return false;
                }
                self.paused = !self.paused;
                true
            }
            GameAction::Restart => {
                let seed = self.rng.state();
                let next_episode = self.episode_id.wrapping_add(1);
                *self = Self::with_config(seed, self.config);
                self.episode_id = next_episode;
                info!(seed, episode = next_episode, "restarted");
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
