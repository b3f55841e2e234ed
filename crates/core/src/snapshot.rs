use crate::game_state::Phase;
use crate::grid::Cell;
use crate::types::Direction;

/// Read-only copy of everything a renderer needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSnapshot {
    pub cells: Vec<Cell>,
    pub phase: Phase,
    pub paused: bool,
    pub score: u32,
    pub drop_interval_ms: u32,
    pub drop_direction: Direction,
    pub next_direction: Direction,
    pub episode_id: u32,
    pub seed: u32,
    pub pieces_locked: u32,
}

impl GameSnapshot {
    /// Reset to an empty board, keeping the cell allocation.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.phase = Phase::Active;
        self.paused = false;
        self.score = 0;
        self.drop_interval_ms = 0;
        self.drop_direction = Direction::default();
        self.next_direction = Direction::default();
        self.episode_id = 0;
        self.seed = 0;
        self.pieces_locked = 0;
    }

    pub fn playable(&self) -> bool {
        self.phase != Phase::Over && !self.paused
    }

    pub fn placed(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter().filter(|c| c.role.is_placed())
    }

    pub fn active(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter().filter(|c| c.role.is_active())
    }

    pub fn preview(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.cells.iter().filter(|c| c.role.is_preview())
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            cells: Vec::new(),
            phase: Phase::Active,
            paused: false,
            score: 0,
            drop_interval_ms: 0,
            drop_direction: Direction::default(),
            next_direction: Direction::default(),
            episode_id: 0,
            seed: 0,
            pieces_locked: 0,
        }
    }
}
