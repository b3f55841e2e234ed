//! HexView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Each hex is two columns wide and one row tall. A cube position
//! `(x, y, z)` lands at column `2x + y` and row `y` relative to the origin
//! hex, which gives the usual offset-row hex layout.
//!
//! The origin sits at the centre of the board until the active piece would
//! leave the screen; then the view slides just far enough to keep the pivot
//! a few cells inside the edge.

use crate::core::GameSnapshot;
use crate::fb::{FrameBuffer, Glyph, Rgb, Style, BACKGROUND};
use crate::types::{CellColor, Cube, Direction, Role};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Short-lived feedback shown in the side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    /// Points gained by the last turn.
    Scored(u32),
    /// The last intent was rejected.
    Blocked,
}

/// Screen-space arrow for a fall direction.
pub fn arrow(direction: Direction) -> char {
    match direction.index() {
        0 => '→',
        1 => '↗',
        2 => '↖',
        3 => '←',
        4 => '↙',
        _ => '↘',
    }
}

const MIN_BOARD_WIDTH: u16 = 24;

/// How close (columns, rows) the active pivot may get to the board edge.
const COL_MARGIN: i32 = 8;
const ROW_MARGIN: i32 = 3;

const PLACED: char = '█';
const ACTIVE: char = '▓';
const PREVIEW: char = '░';

pub struct HexView {
    /// Side panel width in terminal columns.
    panel_width: u16,
}

impl Default for HexView {
    fn default() -> Self {
        Self { panel_width: 22 }
    }
}

impl HexView {
    pub fn new(panel_width: u16) -> Self {
        Self { panel_width }
    }

    /// Board width for `viewport`; zero-width panel when it does not fit.
    fn split(&self, viewport: Viewport) -> (u16, u16) {
        if viewport.width >= self.panel_width + MIN_BOARD_WIDTH {
            (viewport.width - self.panel_width, self.panel_width)
        } else {
            (viewport.width, 0)
        }
    }

    /// Screen column and row of the origin hex for this frame.
    pub fn origin_at(&self, snap: &GameSnapshot, viewport: Viewport) -> (i32, i32) {
        let (board_w, _) = self.split(viewport);
        let half_w = board_w as i32 / 2;
        let half_h = viewport.height as i32 / 2;
        let centre = (half_w - 1, half_h);

        let Some(pivot) = snap.active().find(|c| c.role.is_pivot()) else {
            return centre;
        };
        let p = pivot.position;
        let dc = follow(2 * p.x + p.y, half_w - COL_MARGIN);
        let dr = follow(p.y, half_h - ROW_MARGIN);
        (centre.0 - dc, centre.1 - dr)
    }

    /// Left column and row of the hex at `position`, given the origin's.
    pub fn project(&self, position: Cube, origin: (i32, i32)) -> (i32, i32) {
        (origin.0 + 2 * position.x + position.y, origin.1 + position.y)
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when
    /// the terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        flash: Option<Flash>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Glyph::new(' ', Style::fg(Rgb::new(60, 60, 72))));

        let (board_w, panel_w) = self.split(viewport);
        let origin = self.origin_at(snap, viewport);
        self.draw_lattice(fb, board_w, origin, viewport);

        // Placed first so a moving piece is never hidden by the stack.
        for cell in snap.placed() {
            self.draw_hex(fb, cell.position, origin, board_w, PLACED, cell_style(cell.color, cell.role));
        }
        for cell in snap.preview().chain(snap.active()) {
            let glyph = if cell.role.is_active() { ACTIVE } else { PREVIEW };
            self.draw_hex(fb, cell.position, origin, board_w, glyph, cell_style(cell.color, cell.role));
        }

        if panel_w > 0 {
            self.draw_side_panel(fb, snap, flash, board_w as i32 + 1, viewport);
        }

        let overlay = Style::fg(Rgb::new(255, 255, 255)).bold();
        let mid = viewport.height as i32 / 2;
        if snap.phase == crate::core::Phase::Over {
            fb.put_centered(0, board_w as i32, mid - 1, " GAME OVER ", overlay);
            fb.put_centered(0, board_w as i32, mid + 1, " r to restart ", overlay.dim());
        } else if snap.paused {
            fb.put_centered(0, board_w as i32, mid, " PAUSED ", overlay);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, flash: Option<Flash>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, flash, viewport, &mut fb);
        fb
    }

    fn draw_hex(
        &self,
        fb: &mut FrameBuffer,
        position: Cube,
        origin: (i32, i32),
        board_w: u16,
        ch: char,
        style: Style,
    ) {
        let (col, row) = self.project(position, origin);
        for x in col..col + 2 {
            if x < board_w as i32 {
                fb.set(x, row, Glyph::new(ch, style));
            }
        }
    }

    /// Faint dot on the left half of every empty hex.
    fn draw_lattice(&self, fb: &mut FrameBuffer, board_w: u16, origin: (i32, i32), viewport: Viewport) {
        let dot = Glyph::new('·', Style::fg(Rgb::new(48, 48, 58)));
        let (ox, oy) = origin;
        for row in 0..viewport.height as i32 {
            let y = row - oy;
            // Columns whose offset from the origin hex has the row's parity.
            let first = (ox + y).rem_euclid(2);
            for col in (first..board_w as i32).step_by(2) {
                fb.set(col, row, dot);
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        flash: Option<Flash>,
        x: i32,
        viewport: Viewport,
    ) {
        let rule = Style::fg(Rgb::new(70, 70, 84));
        for row in 0..viewport.height as i32 {
            fb.set(x - 1, row, Glyph::new('│', rule));
        }

        let title = Style::fg(Rgb::new(255, 200, 90)).bold();
        let label = Style::fg(Rgb::new(220, 220, 220)).bold();
        let value = Style::fg(Rgb::new(200, 200, 200));
        let x = x + 1;

        let mut y = 1;
        fb.put_str(x, y, "HEXTRIS", title);
        y += 2;

        fb.put_str(x, y, "SCORE", label);
        fb.put_u32(x + 10, y, snap.score, value);
        y += 1;
        fb.put_str(x, y, "INTERVAL", label);
        let end = fb.put_u32(x + 10, y, snap.drop_interval_ms, value);
        fb.put_str(end, y, "ms", value.dim());
        y += 2;

        fb.put_str(x, y, "FALL", label);
        fb.set(x + 10, y, Glyph::new(arrow(snap.drop_direction), value.bold()));
        y += 1;
        fb.put_str(x, y, "NEXT", label);
        fb.set(x + 10, y, Glyph::new(arrow(snap.next_direction), value.dim()));
        y += 2;

        fb.put_str(x, y, "STACK", label);
        fb.put_u32(x + 10, y, snap.placed().count() as u32, value);
        y += 1;
        fb.put_str(x, y, "PIECES", label);
        fb.put_u32(x + 10, y, snap.pieces_locked, value);
        y += 1;
        fb.put_str(x, y, "SEED", label);
        fb.put_u32(x + 10, y, snap.seed, value.dim());
        y += 2;

        match flash {
            Some(Flash::Scored(points)) => {
                let style = Style::fg(Rgb::new(120, 255, 140)).bold();
                let end = fb.put_str(x, y, "+", style);
                fb.put_u32(end, y, points, style);
            }
            Some(Flash::Blocked) => {
                fb.put_str(x, y, "blocked", Style::fg(Rgb::new(255, 110, 110)));
            }
            None => {}
        }

        let help = Style::fg(Rgb::new(120, 120, 135));
        let lines = [
            "←/→ a/d  move",
            "↓ s space  drop",
            "↑ w e  rotate",
            "q  rotate left",
            "p pause  r restart",
            "esc  quit",
        ];
        let top = viewport.height as i32 - lines.len() as i32 - 1;
        if top > y + 1 {
            for (i, line) in lines.iter().enumerate() {
                fb.put_str(x, top + i as i32, line, help);
            }
        }
    }
}

/// Smallest shift that brings `offset` within `reach` of zero.
fn follow(offset: i32, reach: i32) -> i32 {
    let reach = reach.max(0);
    if offset > reach {
        offset - reach
    } else if offset < -reach {
        offset + reach
    } else {
        0
    }
}

fn cell_style(color: CellColor, role: Role) -> Style {
    let rgb = Rgb::from_hex(color.rgb());
    match role {
        Role::Placed => Style::fg(rgb),
        Role::Active { .. } => Style::fg(rgb).bold(),
        Role::Preview { .. } => Style::fg(rgb.mix(BACKGROUND, 40)).dim(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameState;

    fn ch_at(fb: &FrameBuffer, (x, y): (i32, i32)) -> Option<char> {
        fb.get(x as u16, y as u16).map(|g| g.ch)
    }

    #[test]
    fn neighbours_tile_without_overlap() {
        let view = HexView::default();
        let origin = (40, 15);
        let cols: Vec<(i32, i32)> = Direction::ALL
            .iter()
            .map(|d| {
                let (x, y) = view.project(d.vector(), origin);
                (x - origin.0, y - origin.1)
            })
            .collect();
        assert_eq!(cols, vec![(2, 0), (1, -1), (-1, -1), (-2, 0), (-1, 1), (1, 1)]);
    }

    #[test]
    fn arrows_are_distinct() {
        let mut arrows: Vec<char> = Direction::ALL.iter().map(|&d| arrow(d)).collect();
        arrows.sort();
        arrows.dedup();
        assert_eq!(arrows.len(), 6);
    }

    #[test]
    fn renders_bedrock_active_and_preview() {
        let state = GameState::new(3);
        let snap = state.snapshot();
        let view = HexView::default();
        let vp = Viewport::new(100, 45);
        let fb = view.render(&snap, None, vp);

        let origin = view.origin_at(&snap, vp);
        assert_eq!(ch_at(&fb, view.project(Cube::ORIGIN, origin)), Some(PLACED));
        let visible = |glyph: char| fb.glyphs().iter().filter(|g| g.ch == glyph).count();
        assert_eq!(visible(PLACED), 7 * 2);
        assert!(visible(ACTIVE) > 0);
        assert!(visible(PREVIEW) > 0);
    }

    #[test]
    fn follow_shifts_only_past_reach() {
        assert_eq!(follow(5, 10), 0);
        assert_eq!(follow(-10, 10), 0);
        assert_eq!(follow(14, 10), 4);
        assert_eq!(follow(-14, 10), -4);
        assert_eq!(follow(3, -2), 3);
    }

    #[test]
    fn active_piece_stays_on_a_standard_terminal() {
        let view = HexView::default();
        let vp = Viewport::new(80, 24);
        let (board_w, _) = view.split(vp);
        for seed in 1..=20 {
            let mut state = GameState::new(seed);
            for _ in 0..4 {
                let snap = state.snapshot();
                let fb = view.render(&snap, None, vp);
                let origin = view.origin_at(&snap, vp);
                let pivot = snap.active().find(|c| c.role.is_pivot()).map(|c| c.position);
                let pivot = pivot.expect("live game has a pivot");
                let (x, y) = view.project(pivot, origin);
                assert!(x >= 0 && x + 1 < board_w as i32, "seed {seed}: column {x}");
                assert!(y >= 0 && y < vp.height as i32, "seed {seed}: row {y}");
                assert_eq!(ch_at(&fb, (x, y)), Some(ACTIVE), "seed {seed}");
                state.apply_action(crate::types::GameAction::Drop);
            }
        }
    }

    #[test]
    fn view_centres_on_origin_without_an_active_piece() {
        let view = HexView::default();
        let vp = Viewport::new(80, 24);
        let snap = GameSnapshot::default();
        assert_eq!(view.origin_at(&snap, vp), (28, 12));
    }

    #[test]
    fn side_panel_shows_score_and_flash() {
        let state = GameState::new(3);
        let snap = state.snapshot();
        let view = HexView::default();
        let fb = view.render(&snap, Some(Flash::Scored(12)), Viewport::new(100, 40));
        let text: String = fb.glyphs().iter().map(|g| g.ch).collect();
        assert!(text.contains("SCORE"));
        assert!(text.contains("1250ms"));
        assert!(text.contains("+12"));

        let fb = view.render(&snap, Some(Flash::Blocked), Viewport::new(100, 40));
        let text: String = fb.glyphs().iter().map(|g| g.ch).collect();
        assert!(text.contains("blocked"));
    }

    #[test]
    fn narrow_viewport_drops_panel() {
        let state = GameState::new(3);
        let fb = HexView::default().render(&state.snapshot(), None, Viewport::new(30, 20));
        let text: String = fb.glyphs().iter().map(|g| g.ch).collect();
        assert!(!text.contains("SCORE"));
    }

    #[test]
    fn overlays() {
        let mut state = GameState::new(3);
        state.apply_action(crate::types::GameAction::Pause);
        let fb = HexView::default().render(&state.snapshot(), None, Viewport::new(100, 40));
        let text: String = fb.glyphs().iter().map(|g| g.ch).collect();
        assert!(text.contains("PAUSED"));

        let mut snap = state.snapshot();
        snap.phase = crate::core::Phase::Over;
        let fb = HexView::default().render(&snap, None, Viewport::new(100, 40));
        let text: String = fb.glyphs().iter().map(|g| g.ch).collect();
        assert!(text.contains("GAME OVER"));
        assert!(!text.contains("PAUSED"));
    }
}
