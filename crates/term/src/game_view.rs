//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! The player's grid and the target pattern are drawn side by side with a HUD
//! underneath. Each progression state adds its own overlay line. This module is
//! pure (no I/O) and is unit-tested against the framebuffer contents.

use std::fmt::Write;

use arrayvec::ArrayString;

use crate::core::scoring::ScoreResult;
use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{ProgressionState, TilePosition, CAMPAIGN_LEVELS};

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

const BG: Rgb = Rgb::new(0, 0, 0);
const PANEL_BG: Rgb = Rgb::new(30, 30, 40);
const GAP: u16 = 4;

/// Tile palette, indexed by tile type. Glyphs keep types apart without colour.
const TILE_COLORS: [(Rgb, char); 7] = [
    (Rgb::new(80, 120, 220), '●'),
    (Rgb::new(240, 220, 80), '■'),
    (Rgb::new(220, 80, 80), '▲'),
    (Rgb::new(100, 220, 120), '◆'),
    (Rgb::new(200, 120, 220), '★'),
    (Rgb::new(80, 220, 220), '✚'),
    (Rgb::new(255, 165, 0), '♥'),
];

/// A lightweight terminal renderer for the puzzle.
pub struct GameView {
    /// Tile width in terminal columns.
    cell_w: u16,
    /// Tile height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 4x2 keeps tiles roughly square in most terminal fonts.
        Self {
            cell_w: 4,
            cell_h: 2,
        }
    }
}

/// Where the two grid frames landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    left_x: u16,
    right_x: u16,
    top_y: u16,
    frame_w: u16,
    frame_h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
        }
    }

    /// Render into an existing framebuffer. `cursor` marks the keyboard cursor.
    ///
    /// Callers reuse the framebuffer across frames; it is only reallocated when
    /// the viewport grows.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        cursor: Option<TilePosition>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(220, 220, 220), BG).cell(' '));

        let title = CellStyle::new(Rgb::new(255, 255, 255), BG).bold();
        fb.put_str_centered(0, viewport.width, 0, "TILE SWAP", title);

        if snap.has_grid() {
            let layout = self.layout(snap.grid_size, viewport);
            self.draw_grids(fb, snap, cursor, layout);
            let hud_y = layout.top_y + layout.frame_h + 1;
            self.draw_hud(fb, snap, layout.left_x, hud_y);
            self.draw_overlay(fb, snap, viewport, hud_y + 3);
        } else {
            self.draw_overlay(fb, snap, viewport, viewport.height / 2);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        cursor: Option<TilePosition>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    fn layout(&self, size: u8, viewport: Viewport) -> Layout {
        let frame_w = size as u16 * self.cell_w + 2;
        let frame_h = size as u16 * self.cell_h + 2;
        let total_w = frame_w * 2 + GAP;
        let left_x = viewport.width.saturating_sub(total_w) / 2;
        Layout {
            left_x,
            right_x: left_x + frame_w + GAP,
            top_y: 3,
            frame_w,
            frame_h,
        }
    }

    fn draw_grids(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        cursor: Option<TilePosition>,
        layout: Layout,
    ) {
        let label = CellStyle::new(Rgb::new(200, 200, 200), BG).bold();
        let border = CellStyle::new(Rgb::new(200, 200, 200), BG);
        let target_border = CellStyle::new(Rgb::new(120, 120, 130), BG);

        fb.put_str_centered(layout.left_x, layout.frame_w, layout.top_y - 1, "GRID", label);
        fb.put_str_centered(layout.right_x, layout.frame_w, layout.top_y - 1, "TARGET", label);
        draw_border(fb, layout.left_x, layout.top_y, layout.frame_w, layout.frame_h, border);
        draw_border(fb, layout.right_x, layout.top_y, layout.frame_w, layout.frame_h, target_border);

        let hide_tiles = snap.state == ProgressionState::Paused;
        for row in 0..snap.grid_size {
            for col in 0..snap.grid_size {
                let pos = TilePosition::new(row, col);
                let current = if hide_tiles { None } else { snap.current_at(pos) };
                let selected = snap.selection == Some(pos);
                self.draw_tile(fb, layout.left_x, layout.top_y, pos, current, selected);
                if cursor == Some(pos) && snap.playable() {
                    self.draw_cursor(fb, layout.left_x, layout.top_y, pos);
                }
                self.draw_tile(fb, layout.right_x, layout.top_y, pos, snap.target_at(pos), false);
            }
        }
    }

    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        frame_x: u16,
        frame_y: u16,
        pos: TilePosition,
        tile: Option<u8>,
        selected: bool,
    ) {
        let (x, y) = self.cell_origin(frame_x, frame_y, pos);
        let Some(tile) = tile else {
            let style = CellStyle::new(Rgb::new(90, 90, 100), PANEL_BG).dim();
            fb.fill_rect(x, y, self.cell_w, self.cell_h, '·', style);
            return;
        };

        let (fg, glyph) = TILE_COLORS[tile as usize % TILE_COLORS.len()];
        let bg = if selected {
            Rgb::new(90, 90, 110)
        } else {
            PANEL_BG
        };
        let style = CellStyle {
            fg,
            bg,
            bold: selected,
            dim: false,
        };
        fb.fill_rect(x, y, self.cell_w, self.cell_h, ' ', style);
        fb.put_char(x + self.cell_w / 2, y + (self.cell_h - 1) / 2, glyph, style);
    }

    fn draw_cursor(&self, fb: &mut FrameBuffer, frame_x: u16, frame_y: u16, pos: TilePosition) {
        let (x, y) = self.cell_origin(frame_x, frame_y, pos);
        let mut style = fb.get(x, y).map(|c| c.style).unwrap_or_default();
        style.fg = Rgb::new(255, 255, 255);
        style.bold = true;
        let mid = y + (self.cell_h - 1) / 2;
        fb.put_char(x, mid, '[', style);
        fb.put_char(x + self.cell_w - 1, mid, ']', style);
    }

    fn cell_origin(&self, frame_x: u16, frame_y: u16, pos: TilePosition) -> (u16, u16) {
        (
            frame_x + 1 + pos.col as u16 * self.cell_w,
            frame_y + 1 + pos.row as u16 * self.cell_h,
        )
    }

    fn draw_hud(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, x: u16, y: u16) {
        let label = CellStyle::new(Rgb::new(150, 150, 160), BG);
        let value = CellStyle::new(Rgb::new(230, 230, 230), BG).bold();
        let low_time = snap.time_remaining * 10.0 <= snap.time_limit * 2.0;
        let clock = if low_time {
            CellStyle::new(Rgb::new(240, 90, 90), BG).bold()
        } else {
            value
        };

        let mut cx = fb.put_str(x, y, "LEVEL ", label);
        cx = fb.put_u32(cx, y, snap.level, value);
        cx = fb.put_str(cx + 3, y, "TIME ", label);
        cx = fb.put_clock(cx, y, snap.time_remaining, clock);
        cx = fb.put_str(cx + 3, y, "MOVES ", label);
        cx = fb.put_u32(cx, y, snap.moves, value);
        cx = fb.put_str(cx, y, "/", label);
        fb.put_u32(cx, y, snap.move_target, label);

        let y2 = y + 1;
        cx = fb.put_str(x, y2, "SCORE ", label);
        cx = fb.put_u64(cx, y2, snap.total_score, value);
        cx = fb.put_str(cx + 3, y2, "STARS ", label);
        fb.put_u32(cx, y2, snap.total_stars, value);
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, y: u16) {
        let headline = CellStyle::new(Rgb::new(255, 255, 255), BG).bold();
        let hint = CellStyle::new(Rgb::new(160, 160, 170), BG);
        let w = viewport.width;

        match snap.state {
            ProgressionState::Menu => {
                fb.put_str_centered(0, w, y, "Swap neighbouring tiles until the grid matches the target", hint);
                let mut line = Line::new();
                let _ = write!(line, "Enter: play level {}   q: quit", snap.level.max(1));
                fb.put_str_centered(0, w, y + 2, &line, headline);
            }
            ProgressionState::Playing => {
                fb.put_str_centered(
                    0,
                    w,
                    y,
                    "arrows: move  space: select/swap  ?: hint  p: pause  r: restart",
                    hint,
                );
            }
            ProgressionState::Paused => {
                fb.put_str_centered(0, w, y, "PAUSED", headline);
                fb.put_str_centered(0, w, y + 1, "p: resume  m: menu", hint);
            }
            ProgressionState::GameOver => {
                fb.put_str_centered(0, w, y, "TIME UP", headline);
                fb.put_str_centered(0, w, y + 1, "r: retry  m: menu", hint);
            }
            ProgressionState::LevelComplete => {
                fb.put_str_centered(0, w, y, "LEVEL COMPLETE", headline);
                if let Some(result) = snap.last_result {
                    let line = result_line(&result);
                    fb.put_str_centered(0, w, y + 1, &line, headline);
                }
                let next = if snap.level >= CAMPAIGN_LEVELS {
                    "Enter: finish campaign  r: replay"
                } else {
                    "Enter: next level  r: replay"
                };
                fb.put_str_centered(0, w, y + 2, next, hint);
            }
            ProgressionState::UnlockPrompt => {
                let mut line = Line::new();
                let _ = write!(line, "UNLOCK LEVEL {}?", snap.pending_unlock.unwrap_or(0));
                fb.put_str_centered(0, w, y, &line, headline);
                fb.put_str_centered(0, w, y + 1, "u: unlock  m: not now", hint);
            }
        }
    }
}

/// Fixed-capacity text line so overlays do not allocate per frame.
type Line = ArrayString<64>;

fn result_line(result: &ScoreResult) -> Line {
    let mut line = Line::new();
    for i in 0..3 {
        line.push(if i < result.stars { '★' } else { '☆' });
    }
    let _ = write!(line, "  +{} pts", result.points);
    line
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }

    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ProgressionController;

    fn playing_snapshot() -> GameSnapshot {
        let mut game = ProgressionController::new(42);
        game.start_level(1).unwrap();
        game.snapshot()
    }

    #[test]
    fn test_result_line_shows_stars_and_points() {
        let result = ScoreResult {
            stars: 2,
            points: 530,
            ..Default::default()
        };
        assert_eq!(result_line(&result).as_str(), "★★☆  +530 pts");

        let perfect = ScoreResult {
            stars: 3,
            points: 1205,
            ..Default::default()
        };
        assert_eq!(result_line(&perfect).as_str(), "★★★  +1205 pts");
    }

    #[test]
    fn test_menu_has_no_grid() {
        let snap = ProgressionController::new(1).snapshot();
        let fb = GameView::default().render(&snap, None, Viewport::new(80, 24));
        assert!(fb.contains_text("TILE SWAP"));
        assert!(fb.contains_text("Enter: play level 1"));
        assert!(!fb.contains_text("TARGET"));
    }

    #[test]
    fn test_playing_draws_both_grids_and_hud() {
        let snap = playing_snapshot();
        let fb = GameView::default().render(&snap, Some(TilePosition::new(0, 0)), Viewport::new(80, 24));
        assert!(fb.contains_text("GRID"));
        assert!(fb.contains_text("TARGET"));
        assert!(fb.contains_text("LEVEL 1"));
        assert!(fb.contains_text("TIME 1:00.0"));
        assert!(fb.contains_text("MOVES 0/10"));
        assert!(fb.contains_text("["));
    }

    #[test]
    fn test_target_tiles_use_palette_glyphs() {
        let snap = playing_snapshot();
        let view = GameView::default();
        let viewport = Viewport::new(80, 24);
        let fb = view.render(&snap, None, viewport);
        let layout = view.layout(snap.grid_size, viewport);

        // Checkerboard: (0,0) is type 0, (0,1) is type 1.
        let (x0, y0) = view.cell_origin(layout.right_x, layout.top_y, TilePosition::new(0, 0));
        let (x1, y1) = view.cell_origin(layout.right_x, layout.top_y, TilePosition::new(0, 1));
        assert_eq!(fb.get(x0 + 2, y0).map(|c| c.ch), Some(TILE_COLORS[0].1));
        assert_eq!(fb.get(x1 + 2, y1).map(|c| c.ch), Some(TILE_COLORS[1].1));
    }

    #[test]
    fn test_paused_hides_player_grid() {
        let mut game = ProgressionController::new(42);
        game.start_level(1).unwrap();
        game.pause();
        let snap = game.snapshot();
        let view = GameView::default();
        let viewport = Viewport::new(80, 24);
        let fb = view.render(&snap, None, viewport);
        assert!(fb.contains_text("PAUSED"));

        let layout = view.layout(snap.grid_size, viewport);
        let (x, y) = view.cell_origin(layout.left_x, layout.top_y, TilePosition::new(1, 1));
        assert_eq!(fb.get(x, y).map(|c| c.ch), Some('·'));
    }

    #[test]
    fn test_unlock_prompt_names_level() {
        let mut game = ProgressionController::new(42);
        game.start_level(4).unwrap();
        let fb = GameView::default().render(&game.snapshot(), None, Viewport::new(80, 24));
        assert!(fb.contains_text("UNLOCK LEVEL 4?"));
    }

    #[test]
    fn test_small_viewport_does_not_panic() {
        let snap = playing_snapshot();
        let fb = GameView::default().render(&snap, None, Viewport::new(10, 5));
        assert_eq!(fb.width(), 10);
    }
}
