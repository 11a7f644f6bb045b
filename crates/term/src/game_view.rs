//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested. The same
//! [`BoardLayout`] is used for drawing and for mouse hit-testing, so a click
//! always lands on the tile that is visible under the pointer.

use crate::core::{GameSnapshot, Tile};
use crate::fb::{wrap_lines, CellStyle, FrameBuffer, Rgb};
use crate::types::{Difficulty, Phase, TileId, TileKind, MAX_SLOTS};

/// Terminal columns per grid unit.
pub const CELL_W: u16 = 4;
/// Terminal rows per grid unit.
pub const CELL_H: u16 = 2;

const PANEL_W: u16 = 22;
const OVERLAY_TEXT_LINES: usize = 3;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const TEXT: Rgb = Rgb::new(220, 220, 220);
const BLACK: Rgb = Rgb::new(0, 0, 0);

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

/// Front-end state drawn next to the engine snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HudView<'a> {
    pub difficulty: Difficulty,
    /// Tile under the keyboard cursor.
    pub selected: Option<TileId>,
    /// Text for the end-of-game overlay, once available.
    pub commentary: Option<&'a str>,
}

impl Default for HudView<'_> {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            selected: None,
            commentary: None,
        }
    }
}

/// Screen placement of the board frame, slot tray and side panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    pub tray_x: u16,
    pub tray_y: u16,
    pub tray_w: u16,
    pub tray_h: u16,
    pub panel_x: u16,
}

impl BoardLayout {
    pub fn new(grid_size: u32, viewport: Viewport) -> Self {
        // One extra unit so jittered tiles at the far edge stay inside.
        let units = grid_size.saturating_add(1).min(u16::MAX as u32) as u16;
        let frame_w = units.saturating_mul(CELL_W).saturating_add(2);
        let frame_h = units.saturating_mul(CELL_H).saturating_add(2);
        let tray_w = (MAX_SLOTS as u16) * CELL_W + 2;
        let tray_h = CELL_H + 2;

        let total_w = frame_w.saturating_add(2).saturating_add(PANEL_W);
        let total_h = frame_h.saturating_add(tray_h);
        let frame_x = viewport.width.saturating_sub(total_w) / 2;
        let frame_y = viewport.height.saturating_sub(total_h) / 2;

        Self {
            frame_x,
            frame_y,
            frame_w,
            frame_h,
            tray_x: frame_x.saturating_add(frame_w.saturating_sub(tray_w) / 2),
            tray_y: frame_y.saturating_add(frame_h),
            tray_w,
            tray_h,
            panel_x: frame_x.saturating_add(frame_w).saturating_add(2),
        }
    }

    /// Top-left terminal cell of a tile's footprint.
    pub fn tile_origin(&self, tile: &Tile) -> (u16, u16) {
        let px = (tile.x.max(0.0) * CELL_W as f32).round() as u16;
        let py = (tile.y.max(0.0) * CELL_H as f32).round() as u16;
        (
            self.frame_x.saturating_add(1).saturating_add(px),
            self.frame_y.saturating_add(1).saturating_add(py),
        )
    }

    fn tile_contains(&self, tile: &Tile, col: u16, row: u16) -> bool {
        let (x, y) = self.tile_origin(tile);
        col >= x && col < x.saturating_add(CELL_W) && row >= y && row < y.saturating_add(CELL_H)
    }

    fn inside_frame(&self, col: u16, row: u16) -> bool {
        col > self.frame_x
            && col < self.frame_x.saturating_add(self.frame_w).saturating_sub(1)
            && row > self.frame_y
            && row < self.frame_y.saturating_add(self.frame_h).saturating_sub(1)
    }
}

/// A lightweight terminal renderer for the tile puzzle.
#[derive(Debug, Default)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Topmost tile drawn at terminal cell `(col, row)`.
    ///
    /// Covered tiles can be returned when only their exposed part is under
    /// the pointer; the engine decides whether the pick is legal.
    pub fn tile_at(
        &self,
        snap: &GameSnapshot,
        viewport: Viewport,
        col: u16,
        row: u16,
    ) -> Option<TileId> {
        let layout = BoardLayout::new(snap.grid_size, viewport);
        if !layout.inside_frame(col, row) {
            return None;
        }
        snap.tiles
            .iter()
            .rev()
            .find(|t| layout.tile_contains(t, col, row))
            .map(|t| t.id)
    }

    /// Render the current game into an existing framebuffer.
    ///
    /// This is the allocation-free hot path. Callers can reuse a framebuffer
    /// across frames and only resize when the terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: &HudView<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = BoardLayout::new(snap.grid_size, viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), BLACK);

        fb.fill_rect(
            layout.frame_x + 1,
            layout.frame_y + 1,
            layout.frame_w.saturating_sub(2),
            layout.frame_h.saturating_sub(2),
            ' ',
            CellStyle::new(TEXT, BOARD_BG),
        );
        fb.draw_border(
            layout.frame_x,
            layout.frame_y,
            layout.frame_w,
            layout.frame_h,
            border,
        );

        // Board tiles, bottom to top.
        for tile in &snap.tiles {
            let selected = hud.selected == Some(tile.id);
            self.draw_tile(fb, &layout, tile, selected);
        }

        self.draw_tray(fb, &layout, snap, border);
        self.draw_side_panel(fb, &layout, snap, hud, viewport);

        // Overlays.
        if snap.paused {
            self.draw_overlay(fb, &layout, "PAUSED", None, "p resume");
        } else if snap.phase == Phase::Won {
            let text = hud.commentary.unwrap_or("...");
            self.draw_overlay(fb, &layout, "YOU WIN", Some(text), "r again  m menu");
        } else if snap.phase == Phase::Lost {
            let text = hud.commentary.unwrap_or("...");
            self.draw_overlay(fb, &layout, "GAME OVER", Some(text), "r retry  m menu");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: &HudView<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    /// Difficulty picker shown before a game starts.
    pub fn render_menu_into(&self, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let w = 36u16.min(viewport.width);
        let h = 11u16.min(viewport.height);
        let x = viewport.width.saturating_sub(w) / 2;
        let y = viewport.height.saturating_sub(h) / 2;

        let title = CellStyle::new(Rgb::new(255, 255, 255), BLACK).bold();
        let label = CellStyle::new(TEXT, BLACK);
        let hint = label.dim();

        fb.draw_border(x, y, w, h, CellStyle::new(Rgb::new(200, 200, 200), BLACK));
        fb.put_str_centered(x, y + 2, w, "TUI SHEEP", title);

        let mut row = y + 4;
        for (key, difficulty) in [("1", Difficulty::Easy), ("2", Difficulty::Hard)] {
            let config = difficulty.config();
            let mut cx = fb.put_str(x + 3, row, key, title);
            cx = fb.put_str(cx + 2, row, difficulty.as_str(), label);
            cx = fb.put_u32((cx + 1).max(x + 12), row, config.total_tiles, hint);
            cx = fb.put_str(cx, row, " tiles, ", hint);
            cx = fb.put_u32(cx, row, config.active_type_count as u32, hint);
            fb.put_str(cx, row, " kinds", hint);
            row += 1;
        }
        row += 1;
        let cx = fb.put_str(x + 3, row, "q", title);
        fb.put_str(cx + 2, row, "quit", label);
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, layout: &BoardLayout, tile: &Tile, selected: bool) {
        let (x, y) = layout.tile_origin(tile);
        let color = kind_color(tile.kind);

        let style = if selected {
            CellStyle::new(BLACK, Rgb::new(255, 255, 255)).bold()
        } else if tile.clickable {
            CellStyle::new(BLACK, color).bold()
        } else {
            CellStyle::new(Rgb::new(120, 120, 120), color.darken(80))
        };

        fb.fill_rect(x, y, CELL_W, CELL_H, ' ', style);
        fb.put_str(x + 1, y, tile.kind.label(), style);
        if !tile.clickable && CELL_H > 1 {
            fb.put_str(x, y + CELL_H - 1, "░░░░", style);
        }
    }

    fn draw_tray(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        snap: &GameSnapshot,
        border: CellStyle,
    ) {
        fb.draw_border(layout.tray_x, layout.tray_y, layout.tray_w, layout.tray_h, border);

        let empty = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        for i in 0..MAX_SLOTS as u16 {
            let x = layout.tray_x + 1 + i * CELL_W;
            let y = layout.tray_y + 1;
            match snap.slot.get(i as usize) {
                Some(tile) => {
                    let style = if snap.is_matching(tile.id) {
                        CellStyle::new(BLACK, Rgb::new(255, 255, 255)).bold()
                    } else {
                        CellStyle::new(BLACK, kind_color(tile.kind)).bold()
                    };
                    fb.fill_rect(x, y, CELL_W, CELL_H, ' ', style);
                    fb.put_str(x + 1, y, tile.kind.label(), style);
                }
                None => {
                    fb.fill_rect(x, y, CELL_W, CELL_H, ' ', empty);
                    fb.put_char(x + CELL_W / 2, y, '·', empty);
                }
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        snap: &GameSnapshot,
        hud: &HudView<'_>,
        viewport: Viewport,
    ) {
        let panel_x = layout.panel_x;
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(TEXT, BLACK).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), BLACK);
        let hint = value.dim();

        let mut y = layout.frame_y;
        fb.put_str(panel_x, y, "LEVEL", label);
        y += 1;
        fb.put_str(panel_x, y, hud.difficulty.as_str(), value);
        y += 2;

        fb.put_str(panel_x, y, "MOVES", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.move_count, value);
        y += 2;

        fb.put_str(panel_x, y, "TILES LEFT", label);
        y += 1;
        let cx = fb.put_u32(panel_x, y, snap.tiles.len() as u32, value);
        let cx = fb.put_str(cx, y, " / ", hint);
        fb.put_u32(cx, y, snap.level_tiles, hint);
        y += 2;

        fb.put_str(panel_x, y, "CLEARED", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.cleared(), value);
        y += 2;

        fb.put_str(panel_x, y, "SLOT", label);
        y += 1;
        let cx = fb.put_u32(panel_x, y, snap.slot.len() as u32, value);
        let cx = fb.put_str(cx, y, " / ", hint);
        fb.put_u32(cx, y, MAX_SLOTS as u32, hint);
        y += 2;

        for line in [
            "click/enter pick",
            "\u{2190}\u{2192} tab  select",
            "s shuffle  u undo",
            "p pause  r restart",
            "m menu  q quit",
        ] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y += 1;
        }
    }

    fn draw_overlay(
        &self,
        fb: &mut FrameBuffer,
        layout: &BoardLayout,
        title: &str,
        text: Option<&str>,
        hint: &str,
    ) {
        let w = layout.frame_w.saturating_sub(4).min(34);
        let text_lines = if text.is_some() {
            OVERLAY_TEXT_LINES as u16 + 1
        } else {
            0
        };
        let h = 4 + text_lines;
        let x = layout.frame_x + layout.frame_w.saturating_sub(w) / 2;
        let y = layout.frame_y + layout.frame_h.saturating_sub(h) / 2;

        let bg = CellStyle::new(Rgb::new(255, 255, 255), BLACK);
        fb.fill_rect(x, y, w, h, ' ', bg);
        fb.draw_border(x, y, w, h, bg);

        let inner_w = w.saturating_sub(2);
        let mut row = y + 1;
        fb.put_str_centered(x + 1, row, inner_w, title, bg.bold());
        row += 1;

        if let Some(text) = text {
            row += 1;
            for line in wrap_lines(text, inner_w.saturating_sub(2)).take(OVERLAY_TEXT_LINES) {
                fb.put_str_centered(x + 1, row, inner_w, line, bg);
                row += 1;
            }
            row = y + 2 + text_lines;
        }

        fb.put_str_centered(x + 1, row, inner_w, hint, bg.dim());
    }
}

fn kind_color(kind: TileKind) -> Rgb {
    match kind {
        TileKind::Sheep => Rgb::new(235, 235, 235),
        TileKind::Carrot => Rgb::new(255, 140, 40),
        TileKind::Fire => Rgb::new(230, 70, 60),
        TileKind::Stump => Rgb::new(150, 100, 60),
        TileKind::Wool => Rgb::new(240, 200, 220),
        TileKind::Grass => Rgb::new(100, 210, 90),
        TileKind::Bucket => Rgb::new(90, 150, 230),
        TileKind::Corn => Rgb::new(245, 215, 70),
        TileKind::Brush => Rgb::new(180, 120, 220),
        TileKind::Milk => Rgb::new(160, 220, 230),
    }
}
