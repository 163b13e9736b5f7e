//! GameView: draws a [`GameSnapshot`] (plus the running animation) into a
//! framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::animation::{bounce, ease_out_cubic, Animation, AnimationFrame};
use crate::engine::GameSnapshot;
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::{Position, TileKind, BOARD_SIZE};

const PLAYFIELD_BG: Rgb = Rgb::new(30, 30, 40);
const TILE_FG: Rgb = Rgb::new(20, 20, 24);
const PANEL_MIN_W: u16 = 14;

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

/// Screen area covered by the 8x8 grid (inside the border).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardRect {
    pub x: u16,
    pub y: u16,
    pub w: u16,
    pub h: u16,
}

impl BoardRect {
    fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x as i32
            && y >= self.y as i32
            && x < (self.x + self.w) as i32
            && y < (self.y + self.h) as i32
    }
}

/// Front-end state that is not part of the game itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scene<'a> {
    /// Keyboard cursor.
    pub cursor: Option<Position>,
    pub animation: Option<AnimationFrame<'a>>,
}

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 4x2 keeps tiles roughly square and leaves room for a two-letter label.
        Self { cell_w: 4, cell_h: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(2),
            cell_h: cell_h.max(1),
        }
    }

    pub fn board_rect(&self, viewport: Viewport) -> BoardRect {
        let w = BOARD_SIZE as u16 * self.cell_w;
        let h = BOARD_SIZE as u16 * self.cell_h;
        BoardRect {
            x: viewport.width.saturating_sub(w + 2) / 2 + 1,
            y: viewport.height.saturating_sub(h + 2) / 2 + 1,
            w,
            h,
        }
    }

    /// Board cell under terminal column `x`, row `y`.
    pub fn cell_at(&self, viewport: Viewport, x: u16, y: u16) -> Option<Position> {
        let rect = self.board_rect(viewport);
        if !rect.contains(x as i32, y as i32) {
            return None;
        }
        let row = (y - rect.y) / self.cell_h;
        let col = (x - rect.x) / self.cell_w;
        Some(Position::new(row as u8, col as u8))
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, scene: &Scene<'_>, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Style::default().glyph(' '));

        let rect = self.board_rect(viewport);
        fb.fill_rect(rect.x, rect.y, rect.w, rect.h, ' ', Style::new(PLAYFIELD_BG, PLAYFIELD_BG));
        draw_border(
            fb,
            rect.x - 1,
            rect.y - 1,
            rect.w + 2,
            rect.h + 2,
            Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0)),
        );

        let mut hidden = 0u64;
        if let Some(frame) = scene.animation {
            hidden = moving_cells(frame.animation);
        }

        for pos in Position::all() {
            if hidden & (1u64 << pos.flat_index()) != 0 {
                continue;
            }
            match tile_from_cell(snap.cell(pos)) {
                Some(kind) => self.draw_tile(fb, rect, pos.row as f32, pos.col as f32, kind, tile_style(kind)),
                None => self.draw_empty(fb, rect, pos),
            }
        }

        match scene.animation {
            Some(frame) => self.draw_animation(fb, rect, snap, frame),
            None => {
                if let Some(sel) = snap.selection {
                    if let Some(kind) = tile_from_cell(snap.cell(sel)) {
                        let base = tile_style(kind);
                        let style = Style::new(base.bg, Rgb::new(250, 250, 250)).bold();
                        self.draw_tile(fb, rect, sel.row as f32, sel.col as f32, kind, style);
                    }
                }
                if let Some(cursor) = scene.cursor {
                    self.draw_cursor(fb, rect, cursor);
                }
            }
        }

        self.draw_side_panel(fb, snap, viewport, rect);

        if snap.game_over {
            self.draw_game_over(fb, rect, snap.score);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, scene: &Scene<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, scene, viewport, &mut fb);
        fb
    }

    fn draw_animation(&self, fb: &mut FrameBuffer, rect: BoardRect, snap: &GameSnapshot, frame: AnimationFrame<'_>) {
        let p = frame.progress;
        match frame.animation {
            Animation::Swap { a, b, tile_a, tile_b } => {
                let t = ease_out_cubic(p);
                let (ar, ac) = lerp_pos(*b, *a, t);
                self.draw_tile(fb, rect, ar, ac, *tile_b, tile_style(*tile_b));
                let (br, bc) = lerp_pos(*a, *b, t);
                self.draw_tile(fb, rect, br, bc, *tile_a, tile_style(*tile_a));
            }
            Animation::Bounce { a, b, tile_a, tile_b } => {
                let t = bounce(p);
                let (ar, ac) = lerp_pos(*b, *a, t);
                self.draw_tile(fb, rect, ar, ac, *tile_b, tile_style(*tile_b));
                let (br, bc) = lerp_pos(*a, *b, t);
                self.draw_tile(fb, rect, br, bc, *tile_a, tile_style(*tile_a));
            }
            Animation::Clear { cells, .. } => {
                for pos in cells.iter() {
                    // Cells are still on the board; only their colour changes.
                    let Some(kind) = tile_from_cell(snap.cell(pos)) else {
                        continue;
                    };
                    let base = tile_style(kind);
                    let mut style = Style::new(
                        base.fg.lerp(PLAYFIELD_BG, p),
                        base.bg.lerp(PLAYFIELD_BG, p),
                    );
                    if p > 0.5 {
                        style = style.dim();
                    }
                    self.draw_tile(fb, rect, pos.row as f32, pos.col as f32, kind, style);
                }
            }
            Animation::Fall { displacements } => {
                let t = ease_out_cubic(p);
                for d in displacements.iter() {
                    let row = d.from_row as f32 + (d.to_row as f32 - d.from_row as f32) * t;
                    self.draw_tile(fb, rect, row, d.to_col as f32, d.kind, tile_style(d.kind));
                }
            }
        }
    }

    /// Draw one tile whose top-left corner sits at fractional board coordinates.
    fn draw_tile(&self, fb: &mut FrameBuffer, rect: BoardRect, row: f32, col: f32, kind: TileKind, style: Style) {
        let x0 = (rect.x as f32 + col * self.cell_w as f32).round() as i32;
        let y0 = (rect.y as f32 + row * self.cell_h as f32).round() as i32;
        let label = tile_label(kind);
        let label_x = (self.cell_w as i32 - 2) / 2;
        let label_y = (self.cell_h as i32 - 1) / 2;

        for dy in 0..self.cell_h as i32 {
            for dx in 0..self.cell_w as i32 {
                let (x, y) = (x0 + dx, y0 + dy);
                if !rect.contains(x, y) {
                    continue;
                }
                let ch = if dy == label_y && (dx == label_x || dx == label_x + 1) {
                    label[(dx - label_x) as usize]
                } else {
                    ' '
                };
                fb.put_char(x as u16, y as u16, ch, style);
            }
        }
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, rect: BoardRect, pos: Position) {
        let style = Style::new(Rgb::new(90, 90, 100), PLAYFIELD_BG).dim();
        let x = rect.x + pos.col as u16 * self.cell_w + (self.cell_w - 1) / 2;
        let y = rect.y + pos.row as u16 * self.cell_h + (self.cell_h - 1) / 2;
        fb.put_char(x, y, '·', style);
    }

    fn draw_cursor(&self, fb: &mut FrameBuffer, rect: BoardRect, pos: Position) {
        let x = rect.x + pos.col as u16 * self.cell_w;
        let y = rect.y + pos.row as u16 * self.cell_h;
        for dy in 0..self.cell_h {
            for (cx, ch) in [(x, '['), (x + self.cell_w - 1, ']')] {
                if let Some(mut glyph) = fb.get(cx, y + dy) {
                    glyph.ch = ch;
                    glyph.style = Style::new(Rgb::new(255, 255, 255), glyph.style.bg).bold();
                    fb.set(cx, y + dy, glyph);
                }
            }
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, rect: BoardRect) {
        let panel_x = rect.x + rect.w + 3;
        if panel_x >= viewport.width || viewport.width - panel_x < PANEL_MIN_W {
            return;
        }

        let label = Style::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0)).bold();
        let value = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let hint = value.dim();

        let mut y = rect.y;
        fb.put_str(panel_x, y, "SCORE", label);
        fb.put_u32(panel_x, y + 1, snap.score, value);
        y += 3;

        fb.put_str(panel_x, y, "MOVES", label);
        let x = fb.put_u32(panel_x, y + 1, snap.moves_remaining, value);
        let x = fb.put_str(x, y + 1, "/", hint);
        fb.put_u32(x, y + 1, snap.move_budget, hint);
        y += 3;

        if snap.chain > 0 && !snap.playable() {
            fb.put_str(panel_x, y, "CHAIN", label);
            let x = fb.put_str(panel_x, y + 1, "x", value);
            fb.put_u32(x, y + 1, snap.chain + 1, value.bold());
        }
        y += 3;

        for line in ["arrows  move", "space   select", "mouse   click", "r       restart", "q       quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y += 1;
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, rect: BoardRect, score: u32) {
        let style = Style::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0)).bold();
        let mid = rect.y + rect.h / 2;

        let centred = |text_w: u16| rect.x + rect.w.saturating_sub(text_w) / 2;

        let title = "GAME OVER";
        fb.put_str(centred(title.len() as u16), mid.saturating_sub(1), title, style);

        let digits = digit_count(score);
        let x = fb.put_str(centred(6 + digits), mid, "SCORE ", style);
        fb.put_u32(x, mid, score, style);

        let hint = "r to restart";
        fb.put_str(centred(hint.len() as u16), mid + 1, hint, style.dim());
    }
}

/// Bit mask of cells drawn by the animation instead of the static board.
fn moving_cells(animation: &Animation) -> u64 {
    let bit = |p: Position| 1u64 << p.flat_index();
    match animation {
        Animation::Swap { a, b, .. } | Animation::Bounce { a, b, .. } => bit(*a) | bit(*b),
        Animation::Clear { cells, .. } => cells.mask(),
        Animation::Fall { displacements } => displacements.iter().fold(0, |m, d| m | bit(d.to())),
    }
}

fn lerp_pos(from: Position, to: Position, t: f32) -> (f32, f32) {
    let r = from.row as f32 + (to.row as f32 - from.row as f32) * t;
    let c = from.col as f32 + (to.col as f32 - from.col as f32) * t;
    (r, c)
}

fn tile_from_cell(v: u8) -> Option<TileKind> {
    v.checked_sub(1).and_then(TileKind::from_index)
}

fn tile_style(kind: TileKind) -> Style {
    let bg = match kind {
        TileKind::Apple => Rgb::new(220, 70, 70),
        TileKind::Pizza => Rgb::new(240, 170, 60),
        TileKind::Sushi => Rgb::new(250, 140, 150),
        TileKind::Burger => Rgb::new(170, 110, 60),
        TileKind::Cake => Rgb::new(190, 130, 230),
    };
    Style::new(TILE_FG, bg).bold()
}

fn tile_label(kind: TileKind) -> [char; 2] {
    match kind {
        TileKind::Apple => ['A', 'p'],
        TileKind::Pizza => ['P', 'z'],
        TileKind::Sushi => ['S', 'u'],
        TileKind::Burger => ['B', 'g'],
        TileKind::Cake => ['C', 'k'],
    }
}

fn digit_count(mut n: u32) -> u16 {
    let mut d = 1;
    while n >= 10 {
        n /= 10;
        d += 1;
    }
    d
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: Style) {
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (x + w - 1, y + h - 1);

    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, bottom, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(right, y + dy, '│', style);
    }
    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
}
