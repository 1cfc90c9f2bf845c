//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Board rows grow upward while screen rows grow downward, so board row `y` is drawn on
//! screen row `height - 1 - y` inside the frame.

use crate::core::{ActiveSnapshot, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{BlockColor, Coord, ShapeKind};

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Where the well's border starts on screen and how big one board cell is.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
    cell_w: u16,
    cell_h: u16,
    rows: i32,
    cols: i32,
}

impl Frame {
    /// Top-left screen position of board cell `(x, y)`, `None` when off the board.
    fn cell_origin(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if x < 0 || x >= self.cols || y < 0 || y >= self.rows {
            return None;
        }
        let screen_row = (self.rows - 1 - y) as u64;
        let sx = u64::from(self.x) + 1 + x as u64 * u64::from(self.cell_w);
        let sy = u64::from(self.y) + 1 + screen_row * u64::from(self.cell_h);
        Some((u16::try_from(sx).ok()?, u16::try_from(sy).ok()?))
    }
}

/// Terminal view of a falling-block game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    show_ghost: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
            show_ghost: true,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            ..Self::default()
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_ghost(mut self, show_ghost: bool) -> Self {
        self.show_ghost = show_ghost;
        self
    }

    /// Width and height of the bordered well for a board of the given size.
    pub fn frame_size(&self, board_width: i32, board_height: i32) -> (u16, u16) {
        let w = clamp_u16(board_width).saturating_mul(self.cell_w);
        let h = clamp_u16(board_height).saturating_mul(self.cell_h);
        (w.saturating_add(2), h.saturating_add(2))
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// Reuses `fb` across frames; it is only resized when the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (frame_w, frame_h) = self.frame_size(snap.width, snap.height);
        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
            cell_w: self.cell_w,
            cell_h: self.cell_h,
            rows: snap.height,
            cols: snap.width,
        };

        self.draw_border(fb, &frame);

        for y in 0..snap.height {
            for x in 0..snap.width {
                match snap.block(x, y) {
                    Some(color) => self.draw_block(fb, &frame, x, y, color),
                    None => self.draw_empty(fb, &frame, x, y),
                }
            }
        }

        if let Some(active) = snap.active {
            match snap.ghost_y {
                Some(ghost_y) if self.show_ghost => self.draw_ghost(fb, &frame, &active, ghost_y),
                _ => {}
            }
            for c in active.cells_at(active.y) {
                self.draw_block(fb, &frame, c.x, c.y, active.color);
            }
        }

        self.draw_side_panel(fb, snap, viewport, &frame);

        if snap.lost {
            self.draw_overlay_text(fb, &frame, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: &Frame) {
        let (x, y, w, h) = (frame.x, frame.y, frame.w, frame.h);
        if w < 2 || h < 2 {
            return;
        }
        let style = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

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

    fn fill_cell(&self, fb: &mut FrameBuffer, frame: &Frame, x: i32, y: i32, ch: char, style: CellStyle) {
        if let Some((px, py)) = frame.cell_origin(x, y) {
            fb.fill_rect(px, py, frame.cell_w, frame.cell_h, ch, style);
        }
    }

    fn draw_empty(&self, fb: &mut FrameBuffer, frame: &Frame, x: i32, y: i32) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), WELL_BG).dim();
        self.fill_cell(fb, frame, x, y, '·', style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, frame: &Frame, x: i32, y: i32, color: BlockColor) {
        let style = CellStyle::new(color.into(), WELL_BG).bold();
        self.fill_cell(fb, frame, x, y, '█', style);
    }

    fn draw_ghost(&self, fb: &mut FrameBuffer, frame: &Frame, active: &ActiveSnapshot, ghost_y: i32) {
        let style = CellStyle::new(active.color.into(), WELL_BG).dim();
        for Coord { x, y } in active.cells_at(ghost_y) {
            self.fill_cell(fb, frame, x, y, '░', style);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, viewport: Viewport, frame: &Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);
        let hint = value.dim();

        let mut y = frame.y;
        fb.put_str(panel_x, y, "ROWS", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.rows_completed, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PIECES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.pieces_locked, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "PIECE", label);
        y = y.saturating_add(1);
        if let Some(active) = snap.active {
            let style = CellStyle::new(active.color.into(), PANEL_BG).bold();
            fb.put_str(panel_x, y, shape_letter(active.kind), style);
        } else {
            fb.put_str(panel_x, y, "-", value);
        }
        y = y.saturating_add(2);

        for line in ["←→ move", "↑ rotate", "↓ down", "space drop", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay_text(&self, fb: &mut FrameBuffer, frame: &Frame, text: &str) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let text_w = text.chars().count() as u16;
        let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        fb.put_str(x, mid_y, text, style);
    }
}

fn clamp_u16(n: i32) -> u16 {
    u16::try_from(n.max(0)).unwrap_or(u16::MAX)
}

fn shape_letter(kind: ShapeKind) -> &'static str {
    match kind {
        ShapeKind::I => "I",
        ShapeKind::J => "J",
        ShapeKind::L => "L",
        ShapeKind::O => "O",
        ShapeKind::S => "S",
        ShapeKind::T => "T",
        ShapeKind::Z => "Z",
    }
}
