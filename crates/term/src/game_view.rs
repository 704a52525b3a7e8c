//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::snapshot::{color_from_code, CELL_EMPTY};
use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::{TileColor, BOARD_HEIGHT, BOARD_WIDTH};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
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

/// Where the board frame lands inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardLayout {
    /// Top-left corner of the border.
    pub x: u16,
    pub y: u16,
    /// Size including the border.
    pub width: u16,
    pub height: u16,
}

/// Terminal renderer for the board, the falling piece and a side panel.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn layout(&self, viewport: Viewport) -> BoardLayout {
        let width = BOARD_WIDTH as u16 * self.cell_w + 2;
        let height = BOARD_HEIGHT as u16 * self.cell_h + 2;
        let x = viewport.width.saturating_sub(width) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(height) / 2,
            AnchorY::Top => 0,
        };
        BoardLayout {
            x,
            y,
            width,
            height,
        }
    }

    /// Board column under terminal column `term_x`, clamped to the board.
    pub fn column_for_x(&self, viewport: Viewport, term_x: u16) -> i32 {
        let layout = self.layout(viewport);
        let inner = term_x.saturating_sub(layout.x + 1) / self.cell_w;
        (inner as i32).min(BOARD_WIDTH as i32 - 1)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::default());

        let layout = self.layout(viewport);
        fb.fill_rect(
            layout.x + 1,
            layout.y + 1,
            layout.width - 2,
            layout.height - 2,
            ' ',
            CellStyle::plain(Rgb::new(80, 80, 90), PLAY_BG),
        );
        draw_border(
            fb,
            layout,
            CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG),
        );

        for (y, row) in snap.board.iter().enumerate() {
            for (x, &code) in row.iter().enumerate() {
                let style = if code == CELL_EMPTY {
                    None
                } else {
                    Some(tile_style(color_from_code(code)))
                };
                self.draw_cell(fb, layout, x as i32, y as i32, style);
            }
        }

        if let Some(active) = snap.active {
            let style = tile_style(Some(active.color)).bold();
            for pos in active.cells {
                self.draw_cell(fb, layout, pos.x, pos.y, Some(style));
            }
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        if snap.game_over {
            draw_overlay_text(fb, layout, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    /// Paint one board cell; `None` draws the empty grid dot.
    fn draw_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: BoardLayout,
        x: i32,
        y: i32,
        style: Option<CellStyle>,
    ) {
        if x < 0 || x >= BOARD_WIDTH as i32 || y < 0 || y >= BOARD_HEIGHT as i32 {
            return;
        }
        let (ch, style) = match style {
            Some(style) => ('█', style),
            None => ('·', CellStyle::plain(Rgb::new(90, 90, 100), PLAY_BG).dim()),
        };
        let px = layout.x + 1 + x as u16 * self.cell_w;
        let py = layout.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: BoardLayout,
    ) {
        let panel_x = layout.x.saturating_add(layout.width).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::plain(Rgb::new(200, 200, 200), PANEL_BG);
        let help = value.dim();

        let mut y = layout.y;
        fb.put_str(panel_x, y, "PIECES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.piece_id, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "SHAPE", label);
        y = y.saturating_add(1);
        fb.put_str(
            panel_x,
            y,
            snap.active.map(|a| a.kind.as_str()).unwrap_or("-"),
            value,
        );
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "KEYS", label);
        for line in [
            "←→  move",
            "↑   rotate",
            "↓   step",
            "spc drop",
            "q   quit",
        ] {
            y = y.saturating_add(1);
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
        }
    }
}

/// Display style for a landed or falling tile.
pub fn tile_style(color: Option<TileColor>) -> CellStyle {
    let fg = match color {
        Some(TileColor::Cyan) => Rgb::new(80, 220, 220),
        Some(TileColor::Yellow) => Rgb::new(240, 220, 80),
        Some(TileColor::Purple) => Rgb::new(200, 120, 220),
        Some(TileColor::Green) => Rgb::new(100, 220, 120),
        Some(TileColor::Red) => Rgb::new(220, 80, 80),
        Some(TileColor::Blue) => Rgb::new(80, 120, 220),
        Some(TileColor::Orange) => Rgb::new(255, 165, 0),
        None => Rgb::new(160, 160, 160),
    };
    CellStyle::plain(fg, PLAY_BG)
}

fn draw_border(fb: &mut FrameBuffer, layout: BoardLayout, style: CellStyle) {
    let BoardLayout {
        x,
        y,
        width: w,
        height: h,
    } = layout;
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

fn draw_overlay_text(fb: &mut FrameBuffer, layout: BoardLayout, text: &str) {
    let text_w = text.chars().count() as u16;
    let x = layout.x + layout.width.saturating_sub(text_w) / 2;
    let y = layout.y + layout.height / 2;
    fb.put_str(x, y, text, CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG).bold());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::snapshot::color_code;
    use crate::core::ActiveSnapshot;
    use crate::types::{Coordinates, ShapeKind};

    const VIEW: Viewport = Viewport {
        width: 60,
        height: 34,
    };

    #[test]
    fn layout_is_centered() {
        let layout = GameView::default().layout(VIEW);
        assert_eq!(layout.width, 22);
        assert_eq!(layout.height, 32);
        assert_eq!(layout.x, 19);
        assert_eq!(layout.y, 1);
    }

    #[test]
    fn column_mapping_clamps() {
        let view = GameView::default();
        // Inner area starts at x = 20; each board column is two terminal columns.
        assert_eq!(view.column_for_x(VIEW, 0), 0);
        assert_eq!(view.column_for_x(VIEW, 20), 0);
        assert_eq!(view.column_for_x(VIEW, 23), 1);
        assert_eq!(view.column_for_x(VIEW, 39), 9);
        assert_eq!(view.column_for_x(VIEW, 59), 9);
    }

    #[test]
    fn renders_landed_and_active_tiles() {
        let mut snap = GameSnapshot::default();
        snap.board[29][0] = color_code(Some(TileColor::Red));
        snap.active = Some(ActiveSnapshot {
            kind: ShapeKind::I,
            color: TileColor::Cyan,
            anchor: Coordinates::new(3, 0),
            cells: [
                Coordinates::new(3, 0),
                Coordinates::new(4, 0),
                Coordinates::new(5, 0),
                Coordinates::new(6, 0),
            ],
        });

        let view = GameView::default().with_anchor_y(AnchorY::Top);
        let fb = view.render(&snap, VIEW);

        // Board row 29 sits at terminal row 30; column 0 at terminal x 20..=21.
        let landed = fb.get(20, 30).unwrap();
        assert_eq!(landed.ch, '█');
        assert_eq!(landed.style.fg, tile_style(Some(TileColor::Red)).fg);

        let active = fb.get(26, 1).unwrap();
        assert_eq!(active.ch, '█');
        assert!(active.style.bold);
        assert_eq!(fb.get(22, 1).unwrap().ch, '·');
    }

    #[test]
    fn game_over_overlay() {
        let snap = GameSnapshot {
            game_over: true,
            ..GameSnapshot::default()
        };
        let layout = GameView::default().layout(VIEW);
        let fb = GameView::default().render(&snap, VIEW);
        assert!(fb.row_text(layout.y + layout.height / 2).contains("GAME OVER"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let snap = GameSnapshot::default();
        let fb = GameView::default().render(&snap, Viewport::new(5, 3));
        assert_eq!((fb.width(), fb.height()), (5, 3));
    }
}
