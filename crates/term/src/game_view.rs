//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested. Rendering and
//! [`GameView::hit_test`] share one layout so a mouse press always lands on
//! the bar that was drawn under it.

use crate::core::notation::encode_row;
use crate::core::{GameSnapshot, RowSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{BarMark, TurnPhase};

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

/// What a terminal cell maps back to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    Bar { row: usize, bar: usize },
    /// The Submit / Restart button.
    Button,
}

pub const OVERSIZED_TEXT: &str = "Invalid Game (too big)";
const SUBMIT_LABEL: &str = "[ Submit ]";
const RESTART_LABEL: &str = "[ Restart ]";
const BAR_GLYPH: char = 'I';

const BAR_FG: Rgb = Rgb::new(240, 200, 90);
const GREY_FG: Rgb = Rgb::new(110, 110, 110);
const LABEL_FG: Rgb = Rgb::new(130, 170, 220);
const CURSOR_BG: Rgb = Rgb::new(60, 60, 90);

/// A lightweight terminal renderer for the Nim board.
pub struct GameView {
    /// Terminal columns per bar.
    bar_w: u16,
    /// Terminal rows per board row.
    row_h: u16,
    margin: u16,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            bar_w: 2,
            row_h: 2,
            margin: 2,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Layout {
    label_x: u16,
    bars_x: u16,
    board_y: u16,
    /// Height of the board area (at least one row, so it survives an empty board).
    rows_h: u16,
    button_x: u16,
    button_y: u16,
    button_w: u16,
    status_y: u16,
}

impl GameView {
    fn layout(&self, snap: &GameSnapshot) -> Layout {
        let label_x = self.margin;
        let board_y = self.margin;
        let rows_h = (snap.rows.len().max(1) as u16).saturating_mul(self.row_h);
        let button_y = board_y.saturating_add(rows_h).saturating_add(1);
        Layout {
            label_x,
            bars_x: label_x + 3,
            board_y,
            rows_h,
            button_x: label_x,
            button_y,
            button_w: button_label(snap).chars().count() as u16,
            status_y: button_y.saturating_add(2),
        }
    }

    /// Resting row `i` shifted by its slide offset.
    fn row_y(&self, layout: &Layout, i: usize, row: &RowSnapshot) -> Option<u16> {
        let base = layout.board_y as f32 + (i as f32) * self.row_h as f32;
        let y = (base + row.offset * self.row_h as f32).round();
        (y >= 0.0 && y <= u16::MAX as f32).then_some(y as u16)
    }

    /// Render the snapshot into an existing framebuffer.
    ///
    /// `cursor` is the keyboard cursor (row, bar), highlighted while the player
    /// can act.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        cursor: Option<(usize, usize)>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        if snap.oversized {
            let w = OVERSIZED_TEXT.chars().count() as u16;
            let x = viewport.width.saturating_sub(w) / 2;
            let style = CellStyle {
                bold: true,
                ..CellStyle::fg(Rgb::new(230, 90, 90))
            };
            fb.put_str(x, viewport.height / 2, OVERSIZED_TEXT, style);
            return;
        }

        let layout = self.layout(snap);
        self.draw_title(fb, snap);

        let cursor = cursor.filter(|_| snap.playable());
        for (i, row) in snap.rows.iter().enumerate() {
            let Some(y) = self.row_y(&layout, i, row) else {
                continue;
            };
            self.draw_row(fb, &layout, i, y, row, cursor);
        }

        self.draw_button(fb, &layout, snap);
        self.draw_status(fb, &layout, snap);

        if let Some(banner) = snap.banner {
            self.draw_banner(fb, &layout, banner.outcome.banner(), banner.progress);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(
        &self,
        snap: &GameSnapshot,
        cursor: Option<(usize, usize)>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, cursor, viewport, &mut fb);
        fb
    }

    /// Map a terminal cell back to a bar or the button.
    pub fn hit_test(
        &self,
        snap: &GameSnapshot,
        viewport: Viewport,
        x: u16,
        y: u16,
    ) -> Option<HitTarget> {
        if snap.oversized || x >= viewport.width || y >= viewport.height {
            return None;
        }
        let layout = self.layout(snap);

        if y == layout.button_y && x >= layout.button_x && x < layout.button_x + layout.button_w {
            return Some(HitTarget::Button);
        }

        for (i, row) in snap.rows.iter().enumerate() {
            let Some(row_y) = self.row_y(&layout, i, row) else {
                continue;
            };
            if y != row_y || x < layout.bars_x {
                continue;
            }
            let dx = x - layout.bars_x;
            // Only the glyph column of a bar is a target, not the gap after it.
            if dx % self.bar_w != 0 {
                return None;
            }
            let col = dx / self.bar_w;
            return bar_columns(&row.bars)
                .find(|&(_, c, _)| c == col)
                .map(|(bar, _, _)| HitTarget::Bar { row: i, bar });
        }
        None
    }

    fn draw_title(&self, fb: &mut FrameBuffer, snap: &GameSnapshot) {
        let style = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        fb.put_str(self.margin, 0, "MARIENBAD", style);
        let dim = CellStyle {
            dim: true,
            ..CellStyle::default()
        };
        let x = self.margin + 11;
        fb.put_str(x, 0, "game", dim);
        fb.put_u32(x + 5, 0, snap.session_id.saturating_add(1), dim);
    }

    fn draw_row(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        i: usize,
        y: u16,
        row: &RowSnapshot,
        cursor: Option<(usize, usize)>,
    ) {
        let label = CellStyle {
            fg: LABEL_FG,
            dim: row.squished,
            ..CellStyle::default()
        };
        fb.put_char(layout.label_x, y, encode_row(i).unwrap_or('?'), label);

        if row.squished {
            fb.put_char(layout.bars_x, y, '·', CellStyle { dim: true, ..label });
            return;
        }

        for (bar, col, mark) in bar_columns(&row.bars) {
            let x = layout.bars_x.saturating_add(col.saturating_mul(self.bar_w));
            let mut style = match mark {
                BarMark::Solid => CellStyle {
                    bold: true,
                    ..CellStyle::fg(BAR_FG)
                },
                BarMark::Greyed => CellStyle {
                    dim: true,
                    ..CellStyle::fg(GREY_FG)
                },
                BarMark::Hidden | BarMark::Squished => CellStyle::default(),
            };
            if cursor == Some((i, bar)) {
                style.bg = CURSOR_BG;
            }
            let ch = if mark == BarMark::Hidden { ' ' } else { BAR_GLYPH };
            fb.put_char(x, y, ch, style);
        }
    }

    fn draw_button(&self, fb: &mut FrameBuffer, layout: &Layout, snap: &GameSnapshot) {
        let active = match snap.phase {
            TurnPhase::Ended => true,
            _ => snap.playable() && snap.rows.iter().any(|r| r.removed > 0),
        };
        let style = CellStyle {
            bold: active,
            dim: !active,
            ..CellStyle::fg(Rgb::new(120, 220, 140))
        };
        fb.put_str(layout.button_x, layout.button_y, button_label(snap), style);
    }

    fn draw_status(&self, fb: &mut FrameBuffer, layout: &Layout, snap: &GameSnapshot) {
        let style = CellStyle {
            dim: true,
            ..CellStyle::default()
        };
        let text = if !snap.table_ready {
            "Loading strategy..."
        } else {
            match snap.phase {
                TurnPhase::Idle | TurnPhase::PlayerAnimating => "Your move",
                TurnPhase::Submitting if snap.can_move => "Removing...",
                TurnPhase::Submitting | TurnPhase::OpponentAnimating => "Opponent's move",
                TurnPhase::Ended => "Game over",
            }
        };
        fb.put_str(layout.label_x, layout.status_y, text, style);

        if let Some((mv, source)) = snap.last_response {
            let y = layout.status_y.saturating_add(1);
            let mut x = layout.label_x;
            fb.put_str(x, y, "Opponent took", style);
            x += 14;
            x += fb.put_u32(x, y, mv.count, style) + 1;
            fb.put_str(x, y, "from", style);
            x += 5;
            fb.put_char(x, y, encode_row(mv.row).unwrap_or('?'), style);
            let tag = match source {
                crate::core::ResponseSource::Table => "(table)",
                crate::core::ResponseSource::Random => "(random)",
            };
            fb.put_str(x + 2, y, tag, style);
        }
    }

    /// The banner grows horizontally from its centre.
    fn draw_banner(
        &self,
        fb: &mut FrameBuffer,
        layout: &Layout,
        text: &str,
        progress: f32,
    ) {
        let len = text.chars().count();
        let visible = ((len as f32) * progress.clamp(0.0, 1.0)).round() as usize;
        if visible == 0 {
            return;
        }
        let skip = (len - visible) / 2;

        let y = layout.board_y + layout.rows_h.saturating_sub(1) / 2;
        let x = layout.bars_x + (len - visible) as u16 / 2;
        let style = CellStyle {
            fg: Rgb::new(255, 255, 255),
            bg: Rgb::new(40, 40, 60),
            bold: true,
            dim: false,
        };
        fb.fill_rect(x.saturating_sub(1), y, visible as u16 + 2, 1, ' ', style);
        for (dx, ch) in text.chars().skip(skip).take(visible).enumerate() {
            fb.put_char(x + dx as u16, y, ch, style);
        }
    }
}

fn button_label(snap: &GameSnapshot) -> &'static str {
    if snap.phase == TurnPhase::Ended {
        RESTART_LABEL
    } else {
        SUBMIT_LABEL
    }
}

/// `(bar index, column, mark)` for every bar that still takes up space.
fn bar_columns(bars: &[BarMark]) -> impl Iterator<Item = (usize, u16, BarMark)> + '_ {
    bars.iter()
        .enumerate()
        .filter(|(_, m)| **m != BarMark::Squished)
        .enumerate()
        .map(|(col, (bar, &m))| (bar, col as u16, m))
}
