//! Pointer tracking.
//!
//! Keeps the current mouse position, button state and the movement since the
//! previous event. The turn controller only consumes discrete presses; the
//! continuous state is there for anything that wants to follow the pointer.

use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};

use crate::types::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    pub down: bool,
    pub pos: Vec2,
    /// Movement since the previous event.
    pub delta: Vec2,
}

/// A left-button press at a terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerPress {
    pub column: u16,
    pub row: u16,
}

#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    state: PointerState,
    seen_event: bool,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    /// Fold a mouse event into the pointer state.
    ///
    /// Returns the press if this event is a left-button press.
    pub fn handle_mouse_event(&mut self, event: MouseEvent) -> Option<PointerPress> {
        let pos = Vec2::new(event.column as f32, event.row as f32);

        // There is no previous position to measure the first event against.
        self.state.delta = if self.seen_event {
            pos - self.state.pos
        } else {
            Vec2::ZERO
        };
        self.seen_event = true;
        self.state.pos = pos;

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.state.down = true;
                Some(PointerPress {
                    column: event.column,
                    row: event.row,
                })
            }
            MouseEventKind::Up(MouseButton::Left) => {
                self.state.down = false;
                None
            }
            _ => None,
        }
    }
}
