//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the board is drawn into a plain
//! framebuffer which is then flushed to the terminal, full or as a diff. No
//! widget toolkit is involved, so the same layout also answers mouse hit tests.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_nim_core as core;
pub use tui_nim_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{GameView, HitTarget, Viewport, OVERSIZED_TEXT};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
