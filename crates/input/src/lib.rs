//! Terminal input module.
//!
//! This module is intentionally independent of any UI framework. It maps
//! `crossterm` key events into [`crate::types::InputAction`], keeps a keyboard
//! cursor over the bars, and tracks the mouse pointer so presses can be routed
//! to the bar under it.

pub mod cursor;
pub mod map;
pub mod pointer;

pub use tui_nim_types as types;

pub use cursor::BarCursor;
pub use map::{handle_key_event, should_quit};
pub use pointer::{PointerPress, PointerState, PointerTracker};
