//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (turn controller, terminal rendering, input mapping).
//!
//! # Board Limits
//!
//! Rows are addressed by a single lowercase letter (`a` = row 0 ... `z` = row 25),
//! so a board never holds more than [`MAX_ROWS`] rows.
//!
//! # Animation Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `STEP_MS` | 50 | Delay between revealing/hiding consecutive bars |
//! | `SQUISH_MS` | 200 | Pause after squishing removed bars or an emptied row |
//! | `TURN_PAUSE_MS` | 500 | Pause before the opponent answers and before it submits |
//! | `SLIDE_MS` | 200 | Duration of the row slide after a re-sort |
//! | `BANNER_MS` | 200 | Duration of the end banner squish-in |
//!
//! Frame counts (`SETTLE_FRAMES`, `BANNER_FRAMES`) are measured in ticks.
//!
//! # Examples
//!
//! ```
//! use tui_nim_types::{Side, Vec2, DEFAULT_BOARD, MAX_ROWS};
//!
//! assert_eq!(DEFAULT_BOARD, [1, 3, 5, 7]);
//! assert_eq!(MAX_ROWS, 26);
//! assert_eq!(Side::Opponent.as_str(), "opponent");
//!
//! let delta = Vec2::new(4.0, 6.0) - Vec2::new(1.0, 2.0);
//! assert_eq!(delta, Vec2::new(3.0, 4.0));
//! ```

use std::ops::Sub;

/// Maximum number of rows (one per lowercase row letter).
pub const MAX_ROWS: usize = 26;

/// Board used when no (or a malformed) board parameter is given.
pub const DEFAULT_BOARD: [u32; 4] = [1, 3, 5, 7];

/// Delimiter between row sizes in the board parameter and the canonical key.
pub const KEY_DELIMITER: char = ':';

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Delay between two consecutive bar reveal/hide steps.
pub const STEP_MS: u32 = 50;

/// Pause after squishing removed bars, and before dropping an emptied row.
pub const SQUISH_MS: u32 = 200;

/// Pause before the opponent answers, and between its reveal and its submit.
pub const TURN_PAUSE_MS: u32 = 500;

/// Duration of the slide that moves re-sorted rows back to their resting place.
pub const SLIDE_MS: u32 = 200;

/// Frames to wait after repositioning rows before the slide starts.
pub const SETTLE_FRAMES: u8 = 2;

/// Frames to wait before the end banner starts growing.
pub const BANNER_FRAMES: u8 = 3;

/// Duration of the end banner squish-in.
pub const BANNER_MS: u32 = 200;

/// 2D vector used for pointer positions and deltas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Which participant a move or turn belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player,
    Opponent,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Player => "player",
            Side::Opponent => "opponent",
        }
    }
}

/// Result of a finished session, from the player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The player cleared the board.
    Won,
    /// The opponent cleared the board.
    Lost,
}

impl Outcome {
    /// Banner text shown when the session ends.
    pub fn banner(&self) -> &'static str {
        match self {
            Outcome::Won => "You won !",
            Outcome::Lost => "You lost",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Won => "won",
            Outcome::Lost => "lost",
        }
    }
}

/// Observable phase of the turn controller.
///
/// - **Idle**: waiting for the player's selection
/// - **PlayerAnimating**: the player's staged removal is being revealed (interruptible)
/// - **Submitting**: a committed move is being animated and applied (not interruptible)
/// - **OpponentAnimating**: the opponent is waiting, choosing or revealing its move
/// - **Ended**: terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    Idle,
    PlayerAnimating,
    Submitting,
    OpponentAnimating,
    Ended,
}

/// Visual state of a single bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarMark {
    /// Plain, selectable bar.
    Solid,
    /// Staged for removal.
    Greyed,
    /// Removed but still holding its slot.
    Hidden,
    /// Collapsed; about to be dropped from the row.
    Squished,
}

/// Discrete user intents produced by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    /// Press the bar under the cursor.
    Press,
    /// Submit the staged removal (restart once the session ended).
    Submit,
    /// Restart once the session ended.
    Restart,
}
