//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the rules, the turn controller, and the opponent's
//! table lookup. It has **no dependencies** on terminal I/O or async runtimes:
//!
//! - **Deterministic**: a seeded session replays identically
//! - **Testable**: time only advances through [`GameState::tick`]
//! - **Portable**: the same controller can drive any front end
//!
//! # Module Structure
//!
//! - [`board`]: ordered rows with staged removals
//! - [`notation`]: row letters and compact move strings (`c10`)
//! - [`strategy`]: the precomputed response table and the random fallback
//! - [`session`]: board parameter parsing
//! - [`timing`]: animation durations
//! - [`game_state`]: the turn controller
//! - [`snapshot`]: read-only view handed to renderers
//! - [`event`]: events for observers such as the event log
//!
//! # Game Rules
//!
//! - A turn removes one or more bars from the tail of a single row
//! - Rows are kept sorted by size; emptied rows leave the board
//! - Whoever takes the last bar ends the game: the player wins by clearing the
//!   board, and loses if the opponent clears it
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use tui_nim_core::{GameState, StrategyTable, Timings};
//! use tui_nim_core::types::Outcome;
//!
//! let mut game = GameState::new(&[3], Timings::instant(), Some(7)).unwrap();
//! game.provide_table(Arc::new(StrategyTable::empty()));
//!
//! // Press the first bar: the whole row is staged, then submitted.
//! assert!(game.select_bar(0, 0));
//! assert!(game.submit());
//! for _ in 0..16 {
//!     game.tick(16).unwrap();
//! }
//! assert_eq!(game.outcome(), Some(Outcome::Won));
//! ```

pub mod board;
pub mod error;
pub mod event;
pub mod game_state;
pub mod notation;
pub mod session;
pub mod snapshot;
pub mod strategy;
pub mod timing;

pub use tui_nim_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, Row};
pub use error::{EncodingError, GameError};
pub use event::GameEvent;
pub use game_state::GameState;
pub use notation::{encode_move, encode_row, parse_move, parse_row, Move};
pub use session::parse_board_param;
pub use snapshot::{BannerSnapshot, GameSnapshot, RowSnapshot};
pub use strategy::{ResponseSource, StrategyTable, TableMeta};
pub use timing::Timings;
