//! Snapshot module - read-only view of the game for renderers.
//!
//! A `GameSnapshot` is filled in place every frame, so its buffers are kept
//! between calls.

use crate::notation::Move;
use crate::strategy::ResponseSource;
use crate::types::{BarMark, Outcome, TurnPhase};

#[derive(Debug, Clone, PartialEq)]
pub struct RowSnapshot {
    pub size: u32,
    pub removed: u32,
    pub bars: Vec<BarMark>,
    /// Vertical offset in rows, relative to the row's resting position.
    pub offset: f32,
    /// The row emptied and is about to be dropped.
    pub squished: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BannerSnapshot {
    pub outcome: Outcome,
    /// Squish-in progress in `0.0..=1.0`.
    pub progress: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub rows: Vec<RowSnapshot>,
    pub phase: TurnPhase,
    pub can_move: bool,
    pub generation: u64,
    pub session_id: u32,
    pub table_ready: bool,
    pub oversized: bool,
    pub banner: Option<BannerSnapshot>,
    pub last_response: Option<(Move, ResponseSource)>,
}

impl GameSnapshot {
    /// Whether bar presses can currently change the staged move.
    pub fn playable(&self) -> bool {
        !self.oversized && matches!(self.phase, TurnPhase::Idle | TurnPhase::PlayerAnimating)
    }

    /// Write the row sizes, in board order, into a reused buffer.
    pub fn sizes_into(&self, out: &mut Vec<u32>) {
        out.clear();
        out.extend(self.rows.iter().map(|r| r.size));
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            phase: TurnPhase::Idle,
            can_move: true,
            generation: 0,
            session_id: 0,
            table_ready: false,
            oversized: false,
            banner: None,
            last_response: None,
        }
    }
}
