//! Animation timings
//!
//! Presentation parameters only: they change how long each step of a turn
//! takes, never the order of steps or the resulting board.

use crate::types::{BANNER_FRAMES, BANNER_MS, SETTLE_FRAMES, SLIDE_MS, SQUISH_MS, STEP_MS, TURN_PAUSE_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    /// Delay per revealed or hidden bar. The pause before squishing is
    /// `step_ms * removed_bars`.
    pub step_ms: u32,
    pub squish_ms: u32,
    pub turn_pause_ms: u32,
    pub slide_ms: u32,
    pub settle_frames: u8,
    pub banner_frames: u8,
    pub banner_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            step_ms: STEP_MS,
            squish_ms: SQUISH_MS,
            turn_pause_ms: TURN_PAUSE_MS,
            slide_ms: SLIDE_MS,
            settle_frames: SETTLE_FRAMES,
            banner_frames: BANNER_FRAMES,
            banner_ms: BANNER_MS,
        }
    }
}

impl Timings {
    /// Zero every duration. Frame synchronisation points are kept.
    pub fn instant() -> Self {
        Self {
            step_ms: 0,
            squish_ms: 0,
            turn_pause_ms: 0,
            slide_ms: 0,
            banner_ms: 0,
            ..Self::default()
        }
    }
}
