//! Command-line options (each with an environment fallback).

use std::path::PathBuf;

use clap::Parser;

use crate::core::{parse_board_param, Timings};
use crate::runtime::ServicesConfig;
use crate::types::{SQUISH_MS, STEP_MS, TURN_PAUSE_MS};

#[derive(Debug, Clone, Parser)]
#[command(name = "tui-nim")]
#[command(about = "Marienbad (misere Nim) against a table-driven opponent", long_about = None)]
pub struct Cli {
    /// Row sizes separated by colons, e.g. `3:5:7`. Malformed values fall
    /// back to `1:3:5:7`.
    #[arg(short = 'g', long = "game", env = "NIM_GAME", value_name = "ROWS")]
    pub game: Option<String>,

    /// Strategy table (JSON).
    #[arg(long, env = "NIM_TABLE_PATH", default_value = "sum.json")]
    pub table: PathBuf,

    /// Append a JSON-lines event log to this file.
    #[arg(long, env = "NIM_LOG_PATH", value_name = "PATH")]
    pub log: Option<PathBuf>,

    /// Seed for the opponent's random fallback.
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, default_value_t = STEP_MS)]
    pub step_ms: u32,

    #[arg(long, default_value_t = SQUISH_MS)]
    pub squish_ms: u32,

    #[arg(long, default_value_t = TURN_PAUSE_MS)]
    pub turn_pause_ms: u32,
}

impl Cli {
    pub fn board(&self) -> Vec<u32> {
        parse_board_param(self.game.as_deref())
    }

    pub fn timings(&self) -> Timings {
        Timings {
            step_ms: self.step_ms,
            squish_ms: self.squish_ms,
            turn_pause_ms: self.turn_pause_ms,
            ..Timings::default()
        }
    }

    pub fn services_config(&self) -> ServicesConfig {
        ServicesConfig {
            table_path: self.table.clone(),
            log_path: self.log.clone(),
        }
    }
}
