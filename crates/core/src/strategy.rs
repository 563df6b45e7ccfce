//! Strategy table - precomputed opponent responses
//!
//! The table is an immutable JSON document:
//!
//! ```json
//! { "meta": { "max_length": 7, "max_height": 4 },
//!   "data": { "1:3:5:7": null, "3:5:7": "a2" } }
//! ```
//!
//! `data` maps a canonical board key to the move to answer with. A missing key
//! and a `null` entry mean the same thing: no tabulated answer, so the opponent
//! falls back to a uniformly random legal move.

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::error::EncodingError;
use crate::notation::{parse_move, Move};

/// Largest board the table covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableMeta {
    /// Largest supported row size.
    pub max_length: u32,
    /// Largest supported row count.
    pub max_height: u32,
}

impl TableMeta {
    pub fn supports(&self, sizes: &[u32]) -> bool {
        sizes.len() as u64 <= self.max_height as u64 && sizes.iter().all(|&s| s <= self.max_length)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyTable {
    pub meta: TableMeta,
    #[serde(default)]
    pub data: HashMap<String, Option<String>>,
}

/// Where an opponent move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseSource {
    Table,
    Random,
}

impl StrategyTable {
    /// A table with no entries that supports any board.
    pub fn empty() -> Self {
        Self {
            meta: TableMeta {
                max_length: u32::MAX,
                max_height: u32::MAX,
            },
            data: HashMap::new(),
        }
    }

    /// Tabulated answer for `key`, if any.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.data.get(key).and_then(|v| v.as_deref())
    }

    /// Choose the opponent's answer to `board`.
    ///
    /// A tabulated move string is decoded as-is; legality against the board is
    /// checked by the caller. Without an entry, a row is picked uniformly (not
    /// weighted by bars) and then a count in `1..=size`.
    pub fn respond<R: Rng>(
        &self,
        board: &Board,
        rng: &mut R,
    ) -> Result<(Move, ResponseSource), EncodingError> {
        if let Some(encoded) = self.lookup(&board.canonical_key()) {
            return Ok((parse_move(encoded)?, ResponseSource::Table));
        }
        Ok((random_move(board, rng), ResponseSource::Random))
    }
}

fn random_move<R: Rng>(board: &Board, rng: &mut R) -> Move {
    let row = rng.gen_range(0..board.len());
    let size = board.rows()[row].size;
    Move::new(row, rng.gen_range(1..=size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn table(json: &str) -> StrategyTable {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn deserializes_null_entries() {
        let t = table(r#"{"meta":{"max_length":7,"max_height":4},"data":{"1:3:5:7":null,"3:5:7":"a2"}}"#);
        assert_eq!(t.lookup("1:3:5:7"), None);
        assert_eq!(t.lookup("3:5:7"), Some("a2"));
        assert_eq!(t.lookup("9"), None);
    }

    #[test]
    fn tabulated_answer_wins() {
        let t = table(r#"{"meta":{"max_length":7,"max_height":4},"data":{"3:5:7":"a2"}}"#);
        let board = Board::new(&[3, 5, 7]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            t.respond(&board, &mut rng),
            Ok((Move::new(0, 2), ResponseSource::Table))
        );
    }

    #[test]
    fn corrupt_entry_is_an_encoding_error() {
        let t = table(r#"{"meta":{"max_length":7,"max_height":4},"data":{"3":"A2"}}"#);
        let board = Board::new(&[3]).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(
            t.respond(&board, &mut rng),
            Err(EncodingError::InvalidRow('A'))
        );
    }

    #[test]
    fn random_fallback_stays_in_bounds() {
        let t = StrategyTable::empty();
        let board = Board::new(&[1, 3, 5, 7]).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let (mv, source) = t.respond(&board, &mut rng).unwrap();
            assert_eq!(source, ResponseSource::Random);
            assert!(mv.row < board.len());
            assert!(mv.count >= 1 && mv.count <= board.rows()[mv.row].size);
        }
    }

    #[test]
    fn random_fallback_weights_rows_equally() {
        let t = StrategyTable::empty();
        let board = Board::new(&[1, 100]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let picks_small = (0..2000)
            .filter(|_| t.respond(&board, &mut rng).unwrap().0.row == 0)
            .count();
        assert!(picks_small > 800 && picks_small < 1200, "{picks_small}");
    }

    #[test]
    fn meta_bounds() {
        let meta = TableMeta {
            max_length: 7,
            max_height: 4,
        };
        assert!(meta.supports(&[1, 3, 5, 7]));
        assert!(!meta.supports(&[1, 3, 5, 8]));
        assert!(!meta.supports(&[1, 1, 1, 1, 1]));
        assert!(StrategyTable::empty().meta.supports(&[u32::MAX; 26]));
    }
}
