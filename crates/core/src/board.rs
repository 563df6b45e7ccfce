//! Board module - the ordered rows of removable bars
//!
//! Each row carries its current size and a transient `removed` count: the bars
//! currently staged for removal. At most one row has a non-zero `removed` at any
//! time. Rows are kept in an `ArrayVec` since a board never exceeds [`MAX_ROWS`].

use arrayvec::ArrayVec;

use crate::error::{GameError, Result};
use crate::notation::Move;
use crate::types::{KEY_DELIMITER, MAX_ROWS};

/// A single row (pile) of bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Row {
    pub size: u32,
    /// Bars staged for removal at the tail of the row (`removed <= size`).
    pub removed: u32,
}

impl Row {
    pub fn new(size: u32) -> Self {
        Self { size, removed: 0 }
    }

    /// Index of the first staged bar.
    pub fn first_removed(&self) -> u32 {
        self.size - self.removed
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    rows: ArrayVec<Row, MAX_ROWS>,
}

impl Board {
    /// Build a board from row sizes.
    ///
    /// The list must hold between 1 and [`MAX_ROWS`] positive sizes.
    pub fn new(sizes: &[u32]) -> Result<Self> {
        if sizes.is_empty() || sizes.len() > MAX_ROWS {
            return Err(GameError::InvalidBoard(format!(
                "expected 1 to {} rows, got {}",
                MAX_ROWS,
                sizes.len()
            )));
        }
        if sizes.contains(&0) {
            return Err(GameError::InvalidBoard("row sizes must be positive".to_string()));
        }

        Ok(Self {
            rows: sizes.iter().map(|&s| Row::new(s)).collect(),
        })
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn sizes(&self) -> Vec<u32> {
        self.rows.iter().map(|r| r.size).collect()
    }

    /// Total number of bars currently staged for removal.
    pub fn staged_total(&self) -> u32 {
        self.rows.iter().map(|r| r.removed).sum()
    }

    /// Check that `mv` is legal for the current board.
    pub fn validate(&self, mv: Move) -> Result<()> {
        match self.rows.get(mv.row) {
            Some(row) if mv.count >= 1 && mv.count <= row.size => Ok(()),
            _ => Err(GameError::IllegalMove {
                row: mv.row,
                count: mv.count,
            }),
        }
    }

    /// Stage `mv`, clearing every other row's pending removal.
    pub fn stage(&mut self, mv: Move) -> Result<()> {
        self.validate(mv)?;
        for row in self.rows.iter_mut() {
            row.removed = 0;
        }
        self.rows[mv.row].removed = mv.count;
        Ok(())
    }

    /// Apply a row's staged removal permanently.
    pub fn commit_row(&mut self, index: usize) {
        if let Some(row) = self.rows.get_mut(index) {
            row.size -= row.removed;
            row.removed = 0;
        }
    }

    /// Stable sort by ascending size.
    ///
    /// Returns the permutation applied: new position `i` holds the row that
    /// was previously at `order[i]`.
    pub fn sort_ascending(&mut self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.rows.len()).collect();
        order.sort_by_key(|&i| self.rows[i].size);
        self.rows = order.iter().map(|&i| self.rows[i]).collect();
        order
    }

    /// Drop every row whose size reached zero. Returns how many were dropped.
    pub fn remove_empty(&mut self) -> usize {
        let before = self.rows.len();
        self.rows.retain(|r| r.size > 0);
        before - self.rows.len()
    }

    /// Lookup key for the strategy table: sizes in board order joined by `:`.
    ///
    /// ```
    /// use tui_nim_core::Board;
    ///
    /// let board = Board::new(&[3, 5, 7]).unwrap();
    /// assert_eq!(board.canonical_key(), "3:5:7");
    /// ```
    pub fn canonical_key(&self) -> String {
        let mut key = String::with_capacity(self.rows.len() * 3);
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                key.push(KEY_DELIMITER);
            }
            key.push_str(&row.size.to_string());
        }
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_boards() {
        assert!(Board::new(&[]).is_err());
        assert!(Board::new(&[1, 0, 3]).is_err());
        assert!(Board::new(&[1; MAX_ROWS + 1]).is_err());
        assert!(Board::new(&[1; MAX_ROWS]).is_ok());
    }

    #[test]
    fn staging_clears_other_rows() {
        let mut board = Board::new(&[1, 3, 5, 7]).unwrap();
        board.stage(Move::new(3, 4)).unwrap();
        board.stage(Move::new(1, 2)).unwrap();

        let staged: Vec<u32> = board.rows().iter().map(|r| r.removed).collect();
        assert_eq!(staged, vec![0, 2, 0, 0]);
        assert_eq!(board.staged_total(), 2);
    }

    #[test]
    fn staging_rejects_illegal_moves() {
        let mut board = Board::new(&[1, 3]).unwrap();
        assert_eq!(
            board.stage(Move::new(2, 1)),
            Err(GameError::IllegalMove { row: 2, count: 1 })
        );
        assert!(board.stage(Move::new(1, 4)).is_err());
        assert!(board.stage(Move::new(1, 0)).is_err());
        assert_eq!(board.staged_total(), 0);
    }

    #[test]
    fn commit_subtracts_and_resets() {
        let mut board = Board::new(&[4]).unwrap();
        board.stage(Move::new(0, 3)).unwrap();
        assert_eq!(board.row(0).unwrap().first_removed(), 1);
        board.commit_row(0);
        assert_eq!(*board.row(0).unwrap(), Row { size: 1, removed: 0 });
    }

    #[test]
    fn sort_reports_permutation() {
        let mut board = Board::new(&[5, 1, 3, 1]).unwrap();
        let order = board.sort_ascending();
        assert_eq!(board.sizes(), vec![1, 1, 3, 5]);
        assert_eq!(order, vec![1, 3, 2, 0]);
    }

    #[test]
    fn remove_empty_drops_zero_rows() {
        let mut board = Board::new(&[2, 3]).unwrap();
        board.stage(Move::new(0, 2)).unwrap();
        board.commit_row(0);
        assert_eq!(board.remove_empty(), 1);
        assert_eq!(board.sizes(), vec![3]);
        assert_eq!(board.canonical_key(), "3");
    }
}
