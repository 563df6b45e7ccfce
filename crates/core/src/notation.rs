//! Move notation - compact textual form of a move
//!
//! A move is written as the row letter followed by the decimal count, with no
//! separator: row 2, count 10 is `c10`. Row letters run `a` (row 0) to `z` (row 25).

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::EncodingError;
use crate::types::MAX_ROWS;

const ZERO_CODE: u32 = 'a' as u32;

/// Remove `count` bars from the row at `row`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Move {
    pub row: usize,
    pub count: u32,
}

impl Move {
    pub fn new(row: usize, count: u32) -> Self {
        Self { row, count }
    }
}

/// Encode a row index as its letter.
///
/// ```
/// use tui_nim_core::notation::encode_row;
///
/// assert_eq!(encode_row(0), Ok('a'));
/// assert_eq!(encode_row(25), Ok('z'));
/// assert!(encode_row(26).is_err());
/// ```
pub fn encode_row(row: usize) -> Result<char, EncodingError> {
    if row >= MAX_ROWS {
        return Err(EncodingError::RowOutOfRange(row));
    }
    char::from_u32(ZERO_CODE + row as u32).ok_or(EncodingError::RowOutOfRange(row))
}

/// Decode a row letter into its index.
pub fn parse_row(c: char) -> Result<usize, EncodingError> {
    if !c.is_ascii_lowercase() {
        return Err(EncodingError::InvalidRow(c));
    }
    Ok((c as u32 - ZERO_CODE) as usize)
}

pub fn encode_move(mv: Move) -> Result<String, EncodingError> {
    Ok(format!("{}{}", encode_row(mv.row)?, mv.count))
}

/// Decode a move string: the first character is the row, the rest the count.
///
/// ```
/// use tui_nim_core::notation::{parse_move, Move};
///
/// assert_eq!(parse_move("c10"), Ok(Move::new(2, 10)));
/// assert!(parse_move("c").is_err());
/// assert!(parse_move("C1").is_err());
/// ```
pub fn parse_move(s: &str) -> Result<Move, EncodingError> {
    let mut chars = s.chars();
    let row = parse_row(chars.next().ok_or(EncodingError::EmptyMove)?)?;

    let rest = chars.as_str();
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return Err(EncodingError::InvalidCount(rest.to_string()));
    }
    let count: u32 = rest
        .parse()
        .map_err(|_| EncodingError::InvalidCount(rest.to_string()))?;
    if count == 0 {
        return Err(EncodingError::InvalidCount(rest.to_string()));
    }

    Ok(Move { row, count })
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match encode_row(self.row) {
            Ok(c) => write!(f, "{}{}", c, self.count),
            Err(_) => write!(f, "#{}:{}", self.row, self.count),
        }
    }
}

impl FromStr for Move {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_move(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_row_letter_decodes_to_its_index() {
        for r in 0..MAX_ROWS {
            assert_eq!(parse_row(encode_row(r).unwrap()), Ok(r));
        }
    }

    #[test]
    fn rejects_characters_outside_a_to_z() {
        for c in ['A', '`', '{', '0', ' ', 'é'] {
            assert_eq!(parse_row(c), Err(EncodingError::InvalidRow(c)));
        }
    }

    #[test]
    fn encodes_with_no_separator() {
        assert_eq!(encode_move(Move::new(2, 10)).unwrap(), "c10");
        assert_eq!(encode_move(Move::new(0, 1)).unwrap(), "a1");
        assert_eq!(
            encode_move(Move::new(30, 1)),
            Err(EncodingError::RowOutOfRange(30))
        );
    }

    #[test]
    fn valid_moves_survive_encoding() {
        for mv in [Move::new(0, 1), Move::new(3, 7), Move::new(25, 1234)] {
            assert_eq!(parse_move(&encode_move(mv).unwrap()), Ok(mv));
        }
    }

    #[test]
    fn rejects_malformed_counts() {
        assert_eq!(parse_move(""), Err(EncodingError::EmptyMove));
        assert!(matches!(parse_move("a"), Err(EncodingError::InvalidCount(_))));
        assert!(matches!(parse_move("a0"), Err(EncodingError::InvalidCount(_))));
        assert!(matches!(parse_move("a-1"), Err(EncodingError::InvalidCount(_))));
        assert!(matches!(parse_move("a2x"), Err(EncodingError::InvalidCount(_))));
        assert!(matches!(
            parse_move("a99999999999"),
            Err(EncodingError::InvalidCount(_))
        ));
    }

    #[test]
    fn display_and_from_str_use_the_encoded_form() {
        let mv: Move = "b3".parse().unwrap();
        assert_eq!(mv, Move::new(1, 3));
        assert_eq!(mv.to_string(), "b3");
    }
}
