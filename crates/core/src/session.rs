//! Session parameters
//!
//! The board is requested as a colon-delimited list of positive integers
//! (`3:5:7`). Anything that does not match falls back to [`DEFAULT_BOARD`]
//! without complaint.

use crate::types::{DEFAULT_BOARD, KEY_DELIMITER, MAX_ROWS};

/// Parse the board parameter, falling back to the default board.
///
/// ```
/// use tui_nim_core::session::parse_board_param;
///
/// assert_eq!(parse_board_param(Some("3:5:7")), vec![3, 5, 7]);
/// assert_eq!(parse_board_param(Some("3::7")), vec![1, 3, 5, 7]);
/// assert_eq!(parse_board_param(None), vec![1, 3, 5, 7]);
/// ```
pub fn parse_board_param(param: Option<&str>) -> Vec<u32> {
    param
        .and_then(parse_sizes)
        .unwrap_or_else(|| DEFAULT_BOARD.to_vec())
}

fn parse_sizes(s: &str) -> Option<Vec<u32>> {
    let sizes = s
        .split(KEY_DELIMITER)
        .map(parse_positive)
        .collect::<Option<Vec<u32>>>()?;
    (sizes.len() <= MAX_ROWS).then_some(sizes)
}

/// `[1-9][0-9]*`, within `u32`.
fn parse_positive(s: &str) -> Option<u32> {
    let bytes = s.as_bytes();
    match bytes.first() {
        Some(b'1'..=b'9') if bytes.iter().all(u8::is_ascii_digit) => s.parse().ok(),
        _ => None,
    }
}
