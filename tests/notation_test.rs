//! Row letters and move strings.

use tui_nim::core::{encode_move, encode_row, parse_move, parse_row, EncodingError, Move};

#[test]
fn test_every_row_letter_round_trips() {
    for r in 0..26 {
        assert_eq!(parse_row(encode_row(r).unwrap()), Ok(r));
    }
    assert_eq!(encode_row(0), Ok('a'));
    assert_eq!(encode_row(25), Ok('z'));
    assert_eq!(encode_row(26), Err(EncodingError::RowOutOfRange(26)));
}

#[test]
fn test_move_strings() {
    assert_eq!(encode_move(Move::new(2, 10)).unwrap(), "c10");
    assert_eq!(parse_move("c10"), Ok(Move::new(2, 10)));
    assert_eq!("a2".parse::<Move>(), Ok(Move::new(0, 2)));
    assert_eq!(Move::new(25, 1).to_string(), "z1");

    let mv = Move::new(17, 4096);
    assert_eq!(parse_move(&encode_move(mv).unwrap()), Ok(mv));
}

#[test]
fn test_malformed_move_strings() {
    assert_eq!(parse_move(""), Err(EncodingError::EmptyMove));
    assert_eq!(parse_move("A2"), Err(EncodingError::InvalidRow('A')));
    assert!(matches!(parse_move("a"), Err(EncodingError::InvalidCount(_))));
    assert!(matches!(parse_move("a0"), Err(EncodingError::InvalidCount(_))));
    assert!(matches!(parse_move("ax"), Err(EncodingError::InvalidCount(_))));
}
