//! Square addressing for the 8x8 grid.
//!
//! Squares are linear indices in row-major order: `index = rank * 8 + file`,
//! with rank 0 as White's back rank and file 0 as the a-file.

pub const BOARD_SIZE: u8 = 8;
pub const NUM_SQUARES: usize = 64;

/// Board square index (`0..=63`).
pub type Square = u8;

#[inline]
pub const fn square_at(rank: u8, file: u8) -> Square {
    rank * BOARD_SIZE + file
}

#[inline]
pub const fn rank_of(square: Square) -> u8 {
    square / BOARD_SIZE
}

#[inline]
pub const fn file_of(square: Square) -> u8 {
    square % BOARD_SIZE
}

/// Offset a square by `(d_rank, d_file)`, returning `None` when the result
/// leaves the board.
#[inline]
pub fn shift(square: Square, d_rank: i8, d_file: i8) -> Option<Square> {
    let rank = rank_of(square) as i8 + d_rank;
    let file = file_of(square) as i8 + d_file;
    if !(0..BOARD_SIZE as i8).contains(&rank) || !(0..BOARD_SIZE as i8).contains(&file) {
        return None;
    }
    Some(square_at(rank as u8, file as u8))
}

/// Rank and file deltas from `from` to `to`.
#[inline]
pub fn delta(from: Square, to: Square) -> (i8, i8) {
    (
        rank_of(to) as i8 - rank_of(from) as i8,
        file_of(to) as i8 - file_of(from) as i8,
    )
}

/// Convert algebraic notation (for example: "e4") to a square index.
#[inline]
pub fn algebraic_to_square(square: &str) -> Result<Square, String> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(format!("Invalid algebraic square: {square}"));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(format!("Invalid algebraic file: {}", file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(format!("Invalid algebraic rank: {}", rank as char));
    }

    Ok(square_at(rank - b'1', file - b'a'))
}

/// Convert a square index (`0..=63`) to algebraic notation (for example: "e4").
#[inline]
pub fn square_to_algebraic(square: Square) -> Result<String, String> {
    if square as usize >= NUM_SQUARES {
        return Err(format!("Square index out of bounds: {square}"));
    }

    let file_char = char::from(b'a' + file_of(square));
    let rank_char = char::from(b'1' + rank_of(square));
    Ok(format!("{file_char}{rank_char}"))
}

#[cfg(test)]
mod tests {
    use super::{algebraic_to_square, delta, shift, square_to_algebraic};

    #[test]
    fn round_trip_algebraic_conversions() {
        assert_eq!(algebraic_to_square("a1").expect("a1 should parse"), 0);
        assert_eq!(algebraic_to_square("h8").expect("h8 should parse"), 63);
        assert_eq!(square_to_algebraic(0).expect("0 should convert"), "a1");
        assert_eq!(square_to_algebraic(63).expect("63 should convert"), "h8");
        assert_eq!(algebraic_to_square("e4").expect("e4 should parse"), 28);
    }

    #[test]
    fn rejects_malformed_algebraic_input() {
        assert!(algebraic_to_square("e9").is_err());
        assert!(algebraic_to_square("i4").is_err());
        assert!(algebraic_to_square("e44").is_err());
        assert!(square_to_algebraic(64).is_err());
    }

    #[test]
    fn shift_stays_on_board() {
        assert_eq!(shift(0, 1, 1), Some(9));
        assert_eq!(shift(0, -1, 0), None);
        assert_eq!(shift(7, 0, 1), None);
        assert_eq!(shift(63, 1, 0), None);
        assert_eq!(shift(28, 2, -1), Some(43));
    }

    #[test]
    fn delta_reports_rank_and_file_offsets() {
        assert_eq!(delta(12, 28), (2, 0));
        assert_eq!(delta(28, 12), (-2, 0));
        assert_eq!(delta(0, 9), (1, 1));
    }
}
