//! Terminal-oriented Unicode board renderer.

use crate::board::board::Board;
use crate::board::square::square_at;

/// Render the board to a Unicode string for terminal output.
///
/// Assumes square indexing where `0 == a1`, `7 == h1`, and `63 == h8`.
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for rank in (0..8u8).rev() {
        out.push(char::from(b'1' + rank));
        out.push(' ');

        for file in 0..8u8 {
            match board.piece_at(square_at(rank, file)) {
                Some(piece) => out.push(piece.unicode_char()),
                None => out.push('·'),
            }
            if file < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(char::from(b'1' + rank));
        out.push('\n');
    }

    out.push_str("  a b c d e f g h");
    out
}

#[cfg(test)]
mod tests {
    use super::render_board;
    use crate::board::board::Board;

    #[test]
    fn renders_starting_position_with_labels() {
        let rendered = render_board(&Board::standard());
        assert!(rendered.starts_with("  a b c d e f g h\n"));
        assert!(rendered.contains("8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜ 8"));
        assert!(rendered.contains("1 ♖ ♘ ♗ ♕ ♔ ♗ ♘ ♖ 1"));
    }
}
