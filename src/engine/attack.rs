//! Attack detection by outward radiation from the target square.
//!
//! This is the only check-detection path in the engine: instead of iterating
//! enemy pieces, every probe radiates from the square itself, so the cost is
//! constant in the number of pieces on the board.

use crate::board::board::Board;
use crate::board::piece::{Color, PieceKind};
use crate::board::square::{shift, Square};
use crate::moves::king_moves::KING_OFFSETS;
use crate::moves::knight_moves::KNIGHT_OFFSETS;

const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Is `square` attacked by any piece of `by_color`?
pub fn is_square_attacked(board: &Board, square: Square, by_color: Color) -> bool {
    // Knights.
    for (d_rank, d_file) in KNIGHT_OFFSETS {
        if let Some(from) = shift(square, d_rank, d_file) {
            if holds(board, from, by_color, PieceKind::Knight) {
                return true;
            }
        }
    }

    // Pawns: an attacking pawn stands on the square it would capture from,
    // one rank toward its own side.
    let pawn_rank_dir = match by_color {
        Color::White => -1i8,
        Color::Black => 1i8,
    };
    for d_file in [-1i8, 1] {
        if let Some(from) = shift(square, pawn_rank_dir, d_file) {
            if holds(board, from, by_color, PieceKind::Pawn) {
                return true;
            }
        }
    }

    // Enemy king adjacency.
    for (d_rank, d_file) in KING_OFFSETS {
        if let Some(from) = shift(square, d_rank, d_file) {
            if holds(board, from, by_color, PieceKind::King) {
                return true;
            }
        }
    }

    // Sliders: orthogonal rays for rook/queen, diagonal rays for bishop/queen.
    if scan_rays(board, square, by_color, &ORTHOGONAL_DIRECTIONS, PieceKind::Rook) {
        return true;
    }
    if scan_rays(board, square, by_color, &DIAGONAL_DIRECTIONS, PieceKind::Bishop) {
        return true;
    }

    false
}

/// Is the king of `color` currently attacked?
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(king_sq) => is_square_attacked(board, king_sq, color.opposite()),
        None => false,
    }
}

#[inline]
fn holds(board: &Board, square: Square, color: Color, kind: PieceKind) -> bool {
    matches!(board.piece_at(square), Some(p) if p.color == color && p.kind == kind)
}

fn scan_rays(
    board: &Board,
    start: Square,
    enemy_color: Color,
    directions: &[(i8, i8)],
    slider_kind: PieceKind,
) -> bool {
    for &(d_rank, d_file) in directions {
        let mut step = 1i8;
        while let Some(pos) = shift(start, d_rank * step, d_file * step) {
            if let Some(piece) = board.piece_at(pos) {
                if piece.color == enemy_color
                    && (piece.kind == slider_kind || piece.kind == PieceKind::Queen)
                {
                    return true;
                }
                // Blocked by any piece, friend or foe.
                break;
            }
            step += 1;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::{is_in_check, is_square_attacked};
    use crate::board::fen::parse_fen;
    use crate::board::piece::Color;
    use crate::board::square::algebraic_to_square;

    fn sq(text: &str) -> u8 {
        algebraic_to_square(text).expect("test square should parse")
    }

    #[test]
    fn rook_attacks_along_open_file() {
        let (board, _) = parse_fen("8/8/8/8/8/8/8/R3k3 b - - 0 1").expect("FEN should parse");
        assert!(is_square_attacked(&board, sq("e1"), Color::White));
        assert!(is_in_check(&board, Color::Black));
    }

    #[test]
    fn blocker_cuts_the_ray() {
        let (board, _) = parse_fen("8/8/8/8/8/8/8/R1N1k3 b - - 0 1").expect("FEN should parse");
        assert!(!is_square_attacked(&board, sq("e1"), Color::White));
    }

    #[test]
    fn pawn_attacks_point_forward_only() {
        let (board, _) = parse_fen("8/8/8/3p4/8/8/8/8 w - - 0 1").expect("FEN should parse");
        // Black pawn on d5 attacks c4 and e4, not c6/e6.
        assert!(is_square_attacked(&board, sq("c4"), Color::Black));
        assert!(is_square_attacked(&board, sq("e4"), Color::Black));
        assert!(!is_square_attacked(&board, sq("c6"), Color::Black));
        assert!(!is_square_attacked(&board, sq("d4"), Color::Black));
    }

    #[test]
    fn knight_and_king_radiation() {
        let (board, _) = parse_fen("8/8/8/8/8/2n5/8/K7 w - - 0 1").expect("FEN should parse");
        assert!(is_in_check(&board, Color::White));

        let (board, _) = parse_fen("8/8/8/8/8/1k6/8/K7 w - - 0 1").expect("FEN should parse");
        assert!(is_square_attacked(&board, sq("a2"), Color::Black));
    }

    #[test]
    fn queen_attacks_both_ray_families() {
        let (board, _) = parse_fen("8/8/8/3q4/8/8/8/8 w - - 0 1").expect("FEN should parse");
        assert!(is_square_attacked(&board, sq("d1"), Color::Black));
        assert!(is_square_attacked(&board, sq("h1"), Color::Black));
        assert!(!is_square_attacked(&board, sq("e3"), Color::Black));
    }

    #[test]
    fn missing_king_is_not_in_check() {
        let (board, _) = parse_fen("8/8/8/8/8/8/8/8 w - - 0 1").expect("FEN should parse");
        assert!(!is_in_check(&board, Color::White));
    }
}
