//! Static evaluation: material, piece-square tables, and mobility.
//!
//! Scores are centipawns from White's perspective; the search flips the sign
//! for Black. Tables are stored in square-index order (`0 == a1`) so White
//! reads them directly and Black mirrors the rank with `index ^ 56`.

use crate::board::board::Board;
use crate::board::piece::{Color, PieceKind};
use crate::board::square::Square;
use crate::board::state::GameState;
use crate::engine::rule_engine::RuleEngine;

pub const MOBILITY_WEIGHT: i32 = 2;

/// Material and placement only.
pub fn evaluate(board: &Board) -> i32 {
    evaluate_position(board, None)
}

/// Full evaluation; mobility is scored only when a state view is supplied.
pub fn evaluate_position(board: &Board, state: Option<&GameState>) -> i32 {
    let mut score = 0i32;

    board.for_each_piece(|sq, piece| {
        let mut value = piece.kind.value() + piece_square_bonus(piece.kind, piece.color, sq);

        if let Some(state) = state {
            let mobility = piece.pseudo_moves(sq, board, state).len() as i32;
            value += mobility * MOBILITY_WEIGHT;
        }

        match piece.color {
            Color::White => score += value,
            Color::Black => score -= value,
        }
    });

    score
}

impl RuleEngine {
    /// Evaluation relative to the side to move.
    pub(crate) fn evaluate_relative(&self) -> i32 {
        let score = evaluate_position(&self.board, Some(&self.state));
        match self.side_to_move() {
            Color::White => score,
            Color::Black => -score,
        }
    }
}

#[inline]
fn piece_square_bonus(kind: PieceKind, color: Color, square: Square) -> i32 {
    let idx = mirror(color, square);
    match kind {
        PieceKind::Pawn => PST_PAWN[idx],
        PieceKind::Knight => PST_KNIGHT[idx],
        PieceKind::Bishop => PST_BISHOP[idx],
        PieceKind::Rook => PST_ROOK[idx],
        PieceKind::Queen => PST_QUEEN[idx],
        PieceKind::King => PST_KING_MID[idx],
    }
}

/// White reads tables by raw index; for Black, `^ 56` flips the rank.
#[inline]
fn mirror(color: Color, square: Square) -> usize {
    match color {
        Color::White => square as usize,
        Color::Black => (square ^ 56) as usize,
    }
}

// Piece-square tables, rank 1 (index 0) first.

#[rustfmt::skip]
const PST_PAWN: [i32; 64] = [
     0,  0,  0,   0,   0,  0,  0,  0,
     5, 10, 10, -20, -20, 10, 10,  5,
     5, -5,-10,   0,   0,-10, -5,  5,
     0,  0,  0,  20,  20,  0,  0,  0,
     5,  5, 10,  25,  25, 10,  5,  5,
    10, 10, 20,  30,  30, 20, 10, 10,
    50, 50, 50,  50,  50, 50, 50, 50,
     0,  0,  0,   0,   0,  0,  0,  0,
];

#[rustfmt::skip]
const PST_KNIGHT: [i32; 64] = [
    -50, -40, -30, -30, -30, -30, -40, -50,
    -40, -20,   0,   5,   5,   0, -20, -40,
    -30,   5,  10,  15,  15,  10,   5, -30,
    -30,   0,  15,  20,  20,  15,   0, -30,
    -30,   5,  15,  20,  20,  15,   5, -30,
    -30,   0,  10,  15,  15,  10,   0, -30,
    -40, -20,   0,   0,   0,   0, -20, -40,
    -50, -40, -30, -30, -30, -30, -40, -50,
];

#[rustfmt::skip]
const PST_BISHOP: [i32; 64] = [
    -20, -10, -10, -10, -10, -10, -10, -20,
    -10,   5,   0,   0,   0,   0,   5, -10,
    -10,  10,  10,  10,  10,  10,  10, -10,
    -10,   0,  10,  10,  10,  10,   0, -10,
    -10,   5,   5,  10,  10,   5,   5, -10,
    -10,   0,   5,  10,  10,   5,   0, -10,
    -10,   0,   0,   0,   0,   0,   0, -10,
    -20, -10, -10, -10, -10, -10, -10, -20,
];

#[rustfmt::skip]
const PST_ROOK: [i32; 64] = [
     0,  0,  0,  5,  5,  0,  0,  0,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
    -5,  0,  0,  0,  0,  0,  0, -5,
     5, 10, 10, 10, 10, 10, 10,  5,
     0,  0,  0,  0,  0,  0,  0,  0,
];

#[rustfmt::skip]
const PST_QUEEN: [i32; 64] = [
    -20, -10, -10, -5, -5, -10, -10, -20,
    -10,   0,   5,  0,  0,   0,   0, -10,
    -10,   5,   5,  5,  5,   5,   0, -10,
      0,   0,   5,  5,  5,   5,   0,  -5,
     -5,   0,   5,  5,  5,   5,   0,  -5,
    -10,   0,   5,  5,  5,   5,   0, -10,
    -10,   0,   0,  0,  0,   0,   0, -10,
    -20, -10, -10, -5, -5, -10, -10, -20,
];

#[rustfmt::skip]
const PST_KING_MID: [i32; 64] = [
     20,  30,  10,   0,   0,  10,  30,  20,
     20,  20,   0,   0,   0,   0,  20,  20,
    -10, -20, -20, -20, -20, -20, -20, -10,
    -20, -30, -30, -40, -40, -30, -30, -20,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
    -30, -40, -40, -50, -50, -40, -40, -30,
];

#[cfg(test)]
mod tests {
    use super::{evaluate, evaluate_position};
    use crate::board::fen::parse_fen;
    use crate::engine::rule_engine::RuleEngine;

    #[test]
    fn starting_position_is_balanced() {
        let (board, state) = parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .expect("starting FEN should parse");
        assert_eq!(evaluate(&board), 0);
        assert_eq!(evaluate_position(&board, Some(&state)), 0);
    }

    #[test]
    fn extra_queen_dominates_the_score() {
        let (board, _) =
            parse_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").expect("FEN should parse");
        assert!(evaluate(&board) > 800);
    }

    #[test]
    fn central_knight_outscores_rim_knight() {
        let (center, _) =
            parse_fen("4k3/8/8/3N4/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let (rim, _) = parse_fen("4k3/8/8/8/8/8/8/N3K3 w - - 0 1").expect("FEN should parse");
        assert!(evaluate(&center) > evaluate(&rim));
    }

    #[test]
    fn advanced_pawn_outscores_home_pawn() {
        let (advanced, _) =
            parse_fen("4k3/4P3/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let (home, _) =
            parse_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").expect("FEN should parse");
        assert!(evaluate(&advanced) > evaluate(&home));
    }

    #[test]
    fn mirrored_positions_cancel_out() {
        // The same setup reflected for both sides must score zero.
        let (board, state) =
            parse_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1")
                .expect("FEN should parse");
        assert_eq!(evaluate_position(&board, Some(&state)), 0);
    }

    #[test]
    fn relative_evaluation_flips_for_black() {
        let white_view =
            RuleEngine::from_fen("4k3/8/8/8/8/8/8/3QK3 w - - 0 1").expect("FEN should parse");
        let black_view =
            RuleEngine::from_fen("4k3/8/8/8/8/8/8/3QK3 b - - 0 1").expect("FEN should parse");
        assert_eq!(
            white_view.evaluate_relative(),
            -black_view.evaluate_relative()
        );
        assert!(white_view.evaluate_relative() > 0);
    }

    #[test]
    fn mobility_term_applies_only_with_a_state_view() {
        let (board, state) =
            parse_fen("4k3/8/8/8/3B4/8/8/4K3 w - - 0 1").expect("FEN should parse");

        let without_mobility = evaluate(&board);
        let with_mobility = evaluate_position(&board, Some(&state));
        // White's bishop radiates freely while the kings roughly cancel, so
        // the mobility term must push the score up.
        assert!(with_mobility > without_mobility);
    }
}
