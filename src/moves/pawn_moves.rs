use crate::board::piece::Color;
use crate::board::square::{rank_of, shift, Square};
use crate::moves::{BoardView, StateView};

pub fn pawn_moves<B: BoardView, S: StateView>(
    from: Square,
    color: Color,
    board: &B,
    state: &S,
) -> Vec<Square> {
    let mut out = Vec::with_capacity(4);

    let (dir, start_rank) = match color {
        Color::White => (1i8, 1u8),
        Color::Black => (-1i8, 6u8),
    };

    // Single push, then the double push from the home rank.
    if let Some(one) = shift(from, dir, 0) {
        if board.is_empty(one) {
            out.push(one);
            if rank_of(from) == start_rank {
                if let Some(two) = shift(from, 2 * dir, 0) {
                    if board.is_empty(two) {
                        out.push(two);
                    }
                }
            }
        }
    }

    // Diagonal captures, including onto the en-passant target.
    for d_file in [-1i8, 1] {
        let Some(diag) = shift(from, dir, d_file) else {
            continue;
        };
        match board.piece_at(diag) {
            Some(target) if target.color != color => out.push(diag),
            None if state.en_passant_target() == Some(diag) => out.push(diag),
            _ => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::pawn_moves;
    use crate::board::board::Board;
    use crate::board::piece::{Color, Piece, PieceKind};
    use crate::board::square::algebraic_to_square;
    use crate::board::state::GameState;

    fn sq(text: &str) -> u8 {
        algebraic_to_square(text).expect("test square should parse")
    }

    #[test]
    fn home_rank_pawn_may_push_one_or_two() {
        let mut board = Board::new();
        board.set_piece(sq("e2"), Piece::new(PieceKind::Pawn, Color::White));
        let targets = pawn_moves(sq("e2"), Color::White, &board, &GameState::empty());
        assert_eq!(targets, vec![sq("e3"), sq("e4")]);
    }

    #[test]
    fn blocked_pawn_has_no_push_and_no_jump() {
        let mut board = Board::new();
        board.set_piece(sq("e2"), Piece::new(PieceKind::Pawn, Color::White));
        board.set_piece(sq("e3"), Piece::new(PieceKind::Knight, Color::Black));
        let targets = pawn_moves(sq("e2"), Color::White, &board, &GameState::empty());
        assert!(targets.is_empty());
    }

    #[test]
    fn double_push_requires_both_squares_empty() {
        let mut board = Board::new();
        board.set_piece(sq("e2"), Piece::new(PieceKind::Pawn, Color::White));
        board.set_piece(sq("e4"), Piece::new(PieceKind::Knight, Color::Black));
        let targets = pawn_moves(sq("e2"), Color::White, &board, &GameState::empty());
        assert_eq!(targets, vec![sq("e3")]);
    }

    #[test]
    fn captures_only_enemy_diagonals() {
        let mut board = Board::new();
        board.set_piece(sq("d4"), Piece::new(PieceKind::Pawn, Color::White));
        board.set_piece(sq("c5"), Piece::new(PieceKind::Rook, Color::Black));
        board.set_piece(sq("e5"), Piece::new(PieceKind::Rook, Color::White));
        let targets = pawn_moves(sq("d4"), Color::White, &board, &GameState::empty());
        assert!(targets.contains(&sq("c5")));
        assert!(!targets.contains(&sq("e5")));
    }

    #[test]
    fn en_passant_target_is_a_capture_square() {
        let mut board = Board::new();
        board.set_piece(sq("e5"), Piece::new(PieceKind::Pawn, Color::White));
        board.set_piece(sq("d5"), Piece::new(PieceKind::Pawn, Color::Black));
        let mut state = GameState::empty();
        state.en_passant_target = Some(sq("d6"));
        let targets = pawn_moves(sq("e5"), Color::White, &board, &state);
        assert!(targets.contains(&sq("d6")));
    }

    #[test]
    fn black_pawn_moves_down_the_board() {
        let mut board = Board::new();
        board.set_piece(sq("d7"), Piece::new(PieceKind::Pawn, Color::Black));
        let targets = pawn_moves(sq("d7"), Color::Black, &board, &GameState::empty());
        assert_eq!(targets, vec![sq("d6"), sq("d5")]);
    }
}
