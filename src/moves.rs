//! Pseudo-legal move geometry per piece kind.
//!
//! "Pseudo" means the geometry ignores whether the mover's king is left in
//! check; that filter is the rule engine's job. Piece kinds see the board and
//! game state only through the read-only view traits below, so the geometry
//! layer never depends on the concrete engine types.

pub mod bishop_moves;
pub mod chess_move;
pub mod king_moves;
pub mod knight_moves;
pub mod pawn_moves;
pub mod queen_moves;
pub mod rook_moves;

use crate::board::piece::{Color, Piece, PieceKind};
use crate::board::square::{shift, Square};
use crate::board::state::CastlingRights;

/// Minimal occupancy view the piece kinds consume.
pub trait BoardView {
    fn is_empty(&self, square: Square) -> bool;
    fn piece_at(&self, square: Square) -> Option<Piece>;
}

/// Minimal metadata view the piece kinds consume.
pub trait StateView {
    fn en_passant_target(&self) -> Option<Square>;
    fn castling_rights(&self) -> CastlingRights;
}

impl Piece {
    /// Pseudo-legal target squares for this piece standing on `from`.
    pub fn pseudo_moves<B: BoardView, S: StateView>(
        self,
        from: Square,
        board: &B,
        state: &S,
    ) -> Vec<Square> {
        match self.kind {
            PieceKind::Pawn => pawn_moves::pawn_moves(from, self.color, board, state),
            PieceKind::Knight => knight_moves::knight_moves(from, self.color, board),
            PieceKind::Bishop => bishop_moves::bishop_moves(from, self.color, board),
            PieceKind::Rook => rook_moves::rook_moves(from, self.color, board),
            PieceKind::Queen => queen_moves::queen_moves(from, self.color, board),
            PieceKind::King => king_moves::king_moves(from, self.color, board, state),
        }
    }
}

/// Ray scan: empty squares are targets, the first occupied square is a target
/// iff enemy-colored, then the ray stops.
pub(crate) fn ray_targets<B: BoardView>(
    from: Square,
    color: Color,
    board: &B,
    directions: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(d_rank, d_file) in directions {
        let mut step = 1i8;
        while let Some(to) = shift(from, d_rank * step, d_file * step) {
            match board.piece_at(to) {
                None => out.push(to),
                Some(blocker) => {
                    if blocker.color != color {
                        out.push(to);
                    }
                    break;
                }
            }
            step += 1;
        }
    }
}

/// Fixed-offset targets (knight, king ring): empty or enemy-occupied.
pub(crate) fn offset_targets<B: BoardView>(
    from: Square,
    color: Color,
    board: &B,
    offsets: &[(i8, i8)],
    out: &mut Vec<Square>,
) {
    for &(d_rank, d_file) in offsets {
        if let Some(to) = shift(from, d_rank, d_file) {
            match board.piece_at(to) {
                None => out.push(to),
                Some(blocker) if blocker.color != color => out.push(to),
                Some(_) => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::board::board::Board;
    use crate::board::piece::{Color, Piece, PieceKind};
    use crate::board::square::algebraic_to_square;
    use crate::board::state::GameState;

    fn sq(text: &str) -> u8 {
        algebraic_to_square(text).expect("test square should parse")
    }

    #[test]
    fn dispatch_reaches_each_kind() {
        let mut board = Board::new();
        let state = GameState::empty();
        let queen = Piece::new(PieceKind::Queen, Color::White);
        board.set_piece(sq("d4"), queen);

        let targets = queen.pseudo_moves(sq("d4"), &board, &state);
        // A queen alone on d4 radiates along 8 rays: 27 squares.
        assert_eq!(targets.len(), 27);
    }

    #[test]
    fn rays_stop_at_first_blocker() {
        let mut board = Board::new();
        let state = GameState::empty();
        let rook = Piece::new(PieceKind::Rook, Color::White);
        board.set_piece(sq("a1"), rook);
        board.set_piece(sq("a3"), Piece::new(PieceKind::Pawn, Color::Black));
        board.set_piece(sq("c1"), Piece::new(PieceKind::Pawn, Color::White));

        let targets = rook.pseudo_moves(sq("a1"), &board, &state);
        assert!(targets.contains(&sq("a2")));
        assert!(targets.contains(&sq("a3")), "enemy blocker is capturable");
        assert!(!targets.contains(&sq("a4")), "ray stops at blocker");
        assert!(targets.contains(&sq("b1")));
        assert!(!targets.contains(&sq("c1")), "own piece blocks");
    }
}
