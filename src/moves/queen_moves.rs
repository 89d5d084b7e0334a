use crate::board::piece::Color;
use crate::board::square::Square;
use crate::moves::bishop_moves::BISHOP_DIRECTIONS;
use crate::moves::rook_moves::ROOK_DIRECTIONS;
use crate::moves::{ray_targets, BoardView};

pub fn queen_moves<B: BoardView>(from: Square, color: Color, board: &B) -> Vec<Square> {
    let mut out = Vec::with_capacity(27);
    ray_targets(from, color, board, &ROOK_DIRECTIONS, &mut out);
    ray_targets(from, color, board, &BISHOP_DIRECTIONS, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::queen_moves;
    use crate::board::board::Board;
    use crate::board::piece::{Color, Piece, PieceKind};
    use crate::board::square::algebraic_to_square;

    fn sq(text: &str) -> u8 {
        algebraic_to_square(text).expect("test square should parse")
    }

    #[test]
    fn queen_combines_rook_and_bishop_rays() {
        let mut board = Board::new();
        board.set_piece(sq("d4"), Piece::new(PieceKind::Queen, Color::White));
        let targets = queen_moves(sq("d4"), Color::White, &board);
        assert_eq!(targets.len(), 27);
        assert!(targets.contains(&sq("d8")));
        assert!(targets.contains(&sq("h8")));
        assert!(targets.contains(&sq("a1")));
    }
}
