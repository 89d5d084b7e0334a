use crate::board::piece::Color;
use crate::board::square::Square;
use crate::moves::{ray_targets, BoardView};

pub const ROOK_DIRECTIONS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

pub fn rook_moves<B: BoardView>(from: Square, color: Color, board: &B) -> Vec<Square> {
    let mut out = Vec::with_capacity(14);
    ray_targets(from, color, board, &ROOK_DIRECTIONS, &mut out);
    out
}
