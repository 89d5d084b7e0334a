use crate::board::piece::Color;
use crate::board::square::{shift, Square};
use crate::board::state::{
    CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE, CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE,
};
use crate::moves::{offset_targets, BoardView, StateView};

pub const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// King ring plus the two-square castle candidates.
///
/// A castle candidate only requires the matching right to still be present;
/// path emptiness, check, and attacked transit squares are enforced by the
/// rule engine.
pub fn king_moves<B: BoardView, S: StateView>(
    from: Square,
    color: Color,
    board: &B,
    state: &S,
) -> Vec<Square> {
    let mut out = Vec::with_capacity(10);
    offset_targets(from, color, board, &KING_OFFSETS, &mut out);

    let rights = state.castling_rights();
    let (home, kingside_right, queenside_right) = match color {
        Color::White => (4u8, CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE),
        Color::Black => (60u8, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE),
    };

    if from == home {
        if (rights & kingside_right) != 0 {
            if let Some(to) = shift(from, 0, 2) {
                out.push(to);
            }
        }
        if (rights & queenside_right) != 0 {
            if let Some(to) = shift(from, 0, -2) {
                out.push(to);
            }
        }
    }

    out
}
