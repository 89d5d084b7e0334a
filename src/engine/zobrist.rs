//! Zobrist hashing for position identity and repetition tracking.
//!
//! The key tables are generated once per process from a fixed seed, so hashes
//! are deterministic across runs. The full-position hash is recomputed after
//! every make/unmake; the hash history gives the engine O(1) repetition
//! lookups.

use std::sync::OnceLock;

use crate::board::board::Board;
use crate::board::piece::{Color, PieceKind};
use crate::board::square::{file_of, Square};
use crate::board::state::{CastlingRights, GameState};

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut seed: u64 = 0xD6E8_FEB8_6659_FD93;

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for kind in color {
            for sq in kind {
                *sq = next_random_u64(&mut seed);
            }
        }
    }

    let side_to_move = next_random_u64(&mut seed);

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = next_random_u64(&mut seed);
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = next_random_u64(&mut seed);
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

#[inline]
fn next_random_u64(state: &mut u64) -> u64 {
    // splitmix64
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Key for a `(color, kind, square)` occupancy term.
#[inline]
pub fn piece_square_key(color: Color, kind: PieceKind, square: Square) -> u64 {
    tables().piece_square[color.index()][kind.index()][square as usize]
}

/// Key for a castling-rights bitmask (`0..=15`).
#[inline]
pub fn castling_key(rights: CastlingRights) -> u64 {
    tables().castling[(rights & 0x0F) as usize]
}

/// Key for a valid en-passant file (`0..=7`).
#[inline]
pub fn en_passant_file_key(file: u8) -> u64 {
    tables().en_passant_file[file as usize]
}

/// Side-to-move toggle, xored in when Black is to move.
#[inline]
pub fn side_to_move_key() -> u64 {
    tables().side_to_move
}

/// Compute the full position hash from board and state.
pub fn compute_hash(board: &Board, state: &GameState) -> u64 {
    let mut hash = 0u64;

    board.for_each_piece(|sq, piece| {
        hash ^= piece_square_key(piece.color, piece.kind, sq);
    });

    hash ^= castling_key(state.castling_rights);

    if let Some(ep) = state.en_passant_target {
        hash ^= en_passant_file_key(file_of(ep));
    }

    if state.side_to_move == Color::Black {
        hash ^= side_to_move_key();
    }

    hash
}
