//! Forsyth-Edwards Notation codec.
//!
//! Parsing is strict: exactly six fields, eight ranks, eight files per rank.
//! A parse failure produces a descriptive error and no partial state.

use crate::board::board::Board;
use crate::board::piece::{Color, Piece};
use crate::board::square::{algebraic_to_square, rank_of, square_at, square_to_algebraic, Square};
use crate::board::state::{
    CastlingRights, GameState, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE,
    CASTLE_WHITE_KINGSIDE, CASTLE_WHITE_QUEENSIDE,
};

/// Standard chess starting position.
pub const STARTING_POSITION_FEN: &str =
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub fn parse_fen(fen: &str) -> Result<(Board, GameState), String> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or("Missing piece placement in FEN")?;
    let side_part = parts.next().ok_or("Missing side-to-move in FEN")?;
    let castling_part = parts.next().ok_or("Missing castling rights in FEN")?;
    let en_passant_part = parts.next().ok_or("Missing en-passant square in FEN")?;
    let halfmove_part = parts.next().ok_or("Missing halfmove clock in FEN")?;
    let fullmove_part = parts.next().ok_or("Missing fullmove number in FEN")?;

    if parts.next().is_some() {
        return Err("FEN has extra trailing fields".to_owned());
    }

    let board = parse_placement(board_part)?;

    let mut state = GameState::empty();
    state.side_to_move = parse_side_to_move(side_part)?;
    state.castling_rights = parse_castling_rights(castling_part)?;
    state.en_passant_target = parse_en_passant(en_passant_part)?;
    state.halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| format!("Invalid halfmove clock: {halfmove_part}"))?;
    state.fullmove_number = fullmove_part
        .parse::<u16>()
        .map_err(|_| format!("Invalid fullmove number: {fullmove_part}"))?;

    if let Some(ep) = state.en_passant_target {
        let rank = rank_of(ep);
        if rank != 2 && rank != 5 {
            return Err(format!("En-passant target on impossible rank: {rank}"));
        }
    }

    Ok((board, state))
}

pub fn generate_fen(board: &Board, state: &GameState) -> String {
    format!(
        "{} {} {} {} {} {}",
        placement_field(board),
        match state.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        },
        castling_field(state.castling_rights),
        en_passant_field(state.en_passant_target),
        state.halfmove_clock,
        state.fullmove_number
    )
}

fn parse_placement(board_part: &str) -> Result<Board, String> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err("Piece placement must contain 8 ranks".to_owned());
    }

    let mut board = Board::new();

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        // FEN lists rank 8 first.
        let board_rank = 7 - fen_rank_idx as u8;
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(step) = ch.to_digit(10) {
                if !(1..=8).contains(&step) {
                    return Err(format!("Invalid empty-square count '{ch}'"));
                }
                file += step as u8;
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| format!("Invalid piece character '{ch}' in placement"))?;
            if file >= 8 {
                return Err(format!("Rank {} has too many files", board_rank + 1));
            }
            board.set_piece(square_at(board_rank, file), piece);
            file += 1;
        }

        if file != 8 {
            return Err(format!("Rank {} does not sum to 8 files", board_rank + 1));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> Result<Color, String> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(format!("Invalid side-to-move field: {side_part}")),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, String> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        match ch {
            'K' => rights |= CASTLE_WHITE_KINGSIDE,
            'Q' => rights |= CASTLE_WHITE_QUEENSIDE,
            'k' => rights |= CASTLE_BLACK_KINGSIDE,
            'q' => rights |= CASTLE_BLACK_QUEENSIDE,
            _ => return Err(format!("Invalid castling rights character: {ch}")),
        }
    }
    Ok(rights)
}

fn parse_en_passant(en_passant_part: &str) -> Result<Option<Square>, String> {
    if en_passant_part == "-" {
        return Ok(None);
    }
    Ok(Some(algebraic_to_square(en_passant_part)?))
}

fn placement_field(board: &Board) -> String {
    let mut out = String::with_capacity(72);

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;
        for file in 0..8u8 {
            match board.piece_at(square_at(rank, file)) {
                Some(piece) => {
                    if empty_count > 0 {
                        out.push(char::from(b'0' + empty_count));
                        empty_count = 0;
                    }
                    out.push(piece.fen_char());
                }
                None => empty_count += 1,
            }
        }
        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }
        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn castling_field(rights: CastlingRights) -> String {
    let mut out = String::new();
    if (rights & CASTLE_WHITE_KINGSIDE) != 0 {
        out.push('K');
    }
    if (rights & CASTLE_WHITE_QUEENSIDE) != 0 {
        out.push('Q');
    }
    if (rights & CASTLE_BLACK_KINGSIDE) != 0 {
        out.push('k');
    }
    if (rights & CASTLE_BLACK_QUEENSIDE) != 0 {
        out.push('q');
    }
    if out.is_empty() {
        out.push('-');
    }
    out
}

fn en_passant_field(target: Option<Square>) -> String {
    match target {
        Some(square) => square_to_algebraic(square).unwrap_or_else(|_| "-".to_owned()),
        None => "-".to_owned(),
    }
}
