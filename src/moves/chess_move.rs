//! The `(from, to, promotion)` move value and its coordinate notation codec.
//!
//! Coordinate notation is `<file><rank><file><rank>[<promo>]`, for example
//! `e2e4` or `a7a8q`. It is the move format every adapter accepts.

use std::fmt;

use crate::board::piece::PieceKind;
use crate::board::square::{algebraic_to_square, square_to_algebraic, Square};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChessMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceKind>,
}

impl ChessMove {
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    #[inline]
    pub const fn with_promotion(from: Square, to: Square, promotion: PieceKind) -> Self {
        Self {
            from,
            to,
            promotion: Some(promotion),
        }
    }
}

impl fmt::Display for ChessMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_coordinate(*self))
    }
}

/// Parse coordinate notation into a move.
pub fn parse_coordinate(text: &str) -> Result<ChessMove, String> {
    let bytes = text.as_bytes();
    if bytes.len() != 4 && bytes.len() != 5 {
        return Err(format!("Invalid coordinate move: {text}"));
    }

    let from = algebraic_to_square(&text[0..2])?;
    let to = algebraic_to_square(&text[2..4])?;

    let promotion = if bytes.len() == 5 {
        Some(char_to_promotion(bytes[4] as char)?)
    } else {
        None
    };

    Ok(ChessMove {
        from,
        to,
        promotion,
    })
}

/// Format a move back to coordinate notation.
pub fn format_coordinate(mv: ChessMove) -> String {
    let mut out = String::with_capacity(5);
    out.push_str(&square_to_algebraic(mv.from).unwrap_or_default());
    out.push_str(&square_to_algebraic(mv.to).unwrap_or_default());
    if let Some(kind) = mv.promotion {
        if let Some(ch) = promotion_to_char(kind) {
            out.push(ch);
        }
    }
    out
}

#[inline]
pub fn promotion_to_char(kind: PieceKind) -> Option<char> {
    match kind {
        PieceKind::Queen => Some('q'),
        PieceKind::Rook => Some('r'),
        PieceKind::Bishop => Some('b'),
        PieceKind::Knight => Some('n'),
        _ => None,
    }
}

#[inline]
pub fn char_to_promotion(ch: char) -> Result<PieceKind, String> {
    match ch.to_ascii_lowercase() {
        'q' => Ok(PieceKind::Queen),
        'r' => Ok(PieceKind::Rook),
        'b' => Ok(PieceKind::Bishop),
        'n' => Ok(PieceKind::Knight),
        _ => Err(format!("Invalid promotion piece character: {ch}")),
    }
}
