//! Minimal hard-coded opening book.
//!
//! Keys are the first two FEN fields (piece placement and side to move), so
//! clocks and castling details never block a hit. Candidates are shuffled and
//! the first legal one wins.

use std::collections::HashMap;
use std::sync::OnceLock;

use rand::seq::SliceRandom;

use crate::engine::rule_engine::RuleEngine;
use crate::moves::chess_move::{parse_coordinate, ChessMove};

const BOOK_LINES: &[(&str, &[&str])] = &[
    (
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w",
        &["e2e4", "d2d4", "c2c4", "g1f3"],
    ),
    (
        "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w",
        &["g1f3", "d2d4"],
    ),
    (
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b",
        &["c7c5", "e7e5", "e7e6", "c7c6"],
    ),
    (
        "rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b",
        &["d7d5", "g8f6", "e7e6"],
    ),
    (
        "rnbqkbnr/pppppp1p/6p1/8/4P3/5N2/PPPP1PPP/RNBQKB1R b",
        &["d7d6", "c7c5"],
    ),
    (
        "rnbqkbnr/pp1ppppp/2p5/8/4P3/5N2/PPPP1PPP/RNBQKB1R b",
        &["d7d5", "g8f6"],
    ),
    (
        "rnbqkbnr/ppp1pppp/3p4/8/3PP3/8/PPP2PPP/RNBQKBNR b",
        &["g8f6", "c7c5"],
    ),
    (
        "rnbqkbnr/pppppppp/8/8/2P5/8/PP1PPPPP/RNBQKBNR b",
        &["e7e5", "c7c5"],
    ),
    (
        "rnbqkbnr/pp1ppppp/2p5/8/2P5/8/PP1PPPPP/RNBQKBNR w",
        &["d2d4", "g1f3"],
    ),
    (
        "rnbqkbnr/pppppppp/8/8/8/5N2/PPPPPPPP/RNBQKB1R b",
        &["g8f6", "d7d5", "c7c5"],
    ),
];

static BOOK: OnceLock<HashMap<&'static str, &'static [&'static str]>> = OnceLock::new();

fn book() -> &'static HashMap<&'static str, &'static [&'static str]> {
    BOOK.get_or_init(|| BOOK_LINES.iter().copied().collect())
}

/// "placement side" prefix of a FEN string.
fn book_key(fen: &str) -> String {
    fen.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
}

impl RuleEngine {
    /// A legal book move for the current position, if the book knows one.
    pub fn book_move(&mut self) -> Option<ChessMove> {
        let key = book_key(&self.to_fen());
        let candidates = book().get(key.as_str())?;

        let mut shuffled: Vec<&str> = candidates.to_vec();
        shuffled.shuffle(&mut rand::thread_rng());

        for text in shuffled {
            let Ok(mv) = parse_coordinate(text) else {
                continue;
            };
            if self.is_legal_move(mv) {
                return Some(mv);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::book_key;
    use crate::engine::rule_engine::RuleEngine;
    use crate::moves::chess_move::parse_coordinate;

    #[test]
    fn book_key_is_placement_and_side_only() {
        assert_eq!(
            book_key("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"
        );
    }

    #[test]
    fn start_position_always_yields_a_legal_book_move() {
        let mut engine = RuleEngine::new_game();
        for _ in 0..8 {
            let mv = engine.book_move().expect("start position is in the book");
            assert!(engine.is_legal_move(mv));
        }
    }

    #[test]
    fn book_reply_exists_after_e4() {
        let mut engine = RuleEngine::new_game();
        let e4 = parse_coordinate("e2e4").expect("e2e4 should parse");
        assert!(engine.make_move(e4));

        let reply = engine.book_move().expect("1.e4 has book replies");
        assert!(engine.is_legal_move(reply));
    }

    #[test]
    fn unknown_position_misses_the_book() {
        let mut engine =
            RuleEngine::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        assert!(engine.book_move().is_none());
    }
}
