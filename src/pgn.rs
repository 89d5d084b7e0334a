//! PGN subset codec for game history interchange.
//!
//! Export writes the fixed two-tag header, then pairs of coordinate moves
//! numbered `N. ` and a `*` terminator. Import is tolerant of move-number
//! tokens, header tokens, result tokens, and `+`/`#` suffixes; every other
//! token must be a coordinate move that applies legally in sequence.

use crate::engine::move_log::MoveLog;
use crate::engine::rule_engine::RuleEngine;
use crate::moves::chess_move::{format_coordinate, parse_coordinate, ChessMove};

/// Serialize a move log to PGN text.
pub fn write_pgn(log: &MoveLog) -> String {
    let mut out = String::new();
    out.push_str("[Event \"Sage Chess Game\"]\n");
    out.push_str("[Site \"Local\"]\n");
    out.push('\n');

    for (ply, record) in log.moves().iter().enumerate() {
        if ply % 2 == 0 {
            out.push_str(&format!("{}. ", ply / 2 + 1));
        }
        let mv = ChessMove {
            from: record.from,
            to: record.to,
            promotion: record.promotion,
        };
        out.push_str(&format_coordinate(mv));
        out.push(' ');
    }

    out.push('*');
    out
}

/// Reset the engine to the starting position and replay PGN movetext onto it.
pub fn read_pgn(engine: &mut RuleEngine, text: &str) -> Result<(), String> {
    engine.reset();

    for token in text.split_whitespace() {
        if is_skippable_token(token) {
            continue;
        }

        let cleaned = token.trim_end_matches(|c: char| matches!(c, '+' | '#'));
        if cleaned.len() != 4 && cleaned.len() != 5 {
            return Err(format!("Unrecognized PGN token: {token}"));
        }

        let mv = parse_coordinate(cleaned)?;
        if !engine.make_move(mv) {
            return Err(format!("Illegal move in PGN: {cleaned}"));
        }
    }

    Ok(())
}

fn is_skippable_token(token: &str) -> bool {
    // Move numbers, header fragments, and result markers.
    token.contains('.')
        || token.contains('[')
        || token.contains(']')
        || token.contains('"')
        || matches!(token, "1-0" | "0-1" | "1/2-1/2" | "*")
}

#[cfg(test)]
mod tests {
    use super::{read_pgn, write_pgn};
    use crate::engine::rule_engine::RuleEngine;
    use crate::moves::chess_move::parse_coordinate;

    fn play(engine: &mut RuleEngine, moves: &[&str]) {
        for text in moves {
            let mv = parse_coordinate(text).expect("test move should parse");
            assert!(engine.make_move(mv), "move {text} should be legal");
        }
    }

    #[test]
    fn export_numbers_white_moves_and_terminates() {
        let mut engine = RuleEngine::new_game();
        play(&mut engine, &["e2e4", "e7e5", "g1f3"]);

        let pgn = write_pgn(engine.log());
        assert!(pgn.starts_with("[Event \"Sage Chess Game\"]\n[Site \"Local\"]\n\n"));
        assert!(pgn.ends_with("1. e2e4 e7e5 2. g1f3 *"));
    }

    #[test]
    fn round_trip_restores_the_same_position() {
        let mut original = RuleEngine::new_game();
        play(&mut original, &["e2e4", "e7e5", "g1f3"]);
        let pgn = write_pgn(original.log());

        let mut replayed = RuleEngine::new_game();
        read_pgn(&mut replayed, &pgn).expect("PGN should import");

        assert_eq!(replayed.to_fen(), original.to_fen());
        assert_eq!(replayed.log().len(), 3);
    }

    #[test]
    fn round_trip_preserves_promotions_and_castling() {
        let mut original = RuleEngine::new_game();
        play(
            &mut original,
            &[
                "g2g4", "h7h5", "g4h5", "g7g5", "h5g6", "f8h6", "g6g7", "g8f6", "g7g8n",
            ],
        );
        let pgn = write_pgn(original.log());
        assert!(pgn.contains("g7g8n"), "promotion letter must be exported");

        let mut replayed = RuleEngine::new_game();
        read_pgn(&mut replayed, &pgn).expect("PGN should import");
        assert_eq!(replayed.to_fen(), original.to_fen());
    }

    #[test]
    fn import_tolerates_annotations_and_results() {
        let text = "[Event \"Casual\"]\n\n1. e2e4 e7e5 2. d1h5+ g8f6 3. h5e5# 1-0";
        let mut engine = RuleEngine::new_game();
        read_pgn(&mut engine, text).expect("annotated PGN should import");
        assert_eq!(engine.log().len(), 5);
    }

    #[test]
    fn import_rejects_illegal_and_garbage_movetext() {
        let mut engine = RuleEngine::new_game();
        assert!(read_pgn(&mut engine, "1. e2e5 *").is_err(), "illegal move");

        let mut engine = RuleEngine::new_game();
        assert!(
            read_pgn(&mut engine, "1. zzzz *").is_err(),
            "non-coordinate token"
        );
    }
}
