//! UCI stdio driver.
//!
//! A thin adapter over the engine core: it parses `position` and `go`
//! commands, runs the synchronous fixed-depth search, and prints `bestmove`.
//! No pondering and no time management; `go depth N` is the only knob.

use std::io::{self, BufRead, Write};

use crate::engine::rule_engine::RuleEngine;
use crate::moves::chess_move::{format_coordinate, parse_coordinate};
use crate::search::alpha_beta::{EVAL_CLAMP, MATE_SCORE};

const UCI_ENGINE_NAME: &str = "Sage Chess";
const UCI_ENGINE_AUTHOR: &str = "sage_chess developers";
const DEFAULT_DEPTH: u8 = 4;

pub fn run_stdio_loop() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut session = UciSession::new();

    for line in stdin.lock().lines() {
        let line = line?;
        let should_quit = session.handle_command(&line, &mut stdout)?;
        stdout.flush()?;
        if should_quit {
            break;
        }
    }

    Ok(())
}

pub struct UciSession {
    engine: RuleEngine,
}

impl UciSession {
    pub fn new() -> Self {
        Self {
            engine: RuleEngine::new_game(),
        }
    }

    /// Handle one command line; returns `true` on `quit`.
    pub fn handle_command(&mut self, line: &str, out: &mut impl Write) -> io::Result<bool> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(false);
        }

        let mut parts = trimmed.split_whitespace();
        let cmd = parts.next().unwrap_or_default();

        match cmd {
            "uci" => {
                writeln!(out, "id name {}", UCI_ENGINE_NAME)?;
                writeln!(out, "id author {}", UCI_ENGINE_AUTHOR)?;
                writeln!(out, "option name Depth type spin default 4 min 1 max 16")?;
                writeln!(out, "uciok")?;
            }
            "isready" => {
                writeln!(out, "readyok")?;
            }
            "ucinewgame" => {
                self.engine = RuleEngine::new_game();
            }
            "position" => {
                if let Err(err) = self.handle_position(trimmed) {
                    writeln!(out, "info string position error: {err}")?;
                }
            }
            "go" => {
                self.handle_go(trimmed, out)?;
            }
            "stop" => {
                // Search is synchronous; nothing is running to stop.
            }
            "quit" => {
                return Ok(true);
            }
            _ => {
                // Unknown commands are ignored for UCI compatibility.
            }
        }

        Ok(false)
    }

    fn handle_position(&mut self, line: &str) -> Result<(), String> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.len() < 2 {
            return Err("position needs startpos or fen".to_owned());
        }

        let moves_idx = tokens.iter().position(|t| *t == "moves");

        match tokens[1] {
            "startpos" => self.engine.reset(),
            "fen" => {
                let fen_end = moves_idx.unwrap_or(tokens.len());
                let fen = tokens[2..fen_end].join(" ");
                self.engine.load_fen(&fen)?;
            }
            other => return Err(format!("unknown position mode: {other}")),
        }

        if let Some(idx) = moves_idx {
            for token in &tokens[idx + 1..] {
                let mv = parse_coordinate(token)?;
                if !self.engine.make_move(mv) {
                    return Err(format!("illegal move in position command: {token}"));
                }
            }
        }

        Ok(())
    }

    fn handle_go(&mut self, line: &str, out: &mut impl Write) -> io::Result<()> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let depth = tokens
            .iter()
            .position(|t| *t == "depth")
            .and_then(|idx| tokens.get(idx + 1))
            .and_then(|d| d.parse::<u8>().ok())
            .unwrap_or(DEFAULT_DEPTH);

        let result = self.engine.search(depth);

        let score = if result.score.abs() > EVAL_CLAMP {
            // Distance to mate in full moves, signed for the losing side.
            let plies = MATE_SCORE - result.score.abs();
            let moves = (plies + 1) / 2;
            if result.score > 0 {
                format!("mate {}", moves.max(1))
            } else {
                format!("mate {}", -moves)
            }
        } else {
            format!("cp {}", result.score)
        };
        writeln!(
            out,
            "info depth {} score {} nodes {}",
            depth, score, result.nodes
        )?;

        match result.best_move {
            Some(best) => writeln!(out, "bestmove {}", format_coordinate(best))?,
            None => writeln!(out, "bestmove 0000")?,
        }

        Ok(())
    }
}

impl Default for UciSession {
    fn default() -> Self {
        Self::new()
    }
}
