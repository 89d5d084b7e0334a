//! Interactive terminal shell: a plain blocking readline → dispatch → print
//! loop over the engine core.

use std::fs;
use std::io::{self, BufRead, Write};

use sage_chess::board::render::render_board;
use sage_chess::engine::RuleEngine;
use sage_chess::moves::chess_move::{format_coordinate, parse_coordinate};
use sage_chess::pgn::{read_pgn, write_pgn};
use sage_chess::Color;

const DEFAULT_SEARCH_DEPTH: u8 = 4;

fn main() -> io::Result<()> {
    let mut engine = RuleEngine::new_game();

    show_welcome();
    show_board(&engine);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line?;
        if handle_input(&mut engine, line.trim()) {
            break;
        }
        stdout.flush()?;
    }

    Ok(())
}

fn show_welcome() {
    println!("Sage Chess shell");
    println!("----------------");
    println!("  b            show board");
    println!("  m e2e4       make a move (bare e2e4 works too)");
    println!("  u            undo last move");
    println!("  h            move history");
    println!("  new          new game");
    println!("  fen [FEN]    dump or load FEN");
    println!("  go [depth]   let the engine reply");
    println!("  save FILE    save game as PGN");
    println!("  load FILE    load PGN game");
    println!("  q            quit");
    println!();
}

fn show_board(engine: &RuleEngine) {
    println!("{}", render_board(engine.board()));
    println!();
}

/// Dispatch one command; returns `true` when the user quits.
fn handle_input(engine: &mut RuleEngine, input: &str) -> bool {
    if input.is_empty() {
        return false;
    }

    let input = normalize_input(input);
    let (cmd, rest) = match input.split_once(' ') {
        Some((cmd, rest)) => (cmd, rest.trim()),
        None => (input.as_str(), ""),
    };

    match cmd {
        "q" | "quit" => {
            println!("Goodbye!");
            return true;
        }
        "b" => show_board(engine),
        "h" => show_history(engine),
        "u" => {
            if engine.undo_move() {
                show_board(engine);
            } else {
                println!("Nothing to undo.");
            }
        }
        "new" => {
            engine.reset();
            show_board(engine);
        }
        "fen" => {
            if rest.is_empty() {
                println!("{}", engine.to_fen());
            } else {
                match engine.load_fen(rest) {
                    Ok(()) => show_board(engine),
                    Err(err) => println!("FEN error: {err}"),
                }
            }
        }
        "m" => {
            apply_user_move(engine, rest);
        }
        "go" => {
            let depth = rest.parse::<u8>().unwrap_or(DEFAULT_SEARCH_DEPTH);
            engine_reply(engine, depth);
        }
        "save" => {
            if rest.is_empty() {
                println!("Usage: save FILE");
            } else {
                match fs::write(rest, write_pgn(engine.log())) {
                    Ok(()) => println!("Saved {rest}"),
                    Err(err) => println!("Save failed: {err}"),
                }
            }
        }
        "load" => {
            if rest.is_empty() {
                println!("Usage: load FILE");
            } else {
                match fs::read_to_string(rest) {
                    Ok(text) => match read_pgn(engine, &text) {
                        Ok(()) => show_board(engine),
                        Err(err) => println!("PGN error: {err}"),
                    },
                    Err(err) => println!("Load failed: {err}"),
                }
            }
        }
        _ => println!("Unknown command. Try 'm e2e4', 'go', 'u', 'h', or 'q'."),
    }

    false
}

fn apply_user_move(engine: &mut RuleEngine, text: &str) {
    let mv = match parse_coordinate(text) {
        Ok(mv) => mv,
        Err(err) => {
            println!("{err}");
            return;
        }
    };

    if !engine.make_move(mv) {
        println!("Illegal move: {text}");
        return;
    }

    show_board(engine);
    announce_status(engine);
}

fn engine_reply(engine: &mut RuleEngine, depth: u8) {
    let result = engine.search(depth);
    let Some(best) = result.best_move else {
        println!("No move available.");
        return;
    };

    engine.make_move(best);
    println!(
        "Engine plays {} (score {}, {} nodes)",
        format_coordinate(best),
        result.score,
        result.nodes
    );
    show_board(engine);
    announce_status(engine);
}

fn announce_status(engine: &mut RuleEngine) {
    if engine.is_checkmate() {
        println!("CHECKMATE! {} is defeated.", color_name(engine.side_to_move()));
    } else if engine.is_stalemate() {
        println!("STALEMATE. The position is drawn.");
    } else if engine.is_threefold_repetition() {
        println!("Draw by threefold repetition.");
    } else if engine.is_fifty_move_draw() {
        println!("Draw by the fifty-move rule.");
    } else if engine.is_insufficient_material() {
        println!("Draw by insufficient material.");
    } else if engine.is_in_check(engine.side_to_move()) {
        println!("{} is in check.", color_name(engine.side_to_move()));
    }
}

fn show_history(engine: &RuleEngine) {
    if engine.log().is_empty() {
        println!("No moves yet.");
        return;
    }
    println!("Move history:");
    for (idx, record) in engine.log().moves().iter().enumerate() {
        let mv = sage_chess::ChessMove {
            from: record.from,
            to: record.to,
            promotion: record.promotion,
        };
        println!("{:2}. {}", idx + 1, format_coordinate(mv));
    }
}

/// Auto-correct bare coordinate input like `e2e4` into `m e2e4`.
fn normalize_input(input: &str) -> String {
    if parse_coordinate(input).is_ok() {
        format!("m {input}")
    } else {
        input.to_owned()
    }
}

fn color_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}
