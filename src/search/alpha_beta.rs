//! Fixed-depth negamax alpha-beta search with quiescence.
//!
//! Scores are side-relative. Mate scores are `MATE_SCORE - ply` so nearer
//! mates win; quiescence clamps static evaluations to `EVAL_CLAMP` so no
//! non-mate can masquerade as one. The search drives all of its mutations
//! through the same make/unmake path used for normal play.

use crate::board::state::GameState;
use crate::engine::rule_engine::RuleEngine;
use crate::engine::zobrist::compute_hash;
use crate::moves::chess_move::ChessMove;
use crate::search::transposition::{score_from_tt, score_to_tt, Bound, TTEntry};

pub const MATE_SCORE: i32 = 30_000;
pub const MAX_SCORE: i32 = 32_000;
pub const MIN_SCORE: i32 = -32_000;
pub const EVAL_CLAMP: i32 = 29_000;

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchResult {
    pub best_move: Option<ChessMove>,
    pub score: i32,
    pub nodes: u64,
}

struct NullMoveUndo {
    prev_state: GameState,
    prev_hash: u64,
    prev_history_len: usize,
}

impl RuleEngine {
    /// Search the current position to a fixed depth.
    ///
    /// The opening book is probed first; a legal book move returns
    /// immediately with a neutral score.
    pub fn search(&mut self, depth: u8) -> SearchResult {
        self.nodes = 0;

        if let Some(book) = self.book_move() {
            return SearchResult {
                best_move: Some(book),
                score: 0,
                nodes: 0,
            };
        }

        let mut moves = self.generate_legal_moves();
        if moves.is_empty() {
            let score = if self.is_in_check(self.side_to_move()) {
                -MATE_SCORE
            } else {
                0
            };
            return SearchResult {
                best_move: None,
                score,
                nodes: 1,
            };
        }
        self.order_moves(&mut moves, 0);

        let mut alpha = MIN_SCORE;
        let beta = MAX_SCORE;
        let mut best_move = None;
        let mut best_score = MIN_SCORE;

        for mv in moves {
            self.apply_unchecked(mv);
            let score = -self.negamax(depth.saturating_sub(1), 1, -beta, -alpha);
            self.undo_move();

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
            }
            if score > alpha {
                alpha = score;
            }
        }

        SearchResult {
            best_move,
            score: best_score,
            nodes: self.nodes,
        }
    }

    fn negamax(&mut self, depth: u8, ply: i32, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;
        let alpha_orig = alpha;

        if let Some(entry) = self.tt.probe(self.hash) {
            if entry.depth >= depth {
                let score = score_from_tt(entry.score, ply);
                match entry.bound {
                    Bound::Exact => return score,
                    Bound::Lower if score >= beta => return score,
                    Bound::Upper if score <= alpha => return score,
                    _ => {}
                }
            }
        }

        if self.repetition_count() >= 3 {
            return 0;
        }

        if depth == 0 {
            return self.quiesce(ply, alpha, beta);
        }

        let in_check = self.is_in_check(self.side_to_move());

        let mut moves = self.generate_legal_moves();
        if moves.is_empty() {
            return if in_check { -MATE_SCORE + ply } else { 0 };
        }
        self.order_moves(&mut moves, ply as usize);

        // Null move: hand the turn over and probe a zero window. A fail-high
        // means the position is strong enough to cut outright.
        if depth >= 3 && !in_check {
            let undo = self.make_null_move();
            let score = -self.negamax(depth - 3, ply + 1, -beta, -beta + 1);
            self.unmake_null_move(undo);
            if score >= beta {
                return beta;
            }
        }

        let side = self.side_to_move().index();
        let mut best_move = None;

        for (move_index, mv) in moves.into_iter().enumerate() {
            let quiet = !self.is_capture(mv) && mv.promotion.is_none();

            // Late-move reduction for quiet moves ordered far down the list.
            let reduction = if depth >= 3 && move_index >= 4 && quiet { 1 } else { 0 };

            self.apply_unchecked(mv);
            let score = -self.negamax(depth - 1 - reduction, ply + 1, -beta, -alpha);
            self.undo_move();

            if score >= beta {
                self.tt.store(TTEntry {
                    hash: self.hash,
                    depth,
                    score: score_to_tt(score, ply),
                    bound: Bound::Lower,
                    best_move: Some(mv),
                });
                if quiet {
                    self.killers.store(ply as usize, mv);
                }
                return beta;
            }
            if score > alpha {
                alpha = score;
                best_move = Some(mv);
                if quiet {
                    self.history.bump(side, mv);
                }
            }
        }

        let bound = if alpha <= alpha_orig {
            Bound::Upper
        } else {
            Bound::Exact
        };
        self.tt.store(TTEntry {
            hash: self.hash,
            depth,
            score: score_to_tt(alpha, ply),
            bound,
            best_move,
        });

        alpha
    }

    /// Depth-unlimited extension at the leaves restricted to noisy moves,
    /// or to every legal reply while in check.
    fn quiesce(&mut self, ply: i32, mut alpha: i32, beta: i32) -> i32 {
        self.nodes += 1;
        let in_check = self.is_in_check(self.side_to_move());

        if !in_check {
            let stand_pat = self.evaluate_relative().clamp(-EVAL_CLAMP, EVAL_CLAMP);
            if stand_pat >= beta {
                return beta;
            }
            if stand_pat > alpha {
                alpha = stand_pat;
            }
        }

        let moves = if in_check {
            let mut all = self.generate_legal_moves();
            if all.is_empty() {
                return -MATE_SCORE;
            }
            self.order_moves(&mut all, ply as usize);
            all
        } else {
            self.generate_noisy_moves(ply)
        };

        for mv in moves {
            self.apply_unchecked(mv);
            let score = -self.quiesce(ply + 1, -beta, -alpha);
            self.undo_move();

            if score >= beta {
                return beta;
            }
            if score > alpha {
                alpha = score;
            }
        }

        alpha
    }

    /// Captures (including en passant) and promotions, ordered.
    fn generate_noisy_moves(&mut self, ply: i32) -> Vec<ChessMove> {
        let mut moves = self.generate_legal_moves();
        moves.retain(|&mv| self.is_capture(mv) || mv.promotion.is_some());
        self.order_moves(&mut moves, ply as usize);
        moves
    }

    fn make_null_move(&mut self) -> NullMoveUndo {
        let undo = NullMoveUndo {
            prev_state: self.state.clone(),
            prev_hash: self.hash,
            prev_history_len: self.hash_history.len(),
        };

        self.state.en_passant_target = None;
        self.state.side_to_move = self.state.side_to_move.opposite();
        self.hash = compute_hash(&self.board, &self.state);
        self.hash_history.push(self.hash);

        undo
    }

    fn unmake_null_move(&mut self, undo: NullMoveUndo) {
        self.state = undo.prev_state;
        self.hash = undo.prev_hash;
        self.hash_history.truncate(undo.prev_history_len);
    }
}
