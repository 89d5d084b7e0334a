//! Move ordering: TT move, killers, MVV-LVA captures, promotions, history.

use crate::board::piece::{Piece, PieceKind};
use crate::board::square::file_of;
use crate::engine::rule_engine::RuleEngine;
use crate::moves::chess_move::ChessMove;

pub const MAX_PLY: usize = 64;

const TT_MOVE_BONUS: i32 = 100_000;
const KILLER_BONUS: i32 = 80_000;
const CAPTURE_BONUS: i32 = 50_000;
const PROMOTION_BONUS: i32 = 900;

/// Two quiet-move slots per search ply, indexed `ply % MAX_PLY`.
pub struct KillerTable {
    slots: [[Option<ChessMove>; 2]; MAX_PLY],
}

impl KillerTable {
    pub const fn new() -> Self {
        Self {
            slots: [[None; 2]; MAX_PLY],
        }
    }

    #[inline]
    pub fn at(&self, ply: usize) -> [Option<ChessMove>; 2] {
        self.slots[ply % MAX_PLY]
    }

    pub fn store(&mut self, ply: usize, mv: ChessMove) {
        let slot = &mut self.slots[ply % MAX_PLY];
        if slot[0] == Some(mv) {
            return;
        }
        slot[1] = slot[0];
        slot[0] = Some(mv);
    }

    pub fn clear(&mut self) {
        self.slots = [[None; 2]; MAX_PLY];
    }
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-(side, from, to) counters rewarding quiet moves that raise alpha.
pub struct HistoryTable {
    counts: Box<[[[i32; 64]; 64]; 2]>,
}

impl HistoryTable {
    pub fn new() -> Self {
        Self {
            counts: Box::new([[[0; 64]; 64]; 2]),
        }
    }

    #[inline]
    pub fn get(&self, side: usize, mv: ChessMove) -> i32 {
        self.counts[side][mv.from as usize][mv.to as usize]
    }

    #[inline]
    pub fn bump(&mut self, side: usize, mv: ChessMove) {
        self.counts[side][mv.from as usize][mv.to as usize] += 1;
    }

    pub fn clear(&mut self) {
        self.counts = Box::new([[[0; 64]; 64]; 2]);
    }
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine {
    /// Sort moves best-first for the alpha-beta loop.
    pub(crate) fn order_moves(&self, moves: &mut [ChessMove], ply: usize) {
        let tt_move = self.tt.probe(self.hash).and_then(|entry| entry.best_move);
        let killers = self.killers.at(ply);

        moves.sort_by_key(|&mv| -self.move_score(mv, tt_move, killers));
    }

    fn move_score(
        &self,
        mv: ChessMove,
        tt_move: Option<ChessMove>,
        killers: [Option<ChessMove>; 2],
    ) -> i32 {
        let mut score = 0i32;

        if Some(mv) == tt_move {
            score += TT_MOVE_BONUS;
        }
        if killers[0] == Some(mv) || killers[1] == Some(mv) {
            score += KILLER_BONUS;
        }

        let attacker = self.board.piece_at(mv.from);
        let victim = self.victim_of(mv, attacker);

        match victim {
            Some(victim) => {
                let attacker_value = attacker.map(|p| p.kind.value()).unwrap_or(0);
                score += CAPTURE_BONUS + victim.kind.value() - attacker_value;
            }
            None => {
                // Quiet move: history heuristic.
                score += self.history.get(self.side_to_move().index(), mv);
            }
        }

        if mv.promotion.is_some() {
            score += PROMOTION_BONUS;
        }

        score
    }

    /// The captured piece for scoring; an en-passant victim is scored as an
    /// opposing pawn even though the destination square is empty.
    fn victim_of(&self, mv: ChessMove, attacker: Option<Piece>) -> Option<Piece> {
        if let Some(victim) = self.board.piece_at(mv.to) {
            return Some(victim);
        }
        match attacker {
            Some(p)
                if p.kind == PieceKind::Pawn && file_of(mv.from) != file_of(mv.to) =>
            {
                Some(Piece::new(PieceKind::Pawn, p.color.opposite()))
            }
            _ => None,
        }
    }
}
