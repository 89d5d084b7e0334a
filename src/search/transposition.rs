//! Fixed-size direct-mapped transposition table keyed by Zobrist hash.
//!
//! Mate scores are stored relative to the node by adjusting with the search
//! ply, so a mate found at different depths is recognized as the same
//! mate-in-N when probed.

use crate::moves::chess_move::ChessMove;
use crate::search::alpha_beta::MATE_SCORE;

pub const TT_SIZE: usize = 1 << 20;

const MATE_THRESHOLD: i32 = MATE_SCORE - 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Exact,
    Lower,
    Upper,
}

#[derive(Debug, Clone, Copy)]
pub struct TTEntry {
    pub hash: u64,
    pub depth: u8,
    pub score: i32,
    pub bound: Bound,
    pub best_move: Option<ChessMove>,
}

pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
}

impl TranspositionTable {
    pub fn new() -> Self {
        Self {
            entries: vec![None; TT_SIZE],
        }
    }

    #[inline]
    fn index(&self, hash: u64) -> usize {
        (hash as usize) & (self.entries.len() - 1)
    }

    pub fn probe(&self, hash: u64) -> Option<TTEntry> {
        self.entries[self.index(hash)].filter(|entry| entry.hash == hash)
    }

    /// Unconditional replacement at the slot.
    pub fn store(&mut self, entry: TTEntry) {
        let idx = self.index(entry.hash);
        self.entries[idx] = Some(entry);
    }

    pub fn clear(&mut self) {
        self.entries.fill(None);
    }
}

impl Default for TranspositionTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Shift a mate score from root-relative to node-relative before storing.
#[inline]
pub fn score_to_tt(score: i32, ply: i32) -> i32 {
    if score > MATE_THRESHOLD {
        score + ply
    } else if score < -MATE_THRESHOLD {
        score - ply
    } else {
        score
    }
}

/// Undo the ply adjustment when reading a stored score back.
#[inline]
pub fn score_from_tt(score: i32, ply: i32) -> i32 {
    if score > MATE_THRESHOLD {
        score - ply
    } else if score < -MATE_THRESHOLD {
        score + ply
    } else {
        score
    }
}
