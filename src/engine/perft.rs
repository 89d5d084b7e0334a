//! Perft: exhaustive legal-move-tree node counts.
//!
//! The reference numbers catch virtually every make/unmake or legality bug,
//! which makes perft the primary integration check for the rule engine.
//! Promotions are generated as a single (Queen) move, so reference positions
//! here stay below the promotion horizon.

use crate::engine::rule_engine::RuleEngine;

impl RuleEngine {
    /// Count leaf nodes of the legal move tree to `depth`.
    pub fn perft(&mut self, depth: u8) -> u64 {
        if depth == 0 {
            return 1;
        }

        let moves = self.generate_legal_moves();
        if depth == 1 {
            return moves.len() as u64;
        }

        let mut nodes = 0u64;
        for mv in moves {
            self.apply_unchecked(mv);
            nodes += self.perft(depth - 1);
            self.undo_move();
        }
        nodes
    }
}
