//! Terminal and draw predicates.

use crate::board::piece::PieceKind;
use crate::engine::rule_engine::RuleEngine;

impl RuleEngine {
    /// In check with no legal reply.
    pub fn is_checkmate(&mut self) -> bool {
        self.is_in_check(self.side_to_move()) && !self.has_any_legal_move()
    }

    /// Not in check, but no legal move exists.
    pub fn is_stalemate(&mut self) -> bool {
        !self.is_in_check(self.side_to_move()) && !self.has_any_legal_move()
    }

    /// Fifty full moves without a capture or pawn move.
    #[inline]
    pub fn is_fifty_move_draw(&self) -> bool {
        self.state.halfmove_clock >= 100
    }

    /// Two bare kings, or kings plus a single minor piece.
    pub fn is_insufficient_material(&self) -> bool {
        match self.board.piece_count() {
            2 => true,
            3 => {
                let mut has_minor = false;
                self.board.for_each_piece(|_, piece| {
                    if matches!(piece.kind, PieceKind::Bishop | PieceKind::Knight) {
                        has_minor = true;
                    }
                });
                has_minor
            }
            _ => false,
        }
    }

    /// The current position occurred at least three times.
    ///
    /// The scan is bounded by the halfmove clock and steps two plies at a
    /// time, so positions separated by a capture, pawn move, or rights change
    /// can never count toward the same repetition.
    pub fn is_threefold_repetition(&self) -> bool {
        self.repetition_count() >= 3
    }

    pub(crate) fn repetition_count(&self) -> usize {
        let current = self.hash;
        let max_scan = usize::from(self.state.halfmove_clock)
            .saturating_add(1)
            .min(self.hash_history.len());

        self.hash_history
            .iter()
            .rev()
            .take(max_scan)
            .step_by(2)
            .filter(|&&h| h == current)
            .count()
    }

    /// Any of the automatic draw conditions.
    pub fn is_draw(&mut self) -> bool {
        self.is_fifty_move_draw()
            || self.is_insufficient_material()
            || self.is_threefold_repetition()
            || self.is_stalemate()
    }
}
