//! The rule engine: legality, make/unmake, and legal move generation.
//!
//! `RuleEngine` owns the board, the game state, the move log, the hash
//! history, and the search-time tables. Legality of a normal move is decided
//! by make + attack-check + unmake on the single live board; the board is
//! never copied to simulate a move.

use crate::board::board::Board;
use crate::board::fen::{generate_fen, parse_fen, STARTING_POSITION_FEN};
use crate::board::piece::{Color, Piece, PieceKind};
use crate::board::square::{file_of, rank_of, shift, square_at, Square};
use crate::board::state::{
    GameState, CASTLE_BLACK_KINGSIDE, CASTLE_BLACK_QUEENSIDE, CASTLE_WHITE_KINGSIDE,
    CASTLE_WHITE_QUEENSIDE,
};
use crate::engine::attack::{is_in_check, is_square_attacked};
use crate::engine::move_log::{MoveLog, MoveRecord, RookMove};
use crate::engine::zobrist::compute_hash;
use crate::moves::chess_move::ChessMove;
use crate::search::ordering::{HistoryTable, KillerTable};
use crate::search::transposition::TranspositionTable;

pub struct RuleEngine {
    pub(crate) board: Board,
    pub(crate) state: GameState,
    pub(crate) log: MoveLog,
    pub(crate) hash: u64,
    pub(crate) hash_history: Vec<u64>,

    // Search-time tables; owned here so search and play share one engine.
    pub(crate) tt: TranspositionTable,
    pub(crate) killers: KillerTable,
    pub(crate) history: HistoryTable,
    pub(crate) nodes: u64,
}

impl RuleEngine {
    /// Engine at the standard starting position.
    pub fn new_game() -> Self {
        let board = Board::standard();
        let state = GameState::new_game();
        let hash = compute_hash(&board, &state);
        Self {
            board,
            state,
            log: MoveLog::new(),
            hash,
            hash_history: vec![hash],
            tt: TranspositionTable::new(),
            killers: KillerTable::new(),
            history: HistoryTable::new(),
            nodes: 0,
        }
    }

    /// Engine hydrated from a FEN string.
    pub fn from_fen(fen: &str) -> Result<Self, String> {
        let mut engine = Self::new_game();
        engine.load_fen(fen)?;
        Ok(engine)
    }

    /// Replace the position, clearing log and hash history.
    pub fn load_fen(&mut self, fen: &str) -> Result<(), String> {
        let (board, state) = parse_fen(fen)?;
        let hash = compute_hash(&board, &state);
        self.board = board;
        self.state = state;
        self.log.clear();
        self.hash = hash;
        self.hash_history.clear();
        self.hash_history.push(hash);
        Ok(())
    }

    /// Back to the standard starting position, keeping the allocated tables.
    pub fn reset(&mut self) {
        // load_fen of the start FEN cannot fail.
        let _ = self.load_fen(STARTING_POSITION_FEN);
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move
    }

    #[inline]
    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    #[inline]
    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub fn to_fen(&self) -> String {
        generate_fen(&self.board, &self.state)
    }

    #[inline]
    pub fn is_in_check(&self, color: Color) -> bool {
        is_in_check(&self.board, color)
    }

    /// Apply a move if legal. On failure the engine state is unchanged.
    pub fn make_move(&mut self, mv: ChessMove) -> bool {
        if !self.is_legal_move(mv) {
            return false;
        }
        self.apply_unchecked(mv);
        true
    }

    /// Revert the last ply. Returns `false` on an empty log.
    pub fn undo_move(&mut self) -> bool {
        let Some(record) = self.log.pop() else {
            return false;
        };

        self.state = record.prev_state;

        // Undo the castling rook first so the king restore cannot clobber it.
        if let Some(rook_move) = record.rook_move {
            if let Some(rook) = self.board.piece_at(rook_move.to) {
                self.board.set_piece(rook_move.from, rook);
                self.board.clear(rook_move.to);
            }
        }

        self.board.set_piece(record.from, record.moved_piece);

        match record.captured_piece {
            Some(captured) => {
                if record.captured_square != record.to {
                    self.board.clear(record.to);
                }
                self.board.set_piece(record.captured_square, captured);
            }
            None => self.board.clear(record.to),
        }

        self.hash_history.pop();
        self.hash = record.prev_hash;
        debug_assert_eq!(self.hash_history.last().copied(), Some(self.hash));

        true
    }

    /// Full legality: piece ownership, pseudo-legal membership, king safety,
    /// and the castling rules for two-square king moves.
    pub fn is_legal_move(&mut self, mv: ChessMove) -> bool {
        let Some(piece) = self.board.piece_at(mv.from) else {
            return false;
        };
        if piece.color != self.state.side_to_move {
            return false;
        }

        let targets = piece.pseudo_moves(mv.from, &self.board, &self.state);
        if !targets.contains(&mv.to) {
            return false;
        }

        if piece.kind == PieceKind::King && file_of(mv.from).abs_diff(file_of(mv.to)) == 2 {
            return self.castling_is_legal(piece.color, mv.to);
        }

        !self.would_leave_king_in_check(mv, piece.color)
    }

    /// All legal moves for the side to move, captures first.
    ///
    /// Promotions are generated as Queen; `make_move` accepts an explicit
    /// under-promotion.
    pub fn generate_legal_moves(&mut self) -> Vec<ChessMove> {
        let own_pieces = self.board.pieces_of(self.state.side_to_move);
        let mut captures = Vec::with_capacity(8);
        let mut quiets = Vec::with_capacity(32);

        for (from, piece) in own_pieces {
            for to in piece.pseudo_moves(from, &self.board, &self.state) {
                let mv = self.annotate_promotion(piece, from, to);
                if !self.is_legal_move(mv) {
                    continue;
                }
                if self.is_capture(mv) {
                    captures.push(mv);
                } else {
                    quiets.push(mv);
                }
            }
        }

        captures.append(&mut quiets);
        captures
    }

    /// Short-circuiting "any legal move exists" probe for mate detection.
    pub fn has_any_legal_move(&mut self) -> bool {
        let own_pieces = self.board.pieces_of(self.state.side_to_move);
        for (from, piece) in own_pieces {
            for to in piece.pseudo_moves(from, &self.board, &self.state) {
                let mv = self.annotate_promotion(piece, from, to);
                if self.is_legal_move(mv) {
                    return true;
                }
            }
        }
        false
    }

    /// Captures either by destination occupancy or by a pawn leaving its file
    /// into an empty square (en passant).
    pub(crate) fn is_capture(&self, mv: ChessMove) -> bool {
        if self.board.piece_at(mv.to).is_some() {
            return true;
        }
        matches!(
            self.board.piece_at(mv.from),
            Some(p) if p.kind == PieceKind::Pawn && file_of(mv.from) != file_of(mv.to)
        )
    }

    #[inline]
    fn annotate_promotion(&self, piece: Piece, from: Square, to: Square) -> ChessMove {
        let last_rank = match piece.color {
            Color::White => 7,
            Color::Black => 0,
        };
        if piece.kind == PieceKind::Pawn && rank_of(to) == last_rank {
            ChessMove::with_promotion(from, to, PieceKind::Queen)
        } else {
            ChessMove::new(from, to)
        }
    }

    fn would_leave_king_in_check(&mut self, mv: ChessMove, mover_color: Color) -> bool {
        self.apply_unchecked(mv);
        let in_check = is_in_check(&self.board, mover_color);
        self.undo_move();
        in_check
    }

    fn castling_is_legal(&self, color: Color, king_to: Square) -> bool {
        let back_rank = match color {
            Color::White => 0u8,
            Color::Black => 7u8,
        };
        let king_from = square_at(back_rank, 4);
        let kingside = file_of(king_to) == 6;

        let right = match (color, kingside) {
            (Color::White, true) => CASTLE_WHITE_KINGSIDE,
            (Color::White, false) => CASTLE_WHITE_QUEENSIDE,
            (Color::Black, true) => CASTLE_BLACK_KINGSIDE,
            (Color::Black, false) => CASTLE_BLACK_QUEENSIDE,
        };
        let rook_home = square_at(back_rank, if kingside { 7 } else { 0 });
        let path_files: &[u8] = if kingside { &[5, 6] } else { &[1, 2, 3] };
        let transit_file = if kingside { 5u8 } else { 3u8 };

        if (self.state.castling_rights & right) == 0 {
            return false;
        }

        // The rook must actually be home.
        if !matches!(
            self.board.piece_at(rook_home),
            Some(p) if p.kind == PieceKind::Rook && p.color == color
        ) {
            return false;
        }

        // Path between king and rook must be empty.
        for &file in path_files {
            if !self.board.is_empty_square(square_at(back_rank, file)) {
                return false;
            }
        }

        // The king may not castle out of, through, or into attack.
        let enemy = color.opposite();
        if is_square_attacked(&self.board, king_from, enemy) {
            return false;
        }
        if is_square_attacked(&self.board, square_at(back_rank, transit_file), enemy) {
            return false;
        }
        if is_square_attacked(&self.board, king_to, enemy) {
            return false;
        }

        true
    }

    /// Apply a move assumed legal, in the fixed make order. Pushes one
    /// record and one hash-history entry.
    pub(crate) fn apply_unchecked(&mut self, mv: ChessMove) {
        let Some(moving) = self.board.piece_at(mv.from) else {
            debug_assert!(false, "apply_unchecked on empty from-square {}", mv.from);
            return;
        };

        let prev_state = self.state.clone();
        let prev_hash = self.hash;

        let mut captured_piece = self.board.piece_at(mv.to);
        let mut captured_square = mv.to;

        // En passant removes the pawn behind the target square.
        if moving.kind == PieceKind::Pawn
            && captured_piece.is_none()
            && self.state.en_passant_target == Some(mv.to)
            && file_of(mv.from) != file_of(mv.to)
        {
            let behind = match moving.color {
                Color::White => shift(mv.to, -1, 0),
                Color::Black => shift(mv.to, 1, 0),
            };
            if let Some(victim_sq) = behind {
                captured_piece = self.board.piece_at(victim_sq);
                captured_square = victim_sq;
                self.board.clear(victim_sq);
            }
        }

        // A two-file king move carries the rook along.
        let mut rook_move = None;
        if moving.kind == PieceKind::King {
            let d_file = file_of(mv.to) as i8 - file_of(mv.from) as i8;
            let back_rank = rank_of(mv.from);
            if d_file == 2 {
                rook_move = Some(RookMove {
                    from: square_at(back_rank, 7),
                    to: square_at(back_rank, 5),
                });
            } else if d_file == -2 {
                rook_move = Some(RookMove {
                    from: square_at(back_rank, 0),
                    to: square_at(back_rank, 3),
                });
            }
            if let Some(rm) = rook_move {
                if let Some(rook) = self.board.piece_at(rm.from) {
                    self.board.set_piece(rm.to, rook);
                    self.board.clear(rm.from);
                }
            }
        }

        self.board.set_piece(mv.to, moving);
        self.board.clear(mv.from);

        // En-passant target exists only right after a double pawn push.
        let (d_rank, _) = crate::board::square::delta(mv.from, mv.to);
        self.state.en_passant_target = if moving.kind == PieceKind::Pawn && d_rank.abs() == 2 {
            Some((mv.from + mv.to) / 2)
        } else {
            None
        };

        self.revoke_castling_rights(moving, mv.from, mv.to);

        if moving.kind == PieceKind::Pawn || captured_piece.is_some() {
            self.state.halfmove_clock = 0;
        } else {
            self.state.halfmove_clock = self.state.halfmove_clock.saturating_add(1);
        }

        // Promotion replaces the pawn; Queen when no kind was requested.
        let mut promotion = None;
        let last_rank = match moving.color {
            Color::White => 7,
            Color::Black => 0,
        };
        if moving.kind == PieceKind::Pawn && rank_of(mv.to) == last_rank {
            let kind = match mv.promotion {
                Some(PieceKind::Knight) => PieceKind::Knight,
                Some(PieceKind::Bishop) => PieceKind::Bishop,
                Some(PieceKind::Rook) => PieceKind::Rook,
                _ => PieceKind::Queen,
            };
            self.board.set_piece(mv.to, Piece::new(kind, moving.color));
            promotion = Some(kind);
        }

        self.state.side_to_move = moving.color.opposite();
        if moving.color == Color::Black {
            self.state.fullmove_number = self.state.fullmove_number.saturating_add(1);
        }

        self.hash = compute_hash(&self.board, &self.state);
        self.hash_history.push(self.hash);

        self.log.push(MoveRecord {
            from: mv.from,
            to: mv.to,
            moved_piece: moving,
            captured_piece,
            captured_square,
            rook_move,
            promotion,
            prev_state,
            prev_hash,
        });
    }

    fn revoke_castling_rights(&mut self, moving: Piece, from: Square, to: Square) {
        if moving.kind == PieceKind::King {
            let both = match moving.color {
                Color::White => CASTLE_WHITE_KINGSIDE | CASTLE_WHITE_QUEENSIDE,
                Color::Black => CASTLE_BLACK_KINGSIDE | CASTLE_BLACK_QUEENSIDE,
            };
            self.state.castling_rights &= !both;
        }

        if moving.kind == PieceKind::Rook {
            self.state.castling_rights &= !right_for_rook_home(from);
        }

        // Capturing a rook on its home square also kills the right.
        self.state.castling_rights &= !right_for_rook_home(to);
    }
}

#[inline]
fn right_for_rook_home(square: Square) -> u8 {
    match square {
        0 => CASTLE_WHITE_QUEENSIDE,
        7 => CASTLE_WHITE_KINGSIDE,
        56 => CASTLE_BLACK_QUEENSIDE,
        63 => CASTLE_BLACK_KINGSIDE,
        _ => 0,
    }
}
