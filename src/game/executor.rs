//! Playing and taking back moves on a [`GameState`].
//!
//! [`GameState::apply`] records everything a move destroys in a
//! [`HistoryEntry`], which [`GameState::undo`] uses to restore the position
//! exactly. Neither checks legality; they are the building blocks of both the
//! legality filter and committed moves.

use super::{
    history::HistoryEntry,
    moves::Move,
    piece::{Piece, PieceKind},
    state::GameState,
};

impl GameState {
    /// Plays a move on the board, updating castling rights, en passant target
    /// and side to move.
    ///
    /// Promotions always produce a queen; see
    /// [`GameState::finalize_promotion`] for other pieces.
    pub(crate) fn apply(&mut self, mv: Move) {
        self.history.push(HistoryEntry {
            played: mv,
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
        });

        let board = &mut self.board;
        board.set(mv.start(), None);
        // En passant captures a pawn that is not on the end square.
        if let Some(captured_on) = mv.capture_square() {
            board.set(captured_on, None);
        }
        let landing = if mv.is_promotion() {
            Piece::new(PieceKind::Queen, mv.piece().colour)
        } else {
            mv.piece()
        };
        board.set(mv.end(), Some(landing));
        if let Some((rook_origin, rook_target)) = mv.rook_relocation() {
            let rook = board.set(rook_origin, None);
            board.set(rook_target, rook);
        }

        self.en_passant = mv.skipped_square();
        self.castling_rights.revoke_for(&mv);
        self.side_to_move.invert();
    }

    /// Undoes the effects of the last move played, restoring the position as it
    /// was prior to the move.
    ///
    /// If no moves were played prior to calling this function, nothing happens.
    pub(crate) fn undo(&mut self) -> Option<Move> {
        let HistoryEntry {
            played,
            castling_rights,
            en_passant,
        } = self.history.pop()?;

        let board = &mut self.board;
        if let Some((rook_origin, rook_target)) = played.rook_relocation() {
            let rook = board.set(rook_target, None);
            board.set(rook_origin, rook);
        }
        board.set(played.end(), None);
        if let Some(captured_on) = played.capture_square() {
            board.set(captured_on, played.captured());
        }
        // The recorded piece is the pawn for promotions, whatever it became.
        board.set(played.start(), Some(played.piece()));

        self.castling_rights = castling_rights;
        self.en_passant = en_passant;
        self.side_to_move = played.piece().colour;

        Some(played)
    }
}
