//! Main API to represent and interact with a game of chess.
//!
//! This includes generating legal moves, making and taking back moves, and
//! detecting check, checkmate and stalemate.

use thiserror::Error;

use super::{
    attacks::is_attacked,
    board::Board,
    castling_rights::CastlingRights,
    colour::Colour,
    history::HistoryEntry,
    movegen::pseudo_legal_moves,
    moves::Move,
    piece::{Piece, PieceKind},
    square::{Delta, Square},
};

/// List of moves. Arbitrary setups can exceed the 218 moves of any reachable
/// position, so it is not bounded.
pub type MoveList = Vec<Move>;

/// Where a game stands.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum GameStatus {
    /// No move has been played yet.
    Idle,
    /// The side to move has legal moves.
    InProgress,
    /// The side to move has no legal move and its king is attacked.
    Checkmate { winner: Colour },
    /// The side to move has no legal move but is not in check.
    Stalemate,
}
impl GameStatus {
    /// Returns `true` once the game is over.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Checkmate { .. } | Self::Stalemate)
    }
}
impl std::fmt::Display for GameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Not started"),
            Self::InProgress => write!(f, "In progress"),
            Self::Checkmate { winner } => write!(f, "Checkmate - {winner} wins"),
            Self::Stalemate => write!(f, "Stalemate"),
        }
    }
}

/// Reasons for refusing to play a move.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum MoveError {
    #[error("Illegal move {0}")]
    IllegalMove(Move),
    #[error("The game is over ({0})")]
    InvalidState(GameStatus),
    #[error("The last move played is not a promotion")]
    NoPendingPromotion,
    #[error("Pawns cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),
}

/// Reasons for refusing to set up a position.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum SetupError {
    #[error("{0} has no king")]
    MissingKing(Colour),
    #[error("{0} has more than one king")]
    TooManyKings(Colour),
    #[error("{0} cannot be an en passant target")]
    InvalidEnPassant(Square),
}

/// A game of chess: the board, whose turn it is, and everything needed to
/// take moves back.
///
/// Legality is recomputed from scratch whenever it is needed, by playing each
/// pseudo-legal move, checking the mover's king and taking the move back.
#[derive(Clone, PartialEq, Eq)]
pub struct GameState {
    pub(super) board: Board,
    pub(super) side_to_move: Colour,
    pub(super) en_passant: Option<Square>,
    pub(super) castling_rights: CastlingRights,
    pub(super) history: Vec<HistoryEntry>,
}
impl Default for GameState {
    /// The initial position of chess.
    fn default() -> Self {
        Self {
            board: Board::initial(),
            side_to_move: Colour::White,
            en_passant: None,
            castling_rights: CastlingRights::full(),
            history: Vec::new(),
        }
    }
}
impl GameState {
    /// A new game from the initial position, White to move.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a game from an arbitrary position.
    ///
    /// Castling rights whose king or rook is not on its original square are
    /// dropped.
    /// # Errors
    /// Returns an error unless each side has exactly one king, or if the en
    /// passant target is not an empty square just behind a pawn that could
    /// have double pushed on the previous move.
    pub fn setup(
        board: Board,
        side_to_move: Colour,
        castling_rights: CastlingRights,
        en_passant: Option<Square>,
    ) -> Result<Self, SetupError> {
        for colour in [Colour::White, Colour::Black] {
            let king = Piece::new(PieceKind::King, colour);
            match board.pieces().filter(|&(_, piece)| piece == king).count() {
                0 => return Err(SetupError::MissingKing(colour)),
                1 => (),
                _ => return Err(SetupError::TooManyKings(colour)),
            }
        }
        if let Some(target) = en_passant {
            if !is_en_passant_target(&board, side_to_move, target) {
                return Err(SetupError::InvalidEnPassant(target));
            }
        }

        Ok(Self {
            castling_rights: castling_rights.sanitized(&board),
            board,
            side_to_move,
            en_passant,
            history: Vec::new(),
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the current side to move.
    pub fn side_to_move(&self) -> Colour {
        self.side_to_move
    }

    /// Returns the square a pawn skipped on the last move, if it double pushed.
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    /// Iterates over the moves played so far, oldest first.
    pub fn move_log(&self) -> impl DoubleEndedIterator<Item = &Move> + ExactSizeIterator + '_ {
        self.history.iter().map(|entry| &entry.played)
    }

    /// Returns the last move played, if any.
    pub fn last_move(&self) -> Option<Move> {
        self.history.last().map(|entry| entry.played)
    }

    /// Checks if the king of the given colour is attacked.
    pub fn is_in_check(&self, colour: Colour) -> bool {
        self.board
            .king_square(colour)
            .is_some_and(|king| is_attacked(king, colour.inverse(), &self.board))
    }

    /// Generates all legal moves for the side to move.
    ///
    /// Each candidate is played and taken back in turn, so the position is left
    /// exactly as it was.
    pub fn legal_moves(&mut self) -> MoveList {
        let side = self.side_to_move;
        let candidates =
            pseudo_legal_moves(&self.board, side, self.en_passant, self.castling_rights);

        let mut legal = MoveList::new();
        for mv in candidates {
            if mv.captured().is_some_and(|piece| piece.kind == PieceKind::King) {
                continue;
            }

            self.apply(mv);
            let exposed = self.is_in_check(side);
            self.undo();

            if exposed {
                log::trace!("{mv} leaves the {side} king in check");
                continue;
            }
            legal.push(mv);
        }
        legal
    }

    /// Resolves a pair of squares into the matching legal move, which carries
    /// the right flags for castling, en passant and promotion.
    pub fn find_move(&mut self, start: Square, end: Square) -> Option<Move> {
        self.legal_moves()
            .into_iter()
            .find(|mv| mv.start() == start && mv.end() == end)
    }

    /// Returns the status of the game.
    pub fn status(&mut self) -> GameStatus {
        if self.legal_moves().is_empty() {
            self.terminal_status()
        } else if self.history.is_empty() {
            GameStatus::Idle
        } else {
            GameStatus::InProgress
        }
    }

    /// Status of a position with no legal moves.
    fn terminal_status(&self) -> GameStatus {
        if self.is_in_check(self.side_to_move) {
            GameStatus::Checkmate {
                winner: self.side_to_move.inverse(),
            }
        } else {
            GameStatus::Stalemate
        }
    }

    /// Makes a move on the board, modifying the position.
    ///
    /// The move is matched against the legal moves by its squares, and the
    /// legal move found is the one played.
    /// # Errors
    /// This function returns an error if the game is over or if the move is
    /// illegal, in which case the position is left untouched.
    pub fn make_move(&mut self, mv: Move) -> Result<(), MoveError> {
        let legal = self.legal_moves();
        if legal.is_empty() {
            let status = self.terminal_status();
            log::warn!("Refusing {mv}: {status}");
            return Err(MoveError::InvalidState(status));
        }

        let Some(&resolved) = legal.iter().find(|&&candidate| candidate == mv) else {
            log::warn!("Refusing illegal move {mv}");
            return Err(MoveError::IllegalMove(mv));
        };

        self.apply(resolved);
        log::debug!("{} played {resolved}", resolved.piece().colour);
        Ok(())
    }

    /// Takes back the last move played, returning it.
    ///
    /// If no moves were played, nothing happens.
    pub fn undo_move(&mut self) -> Option<Move> {
        let undone = self.undo();
        if let Some(mv) = undone {
            log::debug!("Took back {mv}");
        }
        undone
    }

    /// Replaces the queen that the last move promoted to with another piece.
    ///
    /// This edits the board directly: taking the move back still turns the
    /// piece back into a pawn, but the chosen piece is not recorded anywhere.
    /// # Errors
    /// Fails if the last move is not a promotion or if `kind` is a pawn or a king.
    pub fn finalize_promotion(&mut self, kind: PieceKind) -> Result<(), MoveError> {
        if !kind.is_valid_promotion_target() {
            return Err(MoveError::InvalidPromotion(kind));
        }
        let Some(promotion) = self.last_move().filter(Move::is_promotion) else {
            return Err(MoveError::NoPendingPromotion);
        };

        let colour = promotion.piece().colour;
        self.board
            .set(promotion.end(), Some(Piece::new(kind, colour)));
        log::debug!("{colour} promoted on {} to {kind:?}", promotion.end());
        Ok(())
    }
}
/// Checks that `target` is the square skipped by a pawn of the side not to
/// move, which must stand right in front of it.
fn is_en_passant_target(board: &Board, side_to_move: Colour, target: Square) -> bool {
    let them = side_to_move.inverse();
    let skipped_row = them.pawn_row() as i8 + them.forward();

    target.row() as i8 == skipped_row
        && board.is_empty(target)
        && target
            .offset(Delta::new(them.forward(), 0))
            .is_some_and(|pawn| board.get(pawn) == Some(Piece::new(PieceKind::Pawn, them)))
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, line) in self.board.to_string().lines().enumerate() {
            write!(f, "{line}  ")?;
            match i {
                1 => writeln!(f, "side to move: {}", self.side_to_move),
                2 => writeln!(
                    f,
                    "en passant: {}",
                    self.en_passant
                        .map_or_else(|| "-".to_string(), |sq| sq.to_string())
                ),
                3 => writeln!(f, "castling rights: {}", self.castling_rights),
                4 => writeln!(f, "moves played: {}", self.history.len()),
                _ => writeln!(f),
            }?
        }
        Ok(())
    }
}
impl std::fmt::Display for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
