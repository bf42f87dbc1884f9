//! # Moves
//! Immutable records of a piece travelling from one square to another, with
//! everything needed to play and take back the move.

use super::{
    board::Board,
    piece::{Piece, PieceKind},
    square::Square,
};

/// Special rules a move is subject to.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum MoveKind {
    /// Regular move or capture.
    Ordinary,
    /// Pawn capture of a pawn that just double pushed, landing behind it.
    EnPassant,
    /// King move of two squares, with the rook jumping over the king.
    Castle,
    /// Pawn move onto the far edge of the board.
    Promotion,
}

/// A move, as generated from a given board.
///
/// Two moves compare equal when their start and end squares match, whatever
/// their piece or flags. Callers that build a move from raw squares should
/// resolve it against the legal moves of the position (see
/// [`GameState::find_move`](super::state::GameState::find_move)) to get the
/// record carrying the right flags.
#[derive(Clone, Copy, Debug)]
pub struct Move {
    start: Square,
    end: Square,
    piece: Piece,
    captured: Option<Piece>,
    kind: MoveKind,
}
impl Move {
    /// Creates a move of the piece on `start` to `end`, capturing whatever
    /// stands on `end`.
    ///
    /// Pawn moves onto the far edge are marked as promotions. Returns `None`
    /// if `start` is empty.
    pub fn new(start: Square, end: Square, board: &Board) -> Option<Self> {
        let piece = board.get(start)?;
        let kind = if piece.kind == PieceKind::Pawn && end.row() == piece.colour.promotion_row() {
            MoveKind::Promotion
        } else {
            MoveKind::Ordinary
        };
        Some(Self {
            start,
            end,
            piece,
            captured: board.get(end),
            kind,
        })
    }

    /// Creates an en passant capture. The captured pawn is the one standing
    /// beside `start`, on the file of `end`.
    pub(crate) fn new_en_passant(start: Square, end: Square, board: &Board) -> Option<Self> {
        let piece = board.get(start)?;
        Some(Self {
            start,
            end,
            piece,
            captured: board.get(Square::new(start.row(), end.col())),
            kind: MoveKind::EnPassant,
        })
    }

    /// Creates a castling move of the king on `start` to `end`.
    pub(crate) fn new_castle(start: Square, end: Square, board: &Board) -> Option<Self> {
        let piece = board.get(start)?;
        Some(Self {
            start,
            end,
            piece,
            captured: None,
            kind: MoveKind::Castle,
        })
    }

    /// Returns the square the move originates from.
    #[inline]
    pub const fn start(&self) -> Square {
        self.start
    }

    /// Returns the square the move targets.
    #[inline]
    pub const fn end(&self) -> Square {
        self.end
    }

    /// Returns the moving piece, as it stood on the start square.
    #[inline]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    /// Returns the captured piece, if any.
    #[inline]
    pub const fn captured(&self) -> Option<Piece> {
        self.captured
    }

    #[inline]
    pub const fn kind(&self) -> MoveKind {
        self.kind
    }

    #[inline]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    pub fn is_en_passant(&self) -> bool {
        self.kind == MoveKind::EnPassant
    }

    #[inline]
    pub fn is_castle(&self) -> bool {
        self.kind == MoveKind::Castle
    }

    #[inline]
    pub fn is_promotion(&self) -> bool {
        self.kind == MoveKind::Promotion
    }

    /// Returns the square of the captured piece, which differs from the end
    /// square for en passant captures.
    pub fn capture_square(&self) -> Option<Square> {
        self.captured?;
        Some(if self.is_en_passant() {
            Square::new(self.start.row(), self.end.col())
        } else {
            self.end
        })
    }

    /// Returns the square skipped by a pawn double push.
    pub fn skipped_square(&self) -> Option<Square> {
        if self.piece.kind == PieceKind::Pawn && self.start.row().abs_diff(self.end.row()) == 2 {
            Some(Square::new(
                (self.start.row() + self.end.row()) / 2,
                self.start.col(),
            ))
        } else {
            None
        }
    }

    /// For castling moves, returns the origin and destination of the rook.
    pub fn rook_relocation(&self) -> Option<(Square, Square)> {
        if !self.is_castle() {
            return None;
        }
        let row = self.end.row();
        Some(if self.end.col() > self.start.col() {
            (Square::new(row, 7), Square::new(row, self.end.col() - 1))
        } else {
            (Square::new(row, 0), Square::new(row, self.end.col() + 1))
        })
    }

    /// Formats the move as its start and end squares, such as `e2e4`.
    pub fn to_algebraic(&self) -> String {
        self.to_string()
    }
}
impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.start == other.start && self.end == other.end
    }
}
impl Eq for Move {}
impl std::hash::Hash for Move {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
    }
}
impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.start, self.end)
    }
}
