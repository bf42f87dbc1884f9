//! # Representation of castling rights

use super::{board::Board, colour::Colour, moves::Move, piece::PieceKind, square::Square};

/// Efficient representation of castling rights.
///
/// During play, rights are only ever removed: restoring them on undo is done by
/// putting back the snapshot saved before the move.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CastlingRights(u8);
impl CastlingRights {
    const KINGSIDE_BLACK: u8 = 0b0001;
    const QUEENSIDE_BLACK: u8 = 0b0010;
    const KINGSIDE_WHITE: u8 = 0b0100;
    const QUEENSIDE_WHITE: u8 = 0b1000;
    const FULL: u8 =
        Self::KINGSIDE_BLACK | Self::KINGSIDE_WHITE | Self::QUEENSIDE_BLACK | Self::QUEENSIDE_WHITE;
    const EMPTY: u8 = 0;

    /// Full castling rights for both sides.
    pub const fn full() -> Self {
        Self(Self::FULL)
    }

    /// No castling rights for any sides.
    pub const fn none() -> Self {
        Self(Self::EMPTY)
    }

    /// Returns `true` if none of the sides can castle.
    pub const fn is_none(self) -> bool {
        self.0 == Self::EMPTY
    }

    /// Checks if kingside castling is allowed for a certain colour.
    #[inline(always)]
    pub const fn kingside_castle_allowed(self, colour: Colour) -> bool {
        if colour.is_black() {
            self.0 & Self::KINGSIDE_BLACK != 0
        } else {
            self.0 & Self::KINGSIDE_WHITE != 0
        }
    }

    /// Checks if queenside castling is allowed for a certain colour.
    #[inline(always)]
    pub const fn queenside_castle_allowed(self, colour: Colour) -> bool {
        if colour.is_black() {
            self.0 & Self::QUEENSIDE_BLACK != 0
        } else {
            self.0 & Self::QUEENSIDE_WHITE != 0
        }
    }

    /// Disallows kingside castling for a given side.
    #[inline(always)]
    pub fn disallow_kingside_castle(&mut self, colour: Colour) {
        self.0 &= if colour.is_black() {
            !Self::KINGSIDE_BLACK
        } else {
            !Self::KINGSIDE_WHITE
        }
    }

    /// Disallows queenside castling for a given side.
    #[inline(always)]
    pub fn disallow_queenside_castle(&mut self, colour: Colour) {
        self.0 &= if colour.is_black() {
            !Self::QUEENSIDE_BLACK
        } else {
            !Self::QUEENSIDE_WHITE
        }
    }

    /// Disallows both castling moves for a given side.
    pub fn disallow(&mut self, colour: Colour) {
        self.0 &= if colour.is_black() {
            !(Self::QUEENSIDE_BLACK | Self::KINGSIDE_BLACK)
        } else {
            !(Self::QUEENSIDE_WHITE | Self::KINGSIDE_WHITE)
        }
    }

    /// Removes the rights lost by playing `mv`: moving the king loses both,
    /// and a rook leaving or being captured on its corner loses that side.
    pub fn revoke_for(&mut self, mv: &Move) {
        let piece = mv.piece();
        match piece.kind {
            PieceKind::King => self.disallow(piece.colour),
            PieceKind::Rook => self.revoke_corner(mv.start(), piece.colour),
            _ => (),
        }
        if let Some(captured) = mv.captured() {
            if captured.kind == PieceKind::Rook {
                self.revoke_corner(mv.end(), captured.colour)
            }
        }
    }

    fn revoke_corner(&mut self, square: Square, colour: Colour) {
        if square.row() != colour.back_row() {
            return;
        }
        match square.col() {
            0 => self.disallow_queenside_castle(colour),
            7 => self.disallow_kingside_castle(colour),
            _ => (),
        }
    }

    /// Drops every right whose king or rook is not on its original square.
    pub fn sanitized(mut self, board: &Board) -> Self {
        for colour in [Colour::White, Colour::Black] {
            let row = colour.back_row();
            let holds = |col: u8, kind: PieceKind| {
                board
                    .get(Square::new(row, col))
                    .is_some_and(|piece| piece.kind == kind && piece.colour == colour)
            };
            if !holds(4, PieceKind::King) {
                self.disallow(colour);
            }
            if !holds(7, PieceKind::Rook) {
                self.disallow_kingside_castle(colour);
            }
            if !holds(0, PieceKind::Rook) {
                self.disallow_queenside_castle(colour);
            }
        }
        self
    }
}
impl Default for CastlingRights {
    fn default() -> Self {
        Self::full()
    }
}
impl std::fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_none() {
            return write!(f, "-");
        }

        if self.kingside_castle_allowed(Colour::White) {
            write!(f, "K")?
        }
        if self.queenside_castle_allowed(Colour::White) {
            write!(f, "Q")?
        }
        if self.kingside_castle_allowed(Colour::Black) {
            write!(f, "k")?
        }
        if self.queenside_castle_allowed(Colour::Black) {
            write!(f, "q")?
        }
        Ok(())
    }
}
