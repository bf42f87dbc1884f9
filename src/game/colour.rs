//! Colours for each players and their pieces.

/// Number of different colours (2).
pub const NUM_COLOURS: usize = 2;

/// Colour enumeration.
#[repr(u8)]
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub enum Colour {
    White = 0,
    Black = 1,
}
impl Colour {
    /// Inverts the colour in place.
    /// # Example
    /// ```
    /// # use pawnshop::game::colour::Colour;
    /// let mut side_to_move = Colour::White;
    /// side_to_move.invert();
    /// assert_eq!(side_to_move, Colour::Black);
    /// ```
    #[inline]
    pub fn invert(&mut self) {
        *self = self.inverse()
    }

    /// Returns the inverse of this colour.
    #[inline]
    pub const fn inverse(&self) -> Self {
        if self.is_black() {
            Colour::White
        } else {
            Colour::Black
        }
    }

    /// Checks if the colour variant is white.
    #[inline]
    pub const fn is_white(&self) -> bool {
        matches!(self, Colour::White)
    }

    /// Checks if the colour variant is black.
    #[inline]
    pub const fn is_black(&self) -> bool {
        matches!(self, Colour::Black)
    }

    /// Row delta of a pawn push for this colour.
    ///
    /// Row 0 is Black's back rank, so White pawns walk towards lower rows.
    #[inline]
    pub const fn forward(&self) -> i8 {
        if self.is_black() {
            1
        } else {
            -1
        }
    }

    /// Row on which pawns of this colour start (and may double push from).
    #[inline]
    pub const fn pawn_row(&self) -> u8 {
        if self.is_black() {
            1
        } else {
            6
        }
    }

    /// Row holding this colour's king and rooks at the start of the game.
    #[inline]
    pub const fn back_row(&self) -> u8 {
        if self.is_black() {
            0
        } else {
            7
        }
    }

    /// Row on which pawns of this colour promote.
    #[inline]
    pub const fn promotion_row(&self) -> u8 {
        self.inverse().back_row()
    }
}
impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", if self.is_black() { "Black" } else { "White" })
    }
}
impl From<bool> for Colour {
    fn from(value: bool) -> Self {
        if value {
            Self::Black
        } else {
            Self::White
        }
    }
}
