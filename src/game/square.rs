//! Squares of the board and the fixed displacement tables pieces move along.
//!
//! Squares use (row, col) coordinates where row 0 is rank 8 (Black's back rank)
//! and col 0 is the a-file.
use std::str::FromStr;

use thiserror::Error;

/// A square on the board, always within bounds.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}
impl Square {
    pub const A1: Self = Self::new(7, 0);
    pub const C1: Self = Self::new(7, 2);
    pub const D1: Self = Self::new(7, 3);
    pub const E1: Self = Self::new(7, 4);
    pub const F1: Self = Self::new(7, 5);
    pub const G1: Self = Self::new(7, 6);
    pub const H1: Self = Self::new(7, 7);
    pub const A8: Self = Self::new(0, 0);
    pub const C8: Self = Self::new(0, 2);
    pub const D8: Self = Self::new(0, 3);
    pub const E8: Self = Self::new(0, 4);
    pub const F8: Self = Self::new(0, 5);
    pub const G8: Self = Self::new(0, 6);
    pub const H8: Self = Self::new(0, 7);

    /// Creates a square from its row and column.
    /// # Panics
    /// Panics if either coordinate is outside `0..8`. Callers only ever pass
    /// coordinates that were already bounds checked.
    #[inline]
    pub const fn new(row: u8, col: u8) -> Self {
        assert!(row < 8 && col < 8, "square coordinates out of bounds");
        Self { row, col }
    }

    /// Creates a square from signed coordinates, returning `None` when they
    /// fall off the board.
    #[inline]
    pub const fn try_new(row: i8, col: i8) -> Option<Self> {
        if row >= 0 && row < 8 && col >= 0 && col < 8 {
            Some(Self {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    #[inline]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[inline]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the square reached by applying a delta, if still on the board.
    #[inline]
    pub const fn offset(self, delta: Delta) -> Option<Self> {
        Self::try_new(self.row as i8 + delta.rows, self.col as i8 + delta.cols)
    }

    /// Iterates over the squares met when walking from this square (excluded)
    /// along `delta` until the edge of the board.
    pub fn ray(self, delta: Delta) -> impl Iterator<Item = Square> {
        std::iter::successors(self.offset(delta), move |sq| sq.offset(delta))
    }

    /// Iterates over all 64 squares, row by row starting from rank 8.
    pub fn iter() -> impl Iterator<Item = Square> {
        (0..8).flat_map(|row| (0..8).map(move |col| Square::new(row, col)))
    }
}
impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", (b'a' + self.col) as char, 8 - self.row)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("Invalid square: {0:?}")]
pub struct SquareParseError(pub String);

impl FromStr for Square {
    type Err = SquareParseError;

    /// Parses a square from its algebraic name, such as `e4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || SquareParseError(s.to_string());
        let &[file, rank] = s.as_bytes() else {
            return Err(err());
        };
        let col = file.to_ascii_lowercase().wrapping_sub(b'a');
        let rank = rank.wrapping_sub(b'1');
        if col >= 8 || rank >= 8 {
            return Err(err());
        }
        Ok(Square::new(7 - rank, col))
    }
}

/// A displacement on the board, in rows and columns.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct Delta {
    pub rows: i8,
    pub cols: i8,
}
impl Delta {
    pub const fn new(rows: i8, cols: i8) -> Self {
        Self { rows, cols }
    }
}

/// The four rook directions.
pub const ORTHOGONALS: [Delta; 4] = [
    Delta::new(-1, 0),
    Delta::new(1, 0),
    Delta::new(0, -1),
    Delta::new(0, 1),
];

/// The four bishop directions.
pub const DIAGONALS: [Delta; 4] = [
    Delta::new(-1, -1),
    Delta::new(-1, 1),
    Delta::new(1, -1),
    Delta::new(1, 1),
];

pub const KNIGHT_DELTAS: [Delta; 8] = [
    Delta::new(-2, -1),
    Delta::new(-2, 1),
    Delta::new(-1, -2),
    Delta::new(-1, 2),
    Delta::new(1, -2),
    Delta::new(1, 2),
    Delta::new(2, -1),
    Delta::new(2, 1),
];

pub const KING_DELTAS: [Delta; 8] = [
    Delta::new(-1, -1),
    Delta::new(-1, 0),
    Delta::new(-1, 1),
    Delta::new(0, -1),
    Delta::new(0, 1),
    Delta::new(1, -1),
    Delta::new(1, 0),
    Delta::new(1, 1),
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn algebraic_names() {
        assert_eq!(Square::E1.to_string(), "e1");
        assert_eq!(Square::A8.to_string(), "a8");
        assert_eq!("e4".parse::<Square>(), Ok(Square::new(4, 4)));
        assert_eq!("H8".parse::<Square>(), Ok(Square::H8));
        assert!("i1".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
        assert!("e".parse::<Square>().is_err());
        assert!("e44".parse::<Square>().is_err());
    }

    #[test]
    fn offsets_stop_at_the_edge() {
        assert_eq!(Square::A1.offset(Delta::new(1, 0)), None);
        assert_eq!(Square::A1.offset(Delta::new(0, -1)), None);
        assert_eq!(Square::A1.offset(Delta::new(-1, 1)), Some(Square::new(6, 1)));
        assert_eq!(Square::try_new(8, 0), None);
        assert_eq!(Square::try_new(-1, 3), None);
    }

    #[test]
    fn rays_walk_to_the_edge() {
        let ray: Vec<_> = Square::A1.ray(Delta::new(-1, 1)).collect();
        assert_eq!(ray.len(), 7);
        assert_eq!(ray.last(), Some(&Square::H8));
        assert_eq!(Square::H1.ray(Delta::new(0, 1)).count(), 0);
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_square_panics() {
        let _ = Square::new(3, 8);
    }

    #[test]
    fn iterates_all_squares() {
        assert_eq!(Square::iter().count(), 64);
        assert_eq!(Square::iter().next(), Some(Square::A8));
    }
}
