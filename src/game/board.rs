//! 8x8 grid of pieces, with the location of each king cached.

use std::str::FromStr;

use thiserror::Error;

use super::{
    colour::{Colour, NUM_COLOURS},
    piece::{Piece, PieceKind, PieceParseError},
    square::Square,
};

/// Errors raised when reading a board diagram.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum BoardParseError {
    #[error("Diagram has {0} rows instead of 8")]
    RowCount(usize),
    #[error("Row {row} has {len} squares instead of 8")]
    RowLength { row: usize, len: usize },
    #[error("Unexpected symbol {symbol:?} in row {row}")]
    UnexpectedSymbol { row: usize, symbol: char },
}

/// Occupancy of every square, plus the square of each king.
///
/// The king cache is maintained by [`Board::set`], so it stays in sync as long
/// as all mutations go through it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
    kings: [Option<Square>; NUM_COLOURS],
}
impl Default for Board {
    /// A board with no pieces.
    fn default() -> Self {
        Self {
            squares: [[None; 8]; 8],
            kings: [None; NUM_COLOURS],
        }
    }
}
impl Board {
    /// A board with no pieces.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The initial arrangement of chess.
    pub fn initial() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Self::empty();
        for colour in [Colour::White, Colour::Black] {
            for (col, kind) in BACK_RANK.into_iter().enumerate() {
                let col = col as u8;
                board.set(
                    Square::new(colour.back_row(), col),
                    Some(Piece::new(kind, colour)),
                );
                board.set(
                    Square::new(colour.pawn_row(), col),
                    Some(Piece::new(PieceKind::Pawn, colour)),
                );
            }
        }
        board
    }

    /// Returns the piece on a square, if any.
    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.row() as usize][square.col() as usize]
    }

    /// Puts a piece on a square (or clears it), returning what was there.
    pub fn set(&mut self, square: Square, piece: Option<Piece>) -> Option<Piece> {
        let slot = &mut self.squares[square.row() as usize][square.col() as usize];
        let previous = std::mem::replace(slot, piece);

        if let Some(Piece {
            kind: PieceKind::King,
            colour,
        }) = previous
        {
            if self.kings[colour as usize] == Some(square) {
                self.kings[colour as usize] = None
            }
        }
        if let Some(Piece {
            kind: PieceKind::King,
            colour,
        }) = piece
        {
            self.kings[colour as usize] = Some(square)
        }

        previous
    }

    /// Returns the square of the king of the given colour.
    #[inline]
    pub fn king_square(&self, colour: Colour) -> Option<Square> {
        self.kings[colour as usize]
    }

    /// Checks if a square is empty.
    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Returns the colour of the piece on a square, if any.
    #[inline]
    pub fn colour_on(&self, square: Square) -> Option<Colour> {
        self.get(square).map(|piece| piece.colour)
    }

    /// Iterates over every occupied square with its piece.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|sq| self.get(sq).map(|piece| (sq, piece)))
    }

    /// Renders the board with rank and file labels, with `perspective`'s pieces
    /// at the bottom.
    pub fn diagram(&self, perspective: Colour) -> String {
        let mut rows: Vec<u8> = (0..8).collect();
        let mut cols: Vec<u8> = (0..8).collect();
        if perspective.is_black() {
            rows.reverse();
            cols.reverse();
        }

        let mut out = String::new();
        for &row in &rows {
            out.push_str(&format!("{} ", 8 - row));
            for &col in &cols {
                out.push(self.get(Square::new(row, col)).map_or('.', Piece::symbol));
                out.push(' ');
            }
            out.push('\n');
        }
        out.push_str("  ");
        for &col in &cols {
            out.push((b'a' + col) as char);
            out.push(' ');
        }
        out
    }
}
impl FromStr for Board {
    type Err = BoardParseError;

    /// Reads a diagram of 8 whitespace-separated rows, rank 8 first, using piece
    /// symbols and `.` for empty squares.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.split_whitespace().collect();
        if rows.len() != 8 {
            return Err(BoardParseError::RowCount(rows.len()));
        }

        let mut board = Self::empty();
        for (row, line) in rows.into_iter().enumerate() {
            let len = line.chars().count();
            if len != 8 {
                return Err(BoardParseError::RowLength { row, len });
            }
            for (col, symbol) in line.chars().enumerate() {
                let piece = match symbol {
                    '.' => None,
                    c => Some(Piece::from_symbol(c).map_err(|PieceParseError| {
                        BoardParseError::UnexpectedSymbol { row, symbol }
                    })?),
                };
                board.set(Square::new(row as u8, col as u8), piece);
            }
        }
        Ok(board)
    }
}
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..8 {
            for col in 0..8 {
                write!(
                    f,
                    "{}",
                    self.get(Square::new(row, col)).map_or('.', Piece::symbol)
                )?
            }
            writeln!(f)?
        }
        Ok(())
    }
}
impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.diagram(Colour::White))
    }
}
