//! # Pawnshop
//! A chess rules engine: legal move generation, making and taking back moves,
//! and detection of check, checkmate and stalemate.
//!
//! It is usable as both a library to embed into a chess interface and a
//! standalone binary for playing in the terminal or running perft.
//!
//! ```
//! use pawnshop::game::{state::{GameState, GameStatus}, square::Square};
//!
//! let mut game = GameState::new();
//! for (start, end) in [("f2", "f3"), ("e7", "e5"), ("g2", "g4"), ("d8", "h4")] {
//!     let start: Square = start.parse().unwrap();
//!     let end: Square = end.parse().unwrap();
//!     let mv = game.find_move(start, end).unwrap();
//!     game.make_move(mv).unwrap();
//! }
//! assert!(game.legal_moves().is_empty());
//! assert!(matches!(game.status(), GameStatus::Checkmate { .. }));
//! ```

pub mod game;

#[cfg(test)]
mod tests;
