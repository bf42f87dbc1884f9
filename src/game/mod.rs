//! # Chess rules
//! This module contains everything needed to play a game by the rules: the
//! board, move generation, making and taking back moves, and check detection.

pub mod attacks;
pub mod board;
pub mod castling_rights;
pub mod colour;
mod executor;
mod history;
pub mod movegen;
pub mod moves;
#[cfg(feature = "perft")]
pub mod perft;
pub mod piece;
pub mod square;
pub mod state;
