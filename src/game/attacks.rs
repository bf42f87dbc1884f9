//! Attack detection, independent of whose turn it is.
//!
//! This does not go through move generation: it scans outward from the
//! attacked square and looks for a piece able to reach it, which is enough for
//! check detection and castling path safety.

use super::{
    board::Board,
    colour::Colour,
    piece::{Piece, PieceKind},
    square::{Delta, Square, DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS},
};

/// Checks if any piece of colour `by` attacks `square`.
pub fn is_attacked(square: Square, by: Colour, board: &Board) -> bool {
    let holds = |sq: Square, kind: PieceKind| board.get(sq) == Some(Piece::new(kind, by));

    // A pawn attacks diagonally forward, so an attacking pawn stands one row
    // behind the target from its own point of view.
    let pawn_attack = [-1, 1].into_iter().any(|cols| {
        square
            .offset(Delta::new(-by.forward(), cols))
            .is_some_and(|sq| holds(sq, PieceKind::Pawn))
    });

    pawn_attack
        || leaper_attack(square, &KNIGHT_DELTAS, |sq| holds(sq, PieceKind::Knight))
        || leaper_attack(square, &KING_DELTAS, |sq| holds(sq, PieceKind::King))
        || slider_attack(square, by, &DIAGONALS, board, PieceKind::is_diagonal_slider)
        || slider_attack(square, by, &ORTHOGONALS, board, PieceKind::is_orthogonal_slider)
}

fn leaper_attack(square: Square, deltas: &[Delta], holds: impl Fn(Square) -> bool) -> bool {
    deltas
        .iter()
        .filter_map(|&delta| square.offset(delta))
        .any(holds)
}

/// Walks each ray until the first occupied square, which attacks `square` only
/// if it is an enemy slider moving along that kind of ray.
fn slider_attack(
    square: Square,
    by: Colour,
    directions: &[Delta],
    board: &Board,
    moves_along: fn(PieceKind) -> bool,
) -> bool {
    directions.iter().any(|&delta| {
        square
            .ray(delta)
            .find_map(|sq| board.get(sq))
            .is_some_and(|piece| piece.colour == by && moves_along(piece.kind))
    })
}
