//! Pseudo-legal move generation.
//!
//! Moves generated here follow the movement rules of each piece but may leave
//! the mover's own king in check; filtering those out is the job of
//! [`GameState::legal_moves`](super::state::GameState::legal_moves).

use super::{
    attacks::is_attacked,
    board::Board,
    castling_rights::CastlingRights,
    colour::Colour,
    moves::Move,
    piece::{Piece, PieceKind},
    square::{Delta, Square, DIAGONALS, KING_DELTAS, KNIGHT_DELTAS, ORTHOGONALS},
};

/// Generates every pseudo-legal move for `side`, castling moves last.
pub fn pseudo_legal_moves(
    board: &Board,
    side: Colour,
    en_passant: Option<Square>,
    castling_rights: CastlingRights,
) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);

    for (from, piece) in board.pieces().filter(|(_, piece)| piece.colour == side) {
        match piece.kind {
            PieceKind::Pawn => generate_pawn_moves(board, from, side, en_passant, &mut moves),
            PieceKind::Knight => generate_leaper_moves(board, from, side, &KNIGHT_DELTAS, &mut moves),
            PieceKind::Bishop => generate_slider_moves(board, from, side, &DIAGONALS, &mut moves),
            PieceKind::Rook => generate_slider_moves(board, from, side, &ORTHOGONALS, &mut moves),
            PieceKind::Queen => {
                generate_slider_moves(board, from, side, &DIAGONALS, &mut moves);
                generate_slider_moves(board, from, side, &ORTHOGONALS, &mut moves)
            }
            PieceKind::King => generate_leaper_moves(board, from, side, &KING_DELTAS, &mut moves),
        }
    }
    generate_castling_moves(board, side, castling_rights, &mut moves);

    moves
}

fn generate_pawn_moves(
    board: &Board,
    from: Square,
    side: Colour,
    en_passant: Option<Square>,
    moves: &mut Vec<Move>,
) {
    let forward = side.forward();

    if let Some(push) = from.offset(Delta::new(forward, 0)).filter(|&sq| board.is_empty(sq)) {
        moves.extend(Move::new(from, push, board));
        if from.row() == side.pawn_row() {
            if let Some(double_push) = push
                .offset(Delta::new(forward, 0))
                .filter(|&sq| board.is_empty(sq))
            {
                moves.extend(Move::new(from, double_push, board));
            }
        }
    }

    for target in [-1, 1]
        .into_iter()
        .filter_map(|cols| from.offset(Delta::new(forward, cols)))
    {
        if board.colour_on(target) == Some(side.inverse()) {
            moves.extend(Move::new(from, target, board));
        } else if en_passant == Some(target)
            && board.get(Square::new(from.row(), target.col()))
                == Some(Piece::new(PieceKind::Pawn, side.inverse()))
        {
            moves.extend(Move::new_en_passant(from, target, board));
        }
    }
}

/// Knights and kings: a fixed set of target squares.
fn generate_leaper_moves(
    board: &Board,
    from: Square,
    side: Colour,
    deltas: &[Delta],
    moves: &mut Vec<Move>,
) {
    for target in deltas.iter().filter_map(|&delta| from.offset(delta)) {
        if board.colour_on(target) != Some(side) {
            moves.extend(Move::new(from, target, board));
        }
    }
}

/// Bishops, rooks and queens: every empty square along each ray, and the first
/// occupied one if it holds an enemy.
fn generate_slider_moves(
    board: &Board,
    from: Square,
    side: Colour,
    directions: &[Delta],
    moves: &mut Vec<Move>,
) {
    for &delta in directions {
        for target in from.ray(delta) {
            match board.colour_on(target) {
                None => moves.extend(Move::new(from, target, board)),
                Some(colour) => {
                    if colour != side {
                        moves.extend(Move::new(from, target, board));
                    }
                    break;
                }
            }
        }
    }
}

/// Castling requires the right, an empty path between king and rook, and no
/// attacked square among the king's origin, transit and destination.
fn generate_castling_moves(
    board: &Board,
    side: Colour,
    castling_rights: CastlingRights,
    moves: &mut Vec<Move>,
) {
    let row = side.back_row();
    let king = Square::new(row, 4);
    let them = side.inverse();
    let empty = |cols: &[u8]| cols.iter().all(|&col| board.is_empty(Square::new(row, col)));
    let safe = |cols: &[u8]| {
        cols.iter()
            .all(|&col| !is_attacked(Square::new(row, col), them, board))
    };

    if board.king_square(side) != Some(king)
        || !(castling_rights.kingside_castle_allowed(side)
            || castling_rights.queenside_castle_allowed(side))
        || is_attacked(king, them, board)
    {
        return;
    }

    if castling_rights.kingside_castle_allowed(side) && empty(&[5, 6]) && safe(&[5, 6]) {
        moves.extend(Move::new_castle(king, Square::new(row, 6), board));
    }
    if castling_rights.queenside_castle_allowed(side) && empty(&[1, 2, 3]) && safe(&[3, 2]) {
        moves.extend(Move::new_castle(king, Square::new(row, 2), board));
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn board(diagram: &str) -> Board {
        diagram.parse().unwrap()
    }

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn targets_from(moves: &[Move], from: &str) -> Vec<String> {
        let mut targets: Vec<String> = moves
            .iter()
            .filter(|mv| mv.start() == sq(from))
            .map(|mv| mv.end().to_string())
            .collect();
        targets.sort();
        targets
    }

    #[test]
    fn initial_position_has_twenty_moves() {
        let moves = pseudo_legal_moves(&Board::initial(), Colour::White, None, CastlingRights::full());
        assert_eq!(moves.len(), 20);
        assert_eq!(targets_from(&moves, "g1"), ["f3", "h3"]);
        assert_eq!(targets_from(&moves, "e2"), ["e3", "e4"]);
    }

    #[test]
    fn pawn_pushes_and_captures() {
        let board = board("....k... ........ ........ ........ ........ ...p.p.. ....P... ....K...");
        let moves = pseudo_legal_moves(&board, Colour::White, None, CastlingRights::none());
        assert_eq!(targets_from(&moves, "e2"), ["d3", "e3", "e4", "f3"]);

        let blocked = self::board("....k... ........ ........ ........ ....n... ........ ....P... ....K...");
        let moves = pseudo_legal_moves(&blocked, Colour::White, None, CastlingRights::none());
        assert_eq!(targets_from(&moves, "e2"), ["e3"]);
    }

    #[test]
    fn en_passant_needs_an_enemy_pawn_beside() {
        let board = board("....k... ........ ........ ...pP... ........ ........ ........ ....K...");
        let moves = pseudo_legal_moves(&board, Colour::White, Some(sq("d6")), CastlingRights::none());
        let capture = moves.iter().find(|mv| mv.start() == sq("e5") && mv.end() == sq("d6"));
        assert!(capture.is_some_and(Move::is_en_passant));

        let no_pawn = self::board("....k... ........ ........ ....P... ........ ........ ........ ....K...");
        let moves = pseudo_legal_moves(&no_pawn, Colour::White, Some(sq("d6")), CastlingRights::none());
        assert_eq!(targets_from(&moves, "e5"), ["e6"]);
    }

    #[test]
    fn promotions_are_marked() {
        let board = board("r...k... .P...... ........ ........ ........ ........ ........ ....K...");
        let moves = pseudo_legal_moves(&board, Colour::White, None, CastlingRights::none());
        let promotions: Vec<_> = moves.iter().filter(|mv| mv.is_promotion()).collect();
        assert_eq!(promotions.len(), 2);
        assert!(promotions.iter().any(|mv| mv.end() == Square::A8 && mv.is_capture()));
    }

    #[test]
    fn sliders_stop_on_pieces() {
        let board = board("....k... ........ ........ ........ ...p.... ........ ...N.... ...R.K..");
        let moves = pseudo_legal_moves(&board, Colour::White, None, CastlingRights::none());
        assert_eq!(targets_from(&moves, "d1"), ["a1", "b1", "c1", "e1"]);
        let queen = self::board("....k... ........ ........ ........ ........ ........ ........ Q...K...");
        let moves = pseudo_legal_moves(&queen, Colour::White, None, CastlingRights::none());
        assert_eq!(targets_from(&moves, "a1").len(), 7 + 7 + 3);
    }

    #[test]
    fn castling_conditions() {
        let open = board("r...k..r ........ ........ ........ ........ ........ ........ R...K..R");
        let moves = pseudo_legal_moves(&open, Colour::White, None, CastlingRights::full());
        assert_eq!(moves.iter().filter(|mv| mv.is_castle()).count(), 2);

        // Blocked queenside path (b1 only matters for emptiness, not safety).
        let blocked = board("r...k..r ........ ........ ........ ........ ........ ........ RN..K..R");
        let moves = pseudo_legal_moves(&blocked, Colour::White, None, CastlingRights::full());
        let castles: Vec<_> = moves.iter().filter(|mv| mv.is_castle()).collect();
        assert_eq!(castles.len(), 1);
        assert_eq!(castles[0].end(), Square::G1);

        // A rook on f8 covers f1: no kingside castling.
        let covered = board(".....r.k ........ ........ ........ ........ ........ ........ R...K..R");
        let moves = pseudo_legal_moves(&covered, Colour::White, None, CastlingRights::full());
        let castles: Vec<_> = moves.iter().filter(|mv| mv.is_castle()).collect();
        assert_eq!(castles.len(), 1);
        assert_eq!(castles[0].end(), Square::C1);

        // b1 attacked does not prevent queenside castling.
        let b_file = board(".r..k... ........ ........ ........ ........ ........ ........ R...K...");
        let mut queenside_only = CastlingRights::full();
        queenside_only.disallow_kingside_castle(Colour::White);
        let moves = pseudo_legal_moves(&b_file, Colour::White, None, queenside_only);
        assert_eq!(moves.iter().filter(|mv| mv.is_castle()).count(), 1);

        // Not out of check.
        let checked = board("....r..k ........ ........ ........ ........ ........ ........ R...K..R");
        let moves = pseudo_legal_moves(&checked, Colour::White, None, CastlingRights::full());
        assert_eq!(moves.iter().filter(|mv| mv.is_castle()).count(), 0);

        // No rights, no castling.
        let moves = pseudo_legal_moves(&open, Colour::White, None, CastlingRights::none());
        assert_eq!(moves.iter().filter(|mv| mv.is_castle()).count(), 0);
    }
}
