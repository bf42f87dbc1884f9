use crate::game::{
    board::Board,
    castling_rights::CastlingRights,
    colour::Colour,
    moves::Move,
    piece::PieceKind,
    square::Square,
    state::{GameState, GameStatus},
};

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn play(state: &mut GameState, moves: &[&str]) {
    for mv in moves {
        let found = state
            .find_move(sq(&mv[0..2]), sq(&mv[2..4]))
            .unwrap_or_else(|| panic!("{mv} should be legal in\n{state}"));
        state.make_move(found).unwrap();
    }
}

fn setup(diagram: &str, side: Colour, rights: CastlingRights) -> GameState {
    GameState::setup(diagram.parse::<Board>().unwrap(), side, rights, None).unwrap()
}

/// Plays and takes back every legal move, recursively, checking that the
/// position is restored each time.
fn assert_round_trips(state: &mut GameState, depth: u8) {
    if depth == 0 {
        return;
    }
    for mv in state.legal_moves() {
        let before = state.clone();
        state.make_move(mv).unwrap();
        assert_round_trips(state, depth - 1);
        assert_eq!(state.undo_move(), Some(mv));
        assert_eq!(*state, before, "{mv} was not taken back properly");
    }
}

#[test]
fn make_undo_round_trip() {
    assert_round_trips(&mut GameState::new(), 3);
    assert_round_trips(
        &mut setup(
            "r...k..r p.ppqpb. bn..pnp. ...PN... .p..P... ..N..Q.p PPPBBPPP R...K..R",
            Colour::White,
            CastlingRights::full(),
        ),
        2,
    );
    // Promotions, with and without capture, for both sides.
    assert_round_trips(
        &mut setup(
            ".n..k... P......p ........ ........ ........ ........ p......P ....K.N.",
            Colour::White,
            CastlingRights::none(),
        ),
        2,
    );
}

#[test]
fn initial_position_has_twenty_legal_moves() {
    let mut state = GameState::new();
    assert_eq!(state.legal_moves().len(), 20);
}

#[test]
fn en_passant_window_lasts_one_move() {
    let mut state = GameState::new();
    play(&mut state, &["e2e4"]);
    assert_eq!(state.en_passant(), Some(sq("e3")));
    play(&mut state, &["g8f6"]);
    assert_eq!(state.en_passant(), None);
    play(&mut state, &["e4e5", "d7d5"]);
    assert_eq!(state.en_passant(), Some(sq("d6")));
    assert!(state.find_move(sq("e5"), sq("d6")).is_some_and(|mv| mv.is_en_passant()));

    // Declining the capture closes the window for good.
    play(&mut state, &["a2a3", "a7a6"]);
    assert_eq!(state.en_passant(), None);
    let late = state.find_move(sq("e5"), sq("d6"));
    assert!(late.is_none());

    // Taking moves back reopens it exactly.
    state.undo_move();
    state.undo_move();
    assert_eq!(state.en_passant(), Some(sq("d6")));
}

#[test]
fn en_passant_capture_removes_the_pawn() {
    let mut state = GameState::new();
    play(&mut state, &["e2e4", "a7a6", "e4e5", "f7f5", "e5f6"]);
    assert!(state.board().is_empty(sq("f5")));
    let captured = state.last_move().and_then(|mv| mv.captured());
    assert_eq!(captured.map(|piece| piece.kind), Some(PieceKind::Pawn));
}

#[test]
fn castling_rights_are_lost_for_good() {
    let mut state = setup(
        "r...k..r pppppppp ........ ........ ........ ........ PPPPPPPP R...K..R",
        Colour::White,
        CastlingRights::full(),
    );
    let castles = |state: &mut GameState| {
        state
            .legal_moves()
            .iter()
            .filter(|mv| mv.is_castle())
            .count()
    };
    assert_eq!(castles(&mut state), 2);

    // The rook goes away and comes back: kingside castling stays forbidden.
    play(&mut state, &["h1g1", "a8b8", "g1h1", "b8a8"]);
    assert_eq!(state.castling_rights().to_string(), "Qk");
    assert_eq!(castles(&mut state), 1);

    // Same for the king.
    play(&mut state, &["e1f1", "e8f8", "f1e1", "f8e8"]);
    assert_eq!(state.castling_rights(), CastlingRights::none());
    assert_eq!(castles(&mut state), 0);

    // Undo restores every right.
    for _ in 0..8 {
        state.undo_move();
    }
    assert_eq!(state.castling_rights(), CastlingRights::full());
    assert_eq!(castles(&mut state), 2);
}

#[test]
fn capturing_a_rook_on_its_corner_revokes_castling() {
    let mut state = setup(
        "r...k..r ........ ........ ........ ........ ........ ......b. R...K..R",
        Colour::Black,
        CastlingRights::full(),
    );
    play(&mut state, &["g2h1"]);
    assert_eq!(state.castling_rights().to_string(), "Qkq");
    state.undo_move();
    assert_eq!(state.castling_rights(), CastlingRights::full());
}

#[test]
fn castling_through_check_is_illegal() {
    let mut state = setup(
        "....kr.. ........ ........ ........ ........ ........ ........ R...K..R",
        Colour::White,
        CastlingRights::full(),
    );
    assert!(state.find_move(Square::E1, Square::G1).is_none());
    assert!(state
        .find_move(Square::E1, Square::C1)
        .is_some_and(|mv| mv.is_castle()));
}

#[test]
fn fools_mate() {
    let mut state = GameState::new();
    play(&mut state, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert!(state.legal_moves().is_empty());
    assert!(state.is_in_check(Colour::White));
    assert_eq!(
        state.status(),
        GameStatus::Checkmate {
            winner: Colour::Black
        }
    );
    assert_eq!(state.status().to_string(), "Checkmate - Black wins");
}

#[test]
fn stalemate() {
    let mut state = setup(
        ".......k ........ ......QK ........ ........ ........ ........ ........",
        Colour::Black,
        CastlingRights::none(),
    );
    assert!(state.legal_moves().is_empty());
    assert!(!state.is_in_check(Colour::Black));
    assert_eq!(state.status(), GameStatus::Stalemate);
}

#[test]
fn reaching_stalemate_by_a_move() {
    let mut state = setup(
        ".......k ........ .......K ........ ........ ........ ........ ......Q.",
        Colour::White,
        CastlingRights::none(),
    );
    assert_eq!(state.status(), GameStatus::Idle);
    play(&mut state, &["g1g6"]);
    assert_eq!(state.status(), GameStatus::Stalemate);
}

#[test]
fn kings_are_never_captured() {
    // White to move with Black's king already in check, so Qxe8 is
    // pseudo-legal; then Black to move with the king next to the queen.
    let mut state = setup(
        "....k... ........ ........ ........ ........ ........ ........ ....QK..",
        Colour::White,
        CastlingRights::none(),
    );
    let mut positions = vec![state.clone()];
    play(&mut state, &["e1e7"]);
    positions.push(state.clone());
    for mut position in positions {
        assert!(position
            .legal_moves()
            .iter()
            .all(|mv| mv.captured().map(|piece| piece.kind) != Some(PieceKind::King)));
    }
}

#[test]
fn king_capturing_candidates_are_dropped() {
    // A position where the side to move could take the enemy king: the capture
    // is never offered.
    let mut state = setup(
        "....k... ....Q... ........ ........ ........ ........ ........ .....K..",
        Colour::White,
        CastlingRights::none(),
    );
    assert!(state.find_move(sq("e7"), Square::E8).is_none());
    assert!(!state.legal_moves().is_empty());
}

#[test]
fn move_log_and_notation() {
    let mut state = GameState::new();
    play(&mut state, &["e2e4", "e7e5", "g1f3"]);
    let log: Vec<String> = state.move_log().map(Move::to_algebraic).collect();
    assert_eq!(log, ["e2e4", "e7e5", "g1f3"]);
    state.undo_move();
    assert_eq!(state.move_log().len(), 2);
}

#[test]
fn undo_on_empty_log_is_a_no_op() {
    let mut state = GameState::new();
    assert_eq!(state.undo_move(), None);
    assert_eq!(state, GameState::new());
}
