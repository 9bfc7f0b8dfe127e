use super::*;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn fen(s: &str) -> Position {
    Position::from_fen(s).unwrap()
}

fn play(pos: &mut Position, from: &str, to: &str) -> MoveOutcome {
    apply(pos, sq(from), sq(to), None).unwrap()
}

#[test]
fn test_quiet_move_relocates_and_counts() {
    let mut pos = Position::startpos();
    let out = play(&mut pos, "g1", "f3");

    assert!(pos.piece_at(sq("g1")).is_none());
    let knight = pos.piece_at(sq("f3")).unwrap();
    assert_eq!(knight.kind, PieceKind::Knight);
    assert_eq!(knight.move_count, 1);
    assert_eq!(pos.side_to_move(), Side::Black);
    assert_eq!(pos.halfmove_clock(), 1);
    assert_eq!(pos.fullmove_number(), 1);

    assert!(!out.is_capture());
    assert_eq!(out.castle, None);
    assert!(!out.en_passant);
    assert_eq!(out.promotion, None);
    assert_eq!(out.piece.move_count, 0);
}

#[test]
fn test_capture_overwrites_target() {
    let mut pos = fen("4k3/8/8/8/2p5/3P4/8/4K3 w - - 5 9");
    let out = play(&mut pos, "d3", "c4");
    assert_eq!(out.captured.unwrap().kind, PieceKind::Pawn);
    assert_eq!(out.captured.unwrap().side, Side::Black);
    assert_eq!(pos.piece_at(sq("c4")).unwrap().side, Side::White);
    assert_eq!(pos.pieces(Side::Black).count(), 1);
    assert_eq!(pos.halfmove_clock(), 0);
}

#[test]
fn test_illegal_move_leaves_position_untouched() {
    let mut pos = Position::startpos();
    let before = pos.clone();

    let err = apply(&mut pos, sq("e2"), sq("e5"), None).unwrap_err();
    assert_eq!(
        err,
        ChessError::IllegalMove {
            from: sq("e2"),
            to: sq("e5")
        }
    );
    assert_eq!(
        apply(&mut pos, sq("e4"), sq("e5"), None),
        Err(ChessError::EmptySquare(sq("e4")))
    );
    assert!(matches!(
        apply(&mut pos, sq("e7"), sq("e5"), None),
        Err(ChessError::WrongSide { .. })
    ));
    assert_eq!(pos, before);
}

#[test]
fn test_kingside_castle_moves_rook() {
    let mut pos = fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let out = play(&mut pos, "e1", "g1");

    assert_eq!(out.castle, Some(CastleSide::King));
    assert!(!out.is_capture());
    assert!(pos.piece_at(sq("e1")).is_none());
    assert!(pos.piece_at(sq("h1")).is_none());
    assert_eq!(pos.piece_at(sq("g1")).unwrap().kind, PieceKind::King);
    let rook = pos.piece_at(sq("f1")).unwrap();
    assert_eq!(rook.kind, PieceKind::Rook);
    assert_eq!(rook.move_count, 1);
    assert_eq!(pos.side_to_move(), Side::Black);
}

#[test]
fn test_queenside_castle_moves_rook() {
    let mut pos = fen("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
    let out = play(&mut pos, "e8", "c8");

    assert_eq!(out.castle, Some(CastleSide::Queen));
    assert!(pos.piece_at(sq("a8")).is_none());
    assert!(pos.piece_at(sq("e8")).is_none());
    assert_eq!(pos.piece_at(sq("c8")).unwrap().kind, PieceKind::King);
    assert_eq!(pos.piece_at(sq("d8")).unwrap().kind, PieceKind::Rook);
    assert_eq!(pos.fullmove_number(), 2);
}

#[test]
fn test_en_passant_removes_passed_pawn() {
    let mut pos = fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2");
    let out = play(&mut pos, "e5", "d6");

    assert!(out.en_passant);
    assert_eq!(out.captured.unwrap().kind, PieceKind::Pawn);
    assert!(pos.piece_at(sq("d5")).is_none());
    assert!(pos.piece_at(sq("e5")).is_none());
    assert_eq!(pos.piece_at(sq("d6")).unwrap().side, Side::White);
    assert_eq!(pos.pieces(Side::Black).count(), 1);
}

#[test]
fn test_promotion_requires_and_applies_kind() {
    let mut pos = fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1");
    let before = pos.clone();

    assert_eq!(
        apply(&mut pos, sq("a7"), sq("a8"), None),
        Err(ChessError::PromotionRequired(sq("a8")))
    );
    assert_eq!(
        apply(&mut pos, sq("a7"), sq("a8"), Some(PieceKind::King)),
        Err(ChessError::BadPromotion(PieceKind::King))
    );
    assert_eq!(pos, before);

    let out = apply(&mut pos, sq("a7"), sq("a8"), Some(PieceKind::Knight)).unwrap();
    assert_eq!(out.promotion, Some(PieceKind::Knight));
    assert_eq!(out.piece.kind, PieceKind::Pawn);
    let promoted = pos.piece_at(sq("a8")).unwrap();
    assert_eq!(promoted.kind, PieceKind::Knight);
    assert_eq!(promoted.side, Side::White);
    assert_eq!(promoted.move_count, 1);
}

#[test]
fn test_promotion_kind_ignored_for_ordinary_move() {
    let mut pos = Position::startpos();
    let out = apply(&mut pos, sq("e2"), sq("e4"), Some(PieceKind::Queen)).unwrap();
    assert_eq!(out.promotion, None);
    assert_eq!(pos.piece_at(sq("e4")).unwrap().kind, PieceKind::Pawn);
}

#[test]
fn test_plan_lists_castle_edits_in_order() {
    let pos = fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
    let tx = plan(&pos, sq("e1"), sq("c1"), None).unwrap();
    let edits = tx.edits();
    assert_eq!(edits.len(), 4);
    assert_eq!(edits[0], Edit::Clear(sq("a1")));
    assert!(matches!(edits[1], Edit::Put(s, p) if s == sq("d1") && p.kind == PieceKind::Rook));
    assert_eq!(edits[2], Edit::Clear(sq("e1")));
    assert!(matches!(edits[3], Edit::Put(s, p) if s == sq("c1") && p.kind == PieceKind::King));
    assert_eq!(tx.outcome().castle, Some(CastleSide::Queen));
}

#[test]
fn test_double_push_is_recorded() {
    let mut pos = Position::startpos();
    play(&mut pos, "e2", "e4");
    let last = pos.last_move().unwrap();
    assert!(last.is_double_push());
    assert_eq!(last.side, Side::White);
    assert_eq!(pos.en_passant_target(), Some(sq("e3")));

    play(&mut pos, "g8", "f6");
    assert_eq!(pos.en_passant_target(), None);
}

#[test]
fn test_clocks_saturate_instead_of_overflowing() {
    let mut pos = fen("4k3/8/8/8/8/8/8/4K1N1 w - - 4294967295 1");
    play(&mut pos, "g1", "f3");
    assert_eq!(pos.halfmove_clock(), u32::MAX);

    let mut pos = fen("4k3/8/8/8/8/8/8/4K1n1 b - - 0 4294967295");
    play(&mut pos, "g1", "f3");
    assert_eq!(pos.fullmove_number(), u32::MAX);
    assert_eq!(pos.side_to_move(), Side::White);
}
