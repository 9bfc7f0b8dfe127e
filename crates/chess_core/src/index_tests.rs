use super::*;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn names(squares: &[Square]) -> Vec<String> {
    squares.iter().map(Square::to_string).collect()
}

#[test]
fn test_startpos_destinations() {
    let pos = Position::startpos();
    assert_eq!(names(&legal_destinations(&pos, sq("e2"))), ["e3", "e4"]);
    assert_eq!(names(&legal_destinations(&pos, sq("g1"))), ["f3", "h3"]);
    assert!(legal_destinations(&pos, sq("a1")).is_empty());
    assert!(legal_destinations(&pos, sq("e4")).is_empty());
}

#[test]
fn test_startpos_index() {
    let pos = Position::startpos();
    let index = LegalDestinationIndex::build(&pos, Side::White, Rules::standard());
    assert_eq!(index.side(), Side::White);
    // every piece gets an entry, movable or not
    assert_eq!(index.iter().count(), 16);
    assert_eq!(index.move_count(), 20);
    assert!(index.has_moves());
    assert!(index.destinations(sq("d1")).is_empty());
    assert!(index.destinations(sq("e7")).is_empty());

    let black = LegalDestinationIndex::build(&pos, Side::Black, Rules::standard());
    assert_eq!(black.move_count(), 20);
    assert_eq!(names(black.destinations(sq("b8"))), ["a6", "c6"]);
}

#[test]
fn test_index_is_deterministic() {
    let pos = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    )
    .unwrap();
    let a = LegalDestinationIndex::build(&pos, Side::White, Rules::standard());
    let b = LegalDestinationIndex::build(&pos, Side::White, Rules::standard());
    assert_eq!(a, b);

    let origins: Vec<Square> = a.iter().map(|(from, _)| from).collect();
    assert!(origins.windows(2).all(|w| w[0] < w[1]));
    for (_, tos) in a.iter() {
        assert!(tos.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn test_rules_change_index() {
    // the knight is pinned, so only the king-safety index drops it
    let pos = Position::from_fen("k3r3/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
    let geometric = LegalDestinationIndex::build(&pos, Side::White, Rules::geometric());
    let standard = LegalDestinationIndex::build(&pos, Side::White, Rules::standard());
    assert_eq!(geometric.destinations(sq("e2")).len(), 6);
    assert!(standard.destinations(sq("e2")).is_empty());
}

#[test]
fn test_legal_moves_expand_promotions() {
    let pos = Position::from_fen("7k/P7/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let moves = legal_moves(&pos, Rules::standard());
    let promotions: Vec<&Move> = moves.iter().filter(|m| m.from == sq("a7")).collect();
    assert_eq!(promotions.len(), 4);
    for kind in PieceKind::PROMOTIONS {
        assert!(promotions.iter().any(|m| m.promotion == Some(kind)));
    }
    // king a1 has three steps
    assert_eq!(moves.len(), 7);
}

#[test]
fn test_no_moves_when_stalemated() {
    let pos = Position::from_fen("k7/8/1Q6/8/8/8/8/1K6 b - - 0 1").unwrap();
    assert!(legal_moves(&pos, Rules::standard()).is_empty());
    // geometry alone still lets the king step into attack
    assert!(!legal_moves(&pos, Rules::geometric()).is_empty());
}
