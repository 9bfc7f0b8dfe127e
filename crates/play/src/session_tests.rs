use std::collections::VecDeque;

use chess_core::{Engine, Move, Position, Rules, Side};
use random_engine::RandomEngine;

use crate::commands::Command;
use crate::config::PlayConfig;
use crate::session::{Flow, Session};

/// Plays a fixed list of moves, then resigns by returning `None`.
struct Scripted(VecDeque<Move>);

impl Scripted {
    fn new(moves: &[&str]) -> Self {
        Self(moves.iter().map(|m| m.parse().unwrap()).collect())
    }
}

impl Engine for Scripted {
    fn select_move(&mut self, _pos: &Position, _rules: Rules) -> Option<Move> {
        self.0.pop_front()
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}

fn session(config: PlayConfig, engine: impl Engine + 'static) -> (Session, Vec<u8>) {
    let mut out = Vec::new();
    let mut session = Session::new(&config, Box::new(engine));
    session.start(&mut out).unwrap();
    (session, out)
}

fn send(session: &mut Session, line: &str) -> (Flow, String) {
    let mut out = Vec::new();
    let cmd: Command = line.parse().unwrap();
    let flow = session.handle(cmd, &mut out).unwrap();
    (flow, String::from_utf8(out).unwrap())
}

#[test]
fn test_engine_replies_to_each_move() {
    let (mut s, _) = session(PlayConfig::default(), RandomEngine::seeded(3));
    assert_eq!(s.game().history().len(), 0);

    let (flow, text) = send(&mut s, "e2e4");
    assert_eq!(flow, Flow::Continue);
    assert!(text.contains("you play e2e4"));
    assert!(text.contains("Random plays"));
    assert_eq!(s.game().history().len(), 2);
    assert_eq!(s.game().side_to_move(), Side::White);
}

#[test]
fn test_engine_opens_for_black_player() {
    let config = PlayConfig {
        human_side: Side::Black,
        ..PlayConfig::default()
    };
    let (s, out) = session(config, Scripted::new(&["d2d4"]));
    assert!(String::from_utf8(out).unwrap().contains("Scripted plays d2d4"));
    assert_eq!(s.game().side_to_move(), Side::Black);
}

#[test]
fn test_clicks_play_a_move() {
    let (mut s, _) = session(PlayConfig::default(), Scripted::new(&["e7e5"]));

    let (_, text) = send(&mut s, "e2");
    assert!(text.contains("selected e2, targets: e3 e4"));
    let (_, text) = send(&mut s, "e4");
    assert!(text.contains("you play e2e4"));
    assert!(text.contains("Scripted plays e7e5"));
    assert_eq!(s.game().history().len(), 2);
}

#[test]
fn test_illegal_move_is_reported_not_fatal() {
    let (mut s, _) = session(PlayConfig::default(), Scripted::new(&[]));
    let (flow, text) = send(&mut s, "e2e5");
    assert_eq!(flow, Flow::Continue);
    assert!(text.contains("illegal move e2e5"));
    assert!(s.game().history().is_empty());

    let (_, text) = send(&mut s, "e7e5");
    assert!(text.contains("not the side to move"));
}

#[test]
fn test_moves_lists_destinations() {
    let (mut s, _) = session(PlayConfig::default(), Scripted::new(&[]));
    let (_, text) = send(&mut s, "moves g1");
    assert!(text.contains("f3 h3"));
    let (_, text) = send(&mut s, "moves e4");
    assert!(text.contains("e4 is empty"));
}

#[test]
fn test_checkmate_ends_the_game() {
    let config = PlayConfig {
        human_side: Side::Black,
        ..PlayConfig::default()
    };
    let (mut s, _) = session(config, Scripted::new(&["f2f3", "g2g4", "a2a3"]));
    send(&mut s, "e7e5");
    let (_, text) = send(&mut s, "d8h4");
    assert!(text.contains("checkmate, black wins"));

    let (_, text) = send(&mut s, "h4e1");
    assert!(text.contains("the game is over"));
}

#[test]
fn test_ply_limit_draws() {
    let config = PlayConfig {
        max_plies: 2,
        ..PlayConfig::default()
    };
    let (mut s, _) = session(config, Scripted::new(&["e7e5", "d7d5"]));
    let (_, text) = send(&mut s, "e2e4");
    assert!(text.contains("draw: 2 half-moves played"));
    let (_, text) = send(&mut s, "d2d4");
    assert!(text.contains("the game is over"));
    assert_eq!(s.game().history().len(), 2);
}

#[test]
fn test_new_and_quit() {
    let (mut s, _) = session(PlayConfig::default(), Scripted::new(&["e7e5"]));
    send(&mut s, "e2e4");
    assert_eq!(s.game().history().len(), 2);

    let (_, text) = send(&mut s, "new");
    assert!(text.contains("you play white"));
    assert!(s.game().history().is_empty());

    let (_, text) = send(&mut s, "fen");
    assert!(text.starts_with("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"));
    assert_eq!(send(&mut s, "quit").0, Flow::Quit);
}

#[test]
fn test_result_is_announced_once() {
    let config = PlayConfig {
        human_side: Side::Black,
        ..PlayConfig::default()
    };
    let (mut s, _) = session(config, Scripted::new(&["f2f3", "g2g4"]));
    send(&mut s, "e7e5");
    let (_, text) = send(&mut s, "d8h4");
    assert_eq!(text.matches("checkmate").count(), 1);

    for line in ["board", "fen", "h4e1", "e8e7", "moves h4"] {
        let (_, text) = send(&mut s, line);
        assert!(!text.contains("checkmate"), "{line} repeated the result");
    }
}
