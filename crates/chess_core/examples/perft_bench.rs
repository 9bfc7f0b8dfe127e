//! Perft benchmark for profiling index rebuilds with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --example perft_bench -p chess_core -- [depth] [fen]
//!
//! Examples:
//!   # Default: depth 3 over the test positions
//!   cargo flamegraph --example perft_bench -p chess_core
//!
//!   # Custom depth and position
//!   cargo flamegraph --example perft_bench -p chess_core -- 2 "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -"

use std::env;
use std::time::{Duration, Instant};

use chess_core::{Position, Rules, perft};

const TEST_POSITIONS: &[(&str, &str)] = &[
    (
        "Starting position",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "Kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    ),
    ("Position 3", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -"),
    (
        "Position 4",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq -",
    ),
];

fn main() -> Result<(), chess_core::ChessError> {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3);

    if let Some(fen) = args.get(2) {
        let pos = Position::from_fen(fen)?;
        let (nodes, elapsed) = timed(&pos, depth);
        println!("Position: {fen}");
        println!("Depth: {depth}");
        println!("Nodes: {nodes}");
        println!("Time: {elapsed:.3?} ({:.0} nps)", nps(nodes, elapsed));
        return Ok(());
    }

    println!("=== Perft Benchmark Suite ===");
    println!("Depth: {depth}");
    println!();

    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;
    for (name, fen) in TEST_POSITIONS {
        let pos = Position::from_fen(fen)?;
        print!("{name:.<30}");
        let (nodes, elapsed) = timed(&pos, depth);
        total_nodes += nodes;
        total_time += elapsed;
        println!(
            " {nodes:>12} nodes in {elapsed:>8.3?} ({:>10.0} nps)",
            nps(nodes, elapsed)
        );
    }

    println!();
    println!("{:=<70}", "");
    println!(
        "TOTAL: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
        nps(total_nodes, total_time)
    );
    Ok(())
}

fn timed(pos: &Position, depth: u8) -> (u64, Duration) {
    let start = Instant::now();
    let nodes = perft(pos, depth, Rules::standard());
    (nodes, start.elapsed())
}

fn nps(nodes: u64, elapsed: Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}
