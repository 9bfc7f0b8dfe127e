use crate::{board::Position, execute, index::legal_moves, validate::Rules};

/// Pure perft node count.
/// Counts all positions reachable from `pos` in exactly `depth` plies.
pub fn perft(pos: &Position, depth: u8, rules: Rules) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = legal_moves(pos, rules);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0u64;
    for mv in moves {
        let mut child = pos.clone();
        // Every generated move passed the validator, so apply cannot refuse it.
        if execute::apply(&mut child, mv.from, mv.to, mv.promotion).is_ok() {
            nodes += perft(&child, depth - 1, rules);
        }
    }
    nodes
}
