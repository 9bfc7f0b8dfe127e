//! Random move opponent.
//!
//! Picks uniformly among every legal move for the side to move. A promoting
//! pawn move shows up once per promotion kind, so each kind is equally
//! likely.

use chess_core::{Engine, Move, Position, Rules, legal_moves};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::debug;


#[derive(Debug, Clone)]
pub struct RandomEngine {
    rng: StdRng,
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomEngine {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Reproducible move stream for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Engine for RandomEngine {
    fn select_move(&mut self, pos: &Position, rules: Rules) -> Option<Move> {
        let moves = legal_moves(pos, rules);
        let choice = moves.choose(&mut self.rng).copied();
        debug!(
            side = %pos.side_to_move(),
            candidates = moves.len(),
            choice = ?choice.map(|m| m.to_string()),
            "random pick"
        );
        choice
    }

    fn name(&self) -> &str {
        "Random"
    }
}
