pub mod board;
pub mod error;
pub mod execute;
pub mod game;
pub mod index;
pub mod perft;
pub mod selection;
pub mod types;
pub mod validate;

#[cfg(test)]
mod execute_tests;
#[cfg(test)]
mod index_tests;

// Re-export the rule engine surface
pub use board::*;
pub use error::*;
pub use execute::*;
pub use game::*;
pub use index::*;
pub use perft::perft;
pub use selection::*;
pub use types::*;
pub use validate::*;

// =============================================================================
// Engine trait: implemented by every automated opponent
// =============================================================================

/// A move source for one side of the board.
///
/// Implementations only ever see a position and the rules in force; they pick
/// from what the rule engine says is legal and never touch the board.
pub trait Engine: Send {
    /// Picks a move for the side to move, or `None` when it has no legal move.
    /// A promoting move carries its promotion kind.
    fn select_move(&mut self, pos: &Position, rules: Rules) -> Option<Move>;

    /// Returns the engine's display name
    fn name(&self) -> &str;

    /// Reset internal state for a new game
    fn new_game(&mut self) {}
}
