//! Game session: a position, the rules it is played under, what has been
//! played so far and the in-progress click gesture.

use tracing::debug;

use crate::board::Position;
use crate::error::{ChessError, Result};
use crate::execute::{self, MoveOutcome};
use crate::index::{LegalDestinationIndex, destinations_under};
use crate::selection::{ClickOutcome, SelectionContext};
use crate::types::*;
use crate::validate::{self, Rules};

/// Best-effort verdict on the current position.
///
/// Checkmate and stalemate are only told apart when king safety is on; under
/// geometric rules the game instead ends when a king is taken.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate { winner: Side },
    Stalemate,
    KingCaptured { winner: Side },
}

impl GameStatus {
    pub fn is_over(self) -> bool {
        self != GameStatus::Ongoing
    }
}

#[derive(Clone, Debug)]
pub struct Game {
    position: Position,
    rules: Rules,
    history: Vec<MoveOutcome>,
    selection: SelectionContext,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Rules::default())
    }
}

impl Game {
    pub fn new(rules: Rules) -> Self {
        Self::from_position(Position::startpos(), rules)
    }

    pub fn from_position(position: Position, rules: Rules) -> Self {
        Self {
            position,
            rules,
            history: Vec::new(),
            selection: SelectionContext::new(),
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn rules(&self) -> Rules {
        self.rules
    }

    pub fn history(&self) -> &[MoveOutcome] {
        &self.history
    }

    pub fn selection(&self) -> &SelectionContext {
        &self.selection
    }

    pub fn side_to_move(&self) -> Side {
        self.position.side_to_move()
    }

    /// Fresh index for `side` under this game's rules.
    pub fn index(&self, side: Side) -> LegalDestinationIndex {
        LegalDestinationIndex::build(&self.position, side, self.rules)
    }

    pub fn destinations(&self, from: Square) -> Vec<Square> {
        destinations_under(&self.position, from, self.rules)
    }

    /// Plays a move for the side to move after checking it under the
    /// game's rules. A refused move leaves the game unchanged.
    pub fn play(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<MoveOutcome> {
        let piece = self
            .position
            .piece_at(from)
            .ok_or(ChessError::EmptySquare(from))?;
        if piece.side != self.position.side_to_move() {
            return Err(ChessError::WrongSide {
                square: from,
                side: piece.side,
            });
        }
        if !self.rules.is_legal(&self.position, from, to) {
            debug!(%from, %to, "rejected move");
            return Err(ChessError::IllegalMove { from, to });
        }

        let outcome = execute::apply(&mut self.position, from, to, promotion)?;
        self.history.push(outcome);
        self.selection.clear();
        Ok(outcome)
    }

    pub fn play_move(&mut self, mv: Move) -> Result<MoveOutcome> {
        self.play(mv.from, mv.to, mv.promotion)
    }

    /// Feeds one click to the selection gesture and plays the move when the
    /// gesture commits. Pawns reaching the last rank this way become queens.
    pub fn click(&mut self, square: Square) -> Result<ClickOutcome> {
        let outcome = self.selection.click(&self.position, square, self.rules);
        if let ClickOutcome::Commit { from, to } = outcome {
            let promotion = validate::is_promotion(&self.position, from, to)
                .then_some(PieceKind::Queen);
            self.play(from, to, promotion)?;
        }
        Ok(outcome)
    }

    pub fn status(&self) -> GameStatus {
        let mover = self.position.side_to_move();
        if self.position.king_square(mover).is_none() {
            return GameStatus::KingCaptured {
                winner: mover.next(),
            };
        }
        if self.index(mover).has_moves() {
            return GameStatus::Ongoing;
        }

        if self.rules.king_safety && self.position.in_check(mover) {
            GameStatus::Checkmate {
                winner: mover.next(),
            }
        } else {
            GameStatus::Stalemate
        }
    }
}
