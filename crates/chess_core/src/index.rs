//! Legal-destination enumeration.
//!
//! Everything here is derived from the validator by brute force: each piece
//! is tried against all 64 squares. The index is a snapshot and is rebuilt
//! after every move, never patched.

use std::collections::BTreeMap;

use tracing::trace;

use crate::board::Position;
use crate::types::*;
use crate::validate::{self, Rules};

/// Squares the piece on `from` may move to, by geometry alone, in square order.
pub fn legal_destinations(pos: &Position, from: Square) -> Vec<Square> {
    Square::all()
        .filter(|&to| validate::is_legal(pos, from, to))
        .collect()
}

/// Like [`legal_destinations`] but filtered through `rules`.
pub fn destinations_under(pos: &Position, from: Square, rules: Rules) -> Vec<Square> {
    Square::all()
        .filter(|&to| rules.is_legal(pos, from, to))
        .collect()
}

/// Per-side map from each piece's square to the squares it can reach.
///
/// Pieces with nowhere to go still get an (empty) entry. Iteration runs in
/// origin-square order and each list is in destination-square order, so two
/// builds of the same position compare equal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegalDestinationIndex {
    side: Side,
    entries: BTreeMap<Square, Vec<Square>>,
}

impl LegalDestinationIndex {
    pub fn build(pos: &Position, side: Side, rules: Rules) -> Self {
        let entries: BTreeMap<Square, Vec<Square>> = pos
            .pieces(side)
            .map(|(from, _)| (from, destinations_under(pos, from, rules)))
            .collect();
        let index = Self { side, entries };
        trace!(%side, pieces = index.entries.len(), moves = index.move_count(), "index rebuilt");
        index
    }

    pub fn side(&self) -> Side {
        self.side
    }

    /// Destinations for the piece on `from`; empty if there is no such piece.
    pub fn destinations(&self, from: Square) -> &[Square] {
        self.entries.get(&from).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = (Square, &[Square])> + '_ {
        self.entries.iter().map(|(&from, tos)| (from, tos.as_slice()))
    }

    /// Number of (origin, destination) pairs.
    pub fn move_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn has_moves(&self) -> bool {
        self.entries.values().any(|tos| !tos.is_empty())
    }
}

/// Every move available to the side to move. A promoting destination
/// expands into one move per promotion kind.
pub fn legal_moves(pos: &Position, rules: Rules) -> Vec<Move> {
    let index = LegalDestinationIndex::build(pos, pos.side_to_move(), rules);
    let mut out = Vec::with_capacity(index.move_count());
    for (from, tos) in index.iter() {
        for &to in tos {
            if validate::is_promotion(pos, from, to) {
                out.extend(
                    PieceKind::PROMOTIONS
                        .iter()
                        .map(|&kind| Move::with_promotion(from, to, kind)),
                );
            } else {
                out.push(Move::new(from, to));
            }
        }
    }
    out
}
