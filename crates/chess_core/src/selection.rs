//! Two-click move gesture: pick a piece, then pick where it goes.

use crate::board::Position;
use crate::types::*;
use crate::validate::Rules;

/// The piece picked by the first click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selected {
    pub square: Square,
    pub kind: PieceKind,
    pub side: Side,
}

/// What a click did to the gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Idle click on an empty square or an opponent piece.
    Ignored,
    Selected(Square),
    /// Second click on the same square or on a square the piece cannot reach.
    Cancelled,
    /// Second click on a legal destination. The caller applies the move.
    Commit { from: Square, to: Square },
}

/// Ephemeral UI state. `None` is the idle state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionContext {
    selected: Option<Selected>,
}

impl SelectionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<Selected> {
        self.selected
    }

    pub fn is_idle(&self) -> bool {
        self.selected.is_none()
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }

    pub fn click(&mut self, pos: &Position, square: Square, rules: Rules) -> ClickOutcome {
        let Some(sel) = self.selected.take() else {
            return match pos.piece_at(square) {
                Some(pc) if pc.side == pos.side_to_move() => {
                    self.selected = Some(Selected {
                        square,
                        kind: pc.kind,
                        side: pc.side,
                    });
                    ClickOutcome::Selected(square)
                }
                _ => ClickOutcome::Ignored,
            };
        };

        if sel.square != square && rules.is_legal(pos, sel.square, square) {
            ClickOutcome::Commit {
                from: sel.square,
                to: square,
            }
        } else {
            ClickOutcome::Cancelled
        }
    }
}
