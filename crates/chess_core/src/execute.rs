//! Move application.
//!
//! A move is first turned into a [`Transaction`]: every square write it
//! implies, the castling rook and the en-passant victim included. The
//! transaction is built against an unchanged position and only then
//! committed, so a rejected move never leaves a half-applied board.

use tracing::debug;

use crate::board::Position;
use crate::error::{ChessError, Result};
use crate::types::*;
use crate::validate::{self, CastleSide};

/// One raw write to the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edit {
    Clear(Square),
    Put(Square, Piece),
}

/// What a committed move did, for history and notation consumers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    pub from: Square,
    pub to: Square,
    /// The mover as it stood before the move.
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub castle: Option<CastleSide>,
    pub en_passant: bool,
    pub promotion: Option<PieceKind>,
}

impl MoveOutcome {
    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn as_move(&self) -> Move {
        Move {
            from: self.from,
            to: self.to,
            promotion: self.promotion,
        }
    }
}

/// All grid writes for one move, in the order they are applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transaction {
    edits: Vec<Edit>,
    outcome: MoveOutcome,
}

impl Transaction {
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    pub fn outcome(&self) -> &MoveOutcome {
        &self.outcome
    }

    /// Writes every edit, then records the move and hands the turn over.
    pub(crate) fn commit(self, pos: &mut Position) -> MoveOutcome {
        for edit in &self.edits {
            match *edit {
                Edit::Clear(sq) => {
                    pos.clear(sq);
                }
                Edit::Put(sq, piece) => pos.put(sq, piece),
            }
        }

        let out = self.outcome;
        let resets_clock = out.piece.kind == PieceKind::Pawn || out.is_capture();
        // FEN may hand us clocks at u32::MAX; they stick there.
        pos.halfmove_clock = if resets_clock {
            0
        } else {
            pos.halfmove_clock.saturating_add(1)
        };
        if out.piece.side == Side::Black {
            pos.fullmove_number = pos.fullmove_number.saturating_add(1);
        }
        pos.last_move = Some(PlayedMove {
            from: out.from,
            to: out.to,
            kind: out.piece.kind,
            side: out.piece.side,
        });
        pos.side_to_move = pos.side_to_move.next();
        out
    }
}

/// Builds the transaction for moving the piece on `from` to `to`.
///
/// Fails without touching anything if the geometric validator rejects the
/// move or if a promotion choice is missing or unusable. A promotion kind
/// supplied for a move that does not promote is ignored. Turn order is not
/// checked here.
pub fn plan(
    pos: &Position,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> Result<Transaction> {
    let piece = pos.piece_at(from).ok_or(ChessError::EmptySquare(from))?;
    if !validate::is_legal(pos, from, to) {
        return Err(ChessError::IllegalMove { from, to });
    }

    let promotion = if validate::is_promotion(pos, from, to) {
        let kind = promotion.ok_or(ChessError::PromotionRequired(to))?;
        if !kind.is_promotion_target() {
            return Err(ChessError::BadPromotion(kind));
        }
        Some(kind)
    } else {
        None
    };

    let mut edits = Vec::with_capacity(5);
    let mut captured = pos.piece_at(to);
    let mut castle = None;
    let mut en_passant = false;

    if piece.kind == PieceKind::King
        && let Some(plan) = validate::castling(pos, from, to)
    {
        let mut rook = pos
            .piece_at(plan.rook_from)
            .ok_or(ChessError::EmptySquare(plan.rook_from))?;
        rook.move_count += 1;
        edits.push(Edit::Clear(plan.rook_from));
        edits.push(Edit::Put(plan.rook_to, rook));
        castle = Some(plan.wing);
    }

    if piece.kind == PieceKind::Pawn
        && captured.is_none()
        && let Some(victim) = validate::en_passant_victim(pos, piece.side, from, to)
    {
        captured = pos.piece_at(victim);
        edits.push(Edit::Clear(victim));
        en_passant = true;
    }

    let moved = Piece {
        kind: promotion.unwrap_or(piece.kind),
        side: piece.side,
        move_count: piece.move_count + 1,
    };
    edits.push(Edit::Clear(from));
    edits.push(Edit::Put(to, moved));

    Ok(Transaction {
        edits,
        outcome: MoveOutcome {
            from,
            to,
            piece,
            captured,
            castle,
            en_passant,
            promotion,
        },
    })
}

/// Applies a move for the side to move.
///
/// Callers are expected to have asked the validator first; a move it would
/// refuse, or a piece of the wrong side, comes back as an error with the
/// position untouched.
pub fn apply(
    pos: &mut Position,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> Result<MoveOutcome> {
    let piece = pos.piece_at(from).ok_or(ChessError::EmptySquare(from))?;
    if piece.side != pos.side_to_move() {
        return Err(ChessError::WrongSide {
            square: from,
            side: piece.side,
        });
    }

    let tx = plan(pos, from, to, promotion)?;
    let outcome = tx.commit(pos);
    debug!(
        mv = %outcome.as_move(),
        kind = ?outcome.piece.kind,
        capture = outcome.is_capture(),
        castle = ?outcome.castle,
        en_passant = outcome.en_passant,
        "applied move"
    );
    Ok(outcome)
}
