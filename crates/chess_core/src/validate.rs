//! Move legality.
//!
//! [`is_legal`] answers from piece geometry, blocking and occupancy alone,
//! plus the castling and en-passant preconditions. It never asks whether the
//! mover's own king ends up attacked; [`Rules`] layers that on when enabled.

use crate::board::Position;
use crate::execute;
use crate::types::*;

/// Which wing the king castles toward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastleSide {
    King,
    Queen,
}

/// Squares touched by a castling move besides the king's own.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Castling {
    pub wing: CastleSide,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Square the king crosses between origin and destination.
    pub crossing: Square,
}

/// Can the piece on `from` move to `to`?
///
/// The piece is whatever stands on `from`, of either side; turn order is the
/// caller's business. The only history consulted is `pos.last_move()`.
pub fn is_legal(pos: &Position, from: Square, to: Square) -> bool {
    let Some(piece) = pos.piece_at(from) else {
        return false;
    };
    if from == to {
        return false;
    }
    if let Some(target) = pos.piece_at(to)
        && target.side == piece.side
    {
        return false;
    }

    let df = to.file() - from.file();
    let dr = to.rank() - from.rank();
    match piece.kind {
        PieceKind::Pawn => pawn_move(pos, piece.side, from, to),
        PieceKind::Knight => matches!((df.abs(), dr.abs()), (1, 2) | (2, 1)),
        PieceKind::Bishop => df.abs() == dr.abs() && path_clear(pos, from, to),
        PieceKind::Rook => (df == 0 || dr == 0) && path_clear(pos, from, to),
        PieceKind::Queen => {
            (df.abs() == dr.abs() || df == 0 || dr == 0) && path_clear(pos, from, to)
        }
        PieceKind::King => {
            (df.abs() <= 1 && dr.abs() <= 1) || castling(pos, from, to).is_some()
        }
    }
}

/// Every square strictly between `from` and `to` is empty. Assumes the two
/// lie on a common line.
fn path_clear(pos: &Position, from: Square, to: Square) -> bool {
    let step = ((to.file() - from.file()).signum(), (to.rank() - from.rank()).signum());
    let mut cur = from.offset(step.0, step.1);
    while let Some(sq) = cur {
        if sq == to {
            return true;
        }
        if pos.piece_at(sq).is_some() {
            return false;
        }
        cur = sq.offset(step.0, step.1);
    }
    false
}

fn pawn_move(pos: &Position, side: Side, from: Square, to: Square) -> bool {
    let dir = side.forward();
    let df = to.file() - from.file();
    let dr = to.rank() - from.rank();
    let target = pos.piece_at(to);

    if df == 0 && dr == dir {
        return target.is_none();
    }
    if df == 0 && dr == 2 * dir {
        let skipped = from.offset(0, dir);
        return from.rank() == side.pawn_rank()
            && target.is_none()
            && skipped.is_some_and(|sq| pos.piece_at(sq).is_none());
    }
    if df.abs() == 1 && dr == dir {
        return match target {
            Some(pc) => pc.side != side,
            None => en_passant_victim(pos, side, from, to).is_some(),
        };
    }
    false
}

/// For a diagonal pawn step onto an empty square, the enemy pawn it would
/// capture en passant. The window is exactly one move: the enemy pawn must
/// have just advanced two squares to land beside `from`, on `to`'s file.
pub(crate) fn en_passant_victim(
    pos: &Position,
    side: Side,
    from: Square,
    to: Square,
) -> Option<Square> {
    let last = pos.last_move()?;
    if last.side == side || !last.is_double_push() {
        return None;
    }
    let beside = last.to.rank() == from.rank() && last.to.file() == to.file();
    let still_there = pos
        .piece_at(last.to)
        .is_some_and(|pc| pc.kind == PieceKind::Pawn && pc.side != side);
    (beside && still_there).then_some(last.to)
}

/// Castling plan for a king on `from` heading to `to`, if every
/// precondition holds: unmoved king on its home square, unmoved rook of the
/// same side in the matching corner, and nothing between them.
pub(crate) fn castling(pos: &Position, from: Square, to: Square) -> Option<Castling> {
    let king = pos.piece_at(from)?;
    if king.kind != PieceKind::King || king.move_count != 0 {
        return None;
    }
    let home = king.side.home_rank();
    if from.rank() != home || to.rank() != home || from.file() != 4 {
        return None;
    }
    let (wing, rook_file, rook_to_file, crossing_file) = match to.file() {
        6 => (CastleSide::King, 7, 5, 5),
        2 => (CastleSide::Queen, 0, 3, 3),
        _ => return None,
    };

    let rook_from = Square::new(rook_file, home)?;
    let rook = pos.piece_at(rook_from)?;
    if rook.kind != PieceKind::Rook || rook.side != king.side || rook.move_count != 0 {
        return None;
    }

    let (lo, hi) = (rook_file.min(4) + 1, rook_file.max(4));
    let blocked = (lo..hi)
        .filter_map(|f| Square::new(f, home))
        .any(|sq| pos.piece_at(sq).is_some());
    if blocked {
        return None;
    }

    Some(Castling {
        wing,
        rook_from,
        rook_to: Square::new(rook_to_file, home)?,
        crossing: Square::new(crossing_file, home)?,
    })
}

/// Does moving to `to` put a pawn on its farthest rank?
pub fn is_promotion(pos: &Position, from: Square, to: Square) -> bool {
    pos.piece_at(from)
        .is_some_and(|pc| pc.kind == PieceKind::Pawn && to.rank() == pc.side.promotion_rank())
}

/// Plays the move on a scratch copy and reports whether the mover's king is
/// left unattacked. Castling also may not start in, or pass through, check.
///
/// Only meaningful for moves [`is_legal`] accepts; returns `false` otherwise.
pub fn leaves_king_safe(pos: &Position, from: Square, to: Square) -> bool {
    let Some(piece) = pos.piece_at(from) else {
        return false;
    };
    let enemy = piece.side.next();

    if piece.kind == PieceKind::King
        && let Some(plan) = castling(pos, from, to)
        && (pos.in_check(piece.side) || pos.is_square_attacked(plan.crossing, enemy))
    {
        return false;
    }

    // The promotion kind cannot change whether our own king is attacked.
    let promotion = is_promotion(pos, from, to).then_some(PieceKind::Queen);
    let mut scratch = pos.clone();
    match execute::plan(pos, from, to, promotion) {
        Ok(tx) => {
            tx.commit(&mut scratch);
            !scratch.in_check(piece.side)
        }
        Err(_) => false,
    }
}

/// Legality policy layered over the geometric rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rules {
    /// Reject moves that leave the mover's own king attacked, including
    /// castling out of or through check.
    pub king_safety: bool,
}

impl Rules {
    /// Full chess legality.
    pub fn standard() -> Self {
        Self { king_safety: true }
    }

    /// Geometry and occupancy only; a king may walk into check or be captured.
    pub fn geometric() -> Self {
        Self { king_safety: false }
    }

    pub fn is_legal(&self, pos: &Position, from: Square, to: Square) -> bool {
        is_legal(pos, from, to) && (!self.king_safety || leaves_king_safe(pos, from, to))
    }
}

impl Default for Rules {
    fn default() -> Self {
        Self::standard()
    }
}
