//! Error type shared by the rule engine.
//!
//! Rule violations found while *asking* about a move are reported as `false`
//! by the validator. `ChessError` is for parse failures and for callers that
//! hand `apply` a move the validator would refuse.

use crate::types::{PieceKind, Side, Square};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    #[error("coordinate ({file}, {rank}) is off the board")]
    OutOfBounds { file: i8, rank: i8 },

    #[error("invalid square notation: {0:?}")]
    BadSquare(String),

    #[error("invalid move notation: {0:?}")]
    BadMove(String),

    #[error("invalid FEN: {0}")]
    BadFen(String),

    #[error("no piece on {0}")]
    EmptySquare(Square),

    #[error("the piece on {square} belongs to {side}, not the side to move")]
    WrongSide { square: Square, side: Side },

    #[error("illegal move {from}{to}")]
    IllegalMove { from: Square, to: Square },

    #[error("pawn reaching {0} must be promoted")]
    PromotionRequired(Square),

    #[error("cannot promote to {0:?}")]
    BadPromotion(PieceKind),
}

pub type Result<T> = std::result::Result<T, ChessError>;
