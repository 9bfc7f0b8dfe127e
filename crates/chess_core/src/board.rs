use std::fmt;

use crate::error::{ChessError, Result};
use crate::types::*;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (-1, 2),
    (-2, 1),
    (1, -2),
    (2, -1),
    (-1, -2),
    (-2, -1),
];

const KING_STEPS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Board state: who stands where, whose turn it is, and the move just played.
///
/// The grid is the single owner of every piece. Only
/// [`apply`](crate::execute::apply) moves pieces during play; [`place`](Self::place)
/// and [`clear`](Self::clear) are raw writes for setting positions up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub(crate) board: [Option<Piece>; 64],
    pub(crate) side_to_move: Side,
    pub(crate) last_move: Option<PlayedMove>,
    pub(crate) halfmove_clock: u32,
    pub(crate) fullmove_number: u32,
}

impl Position {
    /// An empty board with White to move.
    pub fn empty() -> Self {
        Position {
            board: [None; 64],
            side_to_move: Side::White,
            last_move: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }

    /// The standard starting arrangement.
    pub fn startpos() -> Self {
        let mut p = Position::empty();
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            let file = file as i8;
            for side in [Side::White, Side::Black] {
                p.put_at(file, side.home_rank(), Piece::new(kind, side));
                p.put_at(file, side.pawn_rank(), Piece::new(PieceKind::Pawn, side));
            }
        }
        p
    }

    fn put_at(&mut self, file: i8, rank: i8, piece: Piece) {
        if let Some(sq) = Square::new(file, rank) {
            self.board[sq.index()] = Some(piece);
        }
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn last_move(&self) -> Option<PlayedMove> {
        self.last_move
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board[sq.index()]
    }

    /// Writes a fresh piece (move count zero) over whatever was on `sq`.
    pub fn place(&mut self, sq: Square, kind: PieceKind, side: Side) {
        self.board[sq.index()] = Some(Piece::new(kind, side));
    }

    /// Writes `piece` as-is, keeping its move count.
    pub fn put(&mut self, sq: Square, piece: Piece) {
        self.board[sq.index()] = Some(piece);
    }

    pub fn clear(&mut self, sq: Square) -> Option<Piece> {
        self.board[sq.index()].take()
    }

    /// Every piece of `side` in square order.
    pub fn pieces(&self, side: Side) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.piece_at(sq) {
            Some(pc) if pc.side == side => Some((sq, pc)),
            _ => None,
        })
    }

    pub fn king_square(&self, side: Side) -> Option<Square> {
        self.pieces(side)
            .find(|(_, pc)| pc.kind == PieceKind::King)
            .map(|(sq, _)| sq)
    }

    /// The square a pawn skipped over on the previous move, if it advanced two.
    pub fn en_passant_target(&self) -> Option<Square> {
        let last = self.last_move.filter(PlayedMove::is_double_push)?;
        last.from.offset(0, last.side.forward())
    }

    /// A side without a king is never in check.
    pub fn in_check(&self, side: Side) -> bool {
        match self.king_square(side) {
            Some(ksq) => self.is_square_attacked(ksq, side.next()),
            None => false,
        }
    }

    pub fn is_square_attacked(&self, target: Square, by: Side) -> bool {
        let hit = |sq: Option<Square>, kinds: &[PieceKind]| {
            sq.and_then(|s| self.piece_at(s))
                .is_some_and(|pc| pc.side == by && kinds.contains(&pc.kind))
        };

        // An attacking pawn sits one step behind the target from its own view.
        let back = -by.forward();
        if hit(target.offset(-1, back), &[PieceKind::Pawn])
            || hit(target.offset(1, back), &[PieceKind::Pawn])
        {
            return true;
        }
        if KNIGHT_JUMPS
            .iter()
            .any(|&(df, dr)| hit(target.offset(df, dr), &[PieceKind::Knight]))
        {
            return true;
        }
        if KING_STEPS
            .iter()
            .any(|&(df, dr)| hit(target.offset(df, dr), &[PieceKind::King]))
        {
            return true;
        }

        let rays = [
            (&DIAGONALS, [PieceKind::Bishop, PieceKind::Queen]),
            (&ORTHOGONALS, [PieceKind::Rook, PieceKind::Queen]),
        ];
        for (dirs, sliders) in rays {
            for &(df, dr) in dirs {
                let mut cur = target.offset(df, dr);
                while let Some(sq) = cur {
                    if let Some(pc) = self.piece_at(sq) {
                        if pc.side == by && sliders.contains(&pc.kind) {
                            return true;
                        }
                        break;
                    }
                    cur = sq.offset(df, dr);
                }
            }
        }

        false
    }

    /// Parses Forsyth-Edwards Notation.
    ///
    /// The grid has no castling-rights field, so rights are folded into move
    /// counts: a king or rook on its home square keeps a count of zero only
    /// when the matching right is present. The en-passant field becomes the
    /// enemy double advance it implies.
    pub fn from_fen(fen: &str) -> Result<Self> {
        let bad = |why: &str| ChessError::BadFen(format!("{why} in {fen:?}"));

        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(bad("expected at least 4 fields"));
        }

        let mut p = Position::empty();
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(bad("board needs 8 ranks"));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as i8; // FEN lists rank 8 .. 1
            let mut file: i8 = 0;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    file += d as i8;
                } else {
                    let mut piece =
                        Piece::from_symbol(ch).ok_or_else(|| bad("unknown piece letter"))?;
                    let sq = Square::new(file, rank).ok_or_else(|| bad("rank too long"))?;
                    // Anything that could castle starts out ineligible.
                    if matches!(piece.kind, PieceKind::King | PieceKind::Rook) {
                        piece.move_count = 1;
                    }
                    p.put(sq, piece);
                    file += 1;
                }
                if file > 8 {
                    return Err(bad("rank too long"));
                }
            }
            if file != 8 {
                return Err(bad("rank too short"));
            }
        }

        p.side_to_move = match parts[1] {
            "w" => Side::White,
            "b" => Side::Black,
            _ => return Err(bad("side to move must be w or b")),
        };

        if parts[2] != "-" {
            for c in parts[2].chars() {
                let (side, rook_file) = match c {
                    'K' => (Side::White, 7),
                    'Q' => (Side::White, 0),
                    'k' => (Side::Black, 7),
                    'q' => (Side::Black, 0),
                    _ => return Err(bad("unknown castling letter")),
                };
                p.grant_castling(side, rook_file);
            }
        }

        if parts[3] != "-" {
            let target: Square = parts[3].parse().map_err(|_| bad("bad en-passant square"))?;
            let mover = p.side_to_move.next();
            let from = target.offset(0, -mover.forward());
            let to = target.offset(0, mover.forward());
            match (from, to) {
                (Some(from), Some(to))
                    if from.rank() == mover.pawn_rank()
                        && p.piece_at(to) == Some(Piece::new(PieceKind::Pawn, mover)) =>
                {
                    p.last_move = Some(PlayedMove {
                        from,
                        to,
                        kind: PieceKind::Pawn,
                        side: mover,
                    });
                }
                _ => return Err(bad("en-passant square does not follow a double advance")),
            }
        }

        if let Some(h) = parts.get(4) {
            p.halfmove_clock = h.parse().map_err(|_| bad("bad halfmove clock"))?;
        }
        if let Some(n) = parts.get(5) {
            p.fullmove_number = n.parse().map_err(|_| bad("bad fullmove number"))?;
        }

        Ok(p)
    }

    fn grant_castling(&mut self, side: Side, rook_file: i8) {
        let home = side.home_rank();
        for file in [4, rook_file] {
            if let Some(sq) = Square::new(file, home)
                && let Some(pc) = self.board[sq.index()].as_mut()
                && pc.side == side
            {
                pc.move_count = 0;
            }
        }
    }

    fn has_castling_right(&self, side: Side, rook_file: i8) -> bool {
        let home = side.home_rank();
        let unmoved = |file: i8, kind: PieceKind| {
            Square::new(file, home)
                .and_then(|sq| self.piece_at(sq))
                .is_some_and(|pc| pc.side == side && pc.kind == kind && pc.move_count == 0)
        };
        unmoved(4, PieceKind::King) && unmoved(rook_file, PieceKind::Rook)
    }

    pub fn to_fen(&self) -> String {
        let mut out = String::new();
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match Square::new(file, rank).and_then(|sq| self.piece_at(sq)) {
                    Some(pc) => {
                        if empty > 0 {
                            out.push_str(&empty.to_string());
                            empty = 0;
                        }
                        out.push(pc.symbol());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                out.push_str(&empty.to_string());
            }
            if rank > 0 {
                out.push('/');
            }
        }

        out.push(' ');
        out.push(match self.side_to_move {
            Side::White => 'w',
            Side::Black => 'b',
        });

        let mut rights = String::new();
        for (side, rook_file, letter) in [
            (Side::White, 7, 'K'),
            (Side::White, 0, 'Q'),
            (Side::Black, 7, 'k'),
            (Side::Black, 0, 'q'),
        ] {
            if self.has_castling_right(side, rook_file) {
                rights.push(letter);
            }
        }
        if rights.is_empty() {
            rights.push('-');
        }
        out.push(' ');
        out.push_str(&rights);

        out.push(' ');
        match self.en_passant_target() {
            Some(sq) => out.push_str(&sq.to_string()),
            None => out.push('-'),
        }

        out.push_str(&format!(" {} {}", self.halfmove_clock, self.fullmove_number));
        out
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

/// Text diagram, rank 8 at the top, `.` for empty squares.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let c = Square::new(file, rank)
                    .and_then(|sq| self.piece_at(sq))
                    .map_or('.', Piece::symbol);
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
