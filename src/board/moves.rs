//! Move type and move list.

use std::fmt;

use chess::{ChessMove, Piece, Square};
use smallvec::SmallVec;

/// Maximum number of legal moves in any reachable chess position.
pub const MAX_MOVES: usize = 218;

/// A legal move together with the attributes search needs to order and
/// classify it without consulting the board again.
///
/// Two moves compare equal when their source, destination and promotion
/// match; the cached piece information does not take part in equality.
#[derive(Clone, Copy, Debug)]
pub struct Move {
    raw: ChessMove,
    piece: Piece,
    captured: Option<Piece>,
}

impl Move {
    #[inline]
    #[must_use]
    pub(crate) const fn new(raw: ChessMove, piece: Piece, captured: Option<Piece>) -> Self {
        Move {
            raw,
            piece,
            captured,
        }
    }

    /// Underlying move of the board library.
    #[inline]
    #[must_use]
    pub const fn raw(&self) -> ChessMove {
        self.raw
    }

    /// Type of the piece being moved.
    #[inline]
    #[must_use]
    pub const fn piece(&self) -> Piece {
        self.piece
    }

    /// Type of the captured piece, a pawn for en passant.
    #[inline]
    #[must_use]
    pub const fn captured(&self) -> Option<Piece> {
        self.captured
    }

    #[inline]
    #[must_use]
    pub fn to(&self) -> Square {
        self.raw.get_dest()
    }

    #[inline]
    #[must_use]
    pub const fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    #[inline]
    #[must_use]
    pub fn is_promotion(&self) -> bool {
        self.raw.get_promotion().is_some()
    }

    /// Captures and promotions.
    #[inline]
    #[must_use]
    pub fn is_tactical(&self) -> bool {
        self.is_capture() || self.is_promotion()
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Move {}

impl PartialEq<ChessMove> for Move {
    fn eq(&self, other: &ChessMove) -> bool {
        self.raw == *other
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Stack-allocated buffer large enough for every legal move of a position.
pub type MoveList = SmallVec<[Move; MAX_MOVES]>;

/// A move paired with its ordering key.
#[derive(Clone, Copy, Debug)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// Scored moves for one node, sorted once before the move loop.
pub type ScoredMoveList = SmallVec<[ScoredMove; MAX_MOVES]>;
