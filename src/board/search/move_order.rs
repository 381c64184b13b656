//! Move ordering utilities for search.

use chess::{ChessMove, Color, Piece};

use super::constants::{CAPTURE_SCALE, HASH_MOVE_SCORE, KILLER_SCORE};
use super::HistoryTable;
use crate::board::{Move, MoveList, ScoredMove, ScoredMoveList};

/// Piece ordinal used for MVV-LVA, pawn = 1 .. king = 6
#[inline]
fn ordinal(piece: Piece) -> i32 {
    piece.to_index() as i32 + 1
}

/// Ordering key of a move: hash move, then captures by MVV-LVA, then the
/// ply's killer, then history.
#[must_use]
pub fn score_move(
    mv: &Move,
    hash_move: Option<ChessMove>,
    killer: Option<ChessMove>,
    history: &HistoryTable,
    side: Color,
) -> i32 {
    if hash_move.is_some_and(|h| *mv == h) {
        HASH_MOVE_SCORE
    } else if let Some(victim) = mv.captured() {
        CAPTURE_SCALE * ordinal(victim) - ordinal(mv.piece())
    } else if killer.is_some_and(|k| *mv == k) {
        KILLER_SCORE
    } else {
        history.score(side, mv.piece(), mv.to())
    }
}

/// Score and sort `moves`, best guess first.
#[must_use]
pub fn order_moves(
    moves: &MoveList,
    hash_move: Option<ChessMove>,
    killer: Option<ChessMove>,
    history: &HistoryTable,
    side: Color,
) -> ScoredMoveList {
    let mut scored: ScoredMoveList = moves
        .iter()
        .map(|mv| ScoredMove {
            mv: *mv,
            score: score_move(mv, hash_move, killer, history, side),
        })
        .collect();
    scored.sort_unstable_by(|a, b| b.score.cmp(&a.score));
    scored
}
