//! Tapered piece-square evaluation.

use chess::{Color, Piece, ALL_PIECES};

use super::pst::{ENDGAME, TABLES};
use super::Position;

/// Phase of a position with full non-pawn material.
pub const MAX_PHASE: i32 = 24;

/// Phase contribution per piece type, pawn..king.
const PHASE_WEIGHTS: [i32; 6] = [0, 1, 1, 2, 4, 0];

const BISHOP_PAIR_MG: i32 = 22;
const BISHOP_PAIR_EG: i32 = 30;

/// Middlegame and endgame sums from white's point of view, plus the phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct EvalTerms {
    mg: i32,
    eg: i32,
    phase: i32,
}

impl EvalTerms {
    fn tapered(&self) -> i32 {
        (self.mg * self.phase + self.eg * (MAX_PHASE - self.phase)) / MAX_PHASE
    }
}

fn collect_terms(position: &Position) -> EvalTerms {
    let mut terms = EvalTerms::default();
    for color in [Color::White, Color::Black] {
        let (sign, flip) = match color {
            Color::White => (1, 56),
            Color::Black => (-1, 0),
        };
        for piece in ALL_PIECES {
            let idx = piece.to_index();
            let bb = position.pieces(piece, color);
            for square in bb {
                let row = &TABLES[square.to_index() ^ flip];
                terms.mg += sign * row[idx];
                terms.eg += sign * row[idx + ENDGAME];
                terms.phase += PHASE_WEIGHTS[idx];
            }
            if piece == Piece::Bishop && bb.popcnt() >= 2 {
                terms.mg += sign * BISHOP_PAIR_MG;
                terms.eg += sign * BISHOP_PAIR_EG;
            }
        }
    }
    // Promotions can push the raw count past a full board
    terms.phase = terms.phase.min(MAX_PHASE);
    terms
}

/// Game phase in `0..=24`, 24 being the opening material set.
#[must_use]
pub fn game_phase(position: &Position) -> i32 {
    collect_terms(position).phase
}

/// Bonus credited to the side to move, shrinking as material comes off.
#[inline]
#[must_use]
pub const fn contempt(phase: i32) -> i32 {
    phase / 2
}

/// Tapered material and placement score from white's point of view,
/// without contempt.
#[must_use]
pub fn white_score(position: &Position) -> i32 {
    collect_terms(position).tapered()
}

/// Static evaluation in centipawns from the side to move's perspective.
#[must_use]
pub fn evaluate(position: &Position) -> i32 {
    let terms = collect_terms(position);
    let perspective = if position.white_to_move() { 1 } else { -1 };
    terms.tapered() * perspective + contempt(terms.phase)
}

impl Position {
    /// See [`evaluate`].
    #[must_use]
    pub fn evaluate(&self) -> i32 {
        evaluate(self)
    }
}
