//! Position handling, evaluation and search.
//!
//! Board representation, move generation and hashing come from the `chess`
//! crate. [`Position`] adapts its copy-make `Board` to the make/undo model the
//! search walks the tree with, and keeps the key history needed for
//! repetition detection.
//!
//! # Example
//! ```
//! use pesto_search::board::Position;
//!
//! let position = Position::new();
//! let moves = position.legal_moves();
//! println!("Starting position has {} legal moves", moves.len());
//! ```

mod error;
mod eval;
mod moves;
mod pst;
pub mod search;

#[cfg(test)]
mod tests;

use std::fmt;
use std::str::FromStr;

use chess::{BitBoard, Board, BoardStatus, ChessMove, Color, MoveGen, Piece};

pub use error::PositionError;
pub use eval::{contempt, evaluate, game_phase, white_score, MAX_PHASE};
pub use moves::{Move, MoveList, ScoredMove, ScoredMoveList, MAX_MOVES};
pub use search::{
    Aborted, HistoryTable, KillerTable, SearchInfoCallback, SearchIterationInfo, SearchLimits,
    SearchParams, SearchResult, SearchStats, SearchTables, DRAW_SCORE, INFINITY, MATE_SCORE,
    MAX_PLY,
};

/// State restored by [`Position::undo_move`].
#[derive(Clone, Copy)]
struct Undo {
    board: Board,
    halfmove_clock: u32,
}

/// A game position that is mutated in place with make/undo.
#[derive(Clone)]
pub struct Position {
    board: Board,
    /// Plies since the last pawn move or capture
    halfmove_clock: u32,
    /// Keys of every earlier position on the current line, oldest first
    key_history: Vec<u64>,
    undo_stack: Vec<Undo>,
}

impl Position {
    /// The standard starting position.
    #[must_use]
    pub fn new() -> Self {
        Position::from_board(Board::default())
    }

    #[must_use]
    pub fn from_board(board: Board) -> Self {
        Position {
            board,
            halfmove_clock: 0,
            key_history: Vec::with_capacity(2 * MAX_PLY),
            undo_stack: Vec::with_capacity(2 * MAX_PLY),
        }
    }

    /// Parse a position from FEN.
    ///
    /// # Errors
    /// Returns [`PositionError::InvalidFen`] when the board library rejects the string.
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        let board = Board::from_str(fen).map_err(|e| PositionError::InvalidFen {
            fen: fen.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Position::from_board(board))
    }

    #[must_use]
    pub fn to_fen(&self) -> String {
        self.board.to_string()
    }

    /// Zobrist key of the current position.
    #[inline]
    #[must_use]
    pub fn hash(&self) -> u64 {
        self.board.get_hash()
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.board.side_to_move()
    }

    #[inline]
    #[must_use]
    pub fn white_to_move(&self) -> bool {
        self.board.side_to_move() == Color::White
    }

    #[inline]
    #[must_use]
    pub fn in_check(&self) -> bool {
        self.board.checkers().popcnt() > 0
    }

    /// Bitboard of the given piece type and colour.
    #[inline]
    #[must_use]
    pub fn pieces(&self, piece: Piece, color: Color) -> BitBoard {
        *self.board.pieces(piece) & *self.board.color_combined(color)
    }

    /// True when the current position already occurred since the last
    /// irreversible move.
    #[must_use]
    pub fn is_repetition(&self) -> bool {
        let key = self.board.get_hash();
        self.key_history
            .iter()
            .rev()
            .take(self.halfmove_clock as usize)
            .any(|&k| k == key)
    }

    #[must_use]
    pub fn is_checkmate(&self) -> bool {
        self.board.status() == BoardStatus::Checkmate
    }

    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        self.board.status() == BoardStatus::Stalemate
    }

    /// Number of moves that can currently be undone.
    #[must_use]
    pub fn plies_played(&self) -> usize {
        self.undo_stack.len()
    }

    /// All legal moves.
    #[must_use]
    pub fn legal_moves(&self) -> MoveList {
        MoveGen::new_legal(&self.board)
            .map(|raw| self.describe(raw))
            .collect()
    }

    /// Legal captures (en passant included) and promotions.
    #[must_use]
    pub fn tactical_moves(&self) -> MoveList {
        MoveGen::new_legal(&self.board)
            .map(|raw| self.describe(raw))
            .filter(Move::is_tactical)
            .collect()
    }

    fn describe(&self, raw: ChessMove) -> Move {
        let from = raw.get_source();
        let to = raw.get_dest();
        let piece = self.board.piece_on(from).unwrap_or(Piece::Pawn);
        let captured = self.board.piece_on(to).or_else(|| {
            // A diagonal pawn move onto an empty square is en passant
            (piece == Piece::Pawn && from.get_file() != to.get_file()).then_some(Piece::Pawn)
        });
        Move::new(raw, piece, captured)
    }

    /// Look up a legal move by its UCI notation (`e2e4`, `e7e8q`).
    ///
    /// # Errors
    /// Returns [`PositionError::IllegalMove`] when no legal move matches.
    pub fn find_move(&self, uci: &str) -> Result<Move, PositionError> {
        self.legal_moves()
            .into_iter()
            .find(|mv| mv.to_string() == uci)
            .ok_or_else(|| PositionError::IllegalMove {
                notation: uci.to_string(),
            })
    }

    /// Apply a game move given in UCI notation.
    ///
    /// # Errors
    /// Returns [`PositionError::IllegalMove`] when no legal move matches.
    pub fn play(&mut self, uci: &str) -> Result<Move, PositionError> {
        let mv = self.find_move(uci)?;
        self.make_move(&mv);
        Ok(mv)
    }

    fn push_undo(&mut self) {
        self.key_history.push(self.board.get_hash());
        self.undo_stack.push(Undo {
            board: self.board,
            halfmove_clock: self.halfmove_clock,
        });
    }

    /// Make a legal move.
    pub fn make_move(&mut self, mv: &Move) {
        let irreversible = mv.is_capture() || mv.piece() == Piece::Pawn;
        self.push_undo();
        self.board = self.board.make_move_new(mv.raw());
        self.halfmove_clock = if irreversible {
            0
        } else {
            self.halfmove_clock + 1
        };
    }

    /// Undo the last move (null moves included).
    pub fn undo_move(&mut self) {
        if let Some(undo) = self.undo_stack.pop() {
            self.board = undo.board;
            self.halfmove_clock = undo.halfmove_clock;
            self.key_history.pop();
        }
    }

    /// Pass the turn. Returns false, leaving the position untouched, when
    /// the side to move is in check.
    pub fn make_null_move(&mut self) -> bool {
        let Some(next) = self.board.null_move() else {
            return false;
        };
        self.push_undo();
        self.board = next;
        self.halfmove_clock += 1;
        true
    }

    pub fn undo_null_move(&mut self) {
        self.undo_move();
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new()
    }
}

impl FromStr for Position {
    type Err = PositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("fen", &self.to_fen())
            .field("halfmove_clock", &self.halfmove_clock)
            .field("plies_played", &self.undo_stack.len())
            .finish()
    }
}
