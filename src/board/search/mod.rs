//! Search module implementing alpha-beta with iterative deepening.
//!
//! Features:
//! - Iterative deepening with aspiration windows
//! - Negamax alpha-beta with principal variation search
//! - Check extension, reverse futility, null move and futility pruning
//! - Late move reductions
//! - Quiescence search over captures and promotions
//! - Move ordering (hash move, MVV-LVA, killers, history)
//! - Transposition table for move ordering and cutoffs

mod constants;
mod move_order;
mod negamax;
mod params;

use std::sync::Arc;

use chess::{ChessMove, Color, Piece, Square};
use log::debug;

use crate::timer::TurnTimer;
use crate::tt::TranspositionTable;

use super::{Move, Position};
pub use constants::{
    CAPTURE_SCALE, DRAW_SCORE, HASH_MOVE_SCORE, INFINITY, KILLER_SCORE, MATE_SCORE,
    MATE_THRESHOLD, MAX_PLY,
};
pub use move_order::{order_moves, score_move};
pub use params::SearchParams;

pub(crate) use negamax::Searcher;

/// Marker returned up the tree once the turn's time has run out.
///
/// Scores computed by an interrupted subtree are never used.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aborted;

/// Outcome of searching one node.
pub type NodeResult = Result<i32, Aborted>;

/// Statistics tracked during search
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchStats {
    pub nodes: u64,
    pub seldepth: u32,
    pub tt_hits: u64,
    /// Aspiration windows that failed and were searched again
    pub researches: u64,
}

/// Most recent quiet move that caused a beta cutoff at each ply.
pub struct KillerTable {
    slots: [Option<ChessMove>; MAX_PLY],
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KillerTable {
    #[must_use]
    pub fn new() -> Self {
        KillerTable {
            slots: [None; MAX_PLY],
        }
    }

    #[must_use]
    pub fn get(&self, ply: usize) -> Option<ChessMove> {
        self.slots.get(ply).copied().flatten()
    }

    pub fn update(&mut self, ply: usize, mv: ChessMove) {
        if let Some(slot) = self.slots.get_mut(ply) {
            *slot = Some(mv);
        }
    }

    pub fn reset(&mut self) {
        self.slots = [None; MAX_PLY];
    }
}

/// Cutoff counts per side to move, moving piece and target square.
pub struct HistoryTable {
    entries: [[[i32; 64]; 6]; 2],
}

impl Default for HistoryTable {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryTable {
    #[must_use]
    pub fn new() -> Self {
        HistoryTable {
            entries: [[[0; 64]; 6]; 2],
        }
    }

    #[must_use]
    pub fn score(&self, side: Color, piece: Piece, to: Square) -> i32 {
        self.entries[side.to_index()][piece.to_index()][to.to_index()]
    }

    /// Credit a quiet move that caused a beta cutoff with `depth²`.
    pub fn update(&mut self, side: Color, piece: Piece, to: Square, depth: i32) {
        let entry = &mut self.entries[side.to_index()][piece.to_index()][to.to_index()];
        *entry = entry.saturating_add(depth.saturating_mul(depth));
    }

    pub fn reset(&mut self) {
        self.entries = [[[0; 64]; 6]; 2];
    }
}

/// Move-ordering heuristics for one move-selection call.
#[derive(Default)]
pub struct SearchTables {
    pub killers: KillerTable,
    pub history: HistoryTable,
}

impl SearchTables {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remember a quiet move that refuted the node at `ply`.
    pub fn record_cutoff(&mut self, ply: usize, side: Color, mv: &Move, depth: i32) {
        self.killers.update(ply, mv.raw());
        self.history.update(side, mv.piece(), mv.to(), depth);
    }
}

/// Bounds on one move-selection call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchLimits {
    /// Time allowed for this move
    pub time_limit_ms: u64,
    /// Time left on the game clock
    pub clock_ms: u64,
    /// Stop deepening once this depth completes
    pub max_depth: Option<i32>,
}

impl SearchLimits {
    /// Spend `remaining_ms / divisor` of the game clock on this move.
    #[must_use]
    pub fn from_clock(remaining_ms: u64, divisor: u64) -> Self {
        SearchLimits {
            time_limit_ms: crate::timer::allocate_turn_time(remaining_ms, divisor),
            clock_ms: remaining_ms,
            max_depth: None,
        }
    }

    /// Fixed time for this move.
    #[must_use]
    pub fn time(time_limit_ms: u64) -> Self {
        SearchLimits {
            time_limit_ms,
            clock_ms: time_limit_ms,
            max_depth: None,
        }
    }

    /// Untimed search to a fixed depth.
    #[must_use]
    pub fn depth(max_depth: i32) -> Self {
        SearchLimits {
            time_limit_ms: u64::MAX,
            clock_ms: u64::MAX,
            max_depth: Some(max_depth),
        }
    }
}

/// Result of a search.
#[derive(Clone, Copy, Debug, Default)]
pub struct SearchResult {
    /// The best move found, `None` only when there is no legal move
    pub best_move: Option<ChessMove>,
    /// Score of the last iteration that finished inside its window
    pub score: i32,
    /// Depth of that iteration
    pub depth: i32,
    pub nodes: u64,
    pub tt_hits: u64,
    pub elapsed_ms: u64,
}

impl SearchResult {
    /// Moves to mate, positive when the side to move delivers it.
    #[must_use]
    pub fn mate_in(&self) -> Option<i32> {
        mate_in(self.score)
    }
}

/// Information about a completed search iteration.
#[derive(Debug, Clone)]
pub struct SearchIterationInfo {
    pub depth: i32,
    pub seldepth: u32,
    pub score: i32,
    pub mate_in: Option<i32>,
    pub nodes: u64,
    pub tt_hits: u64,
    pub time_ms: u64,
    pub best_move: Option<ChessMove>,
}

/// Callback type for iteration info.
pub type SearchInfoCallback = Arc<dyn Fn(&SearchIterationInfo) + Send + Sync>;

#[inline]
#[must_use]
pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_THRESHOLD
}

#[must_use]
pub fn mate_in(score: i32) -> Option<i32> {
    if !is_mate_score(score) {
        None
    } else if score > 0 {
        Some((MATE_SCORE - score + 1) / 2)
    } else {
        Some(-(MATE_SCORE + score + 1) / 2)
    }
}

/// Select a move for `position` within `limits`.
///
/// Killer and history tables are fresh for every call; the transposition
/// table is reused as given.
pub fn search(
    position: &mut Position,
    tt: &mut TranspositionTable,
    params: &SearchParams,
    limits: &SearchLimits,
    info_callback: Option<SearchInfoCallback>,
) -> SearchResult {
    let timer = TurnTimer::start(limits.clock_ms, limits.time_limit_ms);
    debug!(
        "search: limit {} ms, {} ms on the clock, max depth {:?}",
        timer.limit_ms(),
        timer.remaining_ms(),
        limits.max_depth
    );

    // No search needed without a choice to make
    let moves = position.legal_moves();
    match moves.as_slice() {
        [] => {
            return SearchResult {
                score: if position.in_check() {
                    -MATE_SCORE
                } else {
                    DRAW_SCORE
                },
                ..SearchResult::default()
            };
        }
        [only] => {
            return SearchResult {
                best_move: Some(only.raw()),
                score: position.evaluate(),
                ..SearchResult::default()
            };
        }
        _ => {}
    }

    let mut tables = SearchTables::new();
    let mut searcher = Searcher::new(position, tt, &mut tables, params, &timer);
    searcher.info_callback = info_callback;
    searcher.iterative_deepening(limits.max_depth)
}
