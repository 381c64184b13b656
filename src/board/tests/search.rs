//! Search algorithm tests.
//!
//! Tests for negamax terminal scores, draws, quiescence, TT cutoffs,
//! extensions, pruning, reductions and aspiration re-searches.

use std::sync::{Arc, Mutex};

use chess::{Color, ALL_PIECES, ALL_SQUARES};

use crate::board::search::{Searcher, SearchParams, SearchTables};
use crate::board::{
    Position, SearchInfoCallback, SearchIterationInfo, DRAW_SCORE, INFINITY, MATE_SCORE,
};
use crate::timer::TurnTimer;
use crate::tt::{BoundType, TranspositionTable};

fn make_position(fen: &str) -> Position {
    Position::from_fen(fen).expect("valid fen")
}

/// Run one negamax call on `position` with fresh tables and no time limit.
fn run_negamax(
    position: &mut Position,
    tt: &mut TranspositionTable,
    depth: i32,
    ply: usize,
) -> (i32, u64) {
    let params = SearchParams::default();
    let timer = TurnTimer::start(u64::MAX, u64::MAX);
    let mut tables = SearchTables::new();
    let mut searcher = Searcher::new(position, tt, &mut tables, &params, &timer);
    let score = searcher
        .negamax(depth, ply, -INFINITY, INFINITY, true)
        .expect("untimed search is never aborted");
    (score, searcher.stats.tt_hits)
}

// ============================================================================
// Terminal positions
// ============================================================================

#[test]
fn checkmated_root_scores_minus_mate() {
    let mut position =
        make_position("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    let mut tt = TranspositionTable::with_slots(1024);
    let (score, _) = run_negamax(&mut position, &mut tt, 1, 0);
    assert_eq!(score, -MATE_SCORE);
}

#[test]
fn checkmate_deeper_in_tree_prefers_distance() {
    let mut position =
        make_position("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
    let mut tt = TranspositionTable::with_slots(1024);
    let (score, _) = run_negamax(&mut position, &mut tt, 1, 3);
    assert_eq!(score, 3 - MATE_SCORE);
}

#[test]
fn stalemate_scores_draw() {
    let mut position = make_position("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
    let mut tt = TranspositionTable::with_slots(1024);
    let (score, _) = run_negamax(&mut position, &mut tt, 2, 0);
    assert_eq!(score, DRAW_SCORE);
}

#[test]
fn finds_mate_in_one_score() {
    // Ra8#
    let mut position = make_position("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
    let mut tt = TranspositionTable::with_slots(1 << 14);
    let (score, _) = run_negamax(&mut position, &mut tt, 2, 0);
    assert_eq!(score, MATE_SCORE - 1);
}

// ============================================================================
// Draws
// ============================================================================

#[test]
fn repetition_below_root_is_a_draw() {
    let mut position = Position::new();
    for uci in ["g1f3", "g8f6", "f3g1", "f6g8"] {
        position.play(uci).expect("legal");
    }
    let mut tt = TranspositionTable::with_slots(1024);
    let (score, _) = run_negamax(&mut position, &mut tt, 3, 1);
    assert_eq!(score, DRAW_SCORE);
}

#[test]
fn repetition_at_root_is_searched() {
    // A queen up; the root ignores the repetition
    let mut position = make_position("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1");
    for uci in ["g1f3", "g8f6", "f3g1", "f6g8"] {
        position.play(uci).expect("legal");
    }
    assert!(position.is_repetition());
    let mut tt = TranspositionTable::with_slots(1 << 14);
    let (score, _) = run_negamax(&mut position, &mut tt, 2, 0);
    assert!(score > 500);
}

#[test]
fn ply_beyond_draw_limit_is_a_draw() {
    let mut position = make_position("rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1");
    let mut tt = TranspositionTable::with_slots(1024);
    let (score, _) = run_negamax(&mut position, &mut tt, 2, 51);
    assert_eq!(score, DRAW_SCORE);
}

// ============================================================================
// Quiescence
// ============================================================================

#[test]
fn quiescence_takes_hanging_queen() {
    let mut position = make_position("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1");
    let stand_pat = position.evaluate();
    let mut tt = TranspositionTable::with_slots(1024);
    let (score, _) = run_negamax(&mut position, &mut tt, 0, 1);
    assert!(stand_pat < -500);
    assert!(score > 0, "exd5 should win the queen, got {score}");
}

#[test]
fn quiescence_stands_pat_when_quiet() {
    let mut position = Position::new();
    let mut tt = TranspositionTable::with_slots(1024);
    let (score, _) = run_negamax(&mut position, &mut tt, 0, 1);
    assert_eq!(score, position.evaluate());
}

// ============================================================================
// Transposition table
// ============================================================================

#[test]
fn tt_entry_cuts_off_below_root() {
    let mut position = Position::new();
    let mut tt = TranspositionTable::with_slots(1024);
    tt.store(position.hash(), None, 10, 123, BoundType::Exact);
    let (score, tt_hits) = run_negamax(&mut position, &mut tt, 3, 1);
    assert_eq!(score, 123);
    assert_eq!(tt_hits, 1);
}

#[test]
fn tt_entry_ignored_at_root() {
    let mut position = Position::new();
    let mut tt = TranspositionTable::with_slots(1024);
    tt.store(position.hash(), None, 10, 4321, BoundType::Exact);
    let (score, _) = run_negamax(&mut position, &mut tt, 2, 0);
    assert_ne!(score, 4321);
}

#[test]
fn search_stores_root_entry() {
    let mut position = Position::new();
    let mut tt = TranspositionTable::with_slots(1 << 14);
    let (score, _) = run_negamax(&mut position, &mut tt, 2, 0);
    let entry = tt.probe(position.hash()).expect("root is stored");
    assert_eq!(entry.depth, 2);
    assert_eq!(entry.score, score);
    assert_eq!(entry.bound_type, BoundType::Exact);
    let best = entry.best_move.expect("root has a best move");
    assert!(position.legal_moves().iter().any(|mv| *mv == best));
}

// ============================================================================
// White-box fixture
// ============================================================================

/// Startpos without the black queen, white to move
const QUEEN_UP_FEN: &str = "rnb1kbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1";

/// Everything a [`Searcher`] borrows, kept alive across the search so the
/// tables can be inspected afterwards.
struct Fixture {
    position: Position,
    tt: TranspositionTable,
    tables: SearchTables,
    params: SearchParams,
    timer: TurnTimer,
}

impl Fixture {
    fn new(fen: &str, params: SearchParams) -> Self {
        Fixture {
            position: make_position(fen),
            tt: TranspositionTable::with_slots(1 << 18),
            tables: SearchTables::new(),
            params,
            timer: TurnTimer::start(u64::MAX, u64::MAX),
        }
    }

    fn searcher(&mut self) -> Searcher<'_> {
        Searcher::new(
            &mut self.position,
            &mut self.tt,
            &mut self.tables,
            &self.params,
            &self.timer,
        )
    }

    /// Run negamax and return the score with the node count.
    fn negamax(
        &mut self,
        depth: i32,
        ply: usize,
        alpha: i32,
        beta: i32,
        allow_null: bool,
    ) -> (i32, u64) {
        let mut searcher = self.searcher();
        let score = searcher
            .negamax(depth, ply, alpha, beta, allow_null)
            .expect("untimed search is never aborted");
        (score, searcher.stats.nodes)
    }

    /// Depth stored in the TT for the position after each legal move.
    fn child_depths(&mut self) -> Vec<Option<i32>> {
        let mut depths = Vec::new();
        for mv in self.position.legal_moves() {
            self.position.make_move(&mv);
            depths.push(self.tt.probe(self.position.hash()).map(|e| e.depth));
            self.position.undo_move();
        }
        depths
    }
}

// ============================================================================
// Check extension
// ============================================================================

#[test]
fn checked_horizon_node_is_extended_to_see_mate() {
    // Black to move after Ra8+, no legal reply
    let mut fx = Fixture::new("R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1", SearchParams::default());
    let (score, _) = fx.negamax(0, 1, -INFINITY, INFINITY, true);
    assert_eq!(score, 1 - MATE_SCORE);
}

#[test]
fn check_extension_finds_mate_at_depth_one() {
    let mut fx = Fixture::new("6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1", SearchParams::default());
    let (score, _) = fx.negamax(1, 0, -INFINITY, INFINITY, true);
    assert_eq!(score, MATE_SCORE - 1);
}

// ============================================================================
// Pruning tests
// ============================================================================

#[test]
fn reverse_futility_returns_static_eval() {
    let mut fx = Fixture::new(QUEEN_UP_FEN, SearchParams::default());
    let static_eval = fx.position.evaluate();
    assert!(static_eval - 96 >= 1);

    let (score, nodes) = fx.negamax(1, 1, 0, 1, true);
    assert_eq!(score, static_eval);
    assert_eq!(nodes, 1, "no move may be searched");
}

#[test]
fn reverse_futility_skipped_at_pv_node() {
    let mut fx = Fixture::new(QUEEN_UP_FEN, SearchParams::default());
    let (_, nodes) = fx.negamax(1, 1, 0, 2, true);
    assert!(nodes > 1);
}

#[test]
fn null_move_fails_high_and_restores_position() {
    let params = SearchParams {
        rfp_max_depth: 0,
        ..SearchParams::default()
    };
    let mut fx = Fixture::new(QUEEN_UP_FEN, params);
    let hash = fx.position.hash();

    let (score, nodes) = fx.negamax(2, 1, 0, 1, true);
    assert!(score >= 1, "null move should fail high, got {score}");
    assert!(score > 800);
    // The node itself plus the quiescence search after passing
    assert_eq!(nodes, 2);
    assert_eq!(fx.position.plies_played(), 0);
    assert_eq!(fx.position.hash(), hash);
    assert!(fx.position.white_to_move());
}

#[test]
fn null_move_not_tried_when_disallowed() {
    let params = SearchParams {
        rfp_max_depth: 0,
        ..SearchParams::default()
    };
    let mut fx = Fixture::new(QUEEN_UP_FEN, params);
    let (score, nodes) = fx.negamax(2, 1, 0, 1, false);
    assert!(score >= 1);
    // A real move was searched instead of a pass
    assert!(fx.tables.killers.get(1).is_some());
    assert!(nodes > 2);
}

/// Back rank with Ra8# available. The hash move Kf1 is ordered first, so
/// the mate is a later quiet move.
const QUIET_MATE_FEN: &str = "6k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1";

fn quiet_mate_fixture(params: SearchParams) -> Fixture {
    let mut fx = Fixture::new(QUIET_MATE_FEN, params);
    let kf1 = fx.position.find_move("g1f1").expect("legal");
    // Too shallow to cut off, only supplies the hash move
    fx.tt
        .store(fx.position.hash(), Some(kf1.raw()), 0, 0, BoundType::Exact);
    fx
}

#[test]
fn futility_skips_quiet_moves_including_checks() {
    let mut fx = quiet_mate_fixture(SearchParams::default());
    let static_eval = fx.position.evaluate();
    assert!(static_eval + 141 <= 1000);

    let (score, nodes) = fx.negamax(1, 1, 1000, 1001, false);
    assert!(score <= 1000, "Ra8# must be pruned, got {score}");
    // Only the first move (Kf1) was searched
    assert_eq!(nodes, 2);
    assert_eq!(fx.tables.killers.get(1), None);
    for piece in ALL_PIECES {
        for square in ALL_SQUARES {
            assert_eq!(fx.tables.history.score(Color::White, piece, square), 0);
        }
    }
}

#[test]
fn without_futility_quiet_mate_is_found() {
    let params = SearchParams {
        futility_max_depth: 0,
        ..SearchParams::default()
    };
    let mut fx = quiet_mate_fixture(params);

    let (score, _) = fx.negamax(1, 1, 1000, 1001, false);
    assert_eq!(score, MATE_SCORE - 2);
    let ra8 = fx.position.find_move("a1a8").expect("legal");
    assert_eq!(fx.tables.killers.get(1), Some(ra8.raw()));
    assert_eq!(fx.tables.history.score(Color::White, ra8.piece(), ra8.to()), 1);
}

// ============================================================================
// Cutoff bookkeeping
// ============================================================================

#[test]
fn quiet_cutoff_records_killer_and_history() {
    let params = SearchParams {
        rfp_max_depth: 0,
        ..SearchParams::default()
    };
    let mut fx = Fixture::new(QUEEN_UP_FEN, params);

    let (score, nodes) = fx.negamax(1, 1, -1000, -999, false);
    assert!(score >= -999);
    // The first move already refutes the window
    assert_eq!(nodes, 2);

    let killer = fx.tables.killers.get(1).expect("quiet cutoff sets the killer");
    let mv = fx
        .position
        .legal_moves()
        .into_iter()
        .find(|m| *m == killer)
        .expect("killer is a legal move");
    assert!(!mv.is_capture());
    assert_eq!(fx.tables.history.score(Color::White, mv.piece(), mv.to()), 1);
}

#[test]
fn capture_cutoff_leaves_killers_alone() {
    // exd5 wins the queen and refutes the window
    let params = SearchParams {
        rfp_max_depth: 0,
        ..SearchParams::default()
    };
    let mut fx = Fixture::new("4k3/8/8/3q4/4P3/8/8/4K3 w - - 0 1", params);
    let (score, _) = fx.negamax(1, 1, -1, 0, false);
    assert!(score >= 0);
    assert_eq!(fx.tables.killers.get(1), None);
}

// ============================================================================
// Late move reductions
// ============================================================================

/// Prunes nothing, so every searched child stores its depth in the TT
fn unpruned_params() -> SearchParams {
    SearchParams {
        rfp_max_depth: 0,
        null_min_depth: i32::MAX,
        futility_max_depth: 0,
        ..SearchParams::default()
    }
}

#[test]
fn late_quiet_moves_are_searched_reduced() {
    let mut fx = Fixture::new(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1",
        unpruned_params(),
    );
    // Every move fails low against alpha = 500
    let (score, _) = fx.negamax(4, 1, 500, 501, false);
    assert!(score <= 500);

    let depths = fx.child_depths();
    assert_eq!(depths.len(), 20);
    let reduced = depths.iter().filter(|d| **d == Some(1)).count();
    let full = depths.iter().filter(|d| **d == Some(3)).count();
    // The first five moves are exempt, the other fifteen use depth - 3
    assert!(full <= 5, "full depth children: {full}");
    assert!(reduced >= 10, "reduced children: {reduced}");
    assert!(depths.iter().flatten().all(|d| *d == 1 || *d == 3));
}

#[test]
fn reductions_disabled_search_every_child_at_full_depth() {
    let params = SearchParams {
        lmr_min_moves: usize::MAX,
        ..unpruned_params()
    };
    let mut fx = Fixture::new(
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w - - 0 1",
        params,
    );
    let (score, _) = fx.negamax(4, 1, 500, 501, false);
    assert!(score <= 500);

    let depths = fx.child_depths();
    assert!(depths.iter().flatten().all(|d| *d == 3));
    assert!(depths.iter().filter(|d| d.is_some()).count() >= 15);
}

// ============================================================================
// Iterative deepening
// ============================================================================

#[test]
fn failed_aspiration_window_researches_same_depth() {
    // A zero-width window around the previous score always fails once
    let params = SearchParams {
        aspiration_window: 0,
        ..SearchParams::default()
    };
    let mut fx = Fixture::new(
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w - - 2 3",
        params,
    );
    let depths = Arc::new(Mutex::new(Vec::new()));
    let callback: SearchInfoCallback = {
        let depths = Arc::clone(&depths);
        Arc::new(move |info: &SearchIterationInfo| {
            depths.lock().expect("not poisoned").push(info.depth);
        })
    };

    let mut searcher = fx.searcher();
    searcher.info_callback = Some(callback);
    let result = searcher.iterative_deepening(Some(3));

    assert!(searcher.stats.researches >= 1);
    assert_eq!(result.depth, 3);
    assert!(result.best_move.is_some());
    // Depth only advances once a window holds the score
    assert_eq!(*depths.lock().expect("not poisoned"), vec![2, 3]);
}

#[test]
fn full_window_first_iteration_needs_no_research() {
    let mut fx = Fixture::new(
        "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w - - 2 3",
        SearchParams::default(),
    );
    let mut searcher = fx.searcher();
    let result = searcher.iterative_deepening(Some(2));
    assert_eq!(result.depth, 2);
    assert_eq!(searcher.stats.researches, 0);
}
