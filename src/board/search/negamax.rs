//! Core search implementation.
//!
//! This module implements:
//! - Iterative deepening with aspiration windows
//! - Alpha-beta negamax with PVS and late move reductions
//! - Check extension
//! - Reverse futility, null move and futility pruning
//! - Quiescence search folded into the same node routine
//! - Move ordering (hash move, MVV-LVA, killers, history)

mod iterative;
mod pruning;

use crate::board::{Move, Position};
use crate::timer::TurnTimer;
use crate::tt::{BoundType, TranspositionTable};

use super::constants::{DRAW_SCORE, INFINITY, MATE_SCORE};
use super::move_order::order_moves;
use super::{Aborted, NodeResult, SearchInfoCallback, SearchParams, SearchStats, SearchTables};

/// Search context for a single move-selection call
pub(crate) struct Searcher<'a> {
    pub position: &'a mut Position,
    pub tt: &'a mut TranspositionTable,
    pub tables: &'a mut SearchTables,
    pub params: &'a SearchParams,
    pub timer: &'a TurnTimer,
    pub stats: SearchStats,
    /// Best root move of the iteration in progress
    pub root_best: Option<Move>,
    /// Cleared while the first iteration runs so it always completes
    pub interruptible: bool,
    pub info_callback: Option<SearchInfoCallback>,
}

#[derive(Clone, Copy)]
struct NodeContext {
    depth: i32,
    ply: usize,
    is_pv: bool,
    quiescence: bool,
}

impl<'a> Searcher<'a> {
    pub(crate) fn new(
        position: &'a mut Position,
        tt: &'a mut TranspositionTable,
        tables: &'a mut SearchTables,
        params: &'a SearchParams,
        timer: &'a TurnTimer,
    ) -> Self {
        Searcher {
            position,
            tt,
            tables,
            params,
            timer,
            stats: SearchStats::default(),
            root_best: None,
            interruptible: false,
            info_callback: None,
        }
    }

    /// Check if we should stop searching
    #[inline]
    fn should_stop(&self) -> bool {
        self.interruptible && self.timer.is_expired()
    }

    /// Negamax search of the current position to `depth` plies.
    ///
    /// Scores are from the side to move's perspective. Nodes at or below
    /// depth zero only search captures and promotions, standing pat on the
    /// static evaluation.
    pub(crate) fn negamax(
        &mut self,
        mut depth: i32,
        ply: usize,
        mut alpha: i32,
        beta: i32,
        allow_null: bool,
    ) -> NodeResult {
        let is_root = ply == 0;
        let is_pv = beta - alpha > 1;
        self.stats.nodes += 1;
        self.stats.seldepth = self.stats.seldepth.max(ply as u32);

        if (!is_root && self.position.is_repetition()) || ply > self.params.draw_ply {
            return Ok(DRAW_SCORE);
        }

        let key = self.position.hash();
        let entry = self.tt.probe(key).copied();
        if !is_root {
            if let Some(score) = entry.and_then(|e| e.cutoff(depth, alpha, beta)) {
                self.stats.tt_hits += 1;
                return Ok(score);
            }
        }
        let hash_move = entry.and_then(|e| e.best_move);

        let in_check = self.position.in_check();
        if in_check {
            depth += 1;
        }

        let node = NodeContext {
            depth,
            ply,
            is_pv,
            quiescence: depth <= 0,
        };
        let original_alpha = alpha;
        let mut best_score = -INFINITY;
        let mut futile = false;

        if node.quiescence {
            // Stand pat
            best_score = self.position.evaluate();
            alpha = alpha.max(best_score);
            if alpha >= beta {
                return Ok(best_score);
            }
        } else if !is_pv && !in_check {
            let static_eval = self.position.evaluate();
            let pruned = self.prune_node(depth, ply, alpha, beta, static_eval, allow_null)?;
            if let Some(score) = pruned {
                return Ok(score);
            }
            futile = self.futility_prunable(depth, static_eval, alpha);
        }

        let moves = if node.quiescence && !in_check {
            self.position.tactical_moves()
        } else {
            self.position.legal_moves()
        };
        if !node.quiescence && moves.is_empty() {
            return Ok(if in_check {
                ply as i32 - MATE_SCORE
            } else {
                DRAW_SCORE
            });
        }

        let side = self.position.side_to_move();
        let ordered = order_moves(
            &moves,
            hash_move,
            self.tables.killers.get(ply),
            &self.tables.history,
            side,
        );
        if is_root {
            self.root_best = ordered.first().map(|s| s.mv);
        }

        let mut best_move: Option<Move> = None;
        let mut moves_tried = 0usize;

        for scored in &ordered {
            let mv = scored.mv;
            let tactical = moves_tried == 0 || mv.is_tactical();
            if futile && !tactical {
                continue;
            }

            self.position.make_move(&mv);
            moves_tried += 1;
            let result = self.search_move(&node, alpha, beta, moves_tried, tactical);
            self.position.undo_move();
            let score = result?;

            if score > best_score {
                best_score = score;
                best_move = Some(mv);
                if is_root {
                    self.root_best = Some(mv);
                }
                alpha = alpha.max(score);
                if alpha >= beta {
                    if !mv.is_capture() {
                        self.tables.record_cutoff(ply, side, &mv, depth);
                    }
                    break;
                }
            }

            if self.should_stop() {
                return Err(Aborted);
            }
        }

        let bound = BoundType::classify(best_score, original_alpha, beta);
        self.tt
            .store(key, best_move.map(|m| m.raw()), depth, best_score, bound);
        Ok(best_score)
    }

    /// Search the move just made, staging cheap searches before full ones.
    ///
    /// The first move, and every quiescence move, gets a full window at full
    /// depth. Later moves get a reduced null-window search unless exempt, then
    /// a full-depth null-window check, then a full-window search, each only
    /// when the previous stage beat alpha.
    fn search_move(
        &mut self,
        node: &NodeContext,
        alpha: i32,
        beta: i32,
        moves_tried: usize,
        tactical: bool,
    ) -> NodeResult {
        let params = self.params;
        let depth = node.depth;
        let child_ply = node.ply + 1;

        if moves_tried == 1 || node.quiescence {
            return Ok(-self.negamax(depth - 1, child_ply, -beta, -alpha, true)?);
        }

        let exempt = node.is_pv
            || tactical
            || moves_tried < params.lmr_min_moves
            || depth < params.lmr_min_depth;
        let reduced = if exempt {
            alpha + 1
        } else {
            -self.negamax(
                depth - params.lmr_reduction,
                child_ply,
                -alpha - 1,
                -alpha,
                true,
            )?
        };
        if reduced <= alpha {
            return Ok(reduced);
        }

        let score = -self.negamax(depth - 1, child_ply, -alpha - 1, -alpha, true)?;
        if score <= alpha {
            return Ok(score);
        }

        Ok(-self.negamax(depth - 1, child_ply, -beta, -alpha, true)?)
    }
}
