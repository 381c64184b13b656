use log::{debug, trace};

use super::super::constants::INFINITY;
use super::super::{mate_in, SearchIterationInfo, SearchResult};
use super::Searcher;

impl Searcher<'_> {
    /// Iterative deepening with aspiration windows.
    ///
    /// A window that fails low or high is widened on that side and the same
    /// depth is searched again; a score inside the window narrows the next
    /// window around it and advances the depth. Runs until the timer expires
    /// or `max_depth` completes.
    pub(crate) fn iterative_deepening(&mut self, max_depth: Option<i32>) -> SearchResult {
        let params = self.params;
        let mut result = SearchResult::default();
        let mut depth = params.min_depth;
        let mut alpha = -INFINITY;
        let mut beta = INFINITY;

        loop {
            let outcome = self.negamax(depth, 0, alpha, beta, true);
            // An interrupted iteration still leaves its best root move
            if let Some(mv) = self.root_best {
                result.best_move = Some(mv.raw());
            }
            self.interruptible = true;

            let Ok(score) = outcome else {
                debug!("depth {depth} interrupted after {} nodes", self.stats.nodes);
                break;
            };

            if score <= alpha {
                trace!("depth {depth} failed low at {score}, window [{alpha}, {beta}]");
                alpha -= params.aspiration_widen;
                self.stats.researches += 1;
            } else if score >= beta {
                trace!("depth {depth} failed high at {score}, window [{alpha}, {beta}]");
                beta += params.aspiration_widen;
                self.stats.researches += 1;
            } else {
                result.score = score;
                result.depth = depth;
                self.report_iteration(depth, score, result.best_move);

                if max_depth.is_some_and(|max| depth >= max) {
                    break;
                }
                alpha = score - params.aspiration_window;
                beta = score + params.aspiration_window;
                depth += 1;
            }

            if self.should_stop() {
                break;
            }
        }

        result.nodes = self.stats.nodes;
        result.tt_hits = self.stats.tt_hits;
        result.elapsed_ms = self.timer.elapsed_ms();
        result
    }

    fn report_iteration(&self, depth: i32, score: i32, best_move: Option<chess::ChessMove>) {
        let time_ms = self.timer.elapsed_ms();
        debug!(
            "depth {depth} seldepth {} score {score} nodes {} researches {} time {time_ms} ms best {}",
            self.stats.seldepth,
            self.stats.nodes,
            self.stats.researches,
            best_move.map_or_else(|| "none".to_string(), |m| m.to_string())
        );

        if let Some(cb) = &self.info_callback {
            let info = SearchIterationInfo {
                depth,
                seldepth: self.stats.seldepth,
                score,
                mate_in: mate_in(score),
                nodes: self.stats.nodes,
                tt_hits: self.stats.tt_hits,
                time_ms,
                best_move,
            };
            cb(&info);
        }
    }
}
