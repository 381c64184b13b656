use super::super::Aborted;
use super::Searcher;

impl Searcher<'_> {
    /// Run static/null-move pruning that can exit before generating moves.
    ///
    /// Only called at non-PV nodes outside check and quiescence.
    pub(super) fn prune_node(
        &mut self,
        depth: i32,
        ply: usize,
        alpha: i32,
        beta: i32,
        static_eval: i32,
        allow_null: bool,
    ) -> Result<Option<i32>, Aborted> {
        let params = self.params;
        // Reverse futility
        if depth <= params.rfp_max_depth && static_eval - params.rfp_margin * depth >= beta {
            return Ok(Some(static_eval));
        }

        if allow_null && depth >= params.null_min_depth {
            if let Some(score) = self.try_null_move(depth, ply, alpha, beta)? {
                return Ok(Some(score));
            }
        }

        Ok(None)
    }

    /// Pass the turn and search at reduced depth; a fail high returns the score.
    fn try_null_move(
        &mut self,
        depth: i32,
        ply: usize,
        alpha: i32,
        beta: i32,
    ) -> Result<Option<i32>, Aborted> {
        if !self.position.make_null_move() {
            return Ok(None);
        }
        let reduced = depth - self.params.null_reduction(depth);
        let result = self.negamax(reduced, ply + 1, -beta, -alpha, false);
        self.position.undo_null_move();

        let score = -result?;
        Ok((score >= beta).then_some(score))
    }

    /// Whether quiet moves after the first may be skipped at this node.
    #[inline]
    pub(super) fn futility_prunable(&self, depth: i32, static_eval: i32, alpha: i32) -> bool {
        depth <= self.params.futility_max_depth
            && static_eval + depth * self.params.futility_margin <= alpha
    }
}
