#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunable margins, depths and reductions of the search.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchParams {
    /// First depth of iterative deepening; it always runs to completion
    pub min_depth: i32,
    /// Amount a failed aspiration bound is moved outwards
    pub aspiration_widen: i32,
    /// Half-width of the window around the previous score
    pub aspiration_window: i32,
    /// Nodes deeper than this ply score as draws
    pub draw_ply: usize,
    pub rfp_max_depth: i32,
    pub rfp_margin: i32,
    pub null_min_depth: i32,
    pub null_base_reduction: i32,
    pub null_depth_divisor: i32,
    pub futility_max_depth: i32,
    pub futility_margin: i32,
    pub lmr_min_depth: i32,
    /// Moves tried (current one included) below which no reduction applies
    pub lmr_min_moves: usize,
    pub lmr_reduction: i32,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            min_depth: 2,
            aspiration_widen: 62,
            aspiration_window: 17,
            draw_ply: 50,
            rfp_max_depth: 10,
            rfp_margin: 96,
            null_min_depth: 2,
            null_base_reduction: 3,
            null_depth_divisor: 5,
            futility_max_depth: 8,
            futility_margin: 141,
            lmr_min_depth: 3,
            lmr_min_moves: 6,
            lmr_reduction: 3,
        }
    }
}

impl SearchParams {
    /// Null-move reduction at `depth`.
    #[inline]
    #[must_use]
    pub fn null_reduction(&self, depth: i32) -> i32 {
        self.null_base_reduction + depth / self.null_depth_divisor.max(1)
    }
}
