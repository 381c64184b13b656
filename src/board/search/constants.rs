//! Search constants.

// ============================================================================
// SCORES
// ============================================================================

/// Bound wider than any reachable score
pub const INFINITY: i32 = 9_999_999;

/// Score of being mated at the root; a mate found `n` plies deep scores `n - MATE_SCORE`
pub const MATE_SCORE: i32 = 99_999;

/// Score of a drawn position
pub const DRAW_SCORE: i32 = 0;

/// Maximum ply tracked by the per-ply tables
pub const MAX_PLY: usize = 64;

/// Scores with absolute value >= this are checkmate scores
pub const MATE_THRESHOLD: i32 = MATE_SCORE - MAX_PLY as i32;

// ============================================================================
// MOVE ORDERING PRIORITIES
// ============================================================================
// Higher scores = tried earlier. Ordered: hash move > captures > killer > history

/// Hash move (from transposition table) - highest priority
pub const HASH_MOVE_SCORE: i32 = 9_000_000;

/// Captures score `CAPTURE_SCALE * victim - attacker` on piece ordinals (pawn = 1)
pub const CAPTURE_SCALE: i32 = 1_000_000;

/// Killer move (quiet that caused a beta cutoff at the same ply)
pub const KILLER_SCORE: i32 = 900_000;
