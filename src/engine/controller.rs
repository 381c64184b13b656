//! Engine controller implementation.

use chess::ChessMove;
use log::info;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::board::search::{self, SearchParams};
use crate::board::{Position, SearchInfoCallback, SearchLimits, SearchResult};
use crate::timer::DEFAULT_TIME_DIVISOR;
use crate::tt::TranspositionTable;

/// Default transposition table size
pub const DEFAULT_HASH_MB: usize = 64;

/// Engine configuration
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Transposition table size in megabytes
    pub hash_mb: usize,
    /// Each move may use `remaining / time_divisor` of the game clock
    pub time_divisor: u64,
    pub params: SearchParams,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            hash_mb: DEFAULT_HASH_MB,
            time_divisor: DEFAULT_TIME_DIVISOR,
            params: SearchParams::default(),
        }
    }
}

/// Engine controller managing the search state of one game
pub struct Engine {
    tt: TranspositionTable,
    config: EngineConfig,
    /// Optional callback for per-iteration search info
    info_callback: Option<SearchInfoCallback>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Engine {
    /// Create a new engine
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Engine {
            tt: TranspositionTable::new(config.hash_mb),
            config,
            info_callback: None,
        }
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Set callback for per-iteration search info
    pub fn set_info_callback(&mut self, callback: Option<SearchInfoCallback>) {
        self.info_callback = callback;
    }

    /// Choose a move with `remaining_ms` left on the game clock.
    ///
    /// Returns `None` only when the side to move has no legal move.
    pub fn think(&mut self, position: &mut Position, remaining_ms: u64) -> Option<ChessMove> {
        let limits = SearchLimits::from_clock(remaining_ms, self.config.time_divisor);
        let result = self.search(position, &limits);
        info!(
            "bestmove {} score {} depth {} nodes {} time {} ms",
            result
                .best_move
                .map_or_else(|| "(none)".to_string(), |m| m.to_string()),
            result.score,
            result.depth,
            result.nodes,
            result.elapsed_ms
        );
        result.best_move
    }

    /// Search `position` within `limits`.
    pub fn search(&mut self, position: &mut Position, limits: &SearchLimits) -> SearchResult {
        search::search(
            position,
            &mut self.tt,
            &self.config.params,
            limits,
            self.info_callback.clone(),
        )
    }

    /// Forget everything learned in the previous game
    pub fn new_game(&mut self) {
        self.tt.clear();
    }

    /// Transposition table occupancy in per mille
    #[must_use]
    pub fn hashfull(&self) -> u32 {
        self.tt.hashfull_per_mille()
    }
}
