pub mod board;
pub mod engine;
pub mod timer;
pub mod tt;

pub use board::{Move, Position, PositionError, SearchLimits, SearchResult};
pub use engine::{Engine, EngineConfig};
pub use tt::TranspositionTable;
