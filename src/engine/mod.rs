//! Engine controller for move selection across a game.
//!
//! The controller owns the transposition table, which persists from one
//! move to the next, and turns the remaining game clock into a per-move
//! time limit.

mod controller;

pub use controller::{Engine, EngineConfig};
