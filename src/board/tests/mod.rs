//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `position.rs` - Make/undo, null moves, repetition
//! - `eval.rs` - Tapered evaluation and phase
//! - `search.rs` - Negamax terminal scores, draws, quiescence, TT cutoffs
//! - `search_tables.rs` - Killers, history and move ordering
//! - `proptest.rs` - Property-based tests

mod search;
