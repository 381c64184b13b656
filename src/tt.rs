//! Transposition table for caching search results.
//!
//! A flat array of slots addressed by the low bits of the Zobrist key.
//! Every store overwrites its slot (always-replace). A probe only returns
//! an entry whose stored key equals the probing key, so two positions that
//! share a slot never see each other's results.

use std::mem;

use chess::ChessMove;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundType {
    Exact,      // Score is the exact value
    LowerBound, // Score is at least this value (failed high - score >= beta)
    UpperBound, // Score is at most this value (failed low - score <= alpha)
}

impl BoundType {
    /// Classify a node's final score against its search window.
    #[must_use]
    pub fn classify(score: i32, original_alpha: i32, beta: i32) -> Self {
        if score >= beta {
            BoundType::LowerBound
        } else if score <= original_alpha {
            BoundType::UpperBound
        } else {
            BoundType::Exact
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TTEntry {
    pub key: u64,
    pub best_move: Option<ChessMove>,
    pub depth: i32,
    pub score: i32,
    pub bound_type: BoundType,
}

impl TTEntry {
    /// Score that may replace a search of `depth` plies with window
    /// `(alpha, beta)`, if the stored result is deep enough and its bound
    /// settles the window.
    #[must_use]
    pub fn cutoff(&self, depth: i32, alpha: i32, beta: i32) -> Option<i32> {
        if self.depth < depth {
            return None;
        }
        let usable = match self.bound_type {
            BoundType::Exact => true,
            BoundType::LowerBound => self.score >= beta,
            BoundType::UpperBound => self.score <= alpha,
        };
        usable.then_some(self.score)
    }
}

pub struct TranspositionTable {
    slots: Vec<Option<TTEntry>>,
    mask: usize,
}

impl TranspositionTable {
    /// Create a new transposition table with the given size in megabytes.
    #[must_use]
    pub fn new(size_mb: usize) -> Self {
        let slot_size = mem::size_of::<Option<TTEntry>>();
        let mut num_slots = (size_mb * 1024 * 1024) / slot_size;

        // Power of two so the key can be masked instead of divided
        num_slots = num_slots.next_power_of_two() / 2;
        if num_slots == 0 {
            num_slots = 1024;
        }
        Self::with_slots(num_slots)
    }

    /// Create a table with exactly `num_slots` slots, rounded up to a power of two.
    #[must_use]
    pub fn with_slots(num_slots: usize) -> Self {
        let num_slots = num_slots.max(1).next_power_of_two();
        TranspositionTable {
            slots: vec![None; num_slots],
            mask: num_slots - 1,
        }
    }

    #[inline]
    fn index(&self, key: u64) -> usize {
        (key as usize) & self.mask
    }

    /// Entry for `key`, if its slot currently holds that key.
    #[inline]
    #[must_use]
    pub fn probe(&self, key: u64) -> Option<&TTEntry> {
        self.slots[self.index(key)]
            .as_ref()
            .filter(|entry| entry.key == key)
    }

    /// Store an entry, replacing whatever occupied the slot.
    pub fn store(
        &mut self,
        key: u64,
        best_move: Option<ChessMove>,
        depth: i32,
        score: i32,
        bound_type: BoundType,
    ) {
        let idx = self.index(key);
        self.slots[idx] = Some(TTEntry {
            key,
            best_move,
            depth,
            score,
            bound_type,
        });
    }

    /// Returns hash table fullness in per mille (0-1000).
    #[must_use]
    pub fn hashfull_per_mille(&self) -> u32 {
        let sample_size = self.slots.len().min(1000);
        let occupied = self
            .slots
            .iter()
            .take(sample_size)
            .filter(|slot| slot.is_some())
            .count();
        ((occupied as u64 * 1000) / sample_size as u64) as u32
    }

    /// Clear all entries from the table.
    pub fn clear(&mut self) {
        self.slots.fill(None);
    }
}
