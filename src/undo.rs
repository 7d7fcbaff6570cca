//! Undo records and the move history
//!
//! Each committed move pushes a record carrying exactly the side information
//! needed to invert it: prior positions and zone occupants that are not
//! recoverable from the post-move state alone. Records are captured before
//! the forward mutation runs and consumed at most once.

use crate::core::{CardId, Position};
use serde::{Deserialize, Serialize};

/// Inverse data for one committed, user-visible move
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MoveRecord {
    /// A field card was matched onto the active card
    Match {
        /// The field card that became the new active card
        matched_card: CardId,
        /// The active card displaced into the reserve
        previous_active: CardId,
        /// Where the matched card sat on the field
        matched_prior_position: Position,
    },

    /// A card was drawn from the reserve
    Draw {
        /// The drawn card that became the new active card
        drawn_card: CardId,
        /// The active card displaced into the reserve
        previous_active: CardId,
        /// Where the previous active card sat
        previous_active_prior_position: Position,
    },
}

/// Strictly LIFO history of committed moves
///
/// Push on move, pop on undo; cleared entirely when a new game starts.
/// Depth is bounded only by memory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryStack {
    /// Records, most recent at the end
    records: Vec<MoveRecord>,
}

impl HistoryStack {
    pub fn new() -> Self {
        HistoryStack {
            records: Vec::new(),
        }
    }

    /// Record a committed move
    pub fn push(&mut self, record: MoveRecord) {
        self.records.push(record);
    }

    /// Pop and return the most recent record
    pub fn pop(&mut self) -> Option<MoveRecord> {
        self.records.pop()
    }

    /// Get the most recent record without removing it
    pub fn peek(&self) -> Option<&MoveRecord> {
        self.records.last()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Clear the entire history
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Get all records (for debugging/serialization)
    pub fn records(&self) -> &[MoveRecord] {
        &self.records
    }
}
