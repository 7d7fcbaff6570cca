//! Card identity and the id -> card index

use crate::{GameError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Simple integer ID for card instances
///
/// Keeps IDs simple and contiguous for human readability and dense storage.
/// An ID is never reused within a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(u32);

impl CardId {
    pub fn new(id: u32) -> Self {
        CardId(id)
    }

    pub fn as_u32(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonic allocator for fresh card IDs
///
/// Owned by the level generator and seeded fresh per game session, so id
/// assignment stays deterministic across runs and isolated across tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// IDs start at 1; 0 is never handed out
    pub fn new() -> Self {
        IdAllocator { next: 1 }
    }

    /// Resume allocation from a specific counter value
    pub fn starting_at(next: u32) -> Self {
        IdAllocator { next }
    }

    pub fn allocate(&mut self) -> CardId {
        let id = CardId::new(self.next);
        self.next += 1;
        id
    }

    /// The value the next call to `allocate` will return
    pub fn peek_next(&self) -> u32 {
        self.next
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

/// Central storage for card instances, keyed by CardId
///
/// This is the lookup index over every card currently owned by a zone.
/// Uses FxHashMap for fast hashing of integer keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardStore<T> {
    entries: FxHashMap<CardId, T>,
}

impl<T> CardStore<T> {
    pub fn new() -> Self {
        CardStore {
            entries: FxHashMap::default(),
        }
    }

    /// Insert an entry with a specific ID
    pub fn insert(&mut self, id: CardId, entry: T) {
        self.entries.insert(id, entry);
    }

    /// Get an entry by ID
    pub fn get(&self, id: CardId) -> Result<&T> {
        self.entries
            .get(&id)
            .ok_or(GameError::CardNotFound(id.as_u32()))
    }

    /// Get a mutable reference to an entry
    pub fn get_mut(&mut self, id: CardId) -> Result<&mut T> {
        self.entries
            .get_mut(&id)
            .ok_or(GameError::CardNotFound(id.as_u32()))
    }

    pub fn contains(&self, id: CardId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Remove an entry, transferring ownership to the caller
    pub fn remove(&mut self, id: CardId) -> Option<T> {
        self.entries.remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CardId, &T)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl<T> Default for CardStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
