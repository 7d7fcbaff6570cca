//! Table zones (Field, Reserve, Active)

use crate::core::CardId;
use serde::{Deserialize, Serialize};

/// The three zones a card can occupy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Play area of face-up, matchable cards
    Field,
    /// Face-down draw pile; the back element is drawn next
    Reserve,
    /// The single face-up match target
    Active,
}

/// An ordered zone of card ids
///
/// Order is significant for the reserve (back = next to draw); the field is
/// semantically unordered but kept in insertion order for deterministic
/// iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardZone {
    /// Zone type
    pub zone_type: Zone,

    /// Cards in this zone
    pub cards: Vec<CardId>,
}

impl CardZone {
    pub fn new(zone_type: Zone) -> Self {
        CardZone {
            zone_type,
            cards: Vec::new(),
        }
    }

    pub fn add(&mut self, card_id: CardId) {
        self.cards.push(card_id);
    }

    pub fn remove(&mut self, card_id: CardId) -> bool {
        if let Some(pos) = self.cards.iter().position(|&id| id == card_id) {
            // Order-preserving remove: iteration order drives rendering and
            // determinism tests, so no swap_remove even for the field.
            self.cards.remove(pos);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, card_id: CardId) -> bool {
        self.cards.contains(&card_id)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Draw from the top (back) of the zone
    pub fn draw_top(&mut self) -> Option<CardId> {
        self.cards.pop()
    }

    /// Look at the next card to draw without removing it
    pub fn peek_top(&self) -> Option<CardId> {
        self.cards.last().copied()
    }

    /// Add to the bottom (drawn last)
    pub fn add_to_bottom(&mut self, card_id: CardId) {
        self.cards.insert(0, card_id);
    }

    pub fn iter(&self) -> impl Iterator<Item = &CardId> {
        self.cards.iter()
    }

    /// Clear all cards
    pub fn clear(&mut self) {
        self.cards.clear();
    }
}
