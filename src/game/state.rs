//! The table state: field, reserve, active slot, and the card index
//!
//! This is the central structure that holds all cards in play. Zones store
//! card ids; the cards themselves live in the index, so a card leaving the
//! table (mid-move) is handed to the caller by value and re-inserted when it
//! lands in its next zone.

use crate::core::{Card, CardId, CardStore};
use crate::game::logger::{log_if_verbose, GameLogger};
use crate::game::rules::cards_match;
use crate::zones::{CardZone, Zone};
use crate::{GameError, Result};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// Complete table state
///
/// Owns the three zones and the id -> card index covering their union.
/// Every card id in the index is reachable from exactly one zone; the zone
/// primitives below preserve that invariant and the per-zone orientation
/// rules (field and active face-up, reserve face-down).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Play area of matchable cards
    field: CardZone,

    /// Draw pile; back element is the next draw
    reserve: CardZone,

    /// The single current match target
    active: Option<CardId>,

    /// Index over every card currently owned by a zone
    cards: CardStore<Card>,

    /// Centralized logger for game events
    pub logger: GameLogger,
}

impl GameState {
    /// Create an empty table
    pub fn new() -> Self {
        GameState {
            field: CardZone::new(Zone::Field),
            reserve: CardZone::new(Zone::Reserve),
            active: None,
            cards: CardStore::new(),
            logger: GameLogger::new(),
        }
    }

    // ---- read access ----

    pub fn field(&self) -> &CardZone {
        &self.field
    }

    pub fn reserve(&self) -> &CardZone {
        &self.reserve
    }

    pub fn active_id(&self) -> Option<CardId> {
        self.active
    }

    /// The current match target, if any
    pub fn active_card(&self) -> Option<&Card> {
        self.active.and_then(|id| self.cards.get(id).ok())
    }

    /// Look up a card by id; misses are `None`, never an error
    pub fn lookup(&self, id: CardId) -> Option<&Card> {
        self.cards.get(id).ok()
    }

    pub fn lookup_mut(&mut self, id: CardId) -> Option<&mut Card> {
        self.cards.get_mut(id).ok()
    }

    /// Look up a card that the caller requires to exist
    pub fn card(&self, id: CardId) -> Result<&Card> {
        self.cards.get(id)
    }

    /// Total number of cards across all zones
    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    /// The next card the reserve would yield
    pub fn peek_reserve_top(&self) -> Option<CardId> {
        self.reserve.peek_top()
    }

    pub fn is_field_cleared(&self) -> bool {
        self.field.is_empty()
    }

    /// Whether any forward move is currently legal (field match or draw)
    pub fn has_playable_move(&self) -> bool {
        if !self.reserve.is_empty() {
            return true;
        }
        let Some(active) = self.active_card() else {
            return false;
        };
        self.field
            .iter()
            .filter_map(|id| self.cards.get(*id).ok())
            .any(|card| cards_match(card, active))
    }

    // ---- bulk replacement ----

    /// Overwrite the field, rebuilding index entries for the affected cards.
    /// Field cards are face-up.
    pub fn replace_field(&mut self, cards: Vec<Card>) {
        for id in self.field.cards.drain(..) {
            self.cards.remove(id);
        }
        for mut card in cards {
            card.turn_face_up();
            self.field.add(card.id);
            self.cards.insert(card.id, card);
        }
    }

    /// Overwrite the reserve, rebuilding index entries for the affected
    /// cards. Reserve cards are face-down.
    pub fn replace_reserve(&mut self, cards: Vec<Card>) {
        for id in self.reserve.cards.drain(..) {
            self.cards.remove(id);
        }
        for mut card in cards {
            card.turn_face_down();
            self.reserve.add(card.id);
            self.cards.insert(card.id, card);
        }
    }

    // ---- single-card moves ----

    /// Install a card as the active match target, face-up.
    ///
    /// Returns the displaced previous active card with ownership. The model
    /// never relocates the displaced card itself; its destination (reserve
    /// vs. discard) is the controller's policy.
    pub fn set_active(&mut self, mut card: Card) -> Option<Card> {
        card.turn_face_up();
        let displaced = self.active.and_then(|id| self.cards.remove(id));
        self.active = Some(card.id);
        self.cards.insert(card.id, card);
        displaced
    }

    /// Remove and return the active card
    pub fn take_active(&mut self) -> Option<Card> {
        let id = self.active.take()?;
        self.cards.remove(id)
    }

    /// Remove a card from the field, transferring ownership to the caller.
    /// A no-op (logged) when the id is not on the field.
    pub fn remove_from_field(&mut self, card_id: CardId) -> Option<Card> {
        if !self.field.remove(card_id) {
            log_if_verbose!(self.logger, "GameState: card {card_id} is not on the field");
            return None;
        }
        self.cards.remove(card_id)
    }

    /// Pop the next card from the reserve, transferring ownership to the
    /// caller pending re-insertion as active. `None` when the reserve is
    /// empty.
    pub fn draw_from_reserve(&mut self) -> Option<Card> {
        let Some(id) = self.reserve.draw_top() else {
            log_if_verbose!(self.logger, "GameState: no more cards in the reserve stack");
            return None;
        };
        self.cards.remove(id)
    }

    /// Remove a specific card from the reserve (undo restoration path)
    pub fn remove_from_reserve(&mut self, card_id: CardId) -> Option<Card> {
        if !self.reserve.remove(card_id) {
            return None;
        }
        self.cards.remove(card_id)
    }

    /// Put a card back on the field, face-up
    pub fn return_to_field(&mut self, mut card: Card) {
        card.turn_face_up();
        self.field.add(card.id);
        self.cards.insert(card.id, card);
    }

    /// Put a card onto the draw end of the reserve, face-down
    pub fn return_to_reserve(&mut self, mut card: Card) {
        card.turn_face_down();
        self.reserve.add(card.id);
        self.cards.insert(card.id, card);
    }

    // ---- invariant checking ----

    /// Verify the zone partition and orientation invariants
    ///
    /// Every card id in the index must be reachable from exactly one zone,
    /// field and active cards must be face-up, reserve cards face-down.
    pub fn verify_integrity(&self) -> Result<()> {
        let mut seen = FxHashSet::default();
        let zone_ids = self
            .field
            .iter()
            .copied()
            .map(|id| (id, Zone::Field))
            .chain(self.reserve.iter().copied().map(|id| (id, Zone::Reserve)))
            .chain(self.active.iter().copied().map(|id| (id, Zone::Active)));

        for (id, zone) in zone_ids {
            if !seen.insert(id) {
                return Err(GameError::InconsistentState(format!(
                    "card {id} is present in more than one zone"
                )));
            }
            let card = self.cards.get(id).map_err(|_| {
                GameError::InconsistentState(format!("card {id} is in {zone:?} but not indexed"))
            })?;
            let face_up_expected = !matches!(zone, Zone::Reserve);
            if card.face_up != face_up_expected {
                return Err(GameError::InconsistentState(format!(
                    "card {id} in {zone:?} has the wrong orientation"
                )));
            }
        }

        if seen.len() != self.cards.len() {
            return Err(GameError::InconsistentState(format!(
                "index holds {} cards but zones reach {}",
                self.cards.len(),
                seen.len()
            )));
        }
        Ok(())
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Position, Rank, Suit};

    fn card(id: u32, rank: Rank) -> Card {
        Card::new(CardId::new(id), rank, Suit::Hearts)
    }

    #[test]
    fn test_replace_field_rebuilds_index() {
        let mut state = GameState::new();
        state.replace_field(vec![card(1, Rank::Five), card(2, Rank::Nine)]);

        assert_eq!(state.field().len(), 2);
        assert_eq!(state.card_count(), 2);
        assert!(state.lookup(CardId::new(1)).unwrap().face_up);

        state.replace_field(vec![card(3, Rank::Two)]);
        assert_eq!(state.field().len(), 1);
        assert_eq!(state.card_count(), 1);
        assert!(state.lookup(CardId::new(1)).is_none());
    }

    #[test]
    fn test_set_active_returns_displaced_card() {
        let mut state = GameState::new();
        assert!(state.set_active(card(1, Rank::Six)).is_none());

        let displaced = state.set_active(card(2, Rank::Seven)).unwrap();
        assert_eq!(displaced.id, CardId::new(1));
        assert_eq!(state.active_id(), Some(CardId::new(2)));
        // the displaced card left the index entirely
        assert!(state.lookup(CardId::new(1)).is_none());
    }

    #[test]
    fn test_remove_from_field_miss_is_noop() {
        let mut state = GameState::new();
        state.replace_field(vec![card(1, Rank::Five)]);

        assert!(state.remove_from_field(CardId::new(99)).is_none());
        assert_eq!(state.field().len(), 1);

        let removed = state.remove_from_field(CardId::new(1)).unwrap();
        assert_eq!(removed.id, CardId::new(1));
        assert!(state.lookup(CardId::new(1)).is_none());
    }

    #[test]
    fn test_draw_from_reserve_pops_back() {
        let mut state = GameState::new();
        state.replace_reserve(vec![card(1, Rank::Two), card(2, Rank::Nine)]);

        let drawn = state.draw_from_reserve().unwrap();
        assert_eq!(drawn.id, CardId::new(2));
        assert!(!drawn.face_up);
        assert_eq!(state.reserve().len(), 1);

        state.draw_from_reserve().unwrap();
        assert!(state.draw_from_reserve().is_none());
    }

    #[test]
    fn test_orientation_enforced_by_zone_moves() {
        let mut state = GameState::new();
        let mut c = card(1, Rank::Five);
        c.turn_face_up();
        state.return_to_reserve(c);
        assert!(!state.lookup(CardId::new(1)).unwrap().face_up);

        let c = state.remove_from_reserve(CardId::new(1)).unwrap();
        state.return_to_field(c);
        assert!(state.lookup(CardId::new(1)).unwrap().face_up);
    }

    #[test]
    fn test_has_playable_move() {
        let mut state = GameState::new();
        state.replace_field(vec![card(1, Rank::Five)]);
        state.set_active(card(2, Rank::Six));
        assert!(state.has_playable_move());

        // no reserve, field card does not match
        let mut state = GameState::new();
        state.replace_field(vec![card(1, Rank::Five)]);
        state.set_active(card(2, Rank::Nine));
        assert!(!state.has_playable_move());

        // empty field but a reserve card remains
        let mut state = GameState::new();
        state.replace_reserve(vec![card(1, Rank::Ace)]);
        state.set_active(card(2, Rank::Nine));
        assert!(state.has_playable_move());
    }

    #[test]
    fn test_verify_integrity_accepts_valid_state() {
        let mut state = GameState::new();
        state.replace_field(vec![card(1, Rank::Five)]);
        state.replace_reserve(vec![card(2, Rank::Two)]);
        state.set_active(card(3, Rank::Six));
        state.verify_integrity().unwrap();
    }

    #[test]
    fn test_verify_integrity_flags_wrong_orientation() {
        let mut state = GameState::new();
        state.replace_field(vec![card(1, Rank::Five)]);
        state.lookup_mut(CardId::new(1)).unwrap().turn_face_down();
        assert!(state.verify_integrity().is_err());
    }

    #[test]
    fn test_positions_survive_zone_moves() {
        let mut state = GameState::new();
        let mut c = card(1, Rank::Five);
        c.position = Position::new(10.0, 10.0);
        state.replace_field(vec![c]);

        let removed = state.remove_from_field(CardId::new(1)).unwrap();
        assert_eq!(removed.position, Position::new(10.0, 10.0));
    }
}
