//! Game initialization from level configuration
//!
//! The sole legitimate way to produce a starting table state. Assigns fresh
//! ids to every configured card, deals the field and the reserve, and
//! promotes the top of the reserve to the initial active card.

use crate::core::{Card, IdAllocator, Position};
use crate::game::GameState;
use crate::loader::level::{CardSpec, LevelConfig};
use crate::{GameError, Result};

/// Builds initial table states from level configurations
///
/// Owns the id allocator for the session, so repeated generation (new game,
/// next level) keeps ids unique across all tables it produced.
#[derive(Debug, Clone, Default)]
pub struct LevelGenerator {
    ids: IdAllocator,
}

impl LevelGenerator {
    /// A generator with a fresh id allocator (ids start at 1)
    pub fn new() -> Self {
        LevelGenerator {
            ids: IdAllocator::new(),
        }
    }

    /// A generator resuming a specific allocator
    pub fn with_allocator(ids: IdAllocator) -> Self {
        LevelGenerator { ids }
    }

    /// The id allocator state (for diagnostics and determinism tests)
    pub fn allocator(&self) -> &IdAllocator {
        &self.ids
    }

    /// Build the initial table for one level
    ///
    /// The reserve must hold at least one card: its top becomes the initial
    /// active card, and the engine requires an active card from the first
    /// move on.
    pub fn generate(&mut self, config: &LevelConfig) -> Result<GameState> {
        if config.reserve.is_empty() {
            return Err(GameError::InvalidLevelFormat(
                "the reserve must supply the initial active card".to_string(),
            ));
        }

        let mut state = GameState::new();

        let field_cards: Vec<Card> = config
            .field
            .iter()
            .map(|spec| self.assemble_card(spec))
            .collect();
        state.replace_field(field_cards);

        let reserve_cards: Vec<Card> = config
            .reserve
            .iter()
            .map(|spec| self.assemble_card(spec))
            .collect();
        state.replace_reserve(reserve_cards);

        // The top of the reserve opens the game as the active card.
        let mut first = state.draw_from_reserve().ok_or_else(|| {
            GameError::InvalidLevelFormat("the reserve emptied during initialization".to_string())
        })?;
        first.position = Position::ZERO;
        state.set_active(first);

        Ok(state)
    }

    fn assemble_card(&mut self, spec: &CardSpec) -> Card {
        let mut card = Card::new(self.ids.allocate(), spec.rank, spec.suit);
        card.position = spec.position;
        card
    }
}
