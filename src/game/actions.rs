//! Game actions and the apply dispatcher
//!
//! Actions are one-shot command values: a closed variant set consumed by
//! value by `GameState::apply`. They encapsulate the forward mutation but
//! not its inverse; the undo side data is captured separately before an
//! action runs.

use crate::core::{Card, CardId};
use crate::game::GameState;
use serde::{Deserialize, Serialize};

/// One-shot mutation of the table state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CardAction {
    /// Remove a card from the play field
    RemoveFromField { card_id: CardId },

    /// Pop the next card from the reserve
    DrawFromReserve,

    /// Install a card as the active match target
    PromoteToActive { card: Card },
}

/// What an applied action did, carrying any card that left its zone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ActionOutcome {
    /// The card removed from the field
    Removed(Card),

    /// The card drawn from the reserve
    Drawn(Card),

    /// The promotion happened; `displaced` is the previous active card,
    /// whose relocation is the caller's policy decision
    Promoted { displaced: Option<Card> },

    /// The action did not apply (unknown field card, empty reserve)
    Rejected,
}

impl GameState {
    /// Apply a single action, consuming it
    pub fn apply(&mut self, action: CardAction) -> ActionOutcome {
        match action {
            CardAction::RemoveFromField { card_id } => match self.remove_from_field(card_id) {
                Some(card) => ActionOutcome::Removed(card),
                None => ActionOutcome::Rejected,
            },
            CardAction::DrawFromReserve => match self.draw_from_reserve() {
                Some(card) => ActionOutcome::Drawn(card),
                None => ActionOutcome::Rejected,
            },
            CardAction::PromoteToActive { card } => ActionOutcome::Promoted {
                displaced: self.set_active(card),
            },
        }
    }
}
