//! The move protocol: select, draw, undo
//!
//! The controller validates a player intent against the table state, applies
//! the forward action, and pushes the undo record captured beforehand. Undo
//! pops the most recent record and restores prior state through the zone
//! primitives directly; it never re-enters the forward action path and is
//! itself never recorded.
//!
//! All mutation flows through this protocol. The presentation layer only
//! ever sees the read-only [`TableView`] after a committed move.

use crate::core::{Card, CardId, Position};
use crate::game::actions::{ActionOutcome, CardAction};
use crate::game::logger::log_if_verbose;
use crate::game::rules::cards_match;
use crate::game::GameState;
use crate::undo::{HistoryStack, MoveRecord};
use crate::{GameError, Result};
use serde::{Deserialize, Serialize};

/// A player intent, as delivered by the input layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerIntent {
    /// Try to match a field card against the active card
    SelectCard(CardId),

    /// Draw the next reserve card into the active slot
    DrawReserve,

    /// Revert the most recent committed move
    Undo,
}

/// Orchestrates one move at a time over the table state
///
/// Every intent resolves synchronously: the model is fully consistent before
/// the call returns, so the presentation layer always reflects a valid
/// snapshot. Rejected moves return `Ok(false)` and leave the state and the
/// history untouched; `Err` is reserved for structural corruption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameController {
    state: GameState,
    history: HistoryStack,
}

impl GameController {
    /// Take ownership of an initialized table (from the level generator)
    pub fn new(state: GameState) -> Self {
        GameController {
            state,
            history: HistoryStack::new(),
        }
    }

    /// Start a new game: install a fresh table and clear the history
    pub fn begin(&mut self, state: GameState) {
        self.state = state;
        self.history.clear();
    }

    /// Read-only snapshot for the presentation layer
    pub fn table(&self) -> TableView<'_> {
        TableView { state: &self.state }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Dispatch a player intent
    pub fn handle(&mut self, intent: PlayerIntent) -> Result<bool> {
        match intent {
            PlayerIntent::SelectCard(card_id) => self.select_card(card_id),
            PlayerIntent::DrawReserve => self.draw_reserve(),
            PlayerIntent::Undo => self.request_undo(),
        }
    }

    /// Try to match the selected field card against the active card.
    ///
    /// `Ok(false)` when the card is not on the field or the ranks are not
    /// adjacent; nothing is mutated and no record is pushed.
    pub fn select_card(&mut self, card_id: CardId) -> Result<bool> {
        let active_id = self.active_or_corrupt()?;

        if !self.state.field().contains(card_id) {
            log_if_verbose!(
                self.state.logger,
                "GameController: card {card_id} is not selectable"
            );
            return Ok(false);
        }

        let (matched, prior_position) = {
            let selected = self.state.card(card_id)?;
            let active = self.state.card(active_id)?;
            (cards_match(selected, active), selected.position)
        };
        if !matched {
            log_if_verbose!(
                self.state.logger,
                "GameController: card {card_id} does not match the active card"
            );
            return Ok(false);
        }

        // Capture the inverse data before the forward mutation runs
        let record = MoveRecord::Match {
            matched_card: card_id,
            previous_active: active_id,
            matched_prior_position: prior_position,
        };

        let removed = match self.state.apply(CardAction::RemoveFromField { card_id }) {
            ActionOutcome::Removed(card) => card,
            _ => {
                return Err(GameError::InconsistentState(format!(
                    "field card {card_id} vanished mid-move"
                )))
            }
        };
        self.history.push(record);

        log_if_verbose!(
            self.state.logger,
            "GameController: matched card {card_id} against {active_id}"
        );
        self.promote(removed);
        Ok(true)
    }

    /// Draw the next reserve card into the active slot.
    ///
    /// `Ok(false)` when the reserve is empty; nothing is mutated and no
    /// record is pushed.
    pub fn draw_reserve(&mut self) -> Result<bool> {
        let active_id = self.active_or_corrupt()?;

        let Some(drawn_id) = self.state.peek_reserve_top() else {
            log_if_verbose!(self.state.logger, "GameController: no cards left to draw");
            return Ok(false);
        };
        let prior_position = self.state.card(active_id)?.position;

        // Capture the inverse data before the forward mutation runs
        let record = MoveRecord::Draw {
            drawn_card: drawn_id,
            previous_active: active_id,
            previous_active_prior_position: prior_position,
        };

        let drawn = match self.state.apply(CardAction::DrawFromReserve) {
            ActionOutcome::Drawn(card) => card,
            _ => return Ok(false),
        };
        self.history.push(record);

        log_if_verbose!(
            self.state.logger,
            "GameController: drew card {drawn_id} from the reserve"
        );
        self.promote(drawn);
        Ok(true)
    }

    /// Revert the most recent committed move.
    ///
    /// `Ok(false)` when the history is empty. A record whose cards are no
    /// longer where the forward move left them is a defect: the undo aborts
    /// with `CorruptHistory` before any partial restoration.
    pub fn request_undo(&mut self) -> Result<bool> {
        let Some(record) = self.history.pop() else {
            log_if_verbose!(self.state.logger, "GameController: nothing to undo");
            return Ok(false);
        };

        match record {
            MoveRecord::Match {
                matched_card,
                previous_active,
                matched_prior_position,
            } => self.undo_match(matched_card, previous_active, matched_prior_position),
            MoveRecord::Draw {
                drawn_card,
                previous_active,
                previous_active_prior_position,
            } => self.undo_draw(drawn_card, previous_active, previous_active_prior_position),
        }
    }

    /// Invert a match move: the matched card goes back to the field at its
    /// prior position, the displaced card comes back out of the reserve and
    /// becomes active again.
    fn undo_match(
        &mut self,
        matched_card: CardId,
        previous_active: CardId,
        matched_prior_position: Position,
    ) -> Result<bool> {
        self.check_restorable(matched_card, previous_active)?;

        let restored_active = self
            .state
            .remove_from_reserve(previous_active)
            .ok_or_else(|| {
                GameError::CorruptHistory(format!("card {previous_active} left the reserve"))
            })?;
        let mut matched = self.state.take_active().ok_or_else(|| {
            GameError::CorruptHistory(format!("card {matched_card} left the active slot"))
        })?;

        matched.position = matched_prior_position;
        self.state.return_to_field(matched);
        self.reinstate_active(restored_active, Position::ZERO);

        log_if_verbose!(
            self.state.logger,
            "GameController: undid match of card {matched_card}"
        );
        Ok(true)
    }

    /// Invert a draw move: the drawn card goes back onto the reserve, the
    /// displaced card comes back out of it and becomes active again.
    fn undo_draw(
        &mut self,
        drawn_card: CardId,
        previous_active: CardId,
        previous_active_prior_position: Position,
    ) -> Result<bool> {
        self.check_restorable(drawn_card, previous_active)?;

        let restored_active = self
            .state
            .remove_from_reserve(previous_active)
            .ok_or_else(|| {
                GameError::CorruptHistory(format!("card {previous_active} left the reserve"))
            })?;
        let drawn = self.state.take_active().ok_or_else(|| {
            GameError::CorruptHistory(format!("card {drawn_card} left the active slot"))
        })?;

        self.state.return_to_reserve(drawn);
        self.reinstate_active(restored_active, previous_active_prior_position);

        log_if_verbose!(
            self.state.logger,
            "GameController: undid draw of card {drawn_card}"
        );
        Ok(true)
    }

    /// Validate a record against the current state before touching anything.
    /// The forward move left its new active card in the slot and the
    /// displaced card in the reserve; anything else means the forward and
    /// inverse sides are out of sync.
    fn check_restorable(&self, expected_active: CardId, displaced: CardId) -> Result<()> {
        if self.state.active_id() != Some(expected_active) {
            return Err(GameError::CorruptHistory(format!(
                "record expects card {expected_active} in the active slot"
            )));
        }
        if !self.state.reserve().contains(displaced) {
            return Err(GameError::CorruptHistory(format!(
                "record expects card {displaced} in the reserve"
            )));
        }
        Ok(())
    }

    /// Promote a card into the active slot and retire the card it displaces.
    ///
    /// Reserve-return policy: in both the match and the draw move, the
    /// displaced active card joins the reserve at the draw end, making it
    /// the next draw candidate.
    fn promote(&mut self, mut card: Card) {
        card.position = Position::ZERO;
        let displaced = match self.state.apply(CardAction::PromoteToActive { card }) {
            ActionOutcome::Promoted { displaced } => displaced,
            _ => None,
        };
        if let Some(displaced) = displaced {
            self.state.return_to_reserve(displaced);
        }
    }

    /// Direct restoration of the active slot (undo path, bypasses actions)
    fn reinstate_active(&mut self, mut card: Card, position: Position) {
        card.position = position;
        self.state.set_active(card);
    }

    fn active_or_corrupt(&self) -> Result<CardId> {
        self.state.active_id().ok_or_else(|| {
            GameError::InconsistentState("no active card; the table was never initialized".into())
        })
    }
}

/// Read-only snapshot of the table for re-rendering
///
/// Borrowed from the controller after a committed move; exposes no mutation
/// path.
pub struct TableView<'a> {
    state: &'a GameState,
}

impl<'a> TableView<'a> {
    /// Ids of the cards currently on the field
    pub fn field(&self) -> &'a [CardId] {
        &self.state.field().cards
    }

    /// Resolve a card id
    pub fn card(&self, id: CardId) -> Option<&'a Card> {
        self.state.lookup(id)
    }

    /// The current match target
    pub fn active(&self) -> Option<&'a Card> {
        self.state.active_card()
    }

    /// The next card the reserve would yield
    pub fn reserve_top(&self) -> Option<&'a Card> {
        self.state
            .peek_reserve_top()
            .and_then(|id| self.state.lookup(id))
    }

    pub fn reserve_len(&self) -> usize {
        self.state.reserve().len()
    }

    pub fn field_cleared(&self) -> bool {
        self.state.is_field_cleared()
    }
}
