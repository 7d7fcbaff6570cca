//! Game state, rules, and the move protocol

pub mod actions;
pub mod controller;
pub mod logger;
pub mod rules;
pub mod state;

pub use actions::{ActionOutcome, CardAction};
pub use controller::{GameController, PlayerIntent, TableView};
pub use logger::{GameLogger, LogEntry, OutputMode, VerbosityLevel};
pub use rules::{cards_match, ranks_adjacent};
pub use state::GameState;
