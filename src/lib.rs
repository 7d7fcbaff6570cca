//! Cardfield - a single-player card-matching solitaire engine
//!
//! A play field of face-up cards is cleared by matching each selected card
//! against the single active card (ranks must differ by exactly one); a
//! reserve stack feeds new active cards when nothing on the field is
//! playable. Every committed move can be inverted exactly through the undo
//! subsystem.

pub mod core;
pub mod error;
pub mod game;
pub mod loader;
pub mod undo;
pub mod zones;

pub use error::{GameError, Result};
