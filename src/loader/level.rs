//! Level file loader (JSON format)
//!
//! A level file names the cards dealt to the play field and the reserve:
//!
//! ```json
//! {
//!   "Playfield": [
//!     { "CardFace": 4, "CardSuit": 2, "Position": { "x": 250, "y": 900 } }
//!   ],
//!   "Stack": [
//!     { "CardFace": 1, "CardSuit": 0, "Position": { "x": 0, "y": 0 } }
//!   ]
//! }
//! ```
//!
//! `CardFace` is the zero-based rank ordinal (0=Ace .. 12=King) and
//! `CardSuit` the suit code (0=Clubs .. 3=Spades).

use crate::core::{Position, Rank, Suit};
use crate::{GameError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// One card in a level: what it is and where it is dealt
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardSpec {
    pub rank: Rank,
    pub suit: Suit,
    pub position: Position,
}

impl CardSpec {
    pub fn new(rank: Rank, suit: Suit, position: Position) -> Self {
        CardSpec {
            rank,
            suit,
            position,
        }
    }
}

/// Static configuration for one level
///
/// A plain value, explicitly constructed and explicitly passed to the level
/// generator; parsing a level file yields a fresh instance per call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelConfig {
    /// Cards dealt face-up to the play field
    pub field: Vec<CardSpec>,

    /// Cards dealt face-down to the reserve, in stack order
    /// (last entry is drawn first)
    pub reserve: Vec<CardSpec>,
}

impl LevelConfig {
    pub fn new(field: Vec<CardSpec>, reserve: Vec<CardSpec>) -> Self {
        LevelConfig { field, reserve }
    }
}

// On-disk shape of a level file.
#[derive(Debug, Deserialize)]
struct RawLevel {
    #[serde(rename = "Playfield", default)]
    playfield: Vec<RawCard>,
    #[serde(rename = "Stack", default)]
    stack: Vec<RawCard>,
}

#[derive(Debug, Deserialize)]
struct RawCard {
    #[serde(rename = "CardFace")]
    card_face: u8,
    #[serde(rename = "CardSuit")]
    card_suit: u8,
    #[serde(rename = "Position", default)]
    position: RawPosition,
}

#[derive(Debug, Default, Deserialize)]
struct RawPosition {
    x: f32,
    y: f32,
}

/// Level loader for JSON level files
pub struct LevelLoader;

impl LevelLoader {
    /// Load a level from a JSON file
    pub fn load_from_file(path: &Path) -> Result<LevelConfig> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a level from its JSON content
    pub fn parse(content: &str) -> Result<LevelConfig> {
        let raw: RawLevel = serde_json::from_str(content)?;

        let field = raw
            .playfield
            .into_iter()
            .map(Self::convert_card)
            .collect::<Result<Vec<_>>>()?;
        let reserve = raw
            .stack
            .into_iter()
            .map(Self::convert_card)
            .collect::<Result<Vec<_>>>()?;

        Ok(LevelConfig { field, reserve })
    }

    fn convert_card(raw: RawCard) -> Result<CardSpec> {
        // CardFace is the zero-based ordinal; face value is ordinal + 1
        let rank = Rank::from_value(raw.card_face + 1).ok_or_else(|| {
            GameError::InvalidLevelFormat(format!("unknown card face {}", raw.card_face))
        })?;
        let suit = Suit::from_code(raw.card_suit).ok_or_else(|| {
            GameError::InvalidLevelFormat(format!("unknown card suit {}", raw.card_suit))
        })?;
        Ok(CardSpec {
            rank,
            suit,
            position: Position::new(raw.position.x, raw.position.y),
        })
    }
}
