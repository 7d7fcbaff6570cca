//! Card types and definitions

use crate::core::CardId;
use serde::{Deserialize, Serialize};

/// Card rank, Ace low through King
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// 1-based face value (Ace=1, Two=2, ..., King=13)
    pub fn value(&self) -> u8 {
        *self as u8 + 1
    }

    /// Inverse of `value`; `None` outside 1..=13
    pub fn from_value(value: u8) -> Option<Rank> {
        match value {
            1..=13 => Some(Self::ALL[value as usize - 1]),
            _ => None,
        }
    }
}

/// Card suit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Numeric suit code as used by level files (Clubs=0 .. Spades=3)
    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn from_code(code: u8) -> Option<Suit> {
        Self::ALL.get(code as usize).copied()
    }
}

/// 2D layout coordinate for a card on the table
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// The canonical active-slot position
    pub const ZERO: Position = Position { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Position { x, y }
    }
}

/// A card instance on the table
///
/// The id is unique for the lifetime of a game session and immutable after
/// creation; position and orientation change as the card moves between zones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Unique ID for this card instance
    pub id: CardId,

    /// Face rank (Ace..King)
    pub rank: Rank,

    /// Suit
    pub suit: Suit,

    /// Current layout position
    pub position: Position,

    /// Orientation: face-up cards are matchable/visible
    pub face_up: bool,
}

impl Card {
    /// New face-down card at the origin
    pub fn new(id: CardId, rank: Rank, suit: Suit) -> Self {
        Card {
            id,
            rank,
            suit,
            position: Position::ZERO,
            face_up: false,
        }
    }

    /// 1-based face value used by the matching rule
    pub fn value(&self) -> u8 {
        self.rank.value()
    }

    pub fn turn_face_up(&mut self) {
        self.face_up = true;
    }

    pub fn turn_face_down(&mut self) {
        self.face_up = false;
    }
}
