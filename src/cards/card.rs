//! Card identity: suits, ranks and the dense card index.
//!
//! Literature plays with 48 cards: the standard deck without the four 7s.
//! Every card maps to an index in `0..48` laid out so that the six cards of
//! half-suit `h` occupy indices `6h..6h + 6`. Bitsets and feature vectors
//! rely on this layout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::half_suit::{Half, HalfSuit};
use crate::core::notation::NotationError;

/// The four suits, in the order used for card indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Clubs = 0,
    Diamonds = 1,
    Hearts = 2,
    Spades = 3,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Clubs),
            1 => Some(Suit::Diamonds),
            2 => Some(Suit::Hearts),
            3 => Some(Suit::Spades),
            _ => None,
        }
    }

    /// Parse a single suit letter (`C`, `D`, `H`, `S`), case-insensitive.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'C' => Some(Suit::Clubs),
            'D' => Some(Suit::Diamonds),
            'H' => Some(Suit::Hearts),
            'S' => Some(Suit::Spades),
            _ => None,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Suit::Clubs => "C",
            Suit::Diamonds => "D",
            Suit::Hearts => "H",
            Suit::Spades => "S",
        };
        f.write_str(symbol)
    }
}

/// Playable ranks. Aces are low and belong to the minor half; there are no 7s.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Ace = 1,
    Two = 2,
    Three = 3,
    Four = 4,
    Five = 5,
    Six = 6,
    Eight = 8,
    Nine = 9,
    Ten = 10,
    Jack = 11,
    Queen = 12,
    King = 13,
}

impl Rank {
    /// Ranks in index order: the minor half followed by the major half.
    pub const ORDERED: [Rank; 12] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Map a face value (1 for Ace, 11-13 for court cards) to a rank.
    ///
    /// Returns `None` for 7 and anything outside `1..=13`.
    #[must_use]
    pub const fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Rank::Ace),
            2 => Some(Rank::Two),
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            6 => Some(Rank::Six),
            8 => Some(Rank::Eight),
            9 => Some(Rank::Nine),
            10 => Some(Rank::Ten),
            11 => Some(Rank::Jack),
            12 => Some(Rank::Queen),
            13 => Some(Rank::King),
            _ => None,
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn half(self) -> Half {
        if (self as u8) < 7 {
            Half::Minor
        } else {
            Half::Major
        }
    }

    /// Position of this rank inside its half-suit (`0..6`).
    #[must_use]
    pub const fn position(self) -> usize {
        match self.half() {
            Half::Minor => self as usize - 1,
            Half::Major => self as usize - 8,
        }
    }

    fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol.to_ascii_uppercase().as_str() {
            "A" => Some(Rank::Ace),
            "J" => Some(Rank::Jack),
            "Q" => Some(Rank::Queen),
            "K" => Some(Rank::King),
            digits => digits.parse::<u8>().ok().and_then(Rank::from_value),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rank::Ace => f.write_str("A"),
            Rank::Jack => f.write_str("J"),
            Rank::Queen => f.write_str("Q"),
            Rank::King => f.write_str("K"),
            other => write!(f, "{}", other.value()),
        }
    }
}

/// A playing card. Immutable and unique within the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    /// Number of cards in play at the start of a game.
    pub const DECK_SIZE: usize = 48;

    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    /// The half-suit this card belongs to.
    #[must_use]
    pub const fn half_suit(self) -> HalfSuit {
        HalfSuit::new(self.rank.half(), self.suit)
    }

    /// Dense index in `0..48`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.half_suit().index() * HalfSuit::SIZE + self.rank.position()
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= Self::DECK_SIZE {
            return None;
        }
        let half_suit = HalfSuit::from_index(index / HalfSuit::SIZE)?;
        let offset = match half_suit.half {
            Half::Minor => 0,
            Half::Major => 6,
        };
        let rank = Rank::ORDERED[offset + index % HalfSuit::SIZE];
        Some(Self::new(rank, half_suit.suit))
    }

    /// All 48 cards in index order.
    pub fn all() -> impl Iterator<Item = Card> {
        (0..Self::DECK_SIZE).filter_map(Card::from_index)
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

impl FromStr for Card {
    type Err = NotationError;

    /// Parse `<rank><suit>`, e.g. `"3D"`, `"10h"`, `"QS"`.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        let mut chars = text.chars();
        let suit_symbol = chars
            .next_back()
            .ok_or_else(|| NotationError::InvalidCard(text.to_string()))?;
        let suit = Suit::from_symbol(suit_symbol)
            .ok_or_else(|| NotationError::InvalidCard(text.to_string()))?;
        let rank = Rank::from_symbol(chars.as_str())
            .ok_or_else(|| NotationError::InvalidCard(text.to_string()))?;
        Ok(Card::new(rank, suit))
    }
}
