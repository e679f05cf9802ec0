//! Half-suits: the fixed six-card groups that are declared and scored.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::card::{Card, Suit};
use super::set::CardSet;

/// Which half of a suit: A-6 (minor) or 8-K (major).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Half {
    Minor = 0,
    Major = 1,
}

impl fmt::Display for Half {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Half::Minor => f.write_str("minor"),
            Half::Major => f.write_str("major"),
        }
    }
}

/// One of the eight half-suits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HalfSuit {
    pub suit: Suit,
    pub half: Half,
}

impl HalfSuit {
    /// Number of half-suits in the deck.
    pub const COUNT: usize = 8;

    /// Cards per half-suit.
    pub const SIZE: usize = 6;

    #[must_use]
    pub const fn new(half: Half, suit: Suit) -> Self {
        Self { suit, half }
    }

    /// Dense index in `0..8`: `suit * 2 + half`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.suit.index() * 2 + self.half as usize
    }

    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        let half = if index % 2 == 0 { Half::Minor } else { Half::Major };
        match Suit::from_index(index / 2) {
            Some(suit) => Some(Self::new(half, suit)),
            None => None,
        }
    }

    /// All half-suits in index order.
    pub fn all() -> impl Iterator<Item = HalfSuit> {
        (0..Self::COUNT).filter_map(HalfSuit::from_index)
    }

    /// The six cards of this half-suit as a set.
    #[must_use]
    pub const fn card_set(self) -> CardSet {
        CardSet::from_bits(0b11_1111u64 << (self.index() * Self::SIZE))
    }

    /// The six cards of this half-suit in rank order.
    pub fn cards(self) -> impl Iterator<Item = Card> {
        let base = self.index() * Self::SIZE;
        (base..base + Self::SIZE).filter_map(Card::from_index)
    }
}

impl fmt::Display for HalfSuit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.half, self.suit)
    }
}
