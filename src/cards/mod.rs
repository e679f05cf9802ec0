//! Card model: suits, ranks, half-suits, card sets and dealing.
//!
//! All types here are immutable values or pure functions. The engine is the
//! only place where hands (card sets) are mutated.

pub mod card;
pub mod half_suit;
pub mod set;
pub mod deck;

pub use card::{Card, Rank, Suit};
pub use half_suit::{Half, HalfSuit};
pub use set::{CardSet, CardSetIter};
pub use deck::{deal, deal_full_deck};
