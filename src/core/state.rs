//! Game state: hands, turn, half-suit claims and move history.
//!
//! `GameState` is the authoritative, hidden-information view of a game. Only
//! the engine mutates it. Everything a player may see is derived from it by
//! `Engine::observe`.
//!
//! History uses an `im::Vector`, so cloning a state to explore alternatives is
//! cheap.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::moves::MoveEvent;
use super::player::{PlayerId, PlayerMap};
use crate::cards::{Card, CardSet, HalfSuit};
use crate::rules::ScoreKeeper;

/// Complete game state including private hands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Private hands per player.
    hands: PlayerMap<CardSet>,

    /// Seat that must move next.
    pub turn: PlayerId,

    /// Claims on each half-suit.
    pub scores: ScoreKeeper,

    /// Every accepted move, in order.
    pub history: Vector<MoveEvent>,
}

impl GameState {
    /// Create a state from a deal.
    #[must_use]
    pub fn new(hands: PlayerMap<CardSet>, turn: PlayerId) -> Self {
        Self {
            hands,
            turn,
            scores: ScoreKeeper::new(),
            history: Vector::new(),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.hands.player_count()
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        self.hands.player_ids()
    }

    // === Hands ===

    /// The player's hand; empty for a seat outside the table.
    #[must_use]
    pub fn hand(&self, player: PlayerId) -> CardSet {
        self.hands.try_get(player).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn hands(&self) -> &PlayerMap<CardSet> {
        &self.hands
    }

    /// Hand sizes. Public knowledge.
    #[must_use]
    pub fn hand_sizes(&self) -> PlayerMap<usize> {
        PlayerMap::new(self.player_count(), |p| self.hands[p].len())
    }

    /// The player currently holding `card`, if it is still in play.
    #[must_use]
    pub fn holder_of(&self, card: Card) -> Option<PlayerId> {
        self.hands
            .iter()
            .find(|(_, hand)| hand.contains(card))
            .map(|(p, _)| p)
    }

    /// Move `card` from `from` to `to`.
    ///
    /// Returns false (and changes nothing) if `from` does not hold the card.
    pub fn transfer(&mut self, card: Card, from: PlayerId, to: PlayerId) -> bool {
        if !self.hands[from].remove(card) {
            return false;
        }
        self.hands[to].insert(card);
        true
    }

    /// Remove every card of `half_suit` from all hands.
    pub fn retire(&mut self, half_suit: HalfSuit) {
        let mask = half_suit.card_set();
        for (_, hand) in self.hands.iter_mut() {
            *hand = hand.difference(mask);
        }
    }

    /// Cards still held by anyone.
    #[must_use]
    pub fn cards_in_play(&self) -> CardSet {
        self.hands
            .values()
            .fold(CardSet::EMPTY, |acc, hand| acc.union(*hand))
    }

    // === History ===

    /// Record an accepted move.
    pub fn record(&mut self, event: MoveEvent) {
        self.history.push_back(event);
    }

    /// Sequence number for the next recorded move.
    #[must_use]
    pub fn next_sequence(&self) -> u32 {
        self.history.len() as u32
    }

    // === Serialization ===

    /// Canonical binary encoding. Two states are equal iff their bytes are.
    pub fn to_bytes(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Half, Rank, Suit};
    use crate::core::moves::{Ask, AskOutcome, Resolution};

    fn two_player_state() -> GameState {
        let hands = PlayerMap::new(2, |p| {
            Card::all()
                .filter(|c| c.index() % 2 == p.index())
                .collect::<CardSet>()
        });
        GameState::new(hands, PlayerId::new(0))
    }

    #[test]
    fn test_new_state() {
        let state = two_player_state();
        assert_eq!(state.player_count(), 2);
        assert_eq!(state.hand_sizes()[PlayerId::new(1)], 24);
        assert_eq!(state.cards_in_play(), CardSet::FULL);
        assert!(state.history.is_empty());
        assert_eq!(state.next_sequence(), 0);
    }

    #[test]
    fn test_transfer() {
        let mut state = two_player_state();
        let card = Card::from_index(1).unwrap();
        assert_eq!(state.holder_of(card), Some(PlayerId::new(1)));

        assert!(!state.transfer(card, PlayerId::new(0), PlayerId::new(1)));
        assert!(state.transfer(card, PlayerId::new(1), PlayerId::new(0)));
        assert_eq!(state.holder_of(card), Some(PlayerId::new(0)));
        assert_eq!(state.hand(PlayerId::new(0)).len(), 25);
        assert_eq!(state.cards_in_play(), CardSet::FULL);
    }

    #[test]
    fn test_retire() {
        let mut state = two_player_state();
        let half_suit = HalfSuit::new(Half::Major, Suit::Spades);
        state.retire(half_suit);
        assert_eq!(state.cards_in_play().len(), Card::DECK_SIZE - HalfSuit::SIZE);
        assert_eq!(state.holder_of(Card::new(Rank::King, Suit::Spades)), None);
    }

    #[test]
    fn test_bytes_roundtrip() {
        let mut state = two_player_state();
        let ask = Ask::new(PlayerId::new(0), PlayerId::new(1), Card::from_index(1).unwrap());
        state.transfer(ask.card, ask.target, ask.asker);
        state.record(MoveEvent {
            sequence: state.next_sequence(),
            resolution: Resolution::Ask {
                ask,
                outcome: AskOutcome::Success,
            },
            turn_after: PlayerId::new(0),
        });

        let bytes = state.to_bytes().unwrap();
        assert_eq!(GameState::from_bytes(&bytes).unwrap(), state);
        assert_eq!(state.clone().to_bytes().unwrap(), bytes);
    }
}
