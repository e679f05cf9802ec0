//! Shuffling and dealing.

use super::card::Card;
use super::set::CardSet;
use crate::core::error::{ConfigViolation, EngineError};
use crate::core::{GameRng, PlayerMap};

/// Deal `cards` evenly between `player_count` players after shuffling them
/// with `rng`.
///
/// Fails with a configuration error when the cards cannot be split evenly.
pub fn deal(
    cards: CardSet,
    player_count: usize,
    rng: &mut GameRng,
) -> Result<PlayerMap<CardSet>, EngineError> {
    if player_count == 0 || cards.len() % player_count != 0 {
        return Err(ConfigViolation::UnevenDeal {
            cards: cards.len(),
            player_count,
        }
        .into());
    }

    let mut deck: Vec<Card> = cards.iter().collect();
    rng.shuffle(&mut deck);

    let per_player = deck.len() / player_count;
    let mut chunks = deck.chunks(per_player.max(1));
    Ok(PlayerMap::new(player_count, |_| {
        chunks.next().map(|c| c.iter().copied().collect()).unwrap_or_default()
    }))
}

/// Deal the full 48-card deck.
pub fn deal_full_deck(player_count: usize, rng: &mut GameRng) -> Result<PlayerMap<CardSet>, EngineError> {
    deal(CardSet::FULL, player_count, rng)
}
