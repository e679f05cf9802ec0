//! Engine errors.
//!
//! Every rejected `submit()` returns exactly one `EngineError` naming the rule
//! that was broken. Rejections never mutate the engine.

use thiserror::Error;

use super::player::PlayerId;
use crate::cards::{Card, HalfSuit};

/// The error kinds surfaced to callers of the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The mover is not the turn holder.
    #[error("{mover} moved out of turn; the turn belongs to {turn_holder}")]
    OutOfTurn {
        mover: PlayerId,
        turn_holder: PlayerId,
    },

    #[error("illegal ask: {0}")]
    IllegalAsk(#[from] AskViolation),

    #[error("illegal declare: {0}")]
    IllegalDeclare(#[from] DeclareViolation),

    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigViolation),

    /// A terminal-state query was issued before the game ended.
    #[error("the game is not over")]
    GameNotOver,
}

/// Why an ask was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AskViolation {
    #[error("{0} is not seated in this game")]
    UnknownPlayer(PlayerId),

    #[error("{0} cannot ask themself")]
    SelfTarget(PlayerId),

    #[error("{asker} cannot ask teammate {target}")]
    Teammate { asker: PlayerId, target: PlayerId },

    #[error("{0} has no cards to give")]
    EmptyHandedTarget(PlayerId),

    #[error("{asker} already holds {card}")]
    AlreadyHeld { asker: PlayerId, card: Card },

    #[error("{0} has already been resolved")]
    ResolvedHalfSuit(HalfSuit),

    #[error("{asker} holds no card of {half_suit}")]
    NoCardInHalfSuit { asker: PlayerId, half_suit: HalfSuit },
}

/// Why a declaration was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclareViolation {
    #[error("{0} is not seated in this game")]
    UnknownPlayer(PlayerId),

    #[error("{0} has already been resolved")]
    AlreadyResolved(HalfSuit),

    #[error("{card} does not belong to {half_suit}")]
    ForeignCard { card: Card, half_suit: HalfSuit },

    #[error("{0} is assigned more than once")]
    DuplicateCard(Card),

    #[error("assignment leaves {0} unassigned")]
    MissingCard(Card),

    #[error("{player} is not on {declarer}'s team")]
    NotTeammate { declarer: PlayerId, player: PlayerId },
}

/// Why a game could not be set up.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigViolation {
    #[error("{0} players cannot form two equal teams")]
    PlayerCount(usize),

    #[error("{cards} cards cannot be dealt evenly to {player_count} players")]
    UnevenDeal { cards: usize, player_count: usize },

    #[error("teams must be equal and non-empty, got {a} and {b}")]
    TeamPartition { a: usize, b: usize },

    #[error("first player {0} is not seated in this game")]
    FirstPlayer(PlayerId),

    #[error("expected {expected} hands, got {found}")]
    HandCount { expected: usize, found: usize },

    #[error("{0} is dealt to more than one player")]
    DuplicateCard(Card),

    #[error("{0} is missing from the deal")]
    MissingCard(Card),
}
