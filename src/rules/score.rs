//! Half-suit ownership and game end.

use serde::{Deserialize, Serialize};

use crate::cards::HalfSuit;
use crate::core::error::EngineError;
use crate::core::Team;

/// State of one half-suit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Claim {
    /// Still in play.
    #[default]
    Open,
    /// Won by a team.
    Won(Team),
    /// Removed from play without a winner.
    Discarded,
}

impl Claim {
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        !matches!(self, Claim::Open)
    }
}

/// Result of a completed game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Winner(Team),
    /// Both teams won the same number of half-suits.
    Draw,
}

impl GameResult {
    /// Check if a team won.
    #[must_use]
    pub fn is_winner(&self, team: Team) -> bool {
        matches!(self, GameResult::Winner(t) if *t == team)
    }
}

/// Tracks which team won each half-suit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreKeeper {
    claims: [Claim; HalfSuit::COUNT],
}

impl ScoreKeeper {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn claim(&self, half_suit: HalfSuit) -> Claim {
        self.claims[half_suit.index()]
    }

    #[must_use]
    pub fn is_resolved(&self, half_suit: HalfSuit) -> bool {
        self.claim(half_suit).is_resolved()
    }

    /// Record the resolution of a half-suit. Resolutions are final: a second
    /// record for the same half-suit is ignored and `false` is returned.
    pub fn record(&mut self, half_suit: HalfSuit, claim: Claim) -> bool {
        let slot = &mut self.claims[half_suit.index()];
        if slot.is_resolved() || !claim.is_resolved() {
            return false;
        }
        *slot = claim;
        true
    }

    /// Half-suits won by `team`.
    #[must_use]
    pub fn score(&self, team: Team) -> usize {
        self.claims.iter().filter(|c| **c == Claim::Won(team)).count()
    }

    /// Half-suits still in play.
    pub fn open_half_suits(&self) -> impl Iterator<Item = HalfSuit> + '_ {
        HalfSuit::all().filter(move |h| !self.is_resolved(*h))
    }

    /// All claims in half-suit index order.
    #[must_use]
    pub fn claims(&self) -> &[Claim; HalfSuit::COUNT] {
        &self.claims
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.claims.iter().all(|c| c.is_resolved())
    }

    /// The final result. Fails with `GameNotOver` while half-suits remain.
    pub fn winner(&self) -> Result<GameResult, EngineError> {
        if !self.is_terminal() {
            return Err(EngineError::GameNotOver);
        }
        let a = self.score(Team::A);
        let b = self.score(Team::B);
        Ok(match a.cmp(&b) {
            std::cmp::Ordering::Greater => GameResult::Winner(Team::A),
            std::cmp::Ordering::Less => GameResult::Winner(Team::B),
            std::cmp::Ordering::Equal => GameResult::Draw,
        })
    }
}
