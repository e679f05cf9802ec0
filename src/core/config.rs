//! Game configuration.
//!
//! Literature has several house-rule variants. None of them are hardcoded:
//! the table rules live in `RulesConfig`, the seating in `GameConfig`.
//!
//! ```
//! use literature::core::{GameConfig, RulesConfig, TurnAfterDeclare};
//!
//! let config = GameConfig::new(6)
//!     .with_rules(RulesConfig::default().with_turn_after_declare(TurnAfterDeclare::Unchanged));
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use super::error::{ConfigViolation, EngineError};
use super::player::{PlayerId, Team};
use crate::cards::Card;

/// How seats are split into the two teams.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamAssignment {
    /// Even seats form `Team::A`, odd seats `Team::B`.
    #[default]
    Parity,
    /// One entry per seat.
    Explicit(Vec<Team>),
}

/// Who holds the turn after a declaration resolves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnAfterDeclare {
    /// The turn holder keeps the turn.
    Unchanged,
    /// The declarer takes the turn.
    #[default]
    Declarer,
    /// The declarer's next teammate in seat order takes the turn.
    DeclarerPartner,
}

/// What happens to a half-suit after a wrong declaration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MisdeclarePenalty {
    /// The opposing team wins the half-suit.
    #[default]
    AwardOpponents,
    /// If the declarer's team held every card but misplaced some, nobody wins
    /// it; otherwise the opposing team does.
    DiscardIfTeamHeld,
}

/// Table rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Allow asking a teammate for a card.
    pub allow_team_asks: bool,

    /// The asker must hold at least one card of the requested card's
    /// half-suit. Observers use this to deduce half-suit membership.
    pub require_half_suit_card: bool,

    /// Any player may declare at any time, not only the turn holder.
    pub declare_out_of_turn: bool,

    pub turn_after_declare: TurnAfterDeclare,

    pub misdeclare_penalty: MisdeclarePenalty,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            allow_team_asks: false,
            require_half_suit_card: true,
            declare_out_of_turn: true,
            turn_after_declare: TurnAfterDeclare::default(),
            misdeclare_penalty: MisdeclarePenalty::default(),
        }
    }
}

impl RulesConfig {
    #[must_use]
    pub fn with_team_asks(mut self, allow: bool) -> Self {
        self.allow_team_asks = allow;
        self
    }

    #[must_use]
    pub fn with_half_suit_requirement(mut self, required: bool) -> Self {
        self.require_half_suit_card = required;
        self
    }

    #[must_use]
    pub fn with_declare_out_of_turn(mut self, allow: bool) -> Self {
        self.declare_out_of_turn = allow;
        self
    }

    #[must_use]
    pub fn with_turn_after_declare(mut self, rule: TurnAfterDeclare) -> Self {
        self.turn_after_declare = rule;
        self
    }

    #[must_use]
    pub fn with_misdeclare_penalty(mut self, penalty: MisdeclarePenalty) -> Self {
        self.misdeclare_penalty = penalty;
        self
    }
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats. Must be even and divide the 48-card deck.
    pub player_count: usize,

    pub teams: TeamAssignment,

    /// Seat that takes the first turn. `None` picks one from the game seed.
    pub first_player: Option<PlayerId>,

    pub rules: RulesConfig,
}

impl GameConfig {
    /// Create a configuration with parity teams and default rules.
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            teams: TeamAssignment::Parity,
            first_player: None,
            rules: RulesConfig::default(),
        }
    }

    #[must_use]
    pub fn with_teams(mut self, teams: TeamAssignment) -> Self {
        self.teams = teams;
        self
    }

    #[must_use]
    pub fn with_first_player(mut self, player: PlayerId) -> Self {
        self.first_player = Some(player);
        self
    }

    #[must_use]
    pub fn with_rules(mut self, rules: RulesConfig) -> Self {
        self.rules = rules;
        self
    }

    /// Check the seating without dealing.
    ///
    /// Team partition errors are reported when teams are resolved.
    pub fn validate(&self) -> Result<(), EngineError> {
        let n = self.player_count;
        if n < 2 || n % 2 != 0 || n > Card::DECK_SIZE {
            return Err(ConfigViolation::PlayerCount(n).into());
        }
        if Card::DECK_SIZE % n != 0 {
            return Err(ConfigViolation::UnevenDeal {
                cards: Card::DECK_SIZE,
                player_count: n,
            }
            .into());
        }
        if let Some(first) = self.first_player {
            if first.index() >= n {
                return Err(ConfigViolation::FirstPlayer(first).into());
            }
        }
        Ok(())
    }
}
