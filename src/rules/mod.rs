//! Game rules: legality, resolution, turn flow and scoring.
//!
//! `Engine` is the only type that mutates game state. `legal` holds the
//! pure validation and enumeration functions it calls, `score` the
//! half-suit claims and game result.

pub mod engine;
pub mod legal;
pub mod score;

pub use engine::{Engine, Observation, Phase};
pub use legal::{check_ask, check_declare, legal_moves};
pub use score::{Claim, GameResult, ScoreKeeper};
