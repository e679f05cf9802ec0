//! Core engine types: players, teams, moves, state, RNG, configuration.
//!
//! Rule variants are configured via `GameConfig` rather than by modifying the
//! core.

pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod moves;
pub mod notation;
pub mod state;

pub use player::{PlayerId, PlayerMap, Team, Teams};
pub use rng::GameRng;
pub use config::{GameConfig, MisdeclarePenalty, RulesConfig, TeamAssignment, TurnAfterDeclare};
pub use error::{AskViolation, ConfigViolation, DeclareViolation, EngineError};
pub use moves::{
    Ask, AskOutcome, Assignment, Declare, DeclareOutcome, Move, MoveEvent, MoveKind, Resolution,
};
pub use notation::{parse_move, NotationError};
pub use state::GameState;
