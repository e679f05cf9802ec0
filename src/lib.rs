//! # literature
//!
//! Game-state and belief engine for the card game Literature, built for
//! self-play training.
//!
//! ## Design Principles
//!
//! 1. **Imperfect information first**: every player owns a `BeliefMatrix`
//!    that only changes through public events, plus a public matrix holding
//!    what everyone can deduce together.
//!
//! 2. **N-Player First**: every API takes `player_count` as context. Any even
//!    player count that divides the 48-card deck works.
//!
//! 3. **Configuration Over Convention**: house-rule variants live in
//!    `RulesConfig`, not in the engine.
//!
//! ## Architecture
//!
//! - **Validate, then apply**: a rejected move never changes anything.
//!
//! - **Deterministic**: randomness only feeds the deal and the starting seat,
//!   so a seed and a move list replay to the same state byte for byte.
//!
//! - **Persistent history**: O(1) cloning of the move log via `im-rs`.
//!
//! ## Modules
//!
//! - `cards`: cards, half-suits, card sets and dealing
//! - `core`: players, teams, moves, state, RNG, configuration, errors
//! - `belief`: per-player knowledge and deduction
//! - `rules`: legality, the `Engine`, scoring
//! - `nn`: observation and move encoding for a learning component
//! - `policy`: move sources and self-play helpers
//!
//! ```
//! use literature::{Engine, GameConfig, MovePolicy, UniformPolicy};
//!
//! let mut engine = Engine::new(GameConfig::new(6), 42).unwrap();
//! let mut policy = UniformPolicy::new(7);
//! let mv = policy.choose_move(&engine, engine.turn()).unwrap();
//! let event = engine.submit(mv).unwrap();
//! assert_eq!(event.sequence, 0);
//! ```

pub mod cards;
pub mod core;
pub mod belief;
pub mod rules;
pub mod nn;
pub mod policy;

// Re-export commonly used types
pub use crate::cards::{Card, CardSet, Half, HalfSuit, Rank, Suit};

pub use crate::core::{
    Ask, AskOutcome, Declare, DeclareOutcome, EngineError, GameConfig, GameRng, GameState, Move,
    MoveEvent, PlayerId, PlayerMap, Resolution, RulesConfig, Team, TeamAssignment,
};

pub use crate::belief::{BeliefMatrix, Knowledge};

pub use crate::rules::{Claim, Engine, GameResult, Observation, Phase, ScoreKeeper};

pub use crate::nn::{BeliefEncoder, EncodedState, ObservationEncoder};

pub use crate::policy::{MovePolicy, UniformPolicy};
