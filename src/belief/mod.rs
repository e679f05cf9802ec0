//! Imperfect-information tracking.
//!
//! Each player owns a `BeliefMatrix` describing what they know about every
//! hand. The engine also keeps a public matrix with no private hand, which
//! is what all players can deduce together.

pub mod matrix;

pub use matrix::{BeliefMatrix, Knowledge};
