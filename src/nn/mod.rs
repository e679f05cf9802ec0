//! Neural network integration.
//!
//! The engine does not train anything itself. This module turns an
//! `Observation` and candidate moves into flat tensors that an external
//! learning component consumes.
//!
//! ```
//! use literature::core::{GameConfig, PlayerId};
//! use literature::nn::{BeliefEncoder, ObservationEncoder};
//! use literature::rules::Engine;
//!
//! let engine = Engine::new(GameConfig::new(6), 42).unwrap();
//! let encoder = BeliefEncoder::new(6);
//! let obs = engine.observe(PlayerId::new(0)).unwrap();
//! assert_eq!(encoder.encode(&obs).shape, encoder.output_shape());
//! ```

pub mod encoder;

pub use encoder::{BeliefEncoder, EncodedState, ObservationEncoder};
