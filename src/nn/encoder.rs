//! Observation encoding for neural network input.
//!
//! Transforms what one player can see into flat tensors suitable for a
//! learning component. Encoding only ever reads an `Observation`, so hidden
//! cards cannot leak into the features.

use serde::{Deserialize, Serialize};

use crate::belief::{BeliefMatrix, Knowledge};
use crate::cards::{Card, HalfSuit};
use crate::core::{Move, PlayerId};
use crate::rules::{Claim, Observation};

/// Encoded observation or move as a flat tensor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedState {
    /// Flattened tensor data (row-major order).
    pub tensor: Vec<f32>,

    /// Shape of the tensor.
    pub shape: Vec<usize>,
}

impl EncodedState {
    pub fn new(tensor: Vec<f32>, shape: Vec<usize>) -> Self {
        debug_assert_eq!(
            tensor.len(),
            shape.iter().product::<usize>(),
            "Tensor length must match shape product"
        );
        Self { tensor, shape }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.tensor.get(index).copied()
    }
}

/// Encodes observations and moves for neural network input.
pub trait ObservationEncoder: Send + Sync {
    /// Encode everything the observing player can see.
    fn encode(&self, observation: &Observation) -> EncodedState;

    /// Encode a candidate move from the observer's seat.
    fn encode_move(&self, observation: &Observation, mv: &Move) -> EncodedState;

    fn output_shape(&self) -> Vec<usize>;

    fn move_shape(&self) -> Vec<usize>;

    fn player_count(&self) -> usize;
}

/// Flat encoding of the observer's and the public belief matrices.
///
/// Seats are rotated so the observer comes first. Layout:
///
/// - Observer's matrix, per seat: 48 card tags (`+1` held, `-1` not held,
///   `0` unknown or out of play), 8 half-suit minimums divided by 6, and the
///   hand count divided by 48 (`-1` when untracked)
/// - The same block for the public matrix
/// - Turn holder, one-hot over rotated seats
/// - Per half-suit claim: `+1` won by the observer's team, `-1` by the
///   opponents, `0.5` discarded, `0` open
#[derive(Clone, Debug)]
pub struct BeliefEncoder {
    player_count: usize,
}

const SEAT_FEATURES: usize = Card::DECK_SIZE + HalfSuit::COUNT + 1;

impl BeliefEncoder {
    pub fn new(player_count: usize) -> Self {
        Self { player_count }
    }

    fn relative(&self, observer: PlayerId, seat: PlayerId) -> usize {
        (seat.index() + self.player_count - observer.index()) % self.player_count
    }

    fn belief_features(&self) -> usize {
        SEAT_FEATURES * self.player_count
    }

    fn encode_belief(&self, observer: PlayerId, belief: &BeliefMatrix, out: &mut [f32]) {
        let in_play = belief.cards_in_play();
        for seat in PlayerId::all(self.player_count) {
            let base = self.relative(observer, seat) * SEAT_FEATURES;
            for card in in_play {
                out[base + card.index()] = match belief.tag(seat, card) {
                    Knowledge::Held => 1.0,
                    Knowledge::NotHeld => -1.0,
                    Knowledge::Unknown => 0.0,
                };
            }
            for h in HalfSuit::all() {
                out[base + Card::DECK_SIZE + h.index()] =
                    belief.half_minimum(seat, h) as f32 / HalfSuit::SIZE as f32;
            }
            out[base + SEAT_FEATURES - 1] = belief
                .hand_count(seat)
                .map_or(-1.0, |n| n as f32 / Card::DECK_SIZE as f32);
        }
    }
}

impl ObservationEncoder for BeliefEncoder {
    fn encode(&self, observation: &Observation) -> EncodedState {
        debug_assert_eq!(
            observation.belief.player_count(),
            self.player_count,
            "Encoder seat count must match the observed table"
        );
        let total = self.output_shape()[0];
        let mut tensor = vec![0.0f32; total];
        let me = observation.player;
        let block = self.belief_features();

        self.encode_belief(me, &observation.belief, &mut tensor[..block]);
        self.encode_belief(me, &observation.public_belief, &mut tensor[block..2 * block]);

        let turn_base = 2 * block;
        tensor[turn_base + self.relative(me, observation.turn)] = 1.0;

        let claims_base = turn_base + self.player_count;
        for (i, claim) in observation.claims.iter().enumerate() {
            tensor[claims_base + i] = match claim {
                Claim::Open => 0.0,
                Claim::Won(team) if *team == observation.team => 1.0,
                Claim::Won(_) => -1.0,
                Claim::Discarded => 0.5,
            };
        }

        EncodedState::new(tensor, vec![total])
    }

    /// Layout: move kind one-hot (ask, declare), rotated seat block, card
    /// block. An ask marks its target and card. A declare marks the six
    /// cards and, per seat, the share of them assigned to that seat.
    fn encode_move(&self, observation: &Observation, mv: &Move) -> EncodedState {
        debug_assert_eq!(
            observation.belief.player_count(),
            self.player_count,
            "Encoder seat count must match the observed table"
        );
        let total = self.move_shape()[0];
        let mut tensor = vec![0.0f32; total];
        let me = observation.player;
        let seat_base = 2;
        let card_base = seat_base + self.player_count;

        match mv {
            Move::Ask(ask) => {
                tensor[0] = 1.0;
                tensor[seat_base + self.relative(me, ask.target)] = 1.0;
                tensor[card_base + ask.card.index()] = 1.0;
            }
            Move::Declare(declare) => {
                tensor[1] = 1.0;
                let share = 1.0 / declare.assignment.len().max(1) as f32;
                for &(card, holder) in &declare.assignment {
                    tensor[seat_base + self.relative(me, holder)] += share;
                    tensor[card_base + card.index()] = 1.0;
                }
            }
        }

        EncodedState::new(tensor, vec![total])
    }

    fn output_shape(&self) -> Vec<usize> {
        vec![2 * self.belief_features() + self.player_count + HalfSuit::COUNT]
    }

    fn move_shape(&self) -> Vec<usize> {
        vec![2 + self.player_count + Card::DECK_SIZE]
    }

    fn player_count(&self) -> usize {
        self.player_count
    }
}
