//! Move representation and resolved-move records.
//!
//! A `Move` is either an `Ask` (one player requests a named card from
//! another) or a `Declare` (a player proposes who holds every card of a
//! half-suit). Moves are immutable requests; the engine validates them and,
//! if accepted, produces a `MoveEvent` describing what happened.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::player::PlayerId;
use crate::cards::{Card, HalfSuit};
use crate::rules::Claim;

/// A request for `card` from `target`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ask {
    pub asker: PlayerId,
    pub target: PlayerId,
    pub card: Card,
}

impl Ask {
    #[must_use]
    pub const fn new(asker: PlayerId, target: PlayerId, card: Card) -> Self {
        Self { asker, target, card }
    }
}

impl std::fmt::Display for Ask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} asks {} for {}", self.asker, self.target, self.card)
    }
}

/// Card-to-player assignment of a declaration.
///
/// Six entries in the common case, stored inline.
pub type Assignment = SmallVec<[(Card, PlayerId); HalfSuit::SIZE]>;

/// A claim that `assignment` is the exact ownership of `half_suit`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Declare {
    pub declarer: PlayerId,
    pub half_suit: HalfSuit,
    pub assignment: Assignment,
}

impl Declare {
    /// Create a declaration from explicit `(card, holder)` pairs.
    #[must_use]
    pub fn new(
        declarer: PlayerId,
        half_suit: HalfSuit,
        assignment: impl IntoIterator<Item = (Card, PlayerId)>,
    ) -> Self {
        Self {
            declarer,
            half_suit,
            assignment: assignment.into_iter().collect(),
        }
    }

    /// Create a declaration by asking `holder` for the owner of each card of
    /// the half-suit, in rank order.
    #[must_use]
    pub fn from_holders(
        declarer: PlayerId,
        half_suit: HalfSuit,
        mut holder: impl FnMut(Card) -> PlayerId,
    ) -> Self {
        Self {
            declarer,
            half_suit,
            assignment: half_suit.cards().map(|c| (c, holder(c))).collect(),
        }
    }

    /// The proposed holder of `card`, if the assignment names it.
    #[must_use]
    pub fn holder_of(&self, card: Card) -> Option<PlayerId> {
        self.assignment
            .iter()
            .find(|(c, _)| *c == card)
            .map(|(_, p)| *p)
    }
}

/// A move submitted to the engine.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Ask(Ask),
    Declare(Declare),
}

impl Move {
    /// The player making the move.
    #[must_use]
    pub fn mover(&self) -> PlayerId {
        match self {
            Move::Ask(ask) => ask.asker,
            Move::Declare(declare) => declare.declarer,
        }
    }

    #[must_use]
    pub fn kind(&self) -> MoveKind {
        match self {
            Move::Ask(_) => MoveKind::Ask,
            Move::Declare(_) => MoveKind::Declare,
        }
    }
}

impl From<Ask> for Move {
    fn from(ask: Ask) -> Self {
        Move::Ask(ask)
    }
}

impl From<Declare> for Move {
    fn from(declare: Declare) -> Self {
        Move::Declare(declare)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveKind {
    Ask,
    Declare,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AskOutcome {
    /// The target held the card and handed it over.
    Success,
    /// The target did not hold the card.
    Failure,
}

impl AskOutcome {
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, AskOutcome::Success)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclareOutcome {
    /// Every card was assigned to its actual holder.
    Correct,
    /// At least one card was misassigned. Which ones is private to the
    /// declarer.
    Incorrect,
}

/// What a resolved move did. Carries only public information.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Resolution {
    Ask {
        ask: Ask,
        outcome: AskOutcome,
    },
    Declare {
        declare: Declare,
        outcome: DeclareOutcome,
        awarded: Claim,
    },
}

/// Record of one resolved move, in submission order.
///
/// Used for:
/// - The move history handed to the learning component
/// - Replay/debugging
/// - Logging and presentation layers
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEvent {
    /// 0-based position in the game's move history.
    pub sequence: u32,

    pub resolution: Resolution,

    /// Turn holder once the move resolved.
    pub turn_after: PlayerId,
}

impl MoveEvent {
    #[must_use]
    pub fn mover(&self) -> PlayerId {
        match &self.resolution {
            Resolution::Ask { ask, .. } => ask.asker,
            Resolution::Declare { declare, .. } => declare.declarer,
        }
    }

    #[must_use]
    pub fn kind(&self) -> MoveKind {
        match self.resolution {
            Resolution::Ask { .. } => MoveKind::Ask,
            Resolution::Declare { .. } => MoveKind::Declare,
        }
    }
}
