//! Move validation and enumeration.
//!
//! `check_ask` and `check_declare` are the authoritative legality checks and
//! look at the real hands. `legal_moves` enumerates from the mover's own
//! belief matrix plus public information (hand emptiness, claims), so it
//! never leaks hidden cards.

use crate::belief::{BeliefMatrix, Knowledge};
use crate::cards::{Card, CardSet, HalfSuit};
use crate::core::error::{AskViolation, DeclareViolation, EngineError};
use crate::core::{Ask, Declare, GameState, Move, PlayerId, RulesConfig, Teams};

fn is_seated(state: &GameState, player: PlayerId) -> bool {
    player.index() < state.player_count()
}

/// Check an ask against the rules. Checks run in a fixed order and the first
/// failure is reported.
pub fn check_ask(
    state: &GameState,
    teams: &Teams,
    rules: &RulesConfig,
    ask: &Ask,
) -> Result<(), EngineError> {
    let Ask { asker, target, card } = *ask;
    if asker != state.turn {
        return Err(EngineError::OutOfTurn {
            mover: asker,
            turn_holder: state.turn,
        });
    }
    if !is_seated(state, target) {
        return Err(AskViolation::UnknownPlayer(target).into());
    }
    if asker == target {
        return Err(AskViolation::SelfTarget(asker).into());
    }
    if !rules.allow_team_asks && teams.same_team(asker, target) {
        return Err(AskViolation::Teammate { asker, target }.into());
    }
    if state.hand(target).is_empty() {
        return Err(AskViolation::EmptyHandedTarget(target).into());
    }
    let half_suit = card.half_suit();
    if state.scores.is_resolved(half_suit) {
        return Err(AskViolation::ResolvedHalfSuit(half_suit).into());
    }
    let own = state.hand(asker);
    if own.contains(card) {
        return Err(AskViolation::AlreadyHeld { asker, card }.into());
    }
    if rules.require_half_suit_card && own.in_half_suit(half_suit).is_empty() {
        return Err(AskViolation::NoCardInHalfSuit { asker, half_suit }.into());
    }
    Ok(())
}

/// Check a declaration's shape. Correctness is not a legality question.
pub fn check_declare(
    state: &GameState,
    teams: &Teams,
    rules: &RulesConfig,
    declare: &Declare,
) -> Result<(), EngineError> {
    let declarer = declare.declarer;
    if !rules.declare_out_of_turn && declarer != state.turn {
        return Err(EngineError::OutOfTurn {
            mover: declarer,
            turn_holder: state.turn,
        });
    }
    if !is_seated(state, declarer) {
        return Err(DeclareViolation::UnknownPlayer(declarer).into());
    }
    if let Some(&(_, player)) = declare.assignment.iter().find(|(_, p)| !is_seated(state, *p)) {
        return Err(DeclareViolation::UnknownPlayer(player).into());
    }

    let half_suit = declare.half_suit;
    if state.scores.is_resolved(half_suit) {
        return Err(DeclareViolation::AlreadyResolved(half_suit).into());
    }

    let mut seen = CardSet::EMPTY;
    for &(card, _) in &declare.assignment {
        if card.half_suit() != half_suit {
            return Err(DeclareViolation::ForeignCard { card, half_suit }.into());
        }
        if !seen.insert(card) {
            return Err(DeclareViolation::DuplicateCard(card).into());
        }
    }
    if let Some(card) = half_suit.card_set().difference(seen).iter().next() {
        return Err(DeclareViolation::MissingCard(card).into());
    }

    if let Some(&(_, player)) = declare
        .assignment
        .iter()
        .find(|(_, p)| !teams.same_team(declarer, *p))
    {
        return Err(DeclareViolation::NotTeammate { declarer, player }.into());
    }
    Ok(())
}

/// Moves `player` may submit, judged from `belief` (the player's own
/// matrix) and public information.
///
/// - Terminal game: nothing.
/// - Turn holder: asks to targets not known to lack the card (falling back to
///   known-futile asks only when there is no other ask), plus certain
///   declares. With neither available, a best-guess declare for every open
///   half-suit.
/// - Anyone else: certain declares, when out-of-turn declares are allowed.
pub fn legal_moves(
    state: &GameState,
    teams: &Teams,
    rules: &RulesConfig,
    belief: &BeliefMatrix,
    player: PlayerId,
) -> Vec<Move> {
    if state.scores.is_terminal() || !is_seated(state, player) {
        return Vec::new();
    }

    let certain = belief.certain_declares(teams);
    if player != state.turn {
        if rules.declare_out_of_turn {
            return certain.into_iter().map(Move::Declare).collect();
        }
        return Vec::new();
    }

    let targets: Vec<PlayerId> = state
        .player_ids()
        .filter(|t| *t != player)
        .filter(|t| rules.allow_team_asks || !teams.same_team(player, *t))
        .filter(|t| !state.hand(*t).is_empty())
        .collect();

    let mut asks = Vec::new();
    let mut futile = Vec::new();
    for card in belief.askable_cards() {
        for &target in &targets {
            let ask = Ask::new(player, target, card);
            if belief.tag(target, card) == Knowledge::NotHeld {
                futile.push(ask);
            } else {
                asks.push(ask);
            }
        }
    }
    if asks.is_empty() {
        asks = futile;
    }

    let mut moves: Vec<Move> = asks.into_iter().map(Move::Ask).collect();
    moves.extend(certain.into_iter().map(Move::Declare));
    if moves.is_empty() {
        moves.extend(
            state
                .scores
                .open_half_suits()
                .map(|h| Move::Declare(best_guess(teams, belief, player, h))),
        );
    }
    moves
}

/// Assign each card to a known holder on the team, else the first teammate
/// (the declarer first) not known to lack it, else the declarer.
fn best_guess(
    teams: &Teams,
    belief: &BeliefMatrix,
    declarer: PlayerId,
    half_suit: HalfSuit,
) -> Declare {
    let team = teams.team_of(declarer);
    let mut candidates = vec![declarer];
    candidates.extend(teams.members(team).filter(|p| *p != declarer));

    Declare::from_holders(declarer, half_suit, |card: Card| {
        belief
            .known_holder(card)
            .filter(|p| teams.same_team(declarer, *p))
            .or_else(|| {
                candidates
                    .iter()
                    .copied()
                    .find(|p| belief.tag(*p, card) != Knowledge::NotHeld)
            })
            .unwrap_or(declarer)
    })
}
