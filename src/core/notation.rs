//! Compact text notation for moves.
//!
//! Human move sources type moves in a short form:
//!
//! - Ask: `<target> <card>`, e.g. `2 5C` ("ask seat 2 for the 5 of clubs").
//! - Declare: `CLAIM <player> <card> <player> <card> ...`, one pair per card
//!   of the half-suit, e.g. `CLAIM 1 AD 1 3D 3 2D 3 4D 1 5D 1 6D`.
//!
//! The mover is supplied by the caller (usually the turn holder). Parsing is
//! purely syntactic; the engine performs every legality check.

use thiserror::Error;

use super::moves::{Ask, Declare, Move};
use super::player::PlayerId;
use crate::cards::Card;

/// Text could not be parsed as a card or move.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("`{0}` is not a card (expected e.g. 3D, 10H, QS)")]
    InvalidCard(String),

    #[error("`{0}` is not a seat number")]
    InvalidPlayer(String),

    #[error("an ask needs exactly a seat and a card, got `{0}`")]
    MalformedAsk(String),

    #[error("a claim needs seat/card pairs, got `{0}`")]
    MalformedClaim(String),
}

const CLAIM_KEYWORD: &str = "CLAIM";

/// Parse a move made by `mover`.
///
/// ```
/// use literature::core::{notation::parse_move, Move, PlayerId};
///
/// let mv = parse_move(PlayerId::new(0), "1 5C").unwrap();
/// assert!(matches!(mv, Move::Ask(ask) if ask.target == PlayerId::new(1)));
/// ```
pub fn parse_move(mover: PlayerId, text: &str) -> Result<Move, NotationError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    match tokens.first() {
        Some(first) if first.eq_ignore_ascii_case(CLAIM_KEYWORD) => {
            parse_claim(mover, &tokens[1..], text).map(Move::Declare)
        }
        _ => parse_ask(mover, &tokens, text).map(Move::Ask),
    }
}

fn parse_ask(mover: PlayerId, tokens: &[&str], text: &str) -> Result<Ask, NotationError> {
    let [target, card] = tokens else {
        return Err(NotationError::MalformedAsk(text.trim().to_string()));
    };
    Ok(Ask::new(mover, parse_player(target)?, card.parse()?))
}

fn parse_claim(mover: PlayerId, tokens: &[&str], text: &str) -> Result<Declare, NotationError> {
    if tokens.is_empty() || tokens.len() % 2 != 0 {
        return Err(NotationError::MalformedClaim(text.trim().to_string()));
    }
    let assignment = tokens
        .chunks(2)
        .map(|pair| -> Result<(Card, PlayerId), NotationError> {
            Ok((pair[1].parse()?, parse_player(pair[0])?))
        })
        .collect::<Result<Vec<_>, _>>()?;
    let half_suit = assignment[0].0.half_suit();
    Ok(Declare::new(mover, half_suit, assignment))
}

fn parse_player(token: &str) -> Result<PlayerId, NotationError> {
    token
        .parse::<u8>()
        .map(PlayerId::new)
        .map_err(|_| NotationError::InvalidPlayer(token.to_string()))
}
