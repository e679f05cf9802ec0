//! Move sources.
//!
//! A `MovePolicy` picks one of `Engine::legal_moves` for a player. Learned
//! policies live outside this crate; `UniformPolicy` is the seeded random
//! baseline used for self-play smoke tests and benchmarks.

use crate::core::{EngineError, GameRng, Move, MoveEvent, PlayerId, PlayerMap, Teams};
use crate::rules::{Engine, GameResult};

/// Chooses a move for a player.
pub trait MovePolicy: Send {
    /// Choose a move for `player`, or `None` if it has no legal move.
    fn choose_move(&mut self, engine: &Engine, player: PlayerId) -> Option<Move>;
}

/// Uniform random policy.
///
/// Selects uniformly from legal moves.
#[derive(Clone, Debug)]
pub struct UniformPolicy {
    rng: GameRng,
}

impl UniformPolicy {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed).for_context("policy"),
        }
    }
}

impl MovePolicy for UniformPolicy {
    fn choose_move(&mut self, engine: &Engine, player: PlayerId) -> Option<Move> {
        let moves = engine.legal_moves(player);
        self.rng.choose(&moves).cloned()
    }
}

/// Let the turn holder move with `policy` until the game ends or `max_moves`
/// moves have been played. Returns the events of the moves played.
///
/// The engine itself has no move cap; a random policy can ask in circles
/// forever, so the caller picks one.
pub fn play_out(
    engine: &mut Engine,
    policy: &mut impl MovePolicy,
    max_moves: usize,
) -> Result<Vec<MoveEvent>, EngineError> {
    let mut events = Vec::new();
    while !engine.is_terminal() && events.len() < max_moves {
        let Some(mv) = policy.choose_move(engine, engine.turn()) else {
            break;
        };
        events.push(engine.submit(mv)?);
    }
    Ok(events)
}

/// Per-seat reward for a finished game: 1 for the winning team, 0 for the
/// losers, 0.5 each on a draw.
pub fn result_to_rewards(result: &GameResult, teams: &Teams) -> PlayerMap<f64> {
    PlayerMap::new(teams.player_count(), |player| match result {
        GameResult::Winner(team) if teams.team_of(player) == *team => 1.0,
        GameResult::Winner(_) => 0.0,
        GameResult::Draw => 0.5,
    })
}
