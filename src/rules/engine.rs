//! The game engine: authoritative state, move resolution and turn flow.
//!
//! `Engine` owns the real hands, every player's `BeliefMatrix` and the public
//! matrix. A submitted move is validated against the real state; if it is
//! rejected nothing changes. If it is accepted the engine resolves it,
//! broadcasts the public outcome to every matrix, advances the turn and
//! records a `MoveEvent`.
//!
//! Resolution draws no randomness: the seed only affects the deal and the
//! starting seat, so the same seed and moves always replay to the same state.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::legal;
use super::score::{Claim, GameResult};
use crate::belief::BeliefMatrix;
use crate::cards::{deal_full_deck, CardSet, HalfSuit};
use crate::core::error::{ConfigViolation, EngineError};
use crate::core::{
    Ask, AskOutcome, Declare, DeclareOutcome, GameConfig, GameRng, GameState, MisdeclarePenalty,
    Move, MoveEvent, PlayerId, PlayerMap, Resolution, Team, Teams, TurnAfterDeclare,
};

/// Where the engine is in its lifecycle.
///
/// Resolution is synchronous inside `submit`, so no intermediate phase is
/// ever observable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    AwaitingMove,
    Terminal,
}

/// Everything one player may see, as handed to a learning component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    pub player: PlayerId,
    pub team: Team,
    pub hand: CardSet,
    pub belief: BeliefMatrix,
    pub public_belief: BeliefMatrix,
    pub turn: PlayerId,
    pub claims: [Claim; HalfSuit::COUNT],
    pub history: Vector<MoveEvent>,
}

/// A single game of Literature.
#[derive(Clone, Debug)]
pub struct Engine {
    config: GameConfig,
    teams: Teams,
    state: GameState,
    beliefs: PlayerMap<BeliefMatrix>,
    public_belief: BeliefMatrix,
    phase: Phase,
}

impl Engine {
    /// Start a game with a deal and starting seat drawn from `seed`.
    ///
    /// `config.first_player` overrides the seeded starting seat.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, EngineError> {
        config.validate()?;
        let rng = GameRng::new(seed);
        let hands = deal_full_deck(config.player_count, &mut rng.for_context("deal"))?;
        let first = match config.first_player {
            Some(player) => player,
            None => {
                let mut first_turn = rng.for_context("first_turn");
                PlayerId::new(first_turn.gen_range_usize(0..config.player_count) as u8)
            }
        };
        Self::start(config, hands, first)
    }

    /// Start a game from an explicit deal.
    ///
    /// The hands must partition the 48-card deck; they need not be equal in
    /// size.
    pub fn from_deal(
        config: GameConfig,
        hands: PlayerMap<CardSet>,
        first: PlayerId,
    ) -> Result<Self, EngineError> {
        config.validate()?;
        if hands.player_count() != config.player_count {
            return Err(ConfigViolation::HandCount {
                expected: config.player_count,
                found: hands.player_count(),
            }
            .into());
        }
        if first.index() >= config.player_count {
            return Err(ConfigViolation::FirstPlayer(first).into());
        }

        let mut dealt = CardSet::EMPTY;
        for hand in hands.values() {
            if let Some(card) = dealt.intersection(*hand).iter().next() {
                return Err(ConfigViolation::DuplicateCard(card).into());
            }
            dealt = dealt.union(*hand);
        }
        if let Some(card) = CardSet::FULL.difference(dealt).iter().next() {
            return Err(ConfigViolation::MissingCard(card).into());
        }
        Self::start(config, hands, first)
    }

    fn start(config: GameConfig, hands: PlayerMap<CardSet>, first: PlayerId) -> Result<Self, EngineError> {
        let teams = Teams::resolve(&config.teams, config.player_count)?;
        let sizes = PlayerMap::new(config.player_count, |p| hands[p].len());
        let beliefs = PlayerMap::new(config.player_count, |p| {
            BeliefMatrix::for_player(p, hands[p], &sizes, &config.rules)
        });
        let public_belief = BeliefMatrix::public(&sizes, &config.rules);

        let mut engine = Self {
            teams,
            state: GameState::new(hands, first),
            beliefs,
            public_belief,
            phase: Phase::AwaitingMove,
            config,
        };
        engine.normalize_turn();
        info!(
            players = engine.config.player_count,
            first = %engine.state.turn,
            "game started"
        );
        Ok(engine)
    }

    /// Rebuild a game by replaying `moves` on the deal for `seed`.
    pub fn replay(
        config: GameConfig,
        seed: u64,
        moves: impl IntoIterator<Item = Move>,
    ) -> Result<Self, EngineError> {
        let mut engine = Self::new(config, seed)?;
        for mv in moves {
            engine.submit(mv)?;
        }
        Ok(engine)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn teams(&self) -> &Teams {
        &self.teams
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.phase == Phase::Terminal
    }

    #[must_use]
    pub fn turn(&self) -> PlayerId {
        self.state.turn
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count
    }

    #[must_use]
    pub fn history(&self) -> &Vector<MoveEvent> {
        &self.state.history
    }

    #[must_use]
    pub fn belief(&self, player: PlayerId) -> Option<&BeliefMatrix> {
        self.seated(player).then(|| &self.beliefs[player])
    }

    #[must_use]
    pub fn public_belief(&self) -> &BeliefMatrix {
        &self.public_belief
    }

    /// The final result; `GameNotOver` until every half-suit is resolved.
    pub fn result(&self) -> Result<GameResult, EngineError> {
        self.state.scores.winner()
    }

    fn seated(&self, player: PlayerId) -> bool {
        player.index() < self.config.player_count
    }

    // === Queries ===

    /// Moves `player` may make now. See [`legal::legal_moves`].
    #[must_use]
    pub fn legal_moves(&self, player: PlayerId) -> Vec<Move> {
        if !self.seated(player) {
            return Vec::new();
        }
        legal::legal_moves(
            &self.state,
            &self.teams,
            &self.config.rules,
            &self.beliefs[player],
            player,
        )
    }

    /// Snapshot of what `player` can see. `None` for an unseated player.
    #[must_use]
    pub fn observe(&self, player: PlayerId) -> Option<Observation> {
        if !self.seated(player) {
            return None;
        }
        Some(Observation {
            player,
            team: self.teams.team_of(player),
            hand: self.state.hand(player),
            belief: self.beliefs[player].clone(),
            public_belief: self.public_belief.clone(),
            turn: self.state.turn,
            claims: *self.state.scores.claims(),
            history: self.state.history.clone(),
        })
    }

    // === Moves ===

    /// Validate and apply a move.
    ///
    /// On error the engine is unchanged.
    pub fn submit(&mut self, mv: Move) -> Result<MoveEvent, EngineError> {
        let checked = match &mv {
            Move::Ask(ask) => legal::check_ask(&self.state, &self.teams, &self.config.rules, ask),
            Move::Declare(declare) => {
                legal::check_declare(&self.state, &self.teams, &self.config.rules, declare)
            }
        };
        if let Err(err) = checked {
            debug!(mover = %mv.mover(), kind = ?mv.kind(), error = %err, "move rejected");
            return Err(err);
        }

        let event = match mv {
            Move::Ask(ask) => self.resolve_ask(ask),
            Move::Declare(declare) => self.resolve_declare(declare),
        };
        if self.state.scores.is_terminal() {
            self.phase = Phase::Terminal;
            info!(
                team_a = self.state.scores.score(Team::A),
                team_b = self.state.scores.score(Team::B),
                "game over"
            );
        }
        Ok(event)
    }

    fn resolve_ask(&mut self, ask: Ask) -> MoveEvent {
        let outcome = if self.state.transfer(ask.card, ask.target, ask.asker) {
            AskOutcome::Success
        } else {
            AskOutcome::Failure
        };

        for (_, belief) in self.beliefs.iter_mut() {
            belief.apply_public_ask(&ask, outcome);
        }
        self.public_belief.apply_public_ask(&ask, outcome);

        if !outcome.is_success() {
            self.state.turn = ask.target;
        }
        self.normalize_turn();

        let event = self.record(Resolution::Ask { ask, outcome });
        debug!(
            sequence = event.sequence,
            asker = %ask.asker,
            target = %ask.target,
            card = %ask.card,
            outcome = ?outcome,
            turn = %event.turn_after,
            "ask resolved"
        );
        event
    }

    fn resolve_declare(&mut self, declare: Declare) -> MoveEvent {
        let half_suit = declare.half_suit;
        let team = self.teams.team_of(declare.declarer);

        let wrong: CardSet = declare
            .assignment
            .iter()
            .filter(|(card, player)| !self.state.hand(*player).contains(*card))
            .map(|(card, _)| *card)
            .collect();
        let outcome = if wrong.is_empty() {
            DeclareOutcome::Correct
        } else {
            DeclareOutcome::Incorrect
        };

        let awarded = match (outcome, self.config.rules.misdeclare_penalty) {
            (DeclareOutcome::Correct, _) => Claim::Won(team),
            (DeclareOutcome::Incorrect, MisdeclarePenalty::AwardOpponents) => Claim::Won(team.opponent()),
            (DeclareOutcome::Incorrect, MisdeclarePenalty::DiscardIfTeamHeld) => {
                let team_held = half_suit.cards().all(|card| {
                    self.state
                        .holder_of(card)
                        .is_some_and(|p| self.teams.team_of(p) == team)
                });
                if team_held {
                    Claim::Discarded
                } else {
                    Claim::Won(team.opponent())
                }
            }
        };

        self.beliefs[declare.declarer].learn_declare_diff(&declare, wrong);
        for (_, belief) in self.beliefs.iter_mut() {
            belief.apply_declare(&declare, outcome);
        }
        self.public_belief.apply_declare(&declare, outcome);

        self.state.retire(half_suit);
        self.state.scores.record(half_suit, awarded);

        match self.config.rules.turn_after_declare {
            TurnAfterDeclare::Unchanged => {}
            TurnAfterDeclare::Declarer => self.state.turn = declare.declarer,
            TurnAfterDeclare::DeclarerPartner => {
                let n = self.config.player_count;
                self.state.turn = declare
                    .declarer
                    .following(n)
                    .find(|p| self.teams.same_team(declare.declarer, *p))
                    .unwrap_or(declare.declarer);
            }
        }
        self.normalize_turn();

        let declarer = declare.declarer;
        let event = self.record(Resolution::Declare {
            declare,
            outcome,
            awarded,
        });
        info!(
            sequence = event.sequence,
            declarer = %declarer,
            half_suit = %half_suit,
            outcome = ?outcome,
            awarded = ?awarded,
            turn = %event.turn_after,
            "declaration resolved"
        );
        event
    }

    /// A turn holder without cards passes the turn to the next teammate with
    /// cards in seat order, or failing that the next opponent with cards.
    fn normalize_turn(&mut self) {
        let holder = self.state.turn;
        if self.state.scores.is_terminal() || !self.state.hand(holder).is_empty() {
            return;
        }
        let n = self.config.player_count;
        let has_cards = |p: &PlayerId| !self.state.hand(*p).is_empty();
        let next = holder
            .following(n)
            .filter(has_cards)
            .find(|p| self.teams.same_team(holder, *p))
            .or_else(|| holder.following(n).find(has_cards));
        if let Some(next) = next {
            debug!(from = %holder, to = %next, "turn passed from empty hand");
            self.state.turn = next;
        }
    }

    fn record(&mut self, resolution: Resolution) -> MoveEvent {
        let event = MoveEvent {
            sequence: self.state.next_sequence(),
            resolution,
            turn_after: self.state.turn,
        };
        self.state.record(event.clone());
        event
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Half, Suit};
    use crate::core::{DeclareViolation, RulesConfig};

    fn p(id: u8) -> PlayerId {
        PlayerId::new(id)
    }

    fn card(text: &str) -> Card {
        text.parse().unwrap()
    }

    /// Four seats, card `i` to seat `i % 4`, seat 0 to move.
    fn engine_with(rules: RulesConfig) -> Engine {
        let hands = PlayerMap::new(4, |p| Card::all().filter(|c| c.index() % 4 == p.index()).collect());
        Engine::from_deal(GameConfig::new(4).with_rules(rules), hands, p(0)).unwrap()
    }

    fn minor_clubs() -> HalfSuit {
        HalfSuit::new(Half::Minor, Suit::Clubs)
    }

    #[test]
    fn test_new_deals_evenly() {
        let engine = Engine::new(GameConfig::new(6), 7).unwrap();
        for p in PlayerId::all(6) {
            assert_eq!(engine.state().hand(p).len(), 8);
        }
        assert_eq!(engine.state().cards_in_play(), CardSet::FULL);
        assert_eq!(engine.phase(), Phase::AwaitingMove);
        assert!(engine.turn().index() < 6);
    }

    #[test]
    fn test_same_seed_same_game() {
        let a = Engine::new(GameConfig::new(4), 99).unwrap();
        let b = Engine::new(GameConfig::new(4), 99).unwrap();
        assert_eq!(a.state(), b.state());
        let c = Engine::new(GameConfig::new(4), 100).unwrap();
        assert_ne!(a.state().hands(), c.state().hands());
    }

    #[test]
    fn test_from_deal_validation() {
        let config = GameConfig::new(4);
        let even = |p: PlayerId| -> CardSet { Card::all().filter(|c| c.index() % 4 == p.index()).collect() };

        let three = PlayerMap::new(3, |p| even(p));
        assert!(matches!(
            Engine::from_deal(config.clone(), three, p(0)),
            Err(EngineError::Configuration(ConfigViolation::HandCount { expected: 4, found: 3 }))
        ));

        let mut overlap = PlayerMap::new(4, |p| even(p));
        overlap[p(1)].insert(card("AC"));
        assert_eq!(
            Engine::from_deal(config.clone(), overlap, p(0)).unwrap_err(),
            ConfigViolation::DuplicateCard(card("AC")).into()
        );

        let mut missing = PlayerMap::new(4, |p| even(p));
        missing[p(0)].remove(card("AC"));
        assert_eq!(
            Engine::from_deal(config.clone(), missing, p(0)).unwrap_err(),
            ConfigViolation::MissingCard(card("AC")).into()
        );

        let ok = PlayerMap::new(4, |p| even(p));
        assert!(Engine::from_deal(config, ok, p(4)).is_err());
    }

    #[test]
    fn test_ask_success_keeps_turn() {
        let mut engine = engine_with(RulesConfig::default());
        let event = engine.submit(Ask::new(p(0), p(1), card("2C")).into()).unwrap();

        assert!(matches!(
            event.resolution,
            Resolution::Ask { outcome: AskOutcome::Success, .. }
        ));
        assert_eq!(event.sequence, 0);
        assert_eq!(engine.turn(), p(0));
        assert!(engine.state().hand(p(0)).contains(card("2C")));
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn test_ask_failure_passes_turn() {
        let mut engine = engine_with(RulesConfig::default());
        let event = engine.submit(Ask::new(p(0), p(3), card("2C")).into()).unwrap();

        assert!(matches!(
            event.resolution,
            Resolution::Ask { outcome: AskOutcome::Failure, .. }
        ));
        assert_eq!(event.turn_after, p(3));
        assert_eq!(engine.turn(), p(3));
        assert!(engine.state().hand(p(1)).contains(card("2C")));
    }

    #[test]
    fn test_rejection_leaves_engine_unchanged() {
        let mut engine = engine_with(RulesConfig::default());
        let before = engine.state().clone();
        let err = engine.submit(Ask::new(p(1), p(0), card("AC")).into()).unwrap_err();
        assert!(matches!(err, EngineError::OutOfTurn { .. }));
        let err = engine.submit(Ask::new(p(0), p(2), card("2C")).into()).unwrap_err();
        assert!(matches!(err, EngineError::IllegalAsk(_)));
        assert_eq!(engine.state(), &before);
        assert_eq!(engine.belief(p(0)), Some(&engine_with(RulesConfig::default()).beliefs[p(0)]));
    }

    #[test]
    fn test_declare_validation_and_misdeclare() {
        let mut engine = engine_with(RulesConfig::default());
        let declare = Declare::from_holders(p(1), minor_clubs(), |c| p((c.index() % 4) as u8));
        let err = engine.submit(declare.into()).unwrap_err();
        assert!(matches!(
            err,
            EngineError::IllegalDeclare(DeclareViolation::NotTeammate { .. })
        ));

        // Seat 1 actually holds 2C.
        let declare = Declare::from_holders(p(0), minor_clubs(), |c| {
            if c.index() % 4 == 2 { p(2) } else { p(0) }
        });
        let event = engine.submit(declare.into()).unwrap();
        let Resolution::Declare { outcome, awarded, .. } = event.resolution else {
            panic!("expected a declare");
        };
        assert_eq!(outcome, DeclareOutcome::Incorrect);
        assert_eq!(awarded, Claim::Won(Team::B));
        assert!(engine.state().scores.is_resolved(minor_clubs()));
        assert_eq!(engine.state().cards_in_play().len(), 42);
    }

    #[test]
    fn test_correct_declare() {
        let mut engine = engine_with(RulesConfig::default());
        for (target, c) in [(1, "2C"), (1, "6C"), (3, "4C")] {
            let event = engine.submit(Ask::new(p(0), p(target), card(c)).into()).unwrap();
            assert!(matches!(event.resolution, Resolution::Ask { outcome: AskOutcome::Success, .. }));
        }
        let holders = engine.state().clone();
        let declare = Declare::from_holders(p(0), minor_clubs(), |c| holders.holder_of(c).unwrap());
        assert_eq!(declare.holder_of(card("3C")), Some(p(2)));

        let event = engine.submit(declare.into()).unwrap();
        assert!(matches!(
            event.resolution,
            Resolution::Declare { outcome: DeclareOutcome::Correct, awarded: Claim::Won(Team::A), .. }
        ));
        assert_eq!(engine.state().scores.score(Team::A), 1);
        for seat in PlayerId::all(4) {
            assert!(engine.belief(seat).unwrap().is_resolved(minor_clubs()));
        }
        assert!(engine.public_belief().is_resolved(minor_clubs()));
    }

    #[test]
    fn test_discard_when_team_held() {
        let rules = RulesConfig::default().with_misdeclare_penalty(MisdeclarePenalty::DiscardIfTeamHeld);

        // Team B holds some minor clubs: a wrong declare still loses them.
        let mut engine = engine_with(rules.clone());
        let declare = Declare::from_holders(p(0), minor_clubs(), |_| p(0));
        let event = engine.submit(declare.into()).unwrap();
        assert!(matches!(
            event.resolution,
            Resolution::Declare { awarded: Claim::Won(Team::B), .. }
        ));

        // Team A collects every major club, then misplaces 8C and QC.
        let mut engine = engine_with(rules);
        for (target, c) in [(3, "9C"), (1, "JC"), (3, "KC")] {
            engine.submit(Ask::new(p(0), p(target), card(c)).into()).unwrap();
        }
        let major_clubs = HalfSuit::new(Half::Major, Suit::Clubs);
        let declare = Declare::from_holders(p(0), major_clubs, |_| p(0));
        let event = engine.submit(declare.into()).unwrap();
        assert!(matches!(
            event.resolution,
            Resolution::Declare { outcome: DeclareOutcome::Incorrect, awarded: Claim::Discarded, .. }
        ));
        assert_eq!(engine.state().scores.score(Team::A), 0);
        assert_eq!(engine.state().scores.score(Team::B), 0);
    }

    #[test]
    fn test_turn_after_declare_rules() {
        let declare_by_one = || {
            Declare::from_holders(p(1), minor_clubs(), |c| {
                if c.index() % 4 == 3 { p(3) } else { p(1) }
            })
        };
        for (rule, expected) in [
            (TurnAfterDeclare::Unchanged, p(0)),
            (TurnAfterDeclare::Declarer, p(1)),
            (TurnAfterDeclare::DeclarerPartner, p(3)),
        ] {
            let mut engine = engine_with(RulesConfig::default().with_turn_after_declare(rule));
            let event = engine.submit(declare_by_one().into()).unwrap();
            assert_eq!(event.turn_after, expected, "{rule:?}");
        }
    }

    #[test]
    fn test_empty_hand_passes_turn_to_teammate() {
        // Seat 0 holds only AC.
        let hands = PlayerMap::new(4, |seat| {
            Card::all()
                .filter(|c| match seat.index() {
                    0 => c.index() == 0,
                    s => c.index() != 0 && c.index() % 3 == s - 1,
                })
                .collect()
        });
        let mut engine = Engine::from_deal(GameConfig::new(4), hands, p(1)).unwrap();

        // Seat 0 declares out of turn and is left without cards. The turn
        // goes to the declarer, then on to teammate seat 2.
        let declare = Declare::from_holders(p(0), minor_clubs(), |c| {
            if c.index() == 0 { p(0) } else { p(2) }
        });
        let event = engine.submit(declare.into()).unwrap();
        assert!(engine.state().hand(p(0)).is_empty());
        assert_eq!(event.turn_after, p(2));
        assert!(engine.legal_moves(p(0)).is_empty());
    }

    #[test]
    fn test_observe() {
        let engine = engine_with(RulesConfig::default());
        let obs = engine.observe(p(2)).unwrap();
        assert_eq!(obs.player, p(2));
        assert_eq!(obs.team, Team::A);
        assert_eq!(obs.hand, engine.state().hand(p(2)));
        assert_eq!(obs.belief.observer(), Some(p(2)));
        assert_eq!(obs.public_belief.observer(), None);
        assert!(obs.claims.iter().all(|c| *c == Claim::Open));
        assert!(engine.observe(p(4)).is_none());
    }

    #[test]
    fn test_resolved_half_suit_cannot_be_declared_again() {
        let mut engine = engine_with(RulesConfig::default());
        let declare = Declare::from_holders(p(0), minor_clubs(), |_| p(0));
        engine.submit(declare.into()).unwrap();

        let before = engine.state().clone();
        let public_before = engine.public_belief().clone();
        for declarer in [p(0), p(1)] {
            let again = Declare::from_holders(declarer, minor_clubs(), |_| declarer);
            assert_eq!(
                engine.submit(again.into()).unwrap_err(),
                DeclareViolation::AlreadyResolved(minor_clubs()).into()
            );
        }
        assert_eq!(engine.state(), &before);
        assert_eq!(engine.public_belief(), &public_before);
        assert!(engine
            .legal_moves(engine.turn())
            .iter()
            .all(|mv| !matches!(mv, Move::Declare(d) if d.half_suit == minor_clubs())));
    }

    #[test]
    fn test_no_moves_once_terminal() {
        // Seat 0 holds the whole deck and declares every half-suit.
        let hands = PlayerMap::new(2, |seat| if seat == p(0) { CardSet::FULL } else { CardSet::EMPTY });
        let mut engine = Engine::from_deal(GameConfig::new(2), hands, p(1)).unwrap();
        assert_eq!(engine.turn(), p(0), "an empty hand passes the turn");

        for half_suit in HalfSuit::all() {
            assert!(!engine.is_terminal());
            engine
                .submit(Declare::from_holders(p(0), half_suit, |_| p(0)).into())
                .unwrap();
        }

        assert!(engine.is_terminal());
        assert_eq!(engine.phase(), Phase::Terminal);
        assert_eq!(engine.result(), Ok(GameResult::Winner(Team::A)));
        for seat in PlayerId::all(2) {
            assert!(engine.legal_moves(seat).is_empty());
        }
        let late = Declare::from_holders(p(0), minor_clubs(), |_| p(0));
        assert!(engine.submit(late.into()).is_err());
        assert_eq!(engine.history().len(), HalfSuit::COUNT);
    }

    #[test]
    fn test_result_before_end() {
        let engine = engine_with(RulesConfig::default());
        assert_eq!(engine.result(), Err(EngineError::GameNotOver));
    }
}
