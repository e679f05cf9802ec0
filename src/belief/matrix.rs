//! Per-observer knowledge about who holds which card.
//!
//! ## Representation
//!
//! For every `(player, card)` pair the matrix stores one of three tags,
//! encoded as two bitset rows per player:
//!
//! - `held[p]`: cards the observer knows `p` holds
//! - `not_held[p]`: cards the observer knows `p` does not hold
//! - neither: unknown
//!
//! Alongside the tags it keeps, per player, a lower bound on the number of
//! cards held in each half-suit and the player's hand count (while the
//! observer can still track it).
//!
//! ## Updates
//!
//! A matrix only changes through public events (`apply_public_ask`,
//! `apply_declare`) and, for a declarer, the private feedback of their own
//! declaration (`learn_declare_diff`). Every update ends with `settle()`,
//! which runs the deduction rules to a fixpoint.
//!
//! Tags about cards of resolved half-suits are frozen.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardSet, HalfSuit};
use crate::core::{Ask, AskOutcome, Declare, DeclareOutcome, PlayerId, PlayerMap, RulesConfig, Teams};

/// What an observer knows about one `(player, card)` pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Knowledge {
    Unknown,
    Held,
    NotHeld,
}

impl Knowledge {
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Knowledge::Unknown)
    }
}

type HalfCounts = [u8; HalfSuit::COUNT];

/// One observer's knowledge of every hand.
///
/// `observer == None` is the public matrix: what anyone can deduce from
/// public events alone.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeliefMatrix {
    observer: Option<PlayerId>,
    held: PlayerMap<CardSet>,
    not_held: PlayerMap<CardSet>,
    minimums: PlayerMap<HalfCounts>,
    hand_counts: PlayerMap<Option<u8>>,
    in_play: CardSet,
    /// Whether an ask proves the asker holds a card of the half-suit.
    asks_reveal_half_suit: bool,
}

impl BeliefMatrix {
    /// Initial knowledge of `observer`, who was dealt `own_hand`.
    #[must_use]
    pub fn for_player(
        observer: PlayerId,
        own_hand: CardSet,
        hand_sizes: &PlayerMap<usize>,
        rules: &RulesConfig,
    ) -> Self {
        let mut matrix = Self::blank(Some(observer), hand_sizes, rules);
        matrix.held[observer] = own_hand;
        matrix.not_held[observer] = own_hand.complement();
        for (player, row) in matrix.not_held.iter_mut() {
            if player != observer {
                *row = own_hand;
            }
        }
        matrix.sync_self();
        matrix.settle();
        matrix
    }

    /// Initial common knowledge: only the hand sizes.
    #[must_use]
    pub fn public(hand_sizes: &PlayerMap<usize>, rules: &RulesConfig) -> Self {
        let mut matrix = Self::blank(None, hand_sizes, rules);
        matrix.settle();
        matrix
    }

    fn blank(observer: Option<PlayerId>, hand_sizes: &PlayerMap<usize>, rules: &RulesConfig) -> Self {
        let n = hand_sizes.player_count();
        Self {
            observer,
            held: PlayerMap::with_default(n),
            not_held: PlayerMap::with_default(n),
            minimums: PlayerMap::with_value(n, [0; HalfSuit::COUNT]),
            hand_counts: PlayerMap::new(n, |p| u8::try_from(hand_sizes[p]).ok()),
            in_play: CardSet::FULL,
            asks_reveal_half_suit: rules.require_half_suit_card,
        }
    }

    // === Queries ===

    #[must_use]
    pub fn observer(&self) -> Option<PlayerId> {
        self.observer
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.held.player_count()
    }

    #[must_use]
    pub fn tag(&self, player: PlayerId, card: Card) -> Knowledge {
        let (Some(held), Some(not_held)) = (self.held.try_get(player), self.not_held.try_get(player)) else {
            return Knowledge::Unknown;
        };
        if held.contains(card) {
            Knowledge::Held
        } else if not_held.contains(card) {
            Knowledge::NotHeld
        } else {
            Knowledge::Unknown
        }
    }

    /// The player known to hold `card`. `None` for unknown or resolved cards.
    #[must_use]
    pub fn known_holder(&self, card: Card) -> Option<PlayerId> {
        if !self.in_play.contains(card) {
            return None;
        }
        self.held
            .iter()
            .find(|(_, row)| row.contains(card))
            .map(|(p, _)| p)
    }

    /// Players not known to lack `card`. Empty for resolved cards.
    pub fn possible_holders(&self, card: Card) -> impl Iterator<Item = PlayerId> + '_ {
        let live = self.in_play.contains(card);
        self.not_held
            .iter()
            .filter(move |(_, row)| live && !row.contains(card))
            .map(|(p, _)| p)
    }

    /// In-play cards known to be held by `player`. Empty for an unseated
    /// player.
    #[must_use]
    pub fn held_by(&self, player: PlayerId) -> CardSet {
        self.held
            .try_get(player)
            .map_or(CardSet::EMPTY, |row| row.intersection(self.in_play))
    }

    /// In-play cards known not to be held by `player`. Empty for an unseated
    /// player.
    #[must_use]
    pub fn not_held_by(&self, player: PlayerId) -> CardSet {
        self.not_held
            .try_get(player)
            .map_or(CardSet::EMPTY, |row| row.intersection(self.in_play))
    }

    /// Lower bound on how many cards of `half_suit` `player` holds; 0 for an
    /// unseated player.
    #[must_use]
    pub fn half_minimum(&self, player: PlayerId, half_suit: HalfSuit) -> usize {
        self.minimums
            .try_get(player)
            .map_or(0, |mins| mins[half_suit.index()] as usize)
    }

    /// Exact hand count, if the observer can still track it.
    #[must_use]
    pub fn hand_count(&self, player: PlayerId) -> Option<usize> {
        self.hand_counts
            .try_get(player)
            .copied()
            .flatten()
            .map(usize::from)
    }

    #[must_use]
    pub fn is_resolved(&self, half_suit: HalfSuit) -> bool {
        self.in_play.in_half_suit(half_suit).is_empty()
    }

    #[must_use]
    pub fn cards_in_play(&self) -> CardSet {
        self.in_play
    }

    /// Cards the observer may ask for: in play, not in the observer's hand
    /// and, when asks require it, in a half-suit the observer holds a card of.
    ///
    /// Empty for the public matrix.
    pub fn askable_cards(&self) -> impl Iterator<Item = Card> {
        let own = self
            .observer
            .map_or(CardSet::EMPTY, |me| self.held_by(me));
        let candidates = if self.observer.is_some() {
            self.in_play.difference(own)
        } else {
            CardSet::EMPTY
        };
        let reveal = self.asks_reveal_half_suit;
        candidates
            .into_iter()
            .filter(move |card| !reveal || !own.in_half_suit(card.half_suit()).is_empty())
    }

    /// Declarations the observer can make with certainty: unresolved
    /// half-suits whose every card has a known holder on the observer's
    /// team.
    #[must_use]
    pub fn certain_declares(&self, teams: &Teams) -> Vec<Declare> {
        let Some(me) = self.observer else {
            return Vec::new();
        };
        HalfSuit::all()
            .filter(|h| !self.is_resolved(*h))
            .filter_map(|h| {
                let assignment: Option<Vec<(Card, PlayerId)>> = h
                    .cards()
                    .map(|card| {
                        self.known_holder(card)
                            .filter(|p| teams.same_team(me, *p))
                            .map(|p| (card, p))
                    })
                    .collect();
                assignment.map(|a| Declare::new(me, h, a))
            })
            .collect()
    }

    /// Internal consistency: no pair is both held and not held, an in-play
    /// card has at most one holder and a known holder excludes everyone
    /// else, and the observer knows its own row completely.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let n = self.player_count();
        let rows_disjoint = PlayerId::all(n)
            .all(|p| self.held[p].intersection(self.not_held[p]).is_empty());
        let single_holder = self.in_play.iter().all(|card| {
            let holders = PlayerId::all(n).filter(|p| self.held[*p].contains(card)).count();
            holders == 0
                || (holders == 1
                    && PlayerId::all(n).all(|p| self.tag(p, card).is_known()))
        });
        let self_known = self.observer.map_or(true, |me| {
            self.in_play
                .is_subset(self.held[me].union(self.not_held[me]))
        });
        rows_disjoint && single_holder && self_known
    }

    /// Every in-play tag, minimum and tracked hand count agrees with the
    /// actual `hands`.
    #[must_use]
    pub fn agrees_with(&self, hands: &PlayerMap<CardSet>) -> bool {
        hands.iter().all(|(p, hand)| {
            let hand = hand.intersection(self.in_play);
            let tags_ok = self.held_by(p).is_subset(hand)
                && self.not_held_by(p).intersection(hand).is_empty();
            let minimums_ok = HalfSuit::all()
                .all(|h| self.half_minimum(p, h) <= hand.in_half_suit(h).len());
            let count_ok = self.hand_count(p).map_or(true, |n| n == hand.len());
            tags_ok && minimums_ok && count_ok
        })
    }

    // === Updates ===

    /// Apply a resolved ask. Every observer learns the same facts.
    pub fn apply_public_ask(&mut self, ask: &Ask, outcome: AskOutcome) {
        let Ask { asker, target, card } = *ask;
        let half_suit = card.half_suit();
        if self.asks_reveal_half_suit {
            self.raise_minimum(asker, half_suit, 1);
        }
        self.mark_not_held(asker, card);
        match outcome {
            AskOutcome::Success => {
                self.mark_held(target, card);
                let known = self.held_by(target).in_half_suit(half_suit).len();
                self.raise_minimum(target, half_suit, known);
                self.transfer(card, target, asker);
            }
            AskOutcome::Failure => {
                self.mark_not_held(target, card);
            }
        }
        self.sync_self();
        self.settle();
    }

    /// Private feedback for the declarer: which entries of their own
    /// declaration were wrong. Call before `apply_declare`.
    pub fn learn_declare_diff(&mut self, declare: &Declare, wrong: CardSet) {
        for &(card, player) in &declare.assignment {
            if wrong.contains(card) {
                self.mark_not_held(player, card);
            } else {
                self.mark_held(player, card);
            }
        }
        self.settle();
    }

    /// Apply a resolved declaration and retire its half-suit.
    ///
    /// A wrong declaration reveals nothing per card, only that the half-suit
    /// left play.
    pub fn apply_declare(&mut self, declare: &Declare, outcome: DeclareOutcome) {
        if outcome == DeclareOutcome::Correct {
            for &(card, player) in &declare.assignment {
                self.mark_held(player, card);
            }
            self.settle();
        }
        self.retire(declare.half_suit);
    }

    fn retire(&mut self, half_suit: HalfSuit) {
        let n = self.player_count();
        let live = self.in_play.in_half_suit(half_suit);
        for card in live {
            match self.known_holder(card) {
                Some(holder) => {
                    if let Some(count) = self.hand_counts[holder].as_mut() {
                        *count = count.saturating_sub(1);
                    }
                }
                None => {
                    for p in PlayerId::all(n) {
                        if !self.not_held[p].contains(card) {
                            self.hand_counts[p] = None;
                        }
                    }
                }
            }
        }
        self.in_play = self.in_play.difference(live);
        for (_, minimums) in self.minimums.iter_mut() {
            minimums[half_suit.index()] = 0;
        }
        self.sync_self();
        self.settle();
    }

    fn transfer(&mut self, card: Card, from: PlayerId, to: PlayerId) {
        self.held[from].remove(card);
        self.not_held[from].insert(card);
        self.not_held[to].remove(card);
        self.held[to].insert(card);

        let h = card.half_suit().index();
        self.minimums[to][h] = self.minimums[to][h].saturating_add(1);
        self.minimums[from][h] = self.minimums[from][h].saturating_sub(1);
        if let Some(count) = self.hand_counts[to].as_mut() {
            *count += 1;
        }
        if let Some(count) = self.hand_counts[from].as_mut() {
            *count = count.saturating_sub(1);
        }
    }

    /// The observer's own minimums and count are exact.
    fn sync_self(&mut self) {
        let Some(me) = self.observer else {
            return;
        };
        let own = self.held_by(me);
        self.hand_counts[me] = Some(own.len() as u8);
        for h in HalfSuit::all() {
            self.minimums[me][h.index()] = own.in_half_suit(h).len() as u8;
        }
    }

    // Contradicting marks are dropped. Every mark comes from a true public
    // fact, so a contradiction can only mean the tag is already settled.
    fn mark_held(&mut self, player: PlayerId, card: Card) -> bool {
        if !self.in_play.contains(card) || self.not_held[player].contains(card) {
            return false;
        }
        if self.held.iter().any(|(p, row)| p != player && row.contains(card)) {
            return false;
        }
        self.held[player].insert(card)
    }

    fn mark_not_held(&mut self, player: PlayerId, card: Card) -> bool {
        if !self.in_play.contains(card) || self.held[player].contains(card) {
            return false;
        }
        self.not_held[player].insert(card)
    }

    fn raise_minimum(&mut self, player: PlayerId, half_suit: HalfSuit, at_least: usize) -> bool {
        let at_least = at_least.min(HalfSuit::SIZE) as u8;
        let slot = &mut self.minimums[player][half_suit.index()];
        if *slot < at_least {
            *slot = at_least;
            true
        } else {
            false
        }
    }

    // === Deduction ===

    /// Run the deduction rules until nothing changes.
    fn settle(&mut self) {
        let n = self.player_count();
        loop {
            let mut changed = false;
            for card in self.in_play {
                changed |= self.settle_card(card);
            }
            for player in PlayerId::all(n) {
                changed |= self.settle_player(player);
            }
            if !changed {
                break;
            }
        }
    }

    /// A known holder excludes everyone else; a single possible holder is
    /// the holder.
    fn settle_card(&mut self, card: Card) -> bool {
        let n = self.player_count();
        let mut changed = false;
        match self.known_holder(card) {
            Some(holder) => {
                for p in PlayerId::all(n).filter(|p| *p != holder) {
                    changed |= self.mark_not_held(p, card);
                }
            }
            None => {
                let only = {
                    let mut possible = PlayerId::all(n).filter(|p| !self.not_held[*p].contains(card));
                    match (possible.next(), possible.next()) {
                        (Some(p), None) => Some(p),
                        _ => None,
                    }
                };
                if let Some(p) = only {
                    changed |= self.mark_held(p, card);
                }
            }
        }
        changed
    }

    fn settle_player(&mut self, player: PlayerId) -> bool {
        let mut changed = false;
        for h in HalfSuit::all() {
            let live = self.in_play.in_half_suit(h);
            if live.is_empty() {
                continue;
            }
            let held = self.held[player].intersection(live);
            changed |= self.raise_minimum(player, h, held.len());

            // Only `min` candidates left: they are all held.
            let candidates = live.difference(self.not_held[player]);
            if candidates.len() == self.half_minimum(player, h) {
                for card in candidates {
                    changed |= self.mark_held(player, card);
                }
            }
        }

        // Minimums account for the whole hand: nothing else is held.
        if let Some(count) = self.hand_count(player) {
            let total: usize = HalfSuit::all().map(|h| self.half_minimum(player, h)).sum();
            if total == count {
                for h in HalfSuit::all() {
                    let live = self.in_play.in_half_suit(h);
                    let held = self.held[player].intersection(live);
                    if held.len() == self.half_minimum(player, h) {
                        for card in live.difference(held) {
                            changed |= self.mark_not_held(player, card);
                        }
                    }
                }
            }
        }
        changed
    }
}
