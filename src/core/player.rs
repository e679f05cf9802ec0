//! Player identification, teams and per-player data storage.
//!
//! ## PlayerId
//!
//! Type-safe seat identifier. Seats are 0-based.
//!
//! ## Team
//!
//! Literature is played by two teams of equal size. `Teams` resolves a
//! `TeamAssignment` into a per-seat lookup.
//!
//! ## PlayerMap
//!
//! One value per seat (hands, hand counts, belief rows), indexed by
//! `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::config::TeamAssignment;
use super::error::{ConfigViolation, EngineError};
use crate::cards::Card;

/// Seat identifier, 0-based, in clockwise order around the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(seat: u8) -> Self {
        Self(seat)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Every seat at a table of `player_count`.
    ///
    /// ```
    /// use literature::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all(6).collect();
    /// assert_eq!(seats.first(), Some(&PlayerId::new(0)));
    /// assert_eq!(seats.last(), Some(&PlayerId::new(5)));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count).map(|seat| PlayerId(seat as u8))
    }

    /// Seats after this one in clockwise order, wrapping, excluding `self`.
    pub fn following(self, player_count: usize) -> impl Iterator<Item = PlayerId> {
        let start = self.index();
        (1..player_count).map(move |offset| PlayerId(((start + offset) % player_count) as u8))
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "seat {}", self.0)
    }
}

/// One of the two teams.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub const BOTH: [Team; 2] = [Team::A, Team::B];

    #[must_use]
    pub const fn opponent(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Team::A => 0,
            Team::B => 1,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::A => f.write_str("Team A"),
            Team::B => f.write_str("Team B"),
        }
    }
}

/// Resolved seat-to-team lookup. Immutable for the life of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teams {
    seats: PlayerMap<Team>,
}

impl Teams {
    /// Resolve an assignment for `player_count` seats.
    ///
    /// Fails unless both teams end up with the same, non-zero number of seats.
    pub fn resolve(assignment: &TeamAssignment, player_count: usize) -> Result<Self, EngineError> {
        if player_count == 0 || player_count > Card::DECK_SIZE {
            return Err(ConfigViolation::PlayerCount(player_count).into());
        }
        let seats = match assignment {
            TeamAssignment::Parity => PlayerMap::new(player_count, |p| {
                if p.index() % 2 == 0 {
                    Team::A
                } else {
                    Team::B
                }
            }),
            TeamAssignment::Explicit(teams) => {
                if teams.len() != player_count {
                    return Err(ConfigViolation::TeamPartition {
                        a: teams.iter().filter(|t| **t == Team::A).count(),
                        b: teams.iter().filter(|t| **t == Team::B).count(),
                    }
                    .into());
                }
                PlayerMap::new(player_count, |p| teams[p.index()])
            }
        };

        let a = seats.iter().filter(|(_, t)| **t == Team::A).count();
        let b = player_count - a;
        if a != b || a == 0 {
            return Err(ConfigViolation::TeamPartition { a, b }.into());
        }
        Ok(Self { seats })
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.player_count()
    }

    #[must_use]
    pub fn team_of(&self, player: PlayerId) -> Team {
        self.seats[player]
    }

    #[must_use]
    pub fn same_team(&self, a: PlayerId, b: PlayerId) -> bool {
        self.seats[a] == self.seats[b]
    }

    /// Seats of `team` in seat order.
    pub fn members(&self, team: Team) -> impl Iterator<Item = PlayerId> + '_ {
        self.seats
            .iter()
            .filter(move |(_, t)| **t == team)
            .map(|(p, _)| p)
    }
}

/// One value per seat, indexed by `PlayerId`.
///
/// ```
/// use literature::core::{PlayerId, PlayerMap};
///
/// let mut counts: PlayerMap<u8> = PlayerMap::new(4, |_| 12);
/// counts[PlayerId::new(1)] = 11;
/// assert_eq!(counts[PlayerId::new(1)], 11);
/// assert_eq!(counts[PlayerId::new(0)], 12);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    seats: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build a map by calling `factory` once per seat, in seat order.
    pub fn new(player_count: usize, factory: impl FnMut(PlayerId) -> T) -> Self {
        debug_assert!(
            player_count <= Card::DECK_SIZE,
            "a table seats at most one player per card"
        );
        Self {
            seats: PlayerId::all(player_count).map(factory).collect(),
        }
    }

    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self {
            seats: vec![value; player_count],
        }
    }

    pub fn with_default(player_count: usize) -> Self
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    /// Panics if `player` is not seated; use `Engine` accessors for
    /// caller-supplied seats.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.seats[player.index()]
    }

    /// `None` for a seat outside the table.
    #[must_use]
    pub fn try_get(&self, player: PlayerId) -> Option<&T> {
        self.seats.get(player.index())
    }

    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.seats[player.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        PlayerId::all(self.seats.len()).zip(self.seats.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        PlayerId::all(self.seats.len()).zip(self.seats.iter_mut())
    }

    /// Values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.seats.iter()
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        PlayerId::all(self.seats.len())
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seat_display() {
        assert_eq!(PlayerId::new(4).index(), 4);
        assert_eq!(PlayerId::new(4).to_string(), "seat 4");
    }

    #[test]
    fn test_following_wraps() {
        let seats: Vec<_> = PlayerId::new(2).following(4).collect();
        assert_eq!(seats, vec![PlayerId::new(3), PlayerId::new(0), PlayerId::new(1)]);
        assert_eq!(PlayerId::new(0).following(1).count(), 0);
    }

    #[test]
    fn test_parity_teams() {
        let teams = Teams::resolve(&TeamAssignment::Parity, 6).unwrap();
        assert_eq!(teams.team_of(PlayerId::new(0)), Team::A);
        assert_eq!(teams.team_of(PlayerId::new(3)), Team::B);
        assert!(teams.same_team(PlayerId::new(1), PlayerId::new(5)));
        assert!(!teams.same_team(PlayerId::new(1), PlayerId::new(2)));

        let a: Vec<_> = teams.members(Team::A).collect();
        assert_eq!(a, vec![PlayerId::new(0), PlayerId::new(2), PlayerId::new(4)]);
    }

    #[test]
    fn test_explicit_teams() {
        let assignment = TeamAssignment::Explicit(vec![Team::A, Team::A, Team::B, Team::B]);
        let teams = Teams::resolve(&assignment, 4).unwrap();
        assert!(teams.same_team(PlayerId::new(0), PlayerId::new(1)));
        assert_eq!(Team::A.opponent(), Team::B);
    }

    #[test]
    fn test_uneven_teams_rejected() {
        let assignment = TeamAssignment::Explicit(vec![Team::A, Team::A, Team::A, Team::B]);
        let err = Teams::resolve(&assignment, 4).unwrap_err();
        assert!(matches!(
            err,
            EngineError::Configuration(ConfigViolation::TeamPartition { a: 3, b: 1 })
        ));

        assert!(Teams::resolve(&TeamAssignment::Parity, 3).is_err());
        let short = TeamAssignment::Explicit(vec![Team::A, Team::B]);
        assert!(Teams::resolve(&short, 4).is_err());
    }

    #[test]
    fn test_hand_sizes_by_seat() {
        let sizes: PlayerMap<usize> = PlayerMap::new(6, |_| Card::DECK_SIZE / 6);
        assert_eq!(sizes.player_count(), 6);
        assert!(sizes.values().all(|n| *n == 8));
        let seats: Vec<_> = sizes.iter().map(|(p, _)| p).collect();
        assert_eq!(seats, sizes.player_ids().collect::<Vec<_>>());
    }

    #[test]
    fn test_player_map_stateful_factory() {
        let mut next = 0;
        let map: PlayerMap<i32> = PlayerMap::new(3, |_| {
            next += 1;
            next
        });
        assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_player_map_mutation() {
        let mut counts: PlayerMap<Option<u8>> = PlayerMap::with_value(4, Some(12));
        counts[PlayerId::new(1)] = None;
        for (_, count) in counts.iter_mut() {
            if let Some(n) = count.as_mut() {
                *n -= 1;
            }
        }
        assert_eq!(counts[PlayerId::new(0)], Some(11));
        assert_eq!(counts[PlayerId::new(1)], None);
        assert_eq!(counts.try_get(PlayerId::new(4)), None);
    }

    #[test]
    fn test_teams_serialization() {
        let teams = Teams::resolve(&TeamAssignment::Parity, 4).unwrap();
        let json = serde_json::to_string(&teams).unwrap();
        let back: Teams = serde_json::from_str(&json).unwrap();
        assert_eq!(teams, back);
    }
}
