//! Player identification, factions, and per-seat data storage.
//!
//! ## PlayerId
//!
//! The game is strictly two-seat: `P1` and `P2`. Relative references
//! ("self", "opponent") are resolved against a `PlayerId` at application
//! time via [`PlayerId::opponent`].
//!
//! ## PlayerMap
//!
//! Per-seat storage with O(1) access, indexable by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two seats at the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PlayerId {
    /// First seat (moves first).
    P1,
    /// Second seat.
    P2,
}

impl PlayerId {
    /// Both seats in turn order.
    pub const ALL: [PlayerId; 2] = [PlayerId::P1, PlayerId::P2];

    /// The other seat.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            PlayerId::P1 => PlayerId::P2,
            PlayerId::P2 => PlayerId::P1,
        }
    }

    /// Iterate over both seats.
    ///
    /// ```
    /// use shadowgov_engine::core::PlayerId;
    ///
    /// let seats: Vec<_> = PlayerId::all().collect();
    /// assert_eq!(seats, vec![PlayerId::P1, PlayerId::P2]);
    /// ```
    pub fn all() -> impl Iterator<Item = PlayerId> {
        Self::ALL.into_iter()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlayerId::P1 => write!(f, "P1"),
            PlayerId::P2 => write!(f, "P2"),
        }
    }
}

/// The two sides of the conflict.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faction {
    /// Wants global truth high.
    Truth,
    /// Wants global truth low.
    Government,
}

impl Faction {
    /// The opposing faction.
    #[must_use]
    pub const fn rival(self) -> Self {
        match self {
            Faction::Truth => Faction::Government,
            Faction::Government => Faction::Truth,
        }
    }

    /// Card id prefix required for this faction's cards.
    #[must_use]
    pub const fn id_prefix(self) -> &'static str {
        match self {
            Faction::Truth => "TR-",
            Faction::Government => "GV-",
        }
    }

    /// Direction this faction pushes the truth meter (+1 or -1).
    #[must_use]
    pub const fn truth_direction(self) -> i32 {
        match self {
            Faction::Truth => 1,
            Faction::Government => -1,
        }
    }
}

impl std::fmt::Display for Faction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Faction::Truth => write!(f, "truth"),
            Faction::Government => write!(f, "government"),
        }
    }
}

/// Per-seat data storage.
///
/// ## Example
///
/// ```
/// use shadowgov_engine::core::{PlayerId, PlayerMap};
///
/// let mut ip: PlayerMap<i32> = PlayerMap::with_value(0);
/// ip[PlayerId::P2] = 7;
///
/// assert_eq!(ip[PlayerId::P1], 0);
/// assert_eq!(ip[PlayerId::P2], 7);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    p1: T,
    p2: T,
}

impl<T> PlayerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(PlayerId) -> T) -> Self {
        Self {
            p1: factory(PlayerId::P1),
            p2: factory(PlayerId::P2),
        }
    }

    /// Create a map with both entries set to the same value.
    pub fn with_value(value: T) -> Self
    where
        T: Clone,
    {
        Self {
            p1: value.clone(),
            p2: value,
        }
    }

    /// Get a reference to a seat's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        match player {
            PlayerId::P1 => &self.p1,
            PlayerId::P2 => &self.p2,
        }
    }

    /// Get a mutable reference to a seat's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        match player {
            PlayerId::P1 => &mut self.p1,
            PlayerId::P2 => &mut self.p2,
        }
    }

    /// Iterate over (PlayerId, &T) pairs in seat order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        [(PlayerId::P1, &self.p1), (PlayerId::P2, &self.p2)].into_iter()
    }

    /// Iterate over the values in seat order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        [&self.p1, &self.p2].into_iter()
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
    fn test_opponent() {
        assert_eq!(PlayerId::P1.opponent(), PlayerId::P2);
        assert_eq!(PlayerId::P2.opponent(), PlayerId::P1);
        assert_eq!(format!("{}", PlayerId::P2), "P2");
    }

    #[test]
    fn test_faction_prefix_and_direction() {
        assert_eq!(Faction::Truth.id_prefix(), "TR-");
        assert_eq!(Faction::Government.id_prefix(), "GV-");
        assert_eq!(Faction::Truth.truth_direction(), 1);
        assert_eq!(Faction::Government.truth_direction(), -1);
        assert_eq!(Faction::Truth.rival(), Faction::Government);
    }

    #[test]
    fn test_faction_serde_lowercase() {
        let json = serde_json::to_string(&Faction::Government).unwrap();
        assert_eq!(json, "\"government\"");
        let back: Faction = serde_json::from_str("\"truth\"").unwrap();
        assert_eq!(back, Faction::Truth);
    }

    #[test]
    fn test_player_map_new() {
        let map: PlayerMap<i32> = PlayerMap::new(|p| if p == PlayerId::P1 { 1 } else { 2 });

        assert_eq!(map[PlayerId::P1], 1);
        assert_eq!(map[PlayerId::P2], 2);
    }

    #[test]
    fn test_player_map_mutation_and_iter() {
        let mut map: PlayerMap<i32> = PlayerMap::with_value(0);
        map[PlayerId::P1] = 10;
        *map.get_mut(PlayerId::P2) += 3;

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(PlayerId::P1, &10), (PlayerId::P2, &3)]);
        assert_eq!(map.values().sum::<i32>(), 13);
    }
}
