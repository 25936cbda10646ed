//! Seats at the table and the per-seat farm storage.
//!
//! A `PlayerId` names a seat; seat 0 starts the first round. The session
//! keeps one `Farm` per seat in a `PlayerMap`, indexed directly by seat.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// A seat at the table, 0-based. Games seat between 1 and 255 farmers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Seat `id`.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Position of this seat in a `PlayerMap`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Every seat of a `player_count`-farm game, in turn order.
    ///
    /// ```
    /// use farmyard_engine::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId::new(0), PlayerId::new(1), PlayerId::new(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per seat, usually a `Farm`.
///
/// Indexing with a seat the game does not have panics. Lookups driven by
/// caller input go through [`PlayerMap::try_get`] or [`PlayerMap::try_get_mut`].
///
/// ```
/// use farmyard_engine::core::{PlayerId, PlayerMap};
///
/// let mut food: PlayerMap<i32> = PlayerMap::new(4, |_| 2);
/// food[PlayerId::new(1)] += 1;
///
/// assert_eq!(food[PlayerId::new(0)], 2);
/// assert_eq!(food[PlayerId::new(1)], 3);
/// assert!(food.try_get(PlayerId::new(9)).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build the value for every seat with `factory`.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "a game needs at least one farm");
        assert!(player_count <= 255, "seats are numbered 0..=254");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// The seat's value, or `None` for a seat the game does not have.
    #[must_use]
    pub fn try_get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    pub fn try_get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Seats and values in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data
            .iter_mut()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Seats in turn order.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_basics() {
        let p1 = PlayerId::new(1);
        assert_eq!(p1.index(), 1);
        assert_eq!(format!("{}", p1), "Player 1");
    }

    #[test]
    fn test_player_map_factory() {
        let map: PlayerMap<usize> = PlayerMap::new(3, |p| p.index() * 10);

        assert_eq!(map[PlayerId::new(0)], 0);
        assert_eq!(map[PlayerId::new(2)], 20);
        assert_eq!(map.iter().count(), 3);
    }

    #[test]
    fn test_player_map_checked_access() {
        let mut map: PlayerMap<i32> = PlayerMap::new(2, |_| 0);

        assert!(map.try_get(PlayerId::new(1)).is_some());
        assert!(map.try_get(PlayerId::new(2)).is_none());
        assert!(map.try_get_mut(PlayerId::new(5)).is_none());

        *map.try_get_mut(PlayerId::new(1)).unwrap() = 7;
        assert_eq!(map.try_get(PlayerId::new(1)), Some(&7));
    }

    #[test]
    fn test_player_map_iter_order() {
        let map: PlayerMap<i32> = PlayerMap::new(3, |p| p.index() as i32);
        let ids: Vec<_> = map.iter().map(|(p, _)| p).collect();
        assert_eq!(ids, PlayerId::all(3).collect::<Vec<_>>());
    }

    #[test]
    #[should_panic(expected = "a game needs at least one farm")]
    fn test_player_map_zero_players() {
        let _: PlayerMap<i32> = PlayerMap::new(0, |_| 0);
    }
}
