// Candidate directions for the current turn
//
// `DirectionSet` is a four-bit set. `CandidateSet` tags where the set came
// from: the reachability scores, or the one-time reset performed when the
// snake goes hunting for food. Within either state the set only shrinks.

use rand::seq::IndexedRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::reachability::SpaceScores;
use crate::types::Direction;

/// Small set of directions, iterated in `Direction::all()` order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DirectionSet(u8);

impl DirectionSet {
    pub fn empty() -> Self {
        DirectionSet(0)
    }

    pub fn all() -> Self {
        DirectionSet(0b1111)
    }

    pub fn only(direction: Direction) -> Self {
        DirectionSet(Self::bit(direction))
    }

    pub fn contains(&self, direction: Direction) -> bool {
        self.0 & Self::bit(direction) != 0
    }

    pub fn insert(&mut self, direction: Direction) {
        self.0 |= Self::bit(direction);
    }

    pub fn remove(&mut self, direction: Direction) {
        self.0 &= !Self::bit(direction);
    }

    /// Keeps only the directions also present in `other`
    pub fn retain(&mut self, other: DirectionSet) {
        self.0 &= other.0;
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = Direction> {
        let bits = self.0;
        Direction::all()
            .into_iter()
            .filter(move |d| bits & Self::bit(*d) != 0)
    }

    pub fn to_vec(&self) -> Vec<Direction> {
        self.iter().collect()
    }

    /// Uniformly random member, `None` when empty
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Direction> {
        self.to_vec().choose(rng).copied()
    }

    fn bit(direction: Direction) -> u8 {
        1 << direction.index()
    }
}

impl std::iter::FromIterator<Direction> for DirectionSet {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        let mut set = DirectionSet::empty();
        for direction in iter {
            set.insert(direction);
        }
        set
    }
}

impl Serialize for DirectionSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de> Deserialize<'de> for DirectionSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let directions = Vec::<Direction>::deserialize(deserializer)?;
        Ok(directions.into_iter().collect())
    }
}

/// Candidate directions tagged with the stage that produced them
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateSet {
    /// Directions whose flood-fill score reached the snake's length
    Scored(DirectionSet),
    /// Fresh set used by the low-health food hunt
    FoodSeeking(DirectionSet),
}

impl CandidateSet {
    /// Directions with at least `length` reachable space
    pub fn from_scores(scores: &SpaceScores, length: i32) -> Self {
        let threshold = length.max(0) as u32;
        CandidateSet::Scored(
            Direction::all()
                .into_iter()
                .filter(|d| scores.get(*d) >= threshold)
                .collect(),
        )
    }

    /// Discards the scored set in favour of all four directions.
    ///
    /// This is the only transition that grows the set.
    pub fn reset_for_food_seeking(self) -> Self {
        CandidateSet::FoodSeeking(DirectionSet::all())
    }

    pub fn directions(&self) -> DirectionSet {
        match self {
            CandidateSet::Scored(set) | CandidateSet::FoodSeeking(set) => *set,
        }
    }

    pub fn directions_mut(&mut self) -> &mut DirectionSet {
        match self {
            CandidateSet::Scored(set) | CandidateSet::FoodSeeking(set) => set,
        }
    }

    pub fn is_food_seeking(&self) -> bool {
        matches!(self, CandidateSet::FoodSeeking(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_set_operations() {
        let mut set = DirectionSet::all();
        assert_eq!(set.len(), 4);
        set.remove(Direction::Left);
        assert!(!set.contains(Direction::Left));
        assert_eq!(set.to_vec(), vec![Direction::Up, Direction::Down, Direction::Right]);

        set.retain([Direction::Right, Direction::Left].into_iter().collect());
        assert_eq!(set, DirectionSet::only(Direction::Right));

        set.remove(Direction::Right);
        assert!(set.is_empty());
    }

    #[test]
    fn test_choose_only_returns_members() {
        let mut rng = StdRng::seed_from_u64(7);
        let set: DirectionSet = [Direction::Up, Direction::Left].into_iter().collect();
        for _ in 0..50 {
            let picked = set.choose(&mut rng).unwrap();
            assert!(set.contains(picked));
        }
        assert_eq!(DirectionSet::empty().choose(&mut rng), None);
    }

    #[test]
    fn test_from_scores_applies_length_threshold() {
        let scores = SpaceScores::from_array([10, 0, 3, 2]);
        let candidates = CandidateSet::from_scores(&scores, 3);
        assert!(!candidates.is_food_seeking());
        assert_eq!(
            candidates.directions().to_vec(),
            vec![Direction::Up, Direction::Left]
        );
    }

    #[test]
    fn test_food_seeking_reset_restores_all_directions() {
        let candidates = CandidateSet::Scored(DirectionSet::empty());
        let reset = candidates.reset_for_food_seeking();
        assert!(reset.is_food_seeking());
        assert_eq!(reset.directions(), DirectionSet::all());
    }

    #[test]
    fn test_serializes_as_direction_list() {
        let set: DirectionSet = [Direction::Down, Direction::Right].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["down","right"]"#);
        let back: DirectionSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, set);
    }
}
