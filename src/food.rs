// Food seeking for a hungry snake
//
// When health drops below the threshold and food is on the board, the
// candidate set is rebuilt from the safety filters and then narrowed to the
// directions that close in on the nearest food.

use crate::candidates::{CandidateSet, DirectionSet};
use crate::safety;
use crate::snapshot::Snapshot;
use crate::types::{Coord, Direction};

/// True when the snake should go looking for food this turn
pub fn should_seek(snapshot: &Snapshot, low_health_threshold: i32) -> bool {
    snapshot.health() < low_health_threshold && !snapshot.food.is_empty()
}

/// Nearest food by Manhattan distance; ties go to the earliest in the list
pub fn nearest_food(head: Coord, food: &[Coord]) -> Option<Coord> {
    food.iter().min_by_key(|f| head.manhattan(f)).copied()
}

/// The one or two directions that reduce the distance to `target`
pub fn toward(head: Coord, target: Coord) -> DirectionSet {
    let mut set = DirectionSet::empty();
    if target.x > head.x {
        set.insert(Direction::Right);
    } else if target.x < head.x {
        set.insert(Direction::Left);
    }
    if target.y > head.y {
        set.insert(Direction::Up);
    } else if target.y < head.y {
        set.insert(Direction::Down);
    }
    set
}

/// Replaces `candidates` with the food-seeking set.
///
/// Starts again from all four directions, removes everything the safety
/// pipeline rejects, then keeps only the directions toward the nearest
/// food. The result may be empty when every toward-food move is unsafe.
pub fn seek(snapshot: &Snapshot, candidates: CandidateSet) -> CandidateSet {
    let mut seeking = candidates.reset_for_food_seeking();
    safety::apply_all(snapshot, seeking.directions_mut());

    let head = snapshot.head();
    if let Some(target) = nearest_food(head, &snapshot.food) {
        let wanted = toward(head, target);
        if !wanted.is_empty() {
            seeking.directions_mut().retain(wanted);
        }
        log::debug!(
            "Seeking food at ({}, {}), candidates {:?}",
            target.x,
            target.y,
            seeking.directions().to_vec()
        );
    }

    seeking
}
