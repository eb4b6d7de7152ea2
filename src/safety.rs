// Safety filters
//
// Each filter removes directions that would kill the snake this turn. They
// read the snapshot directly (board coordinates, no grid) and only ever
// remove, so the order they run in does not change the result.

use crate::candidates::DirectionSet;
use crate::snapshot::{Snake, Snapshot};
use crate::types::{Coord, Direction};

/// A single safety filter
pub type SafetyFilter = fn(&Snapshot, &mut DirectionSet);

/// The full pipeline, in the order it runs
pub const PIPELINE: [(&str, SafetyFilter); 5] = [
    ("border", avoid_borders),
    ("neck", avoid_neck),
    ("own body", avoid_own_body),
    ("opponents", avoid_opponents),
    ("hazards", avoid_hazards),
];

/// Runs every filter over `candidates`
pub fn apply_all(snapshot: &Snapshot, candidates: &mut DirectionSet) {
    for (name, filter) in PIPELINE.iter() {
        let before = *candidates;
        filter(snapshot, candidates);
        if before != *candidates {
            log::debug!(
                "Safety filter '{}' left {:?}",
                name,
                candidates.to_vec()
            );
        }
    }
}

/// Directions surviving the pipeline when starting from all four
pub fn safe_directions(snapshot: &Snapshot) -> DirectionSet {
    let mut candidates = DirectionSet::all();
    apply_all(snapshot, &mut candidates);
    candidates
}

/// Drops moves that leave the board
pub fn avoid_borders(snapshot: &Snapshot, candidates: &mut DirectionSet) {
    let head = snapshot.head();
    if head.x <= 0 {
        candidates.remove(Direction::Left);
    }
    if head.x >= snapshot.width - 1 {
        candidates.remove(Direction::Right);
    }
    if head.y <= 0 {
        candidates.remove(Direction::Down);
    }
    if head.y >= snapshot.height - 1 {
        candidates.remove(Direction::Up);
    }
}

/// Drops the move back onto the neck
pub fn avoid_neck(snapshot: &Snapshot, candidates: &mut DirectionSet) {
    if let Some(neck) = snapshot.you.neck() {
        remove_toward(snapshot.head(), &neck, candidates);
    }
}

pub fn avoid_own_body(snapshot: &Snapshot, candidates: &mut DirectionSet) {
    avoid_snake(snapshot.head(), &snapshot.you, candidates);
}

pub fn avoid_opponents(snapshot: &Snapshot, candidates: &mut DirectionSet) {
    let head = snapshot.head();
    for opponent in &snapshot.opponents {
        avoid_snake(head, opponent, candidates);
    }
}

pub fn avoid_hazards(snapshot: &Snapshot, candidates: &mut DirectionSet) {
    let head = snapshot.head();
    for hazard in &snapshot.hazards {
        remove_toward(head, hazard, candidates);
    }
}

// Tails are skipped: they move out of the way before we arrive
fn avoid_snake(head: Coord, snake: &Snake, candidates: &mut DirectionSet) {
    for segment in snake.blocking_segments() {
        remove_toward(head, segment, candidates);
    }
}

fn remove_toward(head: Coord, target: &Coord, candidates: &mut DirectionSet) {
    for direction in Direction::all() {
        if direction.apply(&head) == *target {
            candidates.remove(direction);
        }
    }
}
