// Move decision
//
// Composes grid building, reachability scoring, the safety filters and the
// food heuristic into one direction per turn. Nothing here outlives a call;
// randomness comes in through the `rng` argument.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::candidates::{CandidateSet, DirectionSet};
use crate::error::SnapshotResult;
use crate::food;
use crate::grid::Grid;
use crate::reachability::{self, FloodSettings, SpaceScores};
use crate::safety;
use crate::snapshot::Snapshot;
use crate::types::Direction;

/// Which rung of the decision ladder produced the move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionTier {
    /// Enough open space behind the move
    Reachability,
    /// Low health, heading for the nearest food
    FoodSeeking,
    /// Nothing qualified, but the safety filters allow the move
    SafetyFallback,
    /// Every direction is unsafe; stay on the board and off the neck if possible
    LastResort,
}

/// Outcome of one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub direction: Direction,
    pub tier: DecisionTier,
    /// Directions the move was drawn from
    pub candidates: DirectionSet,
    pub scores: SpaceScores,
}

/// Decides this turn's move.
///
/// Fails only for a malformed snapshot; running out of safe moves is handled
/// by falling back to the safety filters alone, then to a last resort.
pub fn decide<R: Rng + ?Sized>(
    snapshot: &Snapshot,
    settings: &FloodSettings,
    rng: &mut R,
) -> SnapshotResult<Decision> {
    snapshot.validate()?;

    let grid = Grid::build(snapshot)?;
    let scores = reachability::score_directions(snapshot, &grid, settings);
    log::debug!("Space scores: {:?}", scores.iter().collect::<Vec<_>>());

    let mut candidates = CandidateSet::from_scores(&scores, snapshot.you.length);
    if food::should_seek(snapshot, settings.low_health_threshold) {
        candidates = food::seek(snapshot, candidates);
    }

    let primary_tier = if candidates.is_food_seeking() {
        DecisionTier::FoodSeeking
    } else {
        DecisionTier::Reachability
    };

    let (tier, pool) = fallback_ladder(snapshot, candidates.directions(), primary_tier);
    // Every rung of the ladder is non-empty
    let direction = pool.choose(rng).unwrap_or(Direction::Up);

    Ok(Decision {
        direction,
        tier,
        candidates: pool,
        scores,
    })
}

/// Picks the first non-empty rung: the primary candidates, then the safety
/// filters on their own, then the last resort
fn fallback_ladder(
    snapshot: &Snapshot,
    primary: DirectionSet,
    primary_tier: DecisionTier,
) -> (DecisionTier, DirectionSet) {
    if !primary.is_empty() {
        return (primary_tier, primary);
    }

    let safe = safety::safe_directions(snapshot);
    if !safe.is_empty() {
        return (DecisionTier::SafetyFallback, safe);
    }

    (DecisionTier::LastResort, last_resort(snapshot))
}

/// Moves that at least stay on the board and off the neck, or all four
/// directions when even those are gone. Never empty.
fn last_resort(snapshot: &Snapshot) -> DirectionSet {
    let mut pool = DirectionSet::all();
    safety::avoid_borders(snapshot, &mut pool);
    safety::avoid_neck(snapshot, &mut pool);
    if pool.is_empty() {
        DirectionSet::all()
    } else {
        pool
    }
}

/// Move used when the full decision cannot finish in time
pub fn emergency_move<R: Rng + ?Sized>(snapshot: &Snapshot, rng: &mut R) -> Direction {
    let mut pool = safety::safe_directions(snapshot);
    if pool.is_empty() {
        pool = last_resort(snapshot);
    }
    pool.choose(rng).unwrap_or(Direction::Up)
}
