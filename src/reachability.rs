// Reachability scoring
//
// For each neighbor of the head, a depth-bounded flood fill counts how much
// open space lies behind it. The fill is depth first and runs on an explicit
// stack of (cell, depth) pairs, popping cells in the same order a recursive
// up/down/left/right expansion would visit them. A cell reached again at a
// smaller depth is expanded again, so the score is the weighted count of
// passable cells whose shortest distance from the entry is below the bound.

use serde::{Deserialize, Serialize};

use crate::grid::{Cell, Grid};
use crate::snapshot::Snapshot;
use crate::types::Direction;

/// Tunables for the flood fill
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloodSettings {
    /// Depth bound is `depth_multiplier * length + depth_offset`
    pub depth_multiplier: u32,
    pub depth_offset: u32,
    /// Food cells are weighted up while health is below this
    pub low_health_threshold: i32,
    /// Weight of a food cell while starving (an empty cell weighs 1)
    pub starving_food_weight: u32,
    /// Expand only up, down and left, matching the old scorer whose fourth
    /// branch re-entered the current cell instead of moving right
    pub legacy_three_way: bool,
}

impl Default for FloodSettings {
    fn default() -> Self {
        FloodSettings {
            depth_multiplier: 2,
            depth_offset: 2,
            low_health_threshold: 20,
            starving_food_weight: 4,
            legacy_three_way: false,
        }
    }
}

impl FloodSettings {
    /// Saturates instead of overflowing for absurd lengths
    pub fn depth_bound(&self, length: i32) -> u32 {
        self.depth_multiplier
            .saturating_mul(length.max(0) as u32)
            .saturating_add(self.depth_offset)
    }

    fn expansion(&self) -> &'static [Direction] {
        const CARDINAL: [Direction; 4] = [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ];
        if self.legacy_three_way {
            &CARDINAL[..3]
        } else {
            &CARDINAL
        }
    }
}

/// Flood-fill score per direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpaceScores([u32; 4]);

impl SpaceScores {
    pub fn from_array(scores: [u32; 4]) -> Self {
        SpaceScores(scores)
    }

    pub fn get(&self, direction: Direction) -> u32 {
        self.0[direction.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, u32)> + '_ {
        Direction::all().into_iter().map(move |d| (d, self.get(d)))
    }
}

/// Scores the four neighbors of the snake's head.
///
/// Each direction gets its own visited table, so two directions leading into
/// the same open area both count it.
pub fn score_directions(snapshot: &Snapshot, grid: &Grid, settings: &FloodSettings) -> SpaceScores {
    let head = snapshot.head();
    let depth_bound = settings.depth_bound(snapshot.you.length);
    let starving = snapshot.health() < settings.low_health_threshold;

    let mut scores = [0u32; 4];
    for direction in Direction::all() {
        let entry = direction.apply(&head);
        if let Some(start) = grid.to_grid(&entry) {
            scores[direction.index()] = flood_fill(grid, start, depth_bound, starving, settings);
        }
    }
    SpaceScores(scores)
}

/// Bounded flood fill from a grid cell, at depth 0.
///
/// A passable cell contributes once, when first reached below `depth_bound`.
/// It is worth 1, or `starving_food_weight` for food while `starving`. Later
/// arrivals only re-expand it when they come in at a smaller depth.
pub fn flood_fill(
    grid: &Grid,
    start: (usize, usize),
    depth_bound: u32,
    starving: bool,
    settings: &FloodSettings,
) -> u32 {
    let mut best_depth = vec![u32::MAX; grid.width() * grid.height()];
    let mut stack = vec![(start, 0u32)];
    let mut total = 0;

    while let Some(((x, y), depth)) = stack.pop() {
        if depth >= depth_bound {
            continue;
        }
        let cell = match grid.get(x, y) {
            Some(cell) if cell.is_passable() => cell,
            _ => continue,
        };
        let idx = grid.offset(x, y);
        if depth >= best_depth[idx] {
            continue;
        }
        let first_visit = best_depth[idx] == u32::MAX;
        best_depth[idx] = depth;

        if first_visit {
            total += if starving && cell == Cell::Food {
                settings.starving_food_weight
            } else {
                1
            };
        }

        // Reverse push so the first direction is popped first
        for direction in settings.expansion().iter().rev() {
            if let Some(next) = step(x, y, *direction) {
                stack.push((next, depth + 1));
            }
        }
    }

    total
}

fn step(x: usize, y: usize, direction: Direction) -> Option<(usize, usize)> {
    let (dx, dy) = direction.delta();
    let nx = (x as isize).checked_add(dx as isize)?;
    let ny = (y as isize).checked_add(dy as isize)?;
    if nx < 0 || ny < 0 {
        return None;
    }
    Some((nx as usize, ny as usize))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::Snake;
    use crate::types::Coord;

    fn snake(body: &[(i32, i32)], health: i32) -> Snake {
        let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord::new(x, y)).collect();
        Snake {
            id: "me".to_string(),
            head: body[0],
            length: body.len() as i32,
            body,
            health,
        }
    }

    fn snapshot(width: i32, height: i32, you: Snake) -> Snapshot {
        Snapshot {
            width,
            height,
            you,
            opponents: vec![],
            food: vec![],
            hazards: vec![],
        }
    }

    #[test]
    fn test_depth_bound_scales_with_length() {
        let settings = FloodSettings::default();
        assert_eq!(settings.depth_bound(3), 8);
        assert_eq!(settings.depth_bound(10), 22);
    }

    #[test]
    fn test_blocked_directions_score_zero() {
        // Head in the bottom-left corner, neck above it
        let snap = snapshot(5, 5, snake(&[(0, 0), (0, 1), (0, 2)], 90));
        let grid = Grid::build(&snap).unwrap();
        let scores = score_directions(&snap, &grid, &FloodSettings::default());

        assert_eq!(scores.get(Direction::Down), 0);
        assert_eq!(scores.get(Direction::Left), 0);
        assert_eq!(scores.get(Direction::Up), 0);
        assert!(scores.get(Direction::Right) > 0);
    }

    #[test]
    fn test_corridor_counts_each_cell_once() {
        // 1-wide corridor of 4 free cells to the right of the head
        let snap = snapshot(6, 1, snake(&[(1, 0), (0, 0)], 90));
        let grid = Grid::build(&snap).unwrap();
        let scores = score_directions(&snap, &grid, &FloodSettings::default());
        assert_eq!(scores.get(Direction::Right), 4);
    }

    #[test]
    fn test_depth_bound_limits_the_fill() {
        // Length 2 gives a depth bound of 6 on an 8-long corridor
        let snap = snapshot(10, 1, snake(&[(1, 0), (0, 0)], 90));
        let grid = Grid::build(&snap).unwrap();
        let scores = score_directions(&snap, &grid, &FloodSettings::default());
        assert_eq!(scores.get(Direction::Right), 6);
    }

    #[test]
    fn test_food_weighs_more_only_when_starving() {
        let mut snap = snapshot(6, 1, snake(&[(1, 0), (0, 0)], 90));
        snap.food.push(Coord::new(3, 0));
        let grid = Grid::build(&snap).unwrap();
        let settings = FloodSettings::default();
        assert_eq!(score_directions(&snap, &grid, &settings).get(Direction::Right), 4);

        snap.you.health = 19;
        let grid = Grid::build(&snap).unwrap();
        assert_eq!(score_directions(&snap, &grid, &settings).get(Direction::Right), 7);
    }

    #[test]
    fn test_directions_do_not_share_visited_cells() {
        // Stacked snake in the middle of an open 3x3 board: every direction
        // reaches the same ring of 8 cells
        let snap = snapshot(3, 3, snake(&[(1, 1), (1, 1)], 90));
        let grid = Grid::build(&snap).unwrap();
        let settings = FloodSettings {
            depth_offset: 20,
            ..FloodSettings::default()
        };
        let scores = score_directions(&snap, &grid, &settings);
        for direction in Direction::all() {
            assert_eq!(scores.get(direction), 8, "{:?}", direction);
        }
    }

    #[test]
    fn test_depth_bound_saturates() {
        let settings = FloodSettings {
            depth_multiplier: 3,
            ..FloodSettings::default()
        };
        assert_eq!(settings.depth_bound(i32::MAX), u32::MAX);
        assert_eq!(FloodSettings::default().depth_bound(i32::MAX), u32::MAX);
    }

    #[test]
    fn test_huge_length_still_scores_open_space() {
        let mut you = snake(&[(5, 5), (5, 4)], 90);
        you.length = i32::MAX;
        let snap = snapshot(11, 11, you);
        let grid = Grid::build(&snap).unwrap();
        let scores = score_directions(&snap, &grid, &FloodSettings::default());
        // Whole board minus the two body cells
        assert_eq!(scores.get(Direction::Up), 119);
        assert_eq!(scores.get(Direction::Down), 0);
    }

    #[test]
    fn test_opening_space_never_lowers_the_score() {
        // Remove one hazard at a time from a cluttered board and compare
        // every direction before and after
        let settings = FloodSettings::default();
        let layouts: [(&[(i32, i32)], &[(i32, i32)]); 3] = [
            (
                &[(4, 5), (4, 4), (4, 3)],
                &[
                    (4, 1), (2, 1), (1, 4), (1, 3), (5, 4), (2, 5),
                    (4, 0), (3, 0), (2, 3), (1, 2), (0, 4),
                ],
            ),
            (
                &[(2, 2), (2, 1), (2, 0)],
                &[(3, 3), (4, 2), (3, 1), (1, 3), (0, 2), (5, 5), (4, 4)],
            ),
            (
                &[(0, 0), (1, 0), (2, 0), (3, 0)],
                &[(0, 2), (1, 1), (2, 2), (3, 1), (4, 3), (1, 4), (3, 4), (5, 1)],
            ),
        ];

        for (body, hazards) in layouts {
            let mut board = snapshot(6, 6, snake(body, 90));
            board.hazards = hazards.iter().map(|&(x, y)| Coord::new(x, y)).collect();
            let before = score_directions(&board, &Grid::build(&board).unwrap(), &settings);

            for removed in 0..board.hazards.len() {
                let mut opened = board.clone();
                let freed = opened.hazards.remove(removed);
                let after = score_directions(&opened, &Grid::build(&opened).unwrap(), &settings);
                for direction in Direction::all() {
                    assert!(
                        after.get(direction) >= before.get(direction),
                        "{:?} after freeing {:?}: before {} after {}",
                        direction,
                        freed,
                        before.get(direction),
                        after.get(direction)
                    );
                }
            }
        }
    }

    #[test]
    fn test_legacy_fill_never_expands_right() {
        let snap = snapshot(6, 1, snake(&[(1, 0), (0, 0)], 90));
        let grid = Grid::build(&snap).unwrap();
        let legacy = FloodSettings {
            legacy_three_way: true,
            ..FloodSettings::default()
        };
        // Only the entry cell itself is counted
        assert_eq!(score_directions(&snap, &grid, &legacy).get(Direction::Right), 1);
    }
}
