// Turn snapshot: the validated, read-only view of one turn that the
// decision pipeline consumes. Built fresh from each request.

use serde::{Deserialize, Serialize};

use crate::error::{SnapshotError, SnapshotResult};
use crate::types::{Battlesnake, Board, Coord, GameState};

/// Health range reported by the engine
pub const MAX_HEALTH: i32 = 100;

/// One snake as seen by the decision pipeline
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    pub id: String,
    pub head: Coord,
    /// Segments, head first
    pub body: Vec<Coord>,
    /// Reported length; authoritative over `body.len()`
    pub length: i32,
    pub health: i32,
}

impl Snake {
    /// Every segment that will still be occupied after this turn resolves.
    ///
    /// That is the first `length - 1` segments (the tail vacates), clamped to
    /// the segments actually reported.
    pub fn blocking_segments(&self) -> impl Iterator<Item = &Coord> {
        let count = (self.length - 1).max(0) as usize;
        self.body.iter().take(count)
    }

    /// The segment directly behind the head, if any
    pub fn neck(&self) -> Option<Coord> {
        self.body.get(1).copied()
    }

    fn from_api(snake: &Battlesnake) -> Self {
        Snake {
            id: snake.id.clone(),
            head: snake.body.first().copied().unwrap_or(snake.head),
            body: snake.body.clone(),
            length: snake.length,
            health: snake.health,
        }
    }

    fn validate(&self, width: i32, height: i32) -> SnapshotResult<()> {
        if self.body.is_empty() {
            return Err(SnapshotError::EmptyBody {
                snake_id: self.id.clone(),
            });
        }
        if self.length < 1 {
            return Err(SnapshotError::InvalidLength {
                snake_id: self.id.clone(),
                length: self.length,
            });
        }
        if !(0..=MAX_HEALTH).contains(&self.health) {
            return Err(SnapshotError::InvalidHealth {
                snake_id: self.id.clone(),
                health: self.health,
            });
        }
        check_on_board("snake head", &self.head, width, height)?;
        for segment in &self.body {
            check_on_board("snake segment", segment, width, height)?;
        }
        Ok(())
    }
}

/// One turn's board state
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub width: i32,
    pub height: i32,
    pub you: Snake,
    /// Every other snake on the board; never contains `you`
    pub opponents: Vec<Snake>,
    pub food: Vec<Coord>,
    pub hazards: Vec<Coord>,
}

impl Snapshot {
    /// Builds and validates a snapshot from an API board and the requesting snake.
    ///
    /// The engine lists every snake, including the requester, in `board.snakes`;
    /// entries sharing `you.id` are dropped from the opponents.
    pub fn from_request(board: &Board, you: &Battlesnake) -> SnapshotResult<Self> {
        let snapshot = Snapshot {
            width: board.width,
            height: board.height,
            you: Snake::from_api(you),
            opponents: board
                .snakes
                .iter()
                .filter(|snake| snake.id != you.id)
                .map(Snake::from_api)
                .collect(),
            food: board.food.clone(),
            hazards: board.hazards.clone(),
        };

        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Checks dimensions, snake shapes and that every position is on the board
    pub fn validate(&self) -> SnapshotResult<()> {
        if self.width < 1 || self.height < 1 {
            return Err(SnapshotError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }

        self.you.validate(self.width, self.height)?;
        for opponent in &self.opponents {
            opponent.validate(self.width, self.height)?;
        }
        for food in &self.food {
            check_on_board("food", food, self.width, self.height)?;
        }
        for hazard in &self.hazards {
            check_on_board("hazard", hazard, self.width, self.height)?;
        }
        Ok(())
    }

    pub fn head(&self) -> Coord {
        self.you.head
    }

    pub fn health(&self) -> i32 {
        self.you.health
    }

    /// Every snake on the board, self first
    pub fn all_snakes(&self) -> impl Iterator<Item = &Snake> {
        std::iter::once(&self.you).chain(self.opponents.iter())
    }
}

impl GameState {
    /// Convenience wrapper over [`Snapshot::from_request`]
    pub fn snapshot(&self) -> SnapshotResult<Snapshot> {
        Snapshot::from_request(&self.board, &self.you)
    }
}

fn check_on_board(what: &'static str, coord: &Coord, width: i32, height: i32) -> SnapshotResult<()> {
    if coord.x < 0 || coord.x >= width || coord.y < 0 || coord.y >= height {
        return Err(SnapshotError::OutOfBounds { what, coord: *coord });
    }
    Ok(())
}
