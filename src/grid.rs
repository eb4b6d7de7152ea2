// Occupancy grid with a one-cell border on every side
//
// Grid coordinates are snapshot coordinates shifted by (+1, +1). All
// conversions go through `Grid::to_grid` so the shift lives in one place.

use crate::error::{SnapshotError, SnapshotResult};
use crate::snapshot::Snapshot;
use crate::types::Coord;

/// Content of a single grid cell. Negative codes are impassable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i8)]
pub enum Cell {
    Empty = 0,
    Food = 1,
    Hazard = -2,
    SnakeBody = -4,
    Border = -9,
}

impl Cell {
    pub fn code(self) -> i8 {
        self as i8
    }

    pub fn is_passable(self) -> bool {
        self.code() >= 0
    }
}

/// Dense `(width + 2) x (height + 2)` grid, row-major with y up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Rasterizes a snapshot.
    ///
    /// Write order is border, food, hazards, snake bodies, so a hazard
    /// reported on a food cell stays a hazard. Tails are left open since
    /// they vacate before the next turn.
    pub fn build(snapshot: &Snapshot) -> SnapshotResult<Self> {
        if snapshot.width < 1 || snapshot.height < 1 {
            return Err(SnapshotError::InvalidDimensions {
                width: snapshot.width,
                height: snapshot.height,
            });
        }

        let width = snapshot.width as usize + 2;
        let height = snapshot.height as usize + 2;
        let mut grid = Grid {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        };

        for x in 0..width {
            grid.put(x, 0, Cell::Border);
            grid.put(x, height - 1, Cell::Border);
        }
        for y in 0..height {
            grid.put(0, y, Cell::Border);
            grid.put(width - 1, y, Cell::Border);
        }

        for food in &snapshot.food {
            grid.mark("food", food, Cell::Food)?;
        }
        for hazard in &snapshot.hazards {
            grid.mark("hazard", hazard, Cell::Hazard)?;
        }
        for snake in snapshot.all_snakes() {
            for segment in snake.blocking_segments() {
                grid.mark("snake segment", segment, Cell::SnakeBody)?;
            }
        }

        Ok(grid)
    }

    /// Grid width including the border
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height including the border
    pub fn height(&self) -> usize {
        self.height
    }

    /// Shifts a board coordinate into grid space, `None` if it falls outside the grid
    pub fn to_grid(&self, coord: &Coord) -> Option<(usize, usize)> {
        let x = coord.x.checked_add(1)?;
        let y = coord.y.checked_add(1)?;
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((x, y))
    }

    /// Cell at grid coordinates
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.cells[self.offset(x, y)])
    }

    /// Cell at board coordinates
    pub fn cell_at(&self, coord: &Coord) -> Option<Cell> {
        let (x, y) = self.to_grid(coord)?;
        self.get(x, y)
    }

    /// Flat index of a grid cell, for side tables of the same shape
    pub fn offset(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn put(&mut self, x: usize, y: usize, cell: Cell) {
        let idx = self.offset(x, y);
        self.cells[idx] = cell;
    }

    fn mark(&mut self, what: &'static str, coord: &Coord, cell: Cell) -> SnapshotResult<()> {
        let (x, y) = self
            .to_grid(coord)
            .ok_or(SnapshotError::OutOfBounds { what, coord: *coord })?;
        self.put(x, y, cell);
        Ok(())
    }
}
