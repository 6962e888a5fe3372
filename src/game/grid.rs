use rand::Rng;

use super::state::{Cell, Snake};

/// Every cell of the playable area, computed once per board
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Vec<Cell>,
}

impl Grid {
    /// Tile a `width` x `height` board with cells of `cell_size`.
    ///
    /// Cells are laid out column by column, starting at the origin.
    pub fn new(width: i32, height: i32, cell_size: i32) -> Self {
        let mut cells = Vec::new();
        if cell_size > 0 {
            for x in (0..=width - cell_size).step_by(cell_size as usize) {
                for y in (0..=height - cell_size).step_by(cell_size as usize) {
                    cells.push(Cell::new(x, y, cell_size));
                }
            }
        }

        Self { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: &Cell) -> bool {
        self.cells.contains(cell)
    }

    /// Pick a uniformly random grid cell that no snake segment sits on.
    ///
    /// Sampling is retried until a free cell turns up, so this never returns
    /// when the snake already covers the whole grid.
    pub fn place_food<R: Rng>(&self, snake: &Snake, rng: &mut R) -> Cell {
        loop {
            let candidate = self.cells[rng.gen_range(0..self.cells.len())];
            if !snake.occupies(&candidate) {
                return candidate;
            }
        }
    }
}
