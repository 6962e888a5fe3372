use std::hash::{Hash, Hasher};

use super::action::Direction;
use super::error::GameError;

/// Number of segments added behind the head by [`Snake::reset`]
pub const RESET_GROWTH: usize = 5;

/// A fixed-size square on the board, identified by its top-left corner
///
/// Two cells are equal when they sit at the same position; their size is
/// not part of the comparison.
#[derive(Debug, Clone, Copy)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub size: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32, size: i32) -> Self {
        Self { x, y, size }
    }

    /// Whether both cells occupy the same position
    pub fn same_position(&self, other: &Cell) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Move cell by delta, keeping its size
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            size: self.size,
        }
    }

    /// One cell-width step in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx * self.size, dy * self.size)
    }
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.same_position(other)
    }
}

impl Eq for Cell {}

impl Hash for Cell {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.hash(state);
        self.y.hash(state);
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    segments: Vec<Cell>,
    /// Current direction of movement
    pub direction: Direction,
    size: i32,
    default_position: (i32, i32),
}

impl Snake {
    /// Create an empty snake; call [`Snake::reset`] before playing
    pub fn new(size: i32, default_position: (i32, i32)) -> Self {
        Self {
            segments: Vec::new(),
            direction: Direction::NotMoving,
            size,
            default_position,
        }
    }

    /// Clear the body and reseed it at the default position.
    ///
    /// The fresh snake has one head segment plus [`RESET_GROWTH`] segments
    /// stacked on top of it, which unfold over the following ticks.
    pub fn reset(&mut self) {
        let (x, y) = self.default_position;
        self.segments.clear();
        self.segments.push(Cell::new(x, y, self.size));
        self.grow(RESET_GROWTH);
    }

    /// Append `count` copies of the current last segment
    pub fn grow(&mut self, count: usize) {
        let Some(&tail) = self.segments.last() else {
            return;
        };
        self.segments.extend(std::iter::repeat(tail).take(count));
    }

    /// Move the snake one step in its current direction.
    ///
    /// Every non-head segment takes the position its predecessor had before
    /// this step, then the head is translated. `NotMoving` leaves the head in
    /// place, so the body collapses onto it.
    pub fn advance(&mut self) {
        let previous = self.segments.clone();
        for index in (1..self.segments.len()).rev() {
            self.segments[index] = previous[index - 1];
        }

        if let Some(head) = self.segments.first_mut() {
            *head = head.moved_in_direction(self.direction);
        }
    }

    /// Get the head segment, `None` before the first reset
    pub fn head(&self) -> Option<Cell> {
        self.segments.first().copied()
    }

    /// Get the segment at `index`
    pub fn segment_at(&self, index: usize) -> Result<Cell, GameError> {
        self.segments
            .get(index)
            .copied()
            .ok_or(GameError::SegmentOutOfRange {
                index,
                len: self.segments.len(),
            })
    }

    /// All segments, head first
    pub fn segments(&self) -> &[Cell] {
        &self.segments
    }

    /// Body segments (excluding head)
    pub fn body_segments(&self) -> &[Cell] {
        self.segments.get(1..).unwrap_or(&[])
    }

    /// Check if any segment sits on `cell`
    pub fn occupies(&self, cell: &Cell) -> bool {
        self.segments.contains(cell)
    }

    /// Check if the head shares a position with any other segment
    pub fn hits_itself(&self) -> bool {
        match self.head() {
            Some(head) => self.body_segments().contains(&head),
            None => false,
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}
