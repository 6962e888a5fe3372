use std::collections::VecDeque;
use std::time::Duration;

use log::{debug, info};
use rand::Rng;
use rand::rngs::StdRng;

use super::{
    action::{Command, Direction},
    config::GameConfig,
    error::GameError,
    grid::Grid,
    source::{InputSource, TickSource},
    speed::SpeedLevel,
    state::{Cell, Snake},
};

/// Type of collision that ended a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake left the board
    Wall,
    /// Snake hit itself
    SelfCollision,
}

/// Coarse game state derived from the session flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first Start
    NotStarted,
    Playing,
    Paused,
    Ended,
}

/// Information about a tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StepInfo {
    /// Whether game logic ran (false while paused or ended)
    pub advanced: bool,
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Set on the tick that ended the game
    pub collision_type: Option<CollisionType>,
}

/// Everything the render adapter needs to draw one frame
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    pub segments: Vec<Cell>,
    pub food: Cell,
    pub score: u32,
    pub speed: SpeedLevel,
    pub started: bool,
    pub paused: bool,
    pub ended: bool,
    pub collision: Option<CollisionType>,
    pub board_width: i32,
    pub board_height: i32,
    pub cell_size: i32,
}

impl GameSnapshot {
    pub fn head(&self) -> Option<Cell> {
        self.segments.first().copied()
    }
}

/// The game state machine.
///
/// Owns the snake, the food, the score, the speed level and the turn queue.
/// Time comes in through [`GameEngine::tick`]; player commands come in through
/// the injected input source (see [`GameEngine::drain_input`]) or directly via
/// [`GameEngine::handle_command`].
pub struct GameEngine<T, I, R = StdRng> {
    config: GameConfig,
    grid: Grid,
    snake: Snake,
    food: Cell,
    turn_queue: VecDeque<Direction>,
    score: u32,
    speed: SpeedLevel,
    started: bool,
    paused: bool,
    ended: bool,
    collision: Option<CollisionType>,
    redraw_requested: bool,
    ticker: T,
    input: I,
    rng: R,
}

impl<T: TickSource, I: InputSource, R: Rng> GameEngine<T, I, R> {
    /// Create an engine and set up the idle first game.
    ///
    /// The tick source is immediately set to the period of the initial speed.
    pub fn new(config: GameConfig, mut ticker: T, input: I, rng: R) -> Result<Self, GameError> {
        config.validate()?;
        let speed = SpeedLevel::new(config.initial_speed).ok_or_else(|| {
            GameError::InvalidConfig(format!("bad initial_speed {}", config.initial_speed))
        })?;
        ticker.set_period(speed.tick_interval());

        let grid = Grid::new(config.board_width, config.board_height, config.cell_size);
        let snake = Snake::new(config.cell_size, config.default_position);
        let (x, y) = config.default_position;

        let mut engine = Self {
            food: Cell::new(x, y, config.cell_size),
            config,
            grid,
            snake,
            turn_queue: VecDeque::new(),
            score: 0,
            speed,
            started: false,
            paused: false,
            ended: false,
            collision: None,
            redraw_requested: false,
            ticker,
            input,
            rng,
        };
        engine.new_game(true);
        Ok(engine)
    }

    /// Reset the board for a new game.
    ///
    /// The first game keeps the snake idle until the player starts; any
    /// later game sets off to the right and marks the session as started.
    pub fn new_game(&mut self, is_first_game: bool) {
        if is_first_game {
            self.snake.direction = Direction::NotMoving;
        } else {
            self.snake.direction = Direction::Right;
            self.started = true;
        }

        self.snake.reset();
        self.food = self.grid.place_food(&self.snake, &mut self.rng);

        self.turn_queue.clear();
        self.score = 0;
        self.paused = false;
        self.ended = false;
        self.collision = None;
        self.redraw_requested = true;

        if !is_first_game {
            info!(
                "New game: speed {}, food at ({}, {})",
                self.speed, self.food.x, self.food.y
            );
        }
    }

    /// Advance the game by one step.
    ///
    /// Does nothing but request a redraw while paused or ended.
    pub fn tick(&mut self) -> StepInfo {
        self.redraw_requested = true;

        if self.paused || self.ended {
            return StepInfo::default();
        }

        // One queued turn per tick, dropped even when rejected
        if let Some(next) = self.turn_queue.pop_front() {
            if self.is_compatible(next) {
                self.snake.direction = next;
            }
        }

        self.snake.advance();

        let ate_food = self.has_hit_food();
        if ate_food {
            self.food = self.grid.place_food(&self.snake, &mut self.rng);
            self.snake.grow(self.config.growth_per_food);
            self.score += self.config.food_score;
            debug!(
                "Food eaten: score {}, length {}, next food at ({}, {})",
                self.score,
                self.snake.len(),
                self.food.x,
                self.food.y
            );
        }

        let mut collision_type = None;
        if self.snake.direction != Direction::NotMoving {
            if let Some(collision) = self.check_collision() {
                self.ended = true;
                self.collision = Some(collision);
                collision_type = Some(collision);
                info!(
                    "Game over ({:?}): score {}, length {}",
                    collision,
                    self.score,
                    self.snake.len()
                );
            }
        }

        StepInfo {
            advanced: true,
            ate_food,
            collision_type,
        }
    }

    /// Apply a single player command
    pub fn handle_command(&mut self, command: Command) {
        match command {
            Command::Start => self.new_game(false),
            // Only Start is honoured before the first game begins
            _ if !self.started => {}
            Command::Turn(direction) => self.queue_turn(direction),
            Command::SpeedUp => {
                if let Some(faster) = self.speed.faster() {
                    self.set_speed(faster);
                }
            }
            Command::SpeedDown => {
                if let Some(slower) = self.speed.slower() {
                    self.set_speed(slower);
                }
            }
            Command::TogglePause => {
                if !self.ended {
                    self.paused = !self.paused;
                    self.redraw_requested = true;
                    debug!("Paused: {}", self.paused);
                }
            }
        }
    }

    /// Apply every command currently waiting in the input source.
    ///
    /// Returns the number of commands handled.
    pub fn drain_input(&mut self) -> usize {
        let mut handled = 0;
        while let Some(command) = self.input.poll_command() {
            self.handle_command(command);
            handled += 1;
        }
        handled
    }

    /// Whether `direction` may replace the current moving direction.
    ///
    /// Repeating the current direction or reversing onto the body is refused.
    pub fn is_compatible(&self, direction: Direction) -> bool {
        let current = self.snake.direction;
        direction != current && !current.is_opposite(direction)
    }

    /// Whether the current position ends the game.
    ///
    /// Walls only count when the snake is heading further out through them.
    pub fn is_game_over(&self) -> bool {
        self.check_collision().is_some()
    }

    fn check_collision(&self) -> Option<CollisionType> {
        let head = self.snake.head()?;
        let direction = self.snake.direction;
        let max_x = self.config.board_width - self.config.cell_size;
        let max_y = self.config.board_height - self.config.cell_size;

        let through_wall = (head.x < 0 && direction == Direction::Left)
            || (head.y < 0 && direction == Direction::Up)
            || (head.x > max_x && direction == Direction::Right)
            || (head.y > max_y && direction == Direction::Down);

        if through_wall {
            Some(CollisionType::Wall)
        } else if self.snake.hits_itself() {
            Some(CollisionType::SelfCollision)
        } else {
            None
        }
    }

    fn has_hit_food(&self) -> bool {
        self.snake.head() == Some(self.food)
    }

    fn queue_turn(&mut self, direction: Direction) {
        if self.paused || self.ended {
            return;
        }
        if self.turn_queue.back() != Some(&direction) {
            self.turn_queue.push_back(direction);
        }
    }

    fn set_speed(&mut self, speed: SpeedLevel) {
        self.speed = speed;
        self.ticker.set_period(speed.tick_interval());
        self.redraw_requested = true;
        info!(
            "Speed level {} ({} ms per tick)",
            speed,
            speed.tick_interval().as_millis()
        );
    }

    /// Return and clear the pending redraw request
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    /// Copy of the state for rendering
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            segments: self.snake.segments().to_vec(),
            food: self.food,
            score: self.score,
            speed: self.speed,
            started: self.started,
            paused: self.paused,
            ended: self.ended,
            collision: self.collision,
            board_width: self.config.board_width,
            board_height: self.config.board_height,
            cell_size: self.config.cell_size,
        }
    }

    pub fn phase(&self) -> GamePhase {
        if self.ended {
            GamePhase::Ended
        } else if !self.started {
            GamePhase::NotStarted
        } else if self.paused {
            GamePhase::Paused
        } else {
            GamePhase::Playing
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    /// Direct access to the snake, for setting up positions
    pub fn snake_mut(&mut self) -> &mut Snake {
        &mut self.snake
    }

    pub fn food(&self) -> Cell {
        self.food
    }

    /// Move the food without the free-cell check
    pub fn set_food(&mut self, food: Cell) {
        self.food = food;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn turn_queue(&self) -> &VecDeque<Direction> {
        &self.turn_queue
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn speed(&self) -> SpeedLevel {
        self.speed
    }

    pub fn tick_interval(&self) -> Duration {
        self.speed.tick_interval()
    }

    pub fn direction(&self) -> Direction {
        self.snake.direction
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn collision(&self) -> Option<CollisionType> {
        self.collision
    }

    pub fn ticker(&self) -> &T {
        &self.ticker
    }

    pub fn ticker_mut(&mut self) -> &mut T {
        &mut self.ticker
    }
}
