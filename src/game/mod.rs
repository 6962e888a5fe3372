//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The engine is driven by an injected tick source and input source, so it can be
//! played from the terminal or stepped by hand in tests.

pub mod action;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod source;
pub mod speed;
pub mod state;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use config::GameConfig;
pub use engine::{CollisionType, GameEngine, GamePhase, GameSnapshot, StepInfo};
pub use error::GameError;
pub use grid::Grid;
pub use source::{InputSource, ManualClock, TickSource};
pub use speed::SpeedLevel;
pub use state::{Cell, Snake};
