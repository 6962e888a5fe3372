//! Classic Snake - the arcade game, played in the terminal
//!
//! This library provides:
//! - Core game logic (game module), independent of any front end
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
