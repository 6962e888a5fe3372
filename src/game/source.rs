//! Collaborators injected into the game engine
//!
//! The engine never owns a timer or an event loop. It is handed a tick source
//! whose period it controls and an input source it drains for commands.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedReceiver;

use super::action::Command;

/// Periodic driver of [`GameEngine::tick`](super::GameEngine::tick)
pub trait TickSource {
    /// Change the time between two ticks
    fn set_period(&mut self, period: Duration);
}

/// Pending commands from the player
pub trait InputSource {
    /// Next queued command, `None` when nothing is pending
    fn poll_command(&mut self) -> Option<Command>;
}

impl InputSource for VecDeque<Command> {
    fn poll_command(&mut self) -> Option<Command> {
        self.pop_front()
    }
}

impl InputSource for UnboundedReceiver<Command> {
    fn poll_command(&mut self) -> Option<Command> {
        self.try_recv().ok()
    }
}

/// Tick source that only records the requested period.
///
/// Used where ticks are driven by hand, e.g. in tests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManualClock {
    pub period: Option<Duration>,
    pub changes: usize,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TickSource for ManualClock {
    fn set_period(&mut self, period: Duration) {
        self.period = Some(period);
        self.changes += 1;
    }
}
