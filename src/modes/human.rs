use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::game::{Command, GameConfig, GameEngine, GamePhase, TickSource};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Tick source backed by a tokio interval.
///
/// The interval is (re)built lazily on the next [`TokioTicker::tick`], so the
/// period can be changed outside of a runtime.
pub struct TokioTicker {
    period: Duration,
    interval: Option<Interval>,
}

impl TokioTicker {
    pub fn new() -> Self {
        Self {
            period: Duration::from_millis(100),
            interval: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Wait for the next tick
    pub async fn tick(&mut self) {
        let period = self.period;
        let interval = self.interval.get_or_insert_with(|| {
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            interval
        });
        interval.tick().await;
    }
}

impl Default for TokioTicker {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for TokioTicker {
    fn set_period(&mut self, period: Duration) {
        self.period = period;
        self.interval = None;
    }
}

type TerminalEngine = GameEngine<TokioTicker, UnboundedReceiver<Command>>;

pub struct HumanMode {
    engine: TerminalEngine,
    commands: UnboundedSender<Command>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    /// Set up a game; `seed` makes food placement reproducible
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let (commands, input) = unbounded_channel();
        let engine = GameEngine::new(config, TokioTicker::new(), input, rng)
            .context("Failed to create game engine")?;

        Ok(Self {
            engine,
            commands,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            "Session finished: {} games, best score {}",
            self.metrics.games_played, self.metrics.high_score
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick, period set by the engine's speed level
                _ = self.engine.ticker_mut().tick() => {
                    self.update_game();
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            if self.engine.take_redraw_request() {
                self.metrics
                    .update(self.engine.phase() == GamePhase::Playing);
                let snapshot = self.engine.snapshot();
                terminal
                    .draw(|frame| {
                        self.renderer.render(frame, &snapshot, &self.metrics);
                    })
                    .context("Failed to draw frame")?;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Game(command) => self.submit(command)?,
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    /// Queue a command and let the engine consume it
    fn submit(&mut self, command: Command) -> Result<()> {
        if command == Command::Start {
            self.metrics.on_game_start();
        }
        self.commands
            .send(command)
            .context("Game input channel closed")?;
        self.engine.drain_input();
        Ok(())
    }

    fn update_game(&mut self) {
        let info = self.engine.tick();
        self.metrics.on_step(&info, self.engine.score());
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::default(), Some(1)).unwrap();
        assert_eq!(mode.engine.phase(), GamePhase::NotStarted);
        assert_eq!(mode.engine.score(), 0);
        assert_eq!(mode.engine.ticker().period(), Duration::from_millis(40));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = GameConfig::new(405, 300);
        assert!(HumanMode::new(config, Some(1)).is_err());
    }

    #[test]
    fn test_key_events_reach_engine() {
        let mut mode = HumanMode::new(GameConfig::default(), Some(1)).unwrap();

        mode.handle_event(key(KeyCode::Char(' '))).unwrap();
        assert_eq!(mode.engine.phase(), GamePhase::Playing);

        mode.handle_event(key(KeyCode::Up)).unwrap();
        assert_eq!(mode.engine.turn_queue().back(), Some(&Direction::Up));

        mode.handle_event(key(KeyCode::Char('+'))).unwrap();
        assert_eq!(mode.engine.speed().get(), 5);
        assert_eq!(mode.engine.ticker().period(), Duration::from_millis(20));

        mode.handle_event(key(KeyCode::Char('p'))).unwrap();
        assert_eq!(mode.engine.phase(), GamePhase::Paused);

        mode.handle_event(key(KeyCode::Char('q'))).unwrap();
        assert!(mode.should_quit);
    }

    #[test]
    fn test_tick_updates_metrics() {
        let mut mode = HumanMode::new(GameConfig::default(), Some(1)).unwrap();
        mode.handle_event(key(KeyCode::Char(' '))).unwrap();

        let head = mode.engine.snake().head().unwrap();
        mode.engine
            .set_food(head.moved_in_direction(Direction::Right));
        mode.update_game();

        assert_eq!(mode.metrics.foods_eaten, 1);
        assert_eq!(mode.engine.score(), 10);
    }
}
