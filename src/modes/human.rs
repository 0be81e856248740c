use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{interval, interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::game::{GameEngine, GameState, TICK_INTERVAL};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::SessionMetrics;
use crate::render::Renderer;

/// Screen refresh, independent of the simulation tick (keeps the clock moving)
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// Simulation timer. The first step comes one full period after start.
fn tick_timer() -> Interval {
    let mut timer = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

/// One game session played from the keyboard
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: SessionMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(mut engine: GameEngine) -> Self {
        let state = engine.new_game();

        Self {
            engine,
            state,
            metrics: SessionMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
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

        info!(
            length = self.state.snake.len(),
            apple = ?self.state.apple,
            "session started"
        );

        let result = self.run_game_loop(&mut terminal).await;

        let cleanup = Self::cleanup_terminal(&mut terminal);
        if let Err(err) = &cleanup {
            error!(?err, "failed to restore terminal");
        }

        result.and(cleanup)
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = tick_timer();

        let mut render_timer = interval(RENDER_INTERVAL);
        render_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Disabled for good once the snake dies
                _ = tick_timer.tick(), if self.state.is_alive => {
                    self.update_game();
                    self.draw(terminal)?;
                }

                _ = render_timer.tick() => {
                    self.draw(terminal)?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                info!(
                    length = self.state.snake.len(),
                    alive = self.state.is_alive,
                    "quit requested"
                );
                break;
            }
        }

        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        self.metrics.update();
        let view = self.state.render_state();
        terminal
            .draw(|frame| self.renderer.render(frame, &view, &self.metrics))
            .context("Failed to draw frame")?;
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => {
                if !self.state.set_direction(direction) {
                    debug!(?direction, "reversal ignored");
                }
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        let outcome = self.engine.tick(&mut self.state);

        if outcome.ate_apple {
            self.metrics.on_apple_eaten();
        }

        if let Some(collision) = outcome.collision {
            self.metrics.on_game_over();
            info!(
                ?collision,
                length = self.state.snake.len(),
                apples = self.metrics.apples_eaten,
                elapsed = %self.metrics.format_time(),
                "game over"
            );
        }
    }

    fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
