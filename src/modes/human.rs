use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use rand::Rng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::{Duration, Instant};
use tokio::time::interval;
use tracing::info;

use crate::game::{ConfigError, GameConfig, GameEngine, GameState, GameStatus, TickResult};
use crate::input::{InputHandler, KeyAction, MouseAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Approximate pixel size of a terminal cell, for drag speed
const CELL_PIXELS: (f64, f64) = (8.0, 16.0);

pub struct HumanMode<R: Rng> {
    engine: GameEngine<R>,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    pointer: Option<(u16, u16)>,
}

impl<R: Rng> HumanMode<R> {
    pub fn new(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        let mut engine = GameEngine::with_rng(config, rng)?;
        let state = engine.init();

        Ok(Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pointer: None,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(grid_size = self.state.grid_size, "starting terminal session");

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Game ticks at display rate (~60 Hz); the engine decides when the snake moves
        let mut tick_timer = interval(Duration::from_millis(16));
        let mut last_tick = Instant::now();

        // Render at 30 FPS (33ms per frame)
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    let now = Instant::now();
                    let elapsed = now - last_tick;
                    last_tick = now;
                    self.update_game(elapsed);
                }

                // Render frame
                _ = render_timer.tick() => {
                    if self.state.status == GameStatus::InGame {
                        self.metrics.update();
                    }
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }

                match self.input_handler.handle_key_event(key) {
                    KeyAction::GameAction(action) => {
                        let before = self.state.status;
                        self.engine.apply(&mut self.state, action);
                        if before != GameStatus::InGame
                            && before != GameStatus::Paused
                            && self.state.status == GameStatus::InGame
                        {
                            self.metrics.on_game_start();
                        }
                    }
                    KeyAction::Quit => {
                        self.should_quit = true;
                    }
                    KeyAction::None => {}
                }
            }
            Event::Mouse(mouse) => self.handle_mouse(self.input_handler.handle_mouse_event(mouse)),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, action: MouseAction) {
        match action {
            MouseAction::Grab { column, row } => {
                self.engine.begin_drag(&mut self.state);
                self.pointer = Some((column, row));
            }
            MouseAction::Drag { column, row } => {
                if let Some((last_column, last_row)) = self.pointer {
                    let dx = (f64::from(last_column) - f64::from(column)) * CELL_PIXELS.0;
                    let dy = (f64::from(last_row) - f64::from(row)) * CELL_PIXELS.1;
                    self.engine.request_manual_rotation(&mut self.state, dx, dy);
                }
                self.pointer = Some((column, row));
            }
            MouseAction::Release => {
                self.engine.end_drag(&mut self.state);
                self.pointer = None;
            }
            MouseAction::None => {}
        }
    }

    fn update_game(&mut self, elapsed: Duration) -> TickResult {
        let result = self.engine.update_tick(&mut self.state, elapsed);

        if result.ate_apple() {
            self.metrics.on_apple();
        }

        if result.status_changed() && result.status.is_terminal() {
            self.metrics
                .on_game_over(self.state.snake.len(), result.status == GameStatus::Win);
        }

        result
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Face, GridPosition};
    use crossterm::event::{
        KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    };
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn mode() -> HumanMode<StdRng> {
        HumanMode::new(GameConfig::default(), StdRng::seed_from_u64(21)).expect("valid config")
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.state.status, GameStatus::Welcome);
        assert_eq!(mode.state.snake.len(), 1);
    }

    #[test]
    fn test_space_starts_and_pauses() {
        let mut mode = mode();

        mode.handle_event(press(KeyCode::Char(' ')));
        assert_eq!(mode.state.status, GameStatus::InGame);

        mode.handle_event(press(KeyCode::Enter));
        assert_eq!(mode.state.status, GameStatus::Paused);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = mode();
        mode.handle_event(press(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_crash_is_recorded() {
        let mut mode = mode();
        mode.handle_event(press(KeyCode::Char(' ')));
        mode.state.stones.insert(GridPosition::new(Face::Front, 0, 1));
        mode.state.apples.remove(&GridPosition::new(Face::Front, 0, 1));

        let result = mode.update_game(Duration::from_millis(16));

        assert_eq!(result.status, GameStatus::Fail);
        assert_eq!(mode.metrics.games_played, 1);
        assert_eq!(mode.metrics.best_length, 1);
    }

    #[test]
    fn test_mouse_drag_rotates_outside_of_game() {
        let mut mode = mode();

        mode.handle_event(mouse(MouseEventKind::Down(MouseButton::Left), 10, 10));
        mode.handle_event(mouse(MouseEventKind::Drag(MouseButton::Left), 8, 10));
        // two columns left: 16 px at 0.25 degrees per pixel
        assert_eq!(mode.state.camera.target.y, -4.0);
        assert_eq!(mode.state.camera.current.y, -4.0);

        mode.handle_event(mouse(MouseEventKind::Up(MouseButton::Left), 8, 10));
        assert!(!mode.state.camera.is_dragging);
        assert_eq!(mode.pointer, None);
    }
}
