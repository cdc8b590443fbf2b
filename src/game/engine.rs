use rand::Rng;
use rand::rngs::ThreadRng;
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{
    action::{Action, Direction},
    camera::CameraMode,
    config::{ConfigError, GameConfig},
    placement,
    state::{GameState, GameStatus, GridPosition, Snake},
    topology,
};

/// Information about a single snake move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepInfo {
    /// Whether the snake ate an apple this move
    pub ate_apple: bool,
    /// Whether the move ended on a stone or on the snake's own body
    pub crashed: bool,
}

/// Result of a game tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// The move made this tick, if the snake was due
    pub step: Option<StepInfo>,
    /// Status before the tick
    pub previous_status: GameStatus,
    /// Status after the tick
    pub status: GameStatus,
}

impl TickResult {
    pub fn status_changed(&self) -> bool {
        self.previous_status != self.status
    }

    pub fn ate_apple(&self) -> bool {
        self.step.is_some_and(|step| step.ate_apple)
    }
}

/// The game engine that handles all game logic
///
/// The engine owns configuration and randomness; the mutable round lives in
/// a [`GameState`] passed to every call.
pub struct GameEngine<R: Rng = ThreadRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<ThreadRng> {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        Self::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine drawing object positions from `rng`
    ///
    /// The config is validated first: planting on an empty cube, or more
    /// objects than there are free cells, could never finish.
    pub fn with_rng(config: GameConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Build the welcome screen state with freshly planted objects
    pub fn init(&mut self) -> GameState {
        let mut state = GameState::new(
            self.new_snake(),
            BTreeSet::new(),
            BTreeSet::new(),
            self.config.grid_size,
        );
        self.plant_objects(&mut state);
        state
    }

    fn new_snake(&self) -> Snake {
        Snake::new(
            self.config.start,
            self.config.start_direction,
            self.config.initial_move_period(),
        )
    }

    /// Reset the snake and replace all apples and stones
    pub fn plant_objects(&mut self, state: &mut GameState) {
        state.snake = self.new_snake();

        let mut occupied: BTreeSet<_> = state.snake.body.iter().copied().collect();
        let grid_size = self.config.grid_size;

        state.apples = placement::plant(
            &mut self.rng,
            grid_size,
            self.config.apples_count,
            &mut occupied,
        );
        state.stones = placement::plant(
            &mut self.rng,
            grid_size,
            self.config.stones_count,
            &mut occupied,
        );

        info!(
            apples = state.apples.len(),
            stones = state.stones.len(),
            "planted objects"
        );
    }

    /// Dispatch a player command
    pub fn apply(&mut self, state: &mut GameState, action: Action) {
        match action {
            Action::Turn(direction) => self.request_direction_change(state, direction),
            Action::StartOrPause => self.request_start_or_pause(state),
        }
    }

    /// Steer the snake, as seen through the camera
    ///
    /// Reversing onto the body is ignored.
    pub fn request_direction_change(&self, state: &mut GameState, requested: Direction) {
        let direction =
            topology::view_adjusted_direction(state.snake.head(), requested, state.grid_size);

        if state.snake.set_direction(direction) {
            debug!(?direction, "direction changed");
        }
    }

    /// Start, pause, resume or restart depending on the current status
    pub fn request_start_or_pause(&mut self, state: &mut GameState) {
        let next = match state.status {
            GameStatus::Welcome | GameStatus::Paused => GameStatus::InGame,
            GameStatus::Win | GameStatus::Fail => {
                self.plant_objects(state);
                GameStatus::InGame
            }
            GameStatus::InGame => GameStatus::Paused,
        };
        self.set_status(state, next);
    }

    /// Grab the cube for manual rotation; only outside of a running round
    pub fn begin_drag(&self, state: &mut GameState) {
        if state.status != GameStatus::InGame {
            state.camera.begin_drag();
        }
    }

    pub fn end_drag(&self, state: &mut GameState) {
        state.camera.end_drag();
    }

    /// Rotate the cube by a pointer movement while dragging
    pub fn request_manual_rotation(&self, state: &mut GameState, dx: f64, dy: f64) {
        state.camera.drag(dx, dy, self.config.drag_velocity);
    }

    /// Advance the game by `elapsed` time
    ///
    /// The order is fixed: move the snake if due, rotate the camera, then
    /// check for a lost or won round.
    pub fn update_tick(&mut self, state: &mut GameState, elapsed: Duration) -> TickResult {
        let previous_status = state.status;
        state.clock += elapsed;

        let mut step = None;
        if state.status == GameStatus::InGame && state.snake.is_due(state.clock) {
            step = Some(self.advance(state));
            state.snake.last_move_time = Some(state.clock);
        }

        state.camera.auto_rotate(
            state.snake.head(),
            state.grid_size,
            self.config.overview_spin_step,
        );

        if state.status == GameStatus::InGame && state.snake.is_crashed {
            self.set_status(state, GameStatus::Fail);
        }

        if state.status == GameStatus::InGame && state.apples.is_empty() {
            self.set_status(state, GameStatus::Win);
        }

        TickResult {
            step,
            previous_status,
            status: state.status,
        }
    }

    /// Move the snake one cell, eat and collide
    pub fn advance(&self, state: &mut GameState) -> StepInfo {
        let tail = state.snake.move_forward(state.grid_size);
        let ate_apple = self.check_for_apple(state, tail);
        let crashed = self.check_crash(state);
        StepInfo { ate_apple, crashed }
    }

    fn check_for_apple(&self, state: &mut GameState, tail: GridPosition) -> bool {
        let head = state.snake.head();
        if !state.apples.remove(&head) {
            return false;
        }

        state.snake.grow(tail);
        state.snake.speed_up(self.config.speedup_per_apple);

        debug!(
            length = state.snake.len(),
            apples_left = state.apples.len(),
            move_period_ms = state.snake.move_period.as_secs_f64() * 1000.0,
            "apple eaten"
        );
        true
    }

    fn check_crash(&self, state: &mut GameState) -> bool {
        let head = state.snake.head();

        if state.stones.contains(&head) || state.snake.collides_with_body(head) {
            if !state.snake.is_crashed {
                warn!(?head, length = state.snake.len(), "snake crashed");
            }
            state.snake.is_crashed = true;
        }

        state.snake.is_crashed
    }

    fn set_status(&self, state: &mut GameState, status: GameStatus) {
        if state.status != status {
            info!(from = ?state.status, to = ?status, "game status changed");
        }
        state.status = status;

        state.camera.mode = if status == GameStatus::InGame {
            CameraMode::FollowSnake
        } else {
            CameraMode::Overview
        };
    }
}
