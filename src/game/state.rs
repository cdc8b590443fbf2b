use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};
use std::time::Duration;

use super::action::Direction;
use super::camera::Camera;
use super::topology;

/// Segments next to the head that are never checked for self-collision
///
/// Head plus its two followers cannot legitimately overlap on a tight turn.
pub const SELF_COLLISION_GRACE: usize = 3;

/// One of the six faces of the cube
///
/// The declaration order only fixes the ordering of [`GridPosition`] in sets.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Face {
    Front,
    Back,
    Up,
    Down,
    Left,
    Right,
}

impl Face {
    /// All six faces in declaration order.
    pub const ALL: [Face; 6] = [
        Face::Front,
        Face::Back,
        Face::Up,
        Face::Down,
        Face::Left,
        Face::Right,
    ];

    pub fn index(self) -> usize {
        self as usize
    }
}

/// A cell on the cube surface
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct GridPosition {
    pub face: Face,
    pub row: i32,
    pub col: i32,
}

impl GridPosition {
    pub fn new(face: Face, row: i32, col: i32) -> Self {
        Self { face, row, col }
    }

    /// Check if row and col address a cell of an `grid_size` square face
    pub fn is_within(&self, grid_size: usize) -> bool {
        let n = grid_size as i32;
        (0..n).contains(&self.row) && (0..n).contains(&self.col)
    }

    /// Move one cell, crossing onto a neighbouring face when needed
    pub fn moved_in_direction(
        &self,
        direction: Direction,
        grid_size: usize,
    ) -> (GridPosition, Direction) {
        topology::next_position(*self, direction, grid_size)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    pub body: VecDeque<GridPosition>,
    /// Direction used by the next move
    pub direction: Direction,
    /// Time between two automatic moves
    pub move_period: Duration,
    /// Set on collision, cleared only by replanting
    pub is_crashed: bool,
    /// Game clock reading of the last move, `None` before the first one
    pub last_move_time: Option<Duration>,
}

impl Snake {
    /// Create a single-segment snake
    pub fn new(head: GridPosition, direction: Direction, move_period: Duration) -> Self {
        Self {
            body: VecDeque::from([head]),
            direction,
            move_period,
            is_crashed: false,
            last_move_time: None,
        }
    }

    /// Get the head position
    pub fn head(&self) -> GridPosition {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> GridPosition {
        self.body[self.body.len() - 1]
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Change heading unless it would reverse the snake onto itself
    ///
    /// Returns whether the new direction was accepted.
    pub fn set_direction(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Whether enough game time has passed since the last move
    pub fn is_due(&self, now: Duration) -> bool {
        match self.last_move_time {
            None => true,
            Some(last) => now.saturating_sub(last) >= self.move_period,
        }
    }

    /// Move the tail cell in front of the head and return the cell it left
    ///
    /// The heading is updated as well, since crossing some cube edges
    /// rotates the local frame.
    pub fn move_forward(&mut self, grid_size: usize) -> GridPosition {
        let head = self.head();
        let tail = self.body.pop_back().unwrap_or(head);

        let (new_head, new_direction) = head.moved_in_direction(self.direction, grid_size);
        self.body.push_front(new_head);
        self.direction = new_direction;

        tail
    }

    /// Re-append a cell at the tail end
    pub fn grow(&mut self, tail: GridPosition) {
        self.body.push_back(tail);
    }

    /// Shorten the move period by `fraction` of its current value
    pub fn speed_up(&mut self, fraction: f64) {
        self.move_period = self.move_period.mul_f64(1.0 - fraction);
    }

    /// Check if position hits the body outside the grace window behind the head
    pub fn collides_with_body(&self, pos: GridPosition) -> bool {
        self.body
            .iter()
            .skip(SELF_COLLISION_GRACE)
            .any(|segment| *segment == pos)
    }

    /// Check if position is occupied by any segment
    pub fn occupies(&self, pos: GridPosition) -> bool {
        self.body.contains(&pos)
    }
}

/// Lifecycle of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    Welcome,
    InGame,
    Paused,
    Win,
    Fail,
}

impl GameStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameStatus::Win | GameStatus::Fail)
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub grid_size: usize,
    pub snake: Snake,
    pub apples: BTreeSet<GridPosition>,
    pub stones: BTreeSet<GridPosition>,
    pub status: GameStatus,
    pub camera: Camera,
    /// Game time accumulated from tick durations
    pub clock: Duration,
}

impl GameState {
    /// Create a new game state in the welcome screen
    pub fn new(
        snake: Snake,
        apples: BTreeSet<GridPosition>,
        stones: BTreeSet<GridPosition>,
        grid_size: usize,
    ) -> Self {
        Self {
            grid_size,
            snake,
            apples,
            stones,
            status: GameStatus::Welcome,
            camera: Camera::default(),
            clock: Duration::ZERO,
        }
    }

    /// Check if a position lies on the cube
    pub fn is_in_bounds(&self, pos: GridPosition) -> bool {
        pos.is_within(self.grid_size)
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: GridPosition) -> bool {
        self.snake.occupies(pos)
    }
}
