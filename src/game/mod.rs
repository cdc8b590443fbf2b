//! Core game logic module for cube snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end in [`crate::modes`] is one consumer; tests drive it directly.

pub mod action;
pub mod camera;
pub mod config;
pub mod engine;
pub mod placement;
pub mod state;
pub mod topology;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use camera::{Camera, CameraMode, CameraRotation};
pub use config::{ConfigError, GameConfig};
pub use engine::{GameEngine, StepInfo, TickResult};
pub use state::{Face, GameState, GameStatus, GridPosition, Snake};
pub use topology::{next_position, position_to_point3d, rotation_for_position};
