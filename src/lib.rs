//! Cube Snake - Snake played on the six faces of a cube
//!
//! This library provides:
//! - Core game logic: cube topology, snake movement, round status and camera (game module)
//! - TUI rendering of the unfolded cube (render module)
//! - Keyboard and mouse mapping (input module)
//! - Session statistics (metrics module)
//! - The interactive terminal session (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
