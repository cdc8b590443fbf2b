use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::action::Direction;
use super::state::{Face, GridPosition};

/// Errors raised while loading or validating a [`GameConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Configuration for the game
///
/// Every field has a default, so a config file only needs to name the values
/// it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Rows (and columns) of every cube face
    pub grid_size: usize,
    /// Apples planted per round; eating all of them wins
    pub apples_count: usize,
    /// Stones planted per round
    pub stones_count: usize,
    /// Time between two snake moves at the start of a round
    pub initial_move_period_ms: u64,
    /// Fraction by which the move period shrinks per apple
    pub speedup_per_apple: f64,
    /// Degrees the overview camera spins per tick
    pub overview_spin_step: f64,
    /// Degrees of rotation per pixel of drag
    pub drag_velocity: f64,
    /// Cell the snake starts from
    pub start: GridPosition,
    /// Initial heading of the snake
    pub start_direction: Direction,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 16,
            apples_count: 10,
            stones_count: 10,
            initial_move_period_ms: 150,
            speedup_per_apple: 0.05,
            overview_spin_step: 0.3,
            drag_velocity: 0.25,
            start: GridPosition::new(Face::Front, 0, 0),
            start_direction: Direction::Right,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small cube for testing
    pub fn small() -> Self {
        Self::new(4)
    }

    pub fn initial_move_period(&self) -> Duration {
        Duration::from_millis(self.initial_move_period_ms)
    }

    /// Number of cells on the whole cube surface
    pub fn cell_count(&self) -> usize {
        6 * self.grid_size * self.grid_size
    }

    /// Parse a TOML document and validate the result
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML config file from disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Check that the values describe a playable round
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 2 {
            return Err(ConfigError::Invalid(format!(
                "grid_size must be at least 2, got {}",
                self.grid_size
            )));
        }

        if self.grid_size > i32::MAX as usize / 2 {
            return Err(ConfigError::Invalid(format!(
                "grid_size {} is too large",
                self.grid_size
            )));
        }

        if self.apples_count == 0 {
            return Err(ConfigError::Invalid(
                "apples_count must be at least 1".to_string(),
            ));
        }

        // the snake's starting cell takes one slot
        let objects = self.apples_count + self.stones_count + 1;
        if objects > self.cell_count() {
            return Err(ConfigError::Invalid(format!(
                "{} apples and {} stones do not fit on a cube with {} cells",
                self.apples_count,
                self.stones_count,
                self.cell_count()
            )));
        }

        if self.initial_move_period_ms == 0 {
            return Err(ConfigError::Invalid(
                "initial_move_period_ms must be positive".to_string(),
            ));
        }

        if !(0.0..1.0).contains(&self.speedup_per_apple) {
            return Err(ConfigError::Invalid(format!(
                "speedup_per_apple must be in [0, 1), got {}",
                self.speedup_per_apple
            )));
        }

        if !self.start.is_within(self.grid_size) {
            return Err(ConfigError::Invalid(format!(
                "start cell {:?} is outside a {}x{} grid",
                self.start, self.grid_size, self.grid_size
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.grid_size, 16);
        assert_eq!(config.apples_count, 10);
        assert_eq!(config.stones_count, 10);
        assert_eq!(config.initial_move_period(), Duration::from_millis(150));
        assert_eq!(config.start, GridPosition::new(Face::Front, 0, 0));
        assert_eq!(config.start_direction, Direction::Right);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(8);
        assert_eq!(config.grid_size, 8);
        assert_eq!(config.cell_count(), 384);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_tiny_grid() {
        let config = GameConfig::new(1);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_rejects_overcrowded_cube() {
        // 2x2 faces hold 24 cells, one of them taken by the snake
        let config = GameConfig {
            apples_count: 12,
            stones_count: 12,
            ..GameConfig::new(2)
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = GameConfig {
            apples_count: 12,
            stones_count: 11,
            ..GameConfig::new(2)
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_speedup_and_start() {
        let config = GameConfig {
            speedup_per_apple: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            start: GridPosition::new(Face::Up, 16, 0),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            apples_count: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml() {
        let config = GameConfig::from_toml_str(
            r#"
            grid_size = 8
            stones_count = 3
            start_direction = "Up"

            [start]
            face = "Left"
            row = 2
            col = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.grid_size, 8);
        assert_eq!(config.stones_count, 3);
        assert_eq!(config.apples_count, 10);
        assert_eq!(config.start_direction, Direction::Up);
        assert_eq!(config.start, GridPosition::new(Face::Left, 2, 5));
    }

    #[test]
    fn test_invalid_toml_values() {
        let err = GameConfig::from_toml_str("grid_size = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = GameConfig::from_toml_str("grid_size = \"big\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "grid_size = 12\napples_count = 4").unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.grid_size, 12);
        assert_eq!(config.apples_count, 4);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = GameConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
