use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Fixed simulation period. Difficulty is not configurable.
pub const TICK_INTERVAL: Duration = Duration::from_millis(140);

/// Segments at or below this index never count for self-collision,
/// otherwise every turn would hit the neck.
pub const NECK_LENGTH: usize = 4;

/// Problems with a [`GameConfig`] that make a game impossible to start
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("cell size must be greater than zero")]
    ZeroCellSize,

    #[error("board {width}x{height} is not a multiple of cell size {cell_size}")]
    NotCellAligned {
        width: u32,
        height: u32,
        cell_size: u32,
    },

    #[error("board must be at least 2x2 cells, got {columns}x{rows}")]
    BoardTooSmall { columns: u32, rows: u32 },

    #[error("initial snake length must be at least 1")]
    EmptySnake,

    #[error("starting snake at ({x}, {y}) with length {length} does not fit on the board")]
    StartOffBoard { x: i32, y: i32, length: usize },
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board width in units
    pub board_width: u32,
    /// Board height in units
    pub board_height: u32,
    /// Edge length of one grid cell, also the distance moved per tick
    pub cell_size: u32,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Head position at session start, in units
    pub start_x: i32,
    pub start_y: i32,
    /// Only place apples on cells the snake does not cover
    pub apple_avoids_snake: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: 600,
            board_height: 600,
            cell_size: 10,
            initial_snake_length: 3,
            start_x: 50,
            start_y: 50,
            apple_avoids_snake: false,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom board size
    pub fn new(board_width: u32, board_height: u32) -> Self {
        Self {
            board_width,
            board_height,
            ..Default::default()
        }
    }

    /// A 20x20 cell board
    pub fn small() -> Self {
        Self::new(200, 200)
    }

    /// Change the cell size and snap the start position onto the new grid,
    /// keeping the whole starting snake on the board.
    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size;
        if cell_size == 0 {
            return self;
        }

        let cell = cell_size as i32;
        let tail_room = (self.initial_snake_length.max(1) as i32 - 1) * cell;
        self.start_x = (self.start_x / cell * cell).max(tail_room);
        self.start_y = (self.start_y / cell * cell).max(0);
        self
    }

    /// Read a JSON config; missing fields fall back to defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: GameConfig =
            serde_json::from_str(&json).context("Failed to parse game config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn columns(&self) -> u32 {
        self.board_width / self.cell_size.max(1)
    }

    pub fn rows(&self) -> u32 {
        self.board_height / self.cell_size.max(1)
    }

    /// Exclusive upper bound of the random cell index along x.
    /// The last column is never drawn.
    pub fn random_column_bound(&self) -> u32 {
        self.columns().saturating_sub(1)
    }

    /// Exclusive upper bound of the random cell index along y
    pub fn random_row_bound(&self) -> u32 {
        self.rows().saturating_sub(1)
    }

    /// Largest length the snake could ever reach
    pub fn max_segments(&self) -> usize {
        (self.columns() * self.rows()) as usize
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cell_size == 0 {
            return Err(ConfigError::ZeroCellSize);
        }

        if self.board_width % self.cell_size != 0 || self.board_height % self.cell_size != 0 {
            return Err(ConfigError::NotCellAligned {
                width: self.board_width,
                height: self.board_height,
                cell_size: self.cell_size,
            });
        }

        if self.columns() < 2 || self.rows() < 2 {
            return Err(ConfigError::BoardTooSmall {
                columns: self.columns(),
                rows: self.rows(),
            });
        }

        if self.initial_snake_length == 0 {
            return Err(ConfigError::EmptySnake);
        }

        let cell = self.cell_size as i32;
        let tail_x = self.start_x - (self.initial_snake_length as i32 - 1) * cell;
        let aligned = self.start_x % cell == 0 && self.start_y % cell == 0;
        let fits = tail_x >= 0
            && self.start_x < self.board_width as i32
            && self.start_y >= 0
            && self.start_y < self.board_height as i32;

        if !aligned || !fits {
            return Err(ConfigError::StartOffBoard {
                x: self.start_x,
                y: self.start_y,
                length: self.initial_snake_length,
            });
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
        assert_eq!(config.board_width, 600);
        assert_eq!(config.board_height, 600);
        assert_eq!(config.cell_size, 10);
        assert_eq!(config.initial_snake_length, 3);
        assert_eq!(config.columns(), 60);
        assert_eq!(config.random_column_bound(), 59);
        assert_eq!(config.max_segments(), 3600);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_custom_config() {
        let config = GameConfig::new(300, 200);
        assert_eq!(config.columns(), 30);
        assert_eq!(config.rows(), 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_small_config() {
        let config = GameConfig::small();
        assert_eq!(config.columns(), 20);
        assert_eq!(config.random_row_bound(), 19);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cell_size_change_snaps_start_to_grid() {
        let config = GameConfig::default().with_cell_size(20);
        assert_eq!((config.start_x, config.start_y), (40, 40));
        assert!(config.validate().is_ok());

        let config = GameConfig::default().with_cell_size(30);
        assert_eq!((config.start_x, config.start_y), (60, 30));
        assert!(config.validate().is_ok());

        let config = GameConfig::default().with_cell_size(5);
        assert_eq!((config.start_x, config.start_y), (50, 50));
    }

    #[test]
    fn test_rejects_zero_cell_size() {
        let config = GameConfig {
            cell_size: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroCellSize));
    }

    #[test]
    fn test_rejects_unaligned_board() {
        let config = GameConfig::new(605, 600);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotCellAligned { width: 605, .. })
        ));
    }

    #[test]
    fn test_rejects_tiny_board() {
        let config = GameConfig {
            board_width: 10,
            start_x: 0,
            initial_snake_length: 1,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::BoardTooSmall { columns: 1, .. })
        ));
    }

    #[test]
    fn test_rejects_snake_hanging_off_left_edge() {
        let config = GameConfig {
            start_x: 10,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::StartOffBoard { x: 10, .. })
        ));
    }

    #[test]
    fn test_rejects_empty_snake() {
        let config = GameConfig {
            initial_snake_length: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::EmptySnake));
    }

    #[test]
    fn test_load_partial_json() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "board_width": 300, "apple_avoids_snake": true }}"#).unwrap();

        let config = GameConfig::load(file.path()).unwrap();
        assert_eq!(config.board_width, 300);
        assert_eq!(config.board_height, 600);
        assert!(config.apple_avoids_snake);
    }

    #[test]
    fn test_load_rejects_invalid_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "cell_size": 7 }}"#).unwrap();

        let err = GameConfig::load(file.path()).unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(GameConfig::load(&dir.path().join("missing.json")).is_err());
    }
}
