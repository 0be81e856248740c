//! Core game logic module for Snake
//!
//! This module contains the simulation with no I/O or rendering dependencies:
//! the board state, the per-tick update and the turn rules.

pub mod config;
pub mod direction;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig, NECK_LENGTH, TICK_INTERVAL};
pub use direction::Direction;
pub use engine::{GameEngine, TickOutcome};
pub use state::{CollisionType, GameState, Position, RenderState, Snake};
