//! Classic Snake - a fixed-tick Snake game played in the terminal
//!
//! This library provides:
//! - Core game logic: board state, the per-tick update and turn rules (game module)
//! - Keyboard mapping (input module)
//! - TUI rendering (render module)
//! - Session timing and score (metrics module)
//! - The interactive play loop (modes module)

pub mod game;
pub mod input;
pub mod metrics;
pub mod modes;
pub mod render;
