//! Core types: coordinates, colors, the board, errors, configuration.
//!
//! These are pure data. Game rules live in `rules`, turn and selection
//! state in `session`.

pub mod coord;
pub mod color;
pub mod board;
pub mod error;
pub mod config;

pub use coord::Coord;
pub use color::{Color, ColorMap};
pub use board::{Board, Cell, BOARD_SIZE};
pub use error::EngineError;
pub use config::{ConfigError, EngineConfig, LoggingConfig, OnboardingConfig, RegistryConfig};
