//! # rust-checkers
//!
//! A checkers game-session engine for chat-driven play.
//!
//! Players tap cells on a rendered board: one tap picks up a piece, the
//! next tap moves it. The engine keeps one game per channel and answers
//! each tap with either a status notification or a fresh board.
//!
//! ## Rules
//!
//! Deliberately narrow English-style checkers:
//! - Dark moves first, then strict alternation
//! - Simple moves: one square diagonally forward
//! - Captures: jump an adjacent opposing piece, any diagonal direction
//! - No forced capture, no multi-jump, no kings, no end-of-game detection
//!
//! ## Modules
//!
//! - `core`: Coordinates, colors, board, errors, configuration
//! - `rules`: Stateless move legality and execution
//! - `session`: Per-game state machine and per-channel registries
//! - `protocol`: Typed inbound/outbound boundary, button-grid rendering
//! - `handler`: Event handling over a session store

pub mod core;
pub mod rules;
pub mod session;
pub mod protocol;
pub mod handler;

// Re-export commonly used types
pub use crate::core::{
    Board, Cell, Color, ColorMap, Coord,
    EngineError, EngineConfig, OnboardingConfig, RegistryConfig,
};

pub use crate::rules::{evaluate_move, execute_move, try_move, MoveOutcome};

pub use crate::session::{
    ChannelId, GameSession, MoveRecord, SelectionState, TapOutcome,
    SessionRegistry, SharedRegistry,
};

pub use crate::protocol::{CellTapped, InboundEvent, Notification, Outbound, RenderBoard};

pub use crate::handler::{EventHandler, SessionStore};
