//! Move legality and execution.
//!
//! The rule engine is stateless: it looks at a board, a proposed move and
//! the side to move, and either classifies the move or applies it.
//!
//! The policy is deliberately narrow:
//! - Simple moves go one square diagonally forward
//! - Captures jump two squares diagonally over an opposing piece, in any direction
//! - No forced capture, no multi-jump, no promotion

pub mod engine;

pub use engine::{evaluate_move, execute_move, legal_destinations, try_move, MoveOutcome};
