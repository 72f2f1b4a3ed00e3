//! Engine error taxonomy.
//!
//! Every variant is recoverable: the engine refuses the operation and
//! leaves state untouched (or, for an illegal move, drops the pending
//! selection). Nothing here is fatal to the process.

use super::color::Color;
use super::coord::Coord;

/// Errors raised by the board, rule engine and game session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// Coordinate outside the 8x8 board.
    #[error("coordinate ({row}, {col}) is outside the board")]
    OutOfRange { row: i32, col: i32 },

    /// In-range move that the rules do not allow.
    #[error("illegal move from {from} to {to}")]
    Illegal { from: Coord, to: Coord },

    /// Selection of a cell that does not hold the mover's piece.
    #[error("{at} does not hold a {mover} piece")]
    NotYourPiece { at: Coord, mover: Color },

    /// A move was attempted with no piece selected.
    #[error("no piece is selected")]
    NothingSelected,
}

impl EngineError {
    /// Out-of-range error for a coordinate.
    #[must_use]
    pub const fn out_of_range(at: Coord) -> Self {
        Self::OutOfRange {
            row: at.row,
            col: at.col,
        }
    }
}
