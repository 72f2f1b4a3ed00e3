//! Legality check and move execution.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::board::{Board, Cell};
use crate::core::color::Color;
use crate::core::coord::Coord;
use crate::core::error::EngineError;

/// Classification of a proposed move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveOutcome {
    /// One-square diagonal advance.
    SimpleMove,
    /// Two-square diagonal jump removing the piece at `captured`.
    CaptureMove { captured: Coord },
    /// Not allowed.
    Illegal,
}

impl MoveOutcome {
    #[must_use]
    pub const fn is_legal(self) -> bool {
        !matches!(self, MoveOutcome::Illegal)
    }

    /// Square emptied by a capture, if any.
    #[must_use]
    pub const fn captured(self) -> Option<Coord> {
        match self {
            MoveOutcome::CaptureMove { captured } => Some(captured),
            _ => None,
        }
    }
}

/// Decide whether `mover` may move the piece at `from` to `to`.
///
/// Does not look at what stands on `from`; the session only lets a player
/// select their own pieces.
///
/// ```
/// use rust_checkers::core::{Board, Color, Coord};
/// use rust_checkers::rules::{evaluate_move, MoveOutcome};
///
/// let board = Board::new();
///
/// // Dark advances toward higher rows
/// assert_eq!(
///     evaluate_move(&board, Coord::new(2, 1), Coord::new(3, 2), Color::Dark),
///     MoveOutcome::SimpleMove,
/// );
/// // but not backward
/// assert_eq!(
///     evaluate_move(&board, Coord::new(2, 1), Coord::new(1, 0), Color::Dark),
///     MoveOutcome::Illegal,
/// );
/// ```
#[must_use]
pub fn evaluate_move(board: &Board, from: Coord, to: Coord, mover: Color) -> MoveOutcome {
    if !Board::is_inside(from.row, from.col) {
        return MoveOutcome::Illegal;
    }

    // Also rejects out-of-range destinations
    match board.cell_at(to) {
        Ok(Cell::Empty) => {}
        _ => return MoveOutcome::Illegal,
    }

    let (d_row, d_col) = to.delta_from(from);

    match (d_row.abs(), d_col.abs()) {
        (1, 1) if d_row == mover.forward() => MoveOutcome::SimpleMove,
        (2, 2) => {
            let captured = from.midpoint(to);
            match board.cell_at(captured).map(Cell::color) {
                Ok(Some(owner)) if owner != mover => MoveOutcome::CaptureMove { captured },
                _ => MoveOutcome::Illegal,
            }
        }
        _ => MoveOutcome::Illegal,
    }
}

/// Apply a move already classified by `evaluate_move`.
///
/// The piece on `from` lands on `to`, `from` is emptied, and for a capture
/// the jumped square is emptied too. An `Illegal` outcome is refused with
/// the board untouched.
pub fn execute_move(
    board: &mut Board,
    from: Coord,
    to: Coord,
    outcome: MoveOutcome,
) -> Result<(), EngineError> {
    if outcome == MoveOutcome::Illegal {
        return Err(EngineError::Illegal { from, to });
    }

    let piece = board.cell_at(from)?;
    // Validate every square before touching any of them
    board.cell_at(to)?;
    if let Some(captured) = outcome.captured() {
        board.cell_at(captured)?;
    }

    board.set_at(to, piece)?;
    board.set_at(from, Cell::Empty)?;
    if let Some(captured) = outcome.captured() {
        board.set_at(captured, Cell::Empty)?;
    }
    Ok(())
}

/// Evaluate and, if legal, execute a move.
pub fn try_move(
    board: &mut Board,
    from: Coord,
    to: Coord,
    mover: Color,
) -> Result<MoveOutcome, EngineError> {
    let outcome = evaluate_move(board, from, to, mover);
    execute_move(board, from, to, outcome)?;
    Ok(outcome)
}

/// Every legal target for the piece at `from`, with its classification.
///
/// At most four simple-move and four capture candidates exist, so the
/// result never spills to the heap.
#[must_use]
pub fn legal_destinations(
    board: &Board,
    from: Coord,
    mover: Color,
) -> SmallVec<[(Coord, MoveOutcome); 8]> {
    const STEPS: [(i32, i32); 8] = [
        (1, 1),
        (1, -1),
        (-1, 1),
        (-1, -1),
        (2, 2),
        (2, -2),
        (-2, 2),
        (-2, -2),
    ];

    // Off-board origins have no moves, and offsetting them could overflow
    if !Board::is_inside(from.row, from.col) {
        return SmallVec::new();
    }

    STEPS
        .iter()
        .map(|&(d_row, d_col)| from.offset(d_row, d_col))
        .filter_map(|to| {
            let outcome = evaluate_move(board, from, to, mover);
            outcome.is_legal().then_some((to, outcome))
        })
        .collect()
}
