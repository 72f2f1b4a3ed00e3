//! A single game: board, side to move, pending selection.
//!
//! ## State machine
//!
//! A session is either awaiting a selection or holding a selected piece.
//! Each tap drives one transition:
//!
//! - Awaiting + own piece tapped: the piece becomes selected
//! - Awaiting + anything else: rejected, nothing changes
//! - Selected + legal target: move executes, turn passes, selection clears
//! - Selected + illegal target: selection is dropped, turn stays
//!
//! There is no terminal state. Play continues until the host discards
//! the session.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::board::Board;
use crate::core::color::{Color, ColorMap};
use crate::core::coord::Coord;
use crate::core::error::EngineError;
use crate::rules::{evaluate_move, execute_move, MoveOutcome};

/// Where a session is in its select-then-move cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionState {
    AwaitingSelection,
    PieceSelected(Coord),
}

/// A move that was executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    /// Side that moved.
    pub mover: Color,
    pub from: Coord,
    pub to: Coord,
    /// `SimpleMove` or `CaptureMove`; never `Illegal`.
    pub outcome: MoveOutcome,
    /// 1-based index of this move within the game.
    pub ply: u32,
}

/// Result of feeding one tap into a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TapOutcome {
    /// A piece was picked up.
    Selected(Coord),
    /// The selected piece moved and the turn passed.
    Moved(MoveRecord),
    /// The tap was refused. Any selection has been cleared.
    Rejected(EngineError),
}

/// One game of checkers.
///
/// Created in the starting position with Dark to move. Only `select` and
/// `attempt_move` (both reached through `tap`) mutate it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSession {
    board: Board,
    to_move: Color,
    selection: Option<Coord>,
    move_counts: ColorMap<u32>,
    history: Vector<MoveRecord>,
}

impl GameSession {
    /// New game in the standard starting position.
    #[must_use]
    pub fn new() -> Self {
        Self::from_position(Board::new(), Color::Dark)
    }

    /// Session starting from an arbitrary position.
    #[must_use]
    pub fn from_position(board: Board, to_move: Color) -> Self {
        Self {
            board,
            to_move,
            selection: None,
            move_counts: ColorMap::default(),
            history: Vector::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Side whose turn it is.
    #[must_use]
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    #[must_use]
    pub fn selection(&self) -> Option<Coord> {
        self.selection
    }

    #[must_use]
    pub fn state(&self) -> SelectionState {
        match self.selection {
            None => SelectionState::AwaitingSelection,
            Some(at) => SelectionState::PieceSelected(at),
        }
    }

    /// Moves made so far by a side.
    #[must_use]
    pub fn move_count(&self, color: Color) -> u32 {
        self.move_counts[color]
    }

    /// Pieces a side still has.
    #[must_use]
    pub fn piece_count(&self, color: Color) -> usize {
        self.board.count(color)
    }

    /// Executed moves, oldest first. Cloning is O(1).
    #[must_use]
    pub fn history(&self) -> &Vector<MoveRecord> {
        &self.history
    }

    /// Pick up the piece at `at`.
    ///
    /// Fails with `OutOfRange` or `NotYourPiece` and leaves the session
    /// unchanged.
    pub fn select(&mut self, at: Coord) -> Result<(), EngineError> {
        let cell = self.board.cell_at(at)?;
        if cell.color() != Some(self.to_move) {
            return Err(EngineError::NotYourPiece {
                at,
                mover: self.to_move,
            });
        }

        tracing::debug!(%at, mover = %self.to_move, "piece selected");
        self.selection = Some(at);
        Ok(())
    }

    /// Move the selected piece to `to`.
    ///
    /// The selection is consumed whether or not the move is legal. On
    /// success the turn passes to the other side.
    pub fn attempt_move(&mut self, to: Coord) -> Result<MoveRecord, EngineError> {
        let from = self.selection.take().ok_or(EngineError::NothingSelected)?;
        let mover = self.to_move;

        let outcome = evaluate_move(&self.board, from, to, mover);
        if let Err(err) = execute_move(&mut self.board, from, to, outcome) {
            tracing::debug!(%from, %to, %mover, "move rejected");
            return Err(err);
        }

        self.move_counts[mover] += 1;
        self.to_move = mover.opponent();

        let record = MoveRecord {
            mover,
            from,
            to,
            outcome,
            ply: self.history.len() as u32 + 1,
        };
        self.history.push_back(record);

        tracing::info!(%from, %to, %mover, ?outcome, "move executed");
        Ok(record)
    }

    /// Feed a tapped cell into the state machine.
    pub fn tap(&mut self, at: Coord) -> TapOutcome {
        let result = match self.selection {
            None => self.select(at).map(|()| TapOutcome::Selected(at)),
            Some(_) => self.attempt_move(at).map(TapOutcome::Moved),
        };
        result.unwrap_or_else(TapOutcome::Rejected)
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}
