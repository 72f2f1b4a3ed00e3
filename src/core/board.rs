//! The 8x8 checkers board.
//!
//! `Board` is plain data: it knows the starting layout and how to read and
//! write cells, but enforces no game rules. Legality lives in
//! `rules::engine`.
//!
//! ## Layout
//!
//! Row 0 is Dark's back rank, row 7 is Light's. At the start, every dark
//! square (`(row + col)` odd) in rows 0-2 holds a Dark piece and every dark
//! square in rows 5-7 holds a Light piece.

use serde::{Deserialize, Serialize};

use super::color::Color;
use super::coord::Coord;
use super::error::EngineError;

/// Board side length.
pub const BOARD_SIZE: i32 = 8;

/// Contents of a single square.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    DarkPiece,
    LightPiece,
}

impl Cell {
    /// The piece cell for a color.
    #[must_use]
    pub const fn piece(color: Color) -> Self {
        match color {
            Color::Dark => Cell::DarkPiece,
            Color::Light => Cell::LightPiece,
        }
    }

    /// Owner of the piece on this cell, if any.
    #[must_use]
    pub const fn color(self) -> Option<Color> {
        match self {
            Cell::Empty => None,
            Cell::DarkPiece => Some(Color::Dark),
            Cell::LightPiece => Some(Color::Light),
        }
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// An 8x8 grid of cells indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; 8]; 8],
}

impl Board {
    /// Board in the standard starting position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        for (row, cells) in board.cells.iter_mut().enumerate() {
            let fill = match row {
                0..=2 => Cell::DarkPiece,
                5..=7 => Cell::LightPiece,
                _ => continue,
            };
            for (col, cell) in cells.iter_mut().enumerate() {
                if (row + col) % 2 == 1 {
                    *cell = fill;
                }
            }
        }
        board
    }

    /// Board with no pieces. Useful for building test positions.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            cells: [[Cell::Empty; 8]; 8],
        }
    }

    /// Whether both coordinates lie in `[0, 8)`.
    #[must_use]
    pub const fn is_inside(row: i32, col: i32) -> bool {
        0 <= row && row < BOARD_SIZE && 0 <= col && col < BOARD_SIZE
    }

    /// Read a cell.
    pub fn get(&self, row: i32, col: i32) -> Result<Cell, EngineError> {
        let (r, c) = Self::index(row, col)?;
        Ok(self.cells[r][c])
    }

    /// Write a cell. No rule validation happens here.
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> Result<(), EngineError> {
        let (r, c) = Self::index(row, col)?;
        self.cells[r][c] = cell;
        Ok(())
    }

    /// `get` by coordinate.
    pub fn cell_at(&self, at: Coord) -> Result<Cell, EngineError> {
        self.get(at.row, at.col)
    }

    /// `set` by coordinate.
    pub fn set_at(&mut self, at: Coord, cell: Cell) -> Result<(), EngineError> {
        self.set(at.row, at.col, cell)
    }

    /// Number of pieces a color has on the board.
    #[must_use]
    pub fn count(&self, color: Color) -> usize {
        self.pieces(color).count()
    }

    /// Coordinates of every piece of a color, row-major.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = Coord> + '_ {
        let wanted = Cell::piece(color);
        self.squares().filter(move |&(_, cell)| cell == wanted).map(|(at, _)| at)
    }

    /// Every square with its contents, row-major.
    pub fn squares(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(move |(c, &cell)| (Coord::new(r as i32, c as i32), cell))
        })
    }

    /// Rows of cells, top (row 0) first.
    #[must_use]
    pub fn rows(&self) -> &[[Cell; 8]; 8] {
        &self.cells
    }

    fn index(row: i32, col: i32) -> Result<(usize, usize), EngineError> {
        if Self::is_inside(row, col) {
            Ok((row as usize, col as usize))
        } else {
            Err(EngineError::OutOfRange { row, col })
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            let line: String = row
                .iter()
                .map(|cell| match cell {
                    Cell::Empty => '.',
                    Cell::DarkPiece => 'x',
                    Cell::LightPiece => 'o',
                })
                .collect();
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}
