//! Button-grid rendering for chat presentation layers.
//!
//! Each board cell becomes a button: a glyph to show and the callback
//! payload (`"row,col"`) the transport sends back when it is tapped.
//! `CellTapped::from_callback` parses that payload.

use serde::Serialize;

use crate::core::board::{Board, Cell};
use crate::core::coord::Coord;

/// One rendered button.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RenderedCell {
    pub glyph: &'static str,
    pub callback: String,
}

/// Glyph for a cell. Empty squares follow the checkerboard pattern.
#[must_use]
pub fn glyph(at: Coord, cell: Cell) -> &'static str {
    match cell {
        Cell::DarkPiece => "⚫",
        Cell::LightPiece => "⚪",
        Cell::Empty if at.is_dark_square() => "⬛",
        Cell::Empty => "⬜",
    }
}

/// Eight rows of eight buttons, row 0 first.
#[must_use]
pub fn render_grid(board: &Board) -> Vec<Vec<RenderedCell>> {
    board
        .rows()
        .iter()
        .enumerate()
        .map(|(r, row)| {
            row.iter()
                .enumerate()
                .map(|(c, &cell)| {
                    let at = Coord::new(r as i32, c as i32);
                    RenderedCell {
                        glyph: glyph(at, cell),
                        callback: format!("{},{}", at.row, at.col),
                    }
                })
                .collect()
        })
        .collect()
}

/// The grid as plain text, one line per row.
#[must_use]
pub fn render_text(board: &Board) -> String {
    render_grid(board)
        .iter()
        .map(|row| row.iter().map(|cell| cell.glyph).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::CellTapped;

    #[test]
    fn test_grid_shape_and_glyphs() {
        let grid = render_grid(&Board::new());

        assert_eq!(grid.len(), 8);
        assert!(grid.iter().all(|row| row.len() == 8));
        assert_eq!(grid[0][0].glyph, "⬜");
        assert_eq!(grid[0][1].glyph, "⚫");
        assert_eq!(grid[3][0].glyph, "⬛");
        assert_eq!(grid[7][0].glyph, "⚪");
    }

    #[test]
    fn test_callbacks_parse_back() {
        let grid = render_grid(&Board::new());

        for (r, row) in grid.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let tap = CellTapped::from_callback("room", &cell.callback).unwrap();
                assert_eq!(tap.coord(), Coord::new(r as i32, c as i32));
            }
        }
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&Board::new());
        assert_eq!(text.lines().count(), 8);
        assert_eq!(text.lines().next(), Some("⬜⚫⬜⚫⬜⚫⬜⚫"));
    }
}
