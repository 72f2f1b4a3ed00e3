//! Board coordinates.
//!
//! A `Coord` is a `(row, col)` pair. Rows count from Dark's back rank
//! (row 0) to Light's back rank (row 7).
//!
//! Components are signed: taps arriving from a transport are not trusted
//! to be in range, and a negative index must be rejected rather than
//! wrapped. Use `Board::is_inside` to check a coordinate.
//!
//! ```
//! use rust_checkers::core::Coord;
//!
//! let from = Coord::new(2, 1);
//! let to = Coord::new(4, 3);
//!
//! assert_eq!(to.delta_from(from), (2, 2));
//! assert_eq!(from.midpoint(to), Coord::new(3, 2));
//! ```

use serde::{Deserialize, Serialize};

/// A `(row, col)` board coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Row and column offset of `self` relative to `origin`.
    #[must_use]
    pub const fn delta_from(self, origin: Coord) -> (i32, i32) {
        (self.row - origin.row, self.col - origin.col)
    }

    /// Coordinate offset by `(d_row, d_col)`.
    #[must_use]
    pub const fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }

    /// Square halfway between `self` and `other`.
    ///
    /// Only meaningful for two-square jumps, where both sums are even.
    #[must_use]
    pub const fn midpoint(self, other: Coord) -> Self {
        Self::new((self.row + other.row) / 2, (self.col + other.col) / 2)
    }

    /// Dark squares are the playable ones: `(row + col)` is odd.
    #[must_use]
    pub const fn is_dark_square(self) -> bool {
        (self.row + self.col).rem_euclid(2) == 1
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
