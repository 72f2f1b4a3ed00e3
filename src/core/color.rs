//! Player colors and per-color data storage.
//!
//! ## Color
//!
//! Checkers is strictly two-player: `Dark` moves first, then turns
//! alternate. Dark advances toward higher rows, Light toward lower rows.
//!
//! ## ColorMap
//!
//! Fixed two-slot storage indexed by `Color`, for per-side counters.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Dark,
    Light,
}

impl Color {
    /// Both colors in turn order.
    pub const ALL: [Color; 2] = [Color::Dark, Color::Light];

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Color::Dark => Color::Light,
            Color::Light => Color::Dark,
        }
    }

    /// Row delta of a forward step for this side.
    ///
    /// ```
    /// use rust_checkers::core::Color;
    ///
    /// assert_eq!(Color::Dark.forward(), 1);
    /// assert_eq!(Color::Light.forward(), -1);
    /// ```
    #[must_use]
    pub const fn forward(self) -> i32 {
        match self {
            Color::Dark => 1,
            Color::Light => -1,
        }
    }

    const fn index(self) -> usize {
        match self {
            Color::Dark => 0,
            Color::Light => 1,
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Color::Dark => write!(f, "Dark"),
            Color::Light => write!(f, "Light"),
        }
    }
}

/// Per-color data storage with O(1) access.
///
/// ```
/// use rust_checkers::core::{Color, ColorMap};
///
/// let mut moves: ColorMap<u32> = ColorMap::default();
/// moves[Color::Light] += 1;
///
/// assert_eq!(moves[Color::Dark], 0);
/// assert_eq!(moves[Color::Light], 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorMap<T> {
    data: [T; 2],
}

impl<T> ColorMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Color) -> T) -> Self {
        Self {
            data: [factory(Color::Dark), factory(Color::Light)],
        }
    }

    /// Iterate over (Color, &T) pairs in turn order.
    pub fn iter(&self) -> impl Iterator<Item = (Color, &T)> {
        Color::ALL.into_iter().zip(self.data.iter())
    }
}

impl<T> Index<Color> for ColorMap<T> {
    type Output = T;

    fn index(&self, color: Color) -> &Self::Output {
        &self.data[color.index()]
    }
}

impl<T> IndexMut<Color> for ColorMap<T> {
    fn index_mut(&mut self, color: Color) -> &mut Self::Output {
        &mut self.data[color.index()]
    }
}
