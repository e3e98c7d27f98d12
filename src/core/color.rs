use std::fmt;
use std::iter;

/// Represents each side of the board.
///
/// `White` always moves first and starts on the bottom rows of the board. The
/// variant-specific names (Red in xiangqi, Sente in shogi) are available through
/// [`Variant::side_name`](crate::Variant::side_name).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Color {
    White,
    Black,
}

/// An iterator over the two colors, `White` first.
pub type ColorIter = iter::Copied<std::slice::Iter<'static, Color>>;

impl Color {
    /// Returns the color of the opponent side.
    ///
    /// # Examples
    ///
    /// ```
    /// use boardrules::Color;
    ///
    /// assert_eq!(Color::Black, Color::White.flip());
    /// assert_eq!(Color::White, Color::Black.flip());
    /// ```
    #[must_use]
    pub fn flip(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Converts the instance into the unique number for array indexing purpose.
    #[inline(always)]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Row step that moves a piece of this color towards the opponent.
    #[inline(always)]
    pub fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    /// Returns an iterator over both colors.
    pub fn iter() -> ColorIter {
        [Color::White, Color::Black].iter().copied()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Color::White => write!(f, "white"),
            Color::Black => write!(f, "black"),
        }
    }
}
