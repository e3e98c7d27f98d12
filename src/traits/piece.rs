//! Piece trait definitions.

use std::fmt::Debug;
use std::hash::Hash;

use crate::core::Color;

/// Trait for piece types in a variant.
///
/// Each variant defines its own closed piece type enum implementing this trait.
pub trait PieceTypeT: Copy + Clone + Eq + Hash + Debug + Sized + 'static {
    /// Returns the uppercase letter used for this piece type in setup strings.
    fn to_char(&self) -> char;

    /// Creates a piece type from its setup letter (case-insensitive).
    fn from_char(c: char) -> Option<Self>;

    /// Returns an iterator over all piece types in this variant.
    fn iter() -> impl Iterator<Item = Self>;

    /// Returns the unique index for this piece type (for array indexing).
    fn index(&self) -> usize;

    /// Returns the total number of piece types in this variant.
    fn count() -> usize {
        Self::iter().count()
    }

    /// Returns true if losing this piece loses the game (king, general).
    fn is_royal(&self) -> bool;
}

/// Trait for a piece (piece type + color).
pub trait PieceT: Copy + Clone + Eq + Debug {
    /// The piece type for this variant.
    type PieceType: PieceTypeT;

    /// Returns the piece type.
    fn piece_type(&self) -> Self::PieceType;

    /// Returns the color of this piece.
    fn color(&self) -> Color;

    /// Returns the setup letter, uppercase for white and lowercase for black.
    fn to_char(&self) -> char {
        let c = self.piece_type().to_char();
        match self.color() {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c.to_ascii_lowercase(),
        }
    }
}

/// Returns the color a setup letter stands for.
pub(crate) fn color_of_char(c: char) -> Color {
    if c.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    }
}
