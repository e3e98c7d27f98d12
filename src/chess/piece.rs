use std::fmt;

use crate::core::Color;
use crate::traits::{PieceT, PieceTypeT};

/// Represents a kind of chess piece.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// Piece types a pawn may promote to, strongest first.
pub const PROMOTION_TYPES: [PieceType; 4] = [
    PieceType::Queen,
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Knight,
];

impl PieceType {
    /// Returns true if a pawn may promote to this piece type.
    pub fn is_promotion_target(self) -> bool {
        PROMOTION_TYPES.contains(&self)
    }
}

impl PieceTypeT for PieceType {
    fn to_char(&self) -> char {
        match *self {
            PieceType::Pawn => 'P',
            PieceType::Knight => 'N',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceType::Pawn),
            'N' => Some(PieceType::Knight),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'Q' => Some(PieceType::Queen),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }

    fn iter() -> impl Iterator<Item = Self> {
        [
            PieceType::Pawn,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Rook,
            PieceType::Queen,
            PieceType::King,
        ]
        .into_iter()
    }

    fn index(&self) -> usize {
        *self as usize
    }

    fn is_royal(&self) -> bool {
        *self == PieceType::King
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char().to_ascii_lowercase())
    }
}

/// A chess piece.
///
/// `has_moved` is cleared only for pieces that have never left their square;
/// castling and the pawn double step depend on it.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
    pub has_moved: bool,
}

impl Piece {
    /// Creates a piece that has not moved yet.
    pub fn new(piece_type: PieceType, color: Color) -> Piece {
        Piece {
            piece_type,
            color,
            has_moved: false,
        }
    }

    /// Returns a copy of this piece marked as moved.
    #[must_use]
    pub fn moved(self) -> Piece {
        Piece {
            has_moved: true,
            ..self
        }
    }
}

impl PieceT for Piece {
    type PieceType = PieceType;

    fn piece_type(&self) -> PieceType {
        self.piece_type
    }

    fn color(&self) -> Color {
        self.color
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
