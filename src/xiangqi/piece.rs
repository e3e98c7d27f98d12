use std::fmt;

use crate::core::Color;
use crate::traits::{PieceT, PieceTypeT};

/// Represents a kind of xiangqi piece.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceType {
    General,
    Advisor,
    Elephant,
    Horse,
    Chariot,
    Cannon,
    Soldier,
}

impl PieceTypeT for PieceType {
    /// Letters follow the usual xiangqi FEN (`K A B N R C P`).
    fn to_char(&self) -> char {
        match *self {
            PieceType::General => 'K',
            PieceType::Advisor => 'A',
            PieceType::Elephant => 'B',
            PieceType::Horse => 'N',
            PieceType::Chariot => 'R',
            PieceType::Cannon => 'C',
            PieceType::Soldier => 'P',
        }
    }

    /// Also accepts the alternative letters `E` (elephant) and `H` (horse).
    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'K' => Some(PieceType::General),
            'A' => Some(PieceType::Advisor),
            'B' | 'E' => Some(PieceType::Elephant),
            'N' | 'H' => Some(PieceType::Horse),
            'R' => Some(PieceType::Chariot),
            'C' => Some(PieceType::Cannon),
            'P' => Some(PieceType::Soldier),
            _ => None,
        }
    }

    fn iter() -> impl Iterator<Item = Self> {
        [
            PieceType::General,
            PieceType::Advisor,
            PieceType::Elephant,
            PieceType::Horse,
            PieceType::Chariot,
            PieceType::Cannon,
            PieceType::Soldier,
        ]
        .into_iter()
    }

    fn index(&self) -> usize {
        *self as usize
    }

    fn is_royal(&self) -> bool {
        *self == PieceType::General
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            PieceType::General => "general",
            PieceType::Advisor => "advisor",
            PieceType::Elephant => "elephant",
            PieceType::Horse => "horse",
            PieceType::Chariot => "chariot",
            PieceType::Cannon => "cannon",
            PieceType::Soldier => "soldier",
        };
        write!(f, "{}", name)
    }
}

/// A xiangqi piece. White plays red.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    pub fn new(piece_type: PieceType, color: Color) -> Piece {
        Piece { piece_type, color }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters() {
        for pt in PieceType::iter() {
            assert_eq!(Some(pt), PieceType::from_char(pt.to_char()));
        }
        assert_eq!(Some(PieceType::Elephant), PieceType::from_char('e'));
        assert_eq!(Some(PieceType::Horse), PieceType::from_char('H'));
        assert_eq!(None, PieceType::from_char('Q'));
    }

    #[test]
    fn red_is_uppercase() {
        assert_eq!('C', Piece::new(PieceType::Cannon, Color::White).to_char());
        assert_eq!('c', Piece::new(PieceType::Cannon, Color::Black).to_char());
    }
}
