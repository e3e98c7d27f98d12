use std::fmt;

use crate::core::Color;
use crate::traits::{PieceT, PieceTypeT};

/// Represents a jungle animal, ordered by rank.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Animal {
    Rat,
    Cat,
    Dog,
    Wolf,
    Leopard,
    Tiger,
    Lion,
    Elephant,
}

impl Animal {
    /// Returns the rank, from 1 (rat) to 8 (elephant).
    pub fn rank(self) -> u8 {
        self as u8 + 1
    }

    /// Returns true if the animal may leap across water.
    pub fn can_jump(self) -> bool {
        matches!(self, Animal::Lion | Animal::Tiger)
    }

    /// Returns true if the animal may enter water.
    pub fn can_swim(self) -> bool {
        self == Animal::Rat
    }
}

impl PieceTypeT for Animal {
    fn to_char(&self) -> char {
        match *self {
            Animal::Rat => 'R',
            Animal::Cat => 'C',
            Animal::Dog => 'D',
            Animal::Wolf => 'W',
            Animal::Leopard => 'P',
            Animal::Tiger => 'T',
            Animal::Lion => 'L',
            Animal::Elephant => 'E',
        }
    }

    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'R' => Some(Animal::Rat),
            'C' => Some(Animal::Cat),
            'D' => Some(Animal::Dog),
            'W' => Some(Animal::Wolf),
            'P' => Some(Animal::Leopard),
            'T' => Some(Animal::Tiger),
            'L' => Some(Animal::Lion),
            'E' => Some(Animal::Elephant),
            _ => None,
        }
    }

    fn iter() -> impl Iterator<Item = Self> {
        [
            Animal::Rat,
            Animal::Cat,
            Animal::Dog,
            Animal::Wolf,
            Animal::Leopard,
            Animal::Tiger,
            Animal::Lion,
            Animal::Elephant,
        ]
        .into_iter()
    }

    fn index(&self) -> usize {
        *self as usize
    }

    fn is_royal(&self) -> bool {
        false
    }
}

impl fmt::Display for Animal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Animal::Rat => "rat",
            Animal::Cat => "cat",
            Animal::Dog => "dog",
            Animal::Wolf => "wolf",
            Animal::Leopard => "leopard",
            Animal::Tiger => "tiger",
            Animal::Lion => "lion",
            Animal::Elephant => "elephant",
        };
        write!(f, "{}", name)
    }
}

/// A jungle piece.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub animal: Animal,
    pub color: Color,
}

impl Piece {
    pub fn new(animal: Animal, color: Color) -> Piece {
        Piece { animal, color }
    }
}

impl PieceT for Piece {
    type PieceType = Animal;

    fn piece_type(&self) -> Animal {
        self.animal
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
    fn ranks() {
        let ranks: Vec<u8> = Animal::iter().map(Animal::rank).collect();
        assert_eq!(vec![1, 2, 3, 4, 5, 6, 7, 8], ranks);
        assert!(Animal::Lion > Animal::Tiger);
    }

    #[test]
    fn abilities() {
        assert!(Animal::Rat.can_swim());
        assert!(!Animal::Lion.can_swim());
        assert!(Animal::Tiger.can_jump());
        assert!(!Animal::Elephant.can_jump());
    }
}
