//! Move representation for xiangqi.

use std::fmt;
use std::str::FromStr;

use crate::core::{NotationError, Square, Variant};
use crate::notation::{parse_move, position_to_notation, OriginText};
use crate::traits::{MoveT, Origin, RecordT};

use super::piece::{Piece, PieceType};

/// Represents a xiangqi move.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Move {
        Move { from, to }
    }
}

impl MoveT for Move {
    type PieceType = PieceType;

    fn origin(&self) -> Origin<PieceType> {
        Origin::Board(self.from)
    }

    fn to(&self) -> Square {
        self.to
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{}",
            position_to_notation(Variant::Xiangqi, self.from),
            position_to_notation(Variant::Xiangqi, self.to)
        )
    }
}

impl FromStr for Move {
    type Err = NotationError;

    /// Parses a move in coordinate notation (`h3e3`, `e1e2`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = parse_move(Variant::Xiangqi, s)?;
        match (text.from, text.suffix) {
            (OriginText::Square(from), None) => Ok(Move::new(from, text.to)),
            _ => Err(NotationError::InvalidMove(s.to_string())),
        }
    }
}

/// Record of a played xiangqi move.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub captured: Option<Piece>,
}

impl RecordT for MoveRecord {
    type Move = Move;

    fn to_move(&self) -> Move {
        Move::new(self.from, self.to)
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_move())
    }
}
