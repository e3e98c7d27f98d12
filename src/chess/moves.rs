//! Move representation for chess.

use std::fmt;
use std::str::FromStr;

use crate::core::{NotationError, Square, Variant};
use crate::notation::{parse_move, position_to_notation, OriginText};
use crate::traits::{MoveT, Origin, PieceTypeT, RecordT};

use super::piece::{Piece, PieceType};

/// Represents a chess move. Castling is a two-square king move.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

impl Move {
    /// Creates a move without promotion.
    pub fn new(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            promotion: None,
        }
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
            position_to_notation(Variant::Chess, self.from),
            position_to_notation(Variant::Chess, self.to)
        )?;
        if let Some(pt) = self.promotion {
            write!(f, "{}", pt)?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = NotationError;

    /// Parses a move in coordinate notation (`e2e4`, `e7e8q`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = parse_move(Variant::Chess, s)?;
        let from = match text.from {
            OriginText::Square(sq) => sq,
            OriginText::Drop(_) => return Err(NotationError::InvalidMove(s.to_string())),
        };
        let promotion = match text.suffix {
            Some(c) => Some(PieceType::from_char(c).ok_or(NotationError::InvalidPiece(c))?),
            None => None,
        };
        Ok(Move {
            from,
            to: text.to,
            promotion,
        })
    }
}

/// Which rook took part in castling.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum CastleSide {
    King,
    Queen,
}

/// MoveRecord stores what happened when a move was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    /// The piece as it stood on `from` before moving.
    pub piece: Piece,
    /// The captured piece; for en passant, the pawn removed beside `to`.
    pub captured: Option<Piece>,
    pub castling: Option<CastleSide>,
    pub en_passant: bool,
    pub promotion: Option<PieceType>,
}

impl RecordT for MoveRecord {
    type Move = Move;

    fn to_move(&self) -> Move {
        Move {
            from: self.from,
            to: self.to,
            promotion: self.promotion,
        }
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.castling {
            Some(CastleSide::King) => write!(f, "O-O"),
            Some(CastleSide::Queen) => write!(f, "O-O-O"),
            None => write!(f, "{}", self.to_move()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Color;

    #[test]
    fn from_str() {
        let ok_cases = [
            ("e2e4", Move::new(Square::new(6, 4), Square::new(4, 4))),
            (
                "a7a8n",
                Move {
                    from: Square::new(1, 0),
                    to: Square::new(0, 0),
                    promotion: Some(PieceType::Knight),
                },
            ),
        ];
        let ng_cases = ["e2", "e2e9", "i2i4", "e7e8x", "P*e4", "e2e4qq"];

        for (i, case) in ok_cases.iter().enumerate() {
            assert_eq!(Ok(case.1), case.0.parse::<Move>(), "failed at #{i}");
        }
        for (i, case) in ng_cases.iter().enumerate() {
            assert!(case.parse::<Move>().is_err(), "failed at #{i}");
        }
    }

    #[test]
    fn to_string() {
        assert_eq!("e2e4", Move::new(Square::new(6, 4), Square::new(4, 4)).to_string());
        let promo = Move {
            from: Square::new(1, 7),
            to: Square::new(0, 7),
            promotion: Some(PieceType::Queen),
        };
        assert_eq!("h7h8q", promo.to_string());
    }

    #[test]
    fn record_display() {
        let record = MoveRecord {
            from: Square::new(7, 4),
            to: Square::new(7, 6),
            piece: Piece::new(PieceType::King, Color::White),
            captured: None,
            castling: Some(CastleSide::King),
            en_passant: false,
            promotion: None,
        };
        assert_eq!("O-O", record.to_string());
        assert_eq!(Move::new(Square::new(7, 4), Square::new(7, 6)), record.to_move());
    }
}
