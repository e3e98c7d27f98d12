//! Move representation for shogi.

use std::fmt;
use std::str::FromStr;

use crate::core::{NotationError, Square, Variant};
use crate::notation::{parse_move, position_to_notation, OriginText};
use crate::traits::{MoveT, Origin, PieceTypeT, RecordT};

use super::piece::{Piece, PieceType};

/// Represents a move in shogi.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Move {
    /// A normal move from one square to another.
    Normal {
        from: Square,
        to: Square,
        promote: bool,
    },
    /// A drop move placing a piece from hand onto the board.
    Drop { to: Square, piece_type: PieceType },
}

impl MoveT for Move {
    type PieceType = PieceType;

    fn origin(&self) -> Origin<PieceType> {
        match *self {
            Move::Normal { from, .. } => Origin::Board(from),
            Move::Drop { piece_type, .. } => Origin::Hand(piece_type),
        }
    }

    fn to(&self) -> Square {
        match *self {
            Move::Normal { to, .. } => to,
            Move::Drop { to, .. } => to,
        }
    }
}

impl Move {
    /// Returns true if this move includes promotion.
    pub fn is_promotion(&self) -> bool {
        matches!(self, Move::Normal { promote: true, .. })
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Move::Normal { from, to, promote } => write!(
                f,
                "{}{}{}",
                position_to_notation(Variant::Shogi, from),
                position_to_notation(Variant::Shogi, to),
                if promote { "+" } else { "" }
            ),
            Move::Drop { to, piece_type } => write!(
                f,
                "{}*{}",
                piece_type.to_char(),
                position_to_notation(Variant::Shogi, to)
            ),
        }
    }
}

impl FromStr for Move {
    type Err = NotationError;

    /// Parses a move in USI-style notation: `7g7f`, `8h2b+` or `P*5e`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = parse_move(Variant::Shogi, s)?;
        match (text.from, text.suffix) {
            (OriginText::Square(from), None) => Ok(Move::Normal {
                from,
                to: text.to,
                promote: false,
            }),
            (OriginText::Square(from), Some('+')) => Ok(Move::Normal {
                from,
                to: text.to,
                promote: true,
            }),
            (OriginText::Drop(c), None) if c.is_ascii_uppercase() => {
                let piece_type = PieceType::from_char(c).ok_or(NotationError::InvalidPiece(c))?;
                if !piece_type.is_hand_type() {
                    return Err(NotationError::InvalidPiece(c));
                }
                Ok(Move::Drop {
                    to: text.to,
                    piece_type,
                })
            }
            _ => Err(NotationError::InvalidMove(s.to_string())),
        }
    }
}

/// Record of a played shogi move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveRecord {
    Normal {
        from: Square,
        to: Square,
        /// The piece as it stands after the move.
        placed: Piece,
        captured: Option<Piece>,
        promoted: bool,
    },
    Drop {
        to: Square,
        piece: Piece,
    },
}

impl RecordT for MoveRecord {
    type Move = Move;

    fn to_move(&self) -> Move {
        match *self {
            MoveRecord::Normal {
                from, to, promoted, ..
            } => Move::Normal {
                from,
                to,
                promote: promoted,
            },
            MoveRecord::Drop { to, piece } => Move::Drop {
                to,
                piece_type: piece.piece_type,
            },
        }
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_move())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_and_display() {
        let cases = ["7g7f", "8h2b+", "P*5e", "R*1a"];
        for (i, case) in cases.iter().enumerate() {
            let mv: Move = case.parse().unwrap();
            assert_eq!(*case, mv.to_string(), "failed at #{i}");
        }

        assert_eq!(
            Ok(Move::Normal {
                from: Square::new(6, 2),
                to: Square::new(5, 2),
                promote: false
            }),
            "7g7f".parse()
        );
        assert_eq!(
            Ok(Move::Drop {
                to: Square::new(4, 4),
                piece_type: PieceType::Pawn
            }),
            "P*5e".parse()
        );
    }

    #[test]
    fn rejects_invalid() {
        let cases = ["K*5e", "p*5e", "7g7fq", "7g7", "0a1a", "X*5e"];
        for (i, case) in cases.iter().enumerate() {
            assert!(case.parse::<Move>().is_err(), "failed at #{i}");
        }
    }

    #[test]
    fn record_replays_move() {
        let record = MoveRecord::Drop {
            to: Square::new(4, 4),
            piece: Piece::new(PieceType::Gold, crate::Color::Black),
        };
        assert!(record.to_move().is_drop());
        assert_eq!("G*5e", record.to_string());
    }
}
