//! Xiangqi (Chinese chess).
//!
//! Red is [`Color::White`](crate::Color::White) and starts on rows 5 to 9. The
//! river lies between rows 4 and 5; the palaces span columns 3 to 5.

pub(crate) mod movegen;
pub mod moves;
pub mod piece;
pub mod position;

pub use moves::{Move, MoveRecord};
pub use piece::{Piece, PieceType};
pub use position::Position;

/// The xiangqi board.
pub type Board = crate::core::Board<Piece, 10, 9>;

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbakabnr/9/1c5c1/p1p1p1p1p/9/9/P1P1P1P1P/1C5C1/9/RNBAKABNR w - - 0 1";
