//! Western chess.
//!
//! White starts on rows 6 and 7, so square `(0, 0)` is a8. Castling is encoded
//! as a two-square king move and promotion defaults to a queen.

pub(crate) mod movegen;
pub mod moves;
pub mod piece;
pub mod position;

pub use moves::{CastleSide, Move, MoveRecord};
pub use piece::{Piece, PieceType};
pub use position::Position;

/// The chess board.
pub type Board = crate::core::Board<Piece, 8, 8>;

/// FEN of the standard starting position.
pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";
