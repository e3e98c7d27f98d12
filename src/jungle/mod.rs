//! Jungle chess (Dou Shou Qi).
//!
//! The board has 9 rows and 7 columns. White starts on rows 6 to 8 with its den
//! at `(8, 3)`. Entering the opponent's den wins the game, as does leaving the
//! opponent without a legal move. There is no check.

pub(crate) mod movegen;
pub mod moves;
pub mod piece;
pub mod position;
pub mod terrain;

pub use moves::{Move, MoveRecord};
pub use piece::{Animal, Piece};
pub use position::Position;
pub use terrain::{terrain_at, Terrain};

/// The jungle board.
pub type Board = crate::core::Board<Piece, 9, 7>;

/// Setup string of the standard starting position.
pub const STARTING_SETUP: &str = "l5t/1d3c1/r1p1w1e/7/7/7/E1W1P1R/1C3D1/T5L w 1";
