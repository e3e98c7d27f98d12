//! Shogi (Japanese chess).
//!
//! Sente is [`Color::White`](crate::Color::White) and moves up the board, so its
//! promotion zone is rows 0 to 2. Captured pieces change sides and can be
//! dropped back onto the board.
//!
//! # Pieces
//!
//! | Piece | SFEN | Promotes To |
//! |-------|------|-------------|
//! | King | K | - |
//! | Rook | R | Dragon |
//! | Bishop | B | Horse |
//! | Gold | G | - |
//! | Silver | S | Promoted Silver |
//! | Knight | N | Promoted Knight |
//! | Lance | L | Promoted Lance |
//! | Pawn | P | Tokin |
//!
//! # SFEN Format
//!
//! Starting position: `lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1`

pub mod hand;
pub(crate) mod movegen;
pub mod moves;
pub mod piece;
pub mod position;

pub use hand::Hand;
pub use moves::{Move, MoveRecord};
pub use piece::{Piece, PieceType, HAND_TYPES};
pub use position::Position;

/// Width and height of the board.
pub const BOARD_SIZE: u8 = 9;

/// The shogi board.
pub type Board = crate::core::Board<Piece, BOARD_SIZE, BOARD_SIZE>;

/// Starting SFEN for standard shogi.
pub const STARTING_SFEN: &str = "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1";
