//! Trait definitions for variant-agnostic code.
//!
//! These traits define the common interfaces that every variant implements so
//! that the [`Game`](crate::Game) state machine can drive any of them.

pub mod piece;
pub mod position;

pub(crate) use piece::color_of_char;
pub use piece::{PieceT, PieceTypeT};
pub use position::{MoveT, Origin, PositionT, RecordT};
