//! Core types shared across all variants.
//!
//! This module contains fundamental types that don't depend on variant-specific
//! piece types: colors, squares, the generic board grid, statuses and errors.

pub mod board;
pub mod color;
pub mod error;
pub(crate) mod setup;
pub mod square;
pub mod status;
pub mod variant;

pub use board::Board;
pub use color::{Color, ColorIter};
pub use error::{MoveError, NotationError, SetupError};
pub use square::Square;
pub use status::GameStatus;
pub use variant::{ParseVariantError, Variant};
