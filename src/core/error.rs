//! Error types shared by every variant.
//!
//! Board reads and writes outside the grid are not errors (see
//! [`Board`](crate::core::Board)); everything that can actually be rejected is
//! represented here and returned as a value.

use thiserror::Error;

use super::color::Color;
use super::square::Square;
use super::variant::Variant;

/// Represents an error raised while parsing square or move notation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("notation string is empty")]
    Empty,
    #[error("invalid file '{file}' for {variant}")]
    InvalidFile { file: String, variant: Variant },
    #[error("invalid rank '{rank}' for {variant}")]
    InvalidRank { rank: String, variant: Variant },
    #[error("invalid move notation '{0}'")]
    InvalidMove(String),
    #[error("unknown piece letter '{0}'")]
    InvalidPiece(char),
}

/// Represents a rejected move.
///
/// Rejections are an expected outcome of interactive play and of validating
/// suggested moves, so they are plain values rather than panics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,
    #[error("square {0} is not on the board")]
    OutOfBounds(Square),
    #[error("no piece found at {0}")]
    NoPiece(Square),
    #[error("the piece at {0} does not belong to the side to move ({1})")]
    NotYourTurn(Square, Color),
    #[error("the piece at {from} cannot move to {to}")]
    Unreachable { from: Square, to: Square },
    #[error("the move leaves the king in check")]
    InCheck,
    #[error("invalid promotion choice")]
    InvalidPromotion,
    #[error("the piece must promote on {0}")]
    MustPromote(Square),
    #[error("drops are not allowed in {0}")]
    DropNotAllowed(Variant),
    #[error("the piece is not in hand")]
    NotInHand,
    #[error("square {0} is already occupied")]
    Occupied(Square),
    #[error("a piece dropped on {0} could never move")]
    DeadDrop(Square),
    #[error("two unpromoted pawns on the same file")]
    Nifu,
    #[error("checkmate by a pawn drop is not allowed")]
    Uchifuzume,
    #[error("the piece does not belong to {0}")]
    WrongVariant(Variant),
}

/// Represents an error raised while loading a start position.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    #[error("setup string has too few fields")]
    MissingDataFields,
    #[error("illegal board state: {0}")]
    IllegalBoardState(String),
    #[error("unknown piece letter '{0}'")]
    IllegalPieceType(char),
    #[error("illegal side to move '{0}'")]
    IllegalSideToMove(String),
    #[error("illegal hand '{0}'")]
    IllegalHand(String),
    #[error("illegal castling rights '{0}'")]
    IllegalCastling(String),
    #[error("illegal en passant square '{0}'")]
    IllegalEnPassant(String),
    #[error("{0} must have exactly one king")]
    KingCount(Color),
}

impl From<NotationError> for SetupError {
    fn from(e: NotationError) -> SetupError {
        SetupError::IllegalBoardState(e.to_string())
    }
}
