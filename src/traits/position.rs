//! Position trait definitions.

use std::fmt::{Debug, Display};

use crate::config::GameOptions;
use crate::core::{Color, GameStatus, MoveError, SetupError, Square, Variant};

use super::piece::{PieceT, PieceTypeT};

/// Where a move comes from: a board square, or the mover's hand (shogi drops).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Origin<T> {
    Board(Square),
    Hand(T),
}

impl<T> Origin<T> {
    /// Returns the board square, if the origin is on the board.
    pub fn square(&self) -> Option<Square> {
        match *self {
            Origin::Board(sq) => Some(sq),
            Origin::Hand(_) => None,
        }
    }
}

impl<T> From<Square> for Origin<T> {
    fn from(sq: Square) -> Self {
        Origin::Board(sq)
    }
}

/// Trait for a move in a variant.
pub trait MoveT: Copy + Clone + Eq + Debug + Display {
    /// The piece type for this variant.
    type PieceType: PieceTypeT;

    /// Returns where the move starts.
    fn origin(&self) -> Origin<Self::PieceType>;

    /// Returns the destination square of this move.
    fn to(&self) -> Square;

    /// Returns true if this is a drop move.
    fn is_drop(&self) -> bool {
        matches!(self.origin(), Origin::Hand(_))
    }
}

/// Trait for the record of a played move.
///
/// Records are appended to the game history and never mutated.
pub trait RecordT: Clone + Debug + Display {
    /// The move type for this variant.
    type Move: MoveT;

    /// Returns the move that produced this record, for replaying the history.
    fn to_move(&self) -> Self::Move;
}

/// Trait for a game position in a variant.
///
/// A position is an immutable value: [`make_move`](PositionT::make_move) returns
/// a new position and leaves `self` untouched.
pub trait PositionT: Clone + Debug + Sized {
    /// The piece type for this variant.
    type PieceType: PieceTypeT;

    /// The piece (type + color) for this variant.
    type Piece: PieceT<PieceType = Self::PieceType>;

    /// The move type for this variant.
    type Move: MoveT<PieceType = Self::PieceType>;

    /// The move record type for this variant.
    type Record: RecordT<Move = Self::Move>;

    /// The variant this position belongs to.
    const VARIANT: Variant;

    /// Creates the start position, honouring `options.setup` when present.
    fn new(options: &GameOptions) -> Result<Self, SetupError>;

    /// Returns the setup-string representation of this position.
    fn to_setup(&self) -> String;

    /// Returns the current side to move.
    fn side_to_move(&self) -> Color;

    /// Returns the piece at the given square, if any.
    fn piece_at(&self, sq: Square) -> Option<Self::Piece>;

    /// Returns true if the given color's king is attacked.
    fn in_check(&self, c: Color) -> bool;

    /// Returns all legal moves for the side to move.
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Builds the move going from `origin` to `to`, applying the default
    /// promotion when `promotion` is `None`. Fails if no such legal move exists.
    fn resolve_move(
        &self,
        origin: Origin<Self::PieceType>,
        to: Square,
        promotion: Option<Self::PieceType>,
    ) -> Result<Self::Move, MoveError>;

    /// Makes the given move and returns the resulting position with its record.
    fn make_move(&self, mv: Self::Move) -> Result<(Self, Self::Record), MoveError>;

    /// Returns all legal moves starting at `origin`.
    fn legal_moves_from(&self, origin: Origin<Self::PieceType>) -> Vec<Self::Move> {
        self.legal_moves()
            .into_iter()
            .filter(|mv| mv.origin() == origin)
            .collect()
    }

    /// Returns true if the side to move has at least one legal move.
    fn has_legal_moves(&self) -> bool {
        !self.legal_moves().is_empty()
    }

    /// Returns the status of the game for the side to move.
    ///
    /// A side without legal moves is checkmated when in check. Otherwise the
    /// game is a stalemate in variants that recognise it, and a loss elsewhere.
    fn status(&self) -> GameStatus {
        let in_check = self.in_check(self.side_to_move());
        let can_move = self.has_legal_moves();

        match (in_check, can_move) {
            (true, true) => GameStatus::Check,
            (false, true) => GameStatus::Playing,
            (true, false) => GameStatus::Checkmate,
            (false, false) if Self::VARIANT.has_stalemate() => GameStatus::Stalemate,
            (false, false) => GameStatus::Checkmate,
        }
    }
}
