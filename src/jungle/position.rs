//! Jungle position (game state).

use itertools::Itertools;
use std::fmt;

use crate::config::GameOptions;
use crate::core::setup::{board_to_string, parse_board, parse_side};
use crate::core::{Color, GameStatus, MoveError, SetupError, Square, Variant};
use crate::notation::position_to_notation;
use crate::traits::{color_of_char, Origin, PieceT, PieceTypeT, PositionT};

use super::movegen::{self, reached_den};
use super::moves::{Move, MoveRecord};
use super::piece::{Animal, Piece};
use super::terrain::{terrain_at, Terrain};
use super::{Board, STARTING_SETUP};

/// Represents a jungle position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    side_to_move: Color,
    ply: u16,
}

impl Default for Position {
    fn default() -> Self {
        Position::startpos()
    }
}

impl Position {
    /// Creates a position with the standard starting setup.
    pub fn startpos() -> Self {
        match Position::from_setup(STARTING_SETUP) {
            Ok(pos) => pos,
            Err(e) => unreachable!("invalid starting setup: {e}"),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the terrain at `sq`.
    pub fn terrain_at(&self, sq: Square) -> Terrain {
        terrain_at(sq)
    }

    /// Returns the side whose piece stands in the opposing den, if any.
    pub fn den_winner(&self) -> Option<Color> {
        Color::iter().find(|&c| reached_den(&self.board, c))
    }

    /// Creates a position from a setup string: board, side to move (`w` or
    /// `b`) and an optional ply number, e.g. `l5t/1d3c1/r1p1w1e/7/7/7/E1W1P1R/1C3D1/T5L w 1`.
    pub fn from_setup(s: &str) -> Result<Self, SetupError> {
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(SetupError::MissingDataFields);
        }

        let board: Board = parse_board(parts[0], |c, promoted| {
            if promoted {
                return None;
            }
            Animal::from_char(c).map(|a| Piece::new(a, color_of_char(c)))
        })?;
        for (sq, pc) in board.pieces() {
            let misplaced = match terrain_at(sq) {
                Terrain::Water => !pc.animal.can_swim(),
                Terrain::Den(owner) => owner == pc.color,
                _ => false,
            };
            if misplaced {
                return Err(SetupError::IllegalBoardState(format!(
                    "{} {} cannot stand on {}",
                    Variant::Jungle.side_name(pc.color),
                    pc.animal,
                    position_to_notation(Variant::Jungle, sq)
                )));
            }
        }

        let side_to_move = parse_side(parts[1], "w", "b")?;
        let ply = match parts.get(2) {
            Some(s) => s
                .parse()
                .map_err(|_| SetupError::IllegalBoardState(s.to_string()))?,
            None => 1,
        };

        Ok(Position {
            board,
            side_to_move,
            ply,
        })
    }

    /// Returns the setup string of this position.
    pub fn to_setup_string(&self) -> String {
        let side = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        [
            board_to_string(&self.board, |pc| pc.to_char().to_string()),
            side.to_string(),
            self.ply.to_string(),
        ]
        .iter()
        .join(" ")
    }

    /// Returns the legal destinations of the piece on `from`.
    pub fn destinations_from(&self, from: Square) -> Vec<Square> {
        self.legal_moves_from(Origin::Board(from))
            .into_iter()
            .map(|mv| mv.to)
            .collect()
    }

    fn apply(&mut self, mv: Move) -> MoveRecord {
        let piece = match self.board.piece_at(mv.from) {
            Some(pc) => pc,
            None => unreachable!("apply called without a piece on {}", mv.from),
        };
        let captured = self.board.piece_at(mv.to);

        self.board.set_piece(mv.from, None);
        self.board.set_piece(mv.to, Some(piece));
        self.side_to_move = piece.color.flip();
        self.ply = self.ply.saturating_add(1);

        MoveRecord {
            from: mv.from,
            to: mv.to,
            piece,
            captured,
        }
    }
}

impl PositionT for Position {
    type PieceType = Animal;
    type Piece = Piece;
    type Move = Move;
    type Record = MoveRecord;

    const VARIANT: Variant = Variant::Jungle;

    fn new(options: &GameOptions) -> Result<Self, SetupError> {
        match options.setup {
            Some(ref s) => Position::from_setup(s),
            None => Ok(Position::startpos()),
        }
    }

    fn to_setup(&self) -> String {
        self.to_setup_string()
    }

    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    /// Jungle has no check.
    fn in_check(&self, _c: Color) -> bool {
        false
    }

    fn legal_moves(&self) -> Vec<Move> {
        if self.den_winner().is_some() {
            return Vec::new();
        }
        self.board
            .pieces_of(self.side_to_move)
            .flat_map(|(from, _)| {
                movegen::destinations(&self.board, from)
                    .into_iter()
                    .map(move |to| Move::new(from, to))
            })
            .collect()
    }

    fn resolve_move(
        &self,
        origin: Origin<Animal>,
        to: Square,
        promotion: Option<Animal>,
    ) -> Result<Move, MoveError> {
        let from = match origin {
            Origin::Board(sq) => sq,
            Origin::Hand(_) => return Err(MoveError::DropNotAllowed(Variant::Jungle)),
        };
        for sq in [from, to] {
            if !self.board.contains(sq) {
                return Err(MoveError::OutOfBounds(sq));
            }
        }
        if promotion.is_some() {
            return Err(MoveError::InvalidPromotion);
        }
        if self.den_winner().is_some() {
            return Err(MoveError::GameOver);
        }

        let pc = self.board.piece_at(from).ok_or(MoveError::NoPiece(from))?;
        if pc.color != self.side_to_move {
            return Err(MoveError::NotYourTurn(from, self.side_to_move));
        }
        if !movegen::destinations(&self.board, from).contains(&to) {
            return Err(MoveError::Unreachable { from, to });
        }
        Ok(Move::new(from, to))
    }

    fn make_move(&self, mv: Move) -> Result<(Self, MoveRecord), MoveError> {
        let mv = self.resolve_move(Origin::Board(mv.from), mv.to, None)?;
        let mut next = self.clone();
        let record = next.apply(mv);
        Ok((next, record))
    }

    /// The game ends once a den is entered or the side to move cannot move.
    fn status(&self) -> GameStatus {
        if self.den_winner().is_some() || !self.has_legal_moves() {
            GameStatus::Checkmate
        } else {
            GameStatus::Playing
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(f, "{} to move", Variant::Jungle.side_name(self.side_to_move))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::notation_to_position;

    fn sq(s: &str) -> Square {
        notation_to_position(Variant::Jungle, s).unwrap()
    }

    fn mv(s: &str) -> Move {
        s.parse().unwrap()
    }

    #[test]
    fn startpos() {
        let pos = Position::startpos();
        assert_eq!(24, pos.legal_moves().len());
        assert_eq!(STARTING_SETUP, pos.to_setup_string());
        assert_eq!(Some(Piece::new(Animal::Tiger, Color::White)), pos.piece_at(sq("a1")));
        assert_eq!(Some(Piece::new(Animal::Lion, Color::Black)), pos.piece_at(sq("a9")));
        assert_eq!(GameStatus::Playing, pos.status());
    }

    #[test]
    fn setup_errors() {
        let cases = [
            ("7/7/7/7/7/7/7/7/7", SetupError::MissingDataFields),
            ("7/7/7/7/7/7/7/7/7 x", SetupError::IllegalSideToMove("x".to_string())),
            (
                "7/7/7/7/1D5/7/7/7/7 w",
                SetupError::IllegalBoardState("blue dog cannot stand on b5".to_string()),
            ),
            (
                "7/7/7/7/7/7/7/7/3R3 w",
                SetupError::IllegalBoardState("blue rat cannot stand on d1".to_string()),
            ),
        ];
        for (i, (s, err)) in cases.iter().enumerate() {
            assert_eq!(Err(err.clone()), Position::from_setup(s), "failed at #{i}");
        }
    }

    #[test]
    fn rat_captures_elephant() {
        let pos = Position::from_setup("l6/7/7/7/7/7/7/e6/R5t w").unwrap();
        let (next, record) = pos.make_move(mv("a1a2")).unwrap();
        assert_eq!(Some(Piece::new(Animal::Elephant, Color::Black)), record.captured);
        assert_eq!(Some(Piece::new(Animal::Rat, Color::White)), next.piece_at(sq("a2")));
    }

    #[test]
    fn elephant_cannot_capture_rat() {
        let pos = Position::from_setup("l6/7/7/7/7/7/7/e6/R5t b").unwrap();
        assert_eq!(
            Err(MoveError::Unreachable {
                from: sq("a2"),
                to: sq("a1")
            }),
            pos.make_move(mv("a2a1")).map(|_| ())
        );
    }

    #[test]
    fn den_entry_wins() {
        let pos = Position::from_setup("2C4/7/7/7/7/7/7/7/l6 w").unwrap();
        let (next, _) = pos.make_move(mv("c9d9")).unwrap();
        assert_eq!(Some(Color::White), next.den_winner());
        assert_eq!(GameStatus::Checkmate, next.status());
        assert!(next.legal_moves().is_empty());
        assert_eq!(Err(MoveError::GameOver), next.make_move(mv("a1a2")).map(|_| ()));
    }

    #[test]
    fn no_pieces_left_loses() {
        let pos = Position::from_setup("7/7/7/7/7/7/7/r6/E6 w").unwrap();
        assert_eq!(GameStatus::Playing, pos.status());

        let pos = Position::from_setup("7/7/7/7/7/7/7/7/E6 b").unwrap();
        assert_eq!(GameStatus::Checkmate, pos.status());
    }

    #[test]
    fn ply_saturates() {
        let pos = Position::from_setup("l6/7/7/7/7/7/7/7/6T w 65535").unwrap();
        assert_eq!(GameStatus::Playing, pos.status());
        let (next, _) = pos.make_move(mv("g1g2")).unwrap();
        assert_eq!("l6/7/7/7/7/7/7/6T/7 b 65535", next.to_setup_string());
    }
}
