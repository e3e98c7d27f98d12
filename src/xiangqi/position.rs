//! Xiangqi position (game state).

use itertools::Itertools;
use std::fmt;

use crate::config::GameOptions;
use crate::core::setup::{board_to_string, check_kings, parse_board, parse_side};
use crate::core::{Color, MoveError, SetupError, Square, Variant};
use crate::traits::{color_of_char, Origin, PieceT, PieceTypeT, PositionT};

use super::movegen::{self, generals_facing, in_palace};
use super::moves::{Move, MoveRecord};
use super::piece::{Piece, PieceType};
use super::{Board, STARTING_FEN};

/// Represents a xiangqi position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    side_to_move: Color,
    fullmove: u16,
}

impl Default for Position {
    fn default() -> Self {
        Position::startpos()
    }
}

impl Position {
    /// Creates a position with the standard starting setup.
    pub fn startpos() -> Self {
        match Position::from_fen(STARTING_FEN) {
            Ok(pos) => pos,
            Err(e) => unreachable!("invalid starting FEN: {e}"),
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Finds the general of the given color.
    pub fn find_general(&self, c: Color) -> Option<Square> {
        self.board
            .find(|pc| pc.piece_type == PieceType::General && pc.color == c)
    }

    /// Creates a position from a xiangqi FEN string.
    ///
    /// Only the board and the side to move are required; `w` or `r` stands for
    /// red. Castling and en passant fields, when present, must be `-`.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(SetupError::MissingDataFields);
        }

        let board: Board = parse_board(parts[0], |c, promoted| {
            if promoted {
                return None;
            }
            PieceType::from_char(c).map(|pt| Piece::new(pt, color_of_char(c)))
        })?;
        check_kings(&board)?;
        for (sq, pc) in board.pieces() {
            if pc.piece_type == PieceType::General && !in_palace(sq, pc.color) {
                return Err(SetupError::IllegalBoardState(format!(
                    "{} general outside its palace",
                    Variant::Xiangqi.side_name(pc.color)
                )));
            }
        }

        let side_to_move = match parts[1] {
            "r" => Color::White,
            s => parse_side(s, "w", "b")?,
        };

        for field in parts.iter().skip(2).take(2) {
            if *field != "-" {
                return Err(SetupError::IllegalBoardState(field.to_string()));
            }
        }
        let fullmove = match parts.get(5) {
            Some(s) => s
                .parse()
                .map_err(|_| SetupError::IllegalBoardState(s.to_string()))?,
            None => 1,
        };

        Ok(Position {
            board,
            side_to_move,
            fullmove,
        })
    }

    /// Returns the FEN representation of this position.
    pub fn to_fen(&self) -> String {
        let side = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };
        [
            board_to_string(&self.board, |pc| pc.to_char().to_string()),
            side.to_string(),
            "-".to_string(),
            "-".to_string(),
            "0".to_string(),
            self.fullmove.to_string(),
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

    /// A move is safe when it neither leaves the mover's general attacked nor
    /// opens the file between the two generals.
    fn is_safe(&self, mv: &Move) -> bool {
        let mut scratch = self.clone();
        scratch.apply(*mv);
        !scratch.in_check(self.side_to_move) && !generals_facing(&scratch.board)
    }

    fn apply(&mut self, mv: Move) -> MoveRecord {
        let piece = match self.board.piece_at(mv.from) {
            Some(pc) => pc,
            None => unreachable!("apply called without a piece on {}", mv.from),
        };
        let captured = self.board.piece_at(mv.to);

        self.board.set_piece(mv.from, None);
        self.board.set_piece(mv.to, Some(piece));
        if piece.color == Color::Black {
            self.fullmove = self.fullmove.saturating_add(1);
        }
        self.side_to_move = piece.color.flip();

        MoveRecord {
            from: mv.from,
            to: mv.to,
            piece,
            captured,
        }
    }
}

impl PositionT for Position {
    type PieceType = PieceType;
    type Piece = Piece;
    type Move = Move;
    type Record = MoveRecord;

    const VARIANT: Variant = Variant::Xiangqi;

    fn new(options: &GameOptions) -> Result<Self, SetupError> {
        match options.setup {
            Some(ref fen) => Position::from_fen(fen),
            None => Ok(Position::startpos()),
        }
    }

    fn to_setup(&self) -> String {
        self.to_fen()
    }

    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    fn in_check(&self, c: Color) -> bool {
        match self.find_general(c) {
            Some(sq) => movegen::is_attacked_by(&self.board, sq, c.flip()),
            None => false,
        }
    }

    fn legal_moves(&self) -> Vec<Move> {
        self.board
            .pieces_of(self.side_to_move)
            .flat_map(|(from, _)| {
                movegen::destinations(&self.board, from)
                    .into_iter()
                    .map(move |to| Move::new(from, to))
            })
            .filter(|mv| self.is_safe(mv))
            .collect()
    }

    fn legal_moves_from(&self, origin: Origin<PieceType>) -> Vec<Move> {
        let from = match origin {
            Origin::Board(sq) if self.board.is_color_at(sq, self.side_to_move) => sq,
            _ => return Vec::new(),
        };
        movegen::destinations(&self.board, from)
            .into_iter()
            .map(|to| Move::new(from, to))
            .filter(|mv| self.is_safe(mv))
            .collect()
    }

    fn resolve_move(
        &self,
        origin: Origin<PieceType>,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Result<Move, MoveError> {
        let from = match origin {
            Origin::Board(sq) => sq,
            Origin::Hand(_) => return Err(MoveError::DropNotAllowed(Variant::Xiangqi)),
        };
        for sq in [from, to] {
            if !self.board.contains(sq) {
                return Err(MoveError::OutOfBounds(sq));
            }
        }
        if promotion.is_some() {
            return Err(MoveError::InvalidPromotion);
        }

        let pc = self.board.piece_at(from).ok_or(MoveError::NoPiece(from))?;
        if pc.color != self.side_to_move {
            return Err(MoveError::NotYourTurn(from, self.side_to_move));
        }
        if !movegen::destinations(&self.board, from).contains(&to) {
            return Err(MoveError::Unreachable { from, to });
        }

        let mv = Move::new(from, to);
        if !self.is_safe(&mv) {
            return Err(MoveError::InCheck);
        }
        Ok(mv)
    }

    fn make_move(&self, mv: Move) -> Result<(Self, MoveRecord), MoveError> {
        let mv = self.resolve_move(Origin::Board(mv.from), mv.to, None)?;
        let mut next = self.clone();
        let record = next.apply(mv);
        Ok((next, record))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(f, "{} to move", Variant::Xiangqi.side_name(self.side_to_move))
    }
}
