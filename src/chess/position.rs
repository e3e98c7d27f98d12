//! Chess position (game state).

use itertools::Itertools;
use std::fmt;

use crate::config::GameOptions;
use crate::core::setup::{board_to_string, check_kings, parse_board, parse_side};
use crate::core::{Color, MoveError, SetupError, Square, Variant};
use crate::notation::{notation_to_position, position_to_notation};
use crate::traits::{color_of_char, Origin, PieceT, PieceTypeT, PositionT};

use super::movegen::{self, home_row, pawn_start_row, promotion_row, KING_START_COL};
use super::moves::{CastleSide, Move, MoveRecord};
use super::piece::{Piece, PieceType, PROMOTION_TYPES};
use super::{Board, STARTING_FEN};

/// Represents a chess position: the board, the side to move and the en passant
/// target left by the previous move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    side_to_move: Color,
    en_passant: Option<Square>,
    halfmove_clock: u16,
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

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the square a pawn may capture en passant on, if any.
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// Finds the king's square for the given color.
    pub fn find_king(&self, c: Color) -> Option<Square> {
        self.board
            .find(|pc| pc.piece_type == PieceType::King && pc.color == c)
    }

    /// Returns true if `sq` is attacked by any piece of color `c`.
    pub fn is_attacked_by(&self, sq: Square, c: Color) -> bool {
        movegen::is_attacked_by(&self.board, sq, c)
    }

    // =========================================================================
    // FEN
    // =========================================================================

    /// Creates a position from a FEN string.
    ///
    /// The halfmove clock and the fullmove number may be omitted. Castling
    /// rights are translated into the `has_moved` flags of kings and rooks.
    pub fn from_fen(fen: &str) -> Result<Self, SetupError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(SetupError::MissingDataFields);
        }

        let mut board: Board = parse_board(parts[0], |c, promoted| {
            if promoted {
                return None;
            }
            PieceType::from_char(c).map(|pt| Piece::new(pt, color_of_char(c)))
        })?;
        check_kings(&board)?;

        let side_to_move = parse_side(parts[1], "w", "b")?;

        if parts[2] != "-" && !parts[2].chars().all(|c| "KQkq".contains(c)) {
            return Err(SetupError::IllegalCastling(parts[2].to_string()));
        }
        apply_castling_rights(&mut board, parts[2]);

        let en_passant = match parts[3] {
            "-" => None,
            s => {
                let sq = notation_to_position(Variant::Chess, s)
                    .map_err(|_| SetupError::IllegalEnPassant(s.to_string()))?;
                let expected_row = match side_to_move {
                    Color::White => 2,
                    Color::Black => 5,
                };
                if sq.row() != expected_row || !passed_pawn_behind(&board, sq, side_to_move) {
                    return Err(SetupError::IllegalEnPassant(s.to_string()));
                }
                Some(sq)
            }
        };

        let halfmove_clock = match parts.get(4) {
            Some(s) => s
                .parse()
                .map_err(|_| SetupError::IllegalBoardState(s.to_string()))?,
            None => 0,
        };
        let fullmove = match parts.get(5) {
            Some(s) => s
                .parse()
                .map_err(|_| SetupError::IllegalBoardState(s.to_string()))?,
            None => 1,
        };

        Ok(Position {
            board,
            side_to_move,
            en_passant,
            halfmove_clock,
            fullmove,
        })
    }

    /// Returns the FEN representation of this position.
    pub fn to_fen(&self) -> String {
        let board = board_to_string(&self.board, |pc| pc.to_char().to_string());
        let side = match self.side_to_move {
            Color::White => "w",
            Color::Black => "b",
        };

        let rights: String = [
            (Color::White, CastleSide::King, 'K'),
            (Color::White, CastleSide::Queen, 'Q'),
            (Color::Black, CastleSide::King, 'k'),
            (Color::Black, CastleSide::Queen, 'q'),
        ]
        .iter()
        .filter(|(c, side, _)| self.has_castling_right(*c, *side))
        .map(|(_, _, ch)| *ch)
        .collect();
        let rights = if rights.is_empty() { "-".to_string() } else { rights };

        let ep = self
            .en_passant
            .map(|sq| position_to_notation(Variant::Chess, sq))
            .unwrap_or_else(|| "-".to_string());

        [
            board,
            side.to_string(),
            rights,
            ep,
            self.halfmove_clock.to_string(),
            self.fullmove.to_string(),
        ]
        .iter()
        .join(" ")
    }

    /// Returns true if king and rook on `side` are both unmoved on their home squares.
    pub fn has_castling_right(&self, c: Color, side: CastleSide) -> bool {
        let row = home_row(c);
        let rook_col = match side {
            CastleSide::King => 7,
            CastleSide::Queen => 0,
        };
        let unmoved = |col: u8, pt: PieceType| {
            matches!(
                self.board.piece_at(Square::new(row, col)),
                Some(pc) if pc.piece_type == pt && pc.color == c && !pc.has_moved
            )
        };
        unmoved(KING_START_COL, PieceType::King) && unmoved(rook_col, PieceType::Rook)
    }

    // =========================================================================
    // Legality
    // =========================================================================

    /// Returns the legal destinations of the piece on `from`.
    pub fn destinations_from(&self, from: Square) -> Vec<Square> {
        self.legal_moves_from(Origin::Board(from))
            .into_iter()
            .map(|mv| mv.to)
            .unique()
            .collect()
    }

    /// Checks everything but geometry: castling conditions and king safety.
    fn is_safe(&self, mv: &Move) -> bool {
        let pc = match self.board.piece_at(mv.from) {
            Some(pc) => pc,
            None => return false,
        };
        let mover = pc.color;
        let opponent = mover.flip();

        if is_castling(pc, mv) {
            if self.is_attacked_by(mv.from, opponent) {
                return false;
            }
            let step = if mv.to.col() > mv.from.col() { 1 } else { -1 };
            match self.board.shift(mv.from, 0, step) {
                Some(transit) if !self.is_attacked_by(transit, opponent) => {}
                _ => return false,
            }
        }

        let mut scratch = self.clone();
        scratch.apply(*mv);
        !scratch.in_check(mover)
    }

    /// Expands a geometric destination into moves, one per promotion choice.
    fn push_moves(&self, from: Square, to: Square, pc: Piece, moves: &mut Vec<Move>) {
        if pc.piece_type == PieceType::Pawn && to.row() == promotion_row(pc.color) {
            for pt in PROMOTION_TYPES {
                moves.push(Move {
                    from,
                    to,
                    promotion: Some(pt),
                });
            }
        } else {
            moves.push(Move::new(from, to));
        }
    }

    // =========================================================================
    // Move execution
    // =========================================================================

    /// Applies a move without any legality check.
    fn apply(&mut self, mv: Move) -> MoveRecord {
        let pc = match self.board.piece_at(mv.from) {
            Some(pc) => pc,
            None => unreachable!("apply called without a piece on {}", mv.from),
        };

        let mut captured = self.board.piece_at(mv.to);
        let mut en_passant = false;
        let mut castling = None;

        if pc.piece_type == PieceType::Pawn
            && captured.is_none()
            && mv.from.col() != mv.to.col()
            && Some(mv.to) == self.en_passant
        {
            let passed = Square::new(mv.from.row(), mv.to.col());
            captured = self.board.piece_at(passed);
            self.board.set_piece(passed, None);
            en_passant = true;
        }

        if is_castling(pc, &mv) {
            let (rook_from, rook_to, side) = if mv.to.col() > mv.from.col() {
                (7, mv.to.col() - 1, CastleSide::King)
            } else {
                (0, mv.to.col() + 1, CastleSide::Queen)
            };
            let rook = self.board.piece_at(Square::new(mv.from.row(), rook_from));
            self.board.set_piece(Square::new(mv.from.row(), rook_from), None);
            self.board
                .set_piece(Square::new(mv.from.row(), rook_to), rook.map(Piece::moved));
            castling = Some(side);
        }

        let placed = match mv.promotion {
            Some(pt) if pc.piece_type == PieceType::Pawn => Piece::new(pt, pc.color).moved(),
            _ => pc.moved(),
        };

        self.board.set_piece(mv.from, None);
        self.board.set_piece(mv.to, Some(placed));

        self.en_passant = if pc.piece_type == PieceType::Pawn
            && mv.from.row().abs_diff(mv.to.row()) == 2
        {
            self.board.shift(mv.from, pc.color.forward(), 0)
        } else {
            None
        };

        if pc.piece_type == PieceType::Pawn || captured.is_some() {
            self.halfmove_clock = 0;
        } else {
            self.halfmove_clock = self.halfmove_clock.saturating_add(1);
        }
        if pc.color == Color::Black {
            self.fullmove = self.fullmove.saturating_add(1);
        }
        self.side_to_move = pc.color.flip();

        MoveRecord {
            from: mv.from,
            to: mv.to,
            piece: pc,
            captured,
            castling,
            en_passant,
            promotion: if placed.piece_type != pc.piece_type {
                Some(placed.piece_type)
            } else {
                None
            },
        }
    }
}

fn is_castling(pc: Piece, mv: &Move) -> bool {
    pc.piece_type == PieceType::King && mv.from.col().abs_diff(mv.to.col()) == 2
}

/// Marks kings and rooks as moved when the castling field does not grant them a right.
/// Returns true if an en passant target on `target` matches a double step
/// just played by the opponent of `side_to_move`: the target and the start
/// square are empty and an enemy pawn stands on the passed square.
fn passed_pawn_behind(board: &Board, target: Square, side_to_move: Color) -> bool {
    let opponent = side_to_move.flip();
    let forward = opponent.forward() as i16;
    let (row, col) = (target.row() as i16, target.col() as i16);

    let pawn = Piece::new(PieceType::Pawn, opponent).moved();
    board.get(row, col).is_none()
        && board.get(row - forward, col).is_none()
        && board.get(row + forward, col) == Some(pawn)
}

fn apply_castling_rights(board: &mut Board, rights: &str) {
    for c in Color::iter() {
        let row = home_row(c);
        let (king_char, queen_char) = match c {
            Color::White => ('K', 'Q'),
            Color::Black => ('k', 'q'),
        };
        let king_side = rights.contains(king_char);
        let queen_side = rights.contains(queen_char);

        for (sq, pc) in board.pieces_of(c).collect::<Vec<_>>() {
            let unmoved = match pc.piece_type {
                PieceType::King => {
                    (king_side || queen_side) && sq == Square::new(row, KING_START_COL)
                }
                PieceType::Rook => {
                    (king_side && sq == Square::new(row, 7))
                        || (queen_side && sq == Square::new(row, 0))
                }
                PieceType::Pawn => sq.row() == pawn_start_row(c),
                _ => true,
            };
            if !unmoved {
                board.set_piece(sq, Some(pc.moved()));
            }
        }
    }
}

impl PositionT for Position {
    type PieceType = PieceType;
    type Piece = Piece;
    type Move = Move;
    type Record = MoveRecord;

    const VARIANT: Variant = Variant::Chess;

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
        match self.find_king(c) {
            Some(king_sq) => self.is_attacked_by(king_sq, c.flip()),
            None => false,
        }
    }

    fn legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::new();

        for (from, pc) in self.board.pieces_of(self.side_to_move) {
            for to in movegen::destinations(&self.board, self.en_passant, from) {
                self.push_moves(from, to, pc, &mut moves);
            }
        }

        moves.retain(|mv| self.is_safe(mv));
        moves
    }

    fn legal_moves_from(&self, origin: Origin<PieceType>) -> Vec<Move> {
        let from = match origin {
            Origin::Board(sq) => sq,
            Origin::Hand(_) => return Vec::new(),
        };
        let pc = match self.board.piece_at(from) {
            Some(pc) if pc.color == self.side_to_move => pc,
            _ => return Vec::new(),
        };

        let mut moves = Vec::new();
        for to in movegen::destinations(&self.board, self.en_passant, from) {
            self.push_moves(from, to, pc, &mut moves);
        }
        moves.retain(|mv| self.is_safe(mv));
        moves
    }

    fn resolve_move(
        &self,
        origin: Origin<PieceType>,
        to: Square,
        promotion: Option<PieceType>,
    ) -> Result<Move, MoveError> {
        let from = match origin {
            Origin::Board(sq) => sq,
            Origin::Hand(_) => return Err(MoveError::DropNotAllowed(Variant::Chess)),
        };
        for sq in [from, to] {
            if !self.board.contains(sq) {
                return Err(MoveError::OutOfBounds(sq));
            }
        }

        let pc = self.board.piece_at(from).ok_or(MoveError::NoPiece(from))?;
        if pc.color != self.side_to_move {
            return Err(MoveError::NotYourTurn(from, self.side_to_move));
        }
        if !movegen::destinations(&self.board, self.en_passant, from).contains(&to) {
            return Err(MoveError::Unreachable { from, to });
        }

        let promotes = pc.piece_type == PieceType::Pawn && to.row() == promotion_row(pc.color);
        let promotion = match (promotes, promotion) {
            (true, None) => Some(PieceType::Queen),
            (true, Some(pt)) if pt.is_promotion_target() => Some(pt),
            (false, None) => None,
            _ => return Err(MoveError::InvalidPromotion),
        };

        let mv = Move {
            from,
            to,
            promotion,
        };
        if !self.is_safe(&mv) {
            return Err(MoveError::InCheck);
        }
        Ok(mv)
    }

    fn make_move(&self, mv: Move) -> Result<(Self, MoveRecord), MoveError> {
        let mv = self.resolve_move(Origin::Board(mv.from), mv.to, mv.promotion)?;
        let mut next = self.clone();
        let record = next.apply(mv);
        Ok((next, record))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.board)?;
        writeln!(f, "{} to move", Variant::Chess.side_name(self.side_to_move))
    }
}
