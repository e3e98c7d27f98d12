//! Geometric move generation and attack detection for chess.
//!
//! Nothing here checks whether the mover's king ends up attacked; that is the
//! job of [`Position`](super::Position).

use crate::core::{Color, Square};

use super::piece::{Piece, PieceType};
use super::Board;

pub(crate) const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
pub(crate) const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
pub(crate) const ALL_DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Column of the king before castling.
pub(crate) const KING_START_COL: u8 = 4;

/// Row on which pawns of `c` start.
pub(crate) fn pawn_start_row(c: Color) -> u8 {
    match c {
        Color::White => 6,
        Color::Black => 1,
    }
}

/// Row on which pawns of `c` promote.
pub(crate) fn promotion_row(c: Color) -> u8 {
    match c {
        Color::White => 0,
        Color::Black => 7,
    }
}

/// Back rank of `c`.
pub(crate) fn home_row(c: Color) -> u8 {
    match c {
        Color::White => 7,
        Color::Black => 0,
    }
}

/// Destinations reachable by the piece on `from`, ignoring self-check.
///
/// Castling candidates are included whenever king and rook are unmoved and the
/// squares between them are empty; whether the king crosses attacked squares is
/// decided by the caller.
pub(crate) fn destinations(board: &Board, en_passant: Option<Square>, from: Square) -> Vec<Square> {
    let pc = match board.piece_at(from) {
        Some(pc) => pc,
        None => return Vec::new(),
    };

    match pc.piece_type {
        PieceType::Pawn => pawn_destinations(board, en_passant, from, pc),
        PieceType::King => {
            let mut targets = board.step_targets(from, pc.color, &ALL_DIRECTIONS);
            targets.extend(castling_destinations(board, from, pc));
            targets
        }
        _ => piece_reach(board, from, pc),
    }
}

/// Squares a non-pawn piece reaches by its normal movement, with no castling.
fn piece_reach(board: &Board, from: Square, pc: Piece) -> Vec<Square> {
    match pc.piece_type {
        PieceType::Knight => board.step_targets(from, pc.color, &KNIGHT_OFFSETS),
        PieceType::Bishop => board.slide_targets(from, pc.color, &DIAGONAL),
        PieceType::Rook => board.slide_targets(from, pc.color, &ORTHOGONAL),
        PieceType::Queen => board.slide_targets(from, pc.color, &ALL_DIRECTIONS),
        PieceType::King => board.step_targets(from, pc.color, &ALL_DIRECTIONS),
        PieceType::Pawn => Vec::new(),
    }
}

fn pawn_destinations(
    board: &Board,
    en_passant: Option<Square>,
    from: Square,
    pc: Piece,
) -> Vec<Square> {
    let mut targets = Vec::new();
    let forward = pc.color.forward();

    if let Some(one) = board.shift(from, forward, 0) {
        if board.is_empty_at(one) {
            targets.push(one);

            if !pc.has_moved && from.row() == pawn_start_row(pc.color) {
                if let Some(two) = board.shift(one, forward, 0) {
                    if board.is_empty_at(two) {
                        targets.push(two);
                    }
                }
            }
        }
    }

    for dc in [-1, 1] {
        if let Some(to) = board.shift(from, forward, dc) {
            if board.is_color_at(to, pc.color.flip()) || Some(to) == en_passant {
                targets.push(to);
            }
        }
    }

    targets
}

/// Castling candidates: the two-square king moves whose rook and path allow it.
fn castling_destinations(board: &Board, from: Square, king: Piece) -> Vec<Square> {
    if king.has_moved || from.row() != home_row(king.color) || from.col() != KING_START_COL {
        return Vec::new();
    }

    let mut targets = Vec::new();
    for (rook_col, step) in [(7u8, 1i8), (0u8, -1i8)] {
        let rook_sq = Square::new(from.row(), rook_col);
        let rook_ok = matches!(
            board.piece_at(rook_sq),
            Some(Piece { piece_type: PieceType::Rook, color, has_moved: false }) if color == king.color
        );
        if !rook_ok {
            continue;
        }

        let (lo, hi) = if rook_col > from.col() {
            (from.col() + 1, rook_col)
        } else {
            (rook_col + 1, from.col())
        };
        let path_clear = (lo..hi).all(|col| board.is_empty_at(Square::new(from.row(), col)));

        if path_clear {
            if let Some(to) = board.shift(from, 0, 2 * step) {
                targets.push(to);
            }
        }
    }

    targets
}

/// Squares attacked by the piece on `from`.
///
/// Pawns attack diagonally forward whatever stands there and kings attack
/// their neighbours; castling and pawn pushes never attack.
pub(crate) fn attacks(board: &Board, from: Square, pc: Piece) -> Vec<Square> {
    match pc.piece_type {
        PieceType::Pawn => [-1, 1]
            .iter()
            .filter_map(|&dc| board.shift(from, pc.color.forward(), dc))
            .collect(),
        _ => piece_reach(board, from, pc),
    }
}

/// Returns true if any piece of `attacker` attacks `sq`.
pub(crate) fn is_attacked_by(board: &Board, sq: Square, attacker: Color) -> bool {
    board
        .pieces_of(attacker)
        .any(|(from, pc)| attacks(board, from, pc).contains(&sq))
}
