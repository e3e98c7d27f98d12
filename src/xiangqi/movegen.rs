//! Geometric move generation and attack detection for xiangqi.

use crate::core::{Color, Square};

use super::piece::PieceType;
use super::Board;

const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Horse leaps paired with the leg square that must be empty.
const HORSE_LEAPS: [((i8, i8), (i8, i8)); 8] = [
    ((-2, -1), (-1, 0)),
    ((-2, 1), (-1, 0)),
    ((2, -1), (1, 0)),
    ((2, 1), (1, 0)),
    ((-1, -2), (0, -1)),
    ((1, -2), (0, -1)),
    ((-1, 2), (0, 1)),
    ((1, 2), (0, 1)),
];

/// Returns true if `sq` lies inside the palace of `c`.
pub(crate) fn in_palace(sq: Square, c: Color) -> bool {
    let rows = match c {
        Color::White => 7..=9,
        Color::Black => 0..=2,
    };
    rows.contains(&sq.row()) && (3..=5).contains(&sq.col())
}

/// Returns true if `sq` is on the opponent's side of the river for `c`.
pub(crate) fn crossed_river(sq: Square, c: Color) -> bool {
    match c {
        Color::White => sq.row() <= 4,
        Color::Black => sq.row() >= 5,
    }
}

/// Returns the squares the piece on `from` can reach, ignoring king safety.
pub(crate) fn destinations(board: &Board, from: Square) -> Vec<Square> {
    let pc = match board.piece_at(from) {
        Some(pc) => pc,
        None => return Vec::new(),
    };
    let color = pc.color;

    match pc.piece_type {
        PieceType::General => board
            .step_targets(from, color, &ORTHOGONAL)
            .into_iter()
            .filter(|&to| in_palace(to, color))
            .collect(),
        PieceType::Advisor => board
            .step_targets(from, color, &DIAGONAL)
            .into_iter()
            .filter(|&to| in_palace(to, color))
            .collect(),
        PieceType::Elephant => DIAGONAL
            .iter()
            .filter(|&&(dr, dc)| {
                board
                    .shift(from, dr, dc)
                    .is_some_and(|eye| board.is_empty_at(eye))
            })
            .filter_map(|&(dr, dc)| board.shift(from, 2 * dr, 2 * dc))
            .filter(|&to| !crossed_river(to, color) && !board.is_color_at(to, color))
            .collect(),
        PieceType::Horse => HORSE_LEAPS
            .iter()
            .filter(|&&(_, (lr, lc))| {
                board
                    .shift(from, lr, lc)
                    .is_some_and(|leg| board.is_empty_at(leg))
            })
            .filter_map(|&((dr, dc), _)| board.shift(from, dr, dc))
            .filter(|&to| !board.is_color_at(to, color))
            .collect(),
        PieceType::Chariot => board.slide_targets(from, color, &ORTHOGONAL),
        PieceType::Cannon => cannon_targets(board, from, color),
        PieceType::Soldier => board.step_targets(from, color, &soldier_offsets(from, color)),
    }
}

/// Forward step, plus sideways steps once the soldier has crossed the river.
fn soldier_offsets(from: Square, c: Color) -> Vec<(i8, i8)> {
    let mut offsets = vec![(c.forward(), 0)];
    if crossed_river(from, c) {
        offsets.extend([(0, -1), (0, 1)]);
    }
    offsets
}

/// Cannon: quiet moves like a chariot, captures by jumping exactly one screen.
fn cannon_targets(board: &Board, from: Square, color: Color) -> Vec<Square> {
    let mut targets = Vec::new();

    for &(dr, dc) in ORTHOGONAL.iter() {
        let mut current = from;
        let mut screened = false;

        while let Some(to) = board.shift(current, dr, dc) {
            match board.piece_at(to) {
                None if !screened => targets.push(to),
                None => {}
                Some(_) if !screened => screened = true,
                Some(pc) => {
                    if pc.color != color {
                        targets.push(to);
                    }
                    break;
                }
            }
            current = to;
        }
    }

    targets
}

/// Returns true if `sq` is attacked by any piece of color `attacker`.
///
/// The generals facing each other is not an attack; see [`generals_facing`].
pub(crate) fn is_attacked_by(board: &Board, sq: Square, attacker: Color) -> bool {
    board
        .pieces_of(attacker)
        .any(|(from, _)| destinations(board, from).contains(&sq))
}

/// Returns true if both generals stand on the same file with nothing between them.
pub(crate) fn generals_facing(board: &Board) -> bool {
    let general = |c: Color| {
        board.find(|pc| pc.piece_type == PieceType::General && pc.color == c)
    };
    let (black, white) = match (general(Color::Black), general(Color::White)) {
        (Some(b), Some(w)) => (b, w),
        _ => return false,
    };
    if black.col() != white.col() {
        return false;
    }

    let (top, bottom) = (black.row().min(white.row()), black.row().max(white.row()));
    (top + 1..bottom).all(|row| board.is_empty_at(Square::new(row, black.col())))
}
