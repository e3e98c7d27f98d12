//! Geometric move generation and attack detection for shogi.

use crate::core::{Color, Square};

use super::piece::PieceType;
use super::Board;

const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];
const DIAGONAL: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Depth of the promotion zone.
pub(crate) const PROMOTION_ZONE_DEPTH: u8 = 3;

/// Distance of `sq` from the far edge as seen by `c`; 0 is the last rank.
pub(crate) fn relative_row(sq: Square, c: Color) -> u8 {
    match c {
        Color::White => sq.row(),
        Color::Black => super::BOARD_SIZE - 1 - sq.row(),
    }
}

pub(crate) fn in_promotion_zone(sq: Square, c: Color) -> bool {
    relative_row(sq, c) < PROMOTION_ZONE_DEPTH
}

/// Returns true if a piece of type `pt` standing on `sq` could never move again.
pub(crate) fn is_dead_square(pt: PieceType, sq: Square, c: Color) -> bool {
    match pt {
        PieceType::Pawn | PieceType::Lance => relative_row(sq, c) == 0,
        PieceType::Knight => relative_row(sq, c) <= 1,
        _ => false,
    }
}

/// Step offsets (row, col) for stepping pieces and for the extra steps of
/// horse and dragon.
fn step_offsets(pt: PieceType, c: Color) -> Vec<(i8, i8)> {
    let f = c.forward();

    match pt {
        PieceType::King => vec![
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ],
        PieceType::Gold
        | PieceType::ProPawn
        | PieceType::ProLance
        | PieceType::ProKnight
        | PieceType::ProSilver => vec![(f, -1), (f, 0), (f, 1), (0, -1), (0, 1), (-f, 0)],
        PieceType::Silver => vec![(f, -1), (f, 0), (f, 1), (-f, -1), (-f, 1)],
        PieceType::Knight => vec![(2 * f, -1), (2 * f, 1)],
        PieceType::Pawn => vec![(f, 0)],
        PieceType::Horse => ORTHOGONAL.to_vec(),
        PieceType::Dragon => DIAGONAL.to_vec(),
        PieceType::Lance | PieceType::Bishop | PieceType::Rook => vec![],
    }
}

/// Sliding directions; empty for pieces that only step.
fn slide_directions(pt: PieceType, c: Color) -> Vec<(i8, i8)> {
    match pt {
        PieceType::Lance => vec![(c.forward(), 0)],
        PieceType::Bishop | PieceType::Horse => DIAGONAL.to_vec(),
        PieceType::Rook | PieceType::Dragon => ORTHOGONAL.to_vec(),
        _ => vec![],
    }
}

/// Returns the squares the piece on `from` can reach, ignoring king safety.
pub(crate) fn destinations(board: &Board, from: Square) -> Vec<Square> {
    let pc = match board.piece_at(from) {
        Some(pc) => pc,
        None => return Vec::new(),
    };

    let mut targets = board.slide_targets(from, pc.color, &slide_directions(pc.piece_type, pc.color));
    targets.extend(board.step_targets(from, pc.color, &step_offsets(pc.piece_type, pc.color)));
    targets
}

/// Returns true if `sq` is attacked by any piece of color `attacker`.
pub(crate) fn is_attacked_by(board: &Board, sq: Square, attacker: Color) -> bool {
    board
        .pieces_of(attacker)
        .any(|(from, _)| destinations(board, from).contains(&sq))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shogi::Piece;

    fn place(board: &mut Board, row: u8, col: u8, pt: PieceType, c: Color) {
        board.set_piece(Square::new(row, col), Some(Piece::new(pt, c)));
    }

    fn sorted(mut v: Vec<Square>) -> Vec<Square> {
        v.sort();
        v
    }

    #[test]
    fn gold_and_silver_patterns() {
        let mut board = Board::empty();
        place(&mut board, 4, 4, PieceType::Gold, Color::White);
        place(&mut board, 2, 2, PieceType::Silver, Color::Black);

        assert_eq!(
            vec![
                Square::new(3, 3),
                Square::new(3, 4),
                Square::new(3, 5),
                Square::new(4, 3),
                Square::new(4, 5),
                Square::new(5, 4),
            ],
            sorted(destinations(&board, Square::new(4, 4)))
        );
        assert_eq!(
            vec![
                Square::new(1, 1),
                Square::new(1, 3),
                Square::new(3, 1),
                Square::new(3, 2),
                Square::new(3, 3),
            ],
            sorted(destinations(&board, Square::new(2, 2)))
        );
    }

    #[test]
    fn knight_jumps_forward() {
        let mut board = Board::empty();
        place(&mut board, 8, 1, PieceType::Knight, Color::White);
        place(&mut board, 7, 1, PieceType::Pawn, Color::White);
        assert_eq!(
            vec![Square::new(6, 0), Square::new(6, 2)],
            sorted(destinations(&board, Square::new(8, 1)))
        );
    }

    #[test]
    fn lance_slides_forward_only() {
        let mut board = Board::empty();
        place(&mut board, 0, 0, PieceType::Lance, Color::Black);
        place(&mut board, 3, 0, PieceType::Pawn, Color::White);
        assert_eq!(
            vec![Square::new(1, 0), Square::new(2, 0), Square::new(3, 0)],
            destinations(&board, Square::new(0, 0))
        );
    }

    #[test]
    fn dragon_slides_and_steps() {
        let mut board = Board::empty();
        place(&mut board, 4, 4, PieceType::Dragon, Color::White);
        let targets = destinations(&board, Square::new(4, 4));
        assert_eq!(16 + 4, targets.len());
        assert!(targets.contains(&Square::new(3, 3)));
        assert!(!targets.contains(&Square::new(2, 2)));
    }

    #[test]
    fn zone_and_dead_squares() {
        assert!(in_promotion_zone(Square::new(2, 0), Color::White));
        assert!(!in_promotion_zone(Square::new(3, 0), Color::White));
        assert!(in_promotion_zone(Square::new(6, 0), Color::Black));

        assert!(is_dead_square(PieceType::Pawn, Square::new(0, 4), Color::White));
        assert!(is_dead_square(PieceType::Knight, Square::new(7, 4), Color::Black));
        assert!(!is_dead_square(PieceType::Knight, Square::new(2, 4), Color::White));
        assert!(!is_dead_square(PieceType::Gold, Square::new(0, 4), Color::White));
    }
}
