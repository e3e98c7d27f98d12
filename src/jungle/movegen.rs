//! Move generation and capture rules for jungle chess.

use crate::core::{Color, Square};

use super::piece::{Animal, Piece};
use super::terrain::{terrain_at, Terrain};
use super::Board;

const ORTHOGONAL: [(i8, i8); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Returns true if `attacker` standing on `from` may capture `defender` on `to`.
pub(crate) fn can_capture(attacker: Piece, from: Square, defender: Piece, to: Square) -> bool {
    if attacker.color == defender.color {
        return false;
    }
    match terrain_at(from) {
        Terrain::Trap(owner) if owner != attacker.color => return false,
        _ => {}
    }
    if terrain_at(to) == Terrain::Trap(attacker.color) {
        return true;
    }

    match (attacker.animal, defender.animal) {
        (Animal::Rat, Animal::Elephant) => true,
        (Animal::Elephant, Animal::Rat) => false,
        (a, d) => a.rank() >= d.rank(),
    }
}

/// Returns true if `pc` may end its move on `to`, capturing whatever stands there.
fn can_land(board: &Board, pc: Piece, from: Square, to: Square) -> bool {
    match terrain_at(to) {
        Terrain::Den(owner) if owner == pc.color => return false,
        Terrain::Water if !pc.animal.can_swim() => return false,
        _ => {}
    }
    match board.piece_at(to) {
        Some(defender) => can_capture(pc, from, defender, to),
        None => true,
    }
}

/// Landing square of a lion or tiger leaping from `from` across the water in
/// direction `(dr, dc)`, if the leap is open.
fn leap(board: &Board, from: Square, dr: i8, dc: i8) -> Option<Square> {
    let mut current = board.shift(from, dr, dc)?;
    if !terrain_at(current).is_water() {
        return None;
    }
    while terrain_at(current).is_water() {
        if !board.is_empty_at(current) {
            return None;
        }
        current = board.shift(current, dr, dc)?;
    }
    Some(current)
}

/// Returns the squares the piece on `from` can move to.
pub(crate) fn destinations(board: &Board, from: Square) -> Vec<Square> {
    let pc = match board.piece_at(from) {
        Some(pc) => pc,
        None => return Vec::new(),
    };

    let mut targets = Vec::new();
    for &(dr, dc) in ORTHOGONAL.iter() {
        let to = match board.shift(from, dr, dc) {
            Some(to) if terrain_at(to).is_water() && pc.animal.can_jump() => {
                match leap(board, from, dr, dc) {
                    Some(landing) => landing,
                    None => continue,
                }
            }
            Some(to) => to,
            None => continue,
        };
        if can_land(board, pc, from, to) {
            targets.push(to);
        }
    }
    targets
}

/// Returns true if a piece of `c` stands in the opponent's den.
pub(crate) fn reached_den(board: &Board, c: Color) -> bool {
    board.is_color_at(Terrain::den(c.flip()), c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(board: &mut Board, row: u8, col: u8, animal: Animal, c: Color) {
        board.set_piece(Square::new(row, col), Some(Piece::new(animal, c)));
    }

    fn sorted(mut v: Vec<Square>) -> Vec<Square> {
        v.sort();
        v
    }

    #[test]
    fn rank_based_captures() {
        let sq = Square::new(4, 3);
        let rat = Piece::new(Animal::Rat, Color::White);
        let cat = Piece::new(Animal::Cat, Color::Black);
        let elephant = Piece::new(Animal::Elephant, Color::Black);
        let lion = Piece::new(Animal::Lion, Color::White);

        assert!(can_capture(rat, sq, elephant, sq));
        assert!(!can_capture(elephant, sq, rat, sq));
        assert!(!can_capture(rat, sq, cat, sq));
        assert!(can_capture(lion, sq, cat, sq));
        assert!(can_capture(lion, sq, Piece::new(Animal::Lion, Color::Black), sq));
    }

    #[test]
    fn trapped_defender_is_weak() {
        let rat = Piece::new(Animal::Rat, Color::White);
        let elephant = Piece::new(Animal::Elephant, Color::Black);
        let lion = Piece::new(Animal::Lion, Color::Black);

        // A lion caught in a white trap falls even to a rat.
        assert!(can_capture(rat, Square::new(8, 3), lion, Square::new(7, 3)));
        assert!(can_capture(
            Piece::new(Animal::Elephant, Color::White),
            Square::new(6, 3),
            Piece::new(Animal::Rat, Color::Black),
            Square::new(7, 3)
        ));
        // Sitting in an enemy trap, an attacker captures nothing.
        assert!(!can_capture(rat, Square::new(1, 3), elephant, Square::new(2, 3)));
    }

    #[test]
    fn only_rats_swim() {
        let mut board = Board::empty();
        place(&mut board, 6, 1, Animal::Rat, Color::White);
        place(&mut board, 6, 2, Animal::Dog, Color::White);

        assert!(destinations(&board, Square::new(6, 1)).contains(&Square::new(5, 1)));
        assert!(!destinations(&board, Square::new(6, 2)).contains(&Square::new(5, 2)));
    }

    #[test]
    fn lion_leaps_over_water() {
        let mut board = Board::empty();
        place(&mut board, 6, 1, Animal::Lion, Color::White);
        place(&mut board, 4, 0, Animal::Tiger, Color::Black);

        assert!(destinations(&board, Square::new(6, 1)).contains(&Square::new(2, 1)));
        assert_eq!(
            vec![Square::new(3, 0), Square::new(4, 3), Square::new(5, 0)],
            sorted(destinations(&board, Square::new(4, 0)))
        );

        place(&mut board, 4, 1, Animal::Rat, Color::Black);
        assert!(!destinations(&board, Square::new(6, 1)).contains(&Square::new(2, 1)));
        assert!(!destinations(&board, Square::new(4, 0)).contains(&Square::new(4, 3)));
    }

    #[test]
    fn own_den_is_closed() {
        let mut board = Board::empty();
        place(&mut board, 7, 3, Animal::Dog, Color::White);
        place(&mut board, 1, 3, Animal::Dog, Color::Black);

        assert!(!destinations(&board, Square::new(7, 3)).contains(&Square::new(8, 3)));
        assert!(destinations(&board, Square::new(1, 3)).contains(&Square::new(2, 3)));
        assert!(!destinations(&board, Square::new(1, 3)).contains(&Square::new(0, 3)));
    }

    #[test]
    fn den_reached() {
        let mut board = Board::empty();
        place(&mut board, 0, 3, Animal::Cat, Color::White);
        assert!(reached_den(&board, Color::White));
        assert!(!reached_den(&board, Color::Black));
    }
}
