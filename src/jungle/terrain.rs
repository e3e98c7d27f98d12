//! The static terrain of the jungle board.

use crate::core::{Color, Square};

/// Represents the kind of a cell.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Terrain {
    Normal,
    Water,
    /// A trap next to the den of the given side.
    Trap(Color),
    /// The den of the given side.
    Den(Color),
}

/// Returns the terrain at `sq`. Squares off the board are `Normal`.
pub fn terrain_at(sq: Square) -> Terrain {
    match (sq.row(), sq.col()) {
        (0, 3) => Terrain::Den(Color::Black),
        (8, 3) => Terrain::Den(Color::White),
        (0, 2) | (0, 4) | (1, 3) => Terrain::Trap(Color::Black),
        (8, 2) | (8, 4) | (7, 3) => Terrain::Trap(Color::White),
        (3..=5, 1 | 2 | 4 | 5) => Terrain::Water,
        _ => Terrain::Normal,
    }
}

impl Terrain {
    pub fn is_water(self) -> bool {
        self == Terrain::Water
    }

    /// Returns the den square of `c`.
    pub fn den(c: Color) -> Square {
        match c {
            Color::White => Square::new(8, 3),
            Color::Black => Square::new(0, 3),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout() {
        let counts = Square::iter(9, 7).fold([0; 4], |mut acc, sq| {
            let i = match terrain_at(sq) {
                Terrain::Normal => 0,
                Terrain::Water => 1,
                Terrain::Trap(_) => 2,
                Terrain::Den(_) => 3,
            };
            acc[i] += 1;
            acc
        });
        assert_eq!([63 - 12 - 6 - 2, 12, 6, 2], counts);
    }

    #[test]
    fn dens_and_traps() {
        assert_eq!(Terrain::Den(Color::White), terrain_at(Terrain::den(Color::White)));
        assert_eq!(Terrain::Trap(Color::Black), terrain_at(Square::new(1, 3)));
        assert_eq!(Terrain::Water, terrain_at(Square::new(4, 5)));
        assert_eq!(Terrain::Normal, terrain_at(Square::new(4, 3)));
    }
}
