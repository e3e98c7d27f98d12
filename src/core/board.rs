//! Generic fixed-size piece grid shared by all variants.

use std::fmt;

use crate::traits::PieceT;

use super::color::Color;
use super::square::Square;

/// Fixed-size grid of optional pieces.
///
/// The dimensions are const generic parameters:
/// - `R`: number of rows
/// - `C`: number of columns
///
/// Out-of-bounds reads return `None` and out-of-bounds writes are silently
/// ignored. What-if simulations rely on that, so none of the accessors panics.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Board<P, const R: u8, const C: u8> {
    cells: Vec<Option<P>>,
}

impl<P: PieceT, const R: u8, const C: u8> Board<P, R, C> {
    /// Number of rows.
    pub const ROWS: u8 = R;

    /// Number of columns.
    pub const COLS: u8 = C;

    /// Total number of cells.
    pub const NUM_SQUARES: usize = (R as usize) * (C as usize);

    /// Creates an empty board.
    pub fn empty() -> Self {
        Board {
            cells: vec![None; Self::NUM_SQUARES],
        }
    }

    /// Returns true if `sq` lies on this board.
    #[inline(always)]
    pub fn contains(&self, sq: Square) -> bool {
        sq.is_within(R, C)
    }

    /// Returns the piece at the given square, or `None` for an empty or
    /// out-of-bounds square.
    pub fn piece_at(&self, sq: Square) -> Option<P> {
        if !self.contains(sq) {
            return None;
        }
        self.cells[sq.index(C)]
    }

    /// Returns the piece at signed coordinates, or `None` when empty or off the board.
    pub fn get(&self, row: i16, col: i16) -> Option<P> {
        Square::checked(row, col, R, C).and_then(|sq| self.piece_at(sq))
    }

    /// Places (or clears) a piece. Out-of-bounds squares are ignored.
    pub fn set_piece(&mut self, sq: Square, pc: Option<P>) {
        if self.contains(sq) {
            self.cells[sq.index(C)] = pc;
        }
    }

    /// Places (or clears) a piece at signed coordinates. Off-board coordinates are ignored.
    pub fn set(&mut self, row: i16, col: i16, pc: Option<P>) {
        if let Some(sq) = Square::checked(row, col, R, C) {
            self.set_piece(sq, pc);
        }
    }

    /// Returns `sq` moved by the given deltas if the result is on the board.
    #[inline(always)]
    pub fn shift(&self, sq: Square, dr: i8, dc: i8) -> Option<Square> {
        sq.offset(dr, dc, R, C)
    }

    /// Returns true if no piece stands on `sq`.
    #[inline(always)]
    pub fn is_empty_at(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    /// Returns every square of the board in row-major order.
    pub fn squares(&self) -> impl Iterator<Item = Square> {
        Square::iter(R, C)
    }

    /// Returns every occupied square together with its piece.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, P)> + '_ {
        self.squares()
            .filter_map(move |sq| self.piece_at(sq).map(|pc| (sq, pc)))
    }

    /// Returns the pieces of one color.
    pub fn pieces_of(&self, c: Color) -> impl Iterator<Item = (Square, P)> + '_ {
        self.pieces().filter(move |(_, pc)| pc.color() == c)
    }

    /// Finds the first square whose piece matches `pred`.
    pub fn find(&self, pred: impl Fn(&P) -> bool) -> Option<Square> {
        self.pieces().find(|(_, pc)| pred(pc)).map(|(sq, _)| sq)
    }

    /// Returns true if `sq` holds a piece of color `c`.
    pub fn is_color_at(&self, sq: Square, c: Color) -> bool {
        self.piece_at(sq).is_some_and(|pc| pc.color() == c)
    }

    /// Single-step destinations: every offset that lands on the board on an
    /// empty square or an enemy piece.
    pub fn step_targets(&self, from: Square, color: Color, offsets: &[(i8, i8)]) -> Vec<Square> {
        offsets
            .iter()
            .filter_map(|&(dr, dc)| self.shift(from, dr, dc))
            .filter(|&to| !self.is_color_at(to, color))
            .collect()
    }

    /// Sliding destinations: walks each direction until blocked, including the
    /// blocking square only when it holds an enemy piece.
    pub fn slide_targets(&self, from: Square, color: Color, dirs: &[(i8, i8)]) -> Vec<Square> {
        let mut targets = Vec::new();

        for &(dr, dc) in dirs {
            let mut current = from;
            while let Some(to) = self.shift(current, dr, dc) {
                match self.piece_at(to) {
                    Some(pc) => {
                        if pc.color() != color {
                            targets.push(to);
                        }
                        break;
                    }
                    None => {
                        targets.push(to);
                        current = to;
                    }
                }
            }
        }

        targets
    }
}

impl<P: PieceT, const R: u8, const C: u8> Default for Board<P, R, C> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<P: PieceT, const R: u8, const C: u8> fmt::Debug for Board<P, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Board {{")?;
        write!(f, "{}", self)?;
        write!(f, "}}")
    }
}

impl<P: PieceT, const R: u8, const C: u8> fmt::Display for Board<P, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..R {
            for col in 0..C {
                match self.piece_at(Square::new(row, col)) {
                    Some(pc) => write!(f, "{}", pc.to_char())?,
                    None => write!(f, ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
