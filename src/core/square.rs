use itertools::Itertools;
use std::fmt;

/// Represents a cell of a game board as a `(row, col)` pair.
///
/// Row 0 is the top edge of the board as seen by the first player
/// ([`Color::White`](crate::Color::White)), column 0 is the left edge. A `Square`
/// carries no board dimensions; whether it is on the board is always checked
/// against the variant bounds by the board that receives it.
///
/// # Examples
///
/// ```
/// use boardrules::Square;
///
/// let sq = Square::new(6, 4);
/// assert_eq!(Some(Square::new(4, 4)), sq.offset(-2, 0, 8, 8));
/// assert_eq!(None, sq.offset(2, 0, 8, 8));
/// ```
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// Creates a new instance of `Square`.
    pub const fn new(row: u8, col: u8) -> Square {
        Square { row, col }
    }

    /// Creates a square from signed coordinates, returning `None` when it falls
    /// outside a `rows`×`cols` board.
    pub fn checked(row: i16, col: i16, rows: u8, cols: u8) -> Option<Square> {
        if !(0..rows as i16).contains(&row) || !(0..cols as i16).contains(&col) {
            return None;
        }
        Some(Square::new(row as u8, col as u8))
    }

    /// Returns the row of the square (0-indexed, top first).
    #[inline(always)]
    pub fn row(self) -> u8 {
        self.row
    }

    /// Returns the column of the square (0-indexed, left first).
    #[inline(always)]
    pub fn col(self) -> u8 {
        self.col
    }

    /// Returns a new `Square` moved by the given row and column deltas, or `None`
    /// when the result leaves a `rows`×`cols` board.
    #[must_use]
    pub fn offset(self, dr: i8, dc: i8, rows: u8, cols: u8) -> Option<Square> {
        Square::checked(
            self.row as i16 + dr as i16,
            self.col as i16 + dc as i16,
            rows,
            cols,
        )
    }

    /// Returns true if the square lies on a `rows`×`cols` board.
    #[inline(always)]
    pub fn is_within(self, rows: u8, cols: u8) -> bool {
        self.row < rows && self.col < cols
    }

    /// Converts the instance into the unique number for array indexing purpose.
    #[inline(always)]
    pub fn index(self, cols: u8) -> usize {
        self.row as usize * cols as usize + self.col as usize
    }

    /// Returns every square of a `rows`×`cols` board in row-major order.
    pub fn iter(rows: u8, cols: u8) -> impl Iterator<Item = Square> {
        (0..rows)
            .cartesian_product(0..cols)
            .map(|(row, col)| Square::new(row, col))
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
