//! Square and move notation for every variant.
//!
//! | Variant | Files | Ranks | Example |
//! |---------|-------|-------|---------|
//! | Chess   | `a`–`h` (left to right) | `1`–`8` (bottom to top) | `e4` |
//! | Xiangqi | `a`–`i` (left to right) | `1`–`10` (bottom to top) | `e10` |
//! | Shogi   | `1`–`9` (right to left) | `a`–`i` (top to bottom) | `7f` |
//! | Jungle  | `a`–`g` (left to right) | `1`–`9` (bottom to top) | `d1` |
//!
//! Moves are written as two squares, optionally followed by a promotion
//! suffix. Shogi drops use `*` in place of the origin square, preceded by the
//! piece letter (`P*5e`).

use crate::core::{NotationError, Square, Variant};

/// Returns the file labels of a variant, ordered by column.
pub fn files(variant: Variant) -> Vec<String> {
    (0..variant.cols()).map(|col| file_label(variant, col)).collect()
}

/// Returns the rank labels of a variant, ordered by row.
pub fn ranks(variant: Variant) -> Vec<String> {
    (0..variant.rows()).map(|row| rank_label(variant, row)).collect()
}

fn file_label(variant: Variant, col: u8) -> String {
    match variant {
        Variant::Shogi => (variant.cols() - col).to_string(),
        _ => ((b'a' + col) as char).to_string(),
    }
}

fn rank_label(variant: Variant, row: u8) -> String {
    match variant {
        Variant::Shogi => ((b'a' + row) as char).to_string(),
        _ => (variant.rows() - row).to_string(),
    }
}

/// Formats a square in the notation of `variant`.
///
/// The square must be on the board; out-of-bounds squares are rendered as `?`.
///
/// # Examples
///
/// ```
/// use boardrules::{notation, Square, Variant};
///
/// assert_eq!("e2", notation::position_to_notation(Variant::Chess, Square::new(6, 4)));
/// assert_eq!("7g", notation::position_to_notation(Variant::Shogi, Square::new(6, 2)));
/// ```
pub fn position_to_notation(variant: Variant, sq: Square) -> String {
    if !sq.is_within(variant.rows(), variant.cols()) {
        return "?".to_string();
    }

    format!(
        "{}{}",
        file_label(variant, sq.col()),
        rank_label(variant, sq.row())
    )
}

/// Parses a square written in the notation of `variant`.
///
/// Malformed or out-of-range input is rejected; nothing is coerced.
pub fn notation_to_position(variant: Variant, s: &str) -> Result<Square, NotationError> {
    let mut chars = s.chars();
    let first = chars.next().ok_or(NotationError::Empty)?;
    let rest = chars.as_str();

    let invalid_file = || NotationError::InvalidFile {
        file: first.to_string(),
        variant,
    };
    let invalid_rank = || NotationError::InvalidRank {
        rank: rest.to_string(),
        variant,
    };

    match variant {
        Variant::Shogi => {
            let file = first.to_digit(10).ok_or_else(invalid_file)? as u8;
            if file == 0 || file > variant.cols() {
                return Err(invalid_file());
            }
            let mut rank_chars = rest.chars();
            let rank = match (rank_chars.next(), rank_chars.next()) {
                (Some(c @ 'a'..='z'), None) => c as u8 - b'a',
                _ => return Err(invalid_rank()),
            };
            if rank >= variant.rows() {
                return Err(invalid_rank());
            }
            Ok(Square::new(rank, variant.cols() - file))
        }
        _ => {
            if !first.is_ascii_lowercase() {
                return Err(invalid_file());
            }
            let col = first as u8 - b'a';
            if col >= variant.cols() {
                return Err(invalid_file());
            }
            if rest.is_empty() || rest.starts_with('0') || !rest.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid_rank());
            }
            let rank: u8 = rest.parse().map_err(|_| invalid_rank())?;
            if rank == 0 || rank > variant.rows() {
                return Err(invalid_rank());
            }
            Ok(Square::new(variant.rows() - rank, col))
        }
    }
}

/// Origin of a move as written in notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginText {
    /// A board square.
    Square(Square),
    /// A drop of the piece with the given letter (`P*5e`).
    Drop(char),
}

/// The components of a move string, before any variant-specific interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveText {
    pub from: OriginText,
    pub to: Square,
    /// Trailing promotion marker (`q` in `e7e8q`, `+` in `7g7f+`).
    pub suffix: Option<char>,
}

/// Splits a move string into origin, destination and promotion suffix.
///
/// # Examples
///
/// ```
/// use boardrules::notation::{parse_move, OriginText};
/// use boardrules::{Square, Variant};
///
/// let mv = parse_move(Variant::Xiangqi, "h3h10").unwrap();
/// assert_eq!(OriginText::Square(Square::new(7, 7)), mv.from);
/// assert_eq!(Square::new(0, 7), mv.to);
///
/// let drop = parse_move(Variant::Shogi, "P*5e").unwrap();
/// assert_eq!(OriginText::Drop('P'), drop.from);
/// ```
pub fn parse_move(variant: Variant, s: &str) -> Result<MoveText, NotationError> {
    if s.is_empty() {
        return Err(NotationError::Empty);
    }
    let invalid = || NotationError::InvalidMove(s.to_string());

    if let Some((piece, to)) = s.split_once('*') {
        let mut piece_chars = piece.chars();
        let letter = match (piece_chars.next(), piece_chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => c,
            _ => return Err(invalid()),
        };
        let to = notation_to_position(variant, to)?;
        return Ok(MoveText {
            from: OriginText::Drop(letter),
            to,
            suffix: None,
        });
    }

    let (from_str, rest) = split_square(variant, s).ok_or_else(invalid)?;
    let (to_str, suffix_str) = split_square(variant, rest).ok_or_else(invalid)?;

    let mut suffix_chars = suffix_str.chars();
    let suffix = match (suffix_chars.next(), suffix_chars.next()) {
        (None, _) => None,
        (Some(c), None) => Some(c),
        _ => return Err(invalid()),
    };

    Ok(MoveText {
        from: OriginText::Square(notation_to_position(variant, from_str)?),
        to: notation_to_position(variant, to_str)?,
        suffix,
    })
}

/// Splits the leading square token off `s`.
fn split_square(variant: Variant, s: &str) -> Option<(&str, &str)> {
    let bytes = s.as_bytes();
    let len = match variant {
        // digit file + letter rank
        Variant::Shogi => 2,
        // letter file + 1 or 2 digit rank
        _ => {
            let digits = bytes
                .iter()
                .skip(1)
                .take_while(|b| b.is_ascii_digit())
                .count();
            if digits == 0 || digits > 2 {
                return None;
            }
            1 + digits
        }
    };

    if bytes.len() < len || !s.is_char_boundary(len) {
        return None;
    }
    Some(s.split_at(len))
}
