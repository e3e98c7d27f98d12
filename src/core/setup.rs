//! Helpers for FEN-style board strings.
//!
//! Every variant describes its start position with the same board layout: ranks
//! from the top row down separated by `/`, a digit for a run of empty cells, one
//! letter per piece (uppercase for white) and an optional `+` prefix for
//! promoted pieces.

use itertools::Itertools;

use crate::traits::PieceT;

use super::board::Board;
use super::color::Color;
use super::error::SetupError;
use super::square::Square;

/// Parses the board field of a setup string.
///
/// `piece` receives each piece letter and whether it was prefixed with `+`.
pub(crate) fn parse_board<P: PieceT, const R: u8, const C: u8>(
    s: &str,
    piece: impl Fn(char, bool) -> Option<P>,
) -> Result<Board<P, R, C>, SetupError> {
    let rows: Vec<&str> = s.split('/').collect();
    if rows.len() != R as usize {
        return Err(SetupError::IllegalBoardState(format!(
            "expected {} rows, found {}",
            R,
            rows.len()
        )));
    }

    let mut board = Board::empty();
    for (row, row_str) in rows.iter().enumerate() {
        let mut col = 0u8;
        let mut promoted = false;

        for c in row_str.chars() {
            if let Some(n) = c.to_digit(10) {
                if promoted || n == 0 {
                    return Err(SetupError::IllegalBoardState(row_str.to_string()));
                }
                col += n as u8;
            } else if c == '+' {
                promoted = true;
                continue;
            } else {
                let pc = piece(c, promoted).ok_or(SetupError::IllegalPieceType(c))?;
                if col >= C {
                    return Err(SetupError::IllegalBoardState(row_str.to_string()));
                }
                board.set_piece(Square::new(row as u8, col), Some(pc));
                col += 1;
                promoted = false;
            }

            if col > C {
                return Err(SetupError::IllegalBoardState(row_str.to_string()));
            }
        }

        if col != C || promoted {
            return Err(SetupError::IllegalBoardState(row_str.to_string()));
        }
    }

    Ok(board)
}

/// Renders a board into the setup layout understood by [`parse_board`].
pub(crate) fn board_to_string<P: PieceT, const R: u8, const C: u8>(
    board: &Board<P, R, C>,
    piece: impl Fn(&P) -> String,
) -> String {
    (0..R)
        .map(|row| {
            let mut s = String::new();
            let mut empty = 0;
            for col in 0..C {
                match board.piece_at(Square::new(row, col)) {
                    Some(pc) => {
                        if empty > 0 {
                            s.push_str(&empty.to_string());
                            empty = 0;
                        }
                        s.push_str(&piece(&pc));
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                s.push_str(&empty.to_string());
            }
            s
        })
        .join("/")
}

/// Parses the side-to-move field given the tokens used for the first and the
/// second player.
pub(crate) fn parse_side(s: &str, first: &str, second: &str) -> Result<Color, SetupError> {
    if s == first {
        Ok(Color::White)
    } else if s == second {
        Ok(Color::Black)
    } else {
        Err(SetupError::IllegalSideToMove(s.to_string()))
    }
}

/// Checks that each side has exactly one royal piece.
pub(crate) fn check_kings<P: PieceT, const R: u8, const C: u8>(
    board: &Board<P, R, C>,
) -> Result<(), SetupError> {
    use crate::traits::PieceTypeT;

    for c in Color::iter() {
        let kings = board
            .pieces_of(c)
            .filter(|(_, pc)| pc.piece_type().is_royal())
            .count();
        if kings != 1 {
            return Err(SetupError::KingCount(c));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{Piece, PieceType};
    use crate::traits::PieceTypeT;

    fn chess_piece(c: char, promoted: bool) -> Option<Piece> {
        if promoted {
            return None;
        }
        let pt = PieceType::from_char(c)?;
        Some(Piece::new(pt, crate::traits::color_of_char(c)))
    }

    #[test]
    fn parse_and_render() {
        let s = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR";
        let board: Board<Piece, 8, 8> = parse_board(s, chess_piece).unwrap();

        assert_eq!(
            Some(Piece::new(PieceType::Pawn, Color::White)),
            board.piece_at(Square::new(4, 4))
        );
        assert_eq!(None, board.piece_at(Square::new(6, 4)));
        assert_eq!(s, board_to_string(&board, |pc| pc.to_char().to_string()));
    }

    #[test]
    fn malformed_boards() {
        let cases = [
            "8/8/8/8/8/8/8",
            "9/8/8/8/8/8/8/8",
            "7/8/8/8/8/8/8/8",
            "ppppppppp/8/8/8/8/8/8/8",
            "x7/8/8/8/8/8/8/8",
            "+p7/8/8/8/8/8/8/8",
            "08/8/8/8/8/8/8/8",
        ];

        for (i, case) in cases.iter().enumerate() {
            let res: Result<Board<Piece, 8, 8>, _> = parse_board(case, chess_piece);
            assert!(res.is_err(), "failed at #{i}");
        }
    }

    #[test]
    fn side() {
        assert_eq!(Ok(Color::White), parse_side("w", "w", "b"));
        assert_eq!(Ok(Color::Black), parse_side("b", "w", "b"));
        assert!(parse_side("x", "w", "b").is_err());
    }

    #[test]
    fn king_count() {
        let board: Board<Piece, 8, 8> =
            parse_board("k7/8/8/8/8/8/8/7K", chess_piece).unwrap();
        assert!(check_kings(&board).is_ok());

        let board: Board<Piece, 8, 8> = parse_board("8/8/8/8/8/8/8/7K", chess_piece).unwrap();
        assert_eq!(Err(SetupError::KingCount(Color::Black)), check_kings(&board));
    }
}
