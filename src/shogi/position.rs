//! Shogi position (game state).

use itertools::Itertools;
use std::fmt;

use crate::config::{GameOptions, ShogiRules};
use crate::core::setup::{board_to_string, check_kings, parse_board, parse_side};
use crate::core::{Color, GameStatus, MoveError, SetupError, Square, Variant};
use crate::notation::position_to_notation;
use crate::traits::{color_of_char, MoveT, Origin, PieceT, PieceTypeT, PositionT};

use super::hand::Hand;
use super::movegen::{self, in_promotion_zone, is_dead_square};
use super::moves::{Move, MoveRecord};
use super::piece::{Piece, PieceType};
use super::{Board, STARTING_SFEN};

/// Represents a shogi position: board, pieces in hand and side to move, along
/// with the optional rules in force.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    board: Board,
    hand: Hand,
    side_to_move: Color,
    ply: u16,
    rules: ShogiRules,
}

impl Default for Position {
    fn default() -> Self {
        Position::startpos()
    }
}

impl Position {
    /// Creates a position with the standard starting setup.
    pub fn startpos() -> Self {
        match Position::from_sfen(STARTING_SFEN) {
            Ok(pos) => pos,
            Err(e) => unreachable!("invalid starting SFEN: {e}"),
        }
    }

    /// Returns this position with different optional rules.
    #[must_use]
    pub fn with_rules(self, rules: ShogiRules) -> Self {
        Position { rules, ..self }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the pieces in hand of both sides.
    pub fn hand(&self) -> &Hand {
        &self.hand
    }

    /// Returns the number of pieces of type `pt` in the hand of `c`.
    pub fn hand_count(&self, c: Color, pt: PieceType) -> u8 {
        self.hand.get(c, pt)
    }

    /// Returns the ply number.
    pub fn ply(&self) -> u16 {
        self.ply
    }

    pub fn rules(&self) -> ShogiRules {
        self.rules
    }

    /// Finds the king's square for the given color.
    pub fn find_king(&self, c: Color) -> Option<Square> {
        self.board
            .find(|pc| pc.piece_type == PieceType::King && pc.color == c)
    }

    // =========================================================================
    // SFEN
    // =========================================================================

    /// Creates a position from an SFEN string.
    ///
    /// Format: `lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL b - 1`.
    /// The ply number may be omitted. `b` (sente) is the first player.
    pub fn from_sfen(sfen: &str) -> Result<Self, SetupError> {
        let parts: Vec<&str> = sfen.split_whitespace().collect();
        if parts.len() < 3 {
            return Err(SetupError::MissingDataFields);
        }

        let board: Board = parse_board(parts[0], |c, promoted| {
            let pt = PieceType::from_char(c)?;
            let pt = if promoted { pt.promote()? } else { pt };
            Some(Piece::new(pt, color_of_char(c)))
        })?;
        check_kings(&board)?;
        for (sq, pc) in board.pieces() {
            if is_dead_square(pc.piece_type, sq, pc.color) {
                return Err(SetupError::IllegalBoardState(format!(
                    "{} cannot stand on {}",
                    pc,
                    position_to_notation(Variant::Shogi, sq)
                )));
            }
        }

        let side_to_move = parse_side(parts[1], "b", "w")?;
        let hand = parse_hand(parts[2])?;

        let ply = match parts.get(3) {
            Some(s) => s
                .parse()
                .map_err(|_| SetupError::IllegalBoardState(s.to_string()))?,
            None => 1,
        };

        Ok(Position {
            board,
            hand,
            side_to_move,
            ply,
            rules: ShogiRules::default(),
        })
    }

    /// Returns the SFEN representation of this position.
    pub fn to_sfen(&self) -> String {
        let side = match self.side_to_move {
            Color::White => "b",
            Color::Black => "w",
        };

        let hand: String = Color::iter()
            .flat_map(|c| {
                self.hand.pieces(c).map(move |(pt, n)| {
                    let letter = Piece::new(pt, c).to_char();
                    if n > 1 {
                        format!("{}{}", n, letter)
                    } else {
                        letter.to_string()
                    }
                })
            })
            .collect();
        let hand = if hand.is_empty() { "-".to_string() } else { hand };

        [
            board_to_string(&self.board, |pc| pc.to_sfen()),
            side.to_string(),
            hand,
            self.ply.to_string(),
        ]
        .iter()
        .join(" ")
    }

    // =========================================================================
    // Legality
    // =========================================================================

    /// Returns the legal destinations of the piece on `from`.
    pub fn destinations_from(&self, from: Square) -> Vec<Square> {
        self.legal_moves_from(Origin::Board(from))
            .into_iter()
            .map(|mv| mv.to())
            .unique()
            .collect()
    }

    /// Returns the squares a piece of type `pt` can be dropped on.
    pub fn drop_squares(&self, pt: PieceType) -> Vec<Square> {
        self.legal_moves_from(Origin::Hand(pt))
            .into_iter()
            .map(|mv| mv.to())
            .collect()
    }

    /// Drop restrictions other than king safety.
    fn check_drop(&self, pt: PieceType, to: Square) -> Result<(), MoveError> {
        let side = self.side_to_move;

        if !self.board.is_empty_at(to) {
            return Err(MoveError::Occupied(to));
        }
        if is_dead_square(pt, to, side) {
            return Err(MoveError::DeadDrop(to));
        }
        if pt == PieceType::Pawn && self.rules.nifu {
            let doubled = self.board.pieces_of(side).any(|(sq, pc)| {
                pc.piece_type == PieceType::Pawn && sq.col() == to.col()
            });
            if doubled {
                return Err(MoveError::Nifu);
            }
        }
        if pt == PieceType::Pawn && self.rules.uchifuzume && self.is_drop_mate(to) {
            return Err(MoveError::Uchifuzume);
        }
        Ok(())
    }

    /// Returns true if dropping a pawn on `to` checkmates the opponent.
    fn is_drop_mate(&self, to: Square) -> bool {
        let mut scratch = self.clone();
        scratch.apply(Move::Drop {
            to,
            piece_type: PieceType::Pawn,
        });
        scratch.rules.uchifuzume = false;

        let opponent = scratch.side_to_move;
        scratch.in_check(opponent) && !scratch.has_legal_moves()
    }

    /// Returns true if the move does not leave the mover's king attacked, or
    /// if king safety is not enforced.
    fn is_safe(&self, mv: &Move) -> bool {
        if !self.rules.check_safety {
            return true;
        }
        let mut scratch = self.clone();
        scratch.apply(*mv);
        !scratch.in_check(self.side_to_move)
    }

    /// Pushes the promoting and the non-promoting version of a move, as allowed.
    fn push_moves(&self, from: Square, to: Square, pc: Piece, moves: &mut Vec<Move>) {
        let can_promote = pc.piece_type.promote().is_some()
            && (in_promotion_zone(from, pc.color) || in_promotion_zone(to, pc.color));
        let must_promote = is_dead_square(pc.piece_type, to, pc.color);

        if can_promote {
            moves.push(Move::Normal {
                from,
                to,
                promote: true,
            });
        }
        if !must_promote {
            moves.push(Move::Normal {
                from,
                to,
                promote: false,
            });
        }
    }

    // =========================================================================
    // Move execution
    // =========================================================================

    /// Applies a move without any legality check.
    fn apply(&mut self, mv: Move) -> MoveRecord {
        let side = self.side_to_move;
        self.side_to_move = side.flip();
        self.ply = self.ply.saturating_add(1);

        match mv {
            Move::Normal { from, to, promote } => {
                let piece = match self.board.piece_at(from) {
                    Some(pc) => pc,
                    None => unreachable!("apply called without a piece on {from}"),
                };
                let captured = self.board.piece_at(to);
                if let Some(cap) = captured {
                    self.hand.increment(side, cap.piece_type);
                }

                let placed = if promote {
                    piece.promote().unwrap_or(piece)
                } else {
                    piece
                };
                self.board.set_piece(from, None);
                self.board.set_piece(to, Some(placed));

                MoveRecord::Normal {
                    from,
                    to,
                    placed,
                    captured,
                    promoted: placed != piece,
                }
            }
            Move::Drop { to, piece_type } => {
                let piece = Piece::new(piece_type, side);
                self.hand.decrement(side, piece_type);
                self.board.set_piece(to, Some(piece));
                MoveRecord::Drop { to, piece }
            }
        }
    }
}

/// Parses the hand field: `-`, or letters each optionally preceded by a count.
fn parse_hand(s: &str) -> Result<Hand, SetupError> {
    let mut hand = Hand::default();
    if s == "-" {
        return Ok(hand);
    }

    let mut count: Option<u8> = None;
    for c in s.chars() {
        if let Some(d) = c.to_digit(10) {
            let n = count.unwrap_or(0) as u32 * 10 + d;
            if n == 0 || n > u8::MAX as u32 {
                return Err(SetupError::IllegalHand(s.to_string()));
            }
            count = Some(n as u8);
            continue;
        }

        let pt = PieceType::from_char(c)
            .filter(|pt| pt.is_hand_type())
            .ok_or_else(|| SetupError::IllegalHand(s.to_string()))?;
        let color = color_of_char(c);
        let n = count.take().unwrap_or(1);
        hand.set(color, pt, hand.get(color, pt).saturating_add(n));
    }

    if count.is_some() {
        return Err(SetupError::IllegalHand(s.to_string()));
    }
    Ok(hand)
}

impl PositionT for Position {
    type PieceType = PieceType;
    type Piece = Piece;
    type Move = Move;
    type Record = MoveRecord;

    const VARIANT: Variant = Variant::Shogi;

    fn new(options: &GameOptions) -> Result<Self, SetupError> {
        let pos = match options.setup {
            Some(ref sfen) => Position::from_sfen(sfen)?,
            None => Position::startpos(),
        };
        Ok(pos.with_rules(options.shogi))
    }

    fn to_setup(&self) -> String {
        self.to_sfen()
    }

    fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    fn in_check(&self, c: Color) -> bool {
        match self.find_king(c) {
            Some(sq) => movegen::is_attacked_by(&self.board, sq, c.flip()),
            None => false,
        }
    }

    fn legal_moves(&self) -> Vec<Move> {
        let side = self.side_to_move;
        let mut moves = Vec::new();

        for (from, pc) in self.board.pieces_of(side) {
            for to in movegen::destinations(&self.board, from) {
                self.push_moves(from, to, pc, &mut moves);
            }
        }

        for (pt, _) in self.hand.pieces(side) {
            for to in self.board.squares() {
                if self.check_drop(pt, to).is_ok() {
                    moves.push(Move::Drop { to, piece_type: pt });
                }
            }
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
        if !self.board.contains(to) {
            return Err(MoveError::OutOfBounds(to));
        }

        let mv = match origin {
            Origin::Hand(pt) => {
                if promotion.is_some() {
                    return Err(MoveError::InvalidPromotion);
                }
                if !pt.is_hand_type() || self.hand.get(self.side_to_move, pt) == 0 {
                    return Err(MoveError::NotInHand);
                }
                self.check_drop(pt, to)?;
                Move::Drop { to, piece_type: pt }
            }
            Origin::Board(from) => {
                if !self.board.contains(from) {
                    return Err(MoveError::OutOfBounds(from));
                }
                let pc = self.board.piece_at(from).ok_or(MoveError::NoPiece(from))?;
                if pc.color != self.side_to_move {
                    return Err(MoveError::NotYourTurn(from, self.side_to_move));
                }
                if !movegen::destinations(&self.board, from).contains(&to) {
                    return Err(MoveError::Unreachable { from, to });
                }

                let can_promote = pc.piece_type.promote().is_some()
                    && (in_promotion_zone(from, pc.color) || in_promotion_zone(to, pc.color));
                let promote = match promotion {
                    None => can_promote,
                    Some(pt) if can_promote && Some(pt) == pc.piece_type.promote() => true,
                    Some(pt) if pt == pc.piece_type => {
                        if is_dead_square(pt, to, pc.color) {
                            return Err(MoveError::MustPromote(to));
                        }
                        false
                    }
                    Some(_) => return Err(MoveError::InvalidPromotion),
                };
                Move::Normal { from, to, promote }
            }
        };

        if !self.is_safe(&mv) {
            return Err(MoveError::InCheck);
        }
        Ok(mv)
    }

    fn make_move(&self, mv: Move) -> Result<(Self, MoveRecord), MoveError> {
        let mv = match mv {
            Move::Normal { from, to, promote } => {
                let choice = match self.board.piece_at(from) {
                    Some(pc) if promote => {
                        Some(pc.piece_type.promote().ok_or(MoveError::InvalidPromotion)?)
                    }
                    Some(pc) => Some(pc.piece_type),
                    None => None,
                };
                self.resolve_move(Origin::Board(from), to, choice)?
            }
            Move::Drop { to, piece_type } => {
                self.resolve_move(Origin::Hand(piece_type), to, None)?
            }
        };

        let mut next = self.clone();
        let record = next.apply(mv);
        Ok((next, record))
    }

    /// A side without a king, or without a legal move, has lost.
    fn status(&self) -> GameStatus {
        let side = self.side_to_move;
        if self.find_king(side).is_none() || !self.has_legal_moves() {
            return GameStatus::Checkmate;
        }
        if self.in_check(side) {
            GameStatus::Check
        } else {
            GameStatus::Playing
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.board)?;
        for c in Color::iter() {
            let held = self
                .hand
                .pieces(c)
                .map(|(pt, n)| format!("{}x{}", pt, n))
                .join(" ");
            writeln!(f, "{} hand: {}", Variant::Shogi.side_name(c), held)?;
        }
        writeln!(f, "{} to move", Variant::Shogi.side_name(self.side_to_move))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::notation_to_position;

    fn sq(s: &str) -> Square {
        notation_to_position(Variant::Shogi, s).unwrap()
    }

    fn mv(s: &str) -> Move {
        s.parse().unwrap()
    }

    #[test]
    fn startpos() {
        let pos = Position::startpos();
        assert_eq!(Color::White, pos.side_to_move());
        assert_eq!(30, pos.legal_moves().len());
        assert_eq!(STARTING_SFEN, pos.to_sfen());
        assert_eq!(GameStatus::Playing, pos.status());
    }

    #[test]
    fn sfen_roundtrip() {
        let cases = [
            "4k4/9/9/9/9/9/9/9/4K4 b 2Pr 10",
            "ln1g1g1nl/1r1s1k3/p1ppppsp1/1p4p1p/9/2P4P1/PPSPPPP1P/2G2S1R1/LN2KG1NL w Bb 24",
            "4k4/9/4+P4/9/9/9/9/9/4K4 w - 3",
        ];
        for (i, sfen) in cases.iter().enumerate() {
            assert_eq!(*sfen, Position::from_sfen(sfen).unwrap().to_sfen(), "failed at #{i}");
        }
    }

    #[test]
    fn sfen_errors() {
        let cases = [
            ("4k4/9/9/9/9/9/9/9/4K4 b", SetupError::MissingDataFields),
            ("4k4/9/9/9/9/9/9/9/4K4 x - 1", SetupError::IllegalSideToMove("x".to_string())),
            ("4k4/9/9/9/9/9/9/9/4K4 b 2K 1", SetupError::IllegalHand("2K".to_string())),
            ("4k4/9/9/9/9/9/9/9/4K4 b P2 1", SetupError::IllegalHand("P2".to_string())),
            ("4k4/9/9/9/9/9/9/9/9 b - 1", SetupError::KingCount(Color::White)),
            ("4kP3/9/9/9/9/9/9/9/4K4 b - 1", SetupError::IllegalBoardState("P cannot stand on 4a".to_string())),
        ];
        for (i, (sfen, err)) in cases.iter().enumerate() {
            assert_eq!(Err(err.clone()), Position::from_sfen(sfen), "failed at #{i}");
        }
    }

    #[test]
    fn capture_goes_to_hand_unpromoted() {
        let pos = Position::from_sfen("4k4/9/9/9/4+r4/4P4/9/9/4K4 b - 1").unwrap();
        let (next, record) = pos.make_move(mv("5f5e")).unwrap();

        assert!(matches!(
            record,
            MoveRecord::Normal {
                captured: Some(Piece {
                    piece_type: PieceType::Dragon,
                    color: Color::Black
                }),
                ..
            }
        ));
        assert_eq!(1, next.hand_count(Color::White, PieceType::Rook));
        assert_eq!("4k4/9/9/9/4P4/9/9/9/4K4 w R 2", next.to_sfen());
    }

    #[test]
    fn drop_from_hand() {
        let pos = Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 b G 1").unwrap();
        assert_eq!(79, pos.drop_squares(PieceType::Gold).len());

        let (next, record) = pos.make_move(mv("G*5b")).unwrap();
        assert_eq!("G*5b", record.to_string());
        assert_eq!(0, next.hand_count(Color::White, PieceType::Gold));
        assert_eq!(GameStatus::Check, next.status());

        assert_eq!(
            Err(MoveError::NotInHand),
            pos.resolve_move(Origin::Hand(PieceType::Rook), sq("5e"), None)
        );
        assert_eq!(
            Err(MoveError::Occupied(sq("5a"))),
            pos.resolve_move(Origin::Hand(PieceType::Gold), sq("5a"), None)
        );
    }

    #[test]
    fn dead_drops_rejected() {
        let pos = Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 b PNL 1").unwrap();
        let cases = [
            (PieceType::Pawn, "1a"),
            (PieceType::Lance, "1a"),
            (PieceType::Knight, "1a"),
            (PieceType::Knight, "1b"),
        ];
        for (i, (pt, s)) in cases.iter().enumerate() {
            assert_eq!(
                Err(MoveError::DeadDrop(sq(s))),
                pos.resolve_move(Origin::Hand(*pt), sq(s), None),
                "failed at #{i}"
            );
        }
        assert!(pos.resolve_move(Origin::Hand(PieceType::Knight), sq("1c"), None).is_ok());
    }

    #[test]
    fn nifu_is_optional() {
        let pos = Position::from_sfen("4k4/9/9/9/9/9/4P4/9/4K4 b P 1").unwrap();
        assert!(pos.resolve_move(Origin::Hand(PieceType::Pawn), sq("5d"), None).is_ok());

        let rules = ShogiRules {
            nifu: true,
            ..ShogiRules::default()
        };
        let pos = pos.with_rules(rules);
        assert_eq!(
            Err(MoveError::Nifu),
            pos.resolve_move(Origin::Hand(PieceType::Pawn), sq("5d"), None)
        );
        assert!(pos.resolve_move(Origin::Hand(PieceType::Pawn), sq("4d"), None).is_ok());
    }

    #[test]
    fn uchifuzume_is_optional() {
        let sfen = "7nk/7s1/8G/9/9/9/9/9/4K4 b P 1";

        let pos = Position::from_sfen(sfen).unwrap();
        let (next, _) = pos.make_move(mv("P*1b")).unwrap();
        assert_eq!(GameStatus::Checkmate, next.status());

        let rules = ShogiRules {
            uchifuzume: true,
            ..ShogiRules::default()
        };
        let pos = Position::from_sfen(sfen).unwrap().with_rules(rules);
        assert_eq!(Err(MoveError::Uchifuzume), pos.make_move(mv("P*1b")).map(|_| ()));
        assert!(!pos.drop_squares(PieceType::Pawn).contains(&sq("1b")));
    }

    #[test]
    fn promotion_choices() {
        let pos = Position::from_sfen("4k4/P8/9/4P4/9/9/9/9/4K4 b - 1").unwrap();

        // Entering the zone promotes by default.
        let (next, _) = pos.make_move(mv("5d5c+")).unwrap();
        assert_eq!(Some(PieceType::ProPawn), next.piece_at(sq("5c")).map(|p| p.piece_type));
        let mv_default = pos.resolve_move(Origin::Board(sq("5d")), sq("5c"), None).unwrap();
        assert!(mv_default.is_promotion());

        // Declining is allowed unless the pawn would be stuck.
        let (next, _) = pos.make_move(mv("5d5c")).unwrap();
        assert_eq!(Some(PieceType::Pawn), next.piece_at(sq("5c")).map(|p| p.piece_type));
        assert_eq!(
            Err(MoveError::MustPromote(sq("9a"))),
            pos.make_move(mv("9b9a")).map(|_| ())
        );
        assert_eq!(
            Err(MoveError::InvalidPromotion),
            pos.resolve_move(Origin::Board(sq("5d")), sq("5c"), Some(PieceType::Dragon))
        );

        let promotions: Vec<Move> = pos.legal_moves_from(Origin::Board(sq("9b")));
        assert_eq!(
            vec![Move::Normal {
                from: sq("9b"),
                to: sq("9a"),
                promote: true
            }],
            promotions
        );
    }

    #[test]
    fn check_safety_toggle() {
        let sfen = "4k4/9/9/9/4r4/9/9/4G4/4K4 b - 1";
        let pos = Position::from_sfen(sfen).unwrap();
        assert_eq!(Err(MoveError::InCheck), pos.make_move(mv("5h6h")).map(|_| ()));
        for mv in pos.legal_moves() {
            let (next, _) = pos.make_move(mv).unwrap();
            assert!(!next.in_check(Color::White), "{mv} leaves the king attacked");
        }

        let rules = ShogiRules {
            check_safety: false,
            ..ShogiRules::default()
        };
        let pos = Position::from_sfen(sfen).unwrap().with_rules(rules);
        let (next, _) = pos.make_move(mv("5h6h")).unwrap();
        let (next, _) = next.make_move(mv("5e5i")).unwrap();
        assert_eq!(None, next.find_king(Color::White));
        assert_eq!(GameStatus::Checkmate, next.status());
    }

    #[test]
    fn ply_saturates() {
        let pos = Position::from_sfen("4k4/9/9/9/9/9/9/9/4K4 b - 65535").unwrap();
        assert_eq!(GameStatus::Playing, pos.status());
        let (next, _) = pos.make_move(mv("5i5h")).unwrap();
        assert_eq!(u16::MAX, next.ply());
        assert_eq!("4k4/9/9/9/9/9/9/4K4/9 w - 65535", next.to_sfen());
    }
}
