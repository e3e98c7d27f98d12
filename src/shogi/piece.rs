use std::fmt;

use crate::core::Color;
use crate::traits::{PieceT, PieceTypeT};

/// Represents a kind of shogi piece, promoted forms included.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceType {
    Pawn,
    Lance,
    Knight,
    Silver,
    Gold,
    Bishop,
    Rook,
    King,
    ProPawn,
    ProLance,
    ProKnight,
    ProSilver,
    /// Promoted bishop.
    Horse,
    /// Promoted rook.
    Dragon,
}

pub const NUM_HAND_TYPES: usize = 7;

/// Piece types that can be held in hand, in SFEN hand order.
pub const HAND_TYPES: [PieceType; NUM_HAND_TYPES] = [
    PieceType::Rook,
    PieceType::Bishop,
    PieceType::Gold,
    PieceType::Silver,
    PieceType::Knight,
    PieceType::Lance,
    PieceType::Pawn,
];

impl PieceType {
    /// Returns the promoted form, or `None` if the type cannot promote.
    pub fn promote(self) -> Option<PieceType> {
        match self {
            PieceType::Pawn => Some(PieceType::ProPawn),
            PieceType::Lance => Some(PieceType::ProLance),
            PieceType::Knight => Some(PieceType::ProKnight),
            PieceType::Silver => Some(PieceType::ProSilver),
            PieceType::Bishop => Some(PieceType::Horse),
            PieceType::Rook => Some(PieceType::Dragon),
            _ => None,
        }
    }

    /// Returns the unpromoted form, or `None` if the type is not promoted.
    pub fn unpromote(self) -> Option<PieceType> {
        match self {
            PieceType::ProPawn => Some(PieceType::Pawn),
            PieceType::ProLance => Some(PieceType::Lance),
            PieceType::ProKnight => Some(PieceType::Knight),
            PieceType::ProSilver => Some(PieceType::Silver),
            PieceType::Horse => Some(PieceType::Bishop),
            PieceType::Dragon => Some(PieceType::Rook),
            _ => None,
        }
    }

    pub fn is_promoted(self) -> bool {
        self.unpromote().is_some()
    }

    /// Returns true if a piece of this type may be held in hand.
    pub fn is_hand_type(self) -> bool {
        HAND_TYPES.contains(&self)
    }
}

impl PieceTypeT for PieceType {
    /// Promoted types share the letter of their base type; setup strings mark
    /// them with a `+` prefix.
    fn to_char(&self) -> char {
        match self.unpromote().unwrap_or(*self) {
            PieceType::Pawn => 'P',
            PieceType::Lance => 'L',
            PieceType::Knight => 'N',
            PieceType::Silver => 'S',
            PieceType::Gold => 'G',
            PieceType::Bishop => 'B',
            PieceType::Rook => 'R',
            _ => 'K',
        }
    }

    /// Parses a base (unpromoted) type letter.
    fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'P' => Some(PieceType::Pawn),
            'L' => Some(PieceType::Lance),
            'N' => Some(PieceType::Knight),
            'S' => Some(PieceType::Silver),
            'G' => Some(PieceType::Gold),
            'B' => Some(PieceType::Bishop),
            'R' => Some(PieceType::Rook),
            'K' => Some(PieceType::King),
            _ => None,
        }
    }

    fn iter() -> impl Iterator<Item = Self> {
        [
            PieceType::Pawn,
            PieceType::Lance,
            PieceType::Knight,
            PieceType::Silver,
            PieceType::Gold,
            PieceType::Bishop,
            PieceType::Rook,
            PieceType::King,
            PieceType::ProPawn,
            PieceType::ProLance,
            PieceType::ProKnight,
            PieceType::ProSilver,
            PieceType::Horse,
            PieceType::Dragon,
        ]
        .into_iter()
    }

    fn index(&self) -> usize {
        *self as usize
    }

    fn is_royal(&self) -> bool {
        *self == PieceType::King
    }
}

impl fmt::Display for PieceType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_promoted() {
            write!(f, "+")?;
        }
        write!(f, "{}", self.to_char())
    }
}

/// A shogi piece. White plays sente.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    pub fn new(piece_type: PieceType, color: Color) -> Piece {
        Piece { piece_type, color }
    }

    /// Returns the promoted piece, if this piece can promote.
    pub fn promote(self) -> Option<Piece> {
        self.piece_type
            .promote()
            .map(|pt| Piece::new(pt, self.color))
    }

    /// Returns the unpromoted piece, if this piece is promoted.
    pub fn unpromote(self) -> Option<Piece> {
        self.piece_type
            .unpromote()
            .map(|pt| Piece::new(pt, self.color))
    }

    pub fn is_promoted(self) -> bool {
        self.piece_type.is_promoted()
    }

    /// Returns the SFEN token: the letter with a `+` prefix when promoted.
    pub fn to_sfen(self) -> String {
        if self.is_promoted() {
            format!("+{}", self.to_char())
        } else {
            self.to_char().to_string()
        }
    }
}

impl PieceT for Piece {
    type PieceType = PieceType;

    fn piece_type(&self) -> PieceType {
        self.piece_type
    }

    fn color(&self) -> Color {
        self.color
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_sfen())
    }
}
