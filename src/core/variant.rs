use std::fmt;
use std::str::FromStr;

use super::color::Color;

/// The four supported games.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Variant {
    Chess,
    Xiangqi,
    Shogi,
    Jungle,
}

impl Variant {
    /// Number of rows of the board.
    pub fn rows(self) -> u8 {
        match self {
            Variant::Chess => 8,
            Variant::Xiangqi => 10,
            Variant::Shogi => 9,
            Variant::Jungle => 9,
        }
    }

    /// Number of columns of the board.
    pub fn cols(self) -> u8 {
        match self {
            Variant::Chess => 8,
            Variant::Xiangqi => 9,
            Variant::Shogi => 9,
            Variant::Jungle => 7,
        }
    }

    /// Returns the traditional name of a side in this variant.
    ///
    /// # Examples
    ///
    /// ```
    /// use boardrules::{Color, Variant};
    ///
    /// assert_eq!("red", Variant::Xiangqi.side_name(Color::White));
    /// assert_eq!("gote", Variant::Shogi.side_name(Color::Black));
    /// ```
    pub fn side_name(self, c: Color) -> &'static str {
        match (self, c) {
            (Variant::Chess, Color::White) => "white",
            (Variant::Chess, Color::Black) => "black",
            (Variant::Xiangqi, Color::White) => "red",
            (Variant::Xiangqi, Color::Black) => "black",
            (Variant::Shogi, Color::White) => "sente",
            (Variant::Shogi, Color::Black) => "gote",
            (Variant::Jungle, Color::White) => "blue",
            (Variant::Jungle, Color::Black) => "red",
        }
    }

    /// Returns true if stalemate is a recognised outcome in this variant.
    pub fn has_stalemate(self) -> bool {
        matches!(self, Variant::Chess | Variant::Xiangqi)
    }

    /// Returns an iterator over all variants.
    pub fn iter() -> impl Iterator<Item = Variant> {
        [
            Variant::Chess,
            Variant::Xiangqi,
            Variant::Shogi,
            Variant::Jungle,
        ]
        .into_iter()
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match *self {
            Variant::Chess => "chess",
            Variant::Xiangqi => "xiangqi",
            Variant::Shogi => "shogi",
            Variant::Jungle => "jungle",
        };
        f.write_str(name)
    }
}

/// Error type for parsing a variant name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown variant '{0}'")]
pub struct ParseVariantError(pub String);

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chess" => Ok(Variant::Chess),
            "xiangqi" => Ok(Variant::Xiangqi),
            "shogi" => Ok(Variant::Shogi),
            "jungle" | "doushouqi" => Ok(Variant::Jungle),
            _ => Err(ParseVariantError(s.to_string())),
        }
    }
}
