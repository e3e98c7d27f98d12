//! Options accepted when a game is created.

/// Options for creating a game.
///
/// # Examples
///
/// ```
/// use boardrules::{GameOptions, ShogiRules};
///
/// let options = GameOptions {
///     setup: Some("4k4/9/9/9/9/9/9/9/4K4 b - 1".to_string()),
///     shogi: ShogiRules { nifu: true, ..ShogiRules::default() },
/// };
/// assert!(options.shogi.check_safety);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameOptions {
    /// Start position in the variant's setup notation (chess FEN, xiangqi FEN,
    /// shogi SFEN, jungle board string). `None` uses the standard layout.
    pub setup: Option<String>,
    /// Shogi rule switches; ignored by the other variants.
    pub shogi: ShogiRules,
}

impl GameOptions {
    /// Options starting from the given setup string.
    pub fn with_setup(setup: impl Into<String>) -> GameOptions {
        GameOptions {
            setup: Some(setup.into()),
            ..GameOptions::default()
        }
    }
}

/// Optional shogi rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ShogiRules {
    /// Reject moves that leave the mover's king attacked. When disabled, moves
    /// are only checked for geometry and the game ends once a side cannot move
    /// or has lost its king.
    pub check_safety: bool,
    /// Forbid dropping a pawn on a file that already holds an unpromoted pawn
    /// of the same side.
    pub nifu: bool,
    /// Forbid delivering checkmate with a pawn drop.
    pub uchifuzume: bool,
}

impl Default for ShogiRules {
    fn default() -> Self {
        ShogiRules {
            check_safety: true,
            nifu: false,
            uchifuzume: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = GameOptions::default();
        assert_eq!(None, options.setup);
        assert!(options.shogi.check_safety);
        assert!(!options.shogi.nifu);
        assert!(!options.shogi.uchifuzume);
    }

    #[test]
    fn with_setup() {
        let options = GameOptions::with_setup("8/8/8/8/8/8/8/8 w - -");
        assert_eq!(Some("8/8/8/8/8/8/8/8 w - -".to_string()), options.setup);
        assert_eq!(ShogiRules::default(), options.shogi);
    }
}
