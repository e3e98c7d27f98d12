use std::fmt;

/// Status of a game from the point of view of the side to move.
///
/// `Checkmate` is also used for objective-square wins (a jungle den entry) and
/// for immobilisation; the winner is always the side that made the last move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameStatus {
    /// The game is in progress and the side to move is not in check.
    Playing,
    /// The side to move is in check but has legal moves.
    Check,
    /// The side to move has lost.
    Checkmate,
    /// The side to move has no legal move and is not in check.
    Stalemate,
    /// The game was declared drawn.
    Draw,
}

impl GameStatus {
    /// Returns true if no more moves can be made.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::Draw
        )
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match *self {
            GameStatus::Playing => "playing",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
            GameStatus::Draw => "draw",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal() {
        assert!(!GameStatus::Playing.is_terminal());
        assert!(!GameStatus::Check.is_terminal());
        assert!(GameStatus::Checkmate.is_terminal());
        assert!(GameStatus::Stalemate.is_terminal());
        assert!(GameStatus::Draw.is_terminal());
    }
}
