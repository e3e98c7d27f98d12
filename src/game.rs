//! Turn-based game controller.
//!
//! [`Game`] wraps one variant's position with its history, status and the
//! current selection. [`GameState`] erases the variant so that a caller can
//! drive any of the four games through one type, and the free functions at the
//! bottom of this module are the surface used by UI and AI adapters.
//!
//! Every operation returns a new snapshot; nothing is mutated in place.

use itertools::Itertools;
use log::{debug, trace};
use std::fmt;

use crate::chess;
use crate::config::GameOptions;
use crate::core::{Color, GameStatus, MoveError, SetupError, Square, Variant};
use crate::jungle::{self, Animal};
use crate::shogi;
use crate::traits::{MoveT, Origin, PieceT, PositionT, RecordT};
use crate::xiangqi;

/// A selected piece (on the board or in hand) and where it may go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection<T> {
    pub origin: Origin<T>,
    pub destinations: Vec<Square>,
}

/// A game of one variant: the position plus everything needed to continue,
/// undo and display it.
#[derive(Debug, Clone)]
pub struct Game<P: PositionT> {
    initial: P,
    position: P,
    status: GameStatus,
    history: Vec<P::Record>,
    selection: Option<Selection<P::PieceType>>,
}

impl<P: PositionT> Game<P> {
    /// Creates a game from the start position described by `options`.
    pub fn new(options: &GameOptions) -> Result<Self, SetupError> {
        Ok(Game::from_position(P::new(options)?))
    }

    /// Creates a game starting from `position`.
    pub fn from_position(position: P) -> Self {
        let status = position.status();
        Game {
            initial: position.clone(),
            position,
            status,
            history: Vec::new(),
            selection: None,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn position(&self) -> &P {
        &self.position
    }

    /// Returns the position the game started from.
    pub fn initial_position(&self) -> &P {
        &self.initial
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    /// Returns the records of the moves played so far, oldest first.
    pub fn history(&self) -> &[P::Record] {
        &self.history
    }

    pub fn selection(&self) -> Option<&Selection<P::PieceType>> {
        self.selection.as_ref()
    }

    /// Returns the winner: the side that made the final move of a decided game.
    pub fn winner(&self) -> Option<Color> {
        match self.status {
            GameStatus::Checkmate => Some(self.position.side_to_move().flip()),
            _ => None,
        }
    }

    /// Returns the legal moves of the side to move; none once the game is over.
    pub fn legal_moves(&self) -> Vec<P::Move> {
        if self.status.is_terminal() {
            return Vec::new();
        }
        self.position.legal_moves()
    }

    // =========================================================================
    // Transitions
    // =========================================================================

    /// Handles a click on `sq`.
    ///
    /// Clicking the selected piece again deselects it. Clicking one of its
    /// destinations plays the move with the default promotion. Clicking a piece
    /// of the side to move selects it, and anything else clears the selection.
    pub fn select_square(&self, sq: Square) -> Self {
        if self.status.is_terminal() {
            return self.with_selection(None);
        }

        if let Some(sel) = &self.selection {
            if sel.origin == Origin::Board(sq) {
                trace!("deselected {}", sq);
                return self.with_selection(None);
            }
            if sel.destinations.contains(&sq) {
                match self.apply_move(sel.origin, sq, None) {
                    Ok(next) => return next,
                    Err(_) => return self.with_selection(None),
                }
            }
        }

        match self.position.piece_at(sq) {
            Some(pc) if pc.color() == self.side_to_move() => self.select(Origin::Board(sq)),
            _ => self.with_selection(None),
        }
    }

    /// Selects a piece in hand with its legal drop squares. Selecting the same
    /// piece again deselects it.
    pub fn select_hand(&self, pt: P::PieceType) -> Self {
        let origin = Origin::Hand(pt);
        let reselected = self.selection.as_ref().is_some_and(|sel| sel.origin == origin);
        if self.status.is_terminal() || reselected {
            return self.with_selection(None);
        }
        self.select(origin)
    }

    /// Validates and plays the move from `origin` to `to`.
    ///
    /// `promotion` picks the piece a promoting move turns into; `None` applies
    /// the variant's default.
    pub fn apply_move(
        &self,
        origin: Origin<P::PieceType>,
        to: Square,
        promotion: Option<P::PieceType>,
    ) -> Result<Self, MoveError> {
        if self.status.is_terminal() {
            debug!("rejected move to {} in a finished {} game", to, P::VARIANT);
            return Err(MoveError::GameOver);
        }

        let mv = self
            .position
            .resolve_move(origin, to, promotion)
            .map_err(|e| {
                debug!("rejected {:?} to {}: {}", origin, to, e);
                e
            })?;
        self.play(mv)
    }

    /// Plays a fully specified move.
    pub fn play(&self, mv: P::Move) -> Result<Self, MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let (position, record) = self.position.make_move(mv).map_err(|e| {
            debug!("rejected {}: {}", mv, e);
            e
        })?;
        let status = position.status();
        debug!("{} played {}, status {}", P::VARIANT, record, status);
        if status.is_terminal() {
            debug!("{} game over: {}", P::VARIANT, status);
        }

        let mut history = self.history.clone();
        history.push(record);
        Ok(Game {
            initial: self.initial.clone(),
            position,
            status,
            history,
            selection: None,
        })
    }

    /// Takes back the last move by replaying the history from the start.
    ///
    /// Returns `None` if no move has been played.
    pub fn undo(&self) -> Option<Self> {
        let (_, replayed) = self.history.split_last()?;

        let mut game = Game::from_position(self.initial.clone());
        for record in replayed {
            game = game.play(record.to_move()).ok()?;
        }
        debug!("{} undo, {} moves remain", P::VARIANT, game.history.len());
        Some(game)
    }

    /// Ends the game as a draw. A finished game is returned unchanged.
    pub fn declare_draw(&self) -> Self {
        if self.status.is_terminal() {
            return self.clone();
        }
        debug!("{} game drawn by agreement", P::VARIANT);
        Game {
            status: GameStatus::Draw,
            selection: None,
            ..self.clone()
        }
    }

    fn select(&self, origin: Origin<P::PieceType>) -> Self {
        let destinations: Vec<Square> = self
            .position
            .legal_moves_from(origin)
            .iter()
            .map(|mv| mv.to())
            .unique()
            .collect();
        trace!("selected {:?}: {} destinations", origin, destinations.len());
        self.with_selection(Some(Selection {
            origin,
            destinations,
        }))
    }

    fn with_selection(&self, selection: Option<Selection<P::PieceType>>) -> Self {
        Game {
            selection,
            ..self.clone()
        }
    }
}

// =============================================================================
// Variant-erased state
// =============================================================================

/// A piece type of any variant.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceKind {
    Chess(chess::PieceType),
    Xiangqi(xiangqi::PieceType),
    Shogi(shogi::PieceType),
    Jungle(Animal),
}

impl PieceKind {
    /// Returns the variant this piece type belongs to.
    pub fn variant(self) -> Variant {
        match self {
            PieceKind::Chess(_) => Variant::Chess,
            PieceKind::Xiangqi(_) => Variant::Xiangqi,
            PieceKind::Shogi(_) => Variant::Shogi,
            PieceKind::Jungle(_) => Variant::Jungle,
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            PieceKind::Chess(pt) => write!(f, "{}", pt),
            PieceKind::Xiangqi(pt) => write!(f, "{}", pt),
            PieceKind::Shogi(pt) => write!(f, "{}", pt),
            PieceKind::Jungle(a) => write!(f, "{}", a),
        }
    }
}

/// Conversion between a variant's piece type and [`PieceKind`].
pub trait KindT: Sized {
    fn into_kind(self) -> PieceKind;

    /// Returns `None` when `kind` belongs to another variant.
    fn from_kind(kind: PieceKind) -> Option<Self>;
}

macro_rules! impl_kind {
    ($ty:ty, $variant:ident) => {
        impl KindT for $ty {
            fn into_kind(self) -> PieceKind {
                PieceKind::$variant(self)
            }

            fn from_kind(kind: PieceKind) -> Option<Self> {
                match kind {
                    PieceKind::$variant(pt) => Some(pt),
                    _ => None,
                }
            }
        }
    };
}

impl_kind!(chess::PieceType, Chess);
impl_kind!(xiangqi::PieceType, Xiangqi);
impl_kind!(shogi::PieceType, Shogi);
impl_kind!(Animal, Jungle);

/// A legal move of the side to move, as reported to callers.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LegalMove {
    pub from: Origin<PieceKind>,
    pub to: Square,
}

fn origin_to_kind<T: KindT>(origin: Origin<T>) -> Origin<PieceKind> {
    match origin {
        Origin::Board(sq) => Origin::Board(sq),
        Origin::Hand(pt) => Origin::Hand(pt.into_kind()),
    }
}

fn origin_from_kind<T: KindT>(variant: Variant, origin: Origin<PieceKind>) -> Result<Origin<T>, MoveError> {
    match origin {
        Origin::Board(sq) => Ok(Origin::Board(sq)),
        Origin::Hand(kind) => T::from_kind(kind)
            .map(Origin::Hand)
            .ok_or(MoveError::WrongVariant(variant)),
    }
}

fn kind_from<T: KindT>(variant: Variant, kind: Option<PieceKind>) -> Result<Option<T>, MoveError> {
    kind.map(|k| T::from_kind(k).ok_or(MoveError::WrongVariant(variant)))
        .transpose()
}

/// The state of a game of any variant.
#[derive(Debug, Clone)]
pub enum GameState {
    Chess(Game<chess::Position>),
    Xiangqi(Game<xiangqi::Position>),
    Shogi(Game<shogi::Position>),
    Jungle(Game<jungle::Position>),
}

/// Runs `$body` with `$g` bound to the inner game.
macro_rules! with_game {
    ($state:expr, $g:ident => $body:expr) => {
        match $state {
            GameState::Chess($g) => $body,
            GameState::Xiangqi($g) => $body,
            GameState::Shogi($g) => $body,
            GameState::Jungle($g) => $body,
        }
    };
}

/// Runs `$body` with `$g` bound to the inner game and rewraps the resulting game.
macro_rules! map_game {
    ($state:expr, $g:ident => $body:expr) => {
        match $state {
            GameState::Chess($g) => GameState::Chess($body),
            GameState::Xiangqi($g) => GameState::Xiangqi($body),
            GameState::Shogi($g) => GameState::Shogi($body),
            GameState::Jungle($g) => GameState::Jungle($body),
        }
    };
}

impl GameState {
    /// Creates a game of `variant` from the given options.
    pub fn new(variant: Variant, options: &GameOptions) -> Result<Self, SetupError> {
        let state = match variant {
            Variant::Chess => GameState::Chess(Game::new(options)?),
            Variant::Xiangqi => GameState::Xiangqi(Game::new(options)?),
            Variant::Shogi => GameState::Shogi(Game::new(options)?),
            Variant::Jungle => GameState::Jungle(Game::new(options)?),
        };
        debug!("created {} game, {} to move", variant, variant.side_name(state.side_to_move()));
        Ok(state)
    }

    pub fn variant(&self) -> Variant {
        match self {
            GameState::Chess(_) => Variant::Chess,
            GameState::Xiangqi(_) => Variant::Xiangqi,
            GameState::Shogi(_) => Variant::Shogi,
            GameState::Jungle(_) => Variant::Jungle,
        }
    }

    pub fn status(&self) -> GameStatus {
        with_game!(self, g => g.status())
    }

    pub fn side_to_move(&self) -> Color {
        with_game!(self, g => g.side_to_move())
    }

    pub fn winner(&self) -> Option<Color> {
        with_game!(self, g => g.winner())
    }

    /// Returns true if the side to move is in check.
    pub fn in_check(&self) -> bool {
        with_game!(self, g => g.position().in_check(g.side_to_move()))
    }

    /// Returns the piece on `sq` as its type and color.
    pub fn piece_at(&self, sq: Square) -> Option<(PieceKind, Color)> {
        with_game!(self, g => g
            .position()
            .piece_at(sq)
            .map(|pc| (pc.piece_type().into_kind(), pc.color())))
    }

    /// Returns the setup string of the current position.
    pub fn to_setup(&self) -> String {
        with_game!(self, g => g.position().to_setup())
    }

    /// Returns the played moves in coordinate notation, oldest first.
    pub fn history(&self) -> Vec<String> {
        with_game!(self, g => g.history().iter().map(|r| r.to_string()).collect())
    }

    /// Returns the selected origin and its destinations.
    pub fn selection(&self) -> Option<(Origin<PieceKind>, Vec<Square>)> {
        with_game!(self, g => g
            .selection()
            .map(|sel| (origin_to_kind(sel.origin), sel.destinations.clone())))
    }

    /// Returns every legal move of the side to move, one entry per origin and
    /// destination pair.
    pub fn legal_moves(&self) -> Vec<LegalMove> {
        with_game!(self, g => g
            .legal_moves()
            .iter()
            .map(|mv| LegalMove {
                from: origin_to_kind(mv.origin()),
                to: mv.to(),
            })
            .unique()
            .collect())
    }

    pub fn select_square(&self, sq: Square) -> Self {
        map_game!(self, g => g.select_square(sq))
    }

    /// Selects a piece in hand. A piece type of another variant, or a
    /// variant without drops, clears the selection.
    pub fn select_hand(&self, kind: PieceKind) -> Self {
        map_game!(self, g => match KindT::from_kind(kind) {
            Some(pt) if g.position().legal_moves_from(Origin::Hand(pt)).is_empty() => {
                g.with_selection(None)
            }
            Some(pt) => g.select_hand(pt),
            None => g.with_selection(None),
        })
    }

    pub fn apply_move(
        &self,
        from: Origin<PieceKind>,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> Result<Self, MoveError> {
        let variant = self.variant();
        Ok(map_game!(self, g => g.apply_move(
            origin_from_kind(variant, from)?,
            to,
            kind_from(variant, promotion)?,
        )?))
    }

    /// Takes back the last move; `None` if there is none.
    pub fn undo(&self) -> Option<Self> {
        Some(map_game!(self, g => g.undo()?))
    }

    pub fn declare_draw(&self) -> Self {
        map_game!(self, g => g.declare_draw())
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        with_game!(self, g => write!(f, "{}", g.position()))?;
        writeln!(f, "status: {}", self.status())
    }
}

// =============================================================================
// Functional surface
// =============================================================================

/// Creates the initial state of a game of `variant`.
pub fn create_initial_state(variant: Variant, options: &GameOptions) -> Result<GameState, SetupError> {
    GameState::new(variant, options)
}

/// Handles a click on `sq` and returns the next state.
pub fn select_square(state: &GameState, sq: Square) -> GameState {
    state.select_square(sq)
}

/// Validates and applies a move, returning the next state.
pub fn apply_move(
    state: &GameState,
    from: Origin<PieceKind>,
    to: Square,
    promotion: Option<PieceKind>,
) -> Result<GameState, MoveError> {
    state.apply_move(from, to, promotion)
}

pub fn get_status(state: &GameState) -> GameStatus {
    state.status()
}

pub fn get_all_legal_moves(state: &GameState) -> Vec<LegalMove> {
    state.legal_moves()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::notation_to_position;

    fn sq(variant: Variant, s: &str) -> Square {
        notation_to_position(variant, s).unwrap()
    }

    #[test]
    fn select_then_move() {
        let game: Game<chess::Position> = Game::new(&GameOptions::default()).unwrap();
        let e2 = sq(Variant::Chess, "e2");
        let e4 = sq(Variant::Chess, "e4");

        let game = game.select_square(e2);
        let sel = game.selection().unwrap();
        assert_eq!(Origin::Board(e2), sel.origin);
        assert_eq!(2, sel.destinations.len());

        let game = game.select_square(e4);
        assert!(game.selection().is_none());
        assert_eq!(1, game.history().len());
        assert_eq!(Color::Black, game.side_to_move());
    }

    #[test]
    fn selection_toggles_and_clears() {
        let game: Game<chess::Position> = Game::new(&GameOptions::default()).unwrap();
        let e2 = sq(Variant::Chess, "e2");

        let selected = game.select_square(e2);
        assert!(selected.selection().is_some());
        assert!(selected.select_square(e2).selection().is_none());

        // Empty squares and enemy pieces clear the selection.
        assert!(selected.select_square(sq(Variant::Chess, "e5")).selection().is_none());
        assert!(selected.select_square(sq(Variant::Chess, "e7")).selection().is_none());
        assert!(game.select_square(sq(Variant::Chess, "e7")).selection().is_none());

        // Another own piece takes over the selection.
        let g1 = sq(Variant::Chess, "g1");
        let switched = selected.select_square(g1);
        assert_eq!(Origin::Board(g1), switched.selection().unwrap().origin);
    }

    #[test]
    fn undo_replays_history() {
        let game: Game<chess::Position> = Game::new(&GameOptions::default()).unwrap();
        assert!(game.undo().is_none());

        let e2 = sq(Variant::Chess, "e2");
        let e4 = sq(Variant::Chess, "e4");
        let e7 = sq(Variant::Chess, "e7");
        let e5 = sq(Variant::Chess, "e5");
        let played = game
            .apply_move(Origin::Board(e2), e4, None)
            .and_then(|g| g.apply_move(Origin::Board(e7), e5, None))
            .unwrap();

        let undone = played.undo().unwrap();
        assert_eq!(1, undone.history().len());
        assert_eq!(Color::Black, undone.side_to_move());
        assert_eq!(None, undone.position().piece_at(e5));
        assert_eq!(
            game.apply_move(Origin::Board(e2), e4, None).unwrap().position(),
            undone.position()
        );
    }

    #[test]
    fn draw_is_terminal() {
        let game: Game<xiangqi::Position> = Game::new(&GameOptions::default()).unwrap();
        let drawn = game.declare_draw();
        assert_eq!(GameStatus::Draw, drawn.status());
        assert_eq!(None, drawn.winner());
        assert!(drawn.legal_moves().is_empty());
        assert_eq!(
            Err(MoveError::GameOver),
            drawn
                .apply_move(Origin::Board(Square::new(6, 0)), Square::new(5, 0), None)
                .map(|_| ())
        );
    }

    #[test]
    fn hand_selection() {
        let options = GameOptions::with_setup("4k4/9/9/9/9/9/9/9/4K4 b P 1");
        let game: Game<shogi::Position> = Game::new(&options).unwrap();

        let game = game.select_hand(shogi::PieceType::Pawn);
        let sel = game.selection().unwrap();
        assert_eq!(Origin::Hand(shogi::PieceType::Pawn), sel.origin);
        // 79 empty squares, less the 8 empty ones on the last rank.
        assert_eq!(71, sel.destinations.len());

        let drop_sq = sq(Variant::Shogi, "5e");
        let game = game.select_square(drop_sq);
        assert_eq!(1, game.history().len());
        assert_eq!(0, game.position().hand_count(Color::White, shogi::PieceType::Pawn));
    }

    #[test]
    fn wrong_variant_kinds_are_rejected() {
        let state = create_initial_state(Variant::Chess, &GameOptions::default()).unwrap();
        let res = apply_move(
            &state,
            Origin::Hand(PieceKind::Shogi(shogi::PieceType::Pawn)),
            Square::new(4, 4),
            None,
        );
        assert_eq!(Err(MoveError::WrongVariant(Variant::Chess)), res.map(|_| ()));

        let res = apply_move(
            &state,
            Origin::Board(Square::new(6, 4)),
            Square::new(4, 4),
            Some(PieceKind::Jungle(Animal::Rat)),
        );
        assert_eq!(Err(MoveError::WrongVariant(Variant::Chess)), res.map(|_| ()));
    }

    #[test]
    fn legal_moves_are_deduplicated() {
        let options = GameOptions::with_setup("k7/4P3/8/8/8/8/8/4K3 w - - 0 1");
        let state = create_initial_state(Variant::Chess, &options).unwrap();
        let from_pawn = get_all_legal_moves(&state)
            .into_iter()
            .filter(|mv| mv.from == Origin::Board(sq(Variant::Chess, "e7")))
            .count();
        assert_eq!(1, from_pawn);
    }
}
