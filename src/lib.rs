//! A rules engine for Western chess, Xiangqi, Shogi and Jungle (Dou Shou Qi).
//!
//! `boardrules` represents positions, generates legal moves, applies them and
//! classifies the resulting game status for each of the four games. Positions
//! can be loaded from and rendered to a FEN-style setup string (chess FEN,
//! xiangqi FEN, shogi SFEN and a jungle board string).
//!
//! # Module Organization
//!
//! - **core**: Types shared by all variants (Color, Square, Board, statuses, errors)
//! - **traits**: Trait definitions for variant-agnostic code (PieceTypeT, PositionT)
//! - **chess**, **xiangqi**, **shogi**, **jungle**: One module per variant
//! - **game**: The turn-based controller and the variant-erased [`GameState`]
//! - **notation**: Square and move notation
//!
//! # Board Coordinates
//!
//! Row 0 is the top edge as seen by the first player ([`Color::White`]), who
//! occupies the bottom rows. Boards are chess 8×8, xiangqi 10×9, shogi 9×9 and
//! jungle 9×7 (rows × cols).
//!
//! # Examples
//!
//! ```
//! use boardrules::notation::notation_to_position;
//! use boardrules::{create_initial_state, apply_move, get_status, GameOptions, GameStatus, Origin, Variant};
//!
//! let state = create_initial_state(Variant::Chess, &GameOptions::default()).unwrap();
//!
//! let e2 = notation_to_position(Variant::Chess, "e2").unwrap();
//! let e4 = notation_to_position(Variant::Chess, "e4").unwrap();
//! let state = apply_move(&state, Origin::Board(e2), e4, None).unwrap();
//!
//! assert_eq!(GameStatus::Playing, get_status(&state));
//! assert_eq!(vec!["e2e4".to_string()], state.history());
//! ```

pub mod chess;
pub mod config;
pub mod core;
pub mod game;
pub mod jungle;
pub mod notation;
pub mod shogi;
pub mod traits;
pub mod xiangqi;

pub use self::config::{GameOptions, ShogiRules};
pub use self::core::{
    Board, Color, GameStatus, MoveError, NotationError, ParseVariantError, SetupError, Square,
    Variant,
};
pub use self::game::{
    apply_move, create_initial_state, get_all_legal_moves, get_status, select_square, Game,
    GameState, KindT, LegalMove, PieceKind, Selection,
};
pub use self::notation::{notation_to_position, position_to_notation};
pub use self::traits::{MoveT, Origin, PieceT, PieceTypeT, PositionT, RecordT};
