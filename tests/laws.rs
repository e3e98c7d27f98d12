use boardrules::notation::{files, ranks};
use boardrules::{
    chess, jungle, notation_to_position, position_to_notation, shogi, xiangqi, Game, GameOptions,
    PositionT, RecordT, ShogiRules, Square, Variant,
};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Plays `plies` moves chosen by a fixed stride and checks every candidate
/// move on the way.
fn walk<P: PositionT>(options: &GameOptions, plies: usize, check_king: bool) -> Game<P> {
    let mut game: Game<P> = Game::new(options).unwrap();
    for ply in 0..plies {
        let moves = game.legal_moves();
        if moves.is_empty() {
            break;
        }
        let mover = game.side_to_move();
        for mv in &moves {
            let (next, record) = game.position().make_move(*mv).unwrap();
            assert_eq!(*mv, record.to_move());
            assert_eq!(mover.flip(), next.side_to_move());
            if check_king {
                assert!(
                    !next.in_check(mover),
                    "{} {} leaves the {} king attacked",
                    P::VARIANT,
                    mv,
                    P::VARIANT.side_name(mover)
                );
            }
        }
        game = game.play(moves[(ply * 7 + 3) % moves.len()]).unwrap();
    }
    game
}

#[test]
fn no_legal_move_leaves_the_king_attacked() {
    init();
    let options = GameOptions::default();
    walk::<chess::Position>(&options, 60, true);
    walk::<xiangqi::Position>(&options, 60, true);
    walk::<shogi::Position>(&options, 60, true);
    walk::<jungle::Position>(&options, 60, false);
}

#[test]
fn no_legal_move_leaves_the_king_attacked_from_tactical_positions() {
    init();
    let cases = [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    ];
    for fen in cases {
        walk::<chess::Position>(&GameOptions::with_setup(fen), 20, true);
    }

    let options = GameOptions::with_setup("lnsgk2nl/1r4gs1/p1pppp1pp/1p4p2/7P1/2P6/PP1PPPP1P/1SG4R1/LN2KGSNL b Bb 1");
    walk::<shogi::Position>(&options, 40, true);
}

#[test]
fn shogi_rule_switches_keep_moves_consistent() {
    init();
    let options = GameOptions {
        setup: None,
        shogi: ShogiRules {
            check_safety: true,
            nifu: true,
            uchifuzume: true,
        },
    };
    walk::<shogi::Position>(&options, 40, true);

    let relaxed = GameOptions {
        setup: None,
        shogi: ShogiRules {
            check_safety: false,
            ..ShogiRules::default()
        },
    };
    walk::<shogi::Position>(&relaxed, 40, false);
}

#[test]
fn history_replays_to_the_current_position() {
    init();

    fn replay<P: PositionT>(plies: usize) {
        let game = walk::<P>(&GameOptions::default(), plies, false);
        let mut replayed = Game::from_position(game.initial_position().clone());
        for record in game.history() {
            replayed = replayed.play(record.to_move()).unwrap();
        }
        assert_eq!(game.position().to_setup(), replayed.position().to_setup());
        assert_eq!(game.status(), replayed.status());

        let undone = game.undo().unwrap();
        assert_eq!(game.history().len() - 1, undone.history().len());
        let redone = undone.play(game.history()[game.history().len() - 1].to_move()).unwrap();
        assert_eq!(game.position().to_setup(), redone.position().to_setup());
    }

    replay::<chess::Position>(25);
    replay::<xiangqi::Position>(25);
    replay::<shogi::Position>(25);
    replay::<jungle::Position>(25);
}

#[test]
fn setup_strings_round_trip() {
    init();

    fn round_trip<P: PositionT>(plies: usize) {
        let game = walk::<P>(&GameOptions::default(), plies, false);
        let setup = game.position().to_setup();
        let reloaded: Game<P> = Game::new(&GameOptions::with_setup(setup.clone())).unwrap();
        assert_eq!(setup, reloaded.position().to_setup());
    }

    round_trip::<chess::Position>(15);
    round_trip::<xiangqi::Position>(15);
    round_trip::<shogi::Position>(15);
    round_trip::<jungle::Position>(15);
}

#[test]
fn notation_round_trips_every_square() {
    for variant in Variant::iter() {
        for row in 0..variant.rows() {
            for col in 0..variant.cols() {
                let sq = Square::new(row, col);
                let s = position_to_notation(variant, sq);
                assert_eq!(Ok(sq), notation_to_position(variant, &s), "{} {}", variant, s);
            }
        }
        assert_eq!(variant.cols() as usize, files(variant).len());
        assert_eq!(variant.rows() as usize, ranks(variant).len());
    }
}

#[test]
fn notation_rejects_off_board_squares() {
    let cases = [
        (Variant::Chess, "i1"),
        (Variant::Chess, "a9"),
        (Variant::Chess, "a0"),
        (Variant::Xiangqi, "j1"),
        (Variant::Xiangqi, "a11"),
        (Variant::Shogi, "0a"),
        (Variant::Shogi, "1j"),
        (Variant::Jungle, "h1"),
        (Variant::Jungle, "a10"),
        (Variant::Jungle, ""),
    ];
    for (i, (variant, s)) in cases.iter().enumerate() {
        assert!(notation_to_position(*variant, s).is_err(), "failed at #{i}");
    }
}
