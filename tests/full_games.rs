//! Full-game integration suite.
//!
//! Complete scripted games played through the public API, checking the
//! resulting statuses, notation, result tags, and archive round trips.

use chess_arbiter::archive::{archive, replay};
use chess_arbiter::{Color, Game, GameStatus, MoveRecord, Piece, PieceKind, Square};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chess_arbiter=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).unwrap()
}

fn play(game: &mut Game, from: &str, to: &str) -> MoveRecord {
    game.make_move(sq(from), sq(to), None).unwrap()
}

// =====================================================================
// Checkmate and stalemate
// =====================================================================

#[test]
fn scholars_mate_scores_for_white() {
    let mut game = Game::new();
    play(&mut game, "e2", "e4");
    play(&mut game, "e7", "e5");
    play(&mut game, "f1", "c4");
    play(&mut game, "b8", "c6");
    play(&mut game, "d1", "h5");
    play(&mut game, "g8", "f6");
    let last = play(&mut game, "h5", "f7");

    assert!(last.is_checkmate);
    assert_eq!(last.to_algebraic(), "Qxf7#");
    assert_eq!(game.status(), GameStatus::Checkmate);
    assert_eq!(game.result_tag(), "1-0");
    assert_eq!(game.move_history().len(), 7);
    assert!(game.make_move(sq("e8"), sq("f7"), None).is_err());
}

/// Sam Loyd's ten-move stalemate.
#[test]
fn loyd_stalemate_in_ten() {
    init_tracing();
    let mut game = Game::new();

    play(&mut game, "e2", "e3");
    play(&mut game, "a7", "a5");
    play(&mut game, "d1", "h5");
    play(&mut game, "a8", "a6");
    play(&mut game, "h5", "a5");
    play(&mut game, "h7", "h5");
    play(&mut game, "a5", "c7");
    let rook_lift = play(&mut game, "a6", "h6");
    assert_eq!(rook_lift.to_algebraic(), "Rh6");
    play(&mut game, "h2", "h4");
    play(&mut game, "f7", "f6");

    let queen_check = play(&mut game, "c7", "d7");
    assert_eq!(queen_check.to_algebraic(), "Qxd7+");
    assert_eq!(game.status(), GameStatus::Check);
    assert_eq!(game.result_tag(), "*");

    play(&mut game, "e8", "f7");
    play(&mut game, "d7", "b7");
    play(&mut game, "d8", "d3");
    play(&mut game, "b7", "b8");
    play(&mut game, "d3", "h7");
    play(&mut game, "b8", "c8");
    play(&mut game, "f7", "g6");
    let last = play(&mut game, "c8", "e6");

    assert_eq!(last.to_algebraic(), "Qe6");
    assert!(!last.is_check);
    assert_eq!(game.status(), GameStatus::Stalemate);
    assert_eq!(game.result_tag(), "1/2-1/2");
    assert!(game.is_game_over());

    // The sealing queen sits on e6 in the snapshot grid.
    let grid = game.snapshot();
    assert_eq!(grid[5][4].map(|p| p.kind), Some(PieceKind::Queen));
    assert_eq!(grid[5][4].map(|p| p.color), Some(Color::White));

    // Black is not in check and has nothing at all.
    let replies: usize = Square::all()
        .map(|from| game.legal_destinations(from).len())
        .sum();
    assert_eq!(replies, 0);
}

// =====================================================================
// Castling
// =====================================================================

#[test]
fn both_sides_castle_kingside() {
    let mut game = Game::new();
    play(&mut game, "e2", "e4");
    play(&mut game, "e7", "e5");
    play(&mut game, "g1", "f3");
    play(&mut game, "g8", "f6");
    play(&mut game, "f1", "c4");
    play(&mut game, "f8", "c5");

    let white = play(&mut game, "e1", "g1");
    assert!(white.is_castling);
    assert_eq!(white.to_algebraic(), "O-O");

    let black = play(&mut game, "e8", "g8");
    assert!(black.is_castling);
    assert_eq!(black.to_algebraic(), "O-O");

    let board = game.board();
    assert_eq!(
        board.piece_at(sq("g1")).map(|p| (p.kind, p.color)),
        Some((PieceKind::King, Color::White))
    );
    assert_eq!(
        board.piece_at(sq("f1")).map(|p| (p.kind, p.color)),
        Some((PieceKind::Rook, Color::White))
    );
    assert_eq!(
        board.piece_at(sq("g8")).map(|p| (p.kind, p.color)),
        Some((PieceKind::King, Color::Black))
    );
    assert_eq!(
        board.piece_at(sq("f8")).map(|p| (p.kind, p.color)),
        Some((PieceKind::Rook, Color::Black))
    );
    assert!(board.piece_at(sq("e1")).is_none());
    assert!(board.piece_at(sq("h1")).is_none());
    assert_eq!(game.status(), GameStatus::Active);
}

#[test]
fn both_sides_castle_queenside() {
    let mut game = Game::new();
    play(&mut game, "d2", "d4");
    play(&mut game, "d7", "d5");
    play(&mut game, "b1", "c3");
    play(&mut game, "b8", "c6");
    play(&mut game, "c1", "f4");
    play(&mut game, "c8", "f5");
    play(&mut game, "d1", "d2");
    play(&mut game, "d8", "d7");

    let white = play(&mut game, "e1", "c1");
    assert_eq!(white.to_algebraic(), "O-O-O");
    let black = play(&mut game, "e8", "c8");
    assert_eq!(black.to_algebraic(), "O-O-O");

    let board = game.board();
    assert_eq!(
        board.piece_at(sq("c1")).map(|p| p.kind),
        Some(PieceKind::King)
    );
    assert_eq!(
        board.piece_at(sq("d1")).map(|p| p.kind),
        Some(PieceKind::Rook)
    );
    assert_eq!(
        board.piece_at(sq("c8")).map(|p| p.kind),
        Some(PieceKind::King)
    );
    assert_eq!(
        board.piece_at(sq("d8")).map(|p| p.kind),
        Some(PieceKind::Rook)
    );
    assert!(board.piece_at(sq("a1")).is_none());
    assert!(board.piece_at(sq("a8")).is_none());
}

// =====================================================================
// En passant
// =====================================================================

#[test]
fn en_passant_capture_midgame() {
    let mut game = Game::new();
    play(&mut game, "e2", "e4");
    play(&mut game, "a7", "a6");
    play(&mut game, "e4", "e5");
    play(&mut game, "d7", "d5");

    let ep = play(&mut game, "e5", "d6");
    assert!(ep.is_en_passant);
    assert_eq!(ep.to_algebraic(), "exd6");
    assert_eq!(
        ep.captured.map(|p| (p.kind, p.color)),
        Some((PieceKind::Pawn, Color::Black))
    );
    assert!(game.board().piece_at(sq("d5")).is_none());

    // Black recaptures the intruder, an ordinary pawn capture this time.
    let recapture = play(&mut game, "e7", "d6");
    assert!(!recapture.is_en_passant);
    assert_eq!(recapture.to_algebraic(), "exd6");
    assert_eq!(
        game.board().piece_at(sq("d6")).map(|p| p.color),
        Some(Color::Black)
    );
}

// =====================================================================
// Archive round trips
// =====================================================================

#[test]
fn long_game_survives_archive_round_trip() {
    init_tracing();
    let mut game = Game::with_players("Adela", "Bruno");
    play(&mut game, "d2", "d4");
    play(&mut game, "d7", "d5");
    play(&mut game, "b1", "c3");
    play(&mut game, "b8", "c6");
    play(&mut game, "c1", "f4");
    play(&mut game, "c8", "f5");
    play(&mut game, "d1", "d2");
    play(&mut game, "d8", "d7");
    play(&mut game, "e1", "c1");
    play(&mut game, "e8", "c8");

    let json = serde_json::to_string(&archive(&game)).unwrap();
    let loaded = serde_json::from_str(&json).unwrap();
    let replayed = replay(&loaded).unwrap();

    assert_eq!(replayed.board(), game.board());
    assert_eq!(replayed.status(), game.status());
    assert_eq!(replayed.move_history(), game.move_history());
    assert_eq!(replayed.white_player, "Adela");
    assert_eq!(replayed.black_player, "Bruno");
    assert_eq!(replayed.result_tag(), "*");
}

#[test]
fn stalemate_replay_recomputes_the_draw() {
    let mut game = Game::new();
    for (from, to) in [
        ("e2", "e3"),
        ("a7", "a5"),
        ("d1", "h5"),
        ("a8", "a6"),
        ("h5", "a5"),
        ("h7", "h5"),
        ("a5", "c7"),
        ("a6", "h6"),
        ("h2", "h4"),
        ("f7", "f6"),
        ("c7", "d7"),
        ("e8", "f7"),
        ("d7", "b7"),
        ("d8", "d3"),
        ("b7", "b8"),
        ("d3", "h7"),
        ("b8", "c8"),
        ("f7", "g6"),
        ("c8", "e6"),
    ] {
        play(&mut game, from, to);
    }
    assert_eq!(game.status(), GameStatus::Stalemate);

    let replayed = replay(&archive(&game)).unwrap();
    assert_eq!(replayed.status(), GameStatus::Stalemate);
    assert_eq!(replayed.result_tag(), "1/2-1/2");
    assert_eq!(replayed.board(), game.board());
}

// =====================================================================
// Promotion under pressure
// =====================================================================

#[test]
fn promotion_captures_into_the_corner() {
    // March the a-pawn to b7 and take the rook on a8, promoting.
    let mut game = Game::new();
    play(&mut game, "a2", "a4");
    play(&mut game, "h7", "h5");
    play(&mut game, "a4", "a5");
    play(&mut game, "h5", "h4");
    play(&mut game, "a5", "a6");
    play(&mut game, "h4", "h3");
    play(&mut game, "a6", "b7");
    play(&mut game, "h3", "g2");
    let record = game
        .make_move(sq("b7"), sq("a8"), Some(PieceKind::Queen))
        .unwrap();

    assert_eq!(record.promotion, Some(PieceKind::Queen));
    assert_eq!(record.captured.map(|p| p.kind), Some(PieceKind::Rook));
    // The b8 knight shields the king, so the new queen gives no check.
    assert!(!record.is_check);
    assert_eq!(record.to_algebraic(), "bxa8=Q");
    assert_eq!(game.status(), GameStatus::Active);
    assert_eq!(
        game.board().piece_at(sq("a8")),
        Some(Piece::new(PieceKind::Queen, Color::White).moved())
    );
}
