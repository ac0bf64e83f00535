//! Property tests for the engine invariants.
//!
//! - A piece that does not collide sits on in-bounds, empty cells.
//! - The falling piece never overlaps walls, floor or locked cells.
//! - No full row survives a lock.
//! - The generator never deals the same kind three times in a row.
//! - The drop interval never grows with level and never drops below 100ms.
//! - Hard drop lands exactly where repeated soft drops would.
//! - Autorepeat never fires faster than its delay and rate allow.

use proptest::prelude::*;

use blockfall::core::{
    drop_interval_ms, AutorepeatController, Board, EngineEvent, EngineStatus, Piece,
    PieceGenerator, PuzzleEngine, Shape,
};
use blockfall::types::{Command, InputKey, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, MAX_STREAK};

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::MoveLeft),
        Just(Command::MoveRight),
        Just(Command::SoftDrop),
        Just(Command::Rotate),
        Just(Command::HardDrop),
        Just(Command::TogglePause),
    ]
}

/// Random litter on the bottom rows, never a full row.
fn bottom_board() -> impl Strategy<Value = Board> {
    prop::collection::vec(any::<bool>(), (BOARD_WIDTH as usize) * 6).prop_map(|bits| {
        let mut board = Board::new();
        for (i, filled) in bits.into_iter().enumerate() {
            let x = (i % BOARD_WIDTH as usize) as i8;
            let y = (BOARD_HEIGHT as usize - 1 - i / BOARD_WIDTH as usize) as i8;
            // Column 0 stays open so no row starts full.
            if filled && x != 0 {
                board.set(x, y, Some(PieceKind::Z));
            }
        }
        board
    })
}

fn piece_kind() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

/// Any cell may be filled, full rows included.
fn scattered_board() -> impl Strategy<Value = Board> {
    prop::collection::vec(prop::bool::weighted(0.2), (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize))
        .prop_map(|bits| {
            let mut board = Board::new();
            for (i, filled) in bits.into_iter().enumerate() {
                if filled {
                    let x = (i % BOARD_WIDTH as usize) as i8;
                    let y = (i / BOARD_WIDTH as usize) as i8;
                    board.set(x, y, Some(PieceKind::T));
                }
            }
            board
        })
}

fn assert_piece_legal(engine: &PuzzleEngine) {
    if engine.status() == EngineStatus::GameOver {
        return;
    }
    let piece = engine.current();
    assert!(!piece.collides(engine.board(), 0, 0, None), "piece overlaps at {piece:?}");
}

proptest! {
    #[test]
    fn non_colliding_pieces_map_to_free_cells(
        board in scattered_board(),
        kind in piece_kind(),
        turns in 0usize..4,
        x in -4i8..(BOARD_WIDTH as i8 + 2),
        y in -4i8..(BOARD_HEIGHT as i8 + 2),
    ) {
        let mut shape = Shape::template(kind);
        for _ in 0..turns {
            shape = shape.rotated_cw();
        }
        let piece = Piece::with_shape(kind, shape, x, y);
        if piece.collides(&board, 0, 0, None) {
            return Ok(());
        }

        let width = BOARD_WIDTH as i8;
        let cells: Vec<(i8, i8)> = piece.cells().collect();
        for &(cx, cy) in &cells {
            prop_assert!((0..width).contains(&cx), "column {cx} out of bounds");
            prop_assert!(cy < BOARD_HEIGHT as i8, "row {cy} below the floor");
            if cy >= 0 {
                let idx = cy as usize * BOARD_WIDTH as usize + cx as usize;
                prop_assert!(board.cells()[idx].is_none(), "({cx}, {cy}) is occupied");
            }
        }
        let mut distinct = cells.clone();
        distinct.sort_unstable();
        distinct.dedup();
        prop_assert_eq!(distinct.len(), cells.len());
    }

    #[test]
    fn commands_keep_the_piece_legal(
        seed in any::<u32>(),
        commands in prop::collection::vec(command(), 1..200),
    ) {
        let mut engine = PuzzleEngine::new(seed);
        for command in commands {
            engine.apply(command);
            assert_piece_legal(&engine);
            for y in 0..BOARD_HEIGHT as usize {
                prop_assert!(!engine.board().is_row_full(y));
            }
        }
    }

    #[test]
    fn frames_and_keys_keep_the_piece_legal(
        seed in any::<u32>(),
        steps in prop::collection::vec((0usize..6, any::<bool>(), 0u32..300), 1..150),
    ) {
        let keys = [
            InputKey::Left,
            InputKey::Right,
            InputKey::Down,
            InputKey::Rotate,
            InputKey::HardDrop,
            InputKey::Pause,
        ];
        let mut engine = PuzzleEngine::new(seed);
        for (key, down, elapsed) in steps {
            if down {
                engine.key_down(keys[key]);
            } else {
                engine.key_up(keys[key]);
            }
            engine.frame(elapsed);
            assert_piece_legal(&engine);
        }
    }

    #[test]
    fn generator_never_deals_three_in_a_row(seed in any::<u32>()) {
        let mut generator = PieceGenerator::new(seed);
        let mut last = None;
        let mut run = 0u8;
        for _ in 0..500 {
            let kind = generator.draw();
            if Some(kind) == last {
                run += 1;
            } else {
                last = Some(kind);
                run = 1;
            }
            prop_assert!(run <= MAX_STREAK);
        }
    }

    #[test]
    fn drop_interval_is_monotonic(level in 1u32..200) {
        let here = drop_interval_ms(level);
        let next = drop_interval_ms(level + 1);
        prop_assert!(next <= here);
        prop_assert!(here >= 100);
        prop_assert!(here <= 1000);
    }

    #[test]
    fn hard_drop_matches_repeated_soft_drop(
        seed in any::<u32>(),
        board in bottom_board(),
        shifts in -5i8..5,
    ) {
        let mut hard = PuzzleEngine::with_board(seed, board);
        prop_assume!(hard.status() == EngineStatus::Running);
        for _ in 0..shifts.unsigned_abs() {
            if shifts < 0 {
                hard.move_left();
            } else {
                hard.move_right();
            }
        }
        let mut soft = hard.clone();
        soft.take_events();

        hard.hard_drop();

        // Soft drop until the piece locks.
        let mut steps = 0;
        loop {
            soft.move_down();
            steps += 1;
            let locked = soft
                .take_events()
                .iter()
                .any(|e| matches!(e, EngineEvent::PieceLocked { .. }));
            if locked || steps > BOARD_HEIGHT as usize + 4 {
                break;
            }
        }
        prop_assert_eq!(soft.board(), hard.board());
        prop_assert_eq!(soft.score(), hard.score());
    }

    #[test]
    fn autorepeat_never_exceeds_delay_and_rate(
        frames in prop::collection::vec(1u32..120, 1..100),
    ) {
        let mut controller = AutorepeatController::new();
        controller.press(InputKey::Right);
        let mut total = 0u32;
        let mut fires = 0u32;
        for elapsed in frames {
            // The first frame fires before any time counts.
            if fires > 0 {
                total += elapsed;
            }
            fires += controller
                .update(elapsed)
                .iter()
                .filter(|c| **c == Command::MoveRight)
                .count() as u32;
        }
        let bound = if total >= 170 { 2 + (total - 170) / 50 } else { 1 };
        prop_assert!(fires >= 1);
        prop_assert!(fires <= bound, "{fires} fires in {total}ms");
    }
}
