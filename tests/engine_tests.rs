//! Resolution engine scenarios driven through the public API.

use tui_match3::core::{find_matches, Board, ScriptedTiles};
use tui_match3::engine::planner::best_swap;
use tui_match3::engine::{EngineEvent, Phase, ResolutionEngine, Step, SwapOutcome};
use tui_match3::types::{Position, TileKind};

/// Striped board `(col + 2*row) % 5` with row 0 replaced.
fn invalid_swap_board() -> Board {
    let mut rows = [[0u8; 8]; 8];
    for (r, row) in rows.iter_mut().enumerate() {
        for (c, v) in row.iter_mut().enumerate() {
            *v = ((c + 2 * r) % 5) as u8;
        }
    }
    rows[0] = [0, 0, 1, 2, 3, 4, 0, 1];
    Board::from_indices(rows)
}

/// Swapping (4,3)/(5,3) clears three Apples in column 3; the Pizza that drops
/// into (7,3) then completes four Pizzas in row 7.
fn cascade_board() -> Board {
    let mut rows = [[0u8; 8]; 8];
    for (r, row) in rows.iter_mut().enumerate() {
        for (c, v) in row.iter_mut().enumerate() {
            *v = (2 + (r + c) % 3) as u8;
        }
    }
    rows[7][1] = 1;
    rows[7][2] = 1;
    rows[7][3] = 0;
    rows[7][4] = 1;
    rows[6][3] = 0;
    rows[5][3] = 1;
    rows[4][3] = 0;
    Board::from_indices(rows)
}

/// Refills for the cascade: column 3 bottom-up, then row 0 of columns 1..=4.
fn cascade_tiles() -> ScriptedTiles {
    use TileKind::*;
    ScriptedTiles::new(vec![Cake, Burger, Sushi, Apple, Pizza, Apple, Pizza])
}

fn cascade_engine() -> ResolutionEngine<ScriptedTiles> {
    let board = cascade_board();
    assert!(find_matches(&board).is_empty());
    ResolutionEngine::with_board(board, cascade_tiles(), 30)
}

#[test]
fn invalid_swap_reports_and_changes_nothing() {
    let board = invalid_swap_board();
    assert!(find_matches(&board).is_empty());
    let mut engine = ResolutionEngine::with_board(board.clone(), cascade_tiles(), 30);

    let outcome = engine.attempt_swap(Position::new(0, 1), Position::new(0, 2));

    assert_eq!(outcome, SwapOutcome::Invalid);
    assert_eq!(engine.board(), &board);
    assert_eq!(engine.moves_remaining(), 30);
    assert_eq!(engine.score(), 0);
    assert_eq!(
        engine.take_events(),
        vec![EngineEvent::InvalidSwap {
            tile_a: TileKind::Apple,
            tile_b: TileKind::Pizza,
            pos_a: Position::new(0, 1),
            pos_b: Position::new(0, 2),
        }]
    );
}

#[test]
fn cascade_scores_110_for_one_move() {
    let mut engine = cascade_engine();

    assert_eq!(
        engine.attempt_swap(Position::new(4, 3), Position::new(5, 3)),
        SwapOutcome::Valid
    );
    engine.resolve();

    assert_eq!(engine.score(), 110);
    assert_eq!(engine.moves_remaining(), 29);
    assert_eq!(engine.phase(), Phase::Idle);
    assert!(engine.board().is_packed());
    assert!(find_matches(engine.board()).is_empty());
}

#[test]
fn cascade_event_sequence() {
    let mut engine = cascade_engine();
    engine.attempt_swap(Position::new(4, 3), Position::new(5, 3));
    engine.resolve();
    let events = engine.take_events();

    let names: Vec<_> = events.iter().map(EngineEvent::name).collect();
    assert_eq!(
        names,
        vec!["valid_swap", "clear", "fall", "clear", "fall", "move_resolved"]
    );

    match &events[0] {
        EngineEvent::ValidSwap {
            tile_a,
            tile_b,
            matches,
            ..
        } => {
            assert_eq!(*tile_a, TileKind::Apple);
            assert_eq!(*tile_b, TileKind::Pizza);
            assert_eq!(matches.len(), 3);
            assert!(matches.contains(Position::new(5, 3)));
        }
        other => panic!("unexpected first event: {other:?}"),
    }

    match (&events[1], &events[3]) {
        (
            EngineEvent::Clear {
                chain: 0,
                score_delta: 30,
                ..
            },
            EngineEvent::Clear {
                matches,
                chain: 1,
                score_delta: 80,
            },
        ) => {
            for col in 1..=4 {
                assert!(matches.contains(Position::new(7, col)));
            }
        }
        other => panic!("unexpected clears: {other:?}"),
    }

    // Column 3: five survivors shift by three, three new tiles enter.
    if let EngineEvent::Fall { displacements } = &events[2] {
        assert_eq!(displacements.len(), 8);
        assert_eq!(displacements.iter().filter(|d| d.is_new).count(), 3);
        assert!(displacements.iter().all(|d| d.from_col == 3 && d.distance() == 3));
    } else {
        panic!("expected fall");
    }

    assert_eq!(
        events[5],
        EngineEvent::MoveResolved {
            final_score: 110,
            moves_remaining: 29
        }
    );
}

#[test]
fn stepwise_advance_matches_resolve() {
    let mut paced = cascade_engine();
    let mut instant = cascade_engine();
    let (a, b) = (Position::new(4, 3), Position::new(5, 3));
    paced.attempt_swap(a, b);
    instant.attempt_swap(a, b);

    let mut phases = Vec::new();
    loop {
        match paced.advance() {
            Step::Advanced(phase) => phases.push(phase),
            Step::MoveResolved => break,
            Step::Idle => panic!("went idle without resolving"),
        }
    }
    instant.resolve();

    assert_eq!(
        phases,
        vec![Phase::Clearing, Phase::Falling, Phase::Clearing, Phase::Falling]
    );
    assert_eq!(paced.board(), instant.board());
    assert_eq!(paced.score(), instant.score());
    assert_eq!(paced.take_events(), instant.take_events());
}

#[test]
fn clearing_phase_keeps_matched_tiles_until_advanced() {
    let mut engine = cascade_engine();
    engine.attempt_swap(Position::new(4, 3), Position::new(5, 3));
    assert_eq!(engine.advance(), Step::Advanced(Phase::Clearing));

    // Scored already, cells still present for the fade-out.
    assert_eq!(engine.score(), 30);
    assert_eq!(engine.board().get(Position::new(7, 3)), Some(TileKind::Apple));
    assert_eq!(engine.pending_matches().len(), 3);

    assert_eq!(engine.advance(), Step::Advanced(Phase::Falling));
    assert!(engine.board().is_packed());
    assert!(engine.pending_matches().is_empty());
}

#[test]
fn swaps_ignored_after_game_over() {
    let mut engine = ResolutionEngine::with_board(cascade_board(), cascade_tiles(), 1);
    engine.attempt_swap(Position::new(4, 3), Position::new(5, 3));
    engine.resolve();

    assert!(engine.is_game_over());
    let events = engine.take_events();
    assert_eq!(events.last(), Some(&EngineEvent::GameOver { final_score: 110 }));

    let before = engine.board().clone();
    assert_eq!(
        engine.attempt_swap(Position::new(0, 0), Position::new(0, 1)),
        SwapOutcome::Ignored
    );
    assert_eq!(engine.board(), &before);
    assert!(engine.take_events().is_empty());

    engine.reset();
    assert!(!engine.is_game_over());
    assert_eq!(engine.moves_remaining(), 1);
    assert_eq!(engine.score(), 0);
}

#[test]
#[should_panic(expected = "on the board")]
fn swap_off_board_panics() {
    let mut engine = cascade_engine();
    engine.attempt_swap(Position::new(7, 7), Position::new(8, 7));
}

#[test]
fn thirty_valid_moves_end_the_game() {
    // Greedy play can hit a board with no valid swap; at least one seed in the
    // range plays the full budget.
    let finished = (1..=40u32).any(|seed| {
        let mut engine = ResolutionEngine::new(seed, 30);
        let mut resolved = 0;
        while !engine.is_game_over() {
            let Some(swap) = best_swap(engine.board()) else {
                return false;
            };
            assert_eq!(engine.attempt_swap(swap.a, swap.b), SwapOutcome::Valid);
            engine.resolve();
            resolved += engine
                .take_events()
                .iter()
                .filter(|e| matches!(e, EngineEvent::MoveResolved { .. }))
                .count();
        }
        assert_eq!(resolved, 30);
        assert_eq!(engine.moves_remaining(), 0);
        true
    });
    assert!(finished);
}
