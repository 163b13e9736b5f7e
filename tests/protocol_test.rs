use tui_match3::engine::planner::best_swap;
use tui_match3::engine::ResolutionEngine;
use tui_match3::protocol::{parse_line, EventBody, EventEncoder, Summary};

#[test]
fn encoded_game_parses_back_in_order() {
    let mut engine = ResolutionEngine::new(31337, 5);
    let mut enc = EventEncoder::new();
    let mut lines = Vec::new();

    while !engine.is_game_over() {
        let Some(swap) = best_swap(engine.board()) else { break };
        engine.attempt_swap(swap.a, swap.b);
        engine.resolve();
        for event in engine.take_events() {
            lines.push(enc.encode_event(&event).unwrap());
        }
    }

    assert!(!lines.is_empty());
    let parsed: Vec<_> = lines.iter().map(|l| parse_line(l).unwrap()).collect();

    for (i, line) in parsed.iter().enumerate() {
        assert_eq!(line.seq, i as u64 + 1);
    }
    assert!(matches!(parsed[0].body, EventBody::ValidSwap { .. }));
    assert!(matches!(parsed[1].body, EventBody::Clear { chain: 0, .. }));

    let resolved = parsed
        .iter()
        .filter(|l| matches!(l.body, EventBody::MoveResolved { .. }))
        .count();
    assert_eq!(resolved as u32, 5 - engine.moves_remaining());
}

#[test]
fn fall_lines_carry_negative_origins_for_new_tiles() {
    let mut engine = ResolutionEngine::new(8, 30);
    let swap = match best_swap(engine.board()) {
        Some(s) => s,
        None => return,
    };
    engine.attempt_swap(swap.a, swap.b);
    engine.resolve();

    let mut enc = EventEncoder::new();
    let fall = engine
        .take_events()
        .iter()
        .map(|e| enc.encode_event(e).unwrap())
        .find(|l| l.contains("\"type\":\"fall\""))
        .expect("a valid swap always triggers gravity");

    let v: serde_json::Value = serde_json::from_str(&fall).unwrap();
    let moves = v["displacements"].as_array().unwrap();
    assert!(moves
        .iter()
        .any(|m| m["is_new"] == true && m["from_row"].as_i64().unwrap() < 0));
}

#[test]
fn summary_line_round_trips() {
    let summary = Summary {
        seed: 9,
        score: 480,
        moves_used: 30,
        moves_remaining: 0,
        game_over: true,
        dead_board: false,
    };
    let line = EventEncoder::new()
        .encode(EventBody::Summary(summary.clone()))
        .unwrap();

    assert!(line.contains("\"type\":\"summary\""));
    assert_eq!(parse_line(&line).unwrap().body, EventBody::Summary(summary));
}
