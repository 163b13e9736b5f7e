//! Headless greedy player.
//!
//! Plays one game with the planner's best swap each turn and prints every engine
//! event as a JSON line on stdout, followed by a summary line.
//!
//! ```text
//! autoplay [--seed N] [--moves N]
//! ```

use std::io::{self, BufWriter, Write};

use anyhow::{anyhow, Context, Result};
use tracing::{info, warn};

use tui_match3::engine::planner::best_swap;
use tui_match3::engine::{GameConfig, GameSession, SwapOutcome, TapOutcome};
use tui_match3::logging;
use tui_match3::protocol::{EventBody, EventEncoder, Summary};

fn parse_args(args: &[String], mut config: GameConfig) -> Result<GameConfig> {
    let mut i = 0usize;
    while i < args.len() {
        let flag = args[i].as_str();
        match flag {
            "--seed" | "--moves" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("autoplay: missing value for {}", flag))?;
                let n = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("autoplay: invalid {} value: {}", flag, v))?;
                config = if flag == "--seed" {
                    config.with_seed(n)
                } else {
                    config.with_move_budget(n)
                };
            }
            other => return Err(anyhow!("autoplay: unknown argument: {}", other)),
        }
        i += 1;
    }
    config.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    logging::init_stderr();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = GameConfig::from_env().context("reading MATCH3_* environment")?;
    let config = parse_args(&args, config)?;
    let seed = config.resolved_seed();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let summary = play(seed, config.move_budget, &mut out)?;
    info!(score = summary.score, moves_used = summary.moves_used, "autoplay finished");
    out.flush()?;
    Ok(())
}

fn play(seed: u32, move_budget: u32, out: &mut impl Write) -> Result<Summary> {
    let mut session = GameSession::new(seed, move_budget);
    let mut enc = EventEncoder::new();
    let mut dead_board = false;

    while !session.is_game_over() {
        let Some(swap) = best_swap(session.board()) else {
            warn!(moves_remaining = session.moves_remaining(), "no valid swap left");
            dead_board = true;
            break;
        };

        session.select_cell(swap.a);
        let outcome = session.select_cell(swap.b);
        if outcome != TapOutcome::Swapped(SwapOutcome::Valid) {
            return Err(anyhow!("planner picked a swap the engine rejected: {:?}", outcome));
        }
        session.resolve();

        for event in session.take_events() {
            writeln!(out, "{}", enc.encode_event(&event)?)?;
        }
    }

    let summary = Summary {
        seed,
        score: session.score(),
        moves_used: move_budget - session.moves_remaining(),
        moves_remaining: session.moves_remaining(),
        game_over: session.is_game_over(),
        dead_board,
    };
    writeln!(out, "{}", enc.encode(EventBody::Summary(summary.clone()))?)?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args: Vec<String> = ["--seed", "7", "--moves", "5"].iter().map(|s| s.to_string()).collect();
        let cfg = parse_args(&args, GameConfig::default()).unwrap();
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.move_budget, 5);

        assert!(parse_args(&["--seed".to_string()], GameConfig::default()).is_err());
        assert!(parse_args(&["--moves".to_string(), "0".to_string()], GameConfig::default()).is_err());
        assert!(parse_args(&["--fast".to_string()], GameConfig::default()).is_err());
    }

    #[test]
    fn test_play_emits_summary_last() {
        let mut buf = Vec::new();
        let summary = play(42, 3, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let last = text.lines().last().unwrap();

        assert!(last.contains("\"type\":\"summary\""));
        assert_eq!(summary.moves_used + summary.moves_remaining, 3);
        assert!(summary.game_over || summary.dead_board);
    }
}
