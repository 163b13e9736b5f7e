//! Resolution engine - the swap / clear / fall state machine
//!
//! The engine owns the board and the score/move ledger. It never reads a clock:
//! every public call performs one logical step and returns. A frame driver calls
//! [`ResolutionEngine::advance`] whenever the previous animation has finished; a
//! test or headless caller can call [`ResolutionEngine::resolve`] and get the same
//! final board and score immediately.
//!
//! ```text
//!            attempt_swap (valid)
//!   Idle ───────────────────────────► AwaitingSwapAnimation
//!    ▲                                        │ advance: score + Clear
//!    │ no match / nothing fell                ▼
//!    └──────────── Falling ◄──────────── Clearing
//!                    │      advance: empty   ▲
//!                    │      cells + gravity  │
//!                    └───────────────────────┘
//!                      advance: new matches (chain + 1)
//! ```

use tracing::{debug, info, instrument};

use crate::core::{apply_gravity, clear_score, find_matches, Board, MatchSet, SimpleRng, TileSource};
use crate::events::EngineEvent;
use crate::types::Position;

/// Logical phase of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Stable board; swaps are accepted.
    Idle,
    /// A valid swap was committed; the first clear has not been applied yet.
    AwaitingSwapAnimation,
    /// Matched cells have been scored and are waiting to be removed.
    Clearing,
    /// Gravity has run; the board is waiting to be re-checked for matches.
    Falling,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::AwaitingSwapAnimation => "awaiting_swap_animation",
            Phase::Clearing => "clearing",
            Phase::Falling => "falling",
        }
    }
}

/// Result of [`ResolutionEngine::attempt_swap`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapOutcome {
    /// Swap committed; a cascade is pending.
    Valid,
    /// No run would form; the board is unchanged and no move was used.
    Invalid,
    /// Engine busy or game over; nothing happened.
    Ignored,
}

/// Result of one [`ResolutionEngine::advance`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Nothing to do.
    Idle,
    /// Entered the given phase.
    Advanced(Phase),
    /// The cascade finished and the engine is back to `Idle`.
    MoveResolved,
}

/// Match-resolution state machine
#[derive(Debug, Clone)]
pub struct ResolutionEngine<S = SimpleRng> {
    board: Board,
    tiles: S,
    phase: Phase,
    /// Cascade depth within the current move.
    chain: u32,
    /// Match set being scored / cleared.
    pending: MatchSet,
    score: u32,
    move_budget: u32,
    moves_remaining: u32,
    /// A valid swap has been committed and its move not yet charged.
    move_owed: bool,
    game_over: bool,
    events: Vec<EngineEvent>,
}

impl ResolutionEngine<SimpleRng> {
    /// Create an engine with a freshly generated board
    pub fn new(seed: u32, move_budget: u32) -> Self {
        Self::with_tiles(SimpleRng::new(seed), move_budget)
    }
}

impl<S: TileSource> ResolutionEngine<S> {
    /// Create an engine drawing both the initial board and refills from `tiles`
    pub fn with_tiles(mut tiles: S, move_budget: u32) -> Self {
        let board = Board::generate(&mut tiles);
        Self::with_board(board, tiles, move_budget)
    }

    /// Create an engine around an existing board
    ///
    /// The board is used as-is; callers are responsible for handing in a stable,
    /// fully packed board.
    pub fn with_board(board: Board, tiles: S, move_budget: u32) -> Self {
        Self {
            board,
            tiles,
            phase: Phase::Idle,
            chain: 0,
            pending: MatchSet::new(),
            score: 0,
            move_budget,
            moves_remaining: move_budget,
            move_owed: false,
            game_over: move_budget == 0,
            events: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    pub fn chain(&self) -> u32 {
        self.chain
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn move_budget(&self) -> u32 {
        self.move_budget
    }

    pub fn moves_remaining(&self) -> u32 {
        self.moves_remaining
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Cells scored in the current clear step (empty outside a cascade)
    pub fn pending_matches(&self) -> &MatchSet {
        &self.pending
    }

    /// Take all events emitted since the last call
    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Try to swap two adjacent cells
    ///
    /// Panics if either position is off the board or the two are not
    /// horizontally/vertically adjacent.
    #[instrument(level = "debug", skip(self))]
    pub fn attempt_swap(&mut self, a: Position, b: Position) -> SwapOutcome {
        assert!(
            a.in_bounds() && b.in_bounds(),
            "swap positions must be on the board: {a} {b}"
        );
        assert!(a.is_adjacent(b), "swap positions must be adjacent: {a} {b}");

        if self.phase != Phase::Idle || self.game_over {
            debug!(phase = self.phase.as_str(), game_over = self.game_over, "swap ignored");
            return SwapOutcome::Ignored;
        }

        let (Some(tile_a), Some(tile_b)) = (self.board.get(a), self.board.get(b)) else {
            panic!("idle board has an empty cell at {a} or {b}");
        };

        self.board.swap(a, b);
        let matches = find_matches(&self.board);

        if matches.is_empty() {
            self.board.swap(a, b);
            debug!(%tile_a, %tile_b, "invalid swap");
            self.events.push(EngineEvent::InvalidSwap {
                tile_a,
                tile_b,
                pos_a: a,
                pos_b: b,
            });
            return SwapOutcome::Invalid;
        }

        debug!(%tile_a, %tile_b, matched = matches.len(), "valid swap");
        self.chain = 0;
        self.move_owed = true;
        self.pending = matches.clone();
        self.phase = Phase::AwaitingSwapAnimation;
        self.events.push(EngineEvent::ValidSwap {
            tile_a,
            tile_b,
            pos_a: a,
            pos_b: b,
            matches,
        });
        SwapOutcome::Valid
    }

    /// Perform the next phase transition
    pub fn advance(&mut self) -> Step {
        match self.phase {
            Phase::Idle => Step::Idle,
            Phase::AwaitingSwapAnimation => {
                if self.pending.is_empty() {
                    return self.finish_move();
                }
                self.begin_clear();
                Step::Advanced(Phase::Clearing)
            }
            Phase::Clearing => {
                for pos in self.pending.iter() {
                    self.board.clear_cell(pos);
                }
                self.pending.clear();

                let displacements = apply_gravity(&mut self.board, &mut self.tiles);
                if displacements.is_empty() {
                    return self.finish_move();
                }

                debug!(moved = displacements.len(), chain = self.chain, "gravity settled");
                self.events.push(EngineEvent::Fall { displacements });
                self.phase = Phase::Falling;
                Step::Advanced(Phase::Falling)
            }
            Phase::Falling => {
                let matches = find_matches(&self.board);
                if matches.is_empty() {
                    return self.finish_move();
                }

                self.chain += 1;
                self.pending = matches;
                self.begin_clear();
                Step::Advanced(Phase::Clearing)
            }
        }
    }

    /// Run phase transitions until the engine is idle again
    ///
    /// Returns the number of transitions performed.
    pub fn resolve(&mut self) -> usize {
        let mut steps = 0;
        loop {
            match self.advance() {
                Step::Idle => return steps,
                Step::MoveResolved => return steps + 1,
                Step::Advanced(_) => steps += 1,
            }
        }
    }

    /// Start a new game: fresh board, zero score, full move budget
    pub fn reset(&mut self) {
        self.board.regenerate(&mut self.tiles);
        self.phase = Phase::Idle;
        self.chain = 0;
        self.pending.clear();
        self.score = 0;
        self.moves_remaining = self.move_budget;
        self.move_owed = false;
        self.game_over = self.move_budget == 0;
        self.events.clear();
        info!(move_budget = self.move_budget, "game reset");
    }

    /// Score the pending matches and enter `Clearing`
    fn begin_clear(&mut self) {
        let score_delta = clear_score(self.pending.len(), self.chain);
        self.score = self.score.saturating_add(score_delta);
        debug!(
            matched = self.pending.len(),
            chain = self.chain,
            score_delta,
            score = self.score,
            "clear"
        );

        self.events.push(EngineEvent::Clear {
            matches: self.pending.clone(),
            chain: self.chain,
            score_delta,
        });
        self.phase = Phase::Clearing;
    }

    /// Return to `Idle`, charging the move owed by the committed swap
    fn finish_move(&mut self) -> Step {
        self.pending.clear();
        self.phase = Phase::Idle;

        if self.move_owed {
            self.move_owed = false;
            self.moves_remaining = self.moves_remaining.saturating_sub(1);
            info!(
                score = self.score,
                moves_remaining = self.moves_remaining,
                chain = self.chain,
                "move resolved"
            );
            self.events.push(EngineEvent::MoveResolved {
                final_score: self.score,
                moves_remaining: self.moves_remaining,
            });

            if self.moves_remaining == 0 {
                self.game_over = true;
                info!(final_score = self.score, "game over");
                self.events.push(EngineEvent::GameOver {
                    final_score: self.score,
                });
            }
        }

        Step::MoveResolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ScriptedTiles;
    use crate::types::TileKind;

    /// (col + 2*row) % 5 never repeats between neighbours.
    fn striped_indices() -> [[u8; 8]; 8] {
        let mut rows = [[0u8; 8]; 8];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, v) in row.iter_mut().enumerate() {
                *v = ((c + 2 * r) % 5) as u8;
            }
        }
        rows
    }

    fn engine_with(rows: [[u8; 8]; 8]) -> ResolutionEngine<ScriptedTiles> {
        ResolutionEngine::with_board(
            Board::from_indices(rows),
            ScriptedTiles::new(TileKind::ALL.to_vec()),
            30,
        )
    }

    #[test]
    fn test_new_engine_is_idle() {
        let engine = ResolutionEngine::new(12345, 30);
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.moves_remaining(), 30);
        assert!(!engine.is_game_over());
        assert!(engine.board().is_packed());
    }

    #[test]
    fn test_invalid_swap_keeps_board_and_moves() {
        let mut engine = engine_with(striped_indices());
        let before = engine.board().clone();

        let outcome = engine.attempt_swap(Position::new(0, 0), Position::new(0, 1));

        assert_eq!(outcome, SwapOutcome::Invalid);
        assert_eq!(engine.board(), &before);
        assert_eq!(engine.phase(), Phase::Idle);
        assert_eq!(engine.moves_remaining(), 30);
        let events = engine.take_events();
        assert!(matches!(events.as_slice(), [EngineEvent::InvalidSwap { .. }]));
    }

    #[test]
    fn test_swap_ignored_while_resolving() {
        let mut rows = striped_indices();
        // Dropping the Burger at (6,2) into row 7 makes four in a row.
        rows[7] = [3, 3, 4, 3, 0, 1, 2, 4];
        rows[6][2] = 3;
        let mut engine = engine_with(rows);

        assert_eq!(
            engine.attempt_swap(Position::new(6, 2), Position::new(7, 2)),
            SwapOutcome::Valid
        );
        assert_eq!(engine.phase(), Phase::AwaitingSwapAnimation);
        assert_eq!(
            engine.attempt_swap(Position::new(0, 0), Position::new(0, 1)),
            SwapOutcome::Ignored
        );
    }

    #[test]
    #[should_panic(expected = "adjacent")]
    fn test_non_adjacent_swap_panics() {
        let mut engine = ResolutionEngine::new(1, 30);
        engine.attempt_swap(Position::new(0, 0), Position::new(0, 2));
    }

    #[test]
    fn test_empty_pending_at_commit_ends_move() {
        let mut engine = engine_with(striped_indices());
        engine.phase = Phase::AwaitingSwapAnimation;
        engine.move_owed = true;

        assert_eq!(engine.advance(), Step::MoveResolved);
        assert_eq!(engine.moves_remaining(), 29);
        let events = engine.take_events();
        assert!(!events
            .iter()
            .any(|e| matches!(e, EngineEvent::Clear { .. })));
    }

    #[test]
    fn test_advance_on_idle_is_noop() {
        let mut engine = ResolutionEngine::new(3, 30);
        assert_eq!(engine.advance(), Step::Idle);
        assert_eq!(engine.resolve(), 0);
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn test_reset_restores_budget() {
        let mut engine = ResolutionEngine::new(5, 1);
        engine.moves_remaining = 0;
        engine.game_over = true;
        engine.score = 500;

        engine.reset();

        assert_eq!(engine.moves_remaining(), 1);
        assert_eq!(engine.score(), 0);
        assert!(!engine.is_game_over());
        assert!(engine.board().is_packed());
    }
}
