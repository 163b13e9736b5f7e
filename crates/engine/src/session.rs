//! Player-facing session: tap selection on top of the resolution engine

use tracing::debug;

use crate::config::GameConfig;
use crate::core::{Board, SimpleRng, TileSource};
use crate::engine::{Phase, ResolutionEngine, Step, SwapOutcome};
use crate::events::EngineEvent;
use crate::snapshot::{board_hash, GameSnapshot};
use crate::types::Position;

/// What a tap did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapOutcome {
    /// Engine busy or game over.
    Ignored,
    /// The cell is now the selection.
    Selected(Position),
    /// The selected cell was tapped again.
    Deselected,
    /// An adjacent cell was tapped and a swap was attempted.
    Swapped(SwapOutcome),
}

#[derive(Debug, Clone)]
pub struct GameSession<S = SimpleRng> {
    engine: ResolutionEngine<S>,
    selection: Option<Position>,
}

impl GameSession<SimpleRng> {
    pub fn new(seed: u32, move_budget: u32) -> Self {
        Self::from_engine(ResolutionEngine::new(seed, move_budget))
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.resolved_seed(), config.move_budget)
    }
}

impl<S: TileSource> GameSession<S> {
    pub fn from_engine(engine: ResolutionEngine<S>) -> Self {
        Self {
            engine,
            selection: None,
        }
    }

    pub fn with_board(board: Board, tiles: S, move_budget: u32) -> Self {
        Self::from_engine(ResolutionEngine::with_board(board, tiles, move_budget))
    }

    pub fn engine(&self) -> &ResolutionEngine<S> {
        &self.engine
    }

    pub fn board(&self) -> &Board {
        self.engine.board()
    }

    pub fn selection(&self) -> Option<Position> {
        self.selection
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }

    pub fn chain(&self) -> u32 {
        self.engine.chain()
    }

    pub fn score(&self) -> u32 {
        self.engine.score()
    }

    pub fn moves_remaining(&self) -> u32 {
        self.engine.moves_remaining()
    }

    pub fn is_game_over(&self) -> bool {
        self.engine.is_game_over()
    }

    /// Handle a tap on `pos`
    ///
    /// The first tap selects; a second tap on an adjacent cell attempts the swap,
    /// on the same cell deselects, anywhere else moves the selection.
    pub fn select_cell(&mut self, pos: Position) -> TapOutcome {
        assert!(pos.in_bounds(), "tap outside the board: {pos}");

        if !self.engine.is_idle() || self.engine.is_game_over() {
            return TapOutcome::Ignored;
        }

        match self.selection {
            None => {
                self.selection = Some(pos);
                TapOutcome::Selected(pos)
            }
            Some(current) if current == pos => {
                self.selection = None;
                TapOutcome::Deselected
            }
            Some(current) if current.is_adjacent(pos) => {
                self.selection = Some(pos);
                let outcome = self.engine.attempt_swap(current, pos);
                if outcome == SwapOutcome::Invalid {
                    self.selection = None;
                }
                debug!(from = %current, to = %pos, ?outcome, "tap swap");
                TapOutcome::Swapped(outcome)
            }
            Some(_) => {
                self.selection = Some(pos);
                TapOutcome::Selected(pos)
            }
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn advance(&mut self) -> Step {
        let step = self.engine.advance();
        if step == Step::MoveResolved {
            self.selection = None;
        }
        step
    }

    pub fn resolve(&mut self) -> usize {
        let steps = self.engine.resolve();
        if steps > 0 {
            self.selection = None;
        }
        steps
    }

    pub fn take_events(&mut self) -> Vec<EngineEvent> {
        self.engine.take_events()
    }

    pub fn reset(&mut self) {
        self.engine.reset();
        self.selection = None;
    }

    /// Fill `out` without allocating
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.engine.board().write_u8_grid(&mut out.board);
        out.board_hash = board_hash(&out.board);
        out.score = self.engine.score();
        out.moves_remaining = self.engine.moves_remaining();
        out.move_budget = self.engine.move_budget();
        out.chain = self.engine.chain();
        out.phase = self.engine.phase();
        out.selection = self.selection;
        out.game_over = self.engine.is_game_over();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_tap_selects_second_tap_deselects() {
        let mut session = GameSession::new(7, 30);
        let p = Position::new(2, 3);

        assert_eq!(session.select_cell(p), TapOutcome::Selected(p));
        assert_eq!(session.selection(), Some(p));
        assert_eq!(session.select_cell(p), TapOutcome::Deselected);
        assert_eq!(session.selection(), None);
    }

    #[test]
    fn test_far_tap_moves_selection() {
        let mut session = GameSession::new(7, 30);
        session.select_cell(Position::new(0, 0));
        let far = Position::new(5, 5);
        assert_eq!(session.select_cell(far), TapOutcome::Selected(far));
        assert_eq!(session.selection(), Some(far));
        assert_eq!(session.phase(), Phase::Idle);
    }

    #[test]
    fn test_snapshot_mirrors_engine() {
        let mut session = GameSession::new(99, 12);
        session.select_cell(Position::new(1, 1));
        let snap = session.snapshot();

        assert_eq!(snap.moves_remaining, 12);
        assert_eq!(snap.move_budget, 12);
        assert_eq!(snap.selection, Some(Position::new(1, 1)));
        assert_eq!(snap.board_hash, board_hash(&snap.board));
        assert!(snap.board.iter().flatten().all(|&v| (1..=5).contains(&v)));
    }

    mod prop {
        use super::*;
        use crate::core::find_matches;
        use proptest::prelude::*;

        proptest! {
            /// Property: every valid swap costs exactly one move and leaves a stable board
            #[test]
            fn prop_random_taps_keep_ledger_consistent(
                seed in any::<u32>(),
                taps in proptest::collection::vec((0u8..8, 0u8..8), 0..40)
            ) {
                let mut session = GameSession::new(seed, 30);
                let mut valid = 0u32;

                for (row, col) in taps {
                    if let TapOutcome::Swapped(SwapOutcome::Valid) = session.select_cell(Position::new(row, col)) {
                        valid += 1;
                    }
                    session.resolve();

                    prop_assert_eq!(session.phase(), Phase::Idle);
                    prop_assert!(session.board().is_packed());
                    prop_assert!(find_matches(session.board()).is_empty());
                }

                prop_assert_eq!(session.moves_remaining(), 30 - valid);
                prop_assert_eq!(valid == 0, session.score() == 0);
            }
        }
    }
}
