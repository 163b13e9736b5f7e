//! Terminal match-3 runner (default binary).
//!
//! Fixed-timestep loop: poll input, tick the animator, and only step the engine
//! once the previous animation has finished. Rendering goes through the
//! framebuffer renderer in `match3-term`.

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use tracing::info;

use tui_match3::engine::{GameConfig, GameSession, GameSnapshot};
use tui_match3::input::{handle_key_event, mouse_press, should_quit, Cursor, InputAction};
use tui_match3::logging;
use tui_match3::term::{Animator, FrameBuffer, GameView, Scene, TerminalRenderer, Viewport};
use tui_match3::types::{Position, TICK_MS};

fn main() -> Result<()> {
    logging::init_file_from_env()?;
    let config = GameConfig::from_env().context("reading MATCH3_* environment")?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

struct App {
    session: GameSession,
    animator: Animator,
    cursor: Cursor,
    view: GameView,
    viewport: Viewport,
}

impl App {
    fn new(config: &GameConfig) -> Self {
        let seed = config.resolved_seed();
        info!(seed, move_budget = config.move_budget, "starting game");
        Self {
            session: GameSession::new(seed, config.move_budget),
            animator: Animator::new(),
            cursor: Cursor::new(),
            view: GameView::default(),
            viewport: Viewport::new(80, 24),
        }
    }

    fn tap(&mut self, pos: Position) {
        if !self.animator.is_idle() {
            return;
        }
        self.cursor.set(pos);
        self.session.select_cell(pos);
        self.drain_events();
    }

    fn handle_action(&mut self, action: InputAction) {
        match action {
            InputAction::Restart => {
                self.session.reset();
                self.animator.clear();
            }
            InputAction::Cancel => self.session.clear_selection(),
            other => {
                if let Some(pos) = self.cursor.apply(other) {
                    self.tap(pos);
                }
            }
        }
    }

    fn tick(&mut self, dt_ms: u32) {
        self.animator.tick(dt_ms);
        if self.animator.is_idle() && !self.session.engine().is_idle() {
            self.session.advance();
            self.drain_events();
        }
    }

    fn drain_events(&mut self) {
        let events = self.session.take_events();
        self.animator.push_events(&events);
    }

    fn render(&self, snap: &mut GameSnapshot, fb: &mut FrameBuffer) {
        self.session.snapshot_into(snap);
        let scene = Scene {
            cursor: Some(self.cursor.position()),
            animation: self.animator.frame(),
        };
        self.view.render_into(snap, &scene, self.viewport, fb);
    }
}

fn run(term: &mut TerminalRenderer, config: &GameConfig) -> Result<()> {
    let mut app = App::new(config);
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick = Duration::from_millis(TICK_MS as u64);
    let mut last_tick = Instant::now();

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);
        if viewport != app.viewport {
            app.viewport = viewport;
            term.invalidate();
        }
        app.render(&mut snap, &mut fb);
        term.draw(&fb)?;

        let timeout = tick.checked_sub(last_tick.elapsed()).unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        info!(score = app.session.score(), "quit");
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        app.handle_action(action);
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some((x, y)) = mouse_press(mouse) {
                        if let Some(pos) = app.view.cell_at(app.viewport, x, y) {
                            app.tap(pos);
                        }
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            app.tick(TICK_MS);
        }
    }
}
