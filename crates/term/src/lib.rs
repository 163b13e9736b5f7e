//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer: the board is drawn into a plain
//! framebuffer which is then flushed to the terminal. It deliberately avoids
//! widget/layout libraries so tile geometry (4x2 characters per cell by
//! default) and animation offsets stay under direct control.

pub mod animation;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use match3_core as core;
pub use match3_engine as engine;
pub use match3_types as types;

pub use animation::{Animation, AnimationFrame, Animator};
pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{BoardRect, GameView, Scene, Viewport};
pub use renderer::{encode_frame_into, TerminalRenderer};
