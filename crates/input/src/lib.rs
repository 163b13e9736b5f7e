//! Terminal input module.
//!
//! Maps `crossterm` key and mouse events onto board interactions. Keyboard play
//! moves a [`Cursor`] over the grid and "taps" the cell under it; mouse play taps
//! cells directly once the front-end has translated screen coordinates.

pub mod cursor;
pub mod map;

pub use match3_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, mouse_press, should_quit, InputAction};
