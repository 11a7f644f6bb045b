//! Terminal input module.
//!
//! This crate is independent of any rendering code. It maps `crossterm` key
//! and mouse events into menu choices and play commands, and provides a
//! keyboard cursor for picking tiles without a mouse.

pub mod cursor;
pub mod map;

pub use tui_sheep_core as core;
pub use tui_sheep_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, handle_menu_key, mouse_pick, should_quit, MenuChoice, PlayInput};
