//! Terminal "game renderer" module.
//!
//! A small, game-oriented rendering layer for terminal play. It avoids
//! widget/layout libraries and instead renders into a simple framebuffer
//! that is flushed to a crossterm backend.
//!
//! Goals:
//! - Keep `core` deterministic and testable
//! - Draw and hit-test tiles from one shared layout
//! - Keep the per-frame path allocation-free

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use tui_sheep_core as core;
pub use tui_sheep_types as types;

pub use fb::{wrap_lines, Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{BoardLayout, GameView, HudView, Viewport, CELL_H, CELL_W};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
