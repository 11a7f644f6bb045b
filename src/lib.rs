//! TUI Sheep (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_sheep::{core,input,term,commentary,types}`
//! and hosts the front-end [`app`] glue used by the binary.

pub mod app;

pub use tui_sheep_commentary as commentary;
pub use tui_sheep_core as core;
pub use tui_sheep_input as input;
pub use tui_sheep_term as term;
pub use tui_sheep_types as types;
