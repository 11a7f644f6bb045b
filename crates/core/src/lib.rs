//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules of the tile-matching puzzle: level
//! generation, occlusion, the matching slot and the timed phase machine.
//! It has no dependencies on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: Same seed and config produce the identical level
//! - **Testable**: Every rule is reachable from plain function calls
//! - **Portable**: Runs in the terminal front end or headless
//!
//! # Module Structure
//!
//! - [`rng`]: LCG random source and Fisher-Yates shuffle
//! - [`deck`]: Triplet-complete multiset of tile kinds
//! - [`layout`]: Layout strategies that position a deck on the grid
//! - [`occlusion`]: Which tiles are covered and therefore not clickable
//! - [`board`]: Value-semantics collection of tiles still in play
//! - [`slot`]: The seven-place matching tray
//! - [`level`]: Config validation and the generation pipeline
//! - [`game_state`]: Commands, phases and outcomes
//! - [`snapshot`]: Render-ready copy of the state
//!
//! # Example
//!
//! ```
//! use tui_sheep_core::GameState;
//! use tui_sheep_types::{GameAction, LevelConfig, Phase};
//!
//! let mut game = GameState::new(LevelConfig::EASY, 12345);
//!
//! // Pick any tile that is not covered
//! let id = game.board().tiles().iter().find(|t| t.clickable).unwrap().id;
//! assert!(game.apply_action(GameAction::Pick(id)));
//! assert_eq!(game.slot().len(), 1);
//!
//! // Advance the logical clock
//! game.tick(16);
//! assert_eq!(game.phase(), Phase::Idle);
//! ```
//!
//! # Timing
//!
//! Nothing here reads a wall clock. Call
//! [`GameState::tick`](game_state::GameState::tick) every frame with the elapsed
//! time; pop, match and loss delays count down only while unpaused.

pub mod board;
pub mod deck;
pub mod game_state;
pub mod layout;
pub mod level;
pub mod occlusion;
pub mod rng;
pub mod slot;
pub mod snapshot;
pub mod tile;

pub use tui_sheep_types as types;

// Re-export commonly used types for convenience
pub use board::Board;
pub use deck::create_deck;
pub use game_state::GameState;
pub use layout::{strategy_for, LayoutStrategy};
pub use level::{generate_level, level_config, validate, LevelConfigError};
pub use occlusion::{is_covered, update_clickability};
pub use rng::{RandomSource, ScriptedRng, SimpleRng};
pub use slot::Slot;
pub use snapshot::GameSnapshot;
pub use tile::{Placement, Tile};
