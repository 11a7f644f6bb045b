//! Level module - validated configuration and the generation pipeline
//!
//! `generate_level` runs deck → layout → sort → occlusion and hands back a
//! ready-to-play [`Board`].

use thiserror::Error;

use crate::board::Board;
use crate::deck::create_deck;
use crate::layout::strategy_for;
use crate::rng::RandomSource;
use crate::types::{LayoutPattern, LevelConfig, TileKind};

/// Smallest grid with an interior cell (`1..=grid-2` must be non-empty).
pub const MIN_GRID_SIZE: u32 = 3;

/// Rejected level parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LevelConfigError {
    #[error("grid size {0} is too small (minimum {min})", min = MIN_GRID_SIZE)]
    GridTooSmall(u32),
    #[error("a level needs at least one tile")]
    NoTiles,
    #[error("active type count {0} is outside 1..={max}", max = TileKind::COUNT)]
    TypeCountOutOfRange(u8),
}

/// Build a checked [`LevelConfig`].
pub fn level_config(
    grid_size: u32,
    total_tiles: u32,
    active_type_count: u8,
    layout_pattern: LayoutPattern,
) -> Result<LevelConfig, LevelConfigError> {
    let config = LevelConfig {
        grid_size,
        total_tiles,
        active_type_count,
        layout_pattern,
    };
    validate(&config)?;
    Ok(config)
}

/// Check a configuration built by hand.
pub fn validate(config: &LevelConfig) -> Result<(), LevelConfigError> {
    if config.grid_size < MIN_GRID_SIZE {
        return Err(LevelConfigError::GridTooSmall(config.grid_size));
    }
    if config.total_tiles == 0 {
        return Err(LevelConfigError::NoTiles);
    }
    if config.active_type_count == 0 || config.active_type_count as usize > TileKind::COUNT {
        return Err(LevelConfigError::TypeCountOutOfRange(
            config.active_type_count,
        ));
    }
    Ok(())
}

/// Generate a fresh board for `config`.
pub fn generate_level<R: RandomSource>(config: &LevelConfig, rng: &mut R) -> Board {
    let deck = create_deck(config.total_tiles, config.active_type_count, rng);
    let tiles = strategy_for(config.layout_pattern).place(&deck, config.grid_size, rng);
    Board::from_tiles(tiles)
}
