use arrayvec::ArrayVec;

use crate::tile::Tile;
use crate::types::{LayoutPattern, Phase, TileId, MATCH_SIZE, MAX_SLOTS};

/// Read-only copy of everything a front end needs to draw a frame.
///
/// Reuse one value with [`crate::GameState::snapshot_into`]: the board vector
/// keeps its capacity across frames.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSnapshot {
    /// Board tiles in paint order: ascending `(draw_order, id)`. The last
    /// tile is never covered.
    pub tiles: Vec<Tile>,
    pub slot: ArrayVec<Tile, MAX_SLOTS>,
    pub matching: ArrayVec<TileId, MATCH_SIZE>,
    pub phase: Phase,
    pub phase_timer_ms: u32,
    pub paused: bool,
    pub move_count: u32,
    pub level_tiles: u32,
    pub episode_id: u32,
    pub grid_size: u32,
    pub layout_pattern: LayoutPattern,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn is_matching(&self, id: TileId) -> bool {
        self.matching.contains(&id)
    }

    /// Tiles cleared so far (board and slot both count as remaining).
    pub fn cleared(&self) -> u32 {
        let remaining = (self.tiles.len() + self.slot.len()) as u32;
        self.level_tiles.saturating_sub(remaining)
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            tiles: Vec::new(),
            slot: ArrayVec::new(),
            matching: ArrayVec::new(),
            phase: Phase::Idle,
            phase_timer_ms: 0,
            paused: false,
            move_count: 0,
            level_tiles: 0,
            episode_id: 0,
            grid_size: 0,
            layout_pattern: LayoutPattern::GridScatter,
            seed: 0,
        }
    }
}
