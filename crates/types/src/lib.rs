//! Shared vocabulary of the tile puzzle: kinds, level presets, phases,
//! outcomes, player actions and timing constants.
//!
//! Plain data only. The engine, the terminal front end and the commentary
//! client all depend on this crate, and it depends on nothing.
//!
//! # Tile Kinds
//!
//! There are ten tile kinds. A level activates the first `N` of them in the
//! declaration order of [`TileKind::ALL`].
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `POP_DELAY_MS` | 250 | Settle time for a freshly slotted tile before a match starts |
//! | `MATCH_DELAY_MS` | 400 | Duration of the match animation before the triple is removed |
//! | `LOSS_DELAY_MS` | 500 | Pause on a full slot before the game is declared lost |
//!
//! # Examples
//!
//! ```
//! use tui_sheep_types::{GameAction, LevelConfig, LayoutPattern, TileKind, MAX_SLOTS};
//!
//! // Parse from string (case-insensitive)
//! assert_eq!(TileKind::from_str("sheep"), Some(TileKind::Sheep));
//!
//! // Presets
//! assert_eq!(LevelConfig::EASY.layout_pattern, LayoutPattern::GridScatter);
//! assert_eq!(LevelConfig::HARD.total_tiles, 120);
//!
//! // Parse game action
//! assert_eq!(GameAction::from_str("undo"), Some(GameAction::Undo));
//!
//! assert_eq!(MAX_SLOTS, 7);
//! ```

/// Capacity of the matching tray.
pub const MAX_SLOTS: usize = 7;

/// Number of identical tiles removed by one match.
pub const MATCH_SIZE: usize = 3;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Delay between slotting the third tile of a kind and starting the match.
pub const POP_DELAY_MS: u32 = 250;

/// Duration of the match animation.
pub const MATCH_DELAY_MS: u32 = 400;

/// Delay between filling the slot without a match and losing.
pub const LOSS_DELAY_MS: u32 = 500;

/// Two tiles overlap when both axis distances are strictly below this (grid units).
pub const OCCLUSION_THRESHOLD: f32 = 0.92;

/// Draw-order stride between layers.
pub const LAYER_STRIDE: u32 = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_defaults() {
        assert_eq!(POP_DELAY_MS, 250);
        assert_eq!(MATCH_DELAY_MS, 400);
        assert_eq!(LOSS_DELAY_MS, 500);
        assert_eq!(Timings::default().total_match_ms(), 650);
    }

    #[test]
    fn presets_match_documented_values() {
        let easy = LevelConfig::EASY;
        assert_eq!(easy.grid_size, 6);
        assert_eq!(easy.total_tiles, 24);
        assert_eq!(easy.active_type_count, 4);
        assert_eq!(easy.layout_pattern, LayoutPattern::GridScatter);

        let hard = LevelConfig::HARD;
        assert_eq!(hard.grid_size, 8);
        assert_eq!(hard.total_tiles, 120);
        assert_eq!(hard.active_type_count, 10);
        assert_eq!(hard.layout_pattern, LayoutPattern::LayeredRandom);
    }

    #[test]
    fn tile_kind_round_trips_through_str() {
        for kind in TileKind::ALL {
            assert_eq!(TileKind::from_str(kind.as_str()), Some(kind));
            assert_eq!(TileKind::from_index(kind.index()), Some(kind));
        }
        assert_eq!(TileKind::from_index(10), None);
    }

    #[test]
    fn phase_lock_and_terminal_flags() {
        assert!(!Phase::Idle.is_locked());
        assert!(Phase::AwaitingPop(TileKind::Corn).is_locked());
        assert!(Phase::Matching.is_locked());
        assert!(Phase::Losing.is_locked());
        assert!(Phase::Won.is_terminal());
        assert!(Phase::Lost.is_terminal());
        assert!(!Phase::Losing.is_terminal());
        assert_eq!(Phase::Won.outcome(), Some(Outcome::Won));
        assert_eq!(Phase::Matching.outcome(), None);
    }
}

/// The ten tile kinds
///
/// Declaration order matters: a level with `active_type_count = N` uses the
/// first `N` entries of [`TileKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileKind {
    Sheep,
    Carrot,
    Fire,
    Stump,
    Wool,
    Grass,
    Bucket,
    Corn,
    Brush,
    Milk,
}

impl TileKind {
    /// Number of defined kinds.
    pub const COUNT: usize = 10;

    /// All kinds in activation order.
    pub const ALL: [TileKind; Self::COUNT] = [
        TileKind::Sheep,
        TileKind::Carrot,
        TileKind::Fire,
        TileKind::Stump,
        TileKind::Wool,
        TileKind::Grass,
        TileKind::Bucket,
        TileKind::Corn,
        TileKind::Brush,
        TileKind::Milk,
    ];

    /// Parse tile kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_sheep_types::TileKind;
    ///
    /// assert_eq!(TileKind::from_str("CORN"), Some(TileKind::Corn));
    /// assert_eq!(TileKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "sheep" => Some(TileKind::Sheep),
            "carrot" => Some(TileKind::Carrot),
            "fire" => Some(TileKind::Fire),
            "stump" => Some(TileKind::Stump),
            "wool" => Some(TileKind::Wool),
            "grass" => Some(TileKind::Grass),
            "bucket" => Some(TileKind::Bucket),
            "corn" => Some(TileKind::Corn),
            "brush" => Some(TileKind::Brush),
            "milk" => Some(TileKind::Milk),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            TileKind::Sheep => "sheep",
            TileKind::Carrot => "carrot",
            TileKind::Fire => "fire",
            TileKind::Stump => "stump",
            TileKind::Wool => "wool",
            TileKind::Grass => "grass",
            TileKind::Bucket => "bucket",
            TileKind::Corn => "corn",
            TileKind::Brush => "brush",
            TileKind::Milk => "milk",
        }
    }

    /// Position in [`TileKind::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Two-letter label used by the terminal view.
    pub fn label(&self) -> &'static str {
        match self {
            TileKind::Sheep => "Sh",
            TileKind::Carrot => "Ca",
            TileKind::Fire => "Fi",
            TileKind::Stump => "St",
            TileKind::Wool => "Wo",
            TileKind::Grass => "Gr",
            TileKind::Bucket => "Bu",
            TileKind::Corn => "Co",
            TileKind::Brush => "Br",
            TileKind::Milk => "Mi",
        }
    }
}

/// Stable tile identifier, unique within a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

/// Strategy used to turn a deck into spatial positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutPattern {
    /// Sparse base layer plus progressively tighter layers around the center.
    LayeredRandom,
    /// Broad, grid-aligned layers with slight jitter.
    GridScatter,
    /// Experimental spiral converging toward the center.
    SpiralTower,
}

impl LayoutPattern {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "layeredrandom" | "randomlayered" => Some(LayoutPattern::LayeredRandom),
            "gridscatter" => Some(LayoutPattern::GridScatter),
            "spiraltower" => Some(LayoutPattern::SpiralTower),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutPattern::LayeredRandom => "layered-random",
            LayoutPattern::GridScatter => "grid-scatter",
            LayoutPattern::SpiralTower => "spiral-tower",
        }
    }
}

/// Immutable level parameters.
///
/// Construct through [`LevelConfig::EASY`], [`LevelConfig::HARD`], or the
/// validating constructor in the core crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelConfig {
    /// Board extent in grid units (both axes).
    pub grid_size: u32,
    /// Requested tile count; truncated down to a multiple of 3.
    pub total_tiles: u32,
    /// How many of the ten kinds are used.
    pub active_type_count: u8,
    pub layout_pattern: LayoutPattern,
}

impl LevelConfig {
    pub const EASY: LevelConfig = LevelConfig {
        grid_size: 6,
        total_tiles: 24,
        active_type_count: 4,
        layout_pattern: LayoutPattern::GridScatter,
    };

    pub const HARD: LevelConfig = LevelConfig {
        grid_size: 8,
        total_tiles: 120,
        active_type_count: 10,
        layout_pattern: LayoutPattern::LayeredRandom,
    };
}

/// Named level presets offered by the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Hard,
}

impl Difficulty {
    pub fn config(&self) -> LevelConfig {
        match self {
            Difficulty::Easy => LevelConfig::EASY,
            Difficulty::Hard => LevelConfig::HARD,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Hard => "HARD",
        }
    }
}

/// Delays of the three locked phases, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Timings {
    pub pop_delay_ms: u32,
    pub match_delay_ms: u32,
    pub loss_delay_ms: u32,
}

impl Timings {
    /// Time from slotting the third tile until the triple disappears.
    pub fn total_match_ms(&self) -> u32 {
        self.pop_delay_ms + self.match_delay_ms
    }
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            pop_delay_ms: POP_DELAY_MS,
            match_delay_ms: MATCH_DELAY_MS,
            loss_delay_ms: LOSS_DELAY_MS,
        }
    }
}

/// Phase of the match state machine
///
/// Only `Idle` accepts commands. `AwaitingPop`, `Matching` and `Losing` are
/// timed lock phases; `Won` and `Lost` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    /// A triple of the given kind is waiting for the slotted tile to settle.
    AwaitingPop(TileKind),
    /// The triple is marked and animating out.
    Matching,
    /// The slot is full without a match; the loss is pending.
    Losing,
    Won,
    Lost,
}

impl Phase {
    pub fn is_locked(&self) -> bool {
        matches!(self, Phase::AwaitingPop(_) | Phase::Matching | Phase::Losing)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self {
            Phase::Won => Some(Outcome::Won),
            Phase::Lost => Some(Outcome::Lost),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::AwaitingPop(_) => "awaiting_pop",
            Phase::Matching => "matching",
            Phase::Losing => "losing",
            Phase::Won => "won",
            Phase::Lost => "lost",
        }
    }
}

/// Terminal result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Won,
    Lost,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Won => "won",
            Outcome::Lost => "lost",
        }
    }

    /// Text shown while the commentary service is not configured.
    pub fn unconfigured_commentary(&self) -> &'static str {
        match self {
            Outcome::Won => "Incredible! You actually cleared it!",
            Outcome::Lost => "Don't lose heart, 99% of players never get past this level.",
        }
    }

    /// Text shown when the commentary service fails or times out.
    pub fn failed_commentary(&self) -> &'static str {
        match self {
            Outcome::Won => "You won! (The AI is speechless.)",
            Outcome::Lost => "Game over! (The AI fell asleep.)",
        }
    }
}

/// Core-side event emitted once when a game reaches `Won` or `Lost`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutcomeEvent {
    pub outcome: Outcome,
    pub move_count: u32,
    pub episode_id: u32,
}

/// Game actions that can be applied to modify game state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move a clickable board tile into the slot
    Pick(TileId),
    /// Re-deal tile identities over the current positions
    Shuffle,
    /// Return the last slotted tile to the top of the board
    Undo,
    /// Toggle pause state
    Pause,
    /// Regenerate the level with the same configuration
    Restart,
}

impl GameAction {
    /// Parse an argument-free action from string
    ///
    /// `Pick` carries a tile id and has no string form.
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_sheep_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("shuffle"), Some(GameAction::Shuffle));
    /// assert_eq!(GameAction::from_str("pick"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "shuffle" => Some(GameAction::Shuffle),
            "undo" => Some(GameAction::Undo),
            "pause" => Some(GameAction::Pause),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::Pick(_) => "pick",
            GameAction::Shuffle => "shuffle",
            GameAction::Undo => "undo",
            GameAction::Pause => "pause",
            GameAction::Restart => "restart",
        }
    }
}
