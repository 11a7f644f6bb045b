//! Game state module - the pick → match → resolve state machine
//!
//! This module ties together all core components: level generation, board,
//! slot, occlusion and RNG. It owns every piece of mutable game state and is
//! the only place that changes it.
//!
//! # Phases
//!
//! ```text
//!            pick (no triple, slot not full)
//!          ┌──────┐
//!          ▼      │
//!        Idle ────┘
//!         │  │ pick completes a triple      pick fills the slot
//!         │  └──────────────┐               without a triple
//!         │                 ▼                       │
//!         │          AwaitingPop ──250ms──► Matching │
//!         │                                   │      ▼
//!         ◄───────────────400ms───────────────┘    Losing ──500ms──► Lost
//!         │
//!         └── board and slot empty after a match ──► Won
//! ```
//!
//! Delays run on a logical clock: callers advance time with
//! [`GameState::tick`]. Surplus time carries over into the next chained phase.
//! Because the timers live in this struct, dropping or restarting the game
//! cancels them.

use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::board::Board;
use crate::level::generate_level;
use crate::rng::SimpleRng;
use crate::slot::Slot;
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: LevelConfig,
    timings: Timings,
    rng: SimpleRng,
    board: Board,
    slot: Slot,
    phase: Phase,
    /// Time left in the current locked phase.
    phase_timer_ms: u32,
    /// Tiles marked for removal while `Matching`.
    matching: ArrayVec<TileId, MATCH_SIZE>,
    /// Tiles dealt when the level was generated.
    level_tiles: u32,
    move_count: u32,
    paused: bool,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Terminal outcome not yet consumed by observers.
    last_outcome: Option<OutcomeEvent>,
}

impl GameState {
    /// Create a new game for `config` with the given RNG seed
    pub fn new(config: LevelConfig, seed: u32) -> Self {
        Self::with_timings(config, seed, Timings::default())
    }

    /// Create a new game with custom phase delays.
    pub fn with_timings(config: LevelConfig, seed: u32, timings: Timings) -> Self {
        let mut rng = SimpleRng::new(seed);
        let board = generate_level(&config, &mut rng);
        debug!(
            tiles = board.len(),
            clickable = board.clickable_count(),
            pattern = config.layout_pattern.as_str(),
            seed,
            "level generated"
        );
        Self::with_board(config, board, rng, timings)
    }

    /// Start a game on a prepared board.
    ///
    /// `rng` continues to drive shuffle, undo placement and restarts.
    pub fn with_board(config: LevelConfig, board: Board, rng: SimpleRng, timings: Timings) -> Self {
        Self {
            config,
            timings,
            rng,
            level_tiles: board.len() as u32,
            board,
            slot: Slot::new(),
            phase: Phase::Idle,
            phase_timer_ms: 0,
            matching: ArrayVec::new(),
            move_count: 0,
            paused: false,
            episode_id: 0,
            last_outcome: None,
        }
    }

    /// Number this game's episodes from `episode_id` instead of 0.
    ///
    /// Front ends that run several games against one commentary channel use
    /// this to keep episode ids unique across games.
    pub fn starting_at_episode(mut self, episode_id: u32) -> Self {
        self.episode_id = episode_id;
        self
    }

    pub fn config(&self) -> &LevelConfig {
        &self.config
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn slot(&self) -> &Slot {
        &self.slot
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn phase_timer_ms(&self) -> u32 {
        self.phase_timer_ms
    }

    pub fn matching(&self) -> &[TileId] {
        &self.matching
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn level_tiles(&self) -> u32 {
        self.level_tiles
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    /// True when a timed transition is in flight.
    pub fn is_locked(&self) -> bool {
        self.phase.is_locked()
    }

    /// True when click, shuffle and undo are accepted.
    pub fn accepts_input(&self) -> bool {
        self.phase == Phase::Idle && !self.paused
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.tiles.clear();
        out.tiles.extend_from_slice(self.board.tiles());
        // Paint order follows the occlusion key, not the layer.
        out.tiles.sort_unstable_by_key(|t| (t.draw_order, t.id));
        out.slot.clear();
        out.slot.extend(self.slot.tiles().copied());
        out.matching.clear();
        out.matching.extend(self.matching.iter().copied());
        out.phase = self.phase;
        out.phase_timer_ms = self.phase_timer_ms;
        out.paused = self.paused;
        out.move_count = self.move_count;
        out.level_tiles = self.level_tiles;
        out.episode_id = self.episode_id;
        out.grid_size = self.config.grid_size;
        out.layout_pattern = self.config.layout_pattern;
        out.seed = self.rng.state();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// Move a clickable tile from the board into the slot.
    ///
    /// No-op (returns `false`) while locked, paused or finished, and for ids
    /// that are not on the board or not clickable.
    pub fn click_tile(&mut self, id: TileId) -> bool {
        if !self.accepts_input() || !self.board.is_clickable(id) {
            return false;
        }

        let Some((board, tile)) = self.board.without(id) else {
            return false;
        };
        let Some(slot) = self.slot.with_tile(tile) else {
            return false;
        };

        self.board = board;
        self.slot = slot;
        self.move_count += 1;

        if let Some(kind) = self.slot.find_triple() {
            debug!(kind = kind.as_str(), "triple formed");
            self.enter_locked(Phase::AwaitingPop(kind), self.timings.pop_delay_ms);
        } else if self.slot.len() >= MAX_SLOTS {
            debug!(moves = self.move_count, "slot full without a triple");
            self.enter_locked(Phase::Losing, self.timings.loss_delay_ms);
        }

        true
    }

    /// Re-deal tile identities over the current board positions.
    pub fn shuffle(&mut self) -> bool {
        if !self.accepts_input() || self.board.is_empty() {
            return false;
        }
        self.board = self.board.shuffled(&mut self.rng);
        debug!(clickable = self.board.clickable_count(), "board shuffled");
        true
    }

    /// Return the most recently slotted tile to the top of the board.
    pub fn undo(&mut self) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let Some((slot, tile)) = self.slot.without_last_appended() else {
            return false;
        };

        self.board = self
            .board
            .with_returned(tile, self.config.grid_size, &mut self.rng);
        self.slot = slot;
        debug!(tile = tile.id.0, "tile returned to board");
        true
    }

    /// Advance the logical clock.
    ///
    /// Returns true if at least one phase transition happened.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.paused {
            return false;
        }

        let mut remaining = elapsed_ms;
        let mut advanced = false;
        while self.phase.is_locked() {
            if remaining < self.phase_timer_ms {
                self.phase_timer_ms -= remaining;
                break;
            }
            remaining -= self.phase_timer_ms;
            self.phase_timer_ms = 0;
            self.advance_phase();
            advanced = true;
        }
        advanced
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pick(id) => self.click_tile(id),
            GameAction::Shuffle => self.shuffle(),
            GameAction::Undo => self.undo(),
            GameAction::Pause => {
                if self.phase.is_terminal() {
                    return false;
                }
                self.paused = !self.paused;
                true
            }
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Regenerate the level from the same configuration.
    ///
    /// The RNG sequence continues, so a restart deals a different level while
    /// staying reproducible from the original seed.
    pub fn restart(&mut self) {
        let seed = self.rng.state();
        let next_episode = self.episode_id.wrapping_add(1);
        *self = Self::with_timings(self.config, seed, self.timings);
        self.episode_id = next_episode;
    }

    /// Take and clear the terminal outcome, if one was reached.
    pub fn take_outcome(&mut self) -> Option<OutcomeEvent> {
        self.last_outcome.take()
    }

    fn enter_locked(&mut self, phase: Phase, delay_ms: u32) {
        self.phase = phase;
        self.phase_timer_ms = delay_ms;
    }

    fn advance_phase(&mut self) {
        match self.phase {
            Phase::AwaitingPop(kind) => {
                self.matching = self.slot.first_three_of(kind);
                self.enter_locked(Phase::Matching, self.timings.match_delay_ms);
            }
            Phase::Matching => {
                self.slot = self.slot.without_ids(&self.matching);
                self.matching.clear();
                self.phase = Phase::Idle;
                debug!(
                    board = self.board.len(),
                    slot = self.slot.len(),
                    "triple cleared"
                );

                if self.board.is_empty() && self.slot.is_empty() {
                    self.finish(Outcome::Won);
                }
            }
            Phase::Losing => self.finish(Outcome::Lost),
            Phase::Idle | Phase::Won | Phase::Lost => {}
        }
    }

    fn finish(&mut self, outcome: Outcome) {
        self.phase = match outcome {
            Outcome::Won => Phase::Won,
            Outcome::Lost => Phase::Lost,
        };
        self.phase_timer_ms = 0;
        self.last_outcome = Some(OutcomeEvent {
            outcome,
            move_count: self.move_count,
            episode_id: self.episode_id,
        });
        info!(
            outcome = outcome.as_str(),
            moves = self.move_count,
            episode = self.episode_id,
            "game finished"
        );
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(LevelConfig::EASY, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Tile;

    const CONFIG: LevelConfig = LevelConfig {
        grid_size: 6,
        total_tiles: 9,
        active_type_count: 3,
        layout_pattern: LayoutPattern::GridScatter,
    };

    /// A flat board of non-overlapping tiles, all clickable.
    fn flat(kinds: &[TileKind]) -> GameState {
        let tiles = kinds
            .iter()
            .enumerate()
            .map(|(i, &kind)| {
                let i = i as u32;
                Tile::placed(TileId(i), kind, 0, (i % 4) as f32 * 1.5, (i / 4) as f32 * 1.5, i)
            })
            .collect();
        GameState::with_board(
            CONFIG,
            Board::from_tiles(tiles),
            SimpleRng::new(3),
            Timings::default(),
        )
    }

    fn pick_all(state: &mut GameState, ids: &[u32]) {
        for &id in ids {
            assert!(state.click_tile(TileId(id)), "pick {id} rejected");
        }
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(LevelConfig::EASY, 12345);
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.board().len(), 24);
        assert_eq!(state.level_tiles(), 24);
        assert!(state.slot().is_empty());
        assert_eq!(state.move_count(), 0);
        assert!(!state.paused());
        assert!(state.accepts_input());
    }

    #[test]
    fn test_click_moves_tile_to_slot() {
        use TileKind::*;
        let mut state = flat(&[Sheep, Carrot, Fire]);
        assert!(state.click_tile(TileId(1)));
        assert_eq!(state.board().len(), 2);
        assert_eq!(state.slot().len(), 1);
        assert_eq!(state.move_count(), 1);
        assert_eq!(state.phase(), Phase::Idle);
    }

    #[test]
    fn test_click_covered_tile_is_noop() {
        let tiles = vec![
            Tile::placed(TileId(0), TileKind::Sheep, 0, 2.0, 2.0, 0),
            Tile::placed(TileId(1), TileKind::Corn, 1, 2.0, 2.0, 1),
        ];
        let mut state = GameState::with_board(
            CONFIG,
            Board::from_tiles(tiles),
            SimpleRng::new(1),
            Timings::default(),
        );

        assert!(!state.click_tile(TileId(0)));
        assert_eq!(state.move_count(), 0);

        assert!(state.click_tile(TileId(1)));
        assert!(state.board().is_clickable(TileId(0)));
        assert!(state.click_tile(TileId(0)));
    }

    #[test]
    fn test_click_unknown_tile_is_noop() {
        let mut state = flat(&[TileKind::Sheep]);
        assert!(!state.click_tile(TileId(42)));
    }

    #[test]
    fn test_match_resolves_after_both_delays() {
        use TileKind::*;
        let mut state = flat(&[Fire, Sheep, Fire, Fire]);
        pick_all(&mut state, &[0, 2, 3]);

        assert_eq!(state.phase(), Phase::AwaitingPop(Fire));
        assert_eq!(state.slot().len(), 3);
        assert_eq!(state.move_count(), 3);
        assert!(state.matching().is_empty());

        assert!(!state.tick(249));
        assert_eq!(state.phase(), Phase::AwaitingPop(Fire));

        assert!(state.tick(1));
        assert_eq!(state.phase(), Phase::Matching);
        assert_eq!(state.matching(), &[TileId(0), TileId(2), TileId(3)]);
        assert_eq!(state.slot().len(), 3);

        assert!(!state.tick(399));
        assert!(state.tick(1));
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.slot().is_empty());
        assert!(state.matching().is_empty());
        assert_eq!(state.move_count(), 3);
    }

    #[test]
    fn test_tick_carries_surplus_into_next_phase() {
        use TileKind::*;
        let mut state = flat(&[Corn, Corn, Corn, Milk]);
        pick_all(&mut state, &[0, 1, 2]);
        assert!(state.tick(650));
        assert_eq!(state.phase(), Phase::Idle);
        assert!(state.slot().is_empty());
    }

    #[test]
    fn test_commands_rejected_while_locked() {
        use TileKind::*;
        let mut state = flat(&[Wool, Wool, Wool, Milk]);
        pick_all(&mut state, &[0, 1, 2]);
        assert!(state.is_locked());

        assert!(!state.click_tile(TileId(3)));
        assert!(!state.shuffle());
        assert!(!state.undo());
        assert_eq!(state.move_count(), 3);

        state.tick(650);
        assert!(state.click_tile(TileId(3)));
    }

    #[test]
    fn test_win_after_last_triple() {
        use TileKind::*;
        let mut state = flat(&[Grass, Grass, Grass]);
        pick_all(&mut state, &[0, 1, 2]);
        assert!(state.board().is_empty());
        assert_eq!(state.take_outcome(), None);

        state.tick(650);
        assert_eq!(state.phase(), Phase::Won);
        assert_eq!(
            state.take_outcome(),
            Some(OutcomeEvent {
                outcome: Outcome::Won,
                move_count: 3,
                episode_id: 0,
            })
        );
        assert_eq!(state.take_outcome(), None);
        assert!(!state.click_tile(TileId(0)));
    }

    #[test]
    fn test_loss_when_slot_fills() {
        use TileKind::*;
        let mut state = flat(&[Sheep, Sheep, Carrot, Carrot, Fire, Fire, Stump, Stump]);
        pick_all(&mut state, &[0, 1, 2, 3, 4, 5]);
        assert_eq!(state.phase(), Phase::Idle);

        assert!(state.click_tile(TileId(6)));
        assert_eq!(state.slot().len(), MAX_SLOTS);
        assert_eq!(state.phase(), Phase::Losing);
        assert!(!state.click_tile(TileId(7)));

        assert!(!state.tick(499));
        assert!(state.tick(1));
        assert_eq!(state.phase(), Phase::Lost);
        let ev = state.take_outcome().unwrap();
        assert_eq!(ev.outcome, Outcome::Lost);
        assert_eq!(ev.move_count, 7);
    }

    #[test]
    fn test_seventh_tile_completing_triple_matches_instead_of_losing() {
        use TileKind::*;
        let mut state = flat(&[Sheep, Sheep, Carrot, Carrot, Fire, Fire, Fire, Milk]);
        pick_all(&mut state, &[0, 1, 2, 3, 4, 5]);
        assert!(state.click_tile(TileId(6)));
        assert_eq!(state.slot().len(), MAX_SLOTS);
        assert_eq!(state.phase(), Phase::AwaitingPop(Fire));

        state.tick(650);
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.slot().len(), 4);
    }

    #[test]
    fn test_undo_returns_last_appended() {
        use TileKind::*;
        let mut state = flat(&[Wool, Bucket, Sheep]);
        pick_all(&mut state, &[0, 1]);
        let max_layer = state.board().max_layer();

        assert!(state.undo());
        assert_eq!(state.slot().len(), 1);
        assert_eq!(state.board().len(), 2);
        assert_eq!(state.move_count(), 2);

        let returned = state.board().get(TileId(1)).unwrap();
        assert!(returned.layer > max_layer);
        assert_eq!(returned.draw_order, returned.layer * LAYER_STRIDE);
        assert!(returned.clickable);
        assert_eq!(state.slot().tiles().next().unwrap().id, TileId(0));
    }

    #[test]
    fn test_undo_on_empty_slot_is_noop() {
        let mut state = flat(&[TileKind::Sheep]);
        assert!(!state.undo());
    }

    #[test]
    fn test_shuffle_keeps_positions() {
        let mut state = GameState::new(LevelConfig::HARD, 77);
        let before = state.board().clone();
        assert!(state.shuffle());
        let after = state.board();

        assert_eq!(before.len(), after.len());
        for (a, b) in before.tiles().iter().zip(after.tiles()) {
            assert_eq!(a.placement(), b.placement());
        }
        assert_eq!(state.move_count(), 0);
    }

    #[test]
    fn test_shuffle_on_empty_board_is_noop() {
        let mut state = GameState::with_board(
            CONFIG,
            Board::default(),
            SimpleRng::new(1),
            Timings::default(),
        );
        assert!(!state.shuffle());
    }

    #[test]
    fn test_pause_freezes_timers_and_input() {
        use TileKind::*;
        let mut state = flat(&[Milk, Milk, Milk, Corn]);
        pick_all(&mut state, &[0, 1, 2]);

        assert!(state.apply_action(GameAction::Pause));
        assert!(!state.tick(10_000));
        assert_eq!(state.phase(), Phase::AwaitingPop(Milk));

        assert!(state.apply_action(GameAction::Pause));
        state.tick(650);
        assert_eq!(state.phase(), Phase::Idle);

        state.apply_action(GameAction::Pause);
        assert!(!state.click_tile(TileId(3)));
    }

    #[test]
    fn test_pause_ignored_when_finished() {
        use TileKind::*;
        let mut state = flat(&[Milk, Milk, Milk]);
        pick_all(&mut state, &[0, 1, 2]);
        state.tick(650);
        assert_eq!(state.phase(), Phase::Won);
        assert!(!state.apply_action(GameAction::Pause));
    }

    #[test]
    fn test_restart_increments_episode_id() {
        let mut state = GameState::new(LevelConfig::EASY, 12345);
        let first = state.board().clone();
        let id = state.board().tiles().iter().find(|t| t.clickable).unwrap().id;
        state.click_tile(id);

        assert!(state.apply_action(GameAction::Restart));
        assert_eq!(state.episode_id(), 1);
        assert_eq!(state.move_count(), 0);
        assert!(state.slot().is_empty());
        assert_eq!(state.board().len(), 24);
        assert_ne!(state.board(), &first);
    }

    #[test]
    fn test_starting_episode_carries_into_outcome() {
        use TileKind::*;
        let mut state = flat(&[Fire, Fire, Fire]).starting_at_episode(5);
        assert_eq!(state.episode_id(), 5);
        pick_all(&mut state, &[0, 1, 2]);
        state.tick(650);
        assert_eq!(state.take_outcome().map(|e| e.episode_id), Some(5));

        state.restart();
        assert_eq!(state.episode_id(), 6);
    }

    #[test]
    fn test_restart_cancels_pending_timer() {
        use TileKind::*;
        let mut state = flat(&[Fire, Fire, Fire]);
        pick_all(&mut state, &[0, 1, 2]);
        state.restart();
        assert_eq!(state.phase(), Phase::Idle);
        state.tick(10_000);
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.take_outcome(), None);
    }

    #[test]
    fn test_zero_delays_resolve_on_next_tick() {
        use TileKind::*;
        let mut state = flat(&[Fire, Fire, Fire]);
        state.timings = Timings {
            pop_delay_ms: 0,
            match_delay_ms: 0,
            loss_delay_ms: 0,
        };
        pick_all(&mut state, &[0, 1, 2]);
        assert!(state.tick(0));
        assert_eq!(state.phase(), Phase::Won);
    }

    #[test]
    fn test_snapshot_mirrors_state() {
        use TileKind::*;
        let mut state = flat(&[Fire, Fire, Fire, Sheep]);
        pick_all(&mut state, &[0, 1, 2]);
        state.tick(250);

        let snap = state.snapshot();
        assert_eq!(snap.tiles.len(), 1);
        assert_eq!(snap.slot.len(), 3);
        assert_eq!(snap.matching.len(), 3);
        assert_eq!(snap.phase, Phase::Matching);
        assert_eq!(snap.phase_timer_ms, 400);
        assert_eq!(snap.move_count, 3);
        assert!(snap.is_matching(TileId(1)));
        assert!(!snap.is_matching(TileId(3)));
    }

    #[test]
    fn test_snapshot_paints_in_occlusion_order() {
        // A returned tile lands on a higher layer with a draw order below
        // that of wide layers (index >= 100), so layer order and occlusion
        // disagree.
        let mut returned = Tile::placed(TileId(0), TileKind::Fire, 12, 2.0, 2.0, 0);
        returned.draw_order = 1200;
        let mut wide = Tile::placed(TileId(1), TileKind::Milk, 11, 2.0, 2.0, 0);
        wide.draw_order = 1219;

        let state = GameState::with_board(
            CONFIG,
            Board::from_tiles(vec![returned, wide]),
            SimpleRng::new(3),
            Timings::default(),
        );
        assert_eq!(state.board().tiles()[1].id, TileId(0));

        let snap = state.snapshot();
        let top = snap.tiles.last().unwrap();
        assert_eq!(top.id, TileId(1));
        assert!(top.clickable);
        assert!(!snap.tiles[0].clickable);
    }
}
