//! Front-end session state shared by the binary and its tests.
//!
//! A [`Session`] wraps one [`GameState`] with the bits only the terminal
//! front end cares about: the keyboard cursor, the difficulty label and the
//! commentary text for the finished episode.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use crate::commentary::CommentaryReply;
use crate::core::{GameSnapshot, GameState};
use crate::input::{Cursor, PlayInput};
use crate::term::{GameView, HudView, Viewport};
use crate::types::{Difficulty, GameAction, OutcomeEvent};

/// What the main loop should do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Menu,
}

pub struct Session {
    difficulty: Difficulty,
    game: GameState,
    cursor: Cursor,
    commentary: Option<String>,
    snapshot: GameSnapshot,
}

impl Session {
    pub fn new(difficulty: Difficulty, seed: u32) -> Self {
        Self::with_first_episode(difficulty, seed, 0)
    }

    /// Start a session whose episode ids begin at `first_episode`.
    ///
    /// Commentary replies are matched by episode id, so a session started
    /// after another one must not reuse that session's ids.
    pub fn with_first_episode(difficulty: Difficulty, seed: u32, first_episode: u32) -> Self {
        let game = GameState::new(difficulty.config(), seed).starting_at_episode(first_episode);
        let mut session = Self {
            difficulty,
            game,
            cursor: Cursor::new(),
            commentary: None,
            snapshot: GameSnapshot::default(),
        };
        session.refresh();
        session
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// First episode id that this session has not used.
    pub fn next_episode(&self) -> u32 {
        self.game.episode_id().wrapping_add(1)
    }

    pub fn commentary(&self) -> Option<&str> {
        self.commentary.as_deref()
    }

    pub fn hud(&self) -> HudView<'_> {
        HudView {
            difficulty: self.difficulty,
            selected: self.cursor.selected(),
            commentary: self.commentary.as_deref(),
        }
    }

    pub fn handle_input(&mut self, input: PlayInput) -> Flow {
        match input {
            PlayInput::Action(action) => {
                self.apply(action);
            }
            PlayInput::CursorPrev => self.cursor.prev(&self.snapshot.tiles),
            PlayInput::CursorNext => self.cursor.next(&self.snapshot.tiles),
            PlayInput::PickSelected => {
                if let Some(id) = self.cursor.selected() {
                    self.apply(GameAction::Pick(id));
                }
            }
            PlayInput::Menu => return Flow::Menu,
        }
        Flow::Continue
    }

    /// Pick whatever tile is drawn at a terminal cell.
    pub fn handle_click(&mut self, view: &GameView, viewport: Viewport, col: u16, row: u16) -> bool {
        match view.tile_at(&self.snapshot, viewport, col, row) {
            Some(id) => self.apply(GameAction::Pick(id)),
            None => false,
        }
    }

    /// Advance the clock; returns an outcome that needs commentary.
    pub fn tick(&mut self, elapsed_ms: u32) -> Option<OutcomeEvent> {
        if self.game.tick(elapsed_ms) {
            self.refresh();
        }
        self.game.take_outcome()
    }

    /// Store commentary if it belongs to the current episode.
    pub fn accept_commentary(&mut self, reply: CommentaryReply) -> bool {
        if reply.episode_id != self.game.episode_id() {
            debug!(
                reply = reply.episode_id,
                current = self.game.episode_id(),
                "dropping stale commentary"
            );
            return false;
        }
        self.commentary = Some(reply.text);
        true
    }

    pub fn set_commentary(&mut self, text: impl Into<String>) {
        self.commentary = Some(text.into());
    }

    fn apply(&mut self, action: GameAction) -> bool {
        let applied = self.game.apply_action(action);
        if applied {
            if action == GameAction::Restart {
                self.commentary = None;
                self.cursor.clear();
            }
            self.refresh();
        }
        applied
    }

    fn refresh(&mut self) {
        self.game.snapshot_into(&mut self.snapshot);
        self.cursor.sync(&self.snapshot.tiles);
    }
}

/// `SHEEP_SEED`, or a seed derived from the clock.
pub fn seed_from_env() -> u32 {
    std::env::var("SHEEP_SEED")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or_else(clock_seed)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Outcome, Phase};

    #[test]
    fn test_new_session_selects_a_tile() {
        let session = Session::new(Difficulty::Easy, 7);
        let selected = session.cursor().selected().unwrap();
        assert!(session.game().board().is_clickable(selected));
        assert_eq!(session.snapshot().tiles.len(), 24);
    }

    #[test]
    fn test_pick_selected_moves_tile_and_resyncs_cursor() {
        let mut session = Session::new(Difficulty::Easy, 7);
        let first = session.cursor().selected().unwrap();

        assert_eq!(session.handle_input(PlayInput::PickSelected), Flow::Continue);
        assert_eq!(session.snapshot().slot.len(), 1);
        assert_eq!(session.snapshot().move_count, 1);
        assert_ne!(session.cursor().selected(), Some(first));
    }

    #[test]
    fn test_menu_input() {
        let mut session = Session::new(Difficulty::Hard, 7);
        assert_eq!(session.handle_input(PlayInput::Menu), Flow::Menu);
    }

    #[test]
    fn test_stale_commentary_is_dropped() {
        let mut session = Session::new(Difficulty::Easy, 7);
        session.handle_input(PlayInput::Action(GameAction::Restart));
        assert_eq!(session.game().episode_id(), 1);

        let stale = CommentaryReply {
            episode_id: 0,
            outcome: Outcome::Lost,
            text: "old".to_string(),
        };
        assert!(!session.accept_commentary(stale));
        assert_eq!(session.commentary(), None);

        let fresh = CommentaryReply {
            episode_id: 1,
            outcome: Outcome::Lost,
            text: "new".to_string(),
        };
        assert!(session.accept_commentary(fresh));
        assert_eq!(session.hud().commentary, Some("new"));
    }

    #[test]
    fn test_reply_for_previous_session_is_dropped() {
        let mut first = Session::new(Difficulty::Easy, 7);
        first.handle_input(PlayInput::Action(GameAction::Restart));
        let mut second = Session::with_first_episode(Difficulty::Easy, 8, first.next_episode());
        assert_eq!(second.game().episode_id(), 2);

        for old in 0..2 {
            let reply = CommentaryReply {
                episode_id: old,
                outcome: Outcome::Won,
                text: "from the last game".to_string(),
            };
            assert!(!second.accept_commentary(reply));
        }
        assert_eq!(second.commentary(), None);

        let current = CommentaryReply {
            episode_id: 2,
            outcome: Outcome::Lost,
            text: "this game".to_string(),
        };
        assert!(second.accept_commentary(current));
        assert_eq!(second.commentary(), Some("this game"));
    }

    #[test]
    fn test_pause_shows_in_snapshot() {
        let mut session = Session::new(Difficulty::Easy, 7);
        session.handle_input(PlayInput::Action(GameAction::Pause));
        assert!(session.snapshot().paused);
        assert_eq!(session.snapshot().phase, Phase::Idle);
    }
}
