//! Terminal app state: routes player actions to the controller and keeps the
//! collaborators (save file, analytics) in step with the engine.

use tracing::{debug, warn};

use crate::adapter::{forward_events, AnalyticsSink, ProgressStore, TracingSink};
use crate::core::{EngineEvent, GameSnapshot, ProgressionController, ProgressionError};
use crate::engine::{apply_hint, autoplay, DriveError};
use crate::input::Cursor;
use crate::term::{FrameBuffer, GameView, Viewport};
use crate::types::{GameAction, ProgressionState};

pub struct App {
    game: ProgressionController,
    cursor: Cursor,
    store: Option<ProgressStore>,
    sink: Box<dyn AnalyticsSink>,
    pending: Vec<EngineEvent>,
    snapshot: GameSnapshot,
}

impl App {
    pub fn new(game: ProgressionController) -> Self {
        let mut app = Self {
            game,
            cursor: Cursor::new(),
            store: None,
            sink: Box::new(TracingSink),
            pending: Vec::new(),
            snapshot: GameSnapshot::default(),
        };
        app.sync();
        app
    }

    pub fn with_store(mut self, store: ProgressStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_sink(mut self, sink: Box<dyn AnalyticsSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn game(&self) -> &ProgressionController {
        &self.game
    }

    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    pub fn snapshot(&self) -> &GameSnapshot {
        &self.snapshot
    }

    /// Apply one player action. Returns true if anything changed.
    pub fn handle_action(&mut self, action: GameAction) -> bool {
        let state = self.game.state();
        let changed = match action {
            GameAction::Cursor(dir) => {
                state == ProgressionState::Playing
                    && self.cursor.step(dir, self.snapshot.grid_size)
            }
            GameAction::Tap => match state {
                ProgressionState::Playing => self.game.tap_tile(self.cursor.position()).changed(),
                _ => self.confirm(state),
            },
            GameAction::Confirm => self.confirm(state),
            GameAction::Pause => self.game.toggle_pause(),
            GameAction::Restart => checked(self.game.restart_level()),
            GameAction::Unlock => checked(self.game.unlock_granted()),
            GameAction::Back => match state {
                ProgressionState::UnlockPrompt => self.game.decline_unlock(),
                _ => self.game.return_to_menu(),
            },
            GameAction::Hint => driven(apply_hint(&mut self.game)),
        };
        debug!(action = action.as_str(), changed, "Action");
        self.sync();
        changed
    }

    fn confirm(&mut self, state: ProgressionState) -> bool {
        match state {
            ProgressionState::Menu => checked(self.game.continue_campaign()),
            ProgressionState::LevelComplete => checked(self.game.next_level()),
            ProgressionState::GameOver => checked(self.game.restart_level()),
            ProgressionState::Paused => self.game.resume(),
            ProgressionState::Playing | ProgressionState::UnlockPrompt => false,
        }
    }

    /// Solve the current level (demo key).
    pub fn autoplay(&mut self) -> bool {
        let changed = driven(autoplay(&mut self.game));
        self.sync();
        changed
    }

    /// Advance the clock by `dt` seconds.
    pub fn tick(&mut self, dt: f64) -> bool {
        let moved = self.game.tick(dt);
        self.sync();
        moved
    }

    pub fn render_into(&self, view: &GameView, viewport: Viewport, fb: &mut FrameBuffer) {
        view.render_into(&self.snapshot, Some(self.cursor.position()), viewport, fb);
    }

    /// Persist progress now, regardless of whether it changed.
    pub fn save(&self) {
        let Some(store) = &self.store else {
            return;
        };
        if let Err(err) = store.save(self.game.progress()) {
            warn!(error = %err, "Failed to save progress");
        }
    }

    fn sync(&mut self) {
        for event in self.game.drain_events() {
            if let EngineEvent::LevelStarted { grid_size, .. } = event {
                self.cursor.center(grid_size);
            }
            self.pending.push(event);
        }
        if !self.pending.is_empty() {
            forward_events(self.pending.drain(..), self.sink.as_mut());
        }
        if self.game.take_progress_dirty() {
            self.save();
        }
        self.game.snapshot_into(&mut self.snapshot);
    }
}

fn checked(result: Result<bool, ProgressionError>) -> bool {
    result.unwrap_or_else(|err| {
        warn!(error = %err, "Progression request rejected");
        false
    })
}

fn driven(result: Result<impl Sized, DriveError>) -> bool {
    match result {
        Ok(_) => true,
        Err(err) => {
            debug!(code = err.code(), reason = err.message(), "Solver request ignored");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Direction, TilePosition};

    #[test]
    fn enter_starts_saved_level_and_centres_cursor() {
        let mut app = App::new(ProgressionController::new(5));
        assert!(app.handle_action(GameAction::Confirm));
        assert_eq!(app.game().state(), ProgressionState::Playing);
        assert_eq!(app.cursor().position(), TilePosition::new(1, 1));
        assert!(app.snapshot().playable());
    }

    #[test]
    fn cursor_only_moves_while_playing() {
        let mut app = App::new(ProgressionController::new(5));
        assert!(!app.handle_action(GameAction::Cursor(Direction::Left)));
        app.handle_action(GameAction::Confirm);
        assert!(app.handle_action(GameAction::Cursor(Direction::Left)));
        assert!(!app.handle_action(GameAction::Cursor(Direction::Left)));
        assert_eq!(app.cursor().position(), TilePosition::new(1, 0));
    }

    #[test]
    fn tap_selects_under_cursor() {
        let mut app = App::new(ProgressionController::new(5));
        app.handle_action(GameAction::Confirm);
        assert!(app.handle_action(GameAction::Tap));
        assert_eq!(app.snapshot().selection, Some(TilePosition::new(1, 1)));
    }

    #[test]
    fn back_from_unlock_prompt_declines() {
        let mut app = App::new(ProgressionController::new(5));
        app.game.start_level(4).unwrap();
        app.sync();
        assert_eq!(app.snapshot().state, ProgressionState::UnlockPrompt);
        assert!(app.handle_action(GameAction::Back));
        assert_eq!(app.game().state(), ProgressionState::Menu);
        assert_eq!(app.game().progress().highest_unlocked_level, 3);
    }

    #[test]
    fn autoplay_then_confirm_advances() {
        let mut app = App::new(ProgressionController::new(5));
        app.handle_action(GameAction::Confirm);
        assert!(app.autoplay());
        assert_eq!(app.game().state(), ProgressionState::LevelComplete);
        assert!(app.handle_action(GameAction::Confirm));
        assert_eq!(app.game().progress().current_level, 2);
    }

    #[test]
    fn hint_outside_play_is_ignored() {
        let mut app = App::new(ProgressionController::new(5));
        assert!(!app.handle_action(GameAction::Hint));
    }
}
