//! Progression controller - the campaign state machine
//!
//! The controller owns the single active [`LevelSession`] and the
//! [`PlayerProgress`] that survives level transitions.
//!
//! ```text
//! Menu --start_level--> Playing <--pause/resume--> Paused
//!   ^                    |     \
//!   |            complete|      \timeout
//!   |                    v       v
//!   |  <--(level 10)-- LevelComplete   GameOver --restart--> Playing
//!   |                    |next_level
//!   |                    v
//!   +--decline-- UnlockPrompt --unlock_granted--> Playing
//! ```
//!
//! The first three levels are free. Every later level is gated once: reaching
//! it for the first time shows the unlock prompt, and granting the unlock
//! raises `highest_unlocked_level`.

use tracing::{debug, info};

use crate::error::ProgressionError;
use crate::event::EngineEvent;
use crate::session::{LevelSession, TapOutcome};
use crate::snapshot::GameSnapshot;
use crate::types::{
    PlayerProgress, ProgressionState, SessionState, TilePosition, CAMPAIGN_LEVELS, FREE_LEVELS,
};

/// Top-level game state machine.
#[derive(Debug, Clone)]
pub struct ProgressionController {
    state: ProgressionState,
    progress: PlayerProgress,
    session: LevelSession,
    /// Level the unlock prompt is offering.
    pending_unlock: Option<u32>,
    /// Set whenever `progress` changes; cleared by [`Self::take_progress_dirty`].
    progress_dirty: bool,
    /// Level whose completion already counted towards the totals.
    scored_level: Option<u32>,
    events: Vec<EngineEvent>,
}

impl ProgressionController {
    /// Fresh campaign with default progress.
    pub fn new(seed: u32) -> Self {
        Self::with_progress(seed, PlayerProgress::default())
    }

    /// Resume a campaign from saved progress (normalised on load).
    pub fn with_progress(seed: u32, progress: PlayerProgress) -> Self {
        Self {
            state: ProgressionState::Menu,
            progress: progress.normalized(),
            session: LevelSession::new(seed),
            pending_unlock: None,
            progress_dirty: false,
            scored_level: None,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> ProgressionState {
        self.state
    }

    pub fn progress(&self) -> &PlayerProgress {
        &self.progress
    }

    pub fn session(&self) -> &LevelSession {
        &self.session
    }

    pub fn pending_unlock(&self) -> Option<u32> {
        self.pending_unlock
    }

    /// Whether progress changed since the last call.
    pub fn take_progress_dirty(&mut self) -> bool {
        std::mem::take(&mut self.progress_dirty)
    }

    /// Start a level from the menu.
    ///
    /// `level` is clamped to the campaign. A locked level that is next in line
    /// shows the unlock prompt instead; anything further ahead is rejected with
    /// [`ProgressionError::LevelLocked`]. Returns `Ok(false)` outside `Menu`.
    pub fn start_level(&mut self, level: u32) -> Result<bool, ProgressionError> {
        if self.state != ProgressionState::Menu {
            return Ok(false);
        }
        let level = level.clamp(1, CAMPAIGN_LEVELS);

        if !self.progress.is_unlocked(level) {
            if level > self.progress.highest_unlocked_level + 1 {
                return Err(ProgressionError::LevelLocked { level });
            }
            self.show_unlock_prompt(level);
            return Ok(true);
        }

        self.begin_level(level)
    }

    /// Continue the campaign from the menu at the saved level.
    pub fn continue_campaign(&mut self) -> Result<bool, ProgressionError> {
        self.start_level(self.progress.current_level)
    }

    fn begin_level(&mut self, level: u32) -> Result<bool, ProgressionError> {
        let result = self.session.start(level);
        self.collect_session_events();
        result?;

        if self.progress.current_level != level {
            self.progress.current_level = level;
            self.progress_dirty = true;
        }
        self.pending_unlock = None;
        self.set_state(ProgressionState::Playing);
        Ok(true)
    }

    fn show_unlock_prompt(&mut self, level: u32) {
        self.pending_unlock = Some(level);
        self.set_state(ProgressionState::UnlockPrompt);
        info!(level, "Unlock prompt shown");
        self.events.push(EngineEvent::UnlockPromptShown { level });
    }

    fn set_state(&mut self, next: ProgressionState) {
        if self.state != next {
            debug!(from = self.state.as_str(), to = next.as_str(), "Progression transition");
            self.state = next;
        }
    }

    fn collect_session_events(&mut self) {
        self.events.extend(self.session.drain_events());
    }

    /// Forward elapsed time to the session. Returns true if the clock moved.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.state != ProgressionState::Playing {
            return false;
        }
        let moved = self.session.tick(dt);
        self.collect_session_events();
        if self.session.state() == SessionState::Failed {
            self.set_state(ProgressionState::GameOver);
        }
        moved
    }

    /// Forward a tap to the session.
    pub fn tap_tile(&mut self, pos: TilePosition) -> TapOutcome {
        if self.state != ProgressionState::Playing {
            return TapOutcome::Ignored;
        }
        let outcome = self.session.tap_tile(pos);
        self.collect_session_events();

        if let TapOutcome::Completed(result) = outcome {
            let level = self.session.level();
            if self.scored_level == Some(level) {
                debug!(level, points = result.points, "Replay complete, totals unchanged");
            } else {
                self.progress.total_score = self
                    .progress
                    .total_score
                    .saturating_add(result.points as u64);
                self.progress.total_stars = self
                    .progress
                    .total_stars
                    .saturating_add(result.stars as u32);
                self.scored_level = Some(level);
                self.progress_dirty = true;
            }
            self.set_state(ProgressionState::LevelComplete);
        }
        outcome
    }

    pub fn pause(&mut self) -> bool {
        if self.state != ProgressionState::Playing || !self.session.pause() {
            return false;
        }
        self.set_state(ProgressionState::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state != ProgressionState::Paused || !self.session.resume() {
            return false;
        }
        self.set_state(ProgressionState::Playing);
        true
    }

    /// Pause when playing, resume when paused.
    pub fn toggle_pause(&mut self) -> bool {
        match self.state {
            ProgressionState::Playing => self.pause(),
            ProgressionState::Paused => self.resume(),
            _ => false,
        }
    }

    /// Advance after a completed level.
    ///
    /// After the last level the campaign ends in `Menu`. A locked next level
    /// shows the unlock prompt; otherwise the next level starts.
    pub fn next_level(&mut self) -> Result<bool, ProgressionError> {
        if self.state != ProgressionState::LevelComplete {
            return Ok(false);
        }

        let current = self.progress.current_level;
        if current >= CAMPAIGN_LEVELS {
            info!(
                total_score = self.progress.total_score,
                total_stars = self.progress.total_stars,
                "Campaign complete"
            );
            self.session.abandon();
            self.set_state(ProgressionState::Menu);
            return Ok(true);
        }

        let next = current + 1;
        if current >= FREE_LEVELS && next > self.progress.highest_unlocked_level {
            self.show_unlock_prompt(next);
            return Ok(true);
        }
        self.begin_level(next)
    }

    /// The unlock collaborator granted the pending level.
    pub fn unlock_granted(&mut self) -> Result<bool, ProgressionError> {
        let (ProgressionState::UnlockPrompt, Some(level)) = (self.state, self.pending_unlock) else {
            return Ok(false);
        };
        if level > self.progress.highest_unlocked_level {
            self.progress.highest_unlocked_level = level;
            self.progress_dirty = true;
        }
        info!(level, "Level unlocked");
        self.begin_level(level)
    }

    /// Turn down the unlock offer and go back to the menu.
    pub fn decline_unlock(&mut self) -> bool {
        if self.state != ProgressionState::UnlockPrompt {
            return false;
        }
        self.pending_unlock = None;
        self.session.abandon();
        self.set_state(ProgressionState::Menu);
        true
    }

    /// Replay the current level from scratch.
    ///
    /// Completing a level again before moving on leaves the campaign totals
    /// as they were.
    pub fn restart_level(&mut self) -> Result<bool, ProgressionError> {
        match self.state {
            ProgressionState::GameOver
            | ProgressionState::Playing
            | ProgressionState::Paused
            | ProgressionState::LevelComplete => self.begin_level(self.progress.current_level),
            ProgressionState::Menu | ProgressionState::UnlockPrompt => Ok(false),
        }
    }

    /// Abandon whatever is running and show the menu.
    pub fn return_to_menu(&mut self) -> bool {
        if self.state == ProgressionState::Menu {
            return false;
        }
        self.pending_unlock = None;
        self.session.abandon();
        self.set_state(ProgressionState::Menu);
        true
    }

    /// Take every queued event, oldest first.
    pub fn drain_events(&mut self) -> std::vec::Drain<'_, EngineEvent> {
        self.events.drain(..)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.session.snapshot_into(out);
        if self.session.state() == SessionState::Loading {
            out.session_state = None;
        }
        out.state = self.state;
        out.total_score = self.progress.total_score;
        out.total_stars = self.progress.total_stars;
        out.highest_unlocked_level = self.progress.highest_unlocked_level;
        out.pending_unlock = self.pending_unlock;
        if out.level == 0 {
            out.level = self.progress.current_level;
        }
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for ProgressionController {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve(controller: &mut ProgressionController) {
        let log = controller.session().scramble_log().to_vec();
        for mv in log.iter().rev() {
            controller.tap_tile(mv.a);
            controller.tap_tile(mv.b);
            if controller.state() != ProgressionState::Playing {
                break;
            }
        }
        assert_eq!(controller.state(), ProgressionState::LevelComplete);
    }

    #[test]
    fn test_starts_in_menu() {
        let controller = ProgressionController::new(7);
        assert_eq!(controller.state(), ProgressionState::Menu);
        assert_eq!(*controller.progress(), PlayerProgress::default());
        assert_eq!(controller.snapshot().session_state, None);
    }

    #[test]
    fn test_start_level_plays() {
        let mut controller = ProgressionController::new(7);
        assert_eq!(controller.start_level(2), Ok(true));
        assert_eq!(controller.state(), ProgressionState::Playing);
        assert_eq!(controller.progress().current_level, 2);
        assert_eq!(controller.session().level(), 2);
        // Already playing: ignored.
        assert_eq!(controller.start_level(1), Ok(false));
        assert_eq!(controller.session().level(), 2);
    }

    #[test]
    fn test_completion_accumulates_score() {
        let mut controller = ProgressionController::new(7);
        controller.start_level(1).unwrap();
        solve(&mut controller);

        let result = controller.session().result().unwrap();
        assert_eq!(controller.progress().total_score, result.points as u64);
        assert_eq!(controller.progress().total_stars, result.stars as u32);
        assert!(controller.take_progress_dirty());
        assert!(!controller.take_progress_dirty());
    }

    #[test]
    fn test_timeout_goes_to_game_over_and_restart_recovers() {
        let mut controller = ProgressionController::new(7);
        controller.start_level(1).unwrap();
        controller.tick(60.0);
        assert_eq!(controller.state(), ProgressionState::GameOver);
        assert!(!controller.tick(1.0));

        assert_eq!(controller.restart_level(), Ok(true));
        assert_eq!(controller.state(), ProgressionState::Playing);
        assert_eq!(controller.session().time_remaining(), 60.0);
        assert_eq!(controller.progress().total_score, 0);
    }

    #[test]
    fn test_replaying_completed_level_does_not_add_score() {
        let mut controller = ProgressionController::new(7);
        controller.start_level(1).unwrap();
        solve(&mut controller);
        let first = *controller.progress();
        assert!(controller.take_progress_dirty());

        for _ in 0..3 {
            assert_eq!(controller.restart_level(), Ok(true));
            solve(&mut controller);
            assert_eq!(controller.state(), ProgressionState::LevelComplete);
        }
        controller.return_to_menu();
        controller.continue_campaign().unwrap();
        solve(&mut controller);

        assert_eq!(controller.progress().total_score, first.total_score);
        assert_eq!(controller.progress().total_stars, first.total_stars);
        assert!(!controller.take_progress_dirty());

        // The next level still counts.
        controller.next_level().unwrap();
        solve(&mut controller);
        assert!(controller.progress().total_score > first.total_score);
    }

    #[test]
    fn test_pause_resume() {
        let mut controller = ProgressionController::new(7);
        assert!(!controller.pause());
        controller.start_level(1).unwrap();
        assert!(controller.pause());
        assert_eq!(controller.state(), ProgressionState::Paused);
        assert!(!controller.tick(5.0));
        assert_eq!(
            controller.tap_tile(TilePosition::new(0, 0)),
            TapOutcome::Ignored
        );
        assert!(controller.toggle_pause());
        assert_eq!(controller.state(), ProgressionState::Playing);
        assert_eq!(controller.session().time_remaining(), 60.0);
    }

    #[test]
    fn test_free_levels_advance_without_prompt() {
        let mut controller = ProgressionController::new(7);
        controller.start_level(1).unwrap();
        solve(&mut controller);
        assert_eq!(controller.next_level(), Ok(true));
        assert_eq!(controller.state(), ProgressionState::Playing);
        assert_eq!(controller.progress().current_level, 2);
    }

    #[test]
    fn test_level_three_completion_prompts_for_unlock() {
        let mut controller = ProgressionController::new(7);
        controller.start_level(3).unwrap();
        solve(&mut controller);
        controller.drain_events().for_each(drop);

        assert_eq!(controller.next_level(), Ok(true));
        assert_eq!(controller.state(), ProgressionState::UnlockPrompt);
        assert_eq!(controller.pending_unlock(), Some(4));
        let events: Vec<_> = controller.drain_events().collect();
        assert_eq!(events, vec![EngineEvent::UnlockPromptShown { level: 4 }]);

        assert_eq!(controller.unlock_granted(), Ok(true));
        assert_eq!(controller.state(), ProgressionState::Playing);
        assert_eq!(controller.progress().current_level, 4);
        assert_eq!(controller.progress().highest_unlocked_level, 4);
    }

    #[test]
    fn test_unlocked_level_skips_prompt() {
        let progress = PlayerProgress {
            current_level: 4,
            highest_unlocked_level: 5,
            ..PlayerProgress::default()
        };
        let mut controller = ProgressionController::with_progress(7, progress);
        controller.start_level(4).unwrap();
        solve(&mut controller);
        controller.next_level().unwrap();
        assert_eq!(controller.state(), ProgressionState::Playing);
        assert_eq!(controller.progress().current_level, 5);
    }

    #[test]
    fn test_decline_unlock_returns_to_menu() {
        let mut controller = ProgressionController::new(7);
        controller.start_level(3).unwrap();
        solve(&mut controller);
        controller.next_level().unwrap();
        assert!(controller.decline_unlock());
        assert_eq!(controller.state(), ProgressionState::Menu);
        assert_eq!(controller.progress().highest_unlocked_level, 3);
        assert_eq!(controller.unlock_granted(), Ok(false));
    }

    #[test]
    fn test_starting_locked_level() {
        let mut controller = ProgressionController::new(7);
        assert_eq!(
            controller.start_level(6),
            Err(ProgressionError::LevelLocked { level: 6 })
        );
        assert_eq!(controller.state(), ProgressionState::Menu);

        assert_eq!(controller.start_level(4), Ok(true));
        assert_eq!(controller.state(), ProgressionState::UnlockPrompt);
        assert_eq!(controller.pending_unlock(), Some(4));
        controller.unlock_granted().unwrap();
        assert_eq!(controller.session().level(), 4);
    }

    #[test]
    fn test_last_level_returns_to_menu() {
        let progress = PlayerProgress {
            current_level: 10,
            highest_unlocked_level: 10,
            ..PlayerProgress::default()
        };
        let mut controller = ProgressionController::with_progress(7, progress);
        controller.continue_campaign().unwrap();
        assert_eq!(controller.session().level(), 10);
        solve(&mut controller);
        assert_eq!(controller.next_level(), Ok(true));
        assert_eq!(controller.state(), ProgressionState::Menu);
    }

    #[test]
    fn test_wrong_state_calls_are_ignored() {
        let mut controller = ProgressionController::new(7);
        assert_eq!(controller.next_level(), Ok(false));
        assert_eq!(controller.unlock_granted(), Ok(false));
        assert_eq!(controller.restart_level(), Ok(false));
        assert!(!controller.decline_unlock());
        assert!(!controller.resume());
        assert!(!controller.return_to_menu());
        assert_eq!(controller.state(), ProgressionState::Menu);
    }

    #[test]
    fn test_return_to_menu_abandons_session() {
        let mut controller = ProgressionController::new(7);
        controller.start_level(2).unwrap();
        assert!(controller.return_to_menu());
        assert_eq!(controller.state(), ProgressionState::Menu);
        assert_eq!(controller.session().state(), SessionState::Loading);
        assert_eq!(controller.progress().current_level, 2);
    }

    #[test]
    fn test_low_saved_unlock_is_normalised() {
        let progress = PlayerProgress {
            highest_unlocked_level: 1,
            current_level: 0,
            ..PlayerProgress::default()
        };
        let controller = ProgressionController::with_progress(7, progress);
        assert_eq!(controller.progress().highest_unlocked_level, 3);
        assert_eq!(controller.progress().current_level, 1);
    }

    #[test]
    fn test_events_keep_emission_order() {
        let mut controller = ProgressionController::new(7);
        controller.start_level(1).unwrap();
        controller.tick(60.0);
        let names: Vec<_> = controller.drain_events().map(|e| e.name()).collect();
        assert_eq!(names, vec!["level_start", "level_fail"]);
    }
}
