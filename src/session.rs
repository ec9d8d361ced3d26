//! Run lifecycle on top of the simulation
//!
//! A `Session` owns the `GameState`, turns host frame timestamps into fixed
//! simulation steps, latches one-shot inputs between frames and reports the
//! end of a run exactly once. Frame callbacks are requested from a
//! [`FrameScheduler`]: one per frame while the run is live, none after game
//! over, and the pending one is cancelled on reset.

use crate::consts::*;
use crate::platform::{FrameHandle, FrameScheduler};
use crate::settings::GameConfig;
use crate::sim::{GamePhase, GameState, TickInput, tick};

/// Called with the final score when a run ends
pub type GameOverCallback = Box<dyn FnMut(u32)>;

/// Summary of one host frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Simulation steps taken
    pub steps: u32,
    /// The run ended during this frame
    pub game_over: bool,
}

pub struct Session {
    config: GameConfig,
    state: GameState,
    accumulator: f32,
    /// Host timestamp of the previous frame (ms)
    last_time: Option<f64>,
    input: TickInput,
    pending_frame: Option<FrameHandle>,
    on_game_over: GameOverCallback,
    game_over_reported: bool,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64, on_game_over: impl FnMut(u32) + 'static) -> Self {
        Self {
            config,
            state: GameState::new(&config, seed),
            accumulator: 0.0,
            last_time: None,
            input: TickInput::default(),
            pending_frame: None,
            on_game_over: Box::new(on_game_over),
            game_over_reported: false,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    /// Whether a frame callback is currently scheduled
    pub fn is_scheduled(&self) -> bool {
        self.pending_frame.is_some()
    }

    pub fn autopilot(&self) -> bool {
        self.input.autopilot
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
        log::info!("Autopilot: {}", enabled);
    }

    /// Jump trigger: starts the run when not started, jumps while running,
    /// ignored after game over
    pub fn press_jump(&mut self, scheduler: &mut impl FrameScheduler) {
        match self.state.phase {
            GamePhase::NotStarted => {
                self.input.jump = true;
                self.schedule(scheduler);
            }
            GamePhase::Running => self.input.jump = true,
            GamePhase::Paused | GamePhase::GameOver => {}
        }
    }

    /// Pause toggle; only latched when the config allows pausing
    pub fn toggle_pause(&mut self) {
        if !self.config.allow_pause {
            return;
        }
        if matches!(self.state.phase, GamePhase::Running | GamePhase::Paused) {
            self.input.pause = !self.input.pause;
        }
    }

    /// Pause a running game; repeated calls before the next frame stay paused
    pub fn request_pause(&mut self) {
        if self.config.allow_pause && self.state.phase == GamePhase::Running {
            self.input.pause = true;
        }
    }

    /// Return to not-started with a fresh run, releasing any scheduled frame
    pub fn reset(&mut self, seed: u64, scheduler: &mut impl FrameScheduler) {
        if let Some(handle) = self.pending_frame.take() {
            scheduler.cancel_frame(handle);
        }
        self.state = GameState::new(&self.config, seed);
        self.accumulator = 0.0;
        self.last_time = None;
        self.input = TickInput {
            autopilot: self.input.autopilot,
            ..Default::default()
        };
        self.game_over_reported = false;
        log::info!("Session reset with seed: {}", seed);
    }

    /// Run the simulation for one host frame at `now_ms`, then schedule the
    /// next frame if the run is still live
    pub fn frame(&mut self, now_ms: f64, scheduler: &mut impl FrameScheduler) -> FrameReport {
        // This callback is the one that was pending
        self.pending_frame = None;
        let mut report = FrameReport::default();

        let dt = match self.last_time {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_time = Some(now_ms);
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        while self.accumulator >= SIM_DT && report.steps < MAX_SUBSTEPS {
            let outcome = tick(&mut self.state, &self.input, SIM_DT);
            self.accumulator -= SIM_DT;
            report.steps += 1;

            // Clear one-shot inputs after processing
            self.input.jump = false;
            self.input.pause = false;

            if outcome.collided {
                report.game_over = true;
                self.report_game_over();
                break;
            }
        }

        if matches!(self.state.phase, GamePhase::Running | GamePhase::Paused) {
            self.schedule(scheduler);
        }
        report
    }

    fn schedule(&mut self, scheduler: &mut impl FrameScheduler) {
        if self.pending_frame.is_none() {
            self.pending_frame = scheduler.request_frame();
        }
    }

    fn report_game_over(&mut self) {
        if self.game_over_reported {
            return;
        }
        self.game_over_reported = true;
        self.accumulator = 0.0;
        (self.on_game_over)(self.state.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ManualScheduler;
    use crate::sim::{Difficulty, Obstacle};
    use glam::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Slightly longer than a step so every frame advances the simulation
    const FRAME_MS: f64 = 20.0;

    fn session(allow_pause: bool) -> (Session, Rc<RefCell<Vec<u32>>>) {
        let scores = Rc::new(RefCell::new(Vec::new()));
        let sink = scores.clone();
        let config = GameConfig {
            allow_pause,
            difficulty: Difficulty::Easy,
        };
        let session = Session::new(config, 2024, move |score| sink.borrow_mut().push(score));
        (session, scores)
    }

    /// Fire pending frames until none is left or `max` frames ran
    fn pump(session: &mut Session, scheduler: &mut ManualScheduler, t: &mut f64, max: u32) -> u32 {
        let mut frames = 0;
        while frames < max && scheduler.fire().is_some() {
            *t += FRAME_MS;
            session.frame(*t, scheduler);
            frames += 1;
        }
        frames
    }

    fn block_player(session: &mut Session) {
        let state = &mut session.state;
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle {
            id,
            pos: Vec2::new(PLAYER_X + 5.0, OBSTACLE_BASELINE - 40.0),
            size: Vec2::new(OBSTACLE_WIDTH, 40.0),
        });
    }

    #[test]
    fn test_nothing_scheduled_before_start() {
        let (session, _) = session(false);
        assert_eq!(session.phase(), GamePhase::NotStarted);
        assert!(!session.is_scheduled());
    }

    #[test]
    fn test_jump_starts_and_schedules() {
        let (mut session, _) = session(false);
        let mut scheduler = ManualScheduler::new();
        session.press_jump(&mut scheduler);
        session.press_jump(&mut scheduler);
        // Double press before the first frame schedules only once
        assert_eq!(scheduler.requested.len(), 1);
        assert!(session.is_scheduled());

        let mut t = 0.0;
        assert_eq!(pump(&mut session, &mut scheduler, &mut t, 1), 1);
        assert_eq!(session.phase(), GamePhase::Running);
        assert!(session.state().player.is_grounded());
        assert!(scheduler.has_pending());
    }

    #[test]
    fn test_game_over_fires_once_and_stops_frames() {
        let (mut session, scores) = session(false);
        let mut scheduler = ManualScheduler::new();
        let mut t = 0.0;
        session.press_jump(&mut scheduler);
        pump(&mut session, &mut scheduler, &mut t, 5);

        session.state.score = 3;
        block_player(&mut session);
        block_player(&mut session);
        pump(&mut session, &mut scheduler, &mut t, 10);

        assert_eq!(session.phase(), GamePhase::GameOver);
        assert_eq!(*scores.borrow(), vec![3]);
        assert!(!scheduler.has_pending());
        assert!(!session.is_scheduled());

        // Stray frames and inputs after game over change nothing
        session.press_jump(&mut scheduler);
        session.frame(t + FRAME_MS, &mut scheduler);
        assert!(!scheduler.has_pending());
        assert_eq!(scores.borrow().len(), 1);
    }

    #[test]
    fn test_reset_cancels_pending_frame() {
        let (mut session, scores) = session(false);
        let mut scheduler = ManualScheduler::new();
        let mut t = 0.0;
        session.press_jump(&mut scheduler);
        pump(&mut session, &mut scheduler, &mut t, 3);
        assert!(scheduler.has_pending());

        session.reset(7, &mut scheduler);
        assert_eq!(scheduler.cancelled.len(), 1);
        assert!(!scheduler.has_pending());
        assert_eq!(session.phase(), GamePhase::NotStarted);
        assert_eq!(session.score(), 0);
        assert!(session.state().obstacles.is_empty());
        assert!(scores.borrow().is_empty());

        // A fresh run reports its own game over
        session.press_jump(&mut scheduler);
        pump(&mut session, &mut scheduler, &mut t, 2);
        block_player(&mut session);
        pump(&mut session, &mut scheduler, &mut t, 10);
        assert_eq!(*scores.borrow(), vec![0]);
    }

    #[test]
    fn test_pause_keeps_frames_without_stepping() {
        let (mut session, _) = session(true);
        let mut scheduler = ManualScheduler::new();
        let mut t = 0.0;
        session.press_jump(&mut scheduler);
        pump(&mut session, &mut scheduler, &mut t, 3);

        session.toggle_pause();
        pump(&mut session, &mut scheduler, &mut t, 1);
        assert_eq!(session.phase(), GamePhase::Paused);
        let ticks = session.state().time_ticks;

        assert_eq!(pump(&mut session, &mut scheduler, &mut t, 30), 30);
        assert_eq!(session.state().time_ticks, ticks);
        assert!(scheduler.has_pending());

        session.toggle_pause();
        pump(&mut session, &mut scheduler, &mut t, 1);
        assert_eq!(session.phase(), GamePhase::Running);
        assert!(session.state().time_ticks > ticks);
    }

    #[test]
    fn test_request_pause_is_idempotent() {
        let (mut session, _) = session(true);
        let mut scheduler = ManualScheduler::new();
        let mut t = 0.0;
        session.press_jump(&mut scheduler);
        pump(&mut session, &mut scheduler, &mut t, 3);

        // Two hide events before the next frame
        session.request_pause();
        session.request_pause();
        pump(&mut session, &mut scheduler, &mut t, 1);
        assert_eq!(session.phase(), GamePhase::Paused);

        // Already paused: stays paused
        session.request_pause();
        pump(&mut session, &mut scheduler, &mut t, 1);
        assert_eq!(session.phase(), GamePhase::Paused);

        // A pause key press followed by a hide event still pauses
        session.toggle_pause();
        pump(&mut session, &mut scheduler, &mut t, 1);
        assert_eq!(session.phase(), GamePhase::Running);
        session.toggle_pause();
        session.request_pause();
        pump(&mut session, &mut scheduler, &mut t, 1);
        assert_eq!(session.phase(), GamePhase::Paused);
    }

    #[test]
    fn test_request_pause_needs_config() {
        let (mut session, _) = session(false);
        let mut scheduler = ManualScheduler::new();
        let mut t = 0.0;
        session.press_jump(&mut scheduler);
        pump(&mut session, &mut scheduler, &mut t, 2);
        session.request_pause();
        pump(&mut session, &mut scheduler, &mut t, 1);
        assert_eq!(session.phase(), GamePhase::Running);
    }

    #[test]
    fn test_pause_disabled_is_ignored() {
        let (mut session, _) = session(false);
        let mut scheduler = ManualScheduler::new();
        let mut t = 0.0;
        session.press_jump(&mut scheduler);
        pump(&mut session, &mut scheduler, &mut t, 2);
        session.toggle_pause();
        pump(&mut session, &mut scheduler, &mut t, 2);
        assert_eq!(session.phase(), GamePhase::Running);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let (mut session, _) = session(false);
        let mut scheduler = ManualScheduler::new();
        session.press_jump(&mut scheduler);
        scheduler.fire();
        session.frame(0.0, &mut scheduler);
        scheduler.fire();
        // A 5 second hitch still runs at most MAX_SUBSTEPS steps
        let report = session.frame(5000.0, &mut scheduler);
        assert_eq!(report.steps, MAX_SUBSTEPS);
    }
}
