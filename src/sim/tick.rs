//! Simulation step
//!
//! Core game loop that advances a run by one frame.

use super::collision::first_hit;
use super::spawn::try_spawn;
use super::state::{GamePhase, GameState};
use crate::frame_scale;

/// How many reference frames of lead the autopilot gives itself before an
/// obstacle reaches the player
const AUTOPILOT_LEAD_FRAMES: f32 = 12.0;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (space/tap); starts the run when not started
    pub jump: bool,
    /// Pause toggle (ignored unless the config allows pausing)
    pub pause: bool,
    /// Demo mode - the simulation jumps on its own
    pub autopilot: bool,
}

/// What happened during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The player hit an obstacle; the run is over
    pub collided: bool,
    /// Obstacles that left the field (each scored one point)
    pub cleared: u32,
    /// A new obstacle entered at the right edge
    pub spawned: bool,
}

/// Advance the game state by one step of `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    match state.phase {
        GamePhase::NotStarted => {
            // The start input doubles as the first jump press, but does not jump
            if !input.jump || !state.start() {
                return outcome;
            }
        }
        GamePhase::Running => {
            if input.pause && state.toggle_pause() {
                return outcome;
            }
            if input.jump || (input.autopilot && autopilot_wants_jump(state)) {
                state.player.jump();
            }
        }
        GamePhase::Paused => {
            if !(input.pause && state.toggle_pause()) {
                return outcome;
            }
        }
        GamePhase::GameOver => return outcome,
    }

    let scale = frame_scale(dt);
    state.time_ticks += 1;
    state.elapsed += dt;

    state.player.integrate(scale);
    state.ramp_speed(dt);
    outcome.spawned = try_spawn(state, dt);

    let scroll = state.speed * scale;
    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= scroll;
    }
    let before = state.obstacles.len();
    state.obstacles.retain(|obstacle| !obstacle.is_off_field());
    outcome.cleared = (before - state.obstacles.len()) as u32;
    state.score += outcome.cleared;

    if let Some(index) = first_hit(&state.player.bounds(), &state.obstacles) {
        state.phase = GamePhase::GameOver;
        outcome.collided = true;
        log::info!(
            "Game over: hit obstacle {} at {:.1}s, score {}",
            state.obstacles[index].id,
            state.elapsed,
            state.score
        );
    }

    outcome
}

/// By-value form of [`tick`]: consume a state and return the next one
pub fn step(mut state: GameState, input: &TickInput, dt: f32) -> (GameState, TickOutcome) {
    let outcome = tick(&mut state, input, dt);
    (state, outcome)
}

/// Jump when the nearest obstacle ahead is within a speed-scaled lead distance
fn autopilot_wants_jump(state: &GameState) -> bool {
    let player = &state.player;
    if !player.is_grounded() {
        return false;
    }
    let front = player.pos.x + player.radius * 2.0;
    let lead = state.speed * AUTOPILOT_LEAD_FRAMES;
    state
        .obstacles
        .iter()
        .find(|obstacle| obstacle.pos.x + obstacle.size.x > player.pos.x)
        .is_some_and(|obstacle| obstacle.pos.x - front <= lead)
}
