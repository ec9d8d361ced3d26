//! Procedural obstacle spawning
//!
//! Two policies, picked by the difficulty preset:
//! - `Predictable`: a timed gate. Spawn once the time since the last spawn
//!   exceeds a random 2-3 second interval and the newest obstacle has moved
//!   more than 180 pixels away from the spawn edge.
//! - `Unpredictable`: a per-frame dice roll whose odds grow with speed
//!   (`0.006 * min(speed / 3, 1.5)`), gated by at least 200 pixels of
//!   clearance.
//!
//! One is a probability per frame and the other a time interval; they do not
//! produce the same obstacle density.

use rand::Rng;

use super::state::{GameState, Obstacle};
use crate::consts::*;
use crate::frame_scale;

/// Shortest timed-spawn interval (seconds)
pub const MIN_SPAWN_INTERVAL: f32 = 2.0;
/// Random extra on top of the minimum interval (seconds)
pub const SPAWN_INTERVAL_JITTER: f32 = 1.0;
/// Timed spawns need strictly more than this much clearance
pub const PREDICTABLE_CLEARANCE: f32 = 180.0;
/// Random spawns need at least this much clearance
pub const UNPREDICTABLE_CLEARANCE: f32 = 200.0;
/// Per-frame spawn chance at the starting speed
pub const BASE_SPAWN_CHANCE: f32 = 0.006;
/// Upper bound on the speed multiplier applied to the spawn chance
pub const MAX_SPAWN_MULTIPLIER: f32 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnPolicy {
    Predictable,
    Unpredictable,
}

impl SpawnPolicy {
    /// Whether the newest obstacle is far enough from the spawn edge
    pub fn has_clearance(&self, newest: Option<&Obstacle>) -> bool {
        let Some(newest) = newest else {
            return true;
        };
        match self {
            SpawnPolicy::Predictable => newest.clearance() > PREDICTABLE_CLEARANCE,
            SpawnPolicy::Unpredictable => newest.clearance() >= UNPREDICTABLE_CLEARANCE,
        }
    }
}

/// Per-reference-frame spawn probability for the random policy
pub fn spawn_chance(speed: f32) -> f32 {
    BASE_SPAWN_CHANCE * (speed / START_SPEED).min(MAX_SPAWN_MULTIPLIER)
}

/// Draw the next timed-spawn interval
pub fn random_interval(rng: &mut impl Rng) -> f32 {
    rng.random_range(MIN_SPAWN_INTERVAL..MIN_SPAWN_INTERVAL + SPAWN_INTERVAL_JITTER)
}

/// Draw an obstacle height in `[OBSTACLE_MIN_HEIGHT, OBSTACLE_MAX_HEIGHT)`
pub fn random_height(rng: &mut impl Rng) -> f32 {
    rng.random_range(OBSTACLE_MIN_HEIGHT..OBSTACLE_MAX_HEIGHT)
}

/// Advance the spawn timer by `dt` and push a new obstacle if the policy
/// allows it. Returns true if one was spawned.
pub fn try_spawn(state: &mut GameState, dt: f32) -> bool {
    if let Some(since) = state.since_spawn.as_mut() {
        *since += dt;
    }

    let policy = state.difficulty.spawn_policy();
    if !policy.has_clearance(state.newest_obstacle()) {
        return false;
    }

    let spawn = match policy {
        SpawnPolicy::Predictable => state
            .since_spawn
            .is_none_or(|since| since > state.spawn_interval),
        SpawnPolicy::Unpredictable => {
            let chance = spawn_chance(state.speed) * frame_scale(dt);
            state.rng.random::<f32>() < chance
        }
    };
    if !spawn {
        return false;
    }

    let height = random_height(&mut state.rng);
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle::at_spawn_edge(id, height));
    state.since_spawn = Some(0.0);
    if policy == SpawnPolicy::Predictable {
        state.spawn_interval = random_interval(&mut state.rng);
    }
    log::trace!("Spawned obstacle {} (height {:.0})", id, height);
    true
}
