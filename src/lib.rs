//! Dino Run - a side-scrolling jump-the-obstacles arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, spawning, collisions, game state)
//! - `session`: Run lifecycle, fixed-step accumulator and frame scheduling
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform abstraction
//! - `settings`: Construction-time game configuration

pub mod error;
pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use error::{Error, Result};
pub use session::Session;
pub use settings::GameConfig;
pub use sim::Difficulty;

/// Game configuration constants
pub mod consts {
    /// Reference frame rate the per-frame physics constants are tuned for
    pub const FRAME_RATE: f32 = 60.0;
    /// Fixed simulation timestep (one reference frame)
    pub const SIM_DT: f32 = 1.0 / FRAME_RATE;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta fed to the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.25;

    /// Play field dimensions (pixels, y grows downward)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 200.0;

    /// Player defaults
    pub const PLAYER_X: f32 = 50.0;
    /// Top of the player's bounding square when standing on the ground
    pub const GROUND_Y: f32 = 150.0;
    pub const PLAYER_RADIUS: f32 = 15.0;
    /// Per-frame² downward acceleration
    pub const GRAVITY: f32 = 0.3;
    /// Per-frame upward velocity applied on jump
    pub const JUMP_IMPULSE: f32 = -12.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 25.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 30.0;
    pub const OBSTACLE_MAX_HEIGHT: f32 = 70.0;
    /// Obstacles stand on this line (bottom edge)
    pub const OBSTACLE_BASELINE: f32 = 160.0;

    /// Scroll speed (pixels per reference frame)
    pub const START_SPEED: f32 = 3.0;
    pub const SPEED_STEP: f32 = 0.1;
    /// Seconds between speed increases
    pub const SPEED_RAMP_INTERVAL: f32 = 5.0;
}

/// Scale a per-reference-frame quantity to a step of `dt` seconds
#[inline]
pub fn frame_scale(dt: f32) -> f32 {
    dt * consts::FRAME_RATE
}
