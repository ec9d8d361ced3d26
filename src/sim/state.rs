//! Game state and core simulation types
//!
//! Everything a run needs lives in one owned `GameState` value.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::difficulty::Difficulty;
use super::spawn;
use crate::GameConfig;
use crate::consts::*;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for the first jump/start input
    NotStarted,
    /// Active gameplay
    Running,
    /// Game is paused (only when the config allows it)
    Paused,
    /// Run ended on a collision
    GameOver,
}

/// The runner
#[derive(Debug, Clone)]
pub struct Player {
    /// Top-left corner of the bounding square
    pub pos: Vec2,
    /// Vertical velocity (pixels per reference frame, negative is up)
    pub vel_y: f32,
    pub radius: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: Vec2::new(PLAYER_X, GROUND_Y),
            vel_y: 0.0,
            radius: PLAYER_RADIUS,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,
        }
    }
}

impl Player {
    /// Standing on the ground (jumps are only allowed from here)
    pub fn is_grounded(&self) -> bool {
        self.pos.y >= GROUND_Y
    }

    /// Apply the jump impulse if grounded; returns whether it jumped
    pub fn jump(&mut self) -> bool {
        if self.is_grounded() {
            self.vel_y = self.jump_impulse;
            true
        } else {
            false
        }
    }

    /// Integrate gravity over `scale` reference frames and land on the ground
    pub fn integrate(&mut self, scale: f32) {
        self.vel_y += self.gravity * scale;
        self.pos.y += self.vel_y * scale;
        if self.pos.y > GROUND_Y {
            self.pos.y = GROUND_Y;
            self.vel_y = 0.0;
        }
    }

    /// Center of the drawn circle
    pub fn center(&self) -> Vec2 {
        self.pos + Vec2::splat(self.radius)
    }

    /// Bounding square used for collision
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::splat(self.radius * 2.0))
    }
}

/// An obstacle scrolling toward the player
#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Obstacle {
    /// A new obstacle at the right edge, standing on the baseline
    pub fn at_spawn_edge(id: u32, height: f32) -> Self {
        Self {
            id,
            pos: Vec2::new(FIELD_WIDTH, OBSTACLE_BASELINE - height),
            size: Vec2::new(OBSTACLE_WIDTH, height),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Distance between the spawn edge and this obstacle's left side
    pub fn clearance(&self) -> f32 {
        FIELD_WIDTH - self.pos.x
    }

    /// Fully past the left edge of the field
    pub fn is_off_field(&self) -> bool {
        self.pos.x < -self.size.x
    }
}

/// Complete game state (deterministic given seed and inputs)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub difficulty: Difficulty,
    pub allow_pause: bool,
    pub phase: GamePhase,
    pub player: Player,
    /// Active obstacles in spawn order (also left-to-right order)
    pub obstacles: Vec<Obstacle>,
    /// Scroll speed (pixels per reference frame)
    pub speed: f32,
    /// Obstacles cleared this run
    pub score: u32,
    /// Seconds since the last spawn (`None` before the first one)
    pub since_spawn: Option<f32>,
    /// Timed-spawn gap to wait for before the next spawn (seconds)
    pub spawn_interval: f32,
    /// Seconds since the last speed increase
    pub since_speed_ramp: f32,
    /// Running time in seconds (paused time excluded)
    pub elapsed: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a not-yet-started run
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let spawn_interval = spawn::random_interval(&mut rng);
        Self {
            seed,
            difficulty: config.difficulty,
            allow_pause: config.allow_pause,
            phase: GamePhase::NotStarted,
            player: Player::default(),
            obstacles: Vec::new(),
            speed: START_SPEED,
            score: 0,
            since_spawn: None,
            spawn_interval,
            since_speed_ramp: 0.0,
            elapsed: 0.0,
            time_ticks: 0,
            rng,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Begin the run; returns false if it was already started
    pub fn start(&mut self) -> bool {
        if self.phase != GamePhase::NotStarted {
            return false;
        }
        self.phase = GamePhase::Running;
        log::info!(
            "Run started ({}, pause {}, seed {})",
            self.difficulty.as_str(),
            if self.allow_pause { "on" } else { "off" },
            self.seed
        );
        true
    }

    /// Flip between Running and Paused; returns whether the phase changed
    pub fn toggle_pause(&mut self) -> bool {
        if !self.allow_pause {
            return false;
        }
        match self.phase {
            GamePhase::Running => {
                self.phase = GamePhase::Paused;
                log::info!("Paused at score {}", self.score);
                true
            }
            GamePhase::Paused => {
                self.phase = GamePhase::Running;
                log::info!("Resumed");
                true
            }
            _ => false,
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Most recently spawned obstacle
    pub fn newest_obstacle(&self) -> Option<&Obstacle> {
        self.obstacles.last()
    }

    /// Raise the scroll speed once per ramp interval, up to the preset cap.
    /// Returns true when the speed changed.
    pub fn ramp_speed(&mut self, dt: f32) -> bool {
        self.since_speed_ramp += dt;
        let max_speed = self.difficulty.max_speed();
        if self.since_speed_ramp < SPEED_RAMP_INTERVAL || self.speed >= max_speed {
            return false;
        }
        self.speed = (self.speed + SPEED_STEP).min(max_speed);
        self.since_speed_ramp = 0.0;
        log::debug!("Speed {:.1}x", self.speed);
        true
    }
}
