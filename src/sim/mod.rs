//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Obstacles kept in spawn order
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Rect, first_hit};
pub use difficulty::Difficulty;
pub use spawn::SpawnPolicy;
pub use state::{GamePhase, GameState, Obstacle, Player};
pub use tick::{TickInput, TickOutcome, step, tick};
