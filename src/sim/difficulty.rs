//! Difficulty presets
//!
//! A preset bundles the spawn policy with the scroll speed cap.

use serde::{Deserialize, Serialize};

use super::spawn::SpawnPolicy;

/// Named difficulty preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Timed spawns, higher speed cap
    Easy,
    /// Random spawns, lower speed cap
    #[default]
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "facil" | "fácil" => Some(Difficulty::Easy),
            "hard" | "dificil" | "difícil" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// HUD label
    pub fn label(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Hard => "HARD",
        }
    }

    /// Maximum scroll speed (pixels per reference frame)
    pub fn max_speed(&self) -> f32 {
        match self {
            Difficulty::Easy => 15.0,
            Difficulty::Hard => 10.0,
        }
    }

    /// How obstacles are spawned
    pub fn spawn_policy(&self) -> SpawnPolicy {
        match self {
            Difficulty::Easy => SpawnPolicy::Predictable,
            Difficulty::Hard => SpawnPolicy::Unpredictable,
        }
    }
}
