//! Scene building: game state to a flat triangle list in field coordinates

use glam::Vec2;

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH};
use crate::sim::{GamePhase, GameState, Rect};

const PLAYER_SEGMENTS: u32 = 32;
const EYE_SEGMENTS: u32 = 12;

/// Eye and pupil offsets from the player's center
const EYE_OFFSET: Vec2 = Vec2::new(5.0, -5.0);
const EYE_RADIUS: f32 = 3.0;
const PUPIL_OFFSET: Vec2 = Vec2::new(6.0, -5.0);
const PUPIL_RADIUS: f32 = 1.5;

fn field_rect() -> Rect {
    Rect::new(Vec2::ZERO, Vec2::new(FIELD_WIDTH, FIELD_HEIGHT))
}

/// Build every vertex for the current frame, back to front
pub fn build_scene(state: &GameState) -> Vec<Vertex> {
    let mut vertices = shapes::rect(&field_rect(), colors::BACKGROUND);

    let center = state.player.center();
    vertices.extend(shapes::circle(
        center,
        state.player.radius,
        colors::PLAYER,
        PLAYER_SEGMENTS,
    ));
    vertices.extend(shapes::circle(
        center + EYE_OFFSET,
        EYE_RADIUS,
        colors::EYE,
        EYE_SEGMENTS,
    ));
    vertices.extend(shapes::circle(
        center + PUPIL_OFFSET,
        PUPIL_RADIUS,
        colors::PUPIL,
        EYE_SEGMENTS,
    ));

    for obstacle in &state.obstacles {
        vertices.extend(shapes::rect(&obstacle.bounds(), colors::OBSTACLE));
    }

    if matches!(state.phase, GamePhase::Paused | GamePhase::GameOver) {
        vertices.extend(shapes::rect(&field_rect(), colors::SHADE));
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GameConfig;
    use crate::sim::{TickInput, tick};

    const BASE_VERTICES: usize = 6 + (PLAYER_SEGMENTS as usize + 2 * EYE_SEGMENTS as usize) * 3;

    fn count_color(vertices: &[Vertex], color: [f32; 4]) -> usize {
        vertices.iter().filter(|v| v.color == color).count()
    }

    #[test]
    fn test_empty_field() {
        let state = GameState::new(&GameConfig::default(), 1);
        let vertices = build_scene(&state);
        assert_eq!(vertices.len(), BASE_VERTICES);
        assert_eq!(count_color(&vertices, colors::OBSTACLE), 0);
        assert_eq!(count_color(&vertices, colors::SHADE), 0);
    }

    #[test]
    fn test_obstacles_and_shade() {
        let mut state = GameState::new(
            &GameConfig {
                allow_pause: true,
                difficulty: crate::Difficulty::Easy,
            },
            1,
        );
        let start = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &start, crate::consts::SIM_DT);
        assert_eq!(state.obstacles.len(), 1);

        let vertices = build_scene(&state);
        assert_eq!(count_color(&vertices, colors::OBSTACLE), 6);

        state.toggle_pause();
        let vertices = build_scene(&state);
        assert_eq!(count_color(&vertices, colors::SHADE), 6);
        assert_eq!(vertices.len(), BASE_VERTICES + 12);
    }
}
