//! Axis-aligned bounding-box collision
//!
//! The player is tested as its bounding square, obstacles as their rectangles.
//! Touching edges do not count as a hit.

use glam::Vec2;

use super::state::Obstacle;

/// An axis-aligned rectangle (top-left corner + size, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub const fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn min(&self) -> Vec2 {
        self.pos
    }

    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }

    /// Strict overlap test
    pub fn overlaps(&self, other: &Rect) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
    }
}

/// Index of the first obstacle (in list order) overlapping `player`
pub fn first_hit(player: &Rect, obstacles: &[Obstacle]) -> Option<usize> {
    obstacles
        .iter()
        .position(|obstacle| player.overlaps(&obstacle.bounds()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_overlap() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&rect(5.0, 5.0, 10.0, 10.0)));
        assert!(a.overlaps(&rect(2.0, 2.0, 1.0, 1.0)));
        assert!(rect(2.0, 2.0, 1.0, 1.0).overlaps(&a));
    }

    #[test]
    fn test_touching_edges_miss() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&rect(10.0, 0.0, 5.0, 5.0)));
        assert!(!a.overlaps(&rect(0.0, 10.0, 5.0, 5.0)));
        assert!(!a.overlaps(&rect(-5.0, 0.0, 5.0, 5.0)));
    }

    #[test]
    fn test_separated_on_one_axis_misses() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&rect(3.0, 20.0, 2.0, 2.0)));
        assert!(!a.overlaps(&rect(20.0, 3.0, 2.0, 2.0)));
    }

    #[test]
    fn test_first_hit_order() {
        let player = rect(50.0, 150.0, 30.0, 30.0);
        let obstacles = vec![
            Obstacle {
                id: 1,
                pos: Vec2::new(300.0, 110.0),
                size: Vec2::new(25.0, 50.0),
            },
            Obstacle {
                id: 2,
                pos: Vec2::new(60.0, 110.0),
                size: Vec2::new(25.0, 50.0),
            },
            Obstacle {
                id: 3,
                pos: Vec2::new(70.0, 110.0),
                size: Vec2::new(25.0, 50.0),
            },
        ];
        assert_eq!(first_hit(&player, &obstacles), Some(1));
        assert_eq!(first_hit(&player, &obstacles[..1]), None);
        assert_eq!(first_hit(&player, &[]), None);
    }
}
