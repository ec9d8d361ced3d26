//! Shape generation for 2D primitives

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;
use crate::sim::Rect;

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Generate vertices for a filled axis-aligned rectangle
pub fn rect(rect: &Rect, color: [f32; 4]) -> Vec<Vertex> {
    let min = rect.min();
    let max = rect.max();

    // Two triangles
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_stays_within_radius() {
        let center = Vec2::new(10.0, 20.0);
        let vertices = circle(center, 5.0, [1.0; 4], 16);
        assert_eq!(vertices.len(), 16 * 3);
        for v in &vertices {
            let p = Vec2::from(v.position);
            assert!(p.distance(center) <= 5.0 + 1e-4);
        }
    }

    #[test]
    fn test_rect_corners() {
        let r = Rect::new(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0));
        let vertices = rect(&r, [1.0; 4]);
        assert_eq!(vertices.len(), 6);
        let xs: Vec<f32> = vertices.iter().map(|v| v.position[0]).collect();
        let ys: Vec<f32> = vertices.iter().map(|v| v.position[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 1.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 4.0);
        assert_eq!(ys.iter().cloned().fold(f32::MAX, f32::min), 2.0);
        assert_eq!(ys.iter().cloned().fold(f32::MIN, f32::max), 6.0);
    }
}
