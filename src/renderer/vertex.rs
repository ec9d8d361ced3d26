//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.122, 0.161, 0.216, 1.0]; // #1f2937
    pub const PLAYER: [f32; 4] = [0.290, 0.871, 0.502, 1.0]; // #4ade80
    pub const EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PUPIL: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const OBSTACLE: [f32; 4] = [0.937, 0.267, 0.267, 1.0]; // #ef4444
    /// Overlay dimming the field while paused or after game over
    pub const SHADE: [f32; 4] = [0.0, 0.0, 0.0, 0.45];
}
