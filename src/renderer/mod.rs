//! WebGPU rendering module
//!
//! `scene` turns a `GameState` into colored triangles in field coordinates;
//! `pipeline` uploads and draws them.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
