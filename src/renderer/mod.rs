//! WebGPU rendering module
//!
//! One triangle-list pipeline; discs are tessellated on the CPU and the
//! vertex stream is rebuilt every frame.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use shapes::{circle, frame_vertices};
pub use vertex::Vertex;
