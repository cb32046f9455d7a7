//! WebGPU rendering module
//!
//! `scene` describes a frame, `shapes` tessellates it, `pipeline` draws it.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::{RenderState, viewport_to_ndc};
pub use scene::{LabelId, Scene, Shape, TextLabel};
pub use vertex::Vertex;
