//! Vertex types for 2D rendering
//!
//! Positions are logical viewport pixels until `RenderState` maps them to NDC.
//! Colors are authored in sRGB and converted when the surface expects linear.

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

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
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// Same vertex with its RGB converted from sRGB to linear (alpha untouched)
    pub fn to_linear(self) -> Self {
        let [r, g, b, a] = self.color;
        Self {
            position: self.position,
            color: [srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b), a],
        }
    }
}

/// Exact sRGB transfer function
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_stride() {
        assert_eq!(std::mem::size_of::<Vertex>(), 24);
        assert_eq!(Vertex::desc().array_stride, 24);
        assert_eq!(Vertex::desc().attributes[1].offset, 8);
    }

    #[test]
    fn test_srgb_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        // Mid grey is much darker in linear space
        assert!((srgb_to_linear(0.5) - 0.214).abs() < 1e-3);
    }

    #[test]
    fn test_to_linear_keeps_alpha_and_position() {
        let v = Vertex::new(3.0, 4.0, [0.5, 0.5, 0.5, 0.5]).to_linear();
        assert_eq!(v.position, [3.0, 4.0]);
        assert_eq!(v.color[3], 0.5);
        assert!(v.color[0] < 0.5);
    }
}
