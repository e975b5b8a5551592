//! Vertex type for the GPU rectangle pipeline
//!
//! Positions are logical canvas units; the pipeline maps them to clip space.

use bytemuck::{Pod, Zeroable};

/// Corner of a filled rectangle
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

    /// Two triangles covering `(x, y, w, h)`, wound top-left first
    pub fn quad(x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) -> [Vertex; 6] {
        let (x1, y1) = (x + w, y + h);
        [
            Self::new(x, y, color),
            Self::new(x, y1, color),
            Self::new(x1, y, color),
            Self::new(x1, y, color),
            Self::new(x, y1, color),
            Self::new(x1, y1, color),
        ]
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}
