//! Rectangle batching for the GPU backend
//!
//! Collects `fill_rect` / `clear_rect` calls as triangle lists in logical
//! coordinates. The pipeline maps them to clip space when uploading.

use super::color::Color;
use super::surface::Surface;
use super::vertex::Vertex;

/// A frame's worth of rectangles as triangles
#[derive(Debug, Clone)]
pub struct RectBatch {
    vertices: Vec<Vertex>,
    logical: (f32, f32),
    fill: [f32; 4],
    clear: [f32; 4],
}

impl RectBatch {
    pub fn new(logical_width: f32, logical_height: f32, clear: Color) -> Self {
        Self {
            vertices: Vec::with_capacity(512),
            logical: (logical_width, logical_height),
            fill: [0.0, 0.0, 0.0, 1.0],
            clear: clear.to_f32(),
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    fn push_quad(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        self.vertices
            .extend_from_slice(&Vertex::quad(x, y, w, h, color));
    }

    fn covers_surface(&self, x: f32, y: f32, w: f32, h: f32) -> bool {
        x <= 0.0 && y <= 0.0 && x + w >= self.logical.0 && y + h >= self.logical.1
    }
}

impl Surface for RectBatch {
    fn size(&self) -> (f32, f32) {
        self.logical
    }

    fn set_fill(&mut self, color: Color) {
        self.fill = color.to_f32();
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.push_quad(x, y, w, h, self.fill);
    }

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        // Everything underneath is hidden anyway, and the pass clears to
        // the clear color
        if self.covers_surface(x, y, w, h) {
            self.vertices.clear();
            return;
        }
        self.push_quad(x, y, w, h, self.clear);
    }
}
