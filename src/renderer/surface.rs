//! The drawing surface abstraction

use super::color::Color;

/// A raster target that can fill and clear rectangles.
///
/// Coordinates are logical units (800 x 200 for the game), y grows downward.
/// Backends map logical units onto their own pixels.
pub trait Surface {
    /// Logical width and height
    fn size(&self) -> (f32, f32);

    /// Color used by subsequent `fill_rect` calls
    fn set_fill(&mut self, color: Color);

    /// Fill a rectangle with the current fill color
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32);

    /// Reset a rectangle to the surface's cleared state
    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn size(&self) -> (f32, f32) {
        (**self).size()
    }

    fn set_fill(&mut self, color: Color) {
        (**self).set_fill(color)
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        (**self).fill_rect(x, y, w, h)
    }

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        (**self).clear_rect(x, y, w, h)
    }
}

/// Surface that discards everything, for running the simulation headless
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn size(&self) -> (f32, f32) {
        (crate::consts::CANVAS_WIDTH, crate::consts::CANVAS_HEIGHT)
    }

    fn set_fill(&mut self, _color: Color) {}

    fn fill_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32) {}

    fn clear_rect(&mut self, _x: f32, _y: f32, _w: f32, _h: f32) {}
}

/// A single recorded draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCall {
    Fill { color: Color, x: f32, y: f32, w: f32, h: f32 },
    Clear { x: f32, y: f32, w: f32, h: f32 },
}

/// Surface that records every call, used to inspect what a frame draws
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
    fill: Option<Color>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filled rectangles only, as `(x, y, w, h)`
    pub fn fills(&self) -> impl Iterator<Item = (f32, f32, f32, f32)> + '_ {
        self.calls.iter().filter_map(|call| match *call {
            DrawCall::Fill { x, y, w, h, .. } => Some((x, y, w, h)),
            DrawCall::Clear { .. } => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (f32, f32) {
        (crate::consts::CANVAS_WIDTH, crate::consts::CANVAS_HEIGHT)
    }

    fn set_fill(&mut self, color: Color) {
        self.fill = Some(color);
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        let color = self.fill.unwrap_or(Color::rgb(0, 0, 0));
        self.calls.push(DrawCall::Fill { color, x, y, w, h });
    }

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        self.calls.push(DrawCall::Clear { x, y, w, h });
    }
}
