//! Software RGBA surface
//!
//! Used by the headless driver and by tests that want to look at real
//! pixels. Rectangles cover every pixel whose center lies inside them.

use std::io::{self, Write};

use super::color::Color;
use super::surface::Surface;

/// RGBA8888 pixel buffer backing a logical drawing area
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    /// Pixels per logical unit
    scale: f32,
    logical: (f32, f32),
    fill: Color,
    clear: Color,
}

impl PixelBuffer {
    /// Buffer for a logical area at `scale` pixels per unit.
    ///
    /// `clear` is what `clear_rect` leaves behind.
    pub fn new(logical_width: f32, logical_height: f32, scale: f32, clear: Color) -> Self {
        let scale = scale.max(0.01);
        let width = (logical_width * scale).round().max(1.0) as u32;
        let height = (logical_height * scale).round().max(1.0) as u32;
        let mut buffer = Self {
            pixels: vec![0; (width * height * 4) as usize],
            width,
            height,
            scale,
            logical: (logical_width, logical_height),
            fill: Color::rgb(0, 0, 0),
            clear,
        };
        buffer.paint(0, 0, width, height, clear);
        buffer
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color at a pixel coordinate
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.pixel_index(x, y);
        let p = &self.pixels[i..i + 4];
        Some(Color::rgba(p[0], p[1], p[2], p[3]))
    }

    /// Color under a logical coordinate
    pub fn sample(&self, x: f32, y: f32) -> Option<Color> {
        if x < 0.0 || y < 0.0 {
            return None;
        }
        self.pixel((x * self.scale) as u32, (y * self.scale) as u32)
    }

    /// Write the buffer as a binary PPM (alpha dropped)
    pub fn write_ppm<W: Write>(&self, mut out: W) -> io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        let rgb: Vec<u8> = self
            .pixels
            .chunks_exact(4)
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect();
        out.write_all(&rgb)?;
        out.flush()
    }

    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        ((y * self.width + x) * 4) as usize
    }

    /// Pixel span covered by a logical rectangle, clipped to the buffer
    fn span(&self, x: f32, y: f32, w: f32, h: f32) -> Option<(u32, u32, u32, u32)> {
        if w <= 0.0 || h <= 0.0 {
            return None;
        }
        let clip = |v: f32, max: u32| (v * self.scale).round().clamp(0.0, max as f32) as u32;
        let x0 = clip(x, self.width);
        let x1 = clip(x + w, self.width);
        let y0 = clip(y, self.height);
        let y1 = clip(y + h, self.height);
        (x0 < x1 && y0 < y1).then_some((x0, y0, x1, y1))
    }

    fn paint(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, color: Color) {
        let rgba = [color.r, color.g, color.b, color.a];
        for y in y0..y1 {
            let start = self.pixel_index(x0, y);
            let end = self.pixel_index(x1, y);
            for px in self.pixels[start..end].chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
    }
}

impl Surface for PixelBuffer {
    fn size(&self) -> (f32, f32) {
        self.logical
    }

    fn set_fill(&mut self, color: Color) {
        self.fill = color;
    }

    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        if let Some((x0, y0, x1, y1)) = self.span(x, y, w, h) {
            self.paint(x0, y0, x1, y1, self.fill);
        }
    }

    fn clear_rect(&mut self, x: f32, y: f32, w: f32, h: f32) {
        if let Some((x0, y0, x1, y1)) = self.span(x, y, w, h) {
            self.paint(x0, y0, x1, y1, self.clear);
        }
    }
}
