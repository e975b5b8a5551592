//! Rendering module
//!
//! Frames are drawn procedurally as filled rectangles onto a [`Surface`].
//! Backends: a software pixel buffer and a WebGPU rectangle pipeline.

pub mod batch;
pub mod color;
pub mod pipeline;
pub mod raster;
pub mod scene;
pub mod surface;
pub mod vertex;

pub use batch::RectBatch;
pub use color::{Color, Palette};
pub use pipeline::RenderState;
pub use raster::PixelBuffer;
pub use scene::Painter;
pub use surface::{DrawCall, NullSurface, RecordingSurface, Surface};
