//! Rendering subsystem: pixel targets, the centered canvas, scanline
//! rasterization and the scene renderer.

mod canvas;
mod depth;
mod framebuffer;
mod renderer;
pub mod scanline;

pub use canvas::Canvas;
pub use depth::DepthBuffer;
pub use framebuffer::{FrameBuffer, PixelTarget};
pub use renderer::{is_backface, FrameStats, RenderSettings, Renderer};
