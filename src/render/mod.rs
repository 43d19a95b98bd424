//! Frame rendering: line rasterizers, the per-frame pipeline and the canvas
//! it draws into.

pub mod canvas;
pub mod line;
pub mod pipeline;

pub use canvas::Canvas;
pub use line::{LineRasterizer, Pixel};
pub use pipeline::{FrameInput, FrameOutput, FramePipeline, RenderMode};
