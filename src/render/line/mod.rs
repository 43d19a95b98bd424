//! Segment rasterization.
//!
//! Three ways to turn a segment into drawable samples:
//! - [`WuRasterizer`]: anti-aliased pixels with coverage intensities
//! - [`BresenhamRasterizer`]: one solid pixel per integer grid step
//! - [`DensePoints`]: evenly spaced points for point-cloud drawing, in 2D or 3D
//!
//! The two pixel rasterizers share the [`LineRasterizer`] trait so the frame
//! pipeline can hold either one.

mod bresenham;
mod dda;
mod wu;

pub use bresenham::{bresenham_line, BresenhamRasterizer};
pub use dda::{DensePoints, DEFAULT_DENSITY, DEFAULT_MAX_STEPS};
pub use wu::{wu_line, WuRasterizer};

use crate::math::Vec2;

/// An integer pixel with a coverage intensity in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
    pub intensity: f32,
}

impl Pixel {
    pub const fn new(x: i32, y: i32, intensity: f32) -> Self {
        Self { x, y, intensity }
    }

    /// A fully covered pixel.
    pub const fn solid(x: i32, y: i32) -> Self {
        Self::new(x, y, 1.0)
    }
}

/// Turns a screen-space segment into pixels.
pub trait LineRasterizer {
    /// Append the pixels covering `from -> to` to `out`.
    fn rasterize(&self, from: Vec2, to: Vec2, out: &mut Vec<Pixel>);
}
