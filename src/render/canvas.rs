//! CPU pixel buffer the viewer presents each frame.
//!
//! Pixels are ARGB8888 `u32`s, the layout SDL2 streaming textures expect.

use std::path::Path;

use image::{ImageResult, Rgba, RgbaImage};

use super::line::{BresenhamRasterizer, LineRasterizer, Pixel, WuRasterizer};
use super::pipeline::{FrameOutput, RenderMode};
use crate::config::{colors, RenderSettings};
use crate::math::Vec2;

pub struct Canvas {
    color_buffer: Vec<u32>,
    width: u32,
    height: u32,
    scratch: Vec<Pixel>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            color_buffer: vec![colors::BACKGROUND; (width * height) as usize],
            width,
            height,
            scratch: Vec::new(),
        }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.color_buffer = vec![colors::BACKGROUND; (width * height) as usize];
        self.width = width;
        self.height = height;
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn clear(&mut self, color: u32) {
        self.color_buffer.fill(color);
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32 {
            Some((y as u32 * self.width + x as u32) as usize)
        } else {
            None
        }
    }

    /// Overwrite one pixel. Out-of-bounds coordinates are ignored.
    #[inline]
    pub fn plot(&mut self, x: i32, y: i32, color: u32) {
        if let Some(index) = self.index(x, y) {
            self.color_buffer[index] = color;
        }
    }

    /// Mix `color` over the existing pixel with `intensity` as alpha.
    #[inline]
    pub fn blend(&mut self, x: i32, y: i32, color: u32, intensity: f32) {
        let Some(index) = self.index(x, y) else {
            return;
        };
        let alpha = intensity.clamp(0.0, 1.0);
        let dst = self.color_buffer[index];
        let mix = |shift: u32| {
            let s = ((color >> shift) & 0xFF) as f32;
            let d = ((dst >> shift) & 0xFF) as f32;
            ((d + (s - d) * alpha).round() as u32) << shift
        };
        self.color_buffer[index] = 0xFF00_0000 | mix(16) | mix(8) | mix(0);
    }

    pub fn get_pixel(&self, x: i32, y: i32) -> Option<u32> {
        self.index(x, y).map(|index| self.color_buffer[index])
    }

    #[inline]
    pub fn draw_rect(&mut self, x: i32, y: i32, width: i32, height: i32, color: u32) {
        for dy in 0..height {
            for dx in 0..width {
                self.plot(x + dx, y + dy, color);
            }
        }
    }

    /// A filled square of side `size` centered on `center`.
    pub fn draw_marker(&mut self, center: Vec2, size: i32, color: u32) {
        if !center.is_finite() {
            return;
        }
        let half = size / 2;
        self.draw_rect(
            center.x.round() as i32 - half,
            center.y.round() as i32 - half,
            size,
            size,
            color,
        );
    }

    pub fn draw_pixels(&mut self, pixels: &[Pixel], color: u32) {
        for p in pixels {
            self.blend(p.x, p.y, color, p.intensity);
        }
    }

    /// Anti-aliased segments, e.g. a highlighted edge set.
    pub fn draw_segments(&mut self, segments: &[[Vec2; 2]], color: u32) {
        let mut pixels = std::mem::take(&mut self.scratch);
        pixels.clear();
        for &[a, b] in segments {
            WuRasterizer.rasterize(a, b, &mut pixels);
        }
        self.draw_pixels(&pixels, color);
        self.scratch = pixels;
    }

    /// Screen-space points as single solid pixels.
    pub fn draw_points(&mut self, points: impl IntoIterator<Item = Vec2>, color: u32) {
        for p in points {
            if p.is_finite() {
                self.plot(p.x.round() as i32, p.y.round() as i32, color);
            }
        }
    }

    /// Draw a frame's pixels or segments plus the viewport outline.
    ///
    /// Dense 3D points are not drawn here since they need projecting first;
    /// pass them through [`Canvas::draw_points`] once projected.
    pub fn draw_output(&mut self, output: &FrameOutput, settings: &RenderSettings) {
        match output.mode {
            RenderMode::Lines => {
                let mut pixels = std::mem::take(&mut self.scratch);
                pixels.clear();
                for &[a, b] in &output.segments {
                    BresenhamRasterizer.rasterize(a, b, &mut pixels);
                }
                self.draw_pixels(&pixels, settings.line_color);
                self.scratch = pixels;
            }
            RenderMode::XiaolinWu | RenderMode::Bresenham => {
                self.draw_pixels(&output.pixels, settings.line_color);
            }
            RenderMode::Points | RenderMode::None => {}
        }

        if settings.draw_boundary {
            self.draw_segments(&output.boundary_segments, settings.boundary_color);
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        // SAFETY: u32 has no padding and a stricter alignment than u8; the
        // byte view covers exactly the buffer's memory.
        unsafe {
            std::slice::from_raw_parts(
                self.color_buffer.as_ptr() as *const u8,
                self.color_buffer.len() * 4,
            )
        }
    }

    /// Copy into an RGBA image.
    pub fn to_image(&self) -> RgbaImage {
        RgbaImage::from_fn(self.width, self.height, |x, y| {
            let argb = self.color_buffer[(y * self.width + x) as usize];
            Rgba([
                (argb >> 16) as u8,
                (argb >> 8) as u8,
                argb as u8,
                (argb >> 24) as u8,
            ])
        })
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> ImageResult<()> {
        self.to_image()
            .save_with_format(path, image::ImageFormat::Png)
    }
}
