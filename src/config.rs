//! Render and viewer settings.
//!
//! Plain structs with defaults and `with_*` setters. Nothing here is read
//! from or written to disk.

use crate::clipper::BOUNDARY_TOLERANCE;
use crate::render::line::{DEFAULT_DENSITY, DEFAULT_MAX_STEPS};

/// ARGB8888 colors used by the canvas.
pub mod colors {
    pub const BACKGROUND: u32 = 0xFF10_1014;
    pub const LINE: u32 = 0xFFE6_E6E6;
    pub const BOUNDARY: u32 = 0xFF3C_A0FF;
    pub const HIGHLIGHT: u32 = 0xFFFF_B000;
    pub const SELECTED_VERTEX: u32 = 0xFFFF_3030;
}

/// Knobs for the per-frame clip and rasterize pipeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    /// Dense-point samples per unit of the largest axis delta.
    pub density: f32,
    /// Cap on dense-point steps per edge.
    pub max_steps: usize,
    /// Anti-aliased pixels at or below this intensity are dropped.
    pub min_intensity: f32,
    /// How close a clipped point must be to a viewport side to count as on it.
    pub boundary_tolerance: f32,
    pub line_color: u32,
    pub boundary_color: u32,
    pub highlight_color: u32,
    /// Draw the segments that run along the viewport outline.
    pub draw_boundary: bool,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            density: DEFAULT_DENSITY,
            max_steps: DEFAULT_MAX_STEPS,
            min_intensity: 0.05,
            boundary_tolerance: BOUNDARY_TOLERANCE,
            line_color: colors::LINE,
            boundary_color: colors::BOUNDARY,
            highlight_color: colors::HIGHLIGHT,
            draw_boundary: true,
        }
    }
}

impl RenderSettings {
    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_min_intensity(mut self, min_intensity: f32) -> Self {
        self.min_intensity = min_intensity;
        self
    }

    pub fn with_boundary_tolerance(mut self, tolerance: f32) -> Self {
        self.boundary_tolerance = tolerance;
        self
    }

    pub fn with_line_color(mut self, color: u32) -> Self {
        self.line_color = color;
        self
    }

    pub fn with_boundary_color(mut self, color: u32) -> Self {
        self.boundary_color = color;
        self
    }

    pub fn with_highlight_color(mut self, color: u32) -> Self {
        self.highlight_color = color;
        self
    }

    pub fn with_draw_boundary(mut self, draw_boundary: bool) -> Self {
        self.draw_boundary = draw_boundary;
        self
    }
}

/// Window setup for the interactive viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fps: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            title: "meshwire".to_string(),
            width: 1080,
            height: 1080,
            fps: 60,
        }
    }
}

impl ViewerConfig {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_fps(mut self, fps: u64) -> Self {
        self.fps = fps.max(1);
        self
    }

    /// Target time per frame in milliseconds.
    pub fn frame_time_ms(&self) -> u64 {
        1000 / self.fps.max(1)
    }
}
