//! Per-frame dispatch from projected mesh edges to drawable output.

use log::debug;

use super::line::{BresenhamRasterizer, DensePoints, LineRasterizer, Pixel, WuRasterizer};
use crate::clipper::Viewport;
use crate::config::RenderSettings;
use crate::math::{Vec2, Vec3};

/// How mesh edges are drawn. Chosen once per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    /// Clipped screen segments, drawn by the caller.
    Lines,
    /// Dense 3D points along every edge.
    Points,
    /// Clipped segments as anti-aliased pixels.
    #[default]
    XiaolinWu,
    /// Clipped segments as solid integer-grid pixels.
    Bresenham,
    /// Draw nothing.
    None,
}

impl RenderMode {
    pub const ALL: [RenderMode; 5] = [
        RenderMode::Lines,
        RenderMode::Points,
        RenderMode::XiaolinWu,
        RenderMode::Bresenham,
        RenderMode::None,
    ];

    /// The following mode, wrapping around.
    pub fn next(self) -> Self {
        match self {
            RenderMode::Lines => RenderMode::Points,
            RenderMode::Points => RenderMode::XiaolinWu,
            RenderMode::XiaolinWu => RenderMode::Bresenham,
            RenderMode::Bresenham => RenderMode::None,
            RenderMode::None => RenderMode::Lines,
        }
    }

    /// True for modes that go through the rectangle clipper.
    pub fn clips(self) -> bool {
        matches!(
            self,
            RenderMode::Lines | RenderMode::XiaolinWu | RenderMode::Bresenham
        )
    }
}

impl std::fmt::Display for RenderMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderMode::Lines => write!(f, "Lines"),
            RenderMode::Points => write!(f, "Points"),
            RenderMode::XiaolinWu => write!(f, "Xiaolin Wu"),
            RenderMode::Bresenham => write!(f, "Bresenham"),
            RenderMode::None => write!(f, "None"),
        }
    }
}

/// Everything a frame needs, borrowed from the caller.
///
/// `positions` and `projected` are indexed by vertex; `edges` holds vertex
/// index pairs, usually from [`HalfEdgeMesh::unique_edges`].
///
/// [`HalfEdgeMesh::unique_edges`]: crate::halfedge::HalfEdgeMesh::unique_edges
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    pub positions: &'a [Vec3],
    pub projected: &'a [Vec2],
    pub edges: &'a [[u32; 2]],
    pub viewport: Viewport,
}

impl<'a> FrameInput<'a> {
    pub fn new(
        positions: &'a [Vec3],
        projected: &'a [Vec2],
        edges: &'a [[u32; 2]],
        viewport: Viewport,
    ) -> Self {
        Self {
            positions,
            projected,
            edges,
            viewport,
        }
    }
}

/// What one frame produced. Which fields are filled depends on `mode`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrameOutput {
    pub mode: RenderMode,
    /// Visible parts of the edges after clipping.
    pub segments: Vec<[Vec2; 2]>,
    /// Clipped segments lying on the viewport outline.
    pub boundary_segments: Vec<[Vec2; 2]>,
    pub pixels: Vec<Pixel>,
    pub points: Vec<Vec3>,
    /// Edges dropped for bad indices or non-finite projections.
    pub skipped_edges: usize,
}

impl FrameOutput {
    fn empty(mode: RenderMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty() && self.pixels.is_empty() && self.points.is_empty()
    }
}

/// Runs clipping and rasterization for the active [`RenderMode`].
#[derive(Debug, Clone)]
pub struct FramePipeline {
    settings: RenderSettings,
    wu: WuRasterizer,
    bresenham: BresenhamRasterizer,
}

impl Default for FramePipeline {
    fn default() -> Self {
        Self::new(RenderSettings::default())
    }
}

impl FramePipeline {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            wu: WuRasterizer::new(),
            bresenham: BresenhamRasterizer::new(),
        }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: RenderSettings) {
        self.settings = settings;
    }

    fn rasterizer(&self, mode: RenderMode) -> Option<&dyn LineRasterizer> {
        match mode {
            RenderMode::XiaolinWu => Some(&self.wu),
            RenderMode::Bresenham => Some(&self.bresenham),
            _ => None,
        }
    }

    /// Produce one frame's output for `mode`.
    pub fn run(&self, mode: RenderMode, input: &FrameInput) -> FrameOutput {
        let mut output = FrameOutput::empty(mode);
        match mode {
            RenderMode::None => {}
            RenderMode::Points => self.sample_points(input, &mut output),
            RenderMode::Lines | RenderMode::XiaolinWu | RenderMode::Bresenham => {
                self.clip_edges(input, &mut output);
                if let Some(rasterizer) = self.rasterizer(mode) {
                    for &[a, b] in &output.segments {
                        rasterizer.rasterize(a, b, &mut output.pixels);
                    }
                }
                if mode == RenderMode::XiaolinWu {
                    let min = self.settings.min_intensity;
                    output.pixels.retain(|p| p.intensity > min);
                }
            }
        }

        if output.skipped_edges > 0 {
            debug!(
                "{} of {} edges skipped this frame",
                output.skipped_edges,
                input.edges.len()
            );
        }
        output
    }

    fn clip_edges(&self, input: &FrameInput, output: &mut FrameOutput) {
        let tolerance = self.settings.boundary_tolerance;
        for &[a, b] in input.edges {
            let (Some(&pa), Some(&pb)) = (
                input.projected.get(a as usize),
                input.projected.get(b as usize),
            ) else {
                output.skipped_edges += 1;
                continue;
            };
            if !pa.is_finite() || !pb.is_finite() {
                output.skipped_edges += 1;
                continue;
            }

            let result = input
                .viewport
                .clip_segment_with_tolerance(pa, pb, tolerance);
            if let Some(segment) = result.clipped.as_segment() {
                output.segments.push(segment);
            }
            output.boundary_segments.extend(result.boundary_segments);
        }
    }

    fn sample_points(&self, input: &FrameInput, output: &mut FrameOutput) {
        let dense =
            DensePoints::new(self.settings.density).with_max_steps(self.settings.max_steps);
        for &[a, b] in input.edges {
            let (Some(&pa), Some(&pb)) = (
                input.positions.get(a as usize),
                input.positions.get(b as usize),
            ) else {
                output.skipped_edges += 1;
                continue;
            };
            dense.sample_into(pa, pb, &mut output.points);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Viewport = Viewport {
        xmin: 0.0,
        ymin: 0.0,
        xmax: 10.0,
        ymax: 10.0,
    };

    struct Scene {
        positions: Vec<Vec3>,
        projected: Vec<Vec2>,
        edges: Vec<[u32; 2]>,
    }

    impl Scene {
        fn new(projected: Vec<Vec2>, edges: Vec<[u32; 2]>) -> Self {
            let positions = projected.iter().map(|p| Vec3::new(p.x, p.y, 0.0)).collect();
            Self {
                positions,
                projected,
                edges,
            }
        }

        fn input(&self) -> FrameInput<'_> {
            FrameInput::new(&self.positions, &self.projected, &self.edges, VIEWPORT)
        }
    }

    #[test]
    fn test_mode_cycle_and_display() {
        let mut mode = RenderMode::Lines;
        for _ in 0..RenderMode::ALL.len() {
            mode = mode.next();
        }
        assert_eq!(mode, RenderMode::Lines);
        assert_eq!(RenderMode::XiaolinWu.to_string(), "Xiaolin Wu");
        assert_eq!(RenderMode::default(), RenderMode::XiaolinWu);
        assert!(!RenderMode::Points.clips());
    }

    #[test]
    fn test_none_draws_nothing() {
        let scene = Scene::new(vec![Vec2::new(1.0, 1.0), Vec2::new(5.0, 5.0)], vec![[0, 1]]);
        let output = FramePipeline::default().run(RenderMode::None, &scene.input());
        assert!(output.is_empty());
    }

    #[test]
    fn test_lines_are_clipped() {
        let scene = Scene::new(
            vec![
                Vec2::new(-5.0, 5.0),
                Vec2::new(5.0, 5.0),
                Vec2::new(20.0, 20.0),
                Vec2::new(30.0, 20.0),
            ],
            vec![[0, 1], [2, 3]],
        );
        let output = FramePipeline::default().run(RenderMode::Lines, &scene.input());
        assert_eq!(
            output.segments,
            vec![[Vec2::new(0.0, 5.0), Vec2::new(5.0, 5.0)]]
        );
        assert!(output.pixels.is_empty());
    }

    #[test]
    fn test_bad_edges_are_skipped() {
        let scene = Scene::new(
            vec![
                Vec2::new(1.0, 1.0),
                Vec2::new(f32::NAN, f32::NAN),
                Vec2::new(4.0, 4.0),
            ],
            vec![[0, 1], [0, 9], [0, 2]],
        );
        let output = FramePipeline::default().run(RenderMode::Lines, &scene.input());
        assert_eq!(output.segments.len(), 1);
        assert_eq!(output.skipped_edges, 2);
    }

    #[test]
    fn test_wu_pixels_above_threshold() {
        let scene = Scene::new(
            vec![
                Vec2::new(2.0, 5.0),
                Vec2::new(6.0, 5.0),
                Vec2::new(0.3, 0.2),
                Vec2::new(9.1, 7.7),
            ],
            vec![[0, 1], [2, 3]],
        );
        let pipeline = FramePipeline::new(RenderSettings::default().with_min_intensity(0.2));
        let output = pipeline.run(RenderMode::XiaolinWu, &scene.input());

        let row: Vec<_> = output.pixels.iter().filter(|p| p.y == 5 && p.x <= 6).collect();
        assert!(row.len() >= 5);
        assert!(output.pixels.iter().all(|p| p.intensity > 0.2));
    }

    #[test]
    fn test_boundary_segments_reported() {
        let scene = Scene::new(
            vec![Vec2::new(-4.0, 10.0), Vec2::new(14.0, 10.0)],
            vec![[0, 1]],
        );
        let output = FramePipeline::default().run(RenderMode::XiaolinWu, &scene.input());
        assert_eq!(
            output.boundary_segments,
            vec![[Vec2::new(0.0, 10.0), Vec2::new(10.0, 10.0)]]
        );
    }

    #[test]
    fn test_bresenham_pixels_are_solid() {
        let scene = Scene::new(vec![Vec2::new(1.0, 1.0), Vec2::new(4.0, 1.0)], vec![[0, 1]]);
        let output = FramePipeline::default().run(RenderMode::Bresenham, &scene.input());
        let coords: Vec<_> = output.pixels.iter().map(|p| (p.x, p.y)).collect();
        assert_eq!(coords, vec![(1, 1), (2, 1), (3, 1), (4, 1)]);
        assert!(output.pixels.iter().all(|p| p.intensity == 1.0));
    }

    #[test]
    fn test_points_follow_density() {
        let scene = Scene::new(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)], vec![[0, 1]]);
        let pipeline = FramePipeline::new(RenderSettings::default().with_density(10.0));
        let output = pipeline.run(RenderMode::Points, &scene.input());
        assert_eq!(output.points.len(), 11);
        assert!(output.segments.is_empty());
    }

    #[test]
    fn test_points_on_far_edge_are_capped() {
        let mut scene = Scene::new(vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 0.0)], vec![[0, 1]]);
        scene.positions[1] = Vec3::new(1e20, 0.0, 0.0);
        let pipeline = FramePipeline::new(RenderSettings::default().with_max_steps(16));
        let output = pipeline.run(RenderMode::Points, &scene.input());
        assert_eq!(output.points.len(), 17);
        assert_eq!(output.points.last(), Some(&Vec3::new(1e20, 0.0, 0.0)));
    }
}
