use approx::abs_diff_eq;

use crate::math::Vec2;

/// Distance within which a clipped point counts as lying on a viewport side.
pub const BOUNDARY_TOLERANCE: f32 = 1e-3;

/// Axis-aligned clip rectangle in screen pixels. Expects `xmin < xmax` and
/// `ymin < ymax`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub xmin: f32,
    pub ymin: f32,
    pub xmax: f32,
    pub ymax: f32,
}

/// One side of a [`Viewport`], holding the coordinate of that side.
///
/// The inside of `Left`/`Bottom` is `>=` the coordinate, the inside of
/// `Right`/`Top` is `<=`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ClipEdge {
    Left(f32),
    Right(f32),
    Bottom(f32),
    Top(f32),
}

impl ClipEdge {
    /// True if `p` is on the kept side, points on the line included.
    #[inline]
    pub fn inside(&self, p: Vec2) -> bool {
        match *self {
            ClipEdge::Left(x) => p.x >= x,
            ClipEdge::Right(x) => p.x <= x,
            ClipEdge::Bottom(y) => p.y >= y,
            ClipEdge::Top(y) => p.y <= y,
        }
    }

    /// Where segment `a -> b` crosses this side. Only called when exactly one
    /// endpoint is inside, so the divisor is never zero.
    fn intersect(&self, a: Vec2, b: Vec2) -> Vec2 {
        match *self {
            ClipEdge::Left(x) | ClipEdge::Right(x) => {
                let t = (x - a.x) / (b.x - a.x);
                Vec2::new(x, a.y + (b.y - a.y) * t)
            }
            ClipEdge::Bottom(y) | ClipEdge::Top(y) => {
                let t = (y - a.y) / (b.y - a.y);
                Vec2::new(a.x + (b.x - a.x) * t, y)
            }
        }
    }

    /// True if `p` lies on this side's line within `tolerance`.
    pub fn touches(&self, p: Vec2, tolerance: f32) -> bool {
        match *self {
            ClipEdge::Left(x) | ClipEdge::Right(x) => abs_diff_eq!(p.x, x, epsilon = tolerance),
            ClipEdge::Bottom(y) | ClipEdge::Top(y) => abs_diff_eq!(p.y, y, epsilon = tolerance),
        }
    }

    /// Clip a point sequence against this half-plane.
    ///
    /// With `closed` the last point connects back to the first (polygon);
    /// without it the sequence is an open polyline and only consecutive
    /// points are connected. Crossing edges contribute their intersection,
    /// outside points are dropped, and order is preserved.
    pub fn clip(&self, points: &[Vec2], closed: bool) -> Vec<Vec2> {
        let n = points.len();
        let mut output = Vec::with_capacity(n + 1);
        if n == 0 {
            return output;
        }

        let first = if closed {
            0
        } else {
            if self.inside(points[0]) {
                output.push(points[0]);
            }
            1
        };

        for i in first..n {
            let current = points[i];
            let previous = points[(i + n - 1) % n];

            let current_inside = self.inside(current);
            let previous_inside = self.inside(previous);

            if current_inside {
                if !previous_inside {
                    // Entering: add the crossing before the point itself
                    output.push(self.intersect(previous, current));
                }
                output.push(current);
            } else if previous_inside {
                // Leaving
                output.push(self.intersect(previous, current));
            }
        }

        output
    }
}

/// An ordered point list: a polygon, or a segment when it has two points.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClipPolygon {
    pub points: Vec<Vec2>,
}

impl ClipPolygon {
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    pub fn from_segment(a: Vec2, b: Vec2) -> Self {
        Self { points: vec![a, b] }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn is_segment(&self) -> bool {
        self.points.len() == 2
    }

    /// The surviving segment, if exactly two points are left.
    pub fn as_segment(&self) -> Option<[Vec2; 2]> {
        match self.points.as_slice() {
            [a, b] => Some([*a, *b]),
            _ => None,
        }
    }
}

/// Output of a clip: the trimmed geometry plus the parts of it that run
/// along the viewport's sides.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClipResult {
    pub clipped: ClipPolygon,
    pub boundary_segments: Vec<[Vec2; 2]>,
}

impl Viewport {
    pub fn new(xmin: f32, ymin: f32, xmax: f32, ymax: f32) -> Self {
        debug_assert!(xmin < xmax && ymin < ymax, "viewport must have positive area");
        Self {
            xmin,
            ymin,
            xmax,
            ymax,
        }
    }

    /// The full pixel area of a `width` x `height` screen, last pixel
    /// inclusive.
    pub fn from_screen(width: u32, height: u32) -> Self {
        Self::new(
            0.0,
            0.0,
            width.saturating_sub(1).max(1) as f32,
            height.saturating_sub(1).max(1) as f32,
        )
    }

    pub fn width(&self) -> f32 {
        self.xmax - self.xmin
    }

    pub fn height(&self) -> f32 {
        self.ymax - self.ymin
    }

    pub fn contains(&self, p: Vec2) -> bool {
        self.edges().iter().all(|edge| edge.inside(p))
    }

    /// The four sides in clipping order: left, right, bottom, top.
    pub fn edges(&self) -> [ClipEdge; 4] {
        [
            ClipEdge::Left(self.xmin),
            ClipEdge::Right(self.xmax),
            ClipEdge::Bottom(self.ymin),
            ClipEdge::Top(self.ymax),
        ]
    }

    /// The four corners in order, as a closed polygon.
    pub fn outline(&self) -> [Vec2; 4] {
        [
            Vec2::new(self.xmin, self.ymin),
            Vec2::new(self.xmax, self.ymin),
            Vec2::new(self.xmax, self.ymax),
            Vec2::new(self.xmin, self.ymax),
        ]
    }

    /// Clip a polygon or segment with the default boundary tolerance.
    ///
    /// Two-point input is treated as an open segment, anything else as a
    /// closed polygon.
    pub fn clip(&self, polygon: &ClipPolygon) -> ClipResult {
        self.clip_with_tolerance(polygon, BOUNDARY_TOLERANCE)
    }

    pub fn clip_with_tolerance(&self, polygon: &ClipPolygon, tolerance: f32) -> ClipResult {
        match polygon.as_segment() {
            Some([a, b]) => self.clip_segment_with_tolerance(a, b, tolerance),
            None => self.clip_polygon_with_tolerance(&polygon.points, tolerance),
        }
    }

    pub fn clip_polygon(&self, points: &[Vec2]) -> ClipResult {
        self.clip_polygon_with_tolerance(points, BOUNDARY_TOLERANCE)
    }

    pub fn clip_segment(&self, a: Vec2, b: Vec2) -> ClipResult {
        self.clip_segment_with_tolerance(a, b, BOUNDARY_TOLERANCE)
    }

    /// Clip a closed polygon against all four sides.
    ///
    /// Boundary segments are the output edges (including the closing edge)
    /// whose endpoints both touch the same side.
    pub fn clip_polygon_with_tolerance(&self, points: &[Vec2], tolerance: f32) -> ClipResult {
        let clipped = self.clip_points(points, true);

        let n = clipped.len();
        let mut boundary_segments = Vec::new();
        if n >= 2 {
            // A two-point result has a single edge, not a back-and-forth pair.
            let edge_count = if n == 2 { 1 } else { n };
            for i in 0..edge_count {
                let a = clipped[i];
                let b = clipped[(i + 1) % n];
                if let Some(segment) = self.boundary_segment(a, b, tolerance) {
                    boundary_segments.push(segment);
                }
            }
        }

        ClipResult {
            clipped: ClipPolygon::new(clipped),
            boundary_segments,
        }
    }

    /// Clip an open segment against all four sides.
    ///
    /// If a segment survives and runs along one of the sides, it is also
    /// reported as a boundary segment. All four sides are checked.
    pub fn clip_segment_with_tolerance(&self, a: Vec2, b: Vec2, tolerance: f32) -> ClipResult {
        let clipped = self.clip_points(&[a, b], false);

        let boundary_segments = match clipped.as_slice() {
            [p, q] => self.boundary_segment(*p, *q, tolerance).into_iter().collect(),
            _ => Vec::new(),
        };

        ClipResult {
            clipped: ClipPolygon::new(clipped),
            boundary_segments,
        }
    }

    fn clip_points(&self, points: &[Vec2], closed: bool) -> Vec<Vec2> {
        let mut result = points.to_vec();
        for edge in self.edges() {
            if result.is_empty() {
                break;
            }
            result = edge.clip(&result, closed);
        }
        result
    }

    fn boundary_segment(&self, a: Vec2, b: Vec2, tolerance: f32) -> Option<[Vec2; 2]> {
        if a == b {
            return None;
        }
        self.edges()
            .iter()
            .any(|edge| edge.touches(a, tolerance) && edge.touches(b, tolerance))
            .then_some([a, b])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn viewport() -> Viewport {
        Viewport::new(0.0, 0.0, 10.0, 10.0)
    }

    fn assert_points_eq(actual: &[Vec2], expected: &[Vec2]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert_relative_eq!(a.x, e.x, epsilon = 1e-4);
            assert_relative_eq!(a.y, e.y, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_segment_crossing_left_edge() {
        let result = viewport().clip_segment(Vec2::new(-5.0, 5.0), Vec2::new(5.0, 5.0));
        assert_points_eq(
            &result.clipped.points,
            &[Vec2::new(0.0, 5.0), Vec2::new(5.0, 5.0)],
        );
        assert!(result.boundary_segments.is_empty());
    }

    #[test]
    fn test_segment_crossing_both_sides() {
        let result = viewport().clip_segment(Vec2::new(12.0, -2.0), Vec2::new(-2.0, 12.0));
        assert_points_eq(
            &result.clipped.points,
            &[Vec2::new(10.0, 0.0), Vec2::new(0.0, 10.0)],
        );
    }

    #[test]
    fn test_segment_contained_is_unchanged() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(8.0, 9.0);
        let result = viewport().clip_segment(a, b);
        assert_eq!(result.clipped.points, vec![a, b]);
    }

    #[test]
    fn test_segment_disjoint_is_empty() {
        let result = viewport().clip_segment(Vec2::new(11.0, 1.0), Vec2::new(20.0, 9.0));
        assert!(result.clipped.is_empty());
        assert!(result.boundary_segments.is_empty());
    }

    #[test]
    fn test_segment_on_each_side_is_boundary() {
        let vp = viewport();
        let cases = [
            (Vec2::new(0.0, 2.0), Vec2::new(0.0, 8.0)),
            (Vec2::new(10.0, 2.0), Vec2::new(10.0, 8.0)),
            (Vec2::new(-3.0, 0.0), Vec2::new(4.0, 0.0)),
            (Vec2::new(-5.0, 10.0), Vec2::new(15.0, 10.0)),
        ];
        for (a, b) in cases {
            let result = vp.clip_segment(a, b);
            assert_eq!(result.boundary_segments.len(), 1, "{a:?} -> {b:?}");
            assert_eq!(
                result.boundary_segments[0],
                result.clipped.as_segment().unwrap()
            );
        }
    }

    #[test]
    fn test_segment_near_side_within_tolerance() {
        let result = viewport().clip_segment(Vec2::new(2.0, 9.9995), Vec2::new(6.0, 9.9995));
        assert_eq!(result.boundary_segments.len(), 1);

        let result = viewport().clip_segment(Vec2::new(2.0, 9.9), Vec2::new(6.0, 9.9));
        assert!(result.boundary_segments.is_empty());
    }

    #[test]
    fn test_polygon_contained_is_unchanged() {
        let triangle = [
            Vec2::new(1.0, 1.0),
            Vec2::new(9.0, 1.0),
            Vec2::new(5.0, 8.0),
        ];
        let result = viewport().clip_polygon(&triangle);
        assert_eq!(result.clipped.points, triangle.to_vec());
        assert!(result.boundary_segments.is_empty());
    }

    #[test]
    fn test_polygon_disjoint_is_empty() {
        let triangle = [
            Vec2::new(-9.0, -9.0),
            Vec2::new(-1.0, -9.0),
            Vec2::new(-5.0, -2.0),
        ];
        assert!(viewport().clip_polygon(&triangle).clipped.is_empty());
    }

    #[test]
    fn test_polygon_covering_viewport_becomes_rectangle() {
        let square = [
            Vec2::new(-5.0, -5.0),
            Vec2::new(15.0, -5.0),
            Vec2::new(15.0, 15.0),
            Vec2::new(-5.0, 15.0),
        ];
        let result = viewport().clip_polygon(&square);
        assert_points_eq(
            &result.clipped.points,
            &[
                Vec2::new(0.0, 10.0),
                Vec2::new(0.0, 0.0),
                Vec2::new(10.0, 0.0),
                Vec2::new(10.0, 10.0),
            ],
        );
        assert_eq!(result.boundary_segments.len(), 4);
    }

    #[test]
    fn test_convex_polygon_gains_at_most_four_vertices() {
        let polygons: [&[Vec2]; 3] = [
            &[
                Vec2::new(5.0, -3.0),
                Vec2::new(13.0, 5.0),
                Vec2::new(5.0, 13.0),
                Vec2::new(-3.0, 5.0),
            ],
            &[
                Vec2::new(-2.0, 4.0),
                Vec2::new(6.0, -4.0),
                Vec2::new(12.0, 12.0),
            ],
            &[
                Vec2::new(2.0, 2.0),
                Vec2::new(20.0, 3.0),
                Vec2::new(4.0, 6.0),
            ],
        ];
        for polygon in polygons {
            let result = viewport().clip_polygon(polygon);
            assert!(result.clipped.len() <= polygon.len() + 4);
            for p in &result.clipped.points {
                assert!(p.x >= -1e-4 && p.x <= 10.0 + 1e-4);
                assert!(p.y >= -1e-4 && p.y <= 10.0 + 1e-4);
            }
        }
    }

    #[test]
    fn test_polygon_preserves_winding_start() {
        // Diamond poking out of the right side only.
        let diamond = [
            Vec2::new(6.0, 2.0),
            Vec2::new(12.0, 5.0),
            Vec2::new(6.0, 8.0),
            Vec2::new(4.0, 5.0),
        ];
        let result = viewport().clip_polygon(&diamond);
        assert_points_eq(
            &result.clipped.points,
            &[
                Vec2::new(6.0, 2.0),
                Vec2::new(10.0, 4.0),
                Vec2::new(10.0, 6.0),
                Vec2::new(6.0, 8.0),
                Vec2::new(4.0, 5.0),
            ],
        );
        assert_eq!(result.boundary_segments.len(), 1);
    }

    #[test]
    fn test_clip_dispatches_on_point_count() {
        let vp = viewport();
        let segment = ClipPolygon::from_segment(Vec2::new(-5.0, 5.0), Vec2::new(5.0, 5.0));
        assert_eq!(vp.clip(&segment).clipped.len(), 2);

        let single = ClipPolygon::new(vec![Vec2::new(3.0, 3.0)]);
        assert_eq!(vp.clip(&single).clipped.len(), 1);

        let outside = ClipPolygon::new(vec![Vec2::new(30.0, 3.0)]);
        assert!(vp.clip(&outside).clipped.is_empty());

        assert!(vp.clip(&ClipPolygon::default()).clipped.is_empty());
    }

    #[test]
    fn test_from_screen() {
        let vp = Viewport::from_screen(800, 600);
        assert_eq!(vp, Viewport::new(0.0, 0.0, 799.0, 599.0));
        assert!(vp.contains(Vec2::new(799.0, 0.0)));
        assert!(!vp.contains(Vec2::new(800.0, 0.0)));
    }
}
