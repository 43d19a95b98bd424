use crate::math::LinePoint;

/// Samples per unit of the largest axis delta.
pub const DEFAULT_DENSITY: f32 = 250.0;

/// Upper bound on steps for a single segment.
pub const DEFAULT_MAX_STEPS: usize = 1 << 16;

/// Dense DDA-style stepping along a segment.
///
/// The step count is the largest per-axis delta times `density`, truncated.
/// Every coordinate is interpolated, so the same stepper serves 2D screen
/// segments and 3D mesh edges. Long or far-away segments are capped at
/// `max_steps`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DensePoints {
    pub density: f32,
    pub max_steps: usize,
}

impl Default for DensePoints {
    fn default() -> Self {
        Self::new(DEFAULT_DENSITY)
    }
}

impl DensePoints {
    pub fn new(density: f32) -> Self {
        Self {
            density,
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Number of steps between `from` and `to`, at most `max_steps`. Zero
    /// for segments shorter than one step and for non-finite input.
    pub fn steps<P: LinePoint>(&self, from: &P, to: &P) -> usize {
        let span = from.max_axis_delta(to) * self.density;
        if !(span.is_finite() && span >= 1.0) {
            return 0;
        }
        // f32 -> usize saturates, so the clamp happens in integer space.
        (span as usize).min(self.max_steps)
    }

    /// Append `steps + 1` evenly spaced points from `from` to `to`, both
    /// ends included. A segment with no steps yields only `from`.
    pub fn sample_into<P: LinePoint>(&self, from: P, to: P, out: &mut Vec<P>) {
        let steps = self.steps(&from, &to);
        if steps == 0 {
            out.push(from);
            return;
        }

        out.reserve(steps.saturating_add(1));
        for i in 0..steps {
            out.push(from.lerp(&to, i as f32 / steps as f32));
        }
        out.push(to);
    }

    pub fn sample<P: LinePoint>(&self, from: P, to: P) -> Vec<P> {
        let mut points = Vec::new();
        self.sample_into(from, to, &mut points);
        points
    }
}
