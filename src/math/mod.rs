//! Small vector types shared by the topology and rasterization code.
//!
//! The kernel only needs 2D screen points and 3D vertex positions, so these
//! stay deliberately plain: `Copy` structs with component-wise operators.

pub mod vec2;
pub mod vec3;

pub use vec2::Vec2;
pub use vec3::Vec3;

/// A point that can be linearly interpolated along a segment.
///
/// Used by the dense-point stepper so the same code walks 2D screen segments
/// and 3D mesh edges.
pub trait LinePoint: Copy {
    /// Largest absolute per-axis difference between `self` and `other`.
    fn max_axis_delta(&self, other: &Self) -> f32;

    /// Linear interpolation: `t = 0` yields `self`, `t = 1` yields `other`.
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl LinePoint for Vec2 {
    fn max_axis_delta(&self, other: &Self) -> f32 {
        (other.x - self.x).abs().max((other.y - self.y).abs())
    }

    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec2::lerp(*self, *other, t)
    }
}

impl LinePoint for Vec3 {
    fn max_axis_delta(&self, other: &Self) -> f32 {
        (other.x - self.x)
            .abs()
            .max((other.y - self.y).abs())
            .max((other.z - self.z).abs())
    }

    fn lerp(&self, other: &Self, t: f32) -> Self {
        Vec3::lerp(*self, *other, t)
    }
}
