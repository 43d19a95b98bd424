//! Viewer interaction state.
//!
//! [`InteractionState`] is owned by the viewer loop and updated through
//! `&mut` methods as input arrives. Drags that rotate the mesh return a
//! [`DragAction`]; applying it to vertex positions is up to the caller (see
//! [`rotate_points`]), which keeps this module free of mesh access.

use crate::error::TopologyResult;
use crate::halfedge::{HalfEdgeMesh, VertexId};
use crate::math::{Vec2, Vec3};

pub const ZOOM_STEP: f32 = 1.05;
pub const PAN_SENSITIVITY: f32 = 0.005;
pub const ROTATE_SENSITIVITY: f32 = 0.01;
/// Model-space distance moved per arrow-key press.
pub const NUDGE_STEP: f32 = 0.02;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// What a cursor move while dragging asks for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragAction {
    None,
    /// Pan offset already applied to the state.
    Pan(Vec2),
    /// Rotate the mesh about `axis` by `angle` radians.
    Rotate { axis: Axis, angle: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct InteractionState {
    pub zoom: f32,
    pub pan: Vec2,
    pub rotate_axis: Option<Axis>,
    pub dragging: bool,
    pub last_cursor: Option<Vec2>,
    pub selected_vertex: Option<usize>,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan: Vec2::ZERO,
            rotate_axis: None,
            dragging: false,
            last_cursor: None,
            selected_vertex: None,
        }
    }
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    // ============ Zoom ============

    /// Zoom in for positive `delta`, out for negative, by a fixed factor.
    pub fn scroll(&mut self, delta: f32) -> &mut Self {
        if delta > 0.0 {
            self.zoom *= ZOOM_STEP;
        } else if delta < 0.0 {
            self.zoom /= ZOOM_STEP;
        }
        self
    }

    // ============ Mouse ============

    pub fn press(&mut self, x: f32, y: f32) -> &mut Self {
        self.dragging = true;
        self.last_cursor = Some(Vec2::new(x, y));
        self
    }

    pub fn release(&mut self) -> &mut Self {
        self.dragging = false;
        self.last_cursor = None;
        self
    }

    /// Handle a cursor move to `(x, y)`.
    ///
    /// With `ctrl` held the view pans (screen y inverted). Otherwise, if a
    /// rotation axis is held, the drag becomes a rotation; rotation about X
    /// follows vertical movement, Y and Z follow horizontal movement.
    pub fn drag(&mut self, x: f32, y: f32, ctrl: bool) -> DragAction {
        if !self.dragging {
            return DragAction::None;
        }
        let cursor = Vec2::new(x, y);
        let Some(last) = self.last_cursor else {
            self.last_cursor = Some(cursor);
            return DragAction::None;
        };
        let delta = cursor - last;

        if ctrl {
            let offset = Vec2::new(delta.x * PAN_SENSITIVITY, -delta.y * PAN_SENSITIVITY);
            self.pan = self.pan + offset;
            self.last_cursor = Some(cursor);
            return DragAction::Pan(offset);
        }

        let Some(axis) = self.rotate_axis else {
            return DragAction::None;
        };
        let movement = match axis {
            Axis::X => delta.y,
            Axis::Y | Axis::Z => delta.x,
        };
        self.last_cursor = Some(cursor);
        DragAction::Rotate {
            axis,
            angle: movement * ROTATE_SENSITIVITY,
        }
    }

    // ============ Keys ============

    pub fn set_axis(&mut self, axis: Axis) -> &mut Self {
        self.rotate_axis = Some(axis);
        self
    }

    /// Clear the rotation axis, but only if `axis` is the one held.
    pub fn clear_axis(&mut self, axis: Axis) -> &mut Self {
        if self.rotate_axis == Some(axis) {
            self.rotate_axis = None;
        }
        self
    }

    /// Advance the selection to the next of `vertex_count` vertices,
    /// wrapping. Starts at vertex 0 when nothing is selected.
    pub fn select_next_vertex(&mut self, vertex_count: usize) -> Option<usize> {
        self.selected_vertex = match (self.selected_vertex, vertex_count) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(v), n) => Some((v + 1) % n),
        };
        self.selected_vertex
    }

    /// Move the selected vertex by `(dx, dy)` in model space. Topology is
    /// untouched. Returns false when nothing is selected.
    pub fn nudge_selected(&self, mesh: &mut HalfEdgeMesh, dx: f32, dy: f32) -> TopologyResult<bool> {
        let Some(v) = self.selected_vertex else {
            return Ok(false);
        };
        let v = VertexId(v as u32);
        let p = mesh.position(v)?;
        mesh.set_position(v, p + Vec3::new(dx, dy, 0.0))?;
        Ok(true)
    }
}

/// Rotate every point about the origin.
pub fn rotate_points<'a>(points: impl IntoIterator<Item = &'a mut Vec3>, axis: Axis, angle: f32) {
    for p in points {
        *p = match axis {
            Axis::X => p.rotate_x(angle),
            Axis::Y => p.rotate_y(angle),
            Axis::Z => p.rotate_z(angle),
        };
    }
}
