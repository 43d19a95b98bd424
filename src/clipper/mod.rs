//! Rectangle clipping for projected edges and polygons.
//!
//! Polygons and segments are clipped against the four sides of an
//! axis-aligned [`Viewport`] one half-plane at a time, in the manner of
//! Sutherland-Hodgman. Only convex, axis-aligned clip regions are supported;
//! there is no entry/exit list splitting and no support for holes.
//!
//! - [`Viewport::clip_polygon`]: closed polygons, winding preserved.
//! - [`Viewport::clip_segment`]: open two-point segments.
//!
//! Both report output edges that lie on the rectangle itself as
//! `boundary_segments`, which the renderer uses to draw the viewport outline.

pub mod rect;

pub use rect::{ClipEdge, ClipPolygon, ClipResult, Viewport, BOUNDARY_TOLERANCE};
