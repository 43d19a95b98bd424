//! Half-edge mesh topology and a small 2D line-drawing pipeline.
//!
//! The crate has two halves:
//!
//! - [`halfedge`]: builds a half-edge topology from points and polygon index
//!   lists once at load time, then answers adjacency queries (faces around a
//!   face, edge or vertex) that stay correct on open meshes.
//! - [`clipper`] and [`render`]: every frame, projected edges are clipped to
//!   a viewport rectangle and rasterized as anti-aliased pixels, Bresenham
//!   pixels or dense point samples.
//!
//! Projection is left to the caller. The optional `viewer` feature adds an
//! SDL2 window and a binary that ties everything together.
//!
//! # Quick Start
//!
//! ```ignore
//! use meshwire::prelude::*;
//!
//! let mesh = MeshData::cube().build_topology()?;
//! let faces = mesh.faces_of_vertex(VertexId(0))?;
//! let edges = mesh.unique_edges();
//! ```

pub mod clipper;
pub mod config;
pub mod error;
pub mod halfedge;
pub mod interaction;
pub mod math;
pub mod mesh;
pub mod render;
#[cfg(feature = "viewer")]
pub mod window;

pub use error::{LoadError, LoadResult, TopologyError, TopologyResult};
pub use halfedge::{FaceId, HalfEdgeId, HalfEdgeMesh, VertexId};
pub use mesh::MeshData;

/// Prelude module for convenient imports.
///
/// # Example
/// ```ignore
/// use meshwire::prelude::*;
/// ```
pub mod prelude {
    // Topology
    pub use crate::halfedge::{
        Aabb, FaceId, HalfEdgeId, HalfEdgeMesh, Highlight, Selection, VertexId,
    };
    pub use crate::mesh::MeshData;

    // Clipping & rendering
    pub use crate::clipper::{ClipPolygon, ClipResult, Viewport};
    pub use crate::render::line::{
        BresenhamRasterizer, DensePoints, LineRasterizer, Pixel, WuRasterizer,
    };
    pub use crate::render::{Canvas, FrameInput, FrameOutput, FramePipeline, RenderMode};

    // Config & interaction
    pub use crate::config::{RenderSettings, ViewerConfig};
    pub use crate::interaction::{rotate_points, Axis, DragAction, InteractionState};

    // Math
    pub use crate::math::{Vec2, Vec3};

    // Errors
    pub use crate::error::{LoadError, TopologyError};
}
