//! Half-edge mesh topology.
//!
//! A [`HalfEdgeMesh`] is built once from raw `(points, faces)` input and is
//! immutable afterwards: vertices, half-edges and faces live in boxed slices
//! that cannot grow, shrink or be reordered, and every cross-reference is a
//! typed index into one of them.
//!
//! # Structure
//!
//! ```text
//!            next
//!    v2 <----------- v1
//!     \    face f    ^
//!      \             |  h (origin v0, face f)
//!       v            |
//!        v0 -------->
//!             twin(h) lives in the neighbouring face, pointing v1 -> v0
//! ```
//!
//! - Each half-edge stores its origin vertex, its `next` half-edge around the
//!   owning face, the owning face, and an optional twin. A missing twin marks
//!   a boundary edge.
//! - Each vertex stores one outgoing half-edge (the first one created) as a
//!   traversal seed.
//! - Each face stores one of its half-edges and its degree; following `next`
//!   exactly `degree` times returns to that half-edge.
//!
//! Geometry and topology are decoupled: vertex positions may be changed
//! freely through [`HalfEdgeMesh::set_position`] and
//! [`HalfEdgeMesh::positions_mut`] without invalidating any adjacency.

mod builder;
mod highlight;
mod query;

pub use highlight::{Aabb, Highlight, Selection};
pub use query::FaceCycle;

use std::fmt;

use crate::error::{TopologyError, TopologyResult};
use crate::math::Vec3;

/// Index of a vertex in a [`HalfEdgeMesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexId(pub u32);

/// Index of a half-edge in a [`HalfEdgeMesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HalfEdgeId(pub u32);

/// Index of a face in a [`HalfEdgeMesh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FaceId(pub u32);

impl VertexId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl HalfEdgeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl FaceId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Display for HalfEdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "h{}", self.0)
    }
}

impl fmt::Display for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.0)
    }
}

/// A mesh vertex: its position plus one outgoing half-edge.
///
/// `halfedge` is `None` only for points no face references.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub halfedge: Option<HalfEdgeId>,
}

/// One direction of a mesh edge, owned by exactly one face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HalfEdge {
    pub origin: VertexId,
    pub twin: Option<HalfEdgeId>,
    pub next: HalfEdgeId,
    pub face: FaceId,
}

/// A polygonal face, seeded by one of its boundary half-edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub halfedge: HalfEdgeId,
    pub degree: u32,
}

/// Immutable half-edge topology over mutable vertex positions.
#[derive(Debug, Clone)]
pub struct HalfEdgeMesh {
    vertices: Box<[Vertex]>,
    halfedges: Box<[HalfEdge]>,
    faces: Box<[Face]>,
    // Half-edges whose directed key was already claimed during the build.
    non_manifold: Box<[HalfEdgeId]>,
}

impl HalfEdgeMesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn halfedge_count(&self) -> usize {
        self.halfedges.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn halfedges(&self) -> &[HalfEdge] {
        &self.halfedges
    }

    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    /// Half-edges that duplicated an already-seen directed edge and were
    /// therefore left without a twin.
    pub fn non_manifold_halfedges(&self) -> &[HalfEdgeId] {
        &self.non_manifold
    }

    pub fn vertex(&self, v: VertexId) -> TopologyResult<&Vertex> {
        self.vertices
            .get(v.index())
            .ok_or(TopologyError::InvalidVertex(v.0))
    }

    pub fn halfedge(&self, h: HalfEdgeId) -> TopologyResult<&HalfEdge> {
        self.halfedges
            .get(h.index())
            .ok_or(TopologyError::InvalidHalfEdge(h.0))
    }

    pub fn face(&self, f: FaceId) -> TopologyResult<&Face> {
        self.faces.get(f.index()).ok_or(TopologyError::InvalidFace(f.0))
    }

    /// The vertex a half-edge points to, i.e. the origin of its `next`.
    pub fn destination(&self, h: HalfEdgeId) -> TopologyResult<VertexId> {
        let next = self.halfedge(h)?.next;
        Ok(self.halfedges[next.index()].origin)
    }

    pub fn is_boundary_halfedge(&self, h: HalfEdgeId) -> TopologyResult<bool> {
        Ok(self.halfedge(h)?.twin.is_none())
    }

    /// Number of half-edges without a twin.
    pub fn boundary_edge_count(&self) -> usize {
        self.halfedges.iter().filter(|h| h.twin.is_none()).count()
    }

    // ============ Geometry ============

    pub fn position(&self, v: VertexId) -> TopologyResult<Vec3> {
        Ok(self.vertex(v)?.position)
    }

    /// Move a vertex. Topology is untouched.
    pub fn set_position(&mut self, v: VertexId, position: Vec3) -> TopologyResult<()> {
        let vertex = self
            .vertices
            .get_mut(v.index())
            .ok_or(TopologyError::InvalidVertex(v.0))?;
        vertex.position = position;
        Ok(())
    }

    /// Iterate over all vertex positions in vertex order.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.vertices.iter().map(|v| v.position)
    }

    /// Mutable access to positions only; outgoing half-edge seeds stay fixed.
    pub fn positions_mut(&mut self) -> impl Iterator<Item = &mut Vec3> + '_ {
        self.vertices.iter_mut().map(|v| &mut v.position)
    }

    // ============ Wireframe output ============

    /// One `[origin, destination]` vertex pair per undirected edge.
    ///
    /// A twin pair is emitted once, from its lower-numbered half-edge.
    /// Twin-less half-edges (boundary or non-manifold excess) are emitted
    /// individually.
    pub fn unique_edges(&self) -> Vec<[u32; 2]> {
        self.halfedges
            .iter()
            .enumerate()
            .filter(|(i, he)| he.twin.map_or(true, |t| *i < t.index()))
            .map(|(_, he)| [he.origin.0, self.halfedges[he.next.index()].origin.0])
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshData;

    #[test]
    fn test_unique_edges_of_split_quad() {
        let mesh = MeshData::split_quad().build_topology().unwrap();
        let edges = mesh.unique_edges();
        // 4 outer edges plus the shared diagonal.
        assert_eq!(edges.len(), 5);
        assert!(edges.contains(&[0, 2]) || edges.contains(&[2, 0]));
    }

    #[test]
    fn test_unique_edges_of_closed_cube() {
        let mesh = MeshData::cube().build_topology().unwrap();
        assert_eq!(mesh.boundary_edge_count(), 0);
        // 6 quads -> 12 edges.
        assert_eq!(mesh.unique_edges().len(), 12);
    }

    #[test]
    fn test_set_position_keeps_topology() {
        let mut mesh = MeshData::quad().build_topology().unwrap();
        let before: Vec<HalfEdge> = mesh.halfedges().to_vec();
        mesh.set_position(VertexId(2), Vec3::new(5.0, 5.0, 5.0)).unwrap();
        for p in mesh.positions_mut() {
            p.z += 1.0;
        }
        assert_eq!(mesh.halfedges(), before.as_slice());
        assert_eq!(mesh.position(VertexId(2)).unwrap(), Vec3::new(5.0, 5.0, 6.0));
    }

    #[test]
    fn test_invalid_handles() {
        let mesh = MeshData::quad().build_topology().unwrap();
        assert_eq!(
            mesh.vertex(VertexId(99)).unwrap_err(),
            TopologyError::InvalidVertex(99)
        );
        assert_eq!(
            mesh.face(FaceId(1)).unwrap_err(),
            TopologyError::InvalidFace(1)
        );
        assert!(mesh.destination(HalfEdgeId(4)).is_err());
    }

    #[test]
    fn test_destination() {
        let mesh = MeshData::quad().build_topology().unwrap();
        assert_eq!(mesh.destination(HalfEdgeId(0)).unwrap(), VertexId(1));
        assert_eq!(mesh.destination(HalfEdgeId(3)).unwrap(), VertexId(0));
    }
}
