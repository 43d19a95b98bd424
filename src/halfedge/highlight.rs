//! Query results packaged for highlighting in a viewer.

use super::{FaceId, HalfEdgeId, HalfEdgeMesh, VertexId};
use crate::error::TopologyResult;
use crate::math::Vec3;

/// Axis-aligned bounding box in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// A zero-size box around a single point.
    pub fn around(point: Vec3) -> Self {
        Self {
            min: point,
            max: point,
        }
    }

    /// Smallest box containing every point, or `None` for no points.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::around(first), |aabb, p| aabb.expanded(p)))
    }

    pub fn expanded(self, point: Vec3) -> Self {
        Self {
            min: self.min.min(point),
            max: self.max.max(point),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.min.lerp(self.max, 0.5)
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// What the user asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Vertex(VertexId),
    Edge(HalfEdgeId),
    Face(FaceId),
}

/// Indices and bounds to draw for a [`Selection`].
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub selection: Selection,
    pub faces: Vec<FaceId>,
    /// Undirected edges as `[min, max]` vertex pairs, sorted.
    pub edges: Vec<[u32; 2]>,
    pub vertices: Vec<VertexId>,
    pub bounds: Aabb,
}

impl HalfEdgeMesh {
    /// Resolve a selection into the faces, edges and vertices around it.
    ///
    /// - vertex: its incident faces and edges, then the vertex followed by
    ///   its sorted neighbours
    /// - edge: the one or two faces it borders and its endpoints
    /// - face: the face, its distinct neighbours, its edges and corners
    pub fn highlight(&self, selection: Selection) -> TopologyResult<Highlight> {
        let (faces, halfedges, vertices) = match selection {
            Selection::Vertex(v) => {
                let faces = self.faces_of_vertex(v)?;
                let halfedges = self.edges_in_fan(v, &faces)?;
                let mut neighbours = Vec::with_capacity(halfedges.len());
                for &h in &halfedges {
                    let origin = self.halfedges[h.index()].origin;
                    neighbours.push(if origin == v { self.destination(h)? } else { origin });
                }
                neighbours.sort_unstable();
                neighbours.dedup();
                neighbours.retain(|&n| n != v);

                let mut vertices = Vec::with_capacity(neighbours.len() + 1);
                vertices.push(v);
                vertices.extend(neighbours);
                (faces, halfedges, vertices)
            }
            Selection::Edge(h) => {
                let vertices = vec![self.halfedge(h)?.origin, self.destination(h)?];
                (self.faces_of_edge(h)?, vec![h], vertices)
            }
            Selection::Face(f) => {
                let mut faces = vec![f];
                for neighbour in self.faces_adjacent_to_face(f)? {
                    if !faces.contains(&neighbour) {
                        faces.push(neighbour);
                    }
                }
                let halfedges: Vec<HalfEdgeId> = self.face_cycle(f)?.collect();
                (faces, halfedges, self.face_vertices(f)?)
            }
        };

        let mut edges = Vec::with_capacity(halfedges.len());
        for h in halfedges {
            let a = self.halfedges[h.index()].origin.0;
            let b = self.destination(h)?.0;
            edges.push([a.min(b), a.max(b)]);
        }
        edges.sort_unstable();
        edges.dedup();

        // Every selection yields at least one vertex.
        let head = self.vertices[vertices[0].index()].position;
        let bounds = vertices
            .iter()
            .map(|v| self.vertices[v.index()].position)
            .fold(Aabb::around(head), Aabb::expanded);

        Ok(Highlight {
            selection,
            faces,
            edges,
            vertices,
            bounds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::MeshData;
    use approx::assert_relative_eq;

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points([
            Vec3::new(1.0, -1.0, 0.0),
            Vec3::new(-2.0, 3.0, 0.5),
            Vec3::new(0.0, 0.0, -4.0),
        ])
        .unwrap();
        assert_eq!(aabb.min, Vec3::new(-2.0, -1.0, -4.0));
        assert_eq!(aabb.max, Vec3::new(1.0, 3.0, 0.5));
        assert_relative_eq!(aabb.center().y, 1.0);
        assert!(Aabb::from_points(std::iter::empty()).is_none());
    }

    #[test]
    fn test_highlight_face_of_split_quad() {
        let mesh = MeshData::split_quad().build_topology().unwrap();
        let hl = mesh.highlight(Selection::Face(FaceId(0))).unwrap();
        assert_eq!(hl.faces, vec![FaceId(0), FaceId(1)]);
        assert_eq!(hl.edges, vec![[0, 1], [0, 2], [1, 2]]);
        assert_eq!(hl.vertices, vec![VertexId(0), VertexId(1), VertexId(2)]);
        assert_eq!(hl.bounds.min, Vec3::new(-1.0, -1.0, 0.0));
        assert_eq!(hl.bounds.max, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_highlight_edge() {
        let mesh = MeshData::split_quad().build_topology().unwrap();
        let hl = mesh.highlight(Selection::Edge(HalfEdgeId(2))).unwrap();
        assert_eq!(hl.faces, vec![FaceId(0), FaceId(1)]);
        assert_eq!(hl.edges, vec![[0, 2]]);
        assert_eq!(hl.vertices, vec![VertexId(2), VertexId(0)]);
    }

    #[test]
    fn test_highlight_vertex_on_cube() {
        let mesh = MeshData::cube().build_topology().unwrap();
        let hl = mesh.highlight(Selection::Vertex(VertexId(0))).unwrap();
        assert_eq!(hl.faces.len(), 3);
        // Three undirected edges meet at a cube corner.
        assert_eq!(hl.edges.len(), 3);
        assert_eq!(hl.vertices[0], VertexId(0));
        assert_eq!(hl.vertices.len(), 4);
    }

    #[test]
    fn test_highlight_boundary_vertex_matches_fan() {
        let mesh = MeshData::split_quad().build_topology().unwrap();
        let hl = mesh.highlight(Selection::Vertex(VertexId(0))).unwrap();
        assert_eq!(hl.faces, mesh.faces_of_vertex(VertexId(0)).unwrap());
        assert_eq!(hl.edges, vec![[0, 1], [0, 2], [0, 3]]);
        assert_eq!(
            hl.vertices,
            vec![VertexId(0), VertexId(1), VertexId(2), VertexId(3)]
        );
    }

    #[test]
    fn test_highlight_invalid_selection() {
        let mesh = MeshData::quad().build_topology().unwrap();
        assert!(mesh.highlight(Selection::Face(FaceId(3))).is_err());
    }
}
