//! Read-only adjacency queries.
//!
//! Every traversal is bounded, either by a face's degree or by the total
//! half-edge count, so malformed input ends a query early instead of looping.

use log::warn;

use super::{FaceId, HalfEdge, HalfEdgeId, HalfEdgeMesh, VertexId};
use crate::error::TopologyResult;

/// Iterator over the half-edges of one face, starting at its seed half-edge.
///
/// Yields exactly `degree` items.
pub struct FaceCycle<'a> {
    halfedges: &'a [HalfEdge],
    current: HalfEdgeId,
    remaining: u32,
}

impl Iterator for FaceCycle<'_> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let h = self.current;
        self.current = self.halfedges[h.index()].next;
        self.remaining -= 1;
        Some(h)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

impl HalfEdgeMesh {
    /// Half-edges of face `f` in traversal order.
    pub fn face_cycle(&self, f: FaceId) -> TopologyResult<FaceCycle<'_>> {
        let face = self.face(f)?;
        Ok(FaceCycle {
            halfedges: &self.halfedges,
            current: face.halfedge,
            remaining: face.degree,
        })
    }

    /// Vertex indices of face `f` in winding order.
    pub fn face_vertices(&self, f: FaceId) -> TopologyResult<Vec<VertexId>> {
        Ok(self
            .face_cycle(f)?
            .map(|h| self.halfedges[h.index()].origin)
            .collect())
    }

    /// The half-edge whose `next` is `h`, found by walking `h`'s face.
    ///
    /// Returns `None` if the cycle does not lead back to `h` within the
    /// face's degree.
    pub fn prev(&self, h: HalfEdgeId) -> TopologyResult<Option<HalfEdgeId>> {
        let face = self.halfedge(h)?.face;
        Ok(self.face_cycle_from(h, face).find(|g| self.halfedges[g.index()].next == h))
    }

    fn face_cycle_from(&self, h: HalfEdgeId, f: FaceId) -> FaceCycle<'_> {
        FaceCycle {
            halfedges: &self.halfedges,
            current: h,
            remaining: self.faces[f.index()].degree,
        }
    }

    /// True if any half-edge incident to `v` lacks a twin.
    pub fn is_boundary_vertex(&self, v: VertexId) -> TopologyResult<bool> {
        let edges = self.edges_of_vertex(v)?;
        Ok(edges
            .iter()
            .any(|h| self.halfedges[h.index()].twin.is_none()))
    }

    /// Faces sharing an edge with `f`, in `f`'s traversal order.
    ///
    /// A neighbour bordering `f` along several edges appears once per shared
    /// edge. `f` itself is never included.
    pub fn faces_adjacent_to_face(&self, f: FaceId) -> TopologyResult<Vec<FaceId>> {
        Ok(self
            .face_cycle(f)?
            .filter_map(|h| self.halfedges[h.index()].twin)
            .map(|t| self.halfedges[t.index()].face)
            .filter(|&neighbour| neighbour != f)
            .collect())
    }

    /// The face owning `h`, followed by its twin's face when that differs.
    pub fn faces_of_edge(&self, h: HalfEdgeId) -> TopologyResult<Vec<FaceId>> {
        let he = self.halfedge(h)?;
        let mut faces = vec![he.face];
        if let Some(t) = he.twin {
            let other = self.halfedges[t.index()].face;
            if other != he.face {
                faces.push(other);
            }
        }
        Ok(faces)
    }

    /// All faces incident to `v`, closed or boundary.
    ///
    /// The forward pass rotates around `v` through `twin.next` from the
    /// vertex's seed half-edge until it comes back to the seed or hits a
    /// half-edge without a twin. In the boundary case a backward pass then
    /// rotates the other way through `prev.twin` until it too runs out of
    /// twins, which recovers the part of the fan behind the seed.
    pub fn faces_of_vertex(&self, v: VertexId) -> TopologyResult<Vec<FaceId>> {
        let Some(start) = self.vertex(v)?.halfedge else {
            return Ok(Vec::new());
        };
        let limit = self.halfedges.len();
        let mut faces = Vec::new();

        let mut h = start;
        let mut hit_boundary = false;
        let mut closed = false;
        for _ in 0..limit {
            let he = &self.halfedges[h.index()];
            faces.push(he.face);
            match he.twin {
                None => {
                    hit_boundary = true;
                    break;
                }
                Some(t) => {
                    h = self.halfedges[t.index()].next;
                    if h == start {
                        closed = true;
                        break;
                    }
                }
            }
        }

        if !hit_boundary {
            if !closed {
                warn!("fan around {v} did not close within {limit} steps");
            }
            return Ok(faces);
        }

        let mut h = start;
        for _ in 0..limit {
            let Some(p) = self.prev(h)? else {
                warn!("{h} has no predecessor in its face; fan around {v} is incomplete");
                break;
            };
            let Some(t) = self.halfedges[p.index()].twin else {
                break;
            };
            if t == start {
                break;
            }
            faces.push(self.halfedges[t.index()].face);
            h = t;
        }

        Ok(faces)
    }

    /// Half-edges touching `v` at either end, sorted and without repeats.
    ///
    /// Built from [`HalfEdgeMesh::faces_of_vertex`] rather than by rotating
    /// around `v` directly, so incoming boundary half-edges are not missed.
    /// Both directions of an interior edge are reported.
    pub fn edges_of_vertex(&self, v: VertexId) -> TopologyResult<Vec<HalfEdgeId>> {
        let faces = self.faces_of_vertex(v)?;
        self.edges_in_fan(v, &faces)
    }

    /// Half-edges of `faces` that start or end at `v`, sorted and unique.
    pub(super) fn edges_in_fan(
        &self,
        v: VertexId,
        faces: &[FaceId],
    ) -> TopologyResult<Vec<HalfEdgeId>> {
        let mut edges = Vec::new();
        for &f in faces {
            for h in self.face_cycle(f)? {
                let he = &self.halfedges[h.index()];
                if he.origin == v || self.halfedges[he.next.index()].origin == v {
                    edges.push(h);
                }
            }
        }
        edges.sort_unstable();
        edges.dedup();
        Ok(edges)
    }
}
