//! Construction of a [`HalfEdgeMesh`] from points and face index lists.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use log::{debug, warn};

use super::{Face, FaceId, HalfEdge, HalfEdgeId, HalfEdgeMesh, Vertex, VertexId};
use crate::error::{TopologyError, TopologyResult};
use crate::math::Vec3;

impl HalfEdgeMesh {
    /// Build the topology for `points` and `faces`.
    ///
    /// Each face is an ordered (counter-clockwise) list of 0-based indices
    /// into `points`. Every index is validated before anything is allocated.
    ///
    /// One half-edge is created per face corner, `next` links close each face
    /// cycle, and twins are paired by looking up the reversed directed edge.
    /// A vertex keeps the first outgoing half-edge created for it.
    ///
    /// When several half-edges share a directed edge (non-manifold input), only
    /// the first one is registered; the others stay twin-less and are reported
    /// by [`HalfEdgeMesh::non_manifold_halfedges`].
    ///
    /// # Errors
    /// - [`TopologyError::IndexOutOfRange`] if a face references a missing point.
    /// - [`TopologyError::DegenerateFace`] if a face has fewer than 3 corners.
    pub fn build<F: AsRef<[u32]>>(points: &[Vec3], faces: &[F]) -> TopologyResult<Self> {
        let total = validate(points.len(), faces)?;

        let mut vertices: Vec<Vertex> = points
            .iter()
            .map(|&position| Vertex {
                position,
                halfedge: None,
            })
            .collect();
        let mut halfedges: Vec<HalfEdge> = Vec::with_capacity(total);
        let mut face_records: Vec<Face> = Vec::with_capacity(faces.len());
        let mut non_manifold = Vec::new();

        // (origin, destination) -> first half-edge with that directed key
        let mut edge_map: HashMap<(u32, u32), HalfEdgeId> = HashMap::with_capacity(total);

        for (f, corners) in faces.iter().enumerate() {
            let corners = corners.as_ref();
            let n = corners.len();
            let base = halfedges.len();
            let face_id = FaceId(f as u32);

            for i in 0..n {
                let curr = corners[i];
                let next = corners[(i + 1) % n];
                let id = HalfEdgeId((base + i) as u32);

                halfedges.push(HalfEdge {
                    origin: VertexId(curr),
                    twin: None,
                    next: HalfEdgeId((base + (i + 1) % n) as u32),
                    face: face_id,
                });

                match edge_map.entry((curr, next)) {
                    Entry::Vacant(slot) => {
                        slot.insert(id);
                    }
                    Entry::Occupied(_) => non_manifold.push(id),
                }

                let vertex = &mut vertices[curr as usize];
                if vertex.halfedge.is_none() {
                    vertex.halfedge = Some(id);
                }
            }

            face_records.push(Face {
                halfedge: HalfEdgeId(base as u32),
                degree: n as u32,
            });
        }

        link_twins(&mut halfedges, &edge_map);

        if !non_manifold.is_empty() {
            warn!(
                "{} half-edges share a directed edge with an earlier half-edge; left as boundary",
                non_manifold.len()
            );
        }

        let mesh = Self {
            vertices: vertices.into_boxed_slice(),
            halfedges: halfedges.into_boxed_slice(),
            faces: face_records.into_boxed_slice(),
            non_manifold: non_manifold.into_boxed_slice(),
        };

        debug!(
            "built half-edge mesh: {} vertices, {} half-edges, {} faces, {} boundary half-edges",
            mesh.vertex_count(),
            mesh.halfedge_count(),
            mesh.face_count(),
            mesh.boundary_edge_count()
        );

        Ok(mesh)
    }
}

/// Check every face before allocating. Returns the total half-edge count.
fn validate<F: AsRef<[u32]>>(vertex_count: usize, faces: &[F]) -> TopologyResult<usize> {
    let mut total = 0;
    for (face, corners) in faces.iter().enumerate() {
        let corners = corners.as_ref();
        if corners.len() < 3 {
            return Err(TopologyError::DegenerateFace {
                face,
                degree: corners.len(),
            });
        }
        if let Some((corner, &index)) = corners
            .iter()
            .enumerate()
            .find(|(_, index)| **index as usize >= vertex_count)
        {
            return Err(TopologyError::IndexOutOfRange {
                face,
                corner,
                index,
                vertex_count,
            });
        }
        total += corners.len();
    }
    Ok(total)
}

/// Pair each registered half-edge with the registered half-edge of the
/// reversed key.
///
/// Walks half-edges in creation order so the outcome does not depend on hash
/// map iteration order. Excess half-edges (not the registered owner of their
/// own key) are skipped and keep `twin == None`.
fn link_twins(halfedges: &mut [HalfEdge], edge_map: &HashMap<(u32, u32), HalfEdgeId>) {
    for i in 0..halfedges.len() {
        if halfedges[i].twin.is_some() {
            continue;
        }
        let id = HalfEdgeId(i as u32);
        let origin = halfedges[i].origin.0;
        let destination = halfedges[halfedges[i].next.index()].origin.0;

        if edge_map.get(&(origin, destination)) != Some(&id) {
            continue;
        }
        let Some(&other) = edge_map.get(&(destination, origin)) else {
            continue;
        };
        if other == id || halfedges[other.index()].twin.is_some() {
            continue;
        }

        halfedges[i].twin = Some(other);
        halfedges[other.index()].twin = Some(id);
    }
}
