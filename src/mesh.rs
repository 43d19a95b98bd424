//! Raw mesh input: points plus polygon index lists.
//!
//! [`MeshData`] is what the half-edge builder consumes. It can be loaded from
//! an OBJ file or taken from one of the built-in shapes.

use std::collections::HashMap;
use std::path::Path;

use log::{info, warn};

use crate::error::{LoadError, LoadResult, TopologyResult};
use crate::halfedge::HalfEdgeMesh;
use crate::math::vec3::Vec3;

pub const CUBE_VERTICES: [Vec3; 8] = [
    Vec3::new(-1.0, -1.0, -1.0),
    Vec3::new(-1.0, 1.0, -1.0),
    Vec3::new(1.0, 1.0, -1.0),
    Vec3::new(1.0, -1.0, -1.0),
    Vec3::new(1.0, 1.0, 1.0),
    Vec3::new(1.0, -1.0, 1.0),
    Vec3::new(-1.0, 1.0, 1.0),
    Vec3::new(-1.0, -1.0, 1.0),
];

/// Quads of the cube, 0-based, consistently wound so every edge pairs up.
pub const CUBE_FACES: [[u32; 4]; 6] = [
    [0, 1, 2, 3], // front
    [3, 2, 4, 5], // right
    [5, 4, 6, 7], // back
    [7, 6, 1, 0], // left
    [1, 6, 4, 2], // top
    [5, 7, 0, 3], // bottom
];

const SQUARE_VERTICES: [Vec3; 4] = [
    Vec3::new(-1.0, -1.0, 0.0),
    Vec3::new(1.0, -1.0, 0.0),
    Vec3::new(1.0, 1.0, 0.0),
    Vec3::new(-1.0, 1.0, 0.0),
];

/// Points and faces as loaded, before any topology is built.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub name: String,
    pub points: Vec<Vec3>,
    /// Each face is an ordered, counter-clockwise list of 0-based point indices.
    pub faces: Vec<Vec<u32>>,
}

impl MeshData {
    pub fn new(name: impl Into<String>, points: Vec<Vec3>, faces: Vec<Vec<u32>>) -> Self {
        Self {
            name: name.into(),
            points,
            faces,
        }
    }

    /// Unit cube made of six quads. Closed: no boundary edges.
    pub fn cube() -> Self {
        Self::new(
            "cube",
            CUBE_VERTICES.to_vec(),
            CUBE_FACES.iter().map(|f| f.to_vec()).collect(),
        )
    }

    /// A single square face. Every edge is boundary.
    pub fn quad() -> Self {
        Self::new("quad", SQUARE_VERTICES.to_vec(), vec![vec![0, 1, 2, 3]])
    }

    /// The same square split along the 0-2 diagonal into two triangles.
    pub fn split_quad() -> Self {
        Self::new(
            "split_quad",
            SQUARE_VERTICES.to_vec(),
            vec![vec![0, 1, 2], vec![0, 2, 3]],
        )
    }

    /// Load every object in an OBJ file into one point/face set.
    ///
    /// Polygons are kept as-is (no triangulation). tobj re-indexes positions
    /// per `o`/`g` group, so a point already loaded by an earlier group is
    /// looked up by its exact coordinates and reused. Faces on a group seam
    /// then share vertices and pair up as twins.
    ///
    /// Elements with fewer than 3 corners (`l` lines, `p` points, short `f`
    /// lines) are dropped with a warning.
    pub fn from_obj(path: impl AsRef<Path>) -> LoadResult<Self> {
        let path = path.as_ref();
        let options = tobj::LoadOptions {
            triangulate: false,
            single_index: false,
            ignore_points: false,
            ignore_lines: false,
            ..Default::default()
        };
        let (models, _materials) = tobj::load_obj(path, &options)?;

        let mut points: Vec<Vec3> = Vec::new();
        let mut faces: Vec<Vec<u32>> = Vec::new();
        let mut dropped = 0usize;
        // exact coordinates -> index, for points of groups already merged
        let mut seen: HashMap<[u32; 3], u32> = HashMap::new();

        for model in &models {
            let mesh = &model.mesh;
            let first_new = points.len();

            let remap: Vec<u32> = mesh
                .positions
                .chunks_exact(3)
                .map(|p| {
                    let key = [p[0].to_bits(), p[1].to_bits(), p[2].to_bits()];
                    match seen.get(&key) {
                        Some(&index) => index,
                        None => {
                            points.push(Vec3::new(p[0], p[1], p[2]));
                            (points.len() - 1) as u32
                        }
                    }
                })
                .collect();

            for (i, p) in points.iter().enumerate().skip(first_new) {
                seen.entry([p.x.to_bits(), p.y.to_bits(), p.z.to_bits()])
                    .or_insert(i as u32);
            }

            let arities: Vec<usize> = if mesh.face_arities.is_empty() {
                vec![3; mesh.indices.len() / 3]
            } else {
                mesh.face_arities.iter().map(|&a| a as usize).collect()
            };

            let mut start = 0;
            for arity in arities {
                let end = start + arity;
                let Some(corners) = mesh.indices.get(start..end) else {
                    break;
                };
                start = end;
                if arity < 3 {
                    dropped += 1;
                    continue;
                }
                let face: Option<Vec<u32>> = corners
                    .iter()
                    .map(|&i| remap.get(i as usize).copied())
                    .collect();
                match face {
                    Some(face) => faces.push(face),
                    None => dropped += 1,
                }
            }
        }

        if dropped > 0 {
            warn!(
                "dropped {dropped} elements with fewer than 3 corners from {}",
                path.display()
            );
        }

        if points.is_empty() || faces.is_empty() {
            return Err(LoadError::Empty);
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "mesh".to_string());

        info!(
            "loaded {} points and {} faces from {}",
            points.len(),
            faces.len(),
            path.display()
        );

        Ok(Self::new(name, points, faces))
    }

    /// Build the half-edge topology for these faces.
    pub fn build_topology(&self) -> TopologyResult<HalfEdgeMesh> {
        HalfEdgeMesh::build(&self.points, &self.faces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::halfedge::FaceId;
    use std::fs;

    fn write_temp_obj(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("meshwire_{}_{name}.obj", std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_fixtures_build() {
        assert_eq!(MeshData::cube().build_topology().unwrap().face_count(), 6);
        assert_eq!(MeshData::quad().build_topology().unwrap().halfedge_count(), 4);
        assert_eq!(
            MeshData::split_quad().build_topology().unwrap().halfedge_count(),
            6
        );
    }

    #[test]
    fn test_from_obj_keeps_polygons() {
        let path = write_temp_obj(
            "polygons",
            "o thing\n\
             v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nv 2 0 0\n\
             f 1 2 3 4\n\
             f 2 5 3\n",
        );
        let data = MeshData::from_obj(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(data.points.len(), 5);
        assert_eq!(data.faces, vec![vec![0, 1, 2, 3], vec![1, 4, 2]]);

        let mesh = data.build_topology().unwrap();
        assert_eq!(mesh.halfedge_count(), 7);
    }

    #[test]
    fn test_from_obj_groups_share_seam_vertices() {
        let path = write_temp_obj(
            "groups",
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n\
             g a\n\
             f 1 2 3\n\
             g b\n\
             f 1 3 4\n",
        );
        let data = MeshData::from_obj(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(data.points.len(), 4);
        assert_eq!(data.faces, vec![vec![0, 1, 2], vec![0, 2, 3]]);

        let mesh = data.build_topology().unwrap();
        assert_eq!(mesh.boundary_edge_count(), 4);
        assert_eq!(mesh.faces_adjacent_to_face(FaceId(0)).unwrap(), vec![FaceId(1)]);
    }

    #[test]
    fn test_from_obj_drops_short_elements() {
        let path = write_temp_obj(
            "short",
            "v 0 0 0\nv 1 0 0\nv 1 1 0\n\
             f 1 2 3\n\
             l 1 2\n\
             f 2 3\n",
        );
        let data = MeshData::from_obj(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(data.faces, vec![vec![0, 1, 2]]);
    }

    #[test]
    fn test_from_obj_empty_file() {
        let path = write_temp_obj("empty", "# nothing here\n");
        let result = MeshData::from_obj(&path);
        fs::remove_file(&path).ok();
        assert!(matches!(result, Err(LoadError::Empty)));
    }

    #[test]
    fn test_from_obj_missing_file() {
        let result = MeshData::from_obj("/definitely/not/here.obj");
        assert!(matches!(result, Err(LoadError::Obj(_))));
    }
}
