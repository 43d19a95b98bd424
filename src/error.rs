//! Error types for topology construction, queries and mesh loading.

use thiserror::Error;

/// Result type alias for topology operations.
pub type TopologyResult<T> = Result<T, TopologyError>;

/// Result type alias for mesh loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors raised while building or querying a half-edge topology.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// A face references a vertex index past the end of the point list.
    #[error("face {face} corner {corner} references vertex {index}, but only {vertex_count} vertices exist")]
    IndexOutOfRange {
        face: usize,
        corner: usize,
        index: u32,
        vertex_count: usize,
    },

    /// A face has too few corners to form a closed half-edge cycle.
    #[error("face {face} has degree {degree}; at least 3 corners are required")]
    DegenerateFace { face: usize, degree: usize },

    /// A vertex handle that does not belong to this mesh.
    #[error("vertex {0} does not exist")]
    InvalidVertex(u32),

    /// A half-edge handle that does not belong to this mesh.
    #[error("half-edge {0} does not exist")]
    InvalidHalfEdge(u32),

    /// A face handle that does not belong to this mesh.
    #[error("face {0} does not exist")]
    InvalidFace(u32),
}

/// Errors raised while loading mesh data from disk.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The OBJ parser rejected the file.
    #[error("failed to parse OBJ: {0}")]
    Obj(#[from] tobj::LoadError),

    /// The file parsed but produced no points or no faces.
    #[error("mesh has no points or no faces")]
    Empty,

    /// The face lists could not be turned into a topology.
    #[error(transparent)]
    Topology(#[from] TopologyError),
}
