//! Error types for trailmesh.
//!
//! Structural errors come from half-edge mutation and indicate malformed
//! input that should have been validated upstream. Load errors come from
//! navmesh construction and OBJ parsing; they always leave the navmesh empty.

use std::path::PathBuf;
use thiserror::Error;

use crate::mesh::{FaceId, HalfEdgeId, VertexId};

/// Result type alias using [`MeshError`].
pub type Result<T> = std::result::Result<T, MeshError>;

/// Errors that can occur while building, mutating or loading meshes.
#[derive(Error, Debug)]
pub enum MeshError {
    /// A face was requested from an empty edge loop.
    #[error("edge loop is empty")]
    EmptyLoop,

    /// Consecutive half-edges in a loop do not meet at a shared vertex.
    #[error("disconnected edge loop at {edge:?}")]
    DisconnectedLoop {
        /// The half-edge whose destination is not the next edge's origin.
        edge: HalfEdgeId,
    },

    /// A half-edge in the loop already borders a face.
    #[error("half-edge {edge:?} already borders face {face:?}")]
    EdgeAlreadyOwnsFace {
        /// The offending half-edge.
        edge: HalfEdgeId,
        /// The face it already borders.
        face: FaceId,
    },

    /// No free incident half-edge was found while splicing an edge ring.
    #[error("non-manifold adjacency around {edge:?}")]
    AdjacencyConflict {
        /// The half-edge that could not be spliced.
        edge: HalfEdgeId,
    },

    /// An edge was requested from a vertex to itself.
    #[error("degenerate edge at {vertex:?}")]
    DegenerateEdge {
        /// The vertex used for both endpoints.
        vertex: VertexId,
    },

    /// The navmesh index list is not a whole number of triangles.
    #[error("index count {count} is not a multiple of 3")]
    IndexCount {
        /// Number of indices supplied.
        count: usize,
    },

    /// A triangle references a vertex that does not exist.
    #[error("triangle {triangle} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The triangle index.
        triangle: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// Malformed Wavefront OBJ input.
    #[error("{}:{line}: {message}", .path.display())]
    Obj {
        /// The file (or stream name) being read.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// A file could not be opened or created.
    #[error("{}: {source}", .path.display())]
    File {
        /// The file being opened.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl MeshError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        MeshError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Whether this error comes from half-edge mutation rather than loading.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            MeshError::EmptyLoop
                | MeshError::DisconnectedLoop { .. }
                | MeshError::EdgeAlreadyOwnsFace { .. }
                | MeshError::AdjacencyConflict { .. }
                | MeshError::DegenerateEdge { .. }
        )
    }
}

impl From<toml::de::Error> for MeshError {
    fn from(e: toml::de::Error) -> Self {
        MeshError::Config(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_obj_error_names_file_and_line() {
        let err = MeshError::Obj {
            path: PathBuf::from("terrain.obj"),
            line: 12,
            message: "expected 3 vertex indices".to_string(),
        };
        assert_eq!(err.to_string(), "terrain.obj:12: expected 3 vertex indices");
        assert!(!err.is_structural());
    }

    #[test]
    fn test_structural_classification() {
        let err = MeshError::DisconnectedLoop {
            edge: HalfEdgeId::new(4),
        };
        assert!(err.is_structural());
        assert_eq!(err.to_string(), "disconnected edge loop at HE(4)");
    }
}
