//! General half-edge mesh.
//!
//! This module provides a mutable half-edge representation for polygon
//! meshes, supporting one-at-a-time insertion and cascading removal of
//! vertices, edges and faces.
//!
//! # Overview
//!
//! The primary type is [`HalfEdgeMesh`]. Elements are identified by handle
//! types:
//! - [`VertexId`] - Identifies a vertex
//! - [`HalfEdgeId`] - Identifies a half-edge
//! - [`EdgeId`] - Identifies a full edge (a symmetric pair)
//! - [`FaceId`] - Identifies a face
//!
//! Handles are dense indices. Every removal compacts storage, so handles to
//! later elements of the same kind change after a removal.
//!
//! # Construction
//!
//! ```
//! use trailmesh::mesh::HalfEdgeMesh;
//! use nalgebra::Point3;
//!
//! let mut mesh = HalfEdgeMesh::new();
//! let a = mesh.add_vertex(Point3::new(0.0, 0.0, 0.0));
//! let b = mesh.add_vertex(Point3::new(1.0, 0.0, 0.0));
//! let c = mesh.add_vertex(Point3::new(0.0, 1.0, 0.0));
//!
//! let ab = mesh.add_edge(a, b).unwrap();
//! let bc = mesh.add_edge(b, c).unwrap();
//! let ca = mesh.add_edge(c, a).unwrap();
//! let face = mesh.add_face(&[ab, bc, ca]).unwrap();
//!
//! assert_eq!(mesh.face_vertices(face).count(), 3);
//! ```

mod halfedge;
mod index;

pub use halfedge::{Face, HalfEdge, HalfEdgeMesh, LoopIter, RingIter, Vertex};
pub use index::{EdgeId, FaceId, HalfEdgeId, VertexId};
