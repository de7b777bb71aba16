//! # Trailmesh
//!
//! Half-edge meshes and sliding navmesh traversal for agents that walk on
//! triangulated surfaces.
//!
//! ## Features
//!
//! - **Half-edge mesh**: mutable polygon mesh with cascading removal and
//!   dense, compacted handles
//! - **Navmesh**: triangle mesh with twin edges, face normals and bounds
//! - **Traversal**: slide a point along a velocity across triangle edges,
//!   re-expressing the velocity in each new triangle's plane
//! - **Spatial queries**: octree ray casts and region queries
//! - **OBJ I/O**: triangulated Wavefront OBJ load and save
//!
//! ## Quick Start
//!
//! ```
//! use trailmesh::prelude::*;
//! use nalgebra::{Point3, Vector3};
//!
//! let vertices = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//! ];
//! let navmesh = Navmesh::from_triangles(&vertices, &[0, 1, 2, 1, 3, 2]).unwrap();
//!
//! // Walk from the first triangle across the shared diagonal
//! let mut agent = NavPosition::new(TriangleId::new(0), Vector3::new(0.5, 0.25, 0.25));
//! let walk = agent.advance(&navmesh, &Vector3::new(0.4, 0.4, 0.0), &TraverseOptions::default());
//!
//! assert_eq!(walk.termination, Termination::Arrived);
//! assert_eq!(agent.triangle, TriangleId::new(1));
//! ```
//!
//! ## Terrain
//!
//! ```
//! use trailmesh::prelude::*;
//! use nalgebra::{Point3, Vector3};
//!
//! let navmesh = TerrainGrid::new(16, 16, 10.0, 10.0).build().unwrap();
//! let octree = navmesh.create_octree(5);
//!
//! // Pick the triangle under a point
//! let ray = Ray::new(Point3::new(1.2, 5.0, -0.7), -Vector3::y());
//! let hit = navmesh.ray_cast(&octree, &ray).unwrap();
//! assert!((hit.t - 5.0).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod geometry;
pub mod io;
pub mod mesh;
pub mod navmesh;
pub mod spatial;

/// Prelude module for convenient imports.
///
/// ```
/// use trailmesh::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::NavmeshConfig;
    pub use crate::error::{MeshError, Result};
    pub use crate::geometry::{Aabb, Ray};
    pub use crate::mesh::{EdgeId, FaceId, HalfEdgeId, HalfEdgeMesh, VertexId};
    pub use crate::navmesh::{
        NavPosition, Navmesh, RayHit, Step, TerrainGrid, Termination, Traversal, TraverseOptions, TriangleId,
    };
    pub use crate::spatial::Octree;
}

// Re-export nalgebra types for convenience
pub use nalgebra;
