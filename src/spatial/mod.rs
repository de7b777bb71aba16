//! Spatial indexing.
//!
//! [`Octree`] buckets items by bounding box for region and ray queries. A
//! navmesh builds one over its triangles with
//! [`Navmesh::create_octree`](crate::navmesh::Navmesh::create_octree).

mod octree;

pub use octree::Octree;
