//! Geometric primitives underlying navmesh queries.
//!
//! - [`barycentric`] / [`cartesian`]: conversion between a point and its
//!   weights over a triangle's three vertices
//! - [`closest_point_on_triangle`]: exact Voronoi-region projection
//! - [`rotation_between`]: shortest-arc rotation between two directions
//! - [`Aabb`] and [`Ray`]: bounds and ray tests for spatial queries

mod aabb;
mod barycentric;
mod closest;
mod ray;
mod rotation;

pub use aabb::Aabb;
pub use barycentric::{barycentric, cartesian, normalize_barycentric};
pub use closest::{closest_point_on_triangle, ClosestPoint, TriangleRegion};
pub use ray::Ray;
pub use rotation::rotation_between;
