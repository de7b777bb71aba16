//! Triangle navigation mesh.
//!
//! A [`Navmesh`] is a half-edge structure fixed to triangles. Every triangle
//! owns exactly three half-edges stored consecutively, so triangle `t` owns
//! edges `3t`, `3t + 1` and `3t + 2`. Unlike the general
//! [`HalfEdgeMesh`](crate::mesh::HalfEdgeMesh), an edge on the mesh boundary
//! has no twin: `symmetric` is `None` there.
//!
//! Barycentric coordinates `(u, v, w)` on a triangle weight the vertices of
//! its `edge`, `edge.next` and `edge.previous` in that order.
//!
//! # Example
//!
//! ```
//! use trailmesh::navmesh::Navmesh;
//! use nalgebra::{Point3, Vector3};
//!
//! let vertices = [
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(1.0, 1.0, 0.0),
//! ];
//! let navmesh = Navmesh::from_triangles(&vertices, &[0, 1, 2, 1, 3, 2]).unwrap();
//! assert_eq!(navmesh.triangles().len(), 2);
//! assert_eq!(navmesh.boundary_edges().count(), 4);
//!
//! let t = navmesh.triangle_ids().next().unwrap();
//! let steps = navmesh.traverse(t, &Vector3::new(0.5, 0.25, 0.25), &Vector3::new(0.4, 0.4, 0.0));
//! assert_eq!(steps.len(), 2);
//! ```

mod terrain;
mod traverse;

use std::collections::HashMap;
use std::io::{BufRead, Write};
use std::path::Path;

use log::{debug, warn};
use nalgebra::{Point3, Vector3};

use crate::error::{MeshError, Result};
use crate::geometry::{self, Aabb, Ray};
use crate::io::obj;
use crate::mesh::{FaceId, HalfEdgeId, VertexId};
use crate::spatial::Octree;

pub use terrain::{apply_heights, TerrainGrid};
pub use traverse::{NavPosition, Step, Termination, Traversal, TraverseOptions, TraverseRequest};

/// Triangle handle.
pub type TriangleId = FaceId;

/// A navmesh vertex.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// Position.
    pub position: Point3<f64>,
    /// One outgoing edge, or `None` if no triangle uses this vertex.
    pub edge: Option<HalfEdgeId>,
    /// User flags.
    pub flags: u8,
}

/// A navmesh half-edge.
#[derive(Debug, Clone, Copy)]
pub struct Edge {
    /// Origin vertex.
    pub vertex: VertexId,
    /// Owning triangle.
    pub triangle: TriangleId,
    /// Previous edge in the triangle.
    pub previous: HalfEdgeId,
    /// Next edge in the triangle.
    pub next: HalfEdgeId,
    /// Twin edge in the adjacent triangle, `None` on the boundary.
    pub symmetric: Option<HalfEdgeId>,
    /// User flags.
    pub flags: u8,
}

/// A navmesh triangle.
#[derive(Debug, Clone, Copy)]
pub struct Triangle {
    /// First edge of the triangle.
    pub edge: HalfEdgeId,
    /// Unit face normal.
    pub normal: Vector3<f64>,
    /// User flags.
    pub flags: u8,
}

/// A ray hit on a navmesh triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// The triangle hit.
    pub triangle: TriangleId,
    /// Ray parameter of the hit.
    pub t: f64,
    /// Barycentric coordinates of the hit on the triangle.
    pub barycentric: Vector3<f64>,
}

/// Hits from a ray test against every triangle, split by facing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RayFacing {
    /// Nearest hit on a triangle facing the ray.
    pub front: Option<RayHit>,
    /// Farthest hit on a triangle facing away from the ray.
    pub back: Option<RayHit>,
}

/// A triangle navigation mesh.
#[derive(Debug, Clone)]
pub struct Navmesh {
    vertices: Vec<Vertex>,
    edges: Vec<Edge>,
    triangles: Vec<Triangle>,
    bounds: Aabb,
}

impl Default for Navmesh {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            edges: Vec::new(),
            triangles: Vec::new(),
            bounds: Aabb::empty(),
        }
    }
}

impl Navmesh {
    /// Create an empty navmesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a navmesh from vertex positions and a flat triangle index list.
    pub fn from_triangles(vertices: &[Point3<f64>], indices: &[usize]) -> Result<Self> {
        let mut navmesh = Self::new();
        navmesh.create(vertices, indices)?;
        Ok(navmesh)
    }

    /// Replace the contents of this navmesh with the given triangles.
    ///
    /// Twins are resolved by matching each directed edge `(i, j)` with an
    /// earlier `(j, i)`. An index count that is not a multiple of three is
    /// rejected before anything changes. An out-of-range index leaves the
    /// navmesh empty.
    pub fn create(&mut self, vertices: &[Point3<f64>], indices: &[usize]) -> Result<()> {
        if indices.len() % 3 != 0 {
            warn!("navmesh index count {} is not a multiple of 3", indices.len());
            return Err(MeshError::IndexCount {
                count: indices.len(),
            });
        }

        self.destroy();
        self.vertices.reserve(vertices.len());
        self.edges.reserve(indices.len());
        self.triangles.reserve(indices.len() / 3);

        for &position in vertices {
            self.vertices.push(Vertex {
                position,
                edge: None,
                flags: 0,
            });
        }

        let mut open: HashMap<(usize, usize), HalfEdgeId> = HashMap::with_capacity(indices.len());
        for (t, corners) in indices.chunks_exact(3).enumerate() {
            if let Some(&bad) = corners.iter().find(|&&i| i >= vertices.len()) {
                warn!("navmesh triangle {} references invalid vertex {}", t, bad);
                self.destroy();
                return Err(MeshError::InvalidVertexIndex {
                    triangle: t,
                    vertex: bad,
                });
            }

            let triangle = TriangleId::new(t);
            let first = self.edges.len();
            let ring = [
                HalfEdgeId::new(first),
                HalfEdgeId::new(first + 1),
                HalfEdgeId::new(first + 2),
            ];

            for j in 0..3 {
                let from = corners[j];
                let to = corners[(j + 1) % 3];
                let id = ring[j];

                let symmetric = open.remove(&(to, from));
                if let Some(twin) = symmetric {
                    self.edges[twin.index()].symmetric = Some(id);
                } else {
                    open.insert((from, to), id);
                }

                self.edges.push(Edge {
                    vertex: VertexId::new(from),
                    triangle,
                    previous: ring[(j + 2) % 3],
                    next: ring[(j + 1) % 3],
                    symmetric,
                    flags: 0,
                });
                self.vertices[from].edge = Some(id);
            }

            self.triangles.push(Triangle {
                edge: ring[0],
                normal: Vector3::zeros(),
                flags: 0,
            });
        }

        self.calculate_normals();
        self.calculate_bounds();

        debug!(
            "built navmesh: {} vertices, {} edges, {} triangles, {} boundary edges",
            self.vertices.len(),
            self.edges.len(),
            self.triangles.len(),
            self.boundary_edges().count()
        );
        Ok(())
    }

    /// Remove every vertex, edge and triangle.
    pub fn destroy(&mut self) {
        self.vertices.clear();
        self.edges.clear();
        self.triangles.clear();
        self.bounds = Aabb::empty();
    }

    /// Whether the navmesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Recompute every triangle's unit normal from its current vertex positions.
    ///
    /// Degenerate triangles get a zero normal.
    pub fn calculate_normals(&mut self) {
        for t in 0..self.triangles.len() {
            let [a, b, c] = self.triangle_positions(TriangleId::new(t));
            let normal = (b - a).cross(&(c - a)).try_normalize(0.0).unwrap_or_else(Vector3::zeros);
            self.triangles[t].normal = normal;
        }
    }

    /// Recompute the bounding box over every vertex position.
    pub fn calculate_bounds(&mut self) {
        self.bounds = Aabb::from_points(self.vertices.iter().map(|v| &v.position));
    }

    // Accessors

    /// All vertices.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// All half-edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// All triangles.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Vertex by handle.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    /// Half-edge by handle.
    #[inline]
    pub fn edge(&self, id: HalfEdgeId) -> &Edge {
        &self.edges[id.index()]
    }

    /// Triangle by handle.
    #[inline]
    pub fn triangle(&self, id: TriangleId) -> &Triangle {
        &self.triangles[id.index()]
    }

    /// Bounding box of all vertices, as of the last [`calculate_bounds`](Self::calculate_bounds).
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Iterate over triangle handles.
    pub fn triangle_ids(&self) -> impl Iterator<Item = TriangleId> + '_ {
        (0..self.triangles.len()).map(TriangleId::new)
    }

    /// Iterate over vertex handles.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// The triangle's three edges: `edge`, `edge.next`, `edge.previous`.
    #[inline]
    pub fn triangle_edges(&self, t: TriangleId) -> [HalfEdgeId; 3] {
        let edge = self.triangles[t.index()].edge;
        let e = &self.edges[edge.index()];
        [edge, e.next, e.previous]
    }

    /// The triangle's three corner positions in barycentric order.
    #[inline]
    pub fn triangle_positions(&self, t: TriangleId) -> [Point3<f64>; 3] {
        self.triangle_edges(t).map(|e| self.vertices[self.edges[e.index()].vertex.index()].position)
    }

    /// Bounding box of a single triangle.
    pub fn triangle_bounds(&self, t: TriangleId) -> Aabb {
        Aabb::from_points(&self.triangle_positions(t))
    }

    /// The vertex an edge points to.
    #[inline]
    pub fn destination(&self, e: HalfEdgeId) -> VertexId {
        self.edges[self.edges[e.index()].next.index()].vertex
    }

    /// Whether an edge lies on the mesh boundary.
    #[inline]
    pub fn is_boundary_edge(&self, e: HalfEdgeId) -> bool {
        self.edges[e.index()].symmetric.is_none()
    }

    /// Iterate over every edge without a twin.
    pub fn boundary_edges(&self) -> impl Iterator<Item = HalfEdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, e)| e.symmetric.is_none())
            .map(|(i, _)| HalfEdgeId::new(i))
    }

    // Coordinates

    /// Cartesian point for barycentric coordinates on a triangle.
    pub fn to_cartesian(&self, t: TriangleId, barycentric: &Vector3<f64>) -> Point3<f64> {
        let [a, b, c] = self.triangle_positions(t);
        geometry::cartesian(barycentric, &a, &b, &c)
    }

    /// Barycentric coordinates of a point projected onto a triangle's plane.
    pub fn to_barycentric(&self, t: TriangleId, p: &Point3<f64>) -> Vector3<f64> {
        let [a, b, c] = self.triangle_positions(t);
        geometry::barycentric(p, &a, &b, &c)
    }

    /// Closest point on a triangle to `p`.
    ///
    /// Returns its barycentric coordinates and the edge it lies on, or `None`
    /// when it is inside the triangle. A point at a corner reports the edge
    /// leaving that corner.
    pub fn closest_point_on_triangle(&self, p: &Point3<f64>, t: TriangleId) -> (Vector3<f64>, Option<HalfEdgeId>) {
        let [a, b, c] = self.triangle_positions(t);
        let closest = geometry::closest_point_on_triangle(p, &a, &b, &c);
        let edge = closest.region.ring_slot().map(|slot| self.triangle_edges(t)[slot]);
        (closest.barycentric, edge)
    }

    /// Area-unweighted average of the normals of every triangle around `v`.
    ///
    /// Returns a zero vector for a vertex no triangle uses.
    pub fn vertex_normal(&self, v: VertexId) -> Vector3<f64> {
        let Some(start) = self.vertices[v.index()].edge else {
            return Vector3::zeros();
        };

        let mut sum = Vector3::zeros();
        let mut e = start;
        let mut closed = false;
        loop {
            sum += self.triangles[self.edges[e.index()].triangle.index()].normal;
            let incoming = self.edges[e.index()].previous;
            match self.edges[incoming.index()].symmetric {
                Some(next) if next == start => {
                    closed = true;
                    break;
                }
                Some(next) => e = next,
                None => break,
            }
        }

        if !closed {
            // Hit the boundary; pick up the triangles on the other side of start
            let mut e = start;
            while let Some(twin) = self.edges[e.index()].symmetric {
                e = self.edges[twin.index()].next;
                if e == start {
                    break;
                }
                sum += self.triangles[self.edges[e.index()].triangle.index()].normal;
            }
        }

        sum.try_normalize(0.0).unwrap_or_else(Vector3::zeros)
    }

    /// Move a vertex.
    ///
    /// Normals and bounds are not updated; call
    /// [`calculate_normals`](Self::calculate_normals) and
    /// [`calculate_bounds`](Self::calculate_bounds) once edits are done.
    pub fn set_vertex_position(&mut self, v: VertexId, position: Point3<f64>) {
        self.vertices[v.index()].position = position;
    }

    /// Set a triangle's flags.
    pub fn set_triangle_flags(&mut self, t: TriangleId, flags: u8) {
        self.triangles[t.index()].flags = flags;
    }

    // Spatial queries

    /// Bucket every triangle into an octree over the navmesh bounds.
    ///
    /// The octree is a snapshot; rebuild it after moving vertices.
    pub fn create_octree(&self, max_depth: usize) -> Octree<TriangleId> {
        let mut octree = Octree::new(self.bounds, max_depth);
        for t in self.triangle_ids() {
            octree.insert(self.triangle_bounds(t), t);
        }
        debug!("built octree over {} triangles with max depth {}", octree.len(), max_depth);
        octree
    }

    /// Test a ray against one triangle.
    pub fn intersect_triangle(&self, ray: &Ray, t: TriangleId) -> Option<RayHit> {
        let [a, b, c] = self.triangle_positions(t);
        ray.intersect_triangle(&a, &b, &c).map(|(distance, u, v)| RayHit {
            triangle: t,
            t: distance,
            barycentric: Vector3::new(1.0 - u - v, u, v),
        })
    }

    /// Test a ray against every triangle.
    ///
    /// A triangle whose normal does not point along the ray counts as front
    /// facing. Returns `None` when nothing is hit.
    pub fn intersects(&self, ray: &Ray) -> Option<RayFacing> {
        let mut facing = RayFacing::default();
        let mut any = false;

        for t in self.triangle_ids() {
            let Some(hit) = self.intersect_triangle(ray, t) else {
                continue;
            };
            any = true;
            if ray.direction.dot(&self.triangles[t.index()].normal) <= 0.0 {
                if facing.front.map_or(true, |front| hit.t < front.t) {
                    facing.front = Some(hit);
                }
            } else if facing.back.map_or(true, |back| hit.t > back.t) {
                facing.back = Some(hit);
            }
        }

        any.then_some(facing)
    }

    /// Nearest triangle hit by a ray, using `octree` to skip distant triangles.
    pub fn ray_cast(&self, octree: &Octree<TriangleId>, ray: &Ray) -> Option<RayHit> {
        let mut nearest: Option<RayHit> = None;
        octree.query_ray(ray, |&t| {
            if let Some(hit) = self.intersect_triangle(ray, t) {
                if nearest.map_or(true, |n| hit.t < n.t) {
                    nearest = Some(hit);
                }
            }
        });
        nearest
    }

    /// Triangles whose bounds overlap `aabb`, in ascending order.
    pub fn triangles_in(&self, octree: &Octree<TriangleId>, aabb: &Aabb) -> Vec<TriangleId> {
        let mut found = Vec::new();
        octree.query_aabb(aabb, |&t| {
            if self.triangle_bounds(t).intersects(aabb) {
                found.push(t);
            }
        });
        found.sort_unstable();
        found
    }

    // OBJ

    /// Load a triangulated OBJ file, replacing the current contents.
    pub fn load_obj<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        obj::load(self, path)
    }

    /// Read triangulated OBJ text, replacing the current contents.
    pub fn read_obj<R: BufRead>(&mut self, reader: R, name: &Path) -> Result<()> {
        obj::read(self, reader, name)
    }

    /// Write the navmesh as OBJ text.
    pub fn write_obj<W: Write>(&self, writer: W) -> Result<()> {
        obj::write(self, writer)
    }

    /// Save the navmesh to an OBJ file.
    pub fn save_obj<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        obj::save(self, path)
    }

    /// Check that every twin, ring and vertex link is consistent.
    pub fn is_valid(&self) -> bool {
        for (i, e) in self.edges.iter().enumerate() {
            let id = HalfEdgeId::new(i);
            if e.vertex.index() >= self.vertices.len() || e.triangle.index() >= self.triangles.len() {
                return false;
            }
            if self.edges[e.next.index()].previous != id || self.edges[e.previous.index()].next != id {
                return false;
            }
            if self.edges[self.edges[e.next.index()].next.index()].next != id {
                return false;
            }
            if let Some(twin) = e.symmetric {
                let tw = &self.edges[twin.index()];
                if tw.symmetric != Some(id) || tw.vertex != self.destination(id) {
                    return false;
                }
            }
        }
        for (i, v) in self.vertices.iter().enumerate() {
            if let Some(e) = v.edge {
                if self.edges[e.index()].vertex.index() != i {
                    return false;
                }
            }
        }
        self.triangles
            .iter()
            .enumerate()
            .all(|(i, t)| self.edges[t.edge.index()].triangle.index() == i)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Two triangles sharing the diagonal of the unit square.
    pub(crate) fn square() -> Navmesh {
        let vertices = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
        ];
        Navmesh::from_triangles(&vertices, &[0, 1, 2, 1, 3, 2]).unwrap()
    }

    /// Two triangles folded 90 degrees along the x axis.
    pub(crate) fn fold() -> Navmesh {
        let vertices = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.5, -1.0, 0.0),
            Point3::new(0.5, 0.0, 1.0),
        ];
        Navmesh::from_triangles(&vertices, &[0, 2, 1, 0, 1, 3]).unwrap()
    }

    #[test]
    fn test_create_links_twins() {
        let navmesh = square();
        assert_eq!(navmesh.vertices().len(), 4);
        assert_eq!(navmesh.edges().len(), 6);
        assert_eq!(navmesh.triangles().len(), 2);
        assert!(navmesh.is_valid());

        // Edge 1 -> 2 of the first triangle pairs with 2 -> 1 of the second
        let shared = HalfEdgeId::new(1);
        let twin = navmesh.edge(shared).symmetric.unwrap();
        assert_eq!(twin, HalfEdgeId::new(5));
        assert_eq!(navmesh.edge(twin).symmetric, Some(shared));
        assert_eq!(navmesh.edge(twin).triangle, TriangleId::new(1));
        assert_eq!(navmesh.boundary_edges().count(), 4);
    }

    #[test]
    fn test_triangle_rings_close() {
        let navmesh = square();
        for t in navmesh.triangle_ids() {
            let e = navmesh.triangle(t).edge;
            let e3 = navmesh.edge(navmesh.edge(navmesh.edge(e).next).next).next;
            assert_eq!(e3, e);
        }
    }

    #[test]
    fn test_normals_and_bounds() {
        let navmesh = fold();
        assert_relative_eq!(navmesh.triangle(TriangleId::new(0)).normal, Vector3::z(), epsilon = 1e-12);
        assert_relative_eq!(navmesh.triangle(TriangleId::new(1)).normal, -Vector3::y(), epsilon = 1e-12);
        assert_eq!(navmesh.bounds().min, Point3::new(0.0, -1.0, 0.0));
        assert_eq!(navmesh.bounds().max, Point3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_index_count_rejected_without_change() {
        let mut navmesh = square();
        let err = navmesh.create(&[Point3::origin()], &[0, 0]).unwrap_err();
        assert!(matches!(err, MeshError::IndexCount { count: 2 }));
        assert_eq!(navmesh.triangles().len(), 2);
    }

    #[test]
    fn test_invalid_index_tears_down() {
        let mut navmesh = square();
        let vertices = [Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)];
        let err = navmesh.create(&vertices, &[0, 1, 2, 0, 2, 7]).unwrap_err();
        assert!(matches!(err, MeshError::InvalidVertexIndex { triangle: 1, vertex: 7 }));
        assert!(navmesh.is_empty());
        assert!(navmesh.vertices().is_empty());
        assert!(navmesh.edges().is_empty());
    }

    #[test]
    fn test_destroy_is_idempotent() {
        let mut navmesh = square();
        navmesh.destroy();
        navmesh.destroy();
        assert!(navmesh.is_empty());
        assert!(navmesh.bounds().is_empty());
    }

    #[test]
    fn test_closest_point_reports_edges() {
        let navmesh = square();
        let t = TriangleId::new(0);

        let (bary, edge) = navmesh.closest_point_on_triangle(&Point3::new(0.2, 0.2, 0.0), t);
        assert!(edge.is_none());
        assert_relative_eq!(bary, Vector3::new(0.6, 0.2, 0.2), epsilon = 1e-12);

        // Beyond the diagonal: lands on edge bc, which is edge.next
        let (_, edge) = navmesh.closest_point_on_triangle(&Point3::new(0.8, 0.8, 0.0), t);
        assert_eq!(edge, Some(HalfEdgeId::new(1)));

        // Beyond corner c: edge.previous
        let (bary, edge) = navmesh.closest_point_on_triangle(&Point3::new(-0.5, 2.0, 0.0), t);
        assert_eq!(edge, Some(HalfEdgeId::new(2)));
        assert_eq!(bary, Vector3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_coordinate_round_trip() {
        let navmesh = fold();
        let t = TriangleId::new(1);
        let bary = Vector3::new(0.2, 0.5, 0.3);
        let p = navmesh.to_cartesian(t, &bary);
        assert_relative_eq!(navmesh.to_barycentric(t, &p), bary, epsilon = 1e-12);
    }

    #[test]
    fn test_vertex_normal_on_boundary() {
        let navmesh = fold();
        // Vertex 0 touches both faces of the fold
        let n = navmesh.vertex_normal(VertexId::new(0));
        let expected = (Vector3::z() - Vector3::y()).normalize();
        assert_relative_eq!(n, expected, epsilon = 1e-12);

        // Vertex 2 only touches the flat face
        assert_relative_eq!(navmesh.vertex_normal(VertexId::new(2)), Vector3::z(), epsilon = 1e-12);
    }

    #[test]
    fn test_ray_queries() {
        let navmesh = square();
        let down = Ray::new(Point3::new(0.75, 0.75, 1.0), -Vector3::z());

        let facing = navmesh.intersects(&down).unwrap();
        let front = facing.front.unwrap();
        assert_eq!(front.triangle, TriangleId::new(1));
        assert_relative_eq!(front.t, 1.0, epsilon = 1e-12);
        assert!(facing.back.is_none());

        let up = Ray::new(Point3::new(0.25, 0.25, -1.0), Vector3::z());
        let facing = navmesh.intersects(&up).unwrap();
        assert!(facing.front.is_none());
        assert_eq!(facing.back.unwrap().triangle, TriangleId::new(0));

        let miss = Ray::new(Point3::new(3.0, 3.0, 1.0), -Vector3::z());
        assert!(navmesh.intersects(&miss).is_none());
    }

    #[test]
    fn test_octree_queries() {
        let navmesh = fold();
        let octree = navmesh.create_octree(4);
        assert_eq!(octree.len(), 2);

        let down = Ray::new(Point3::new(0.5, -0.5, 2.0), -Vector3::z());
        let hit = navmesh.ray_cast(&octree, &down).unwrap();
        assert_eq!(hit.triangle, TriangleId::new(0));
        assert_relative_eq!(hit.t, 2.0, epsilon = 1e-12);
        assert_relative_eq!(navmesh.to_cartesian(hit.triangle, &hit.barycentric), Point3::new(0.5, -0.5, 0.0), epsilon = 1e-12);

        let region = Aabb::new(Point3::new(0.4, -0.1, 0.5), Point3::new(0.6, 0.1, 0.9));
        assert_eq!(navmesh.triangles_in(&octree, &region), vec![TriangleId::new(1)]);
    }
}
