//! Mutable half-edge mesh.
//!
//! A general polygon mesh stored as a doubly-connected edge list. Unlike a
//! mesh built in one pass from a face list, this structure supports adding and
//! removing vertices, edges and faces one at a time while keeping the edge
//! rings around every vertex consistent.
//!
//! # Structure
//!
//! - Every edge is a pair of **half-edges** stored at indices `2e` and `2e + 1`;
//!   each is the other's **symmetric** twin.
//! - Each half-edge knows its origin vertex, the face it borders (if any), and
//!   the `previous`/`next` half-edges of the loop it belongs to.
//! - A half-edge that borders no face still lives in a loop: the free loops
//!   are what edge and face insertion splice into.
//!
//! # Storage
//!
//! Elements are kept dense. Removing an element erases it from its vector and
//! shifts every reference to later elements down, so indices are always
//! `0..count` with no gaps.

use nalgebra::Point3;

use super::index::{EdgeId, FaceId, HalfEdgeId, VertexId};
use crate::error::{MeshError, Result};

/// A half-edge with its `next` and `previous` links before a splice.
type SavedLinks = (HalfEdgeId, HalfEdgeId, HalfEdgeId);

/// A vertex in the half-edge mesh.
#[derive(Debug, Clone)]
pub struct Vertex {
    /// The 3D position of this vertex.
    pub position: Point3<f64>,

    /// One outgoing half-edge, or `None` for an isolated vertex.
    pub edge: Option<HalfEdgeId>,

    /// User flags.
    pub flags: u8,
}

/// A half-edge in the mesh.
#[derive(Debug, Clone, Copy)]
pub struct HalfEdge {
    /// The vertex this half-edge starts at.
    pub vertex: VertexId,

    /// The face this half-edge borders, or `None` if it is free.
    pub face: Option<FaceId>,

    /// The previous half-edge in this half-edge's loop.
    pub previous: HalfEdgeId,

    /// The next half-edge in this half-edge's loop.
    pub next: HalfEdgeId,

    /// User flags.
    pub flags: u8,
}

/// A face in the half-edge mesh.
#[derive(Debug, Clone, Copy)]
pub struct Face {
    /// First half-edge of the face loop.
    pub edge: HalfEdgeId,

    /// User flags.
    pub flags: u8,
}

/// A mutable half-edge mesh of arbitrary polygons.
#[derive(Debug, Clone, Default)]
pub struct HalfEdgeMesh {
    vertices: Vec<Vertex>,
    halfedges: Vec<HalfEdge>,
    faces: Vec<Face>,
}

impl HalfEdgeMesh {
    /// Create a new empty mesh.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with pre-allocated capacity.
    pub fn with_capacity(num_vertices: usize, num_edges: usize, num_faces: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(num_vertices),
            halfedges: Vec::with_capacity(num_edges * 2),
            faces: Vec::with_capacity(num_faces),
        }
    }

    /// Build a mesh from polygon index lists.
    ///
    /// Edges shared between polygons are created once and reused, so the
    /// polygons must be consistently oriented.
    ///
    /// # Example
    /// ```
    /// use trailmesh::mesh::HalfEdgeMesh;
    /// use nalgebra::Point3;
    ///
    /// let positions = [
    ///     Point3::new(0.0, 0.0, 0.0),
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(1.0, 1.0, 0.0),
    ///     Point3::new(0.0, 1.0, 0.0),
    /// ];
    /// let mesh = HalfEdgeMesh::from_polygons(&positions, &[vec![0, 1, 2, 3]]).unwrap();
    /// assert_eq!(mesh.num_edges(), 4);
    /// assert_eq!(mesh.num_faces(), 1);
    /// ```
    pub fn from_polygons(positions: &[Point3<f64>], polygons: &[Vec<usize>]) -> Result<Self> {
        let mut mesh = Self::with_capacity(positions.len(), positions.len() * 3, polygons.len());
        for &p in positions {
            mesh.add_vertex(p);
        }

        let mut directed = std::collections::HashMap::new();
        for (pi, polygon) in polygons.iter().enumerate() {
            let mut lp = Vec::with_capacity(polygon.len());
            for (k, &a) in polygon.iter().enumerate() {
                let b = polygon[(k + 1) % polygon.len()];
                for &v in &[a, b] {
                    if v >= positions.len() {
                        return Err(MeshError::InvalidVertexIndex {
                            triangle: pi,
                            vertex: v,
                        });
                    }
                }

                let he = match directed.get(&(a, b)) {
                    Some(&he) => he,
                    None => {
                        let ab = mesh.add_edge(VertexId::new(a), VertexId::new(b))?;
                        directed.insert((a, b), ab);
                        directed.insert((b, a), ab.paired());
                        ab
                    }
                };
                lp.push(he);
            }
            mesh.add_face(&lp)?;
        }

        Ok(mesh)
    }

    // ==================== Accessors ====================

    /// Get the number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of half-edges.
    #[inline]
    pub fn num_halfedges(&self) -> usize {
        self.halfedges.len()
    }

    /// Get the number of full edges.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.halfedges.len() / 2
    }

    /// Get the number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Get a vertex by ID.
    #[inline]
    pub fn vertex(&self, id: VertexId) -> &Vertex {
        &self.vertices[id.index()]
    }

    /// Get a half-edge by ID.
    #[inline]
    pub fn halfedge(&self, id: HalfEdgeId) -> &HalfEdge {
        &self.halfedges[id.index()]
    }

    /// Get a face by ID.
    #[inline]
    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id.index()]
    }

    /// Get the position of a vertex.
    #[inline]
    pub fn position(&self, v: VertexId) -> &Point3<f64> {
        &self.vertex(v).position
    }

    /// Set the position of a vertex.
    #[inline]
    pub fn set_position(&mut self, v: VertexId, pos: Point3<f64>) {
        self.vertices[v.index()].position = pos;
    }

    /// Set the flags of a vertex.
    pub fn set_vertex_flags(&mut self, v: VertexId, flags: u8) {
        self.vertices[v.index()].flags = flags;
    }

    /// Set the flags of a half-edge.
    pub fn set_halfedge_flags(&mut self, he: HalfEdgeId, flags: u8) {
        self.halfedges[he.index()].flags = flags;
    }

    /// Set the flags of a face.
    pub fn set_face_flags(&mut self, f: FaceId, flags: u8) {
        self.faces[f.index()].flags = flags;
    }

    // ==================== Topology Queries ====================

    /// Get the symmetric (twin) half-edge.
    #[inline]
    pub fn symmetric(&self, he: HalfEdgeId) -> HalfEdgeId {
        he.paired()
    }

    /// Get the next half-edge in the loop.
    #[inline]
    pub fn next(&self, he: HalfEdgeId) -> HalfEdgeId {
        self.halfedge(he).next
    }

    /// Get the previous half-edge in the loop.
    #[inline]
    pub fn previous(&self, he: HalfEdgeId) -> HalfEdgeId {
        self.halfedge(he).previous
    }

    /// Get the origin vertex of a half-edge.
    #[inline]
    pub fn origin(&self, he: HalfEdgeId) -> VertexId {
        self.halfedge(he).vertex
    }

    /// Get the destination vertex of a half-edge.
    #[inline]
    pub fn destination(&self, he: HalfEdgeId) -> VertexId {
        self.origin(he.paired())
    }

    /// Get the face a half-edge borders.
    #[inline]
    pub fn face_of(&self, he: HalfEdgeId) -> Option<FaceId> {
        self.halfedge(he).face
    }

    /// Check whether an edge is on the mesh boundary (borders at most one face).
    pub fn is_boundary_edge(&self, e: EdgeId) -> bool {
        let [ab, ba] = e.halfedges();
        self.face_of(ab).is_none() || self.face_of(ba).is_none()
    }

    // ==================== Iteration ====================

    /// Iterate over all vertex IDs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        (0..self.vertices.len()).map(VertexId::new)
    }

    /// Iterate over all half-edge IDs.
    pub fn halfedge_ids(&self) -> impl Iterator<Item = HalfEdgeId> + '_ {
        (0..self.halfedges.len()).map(HalfEdgeId::new)
    }

    /// Iterate over all edge IDs.
    pub fn edge_ids(&self) -> impl Iterator<Item = EdgeId> + '_ {
        (0..self.num_edges()).map(EdgeId::new)
    }

    /// Iterate over all face IDs.
    pub fn face_ids(&self) -> impl Iterator<Item = FaceId> + '_ {
        (0..self.faces.len()).map(FaceId::new)
    }

    /// Iterate over the half-edges of a face loop.
    pub fn face_halfedges(&self, f: FaceId) -> LoopIter<'_> {
        LoopIter::new(self, self.face(f).edge)
    }

    /// Iterate over the vertices of a face.
    pub fn face_vertices(&self, f: FaceId) -> impl Iterator<Item = VertexId> + '_ {
        self.face_halfedges(f).map(|he| self.origin(he))
    }

    /// Iterate over the outgoing half-edges of a vertex.
    pub fn vertex_halfedges(&self, v: VertexId) -> RingIter<'_> {
        RingIter::new(self, self.vertex(v).edge)
    }

    /// Iterate over the faces around a vertex.
    pub fn vertex_faces(&self, v: VertexId) -> impl Iterator<Item = FaceId> + '_ {
        self.vertex_halfedges(v).filter_map(|he| self.face_of(he))
    }

    /// Number of edges incident to a vertex.
    pub fn valence(&self, v: VertexId) -> usize {
        self.vertex_halfedges(v).count()
    }

    // ==================== Construction ====================

    /// Add a new isolated vertex and return its ID.
    pub fn add_vertex(&mut self, position: Point3<f64>) -> VertexId {
        let id = VertexId::new(self.vertices.len());
        self.vertices.push(Vertex {
            position,
            edge: None,
            flags: 0,
        });
        id
    }

    /// Add an edge between two vertices and return the half-edge `a -> b`.
    ///
    /// The new pair is spliced into each endpoint's ring next to a free
    /// incoming half-edge. Loops are not checked here; [`Self::add_face`]
    /// rejects malformed ones.
    pub fn add_edge(&mut self, a: VertexId, b: VertexId) -> Result<HalfEdgeId> {
        if a == b {
            return Err(MeshError::DegenerateEdge { vertex: a });
        }

        let ab = HalfEdgeId::new(self.halfedges.len());
        let ba = ab.paired();

        let a_in = match self.vertex(a).edge {
            Some(_) => Some(
                self.find_free_incident(a)
                    .ok_or(MeshError::AdjacencyConflict { edge: ab })?,
            ),
            None => None,
        };
        let b_in = match self.vertex(b).edge {
            Some(_) => Some(
                self.find_free_incident(b)
                    .ok_or(MeshError::AdjacencyConflict { edge: ba })?,
            ),
            None => None,
        };

        // A fresh pair forms its own two-edge loop
        self.halfedges.push(HalfEdge {
            vertex: a,
            face: None,
            previous: ba,
            next: ba,
            flags: 0,
        });
        self.halfedges.push(HalfEdge {
            vertex: b,
            face: None,
            previous: ab,
            next: ab,
            flags: 0,
        });

        match a_in {
            None => self.vertices[a.index()].edge = Some(ab),
            Some(a_in) => {
                let a_out = self.next(a_in);
                self.link(a_in, ab);
                self.link(ba, a_out);
            }
        }

        match b_in {
            None => self.vertices[b.index()].edge = Some(ba),
            Some(b_in) => {
                let b_out = self.next(b_in);
                self.link(b_in, ba);
                self.link(ab, b_out);
            }
        }

        Ok(ab)
    }

    /// Add a face bounded by a closed loop of free half-edges.
    ///
    /// The loop must be ordered so that each half-edge ends where the next
    /// one starts, and no half-edge in it may already border a face. On
    /// error the mesh is left exactly as it was.
    pub fn add_face(&mut self, lp: &[HalfEdgeId]) -> Result<FaceId> {
        if lp.is_empty() {
            return Err(MeshError::EmptyLoop);
        }

        for (i, &current) in lp.iter().enumerate() {
            let next = lp[(i + 1) % lp.len()];
            if self.destination(current) != self.origin(next) {
                return Err(MeshError::DisconnectedLoop { edge: current });
            }
            if let Some(face) = self.face_of(current) {
                return Err(MeshError::EdgeAlreadyOwnsFace {
                    edge: current,
                    face,
                });
            }
        }

        let mut saved = Vec::new();
        for i in 0..lp.len() {
            let (inbound, outbound) = (lp[i], lp[(i + 1) % lp.len()]);
            if !self.splice_adjacent(inbound, outbound, &mut saved) {
                self.restore_links(&saved);
                return Err(MeshError::AdjacencyConflict { edge: inbound });
            }
        }

        let face = FaceId::new(self.faces.len());
        self.faces.push(Face {
            edge: lp[0],
            flags: 0,
        });
        for &he in lp {
            self.halfedges[he.index()].face = Some(face);
        }

        Ok(face)
    }

    /// Remove a face. Its half-edges survive as free half-edges.
    pub fn remove_face(&mut self, f: FaceId) {
        let start = self.face(f).edge;
        let mut he = start;
        loop {
            self.halfedges[he.index()].face = None;
            he = self.next(he);
            if he == start {
                break;
            }
        }

        self.faces.remove(f.index());
        for edge in &mut self.halfedges {
            if let Some(face) = edge.face {
                if face > f {
                    edge.face = Some(face.shifted_down(1));
                }
            }
        }
    }

    /// Remove an edge (both half-edges), first removing any faces it borders.
    pub fn remove_edge(&mut self, he: HalfEdgeId) {
        let (ab, ba) = (he, he.paired());

        if let Some(f) = self.face_of(ab) {
            self.remove_face(f);
        }
        // Face handles shifted; read the twin's face afresh
        if let Some(f) = self.face_of(ba) {
            self.remove_face(f);
        }

        let a = self.origin(ab);
        let b = self.origin(ba);
        let a_in = self.previous(ab);
        let a_out = self.next(ba);
        let b_in = self.previous(ba);
        let b_out = self.next(ab);

        if self.vertex(a).edge == Some(ab) {
            self.vertices[a.index()].edge = if a_out == ab { None } else { Some(a_out) };
        }
        if self.vertex(b).edge == Some(ba) {
            self.vertices[b.index()].edge = if b_out == ba { None } else { Some(b_out) };
        }
        self.link(a_in, a_out);
        self.link(b_in, b_out);

        let first = ab.edge().halfedges()[0];
        self.halfedges.drain(first.index()..first.index() + 2);

        let shift = |h: HalfEdgeId| {
            if h.index() > first.index() + 1 {
                h.shifted_down(2)
            } else {
                h
            }
        };
        for edge in &mut self.halfedges {
            edge.next = shift(edge.next);
            edge.previous = shift(edge.previous);
        }
        for vertex in &mut self.vertices {
            vertex.edge = vertex.edge.map(shift);
        }
        for face in &mut self.faces {
            face.edge = shift(face.edge);
        }
    }

    /// Remove a vertex together with every edge and face touching it.
    pub fn remove_vertex(&mut self, v: VertexId) {
        while let Some(he) = self.vertex(v).edge {
            self.remove_edge(he);
        }

        self.vertices.remove(v.index());
        for edge in &mut self.halfedges {
            if edge.vertex > v {
                edge.vertex = edge.vertex.shifted_down(1);
            }
        }
    }

    /// Reorder the rings around a vertex so that `inbound.next == outbound`.
    ///
    /// Returns `false`, leaving the mesh untouched, when no free half-edge is
    /// available to take the place of `outbound` in the ring.
    pub fn make_adjacent(&mut self, inbound: HalfEdgeId, outbound: HalfEdgeId) -> bool {
        self.splice_adjacent(inbound, outbound, &mut Vec::new())
    }

    /// [`Self::make_adjacent`], pushing the prior links of every half-edge
    /// it touches onto `saved`.
    fn splice_adjacent(&mut self, inbound: HalfEdgeId, outbound: HalfEdgeId, saved: &mut Vec<SavedLinks>) -> bool {
        if self.next(inbound) == outbound {
            return true;
        }

        let b = self.next(inbound);
        let d = self.previous(outbound);
        let g = match self.find_free_incident_between(outbound.paired(), inbound) {
            Some(g) => g,
            None => return false,
        };
        let h = self.next(g);

        for he in [inbound, outbound, b, d, g, h] {
            saved.push((he, self.next(he), self.previous(he)));
        }
        self.link(inbound, outbound);
        self.link(g, b);
        self.link(d, h);

        true
    }

    /// Find a free half-edge pointing into a vertex.
    pub fn find_free_incident(&self, v: VertexId) -> Option<HalfEdgeId> {
        let begin = self.vertex(v).edge?.paired();
        let mut current = begin;
        loop {
            if self.face_of(current).is_none() {
                return Some(current);
            }
            current = self.next(current).paired();
            if current == begin {
                return None;
            }
        }
    }

    /// Find a free incoming half-edge walking the ring from `start` up to,
    /// but not including, `end`.
    fn find_free_incident_between(&self, start: HalfEdgeId, end: HalfEdgeId) -> Option<HalfEdgeId> {
        if start == end {
            return None;
        }

        let mut current = start;
        loop {
            if self.face_of(current).is_none() {
                return Some(current);
            }
            current = self.next(current).paired();
            if current == end {
                return None;
            }
        }
    }

    /// Undo splices recorded by [`Self::splice_adjacent`], newest first.
    fn restore_links(&mut self, saved: &[SavedLinks]) {
        for &(he, next, previous) in saved.iter().rev() {
            let edge = &mut self.halfedges[he.index()];
            edge.next = next;
            edge.previous = previous;
        }
    }

    #[inline]
    fn link(&mut self, from: HalfEdgeId, to: HalfEdgeId) {
        self.halfedges[from.index()].next = to;
        self.halfedges[to.index()].previous = from;
    }

    // ==================== Validation ====================

    /// Check if the mesh is valid (all connectivity is consistent).
    pub fn is_valid(&self) -> bool {
        let nv = self.vertices.len();
        let nh = self.halfedges.len();
        let nf = self.faces.len();

        if nh % 2 != 0 {
            return false;
        }

        for (i, v) in self.vertices.iter().enumerate() {
            if let Some(he) = v.edge {
                if he.index() >= nh || self.origin(he).index() != i {
                    return false;
                }
            }
        }

        for (i, he) in self.halfedges.iter().enumerate() {
            let id = HalfEdgeId::new(i);
            if he.vertex.index() >= nv || he.next.index() >= nh || he.previous.index() >= nh {
                return false;
            }
            if self.previous(he.next) != id || self.next(he.previous) != id {
                return false;
            }
            // A loop continues at the far end of each half-edge
            if self.origin(he.next) != self.destination(id) {
                return false;
            }
            if let Some(f) = he.face {
                if f.index() >= nf || self.face_of(he.next) != Some(f) {
                    return false;
                }
            }
        }

        self.faces
            .iter()
            .enumerate()
            .all(|(i, f)| f.edge.index() < nh && self.face_of(f.edge) == Some(FaceId::new(i)))
    }
}

/// Iterator over the half-edges of a loop.
pub struct LoopIter<'a> {
    mesh: &'a HalfEdgeMesh,
    start: HalfEdgeId,
    current: HalfEdgeId,
    done: bool,
}

impl<'a> LoopIter<'a> {
    fn new(mesh: &'a HalfEdgeMesh, start: HalfEdgeId) -> Self {
        Self {
            mesh,
            start,
            current: start,
            done: false,
        }
    }
}

impl Iterator for LoopIter<'_> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = self.current;
        self.current = self.mesh.next(self.current);
        if self.current == self.start {
            self.done = true;
        }

        Some(result)
    }
}

/// Iterator over the outgoing half-edges around a vertex.
pub struct RingIter<'a> {
    mesh: &'a HalfEdgeMesh,
    start: Option<HalfEdgeId>,
    current: Option<HalfEdgeId>,
}

impl<'a> RingIter<'a> {
    fn new(mesh: &'a HalfEdgeMesh, start: Option<HalfEdgeId>) -> Self {
        Self {
            mesh,
            start,
            current: start,
        }
    }
}

impl Iterator for RingIter<'_> {
    type Item = HalfEdgeId;

    fn next(&mut self) -> Option<Self::Item> {
        let result = self.current?;

        // symmetric(he) points back into the vertex; its successor leaves it again
        let next = self.mesh.next(result.paired());
        self.current = if Some(next) == self.start { None } else { Some(next) };

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
        Point3::new(x, y, z)
    }

    /// Center vertex 0 surrounded by three triangles.
    fn fan() -> HalfEdgeMesh {
        let positions = [
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(-0.5, 1.0, 0.0),
            p(-0.5, -1.0, 0.0),
        ];
        let polygons = vec![vec![0, 1, 2], vec![0, 2, 3], vec![0, 3, 1]];
        HalfEdgeMesh::from_polygons(&positions, &polygons).unwrap()
    }

    fn assert_dense(mesh: &HalfEdgeMesh) {
        assert!(mesh.is_valid());
        for (i, v) in mesh.vertex_ids().enumerate() {
            assert_eq!(v.index(), i);
        }
        for (i, e) in mesh.edge_ids().enumerate() {
            assert_eq!(e.index(), i);
        }
        for (i, f) in mesh.face_ids().enumerate() {
            assert_eq!(f.index(), i);
        }
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = HalfEdgeMesh::new();
        assert_eq!(mesh.num_vertices(), 0);
        assert_eq!(mesh.num_halfedges(), 0);
        assert_eq!(mesh.num_faces(), 0);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_add_vertex() {
        let mut mesh = HalfEdgeMesh::new();
        let v0 = mesh.add_vertex(p(0.0, 0.0, 0.0));
        let v1 = mesh.add_vertex(p(1.0, 0.0, 0.0));

        assert_eq!(v0.index(), 0);
        assert_eq!(v1.index(), 1);
        assert!(mesh.vertex(v1).edge.is_none());
    }

    #[test]
    fn test_add_edge_creates_symmetric_pair() {
        let mut mesh = HalfEdgeMesh::new();
        let a = mesh.add_vertex(p(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(p(1.0, 0.0, 0.0));
        let ab = mesh.add_edge(a, b).unwrap();
        let ba = mesh.symmetric(ab);

        assert_eq!(mesh.symmetric(ba), ab);
        assert_eq!(mesh.origin(ab), a);
        assert_eq!(mesh.destination(ab), b);
        assert_eq!(mesh.vertex(a).edge, Some(ab));
        assert_eq!(mesh.vertex(b).edge, Some(ba));
        assert_eq!(mesh.num_edges(), 1);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_degenerate_edge_rejected() {
        let mut mesh = HalfEdgeMesh::new();
        let a = mesh.add_vertex(p(0.0, 0.0, 0.0));
        assert!(matches!(
            mesh.add_edge(a, a),
            Err(MeshError::DegenerateEdge { .. })
        ));
        assert_eq!(mesh.num_halfedges(), 0);
    }

    #[test]
    fn test_add_triangle_by_hand() {
        let mut mesh = HalfEdgeMesh::new();
        let a = mesh.add_vertex(p(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(p(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(p(0.0, 1.0, 0.0));
        let ab = mesh.add_edge(a, b).unwrap();
        let bc = mesh.add_edge(b, c).unwrap();
        let ca = mesh.add_edge(c, a).unwrap();

        let f = mesh.add_face(&[ab, bc, ca]).unwrap();
        assert_eq!(mesh.next(ab), bc);
        assert_eq!(mesh.next(bc), ca);
        assert_eq!(mesh.next(ca), ab);
        assert_eq!(mesh.next(mesh.next(mesh.next(ab))), ab);
        assert_eq!(mesh.face_vertices(f).collect::<Vec<_>>(), vec![a, b, c]);

        // The outer loop stays free
        let outer: Vec<_> = mesh.face_halfedges(f).map(|he| mesh.symmetric(he)).collect();
        assert!(outer.iter().all(|&he| mesh.face_of(he).is_none()));
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_add_face_disconnected_loop() {
        let mut mesh = HalfEdgeMesh::new();
        let a = mesh.add_vertex(p(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(p(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(p(0.0, 1.0, 0.0));
        let ab = mesh.add_edge(a, b).unwrap();
        let bc = mesh.add_edge(b, c).unwrap();
        let ac = mesh.add_edge(a, c).unwrap();

        // a->c does not close b->c back to a
        assert!(matches!(
            mesh.add_face(&[ab, bc, ac]),
            Err(MeshError::DisconnectedLoop { .. })
        ));
        assert!(matches!(mesh.add_face(&[]), Err(MeshError::EmptyLoop)));
        assert_eq!(mesh.num_faces(), 0);
    }

    #[test]
    fn test_add_face_twice_rejected() {
        let mut mesh = HalfEdgeMesh::new();
        let a = mesh.add_vertex(p(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(p(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(p(0.0, 1.0, 0.0));
        let ab = mesh.add_edge(a, b).unwrap();
        let bc = mesh.add_edge(b, c).unwrap();
        let ca = mesh.add_edge(c, a).unwrap();
        mesh.add_face(&[ab, bc, ca]).unwrap();

        assert!(matches!(
            mesh.add_face(&[ab, bc, ca]),
            Err(MeshError::EdgeAlreadyOwnsFace { .. })
        ));
        assert_eq!(mesh.num_faces(), 1);
    }

    #[test]
    fn test_failed_add_face_leaves_rings_untouched() {
        let mut mesh = HalfEdgeMesh::new();
        let v: Vec<VertexId> = (0..7).map(|i| mesh.add_vertex(p(i as f64, 0.0, 0.0))).collect();

        let e01 = mesh.add_edge(v[0], v[1]).unwrap();
        let e02 = mesh.add_edge(v[0], v[2]).unwrap();
        let e12 = mesh.add_edge(v[1], v[2]).unwrap();
        mesh.add_face(&[e01, e12, e02.paired()]).unwrap();

        let e03 = mesh.add_edge(v[0], v[3]).unwrap();
        let e04 = mesh.add_edge(v[0], v[4]).unwrap();
        let e34 = mesh.add_edge(v[3], v[4]).unwrap();
        mesh.add_face(&[e03, e34, e04.paired()]).unwrap();

        let e45 = mesh.add_edge(v[4], v[5]).unwrap();
        let e53 = mesh.add_edge(v[5], v[3]).unwrap();
        let e46 = mesh.add_edge(v[4], v[6]).unwrap();
        assert_eq!(mesh.next(e04), e46);

        // The splice at vertex 4 succeeds; vertex 0 has no free gap left
        let links = |mesh: &HalfEdgeMesh| -> Vec<_> {
            mesh.halfedge_ids().map(|h| (mesh.next(h), mesh.previous(h))).collect()
        };
        let before = links(&mesh);
        let result = mesh.add_face(&[e04, e45, e53, e03.paired()]);

        assert!(matches!(result, Err(MeshError::AdjacencyConflict { edge }) if edge == e03.paired()));
        assert_eq!(links(&mesh), before);
        assert_eq!(mesh.num_faces(), 2);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_fan_construction() {
        let mesh = fan();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_edges(), 6);
        assert_eq!(mesh.num_faces(), 3);
        assert_eq!(mesh.valence(VertexId::new(0)), 3);
        assert_eq!(mesh.vertex_faces(VertexId::new(0)).count(), 3);
        assert_eq!(mesh.edge_ids().filter(|&e| mesh.is_boundary_edge(e)).count(), 3);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_remove_face_keeps_edges() {
        let mut mesh = fan();
        mesh.remove_face(FaceId::new(0));

        assert_eq!(mesh.num_faces(), 2);
        assert_eq!(mesh.num_edges(), 6);
        assert_dense(&mesh);
        for f in mesh.face_ids() {
            let he = mesh.face(f).edge;
            assert_eq!(mesh.face_of(he), Some(f));
        }
    }

    #[test]
    fn test_remove_edge_cascades_to_faces() {
        let mut mesh = fan();
        // Spoke 0 -> 1 borders two of the three triangles
        let spoke = mesh
            .vertex_halfedges(VertexId::new(0))
            .find(|&he| mesh.destination(he) == VertexId::new(1))
            .unwrap();
        mesh.remove_edge(spoke);

        assert_eq!(mesh.num_edges(), 5);
        assert_eq!(mesh.num_faces(), 1);
        assert_dense(&mesh);
    }

    #[test]
    fn test_remove_vertex_cascades() {
        let mut mesh = fan();
        mesh.remove_vertex(VertexId::new(0));

        assert_eq!(mesh.num_vertices(), 3);
        assert_eq!(mesh.num_edges(), 3);
        assert_eq!(mesh.num_faces(), 0);
        assert_dense(&mesh);

        // The former rim is now a pair of free triangular loops
        let he = HalfEdgeId::new(0);
        assert_eq!(mesh.next(mesh.next(mesh.next(he))), he);
        assert_eq!(mesh.origin(he).index(), 0);
    }

    #[test]
    fn test_remove_isolated_vertex_shifts_indices() {
        let mut mesh = HalfEdgeMesh::new();
        let a = mesh.add_vertex(p(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(p(1.0, 0.0, 0.0));
        let c = mesh.add_vertex(p(2.0, 0.0, 0.0));
        let bc = mesh.add_edge(b, c).unwrap();

        mesh.remove_vertex(a);
        assert_eq!(mesh.num_vertices(), 2);
        assert_eq!(mesh.origin(bc).index(), 0);
        assert_eq!(mesh.destination(bc).index(), 1);
        assert_eq!(*mesh.position(VertexId::new(1)), p(2.0, 0.0, 0.0));
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_quad_polygon() {
        let positions = [
            p(0.0, 0.0, 0.0),
            p(1.0, 0.0, 0.0),
            p(1.0, 1.0, 0.0),
            p(0.0, 1.0, 0.0),
        ];
        let mesh = HalfEdgeMesh::from_polygons(&positions, &[vec![0, 1, 2, 3]]).unwrap();
        assert_eq!(mesh.face_halfedges(FaceId::new(0)).count(), 4);
        assert!(mesh.is_valid());
    }
}
