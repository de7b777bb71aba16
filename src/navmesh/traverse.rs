//! Sliding traversal across a navmesh.
//!
//! A traversal moves a point along a velocity vector over the surface. Within
//! a triangle the point moves in a straight line and is clamped to the
//! triangle by closest-point projection. When it stops on an edge that has a
//! twin, the walk continues in the neighbouring triangle with the remaining
//! velocity rotated into that triangle's plane.
//!
//! The walk ends when:
//! - the target lies inside the current triangle,
//! - the point stops on a boundary edge,
//! - the velocity budget is used up, or
//! - the next triangle was already visited during this call.
//!
//! A step may have zero length, for example when the point sits on a vertex
//! and the neighbouring triangle also clamps it to that vertex. Such steps
//! keep crossing; the visited check bounds the walk.

use log::trace;
use nalgebra::{Point3, Vector3};
use rayon::prelude::*;

use super::{Navmesh, TriangleId};
use crate::geometry::{normalize_barycentric, rotation_between};
use crate::mesh::HalfEdgeId;

/// One straight segment of a traversal, inside a single triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Triangle the segment lies in.
    pub triangle: TriangleId,
    /// Barycentric start position.
    pub start: Vector3<f64>,
    /// Barycentric end position.
    pub end: Vector3<f64>,
    /// Edge the end position lies on, or `None` when it is inside the triangle.
    pub edge: Option<HalfEdgeId>,
}

/// Why a traversal stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The target was reached inside a triangle.
    Arrived,
    /// The full velocity length was travelled while crossing edges.
    DistanceExhausted,
    /// The point stopped on an edge with no neighbouring triangle.
    Blocked,
    /// The next triangle had already been visited.
    Cycle,
}

/// Tuning for [`Navmesh::traverse_with`].
#[derive(Debug, Clone)]
pub struct TraverseOptions {
    /// A walk this close to the full velocity length counts as complete.
    pub distance_epsilon: f64,

    /// Whether batch traversal runs in parallel (default: true).
    pub parallel: bool,
}

impl Default for TraverseOptions {
    fn default() -> Self {
        Self {
            distance_epsilon: 1e-9,
            parallel: true,
        }
    }
}

impl TraverseOptions {
    /// Set the distance epsilon.
    pub fn with_distance_epsilon(mut self, epsilon: f64) -> Self {
        self.distance_epsilon = epsilon;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run batches sequentially.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

/// The result of one traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct Traversal {
    /// Every step taken, in order. Never empty.
    pub steps: Vec<Step>,
    /// Why the walk stopped.
    pub termination: Termination,
    /// Total cartesian length travelled.
    pub distance: f64,
}

impl Traversal {
    /// Triangle and barycentric position where the walk ended.
    pub fn destination(&self) -> Option<(TriangleId, Vector3<f64>)> {
        self.steps.last().map(|s| (s.triangle, s.end))
    }

    /// The boundary edge that stopped the walk, if it was blocked.
    pub fn blocking_edge(&self) -> Option<HalfEdgeId> {
        match self.termination {
            Termination::Blocked => self.steps.last().and_then(|s| s.edge),
            _ => None,
        }
    }
}

/// One request for [`Navmesh::traverse_batch`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraverseRequest {
    /// Starting triangle.
    pub triangle: TriangleId,
    /// Barycentric starting position.
    pub position: Vector3<f64>,
    /// Velocity to travel along.
    pub velocity: Vector3<f64>,
}

/// A point anchored on a navmesh triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavPosition {
    /// Triangle the point lies on.
    pub triangle: TriangleId,
    /// Barycentric coordinates on that triangle.
    pub barycentric: Vector3<f64>,
}

impl NavPosition {
    /// Anchor a point on a triangle.
    pub fn new(triangle: TriangleId, barycentric: Vector3<f64>) -> Self {
        Self { triangle, barycentric }
    }

    /// Cartesian position.
    pub fn cartesian(&self, navmesh: &Navmesh) -> Point3<f64> {
        navmesh.to_cartesian(self.triangle, &self.barycentric)
    }

    /// Walk along `velocity` and re-anchor at the end of the walk.
    pub fn advance(&mut self, navmesh: &Navmesh, velocity: &Vector3<f64>, options: &TraverseOptions) -> Traversal {
        let traversal = navmesh.traverse_with(self.triangle, &self.barycentric, velocity, options);
        if let Some((triangle, barycentric)) = traversal.destination() {
            self.triangle = triangle;
            self.barycentric = barycentric;
        }
        traversal
    }
}

impl Navmesh {
    /// Slide from a barycentric position on `start` along `velocity`.
    ///
    /// Always returns at least one step. The caller tells arrival from a
    /// blocked walk by the last step's edge: `None` when the target was
    /// reached, a boundary edge when blocked.
    pub fn traverse(&self, start: TriangleId, position: &Vector3<f64>, velocity: &Vector3<f64>) -> Vec<Step> {
        self.traverse_with(start, position, velocity, &TraverseOptions::default())
            .steps
    }

    /// Like [`traverse`](Self::traverse), also reporting why the walk stopped.
    ///
    /// The walk ends as [`Termination::DistanceExhausted`] once the travelled
    /// length is within `options.distance_epsilon` of the velocity length and
    /// the point rests on a shared edge.
    pub fn traverse_with(
        &self,
        start: TriangleId,
        position: &Vector3<f64>,
        velocity: &Vector3<f64>,
        options: &TraverseOptions,
    ) -> Traversal {
        let max_distance = velocity.norm();
        let mut velocity = *velocity;
        let mut distance = 0.0;
        let mut steps: Vec<Step> = Vec::new();

        let mut triangle = start;
        let mut start_position = normalize_barycentric(position);

        let termination = loop {
            let cartesian_start = self.to_cartesian(triangle, &start_position);
            let target = cartesian_start + velocity;

            let (end, edge) = self.closest_point_on_triangle(&target, triangle);
            let end = normalize_barycentric(&end);
            steps.push(Step {
                triangle,
                start: start_position,
                end,
                edge,
            });

            let cartesian_end = self.to_cartesian(triangle, &end);
            let length = (cartesian_end - cartesian_start).norm();
            distance += length;

            let Some(edge) = edge else {
                break Termination::Arrived;
            };
            let Some(twin) = self.edge(edge).symmetric else {
                break Termination::Blocked;
            };
            if distance >= max_distance - options.distance_epsilon {
                break Termination::DistanceExhausted;
            }

            let next = self.edge(twin).triangle;
            let rotation = rotation_between(&self.triangle(triangle).normal, &self.triangle(next).normal);
            let remaining = max_distance - distance;
            velocity = (rotation * velocity)
                .try_normalize(0.0)
                .map_or_else(Vector3::zeros, |direction| direction * remaining);

            if steps.iter().any(|s| s.triangle == next) {
                break Termination::Cycle;
            }

            start_position = normalize_barycentric(&self.to_barycentric(next, &cartesian_end));
            triangle = next;
        };

        trace!(
            "traversal from {:?} stopped after {} steps ({:?}, {:.6} of {:.6})",
            start,
            steps.len(),
            termination,
            distance,
            max_distance
        );

        Traversal {
            steps,
            termination,
            distance,
        }
    }

    /// Run many independent traversals.
    ///
    /// Results are returned in request order.
    pub fn traverse_batch(&self, requests: &[TraverseRequest], options: &TraverseOptions) -> Vec<Traversal> {
        let run = |r: &TraverseRequest| self.traverse_with(r.triangle, &r.position, &r.velocity, options);
        if options.parallel {
            requests.par_iter().map(run).collect()
        } else {
            requests.iter().map(run).collect()
        }
    }
}
