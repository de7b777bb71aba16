//! Closest point on a triangle.
//!
//! Classifies a query point against the seven Voronoi regions of a triangle
//! (three vertex regions, three edge regions, the interior) following the
//! `dtClosestPtPointTriangle` routine from Recast/Detour (zlib license). The
//! region tests run in a fixed order and use non-strict comparisons, so a
//! point on the border between two regions resolves to the earlier one.

use nalgebra::{Point3, Vector3};

/// Region of a triangle containing the closest point to a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangleRegion {
    /// Closest to vertex `a`.
    VertexA,
    /// Closest to vertex `b`.
    VertexB,
    /// Closest to a point on edge `ab`.
    EdgeAB,
    /// Closest to vertex `c`.
    VertexC,
    /// Closest to a point on edge `ac`.
    EdgeAC,
    /// Closest to a point on edge `bc`.
    EdgeBC,
    /// The query projects into the triangle's interior.
    Interior,
}

impl TriangleRegion {
    /// Position in the triangle's edge ring (`0` = `ab`, `1` = `bc`, `2` = `ca`)
    /// of the edge the region lies on, or `None` for the interior.
    ///
    /// Vertex regions report the edge leaving that vertex.
    pub fn ring_slot(self) -> Option<usize> {
        match self {
            TriangleRegion::VertexA | TriangleRegion::EdgeAB => Some(0),
            TriangleRegion::VertexB | TriangleRegion::EdgeBC => Some(1),
            TriangleRegion::VertexC | TriangleRegion::EdgeAC => Some(2),
            TriangleRegion::Interior => None,
        }
    }

    /// Whether the closest point lies on the triangle's boundary.
    pub fn is_boundary(self) -> bool {
        self != TriangleRegion::Interior
    }
}

/// Result of [`closest_point_on_triangle`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPoint {
    /// Barycentric coordinates of the closest point.
    pub barycentric: Vector3<f64>,
    /// Region the closest point was found in.
    pub region: TriangleRegion,
}

impl ClosestPoint {
    fn new(u: f64, v: f64, w: f64, region: TriangleRegion) -> Self {
        Self {
            barycentric: Vector3::new(u, v, w),
            region,
        }
    }
}

/// Find the point on triangle `abc` closest to `p`.
pub fn closest_point_on_triangle(
    p: &Point3<f64>,
    a: &Point3<f64>,
    b: &Point3<f64>,
    c: &Point3<f64>,
) -> ClosestPoint {
    let ab = b - a;
    let ac = c - a;

    // Vertex region outside A
    let ap = p - a;
    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return ClosestPoint::new(1.0, 0.0, 0.0, TriangleRegion::VertexA);
    }

    // Vertex region outside B
    let bp = p - b;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= 0.0 && d4 <= d3 {
        return ClosestPoint::new(0.0, 1.0, 0.0, TriangleRegion::VertexB);
    }

    // Edge region AB
    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return ClosestPoint::new(1.0 - v, v, 0.0, TriangleRegion::EdgeAB);
    }

    // Vertex region outside C
    let cp = p - c;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= 0.0 && d5 <= d6 {
        return ClosestPoint::new(0.0, 0.0, 1.0, TriangleRegion::VertexC);
    }

    // Edge region AC
    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return ClosestPoint::new(1.0 - w, 0.0, w, TriangleRegion::EdgeAC);
    }

    // Edge region BC
    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return ClosestPoint::new(0.0, 1.0 - w, w, TriangleRegion::EdgeBC);
    }

    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    ClosestPoint::new(1.0 - v - w, v, w, TriangleRegion::Interior)
}
