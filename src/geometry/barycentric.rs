//! Barycentric coordinates.
//!
//! A barycentric point `(u, v, w)` weights the vertices `a`, `b`, `c` of a
//! triangle; a valid point inside the triangle has non-negative components
//! summing to one.

use nalgebra::{Point3, Vector3};

/// Compute the barycentric coordinates of `p` with respect to triangle `abc`.
///
/// Points off the triangle's plane are projected onto it.
pub fn barycentric(p: &Point3<f64>, a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Vector3<f64> {
    let v0 = b - a;
    let v1 = c - a;
    let v2 = p - a;

    let d00 = v0.dot(&v0);
    let d01 = v0.dot(&v1);
    let d11 = v1.dot(&v1);
    let d20 = v2.dot(&v0);
    let d21 = v2.dot(&v1);
    let denom = d00 * d11 - d01 * d01;

    let v = (d11 * d20 - d01 * d21) / denom;
    let w = (d00 * d21 - d01 * d20) / denom;
    Vector3::new(1.0 - v - w, v, w)
}

/// Compute the cartesian point for barycentric coordinates over triangle `abc`.
#[inline]
pub fn cartesian(bary: &Vector3<f64>, a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Point3<f64> {
    Point3::from(a.coords * bary.x + b.coords * bary.y + c.coords * bary.z)
}

/// Clamp barycentric coordinates into the triangle and rescale them to sum to one.
///
/// Repeated conversions between cartesian and barycentric space drift
/// slightly off the triangle; this pulls the point back. A point with no
/// positive weight collapses to the centroid.
pub fn normalize_barycentric(bary: &Vector3<f64>) -> Vector3<f64> {
    let clamped = bary.map(|x| if x > 0.0 { x } else { 0.0 });
    let sum = clamped.x + clamped.y + clamped.z;
    if sum > 0.0 && sum.is_finite() {
        clamped / sum
    } else {
        Vector3::repeat(1.0 / 3.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn triangle() -> [Point3<f64>; 3] {
        [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 1.0),
        ]
    }

    #[test]
    fn test_vertices_map_to_unit_weights() {
        let [a, b, c] = triangle();
        assert_relative_eq!(barycentric(&a, &a, &b, &c), Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(barycentric(&b, &a, &b, &c), Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(barycentric(&c, &a, &b, &c), Vector3::new(0.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn test_round_trip_inside_triangle() {
        let [a, b, c] = triangle();
        for bary in [
            Vector3::new(0.2, 0.3, 0.5),
            Vector3::new(0.9, 0.05, 0.05),
            Vector3::new(1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0),
        ] {
            let p = cartesian(&bary, &a, &b, &c);
            assert_relative_eq!(barycentric(&p, &a, &b, &c), bary, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_normalize_clamps_and_rescales() {
        let n = normalize_barycentric(&Vector3::new(0.5, 0.5, -0.1));
        assert_relative_eq!(n, Vector3::new(0.5, 0.5, 0.0), epsilon = 1e-12);

        let n = normalize_barycentric(&Vector3::new(0.33, 0.33, 0.33));
        assert_relative_eq!(n.sum(), 1.0, epsilon = 1e-12);

        let n = normalize_barycentric(&Vector3::new(-1.0, 0.0, -2.0));
        assert_relative_eq!(n, Vector3::repeat(1.0 / 3.0));
    }
}
