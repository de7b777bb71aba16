use nalgebra::{Point3, Vector3};

use super::Aabb;

/// A half-line starting at `origin`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Point3<f64>,
    /// Direction; not required to be unit length.
    pub direction: Vector3<f64>,
}

impl Ray {
    /// Create a ray.
    pub fn new(origin: Point3<f64>, direction: Vector3<f64>) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t`.
    #[inline]
    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.origin + self.direction * t
    }

    /// Slab test against a box.
    ///
    /// Returns the entry and exit parameters when the ray passes through the
    /// box. The entry parameter is negative when the origin is inside.
    pub fn intersect_aabb(&self, aabb: &Aabb) -> Option<(f64, f64)> {
        let mut t0 = f64::NEG_INFINITY;
        let mut t1 = f64::INFINITY;

        for i in 0..3 {
            let inv = 1.0 / self.direction[i];
            let mut near = (aabb.min[i] - self.origin[i]) * inv;
            let mut far = (aabb.max[i] - self.origin[i]) * inv;
            if near > far {
                std::mem::swap(&mut near, &mut far);
            }
            // NaN from a zero direction on a face plane leaves the bound unchanged
            if near > t0 {
                t0 = near;
            }
            if far < t1 {
                t1 = far;
            }
            if t0 > t1 {
                return None;
            }
        }

        if t1 < 0.0 {
            None
        } else {
            Some((t0, t1))
        }
    }

    /// Möller–Trumbore ray/triangle test.
    ///
    /// Returns `(t, u, v)` for a hit in front of the origin, where `u` and `v`
    /// weight vertices `b` and `c`. Both faces of the triangle are hit.
    pub fn intersect_triangle(
        &self,
        a: &Point3<f64>,
        b: &Point3<f64>,
        c: &Point3<f64>,
    ) -> Option<(f64, f64, f64)> {
        let edge10 = b - a;
        let edge20 = c - a;

        let pv = self.direction.cross(&edge20);
        let det = edge10.dot(&pv);
        if det == 0.0 {
            return None;
        }
        let inverse_det = 1.0 / det;

        let tv = self.origin - a;
        let u = tv.dot(&pv) * inverse_det;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let qv = tv.cross(&edge10);
        let v = self.direction.dot(&qv) * inverse_det;
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = edge20.dot(&qv) * inverse_det;
        if t > 0.0 {
            Some((t, u, v))
        } else {
            None
        }
    }
}
