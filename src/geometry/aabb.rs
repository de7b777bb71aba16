use nalgebra::{Point3, Vector3};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

impl Aabb {
    /// Create a box from its corners.
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// An inverted box that contains nothing and grows to fit the first point.
    pub fn empty() -> Self {
        Self {
            min: Point3::from(Vector3::repeat(f64::INFINITY)),
            max: Point3::from(Vector3::repeat(f64::NEG_INFINITY)),
        }
    }

    /// Smallest box containing all `points`.
    pub fn from_points<'a, I>(points: I) -> Self
    where
        I: IntoIterator<Item = &'a Point3<f64>>,
    {
        let mut aabb = Self::empty();
        for p in points {
            aabb.extend(p);
        }
        aabb
    }

    /// Whether the box contains nothing.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow the box to contain `p`.
    pub fn extend(&mut self, p: &Point3<f64>) {
        for i in 0..3 {
            self.min[i] = self.min[i].min(p[i]);
            self.max[i] = self.max[i].max(p[i]);
        }
    }

    /// Center point.
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Size along each axis.
    pub fn extent(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Whether `p` lies inside or on the box.
    pub fn contains_point(&self, p: &Point3<f64>) -> bool {
        (0..3).all(|i| p[i] >= self.min[i] && p[i] <= self.max[i])
    }

    /// Whether `other` lies entirely inside this box.
    pub fn contains(&self, other: &Aabb) -> bool {
        (0..3).all(|i| other.min[i] >= self.min[i] && other.max[i] <= self.max[i])
    }

    /// Whether the two boxes overlap (touching counts).
    pub fn intersects(&self, other: &Aabb) -> bool {
        (0..3).all(|i| self.min[i] <= other.max[i] && self.max[i] >= other.min[i])
    }

    /// One of the eight octants, numbered by `x | y << 1 | z << 2` with a set
    /// bit selecting the upper half of that axis.
    pub fn octant(&self, n: usize) -> Aabb {
        let center = self.center();
        let mut min = self.min;
        let mut max = center;
        for axis in 0..3 {
            if n & (1 << axis) != 0 {
                min[axis] = center[axis];
                max[axis] = self.max[axis];
            }
        }
        Aabb { min, max }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Aabb {
        Aabb::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0))
    }

    #[test]
    fn test_from_points() {
        let points = [Point3::new(1.0, -2.0, 0.5), Point3::new(-1.0, 3.0, 0.0)];
        let aabb = Aabb::from_points(&points);
        assert_eq!(aabb.min, Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Point3::new(1.0, 3.0, 0.5));
        assert!(!aabb.is_empty());
        assert!(Aabb::empty().is_empty());
    }

    #[test]
    fn test_containment_and_overlap() {
        let outer = unit();
        let inner = Aabb::new(Point3::new(0.25, 0.25, 0.25), Point3::new(0.5, 0.5, 0.5));
        let apart = Aabb::new(Point3::new(2.0, 2.0, 2.0), Point3::new(3.0, 3.0, 3.0));

        assert!(outer.contains(&inner));
        assert!(!inner.contains(&outer));
        assert!(outer.intersects(&inner));
        assert!(!outer.intersects(&apart));
        assert!(outer.contains_point(&Point3::new(1.0, 0.0, 0.5)));
    }

    #[test]
    fn test_octants_tile_the_box() {
        let aabb = unit();
        let upper = aabb.octant(7);
        assert_eq!(upper.min, Point3::new(0.5, 0.5, 0.5));
        assert_eq!(upper.max, Point3::new(1.0, 1.0, 1.0));

        let x_only = aabb.octant(1);
        assert_eq!(x_only.min, Point3::new(0.5, 0.0, 0.0));
        assert_eq!(x_only.max, Point3::new(1.0, 0.5, 0.5));
    }
}
