//! Flat grid navmeshes for terrain.

use log::debug;
use nalgebra::Point3;

use super::Navmesh;
use crate::error::{MeshError, Result};
use crate::mesh::VertexId;

/// A rectangular grid in the XZ plane, centered at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainGrid {
    /// Cells along X.
    pub columns: usize,
    /// Cells along Z.
    pub rows: usize,
    /// Extent along X.
    pub width: f64,
    /// Extent along Z.
    pub depth: f64,
}

impl Default for TerrainGrid {
    fn default() -> Self {
        Self {
            columns: 32,
            rows: 32,
            width: 10.0,
            depth: 10.0,
        }
    }
}

impl TerrainGrid {
    /// Create a grid description.
    pub fn new(columns: usize, rows: usize, width: f64, depth: f64) -> Self {
        Self {
            columns,
            rows,
            width,
            depth,
        }
    }

    /// Number of grid vertices, `(rows + 1) * (columns + 1)`.
    pub fn vertex_count(&self) -> usize {
        (self.rows + 1) * (self.columns + 1)
    }

    /// Vertex positions in row-major order, all at `y = 0`.
    pub fn positions(&self) -> Vec<Point3<f64>> {
        let mut positions = Vec::with_capacity(self.vertex_count());
        for i in 0..=self.rows {
            let z = i as f64 * self.depth / self.rows as f64 - self.depth * 0.5;
            for j in 0..=self.columns {
                let x = j as f64 * self.width / self.columns as f64 - self.width * 0.5;
                positions.push(Point3::new(x, 0.0, z));
            }
        }
        positions
    }

    /// Triangle indices, two triangles per cell wound so normals face +Y.
    pub fn indices(&self) -> Vec<usize> {
        let stride = self.columns + 1;
        let mut indices = Vec::with_capacity(self.rows * self.columns * 6);
        for i in 0..self.rows {
            for j in 0..self.columns {
                let a = i * stride + j;
                let b = a + stride;
                let c = a + 1;
                let d = b + 1;
                indices.extend_from_slice(&[a, b, c, c, b, d]);
            }
        }
        indices
    }

    /// Build the grid navmesh.
    pub fn build(&self) -> Result<Navmesh> {
        if self.columns == 0 {
            return Err(MeshError::invalid_param("columns", self.columns, "must be positive"));
        }
        if self.rows == 0 {
            return Err(MeshError::invalid_param("rows", self.rows, "must be positive"));
        }
        if !(self.width > 0.0) {
            return Err(MeshError::invalid_param("width", self.width, "must be positive"));
        }
        if !(self.depth > 0.0) {
            return Err(MeshError::invalid_param("depth", self.depth, "must be positive"));
        }

        debug!(
            "building {}x{} terrain grid ({} x {})",
            self.columns, self.rows, self.width, self.depth
        );
        Navmesh::from_triangles(&self.positions(), &self.indices())
    }
}

/// Set every vertex's height from a row-major list, then refresh normals and bounds.
pub fn apply_heights(navmesh: &mut Navmesh, heights: &[f64]) -> Result<()> {
    if heights.len() != navmesh.vertices().len() {
        return Err(MeshError::invalid_param(
            "heights",
            heights.len(),
            "must match the vertex count",
        ));
    }

    for (i, &y) in heights.iter().enumerate() {
        let v = VertexId::new(i);
        let mut p = navmesh.vertex(v).position;
        p.y = y;
        navmesh.set_vertex_position(v, p);
    }
    navmesh.calculate_normals();
    navmesh.calculate_bounds();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navmesh::{Termination, TraverseOptions, TriangleId};
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    #[test]
    fn test_grid_counts_and_bounds() {
        let navmesh = TerrainGrid::new(4, 3, 8.0, 6.0).build().unwrap();
        assert_eq!(navmesh.vertices().len(), 20);
        assert_eq!(navmesh.triangles().len(), 24);
        assert!(navmesh.is_valid());

        assert_eq!(navmesh.bounds().min, Point3::new(-4.0, 0.0, -3.0));
        assert_eq!(navmesh.bounds().max, Point3::new(4.0, 0.0, 3.0));

        // Perimeter edges only: 2 * (4 + 3)
        assert_eq!(navmesh.boundary_edges().count(), 14);
    }

    #[test]
    fn test_grid_normals_face_up() {
        let navmesh = TerrainGrid::new(2, 2, 1.0, 1.0).build().unwrap();
        for t in navmesh.triangles() {
            assert_relative_eq!(t.normal, Vector3::y(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_invalid_grid() {
        let err = TerrainGrid::new(0, 2, 1.0, 1.0).build().unwrap_err();
        assert!(matches!(err, MeshError::InvalidParameter { name: "columns", .. }));
        assert!(TerrainGrid::new(2, 2, 1.0, f64::NAN).build().is_err());
    }

    #[test]
    fn test_apply_heights() {
        let grid = TerrainGrid::new(1, 1, 2.0, 2.0);
        let mut navmesh = grid.build().unwrap();

        assert!(matches!(
            apply_heights(&mut navmesh, &[0.0; 3]),
            Err(MeshError::InvalidParameter { name: "heights", .. })
        ));

        apply_heights(&mut navmesh, &[0.0, 0.0, 1.0, 1.0]).unwrap();
        assert_eq!(navmesh.bounds().max.y, 1.0);
        // The far row is raised, so the surface tilts toward -Z
        for t in navmesh.triangles() {
            assert!(t.normal.z < 0.0);
            assert!(t.normal.y > 0.0);
        }
    }

    #[test]
    fn test_walk_across_grid() {
        let navmesh = TerrainGrid::new(8, 8, 8.0, 8.0).build().unwrap();
        let start = TriangleId::new(0);
        let walk = navmesh.traverse_with(
            start,
            &Vector3::repeat(1.0 / 3.0),
            &Vector3::new(3.0, 0.0, 0.5),
            &TraverseOptions::default(),
        );

        assert_eq!(walk.termination, Termination::Arrived);
        assert!(walk.steps.len() > 2);
        assert_relative_eq!(walk.distance, Vector3::new(3.0, 0.0, 0.5).norm(), epsilon = 1e-9);
        let (t, bary) = walk.destination().unwrap();
        let end = navmesh.to_cartesian(t, &bary);
        let begin = navmesh.to_cartesian(start, &Vector3::repeat(1.0 / 3.0));
        assert_relative_eq!(end - begin, Vector3::new(3.0, 0.0, 0.5), epsilon = 1e-9);
    }
}
