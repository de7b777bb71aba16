//! Configuration loading.
//!
//! Every field has a default, so an empty file (or no file) is valid:
//!
//! ```toml
//! [octree]
//! max_depth = 5
//!
//! [traversal]
//! distance_epsilon = 1e-9
//! parallel = true
//!
//! [terrain]
//! columns = 32
//! rows = 32
//! width = 10.0
//! depth = 10.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{MeshError, Result};
use crate::navmesh::{TerrainGrid, TraverseOptions};

/// Top-level configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NavmeshConfig {
    /// Octree settings
    #[serde(default)]
    pub octree: OctreeConfig,

    /// Traversal settings
    #[serde(default)]
    pub traversal: TraversalConfig,

    /// Terrain grid settings
    #[serde(default)]
    pub terrain: TerrainConfig,
}

/// Octree settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OctreeConfig {
    /// Depth bound for `create_octree` (default: 5)
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

/// Traversal settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TraversalConfig {
    /// Shortfall from the velocity length that still counts as a full walk (default: 1e-9)
    #[serde(default = "default_distance_epsilon")]
    pub distance_epsilon: f64,

    /// Run batch traversal on the rayon pool (default: true)
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

/// Terrain grid settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TerrainConfig {
    /// Cells along X (default: 32)
    #[serde(default = "default_cells")]
    pub columns: usize,

    /// Cells along Z (default: 32)
    #[serde(default = "default_cells")]
    pub rows: usize,

    /// Extent along X (default: 10.0)
    #[serde(default = "default_extent")]
    pub width: f64,

    /// Extent along Z (default: 10.0)
    #[serde(default = "default_extent")]
    pub depth: f64,
}

fn default_max_depth() -> usize {
    5
}

fn default_distance_epsilon() -> f64 {
    1e-9
}

fn default_parallel() -> bool {
    true
}

fn default_cells() -> usize {
    32
}

fn default_extent() -> f64 {
    10.0
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            distance_epsilon: default_distance_epsilon(),
            parallel: default_parallel(),
        }
    }
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            columns: default_cells(),
            rows: default_cells(),
            width: default_extent(),
            depth: default_extent(),
        }
    }
}

impl NavmeshConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| MeshError::Config(format!("{}: {}", path.display(), e)))?;
        let config = Self::from_toml(&contents)?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        let t = &self.traversal;
        if !(t.distance_epsilon >= 0.0) {
            return Err(MeshError::invalid_param(
                "traversal.distance_epsilon",
                t.distance_epsilon,
                "must be non-negative",
            ));
        }
        let g = &self.terrain;
        if g.columns == 0 || g.rows == 0 {
            return Err(MeshError::invalid_param(
                "terrain.columns/rows",
                format!("{}x{}", g.columns, g.rows),
                "must be positive",
            ));
        }
        if !(g.width > 0.0 && g.depth > 0.0) {
            return Err(MeshError::invalid_param(
                "terrain.width/depth",
                format!("{}x{}", g.width, g.depth),
                "must be positive",
            ));
        }
        Ok(())
    }
}

impl From<&TraversalConfig> for TraverseOptions {
    fn from(config: &TraversalConfig) -> Self {
        TraverseOptions::default()
            .with_distance_epsilon(config.distance_epsilon)
            .with_parallel(config.parallel)
    }
}

impl From<&TerrainConfig> for TerrainGrid {
    fn from(config: &TerrainConfig) -> Self {
        TerrainGrid::new(config.columns, config.rows, config.width, config.depth)
    }
}
