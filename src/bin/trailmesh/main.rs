//! Trailmesh CLI - navmesh inspection and traversal tool.
//!
//! Usage: trailmesh [--config <FILE>] <COMMAND> [OPTIONS]
//!
//! Run `trailmesh --help` for available commands. Set `RUST_LOG=debug` for
//! build and load diagnostics.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use nalgebra::{Point3, Vector3};

use trailmesh::config::NavmeshConfig;
use trailmesh::geometry::Ray;
use trailmesh::navmesh::{Navmesh, TerrainGrid, TraverseOptions, TriangleId};

#[derive(Parser)]
#[command(name = "trailmesh")]
#[command(author, version, about = "Navmesh inspection and traversal CLI", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display navmesh information
    Info {
        /// Input OBJ file
        input: PathBuf,
    },

    /// Slide a point across the navmesh and print every step
    Walk {
        /// Input OBJ file
        input: PathBuf,

        /// Starting triangle index
        #[arg(short, long, default_value = "0")]
        triangle: usize,

        /// Barycentric start position as u,v,w
        #[arg(short, long, value_parser = parse_vec3, default_value = "0.3333333333,0.3333333333,0.3333333334")]
        position: Vector3<f64>,

        /// Velocity as x,y,z
        #[arg(short, long, value_parser = parse_vec3, allow_hyphen_values = true)]
        velocity: Vector3<f64>,
    },

    /// Cast a ray against the navmesh octree
    Pick {
        /// Input OBJ file
        input: PathBuf,

        /// Ray origin as x,y,z
        #[arg(short, long, value_parser = parse_vec3, allow_hyphen_values = true)]
        origin: Vector3<f64>,

        /// Ray direction as x,y,z
        #[arg(short, long, value_parser = parse_vec3, allow_hyphen_values = true)]
        direction: Vector3<f64>,

        /// Octree depth (default: from config)
        #[arg(long)]
        depth: Option<usize>,
    },

    /// Write a flat terrain grid as OBJ
    Grid {
        /// Output OBJ file
        output: PathBuf,

        /// Cells along X (default: from config)
        #[arg(long)]
        columns: Option<usize>,

        /// Cells along Z (default: from config)
        #[arg(long)]
        rows: Option<usize>,

        /// Extent along X (default: from config)
        #[arg(long)]
        width: Option<f64>,

        /// Extent along Z (default: from config)
        #[arg(long)]
        depth: Option<f64>,
    },
}

fn parse_vec3(s: &str) -> Result<Vector3<f64>, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected three comma-separated numbers, got '{}'", s));
    }
    let mut v = Vector3::zeros();
    for (i, part) in parts.iter().enumerate() {
        v[i] = part
            .parse()
            .map_err(|_| format!("invalid number '{}'", part))?;
    }
    Ok(v)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => NavmeshConfig::load(path)?,
        None => NavmeshConfig::default(),
    };

    match cli.command {
        Commands::Info { input } => cmd_info(&input)?,

        Commands::Walk {
            input,
            triangle,
            position,
            velocity,
        } => cmd_walk(&input, triangle, &position, &velocity, &config)?,

        Commands::Pick {
            input,
            origin,
            direction,
            depth,
        } => {
            let depth = depth.unwrap_or(config.octree.max_depth);
            cmd_pick(&input, Point3::from(origin), direction, depth)?;
        }

        Commands::Grid {
            output,
            columns,
            rows,
            width,
            depth,
        } => {
            let defaults = TerrainGrid::from(&config.terrain);
            let grid = TerrainGrid::new(
                columns.unwrap_or(defaults.columns),
                rows.unwrap_or(defaults.rows),
                width.unwrap_or(defaults.width),
                depth.unwrap_or(defaults.depth),
            );
            cmd_grid(&output, &grid)?;
        }
    }

    Ok(())
}

fn load(input: &Path) -> Result<Navmesh, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let mut navmesh = Navmesh::new();
    navmesh.load_obj(input)?;
    log::info!("loaded {} in {:.2?}", input.display(), start.elapsed());
    Ok(navmesh)
}

fn checked_triangle(navmesh: &Navmesh, index: usize) -> Result<TriangleId, Box<dyn std::error::Error>> {
    if index >= navmesh.triangles().len() {
        return Err(format!(
            "triangle {} out of range (navmesh has {})",
            index,
            navmesh.triangles().len()
        )
        .into());
    }
    Ok(TriangleId::new(index))
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let navmesh = load(input)?;

    println!("File: {}", input.display());
    println!("Vertices: {}", navmesh.vertices().len());
    println!("Triangles: {}", navmesh.triangles().len());
    println!("Half-edges: {}", navmesh.edges().len());
    println!("Boundary edges: {}", navmesh.boundary_edges().count());

    if !navmesh.is_empty() {
        let b = navmesh.bounds();
        println!(
            "Bounding box: ({:.3}, {:.3}, {:.3}) to ({:.3}, {:.3}, {:.3})",
            b.min.x, b.min.y, b.min.z, b.max.x, b.max.y, b.max.z
        );
        let size = b.extent();
        println!("Dimensions: {:.3} x {:.3} x {:.3}", size.x, size.y, size.z);
    }

    println!("Valid: {}", if navmesh.is_valid() { "yes" } else { "no" });
    Ok(())
}

fn cmd_walk(
    input: &Path,
    triangle: usize,
    position: &Vector3<f64>,
    velocity: &Vector3<f64>,
    config: &NavmeshConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let navmesh = load(input)?;
    let start = checked_triangle(&navmesh, triangle)?;
    let options = TraverseOptions::from(&config.traversal);

    let walk = navmesh.traverse_with(start, position, velocity, &options);
    for (i, step) in walk.steps.iter().enumerate() {
        let from = navmesh.to_cartesian(step.triangle, &step.start);
        let to = navmesh.to_cartesian(step.triangle, &step.end);
        let edge = match step.edge {
            Some(e) if navmesh.is_boundary_edge(e) => format!("{:?} (boundary)", e),
            Some(e) => format!("{:?}", e),
            None => "-".to_string(),
        };
        println!(
            "{:3}  {:?}  ({:.4}, {:.4}, {:.4}) -> ({:.4}, {:.4}, {:.4})  edge {}",
            i, step.triangle, from.x, from.y, from.z, to.x, to.y, to.z, edge
        );
    }
    println!(
        "{:?} after {:.6} of {:.6}",
        walk.termination,
        walk.distance,
        velocity.norm()
    );
    Ok(())
}

fn cmd_pick(input: &Path, origin: Point3<f64>, direction: Vector3<f64>, depth: usize) -> Result<(), Box<dyn std::error::Error>> {
    let navmesh = load(input)?;
    let octree = navmesh.create_octree(depth);
    let ray = Ray::new(origin, direction);

    match navmesh.ray_cast(&octree, &ray) {
        Some(hit) => {
            let p = ray.point_at(hit.t);
            println!("Hit {:?} at t = {:.6}", hit.triangle, hit.t);
            println!("Point: ({:.4}, {:.4}, {:.4})", p.x, p.y, p.z);
            println!(
                "Barycentric: ({:.4}, {:.4}, {:.4})",
                hit.barycentric.x, hit.barycentric.y, hit.barycentric.z
            );
        }
        None => println!("No hit"),
    }
    Ok(())
}

fn cmd_grid(output: &Path, grid: &TerrainGrid) -> Result<(), Box<dyn std::error::Error>> {
    let navmesh = grid.build()?;
    navmesh.save_obj(output)?;
    println!(
        "Wrote {}x{} grid ({} triangles) to {}",
        grid.columns,
        grid.rows,
        navmesh.triangles().len(),
        output.display()
    );
    Ok(())
}
