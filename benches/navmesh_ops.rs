//! Benchmarks for navmesh operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nalgebra::{Point3, Vector3};
use trailmesh::navmesh::TraverseRequest;
use trailmesh::prelude::*;

fn bench_navmesh_construction(c: &mut Criterion) {
    let grid = TerrainGrid::new(64, 64, 10.0, 10.0);
    let positions = grid.positions();
    let indices = grid.indices();

    c.bench_function("build_grid_64x64", |b| {
        b.iter(|| Navmesh::from_triangles(black_box(&positions), black_box(&indices)).unwrap())
    });

    let navmesh = grid.build().unwrap();
    c.bench_function("create_octree_64x64", |b| b.iter(|| navmesh.create_octree(black_box(6))));
}

fn bench_traversal(c: &mut Criterion) {
    let navmesh = TerrainGrid::new(64, 64, 10.0, 10.0).build().unwrap();
    let start = TriangleId::new(0);
    let position = Vector3::repeat(1.0 / 3.0);

    c.bench_function("traverse_diagonal", |b| {
        let velocity = Vector3::new(8.0, 0.0, 7.5);
        b.iter(|| navmesh.traverse(start, black_box(&position), black_box(&velocity)))
    });

    let requests: Vec<TraverseRequest> = (0..1024)
        .map(|i| {
            let angle = i as f64 * 0.37;
            TraverseRequest {
                triangle: TriangleId::new(i % navmesh.triangles().len()),
                position,
                velocity: Vector3::new(angle.cos(), 0.0, angle.sin()) * 2.0,
            }
        })
        .collect();

    c.bench_function("traverse_batch_parallel", |b| {
        let options = TraverseOptions::default();
        b.iter(|| navmesh.traverse_batch(black_box(&requests), &options))
    });

    c.bench_function("traverse_batch_sequential", |b| {
        let options = TraverseOptions::default().sequential();
        b.iter(|| navmesh.traverse_batch(black_box(&requests), &options))
    });
}

fn bench_ray_cast(c: &mut Criterion) {
    let navmesh = TerrainGrid::new(64, 64, 10.0, 10.0).build().unwrap();
    let octree = navmesh.create_octree(6);
    let ray = Ray::new(Point3::new(1.3, 5.0, -2.1), -Vector3::y());

    c.bench_function("ray_cast_octree", |b| b.iter(|| navmesh.ray_cast(&octree, black_box(&ray))));
    c.bench_function("ray_cast_brute_force", |b| b.iter(|| navmesh.intersects(black_box(&ray))));
}

criterion_group!(benches, bench_navmesh_construction, bench_traversal, bench_ray_cast);
criterion_main!(benches);
