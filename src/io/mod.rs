//! Navmesh file I/O.
//!
//! Navmeshes are read from and written to triangulated Wavefront OBJ. Load
//! errors name the file and the 1-based line at fault and leave the target
//! navmesh empty.
//!
//! ```no_run
//! use trailmesh::io::obj;
//! use trailmesh::navmesh::Navmesh;
//!
//! let mut navmesh = Navmesh::new();
//! obj::load(&mut navmesh, "terrain.obj").unwrap();
//! obj::save(&navmesh, "copy.obj").unwrap();
//! ```
//!
//! The same operations are available as [`Navmesh`](crate::navmesh::Navmesh)
//! methods: `load_obj`, `read_obj`, `save_obj` and `write_obj`.

pub mod obj;
