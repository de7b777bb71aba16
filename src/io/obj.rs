//! Wavefront OBJ support for navmeshes.
//!
//! Only triangulated files are accepted. Recognized lines are `v x y z` and
//! `f a b c` with 1-based vertex indices; a face token may carry
//! `/`-separated texture and normal references, which are ignored. Blank
//! lines and `#` comments are skipped. Any other line fails the whole load.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use log::{debug, error};
use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::navmesh::Navmesh;

/// Parse OBJ text into vertex positions and a flat triangle index list.
///
/// `name` identifies the source in error messages.
pub fn parse<R: BufRead>(reader: R, name: &Path) -> Result<(Vec<Point3<f64>>, Vec<usize>)> {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();
    let mut face_lines = Vec::new();

    let fail = |line: usize, message: String| {
        error!("{}:{}: {}", name.display(), line, message);
        MeshError::Obj {
            path: name.to_path_buf(),
            line,
            message,
        }
    };

    for (number, line) in reader.lines().enumerate() {
        let number = number + 1;
        let line = line.map_err(|e| fail(number, format!("unreadable line: {}", e)))?;
        let tokens: Vec<&str> = line.split_whitespace().collect();

        let Some(&keyword) = tokens.first() else {
            continue;
        };
        if keyword.starts_with('#') {
            continue;
        }

        match keyword {
            "v" => {
                if tokens.len() != 4 {
                    return Err(fail(number, format!("expected 3 vertex coordinates, found {}", tokens.len() - 1)));
                }
                let mut xyz = [0.0; 3];
                for (slot, token) in xyz.iter_mut().zip(&tokens[1..]) {
                    *slot = token
                        .parse::<f64>()
                        .ok()
                        .filter(|x| x.is_finite())
                        .ok_or_else(|| fail(number, format!("invalid coordinate '{}'", token)))?;
                }
                vertices.push(Point3::new(xyz[0], xyz[1], xyz[2]));
            }
            "f" => {
                if tokens.len() != 4 {
                    return Err(fail(number, format!("expected 3 vertex indices, found {}", tokens.len() - 1)));
                }
                for token in &tokens[1..] {
                    let reference = token.split('/').next().unwrap_or(token);
                    let index: usize = reference
                        .parse()
                        .ok()
                        .filter(|&i| i > 0)
                        .ok_or_else(|| fail(number, format!("invalid vertex index '{}'", token)))?;
                    indices.push(index - 1);
                }
                face_lines.push(number);
            }
            other => {
                return Err(fail(number, format!("unsupported line type '{}'", other)));
            }
        }
    }

    // Faces may precede the vertices they use, so ranges are checked last
    for (face, &line) in indices.chunks(3).zip(&face_lines) {
        if let Some(&index) = face.iter().find(|&&i| i >= vertices.len()) {
            return Err(fail(
                line,
                format!("vertex index {} out of range ({} vertices)", index + 1, vertices.len()),
            ));
        }
    }

    Ok((vertices, indices))
}

/// Load an OBJ file into `navmesh`, replacing its contents.
///
/// On failure the navmesh is left empty.
pub fn load<P: AsRef<Path>>(navmesh: &mut Navmesh, path: P) -> Result<()> {
    let path = path.as_ref();
    navmesh.destroy();
    let file = File::open(path).map_err(|source| {
        error!("failed to open {}: {}", path.display(), source);
        MeshError::File {
            path: path.to_path_buf(),
            source,
        }
    })?;
    read(navmesh, BufReader::new(file), path)
}

/// Read OBJ text into `navmesh`, replacing its contents.
///
/// On failure the navmesh is left empty.
pub fn read<R: BufRead>(navmesh: &mut Navmesh, reader: R, name: &Path) -> Result<()> {
    navmesh.destroy();
    let (vertices, indices) = parse(reader, name)?;
    navmesh.create(&vertices, &indices)?;
    debug!(
        "loaded {}: {} vertices, {} triangles",
        name.display(),
        navmesh.vertices().len(),
        navmesh.triangles().len()
    );
    Ok(())
}

/// Write a navmesh as OBJ text.
pub fn write<W: Write>(navmesh: &Navmesh, mut writer: W) -> Result<()> {
    writeln!(writer, "# {} vertices, {} triangles", navmesh.vertices().len(), navmesh.triangles().len())?;
    for v in navmesh.vertices() {
        writeln!(writer, "v {} {} {}", v.position.x, v.position.y, v.position.z)?;
    }
    for t in navmesh.triangle_ids() {
        let [a, b, c] = navmesh.triangle_edges(t).map(|e| navmesh.edge(e).vertex.index() + 1);
        writeln!(writer, "f {} {} {}", a, b, c)?;
    }
    writer.flush()?;
    Ok(())
}

/// Save a navmesh to an OBJ file.
pub fn save<P: AsRef<Path>>(navmesh: &Navmesh, path: P) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| MeshError::File {
        path: path.to_path_buf(),
        source,
    })?;
    write(navmesh, BufWriter::new(file))
}
