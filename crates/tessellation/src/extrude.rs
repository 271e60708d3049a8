//! Prism extrusion of a planar triangulation along +Z.

use std::collections::HashSet;

use meshing_kernel::geometry::Point3d;
use tracing::{info, instrument};

use crate::error::TessellationError;
use crate::types::{TriangulatedMesh, Triangulation};

pub(crate) fn check_height(height: f64) -> Result<(), TessellationError> {
    if height == 0.0 || !height.is_finite() {
        return Err(TessellationError::InvalidArgument {
            parameter: "height",
            value: height,
        });
    }
    Ok(())
}

/// Directed edges used by exactly one face, in face order.
///
/// Interior edges appear once in each direction and cancel; what is left
/// walks the outer ring CCW and every hole CW.
pub fn boundary_edges(faces: &[[usize; 3]]) -> Vec<(usize, usize)> {
    let edges = |&[a, b, c]: &[usize; 3]| [(a, b), (b, c), (c, a)];
    let directed: HashSet<(usize, usize)> = faces.iter().flat_map(edges).collect();
    faces
        .iter()
        .flat_map(edges)
        .filter(|&(u, v)| !directed.contains(&(v, u)))
        .collect()
}

/// Extrude a CCW triangulation into a closed prism between z = 0 and z = `height`.
///
/// Vertices are the bottom copy (`0..n`) followed by the top copy (`n..2n`).
/// Faces are bottom cap, top cap, then two triangles per boundary edge, all
/// wound so normals point out of the solid. A negative height extrudes
/// downward with every face flipped.
#[instrument(skip(triangulation), fields(vertices = triangulation.vertex_count()))]
pub fn extrude_triangulation(
    triangulation: &Triangulation,
    height: f64,
) -> Result<TriangulatedMesh, TessellationError> {
    check_height(height)?;
    triangulation.validate()?;
    if triangulation.faces.is_empty() {
        return Err(TessellationError::geometry("nothing to extrude: triangulation has no faces"));
    }

    let n = triangulation.vertex_count();
    let vertices: Vec<Point3d> = triangulation
        .vertices
        .iter()
        .map(|p| p.to_3d(0.0))
        .chain(triangulation.vertices.iter().map(|p| p.to_3d(height)))
        .collect();

    let walls = boundary_edges(&triangulation.faces);
    let mut faces = Vec::with_capacity(2 * triangulation.faces.len() + 2 * walls.len());
    faces.extend(triangulation.faces.iter().map(|&[a, b, c]| [a, c, b]));
    faces.extend(triangulation.faces.iter().map(|&[a, b, c]| [a + n, b + n, c + n]));
    for &(u, v) in &walls {
        faces.push([u, v, v + n]);
        faces.push([u, v + n, u + n]);
    }

    if height < 0.0 {
        for face in &mut faces {
            face.swap(1, 2);
        }
    }

    info!(
        height,
        vertex_count = vertices.len(),
        face_count = faces.len(),
        wall_edges = walls.len(),
        "extruded triangulation"
    );
    Ok(TriangulatedMesh::new(vertices, faces))
}
