//! Mesh export: Wavefront OBJ (ASCII) and STL (ASCII and binary).

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Utc;
use tracing::{info, instrument};

use crate::error::MeshError;
use crate::mesh::Mesh;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Obj,
    Stl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportMode {
    Ascii,
    Binary,
}

impl Mesh {
    /// Write the mesh to `path`. Binary OBJ does not exist and is rejected.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(
        &self,
        path: impl AsRef<Path>,
        format: ExportFormat,
        mode: ExportMode,
    ) -> Result<(), MeshError> {
        if format == ExportFormat::Obj && mode == ExportMode::Binary {
            return Err(MeshError::Unsupported("OBJ has no binary form".to_string()));
        }
        if self.is_empty() {
            return Err(MeshError::Empty);
        }

        let name = path
            .as_ref()
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("mesh")
            .to_string();
        let mut out = BufWriter::new(File::create(path.as_ref())?);
        match (format, mode) {
            (ExportFormat::Obj, _) => write_obj(self, &mut out)?,
            (ExportFormat::Stl, ExportMode::Ascii) => write_ascii_stl(self, &name, &mut out)?,
            (ExportFormat::Stl, ExportMode::Binary) => write_binary_stl(self, &name, &mut out)?,
        }
        out.flush()?;

        info!(faces = self.faces().len(), ?format, ?mode, "mesh saved");
        Ok(())
    }
}

/// OBJ with a comment header, transformed vertices, one normal per face.
pub fn write_obj<W: Write>(mesh: &Mesh, out: &mut W) -> Result<(), MeshError> {
    let export = &mesh.config().export;
    writeln!(out, "# {} {}", export.title, env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "# {}", Utc::now().to_rfc3339())?;
    if let Some(url) = &export.url {
        writeln!(out, "# {url}")?;
    }
    writeln!(out)?;

    for v in mesh.transformed_vertices() {
        writeln!(out, "v {} {} {}", v.x, v.y, v.z)?;
    }
    let normals = mesh.face_normals();
    for n in normals.iter() {
        writeln!(out, "vn {} {} {}", n.x, n.y, n.z)?;
    }
    for [u, v] in mesh.texcoords() {
        writeln!(out, "vt {u} {v}")?;
    }
    for (i, [a, b, c]) in mesh.faces().iter().enumerate() {
        let n = i + 1;
        writeln!(out, "f {}//{n} {}//{n} {}//{n}", a + 1, b + 1, c + 1)?;
    }
    Ok(())
}

pub fn write_ascii_stl<W: Write>(mesh: &Mesh, name: &str, out: &mut W) -> Result<(), MeshError> {
    let normals = mesh.face_normals();
    writeln!(out, "solid {name}")?;
    for (corners, n) in mesh.vectors().iter_positions().zip(normals.iter()) {
        writeln!(out, "  facet normal {} {} {}", n.x, n.y, n.z)?;
        writeln!(out, "    outer loop")?;
        for p in corners {
            writeln!(out, "      vertex {} {} {}", p.x, p.y, p.z)?;
        }
        writeln!(out, "    endloop")?;
        writeln!(out, "  endfacet")?;
    }
    writeln!(out, "endsolid {name}")?;
    Ok(())
}

/// Binary STL: 80-byte header, u32 count, then 50 bytes per triangle.
pub fn write_binary_stl<W: Write>(mesh: &Mesh, name: &str, out: &mut W) -> Result<(), MeshError> {
    let normals = mesh.face_normals();

    let mut header = format!("binary STL: {name}").into_bytes();
    header.resize(80, 0u8);
    out.write_all(&header)?;
    out.write_all(&(mesh.vectors().len() as u32).to_le_bytes())?;

    for (corners, n) in mesh.vectors().iter_positions().zip(normals.iter()) {
        for value in [n.x, n.y, n.z] {
            out.write_all(&(value as f32).to_le_bytes())?;
        }
        for p in corners {
            for value in [p.x, p.y, p.z] {
                out.write_all(&(value as f32).to_le_bytes())?;
            }
        }
        out.write_all(&0u16.to_le_bytes())?;
    }
    Ok(())
}
