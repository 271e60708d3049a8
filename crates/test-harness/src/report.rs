//! Structured text-based model reports.
//!
//! Reports are plain text, not JSON, so a failing test can print one and a
//! reader sees the whole model at a glance.

use std::fmt;

use meshing_kernel::geometry::BoundingBox;

use crate::helpers::{mesh_surface_area, mesh_volume, HarnessError};
use crate::oracle::OracleVerdict;
use crate::workflow::ModelBuilder;

/// A complete model report with all sections.
pub struct ModelReport {
    pub engine: String,
    pub profile_entries: Vec<ProfileEntry>,
    pub mesh_summaries: Vec<MeshSummary>,
    pub bounding_box: Option<BoundingBox>,
    pub oracle_results: Vec<OracleVerdict>,
    pub errors: Vec<(String, String)>,
}

/// A single profile's report entry.
pub struct ProfileEntry {
    pub name: String,
    pub outer_points: usize,
    pub hole_count: usize,
}

/// Summary of one extruded mesh.
pub struct MeshSummary {
    pub name: String,
    pub triangle_count: usize,
    pub vertex_count: usize,
    pub volume: f64,
    pub surface_area: f64,
    pub normals_fresh: bool,
}

impl ModelReport {
    /// Format the report as text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== Meshing Model Report ===\n\n");
        out.push_str(&format!("Engine: {}\n\n", self.engine));

        out.push_str(&format!("Profiles ({}):\n", self.profile_entries.len()));
        for entry in &self.profile_entries {
            out.push_str(&format!(
                "  \"{}\": {} outer points, {} holes\n",
                entry.name, entry.outer_points, entry.hole_count,
            ));
        }

        if !self.mesh_summaries.is_empty() {
            out.push_str("\nMesh Summary:\n");
            for ms in &self.mesh_summaries {
                let stale = if ms.normals_fresh { "" } else { " [STALE NORMALS]" };
                out.push_str(&format!(
                    "  \"{}\": {} triangles, {} vertices, volume {:.3}, area {:.3}{}\n",
                    ms.name, ms.triangle_count, ms.vertex_count, ms.volume, ms.surface_area, stale,
                ));
            }
        }

        if let Some(bb) = &self.bounding_box {
            out.push_str(&format!(
                "\nBounding Box: ({:.1}, {:.1}, {:.1}) -> ({:.1}, {:.1}, {:.1})\n",
                bb.min.x, bb.min.y, bb.min.z, bb.max.x, bb.max.y, bb.max.z,
            ));
        }

        if !self.oracle_results.is_empty() {
            out.push_str(&format!("\nOracle Results ({} checks):\n", self.oracle_results.len()));
            for v in &self.oracle_results {
                let status = if v.passed { "PASS" } else { "FAIL" };
                out.push_str(&format!("  [{}] {}: {}\n", status, v.oracle_name, v.detail));
            }
        }

        if self.errors.is_empty() {
            out.push_str("\nErrors: none\n");
        } else {
            out.push_str(&format!("\nErrors ({}):\n", self.errors.len()));
            for (name, msg) in &self.errors {
                out.push_str(&format!("  {}: {}\n", name, msg));
            }
        }

        out
    }

    pub fn failed_checks(&self) -> impl Iterator<Item = &OracleVerdict> {
        self.oracle_results.iter().filter(|v| !v.passed)
    }
}

impl fmt::Display for ModelReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl ModelBuilder {
    /// Generate a complete model report, running every mesh oracle.
    pub fn report(&self) -> Result<ModelReport, HarnessError> {
        let profile_entries = self
            .profile_names()
            .into_iter()
            .map(|name| {
                let boundary = self.boundary(name)?;
                Ok(ProfileEntry {
                    name: name.to_string(),
                    outer_points: boundary.outer().len(),
                    hole_count: boundary.hole_count(),
                })
            })
            .collect::<Result<Vec<_>, HarnessError>>()?;

        let mut mesh_summaries = Vec::new();
        let mut oracle_results = Vec::new();
        let mut overall: Option<BoundingBox> = None;

        for name in self.mesh_names() {
            let mesh = self.mesh(name)?;
            mesh_summaries.push(MeshSummary {
                name: name.clone(),
                triangle_count: mesh.faces().len(),
                vertex_count: mesh.vertices().len(),
                volume: mesh_volume(mesh),
                surface_area: mesh_surface_area(mesh),
                normals_fresh: mesh.normals_fresh(),
            });
            if let Some(bb) = mesh.bounding_box() {
                let merged = overall.get_or_insert(bb);
                merged.expand_to_include(&bb.min);
                merged.expand_to_include(&bb.max);
            }
            oracle_results.extend(self.check_mesh(name)?);
        }

        Ok(ModelReport {
            engine: format!("{:?}", self.engine()),
            profile_entries,
            mesh_summaries,
            bounding_box: overall,
            oracle_results,
            errors: self.errors().to_vec(),
        })
    }
}
