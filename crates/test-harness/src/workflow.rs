//! ModelBuilder - fluent API for scripting profile-to-solid workflows in tests.
//!
//! Drives the real `Mesh` pipeline, not a simulation.
//! All methods accept string names so scenarios read top to bottom.

use std::collections::HashMap;
use std::path::Path;

use meshing::{ExportFormat, ExportMode, Mesh, MeshingConfig};
use meshing_kernel::config::Tolerance;
use meshing_kernel::shapes::{ArcOptions, Boundary, Polygon};
use meshing_tessellation::{EarClipEngine, FanTriangulator, Triangulation, TriangulationPort};

use crate::helpers::{self, HarnessError};
use crate::oracle::{self, OracleVerdict};

/// Triangulation engine backing every mesh a builder creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineChoice {
    EarClip,
    Fan,
}

impl EngineChoice {
    fn port(self, tolerance: Tolerance) -> Box<dyn TriangulationPort> {
        match self {
            Self::EarClip => Box::new(EarClipEngine::with_tolerance(tolerance)),
            Self::Fan => Box::new(FanTriangulator::new()),
        }
    }
}

/// A fluent builder for constructing and verifying extruded models in tests.
///
/// Profiles and meshes live in separate namespaces; mesh names must be
/// unique, profile names must be unique.
#[derive(Debug)]
pub struct ModelBuilder {
    engine: EngineChoice,
    config: MeshingConfig,
    profiles: HashMap<String, Boundary>,
    meshes: HashMap<String, Mesh>,
    mesh_order: Vec<String>,
    history: Vec<(String, String)>,
    errors: Vec<(String, String)>,
    auto_check: bool,
}

impl ModelBuilder {
    /// Create a ModelBuilder backed by the ear-clipping engine.
    pub fn new() -> Self {
        Self::with_engine(EngineChoice::EarClip)
    }

    /// Create a ModelBuilder backed by the fan triangulator (convex profiles only).
    pub fn mock() -> Self {
        Self::with_engine(EngineChoice::Fan)
    }

    pub fn with_engine(engine: EngineChoice) -> Self {
        Self {
            engine,
            config: MeshingConfig::default(),
            profiles: HashMap::new(),
            meshes: HashMap::new(),
            mesh_order: Vec::new(),
            history: Vec::new(),
            errors: Vec::new(),
            auto_check: false,
        }
    }

    /// Enable auto-checking: after every extrusion, run every mesh oracle.
    pub fn with_auto_check(mut self) -> Self {
        self.auto_check = true;
        self
    }

    /// Use `config` for every polygon and mesh built from here on.
    pub fn with_config(mut self, config: MeshingConfig) -> Self {
        self.config = config;
        self
    }

    pub fn engine(&self) -> EngineChoice {
        self.engine
    }

    pub fn config(&self) -> &MeshingConfig {
        &self.config
    }

    /// Empty polygon carrying the builder's shape settings.
    pub fn polygon(&self) -> Polygon {
        Polygon::with_config(self.config.shape)
    }

    /// Arc options carrying the builder's precision and rounding.
    pub fn arc_options(&self) -> ArcOptions {
        ArcOptions::from_config(&self.config.shape)
    }

    // ── Profiles ────────────────────────────────────────────────────────

    /// Finalize `polygon` and store its boundary under `name`.
    pub fn profile(&mut self, name: &str, mut polygon: Polygon) -> Result<&mut Self, HarnessError> {
        if self.profiles.contains_key(name) {
            return Err(HarnessError::DuplicateName {
                name: name.to_string(),
            });
        }
        let boundary = match polygon.finalize() {
            Ok(boundary) => boundary.clone(),
            Err(e) => {
                self.errors.push((name.to_string(), e.to_string()));
                return Err(e.into());
            }
        };
        self.history.push((
            "Profile".to_string(),
            format!("{name}: {} points, {} holes", boundary.outer().len(), boundary.hole_count()),
        ));
        self.profiles.insert(name.to_string(), boundary);
        Ok(self)
    }

    /// Axis-aligned rectangle profile in one call.
    pub fn rect_profile(&mut self, name: &str, x: f64, y: f64, w: f64, h: f64) -> Result<&mut Self, HarnessError> {
        self.profile(name, helpers::rect_profile(x, y, w, h))
    }

    /// Closed polyline profile from flat `[x0, y0, x1, y1, ...]` coordinates.
    pub fn polygon_profile(&mut self, name: &str, coords: &[f64]) -> Result<&mut Self, HarnessError> {
        let polygon = Polygon::from_flat_coords_with(coords, self.config.shape)?;
        self.profile(name, polygon)
    }

    // ── Mesh Operations ─────────────────────────────────────────────────

    /// Triangulate a stored profile with the builder's engine.
    pub fn triangulate(&self, profile: &str) -> Result<Triangulation, HarnessError> {
        let boundary = self.boundary(profile)?;
        let triangulation = self
            .engine
            .port(self.config.tolerance)
            .triangulate(boundary)
            .map_err(meshing::MeshError::from)?;
        Ok(triangulation)
    }

    /// Extrude a stored profile into a new mesh named `name`, with fresh normals.
    pub fn extrude(&mut self, name: &str, profile: &str, height: f64) -> Result<&mut Self, HarnessError> {
        if self.meshes.contains_key(name) {
            return Err(HarnessError::DuplicateName {
                name: name.to_string(),
            });
        }
        let boundary = self.boundary(profile)?.clone();

        let port = self.engine.port(self.config.tolerance);
        let mut mesh = Mesh::with_engine_and_config(port, self.config.clone());
        if let Err(e) = mesh.extrude(&boundary, height) {
            self.errors.push((name.to_string(), e.to_string()));
            return Err(e.into());
        }
        mesh.update_normals();

        self.history
            .push(("Extrude".to_string(), format!("{name} <- {profile} by {height}")));
        self.meshes.insert(name.to_string(), mesh);
        self.mesh_order.push(name.to_string());

        if self.auto_check {
            self.verify(name)?;
        }
        Ok(self)
    }

    pub fn translate(&mut self, name: &str, tx: f64, ty: f64, tz: f64) -> Result<&mut Self, HarnessError> {
        self.apply(name, "Translate", format!("({tx}, {ty}, {tz})"), |m| {
            m.translate(tx, ty, tz).map(|_| ())
        })
    }

    pub fn scale(&mut self, name: &str, sx: f64, sy: f64, sz: f64) -> Result<&mut Self, HarnessError> {
        self.apply(name, "Scale", format!("({sx}, {sy}, {sz})"), |m| m.scale(sx, sy, sz).map(|_| ()))
    }

    pub fn rotate_x(&mut self, name: &str, degrees: f64) -> Result<&mut Self, HarnessError> {
        self.apply(name, "RotateX", format!("{degrees} deg"), |m| m.rotate_x(degrees).map(|_| ()))
    }

    pub fn rotate_y(&mut self, name: &str, degrees: f64) -> Result<&mut Self, HarnessError> {
        self.apply(name, "RotateY", format!("{degrees} deg"), |m| m.rotate_y(degrees).map(|_| ()))
    }

    pub fn rotate_z(&mut self, name: &str, degrees: f64) -> Result<&mut Self, HarnessError> {
        self.apply(name, "RotateZ", format!("{degrees} deg"), |m| m.rotate_z(degrees).map(|_| ()))
    }

    pub fn update_normals(&mut self, name: &str) -> Result<&mut Self, HarnessError> {
        self.mesh_mut(name)?.update_normals();
        self.history.push(("UpdateNormals".to_string(), name.to_string()));
        Ok(self)
    }

    /// Write a named mesh to disk.
    pub fn save(
        &self,
        name: &str,
        path: impl AsRef<Path>,
        format: ExportFormat,
        mode: ExportMode,
    ) -> Result<(), HarnessError> {
        self.mesh(name)?.save(path, format, mode)?;
        Ok(())
    }

    // ── Queries ─────────────────────────────────────────────────────────

    pub fn boundary(&self, name: &str) -> Result<&Boundary, HarnessError> {
        self.profiles
            .get(name)
            .ok_or_else(|| HarnessError::ProfileNotFound {
                name: name.to_string(),
            })
    }

    pub fn mesh(&self, name: &str) -> Result<&Mesh, HarnessError> {
        self.meshes.get(name).ok_or_else(|| HarnessError::NoMesh {
            name: name.to_string(),
        })
    }

    /// Mesh names in creation order.
    pub fn mesh_names(&self) -> &[String] {
        &self.mesh_order
    }

    /// Profile names, sorted.
    pub fn profile_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// (operation, detail) pairs in call order.
    pub fn history(&self) -> &[(String, String)] {
        &self.history
    }

    /// (name, message) pairs for every failed profile or mesh operation.
    pub fn errors(&self) -> &[(String, String)] {
        &self.errors
    }

    // ── Inline Assertions ───────────────────────────────────────────────

    /// Assert exactly `expected` meshes have been built.
    pub fn assert_mesh_count(&self, expected: usize) -> Result<&Self, HarnessError> {
        let actual = self.mesh_count();
        if actual == expected {
            Ok(self)
        } else {
            Err(HarnessError::AssertionFailed {
                detail: format!(
                    "expected {} meshes, got {}. Meshes: {:?}",
                    expected, actual, self.mesh_order
                ),
            })
        }
    }

    /// Assert no operation has failed.
    pub fn assert_no_errors(&self) -> Result<&Self, HarnessError> {
        if self.errors.is_empty() {
            Ok(self)
        } else {
            Err(HarnessError::AssertionFailed {
                detail: format!("expected no errors, got {}: {:?}", self.errors.len(), self.errors),
            })
        }
    }

    /// Assert that some operation failed (useful for negative testing).
    pub fn assert_has_errors(&self) -> Result<&Self, HarnessError> {
        if self.errors.is_empty() {
            Err(HarnessError::AssertionFailed {
                detail: "expected errors, but none found".to_string(),
            })
        } else {
            Ok(self)
        }
    }

    // ── Oracle Integration ──────────────────────────────────────────────

    /// Run all mesh oracles on a named mesh.
    pub fn check_mesh(&self, name: &str) -> Result<Vec<OracleVerdict>, HarnessError> {
        Ok(oracle::run_all_mesh_checks(self.mesh(name)?))
    }

    /// Run boundary oracles plus area preservation on a named profile.
    pub fn check_profile(&self, name: &str) -> Result<Vec<OracleVerdict>, HarnessError> {
        let boundary = self.boundary(name)?;
        let mut verdicts = oracle::run_boundary_checks(boundary);
        let triangulation = self.triangulate(name)?;
        verdicts.push(oracle::check_area_preserved(boundary, &triangulation, 1e-9));
        verdicts.push(oracle::check_ccw_triangles(&triangulation));
        Ok(verdicts)
    }

    /// Fail on the first mesh oracle that does not pass.
    pub fn verify(&self, name: &str) -> Result<&Self, HarnessError> {
        match self.check_mesh(name)?.into_iter().find(|v| !v.passed) {
            Some(v) => Err(HarnessError::OracleFailure {
                oracle: v.oracle_name,
                detail: format!("{name}: {}", v.detail),
            }),
            None => Ok(self),
        }
    }

    // ── Internal Helpers ────────────────────────────────────────────────

    fn mesh_mut(&mut self, name: &str) -> Result<&mut Mesh, HarnessError> {
        self.meshes.get_mut(name).ok_or_else(|| HarnessError::NoMesh {
            name: name.to_string(),
        })
    }

    fn apply(
        &mut self,
        name: &str,
        op: &str,
        detail: String,
        f: impl FnOnce(&mut Mesh) -> Result<(), meshing::MeshError>,
    ) -> Result<&mut Self, HarnessError> {
        let result = f(self.mesh_mut(name)?);
        if let Err(e) = result {
            self.errors.push((name.to_string(), e.to_string()));
            return Err(e.into());
        }
        self.history.push((op.to_string(), format!("{name} {detail}")));
        Ok(self)
    }
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}
