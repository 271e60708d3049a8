use std::borrow::Cow;

use meshing_kernel::geometry::{BoundingBox, Point3d, Transform, Vec3};
use meshing_kernel::shapes::{ArcOptions, Boundary, Polygon};
use meshing_tessellation::{open, EarClipEngine, Geometry, TriangulatedMesh, TriangulationPort};
use tracing::{debug, info, instrument};

use crate::config::MeshingConfig;
use crate::error::{check_finite, MeshError};
use crate::normals::compute_normals;
use crate::transform::TransformStack;
use crate::vectors::VectorArray;

/// An extruded solid and its homogeneous vector array.
///
/// Created empty; [`Mesh::extrude`] fills it. Transforms replace the vector
/// array with `vectors · M` in call order and leave normals stale until the
/// next [`Mesh::update_normals`].
pub struct Mesh {
    engine: Box<dyn TriangulationPort>,
    config: MeshingConfig,
    session: Option<Geometry>,
    vertices: Vec<Point3d>,
    faces: Vec<[usize; 3]>,
    vectors: VectorArray,
    normals: Vec<Vec3>,
    normals_fresh: bool,
    texcoords: Vec<[f64; 2]>,
}

impl std::fmt::Debug for Mesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mesh")
            .field("vertices", &self.vertices.len())
            .field("faces", &self.faces.len())
            .field("normals", &self.normals.len())
            .field("normals_fresh", &self.normals_fresh)
            .finish()
    }
}

/// Session for `boundary`, reusing cached triangles while the boundary is unchanged.
fn session_for<'a>(slot: &'a mut Option<Geometry>, boundary: &Boundary) -> &'a mut Geometry {
    match slot.take() {
        Some(session) if session.boundary() == boundary => slot.insert(session),
        _ => slot.insert(open(boundary.clone())),
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

impl Mesh {
    /// Empty mesh backed by the ear-clipping engine.
    pub fn new() -> Self {
        Self::with_config(MeshingConfig::default())
    }

    pub fn with_config(config: MeshingConfig) -> Self {
        let engine = Box::new(EarClipEngine::with_tolerance(config.tolerance));
        Self::build(engine, config)
    }

    /// Empty mesh backed by a caller-supplied engine.
    pub fn with_engine(engine: Box<dyn TriangulationPort>) -> Self {
        Self::build(engine, MeshingConfig::default())
    }

    pub fn with_engine_and_config(engine: Box<dyn TriangulationPort>, config: MeshingConfig) -> Self {
        Self::build(engine, config)
    }

    fn build(engine: Box<dyn TriangulationPort>, config: MeshingConfig) -> Self {
        Self {
            engine,
            config,
            session: None,
            vertices: Vec::new(),
            faces: Vec::new(),
            vectors: VectorArray::default(),
            normals: Vec::new(),
            normals_fresh: false,
            texcoords: Vec::new(),
        }
    }

    pub fn config(&self) -> &MeshingConfig {
        &self.config
    }

    /// Empty polygon that stitches and samples arcs per `config.shape`.
    pub fn polygon(&self) -> Polygon {
        Polygon::with_config(self.config.shape)
    }

    pub fn arc_options(&self) -> ArcOptions {
        ArcOptions::from_config(&self.config.shape)
    }

    /// Triangulate `boundary` in the z = 0 plane without touching the mesh.
    #[instrument(skip_all, fields(holes = boundary.hole_count()))]
    pub fn triangulate(&mut self, boundary: &Boundary) -> Result<TriangulatedMesh, MeshError> {
        let engine = &*self.engine;
        let session = session_for(&mut self.session, boundary);
        let triangles = session.triangulate(engine)?;
        Ok(TriangulatedMesh::new(
            triangles.vertices.iter().map(|p| p.to_3d(0.0)).collect(),
            triangles.faces.clone(),
        ))
    }

    /// Extrude `boundary` by `height` and replace the mesh contents.
    #[instrument(skip_all, fields(height = height))]
    pub fn extrude(&mut self, boundary: &Boundary, height: f64) -> Result<&mut Self, MeshError> {
        let engine = &*self.engine;
        let session = session_for(&mut self.session, boundary);
        let solid = session.extrude(engine, height)?;
        let vectors = VectorArray::from_indexed(&solid.vertices, &solid.faces)?;

        self.vertices = solid.vertices.clone();
        self.faces = solid.faces.clone();
        self.vectors = vectors;
        self.normals.clear();
        self.normals_fresh = false;

        info!(
            vertex_count = self.vertices.len(),
            face_count = self.faces.len(),
            "mesh extruded"
        );
        Ok(self)
    }

    /// Recompute every face normal from the current vector array.
    pub fn update_normals(&mut self) -> &mut Self {
        self.normals = compute_normals(&self.vectors);
        self.normals_fresh = true;
        self
    }

    pub fn translate(&mut self, tx: f64, ty: f64, tz: f64) -> Result<&mut Self, MeshError> {
        check_finite("tx", tx)?;
        check_finite("ty", ty)?;
        check_finite("tz", tz)?;
        self.apply_transform(&Transform::translation(tx, ty, tz))
    }

    pub fn scale(&mut self, sx: f64, sy: f64, sz: f64) -> Result<&mut Self, MeshError> {
        check_finite("sx", sx)?;
        check_finite("sy", sy)?;
        check_finite("sz", sz)?;
        self.apply_transform(&Transform::scaling(sx, sy, sz))
    }

    /// Rotate about the X axis by `degrees`.
    pub fn rotate_x(&mut self, degrees: f64) -> Result<&mut Self, MeshError> {
        check_finite("angle", degrees)?;
        self.apply_transform(&Transform::rotation_x(degrees.to_radians()))
    }

    /// Rotate about the Y axis by `degrees`.
    pub fn rotate_y(&mut self, degrees: f64) -> Result<&mut Self, MeshError> {
        check_finite("angle", degrees)?;
        self.apply_transform(&Transform::rotation_y(degrees.to_radians()))
    }

    /// Rotate about the Z axis by `degrees`.
    pub fn rotate_z(&mut self, degrees: f64) -> Result<&mut Self, MeshError> {
        check_finite("angle", degrees)?;
        self.apply_transform(&Transform::rotation_z(degrees.to_radians()))
    }

    /// Right-multiply every row of the vector array by `transform`.
    pub fn apply_transform(&mut self, transform: &Transform) -> Result<&mut Self, MeshError> {
        if let Some(&value) = transform.matrix().iter().find(|v| !v.is_finite()) {
            return Err(MeshError::InvalidArgument {
                parameter: "transform",
                value,
            });
        }
        self.vectors.apply(transform);
        self.normals_fresh = false;
        debug!(faces = self.vectors.len(), "transform applied");
        Ok(self)
    }

    pub fn apply_stack(&mut self, stack: &TransformStack) -> &mut Self {
        stack.apply_to(&mut self.vectors);
        if !stack.is_empty() {
            self.normals_fresh = false;
        }
        self
    }

    /// Vertices as produced by the engine, before any transform.
    pub fn vertices(&self) -> &[Point3d] {
        &self.vertices
    }

    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    pub fn vectors(&self) -> &VectorArray {
        &self.vectors
    }

    /// Normals from the last [`Mesh::update_normals`], possibly stale.
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn normals_fresh(&self) -> bool {
        self.normals_fresh
    }

    /// Current normals, recomputed without caching when stale.
    pub fn face_normals(&self) -> Cow<'_, [Vec3]> {
        if self.normals_fresh {
            Cow::Borrowed(&self.normals)
        } else {
            Cow::Owned(compute_normals(&self.vectors))
        }
    }

    /// Always empty; nothing generates texture coordinates.
    pub fn texcoords(&self) -> &[[f64; 2]] {
        &self.texcoords
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Vertex positions after every transform applied so far.
    pub fn transformed_vertices(&self) -> Vec<Point3d> {
        self.vectors.scatter(&self.faces, &self.vertices)
    }

    /// Bounds of the current vector array, `None` when empty.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        if self.vectors.is_empty() {
            return None;
        }
        let corners: Vec<Point3d> = self.vectors.iter_positions().flatten().collect();
        Some(BoundingBox::from_points(&corners))
    }
}
