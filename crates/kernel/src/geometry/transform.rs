use nalgebra::{Matrix4, RowVector4};
use serde::{Deserialize, Serialize};

use super::point::Point3d;
use super::vector::Vec3;

/// A 4x4 homogeneous affine transform in row-vector convention.
///
/// Positions are 1x4 rows multiplied on the right by the matrix
/// (`p' = p · M`), so translation lives in the last row and
/// `a.then(&b)` applies `a` first.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    matrix: Matrix4<f64>,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Wrap a raw matrix laid out for row vectors.
    pub fn from_matrix(matrix: Matrix4<f64>) -> Self {
        Self { matrix }
    }

    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            dx,  dy,  dz,  1.0,
        );
        Self { matrix }
    }

    pub fn scaling(sx: f64, sy: f64, sz: f64) -> Self {
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            sx,  0.0, 0.0, 0.0,
            0.0, sy,  0.0, 0.0,
            0.0, 0.0, sz,  0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Self { matrix }
    }

    pub fn uniform_scaling(s: f64) -> Self {
        Self::scaling(s, s, s)
    }

    /// Rotation around the X axis by `angle` radians.
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, c,   s,   0.0,
            0.0, -s,  c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Self { matrix }
    }

    /// Rotation around the Y axis by `angle` radians.
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            c,   0.0, -s,  0.0,
            0.0, 1.0, 0.0, 0.0,
            s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Self { matrix }
    }

    /// Rotation around the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        #[rustfmt::skip]
        let matrix = Matrix4::new(
            c,   s,   0.0, 0.0,
            -s,  c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        );
        Self { matrix }
    }

    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// Compose two transforms: `self` is applied first, then `other`.
    pub fn then(&self, other: &Transform) -> Transform {
        Transform {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Multiply a homogeneous row vector on the right by this matrix.
    pub fn transform_row(&self, row: &RowVector4<f64>) -> RowVector4<f64> {
        row * self.matrix
    }

    /// Transform a point (w = 1, translation applies).
    pub fn transform_point(&self, p: &Point3d) -> Point3d {
        let r = self.transform_row(&RowVector4::new(p.x, p.y, p.z, 1.0));
        Point3d::new(r[0], r[1], r[2])
    }

    /// Transform a direction (w = 0, translation ignored).
    pub fn transform_vector(&self, v: &Vec3) -> Vec3 {
        let r = self.transform_row(&RowVector4::new(v.x, v.y, v.z, 0.0));
        Vec3::new(r[0], r[1], r[2])
    }

    /// Inverse transform, `None` if the matrix is singular.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }

    pub fn is_finite(&self) -> bool {
        self.matrix.iter().all(|v| v.is_finite())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Point3d,
    pub max: Point3d,
}

impl BoundingBox {
    pub fn new(min: Point3d, max: Point3d) -> Self {
        Self { min, max }
    }

    pub fn empty() -> Self {
        Self {
            min: Point3d::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3d::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point3d>) -> Self {
        let mut bb = Self::empty();
        for p in points {
            bb.expand_to_include(p);
        }
        bb
    }

    pub fn expand_to_include(&mut self, p: &Point3d) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    pub fn center(&self) -> Point3d {
        self.min.midpoint(&self.max)
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }
}
