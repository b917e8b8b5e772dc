// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Affine poses for placed elements.
//!
//! A [`Transform`] is a 4x4 homogeneous matrix whose first three columns are
//! the world-space directions of the local axes and whose last column is the
//! local origin. Composition follows matrix order: `(a * b)` applies `b`
//! first, then `a`.

use std::ops::Mul;

use nalgebra::{Matrix4, Point3, Rotation3, Unit, Vector3};

use crate::axis::perpendicular;
use crate::error::{Error, Result};

/// A rigid (or scaled) placement in 3D space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: Matrix4<f64>,
}

impl Transform {
    /// The identity placement.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Wraps an existing homogeneous matrix.
    pub fn from_matrix(matrix: Matrix4<f64>) -> Self {
        Self { matrix }
    }

    /// Pure translation by `offset`.
    pub fn translation(offset: &Vector3<f64>) -> Self {
        Self {
            matrix: Matrix4::new_translation(offset),
        }
    }

    /// Builds a pose from an origin and three local axes.
    ///
    /// The axes are written as matrix columns unchanged, so callers are
    /// responsible for passing an orthonormal set when a rigid pose is wanted.
    pub fn from_frame(
        origin: &Point3<f64>,
        x: &Vector3<f64>,
        y: &Vector3<f64>,
        z: &Vector3<f64>,
    ) -> Self {
        let mut matrix = Matrix4::identity();
        for (col, axis) in [x, y, z].into_iter().enumerate() {
            matrix[(0, col)] = axis.x;
            matrix[(1, col)] = axis.y;
            matrix[(2, col)] = axis.z;
        }
        matrix[(0, 3)] = origin.x;
        matrix[(1, 3)] = origin.y;
        matrix[(2, 3)] = origin.z;
        Self { matrix }
    }

    /// Builds a pose from an origin, an X direction and an approximate Z
    /// direction.
    ///
    /// X is normalized, Z is made orthogonal to X and Y completes the
    /// right-handed set (`Y = Z × X`). When Z is parallel to X a perpendicular
    /// fallback is used.
    pub fn from_x_and_z(
        origin: &Point3<f64>,
        x: &Vector3<f64>,
        z: &Vector3<f64>,
    ) -> Result<Self> {
        let x_len = x.norm();
        if x_len < 1e-12 {
            return Err(Error::InvalidFrame("X direction has zero length".to_string()));
        }
        let x_final = x / x_len;

        // Project Z onto the plane perpendicular to X
        let z_orthogonal = z - x_final * z.dot(&x_final);
        let z_final = if z_orthogonal.norm() > 1e-6 {
            z_orthogonal.normalize()
        } else {
            x_final.cross(&perpendicular(&x_final)).normalize()
        };

        let y_final = z_final.cross(&x_final).normalize();
        Ok(Self::from_frame(origin, &x_final, &y_final, &z_final))
    }

    /// Linear map whose rows are `a`, `b` and `c`.
    ///
    /// For an orthonormal set this takes a world vector to its `(a, b, c)`
    /// components.
    pub fn from_rows(a: &Vector3<f64>, b: &Vector3<f64>, c: &Vector3<f64>) -> Self {
        let mut matrix = Matrix4::identity();
        for (row, axis) in [a, b, c].into_iter().enumerate() {
            matrix[(row, 0)] = axis.x;
            matrix[(row, 1)] = axis.y;
            matrix[(row, 2)] = axis.z;
        }
        Self { matrix }
    }

    /// Returns the underlying matrix.
    pub fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// Applies `inner` first, then `self`.
    pub fn concat(&self, inner: &Transform) -> Transform {
        Transform {
            matrix: self.matrix * inner.matrix,
        }
    }

    /// Returns this pose moved by `offset` in world space.
    pub fn moved(&self, offset: &Vector3<f64>) -> Transform {
        Transform::translation(offset).concat(self)
    }

    /// Returns this pose rotated about `axis` through `origin` by `angle`
    /// radians. A degenerate axis leaves the pose unchanged.
    pub fn rotated(&self, origin: &Point3<f64>, axis: &Vector3<f64>, angle: f64) -> Transform {
        let unit_axis = match Unit::try_new(*axis, 1e-15) {
            Some(a) => a,
            None => return *self,
        };
        let rotation = Rotation3::from_axis_angle(&unit_axis, angle).to_homogeneous();
        let to_origin = Matrix4::new_translation(&-origin.coords);
        let back = Matrix4::new_translation(&origin.coords);
        Transform {
            matrix: back * rotation * to_origin * self.matrix,
        }
    }

    /// Returns this pose scaled about `origin`.
    pub fn scaled(&self, origin: &Point3<f64>, factors: &Vector3<f64>) -> Transform {
        let scale = Matrix4::new_nonuniform_scaling(factors);
        let to_origin = Matrix4::new_translation(&-origin.coords);
        let back = Matrix4::new_translation(&origin.coords);
        Transform {
            matrix: back * scale * to_origin * self.matrix,
        }
    }

    /// Transforms a point (translation applies).
    #[inline]
    pub fn transform_point(&self, p: &Point3<f64>) -> Point3<f64> {
        self.matrix.transform_point(p)
    }

    /// Transforms a direction (translation ignored).
    #[inline]
    pub fn transform_vector(&self, v: &Vector3<f64>) -> Vector3<f64> {
        self.matrix.transform_vector(v)
    }

    /// Local origin in world space.
    pub fn origin(&self) -> Point3<f64> {
        Point3::new(self.matrix[(0, 3)], self.matrix[(1, 3)], self.matrix[(2, 3)])
    }

    pub fn x_axis(&self) -> Vector3<f64> {
        self.column(0)
    }

    pub fn y_axis(&self) -> Vector3<f64> {
        self.column(1)
    }

    pub fn z_axis(&self) -> Vector3<f64> {
        self.column(2)
    }

    fn column(&self, col: usize) -> Vector3<f64> {
        Vector3::new(
            self.matrix[(0, col)],
            self.matrix[(1, col)],
            self.matrix[(2, col)],
        )
    }

    /// Column-major copy of the matrix, the layout GPU and glTF consumers expect.
    pub fn to_column_major(&self) -> [f64; 16] {
        let mut out = [0.0; 16];
        out.copy_from_slice(self.matrix.as_slice());
        out
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Transform {
    type Output = Transform;

    fn mul(self, rhs: Transform) -> Transform {
        self.concat(&rhs)
    }
}

impl Mul<&Transform> for &Transform {
    type Output = Transform;

    fn mul(self, rhs: &Transform) -> Transform {
        self.concat(rhs)
    }
}
