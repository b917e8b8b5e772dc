// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The orthogonal main / cross / normal axis triple of a distribution.

use nalgebra::{Point3, Vector3};
use setout_geometry::axis::{cardinal, is_parallel, x_axis, y_axis, z_axis};
use setout_geometry::BoundingBox;

use crate::error::{Error, Result};

/// Three mutually orthogonal cardinal axes.
///
/// * `main` is the direction elements flow along,
/// * `cross` is the in-plane axis rows are stacked along,
/// * `normal` is orthogonal to both.
///
/// The triple may be left-handed (`normal = −(main × cross)`); see
/// [`AxisTriple::handedness`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisTriple {
    main: Vector3<f64>,
    cross: Vector3<f64>,
    normal: Vector3<f64>,
}

impl AxisTriple {
    /// Validates and snaps three axes.
    ///
    /// Returns an error if any axis is not parallel to a cardinal axis or if
    /// any two axes are parallel.
    pub fn new(main: Vector3<f64>, cross: Vector3<f64>, normal: Vector3<f64>) -> Result<Self> {
        let snap = |role: &'static str, v: &Vector3<f64>| {
            cardinal(v).ok_or(Error::NonCardinalAxis {
                role,
                axis: [v.x, v.y, v.z],
            })
        };
        let main = snap("main", &main)?;
        let cross = snap("cross", &cross)?;
        let normal = snap("normal", &normal)?;

        for (first, a, second, b) in [
            ("main", &main, "cross", &cross),
            ("main", &main, "normal", &normal),
            ("cross", &cross, "normal", &normal),
        ] {
            if is_parallel(a, b) {
                return Err(Error::ParallelAxes { first, second });
            }
        }

        Ok(Self {
            main,
            cross,
            normal,
        })
    }

    /// Right-handed triple with `normal = main × cross`.
    pub fn from_main_cross(main: Vector3<f64>, cross: Vector3<f64>) -> Result<Self> {
        let normal = main.cross(&cross);
        Self::new(main, cross, normal)
    }

    /// Global X / Y / Z.
    pub fn xyz() -> Self {
        Self {
            main: x_axis(),
            cross: y_axis(),
            normal: z_axis(),
        }
    }

    pub fn main(&self) -> Vector3<f64> {
        self.main
    }

    pub fn cross(&self) -> Vector3<f64> {
        self.cross
    }

    pub fn normal(&self) -> Vector3<f64> {
        self.normal
    }

    /// Triple used to lay rows out across the cross axis: main and cross swap
    /// roles, normal is kept.
    pub fn transposed(&self) -> Self {
        Self {
            main: self.cross,
            cross: self.main,
            normal: self.normal,
        }
    }

    /// `+1` for a right-handed triple, `−1` for a left-handed one.
    pub fn handedness(&self) -> f64 {
        self.normal.dot(&self.main.cross(&self.cross)).signum()
    }

    /// Components of `v` along main, cross and normal.
    pub fn components(&self, v: &Vector3<f64>) -> (f64, f64, f64) {
        (v.dot(&self.main), v.dot(&self.cross), v.dot(&self.normal))
    }

    /// World vector from main / cross / normal components.
    pub fn compose(&self, main: f64, cross: f64, normal: f64) -> Vector3<f64> {
        self.main * main + self.cross * cross + self.normal * normal
    }

    /// Box spanning the given ranges along main, cross and normal.
    pub fn box_from_ranges(
        &self,
        main: (f64, f64),
        cross: (f64, f64),
        normal: (f64, f64),
    ) -> BoundingBox {
        let lo = self.compose(main.0, cross.0, normal.0);
        let hi = self.compose(main.1, cross.1, normal.1);
        BoundingBox::from_points([Point3::from(lo), Point3::from(hi)])
    }
}

impl Default for AxisTriple {
    fn default() -> Self {
        Self::xyz()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn accepts_signed_cardinal_axes() {
        let axes = AxisTriple::new(
            Vector3::new(0.0, -2.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        )
        .unwrap();
        assert_eq!(axes.main(), Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(axes.handedness(), 1.0);
    }

    #[test]
    fn rejects_oblique_axis() {
        let err = AxisTriple::new(
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(0.0, 1.0, 0.0),
        )
        .unwrap_err();
        assert!(matches!(err, Error::NonCardinalAxis { role: "main", .. }));
    }

    #[test]
    fn rejects_parallel_axes() {
        let err = AxisTriple::new(
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(-1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            Error::ParallelAxes {
                first: "main",
                second: "cross"
            }
        ));
    }

    #[test]
    fn left_handed_triple() {
        let axes = AxisTriple::new(
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, -1.0),
        )
        .unwrap();
        assert_eq!(axes.handedness(), -1.0);
    }

    #[test]
    fn compose_and_components_are_inverse() {
        let axes = AxisTriple::from_main_cross(Vector3::y(), Vector3::z()).unwrap();
        let v = axes.compose(1.0, 2.0, 3.0);
        assert_relative_eq!(v, Vector3::new(3.0, 1.0, 2.0));
        assert_eq!(axes.components(&v), (1.0, 2.0, 3.0));
    }

    #[test]
    fn box_from_ranges_handles_negative_axes() {
        let axes = AxisTriple::new(-Vector3::x(), Vector3::y(), -Vector3::z()).unwrap();
        let b = axes.box_from_ranges((0.0, 2.0), (0.0, 1.0), (-0.5, 0.5));
        assert_relative_eq!(b.min, Point3::new(-2.0, 0.0, -0.5));
        assert_relative_eq!(b.max, Point3::new(0.0, 1.0, 0.5));
    }
}
