// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cardinal axis helpers.
//!
//! Layout axes must run along the global X, Y or Z directions (either sign).
//! These helpers recognise such vectors and snap them to exact unit vectors so
//! that later dot products are free of accumulated noise.

use nalgebra::Vector3;

/// Angular tolerance used when deciding whether two directions coincide.
pub const AXIS_TOLERANCE: f64 = 1e-9;

/// Global X direction.
pub fn x_axis() -> Vector3<f64> {
    Vector3::new(1.0, 0.0, 0.0)
}

/// Global Y direction.
pub fn y_axis() -> Vector3<f64> {
    Vector3::new(0.0, 1.0, 0.0)
}

/// Global Z direction.
pub fn z_axis() -> Vector3<f64> {
    Vector3::new(0.0, 0.0, 1.0)
}

/// Snaps a direction to the signed cardinal axis it is parallel to.
///
/// Returns `None` for zero vectors and for directions that are not parallel
/// to X, Y or Z.
pub fn cardinal(v: &Vector3<f64>) -> Option<Vector3<f64>> {
    let len = v.norm();
    if len < AXIS_TOLERANCE {
        return None;
    }
    let u = v / len;

    let mut snapped = Vector3::zeros();
    let mut hits = 0;
    for i in 0..3 {
        if (u[i].abs() - 1.0).abs() <= AXIS_TOLERANCE {
            snapped[i] = u[i].signum();
            hits += 1;
        } else if u[i].abs() > AXIS_TOLERANCE {
            return None;
        }
    }

    (hits == 1).then_some(snapped)
}

/// Returns `true` if the vector is parallel to a cardinal axis.
#[inline]
pub fn is_cardinal(v: &Vector3<f64>) -> bool {
    cardinal(v).is_some()
}

/// Returns `true` if two directions are parallel (or anti-parallel).
///
/// Zero vectors are treated as parallel to everything.
pub fn is_parallel(a: &Vector3<f64>, b: &Vector3<f64>) -> bool {
    let scale = a.norm() * b.norm();
    if scale < AXIS_TOLERANCE {
        return true;
    }
    a.cross(b).norm() <= AXIS_TOLERANCE * scale
}

/// Returns a unit vector perpendicular to `dir`.
///
/// Uses global Z as the reference unless `dir` is (nearly) vertical, in which
/// case global X is used instead.
pub fn perpendicular(dir: &Vector3<f64>) -> Vector3<f64> {
    let reference = if dir.z.abs() < 0.9 { z_axis() } else { x_axis() };
    reference.cross(dir).normalize()
}
