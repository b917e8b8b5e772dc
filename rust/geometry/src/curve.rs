// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Paths that elements are distributed along.
//!
//! Every curve is parametrized both by a normalized parameter `t` (0 at the
//! start, 1 at the end) and by arc length. Evaluation is *unbound*: parameters
//! outside the curve's domain extrapolate along the same line or circle, so
//! elements that overflow a path still get a well-defined placement.

use nalgebra::{Point3, Vector3};

use crate::axis::perpendicular;
use crate::error::{Error, Result};
use crate::transform::Transform;

/// Straight segment between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl Line {
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    /// Unit direction from start to end, `None` for a zero-length segment.
    pub fn direction(&self) -> Option<Vector3<f64>> {
        let d = self.end - self.start;
        let len = d.norm();
        (len > 1e-12).then(|| d / len)
    }

    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.start + (self.end - self.start) * t
    }

    pub fn point_at_length(&self, s: f64) -> Point3<f64> {
        match self.direction() {
            Some(dir) => self.start + dir * s,
            None => self.start,
        }
    }

    /// Tangent frame at arc length `s`: X follows the segment.
    pub fn frame_at_length(&self, s: f64) -> Result<Transform> {
        let dir = self
            .direction()
            .ok_or_else(|| Error::degenerate("line has zero length"))?;
        let z = dir.cross(&perpendicular(&dir));
        Transform::from_x_and_z(&self.point_at_length(s), &dir, &z)
    }
}

/// Circular arc swept counter-clockwise about `normal`.
///
/// The point at angle `θ` is `center + radius * (cos θ · x_axis + sin θ · y_axis)`
/// where `y_axis = normal × x_axis`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircularArc {
    pub center: Point3<f64>,
    pub x_axis: Vector3<f64>,
    pub normal: Vector3<f64>,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl CircularArc {
    /// Creates an arc, orthonormalizing `x_axis` against `normal`.
    pub fn new(
        center: Point3<f64>,
        x_axis: Vector3<f64>,
        normal: Vector3<f64>,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<Self> {
        if !(radius > 0.0) {
            return Err(Error::degenerate(format!("arc radius must be positive, got {radius}")));
        }
        if !(end_angle > start_angle) {
            return Err(Error::degenerate(format!(
                "arc must sweep counter-clockwise: start {start_angle} end {end_angle}"
            )));
        }
        let n_len = normal.norm();
        if n_len < 1e-12 {
            return Err(Error::degenerate("arc normal has zero length"));
        }
        let normal = normal / n_len;
        let x = x_axis - normal * x_axis.dot(&normal);
        if x.norm() < 1e-12 {
            return Err(Error::degenerate("arc x axis is parallel to its normal"));
        }

        Ok(Self {
            center,
            x_axis: x.normalize(),
            normal,
            radius,
            start_angle,
            end_angle,
        })
    }

    /// Arc in the global XY plane.
    pub fn in_xy_plane(
        center: Point3<f64>,
        radius: f64,
        start_angle: f64,
        end_angle: f64,
    ) -> Result<Self> {
        Self::new(
            center,
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            radius,
            start_angle,
            end_angle,
        )
    }

    pub fn y_axis(&self) -> Vector3<f64> {
        self.normal.cross(&self.x_axis)
    }

    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn length(&self) -> f64 {
        self.radius * self.sweep()
    }

    pub fn point_at_angle(&self, angle: f64) -> Point3<f64> {
        self.center + (self.x_axis * angle.cos() + self.y_axis() * angle.sin()) * self.radius
    }

    /// Unit tangent in the direction of travel.
    pub fn tangent_at_angle(&self, angle: f64) -> Vector3<f64> {
        self.x_axis * -angle.sin() + self.y_axis() * angle.cos()
    }

    pub fn point_at(&self, t: f64) -> Point3<f64> {
        self.point_at_angle(self.start_angle + t * self.sweep())
    }

    pub fn point_at_length(&self, s: f64) -> Point3<f64> {
        self.point_at_angle(self.start_angle + s / self.radius)
    }

    /// Tangent frame at arc length `s`.
    ///
    /// X is the tangent, Z the arc normal and Y (`Z × X`) points towards the
    /// centre.
    pub fn frame_at_length(&self, s: f64) -> Transform {
        let angle = self.start_angle + s / self.radius;
        let x = self.tangent_at_angle(angle);
        let y = self.normal.cross(&x);
        Transform::from_frame(&self.point_at_angle(angle), &x, &y, &self.normal)
    }

    pub fn start_point(&self) -> Point3<f64> {
        self.point_at_angle(self.start_angle)
    }

    pub fn end_point(&self) -> Point3<f64> {
        self.point_at_angle(self.end_angle)
    }
}

/// Open chain of straight segments.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub points: Vec<Point3<f64>>,
}

impl Polyline {
    pub fn new(points: Vec<Point3<f64>>) -> Self {
        Self { points }
    }

    pub fn length(&self) -> f64 {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }

    /// Point at arc length `s`; the first and last segments extrapolate.
    pub fn point_at_length(&self, s: f64) -> Result<Point3<f64>> {
        match self.points.len() {
            0 => return Err(Error::degenerate("polyline has no points")),
            1 => return Ok(self.points[0]),
            _ => {}
        }

        let last = self.points.len() - 2;
        let mut walked = 0.0;
        for (i, w) in self.points.windows(2).enumerate() {
            let segment = Line::new(w[0], w[1]);
            let len = segment.length();
            if s <= walked + len || i == last {
                return Ok(segment.point_at_length(s - walked));
            }
            walked += len;
        }
        Ok(self.points[self.points.len() - 1])
    }
}

/// Any path the kernel can evaluate.
#[derive(Debug, Clone, PartialEq)]
pub enum Curve {
    Line(Line),
    Arc(CircularArc),
    Polyline(Polyline),
}

impl Curve {
    /// Returns the curve kind as a string.
    pub fn kind(&self) -> &'static str {
        match self {
            Curve::Line(_) => "Line",
            Curve::Arc(_) => "Arc",
            Curve::Polyline(_) => "Polyline",
        }
    }

    pub fn length(&self) -> f64 {
        match self {
            Curve::Line(l) => l.length(),
            Curve::Arc(a) => a.length(),
            Curve::Polyline(p) => p.length(),
        }
    }

    pub fn point_at_length(&self, s: f64) -> Result<Point3<f64>> {
        match self {
            Curve::Line(l) => Ok(l.point_at_length(s)),
            Curve::Arc(a) => Ok(a.point_at_length(s)),
            Curve::Polyline(p) => p.point_at_length(s),
        }
    }

    /// Point at normalized parameter `t`.
    pub fn point_at(&self, t: f64) -> Result<Point3<f64>> {
        match self {
            Curve::Line(l) => Ok(l.point_at(t)),
            Curve::Arc(a) => Ok(a.point_at(t)),
            Curve::Polyline(p) => p.point_at_length(t * p.length()),
        }
    }

    pub fn start_point(&self) -> Result<Point3<f64>> {
        self.point_at_length(0.0)
    }
}

impl From<Line> for Curve {
    fn from(line: Line) -> Self {
        Curve::Line(line)
    }
}

impl From<CircularArc> for Curve {
    fn from(arc: CircularArc) -> Self {
        Curve::Arc(arc)
    }
}

impl From<Polyline> for Curve {
    fn from(polyline: Polyline) -> Self {
        Curve::Polyline(polyline)
    }
}
