// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Axis-aligned bounding boxes.

use nalgebra::{Point3, Vector3};

use crate::transform::Transform;

/// Axis-aligned box in f64 precision.
///
/// A freshly created [`BoundingBox::empty`] box is *inverted* (min > max)
/// until at least one point is added; inverted boxes signal an invalid
/// upstream geometric result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl BoundingBox {
    /// Creates a box from explicit corners. No validation is performed.
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    /// Box spanning from the origin to `size`.
    pub fn from_size(size: &Vector3<f64>) -> Self {
        Self::from_points([Point3::origin(), Point3::from(*size)])
    }

    /// Box of the given size centred on `center`.
    pub fn centered(center: &Point3<f64>, size: &Vector3<f64>) -> Self {
        let half = size.abs() / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Inverted box that any expansion will overwrite.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::MAX, f64::MAX, f64::MAX),
            max: Point3::new(f64::MIN, f64::MIN, f64::MIN),
        }
    }

    /// Smallest box containing every point; inverted if the iterator is empty.
    pub fn from_points<I>(points: I) -> Self
    where
        I: IntoIterator<Item = Point3<f64>>,
    {
        let mut bounds = Self::empty();
        for p in points {
            bounds.expand(&p);
        }
        bounds
    }

    /// Expand the box to include a point.
    #[inline]
    pub fn expand(&mut self, p: &Point3<f64>) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// Union of two boxes. Inverted operands are ignored.
    pub fn merge(&self, other: &BoundingBox) -> BoundingBox {
        if self.is_inverted() {
            return *other;
        }
        if other.is_inverted() {
            return *self;
        }
        BoundingBox {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }

    /// Union of many boxes; inverted when nothing valid was supplied.
    pub fn merge_all<'a, I>(boxes: I) -> BoundingBox
    where
        I: IntoIterator<Item = &'a BoundingBox>,
    {
        boxes
            .into_iter()
            .fold(BoundingBox::empty(), |acc, b| acc.merge(b))
    }

    /// `true` when min exceeds max on any axis.
    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Edge lengths along X, Y and Z.
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    pub fn center(&self) -> Point3<f64> {
        Point3::from((self.min.coords + self.max.coords) / 2.0)
    }

    /// Length of the box's shadow on `axis`.
    ///
    /// For a cardinal unit axis this is simply the matching edge length.
    pub fn extent(&self, axis: &Vector3<f64>) -> f64 {
        let (lo, hi) = self.range(axis);
        hi - lo
    }

    /// Minimum and maximum of `p · axis` over the box.
    pub fn range(&self, axis: &Vector3<f64>) -> (f64, f64) {
        let center = self.center().coords.dot(axis);
        let half = self.size().abs().dot(&axis.abs()) / 2.0;
        (center - half, center + half)
    }

    /// The eight corners of the box.
    pub fn corners(&self) -> [Point3<f64>; 8] {
        let (a, b) = (self.min, self.max);
        [
            Point3::new(a.x, a.y, a.z),
            Point3::new(b.x, a.y, a.z),
            Point3::new(a.x, b.y, a.z),
            Point3::new(b.x, b.y, a.z),
            Point3::new(a.x, a.y, b.z),
            Point3::new(b.x, a.y, b.z),
            Point3::new(a.x, b.y, b.z),
            Point3::new(b.x, b.y, b.z),
        ]
    }

    /// Recomputes a world-aligned box around this box moved by `transform`.
    pub fn transformed(&self, transform: &Transform) -> BoundingBox {
        if self.is_inverted() {
            return *self;
        }
        BoundingBox::from_points(self.corners().iter().map(|c| transform.transform_point(c)))
    }

    /// Returns `true` if `p` lies inside the box grown by `tolerance`.
    pub fn contains(&self, p: &Point3<f64>, tolerance: f64) -> bool {
        p.x >= self.min.x - tolerance
            && p.y >= self.min.y - tolerance
            && p.z >= self.min.z - tolerance
            && p.x <= self.max.x + tolerance
            && p.y <= self.max.y + tolerance
            && p.z <= self.max.z + tolerance
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn empty_box_is_inverted() {
        assert!(BoundingBox::empty().is_inverted());
        assert!(BoundingBox::from_points(std::iter::empty()).is_inverted());
    }

    #[test]
    fn from_points_and_size() {
        let b = BoundingBox::from_points([Point3::new(1.0, -1.0, 0.0), Point3::new(-2.0, 3.0, 4.0)]);
        assert!(!b.is_inverted());
        assert_relative_eq!(b.size(), Vector3::new(3.0, 4.0, 4.0));
        assert_relative_eq!(b.center(), Point3::new(-0.5, 1.0, 2.0));
    }

    #[test]
    fn merge_ignores_inverted() {
        let a = BoundingBox::from_size(&Vector3::new(1.0, 1.0, 1.0));
        let merged = a.merge(&BoundingBox::empty());
        assert_eq!(merged, a);

        let b = BoundingBox::new(Point3::new(2.0, 0.0, 0.0), Point3::new(3.0, 1.0, 1.0));
        let all = BoundingBox::merge_all([&a, &b]);
        assert_relative_eq!(all.min, Point3::origin());
        assert_relative_eq!(all.max, Point3::new(3.0, 1.0, 1.0));
    }

    #[test]
    fn extent_and_range_along_signed_axes() {
        let b = BoundingBox::new(Point3::new(1.0, 2.0, 3.0), Point3::new(4.0, 6.0, 8.0));
        assert_relative_eq!(b.extent(&Vector3::new(0.0, 1.0, 0.0)), 4.0);

        let (lo, hi) = b.range(&Vector3::new(-1.0, 0.0, 0.0));
        assert_relative_eq!(lo, -4.0);
        assert_relative_eq!(hi, -1.0);
    }

    #[test]
    fn transformed_box_recomputes_world_bounds() {
        let b = BoundingBox::from_size(&Vector3::new(2.0, 1.0, 1.0));
        let t = Transform::identity().rotated(&Point3::origin(), &Vector3::new(0.0, 0.0, 1.0), FRAC_PI_2);
        let w = b.transformed(&t);
        assert_relative_eq!(w.min, Point3::new(-1.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(w.max, Point3::new(0.0, 2.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn centered_box_contains_center() {
        let b = BoundingBox::centered(&Point3::new(1.0, 1.0, 1.0), &Vector3::new(2.0, 2.0, 2.0));
        assert!(b.contains(&Point3::new(1.0, 1.0, 1.0), 0.0));
        assert!(!b.contains(&Point3::new(3.5, 1.0, 1.0), 1e-9));
    }
}
