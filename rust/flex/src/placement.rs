// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Turning resolved proxies into placed instances along a curve.

use nalgebra::Vector3;
use setout_geometry::{CircularArc, Curve, Instance, Transform};

use crate::axes::AxisTriple;
use crate::error::{Error, Result};
use crate::proxy::Proxy;

/// Places the proxy's definition on `curve`.
///
/// On a line the translation is applied literally from the line start. On an
/// arc the main component is read as an arc length and the element is
/// carried by the tangent frame there, see [`arc_transform`].
pub fn place<T: Clone>(
    curve: &Curve,
    axes: &AxisTriple,
    proxy: &Proxy<T>,
) -> Result<Instance<T>> {
    let transform = match curve {
        Curve::Line(line) => Transform::translation(&(line.start.coords + proxy.translation())),
        Curve::Arc(arc) => arc_transform(arc, axes, &proxy.translation(), &proxy.offset),
        other => return Err(Error::UnsupportedCurve(other.kind())),
    };
    Ok(Instance::new(proxy.definition.clone(), transform))
}

/// Pose of an element on `arc`.
///
/// The element's main-axis start face sits at arc length
/// `(translation − offset) · main` and its main axis follows the tangent.
/// Cross components map to the frame's in-plane axis (towards the centre),
/// normal components to the arc normal.
pub fn arc_transform(
    arc: &CircularArc,
    axes: &AxisTriple,
    translation: &Vector3<f64>,
    offset: &Vector3<f64>,
) -> Transform {
    let (u, cross, normal) = axes.components(translation);
    let start_offset = offset.dot(&axes.main());
    let along = u - start_offset;

    // World axes to main / cross / (main × cross) components.
    let to_local = Transform::from_rows(
        &axes.main(),
        &axes.cross(),
        &axes.main().cross(&axes.cross()),
    );
    let shift = Transform::translation(&Vector3::new(
        start_offset,
        cross,
        normal * axes.handedness(),
    ));

    arc.frame_at_length(along).concat(&shift).concat(&to_local)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;
    use setout_geometry::{BoundingBox, Element, Line, Polyline};
    use std::f64::consts::FRAC_PI_2;

    fn proxy(bounds: BoundingBox) -> Proxy<Element> {
        Proxy::new(Element::new("e", bounds), &AxisTriple::xyz()).unwrap()
    }

    #[test]
    fn line_placement_is_a_translation() {
        let line: Curve = Line::new(Point3::new(1.0, 2.0, 3.0), Point3::new(5.0, 2.0, 3.0)).into();
        let mut p = proxy(BoundingBox::from_size(&Vector3::new(0.5, 0.2, 0.1)));
        p.coordination = Vector3::new(1.0, 0.0, 0.0);
        let inst = place(&line, &AxisTriple::xyz(), &p).unwrap();
        let origin = inst.transform.origin();
        assert_relative_eq!(origin, Point3::new(2.0, 1.9, 2.95), epsilon = 1e-12);
    }

    #[test]
    fn arc_start_face_lands_on_the_arc() {
        let arc = CircularArc::in_xy_plane(Point3::origin(), 2.0, 0.0, FRAC_PI_2).unwrap();
        let mut p = proxy(BoundingBox::new(
            Point3::new(0.3, -0.1, -0.1),
            Point3::new(0.5, 0.1, 0.1),
        ));
        p.coordination = Vector3::new(1.0, 0.0, 0.0);
        let inst = place(&Curve::Arc(arc), &AxisTriple::xyz(), &p).unwrap();

        // Centre of the start face is at local (0.3, 0, 0).
        let placed = inst.transform.transform_point(&Point3::new(0.3, 0.0, 0.0));
        assert_relative_eq!(placed, arc.point_at_length(1.0), epsilon = 1e-12);

        // Main axis follows the tangent.
        let dir = inst.transform.transform_vector(&Vector3::x());
        assert_relative_eq!(dir, arc.tangent_at_angle(0.5), epsilon = 1e-12);
    }

    #[test]
    fn arc_normal_offset_follows_arc_normal() {
        let arc = CircularArc::in_xy_plane(Point3::origin(), 1.0, 0.0, FRAC_PI_2).unwrap();
        let mut p = proxy(BoundingBox::from_size(&Vector3::zeros()));
        p.setting_out = Vector3::new(0.0, 0.0, 0.25);
        let inst = place(&Curve::Arc(arc), &AxisTriple::xyz(), &p).unwrap();
        assert_relative_eq!(inst.transform.origin(), Point3::new(1.0, 0.0, 0.25), epsilon = 1e-12);
    }

    #[test]
    fn polyline_is_unsupported() {
        let path: Curve = Polyline::new(vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0)]).into();
        let p = proxy(BoundingBox::from_size(&Vector3::new(0.1, 0.1, 0.1)));
        let err = place(&path, &AxisTriple::xyz(), &p).unwrap_err();
        assert!(matches!(err, Error::UnsupportedCurve("Polyline")));
    }
}
