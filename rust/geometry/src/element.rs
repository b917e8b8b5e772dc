// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Elements, placed instances and the [`Placeable`] capability.
//!
//! An [`Element`] is a reusable definition with local-space bounds. An
//! [`Instance`] pairs a definition with a placement transform. Anything that
//! can report bounds implements [`Placeable`] and can be distributed by a
//! layout pass, including instances themselves (their world bounds are
//! recomputed through the transform).

use std::sync::Arc;

use nalgebra::Vector3;

use crate::bounds::BoundingBox;
use crate::properties::{Properties, PropertyValue, MIN_SPACING};
use crate::transform::Transform;

/// Capability of anything that can be laid out.
pub trait Placeable {
    /// Axis-aligned bounds in the item's own coordinate space.
    fn bounds(&self) -> BoundingBox;

    /// Per-axis minimum gap to keep next to this item.
    fn min_spacing(&self) -> Vector3<f64> {
        Vector3::zeros()
    }

    /// Display name used in logs and snapshots.
    fn name(&self) -> &str {
        ""
    }
}

/// A reusable element definition.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub name: String,
    pub bounds: BoundingBox,
    pub properties: Properties,
}

impl Element {
    pub fn new(name: impl Into<String>, bounds: BoundingBox) -> Self {
        Self {
            name: name.into(),
            bounds,
            properties: Properties::default(),
        }
    }

    /// Element occupying the box from the origin to `size`.
    pub fn from_size(name: impl Into<String>, size: Vector3<f64>) -> Self {
        Self::new(name, BoundingBox::from_size(&size))
    }

    pub fn with_property(mut self, key: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Attaches the `MinSpacing` property.
    pub fn with_min_spacing(self, spacing: Vector3<f64>) -> Self {
        self.with_property(MIN_SPACING, spacing.into())
    }

    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Wraps the element for cheap sharing between many instances.
    pub fn shared(self) -> Arc<Element> {
        Arc::new(self)
    }
}

impl Placeable for Element {
    fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    fn min_spacing(&self) -> Vector3<f64> {
        self.property(MIN_SPACING)
            .and_then(PropertyValue::as_vector)
            .map(|v| v.abs())
            .unwrap_or_else(Vector3::zeros)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl<T: Placeable + ?Sized> Placeable for Arc<T> {
    fn bounds(&self) -> BoundingBox {
        (**self).bounds()
    }

    fn min_spacing(&self) -> Vector3<f64> {
        (**self).min_spacing()
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// A definition placed in space.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance<T> {
    pub definition: T,
    pub transform: Transform,
}

impl<T> Instance<T> {
    pub fn new(definition: T, transform: Transform) -> Self {
        Self {
            definition,
            transform,
        }
    }

    /// Returns the same definition placed by `outer ∘ self.transform`.
    pub fn placed_within(&self, outer: &Transform) -> Instance<T>
    where
        T: Clone,
    {
        Instance::new(self.definition.clone(), outer.concat(&self.transform))
    }
}

impl<T: Placeable> Instance<T> {
    /// World-space box around the transformed definition bounds.
    pub fn world_bounds(&self) -> BoundingBox {
        self.definition.bounds().transformed(&self.transform)
    }
}

impl<T: Placeable> Placeable for Instance<T> {
    fn bounds(&self) -> BoundingBox {
        self.world_bounds()
    }

    fn min_spacing(&self) -> Vector3<f64> {
        self.definition.min_spacing()
    }

    fn name(&self) -> &str {
        self.definition.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    #[test]
    fn element_min_spacing_from_property() {
        let plain = Element::from_size("brick", Vector3::new(0.215, 0.1, 0.065));
        assert_eq!(plain.min_spacing(), Vector3::zeros());

        let spaced = plain.clone().with_min_spacing(Vector3::new(-0.01, 0.0, 0.0));
        assert_relative_eq!(spaced.min_spacing(), Vector3::new(0.01, 0.0, 0.0));

        let uniform = plain.with_property(MIN_SPACING, PropertyValue::Double(0.02));
        assert_relative_eq!(uniform.min_spacing(), Vector3::new(0.02, 0.02, 0.02));
    }

    #[test]
    fn shared_elements_delegate() {
        let shared = Element::from_size("tile", Vector3::new(1.0, 2.0, 3.0)).shared();
        assert_eq!(shared.name(), "tile");
        assert_relative_eq!(shared.bounds().size(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn instance_recomputes_world_bounds() {
        let element = Element::from_size("panel", Vector3::new(1.0, 1.0, 1.0)).shared();
        let instance = Instance::new(
            element,
            Transform::translation(&Vector3::new(2.0, 0.0, 0.0)),
        );
        let world = instance.bounds();
        assert_relative_eq!(world.min, Point3::new(2.0, 0.0, 0.0));
        assert_relative_eq!(world.max, Point3::new(3.0, 1.0, 1.0));
        assert_eq!(instance.name(), "panel");
    }

    #[test]
    fn placed_within_composes_outer_transform() {
        let element = Element::from_size("panel", Vector3::new(1.0, 1.0, 1.0)).shared();
        let inner = Instance::new(element, Transform::translation(&Vector3::new(1.0, 0.0, 0.0)));
        let outer = Transform::translation(&Vector3::new(0.0, 5.0, 0.0));
        let placed = inner.placed_within(&outer);
        assert_relative_eq!(placed.transform.origin(), Point3::new(1.0, 5.0, 0.0));
    }
}
