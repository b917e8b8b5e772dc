// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Setout Geometry
//!
//! The small geometry kernel consumed by the Setout layout engine: poses,
//! Line/Arc/Polyline curves with arc-length parametrization, axis-aligned
//! bounds, and element/instance pairing with attachable properties. Built on
//! nalgebra.

pub mod axis;
pub mod bounds;
pub mod curve;
pub mod element;
pub mod error;
pub mod properties;
pub mod transform;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};

pub use bounds::BoundingBox;
pub use curve::{CircularArc, Curve, Line, Polyline};
pub use element::{Element, Instance, Placeable};
pub use error::{Error, Result};
pub use properties::{Properties, PropertyValue, MIN_SPACING};
pub use transform::Transform;
