// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Typed key-value properties that can be attached to any element.

use nalgebra::Vector3;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Property key carrying an element's per-axis minimum spacing.
pub const MIN_SPACING: &str = "MinSpacing";

/// A typed value stored in a property map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Int(i64),
    Double(f64),
    String(String),
    Vector([f64; 3]),
    List(Vec<PropertyValue>),
}

impl PropertyValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            PropertyValue::Int(i) => Some(*i as f64),
            PropertyValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Reads the value as a vector. Scalars expand to the same value on every
    /// axis.
    pub fn as_vector(&self) -> Option<Vector3<f64>> {
        match self {
            PropertyValue::Vector(v) => Some(Vector3::new(v[0], v[1], v[2])),
            other => other.as_f64().map(|d| Vector3::new(d, d, d)),
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<Vector3<f64>> for PropertyValue {
    fn from(v: Vector3<f64>) -> Self {
        PropertyValue::Vector([v.x, v.y, v.z])
    }
}

impl From<f64> for PropertyValue {
    fn from(d: f64) -> Self {
        PropertyValue::Double(d)
    }
}

/// A property map attached to an element.
pub type Properties = FxHashMap<String, PropertyValue>;
