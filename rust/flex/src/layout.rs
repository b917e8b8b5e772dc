// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Built 2D layouts and their portable snapshots.

use serde::{Deserialize, Serialize};
use setout_geometry::{BoundingBox, Instance, Placeable, Transform};

use crate::assembly::Assembly;
use crate::error::{Error, Result};
use crate::sequence::Termination;

/// Result of [`Flex2d::build`](crate::Flex2d::build).
#[derive(Debug, Clone)]
pub struct Layout<T> {
    /// Placed rows, in cross-axis order.
    pub assemblies: Vec<Instance<Assembly<T>>>,
    /// Every component in world space, row by row.
    pub instances: Vec<Instance<T>>,
    /// How the cross-axis sequence ended.
    pub termination: Termination,
}

impl<T: Clone> Layout<T> {
    pub(crate) fn new(assemblies: Vec<Instance<Assembly<T>>>, termination: Termination) -> Self {
        let instances = assemblies
            .iter()
            .flat_map(|row| row.definition.components_at(&row.transform))
            .collect();
        Self {
            assemblies,
            instances,
            termination,
        }
    }
}

impl<T> Layout<T> {
    pub fn row_count(&self) -> usize {
        self.assemblies.len()
    }
}

impl<T: Placeable> Layout<T> {
    /// World-space box around every placed component.
    pub fn bounds(&self) -> BoundingBox {
        self.instances
            .iter()
            .fold(BoundingBox::empty(), |acc, i| acc.merge(&i.world_bounds()))
    }

    pub fn snapshot(&self) -> LayoutSnapshot {
        let rows = self
            .assemblies
            .iter()
            .map(|row| RowSnapshot {
                transform: row.transform.to_column_major(),
                bounds: BoundsSnapshot::from(&row.world_bounds()),
                components: row
                    .definition
                    .components
                    .iter()
                    .map(|c| InstanceSnapshot::placed(&c.definition, &row.transform.concat(&c.transform)))
                    .collect(),
            })
            .collect();
        LayoutSnapshot {
            instance_count: self.instances.len(),
            rows,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(&self.snapshot()).map_err(|e| Error::Snapshot(e.to_string()))
    }
}

/// Serializable view of a [`Layout`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSnapshot {
    pub instance_count: usize,
    pub rows: Vec<RowSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowSnapshot {
    /// Column-major 4×4 pose of the row.
    pub transform: [f64; 16],
    pub bounds: BoundsSnapshot,
    pub components: Vec<InstanceSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceSnapshot {
    pub name: String,
    /// Column-major 4×4 world pose.
    pub transform: [f64; 16],
    pub bounds: BoundsSnapshot,
}

impl InstanceSnapshot {
    pub fn from_instance<T: Placeable>(instance: &Instance<T>) -> Self {
        Self::placed(&instance.definition, &instance.transform)
    }

    /// Snapshot of `definition` placed by `transform`.
    pub fn placed<T: Placeable + ?Sized>(definition: &T, transform: &Transform) -> Self {
        Self {
            name: definition.name().to_string(),
            transform: transform.to_column_major(),
            bounds: BoundsSnapshot::from(&definition.bounds().transformed(transform)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundsSnapshot {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl From<&BoundingBox> for BoundsSnapshot {
    fn from(b: &BoundingBox) -> Self {
        Self {
            min: [b.min.x, b.min.y, b.min.z],
            max: [b.max.x, b.max.y, b.max.z],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::{Point3, Vector3};
    use setout_geometry::Element;

    use crate::axes::AxisTriple;
    use crate::justify::SettingOut;
    use crate::sequence::StopReason;

    fn layout() -> Layout<Element> {
        let e = Element::from_size("slab", Vector3::new(1.0, 0.5, 0.2));
        let row = Assembly::from_row(
            vec![Instance::new(e, Transform::translation(&Vector3::new(0.5, 0.0, 0.0)))],
            &AxisTriple::xyz(),
            2.0,
            1.0,
            SettingOut::Center,
        );
        Layout::new(
            vec![Instance::new(row, Transform::translation(&Vector3::new(0.0, 3.0, 0.0)))],
            Termination::Stopped(StopReason::BodyExhausted),
        )
    }

    #[test]
    fn instances_are_flattened_into_world_space() {
        let layout = layout();
        assert_eq!(layout.row_count(), 1);
        assert_relative_eq!(layout.instances[0].transform.origin(), Point3::new(0.5, 3.0, 0.0));
        assert_relative_eq!(layout.bounds().max, Point3::new(1.5, 3.5, 0.2));
    }

    #[test]
    fn snapshot_matches_flattened_instances() {
        let layout = layout();
        let snapshot = layout.snapshot();
        assert_eq!(snapshot.instance_count, 1);
        let component = &snapshot.rows[0].components[0];
        assert_eq!(component, &InstanceSnapshot::from_instance(&layout.instances[0]));
        assert_eq!(component.name, "slab");
        assert_relative_eq!(component.transform[13], 3.0);
    }

    #[test]
    fn snapshot_json_reads_back() {
        let layout = layout();
        let json = layout.to_json().unwrap();
        let back: LayoutSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layout.snapshot());
    }
}
