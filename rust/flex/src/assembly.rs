// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One placed row, treated as a single item by the cross-axis pass.

use setout_geometry::{BoundingBox, Instance, Placeable, Transform};

use crate::axes::AxisTriple;
use crate::justify::SettingOut;

/// Components of one main-axis row with theoretical bounds.
///
/// The bounds span the full path length along main and a fixed band along
/// normal, so every row of a layout is the same size on those axes. Only the
/// cross range follows the components, and nothing guarantees the bounds
/// contain all component geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Assembly<T> {
    pub components: Vec<Instance<T>>,
    pub bounds: BoundingBox,
}

impl<T: Placeable> Assembly<T> {
    /// Groups the instances of one row laid out from the origin along
    /// `axes.main()`.
    ///
    /// The normal band is `normal_extent` wide and positioned so that, once
    /// set out with `normal_setting_out`, the components sit flush with the
    /// matching side of the band. An empty row gets a band centred on zero.
    pub fn from_row(
        components: Vec<Instance<T>>,
        axes: &AxisTriple,
        path_length: f64,
        normal_extent: f64,
        normal_setting_out: SettingOut,
    ) -> Self {
        let placed = components
            .iter()
            .fold(BoundingBox::empty(), |acc, c| acc.merge(&c.world_bounds()));

        let (cross, normal) = if placed.is_inverted() {
            ((0.0, 0.0), (-normal_extent / 2.0, normal_extent / 2.0))
        } else {
            let (lo, hi) = placed.range(&axes.normal());
            let normal = match normal_setting_out {
                SettingOut::Start => (lo, lo + normal_extent),
                SettingOut::Center => (-normal_extent / 2.0, normal_extent / 2.0),
                SettingOut::End => (hi - normal_extent, hi),
            };
            (placed.range(&axes.cross()), normal)
        };

        let bounds = axes.box_from_ranges((0.0, path_length), cross, normal);
        Self { components, bounds }
    }
}

impl<T: Clone> Assembly<T> {
    /// Components re-placed inside an assembly pose.
    pub fn components_at(&self, transform: &Transform) -> Vec<Instance<T>> {
        self.components
            .iter()
            .map(|c| c.placed_within(transform))
            .collect()
    }
}

impl<T> Placeable for Assembly<T> {
    fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    fn name(&self) -> &str {
        "assembly"
    }
}
