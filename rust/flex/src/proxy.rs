// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Placement records for distributed elements.

use nalgebra::Vector3;
use setout_geometry::{BoundingBox, Placeable};

use crate::axes::AxisTriple;
use crate::error::{Error, Result};

/// Normalized placement record for one source element.
///
/// The distributor fills the four placement vectors in independent passes;
/// the final offset of the element's local origin is their sum plus the fixed
/// [`offset`](Proxy::offset), see [`Proxy::translation`].
#[derive(Debug, Clone, PartialEq)]
pub struct Proxy<T> {
    pub definition: T,
    /// Local-space bounds of the definition.
    pub bounds: BoundingBox,
    /// Per-axis minimum gap (always non-negative).
    pub min_spacing: Vector3<f64>,
    pub alignment: Vector3<f64>,
    pub spacing: Vector3<f64>,
    pub coordination: Vector3<f64>,
    pub setting_out: Vector3<f64>,
    /// Moves the element's flow-wise start face (main axis) and its centre
    /// (cross and normal axes) onto the origin.
    pub offset: Vector3<f64>,
}

impl<T: Placeable> Proxy<T> {
    /// Reads bounds and minimum spacing from `definition`.
    ///
    /// Fails with [`Error::InvertedBounds`] when the reported bounds are
    /// inverted.
    pub fn new(definition: T, axes: &AxisTriple) -> Result<Self> {
        let bounds = checked_bounds(&definition)?;
        let min_spacing = definition.min_spacing().abs();

        let (main_start, _) = bounds.range(&axes.main());
        let (_, cross_center, normal_center) = axes.components(&bounds.center().coords);
        let offset = axes.compose(-main_start, -cross_center, -normal_center);

        Ok(Self {
            definition,
            bounds,
            min_spacing,
            alignment: Vector3::zeros(),
            spacing: Vector3::zeros(),
            coordination: Vector3::zeros(),
            setting_out: Vector3::zeros(),
            offset,
        })
    }
}

impl<T> Proxy<T> {
    /// `setting_out + coordination + spacing + alignment + offset`
    pub fn translation(&self) -> Vector3<f64> {
        self.setting_out + self.coordination + self.spacing + self.alignment + self.offset
    }

    /// Extent of the bounds along `axis`.
    pub fn extent(&self, axis: &Vector3<f64>) -> f64 {
        self.bounds.extent(axis)
    }

    /// Minimum spacing along `axis`.
    pub fn min_spacing_along(&self, axis: &Vector3<f64>) -> f64 {
        self.min_spacing.dot(&axis.abs())
    }
}

/// Bounds of `item`, rejecting inverted boxes.
pub(crate) fn checked_bounds<T: Placeable + ?Sized>(item: &T) -> Result<BoundingBox> {
    let bounds = item.bounds();
    if bounds.is_inverted() {
        return Err(Error::InvertedBounds {
            name: item.name().to_string(),
            min: [bounds.min.x, bounds.min.y, bounds.min.z],
            max: [bounds.max.x, bounds.max.y, bounds.max.z],
        });
    }
    Ok(bounds)
}

/// Occupied length of a row of `(extent, min_spacing)` pairs along the main
/// axis.
///
/// With `with_min_spacing` each gap is the larger of the two neighbours'
/// minimum spacing; without it gaps count as zero.
pub fn occupied_length<I>(items: I, with_min_spacing: bool) -> f64
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut total = 0.0;
    let mut previous: Option<f64> = None;
    for (extent, min_spacing) in items {
        total += extent;
        if with_min_spacing {
            if let Some(prev) = previous {
                total += prev.max(min_spacing);
            }
        }
        previous = Some(min_spacing);
    }
    total
}

/// Occupied main-axis length of a row of proxies.
pub fn main_dimension<T>(proxies: &[Proxy<T>], main: &Vector3<f64>, with_min_spacing: bool) -> f64 {
    occupied_length(
        proxies
            .iter()
            .map(|p| (p.extent(main), p.min_spacing_along(main))),
        with_min_spacing,
    )
}
