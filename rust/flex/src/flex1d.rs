// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! One-dimensional distribution along a Line or Arc.
//!
//! A [`Flex1d`] asks its [`SequenceBuilder`] for the elements that fit the
//! path, wraps them in [`Proxy`] records and resolves placement in three
//! passes:
//!
//! 1. main-axis justification (setting-out, spacing and coordination),
//! 2. cross and normal alignment against the row's largest extent,
//! 3. cross and normal setting-out of the whole row.
//!
//! ```
//! use setout_flex::{Constraint, Flex1d, Justification, SequenceBuilder};
//! use setout_geometry::{Element, Line, Point3, Vector3};
//!
//! let brick = Element::from_size("brick", Vector3::new(0.215, 0.1025, 0.065));
//! let row = Flex1d::new(SequenceBuilder::repeating(vec![brick]).with_constraint(Constraint::MaxCount(20)))
//!     .with_bounds(
//!         Line::new(Point3::origin(), Point3::new(2.0, 0.0, 0.0)),
//!         Vector3::x(),
//!         Vector3::y(),
//!         Vector3::z(),
//!     )?
//!     .with_justification(Justification::SpaceBetween);
//!
//! let placed = row.distribute()?;
//! assert_eq!(placed.instances.len(), 9);
//! # Ok::<(), setout_flex::Error>(())
//! ```

use nalgebra::Vector3;
use setout_geometry::{Curve, Instance, Placeable};
use tracing::debug;

use crate::axes::AxisTriple;
use crate::constraint::Constraint;
use crate::error::{Error, Result};
use crate::justify::{Alignment, Justification, SettingOut};
use crate::placement::place;
use crate::proxy::{checked_bounds, main_dimension, occupied_length, Proxy};
use crate::sequence::{SequenceBuilder, SequenceContext, Termination};
use crate::settings::LayoutSettings;

/// Path geometry of a distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct PathBounds {
    pub curve: Curve,
    pub axes: AxisTriple,
}

/// Distributes a generated sequence along a single curve.
#[derive(Debug, Clone)]
pub struct Flex1d<T> {
    pub bounds: Option<PathBounds>,
    pub justification: Justification,
    pub cross_alignment: Alignment,
    pub normal_alignment: Alignment,
    pub cross_setting_out: SettingOut,
    pub normal_setting_out: SettingOut,
    pub sequence: SequenceBuilder<T>,
    /// Adds an implicit [`Constraint::FitsTarget`] to the sequence.
    pub fit_to_path: bool,
}

/// Output of [`Flex1d::distribute`].
#[derive(Debug, Clone)]
pub struct Distribution<T> {
    /// Resolved placement records, one per instance.
    pub proxies: Vec<Proxy<T>>,
    pub instances: Vec<Instance<T>>,
    pub termination: Termination,
    /// Body elements consumed by the sequence.
    pub consumed: usize,
    pub path_length: f64,
}

impl<T> Distribution<T> {
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

impl<T: Placeable + Clone> Flex1d<T> {
    pub fn new(sequence: SequenceBuilder<T>) -> Self {
        Self {
            bounds: None,
            justification: Justification::default(),
            cross_alignment: Alignment::default(),
            normal_alignment: Alignment::default(),
            cross_setting_out: SettingOut::default(),
            normal_setting_out: SettingOut::default(),
            sequence,
            fit_to_path: true,
        }
    }

    /// Sets the path and validates the axis triple.
    pub fn with_bounds(
        self,
        curve: impl Into<Curve>,
        main: Vector3<f64>,
        cross: Vector3<f64>,
        normal: Vector3<f64>,
    ) -> Result<Self> {
        let axes = AxisTriple::new(main, cross, normal)?;
        Ok(self.with_path(curve, axes))
    }

    /// Sets the path with an already validated axis triple.
    pub fn with_path(mut self, curve: impl Into<Curve>, axes: AxisTriple) -> Self {
        self.bounds = Some(PathBounds {
            curve: curve.into(),
            axes,
        });
        self
    }

    pub fn with_justification(mut self, justification: Justification) -> Self {
        self.justification = justification;
        self
    }

    pub fn with_cross_alignment(mut self, alignment: Alignment) -> Self {
        self.cross_alignment = alignment;
        self
    }

    pub fn with_normal_alignment(mut self, alignment: Alignment) -> Self {
        self.normal_alignment = alignment;
        self
    }

    pub fn with_cross_setting_out(mut self, setting_out: SettingOut) -> Self {
        self.cross_setting_out = setting_out;
        self
    }

    pub fn with_normal_setting_out(mut self, setting_out: SettingOut) -> Self {
        self.normal_setting_out = setting_out;
        self
    }

    pub fn with_fit_to_path(mut self, fit_to_path: bool) -> Self {
        self.fit_to_path = fit_to_path;
        self
    }

    /// Applies every strategy field of `settings`.
    pub fn with_settings(mut self, settings: &LayoutSettings) -> Self {
        self.justification = settings.justification;
        self.cross_alignment = settings.cross_alignment;
        self.normal_alignment = settings.normal_alignment;
        self.cross_setting_out = settings.cross_setting_out;
        self.normal_setting_out = settings.normal_setting_out;
        self.fit_to_path = settings.fit_to_path;
        self.sequence.max_iterations = settings.max_iterations;
        self
    }

    /// Length of the path, or [`Error::MissingBounds`].
    pub fn path_length(&self) -> Result<f64> {
        Ok(self.path()?.curve.length())
    }

    fn path(&self) -> Result<&PathBounds> {
        self.bounds.as_ref().ok_or(Error::MissingBounds)
    }

    /// Generates the sequence and places it along the path.
    pub fn distribute(&self) -> Result<Distribution<T>> {
        self.distribute_from(0)
    }

    /// As [`distribute`](Self::distribute) with the body consumed from body
    /// index `start`.
    pub fn distribute_from(&self, start: usize) -> Result<Distribution<T>> {
        let path = self.path()?;
        if let Curve::Polyline(_) = path.curve {
            return Err(Error::UnsupportedCurve(path.curve.kind()));
        }
        let axes = path.axes;
        let path_length = path.curve.length();

        let context = PathContext {
            axes,
            target: path_length,
        };
        let implicit = if self.fit_to_path {
            vec![Constraint::FitsTarget]
        } else {
            Vec::new()
        };
        let generated = self.sequence.generate_with(start, &implicit, Some(&context))?;

        let mut proxies = generated
            .elements
            .into_iter()
            .map(|definition| Proxy::new(definition, &axes))
            .collect::<Result<Vec<_>>>()?;

        justify(&mut proxies, &axes, self.justification, path_length);
        align(&mut proxies, &axes.cross(), self.cross_alignment, self.cross_setting_out);
        align(&mut proxies, &axes.normal(), self.normal_alignment, self.normal_setting_out);

        let instances = proxies
            .iter()
            .map(|proxy| place(&path.curve, &axes, proxy))
            .collect::<Result<Vec<_>>>()?;

        debug!(
            curve = path.curve.kind(),
            path_length,
            count = instances.len(),
            consumed = generated.consumed,
            termination = ?generated.termination,
            "distributed along path"
        );

        Ok(Distribution {
            proxies,
            instances,
            termination: generated.termination,
            consumed: generated.consumed,
            path_length,
        })
    }
}

/// Sequence context backed by a path's length and main axis.
struct PathContext {
    axes: AxisTriple,
    target: f64,
}

impl<T: Placeable> SequenceContext<T> for PathContext {
    fn target_length(&self) -> f64 {
        self.target
    }

    fn main_dimension_with_min_spacing(&self, elements: &[T]) -> Result<f64> {
        let main = self.axes.main();
        let mut items = Vec::with_capacity(elements.len());
        for element in elements {
            let bounds = checked_bounds(element)?;
            let min_spacing = element.min_spacing().abs().dot(&main.abs());
            items.push((bounds.extent(&main), min_spacing));
        }
        Ok(occupied_length(items, true))
    }
}

/// Main-axis pass: one setting-out for the row, gaps floored by minimum
/// spacing, coordination from preceding extents.
fn justify<T>(
    proxies: &mut [Proxy<T>],
    axes: &AxisTriple,
    justification: Justification,
    path_length: f64,
) {
    let main = axes.main();
    let occupied = main_dimension(proxies, &main, justification.uses_min_spacing());
    let remainder = path_length - occupied;
    let (setting_out, default_spacing) = justification.resolve(remainder, proxies.len());

    debug!(
        ?justification,
        occupied, remainder, setting_out, default_spacing, "main-axis justification"
    );

    let mut coordination = 0.0;
    let mut spacing = 0.0;
    let mut previous: Option<(f64, f64)> = None;
    for proxy in proxies.iter_mut() {
        if let Some((extent, min_spacing)) = previous {
            coordination += extent;
            spacing += default_spacing
                .max(min_spacing)
                .max(proxy.min_spacing_along(&main));
        }
        previous = Some((proxy.extent(&main), proxy.min_spacing_along(&main)));

        proxy.setting_out += main * setting_out;
        proxy.coordination += main * coordination;
        proxy.spacing += main * spacing;
    }
}

/// Alignment against the row's largest extent on `axis`, then one
/// setting-out for the whole row.
fn align<T>(proxies: &mut [Proxy<T>], axis: &Vector3<f64>, alignment: Alignment, setting_out: SettingOut) {
    let max = proxies
        .iter()
        .map(|p| p.extent(axis))
        .fold(0.0, f64::max);
    let global = setting_out.offset(max);
    for proxy in proxies.iter_mut() {
        proxy.alignment += axis * alignment.offset(max, proxy.extent(axis));
        proxy.setting_out += axis * global;
    }
}
