// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Two-dimensional layout: rows along the main axis, stacked across the
//! cross axis.
//!
//! Each row pattern runs a [`Flex1d`] along the container's main extent.
//! Every row becomes an [`Assembly`], and a second [`Flex1d`] over the
//! transposed axes distributes the assemblies across the container's cross
//! extent. The layout is flattened by composing each assembly pose with its
//! component poses.
//!
//! A layout is consumed by [`Flex2d::build`], so it cannot be built twice:
//!
//! ```compile_fail
//! use setout_flex::Flex2d;
//! use setout_geometry::Element;
//!
//! let flex: Flex2d<Element> = Flex2d::new();
//! let _first = flex.build();
//! let _second = flex.build();
//! ```

use nalgebra::{Point3, Vector3};
use setout_geometry::{BoundingBox, Line, Placeable};
use tracing::{debug, warn};

use crate::assembly::Assembly;
use crate::axes::AxisTriple;
use crate::error::{Error, Result};
use crate::flex1d::{Distribution, Flex1d};
use crate::justify::{Alignment, Justification, SettingOut};
use crate::layout::Layout;
use crate::sequence::SequenceBuilder;
use crate::settings::LayoutSettings;

/// How a main-axis pattern turns into rows.
#[derive(Debug, Clone)]
pub enum RowPattern<T> {
    /// Exactly one row.
    Row(SequenceBuilder<T>),
    /// As many rows as it takes to place the whole body, each continuing
    /// where the previous row stopped. Repetition is ignored.
    Wrap(SequenceBuilder<T>),
}

/// Builder for a two-dimensional layout inside a container box.
#[derive(Debug)]
pub struct Flex2d<T> {
    pub container: Option<BoundingBox>,
    pub axes: AxisTriple,
    pub main_justification: Justification,
    pub cross_justification: Justification,
    pub cross_alignment: Alignment,
    pub normal_alignment: Alignment,
    pub normal_setting_out: SettingOut,
    pub main_patterns: Vec<RowPattern<T>>,
    /// Rules applied across rows; its body is replaced by the rows.
    pub cross_sequence: SequenceBuilder<Assembly<T>>,
    pub fit_to_path: bool,
}

impl<T> Default for Flex2d<T> {
    fn default() -> Self {
        Self {
            container: None,
            axes: AxisTriple::xyz(),
            main_justification: Justification::default(),
            cross_justification: Justification::default(),
            cross_alignment: Alignment::default(),
            normal_alignment: Alignment::default(),
            normal_setting_out: SettingOut::default(),
            main_patterns: Vec::new(),
            cross_sequence: SequenceBuilder::default(),
            fit_to_path: true,
        }
    }
}

impl<T: Placeable + Clone> Flex2d<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_container(mut self, container: BoundingBox) -> Self {
        self.container = Some(container);
        self
    }

    /// Validates and sets the axis triple.
    pub fn with_axes(
        mut self,
        main: Vector3<f64>,
        cross: Vector3<f64>,
        normal: Vector3<f64>,
    ) -> Result<Self> {
        self.axes = AxisTriple::new(main, cross, normal)?;
        Ok(self)
    }

    /// Adds a pattern producing one row.
    pub fn with_row(mut self, sequence: SequenceBuilder<T>) -> Self {
        self.main_patterns.push(RowPattern::Row(sequence));
        self
    }

    /// Adds a pattern wrapping its body over as many rows as needed.
    pub fn with_wrap(mut self, sequence: SequenceBuilder<T>) -> Self {
        self.main_patterns.push(RowPattern::Wrap(sequence));
        self
    }

    pub fn with_cross_sequence(mut self, sequence: SequenceBuilder<Assembly<T>>) -> Self {
        self.cross_sequence = sequence;
        self
    }

    pub fn with_main_justification(mut self, justification: Justification) -> Self {
        self.main_justification = justification;
        self
    }

    pub fn with_cross_justification(mut self, justification: Justification) -> Self {
        self.cross_justification = justification;
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

    pub fn with_normal_setting_out(mut self, setting_out: SettingOut) -> Self {
        self.normal_setting_out = setting_out;
        self
    }

    pub fn with_fit_to_path(mut self, fit_to_path: bool) -> Self {
        self.fit_to_path = fit_to_path;
        self
    }

    /// Applies strategy fields of `settings`. `cross_setting_out` has no 2D
    /// counterpart and is ignored.
    pub fn with_settings(mut self, settings: &LayoutSettings) -> Self {
        self.main_justification = settings.justification;
        self.cross_justification = settings.cross_justification;
        self.cross_alignment = settings.cross_alignment;
        self.normal_alignment = settings.normal_alignment;
        self.normal_setting_out = settings.normal_setting_out;
        self.fit_to_path = settings.fit_to_path;
        self.cross_sequence.max_iterations = settings.max_iterations;
        for pattern in &mut self.main_patterns {
            match pattern {
                RowPattern::Row(seq) | RowPattern::Wrap(seq) => {
                    seq.max_iterations = settings.max_iterations
                }
            }
        }
        self
    }

    /// Lays out every row and distributes the rows across the container.
    pub fn build(self) -> Result<Layout<T>> {
        let container = self.container.ok_or(Error::MissingContainer)?;
        let axes = self.axes;
        let main_length = container.extent(&axes.main());
        let cross_length = container.extent(&axes.cross());
        let normal_extent = container.extent(&axes.normal());
        let normal_setting_out = self.normal_setting_out;

        let row_path = Line::new(Point3::origin(), Point3::from(axes.main() * main_length));
        let row_settings = RowSettings {
            axes,
            path: row_path,
            justification: self.main_justification,
            cross_alignment: self.cross_alignment,
            normal_alignment: self.normal_alignment,
            fit_to_path: self.fit_to_path,
        };
        let to_assembly = |row: Distribution<T>| {
            Assembly::from_row(
                row.instances,
                &axes,
                row.path_length,
                normal_extent,
                normal_setting_out,
            )
        };

        let mut rows = Vec::new();
        for pattern in self.main_patterns {
            match pattern {
                RowPattern::Row(sequence) => {
                    rows.push(to_assembly(row_settings.flex(sequence).distribute()?));
                }
                RowPattern::Wrap(sequence) => {
                    let flex = row_settings.flex(sequence.with_repetition(false));
                    let total = flex.sequence.body.len();
                    let mut start = 0;
                    while start < total {
                        let row = flex.distribute_from(start)?;
                        if row.consumed == 0 {
                            warn!(
                                remaining = total - start,
                                "wrapping row placed no body items; dropping the rest"
                            );
                            break;
                        }
                        start += row.consumed;
                        rows.push(to_assembly(row));
                    }
                }
            }
        }
        let row_count = rows.len();

        let (main_start, _) = container.range(&axes.main());
        let (cross_start, _) = container.range(&axes.cross());
        let (normal_lo, normal_hi) = container.range(&axes.normal());
        let normal_start = match normal_setting_out {
            SettingOut::Start => normal_lo,
            SettingOut::Center => (normal_lo + normal_hi) / 2.0,
            SettingOut::End => normal_hi,
        };
        let origin = Point3::from(axes.compose(main_start, cross_start, normal_start));
        let cross_path = Line::new(origin, origin + axes.cross() * cross_length);

        let mut cross_sequence = self.cross_sequence;
        cross_sequence.body = rows;
        let placed = Flex1d::new(cross_sequence)
            .with_path(cross_path, axes.transposed())
            .with_justification(self.cross_justification)
            .with_cross_alignment(Alignment::Start)
            .with_normal_alignment(self.normal_alignment)
            .with_cross_setting_out(SettingOut::Start)
            .with_normal_setting_out(normal_setting_out)
            .with_fit_to_path(self.fit_to_path)
            .distribute()?;

        debug!(
            rows = row_count,
            placed_rows = placed.len(),
            main_length,
            cross_length,
            "built 2D layout"
        );

        Ok(Layout::new(placed.instances, placed.termination))
    }
}

/// Shared configuration of every main-axis row.
struct RowSettings {
    axes: AxisTriple,
    path: Line,
    justification: Justification,
    cross_alignment: Alignment,
    normal_alignment: Alignment,
    fit_to_path: bool,
}

impl RowSettings {
    /// Rows start at their cross edge and centre on the normal axis; the
    /// cross pass sets them out as a whole.
    fn flex<T: Placeable + Clone>(&self, sequence: SequenceBuilder<T>) -> Flex1d<T> {
        Flex1d::new(sequence)
            .with_path(self.path, self.axes)
            .with_justification(self.justification)
            .with_cross_alignment(self.cross_alignment)
            .with_normal_alignment(self.normal_alignment)
            .with_cross_setting_out(SettingOut::Start)
            .with_normal_setting_out(SettingOut::Center)
            .with_fit_to_path(self.fit_to_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::Constraint;
    use approx::assert_relative_eq;
    use setout_geometry::Element;

    fn block(name: &str, x: f64) -> Element {
        Element::from_size(name, Vector3::new(x, 0.1, 0.2))
    }

    fn container() -> BoundingBox {
        BoundingBox::from_size(&Vector3::new(2.0, 1.0, 1.0))
    }

    #[test]
    fn missing_container_is_reported() {
        let flex = Flex2d::new().with_row(SequenceBuilder::new(vec![block("a", 1.0)]));
        assert!(matches!(flex.build(), Err(Error::MissingContainer)));
    }

    #[test]
    fn rows_stack_across_the_cross_axis() {
        let layout = Flex2d::new()
            .with_container(container())
            .with_row(SequenceBuilder::new(vec![block("a", 1.0)]))
            .with_row(SequenceBuilder::new(vec![block("b", 0.5)]))
            .build()
            .unwrap();
        assert_eq!(layout.row_count(), 2);
        let first = layout.instances[0].world_bounds();
        let second = layout.instances[1].world_bounds();
        assert_relative_eq!(first.min, Point3::new(0.0, 0.0, 0.0), epsilon = 1e-12);
        assert_relative_eq!(second.min, Point3::new(0.0, 0.1, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn wrap_continues_where_the_previous_row_stopped() {
        let body: Vec<_> = (0..5).map(|i| block(&format!("b{i}"), 0.75)).collect();
        let layout = Flex2d::new()
            .with_container(container())
            .with_wrap(SequenceBuilder::new(body))
            .build()
            .unwrap();
        assert_eq!(layout.row_count(), 3);
        let names: Vec<_> = layout.instances.iter().map(|i| i.definition.name.as_str()).collect();
        assert_eq!(names, ["b0", "b1", "b2", "b3", "b4"]);
    }

    #[test]
    fn wrap_stops_on_an_item_wider_than_the_path() {
        let body = vec![block("ok", 1.0), block("huge", 3.0), block("never", 1.0)];
        let layout = Flex2d::new()
            .with_container(container())
            .with_wrap(SequenceBuilder::new(body))
            .build()
            .unwrap();
        assert_eq!(layout.row_count(), 1);
        assert_eq!(layout.instances.len(), 1);
    }

    #[test]
    fn normal_setting_out_end_is_flush_with_the_container_top() {
        let layout = Flex2d::new()
            .with_container(container())
            .with_normal_setting_out(SettingOut::End)
            .with_row(SequenceBuilder::new(vec![block("a", 1.0)]))
            .build()
            .unwrap();
        let placed = layout.instances[0].world_bounds();
        assert_relative_eq!(placed.max.z, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn cross_sequence_limits_rows() {
        let layout = Flex2d::new()
            .with_container(container())
            .with_row(SequenceBuilder::new(vec![block("a", 1.0)]))
            .with_row(SequenceBuilder::new(vec![block("b", 1.0)]))
            .with_cross_sequence(SequenceBuilder::default().with_constraint(Constraint::MaxCount(1)))
            .build()
            .unwrap();
        assert_eq!(layout.row_count(), 1);
        assert_eq!(layout.instances[0].definition.name, "a");
    }
}
