// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for distribution passes.

/// Result type alias for distribution operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while configuring or running a distribution.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An axis of the triple does not run along X, Y or Z.
    #[error("{role} axis {axis:?} is not parallel to a cardinal axis")]
    NonCardinalAxis { role: &'static str, axis: [f64; 3] },

    /// Two axes of the triple are parallel.
    #[error("{first} and {second} axes are parallel")]
    ParallelAxes {
        first: &'static str,
        second: &'static str,
    },

    /// `distribute` was called before `with_bounds`.
    #[error("distribution has no path: set bounds before distributing")]
    MissingBounds,

    /// `build` was called on a 2D layout without a container.
    #[error("2D layout has no container: set a container before building")]
    MissingContainer,

    /// A constraint that measures candidates was evaluated without a context.
    #[error("constraint {0} needs a distribution context but none was supplied")]
    MissingContext(&'static str),

    /// A repeating sequence cannot grow from an empty body.
    #[error("repeating sequence has an empty body")]
    EmptyRepeatingBody,

    /// An element reported bounds with min > max.
    #[error("bounds of {name:?} are inverted: min {min:?} exceeds max {max:?}")]
    InvertedBounds {
        name: String,
        min: [f64; 3],
        max: [f64; 3],
    },

    /// The path curve cannot be followed by the distributor.
    #[error("unsupported curve type: expected Line or Arc, got {0}")]
    UnsupportedCurve(&'static str),

    /// Layout settings could not be parsed or written.
    #[error("layout settings error: {0}")]
    Settings(String),

    /// A layout snapshot could not be serialized.
    #[error("layout snapshot error: {0}")]
    Snapshot(String),

    /// A kernel primitive failed to evaluate.
    #[error("geometry error: {0}")]
    Geometry(#[from] setout_geometry::Error),
}
