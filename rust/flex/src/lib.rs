// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Setout Flex
//!
//! Flexbox-style distribution of discrete components along a path
//! ([`Flex1d`]) or across a bounded box ([`Flex2d`]).
//!
//! The element list of every row comes from a [`SequenceBuilder`], which
//! grows a candidate list until a [`Constraint`] breaks. Elements are wrapped
//! in [`Proxy`] records, justified along the main axis, aligned and set out
//! on the cross and normal axes, and finally placed as
//! [`Instance`](setout_geometry::Instance)s along a Line or Arc. 2D layouts
//! group each row into an [`Assembly`] and distribute the rows a second time
//! across the cross axis.

pub mod assembly;
pub mod axes;
pub mod constraint;
pub mod error;
pub mod flex1d;
pub mod flex2d;
pub mod justify;
pub mod layout;
pub mod placement;
pub mod proxy;
pub mod sequence;
pub mod settings;

pub use assembly::Assembly;
pub use axes::AxisTriple;
pub use constraint::{Constraint, Parity};
pub use error::{Error, Result};
pub use flex1d::{Distribution, Flex1d, PathBounds};
pub use flex2d::{Flex2d, RowPattern};
pub use justify::{Alignment, Justification, SettingOut};
pub use layout::{BoundsSnapshot, InstanceSnapshot, Layout, LayoutSnapshot, RowSnapshot};
pub use proxy::Proxy;
pub use sequence::{Generated, SequenceBuilder, SequenceContext, StopReason, Termination, MAX_LOOP_COUNT};
pub use settings::LayoutSettings;
