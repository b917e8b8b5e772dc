// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Justification, alignment and setting-out strategies.
//!
//! All three reduce to scalar offsets along one axis; the distributor turns
//! them into vectors and accumulates them on each [`Proxy`](crate::Proxy).

use serde::{Deserialize, Serialize};

/// How empty space along the main axis is distributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Justification {
    #[default]
    Start,
    End,
    Center,
    SpaceAround,
    SpaceBetween,
    SpaceEvenly,
}

impl Justification {
    /// `Start`, `End` and `Center` measure occupied length including minimum
    /// spacing; the `Space*` variants measure bare element extents.
    pub fn uses_min_spacing(self) -> bool {
        matches!(
            self,
            Justification::Start | Justification::End | Justification::Center
        )
    }

    /// Returns `(setting_out, default_spacing)` for `count` elements sharing
    /// `remainder` units of free space.
    pub fn resolve(self, remainder: f64, count: usize) -> (f64, f64) {
        if count == 0 {
            return (0.0, 0.0);
        }
        let n = count as f64;
        match self {
            Justification::Start => (0.0, 0.0),
            Justification::End => (remainder, 0.0),
            Justification::Center => (remainder / 2.0, 0.0),
            Justification::SpaceAround => {
                let spacing = remainder / (2.0 * n);
                (spacing / 2.0, spacing)
            }
            Justification::SpaceBetween if count == 1 => (0.0, 0.0),
            Justification::SpaceBetween => (0.0, remainder / (n - 1.0)),
            Justification::SpaceEvenly => {
                let spacing = remainder / (n + 1.0);
                (spacing, spacing)
            }
        }
    }

    /// The justification that mirrors this one about the path midpoint.
    pub fn mirrored(self) -> Self {
        match self {
            Justification::Start => Justification::End,
            Justification::End => Justification::Start,
            other => other,
        }
    }
}

/// Where an element sits within the row's extent on a cross or normal axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Start,
    Center,
    End,
}

impl Alignment {
    /// Offset of an element of extent `own` inside a row of extent `max`,
    /// relative to the row's centre line.
    pub fn offset(self, max: f64, own: f64) -> f64 {
        let slack = (max - own) / 2.0;
        match self {
            Alignment::Start => -slack,
            Alignment::Center => 0.0,
            Alignment::End => slack,
        }
    }
}

/// Which side of the path a whole row is set out on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingOut {
    /// The path runs along the row's start edge.
    #[default]
    Start,
    /// The path runs through the row's centre line.
    Center,
    /// The path runs along the row's end edge.
    End,
}

impl SettingOut {
    /// Global offset for a row of extent `max`.
    pub fn offset(self, max: f64) -> f64 {
        match self {
            SettingOut::Start => max / 2.0,
            SettingOut::Center => 0.0,
            SettingOut::End => -max / 2.0,
        }
    }
}
