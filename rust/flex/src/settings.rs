// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Serializable layout settings.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::justify::{Alignment, Justification, SettingOut};
use crate::sequence::MAX_LOOP_COUNT;

/// Strategy settings shared by 1D and 2D layouts.
///
/// Missing fields fall back to their defaults, so a settings file only needs
/// to name what it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Main-axis justification.
    pub justification: Justification,
    /// Justification of rows across the cross axis (2D only).
    pub cross_justification: Justification,
    pub cross_alignment: Alignment,
    pub normal_alignment: Alignment,
    /// 1D only; rows of a 2D layout are always set out from their start edge.
    pub cross_setting_out: SettingOut,
    pub normal_setting_out: SettingOut,
    pub max_iterations: usize,
    pub fit_to_path: bool,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            justification: Justification::Start,
            cross_justification: Justification::Start,
            cross_alignment: Alignment::Start,
            normal_alignment: Alignment::Start,
            cross_setting_out: SettingOut::Start,
            normal_setting_out: SettingOut::Start,
            max_iterations: MAX_LOOP_COUNT,
            fit_to_path: true,
        }
    }
}

impl LayoutSettings {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Settings(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| Error::Settings(e.to_string()))
    }
}
