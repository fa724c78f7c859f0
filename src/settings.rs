// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Settings
//!
//! Caller-owned configuration for [`ZmanimTable`](crate::ZmanimTable): which
//! zmanim to list, how long a passed zman keeps showing, cache size and DST
//! policy.
//!
//! With the `serde` feature the structure reads and writes TOML text.  Keys
//! missing from the text take their default value.  Reading and writing
//! files is left to the caller.
//!
//! ```toml
//! minutes_to_show_passed_zman = 20
//! dst_policy = "rules_only"
//!
//! [[zmanim_to_show]]
//! id = 10
//!
//! [[zmanim_to_show]]
//! id = 15
//! offset_minutes = -2
//! which_days = "FRIDAY | YOMTOV"
//! ```

use crate::cache::DEFAULT_CACHE_CAPACITY;
use crate::dst::DstPolicy;
use crate::zman::{ZmanDefinition, ZmanType};

#[cfg(feature = "serde")]
use crate::error::{Result, ZmanimError};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Grace period, in minutes, before a passed zman is replaced by tomorrow's.
pub const DEFAULT_MINUTES_TO_SHOW_PASSED_ZMAN: u32 = 15;

/// Default display list.
pub const DEFAULT_ZMANIM: [ZmanType; 18] = [
    ZmanType::ChatzosLayla,
    ZmanType::Alos72,
    ZmanType::TalisTefillin,
    ZmanType::NetzMishor,
    ZmanType::SzksMga,
    ZmanType::SzksGra,
    ZmanType::SztMga,
    ZmanType::SztGra,
    ZmanType::ChatzosDay,
    ZmanType::MinchaGedola,
    ZmanType::MinchaKetana,
    ZmanType::PlagHamincha,
    ZmanType::ShkiaElevation,
    ZmanType::Tzais50,
    ZmanType::Tzais72,
    ZmanType::CandleLighting,
    ZmanType::SofZmanEatingChometz,
    ZmanType::SofZmanBurnChometz,
];

/// Configuration passed to the zmanim table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Settings {
    /// Zmanim listed by the already-passed view, in display order.
    pub zmanim_to_show: Vec<ZmanDefinition>,
    /// Minutes a passed zman keeps showing before tomorrow's replaces it.
    pub minutes_to_show_passed_zman: u32,
    /// Entry count at which each cache is cleared.
    pub cache_capacity: usize,
    pub dst_policy: DstPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            zmanim_to_show: DEFAULT_ZMANIM.iter().copied().map(ZmanDefinition::from).collect(),
            minutes_to_show_passed_zman: DEFAULT_MINUTES_TO_SHOW_PASSED_ZMAN,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            dst_policy: DstPolicy::default(),
        }
    }
}

#[cfg(feature = "serde")]
impl Settings {
    /// Parse the TOML text form.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| ZmanimError::InvalidSettings(e.to_string()))
    }

    /// Render the TOML text form.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ZmanimError::InvalidSettings(e.to_string()))
    }
}
