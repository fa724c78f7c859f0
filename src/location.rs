// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Observer location.
//!
//! A [`Location`] is produced by whatever directory the caller uses (exact
//! name, fuzzy match, nearest point) and handed in finished.  Nothing in this
//! crate looks one up.
//!
//! # Sign conventions
//!
//! | Field | Convention |
//! |-------|------------|
//! | `latitude` | degrees, north positive |
//! | `longitude` | degrees, **west positive**, east negative |
//! | `utc_offset` | hours, east positive (New York is `-5`) |
//! | `elevation` | metres above sea level |

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Candle-lighting lead used when a location does not specify one.
pub const DEFAULT_CANDLE_LIGHTING_MINUTES: u32 = 18;

/// An immutable observer location.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    pub name: String,
    /// Inside Israel; selects one-day Yom Tov and the Israeli DST rule.
    pub israel: bool,
    pub latitude: f64,
    pub longitude: f64,
    pub utc_offset: f64,
    pub elevation: f64,
    /// Minutes before sunset that candles are lit.
    pub candle_lighting: u32,
}

impl Location {
    /// Build a location at sea level with the default candle-lighting lead.
    pub fn new(
        name: impl Into<String>,
        israel: bool,
        latitude: f64,
        longitude: f64,
        utc_offset: f64,
    ) -> Self {
        Self {
            name: name.into(),
            israel,
            latitude,
            longitude,
            utc_offset,
            elevation: 0.0,
            candle_lighting: DEFAULT_CANDLE_LIGHTING_MINUTES,
        }
    }

    /// Same location at `metres` above sea level.
    pub fn with_elevation(mut self, metres: f64) -> Self {
        self.elevation = metres;
        self
    }

    /// Same location with a different candle-lighting lead.
    pub fn with_candle_lighting(mut self, minutes: u32) -> Self {
        self.candle_lighting = minutes;
        self
    }

    /// Great-circle distance in kilometres, on a spherical Earth.
    pub fn distance_km(&self, other: &Location) -> f64 {
        const EARTH_RADIUS_KM: f64 = 6371.0;
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = lat2 - lat1;
        let dlon = (other.longitude - self.longitude).to_radians();
        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().atan2((1.0 - a).sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let loc = Location::new("Dallas", false, 32.78, 96.8, -6.0);
        assert_eq!(loc.elevation, 0.0);
        assert_eq!(loc.candle_lighting, 18);
        assert!(!loc.israel);
        let loc = loc.with_elevation(140.0).with_candle_lighting(20);
        assert_eq!(loc.elevation, 140.0);
        assert_eq!(loc.candle_lighting, 20);
    }

    #[test]
    fn distance_is_symmetric_and_plausible() {
        let jerusalem = Location::new("Jerusalem", true, 31.78, -35.22, 2.0);
        let tel_aviv = Location::new("Tel Aviv", true, 32.08, -34.78, 2.0);
        let d = jerusalem.distance_km(&tel_aviv);
        assert!((d - tel_aviv.distance_km(&jerusalem)).abs() < 1e-9);
        assert!(d > 45.0 && d < 60.0, "distance {d} km");
        assert_eq!(jerusalem.distance_km(&jerusalem), 0.0);
    }
}
