// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Solar Ephemeris: sunrise and sunset
//!
//! Sunrise and sunset follow the low-precision almanac method published by
//! the U.S. Naval Observatory (*Almanac for Computers*, 1990): mean anomaly,
//! true longitude, right ascension with a quadrant fix, declination, and the
//! local hour angle at which the sun reaches a zenith of 90°50′.
//!
//! ## Elevation
//! An observer at height *h* sees the sun earlier and longer.  The zenith is
//! widened by the dip of the horizon:
//!
//! ```text
//! zenith = 90°50′ + arccos(R / (R + h)),   R = 6 356 900 m
//! ```
//!
//! Pass `consider_elevation = false` for the sea-level ("mishor") times.
//!
//! ## Polar regions
//! When the cosine of the hour angle falls outside `[-1, 1]` the sun never
//! crosses the corrected horizon that day.  [`SolarEphemeris::sun_times`]
//! then fails with [`ZmanimError::NoSunriseSunset`]; no time is invented.
//!
//! ## Caching
//! A [`SolarEphemeris`] owns a bounded cache keyed by day, location and
//! elevation flag.  It sits behind a `Mutex`, so one ephemeris can be shared
//! across threads.
//!
//! ```rust
//! use luach::{DstPolicy, Location, SolarEphemeris};
//! use chrono::NaiveDate;
//!
//! let dallas = Location::new("Dallas", false, 32.78, 96.8, -6.0);
//! let ephemeris = SolarEphemeris::with_policy(DstPolicy::RulesOnly, 100);
//! let date = NaiveDate::from_ymd_opt(2023, 11, 10).unwrap();
//! let sun = ephemeris.sun_times(&date, &dallas, true).unwrap();
//! assert_eq!(sun.sunrise.to_string(), "6:53:36 AM");
//! assert_eq!(sun.sunset.to_string(), "5:28:59 PM");
//! ```

use crate::cache::{BoundedCache, DEFAULT_CACHE_CAPACITY};
use crate::dst::DstPolicy;
use crate::error::{Result, ZmanimError};
use crate::hebrew_date::{CalendarDay, HebrewDate};
use crate::location::Location;
use crate::settings::Settings;
use crate::time_value::TimeValue;
use chrono::{Datelike, Local, NaiveDate, NaiveDateTime};
use qtty::Seconds;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Polar radius of the Earth used for the horizon dip, in metres.
const EARTH_RADIUS: f64 = 6_356_900.0;

/// Degrees to radians, to the almanac's precision.
const RAD: f64 = 0.01745;
/// Radians to degrees, to the almanac's precision.
const DEG: f64 = 57.29578;

/// Geometric zenith of sunrise and sunset: 90°50′.
const ZENITH: f64 = 90.0 + 50.0 / 60.0;

/// Cumulative days before each month, shifted by one: index `m + 1` for
/// zero-based month `m`.
const YEAR_DAY: [u32; 13] = [0, 1, 32, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

/// Length of the proportional hour's extension under the Magen Avraham.
pub const MGA_MINUTES_ISRAEL: f64 = 90.0;
pub const MGA_MINUTES_DIASPORA: f64 = 72.0;

// ═══════════════════════════════════════════════════════════════════════════
// SunTimes
// ═══════════════════════════════════════════════════════════════════════════

/// Sunrise and sunset of one day at one location, in local clock time.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SunTimes {
    pub sunrise: TimeValue,
    pub sunset: TimeValue,
}

impl SunTimes {
    /// Solar noon: sunrise plus half the daylight span, truncated to the
    /// second.
    pub fn chatzos(&self) -> TimeValue {
        let half = (self.sunset.total_seconds() - self.sunrise.total_seconds()) / 2;
        self.sunrise.add_seconds(half)
    }

    /// Length of daylight.
    #[inline]
    pub fn day_length(&self) -> Seconds {
        self.sunset - self.sunrise
    }

    /// One proportional hour (shaa zmanis) according to the GRA: a twelfth
    /// of the day, widened by `offset_minutes` at both ends.
    pub fn shaa_zmanis(&self, offset_minutes: f64) -> Seconds {
        let widened = self.day_length() + Seconds::new(2.0 * offset_minutes * 60.0);
        Seconds::new(widened.value() / 12.0)
    }

    /// One proportional hour according to the Magen Avraham, whose day runs
    /// from 90 (Israel) or 72 (elsewhere) minutes before sunrise to the same
    /// span after sunset.
    pub fn shaa_zmanis_mga(&self, israel: bool) -> Seconds {
        let minutes = if israel {
            MGA_MINUTES_ISRAEL
        } else {
            MGA_MINUTES_DIASPORA
        };
        self.shaa_zmanis(minutes)
    }
}

/// Candle lighting: `location.candle_lighting` minutes before `sunset`.
pub fn candle_lighting(sunset: TimeValue, location: &Location) -> TimeValue {
    sunset.add_minutes(-(location.candle_lighting as f64))
}

// ═══════════════════════════════════════════════════════════════════════════
// SolarEphemeris
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct DayKey {
    abs: i64,
    name: String,
    latitude: u64,
    longitude: u64,
    utc_offset: u64,
    elevation: u64,
    consider_elevation: bool,
}

impl DayKey {
    pub(crate) fn new(abs: i64, location: &Location, consider_elevation: bool) -> Self {
        Self {
            abs,
            name: location.name.clone(),
            latitude: location.latitude.to_bits(),
            longitude: location.longitude.to_bits(),
            utc_offset: location.utc_offset.to_bits(),
            elevation: location.elevation.to_bits(),
            consider_elevation,
        }
    }
}

/// Sunrise and sunset calculator with its own result cache.
#[derive(Debug)]
pub struct SolarEphemeris {
    dst: DstPolicy,
    cache: Mutex<BoundedCache<DayKey, SunTimes>>,
}

impl Default for SolarEphemeris {
    fn default() -> Self {
        Self::with_policy(DstPolicy::default(), DEFAULT_CACHE_CAPACITY)
    }
}

impl SolarEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ephemeris with an explicit DST policy and cache capacity.
    pub fn with_policy(dst: DstPolicy, cache_capacity: usize) -> Self {
        Self {
            dst,
            cache: Mutex::new(BoundedCache::new("sun-times", cache_capacity)),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::with_policy(settings.dst_policy, settings.cache_capacity)
    }

    #[inline]
    pub fn dst_policy(&self) -> DstPolicy {
        self.dst
    }

    /// Sunrise and sunset for `day` at `location`.
    ///
    /// With `consider_elevation` the horizon is lowered for the location's
    /// elevation.  Fails with [`ZmanimError::NoSunriseSunset`] when either
    /// event does not happen.
    pub fn sun_times<D: CalendarDay + ?Sized>(
        &self,
        day: &D,
        location: &Location,
        consider_elevation: bool,
    ) -> Result<SunTimes> {
        let key = DayKey::new(day.absolute_day(), location, consider_elevation);
        self.lock_cache().get_or_try_insert_with(key, || {
            let date = day.civil_date()?;
            let dst = self.dst.is_dst(location, date, 0);
            match solve(date, location, consider_elevation, dst) {
                (Some(sunrise), Some(sunset)) => Ok(SunTimes { sunrise, sunset }),
                _ => {
                    log::warn!(
                        "no sunrise/sunset at {} (lat {}) on {date}",
                        location.name,
                        location.latitude
                    );
                    Err(ZmanimError::NoSunriseSunset {
                        location: location.name.clone(),
                        date,
                    })
                }
            }
        })
    }

    /// Sea-level sunrise and sunset.
    pub fn sun_times_mishor<D: CalendarDay + ?Sized>(
        &self,
        day: &D,
        location: &Location,
    ) -> Result<SunTimes> {
        self.sun_times(day, location, false)
    }

    /// Solar noon, from the sea-level sun times.
    pub fn chatzos<D: CalendarDay + ?Sized>(&self, day: &D, location: &Location) -> Result<TimeValue> {
        Ok(self.sun_times_mishor(day, location)?.chatzos())
    }

    /// GRA proportional hour from the sea-level sun times.
    pub fn shaa_zmanis<D: CalendarDay + ?Sized>(
        &self,
        day: &D,
        location: &Location,
        offset_minutes: f64,
    ) -> Result<Seconds> {
        Ok(self.sun_times_mishor(day, location)?.shaa_zmanis(offset_minutes))
    }

    /// Candle-lighting time for `date`, which must have candle lighting.
    pub fn candle_lighting_for(&self, date: &HebrewDate, location: &Location) -> Result<TimeValue> {
        if !date.has_candle_lighting() {
            return Err(ZmanimError::NoCandleLighting(date.to_string()));
        }
        let sun = self.sun_times(date, location, true)?;
        Ok(candle_lighting(sun.sunset, location))
    }

    /// `now` is at or after the elevation sunset of `day`.
    pub fn is_after_sunset<D: CalendarDay + ?Sized>(
        &self,
        day: &D,
        now: TimeValue,
        location: &Location,
    ) -> Result<bool> {
        let sun = self.sun_times(day, location, true)?;
        Ok(now.is_after(&sun.sunset))
    }

    /// The Hebrew date in effect at `location` at the local clock time
    /// `date_time`.  From sunset on it is already the next Hebrew day.
    pub fn hebrew_date_at(&self, date_time: NaiveDateTime, location: &Location) -> Result<HebrewDate> {
        let date = date_time.date();
        let hebrew = HebrewDate::from_civil_date(date)?;
        let now = TimeValue::from_naive_time(date_time.time());
        if self.is_after_sunset(&date, now, location)? {
            hebrew.add_days(1)
        } else {
            Ok(hebrew)
        }
    }

    /// [`hebrew_date_at`](Self::hebrew_date_at) for the host's current local
    /// time.
    pub fn hebrew_date_now(&self, location: &Location) -> Result<HebrewDate> {
        self.hebrew_date_at(Local::now().naive_local(), location)
    }

    /// Number of cached sun-time results.
    pub fn cached_entries(&self) -> usize {
        self.lock_cache().len()
    }

    pub fn clear_cache(&self) {
        self.lock_cache().clear();
    }

    fn lock_cache(&self) -> MutexGuard<'_, BoundedCache<DayKey, SunTimes>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Almanac algorithm
// ═══════════════════════════════════════════════════════════════════════════

/// Day number used by the almanac terms.  Counts 1 January as day 2.
fn day_of_year(date: NaiveDate) -> f64 {
    let month0 = date.month0() as usize;
    let leap_shift = if month0 > 1 && is_secular_leap_year(date.year()) {
        1
    } else {
        0
    };
    (YEAR_DAY[month0 + 1] + date.day() + leap_shift) as f64
}

pub fn is_secular_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Mean anomaly.
#[inline]
fn mean_anomaly(t: f64) -> f64 {
    0.9856 * t - 3.251
}

/// True longitude of the sun.
#[inline]
fn true_longitude(m: f64) -> f64 {
    m + 1.916 * (RAD * m).sin() + 0.02 * (2.0 * RAD * m).sin() + 282.565
}

/// Local mean time correction.
#[inline]
fn time_correction(t: f64) -> f64 {
    -0.06571 * t - 6.62
}

/// Right ascension in degrees, in the same quadrant as `longitude`.
fn right_ascension(longitude: f64) -> f64 {
    let mut ra = DEG * (0.91746 * (RAD * longitude).tan()).atan();
    if (ra + 360.0 - longitude).abs() > 90.0 {
        ra += 180.0;
    }
    if ra > 360.0 {
        ra -= 360.0;
    }
    ra
}

/// Cosine of the local hour angle at which the sun reaches `cos_zenith`.
fn cos_hour_angle(longitude: f64, cos_zenith: f64, sin_lat: f64, cos_lat: f64) -> f64 {
    let sin_dec = 0.39782 * (RAD * longitude).sin();
    let cos_dec = (1.0 - sin_dec * sin_dec).sqrt();
    (cos_zenith - sin_dec * sin_lat) / (cos_dec * cos_lat)
}

/// Convert fractional local hours to a clock time, rounding to the minute
/// the way the almanac tables do, and add the DST hour.
fn to_clock(mut hours: f64, dst: bool) -> TimeValue {
    if hours < 0.0 {
        hours += 24.0;
    }
    let hour = hours.trunc();
    let minutes = (hours - hour) * 60.0 + 0.5;
    let minute = minutes.trunc();
    let second = (60.0 * (minutes - minute) + 0.5).floor();
    let hour = hour as i32 + i32::from(dst);
    TimeValue::new(hour, minute as i32, second as i32).normalize()
}

/// Raw sunrise and sunset; `None` where the sun does not cross the horizon.
fn solve(
    date: NaiveDate,
    location: &Location,
    consider_elevation: bool,
    dst: bool,
) -> (Option<TimeValue>, Option<TimeValue>) {
    let day = day_of_year(date);
    let elevation = if consider_elevation {
        location.elevation
    } else {
        0.0
    };
    let zenith = ZENITH + DEG * (EARTH_RADIUS / (EARTH_RADIUS + elevation)).acos();
    let zenith_deg = zenith.floor();
    let zenith_min = (zenith - zenith_deg) * 60.0;
    let cos_zenith = (RAD * (zenith_deg + zenith_min / 60.0)).cos();

    let lon_hour = location.longitude / 15.0;
    let sin_lat = (RAD * location.latitude).sin();
    let cos_lat = (RAD * location.latitude).cos();

    let t_rise = day + (6.0 + lon_hour) / 24.0;
    let t_set = day + (18.0 + lon_hour) / 24.0;
    let lon_rise = true_longitude(mean_anomaly(t_rise));
    let lon_set = true_longitude(mean_anomaly(t_set));
    let ra_rise = right_ascension(lon_rise) / 15.0;
    let ra_set = right_ascension(lon_set) / 15.0;

    let mut h_rise = cos_hour_angle(lon_rise, cos_zenith, sin_lat, cos_lat);
    let h_set = cos_hour_angle(lon_set, cos_zenith, sin_lat, cos_lat);

    let mut sunrise = None;
    if h_rise.abs() <= 1.0 {
        h_rise = DEG * h_rise.acos();
        let ut = (360.0 - h_rise) / 15.0 + ra_rise + time_correction(t_rise) + lon_hour;
        let mut t = to_clock(ut + location.utc_offset, dst);
        if t.hour() > 12 {
            t = TimeValue::new(t.hour() - 12, t.minute(), t.second());
        }
        sunrise = Some(t);
    }

    // The setting hour angle is taken from the rising solution; the almanac
    // tables this reproduces were built that way.
    let mut sunset = None;
    if h_set.abs() <= 1.0 {
        let ut = h_rise / 15.0 + ra_set + time_correction(t_set) + lon_hour;
        let mut t = to_clock(ut + location.utc_offset, dst);
        if t.hour() > 0 && t.hour() < 12 {
            t = TimeValue::new(t.hour() + 12, t.minute(), t.second());
        }
        sunset = Some(t);
    }

    (sunrise, sunset)
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hebrew_date::{ADAR, CHESHVAN, NISSAN, TAMUZ};

    fn ephemeris() -> SolarEphemeris {
        SolarEphemeris::with_policy(DstPolicy::RulesOnly, 50)
    }

    fn dallas() -> Location {
        Location::new("Dallas", false, 32.78, 96.8, -6.0)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn day_of_year_counts_from_two() {
        assert_eq!(day_of_year(date(2023, 1, 1)), 2.0);
        assert_eq!(day_of_year(date(2023, 3, 1)), 61.0);
        assert_eq!(day_of_year(date(2024, 3, 1)), 62.0);
        assert_eq!(day_of_year(date(2024, 12, 31)), 367.0);
    }

    #[test]
    fn secular_leap_years() {
        assert!(is_secular_leap_year(2024));
        assert!(is_secular_leap_year(2000));
        assert!(!is_secular_leap_year(1900));
        assert!(!is_secular_leap_year(2023));
    }

    #[test]
    fn dallas_sunrise_sunset() {
        let sun = ephemeris().sun_times(&date(2023, 11, 10), &dallas(), true).unwrap();
        assert_eq!(sun.sunrise, TimeValue::new(6, 53, 36));
        assert_eq!(sun.sunset, TimeValue::new(17, 28, 59));
        assert_eq!(candle_lighting(sun.sunset, &dallas()).to_string(), "5:10:59 PM");
    }

    #[test]
    fn hebrew_and_civil_days_agree() {
        let eph = ephemeris();
        let civil = date(2023, 11, 10);
        let hebrew = HebrewDate::from_civil_date(civil).unwrap();
        let a = eph.sun_times(&civil, &dallas(), true).unwrap();
        assert_eq!(eph.cached_entries(), 1);
        let b = eph.sun_times(&hebrew, &dallas(), true).unwrap();
        assert_eq!(a, b);
        // Same absolute day, same key.
        assert_eq!(eph.cached_entries(), 1);
    }

    #[test]
    fn elevation_widens_the_day() {
        let jerusalem = Location::new("Jerusalem", true, 31.778, -35.235, 2.0).with_elevation(754.0);
        let eph = ephemeris();
        let day = date(2024, 6, 21);
        let high = eph.sun_times(&day, &jerusalem, true).unwrap();
        let low = eph.sun_times_mishor(&day, &jerusalem).unwrap();
        assert_eq!(high.sunrise, TimeValue::new(5, 29, 49));
        assert_eq!(high.sunset, TimeValue::new(19, 52, 42));
        assert_eq!(low.sunrise, TimeValue::new(5, 34, 33));
        assert_eq!(low.sunset, TimeValue::new(19, 47, 58));
        assert!(high.day_length() > low.day_length());
        assert_eq!(eph.cached_entries(), 2);
    }

    #[test]
    fn polar_night_is_an_error() {
        let south = Location::new("Antarctica", false, -82.0, 0.0, 0.0);
        let day = HebrewDate::from_ymd(5785, TAMUZ, 1).unwrap();
        let err = ephemeris().sun_times(&day, &south, true).unwrap_err();
        assert_eq!(
            err,
            ZmanimError::NoSunriseSunset {
                location: "Antarctica".to_string(),
                date: date(2025, 6, 27),
            }
        );
    }

    #[test]
    fn failures_are_not_cached() {
        let south = Location::new("Antarctica", false, -82.0, 0.0, 0.0);
        let eph = ephemeris();
        assert!(eph.sun_times(&date(2025, 1, 1), &south, false).is_err());
        assert_eq!(eph.cached_entries(), 0);
    }

    #[test]
    fn noon_between_sunrise_and_sunset() {
        let eph = ephemeris();
        for month in 1..=12 {
            let sun = eph.sun_times(&date(2024, month, 15), &dallas(), false).unwrap();
            let noon = sun.chatzos();
            assert!(noon.is_after(&sun.sunrise));
            assert!(sun.sunset.is_after(&noon));
        }
    }

    #[test]
    fn chatzos_and_shaa_zmanis() {
        let sun = SunTimes {
            sunrise: TimeValue::new(6, 29, 49),
            sunset: TimeValue::new(17, 49, 2),
        };
        assert_eq!(sun.chatzos(), TimeValue::new(12, 9, 25));
        let gra = sun.shaa_zmanis(0.0);
        assert!((gra - Seconds::new(40_753.0 / 12.0)).abs() < Seconds::new(1e-9));
        let mga = sun.shaa_zmanis_mga(true);
        assert!((mga - Seconds::new((40_753.0 + 10_800.0) / 12.0)).abs() < Seconds::new(1e-9));
        let mga72 = sun.shaa_zmanis_mga(false);
        assert!((mga72 - sun.shaa_zmanis(72.0)).abs() < Seconds::new(1e-9));
    }

    #[test]
    fn candle_lighting_requires_erev_shabbos_or_yom_tov() {
        let eph = ephemeris();
        let friday = HebrewDate::from_civil_date(date(2023, 11, 10)).unwrap();
        assert_eq!(
            eph.candle_lighting_for(&friday, &dallas()).unwrap(),
            TimeValue::new(17, 10, 59)
        );
        let shabbos = HebrewDate::from_ymd(5785, NISSAN, 14).unwrap();
        assert!(matches!(
            eph.candle_lighting_for(&shabbos, &dallas()),
            Err(ZmanimError::NoCandleLighting(_))
        ));
    }

    #[test]
    fn four_long_hours_after_lakewood_sunrise() {
        // Purim 5789.
        let lakewood = Location::new("Lakewood", false, 40.1, 74.23, -5.0);
        let purim = HebrewDate::from_ymd(5789, ADAR, 14).unwrap();
        let eph = ephemeris();
        let sunrise = eph.sun_times(&purim, &lakewood, true).unwrap().sunrise;
        assert_eq!(sunrise.to_string(), "6:29:49 AM");

        let hour = eph.shaa_zmanis(&purim, &lakewood, 72.0).unwrap();
        let mga = eph.sun_times_mishor(&purim, &lakewood).unwrap().shaa_zmanis_mga(false);
        assert!((hour - mga).abs() < Seconds::new(1e-9));
        assert!((hour - Seconds::new(49_393.0 / 12.0)).abs() < Seconds::new(1e-9));

        let four_hours = (hour.value() / 60.0 * 4.0).floor();
        assert_eq!(sunrise.add_minutes(four_hours).to_string(), "11:03:49 AM");
        assert_eq!((sunrise + Seconds::new(hour.value() * 4.0)).to_string(), "11:04:13 AM");
    }

    #[test]
    fn hebrew_day_turns_at_sunset() {
        let eph = ephemeris();
        let friday = date(2023, 11, 10);
        // Sunset in Dallas is 17:28:59.
        assert!(!eph.is_after_sunset(&friday, TimeValue::new(17, 28, 58), &dallas()).unwrap());
        assert!(eph.is_after_sunset(&friday, TimeValue::new(17, 28, 59), &dallas()).unwrap());

        let before = friday.and_hms_opt(17, 0, 0).unwrap();
        let after = friday.and_hms_opt(17, 30, 0).unwrap();
        let erev_shabbos = eph.hebrew_date_at(before, &dallas()).unwrap();
        assert_eq!((erev_shabbos.month(), erev_shabbos.day()), (CHESHVAN, 26));
        let shabbos = eph.hebrew_date_at(after, &dallas()).unwrap();
        assert_eq!((shabbos.month(), shabbos.day()), (CHESHVAN, 27));
        assert_eq!(shabbos.day_of_week(), 6);
    }

    #[test]
    fn hebrew_date_at_polar_location_fails() {
        let south = Location::new("Antarctica", false, -82.0, 0.0, 0.0);
        let noon = date(2025, 6, 27).and_hms_opt(12, 0, 0).unwrap();
        assert!(matches!(
            ephemeris().hebrew_date_at(noon, &south),
            Err(ZmanimError::NoSunriseSunset { .. })
        ));
    }

    #[test]
    fn cache_is_bounded() {
        let eph = SolarEphemeris::with_policy(DstPolicy::RulesOnly, 5);
        for d in 1..=12 {
            eph.sun_times(&date(2024, 1, d), &dallas(), true).unwrap();
        }
        assert!(eph.cached_entries() <= 5);
        eph.clear_cache();
        assert_eq!(eph.cached_entries(), 0);
    }

    #[test]
    fn ephemeris_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SolarEphemeris>();
    }
}
