// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-of-day values and their arithmetic.
//!
//! [`TimeValue`] is an `hour:minute:second` triple that doubles as a clock
//! time and as a short duration.  Construction with [`TimeValue::new`] keeps
//! the raw components; every arithmetic operation returns a
//! [normalized](TimeValue::normalize) value with `0 ≤ minute, second < 60`
//! and the hour wrapped into `[0, 24)`.
//!
//! A `TimeValue` is always present.  Solar code that cannot produce a time
//! (no sunrise at a polar location) returns an error instead, and a zman
//! that does not apply today is left out of its list, so arithmetic never
//! runs on a placeholder zero.
//!
//! ```rust
//! use luach::TimeValue;
//! use qtty::Seconds;
//!
//! let sunset = TimeValue::new(17, 28, 59);
//! let candles = sunset.add_minutes(-18.0);
//! assert_eq!(candles.to_string(), "5:10:59 PM");
//! assert_eq!((sunset + Seconds::new(3600.0)).to_string_24h(), "18:28:59");
//! ```

use crate::error::{Result, ZmanimError};
use chrono::{NaiveTime, Timelike};
use qtty::Seconds;
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seconds in a civil day.
pub const SECONDS_PER_DAY: i64 = 86_400;

// ═══════════════════════════════════════════════════════════════════════════
// TimeValue
// ═══════════════════════════════════════════════════════════════════════════

/// A time of day, or a duration shorter than a day.
///
/// Equality compares the raw components, so compare normalized values.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct TimeValue {
    hour: i32,
    minute: i32,
    second: i32,
}

impl TimeValue {
    /// `0:00:00`.
    pub const MIDNIGHT: Self = Self::new(0, 0, 0);

    /// `12:00:00`.
    pub const NOON: Self = Self::new(12, 0, 0);

    // ── constructors ──────────────────────────────────────────────────

    /// Build from raw components.  No normalization is applied.
    #[inline]
    pub const fn new(hour: i32, minute: i32, second: i32) -> Self {
        Self {
            hour,
            minute,
            second,
        }
    }

    /// Build a normalized time from a signed count of seconds after midnight.
    pub fn from_total_seconds(seconds: i64) -> Self {
        let s = seconds.rem_euclid(SECONDS_PER_DAY);
        Self::new((s / 3600) as i32, ((s % 3600) / 60) as i32, (s % 60) as i32)
    }

    /// Time of day of a `chrono` clock time, truncated to the second.
    pub fn from_naive_time(time: NaiveTime) -> Self {
        Self::new(time.hour() as i32, time.minute() as i32, time.second() as i32)
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn hour(&self) -> i32 {
        self.hour
    }

    #[inline]
    pub const fn minute(&self) -> i32 {
        self.minute
    }

    #[inline]
    pub const fn second(&self) -> i32 {
        self.second
    }

    /// `hour * 60 + minute`; seconds are dropped.
    #[inline]
    pub const fn total_minutes(&self) -> i64 {
        self.hour as i64 * 60 + self.minute as i64
    }

    /// `hour * 3600 + minute * 60 + second`.
    #[inline]
    pub const fn total_seconds(&self) -> i64 {
        self.total_minutes() * 60 + self.second as i64
    }

    /// Convert to a `chrono` clock time.  The value is normalized first.
    pub fn to_naive_time(&self) -> Option<NaiveTime> {
        let t = self.normalize();
        NaiveTime::from_hms_opt(t.hour as u32, t.minute as u32, t.second as u32)
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// Carry seconds into minutes and minutes into hours, then wrap the hour
    /// into `[0, 24)`.
    pub fn normalize(&self) -> Self {
        Self::from_total_seconds(self.total_seconds())
    }

    /// Add a signed number of whole seconds.  Any `i64` is accepted; the
    /// sum wraps around the day.
    pub fn add_seconds(&self, seconds: i64) -> Self {
        let sum = i128::from(self.total_seconds()) + i128::from(seconds);
        let wrapped = sum.rem_euclid(i128::from(SECONDS_PER_DAY));
        Self::from_total_seconds(wrapped as i64)
    }

    /// Add a signed, possibly fractional, number of minutes.
    ///
    /// Fractions are rounded to the nearest whole second.
    pub fn add_minutes(&self, minutes: f64) -> Self {
        self.add_seconds((minutes * 60.0).round() as i64)
    }

    /// Time elapsed from `early` to `late`.
    ///
    /// When `late` is earlier in the day than `early`, the result is either
    /// negative (`allow_negative`) or the wrap-around interval until `late`
    /// on the following day.
    pub fn diff(early: Self, late: Self, allow_negative: bool) -> TimeDiff {
        let early_sec = early.total_seconds();
        let late_sec = late.total_seconds();
        let (seconds, sign) = if early_sec <= late_sec {
            (late_sec - early_sec, 1)
        } else if allow_negative {
            (early_sec - late_sec, -1)
        } else {
            (SECONDS_PER_DAY - early_sec + late_sec, 1)
        };
        TimeDiff {
            duration: Self::from_total_seconds(seconds),
            sign,
        }
    }

    /// `true` when `self` is at or after `other` on the same day.
    #[inline]
    pub fn is_after(&self, other: &Self) -> bool {
        self.total_seconds() >= other.total_seconds()
    }

    // ── formatting ────────────────────────────────────────────────────

    /// 24-hour rendering, e.g. `17:28:59`.
    pub fn to_string_24h(&self) -> String {
        format!("{}:{:02}:{:02}", self.hour, self.minute, self.second)
    }

    /// Spell out a duration, e.g. `1 hour 5 minutes`.
    pub fn interval_text(&self) -> String {
        let parts = [
            (self.hour, "hour", "hours"),
            (self.minute, "minute", "minutes"),
            (self.second, "second", "seconds"),
        ];
        parts
            .iter()
            .filter(|(n, _, _)| *n > 0)
            .map(|(n, one, many)| format!("{} {}", n, if *n == 1 { one } else { many }))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TimeDiff
// ═══════════════════════════════════════════════════════════════════════════

/// Signed result of [`TimeValue::diff`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct TimeDiff {
    /// Magnitude of the difference, normalized.
    pub duration: TimeValue,
    /// `1` or `-1`.
    pub sign: i8,
}

impl TimeDiff {
    /// Signed number of seconds.
    #[inline]
    pub fn seconds(&self) -> Seconds {
        Seconds::new((self.sign as i64 * self.duration.total_seconds()) as f64)
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.sign < 0
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait implementations
// ═══════════════════════════════════════════════════════════════════════════

// ── Display ───────────────────────────────────────────────────────────────

/// 12-hour clock rendering, e.g. `6:53:36 AM`.
impl fmt::Display for TimeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hour12 = match self.hour {
            0 => 12,
            h if h <= 12 => h,
            h => h - 12,
        };
        let suffix = if self.hour < 12 { "AM" } else { "PM" };
        write!(
            f,
            "{}:{:02}:{:02} {}",
            hour12, self.minute, self.second, suffix
        )
    }
}

// ── Parsing ───────────────────────────────────────────────────────────────

/// Parses `H:MM` or `H:MM:SS` in 24-hour form.
impl FromStr for TimeValue {
    type Err = ZmanimError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || ZmanimError::InvalidTimeString(s.to_string());
        let fields = s
            .trim()
            .split(':')
            .map(|p| p.parse::<i32>().map_err(|_| invalid()))
            .collect::<Result<Vec<_>>>()?;
        match fields.as_slice() {
            [h, m] => Ok(Self::new(*h, *m, 0)),
            [h, m, sec] => Ok(Self::new(*h, *m, *sec)),
            _ => Err(invalid()),
        }
    }
}

// ── Serde ─────────────────────────────────────────────────────────────────

#[cfg(feature = "serde")]
impl Serialize for TimeValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string_24h())
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for TimeValue {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// ── Arithmetic ────────────────────────────────────────────────────────────

impl Add<Seconds> for TimeValue {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Seconds) -> Self::Output {
        self.add_seconds(rhs.value().round() as i64)
    }
}

impl Sub<Seconds> for TimeValue {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Seconds) -> Self::Output {
        self.add_seconds(-(rhs.value().round() as i64))
    }
}

/// Signed same-day difference `self - rhs`.
impl Sub for TimeValue {
    type Output = Seconds;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Seconds::new((self.total_seconds() - rhs.total_seconds()) as f64)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
