// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error type shared by every fallible operation in the crate.
//!
//! Failures are local to the single requested computation: nothing is
//! retried and no partial result is returned.  Callers that present times
//! to a user are expected to show a fallback when an error propagates.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors produced by calendar conversion, solar computation and formatting.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ZmanimError {
    /// A civil date string could not be interpreted.
    #[error("cannot interpret {0:?} as a civil date")]
    InvalidDateString(String),

    /// A clock time string could not be interpreted.
    #[error("cannot interpret {0:?} as a time of day")]
    InvalidTimeString(String),

    /// A Hebrew date triple outside the calendar.
    #[error("invalid Hebrew date: year {year}, month {month}, day {day}")]
    InvalidHebrewDate { year: i32, month: u32, day: u32 },

    /// An absolute day number before 1 Tishrei of year 1, or too large to
    /// hold a year number.
    #[error("absolute day {0} is outside the Hebrew calendar range")]
    AbsoluteDayOutOfRange(i64),

    /// An absolute day number with no representable civil date.
    #[error("absolute day {0} has no representable civil date")]
    CivilDateOutOfRange(i64),

    /// The sun does not cross the corrected horizon on this day.
    ///
    /// Raised for polar day and polar night instead of returning a time.
    #[error("the sun does not rise or set at {location} on {date}; the location may be in a polar region")]
    NoSunriseSunset { location: String, date: NaiveDate },

    /// Argument to the Hebrew numeral formatter outside `[1, 9999]`.
    #[error("{0} cannot be written as a Hebrew number (expected 1 to 9999)")]
    HebrewNumberOutOfRange(i64),

    /// Candle lighting was requested for a day that has none.
    #[error("there is no candle lighting on {0}")]
    NoCandleLighting(String),

    /// Settings text could not be parsed.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, ZmanimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polar_error_names_location_and_date() {
        let err = ZmanimError::NoSunriseSunset {
            location: "McMurdo".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 27).unwrap(),
        };
        let msg = err.to_string();
        assert!(msg.contains("McMurdo"));
        assert!(msg.contains("2025-06-27"));
    }

    #[test]
    fn hebrew_number_error_message() {
        let err = ZmanimError::HebrewNumberOutOfRange(10_000);
        assert_eq!(
            err.to_string(),
            "10000 cannot be written as a Hebrew number (expected 1 to 9999)"
        );
    }
}
