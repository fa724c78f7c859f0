// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Daylight-saving time.
//!
//! Solar times are computed in a location's standard time and shifted by one
//! hour when the location observes DST on that date.  A [`Location`] carries
//! only a fixed UTC offset, so whether DST applies is decided heuristically:
//!
//! | Policy | Location offset equals host standard offset | Otherwise |
//! |--------|---------------------------------------------|-----------|
//! | [`DstPolicy::HostThenRules`] | host time-zone tables | Israel or USA rule |
//! | [`DstPolicy::RulesOnly`] | Israel or USA rule | Israel or USA rule |
//!
//! The Israel rule runs from 2 AM on the Friday before the last Sunday of
//! March until 2 AM on the last Sunday of October.  The USA rule runs from
//! 2 AM on the second Sunday of March until 2 AM on the first Sunday of
//! November.

use crate::location::Location;
use chrono::{Datelike, Local, NaiveDate, Offset, TimeZone, Weekday};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hour of the day at which both rules switch.
const TRANSITION_HOUR: u32 = 2;

/// How to decide whether a location is on daylight-saving time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DstPolicy {
    /// Trust the host's time-zone tables when the location shares the host's
    /// standard offset, otherwise fall back to the hand-coded rules.
    #[default]
    HostThenRules,
    /// Always use the hand-coded rules.  Results do not depend on the host.
    RulesOnly,
}

impl DstPolicy {
    /// Is `location` on daylight-saving time at `hour` o'clock on `date`?
    pub fn is_dst(&self, location: &Location, date: NaiveDate, hour: u32) -> bool {
        if *self == Self::HostThenRules {
            let host = host_standard_offset(date.year())
                .filter(|std| location.utc_offset == *std as f64)
                .and_then(|_| host_is_dst(date, hour));
            if let Some(dst) = host {
                log::trace!("DST for {} on {date} from host tables: {dst}", location.name);
                return dst;
            }
        }
        if location.israel {
            is_israel_dst(date, hour)
        } else {
            is_usa_dst(date, hour)
        }
    }
}

/// USA rule: second Sunday of March to first Sunday of November, 2 AM.
pub fn is_usa_dst(date: NaiveDate, hour: u32) -> bool {
    match date.month() {
        4..=10 => true,
        3 => {
            let start = nth_sunday(date.year(), 3, 2);
            date.day() > start || (date.day() == start && hour >= TRANSITION_HOUR)
        }
        11 => {
            let end = nth_sunday(date.year(), 11, 1);
            date.day() < end || (date.day() == end && hour < TRANSITION_HOUR)
        }
        _ => false,
    }
}

/// Israel rule: Friday before the last Sunday of March to the last Sunday
/// of October, 2 AM.
pub fn is_israel_dst(date: NaiveDate, hour: u32) -> bool {
    match date.month() {
        4..=9 => true,
        3 => {
            let start = last_sunday(date.year(), 3) - 2;
            date.day() > start || (date.day() == start && hour >= TRANSITION_HOUR)
        }
        10 => {
            let end = last_sunday(date.year(), 10);
            date.day() < end || (date.day() == end && hour < TRANSITION_HOUR)
        }
        _ => false,
    }
}

/// Day of the month of the `n`th Sunday.
fn nth_sunday(year: i32, month: u32, n: u8) -> u32 {
    NaiveDate::from_weekday_of_month_opt(year, month, Weekday::Sun, n)
        .map(|d| d.day())
        .unwrap_or(1)
}

/// Day of the month of the last Sunday of a 31-day month.
fn last_sunday(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 31)
        .map(|d| 31 - d.weekday().num_days_from_sunday())
        .unwrap_or(31)
}

/// Host UTC offset, in whole hours, at local wall time `date` `hour`:00.
fn host_offset_hours(date: NaiveDate, hour: u32) -> Option<i32> {
    let naive = date.and_hms_opt(hour, 0, 0)?;
    let local = Local.from_local_datetime(&naive).earliest()?;
    Some(local.offset().fix().local_minus_utc() / 3600)
}

/// The host's standard (winter) offset in whole hours for `year`.
fn host_standard_offset(year: i32) -> Option<i32> {
    let jan = host_offset_hours(NaiveDate::from_ymd_opt(year, 1, 1)?, 0)?;
    let jul = host_offset_hours(NaiveDate::from_ymd_opt(year, 7, 1)?, 0)?;
    Some(jan.min(jul))
}

fn host_is_dst(date: NaiveDate, hour: u32) -> Option<bool> {
    let std = host_standard_offset(date.year())?;
    Some(host_offset_hours(date, hour)? != std)
}
