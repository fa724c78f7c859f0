// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Hebrew calendar dates.
//!
//! A [`HebrewDate`] carries its `(year, month, day)` triple together with
//! the **absolute day number**, a day count shared with the civil calendar:
//! day 1 is 1 January of year 1 CE (proleptic Gregorian), which is exactly
//! chrono's [`NaiveDate::num_days_from_ce`].  Converting between calendars
//! is therefore a round trip through that integer.
//!
//! Months are numbered from Nissan:
//!
//! | # | Month | # | Month |
//! |---|-------|---|-------|
//! | 1 | Nissan | 8 | Cheshvan |
//! | 2 | Iyar | 9 | Kislev |
//! | 3 | Sivan | 10 | Teves |
//! | 4 | Tamuz | 11 | Shvat |
//! | 5 | Av | 12 | Adar (Adar Rishon in a leap year) |
//! | 6 | Elul | 13 | Adar Sheini (leap years only) |
//! | 7 | Tishrei | | |
//!
//! The year starts on 1 Tishrei, so month 7 of year *y* comes before
//! month 1 of year *y*.
//!
//! ```rust
//! use luach::HebrewDate;
//! use chrono::NaiveDate;
//!
//! let civil = NaiveDate::from_ymd_opt(2023, 11, 10).unwrap();
//! let hd = HebrewDate::from_civil_date(civil).unwrap();
//! assert_eq!((hd.year(), hd.month(), hd.day()), (5784, 8, 26));
//! assert_eq!(hd.to_string(), "Erev Shabbos, the 26th of Cheshvan 5784");
//! assert_eq!(hd.civil_date().unwrap(), civil);
//! ```

use crate::error::{Result, ZmanimError};
use crate::hebrew_number::{to_hebrew_number, to_suffixed};
use crate::year_type::{elapsed_days, YearInfo, YearProperties};
use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Weekday};
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;

#[cfg(feature = "serde")]
use serde::{ser::SerializeStruct, Deserialize, Deserializer, Serialize, Serializer};

pub use crate::year_type::{is_leap_year, months_in_year};

// ── month numbers ─────────────────────────────────────────────────────────

pub const NISSAN: u32 = 1;
pub const IYAR: u32 = 2;
pub const SIVAN: u32 = 3;
pub const TAMUZ: u32 = 4;
pub const AV: u32 = 5;
pub const ELUL: u32 = 6;
pub const TISHREI: u32 = 7;
pub const CHESHVAN: u32 = 8;
pub const KISLEV: u32 = 9;
pub const TEVES: u32 = 10;
pub const SHVAT: u32 = 11;
pub const ADAR: u32 = 12;
pub const ADAR_SHEINI: u32 = 13;

/// `absolute = elapsed_days(year) + day_of_year - HEBREW_EPOCH_OFFSET`.
const HEBREW_EPOCH_OFFSET: i64 = 1_373_429;

#[rustfmt::skip]
const MONTH_NAMES: [&str; 14] = [
    "", "Nissan", "Iyar", "Sivan", "Tamuz", "Av", "Ellul", "Tishrei",
    "Cheshvan", "Kislev", "Teves", "Shvat", "Adar", "Adar Sheini",
];

#[rustfmt::skip]
const MONTH_NAMES_HEB: [&str; 14] = [
    "", "ניסן", "אייר", "סיון", "תמוז", "אב", "אלול", "תשרי",
    "חשון", "כסלו", "טבת", "שבט", "אדר", "אדר שני",
];

#[rustfmt::skip]
const WEEKDAY_NAMES: [&str; 7] = [
    "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Erev Shabbos", "Shabbos Kodesh",
];

#[rustfmt::skip]
const WEEKDAY_NAMES_HEB: [&str; 7] = [
    "יום ראשון", "יום שני", "יום שלישי", "יום רביעי", "יום חמישי", "ערב שבת קודש", "שבת קודש",
];

/// Civil date layouts accepted by [`HebrewDate::parse_civil`].
const CIVIL_FORMATS: [&str; 6] = [
    "%Y-%m-%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%d %B %Y",
    "%m/%d/%Y",
];

// ═══════════════════════════════════════════════════════════════════════════
// CalendarDay trait
// ═══════════════════════════════════════════════════════════════════════════

/// A day in either calendar.
///
/// Solar computations accept anything implementing this trait and work
/// internally on the civil date.
pub trait CalendarDay {
    /// Absolute day number (1 = 0001-01-01 CE).
    fn absolute_day(&self) -> i64;

    /// The civil (proleptic Gregorian) date.
    fn civil_date(&self) -> Result<NaiveDate>;
}

impl CalendarDay for NaiveDate {
    #[inline]
    fn absolute_day(&self) -> i64 {
        self.num_days_from_ce() as i64
    }

    #[inline]
    fn civil_date(&self) -> Result<NaiveDate> {
        Ok(*self)
    }
}

impl CalendarDay for HebrewDate {
    #[inline]
    fn absolute_day(&self) -> i64 {
        self.abs
    }

    #[inline]
    fn civil_date(&self) -> Result<NaiveDate> {
        HebrewDate::civil_date(self)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// HebrewDate
// ═══════════════════════════════════════════════════════════════════════════

/// A validated Hebrew calendar date.
///
/// Ordering is chronological.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct HebrewDate {
    year: i32,
    month: u32,
    day: u32,
    abs: i64,
}

impl HebrewDate {
    // ── constructors ──────────────────────────────────────────────────

    /// Build from a `(year, month, day)` triple.
    ///
    /// Fails when `year < 1`, the month does not exist in that year, or the
    /// day is past the end of the month.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self> {
        let invalid = || ZmanimError::InvalidHebrewDate { year, month, day };
        if year < 1 || month < 1 || month > months_in_year(year) {
            return Err(invalid());
        }
        if day < 1 || day > Self::days_in_month(year, month) {
            return Err(invalid());
        }
        Ok(Self {
            year,
            month,
            day,
            abs: to_absolute(year, month, day),
        })
    }

    /// Build from an absolute day number.
    pub fn from_absolute_day(abs: i64) -> Result<Self> {
        let out_of_range = || ZmanimError::AbsoluteDayOutOfRange(abs);
        if abs < to_absolute(1, TISHREI, 1) || abs > last_absolute_day() {
            return Err(out_of_range());
        }

        // Estimate from the mean year of 35975351 / 98496 days, then walk to
        // the year whose Rosh Hashana is the last one at or before `abs`.
        let estimate = 3761 + (abs * 98_496).div_euclid(35_975_351);
        let estimate = estimate.clamp(1, i64::from(i32::MAX));
        let mut year = i32::try_from(estimate).map_err(|_| out_of_range())?;
        while year > 1 && abs < to_absolute(year, TISHREI, 1) {
            year -= 1;
        }
        while year < i32::MAX && abs >= to_absolute(year + 1, TISHREI, 1) {
            year += 1;
        }

        let mut month = if abs < to_absolute(year, NISSAN, 1) {
            TISHREI
        } else {
            NISSAN
        };
        while abs > to_absolute(year, month, Self::days_in_month(year, month)) {
            month += 1;
        }
        let day = u32::try_from(abs - to_absolute(year, month, 1) + 1).map_err(|_| out_of_range())?;

        Ok(Self {
            year,
            month,
            day,
            abs,
        })
    }

    /// Hebrew date of a civil date.
    pub fn from_civil_date(date: NaiveDate) -> Result<Self> {
        Self::from_absolute_day(date.absolute_day())
    }

    /// Hebrew date of the calendar day `datetime` falls on in its own zone.
    ///
    /// Midnight stays on its own day whatever the host's UTC offset.
    pub fn from_date_time<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Result<Self> {
        Self::from_civil_date(datetime.date_naive())
    }

    /// Parse a civil date string such as `2023-11-10` or `November 10, 2023`.
    pub fn parse_civil(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        let date = CIVIL_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
            .ok_or_else(|| ZmanimError::InvalidDateString(text.to_string()))?;
        Self::from_civil_date(date)
    }

    /// 1 Tishrei of `year`.
    pub fn rosh_hashana_of(year: i32) -> Result<Self> {
        Self::from_ymd(year, TISHREI, 1)
    }

    /// Today's date according to the host clock.
    pub fn today() -> Result<Self> {
        Self::from_date_time(&Local::now())
    }

    // ── accessors ─────────────────────────────────────────────────────

    #[inline]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u32 {
        self.month
    }

    #[inline]
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Absolute day number (1 = 0001-01-01 CE).
    #[inline]
    pub const fn absolute_day(&self) -> i64 {
        self.abs
    }

    /// The civil date this Hebrew date falls on (daytime portion).
    pub fn civil_date(&self) -> Result<NaiveDate> {
        i32::try_from(self.abs)
            .ok()
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .ok_or(ZmanimError::CivilDateOutOfRange(self.abs))
    }

    /// Day of the week, `0` for Sunday through `6` for Shabbos.
    #[inline]
    pub fn day_of_week(&self) -> u32 {
        self.abs.rem_euclid(7) as u32
    }

    /// Day of the week as a `chrono` value.
    pub fn weekday(&self) -> Weekday {
        match self.day_of_week() {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }

    // ── arithmetic ────────────────────────────────────────────────────

    /// Move by a signed number of days.
    pub fn add_days(&self, days: i64) -> Result<Self> {
        self.abs
            .checked_add(days)
            .ok_or(ZmanimError::AbsoluteDayOutOfRange(self.abs.saturating_add(days)))
            .and_then(Self::from_absolute_day)
    }

    /// Move by a signed number of Hebrew months.
    ///
    /// Day 30 becomes day 29 when the target month is short.
    pub fn add_months(&self, months: i32) -> Result<Self> {
        let (mut year, mut month) = (self.year, self.month);
        let mut count = months_in_year(year);
        for _ in 0..months.unsigned_abs() {
            if months > 0 {
                month += 1;
                if month > count {
                    month = NISSAN;
                }
                if month == TISHREI {
                    year = year.checked_add(1).ok_or(self.overflow(i32::MAX))?;
                    count = months_in_year(year);
                }
            } else {
                month -= 1;
                if month == 0 {
                    month = count;
                }
                if month == ELUL {
                    year -= 1;
                    count = months_in_year(year);
                }
            }
        }
        Self::from_ymd(year, month, clamp_day(year, month, self.day))
    }

    /// Move by a signed number of Hebrew years.
    ///
    /// Adar Sheini becomes Adar in a common year, 30 Cheshvan or 30 Kislev
    /// become the first of the following month when that month is short, and
    /// any other day 30 is clamped to 29.
    pub fn add_years(&self, years: i32) -> Result<Self> {
        let year = self
            .year
            .checked_add(years)
            .ok_or(self.overflow(self.year.saturating_add(years)))?;
        let (mut month, mut day) = (self.month, self.day);
        if month == ADAR_SHEINI && !is_leap_year(year) {
            month = ADAR;
        } else if month == CHESHVAN && day == 30 && !Self::is_long_cheshvan(year) {
            month = KISLEV;
            day = 1;
        } else if month == KISLEV && day == 30 && Self::is_short_kislev(year) {
            month = TEVES;
            day = 1;
        }
        Self::from_ymd(year, month, clamp_day(year, month, day))
    }

    fn overflow(&self, year: i32) -> ZmanimError {
        ZmanimError::InvalidHebrewDate {
            year,
            month: self.month,
            day: self.day,
        }
    }

    /// Days from `self` to `other`; negative when `other` is earlier.
    #[inline]
    pub fn diff_days(&self, other: &Self) -> i64 {
        other.abs - self.abs
    }

    /// Months from `self` to `other`, ignoring the day of the month.
    pub fn diff_months(&self, other: &Self) -> i64 {
        let (mut year, mut month) = (other.year, other.month);
        let mut months = 0;
        while !(year == self.year && month == self.month) {
            if self.abs > other.abs {
                months -= 1;
                month += 1;
                if month > months_in_year(year) {
                    month = NISSAN;
                } else if month == TISHREI {
                    year += 1;
                }
            } else {
                months += 1;
                if month == NISSAN {
                    month = months_in_year(year);
                } else {
                    month -= 1;
                    if month == ELUL {
                        year -= 1;
                    }
                }
            }
        }
        months
    }

    /// Whole months from `self` to `other`.
    pub fn diff_full_months(&self, other: &Self) -> i64 {
        let months = self.diff_months(other);
        if other.abs >= self.abs && self.day > other.day {
            months - 1
        } else if other.abs < self.abs && self.day < other.day {
            months + 1
        } else {
            months
        }
    }

    /// Years from `self` to `other`, ignoring month and day.
    #[inline]
    pub fn diff_years(&self, other: &Self) -> i64 {
        i64::from(other.year) - i64::from(self.year)
    }

    /// Whole years from `self` to `other`.
    pub fn diff_full_years(&self, other: &Self) -> i64 {
        let years = self.diff_years(other);
        let (mine, theirs) = (self.position_in_year(), other.position_in_year());
        if other.abs >= self.abs && mine > theirs {
            years - 1
        } else if other.abs < self.abs && mine < theirs {
            years + 1
        } else {
            years
        }
    }

    /// `(month index counted from Tishrei, day)`, comparable within a year.
    fn position_in_year(&self) -> (u32, u32) {
        let index = if self.month >= TISHREI {
            self.month - TISHREI
        } else {
            self.month + ADAR_SHEINI - TISHREI
        };
        (index, self.day)
    }

    // ── observances ───────────────────────────────────────────────────

    /// Yom Tov, including the second days kept outside Israel.
    pub fn is_yom_tov(&self, israel: bool) -> bool {
        let day = self.day;
        match self.month {
            NISSAN => matches!(day, 15 | 21) || (!israel && matches!(day, 16 | 22)),
            SIVAN => day == 6 || (!israel && day == 7),
            TISHREI => matches!(day, 1 | 2 | 10 | 15 | 22) || (!israel && matches!(day, 16 | 23)),
            _ => false,
        }
    }

    /// Yom Tov or one of the intermediate days of Pesach and Sukkos.
    pub fn is_yom_tov_or_chol_hamoed(&self, israel: bool) -> bool {
        self.is_yom_tov(israel)
            || (self.month == NISSAN && (16..=20).contains(&self.day))
            || (self.month == TISHREI && (16..=21).contains(&self.day))
    }

    /// The day before a Yom Tov, including the eve of the last days of
    /// Pesach and of Shmini Atzeres.
    pub fn is_erev_yom_tov(&self) -> bool {
        match self.month {
            NISSAN => matches!(self.day, 14 | 20),
            SIVAN => self.day == 5,
            ELUL => self.day == 29,
            TISHREI => matches!(self.day, 9 | 14 | 21),
            _ => false,
        }
    }

    /// Candles are lit before sunset: every Friday and every Erev Yom Tov
    /// that is not Shabbos.
    pub fn has_candle_lighting(&self) -> bool {
        match self.day_of_week() {
            5 => true,
            6 => false,
            _ => self.is_erev_yom_tov(),
        }
    }

    /// An Eiruv Tavshilin is made today for a Yom Tov running into Shabbos.
    pub fn has_eiruv_tavshilin(&self, israel: bool) -> bool {
        let dow = self.day_of_week();
        matches!(dow, 3 | 4)
            && self.is_erev_yom_tov()
            && (dow == 4 || (dow == 3 && (!israel || self.month == ELUL)))
            && self.day != 9
    }

    /// Day of the Omer count (1 to 49), or 0 outside the count.
    pub fn day_of_omer(&self) -> u32 {
        let counting = (self.month == NISSAN && self.day > 15)
            || self.month == IYAR
            || (self.month == SIVAN && self.day < 6);
        if counting {
            (self.abs - to_absolute(self.year, NISSAN, 15)) as u32
        } else {
            0
        }
    }

    // ── names ─────────────────────────────────────────────────────────

    /// English month name, e.g. `Cheshvan 5784` or `Adar Rishon 5784`.
    pub fn month_name(&self, show_year: bool) -> String {
        let mut name = MONTH_NAMES[self.month as usize].to_string();
        if self.month == ADAR && is_leap_year(self.year) {
            name.push_str(" Rishon");
        }
        if show_year {
            name.push_str(&format!(" {}", self.year));
        }
        name
    }

    /// Short form, e.g. `Tuesday Nissan 3, 5778`.
    pub fn to_short_string(&self, show_day_of_week: bool) -> String {
        let dow = if show_day_of_week {
            format!("{} ", WEEKDAY_NAMES[self.day_of_week() as usize])
        } else {
            String::new()
        };
        format!(
            "{}{} {}, {}",
            dow, MONTH_NAMES[self.month as usize], self.day, self.year
        )
    }

    /// Hebrew form, e.g. `ערב שבת קודש כ"ו חשון תשפ"ד`.
    pub fn to_hebrew_string(&self, hide_day_of_week: bool) -> Result<String> {
        let mut out = String::new();
        if !hide_day_of_week {
            out.push_str(WEEKDAY_NAMES_HEB[self.day_of_week() as usize]);
            out.push(' ');
        }
        out.push_str(&to_hebrew_number(self.day as i64)?);
        out.push(' ');
        out.push_str(MONTH_NAMES_HEB[self.month as usize]);
        if self.month == ADAR && is_leap_year(self.year) {
            out.push_str(" ראשון");
        }
        out.push(' ');
        let short_year = match self.year % 1000 {
            0 => self.year,
            rest => rest,
        };
        out.push_str(&to_hebrew_number(short_year as i64)?);
        Ok(out)
    }

    // ── calendar structure ────────────────────────────────────────────

    /// Number of days in `month` of `year`; `0` for a month that does not
    /// exist.
    pub fn days_in_month(year: i32, month: u32) -> u32 {
        if month == ADAR_SHEINI && !is_leap_year(year) {
            return 0;
        }
        month_length(&YearInfo::for_year(year), month)
    }

    /// Length of `year` in days.
    pub fn days_in_year(year: i32) -> u32 {
        YearInfo::for_year(year).days_in_year()
    }

    /// Cheshvan of `year` has 30 days.
    pub fn is_long_cheshvan(year: i32) -> bool {
        YearInfo::for_year(year).is_long_cheshvan()
    }

    /// Kislev of `year` has 29 days.
    pub fn is_short_kislev(year: i32) -> bool {
        YearInfo::for_year(year).is_short_kislev()
    }
}

fn month_length(info: &YearInfo, month: u32) -> u32 {
    match month {
        NISSAN | SIVAN | AV | TISHREI | SHVAT => 30,
        IYAR | TAMUZ | ELUL | TEVES | ADAR_SHEINI => 29,
        CHESHVAN if info.is_long_cheshvan() => 30,
        CHESHVAN => 29,
        KISLEV if info.is_short_kislev() => 29,
        KISLEV => 30,
        ADAR if info.is_leap() => 30,
        ADAR => 29,
        _ => 0,
    }
}

fn clamp_day(year: i32, month: u32, day: u32) -> u32 {
    if day == 30 && HebrewDate::days_in_month(year, month) == 29 {
        29
    } else {
        day
    }
}

/// 29 Elul of the last representable year.
fn last_absolute_day() -> i64 {
    static LAST: OnceLock<i64> = OnceLock::new();
    *LAST.get_or_init(|| to_absolute(i32::MAX, ELUL, 29))
}

/// Absolute day number of a `(year, month, day)` triple.
fn to_absolute(year: i32, month: u32, day: u32) -> i64 {
    let info = YearInfo::for_year(year);
    let last_month = if info.is_leap() { ADAR_SHEINI } else { ADAR };
    let length = |m: u32| month_length(&info, m) as i64;
    let mut total = day as i64;
    if month < TISHREI {
        total += (TISHREI..=last_month).map(length).sum::<i64>();
        total += (NISSAN..month).map(length).sum::<i64>();
    } else {
        total += (TISHREI..month).map(length).sum::<i64>();
    }
    total + elapsed_days(year) - HEBREW_EPOCH_OFFSET
}

// ═══════════════════════════════════════════════════════════════════════════
// Trait implementations
// ═══════════════════════════════════════════════════════════════════════════

impl PartialOrd for HebrewDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HebrewDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.abs.cmp(&other.abs)
    }
}

/// `Erev Shabbos, the 26th of Cheshvan 5784`.
impl fmt::Display for HebrewDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}, the {} of {}",
            WEEKDAY_NAMES[self.day_of_week() as usize],
            to_suffixed(self.day),
            self.month_name(true)
        )
    }
}

#[cfg(feature = "serde")]
impl Serialize for HebrewDate {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("HebrewDate", 3)?;
        s.serialize_field("year", &self.year)?;
        s.serialize_field("month", &self.month)?;
        s.serialize_field("day", &self.day)?;
        s.end()
    }
}

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for HebrewDate {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Raw {
            year: i32,
            month: u32,
            day: u32,
        }

        let raw = Raw::deserialize(deserializer)?;
        HebrewDate::from_ymd(raw.year, raw.month, raw.day).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════
