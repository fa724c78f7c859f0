// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Luach
//!
//! Hebrew calendar arithmetic and halachic times (zmanim) for any location.
//!
//! # Core types
//!
//! - [`TimeValue`]: a clock time or short duration, with normalizing
//!   arithmetic.
//! - [`Location`]: an observer's coordinates, UTC offset, elevation and
//!   candle-lighting lead.
//! - [`HebrewDate`]: a Hebrew date with its absolute day number, convertible
//!   to and from chrono's [`NaiveDate`](chrono::NaiveDate).
//! - [`SolarEphemeris`]: sunrise and sunset, solar noon, proportional hours.
//! - [`ZmanimTable`]: concrete times for a list of [`ZmanDefinition`]s, and
//!   the display view that rolls passed zmanim over to tomorrow.
//! - [`Settings`]: caller-owned configuration.
//!
//! # Layers
//!
//! | Layer | Depends on |
//! |-------|------------|
//! | [`time_value`], [`location`] | nothing |
//! | [`hebrew_date`], [`year_type`] | time values |
//! | [`ephemeris`], [`dst`] | calendar, location |
//! | [`zmanim_table`] | ephemeris, calendar |
//!
//! # Failure
//!
//! Every fallible operation returns [`Result`].  Polar day and polar night
//! surface as [`ZmanimError::NoSunriseSunset`] instead of a made-up time.
//!
//! ```rust
//! use luach::{HebrewDate, Location, Settings, ZmanimTable, DstPolicy, ZmanType};
//! use chrono::NaiveDate;
//!
//! let lakewood = Location::new("Lakewood", false, 40.1, 74.23, -5.0);
//! let table = ZmanimTable::new(Settings { dst_policy: DstPolicy::RulesOnly, ..Settings::default() });
//!
//! let purim = HebrewDate::from_ymd(5789, 12, 14).unwrap();
//! let date = purim.civil_date().unwrap();
//! assert_eq!(date, NaiveDate::from_ymd_opt(2029, 3, 1).unwrap());
//!
//! let zmanim = table.all_zmanim(date, &purim, &lakewood).unwrap();
//! let chatzos = zmanim.iter().find(|z| z.zman_type() == ZmanType::ChatzosDay).unwrap();
//! assert_eq!(chatzos.time.to_string(), "12:09:25 PM");
//! ```

mod cache;
pub mod dst;
pub mod ephemeris;
pub mod error;
pub mod hebrew_date;
pub mod hebrew_number;
pub mod location;
pub mod settings;
pub mod time_value;
pub mod year_type;
pub mod zman;
pub mod zmanim_table;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use cache::DEFAULT_CACHE_CAPACITY;
pub use dst::{is_israel_dst, is_usa_dst, DstPolicy};
pub use ephemeris::{candle_lighting, SolarEphemeris, SunTimes};
pub use error::{Result, ZmanimError};
pub use hebrew_date::{CalendarDay, HebrewDate};
pub use hebrew_number::{to_hebrew_number, to_suffixed};
pub use location::Location;
pub use settings::Settings;
pub use time_value::{TimeDiff, TimeValue};
pub use year_type::{elapsed_days, is_leap_year, months_in_year, YearInfo, YearProperties};
pub use zman::{CustomLabels, WhichDays, ZmanDefinition, ZmanLabels, ZmanType};
pub use zmanim_table::{ShulZmanim, ZmanResult, ZmanimTable};
