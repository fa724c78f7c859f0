// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # Daily Zmanim Table
//!
//! Turns a list of [`ZmanDefinition`]s into concrete clock times for one day
//! at one location.
//!
//! Every formula starts from a small per-day *basis*: sunrise and sunset at
//! elevation and at sea level, sea-level sunrise less 90 minutes, solar noon,
//! and the GRA and MGA proportional hours (in minutes).  The basis is cached,
//! so listing twenty zmanim costs two solar solutions.
//!
//! | Zman | Formula (minutes) |
//! |------|-------------------|
//! | Chatzos Layla | noon + 720 |
//! | Alos 90 / 72, Talis | sea-level sunrise − 90 / 72 / 36 |
//! | Krias Shma, Tefilla (MGA) | sea-level sunrise − 90 + ⌊3 / 4 · MGA⌋ |
//! | Krias Shma, Tefilla (GRA) | sea-level sunrise + ⌊3 / 4 · GRA⌋ |
//! | Mincha Gedola | noon + ½ GRA |
//! | Mincha Ketana, Plag | sea-level sunrise + 9½ / 10¾ GRA |
//! | Tzais 45 / 50 / 72 | sunset + 45 / 50 / 72 |
//! | Rabbeinu Tam zmanios | sunset + 1.2 GRA (or MGA) |
//! | Candle lighting | sunset − location lead, candle-lighting days only |
//! | Chometz eating / burning | sunrise − 90 + 4 / 5 MGA, Erev Pesach mornings only |
//!
//! The MGA hour here always uses the 90-minute day.
//!
//! [`ZmanimTable::corrected_zman_times`] is the display view: a zman that
//! passed more than the grace period ago is replaced by tomorrow's.

use crate::cache::BoundedCache;
use crate::ephemeris::{candle_lighting, DayKey, SolarEphemeris, SunTimes, MGA_MINUTES_ISRAEL};
use crate::error::{Result, ZmanimError};
use crate::hebrew_date::{CalendarDay, HebrewDate, NISSAN};
use crate::location::Location;
use crate::settings::Settings;
use crate::time_value::TimeValue;
use crate::zman::{WhichDays, ZmanDefinition, ZmanType};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use qtty::Seconds;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Minutes from sea-level sunrise back to the MGA dawn.
const ALOS_MINUTES: f64 = 90.0;
const MINUTES_PER_HALF_DAY: f64 = 720.0;

// ═══════════════════════════════════════════════════════════════════════════
// Results
// ═══════════════════════════════════════════════════════════════════════════

/// A computed zman.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ZmanResult {
    pub definition: ZmanDefinition,
    pub time: TimeValue,
    /// Taken from the following day by the already-passed view.
    pub is_tomorrow: bool,
}

impl ZmanResult {
    #[inline]
    pub fn zman_type(&self) -> ZmanType {
        self.definition.zman_type
    }
}

/// The handful of times the shul announcements need.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ShulZmanim {
    pub chatzos_hayom: TimeValue,
    pub chatzos_halayla: TimeValue,
    pub alos: TimeValue,
    pub shkia: TimeValue,
}

/// Per-day values every formula draws on.
#[derive(Debug, Copy, Clone, PartialEq)]
struct DayBasis {
    sunrise: TimeValue,
    sunset: TimeValue,
    sunrise_mishor: TimeValue,
    sunset_mishor: TimeValue,
    mishor_neg90: TimeValue,
    chatzos: TimeValue,
    /// GRA proportional hour, minutes.
    shaa_zmanis: f64,
    /// MGA proportional hour over the 90-minute day, minutes.
    shaa_zmanis_mga: f64,
}

impl DayBasis {
    fn new(elevated: SunTimes, mishor: SunTimes) -> Self {
        Self {
            sunrise: elevated.sunrise,
            sunset: elevated.sunset,
            sunrise_mishor: mishor.sunrise,
            sunset_mishor: mishor.sunset,
            mishor_neg90: mishor.sunrise.add_minutes(-ALOS_MINUTES),
            chatzos: mishor.chatzos(),
            shaa_zmanis: minutes(mishor.shaa_zmanis(0.0)),
            shaa_zmanis_mga: minutes(mishor.shaa_zmanis(MGA_MINUTES_ISRAEL)),
        }
    }
}

#[inline]
fn minutes(duration: Seconds) -> f64 {
    duration.value() / 60.0
}

// ═══════════════════════════════════════════════════════════════════════════
// ZmanimTable
// ═══════════════════════════════════════════════════════════════════════════

/// Zman calculator configured by [`Settings`].
///
/// Owns a [`SolarEphemeris`] and a cache of per-day bases; both are
/// `Mutex`-guarded so the table can be shared across threads.
#[derive(Debug)]
pub struct ZmanimTable {
    settings: Settings,
    ephemeris: SolarEphemeris,
    basis: Mutex<BoundedCache<DayKey, DayBasis>>,
}

impl Default for ZmanimTable {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl ZmanimTable {
    pub fn new(settings: Settings) -> Self {
        Self {
            ephemeris: SolarEphemeris::from_settings(&settings),
            basis: Mutex::new(BoundedCache::new("zman-basis", settings.cache_capacity)),
            settings,
        }
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline]
    pub fn ephemeris(&self) -> &SolarEphemeris {
        &self.ephemeris
    }

    // ── per-day lists ─────────────────────────────────────────────────

    /// Times for `definitions` on `date`, in definition order.
    ///
    /// `hebrew` must be the Hebrew date of `date`.  Candle lighting and the
    /// chometz zmanim are left out on days they do not apply.  The chometz
    /// guard treats the request as made at midnight.
    pub fn zman_times(
        &self,
        definitions: &[ZmanDefinition],
        date: NaiveDate,
        hebrew: &HebrewDate,
        location: &Location,
    ) -> Result<Vec<ZmanResult>> {
        self.compute(definitions, date, TimeValue::MIDNIGHT, hebrew, location)
    }

    /// Like [`zman_times`](Self::zman_times), with the time of day of
    /// `date_time` feeding the chometz guard: those zmanim are only listed
    /// at or before sunrise.
    pub fn zman_times_at(
        &self,
        definitions: &[ZmanDefinition],
        date_time: NaiveDateTime,
        hebrew: &HebrewDate,
        location: &Location,
    ) -> Result<Vec<ZmanResult>> {
        let now = TimeValue::from_naive_time(date_time.time());
        self.compute(definitions, date_time.date(), now, hebrew, location)
    }

    /// Every zman in the catalog that applies on `date`.
    pub fn all_zmanim(
        &self,
        date: NaiveDate,
        hebrew: &HebrewDate,
        location: &Location,
    ) -> Result<Vec<ZmanResult>> {
        let catalog: Vec<ZmanDefinition> =
            ZmanType::ALL.iter().copied().map(ZmanDefinition::from).collect();
        self.zman_times(&catalog, date, hebrew, location)
    }

    /// Noon, midnight, dawn (90 minutes) and sunset for `date`.
    pub fn basic_shul_zmanim(&self, date: NaiveDate, location: &Location) -> Result<ShulZmanim> {
        let basis = self.basis(date, location)?;
        Ok(ShulZmanim {
            chatzos_hayom: basis.chatzos,
            chatzos_halayla: basis.chatzos.add_minutes(MINUTES_PER_HALF_DAY),
            alos: basis.mishor_neg90,
            shkia: basis.sunset,
        })
    }

    // ── display view ──────────────────────────────────────────────────

    /// The settings list as shown at `now` on `date`.
    ///
    /// A zman that lies before `now` by at least
    /// [`Settings::minutes_to_show_passed_zman`] whole minutes is replaced by
    /// the same definition's time tomorrow, marked `is_tomorrow`.  Candle
    /// lighting and the chometz zmanim are dropped once sunset has passed,
    /// and candle lighting is never taken from tomorrow.  The result lists
    /// today's entries first, each group by time of day.
    pub fn corrected_zman_times(
        &self,
        date: NaiveDate,
        hebrew: &HebrewDate,
        now: TimeValue,
        location: &Location,
    ) -> Result<Vec<ZmanResult>> {
        let definitions = &self.settings.zmanim_to_show;
        let sunset = self.basis(date, location)?.sunset;
        let after_sunset = !sunset.is_after(&now);

        let today_defs: Vec<ZmanDefinition> = definitions
            .iter()
            .cloned()
            .filter(|d| !(after_sunset && d.zman_type.is_conditional()))
            .collect();
        let tomorrow_defs: Vec<ZmanDefinition> = definitions
            .iter()
            .cloned()
            .filter(|d| d.zman_type != ZmanType::CandleLighting)
            .collect();

        let tomorrow_date = date
            .succ_opt()
            .ok_or(ZmanimError::CivilDateOutOfRange(date.absolute_day() + 1))?;
        let tomorrow_hebrew = hebrew.add_days(1)?;

        let today = self.compute(&today_defs, date, now, hebrew, location)?;
        let tomorrow = self.zman_times(&tomorrow_defs, tomorrow_date, &tomorrow_hebrew, location)?;

        let grace = i64::from(self.settings.minutes_to_show_passed_zman);
        let mut corrected: Vec<ZmanResult> = today
            .into_iter()
            .map(|zman| {
                let diff = TimeValue::diff(now, zman.time, true);
                if diff.is_negative() && diff.duration.total_minutes() >= grace {
                    let replacement = tomorrow.iter().find(|t| t.definition == zman.definition);
                    if let Some(t) = replacement {
                        return ZmanResult {
                            is_tomorrow: true,
                            ..t.clone()
                        };
                    }
                }
                zman
            })
            .collect();

        corrected.sort_by_key(|z| (z.is_tomorrow, z.time.total_seconds()));
        Ok(corrected)
    }

    // ── internals ─────────────────────────────────────────────────────

    fn compute(
        &self,
        definitions: &[ZmanDefinition],
        date: NaiveDate,
        now: TimeValue,
        hebrew: &HebrewDate,
        location: &Location,
    ) -> Result<Vec<ZmanResult>> {
        let basis = self.basis(date, location)?;
        let day = which_day(date, hebrew, location);
        let mut results = Vec::with_capacity(definitions.len());
        for definition in definitions {
            let offset = f64::from(definition.offset_for(day));
            if let Some(time) = zman_time(definition.zman_type, &basis, offset, now, hebrew, location) {
                results.push(ZmanResult {
                    definition: definition.clone(),
                    time,
                    is_tomorrow: false,
                });
            }
        }
        Ok(results)
    }

    fn basis(&self, date: NaiveDate, location: &Location) -> Result<DayBasis> {
        let key = DayKey::new(date.absolute_day(), location, true);
        self.lock_basis().get_or_try_insert_with(key, || {
            let elevated = self.ephemeris.sun_times(&date, location, true)?;
            let mishor = self.ephemeris.sun_times_mishor(&date, location)?;
            Ok(DayBasis::new(elevated, mishor))
        })
    }

    /// Number of cached day bases.
    pub fn cached_days(&self) -> usize {
        self.lock_basis().len()
    }

    /// Empty both the basis cache and the ephemeris cache.
    pub fn clear_cache(&self) {
        self.lock_basis().clear();
        self.ephemeris.clear_cache();
    }

    fn lock_basis(&self) -> MutexGuard<'_, BoundedCache<DayKey, DayBasis>> {
        self.basis.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Day flag used to match offset masks: Yom Tov wins over the weekday.
fn which_day(date: NaiveDate, hebrew: &HebrewDate, location: &Location) -> WhichDays {
    if hebrew.is_yom_tov(location.israel) {
        WhichDays::YOMTOV
    } else {
        WhichDays::from_weekday(date.weekday())
    }
}

/// Morning of Erev Pesach, or Friday the 13th of Nissan when Erev Pesach is
/// Shabbos and the chometz is burnt a day early.
fn is_chometz_morning(hebrew: &HebrewDate, burning: bool) -> bool {
    hebrew.month() == NISSAN
        && (hebrew.day() == 14 || (burning && hebrew.day() == 13 && hebrew.weekday() == Weekday::Fri))
}

/// One formula.  `None` when the zman does not apply.
fn zman_time(
    zman: ZmanType,
    b: &DayBasis,
    offset: f64,
    now: TimeValue,
    hebrew: &HebrewDate,
    location: &Location,
) -> Option<TimeValue> {
    use ZmanType::*;

    let gra = b.shaa_zmanis;
    let mga = b.shaa_zmanis_mga;
    let time = match zman {
        ChatzosLayla => b.chatzos.add_minutes(MINUTES_PER_HALF_DAY + offset),
        Alos90 => b.mishor_neg90.add_minutes(offset),
        Alos72 => b.sunrise_mishor.add_minutes(-72.0 + offset),
        TalisTefillin => b.sunrise_mishor.add_minutes(-36.0 + offset),
        NetzAtElevation => b.sunrise.add_minutes(offset),
        NetzMishor => b.sunrise_mishor.add_minutes(offset),
        SzksMga => b.mishor_neg90.add_minutes((mga * 3.0).floor() + offset),
        SzksGra => b.sunrise_mishor.add_minutes((gra * 3.0).floor() + offset),
        SztMga => b.mishor_neg90.add_minutes((mga * 4.0).floor() + offset),
        SztGra => b.sunrise_mishor.add_minutes((gra * 4.0).floor() + offset),
        ChatzosDay => b.chatzos.add_minutes(offset),
        MinchaGedola => b.chatzos.add_minutes(gra * 0.5 + offset),
        MinchaKetana => b.sunrise_mishor.add_minutes(gra * 9.5 + offset),
        PlagHamincha => b.sunrise_mishor.add_minutes(gra * 10.75 + offset),
        ShkiaAtSeaLevel => b.sunset_mishor.add_minutes(offset),
        ShkiaElevation => b.sunset.add_minutes(offset),
        Tzais45 => b.sunset.add_minutes(45.0 + offset),
        Tzais50 => b.sunset.add_minutes(50.0 + offset),
        Tzais72 => b.sunset.add_minutes(72.0 + offset),
        RabbeinuTamZmanios => b.sunset.add_minutes(gra * 1.2 + offset),
        RabbeinuTamZmaniosMga => b.sunset.add_minutes(mga * 1.2 + offset),
        CandleLighting => {
            if !hebrew.has_candle_lighting() {
                return None;
            }
            candle_lighting(b.sunset, location).add_minutes(offset)
        }
        SofZmanEatingChometz | SofZmanBurnChometz => {
            let burning = zman == SofZmanBurnChometz;
            // Listed only until sunrise: `now` at or before it, never after.
            if !is_chometz_morning(hebrew, burning) || !b.sunrise.is_after(&now) {
                return None;
            }
            let hours = if burning { 5.0 } else { 4.0 };
            b.sunrise.add_minutes(-ALOS_MINUTES + offset + mga * hours)
        }
    };
    Some(time)
}

// ═══════════════════════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dst::DstPolicy;

    fn table() -> ZmanimTable {
        ZmanimTable::new(Settings {
            dst_policy: DstPolicy::RulesOnly,
            ..Settings::default()
        })
    }

    fn dallas() -> Location {
        Location::new("Dallas", false, 32.78, 96.8, -6.0)
    }

    fn lakewood() -> Location {
        Location::new("Lakewood", false, 40.1, 74.23, -5.0)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hebrew(d: NaiveDate) -> HebrewDate {
        HebrewDate::from_civil_date(d).unwrap()
    }

    fn t(h: i32, m: i32, s: i32) -> TimeValue {
        TimeValue::new(h, m, s)
    }

    fn time_of(results: &[ZmanResult], zman: ZmanType) -> Option<TimeValue> {
        results.iter().find(|r| r.zman_type() == zman).map(|r| r.time)
    }

    #[test]
    fn dallas_friday_catalog() {
        let day = date(2023, 11, 10);
        let all = table().all_zmanim(day, &hebrew(day), &dallas()).unwrap();
        // Every type but the two chometz zmanim.
        assert_eq!(all.len(), 22);
        assert_eq!(time_of(&all, ZmanType::ChatzosLayla), Some(t(0, 11, 17)));
        assert_eq!(time_of(&all, ZmanType::Alos90), Some(t(5, 23, 36)));
        assert_eq!(time_of(&all, ZmanType::Alos72), Some(t(5, 41, 36)));
        assert_eq!(time_of(&all, ZmanType::TalisTefillin), Some(t(6, 17, 36)));
        assert_eq!(time_of(&all, ZmanType::SzksMga), Some(t(8, 46, 36)));
        assert_eq!(time_of(&all, ZmanType::SzksGra), Some(t(9, 31, 36)));
        assert_eq!(time_of(&all, ZmanType::SztMga), Some(t(9, 54, 36)));
        assert_eq!(time_of(&all, ZmanType::SztGra), Some(t(10, 24, 36)));
        assert_eq!(time_of(&all, ZmanType::ChatzosDay), Some(t(12, 11, 17)));
        assert_eq!(time_of(&all, ZmanType::PlagHamincha), Some(t(16, 22, 48)));
        assert_eq!(time_of(&all, ZmanType::ShkiaElevation), Some(t(17, 28, 59)));
        assert_eq!(time_of(&all, ZmanType::Tzais72), Some(t(18, 40, 59)));
        assert_eq!(time_of(&all, ZmanType::CandleLighting), Some(t(17, 10, 59)));
        assert_eq!(time_of(&all, ZmanType::SofZmanEatingChometz), None);
    }

    #[test]
    fn results_follow_definition_order() {
        let day = date(2029, 3, 1);
        let defs = [ZmanType::ShkiaElevation, ZmanType::Alos72, ZmanType::ChatzosDay]
            .map(ZmanDefinition::from);
        let results = table().zman_times(&defs, day, &hebrew(day), &lakewood()).unwrap();
        let times: Vec<TimeValue> = results.iter().map(|r| r.time).collect();
        assert_eq!(times, vec![t(17, 49, 2), t(5, 17, 49), t(12, 9, 25)]);
        assert!(results.iter().all(|r| !r.is_tomorrow));
    }

    #[test]
    fn offsets_follow_day_mask() {
        let tbl = table();
        let yom_tov_only = ZmanDefinition::new(ZmanType::Tzais50)
            .with_offset(10)
            .on_days(WhichDays::YOMTOV);
        let plain = ZmanDefinition::new(ZmanType::Tzais50);
        let defs = [yom_tov_only, plain];

        // 15 Nissan 5784, first day of Pesach.
        let pesach = date(2024, 4, 23);
        let r = tbl.zman_times(&defs, pesach, &hebrew(pesach), &lakewood()).unwrap();
        assert_eq!(r[0].time - r[1].time, Seconds::new(600.0));

        // Erev Pesach is a weekday.
        let erev = date(2024, 4, 22);
        let r = tbl.zman_times(&defs, erev, &hebrew(erev), &lakewood()).unwrap();
        assert_eq!(r[0].time, r[1].time);
    }

    #[test]
    fn chometz_zmanim_on_erev_pesach() {
        let tbl = table();
        let erev = date(2024, 4, 22);
        let hd = hebrew(erev);
        assert_eq!((hd.month(), hd.day()), (NISSAN, 14));

        let all = tbl.all_zmanim(erev, &hd, &lakewood()).unwrap();
        assert_eq!(all.len(), 24);
        assert_eq!(time_of(&all, ZmanType::SofZmanEatingChometz), Some(t(10, 9, 8)));
        assert_eq!(time_of(&all, ZmanType::SofZmanBurnChometz), Some(t(11, 32, 13)));

        // Asked after sunrise, they are gone.
        let defs = [ZmanType::SofZmanEatingChometz, ZmanType::SofZmanBurnChometz]
            .map(ZmanDefinition::from);
        let late = erev.and_hms_opt(7, 0, 0).unwrap();
        assert!(tbl.zman_times_at(&defs, late, &hd, &lakewood()).unwrap().is_empty());
        let early = erev.and_hms_opt(5, 0, 0).unwrap();
        assert_eq!(tbl.zman_times_at(&defs, early, &hd, &lakewood()).unwrap().len(), 2);
    }

    #[test]
    fn burning_moves_to_friday_when_erev_pesach_is_shabbos() {
        // 13 Nissan 5785 is Friday 11 April 2025.
        let friday = date(2025, 4, 11);
        let hd = hebrew(friday);
        assert_eq!((hd.month(), hd.day()), (NISSAN, 13));
        let defs = [ZmanType::SofZmanEatingChometz, ZmanType::SofZmanBurnChometz]
            .map(ZmanDefinition::from);
        let r = table().zman_times(&defs, friday, &hd, &lakewood()).unwrap();
        assert_eq!(r.len(), 1);
        assert_eq!(r[0].zman_type(), ZmanType::SofZmanBurnChometz);
    }

    #[test]
    fn shul_zmanim() {
        let shul = table().basic_shul_zmanim(date(2023, 11, 10), &dallas()).unwrap();
        assert_eq!(
            shul,
            ShulZmanim {
                chatzos_hayom: t(12, 11, 17),
                chatzos_halayla: t(0, 11, 17),
                alos: t(5, 23, 36),
                shkia: t(17, 28, 59),
            }
        );
    }

    #[test]
    fn corrected_view_before_sunset() {
        let day = date(2023, 11, 10);
        let now = t(16, 0, 0);
        let r = table().corrected_zman_times(day, &hebrew(day), now, &dallas()).unwrap();
        let ids: Vec<(u8, bool)> = r.iter().map(|z| (z.zman_type().id(), z.is_tomorrow)).collect();
        assert_eq!(
            ids,
            vec![
                (13, false),
                (21, false),
                (15, false),
                (17, false),
                (18, false),
                (0, true),
                (2, true),
                (3, true),
                (5, true),
                (6, true),
                (7, true),
                (8, true),
                (9, true),
                (10, true),
                (11, true),
                (12, true),
            ]
        );
        assert_eq!(time_of(&r, ZmanType::CandleLighting), Some(t(17, 10, 59)));
        assert_eq!(time_of(&r, ZmanType::MinchaKetana), Some(t(15, 16, 17)));
    }

    #[test]
    fn corrected_view_after_sunset() {
        let day = date(2023, 11, 10);
        let now = t(18, 30, 0);
        let r = table().corrected_zman_times(day, &hebrew(day), now, &dallas()).unwrap();
        assert_eq!(r.len(), 15);
        // Passed by 11 minutes: still today's.
        assert_eq!(r[0].zman_type(), ZmanType::Tzais50);
        assert!(!r[0].is_tomorrow);
        assert_eq!(r[1].zman_type(), ZmanType::Tzais72);
        assert!(!r[1].is_tomorrow);
        assert!(r[2..].iter().all(|z| z.is_tomorrow));
        assert!(r.iter().all(|z| !z.zman_type().is_conditional()));
        assert_eq!(time_of(&r, ZmanType::ShkiaElevation), Some(t(17, 28, 20)));
        assert_eq!(time_of(&r, ZmanType::ChatzosLayla), Some(t(0, 11, 25)));
    }

    #[test]
    fn grace_period_keeps_recent_zman() {
        let day = date(2023, 11, 10);
        // Mincha Ketana at 15:16:37 passed 13 minutes ago.
        let r = table()
            .corrected_zman_times(day, &hebrew(day), t(15, 30, 0), &dallas())
            .unwrap();
        let ketana = r.iter().find(|z| z.zman_type() == ZmanType::MinchaKetana).unwrap();
        assert!(!ketana.is_tomorrow);
        assert_eq!(ketana.time, t(15, 16, 37));
    }

    #[test]
    fn polar_location_fails() {
        let south = Location::new("Antarctica", false, -82.0, 0.0, 0.0);
        let day = date(2025, 6, 27);
        let err = table().all_zmanim(day, &hebrew(day), &south).unwrap_err();
        assert!(matches!(err, ZmanimError::NoSunriseSunset { .. }));
    }

    #[test]
    fn basis_is_cached_per_day() {
        let tbl = table();
        let day = date(2023, 11, 10);
        let hd = hebrew(day);
        tbl.all_zmanim(day, &hd, &dallas()).unwrap();
        tbl.all_zmanim(day, &hd, &dallas()).unwrap();
        assert_eq!(tbl.cached_days(), 1);
        assert_eq!(tbl.ephemeris().cached_entries(), 2);
        tbl.clear_cache();
        assert_eq!(tbl.cached_days(), 0);
        assert_eq!(tbl.ephemeris().cached_entries(), 0);
    }
}
