use chrono::NaiveDate;
use luach::hebrew_date::{ADAR, CHESHVAN, NISSAN, TAMUZ, TISHREI};
use luach::{
    CalendarDay, DstPolicy, HebrewDate, Location, Settings, SolarEphemeris, TimeValue,
    ZmanDefinition, ZmanType, ZmanimError, ZmanimTable,
};

fn rules_only() -> Settings {
    Settings {
        dst_policy: DstPolicy::RulesOnly,
        ..Settings::default()
    }
}

fn dallas() -> Location {
    Location::new("Dallas, TX", false, 32.78, 96.8, -6.0)
}

#[test]
fn november_tenth_2023_is_erev_shabbos_26_cheshvan() {
    let hd = HebrewDate::parse_civil("November 10, 2023").unwrap();
    assert_eq!((hd.year(), hd.month(), hd.day()), (5784, CHESHVAN, 26));
    assert_eq!(hd.day_of_week(), 5);
    assert_eq!(hd.to_string(), "Erev Shabbos, the 26th of Cheshvan 5784");
}

#[test]
fn dallas_sun_and_candles() {
    let ephemeris = SolarEphemeris::with_policy(DstPolicy::RulesOnly, 100);
    let hd = HebrewDate::parse_civil("2023-11-10").unwrap();
    let sun = ephemeris.sun_times(&hd, &dallas(), true).unwrap();
    let line = format!(
        "In {} on {}, Sunrise is at {}, and Sunset is at {}",
        dallas().name,
        hd,
        sun.sunrise,
        sun.sunset
    );
    assert_eq!(
        line,
        "In Dallas, TX on Erev Shabbos, the 26th of Cheshvan 5784, \
         Sunrise is at 6:53:36 AM, and Sunset is at 5:28:59 PM"
    );
    let candles = ephemeris.candle_lighting_for(&hd, &dallas()).unwrap();
    assert_eq!(candles.to_string(), "5:10:59 PM");
}

#[test]
fn lakewood_purim_zmanim() {
    let lakewood = Location::new("Lakewood", false, 40.1, 74.23, -5.0);
    let purim = HebrewDate::from_ymd(5789, ADAR, 14).unwrap();
    let table = ZmanimTable::new(rules_only());
    let defs = [ZmanType::Alos72, ZmanType::ChatzosDay, ZmanType::ShkiaElevation]
        .map(ZmanDefinition::from);
    let zmanim = table
        .zman_times(&defs, purim.civil_date().unwrap(), &purim, &lakewood)
        .unwrap();
    let output: String = zmanim
        .iter()
        .map(|z| format!("{}: {}~", z.definition.labels().eng, z.time))
        .collect();
    assert_eq!(
        output,
        "Alos Hashachar - 72: 5:17:49 AM~Chatzos - Midday: 12:09:25 PM~Sunset: 5:49:02 PM~"
    );
}

#[test]
fn antarctic_midwinter_has_no_sunrise() {
    let south_pole_station = Location::new("Antarctica", false, -82.0, 0.0, 0.0);
    let day = HebrewDate::from_ymd(5785, TAMUZ, 1).unwrap();
    let ephemeris = SolarEphemeris::with_policy(DstPolicy::RulesOnly, 10);
    match ephemeris.sun_times(&day, &south_pole_station, true) {
        Err(ZmanimError::NoSunriseSunset { location, date }) => {
            assert_eq!(location, "Antarctica");
            assert_eq!(date, NaiveDate::from_ymd_opt(2025, 6, 27).unwrap());
        }
        other => panic!("expected polar failure, got {other:?}"),
    }
    // The table propagates the same failure.
    let table = ZmanimTable::new(rules_only());
    let civil = day.civil_date().unwrap();
    assert!(matches!(
        table.all_zmanim(civil, &day, &south_pole_station),
        Err(ZmanimError::NoSunriseSunset { .. })
    ));
}

#[test]
fn any_handed_in_location_is_accepted() {
    // A directory matching (31.75, -35.2) by distance hands back Jerusalem.
    let jerusalem = Location::new("Jerusalem", true, 31.778, -35.235, 2.0).with_elevation(754.0);
    let query = Location::new("query", true, 31.75, -35.2, 2.0);
    assert!(jerusalem.distance_km(&query) < 5.0);

    let ephemeris = SolarEphemeris::with_policy(DstPolicy::RulesOnly, 10);
    let day = NaiveDate::from_ymd_opt(2024, 6, 21).unwrap();
    let sun = ephemeris.sun_times(&day, &jerusalem, true).unwrap();
    assert_eq!(sun.sunrise, TimeValue::new(5, 29, 49));
    assert_eq!(sun.sunset, TimeValue::new(19, 52, 42));
}

#[test]
fn civil_round_trip_over_two_decades() {
    let end = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
    let mut day = NaiveDate::from_ymd_opt(2010, 1, 1).unwrap();
    while day < end {
        let hd = HebrewDate::from_civil_date(day).unwrap();
        assert_eq!(hd.civil_date().unwrap(), day);
        assert_eq!(hd.absolute_day(), CalendarDay::absolute_day(&day));
        let again = HebrewDate::from_ymd(hd.year(), hd.month(), hd.day()).unwrap();
        assert_eq!(again, hd);
        day = day.succ_opt().unwrap();
    }
}

#[test]
fn absolute_days_round_trip_from_year_one_to_6500() {
    let first = HebrewDate::from_ymd(1, TISHREI, 1).unwrap().absolute_day();
    let last = HebrewDate::from_ymd(6500, TISHREI, 1).unwrap().absolute_day();
    for abs in (first..=last).step_by(97) {
        let hd = HebrewDate::from_absolute_day(abs).unwrap();
        let days = HebrewDate::days_in_month(hd.year(), hd.month());
        assert!((1..=days).contains(&hd.day()), "{abs}: {hd:?}");
        assert_eq!(hd.absolute_day(), abs);
        assert_eq!(HebrewDate::from_ymd(hd.year(), hd.month(), hd.day()).unwrap(), hd);
        let civil = hd.civil_date().unwrap();
        assert_eq!(HebrewDate::from_civil_date(civil).unwrap(), hd);
    }
}

#[test]
fn hebrew_date_at_dallas_follows_sunset() {
    let ephemeris = SolarEphemeris::with_policy(DstPolicy::RulesOnly, 10);
    let friday = NaiveDate::from_ymd_opt(2023, 11, 10).unwrap();
    let afternoon = ephemeris
        .hebrew_date_at(friday.and_hms_opt(16, 0, 0).unwrap(), &dallas())
        .unwrap();
    let evening = ephemeris
        .hebrew_date_at(friday.and_hms_opt(21, 0, 0).unwrap(), &dallas())
        .unwrap();
    assert_eq!(afternoon.to_string(), "Erev Shabbos, the 26th of Cheshvan 5784");
    assert_eq!(evening.to_string(), "Shabbos Kodesh, the 27th of Cheshvan 5784");
}

#[test]
fn noon_lies_between_sunrise_and_sunset_all_year() {
    let ephemeris = SolarEphemeris::with_policy(DstPolicy::RulesOnly, 400);
    let mut day = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    for _ in 0..366 {
        let sun = ephemeris.sun_times(&day, &dallas(), false).unwrap();
        let noon = sun.chatzos();
        assert!(noon.is_after(&sun.sunrise) && sun.sunset.is_after(&noon), "{day}");
        day = day.succ_opt().unwrap();
    }
}

#[test]
fn display_view_rolls_over_after_sunset() {
    let table = ZmanimTable::new(rules_only());
    let day = NaiveDate::from_ymd_opt(2023, 11, 10).unwrap();
    let hd = HebrewDate::from_civil_date(day).unwrap();
    let shown = table
        .corrected_zman_times(day, &hd, TimeValue::new(21, 0, 0), &dallas())
        .unwrap();
    assert!(shown.iter().all(|z| z.is_tomorrow));
    assert!(shown.iter().all(|z| z.zman_type() != ZmanType::CandleLighting));
    let times: Vec<i64> = shown.iter().map(|z| z.time.total_seconds()).collect();
    let mut sorted = times.clone();
    sorted.sort_unstable();
    assert_eq!(times, sorted);
}

#[test]
fn erev_pesach_lists_chometz_times_until_sunrise() {
    let table = ZmanimTable::new(rules_only());
    let lakewood = Location::new("Lakewood", false, 40.1, 74.23, -5.0);
    let erev = HebrewDate::from_ymd(5784, NISSAN, 14).unwrap();
    let civil = erev.civil_date().unwrap();
    let dawn = table
        .corrected_zman_times(civil, &erev, TimeValue::new(5, 0, 0), &lakewood)
        .unwrap();
    let eating = dawn
        .iter()
        .find(|z| z.zman_type() == ZmanType::SofZmanEatingChometz)
        .unwrap();
    assert_eq!(eating.time.to_string(), "10:09:08 AM");
    assert!(!eating.is_tomorrow);

    let midday = table
        .corrected_zman_times(civil, &erev, TimeValue::new(12, 0, 0), &lakewood)
        .unwrap();
    assert!(midday.iter().all(|z| !matches!(
        z.zman_type(),
        ZmanType::SofZmanEatingChometz | ZmanType::SofZmanBurnChometz
    )));
}

#[cfg(feature = "serde")]
#[test]
fn serde_values_use_readable_forms() {
    let hd = HebrewDate::from_ymd(5784, CHESHVAN, 26).unwrap();
    let json = serde_json::to_string(&hd).unwrap();
    assert_eq!(json, r#"{"year":5784,"month":8,"day":26}"#);
    let back: HebrewDate = serde_json::from_str(&json).unwrap();
    assert_eq!(back, hd);
    assert!(serde_json::from_str::<HebrewDate>(r#"{"year":5784,"month":14,"day":1}"#).is_err());

    let settings = Settings::from_toml_str("dst_policy = \"rules_only\"").unwrap();
    assert_eq!(settings.dst_policy, DstPolicy::RulesOnly);
    let table = ZmanimTable::new(settings);
    let day = NaiveDate::from_ymd_opt(2023, 11, 10).unwrap();
    let zmanim = table.all_zmanim(day, &hd, &dallas()).unwrap();
    let json = serde_json::to_string(&zmanim[0]).unwrap();
    assert_eq!(
        json,
        r#"{"definition":{"id":0},"time":"0:11:17","is_tomorrow":false}"#
    );
}
