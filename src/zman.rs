// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Zman catalog.
//!
//! Every halachic time the table knows how to compute is a [`ZmanType`] with
//! a stable numeric id (`0..=23`) and three labels.  A [`ZmanDefinition`] is
//! one entry of a caller's display list: a type and an optional minute
//! offset, which an optional [`WhichDays`] mask can restrict to some days.
//! A definition may also carry its own [`CustomLabels`].
//!
//! ```rust
//! use luach::{WhichDays, ZmanDefinition, ZmanType};
//!
//! let shkia = ZmanDefinition::new(ZmanType::ShkiaElevation)
//!     .with_offset(-2)
//!     .on_days(WhichDays::FRIDAY | WhichDays::YOMTOV);
//! assert_eq!(shkia.zman_type.id(), 15);
//! assert_eq!(shkia.labels().eng, "Sunset");
//! ```

use bitflags::bitflags;
use chrono::Weekday;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ═══════════════════════════════════════════════════════════════════════════
// ZmanType
// ═══════════════════════════════════════════════════════════════════════════

/// A computable halachic time, identified by its catalog id.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
#[repr(u8)]
pub enum ZmanType {
    /// Midnight: solar noon plus twelve hours.
    ChatzosLayla = 0,
    /// 90 minutes before sea-level sunrise.
    Alos90 = 1,
    /// 72 minutes before sea-level sunrise.
    Alos72 = 2,
    /// 36 minutes before sea-level sunrise.
    TalisTefillin = 3,
    NetzAtElevation = 4,
    NetzMishor = 5,
    /// Latest Krias Shma, Magen Avraham.
    SzksMga = 6,
    /// Latest Krias Shma, GRA.
    SzksGra = 7,
    /// Latest Shacharis, Magen Avraham.
    SztMga = 8,
    /// Latest Shacharis, GRA.
    SztGra = 9,
    ChatzosDay = 10,
    MinchaGedola = 11,
    MinchaKetana = 12,
    PlagHamincha = 13,
    ShkiaAtSeaLevel = 14,
    ShkiaElevation = 15,
    Tzais45 = 16,
    Tzais50 = 17,
    Tzais72 = 18,
    /// 1.2 proportional GRA hours after sunset.
    RabbeinuTamZmanios = 19,
    /// 1.2 proportional MGA hours after sunset.
    RabbeinuTamZmaniosMga = 20,
    CandleLighting = 21,
    SofZmanEatingChometz = 22,
    SofZmanBurnChometz = 23,
}

/// Display labels of a zman.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ZmanLabels<'a> {
    /// Long Hebrew description.
    pub desc: &'a str,
    pub eng: &'a str,
    pub heb: &'a str,
}

#[rustfmt::skip]
const LABELS: [ZmanLabels<'static>; 24] = [
    ZmanLabels { desc: "חצות הלילה", eng: "Chatzos - Midnight", heb: "חצות הלילה" },
    ZmanLabels { desc: "עלות השחר - 90 דקות", eng: "Alos Hashachar - 90", heb: "עלות השחר (90)" },
    ZmanLabels { desc: "עלות השחר - 72 דקות", eng: "Alos Hashachar - 72", heb: "עלות השחר (72)" },
    ZmanLabels { desc: "זמן עטיפת טלית ותפילין - 36 דקות", eng: "Taliss and Tefillin", heb: "טלית ותפילין" },
    ZmanLabels { desc: "הנץ החמה בגובה המיקום", eng: "Sunrise at current elevation", heb: "הנץ החמה - מגובה" },
    ZmanLabels { desc: "הנץ החמה בגובה פני הים", eng: "Sunrise", heb: "הנץ החמה" },
    ZmanLabels { desc: "סזק\"ש מג\"א", eng: "Zman Krias Shma - MG\"A", heb: "סזק\"ש מג\"א" },
    ZmanLabels { desc: "סזק\"ש הגר\"א", eng: "Zman Krias Shma - GR\"A", heb: "סזק\"ש הגר\"א" },
    ZmanLabels { desc: "סז\"ת מג\"א", eng: "Zman Tefilla - MG\"A", heb: "סז\"ת מג\"א" },
    ZmanLabels { desc: "סז\"ת הגר\"א", eng: "Zman Tefilla - GR\"A", heb: "סז\"ת הגר\"א" },
    ZmanLabels { desc: "חצות היום", eng: "Chatzos - Midday", heb: "חצות היום" },
    ZmanLabels { desc: "מנחה גדולה", eng: "Mincha Gedola", heb: "מנחה גדולה" },
    ZmanLabels { desc: "מנחה קטנה", eng: "Mincha Ketana", heb: "מנחה קטנה" },
    ZmanLabels { desc: "פלג המנחה", eng: "Plag HaMincha", heb: "פלג המנחה" },
    ZmanLabels { desc: "שקיעת החמה מגובה פני הים", eng: "Sunset at sea level", heb: "שקיעת החמה - ממישור" },
    ZmanLabels { desc: "שקיעת החמה מגובה המיקום", eng: "Sunset", heb: "שקיעת החמה" },
    ZmanLabels { desc: "45 דקות אחרי שקיעה", eng: "Nightfall - 45", heb: "צאת הכוכבים (45)" },
    ZmanLabels { desc: "50 דקות אחרי שקיעה", eng: "Nightfall - 50", heb: "צאת הכוכבים (50)" },
    ZmanLabels { desc: "72 דקות אחרי שקיעה", eng: "Rabbeinu Tam", heb: "צה\"כ ר\"ת - 72 דקות" },
    ZmanLabels { desc: "72 דקות זמניות אחרי שקיעה", eng: "Rabbeinu Tam - Zmanios", heb: "צה\"כ ר\"ת - זמניות" },
    ZmanLabels { desc: "72 דקות זמניות אחרי שקיעה - מג\"א", eng: "Rabbeinu Tam - Zmanios MG\"A", heb: "צה\"כ ר\"ת - זמניות מג\"א" },
    ZmanLabels { desc: "זמן הדלקת נרות", eng: "Candle lighting time", heb: "זמן הדלקת נרות" },
    ZmanLabels { desc: "סוף זמן אכילת חמץ", eng: "Stop eating Chometz", heb: "סוף זמן אכילת חמץ" },
    ZmanLabels { desc: "סוף זמן ביעור חמץ", eng: "Destroy Chometz", heb: "סוף זמן ביעור חמץ" },
];

impl ZmanType {
    /// The whole catalog, in id order.
    #[rustfmt::skip]
    pub const ALL: [ZmanType; 24] = [
        Self::ChatzosLayla, Self::Alos90, Self::Alos72, Self::TalisTefillin,
        Self::NetzAtElevation, Self::NetzMishor, Self::SzksMga, Self::SzksGra,
        Self::SztMga, Self::SztGra, Self::ChatzosDay, Self::MinchaGedola,
        Self::MinchaKetana, Self::PlagHamincha, Self::ShkiaAtSeaLevel, Self::ShkiaElevation,
        Self::Tzais45, Self::Tzais50, Self::Tzais72, Self::RabbeinuTamZmanios,
        Self::RabbeinuTamZmaniosMga, Self::CandleLighting, Self::SofZmanEatingChometz,
        Self::SofZmanBurnChometz,
    ];

    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    #[inline]
    pub fn labels(self) -> ZmanLabels<'static> {
        LABELS[self as usize]
    }

    /// Only produced on some days, and dropped from the already-passed view
    /// after sunset.
    #[inline]
    pub fn is_conditional(self) -> bool {
        matches!(
            self,
            Self::CandleLighting | Self::SofZmanEatingChometz | Self::SofZmanBurnChometz
        )
    }
}

impl fmt::Display for ZmanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.labels().eng)
    }
}

impl From<ZmanType> for u8 {
    fn from(zman: ZmanType) -> u8 {
        zman.id()
    }
}

impl TryFrom<u8> for ZmanType {
    type Error = String;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        Self::from_id(id).ok_or_else(|| format!("unknown zman id {id}"))
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// WhichDays
// ═══════════════════════════════════════════════════════════════════════════

bitflags! {
    /// Days on which a definition's offset applies.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
    pub struct WhichDays: u8 {
        const SUNDAY = 1 << 0;
        const MONDAY = 1 << 1;
        const TUESDAY = 1 << 2;
        const WEDNESDAY = 1 << 3;
        const THURSDAY = 1 << 4;
        const FRIDAY = 1 << 5;
        const SHABBOS = 1 << 6;
        /// Any Yom Tov, whatever the weekday.
        const YOMTOV = 1 << 7;
    }
}

impl WhichDays {
    /// Flag of a single weekday.
    pub fn from_weekday(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Sun => Self::SUNDAY,
            Weekday::Mon => Self::MONDAY,
            Weekday::Tue => Self::TUESDAY,
            Weekday::Wed => Self::WEDNESDAY,
            Weekday::Thu => Self::THURSDAY,
            Weekday::Fri => Self::FRIDAY,
            Weekday::Sat => Self::SHABBOS,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ZmanDefinition
// ═══════════════════════════════════════════════════════════════════════════

/// Labels a caller gives one definition in place of the catalog's.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CustomLabels {
    pub desc: String,
    pub eng: String,
    pub heb: String,
}

impl CustomLabels {
    pub fn new(desc: impl Into<String>, eng: impl Into<String>, heb: impl Into<String>) -> Self {
        Self {
            desc: desc.into(),
            eng: eng.into(),
            heb: heb.into(),
        }
    }
}

/// One entry of a display list.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ZmanDefinition {
    #[cfg_attr(feature = "serde", serde(rename = "id"))]
    pub zman_type: ZmanType,
    /// Minutes added to the computed time.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub offset_minutes: Option<i32>,
    /// Restrict the offset to these days.  `None` or an empty mask applies
    /// it every day.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub which_days: Option<WhichDays>,
    /// Overrides the catalog labels of `zman_type`.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub labels: Option<CustomLabels>,
}

impl ZmanDefinition {
    pub const fn new(zman_type: ZmanType) -> Self {
        Self {
            zman_type,
            offset_minutes: None,
            which_days: None,
            labels: None,
        }
    }

    pub fn with_offset(mut self, minutes: i32) -> Self {
        self.offset_minutes = Some(minutes);
        self
    }

    pub fn on_days(mut self, days: WhichDays) -> Self {
        self.which_days = Some(days);
        self
    }

    pub fn with_labels(mut self, labels: CustomLabels) -> Self {
        self.labels = Some(labels);
        self
    }

    /// The custom labels when set, otherwise the catalog labels.
    pub fn labels(&self) -> ZmanLabels<'_> {
        match &self.labels {
            Some(custom) => ZmanLabels {
                desc: &custom.desc,
                eng: &custom.eng,
                heb: &custom.heb,
            },
            None => self.zman_type.labels(),
        }
    }

    /// Offset in minutes that applies on a day flagged `day`.
    pub fn offset_for(&self, day: WhichDays) -> i32 {
        match (self.offset_minutes, self.which_days) {
            (Some(minutes), None) => minutes,
            (Some(minutes), Some(mask)) if mask.is_empty() || mask.intersects(day) => minutes,
            _ => 0,
        }
    }
}

impl From<ZmanType> for ZmanDefinition {
    fn from(zman_type: ZmanType) -> Self {
        Self::new(zman_type)
    }
}
