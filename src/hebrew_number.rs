// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Number formatting: Hebrew numerals and English ordinals.
//!
//! Hebrew numerals are additive letter values.  Thousands are written as a
//! single letter followed by a geresh, 15 and 16 are written `טו` and `טז` to
//! avoid spelling a divine name, and gershayim go before the final letter of
//! any number longer than one character.  A thousands number with nothing
//! past the units (`'ה'` for 5000, `'ה'א` for 5001) gets a leading geresh
//! instead:
//!
//! ```rust
//! use luach::to_hebrew_number;
//!
//! assert_eq!(to_hebrew_number(5784).unwrap(), "ה'תשפ\"ד");
//! assert_eq!(to_hebrew_number(15).unwrap(), "ט\"ו");
//! assert!(to_hebrew_number(0).is_err());
//! ```

use crate::error::{Result, ZmanimError};

const ONES: [char; 9] = ['א', 'ב', 'ג', 'ד', 'ה', 'ו', 'ז', 'ח', 'ט'];
const TENS: [char; 9] = ['י', 'כ', 'ל', 'מ', 'נ', 'ס', 'ע', 'פ', 'צ'];
const HUNDREDS: [char; 4] = ['ק', 'ר', 'ש', 'ת'];

const GERESH: char = '\'';
const GERSHAYIM: char = '"';

/// Write `number` in Hebrew letters.  Accepts `1..=9999`.
pub fn to_hebrew_number(number: i64) -> Result<String> {
    if !(1..=9999).contains(&number) {
        return Err(ZmanimError::HebrewNumberOutOfRange(number));
    }

    let mut letters: Vec<char> = Vec::new();
    let thousands = number / 1000;
    if thousands > 0 {
        letters.push(ONES[thousands as usize - 1]);
        letters.push(GERESH);
    }

    let mut n = number % 1000;
    while n >= 400 {
        letters.push('ת');
        n -= 400;
    }
    if n >= 100 {
        letters.push(HUNDREDS[(n / 100) as usize - 1]);
        n %= 100;
    }
    match n {
        15 => letters.extend(['ט', 'ו']),
        16 => letters.extend(['ט', 'ז']),
        _ => {
            if n >= 10 {
                letters.push(TENS[(n / 10) as usize - 1]);
            }
            if n % 10 > 0 {
                letters.push(ONES[(n % 10) as usize - 1]);
            }
        }
    }

    // A year with no tens or hundreds is marked with a leading geresh
    // instead of gershayim.
    if thousands > 0 && number % 1000 < 10 {
        letters.insert(0, GERESH);
    } else if letters.len() > 1 {
        letters.insert(letters.len() - 1, GERSHAYIM);
    }
    Ok(letters.into_iter().collect())
}

/// English ordinal: `1st`, `2nd`, `3rd`, `11th`, `22nd`, `101st`.
pub fn to_suffixed(number: u32) -> String {
    let suffix = match (number % 10, number % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{number}{suffix}")
}
