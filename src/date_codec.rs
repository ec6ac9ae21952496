//! To keep day identities cheap to compare and store,
//! we use u32 to encode year, month and day.
//! Year is encoded as is, e.g. year 2024 is just the 2024 number.
//!
//! Year/month is encoded in the same number,
//! e.g. 2024 Feb will be 202402
//!
//! A full day is encoded with a day component on top,
//! e.g. 2024 Feb 17 will be 20240217
//!
//! We don't use a new type approach, like `struct DayKey(u32)`,
//! because these keys go straight into set membership and
//! range queries, and the bare integer keeps that free.
//!
//! Two string shapes of a date exist around this core:
//! the storage form `MM/DD/YYYY` kept in job records and
//! the display form `YYYY-MM-DD` fed to date-input controls.
//! Conversions between them are deliberately lenient: an empty
//! or separator-free string flows through unchanged so that
//! already-malformed stored values never crash a caller.

use std::ops::RangeInclusive;

pub type Year = u32;

/// Year/month encoded into u32 as yyyymm
pub type YearMonth = u32;

/// Year/month/day encoded into u32 as yyyymmdd
pub type DayKey = u32;

pub fn day_key(year: Year, month: u32, day: u32) -> DayKey {
    year * 10000 + month * 100 + day
}

/// Converts a u32 encoded day key to its year/month part
pub fn ym_of(day: DayKey) -> YearMonth {
    day / 100
}

/// For a given year/month, the range of day keys that belong to it.
/// E.g. for 202407 it will return 20240701..=20240731
pub fn ymd_range_for_ym(year_month: YearMonth) -> RangeInclusive<u32> {
    year_month * 100 + 1..=year_month * 100 + 31
}

pub fn is_leap_year(year: Year) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: Year, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Storage form `MM/DD/YYYY` to display form `YYYY-MM-DD`,
/// month and day zero-padded to width 2.
/// Empty input, input without `/`, or input that does not split
/// into three parts is returned unchanged.
pub fn to_display_form(stored: &str) -> String {
    if stored.is_empty() || !stored.contains('/') {
        return stored.to_string();
    }
    let parts: Vec<&str> = stored.split('/').collect();
    if parts.len() != 3 {
        return stored.to_string();
    }
    format!("{}-{:0>2}-{:0>2}", parts[2], parts[0], parts[1])
}

/// Display form `YYYY-MM-DD` to storage form `MM/DD/YYYY`.
/// Same pass-through policy as [`to_display_form`].
pub fn to_storage_form(display: &str) -> String {
    if display.is_empty() || !display.contains('-') {
        return display.to_string();
    }
    let parts: Vec<&str> = display.split('-').collect();
    if parts.len() != 3 {
        return display.to_string();
    }
    format!("{:0>2}/{:0>2}/{}", parts[1], parts[2], parts[0])
}

/// Parses a storage form `MM/DD/YYYY` date into a day key.
/// Returns None for empty, malformed, non-numeric or impossible
/// dates; a job with such a date simply has no place on the calendar.
/// The year is capped at four digits: anything larger cannot fit the
/// yyyymmdd encoding.
pub fn to_day_key(stored: &str) -> Option<DayKey> {
    let parts: Vec<&str> = stored.split('/').collect();
    if parts.len() != 3 {
        return None;
    }
    let month: u32 = parts[0].trim().parse().ok()?;
    let day: u32 = parts[1].trim().parse().ok()?;
    let year: Year = parts[2].trim().parse().ok()?;
    if year > 9999 || !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
        return None;
    }
    Some(day_key(year, month, day))
}
