//! Lightweight civil-date arithmetic (no chrono dependency).
//!
//! Uses Howard Hinnant's civil_from_days / days_from_civil algorithms for
//! conversions. The engine never reads a clock; callers supply "today".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A validated calendar date in the proleptic Gregorian calendar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Date {
    year: i32,
    month: u32,
    day: u32,
}

impl Date {
    /// Construct a date, rejecting impossible month/day combinations.
    pub fn new(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        if day < 1 || day > days_in_month(year, month) {
            return None;
        }
        Some(Self { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Days since the Unix epoch (1970-01-01 = day 0).
    pub fn to_days(&self) -> i64 {
        days_from_civil(self.year, self.month, self.day)
    }

    /// Inverse of `to_days`.
    pub fn from_days(days: i64) -> Self {
        let (y, m, d) = civil_from_days(days);
        Self {
            year: y as i32,
            month: m as u32,
            day: d as u32,
        }
    }

    /// Calendar date of a Unix timestamp (UTC).
    pub fn from_unix_secs(secs: u64) -> Self {
        Self::from_days((secs / 86400) as i64)
    }

    /// The following calendar day.
    pub fn succ(&self) -> Self {
        Self::from_days(self.to_days() + 1)
    }

    /// Whole years elapsed from `self` to `today`. Negative if `today`
    /// precedes `self`.
    pub fn years_until(&self, today: Date) -> i32 {
        let mut years = today.year - self.year;
        if (today.month, today.day) < (self.month, self.day) {
            years -= 1;
        }
        years
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Failure to parse an ISO `YYYY-MM-DD` string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDateError(String);

impl fmt::Display for ParseDateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid date '{}': expected YYYY-MM-DD", self.0)
    }
}

impl std::error::Error for ParseDateError {}

impl FromStr for Date {
    type Err = ParseDateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseDateError(s.to_string());
        let mut parts = s.splitn(3, '-');
        let year: i32 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        let month: u32 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        let day: u32 = parts.next().and_then(|p| p.parse().ok()).ok_or_else(err)?;
        Date::new(year, month, day).ok_or_else(err)
    }
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        _ => 0,
    }
}

/// Howard Hinnant's civil_from_days: epoch days -> (year, month, day).
fn civil_from_days(days: i64) -> (i64, u64, u64) {
    let z = days + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u64;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}

/// Howard Hinnant's days_from_civil: (year, month, day) -> epoch days.
fn days_from_civil(year: i32, month: u32, day: u32) -> i64 {
    let y = i64::from(year) - i64::from(month <= 2);
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = (y - era * 400) as u64;
    let mp = if month > 2 { month - 3 } else { month + 9 } as u64;
    let doy = (153 * mp + 2) / 5 + u64::from(day) - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe as i64 - 719468
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch() {
        let d = Date::from_days(0);
        assert_eq!(d, Date::new(1970, 1, 1).unwrap());
        assert_eq!(d.to_days(), 0);
    }

    #[test]
    fn test_roundtrip_known_dates() {
        for (y, m, d) in [(1994, 11, 29), (2000, 2, 29), (1900, 12, 31), (2026, 1, 1)] {
            let date = Date::new(y, m, d).unwrap();
            assert_eq!(Date::from_days(date.to_days()), date);
        }
    }

    #[test]
    fn test_rejects_invalid() {
        assert!(Date::new(2023, 2, 29).is_none());
        assert!(Date::new(2024, 2, 29).is_some());
        assert!(Date::new(2024, 13, 1).is_none());
        assert!(Date::new(2024, 0, 1).is_none());
        assert!(Date::new(2024, 4, 31).is_none());
    }

    #[test]
    fn test_leap_years() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn test_succ_crosses_boundaries() {
        let d = Date::new(2023, 12, 31).unwrap();
        assert_eq!(d.succ(), Date::new(2024, 1, 1).unwrap());

        let feb = Date::new(2024, 2, 28).unwrap();
        assert_eq!(feb.succ(), Date::new(2024, 2, 29).unwrap());
        assert_eq!(feb.succ().succ(), Date::new(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_years_until() {
        let birth = Date::new(1990, 5, 15).unwrap();
        assert_eq!(birth.years_until(Date::new(2020, 5, 15).unwrap()), 30);
        assert_eq!(birth.years_until(Date::new(2020, 5, 14).unwrap()), 29);
        assert_eq!(birth.years_until(Date::new(2020, 5, 16).unwrap()), 30);
        assert_eq!(birth.years_until(Date::new(1989, 1, 1).unwrap()), -2);
    }

    #[test]
    fn test_display_and_parse() {
        let d = Date::new(1994, 11, 29).unwrap();
        assert_eq!(d.to_string(), "1994-11-29");
        assert_eq!("1994-11-29".parse::<Date>().unwrap(), d);
        assert!("1994-13-29".parse::<Date>().is_err());
        assert!("not-a-date".parse::<Date>().is_err());
    }

    #[test]
    fn test_from_unix_secs() {
        assert_eq!(Date::from_unix_secs(0), Date::new(1970, 1, 1).unwrap());
        // 2026-02-21T00:00:00Z = 1771632000
        assert_eq!(
            Date::from_unix_secs(1771632000),
            Date::new(2026, 2, 21).unwrap()
        );
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a = Date::new(1990, 5, 15).unwrap();
        let b = Date::new(1990, 6, 1).unwrap();
        let c = Date::new(1991, 1, 1).unwrap();
        assert!(a < b && b < c);
    }
}
