//! Date, time and age normalization

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

static YMD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})[-/.](\d{1,2})[-/.](\d{1,2})\b").unwrap());

static DMY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})[-/.](\d{1,2})[-/.](\d{4}|\d{2})\b").unwrap());

static ORDINAL_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").unwrap());

static MERIDIEM_DOTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b([ap])\.\s*m\.?").unwrap());

static CLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(\d{1,2})(?:[:.](\d{2}))?\s*(am|pm)?\b").unwrap());

static TWO_DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(\d{2})\b").unwrap());

const TEXT_DATE_FORMATS: [&str; 4] = ["%d %B %Y", "%d %b %Y", "%B %d %Y", "%b %d %Y"];

/// Two-digit years above this are 19xx, the rest 20xx
const YEAR_PIVOT: u32 = 40;

const MIN_AGE: u32 = 18;
const MAX_AGE: u32 = 80;
const MAX_DERIVED_AGE: i32 = 120;

fn iso(year: u32, month: u32, day: u32) -> Option<String> {
    let valid = (1900..=2099).contains(&year) && (1..=12).contains(&month) && (1..=31).contains(&day);
    valid.then(|| format!("{:04}-{:02}-{:02}", year, month, day))
}

fn numbers(caps: &regex::Captures<'_>) -> Option<(u32, u32, u32)> {
    let part = |i: usize| caps.get(i)?.as_str().parse::<u32>().ok();
    Some((part(1)?, part(2)?, part(3)?))
}

/// Date of birth as `YYYY-MM-DD`.
///
/// Tries year-first, then day-first with a two-digit year pivot, then
/// written-out month names (`15th August 1995`, `Aug 15, 1995`). Only
/// day and month bounds are checked for numeric forms.
pub fn to_iso_date(value: &str) -> Option<String> {
    if let Some(caps) = YMD.captures(value) {
        let (year, month, day) = numbers(&caps)?;
        if let Some(date) = iso(year, month, day) {
            return Some(date);
        }
    }

    if let Some(caps) = DMY.captures(value) {
        let (day, month, year) = numbers(&caps)?;
        let year = match caps.get(3).map(|m| m.as_str().len()) {
            Some(2) if year > YEAR_PIVOT => 1900 + year,
            Some(2) => 2000 + year,
            _ => year,
        };
        if let Some(date) = iso(year, month, day) {
            return Some(date);
        }
    }

    let text = ORDINAL_SUFFIX.replace_all(value, "$1");
    let text: String = text
        .chars()
        .map(|c| match c {
            '-' | '/' | '.' => ' ',
            other => other,
        })
        .filter(|c| *c != ',')
        .collect();
    let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

    TEXT_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&text, format).ok())
        .and_then(|date| iso(date.year() as u32, date.month(), date.day()))
}

/// Time of birth as 24h `HH:mm`.
///
/// Date groups are dropped first, and a reading with minutes or am/pm wins
/// over a bare hour, so `15/08/1995, 10:30 AM` reads as 10:30.
pub fn to_24h_time(value: &str) -> Option<String> {
    let value = MERIDIEM_DOTS.replace_all(value, "${1}m");
    let value = YMD.replace_all(&value, " ");
    let value = DMY.replace_all(&value, " ");

    let mut readings = CLOCK.captures_iter(&value);
    let first = readings.next()?;
    let caps = if first.get(2).is_some() || first.get(3).is_some() {
        first
    } else {
        readings
            .find(|caps| caps.get(2).is_some() || caps.get(3).is_some())
            .unwrap_or(first)
    };

    let mut hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };
    if hour > 23 || minute > 59 {
        return None;
    }

    match caps.get(3).map(|m| m.as_str().to_ascii_lowercase()).as_deref() {
        Some("pm") if hour < 12 => hour += 12,
        Some("am") if hour == 12 => hour = 0,
        _ => {}
    }

    Some(format!("{:02}:{:02}", hour, minute))
}

/// Leading two-digit number within the plausible marriage-age range
pub fn normalize_age(value: &str) -> Option<String> {
    let age: u32 = TWO_DIGITS.captures(value)?.get(1)?.as_str().parse().ok()?;
    (MIN_AGE..=MAX_AGE).contains(&age).then(|| age.to_string())
}

/// Completed years between an ISO `dob` and `reference`.
///
/// `None` when `dob` is not a real calendar date or the result falls
/// outside 0..=120.
pub fn age_from_dob(dob: &str, reference: NaiveDate) -> Option<u32> {
    let born = NaiveDate::parse_from_str(dob, "%Y-%m-%d").ok()?;

    let mut years = reference.year() - born.year();
    if (reference.month(), reference.day()) < (born.month(), born.day()) {
        years -= 1;
    }

    (0..=MAX_DERIVED_AGE)
        .contains(&years)
        .then_some(years as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_dates() {
        assert_eq!(to_iso_date("15/08/1995").as_deref(), Some("1995-08-15"));
        assert_eq!(to_iso_date("1995-8-15").as_deref(), Some("1995-08-15"));
        assert_eq!(to_iso_date("15.08.1995").as_deref(), Some("1995-08-15"));
        assert_eq!(to_iso_date("05-04-03").as_deref(), Some("2003-04-05"));
        assert_eq!(to_iso_date("12/3/95").as_deref(), Some("1995-03-12"));
        assert_eq!(to_iso_date("1/1/40").as_deref(), Some("2040-01-01"));
        assert_eq!(to_iso_date("1/1/41").as_deref(), Some("1941-01-01"));
    }

    #[test]
    fn test_numeric_date_bounds() {
        assert!(to_iso_date("32/01/1995").is_none());
        assert!(to_iso_date("15/13/1995").is_none());
        assert!(to_iso_date("1850-01-01").is_none());
        // Day/month bounds only; not a real date but syntactically valid
        assert_eq!(to_iso_date("31/02/1995").as_deref(), Some("1995-02-31"));
    }

    #[test]
    fn test_written_dates() {
        assert_eq!(to_iso_date("15th August 1995").as_deref(), Some("1995-08-15"));
        assert_eq!(to_iso_date("3 Mar 1996").as_deref(), Some("1996-03-03"));
        assert_eq!(to_iso_date("Aug 15, 1995").as_deref(), Some("1995-08-15"));
        assert!(to_iso_date("sometime in spring").is_none());
    }

    #[test]
    fn test_times() {
        assert_eq!(to_24h_time("11:45 PM").as_deref(), Some("23:45"));
        assert_eq!(to_24h_time("12:10 am").as_deref(), Some("00:10"));
        assert_eq!(to_24h_time("12:30 pm").as_deref(), Some("12:30"));
        assert_eq!(to_24h_time("6.05 a.m.").as_deref(), Some("06:05"));
        assert_eq!(to_24h_time("7 pm").as_deref(), Some("19:00"));
        assert_eq!(to_24h_time("18:20").as_deref(), Some("18:20"));
        assert!(to_24h_time("25:00").is_none());
        assert!(to_24h_time("10:75").is_none());
        assert!(to_24h_time("morning").is_none());
    }

    #[test]
    fn test_time_next_to_date() {
        assert_eq!(to_24h_time("15/08/1995, 10:30 AM").as_deref(), Some("10:30"));
        assert_eq!(to_24h_time("1995-08-15 at 7 pm").as_deref(), Some("19:00"));
        assert_eq!(to_24h_time("around 6, 5:45 am").as_deref(), Some("05:45"));
        assert!(to_24h_time("15/08/1995").is_none());
    }

    #[test]
    fn test_normalize_age() {
        assert_eq!(normalize_age("29 years").as_deref(), Some("29"));
        assert_eq!(normalize_age("27").as_deref(), Some("27"));
        assert!(normalize_age("12").is_none());
        assert!(normalize_age("ninety").is_none());
    }

    #[test]
    fn test_age_from_dob() {
        let today = NaiveDate::from_ymd_opt(2024, 8, 14).unwrap();
        assert_eq!(age_from_dob("1995-08-15", today), Some(28));
        assert_eq!(age_from_dob("1995-08-14", today), Some(29));
        assert!(age_from_dob("1995-02-31", today).is_none());
        assert!(age_from_dob("2030-01-01", today).is_none());
    }
}
