//! Resolution of Russian date phrases to calendar dates.
//!
//! Supported forms: `сегодня`, `завтра`, `послезавтра`, `dd.mm`,
//! `dd.mm.yy`, `dd.mm.yyyy` and `<dd> <месяца> [yyyy]`, each optionally
//! preceded by `на`. A date without a year that already passed this year is
//! taken to mean next year.

use chrono::{Datelike, Days, NaiveDate};
use lazy_static::lazy_static;
use regex::Regex;

const MONTHS: [&str; 12] = [
    "января",
    "февраля",
    "марта",
    "апреля",
    "мая",
    "июня",
    "июля",
    "августа",
    "сентября",
    "октября",
    "ноября",
    "декабря",
];

lazy_static! {
    static ref NUMERIC_DATE_RE: Regex =
        Regex::new(r"^(?P<day>\d{1,2})\.(?P<month>\d{1,2})(?:\.(?P<year>\d{2}|\d{4}))?$")
            .expect("Numeric date pattern should be valid");
    static ref WORD_DATE_RE: Regex =
        Regex::new(r"^(?P<day>\d{1,2})\s+(?P<month>\p{L}+)(?:\s+(?P<year>\d{4}))?(?:\s*г\.?)?$")
            .expect("Word date pattern should be valid");
}

/// Resolve a date phrase relative to `today`
pub fn resolve(phrase: &str, today: NaiveDate) -> Option<NaiveDate> {
    let lowered = phrase.trim().to_lowercase();
    let phrase = lowered
        .strip_prefix("на ")
        .unwrap_or(&lowered)
        .trim()
        .trim_end_matches(&['.', ',', ':', '!'][..]);

    match phrase {
        "сегодня" => return Some(today),
        "завтра" => return today.checked_add_days(Days::new(1)),
        "послезавтра" => return today.checked_add_days(Days::new(2)),
        _ => {}
    }

    if let Some(caps) = NUMERIC_DATE_RE.captures(phrase) {
        let day = caps["day"].parse().ok()?;
        let month = caps["month"].parse().ok()?;
        let year = caps.name("year").and_then(|m| expand_year(m.as_str()));
        return build_date(day, month, year, today);
    }

    if let Some(caps) = WORD_DATE_RE.captures(phrase) {
        let day = caps["day"].parse().ok()?;
        let month = month_number(&caps["month"])?;
        let year = caps.name("year").and_then(|m| m.as_str().parse().ok());
        return build_date(day, month, year, today);
    }

    None
}

/// Like [`resolve`] but falls back to `today`
pub fn resolve_or_today(phrase: &str, today: NaiveDate) -> NaiveDate {
    resolve(phrase, today).unwrap_or(today)
}

/// Month number for a genitive Russian month name
pub fn month_number(name: &str) -> Option<u32> {
    let name = name.to_lowercase();
    MONTHS
        .iter()
        .position(|month| *month == name)
        .and_then(|index| u32::try_from(index + 1).ok())
}

fn expand_year(raw: &str) -> Option<i32> {
    let year: i32 = raw.parse().ok()?;
    Some(if raw.len() == 2 { 2000 + year } else { year })
}

fn build_date(day: u32, month: u32, year: Option<i32>, today: NaiveDate) -> Option<NaiveDate> {
    match year {
        Some(year) => NaiveDate::from_ymd_opt(year, month, day),
        None => {
            let this_year = NaiveDate::from_ymd_opt(today.year(), month, day)?;
            if this_year < today {
                NaiveDate::from_ymd_opt(today.year() + 1, month, day)
            } else {
                Some(this_year)
            }
        }
    }
}
