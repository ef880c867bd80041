//! Article dates are written as `"Mon YYYY"` (e.g. `"Jan 2026"`).

use chrono::{DateTime, NaiveDate, Utc};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// First day of the article's month, or `None` if the date is not in
/// `"Mon YYYY"` form.
pub fn parse_article_date(date: &str) -> Option<NaiveDate> {
    let (month, year) = date.trim().split_once(' ')?;
    let month = MONTHS.iter().position(|m| *m == month)? as u32 + 1;
    let year: i32 = year.trim().parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Midnight UTC at the start of the article's month, falling back to
/// `fallback` for unparsable dates.
pub fn article_datetime(date: &str, fallback: DateTime<Utc>) -> DateTime<Utc> {
    parse_article_date(date)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or(fallback)
}
