//! Building the ordered day list.

use anyhow::{Context, Result};
use chrono::{Days, Local, NaiveDate};

use crate::carousel::DayItem;

/// Longest day list accepted from the command line or config file
pub const MAX_DAYS: usize = 3660;

/// Parse a `YYYY-MM-DD` start date
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", input))
}

/// Today in local time
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Id used for a date in the day list
pub fn day_id(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// `count` consecutive days starting at `start`.
///
/// Ids are ISO dates, labels are short weekday + day of month (`Fri 16`).
/// Stops early if the calendar runs out.
pub fn build_days(start: NaiveDate, count: usize) -> Vec<DayItem> {
    (0..count as u64)
        .map_while(|n| start.checked_add_days(Days::new(n)))
        .map(|date| DayItem::new(day_id(date), date.format("%a %d").to_string()))
        .collect()
}

/// Longer description of a day id for the detail pane
pub fn describe(id: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(id, "%Y-%m-%d").ok()?;
    Some(date.format("%A, %B %-d, %Y").to_string())
}
