//! Date-range resolution for block calendars.
//!
//! Block calendars write dates as bare `month/day` tokens. The school-year
//! header supplies the year: August through December belong to the starting
//! year, January through July to the ending year. Each event's date tokens are
//! expanded to single days and then collapsed back into contiguous ranges.
//!
//! Contiguity compares day-of-month only. A run that crosses a month boundary
//! (`9/30, 10/1`) is not merged, matching how the source calendars are written;
//! ranges never span months there.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ExtractError, Result};

/// Years covered by one block calendar, from its `YYYY-YYYY` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolYear {
    pub start_year: i32,
    pub end_year: i32,
}

impl SchoolYear {
    pub fn new(start_year: i32, end_year: i32) -> Self {
        Self {
            start_year,
            end_year,
        }
    }

    /// Calendar year a bare month number falls in.
    pub fn year_for_month(&self, month: u32) -> i32 {
        if (8..=12).contains(&month) {
            self.start_year
        } else {
            self.end_year
        }
    }
}

/// Inclusive all-day range. `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn single(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }
}

fn invalid(token: &str, reason: impl Into<String>) -> ExtractError {
    ExtractError::InvalidDate {
        token: token.to_string(),
        reason: reason.into(),
    }
}

/// Resolve one `month/day` token against the school year.
///
/// # Errors
/// Returns `ExtractError::InvalidDate` if the token is malformed or names a day
/// that does not exist (`2/30`).
pub fn resolve_month_day(token: &str, school_year: &SchoolYear) -> Result<NaiveDate> {
    let token = token.trim();
    let (month, day) = token
        .split_once('/')
        .ok_or_else(|| invalid(token, "expected month/day"))?;
    let month: u32 = month
        .trim()
        .parse()
        .map_err(|_| invalid(token, "month is not a number"))?;
    let day: u32 = day
        .trim()
        .parse()
        .map_err(|_| invalid(token, "day is not a number"))?;
    let year = school_year.year_for_month(month);
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| invalid(token, format!("no such day in {year}")))
}

/// Expand a `start` or `start-end` token into single days.
///
/// The span is the difference in day-of-month, so an end day below the start
/// day yields only the start date.
pub fn expand_token(token: &str, school_year: &SchoolYear) -> Result<Vec<NaiveDate>> {
    let mut parts = token.split('-');
    let start = resolve_month_day(parts.next().unwrap_or_default(), school_year)?;
    let end = match parts.next() {
        Some(end) => resolve_month_day(end, school_year)?,
        None => start,
    };

    let span = i64::from(end.day()) - i64::from(start.day());
    let mut dates = vec![start];
    for offset in 1..=span.max(0) as u64 {
        let date = start
            .checked_add_days(Days::new(offset))
            .ok_or_else(|| invalid(token, "date out of range"))?;
        dates.push(date);
    }
    Ok(dates)
}

/// Collapse dates into the fewest inclusive ranges whose consecutive members
/// differ by exactly one in day-of-month.
pub fn merge_contiguous(mut dates: Vec<NaiveDate>) -> Vec<DateRange> {
    dates.sort();
    dates.dedup();

    let mut ranges: Vec<DateRange> = Vec::new();
    for date in dates {
        if let Some(last) = ranges.last_mut() {
            if last.end.day() + 1 == date.day() {
                last.end = date;
                continue;
            }
        }
        ranges.push(DateRange::single(date));
    }
    ranges
}

/// Resolve a whole date prefix such as `9/4-9/6, 9/8:` into merged ranges.
///
/// # Errors
/// Returns `ExtractError::InvalidDate` for the first token that does not
/// resolve; the prefix yields no ranges in that case.
pub fn resolve_ranges(prefix: &str, school_year: &SchoolYear) -> Result<Vec<DateRange>> {
    let prefix = prefix.replace(':', "");
    let mut dates = Vec::new();
    for token in prefix.split(',').map(str::trim) {
        dates.extend(expand_token(token, school_year)?);
    }
    Ok(merge_contiguous(dates))
}
