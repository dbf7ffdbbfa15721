//! Calendar month used to bucket revenue and expenses
//!
//! Day-of-month is never significant in the forecast: a deal closing on the
//! 28th and an invoice dated the 1st land in the same bucket.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, Datelike, Local, Months, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A calendar month, stored as its first day
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Month(NaiveDate);

impl Month {
    /// Build a month from a year and a 1-based month number
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self)
    }

    /// The month containing `date`
    pub fn of(date: NaiveDate) -> Self {
        // Day 1 always exists for a month that already contains `date`.
        Self(date - chrono::Duration::days(i64::from(date.day0())))
    }

    /// The month containing today's local date
    pub fn current() -> Self {
        Self::of(Local::now().date_naive())
    }

    pub fn first_day(self) -> NaiveDate {
        self.0
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// 1-based month number
    pub fn month(self) -> u32 {
        self.0.month()
    }

    /// The month `months` after this one, or `None` past the end of the calendar
    pub fn checked_add(self, months: u32) -> Option<Self> {
        self.0.checked_add_months(Months::new(months)).map(Self)
    }

    /// Consecutive months starting at `anchor` (inclusive)
    pub fn horizon(anchor: Month, months: usize) -> impl Iterator<Item = Month> {
        (0..months).map_while(move |i| u32::try_from(i).ok().and_then(|i| anchor.checked_add(i)))
    }

    /// January, April, July or October
    pub fn is_quarter_start(self) -> bool {
        matches!(self.month(), 1 | 4 | 7 | 10)
    }

    pub fn is_january(self) -> bool {
        self.month() == 1
    }

    /// Short display label, e.g. "Oct 2026"
    pub fn label(self) -> String {
        self.0.format("%b %Y").to_string()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

impl FromStr for Month {
    type Err = ForecastError;

    /// Accepts `YYYY-MM`, `YYYY-MM-DD` and timestamps; only the calendar
    /// month survives.
    ///
    /// RFC 3339 timestamps carrying an offset are converted to the local time
    /// zone before the date is taken, so a local start-of-month written out
    /// in UTC (`2026-02-28T23:00:00Z` at UTC+1) resolves to March. Timestamps
    /// without an offset are read as local wall-clock time.
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();

        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            return Ok(Self::of(date));
        }
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{text}-01"), "%Y-%m-%d") {
            return Ok(Self(date));
        }
        if let Ok(stamp) = DateTime::parse_from_rfc3339(text) {
            return Ok(Self::of(stamp.with_timezone(&Local).date_naive()));
        }
        if let Ok(stamp) = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(Self::of(stamp.date()));
        }
        Err(ForecastError::InvalidMonth(s.to_string()))
    }
}

impl From<Month> for String {
    fn from(month: Month) -> Self {
        month.to_string()
    }
}

impl TryFrom<String> for Month {
    type Error = ForecastError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}
