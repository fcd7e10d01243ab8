//! Month windows and date parsing.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::error::{EventCalError, EventCalResult};

/// The strict calendar month: first through last day, inclusive.
///
/// Recurrence is always matched against this window, never against the
/// padded grid shown around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthWindow {
    pub fn new(year: i32, month: u32) -> EventCalResult<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            EventCalError::InvalidDate(format!("No such month: {year}-{month:02}"))
        })?;
        Ok(Self::containing(start))
    }

    /// The month that `date` falls in.
    pub fn containing(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(chrono::Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(NaiveDate::MAX);
        MonthWindow { start, end }
    }

    pub fn year(&self) -> i32 {
        self.start.year()
    }

    pub fn month(&self) -> u32 {
        self.start.month()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn num_days(&self) -> usize {
        ((self.end - self.start).num_days() + 1) as usize
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    pub fn previous(&self) -> Self {
        Self::containing(self.start - Duration::days(1))
    }

    pub fn next(&self) -> Self {
        Self::containing(self.end + Duration::days(1))
    }

    /// "March 2024"
    pub fn title(&self) -> String {
        self.start.format("%B %Y").to_string()
    }
}

/// Parse YYYY-MM into the month window it names
pub fn parse_month(s: &str) -> EventCalResult<MonthWindow> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
        .map_err(|_| EventCalError::InvalidDate(format!("Invalid month '{s}'. Expected YYYY-MM")))?;
    Ok(MonthWindow::containing(first))
}

/// Parse YYYY-MM-DD
pub fn parse_date(s: &str) -> EventCalResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| EventCalError::InvalidDate(format!("Invalid date '{s}'. Expected YYYY-MM-DD")))
}

const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a naive local timestamp.
///
/// Accepts `YYYY-MM-DDTHH:MM[:SS]`, RFC 3339 (the offset is dropped and the
/// wall-clock time kept) and a bare `YYYY-MM-DD` (midnight).
pub fn parse_timestamp(s: &str) -> EventCalResult<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_local());
    }

    for format in TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            EventCalError::InvalidDate(format!(
                "Invalid timestamp '{s}'. Expected YYYY-MM-DDTHH:MM"
            ))
        })
}
