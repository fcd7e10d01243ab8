//! Month grid layout.
//!
//! Lays a month out as full Sunday-to-Saturday weeks and buckets events into
//! each day. The grid keeps every event of a day; how many to show is up to
//! the view (see [`DayCell::visible`]).

use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use crate::date_range::MonthWindow;
use crate::event::Event;
use crate::recurrence::{ExpandOptions, expand};

/// How many events a month cell shows before collapsing into "+N more"
pub const DEFAULT_VISIBLE_EVENTS: usize = 2;

/// One day of the month grid.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for the lead/trail days borrowed from the adjacent months
    pub is_same_month: bool,
    pub events: Vec<Event>,
}

impl DayCell {
    pub fn visible(&self, limit: usize) -> &[Event] {
        &self.events[..self.events.len().min(limit)]
    }

    /// Number of events hidden behind "+N more"
    pub fn overflow(&self, limit: usize) -> usize {
        self.events.len().saturating_sub(limit)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthGrid {
    pub month: MonthWindow,
    pub grid_start: NaiveDate,
    pub grid_end: NaiveDate,
    pub cells: Vec<DayCell>,
}

impl MonthGrid {
    /// Rows of seven cells, Sunday first.
    pub fn weeks(&self) -> impl Iterator<Item = &[DayCell]> {
        self.cells.chunks(7)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&DayCell> {
        let offset = (date - self.grid_start).num_days();
        usize::try_from(offset).ok().and_then(|i| self.cells.get(i))
    }
}

/// Sunday on or before `date`
fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_sunday()))
}

/// Saturday on or after `date`
fn week_end(date: NaiveDate) -> NaiveDate {
    date + Duration::days(i64::from(6 - date.weekday().num_days_from_sunday()))
}

/// Build the grid for the month containing `current_month`.
///
/// A day's bucket holds every event whose start day is that day, plus every
/// event whose expansion over the strict month includes it. Lead/trail days
/// therefore only ever show literal start-day matches. Bucket order follows
/// `events`.
pub fn build_month_grid(
    current_month: NaiveDate,
    events: &[Event],
    options: &ExpandOptions,
) -> MonthGrid {
    let month = MonthWindow::containing(current_month);
    let grid_start = week_start(month.start);
    let grid_end = week_end(month.end);

    // Expand once per event, not once per cell
    let expanded: Vec<Vec<NaiveDate>> = events
        .iter()
        .map(|event| expand(event, &month, options))
        .collect();

    let cells = grid_start
        .iter_days()
        .take_while(|day| *day <= grid_end)
        .map(|date| {
            let events = events
                .iter()
                .zip(&expanded)
                .filter(|(event, dates)| event.start_day() == date || dates.contains(&date))
                .map(|(event, _)| event.clone())
                .collect();

            DayCell {
                date,
                is_same_month: month.contains(date),
                events,
            }
        })
        .collect();

    MonthGrid {
        month,
        grid_start,
        grid_end,
        cells,
    }
}
