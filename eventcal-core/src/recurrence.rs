//! Recurrence expansion for the month view.
//!
//! Projects one event onto the calendar days of a month window. Matching is
//! naive local-date iteration; there is no timezone math.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::date_range::MonthWindow;
use crate::event::{Event, Recurrence, Weekday};

/// Knobs for expansion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct ExpandOptions {
    /// Drop recurring occurrences after the event's recurrence end day.
    /// Off by default: stored recurrence ends are not consulted.
    #[serde(default)]
    pub enforce_recurrence_end: bool,
}

/// Expand `event` into the days of `window` on which it occurs, ascending.
///
/// A non-recurring event always yields its start day, even when that day is
/// outside the window; intersecting with what is on screen is the caller's job.
pub fn expand(event: &Event, window: &MonthWindow, options: &ExpandOptions) -> Vec<NaiveDate> {
    let dates: Vec<NaiveDate> = match event.recurrence() {
        Recurrence::NonRecurring => return vec![event.start_day()],
        Recurrence::Daily => window.days().collect(),
        Recurrence::Weekly { days } => {
            if days.is_empty() {
                tracing::debug!(event_id = event.id, "weekly event has no weekdays, skipping");
            }
            window
                .days()
                .filter(|day| days.contains(&Weekday::of(*day)))
                .collect()
        }
        Recurrence::Monthly { day_of_month } => {
            // No rollover: the 31st simply does not happen in a 30-day month
            NaiveDate::from_ymd_opt(window.year(), window.month(), day_of_month)
                .filter(|day| window.contains(*day))
                .into_iter()
                .collect()
        }
        Recurrence::Unsupported => {
            tracing::debug!(
                event_id = event.id,
                frequency = ?event.frequency,
                "recurring event has no usable frequency, skipping"
            );
            Vec::new()
        }
    };

    match event.recurrence_end {
        Some(until) if options.enforce_recurrence_end => {
            let last = until.date();
            dates.into_iter().filter(|day| *day <= last).collect()
        }
        _ => dates,
    }
}

/// Whether `event` shows on `date`, with recurrence matched against `window`.
///
/// The start day always counts, recurring or not.
pub fn occurs_on(
    event: &Event,
    date: NaiveDate,
    window: &MonthWindow,
    options: &ExpandOptions,
) -> bool {
    event.start_day() == date || expand(event, window, options).contains(&date)
}
