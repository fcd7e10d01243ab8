pub mod delete;
pub mod edit;
pub mod list;
pub mod month;
pub mod new;
pub mod show;

use anyhow::Result;
use chrono::Duration;
use clap::Args;
use eventcal_core::date_range::parse_timestamp;
use eventcal_core::{EventInput, Frequency, Weekday};

/// Event fields shared by `new` and `edit`. Anything left out keeps its
/// current value on edit.
#[derive(Args, Debug, Default)]
pub struct EventArgs {
    /// Event title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Start date/time (e.g., "2025-03-20T15:00")
    #[arg(short, long)]
    pub start: Option<String>,

    /// End date/time; defaults to one hour after the start for new events
    #[arg(short, long)]
    pub end: Option<String>,

    /// Free-form description ("" clears it)
    #[arg(short, long)]
    pub description: Option<String>,

    /// Repeat DAILY, WEEKLY or MONTHLY (makes the event recurring)
    #[arg(short, long)]
    pub frequency: Option<String>,

    /// Weekdays for weekly events, comma separated (e.g., "MONDAY,FRIDAY")
    #[arg(long, value_delimiter = ',')]
    pub days: Vec<String>,

    /// Recurrence end date ("none" clears it)
    #[arg(long)]
    pub until: Option<String>,

    /// Turn recurrence off
    #[arg(long, conflicts_with_all = ["frequency", "days", "until"])]
    pub once: bool,
}

impl EventArgs {
    /// Build a new event payload; title and start are required.
    pub fn into_new_input(self) -> Result<EventInput> {
        let title = self
            .title
            .clone()
            .ok_or_else(|| anyhow::anyhow!("--title is required"))?;
        let start = match self.start.as_deref() {
            Some(raw) => parse_timestamp(raw)?,
            None => anyhow::bail!("--start is required"),
        };

        let mut input = EventInput {
            title,
            description: None,
            start_date: start,
            end_date: start + Duration::hours(1),
            is_recurring: false,
            frequency: None,
            days_of_week: Vec::new(),
            recurrence_end: None,
        };

        self.apply_to(&mut input)?;
        Ok(input)
    }

    /// Overlay the given flags on an existing payload.
    pub fn apply_to(self, input: &mut EventInput) -> Result<()> {
        if let Some(title) = self.title {
            input.title = title;
        }

        if let Some(description) = self.description {
            input.description = if description.trim().is_empty() {
                None
            } else {
                Some(description)
            };
        }

        if let Some(start) = &self.start {
            input.start_date = parse_timestamp(start)?;
        }

        if let Some(end) = &self.end {
            input.end_date = parse_timestamp(end)?;
        }

        if self.once {
            input.is_recurring = false;
            input.frequency = None;
            input.days_of_week.clear();
            input.recurrence_end = None;
            return Ok(());
        }

        if let Some(frequency) = self.frequency {
            input.is_recurring = true;
            input.frequency = Some(Frequency::from(frequency));
        }

        if !self.days.is_empty() {
            input.days_of_week = self
                .days
                .iter()
                .map(|d| d.parse::<Weekday>())
                .collect::<Result<_, _>>()?;
        }

        if let Some(until) = self.until {
            input.recurrence_end = match until.trim() {
                "" | "none" => None,
                raw => Some(parse_timestamp(raw)?),
            };
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_new_input_defaults_to_one_hour() {
        let args = EventArgs {
            title: Some("Dentist".to_string()),
            start: Some("2024-03-10T14:00".to_string()),
            ..Default::default()
        };

        let input = args.into_new_input().unwrap();
        assert_eq!(
            input.end_date,
            NaiveDate::from_ymd_opt(2024, 3, 10)
                .unwrap()
                .and_hms_opt(15, 0, 0)
                .unwrap()
        );
        assert!(!input.is_recurring);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_new_input_requires_title_and_start() {
        assert!(EventArgs::default().into_new_input().is_err());

        let no_start = EventArgs {
            title: Some("x".to_string()),
            ..Default::default()
        };
        assert!(no_start.into_new_input().is_err());
    }

    #[test]
    fn test_weekly_flags() {
        let args = EventArgs {
            title: Some("Gym".to_string()),
            start: Some("2024-03-04T18:00".to_string()),
            frequency: Some("weekly".to_string()),
            days: vec!["monday".to_string(), "FRI".to_string()],
            until: Some("2024-06-30".to_string()),
            ..Default::default()
        };

        let input = args.into_new_input().unwrap();
        assert!(input.is_recurring);
        assert_eq!(input.frequency, Some(Frequency::Weekly));
        assert_eq!(input.days_of_week, vec![Weekday::Monday, Weekday::Friday]);
        assert!(input.recurrence_end.is_some());
    }

    #[test]
    fn test_once_clears_recurrence() {
        let mut input = EventArgs {
            title: Some("Gym".to_string()),
            start: Some("2024-03-04T18:00".to_string()),
            frequency: Some("DAILY".to_string()),
            ..Default::default()
        }
        .into_new_input()
        .unwrap();

        let edit = EventArgs {
            once: true,
            description: Some(String::new()),
            ..Default::default()
        };
        edit.apply_to(&mut input).unwrap();

        assert!(!input.is_recurring);
        assert_eq!(input.frequency, None);
        assert_eq!(input.description, None);
    }
}
