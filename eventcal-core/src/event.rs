//! Event types.
//!
//! `Event` is the stored record as the API and the store see it. The
//! recurrence fields are kept flat for storage; `Event::recurrence()` turns
//! them into a [`Recurrence`] that the expander dispatches on.

use std::fmt;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{EventCalError, EventCalResult, FieldError};

pub type EventId = i64;

/// A stored calendar event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "timestamp")]
    pub start_date: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub end_date: NaiveDateTime,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub frequency: Option<Frequency>,
    #[serde(default)]
    pub days_of_week: Vec<Weekday>,
    #[serde(default, with = "timestamp::option")]
    pub recurrence_end: Option<NaiveDateTime>,
}

/// Create/update payload: every event field except the store-assigned id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInput {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(with = "timestamp")]
    pub start_date: NaiveDateTime,
    #[serde(with = "timestamp")]
    pub end_date: NaiveDateTime,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub frequency: Option<Frequency>,
    #[serde(default)]
    pub days_of_week: Vec<Weekday>,
    #[serde(default, with = "timestamp::option")]
    pub recurrence_end: Option<NaiveDateTime>,
}

/// Recurrence frequency as stored.
///
/// Unknown strings are kept verbatim so that a record written by another
/// client still loads; such events simply never expand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Unrecognized(String),
}

impl From<String> for Frequency {
    fn from(value: String) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "DAILY" => Frequency::Daily,
            "WEEKLY" => Frequency::Weekly,
            "MONTHLY" => Frequency::Monthly,
            _ => Frequency::Unrecognized(value),
        }
    }
}

impl From<Frequency> for String {
    fn from(value: Frequency) -> Self {
        value.as_str().to_string()
    }
}

impl Frequency {
    pub fn as_str(&self) -> &str {
        match self {
            Frequency::Daily => "DAILY",
            Frequency::Weekly => "WEEKLY",
            Frequency::Monthly => "MONTHLY",
            Frequency::Unrecognized(raw) => raw,
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day of the week, Sunday first as in the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Sunday,
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
    ];

    pub fn of(date: NaiveDate) -> Self {
        date.weekday().into()
    }

    /// Upper-case storage name, e.g. "MONDAY"
    pub fn name(&self) -> &'static str {
        match self {
            Weekday::Sunday => "SUNDAY",
            Weekday::Monday => "MONDAY",
            Weekday::Tuesday => "TUESDAY",
            Weekday::Wednesday => "WEDNESDAY",
            Weekday::Thursday => "THURSDAY",
            Weekday::Friday => "FRIDAY",
            Weekday::Saturday => "SATURDAY",
        }
    }

    pub fn short_label(&self) -> &'static str {
        &self.label()[..3]
    }

    /// Human label, e.g. "Monday"
    pub fn label(&self) -> &'static str {
        match self {
            Weekday::Sunday => "Sunday",
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
        }
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(value: chrono::Weekday) -> Self {
        match value {
            chrono::Weekday::Sun => Weekday::Sunday,
            chrono::Weekday::Mon => Weekday::Monday,
            chrono::Weekday::Tue => Weekday::Tuesday,
            chrono::Weekday::Wed => Weekday::Wednesday,
            chrono::Weekday::Thu => Weekday::Thursday,
            chrono::Weekday::Fri => Weekday::Friday,
            chrono::Weekday::Sat => Weekday::Saturday,
        }
    }
}

impl std::str::FromStr for Weekday {
    type Err = EventCalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Weekday::ALL
            .into_iter()
            .find(|day| day.name() == wanted || day.name()[..3] == wanted)
            .ok_or_else(|| EventCalError::InvalidDate(format!("Unknown weekday '{s}'")))
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The recurrence pattern of an event, derived from its stored fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recurrence {
    NonRecurring,
    Daily,
    Weekly { days: Vec<Weekday> },
    Monthly { day_of_month: u32 },
    /// Recurring flag set but no usable frequency. Expands to nothing.
    Unsupported,
}

impl Event {
    pub fn from_input(id: EventId, input: EventInput) -> Self {
        Event {
            id,
            title: input.title,
            description: input.description,
            start_date: input.start_date,
            end_date: input.end_date,
            is_recurring: input.is_recurring,
            frequency: input.frequency,
            days_of_week: input.days_of_week,
            recurrence_end: input.recurrence_end,
        }
    }

    pub fn to_input(&self) -> EventInput {
        EventInput {
            title: self.title.clone(),
            description: self.description.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            is_recurring: self.is_recurring,
            frequency: self.frequency.clone(),
            days_of_week: self.days_of_week.clone(),
            recurrence_end: self.recurrence_end,
        }
    }

    pub fn start_day(&self) -> NaiveDate {
        self.start_date.date()
    }

    pub fn recurrence(&self) -> Recurrence {
        if !self.is_recurring {
            return Recurrence::NonRecurring;
        }

        match &self.frequency {
            Some(Frequency::Daily) => Recurrence::Daily,
            Some(Frequency::Weekly) => Recurrence::Weekly {
                days: self.days_of_week.clone(),
            },
            Some(Frequency::Monthly) => Recurrence::Monthly {
                day_of_month: self.start_date.day(),
            },
            Some(Frequency::Unrecognized(_)) | None => Recurrence::Unsupported,
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

impl EventInput {
    /// Check the payload the way the event form does before saving.
    ///
    /// Inverted ranges (end before start) are rejected.
    pub fn validate(&self) -> EventCalResult<()> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push(FieldError::new("title", "Title is required"));
        }

        if self.end_date < self.start_date {
            errors.push(FieldError::new(
                "endDate",
                "End date must not be before the start date",
            ));
        }

        if self.is_recurring {
            match &self.frequency {
                None => errors.push(FieldError::new(
                    "frequency",
                    "Select a recurrence frequency",
                )),
                Some(Frequency::Unrecognized(raw)) => errors.push(FieldError::new(
                    "frequency",
                    format!("Unknown recurrence frequency '{raw}'"),
                )),
                Some(Frequency::Weekly) if self.days_of_week.is_empty() => errors.push(
                    FieldError::new("daysOfWeek", "Select at least one day of the week"),
                ),
                Some(_) => {}
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(EventCalError::Validation(errors))
        }
    }
}

/// Serde helpers for naive local timestamps.
///
/// Reads anything `parse_timestamp` accepts, writes `YYYY-MM-DDTHH:MM:SS`.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::date_range::parse_timestamp;

    pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(
        value: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&value.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer};

        use crate::date_range::parse_timestamp;

        pub fn serialize<S: Serializer>(
            value: &Option<NaiveDateTime>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match value {
                Some(dt) => serializer.collect_str(&dt.format(super::FORMAT)),
                None => serializer.serialize_none(),
            }
        }

        /// Empty strings count as "not set", matching what an untouched
        /// date input submits.
        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<NaiveDateTime>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(raw) if !raw.trim().is_empty() => parse_timestamp(&raw)
                    .map(Some)
                    .map_err(serde::de::Error::custom),
                _ => Ok(None),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    fn input() -> EventInput {
        EventInput {
            title: "Standup".to_string(),
            description: None,
            start_date: at(2024, 3, 10),
            end_date: at(2024, 3, 10),
            is_recurring: false,
            frequency: None,
            days_of_week: vec![],
            recurrence_end: None,
        }
    }

    #[test]
    fn test_recurrence_from_stored_fields() {
        let mut event = Event::from_input(1, input());
        assert_eq!(event.recurrence(), Recurrence::NonRecurring);

        // frequency is irrelevant while the flag is off
        event.frequency = Some(Frequency::Daily);
        assert_eq!(event.recurrence(), Recurrence::NonRecurring);

        event.is_recurring = true;
        assert_eq!(event.recurrence(), Recurrence::Daily);

        event.frequency = Some(Frequency::Monthly);
        assert_eq!(event.recurrence(), Recurrence::Monthly { day_of_month: 10 });

        event.frequency = Some(Frequency::Weekly);
        event.days_of_week = vec![Weekday::Friday];
        assert_eq!(
            event.recurrence(),
            Recurrence::Weekly {
                days: vec![Weekday::Friday]
            }
        );

        event.frequency = Some(Frequency::from("YEARLY".to_string()));
        assert_eq!(event.recurrence(), Recurrence::Unsupported);

        event.frequency = None;
        assert_eq!(event.recurrence(), Recurrence::Unsupported);
    }

    #[test]
    fn test_deserialize_web_client_payload() {
        let json = r#"{
            "title": "Gym",
            "description": "",
            "startDate": "2024-03-01T18:00",
            "endDate": "2024-03-01T19:30",
            "isRecurring": true,
            "frequency": "WEEKLY",
            "daysOfWeek": ["MONDAY", "FRIDAY"],
            "recurrenceEnd": ""
        }"#;

        let parsed: EventInput = serde_json::from_str(json).unwrap();
        assert_eq!(
            parsed.start_date,
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(18, 0, 0)
                .unwrap()
        );
        assert_eq!(parsed.frequency, Some(Frequency::Weekly));
        assert_eq!(parsed.days_of_week, vec![Weekday::Monday, Weekday::Friday]);
        assert_eq!(parsed.recurrence_end, None);
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_unknown_frequency_survives_storage() {
        let json = r#"{
            "id": 7,
            "title": "Odd",
            "startDate": "2024-03-01T00:00:00",
            "endDate": "2024-03-01T01:00:00",
            "isRecurring": true,
            "frequency": "FORTNIGHTLY"
        }"#;

        let event: Event = serde_json::from_str(json).unwrap();
        assert_eq!(
            event.frequency,
            Some(Frequency::Unrecognized("FORTNIGHTLY".to_string()))
        );

        let written = serde_json::to_value(&event).unwrap();
        assert_eq!(written["frequency"], "FORTNIGHTLY");
        assert_eq!(written["startDate"], "2024-03-01T00:00:00");
        assert_eq!(written["recurrenceEnd"], serde_json::Value::Null);
    }

    #[test]
    fn test_validate_collects_every_problem() {
        let mut bad = input();
        bad.title = "   ".to_string();
        bad.end_date = at(2024, 3, 9);
        bad.is_recurring = true;
        bad.frequency = Some(Frequency::Weekly);

        let Err(EventCalError::Validation(errors)) = bad.validate() else {
            panic!("expected validation error");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "endDate", "daysOfWeek"]);
    }

    #[test]
    fn test_validate_requires_frequency_when_recurring() {
        let mut bad = input();
        bad.is_recurring = true;

        let err = bad.validate().unwrap_err();
        assert!(err.to_string().contains("frequency"));
    }

    #[test]
    fn test_weekday_parsing_and_labels() {
        assert_eq!("friday".parse::<Weekday>().unwrap(), Weekday::Friday);
        assert_eq!("MON".parse::<Weekday>().unwrap(), Weekday::Monday);
        assert!("someday".parse::<Weekday>().is_err());

        assert_eq!(Weekday::Wednesday.to_string(), "Wednesday");
        assert_eq!(Weekday::Wednesday.short_label(), "Wed");
        assert_eq!(
            Weekday::of(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()),
            Weekday::Friday
        );
    }
}
