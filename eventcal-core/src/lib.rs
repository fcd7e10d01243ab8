//! Core types for eventcal.
//!
//! This crate is shared by the server and the CLI:
//! - `event`: the stored `Event` and its recurrence fields
//! - `recurrence`: projecting an event onto the days of a month
//! - `grid`: the week-aligned month grid with per-day event buckets
//! - `store`: the `EventStore` trait and its memory and file backends

pub mod config;
pub mod date_range;
pub mod error;
pub mod event;
pub mod grid;
pub mod recurrence;
pub mod store;

pub use error::{EventCalError, EventCalResult};
pub use event::{Event, EventId, EventInput, Frequency, Recurrence, Weekday};
