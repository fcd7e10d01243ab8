//! Event storage.
//!
//! The web layer and the month view only see the [`EventStore`] trait; which
//! backend sits behind it is decided at startup.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::EventCalResult;
use crate::event::{Event, EventId, EventInput};

/// Keyed create/read/update/delete access to events.
///
/// Stores do not validate input; that happens at the API boundary.
pub trait EventStore: Send + Sync {
    /// Persist a new event and return it with its assigned id.
    fn create(&mut self, input: EventInput) -> EventCalResult<Event>;

    fn get(&self, id: EventId) -> EventCalResult<Event>;

    /// Replace every field of an existing event.
    fn update(&mut self, id: EventId, input: EventInput) -> EventCalResult<Event>;

    fn delete(&mut self, id: EventId) -> EventCalResult<()>;

    /// All events, ordered by start date (ties by id).
    fn list(&self) -> EventCalResult<Vec<Event>>;
}

/// Sort the way `EventStore::list` promises.
pub(crate) fn sort_by_start(events: &mut [Event]) {
    events.sort_by(|a, b| a.start_date.cmp(&b.start_date).then(a.id.cmp(&b.id)));
}
