//! In-memory event store.

use std::collections::BTreeMap;

use crate::error::{EventCalError, EventCalResult};
use crate::event::{Event, EventId, EventInput};
use crate::store::{EventStore, sort_by_start};

/// Events kept in a map keyed by id. Ids start at 1 and are never reused.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    events: BTreeMap<EventId, Event>,
    next_id: EventId,
}

impl Default for MemoryStore {
    fn default() -> Self {
        MemoryStore {
            events: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from previously saved events.
    ///
    /// `next_id` is bumped past the highest existing id if needed.
    pub fn from_parts(events: Vec<Event>, next_id: EventId) -> Self {
        let highest = events.iter().map(|e| e.id).max().unwrap_or(0);
        MemoryStore {
            events: events.into_iter().map(|e| (e.id, e)).collect(),
            next_id: next_id.max(highest + 1),
        }
    }

    pub fn next_id(&self) -> EventId {
        self.next_id
    }

    /// Events in id order
    pub fn events(&self) -> impl Iterator<Item = &Event> {
        self.events.values()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventStore for MemoryStore {
    fn create(&mut self, input: EventInput) -> EventCalResult<Event> {
        let id = self.next_id;
        self.next_id += 1;

        let event = Event::from_input(id, input);
        self.events.insert(id, event.clone());
        Ok(event)
    }

    fn get(&self, id: EventId) -> EventCalResult<Event> {
        self.events
            .get(&id)
            .cloned()
            .ok_or(EventCalError::EventNotFound(id))
    }

    fn update(&mut self, id: EventId, input: EventInput) -> EventCalResult<Event> {
        let slot = self
            .events
            .get_mut(&id)
            .ok_or(EventCalError::EventNotFound(id))?;

        *slot = Event::from_input(id, input);
        Ok(slot.clone())
    }

    fn delete(&mut self, id: EventId) -> EventCalResult<()> {
        self.events
            .remove(&id)
            .map(|_| ())
            .ok_or(EventCalError::EventNotFound(id))
    }

    fn list(&self) -> EventCalResult<Vec<Event>> {
        let mut events: Vec<Event> = self.events.values().cloned().collect();
        sort_by_start(&mut events);
        Ok(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Frequency, Weekday};
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn input(title: &str, start: NaiveDateTime) -> EventInput {
        EventInput {
            title: title.to_string(),
            description: None,
            start_date: start,
            end_date: start,
            is_recurring: false,
            frequency: None,
            days_of_week: vec![],
            recurrence_end: None,
        }
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let mut store = MemoryStore::new();
        let a = store.create(input("a", at(2024, 3, 1))).unwrap();
        let b = store.create(input("b", at(2024, 3, 2))).unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        store.delete(b.id).unwrap();
        let c = store.create(input("c", at(2024, 3, 3))).unwrap();
        assert_eq!(c.id, 3, "ids are not reused after delete");
    }

    #[test]
    fn test_list_orders_by_start_date() {
        let mut store = MemoryStore::new();
        store.create(input("late", at(2024, 5, 1))).unwrap();
        store.create(input("early", at(2024, 1, 1))).unwrap();
        store.create(input("also early", at(2024, 1, 1))).unwrap();

        let titles: Vec<String> = store.list().unwrap().into_iter().map(|e| e.title).collect();
        assert_eq!(titles, vec!["early", "also early", "late"]);
    }

    #[test]
    fn test_update_replaces_whole_record() {
        let mut store = MemoryStore::new();
        let mut original = input("Gym", at(2024, 3, 1));
        original.description = Some("legs".to_string());
        original.is_recurring = true;
        original.frequency = Some(Frequency::Weekly);
        original.days_of_week = vec![Weekday::Monday];
        let created = store.create(original).unwrap();

        let updated = store
            .update(created.id, input("Gym (moved)", at(2024, 3, 2)))
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.description, None);
        assert!(!updated.is_recurring);
        assert!(updated.days_of_week.is_empty());
        assert_eq!(store.get(created.id).unwrap(), updated);
    }

    #[test]
    fn test_missing_ids_are_not_found() {
        let mut store = MemoryStore::new();
        assert!(matches!(store.get(9), Err(EventCalError::EventNotFound(9))));
        assert!(matches!(
            store.update(9, input("x", at(2024, 1, 1))),
            Err(EventCalError::EventNotFound(9))
        ));
        assert!(matches!(store.delete(9), Err(EventCalError::EventNotFound(9))));
    }

    #[test]
    fn test_from_parts_never_hands_out_existing_id() {
        let existing = Event::from_input(5, input("kept", at(2024, 1, 1)));
        let mut store = MemoryStore::from_parts(vec![existing], 2);
        assert_eq!(store.next_id(), 6);
        assert_eq!(store.create(input("new", at(2024, 1, 2))).unwrap().id, 6);
    }
}
