//! JSON file event store.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EventCalError, EventCalResult};
use crate::event::{Event, EventId, EventInput};
use crate::store::{EventStore, MemoryStore};

/// On-disk layout of the events file
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoreDocument {
    next_id: EventId,
    events: Vec<Event>,
}

/// Events held in memory and written back to a single JSON file after every
/// change.
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> EventCalResult<Self> {
        let path = path.into();

        let inner = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let doc: StoreDocument = serde_json::from_str(&content).map_err(|e| {
                EventCalError::Serialization(format!("{}: {e}", path.display()))
            })?;
            MemoryStore::from_parts(doc.events, doc.next_id)
        } else {
            MemoryStore::new()
        };

        tracing::info!(path = %path.display(), events = inner.len(), "opened event store");

        Ok(FileStore { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write `events` to a sibling temp file, then rename over the real one.
    ///
    /// Plain blocking I/O: handlers call this under the store's write lock so
    /// writes stay serialized.
    fn save(&self, events: &MemoryStore) -> EventCalResult<()> {
        let doc = StoreDocument {
            next_id: events.next_id(),
            events: events.events().cloned().collect(),
        };
        let content = serde_json::to_string_pretty(&doc)
            .map_err(|e| EventCalError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, content)?;
        std::fs::rename(&tmp_path, &self.path)?;

        tracing::debug!(path = %self.path.display(), "saved event store");
        Ok(())
    }

    /// Apply `change` to a copy of the events and keep it only once it is on
    /// disk. A failed save leaves memory as it was.
    fn commit<T>(
        &mut self,
        change: impl FnOnce(&mut MemoryStore) -> EventCalResult<T>,
    ) -> EventCalResult<T> {
        let mut next = self.inner.clone();
        let result = change(&mut next)?;
        self.save(&next)?;
        self.inner = next;
        Ok(result)
    }
}

impl EventStore for FileStore {
    fn create(&mut self, input: EventInput) -> EventCalResult<Event> {
        self.commit(|events| events.create(input))
    }

    fn get(&self, id: EventId) -> EventCalResult<Event> {
        self.inner.get(id)
    }

    fn update(&mut self, id: EventId, input: EventInput) -> EventCalResult<Event> {
        self.commit(|events| events.update(id, input))
    }

    fn delete(&mut self, id: EventId) -> EventCalResult<()> {
        self.commit(|events| events.delete(id))
    }

    fn list(&self) -> EventCalResult<Vec<Event>> {
        self.inner.list()
    }
}
