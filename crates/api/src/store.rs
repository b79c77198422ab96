//! In-memory event repository

use std::sync::{Arc, RwLock};

use eventbook_core::codes::ErrorCode;
use eventbook_core::error::{Category, EventError};
use eventbook_core::models::Event;

#[derive(Debug, Default)]
struct StoreInner {
    events: Vec<Event>,
    next_id: i64,
}

/// Events held in process memory behind a reader-writer lock.
///
/// Ids are assigned from a counter that only moves forward, so an id is
/// never reused after a delete. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    inner: Arc<RwLock<StoreInner>>,
}

/// A poisoned lock is this store's storage failure.
fn storage_error(operation: &'static str) -> EventError {
    EventError::new(ErrorCode::DatabaseError, Category::Repository, operation)
        .with_cause(anyhow::anyhow!("event store lock poisoned"))
}

impl EventStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `event` under a freshly assigned id and returns it.
    ///
    /// # Errors
    ///
    /// `DatabaseError` when the store lock is poisoned.
    pub fn insert(&self, mut event: Event) -> Result<Event, EventError> {
        let mut inner = self.inner.write().map_err(|_| storage_error("addEvent"))?;
        inner.next_id += 1;
        event.id = inner.next_id;
        inner.events.push(event.clone());
        Ok(event)
    }

    /// All stored events in insertion order.
    ///
    /// # Errors
    ///
    /// `DatabaseError` when the store lock is poisoned.
    pub fn all(&self) -> Result<Vec<Event>, EventError> {
        let inner = self.inner.read().map_err(|_| storage_error("getEvents"))?;
        Ok(inner.events.clone())
    }

    /// Events whose name starts with `name`.
    ///
    /// # Errors
    ///
    /// `DatabaseError` when the store lock is poisoned.
    pub fn by_name_prefix(&self, name: &str) -> Result<Vec<Event>, EventError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| storage_error("getEventByName"))?;
        Ok(inner
            .events
            .iter()
            .filter(|event| event.name.starts_with(name))
            .cloned()
            .collect())
    }

    /// Looks an event up by its assigned id.
    ///
    /// # Errors
    ///
    /// `DatabaseError` when the store lock is poisoned.
    pub fn by_id(&self, id: i64) -> Result<Option<Event>, EventError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| storage_error("getEventById"))?;
        Ok(inner.events.iter().find(|event| event.id == id).cloned())
    }

    /// Replaces the stored event with the same id. Returns `None` when no
    /// event has that id.
    ///
    /// # Errors
    ///
    /// `DatabaseError` when the store lock is poisoned.
    pub fn update(&self, event: Event) -> Result<Option<Event>, EventError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| storage_error("updateEvent"))?;
        match inner.events.iter_mut().find(|stored| stored.id == event.id) {
            Some(stored) => {
                *stored = event.clone();
                Ok(Some(event))
            }
            None => Ok(None),
        }
    }

    /// Removes the event with `id`. Returns whether anything was removed.
    ///
    /// # Errors
    ///
    /// `DatabaseError` when the store lock is poisoned.
    pub fn delete(&self, id: i64) -> Result<bool, EventError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| storage_error("deleteEvent"))?;
        let before = inner.events.len();
        inner.events.retain(|event| event.id != id);
        Ok(inner.events.len() < before)
    }
}
