//! Event business logic

use chrono::{DateTime, Utc};
use eventbook_core::codes::ErrorCode;
use eventbook_core::error::{Category, EventError};
use eventbook_core::models::Event;

use crate::store::EventStore;

/// Parses an RFC 3339 date-time into a UTC instant.
///
/// Field validation runs the same parser, so a body that passed its chains
/// parses here too. The code to report is the caller's field-specific
/// INVALID_FORMAT entry.
fn parse_instant(raw: &str, code: ErrorCode) -> Result<DateTime<Utc>, EventError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|parse_error| {
            EventError::new(code, Category::Service, "createEvent").with_cause(parse_error)
        })
}

/// Business rules over the event store.
#[derive(Debug, Clone)]
pub struct EventService {
    store: EventStore,
}

impl EventService {
    pub fn new(store: EventStore) -> Self {
        Self { store }
    }

    /// Parses the date strings, enforces the date-range rule and stores the
    /// event. The start must lie strictly before the end; equal timestamps
    /// are rejected.
    ///
    /// # Errors
    ///
    /// `STARTDATE_INVALID_FORMAT`/`ENDDATE_INVALID_FORMAT` when a date does
    /// not parse, `STARTDATE_GREATER_THAN_ENDDATE` when the range is empty
    /// or inverted, or a repository error from the store.
    pub fn create_event(
        &self,
        name: String,
        description: String,
        start_date: &str,
        end_date: &str,
    ) -> Result<Event, EventError> {
        let start = parse_instant(start_date, ErrorCode::StartDateInvalidFormat)?;
        let end = parse_instant(end_date, ErrorCode::EndDateInvalidFormat)?;

        if start >= end {
            return Err(EventError::new(
                ErrorCode::StartDateGreaterThanEndDate,
                Category::Service,
                "createEvent",
            ));
        }

        self.store
            .insert(Event::new(name, description, start, end))
    }

    /// All stored events.
    ///
    /// # Errors
    ///
    /// Repository errors from the store.
    pub fn events(&self) -> Result<Vec<Event>, EventError> {
        self.store.all()
    }

    /// Events whose name starts with `name`. An empty result is a normal
    /// outcome, not a fault.
    ///
    /// # Errors
    ///
    /// Repository errors from the store.
    pub fn events_by_name(&self, name: &str) -> Result<Vec<Event>, EventError> {
        self.store.by_name_prefix(name)
    }
}
