//! Domain model for stored events

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A scheduled event with a validated date range.
///
/// Dates are UTC instants. Field names serialize in camelCase to match the
/// wire format (`startDate`, `endDate`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Assigned by the repository on insert
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Team standup")]
    pub name: String,
    #[schema(example = "Daily sync for the platform team")]
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

impl Event {
    /// Builds an event that has not been stored yet. The repository
    /// replaces the placeholder id on insert.
    pub fn new(
        name: String,
        description: String,
        start_date: DateTime<Utc>,
        end_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            name,
            description,
            start_date,
            end_date,
        }
    }
}
