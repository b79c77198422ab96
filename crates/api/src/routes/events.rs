//! Event REST API endpoints

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use eventbook_core::codes::ErrorCode;
use eventbook_core::error::{Category, ErrorResponse, EventError};
use eventbook_core::models::Event;
use serde::Deserialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::{AppState, error::ApiError};

/// Create event request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[schema(example = "event1")]
    pub name: String,
    #[schema(example = "description1")]
    pub description: String,
    /// RFC 3339 date-time
    #[schema(example = "2024-07-20T09:00:00+00:00")]
    pub start_date: String,
    /// RFC 3339 date-time
    #[schema(example = "2024-07-20T17:00:00+00:00")]
    pub end_date: String,
}

/// Create a new event
///
/// The body is taken as raw JSON first so the field chains can classify
/// every shape of bad input before any typed deserialization runs.
#[utoipa::path(
    post,
    path = "/events",
    request_body = CreateEventRequest,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Malformed body or validation failure", body = Vec<ErrorResponse>)
    ),
    tag = "events"
)]
pub(crate) async fn create_event(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(document) = payload.map_err(|rejection| {
        EventError::new(
            ErrorCode::InvalidJsonFormat,
            Category::Controller,
            "createEvent",
        )
        .with_cause(rejection)
    })?;

    let body = document.as_object().ok_or_else(|| {
        EventError::new(
            ErrorCode::UnexpectedJsonFormat,
            Category::Controller,
            "createEvent",
        )
    })?;

    state.validators.create_event.validate(body)?;

    // Chains only prove the date fields are well formed strings; other
    // fields may still carry non-string values the model rejects.
    let request: CreateEventRequest = serde_json::from_value(document).map_err(|serde_error| {
        EventError::new(
            ErrorCode::UnexpectedJsonFormat,
            Category::Controller,
            "createEvent",
        )
        .with_cause(serde_error)
    })?;

    let event = state.service.create_event(
        request.name,
        request.description,
        &request.start_date,
        &request.end_date,
    )?;

    Ok((StatusCode::CREATED, Json(event)).into_response())
}

/// List all events
#[utoipa::path(
    get,
    path = "/events",
    responses(
        (status = 200, description = "All stored events", body = Vec<Event>)
    ),
    tag = "events"
)]
pub(crate) async fn get_events(
    State(state): State<AppState>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let events = state.service.events()?;
    Ok(Json(events))
}

/// List events whose name starts with the given prefix
///
/// The path parameter runs through the same chain as the `name` body field.
/// No match is a 200 with an empty array, not a 404.
#[utoipa::path(
    get,
    path = "/events/{name}",
    params(
        ("name" = String, Path, description = "Name prefix to match")
    ),
    responses(
        (status = 200, description = "Matching events, possibly none", body = Vec<Event>),
        (status = 400, description = "Invalid name", body = Vec<ErrorResponse>)
    ),
    tag = "events"
)]
pub(crate) async fn get_event_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<Vec<Event>>, ApiError> {
    let mut params = Map::new();
    params.insert("name".to_owned(), Value::String(name.clone()));
    state.validators.event_name.validate(&params)?;

    let events = state.service.events_by_name(&name)?;
    Ok(Json(events))
}

/// Event routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event))
        .route("/events", get(get_events))
        .route("/events/{name}", get(get_event_by_name))
}
