//! Error handling for API endpoints

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use eventbook_core::error::{ErrorResponse, EventError};

/// One or more classified errors, ready to leave as an HTTP response.
///
/// The response body is always a JSON array of error envelopes, also when a
/// single fault is reported. The status comes from the first error's catalog
/// entry.
#[derive(Debug)]
pub struct ApiError {
    errors: Vec<EventError>,
}

impl ApiError {
    pub fn errors(&self) -> &[EventError] {
        &self.errors
    }

    fn status(&self) -> StatusCode {
        self.errors.first().map_or(
            StatusCode::INTERNAL_SERVER_ERROR,
            |error| {
                StatusCode::from_u16(error.http_status())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            },
        )
    }
}

impl From<EventError> for ApiError {
    fn from(error: EventError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl From<Vec<EventError>> for ApiError {
    fn from(errors: Vec<EventError>) -> Self {
        Self { errors }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        for error in &self.errors {
            if error.http_status() >= 500 {
                tracing::error!(
                    code = error.code().code(),
                    operation = error.operation(),
                    cause = ?error.cause(),
                    "request failed: {error}"
                );
            } else {
                tracing::debug!(
                    code = error.code().code(),
                    operation = error.operation(),
                    "request rejected: {error}"
                );
            }
        }

        let status = self.status();
        let body: Vec<ErrorResponse> = self.errors.iter().map(EventError::to_response).collect();
        (status, Json(body)).into_response()
    }
}
