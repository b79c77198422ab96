//! Structured errors carried from fault site to HTTP response

use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;

use crate::codes::ErrorCode;

/// Layer that raised an error, rendered as the envelope `type` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Validation,
    Controller,
    Service,
    Repository,
    Infrastructure,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Controller => "controller",
            Self::Service => "service",
            Self::Repository => "repository",
            Self::Infrastructure => "infrastructure",
        }
    }
}

/// A classified fault: what went wrong, where, and during which operation.
///
/// Status and title are derived from the code catalog, never stored. The
/// wrapped cause stays out of the wire format except for its top-level
/// message, which becomes the envelope `detail`.
#[derive(Error, Debug)]
#[error("{operation}: {code}")]
pub struct EventError {
    code: ErrorCode,
    category: Category,
    operation: &'static str,
    #[source]
    cause: Option<anyhow::Error>,
}

impl EventError {
    pub fn new(code: ErrorCode, category: Category, operation: &'static str) -> Self {
        Self {
            code,
            category,
            operation,
            cause: None,
        }
    }

    /// Attaches the underlying fault.
    pub fn with_cause(mut self, cause: impl Into<anyhow::Error>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Unanticipated failure inside `operation`, wrapped as code 5001 with
    /// the original fault preserved as cause.
    pub fn internal(operation: &'static str, cause: impl Into<anyhow::Error>) -> Self {
        Self::new(ErrorCode::InternalServerError, Category::Service, operation)
            .with_cause(cause)
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    pub fn cause(&self) -> Option<&anyhow::Error> {
        self.cause.as_ref()
    }

    /// Envelope `detail`: the cause's message, or empty when there is none.
    pub fn detail(&self) -> String {
        self.cause
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_default()
    }

    /// Serializable envelope entry for this error.
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code.code(),
            title: self.code.message().to_owned(),
            status: self.code.http_status(),
            instance: self.operation.to_owned(),
            detail: self.detail(),
            category: self.category,
        }
    }
}

/// One entry of the JSON error envelope.
///
/// Responses always carry an array of these, even for a single fault.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Stable numeric code from the catalog
    #[schema(example = 1002)]
    pub code: u16,
    /// Catalog message for the code
    #[schema(example = "The field Name cannot be empty")]
    pub title: String,
    /// HTTP status the code maps to
    #[schema(example = 400)]
    pub status: u16,
    /// Operation that raised the error
    #[schema(example = "createEvent")]
    pub instance: String,
    /// Top-level message of the wrapped cause, empty when none
    #[schema(example = "")]
    pub detail: String,
    /// Layer that raised the error
    #[serde(rename = "type")]
    pub category: Category,
}
