//! Stable error codes shared with API clients
//!
//! Codes are partitioned by numeric range: 1000s validation, 2000s
//! not-found/conflict, 4000s storage, 5000s internal/infrastructure.
//! Clients branch on the number, so values never change once published.

use std::fmt;

/// Every fault the API can report, as a stable numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    NameRequired = 1001,
    NameEmpty = 1002,
    NameMaxLength = 1003,
    DescriptionRequired = 1004,
    DescriptionEmpty = 1005,
    StartDateRequired = 1006,
    StartDateEmpty = 1007,
    StartDateInvalidFormat = 1008,
    EndDateRequired = 1009,
    EndDateEmpty = 1010,
    EndDateInvalidFormat = 1011,
    StartDateGreaterThanEndDate = 1012,
    InvalidJsonFormat = 1013,
    UnexpectedJsonFormat = 1014,
    EventNotFound = 2001,
    EventAlreadyExists = 2002,
    DatabaseError = 4001,
    InternalServerError = 5001,
    ConfigurationError = 5002,
}

impl ErrorCode {
    /// Numeric value sent over the wire.
    pub fn code(self) -> u16 {
        self as u16
    }

    /// HTTP status the code maps to.
    ///
    /// The match is exhaustive: a code without a status entry does not
    /// compile.
    pub fn http_status(self) -> u16 {
        match self {
            Self::NameRequired
            | Self::NameEmpty
            | Self::NameMaxLength
            | Self::DescriptionRequired
            | Self::DescriptionEmpty
            | Self::StartDateRequired
            | Self::StartDateEmpty
            | Self::StartDateInvalidFormat
            | Self::EndDateRequired
            | Self::EndDateEmpty
            | Self::EndDateInvalidFormat
            | Self::StartDateGreaterThanEndDate
            | Self::InvalidJsonFormat
            | Self::UnexpectedJsonFormat => 400,
            Self::EventNotFound => 404,
            Self::EventAlreadyExists => 409,
            Self::DatabaseError | Self::InternalServerError | Self::ConfigurationError => 500,
        }
    }

    /// Human-readable message the code maps to.
    pub fn message(self) -> &'static str {
        match self {
            Self::NameRequired => "The field Name is required",
            Self::NameEmpty => "The field Name cannot be empty",
            Self::NameMaxLength => "The field Name must be less than 32 characters",
            Self::DescriptionRequired => "The field Description is required",
            Self::DescriptionEmpty => "The field Description cannot be empty",
            Self::StartDateRequired => "The field StartDate is required",
            Self::StartDateEmpty => "The field StartDate cannot be empty",
            Self::StartDateInvalidFormat => {
                "The field StartDate has an invalid datetime ISO 8601 format"
            }
            Self::EndDateRequired => "The field EndDate is required",
            Self::EndDateEmpty => "The field EndDate cannot be empty",
            Self::EndDateInvalidFormat => {
                "The field EndDate has an invalid datetime ISO 8601 format"
            }
            Self::StartDateGreaterThanEndDate => "The field StartDate must be less than EndDate",
            Self::InvalidJsonFormat => "Invalid JSON format",
            Self::UnexpectedJsonFormat => "Unexpected JSON format",
            Self::EventNotFound => "Event not found",
            Self::EventAlreadyExists => "Event already exists",
            Self::DatabaseError => "Database error",
            Self::InternalServerError => "Internal server error",
            Self::ConfigurationError => "Service configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message(), self.code())
    }
}
