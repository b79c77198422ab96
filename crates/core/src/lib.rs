//! Eventbook Core - Domain logic and models
//!
//! This crate contains pure domain logic with no I/O operations.
//! The error catalog, structured errors, and validation rules live here.

pub mod codes;
pub mod error;
pub mod models;
pub mod validation;

pub use codes::ErrorCode;
pub use error::{Category, ErrorResponse, EventError};
pub use models::Event;
pub use validation::{field, Check, FieldChain, RequestValidator, MAX_NAME_LENGTH};
