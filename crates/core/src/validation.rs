//! Declarative field validation
//!
//! Validators are data: each field carries an ordered list of checks paired
//! with the error code to report when the check fails. A single runner walks
//! the chains, so adding a rule never means adding control flow.

use chrono::DateTime;
use serde_json::{Map, Value};

use crate::codes::ErrorCode;
use crate::error::{Category, EventError};

/// Longest accepted event name, in characters.
pub const MAX_NAME_LENGTH: usize = 32;

/// One predicate over a raw JSON field value.
///
/// Checks see the field as the client sent it (`None` when absent), so
/// format rules can be reported before any typed deserialization runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    /// Field must be present and not JSON `null`
    Required,
    /// A string value must not be `""`; non-strings pass
    NotEmpty,
    /// A string value must not exceed the limit; non-strings pass
    MaxLength(usize),
    /// A present value must be a string parsing as an ISO 8601 date-time;
    /// absent and null values pass
    Iso8601,
}

impl Check {
    /// Whether `value` satisfies this check.
    ///
    /// Only `Required` looks at presence. The other checks pass on absent
    /// fields and leave presence to an earlier `Required` in the chain.
    pub fn passes(self, value: Option<&Value>) -> bool {
        match self {
            Self::Required => !matches!(value, None | Some(Value::Null)),
            Self::NotEmpty => value.and_then(Value::as_str) != Some(""),
            Self::MaxLength(max) => value
                .and_then(Value::as_str)
                .is_none_or(|raw| raw.chars().count() <= max),
            Self::Iso8601 => match value {
                None | Some(Value::Null) => true,
                Some(raw) => raw
                    .as_str()
                    .is_some_and(|raw| DateTime::parse_from_rfc3339(raw).is_ok()),
            },
        }
    }
}

/// Ordered checks for one request field.
#[derive(Debug, Clone)]
pub struct FieldChain {
    name: &'static str,
    checks: Vec<(Check, ErrorCode)>,
}

/// Starts a chain for `name`. Checks run in the order they are added.
pub fn field(name: &'static str) -> FieldChain {
    FieldChain {
        name,
        checks: Vec::new(),
    }
}

impl FieldChain {
    pub fn required(mut self, code: ErrorCode) -> Self {
        self.checks.push((Check::Required, code));
        self
    }

    pub fn not_empty(mut self, code: ErrorCode) -> Self {
        self.checks.push((Check::NotEmpty, code));
        self
    }

    pub fn max_length(mut self, max: usize, code: ErrorCode) -> Self {
        self.checks.push((Check::MaxLength(max), code));
        self
    }

    pub fn iso8601(mut self, code: ErrorCode) -> Self {
        self.checks.push((Check::Iso8601, code));
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Code of the first failing check, if any. Later checks are not run,
    /// so one field reports at most one error per request.
    pub fn first_failure(&self, value: Option<&Value>) -> Option<ErrorCode> {
        self.checks
            .iter()
            .find(|(check, _)| !check.passes(value))
            .map(|&(_, code)| code)
    }
}

/// Field chains for one operation's request body.
#[derive(Debug, Clone)]
pub struct RequestValidator {
    operation: &'static str,
    chains: Vec<FieldChain>,
}

impl RequestValidator {
    pub fn new(operation: &'static str, chains: Vec<FieldChain>) -> Self {
        Self { operation, chains }
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Runs every chain against `body` and collects one error per failing
    /// field, in chain declaration order. An empty error list means the
    /// body passed.
    ///
    /// # Errors
    ///
    /// Returns all collected validation errors, never just the first one.
    pub fn validate(&self, body: &Map<String, Value>) -> Result<(), Vec<EventError>> {
        let errors: Vec<EventError> = self
            .chains
            .iter()
            .filter_map(|chain| {
                chain
                    .first_failure(body.get(chain.name))
                    .map(|code| EventError::new(code, Category::Validation, self.operation))
            })
            .collect();

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}
