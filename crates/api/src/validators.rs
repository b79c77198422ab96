//! Validator declarations for the event routes
//!
//! Chains are built once at startup and shared read-only across requests.

use eventbook_core::codes::ErrorCode;
use eventbook_core::validation::{MAX_NAME_LENGTH, RequestValidator, field};

/// The validators every event route needs, built once per process.
#[derive(Debug, Clone)]
pub struct Validators {
    pub create_event: RequestValidator,
    pub event_name: RequestValidator,
}

impl Validators {
    pub fn new() -> Self {
        Self {
            create_event: RequestValidator::new(
                "createEvent",
                vec![
                    field("name")
                        .required(ErrorCode::NameRequired)
                        .not_empty(ErrorCode::NameEmpty)
                        .max_length(MAX_NAME_LENGTH, ErrorCode::NameMaxLength),
                    field("description")
                        .required(ErrorCode::DescriptionRequired)
                        .not_empty(ErrorCode::DescriptionEmpty),
                    field("startDate")
                        .required(ErrorCode::StartDateRequired)
                        .not_empty(ErrorCode::StartDateEmpty)
                        .iso8601(ErrorCode::StartDateInvalidFormat),
                    field("endDate")
                        .required(ErrorCode::EndDateRequired)
                        .not_empty(ErrorCode::EndDateEmpty)
                        .iso8601(ErrorCode::EndDateInvalidFormat),
                ],
            ),
            event_name: RequestValidator::new(
                "getEventByName",
                vec![
                    field("name")
                        .required(ErrorCode::NameRequired)
                        .not_empty(ErrorCode::NameEmpty)
                        .max_length(MAX_NAME_LENGTH, ErrorCode::NameMaxLength),
                ],
            ),
        }
    }
}

impl Default for Validators {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Map, Value, json};

    fn body(raw: Value) -> Map<String, Value> {
        raw.as_object().cloned().unwrap()
    }

    #[test]
    fn test_create_event_reports_fields_in_declaration_order() {
        let validators = Validators::new();

        let errors = validators
            .create_event
            .validate(&body(json!({})))
            .unwrap_err();
        let codes: Vec<u16> = errors.iter().map(|e| e.code().code()).collect();

        // name, description, startDate, endDate
        assert_eq!(codes, vec![1001, 1004, 1006, 1009]);
    }

    #[test]
    fn test_create_event_accepts_a_valid_body() {
        let validators = Validators::new();

        let result = validators.create_event.validate(&body(json!({
            "name": "Standup",
            "description": "Daily sync",
            "startDate": "2024-10-12T09:00:00Z",
            "endDate": "2024-10-12T09:15:00Z",
        })));

        assert!(result.is_ok());
    }

    #[test]
    fn test_event_name_checks_length() {
        let validators = Validators::new();

        let errors = validators
            .event_name
            .validate(&body(json!({"name": "a".repeat(40)})))
            .unwrap_err();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code().code(), 1003);
        assert_eq!(errors[0].operation(), "getEventByName");
    }
}
