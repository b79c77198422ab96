//! OpenAPI documentation

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::events::create_event,
        crate::routes::events::get_events,
        crate::routes::events::get_event_by_name,
        crate::routes::health::health_check,
    ),
    components(
        schemas(
            crate::routes::events::CreateEventRequest,
            eventbook_core::models::Event,
            eventbook_core::error::ErrorResponse,
        )
    ),
    tags(
        (name = "events", description = "Event management"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
