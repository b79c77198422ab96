use api::{AppState, config::Config, create_router};
use axum::{
    Router,
    body::Body,
    extract::ConnectInfo,
    http::{Request, StatusCode, header},
};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_allowed_origin: "*".to_string(),
        api_prefix: "/api/v1".to_string(),
    }
}

fn app() -> Router {
    create_router(AppState::new(), &test_config())
}

fn create_request(method: &str, uri: impl AsRef<str>, body: Body) -> Request<Body> {
    let mut req = Request::builder()
        .method(method)
        .uri(uri.as_ref())
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap();

    req.extensions_mut().insert(ConnectInfo(SocketAddr::new(
        IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)),
        8080,
    )));
    req
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn valid_event() -> Value {
    json!({
        "name": "event1",
        "description": "description1",
        "startDate": "2024-07-20T09:00:00+00:00",
        "endDate": "2024-07-20T17:00:00+00:00"
    })
}

#[tokio::test]
async fn test_create_event_returns_created_event() {
    let app = app();

    let response = app
        .oneshot(create_request(
            "POST",
            "/api/v1/events",
            Body::from(valid_event().to_string()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "event1");
    assert_eq!(created["description"], "description1");

    let start: DateTime<Utc> = created["startDate"].as_str().unwrap().parse().unwrap();
    let end: DateTime<Utc> = created["endDate"].as_str().unwrap().parse().unwrap();
    assert_eq!(start, "2024-07-20T09:00:00Z".parse::<DateTime<Utc>>().unwrap());
    assert_eq!(end, "2024-07-20T17:00:00Z".parse::<DateTime<Utc>>().unwrap());
}

#[tokio::test]
async fn test_created_events_get_sequential_ids() {
    let app = app();

    for expected_id in 1..=3 {
        let mut event = valid_event();
        event["name"] = json!(format!("event{expected_id}"));

        let response = app
            .clone()
            .oneshot(create_request(
                "POST",
                "/api/v1/events",
                Body::from(event.to_string()),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["id"], expected_id);
    }
}

#[tokio::test]
async fn test_empty_name_is_rejected_with_1002() {
    let app = app();
    let mut event = valid_event();
    event["name"] = json!("");

    let response = app
        .oneshot(create_request(
            "POST",
            "/api/v1/events",
            Body::from(event.to_string()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let errors = body_json(response).await;
    let errors = errors.as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["code"], 1002);
    assert_eq!(errors[0]["title"], "The field Name cannot be empty");
    assert_eq!(errors[0]["status"], 400);
    assert_eq!(errors[0]["instance"], "createEvent");
    assert_eq!(errors[0]["detail"], "");
    assert_eq!(errors[0]["type"], "validation");
}

#[tokio::test]
async fn test_too_long_name_is_rejected_with_1003() {
    let app = app();
    let mut event = valid_event();
    event["name"] = json!("1234567890123456789012345678901234567");

    let response = app
        .oneshot(create_request(
            "POST",
            "/api/v1/events",
            Body::from(event.to_string()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let errors = body_json(response).await;
    assert_eq!(errors[0]["code"], 1003);
}

#[tokio::test]
async fn test_missing_fields_report_in_declaration_order() {
    let app = app();

    let response = app
        .oneshot(create_request(
            "POST",
            "/api/v1/events",
            Body::from("{}"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let errors = body_json(response).await;
    let codes: Vec<i64> = errors
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["code"].as_i64().unwrap())
        .collect();
    assert_eq!(codes, vec![1001, 1004, 1006, 1009]);
}

#[tokio::test]
async fn test_invalid_date_formats_are_rejected() {
    let app = app();

    let mut event = valid_event();
    event["startDate"] = json!("12-10-2024");
    let response = app
        .clone()
        .oneshot(create_request(
            "POST",
            "/api/v1/events",
            Body::from(event.to_string()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await[0]["code"], 1008);

    let mut event = valid_event();
    event["endDate"] = json!("12-10-2024");
    let response = app
        .oneshot(create_request(
            "POST",
            "/api/v1/events",
            Body::from(event.to_string()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await[0]["code"], 1011);
}

#[tokio::test]
async fn test_start_not_strictly_before_end_is_rejected_with_1012() {
    let app = app();

    let mut event = valid_event();
    event["startDate"] = json!("2024-07-20T17:00:00+00:00");
    event["endDate"] = json!("2024-07-20T09:00:00+00:00");
    let response = app
        .clone()
        .oneshot(create_request(
            "POST",
            "/api/v1/events",
            Body::from(event.to_string()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let errors = body_json(response).await;
    assert_eq!(errors[0]["code"], 1012);
    assert_eq!(errors[0]["type"], "service");

    let mut event = valid_event();
    event["endDate"] = event["startDate"].clone();
    let response = app
        .oneshot(create_request(
            "POST",
            "/api/v1/events",
            Body::from(event.to_string()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await[0]["code"], 1012);
}

#[tokio::test]
async fn test_malformed_json_is_rejected_with_1013() {
    let app = app();

    let response = app
        .oneshot(create_request(
            "POST",
            "/api/v1/events",
            Body::from("{ this is not json"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let errors = body_json(response).await;
    assert_eq!(errors[0]["code"], 1013);
    assert_eq!(errors[0]["type"], "controller");
}

#[tokio::test]
async fn test_wrong_content_type_is_rejected_with_1013() {
    let app = app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/events")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(valid_event().to_string()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await[0]["code"], 1013);
}

#[tokio::test]
async fn test_non_object_body_is_rejected_with_1014() {
    let app = app();

    let response = app
        .oneshot(create_request(
            "POST",
            "/api/v1/events",
            Body::from("[1, 2, 3]"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let errors = body_json(response).await;
    assert_eq!(errors[0]["code"], 1014);
    assert_eq!(errors[0]["title"], "Unexpected JSON format");
}

#[tokio::test]
async fn test_non_string_field_is_rejected_with_1014() {
    let app = app();
    let mut event = valid_event();
    event["description"] = json!(7);

    let response = app
        .oneshot(create_request(
            "POST",
            "/api/v1/events",
            Body::from(event.to_string()),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await[0]["code"], 1014);
}

#[tokio::test]
async fn test_get_events_returns_all_stored_events() {
    let app = app();

    let response = app
        .clone()
        .oneshot(create_request("GET", "/api/v1/events", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));

    for name in ["event1", "event2"] {
        let mut event = valid_event();
        event["name"] = json!(name);
        let response = app
            .clone()
            .oneshot(create_request(
                "POST",
                "/api/v1/events",
                Body::from(event.to_string()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .oneshot(create_request("GET", "/api/v1/events", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let events = body_json(response).await;
    let names: Vec<&str> = events
        .as_array()
        .unwrap()
        .iter()
        .map(|event| event["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["event1", "event2"]);
}

#[tokio::test]
async fn test_get_event_by_name_matches_on_prefix() {
    let app = app();

    for name in ["event1", "evening standup", "retro"] {
        let mut event = valid_event();
        event["name"] = json!(name);
        app.clone()
            .oneshot(create_request(
                "POST",
                "/api/v1/events",
                Body::from(event.to_string()),
            ))
            .await
            .unwrap();
    }

    let response = app
        .clone()
        .oneshot(create_request("GET", "/api/v1/events/eve", Body::empty()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let events = body_json(response).await;
    assert_eq!(events.as_array().unwrap().len(), 2);

    let response = app
        .oneshot(create_request("GET", "/api/v1/events/event1", Body::empty()))
        .await
        .unwrap();
    let events = body_json(response).await;
    assert_eq!(events.as_array().unwrap().len(), 1);
    assert_eq!(events[0]["name"], "event1");
}

#[tokio::test]
async fn test_get_event_by_unknown_name_returns_empty_list() {
    let app = app();

    let response = app
        .oneshot(create_request("GET", "/api/v1/events/event2", Body::empty()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_get_event_by_too_long_name_is_rejected_before_lookup() {
    let app = app();

    let response = app
        .oneshot(create_request(
            "GET",
            format!("/api/v1/events/{}", "a".repeat(40)),
            Body::empty(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let errors = body_json(response).await;
    assert_eq!(errors[0]["code"], 1003);
    assert_eq!(errors[0]["instance"], "getEventByName");
}

#[tokio::test]
async fn test_rejected_event_is_not_stored() {
    let app = app();

    let mut event = valid_event();
    event["startDate"] = json!("2024-07-20T17:00:00+00:00");
    event["endDate"] = json!("2024-07-20T09:00:00+00:00");
    app.clone()
        .oneshot(create_request(
            "POST",
            "/api/v1/events",
            Body::from(event.to_string()),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(create_request("GET", "/api/v1/events", Body::empty()))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_health_endpoint_reports_ok() {
    let app = app();

    let response = app
        .oneshot(create_request("GET", "/health", Body::empty()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = app();

    let response = app
        .oneshot(create_request("GET", "/api-docs/openapi.json", Body::empty()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let document = body_json(response).await;
    assert!(document["paths"].get("/events").is_some());
}

#[tokio::test]
async fn test_api_prefix_is_configurable() {
    let mut config = test_config();
    config.api_prefix = "/api/v2".to_string();
    let app = create_router(AppState::new(), &config);

    let response = app
        .clone()
        .oneshot(create_request(
            "POST",
            "/api/v2/events",
            Body::from(valid_event().to_string()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(create_request(
            "POST",
            "/api/v1/events",
            Body::from(valid_event().to_string()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
