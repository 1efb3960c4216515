//! Integration tests for the request lifecycle endpoints.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    authed_json_request, authed_request, create_test_app, json_request, parse_response_body,
    sample_request_body, unlock_token, TEST_ACCESS_TOKEN, TEST_PIN,
};
use serde_json::json;

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn test_create_request_success() {
    let app = create_test_app();

    let response = app
        .send(json_request(
            Method::POST,
            "/api/requests",
            json!({
                "requester": "Al",
                "category": "Tea",
                "location": "3F-212",
                "teamId": "team-1"
            }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    assert!(body.get("id").is_some());
    assert_eq!(body["status"], "pending");
    assert_eq!(body["teamId"], "team-1");
    assert_eq!(body["location"], "3F-212");
    assert!(body.get("createdAt").is_some());
}

#[tokio::test]
async fn test_create_request_missing_location() {
    let app = create_test_app();

    let response = app
        .send(json_request(
            Method::POST,
            "/api/requests",
            json!({ "requester": "Al", "category": "Coffee" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_create_request_blank_location() {
    let app = create_test_app();

    let response = app
        .send(json_request(
            Method::POST,
            "/api/requests",
            json!({ "location": "   " }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_request_defaults_optional_fields() {
    let app = create_test_app();

    let response = app
        .send(json_request(
            Method::POST,
            "/api/requests",
            json!({ "location": "1F lobby" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    assert_eq!(body["requester"], "");
    assert_eq!(body["category"], "Other");
    assert_eq!(body["quantity"], "");
    assert!(body["teamId"].is_null());
}

// ============================================================================
// List
// ============================================================================

#[tokio::test]
async fn test_list_requests_newest_first() {
    let app = create_test_app();

    let mut ids = Vec::new();
    for _ in 0..3 {
        let response = app
            .send(json_request(
                Method::POST,
                "/api/requests",
                sample_request_body(Some("team-1")),
            ))
            .await;
        let body = parse_response_body(response).await;
        ids.push(body["id"].as_str().unwrap().to_string());
    }

    let response = app
        .send(json_request(Method::GET, "/api/requests", json!(null)))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 3);
    // Newest first
    assert_eq!(listed[0]["id"], json!(ids[2]));
    assert_eq!(listed[2]["id"], json!(ids[0]));
    for pair in listed.windows(2) {
        let newer = chrono::DateTime::parse_from_rfc3339(pair[0]["createdAt"].as_str().unwrap());
        let older = chrono::DateTime::parse_from_rfc3339(pair[1]["createdAt"].as_str().unwrap());
        assert!(newer.unwrap() >= older.unwrap());
    }
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn test_update_without_token_is_forbidden() {
    let app = create_test_app();

    let response = app
        .send(json_request(
            Method::POST,
            "/api/requests",
            sample_request_body(None),
        ))
        .await;
    let created = parse_response_body(response).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .send(json_request(
            Method::PATCH,
            &format!("/api/requests/{id}"),
            json!({ "status": "done" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_with_unknown_token_is_forbidden() {
    let app = create_test_app();

    let response = app
        .send(json_request(
            Method::POST,
            "/api/requests",
            sample_request_body(None),
        ))
        .await;
    let created = parse_response_body(response).await;
    let id = created["id"].as_str().unwrap();

    let response = app
        .send(authed_json_request(
            Method::PATCH,
            &format!("/api/requests/{id}"),
            json!({ "status": "done" }),
            "deadbeef",
        ))
        .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_status_with_session() {
    let app = create_test_app();

    let response = app
        .send(json_request(
            Method::POST,
            "/api/requests",
            json!({
                "requester": "Al",
                "category": "WiFi",
                "location": "3F-212",
                "quantity": "1"
            }),
        ))
        .await;
    let created = parse_response_body(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let token = unlock_token(&app, TEST_PIN).await;
    let response = app
        .send(authed_json_request(
            Method::PATCH,
            &format!("/api/requests/{id}"),
            json!({ "status": "done" }),
            &token,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "done");
    // Other fields unchanged
    assert_eq!(body["id"], json!(id));
    assert_eq!(body["requester"], "Al");
    assert_eq!(body["category"], "WiFi");
    assert_eq!(body["location"], "3F-212");
    assert_eq!(body["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn test_update_with_test_access_token() {
    let app = create_test_app();

    let response = app
        .send(json_request(
            Method::POST,
            "/api/requests",
            sample_request_body(None),
        ))
        .await;
    let created = parse_response_body(response).await;
    let id = created["id"].as_str().unwrap();

    let request = axum::http::Request::builder()
        .method(Method::PATCH)
        .uri(format!("/api/requests/{id}"))
        .header("content-type", "application/json")
        .header("x-access-token", TEST_ACCESS_TOKEN)
        .body(axum::body::Body::from(
            serde_json::to_string(&json!({ "status": "done" })).unwrap(),
        ))
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_update_missing_request_is_not_found() {
    let app = create_test_app();
    let token = unlock_token(&app, TEST_PIN).await;

    let response = app
        .send(authed_json_request(
            Method::PATCH,
            "/api/requests/00000000-0000-0000-0000-000000000000",
            json!({ "status": "done" }),
            &token,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "not_found");
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn test_delete_without_token_is_forbidden() {
    let app = create_test_app();

    let response = app
        .send(json_request(
            Method::POST,
            "/api/requests",
            sample_request_body(None),
        ))
        .await;
    let created = parse_response_body(response).await;
    let id = created["id"].as_str().unwrap();

    let request = axum::http::Request::builder()
        .method(Method::DELETE)
        .uri(format!("/api/requests/{id}"))
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_removes_request_from_listing() {
    let app = create_test_app();

    let response = app
        .send(json_request(
            Method::POST,
            "/api/requests",
            sample_request_body(Some("team-1")),
        ))
        .await;
    let created = parse_response_body(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let token = unlock_token(&app, TEST_PIN).await;
    let response = app
        .send(authed_request(
            Method::DELETE,
            &format!("/api/requests/{id}"),
            &token,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .send(json_request(Method::GET, "/api/requests", json!(null)))
        .await;
    let body = parse_response_body(response).await;
    assert!(body.as_array().unwrap().is_empty());

    // Deleting again reports not found
    let response = app
        .send(authed_request(
            Method::DELETE,
            &format!("/api/requests/{id}"),
            &token,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_missing_request_is_not_found() {
    let app = create_test_app();
    let token = unlock_token(&app, TEST_PIN).await;

    let response = app
        .send(authed_request(
            Method::DELETE,
            "/api/requests/00000000-0000-0000-0000-000000000000",
            &token,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();

    let request = axum::http::Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["connected"], true);
}
