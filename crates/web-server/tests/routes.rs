//! Router tests that need no database: request validation, routing and the
//! mapping of database failures onto HTTP 500.

mod common;

use axum::http::{Method, StatusCode};
use common::{offline_app, send};
use serde_json::json;

#[tokio::test]
async fn health_check_responds_ok() {
    let app = offline_app();
    let (status, _) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_vote_action_is_rejected_before_any_query() {
    let app = offline_app();
    for body in [json!({ "action": "neutral" }), json!({ "action": "LIKE" }), json!({})] {
        let (status, body) = send(&app, Method::PUT, "/jokes/1", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "error": "Invalid action" }));
    }
}

#[tokio::test]
async fn non_numeric_ids_are_client_errors() {
    let app = offline_app();
    let (status, _) = send(&app, Method::PUT, "/jokes/abc", Some(json!({ "action": "like" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, Method::DELETE, "/categories/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn assigning_without_a_category_name_is_not_found() {
    let app = offline_app();
    let (status, body) = send(&app, Method::POST, "/jokes/1/category", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({ "error": "Category not found" }));
}

#[tokio::test]
async fn database_failures_become_internal_errors() {
    let app = offline_app();
    for uri in ["/jokes", "/jokes/random", "/jokes/random/puns", "/jokes/puns", "/categories"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "GET {uri}");
        assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()));
    }

    let (status, _) = send(&app, Method::PUT, "/jokes/1", Some(json!({ "action": "like" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn unknown_routes_and_methods_are_rejected() {
    let app = offline_app();
    let (status, _) = send(&app, Method::GET, "/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::PATCH, "/jokes", None).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}
