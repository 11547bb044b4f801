//! Integration tests for the health check, docs and CORS behaviour.

mod common;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use common::{body_json, body_text, get};
use tower::ServiceExt;

#[tokio::test]
async fn health_check_returns_ok() {
    let app = common::build_test_app();
    let response = get(&app, "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");
}

#[tokio::test]
async fn unknown_route_returns_404() {
    let app = common::build_test_app();
    let response = get(&app, "/this-route-does-not-exist").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn openapi_document_lists_resources() {
    let app = common::build_test_app();
    let response = get(&app, "/api-docs/openapi.json").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert!(json["paths"]["/api/v1/paises"].is_object());
    assert!(json["paths"]["/api/v1/personas/{id}"].is_object());
}

#[tokio::test]
async fn any_origin_is_allowed() {
    let app = common::build_test_app();
    let request = Request::builder()
        .uri("/api/v1/paises")
        .header("origin", "http://example.com")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn preflight_is_cached_for_an_hour() {
    let app = common::build_test_app();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/v1/personas")
        .header("origin", "http://example.com")
        .header("access-control-request-method", "DELETE")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("access-control-max-age").unwrap(),
        "3600"
    );
}
