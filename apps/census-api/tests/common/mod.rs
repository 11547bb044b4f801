#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, Response};
use axum::Router;
use census_api::{create_router, AppState};
use census_domain::storage::InMemoryRepository;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

/// Build the full application router over an empty in-memory store.
pub fn build_test_app() -> Router {
    create_router(AppState::new(InMemoryRepository::new()))
}

/// Send a request without a body.
pub async fn send(app: &Router, method: Method, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Send a request with a JSON body.
pub async fn send_json(app: &Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as UTF-8 text.
pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Create a country and return its id.
pub async fn create_country(app: &Router, name: &str) -> i64 {
    let response = post_json(app, "/api/v1/paises", serde_json::json!({ "name": name })).await;
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a person in `country_id` and return the person's id.
pub async fn create_person(app: &Router, name: &str, age: Option<i32>, country_id: i64) -> i64 {
    let response = post_json(
        app,
        "/api/v1/personas",
        serde_json::json!({ "name": name, "age": age, "country": { "id": country_id } }),
    )
    .await;
    body_json(response).await["id"].as_i64().unwrap()
}
