//! API routes

pub mod country;
pub mod person;

use std::time::Duration;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    dto::{
        country::{CountryRequest, CountryResponse},
        person::{CountryRef, PersonRequest, PersonResponse},
        ErrorResponse,
    },
    handlers, AppState, CensusStore,
};

/// How long browsers may cache a preflight response
const CORS_MAX_AGE: Duration = Duration::from_secs(3600);

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::country::list_countries,
        handlers::country::get_country,
        handlers::country::create_country,
        handlers::country::update_country,
        handlers::country::delete_country,
        handlers::person::list_people,
        handlers::person::get_person,
        handlers::person::create_person,
        handlers::person::update_person,
        handlers::person::delete_person,
        health_handler
    ),
    components(
        schemas(
            CountryRequest,
            CountryResponse,
            CountryRef,
            PersonRequest,
            PersonResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "countries", description = "Country management"),
        (name = "people", description = "Person management"),
        (name = "health", description = "Health check endpoints")
    ),
    info(
        title = "Census API",
        version = "0.1.0",
        description = "Countries and the people who belong to them"
    )
)]
pub struct ApiDoc;

/// Create the main application router
pub fn create_router<S: CensusStore>(state: AppState<S>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(CORS_MAX_AGE);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api/v1/paises", country::routes::<S>())
        .nest("/api/v1/personas", person::routes::<S>())
        .route("/health", get(health_handler))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = String)
    ),
    tag = "health"
)]
async fn health_handler() -> &'static str {
    "OK"
}
