//! Country handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use census_domain::census::{CensusError, CountryDraft, CountryId};
use tracing::info;

use crate::{
    dto::country::{CountryRequest, CountryResponse},
    error::{client_message, log_failure, status_for, ApiError},
    AppState, CensusStore,
};

/// List all countries
#[utoipa::path(
    get,
    path = "/api/v1/paises",
    responses(
        (status = 200, description = "All countries", body = [CountryResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "countries"
)]
pub async fn list_countries<S: CensusStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<CountryResponse>>, ApiError> {
    info!("Received list countries request");

    let countries = state.country_service.list_all().await?;
    Ok(Json(countries.into_iter().map(CountryResponse::from).collect()))
}

/// Get a country by id
#[utoipa::path(
    get,
    path = "/api/v1/paises/{id}",
    params(("id" = i64, Path, description = "Country id")),
    responses(
        (status = 200, description = "Country found", body = CountryResponse),
        (status = 404, description = "Country not found", body = ErrorResponse)
    ),
    tag = "countries"
)]
pub async fn get_country<S: CensusStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<Json<CountryResponse>, ApiError> {
    info!(country_id = id, "Received get country request");

    let country = state
        .country_service
        .get_by_id(CountryId::new(id))
        .await?
        .ok_or_else(|| CensusError::country_not_found(id))?;
    Ok(Json(country.into()))
}

/// Create a country
#[utoipa::path(
    post,
    path = "/api/v1/paises",
    request_body = CountryRequest,
    responses(
        (status = 201, description = "Country created", body = CountryResponse),
        (status = 409, description = "A country with this name already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "countries"
)]
pub async fn create_country<S: CensusStore>(
    State(state): State<AppState<S>>,
    Json(payload): Json<CountryRequest>,
) -> Result<(StatusCode, Json<CountryResponse>), ApiError> {
    info!(name = %payload.name, "Received create country request");

    let country = state
        .country_service
        .create(CountryDraft::from(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(country.into())))
}

/// Rename a country
#[utoipa::path(
    put,
    path = "/api/v1/paises/{id}",
    params(("id" = i64, Path, description = "Country id")),
    request_body = CountryRequest,
    responses(
        (status = 200, description = "Country updated", body = CountryResponse),
        (status = 404, description = "Country not found", body = ErrorResponse),
        (status = 409, description = "A country with this name already exists", body = ErrorResponse)
    ),
    tag = "countries"
)]
pub async fn update_country<S: CensusStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
    Json(payload): Json<CountryRequest>,
) -> Result<Json<CountryResponse>, ApiError> {
    info!(country_id = id, "Received update country request");

    let country = state
        .country_service
        .update(CountryId::new(id), CountryDraft::from(payload))
        .await?;
    Ok(Json(country.into()))
}

/// Delete a country that no person references
#[utoipa::path(
    delete,
    path = "/api/v1/paises/{id}",
    params(("id" = i64, Path, description = "Country id")),
    responses(
        (status = 200, description = "Country deleted", body = String, content_type = "text/plain"),
        (status = 404, description = "Country not found", body = String, content_type = "text/plain"),
        (status = 409, description = "Country still has associated people", body = String, content_type = "text/plain")
    ),
    tag = "countries"
)]
pub async fn delete_country<S: CensusStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Response {
    info!(country_id = id, "Received delete country request");

    match state.country_service.delete(CountryId::new(id)).await {
        Ok(()) => (
            StatusCode::OK,
            format!("Country with id {id} deleted successfully"),
        )
            .into_response(),
        Err(err) => {
            log_failure(&err);
            (status_for(&err), client_message(&err)).into_response()
        }
    }
}
