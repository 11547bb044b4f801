//! Person handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use census_domain::census::{CensusError, PersonDraft, PersonId};
use tracing::info;

use crate::{
    dto::person::{PersonRequest, PersonResponse},
    error::{client_message, log_failure, status_for, ApiError},
    AppState, CensusStore,
};

/// List all people with their countries
#[utoipa::path(
    get,
    path = "/api/v1/personas",
    responses(
        (status = 200, description = "All people", body = [PersonResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "people"
)]
pub async fn list_people<S: CensusStore>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<PersonResponse>>, ApiError> {
    info!("Received list people request");

    let people = state.person_service.list_all().await?;
    Ok(Json(people.into_iter().map(PersonResponse::from).collect()))
}

/// Get a person by id
#[utoipa::path(
    get,
    path = "/api/v1/personas/{id}",
    params(("id" = i64, Path, description = "Person id")),
    responses(
        (status = 200, description = "Person found", body = PersonResponse),
        (status = 404, description = "Person not found", body = ErrorResponse)
    ),
    tag = "people"
)]
pub async fn get_person<S: CensusStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Result<Json<PersonResponse>, ApiError> {
    info!(person_id = id, "Received get person request");

    let person = state
        .person_service
        .get_by_id(PersonId::new(id))
        .await?
        .ok_or_else(|| CensusError::person_not_found(id))?;
    Ok(Json(person.into()))
}

/// Create a person in an existing country
#[utoipa::path(
    post,
    path = "/api/v1/personas",
    request_body = PersonRequest,
    responses(
        (status = 201, description = "Person created", body = PersonResponse),
        (status = 400, description = "Country id missing", body = ErrorResponse),
        (status = 404, description = "Country not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "people"
)]
pub async fn create_person<S: CensusStore>(
    State(state): State<AppState<S>>,
    Json(payload): Json<PersonRequest>,
) -> Result<(StatusCode, Json<PersonResponse>), ApiError> {
    info!(name = %payload.name, "Received create person request");

    let person = state
        .person_service
        .create(PersonDraft::from(payload))
        .await?;
    Ok((StatusCode::CREATED, Json(person.into())))
}

/// Replace a person's name, age and country
///
/// A body without a country id is rejected with 400 and leaves the person
/// untouched; an unknown person or country gives 404.
#[utoipa::path(
    put,
    path = "/api/v1/personas/{id}",
    params(("id" = i64, Path, description = "Person id")),
    request_body = PersonRequest,
    responses(
        (status = 200, description = "Person updated", body = PersonResponse),
        (status = 400, description = "Country id missing", body = ErrorResponse),
        (status = 404, description = "Person or country not found", body = ErrorResponse)
    ),
    tag = "people"
)]
pub async fn update_person<S: CensusStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
    Json(payload): Json<PersonRequest>,
) -> Result<Json<PersonResponse>, ApiError> {
    info!(person_id = id, "Received update person request");

    let person = state
        .person_service
        .update(PersonId::new(id), PersonDraft::from(payload))
        .await?;
    Ok(Json(person.into()))
}

/// Delete a person
#[utoipa::path(
    delete,
    path = "/api/v1/personas/{id}",
    params(("id" = i64, Path, description = "Person id")),
    responses(
        (status = 200, description = "Person deleted", body = String, content_type = "text/plain"),
        (status = 404, description = "Person not found", body = String, content_type = "text/plain")
    ),
    tag = "people"
)]
pub async fn delete_person<S: CensusStore>(
    State(state): State<AppState<S>>,
    Path(id): Path<i64>,
) -> Response {
    info!(person_id = id, "Received delete person request");

    match state.person_service.delete(PersonId::new(id)).await {
        Ok(()) => (
            StatusCode::OK,
            format!("Person with id {id} deleted successfully"),
        )
            .into_response(),
        Err(err) => {
            log_failure(&err);
            (status_for(&err), client_message(&err)).into_response()
        }
    }
}
