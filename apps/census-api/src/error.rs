//! HTTP error mapping for domain failures

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use census_domain::census::CensusError;
use tracing::{error, warn};

use crate::dto::ErrorResponse;

/// A domain error on its way out of a JSON handler
#[derive(Debug)]
pub struct ApiError(pub CensusError);

impl From<CensusError> for ApiError {
    fn from(err: CensusError) -> Self {
        Self(err)
    }
}

/// Status code for a domain error
pub fn status_for(err: &CensusError) -> StatusCode {
    match err {
        CensusError::NotFound { .. } => StatusCode::NOT_FOUND,
        CensusError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        CensusError::Conflict { .. } | CensusError::ConstraintViolation(_) => StatusCode::CONFLICT,
        CensusError::StorageFailure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Message sent to the client; storage details stay in the logs
pub fn client_message(err: &CensusError) -> String {
    match err {
        CensusError::StorageFailure(_) => "Internal server error".to_string(),
        other => other.to_string(),
    }
}

/// Log a failed request at a level matching its status
pub fn log_failure(err: &CensusError) {
    match err {
        CensusError::StorageFailure(_) => error!(error = %err, "Request failed"),
        _ => warn!(error = %err, "Request rejected"),
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log_failure(&self.0);
        let body = ErrorResponse {
            error: client_message(&self.0),
        };
        (status_for(&self.0), Json(body)).into_response()
    }
}
