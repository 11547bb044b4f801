//! Request and response bodies

pub mod country;
pub mod person;

use serde::Serialize;
use utoipa::ToSchema;

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error description
    #[schema(example = "Country with id 7 not found")]
    pub error: String,
}
