//! # Census API
//!
//! REST service exposing countries under `/api/v1/paises` and people under
//! `/api/v1/personas`. A country cannot be deleted while people still
//! reference it.
//!
//! The router is generic over its storage so the same handlers run against
//! PostgreSQL in production and an in-memory store in tests.

pub mod config;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use routes::create_router;
pub use state::{AppState, CensusStore};
