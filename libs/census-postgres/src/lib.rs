//! PostgreSQL adapter for the Census storage ports
//!
//! [`infrastructure::PgRepository`] implements both `CountryRepository` and
//! `PersonRepository` over a shared `sqlx` connection pool.

pub mod infrastructure;

pub use infrastructure::{ensure_schema, PgRepository};
