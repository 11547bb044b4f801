mod pg_repository;
mod schema;

pub use pg_repository::PgRepository;
pub use schema::ensure_schema;
