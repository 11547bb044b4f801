//! Table bootstrap for the `countries` and `people` tables
//!
//! Every statement is idempotent so startup can run it against an existing
//! database.

use census_domain::census::NAME_MAX_LEN;
use sqlx::PgPool;
use tracing::info;

/// Create the tables and the foreign-key index if they do not exist yet
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    let statements = [
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS countries (
                id BIGSERIAL PRIMARY KEY,
                name VARCHAR({NAME_MAX_LEN}) NOT NULL,
                CONSTRAINT uq_countries_name UNIQUE (name)
            )
            "#
        ),
        format!(
            r#"
            CREATE TABLE IF NOT EXISTS people (
                id BIGSERIAL PRIMARY KEY,
                name VARCHAR({NAME_MAX_LEN}) NOT NULL,
                age INTEGER,
                country_id BIGINT NOT NULL,
                CONSTRAINT fk_people_country FOREIGN KEY (country_id) REFERENCES countries (id)
            )
            "#
        ),
        "CREATE INDEX IF NOT EXISTS idx_people_country_id ON people (country_id)".to_string(),
    ];

    for ddl in &statements {
        sqlx::query(ddl).execute(pool).await?;
    }

    info!("Database schema ready");
    Ok(())
}
