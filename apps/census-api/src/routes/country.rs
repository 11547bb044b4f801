//! Country routes

use axum::{routing::get, Router};

use crate::{handlers::country, AppState, CensusStore};

/// Create country routes, nested under `/api/v1/paises`
pub fn routes<S: CensusStore>() -> Router<AppState<S>> {
    Router::new()
        .route(
            "/",
            get(country::list_countries::<S>).post(country::create_country::<S>),
        )
        .route(
            "/:id",
            get(country::get_country::<S>)
                .put(country::update_country::<S>)
                .delete(country::delete_country::<S>),
        )
}
