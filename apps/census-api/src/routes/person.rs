//! Person routes

use axum::{routing::get, Router};

use crate::{handlers::person, AppState, CensusStore};

/// Create person routes, nested under `/api/v1/personas`
pub fn routes<S: CensusStore>() -> Router<AppState<S>> {
    Router::new()
        .route(
            "/",
            get(person::list_people::<S>).post(person::create_person::<S>),
        )
        .route(
            "/:id",
            get(person::get_person::<S>)
                .put(person::update_person::<S>)
                .delete(person::delete_person::<S>),
        )
}
