//! JSON REST API handler modules.

#[allow(clippy::missing_errors_doc)]
pub mod places;

use axum::Router;
use axum::routing::get;

use places_app::ports::{MediaHost, PlaceRepository};

use crate::state::AppState;

/// Build the `/places` sub-router.
pub fn routes<R, M>() -> Router<AppState<R, M>>
where
    R: PlaceRepository + Send + Sync + 'static,
    M: MediaHost + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            get(places::list::<R, M>).post(places::create::<R, M>),
        )
        .route(
            "/{id}",
            get(places::search::<R, M>)
                .put(places::update::<R, M>)
                .delete(places::delete::<R, M>),
        )
}
